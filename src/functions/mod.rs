pub mod traits;
pub mod checks;
pub mod registry;

pub use traits::{Assignment, FnCheck, ParameterCheck};
pub use checks::LinearSvcCheck;
pub use registry::CheckRegistry;
