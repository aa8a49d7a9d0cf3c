pub mod traits;
pub mod generation;
pub mod search_space;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use generation::GenerationConfig;
pub use search_space::{OperatorDescriptor, SearchSpace, SearchSpaceEntry, PARAM_CHECK};
pub use traits::ConfigSection;
