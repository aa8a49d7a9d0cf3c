pub mod terminal;
pub mod primitive;
pub mod fitness;
pub mod individual;
pub mod primitive_set;
pub mod generator;
pub mod serialization;
pub mod operators;
pub mod population;

pub use terminal::Terminal;
pub use primitive::{Primitive, PrimitiveNode, Upstream};
pub use fitness::Fitness;
pub use individual::{Individual, IndividualRecord};
pub use primitive_set::{PrimitiveSet, ValidityChecks};
pub use generator::{random_individual, random_primitive_node, random_terminals_for_primitive};
pub use serialization::{from_pipeline_string, to_pipeline_string};
pub use operators::{mutate_replace_primitive, mutate_replace_terminal};
pub use population::Population;
