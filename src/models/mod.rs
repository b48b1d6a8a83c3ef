// Core data models for powertier
// Stages of the hierarchy, loaded tables and column mappings

pub mod stage;
pub mod table;
pub mod mapping;

pub use stage::*;
pub use table::*;
pub use mapping::*;
