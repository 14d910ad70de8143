pub mod engine;
pub mod serialization;
