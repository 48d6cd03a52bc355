pub mod client;
pub mod simulated;

pub use client::{GenerationReport, GeneratorClient, GeneratorError, ProjectSpec};
pub use simulated::SimulatedGenerator;
