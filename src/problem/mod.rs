//! Problem model: jobs, batch capacity, and the optional conflict graph.

mod error;
mod generator;
mod instance;
mod job;

pub use error::InstanceError;
pub use generator::InstanceGenerator;
pub use instance::{Instance, ProblemVariant};
pub use job::Job;
