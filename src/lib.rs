//! batchsched - column generation pricing for batch scheduling
//!
//! Jobs with a processing time and a size are grouped into batches whose total
//! size fits a capacity; a batch runs as long as its longest job and the goal is
//! the smallest sum of batch durations. Optionally some job pairs may not share
//! a batch.
//!
//! The crate provides the pieces a column generation master loop calls into:
//! the instance model, the pricing oracle that turns dual prices into a new
//! batch, and an independent checker for finished schedules.

pub mod checker;
pub mod knapsack;
pub mod pricing;
pub mod problem;

/// Identifier of a job: its position in the instance, starting at 0.
pub type JobId = usize;
