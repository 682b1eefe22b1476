//! Background worker for the Q&A backend.
//!
//! - [`runner`] -- claims queued jobs and executes them.
//! - [`scheduler`] -- enqueues the daily digest at a fixed UTC hour.
//! - [`config`] -- environment configuration for the binary.

pub mod config;
pub mod runner;
pub mod scheduler;

pub use config::WorkerConfig;
pub use runner::{JobOutcome, JobRunner};
pub use scheduler::DigestScheduler;
