//! Domain types and pure business rules for the Q&A backend.
//!
//! Nothing in this crate performs I/O. The database, HTTP and worker crates
//! call into these modules for validation, authorization and the small
//! pieces of real logic (promotion planning, vote decisions, digest window).

pub mod digest;
pub mod entity;
pub mod error;
pub mod forms;
pub mod jobs;
pub mod policy;
pub mod promotion;
pub mod roles;
pub mod text;
pub mod types;
pub mod votes;
