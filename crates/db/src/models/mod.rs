//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is editable

pub mod answer;
pub mod attachment;
pub mod comment;
pub mod job;
pub mod question;
pub mod session;
pub mod status;
pub mod subscription;
pub mod user;
pub mod vote;
