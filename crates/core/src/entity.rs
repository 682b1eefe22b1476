//! Polymorphic parent kinds for votes, comments and attachments.
//!
//! The string forms are stored in the `*_type` columns and must match the
//! `CHECK` constraints in the migrations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ENTITY_QUESTION: &str = "question";
pub const ENTITY_ANSWER: &str = "answer";

/// A record that can be voted on, commented on or carry attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Question,
    Answer,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Question => ENTITY_QUESTION,
            EntityKind::Answer => ENTITY_ANSWER,
        }
    }

    /// Human-readable entity name used in `NotFound` errors.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Question => "Question",
            EntityKind::Answer => "Answer",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            ENTITY_QUESTION => Ok(EntityKind::Question),
            ENTITY_ANSWER => Ok(EntityKind::Answer),
            other => Err(CoreError::Validation(format!(
                "Invalid entity type '{other}'. Must be one of: {ENTITY_QUESTION}, {ENTITY_ANSWER}"
            ))),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
