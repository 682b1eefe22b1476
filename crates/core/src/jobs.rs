//! Background job kinds and their payloads.
//!
//! Jobs are stored as a `kind` string plus a JSON `payload` column. The kind
//! constants must match what the worker dispatches on.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Email one subscriber about a new answer.
pub const JOB_ANSWER_NOTIFICATION: &str = "answer_notification";

/// Email every user the list of questions from the last day.
pub const JOB_DAILY_DIGEST: &str = "daily_digest";

/// Payload of an [`JOB_ANSWER_NOTIFICATION`] job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerNotification {
    /// Recipient (the subscriber).
    pub user_id: DbId,
    pub answer_id: DbId,
}

/// A unit of background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobPayload {
    AnswerNotification(AnswerNotification),
    DailyDigest,
}

impl JobPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            JobPayload::AnswerNotification(_) => JOB_ANSWER_NOTIFICATION,
            JobPayload::DailyDigest => JOB_DAILY_DIGEST,
        }
    }

    /// The JSON stored in the `payload` column.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            JobPayload::AnswerNotification(n) => serde_json::json!({
                "user_id": n.user_id,
                "answer_id": n.answer_id,
            }),
            JobPayload::DailyDigest => serde_json::json!({}),
        }
    }

    /// Rebuild a payload from a stored `kind` and `payload`.
    pub fn from_parts(kind: &str, payload: &serde_json::Value) -> Result<Self, CoreError> {
        match kind {
            JOB_ANSWER_NOTIFICATION => serde_json::from_value(payload.clone())
                .map(JobPayload::AnswerNotification)
                .map_err(|e| {
                    CoreError::Validation(format!("Malformed {JOB_ANSWER_NOTIFICATION} payload: {e}"))
                }),
            JOB_DAILY_DIGEST => Ok(JobPayload::DailyDigest),
            other => Err(CoreError::Validation(format!("Unknown job kind '{other}'"))),
        }
    }
}
