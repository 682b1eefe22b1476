//! Daily digest of newly asked questions.
//!
//! [`DailyDigest::compose`] is a pure function of the current time, the
//! candidate questions and the recipients. [`DailyDigest::deliver`] loads
//! both from the database and sends the result.

use qna_core::digest;
use qna_core::types::Timestamp;
use qna_db::models::question::Question;
use qna_db::models::user::Recipient;
use qna_db::repositories::{QuestionRepo, UserRepo};
use qna_db::DbPool;

use crate::delivery::email::Mailer;
use crate::error::DeliveryError;
use crate::mail::{self, Email};

/// Outcome of one digest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestReport {
    pub questions: usize,
    pub sent: usize,
    pub failed: usize,
}

pub struct DailyDigest;

impl DailyDigest {
    /// One email per recipient listing the questions created within the
    /// digest window ending at `now`. Questions outside the window are
    /// ignored; recipients get an email even when nothing qualifies.
    pub fn compose(now: Timestamp, questions: &[Question], recipients: &[Recipient]) -> Vec<Email> {
        let recent: Vec<Question> = questions
            .iter()
            .filter(|q| digest::in_window(q.created_at, now))
            .cloned()
            .collect();

        recipients
            .iter()
            .map(|recipient| mail::digest(recipient, &recent))
            .collect()
    }

    /// Send the digest for the window ending at `now` to every user.
    ///
    /// A failed send is logged and counted; the remaining recipients are
    /// still processed.
    pub async fn deliver(
        pool: &DbPool,
        mailer: &dyn Mailer,
        now: Timestamp,
    ) -> Result<DigestReport, DeliveryError> {
        let questions = QuestionRepo::created_since(pool, digest::window_start(now)).await?;
        let recipients = UserRepo::list_recipients(pool).await?;

        let mut report = DigestReport {
            questions: questions.len(),
            ..DigestReport::default()
        };

        for email in Self::compose(now, &questions, &recipients) {
            match mailer.send(&email).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(to = %email.to, error = %e, "Failed to send digest");
                }
            }
        }

        tracing::info!(
            questions = report.questions,
            sent = report.sent,
            failed = report.failed,
            "Daily digest delivered"
        );
        Ok(report)
    }
}
