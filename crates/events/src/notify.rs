//! New-answer notifications.
//!
//! Creating an answer fans out one `answer_notification` job per subscriber
//! of the question ([`notify_subscribers`]); the worker later turns each job
//! into an email ([`deliver_answer_notification`]).

use qna_core::jobs::{AnswerNotification, JobPayload};
use qna_db::models::answer::Answer;
use qna_db::models::subscription::Subscription;
use qna_db::models::user::Recipient;
use qna_db::repositories::{AnswerRepo, QuestionRepo, UserRepo};
use qna_db::DbPool;

use crate::delivery::email::Mailer;
use crate::error::DeliveryError;
use crate::mail;
use crate::queue::{JobQueue, QueueError};

/// Enqueue one notification job per subscription of the answer's question.
///
/// Stops at the first enqueue failure and returns it. Returns the number of
/// jobs enqueued.
pub async fn notify_subscribers(
    queue: &dyn JobQueue,
    answer: &Answer,
    subscriptions: &[Subscription],
) -> Result<usize, QueueError> {
    for subscription in subscriptions {
        queue
            .enqueue(JobPayload::AnswerNotification(AnswerNotification {
                user_id: subscription.user_id,
                answer_id: answer.id,
            }))
            .await?;
    }

    tracing::debug!(
        answer_id = answer.id,
        question_id = answer.question_id,
        jobs = subscriptions.len(),
        "Answer notifications enqueued"
    );
    Ok(subscriptions.len())
}

/// Execute an `answer_notification` job: email the subscriber about the answer.
pub async fn deliver_answer_notification(
    pool: &DbPool,
    mailer: &dyn Mailer,
    job: AnswerNotification,
) -> Result<(), DeliveryError> {
    let user = UserRepo::find_by_id(pool, job.user_id)
        .await?
        .ok_or(DeliveryError::Missing {
            entity: "User",
            id: job.user_id,
        })?;
    let answer = AnswerRepo::find_by_id(pool, job.answer_id)
        .await?
        .ok_or(DeliveryError::Missing {
            entity: "Answer",
            id: job.answer_id,
        })?;
    let question = QuestionRepo::find_by_id(pool, answer.question_id)
        .await?
        .ok_or(DeliveryError::Missing {
            entity: "Question",
            id: answer.question_id,
        })?;

    let recipient = Recipient {
        id: user.id,
        name: user.name,
        email: user.email,
    };
    mailer
        .send(&mail::answer_notification(&recipient, &question, &answer))
        .await?;
    Ok(())
}
