//! Integration tests for the job runner against a real database.

use std::sync::Arc;

use assert_matches::assert_matches;
use qna_core::jobs::{AnswerNotification, JobPayload};
use qna_db::models::answer::CreateAnswer;
use qna_db::models::question::CreateQuestion;
use qna_db::models::status::JobStatus;
use qna_db::models::user::CreateUser;
use qna_db::repositories::{AnswerRepo, JobRepo, QuestionRepo, UserRepo};
use qna_events::RecordingMailer;
use qna_worker::{JobOutcome, JobRunner};
use sqlx::PgPool;

async fn user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "hash".to_string(),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn answered_question(pool: &PgPool, user_id: i64) -> i64 {
    let question = QuestionRepo::create(
        pool,
        &CreateQuestion {
            user_id,
            title: "Why is the sky blue?".to_string(),
            body: "Question body text".to_string(),
        },
    )
    .await
    .unwrap();
    AnswerRepo::create(
        pool,
        &CreateAnswer {
            question_id: question.id,
            user_id,
            body: "Rayleigh scattering".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn runner(pool: &PgPool, mailer: &Arc<RecordingMailer>) -> JobRunner {
    JobRunner::new(pool.clone(), mailer.clone())
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_queue_returns_none(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::new());
    assert!(runner(&pool, &mailer).run_next().await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_answer_notification_is_emailed_and_completed(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    let answer_id = answered_question(&pool, ann).await;
    let job = JobRepo::enqueue(
        &pool,
        &JobPayload::AnswerNotification(AnswerNotification {
            user_id: ann,
            answer_id,
        }),
    )
    .await
    .unwrap();

    let mailer = Arc::new(RecordingMailer::new());
    let outcome = runner(&pool, &mailer).run_next().await.unwrap();
    assert_eq!(outcome, Some(JobOutcome::Completed { job_id: job.id }));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ann@example.com");
    assert!(sent[0].subject.contains("Why is the sky blue?"));

    let stored = JobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(stored.status_id, JobStatus::Completed.id());
    assert!(stored.completed_at.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_answer_marks_job_failed(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    let job = JobRepo::enqueue(
        &pool,
        &JobPayload::AnswerNotification(AnswerNotification {
            user_id: ann,
            answer_id: 987_654,
        }),
    )
    .await
    .unwrap();

    let mailer = Arc::new(RecordingMailer::new());
    let outcome = runner(&pool, &mailer).run_next().await.unwrap();
    assert_matches!(
        outcome,
        Some(JobOutcome::Failed { job_id, error }) if job_id == job.id && error.contains("987654")
    );
    assert!(mailer.sent().is_empty());

    let stored = JobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(stored.status_id, JobStatus::Failed.id());
    assert!(stored.last_error.is_some());
    assert_eq!(stored.attempts, 1);

    // Failed jobs are not picked up again.
    assert!(runner(&pool, &mailer).run_next().await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_job_kind_fails(pool: PgPool) {
    let job_id: i64 = sqlx::query_scalar(
        "INSERT INTO jobs (kind, payload, status_id) VALUES ('reindex', '{}', $1) RETURNING id",
    )
    .bind(JobStatus::Pending.id())
    .fetch_one(&pool)
    .await
    .unwrap();

    let mailer = Arc::new(RecordingMailer::new());
    let outcome = runner(&pool, &mailer).run_next().await.unwrap();
    assert_matches!(outcome, Some(JobOutcome::Failed { job_id: id, .. }) if id == job_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_digest_job_emails_every_user(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    user(&pool, "bob").await;
    answered_question(&pool, ann).await;
    JobRepo::enqueue(&pool, &JobPayload::DailyDigest).await.unwrap();

    let mailer = Arc::new(RecordingMailer::new());
    assert_matches!(
        runner(&pool, &mailer).run_next().await.unwrap(),
        Some(JobOutcome::Completed { .. })
    );

    let sent = mailer.sent();
    let mut to: Vec<&str> = sent.iter().map(|e| e.to.as_str()).collect();
    to.sort();
    assert_eq!(to, vec!["ann@example.com", "bob@example.com"]);
    assert!(sent.iter().all(|e| e.body.contains("Why is the sky blue?")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_jobs_run_in_enqueue_order(pool: PgPool) {
    let first = JobRepo::enqueue(&pool, &JobPayload::DailyDigest).await.unwrap();
    let second = JobRepo::enqueue(&pool, &JobPayload::DailyDigest).await.unwrap();

    let mailer = Arc::new(RecordingMailer::new());
    let runner = runner(&pool, &mailer);
    assert_eq!(
        runner.run_next().await.unwrap(),
        Some(JobOutcome::Completed { job_id: first.id })
    );
    assert_eq!(
        runner.run_next().await.unwrap(),
        Some(JobOutcome::Completed { job_id: second.id })
    );
    assert!(runner.run_next().await.unwrap().is_none());
}
