//! Integration tests for voting and the job queue table.

use assert_matches::assert_matches;
use qna_core::entity::EntityKind;
use qna_core::jobs::{AnswerNotification, JobPayload, JOB_ANSWER_NOTIFICATION};
use qna_core::votes::{Direction, VoteChange};
use qna_db::models::status::JobStatus;
use qna_db::models::user::CreateUser;
use qna_db::repositories::{JobRepo, UserRepo, VoteRepo};
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

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_vote_cast_flip_retract(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let kind = EntityKind::Question;

    let change = VoteRepo::vote(&pool, u, kind, 42, Direction::Up).await.unwrap();
    assert_eq!(change, VoteChange::Cast(1));
    assert_eq!(VoteRepo::rating(&pool, kind, 42).await.unwrap(), 1);

    let change = VoteRepo::vote(&pool, u, kind, 42, Direction::Down).await.unwrap();
    assert_eq!(change, VoteChange::Flip(-1));
    assert_eq!(VoteRepo::rating(&pool, kind, 42).await.unwrap(), -1);

    let change = VoteRepo::vote(&pool, u, kind, 42, Direction::Down).await.unwrap();
    assert_eq!(change, VoteChange::Retract);
    assert_eq!(VoteRepo::rating(&pool, kind, 42).await.unwrap(), 0);
    assert!(VoteRepo::find(&pool, u, kind, 42).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_sums_votes_per_votable(pool: PgPool) {
    let a = user(&pool, "ann").await;
    let b = user(&pool, "bob").await;
    let c = user(&pool, "cid").await;

    for voter in [a, b] {
        VoteRepo::vote(&pool, voter, EntityKind::Answer, 7, Direction::Up)
            .await
            .unwrap();
    }
    VoteRepo::vote(&pool, c, EntityKind::Answer, 7, Direction::Down)
        .await
        .unwrap();
    VoteRepo::vote(&pool, c, EntityKind::Question, 7, Direction::Down)
        .await
        .unwrap();

    assert_eq!(VoteRepo::rating(&pool, EntityKind::Answer, 7).await.unwrap(), 1);
    assert_eq!(VoteRepo::rating(&pool, EntityKind::Question, 7).await.unwrap(), -1);
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

fn notification(user_id: i64, answer_id: i64) -> JobPayload {
    JobPayload::AnswerNotification(AnswerNotification { user_id, answer_id })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_claim_runs_oldest_pending_job_once(pool: PgPool) {
    let first = JobRepo::enqueue(&pool, &notification(1, 10)).await.unwrap();
    let second = JobRepo::enqueue(&pool, &JobPayload::DailyDigest).await.unwrap();
    assert_eq!(first.status_id, JobStatus::Pending.id());

    let claimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();
    assert_eq!(claimed.id, first.id);
    assert_eq!(claimed.status_id, JobStatus::Running.id());
    assert_eq!(claimed.attempts, 1);
    assert!(claimed.claimed_at.is_some());

    let claimed = JobRepo::claim_next(&pool).await.unwrap().unwrap();
    assert_eq!(claimed.id, second.id);

    assert!(JobRepo::claim_next(&pool).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_and_fail_record_outcome(pool: PgPool) {
    let ok = JobRepo::enqueue(&pool, &notification(1, 10)).await.unwrap();
    let bad = JobRepo::enqueue(&pool, &notification(2, 10)).await.unwrap();

    JobRepo::complete(&pool, ok.id).await.unwrap();
    JobRepo::fail(&pool, bad.id, "smtp unreachable").await.unwrap();

    let ok = JobRepo::find_by_id(&pool, ok.id).await.unwrap().unwrap();
    assert_eq!(JobStatus::from_id(ok.status_id), Some(JobStatus::Completed));
    assert!(ok.completed_at.is_some());

    let bad = JobRepo::find_by_id(&pool, bad.id).await.unwrap().unwrap();
    assert_eq!(JobStatus::from_id(bad.status_id), Some(JobStatus::Failed));
    assert_eq!(bad.last_error.as_deref(), Some("smtp unreachable"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stored_payload_round_trips_to_job(pool: PgPool) {
    let payload = notification(3, 11);
    JobRepo::enqueue(&pool, &payload).await.unwrap();

    let jobs = JobRepo::list_by_kind(&pool, JOB_ANSWER_NOTIFICATION).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_matches!(
        JobPayload::from_parts(&jobs[0].kind, &jobs[0].payload),
        Ok(p) if p == payload
    );
}
