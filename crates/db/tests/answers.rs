//! Integration tests for answers and best-answer promotion.

use qna_core::entity::EntityKind;
use qna_core::votes::Direction;
use qna_db::models::answer::CreateAnswer;
use qna_db::models::comment::CreateComment;
use qna_db::models::question::CreateQuestion;
use qna_db::models::user::CreateUser;
use qna_db::repositories::{AnswerRepo, CommentRepo, QuestionRepo, UserRepo, VoteRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

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

async fn question(pool: &PgPool, user_id: i64) -> i64 {
    QuestionRepo::create(
        pool,
        &CreateQuestion {
            user_id,
            title: "Question title".to_string(),
            body: "Question body text".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn answer(pool: &PgPool, question_id: i64, user_id: i64, body: &str) -> i64 {
    AnswerRepo::create(
        pool,
        &CreateAnswer {
            question_id,
            user_id,
            body: body.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn best_ids(pool: &PgPool, question_id: i64) -> Vec<i64> {
    AnswerRepo::list_by_question(pool, question_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.best)
        .map(|a| a.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_new_answer_is_not_best(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q = question(&pool, u).await;
    let a = answer(&pool, q, u, "First answer body").await;

    let row = AnswerRepo::find_by_id(&pool, a).await.unwrap().unwrap();
    assert!(!row.best);
    assert!(AnswerRepo::find_best_for_question(&pool, q).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promoting_second_answer_demotes_first(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q = question(&pool, u).await;
    let a = answer(&pool, q, u, "First answer body").await;
    let b = answer(&pool, q, u, "Second answer body").await;

    let promoted = AnswerRepo::switch_promotion(&pool, a).await.unwrap().unwrap();
    assert!(promoted.best);
    assert_eq!(best_ids(&pool, q).await, vec![a]);

    let promoted = AnswerRepo::switch_promotion(&pool, b).await.unwrap().unwrap();
    assert!(promoted.best);
    assert_eq!(best_ids(&pool, q).await, vec![b]);

    let a_row = AnswerRepo::find_by_id(&pool, a).await.unwrap().unwrap();
    assert!(!a_row.best);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_double_switch_clears_best(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q = question(&pool, u).await;
    let a = answer(&pool, q, u, "First answer body").await;

    AnswerRepo::switch_promotion(&pool, a).await.unwrap();
    let demoted = AnswerRepo::switch_promotion(&pool, a).await.unwrap().unwrap();

    assert!(!demoted.best);
    assert!(best_ids(&pool, q).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_switch_unknown_answer_returns_none(pool: PgPool) {
    assert!(AnswerRepo::switch_promotion(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promotion_is_scoped_to_question(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q1 = question(&pool, u).await;
    let q2 = question(&pool, u).await;
    let a1 = answer(&pool, q1, u, "Answer on first").await;
    let a2 = answer(&pool, q2, u, "Answer on second").await;

    AnswerRepo::switch_promotion(&pool, a1).await.unwrap();
    AnswerRepo::switch_promotion(&pool, a2).await.unwrap();

    assert_eq!(best_ids(&pool, q1).await, vec![a1]);
    assert_eq!(best_ids(&pool, q2).await, vec![a2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_best_row_violates_unique_index(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q = question(&pool, u).await;
    let a = answer(&pool, q, u, "First answer body").await;
    let b = answer(&pool, q, u, "Second answer body").await;

    AnswerRepo::switch_promotion(&pool, a).await.unwrap();

    let err = sqlx::query("UPDATE answers SET best = true WHERE id = $1")
        .bind(b)
        .execute(&pool)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_answers_best_per_question"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_orders_best_first(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q = question(&pool, u).await;
    let a = answer(&pool, q, u, "First answer body").await;
    let b = answer(&pool, q, u, "Second answer body").await;
    let c = answer(&pool, q, u, "Third answer body").await;

    AnswerRepo::switch_promotion(&pool, b).await.unwrap();

    let ids: Vec<i64> = AnswerRepo::list_by_question(&pool, q)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![b, a, c]);
}

// ---------------------------------------------------------------------------
// Updates and deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_find_in_question_rejects_foreign_answer(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q1 = question(&pool, u).await;
    let q2 = question(&pool, u).await;
    let a = answer(&pool, q1, u, "Answer on first").await;

    assert!(AnswerRepo::find_in_question(&pool, q1, a).await.unwrap().is_some());
    assert!(AnswerRepo::find_in_question(&pool, q2, a).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_body_keeps_best_flag(pool: PgPool) {
    let u = user(&pool, "ann").await;
    let q = question(&pool, u).await;
    let a = answer(&pool, q, u, "First answer body").await;
    AnswerRepo::switch_promotion(&pool, a).await.unwrap();

    let updated = AnswerRepo::update_body(&pool, a, "Edited answer body")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.body, "Edited answer body");
    assert!(updated.best);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_answer_removes_children(pool: PgPool) {
    let owner = user(&pool, "ann").await;
    let voter = user(&pool, "bob").await;
    let q = question(&pool, owner).await;
    let a = answer(&pool, q, owner, "First answer body").await;

    VoteRepo::vote(&pool, voter, EntityKind::Answer, a, Direction::Up)
        .await
        .unwrap();
    CommentRepo::create(
        &pool,
        &CreateComment {
            user_id: voter,
            commentable_type: EntityKind::Answer,
            commentable_id: a,
            body: "Nice".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(AnswerRepo::delete(&pool, a).await.unwrap());
    assert!(!AnswerRepo::delete(&pool, a).await.unwrap());

    assert_eq!(VoteRepo::rating(&pool, EntityKind::Answer, a).await.unwrap(), 0);
    assert!(CommentRepo::list_for(&pool, EntityKind::Answer, a)
        .await
        .unwrap()
        .is_empty());
}
