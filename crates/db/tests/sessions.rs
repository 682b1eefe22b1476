//! Integration tests for refresh-token sessions.

use chrono::{Duration, Utc};
use qna_db::models::session::CreateSession;
use qna_db::models::user::CreateUser;
use qna_db::repositories::{SessionRepo, UserRepo};
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

async fn session(pool: &PgPool, user_id: i64, hash: &str, expires_in: Duration) {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + expires_in,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn rotation_replaces_the_session_once(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    session(&pool, ann, "first", Duration::days(7)).await;
    let later = Utc::now() + Duration::days(7);

    let next = SessionRepo::rotate(&pool, "first", "second", later)
        .await
        .unwrap()
        .expect("active session should rotate");
    assert_eq!(next.user_id, ann);
    assert_eq!(next.refresh_token_hash, "second");
    assert!(!next.is_revoked);

    // The old token is spent, the new one still works.
    assert!(SessionRepo::rotate(&pool, "first", "third", later)
        .await
        .unwrap()
        .is_none());
    assert!(SessionRepo::rotate(&pool, "second", "third", later)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_or_unknown_tokens_do_not_rotate(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    session(&pool, ann, "stale", -Duration::minutes(1)).await;
    let later = Utc::now() + Duration::days(7);

    assert!(SessionRepo::rotate(&pool, "stale", "fresh", later)
        .await
        .unwrap()
        .is_none());
    assert!(SessionRepo::rotate(&pool, "never-issued", "fresh", later)
        .await
        .unwrap()
        .is_none());

    let inserted: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE refresh_token_hash = 'fresh'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(inserted, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn revoke_all_only_touches_one_user(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    let bob = user(&pool, "bob").await;
    session(&pool, ann, "ann-1", Duration::days(7)).await;
    session(&pool, ann, "ann-2", Duration::days(7)).await;
    session(&pool, bob, "bob-1", Duration::days(7)).await;

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, ann).await.unwrap(), 2);
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, ann).await.unwrap(), 0);

    let later = Utc::now() + Duration::days(7);
    assert!(SessionRepo::rotate(&pool, "ann-1", "x", later).await.unwrap().is_none());
    assert!(SessionRepo::rotate(&pool, "bob-1", "y", later).await.unwrap().is_some());
}
