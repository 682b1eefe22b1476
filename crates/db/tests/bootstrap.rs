use qna_db::models::status::JobStatus;
use sqlx::PgPool;

/// Connect, migrate and verify the lookup seed data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    qna_db::health_check(&pool).await.unwrap();

    let rows: Vec<(i16, String)> = sqlx::query_as("SELECT id, name FROM job_statuses ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    let expected = [
        (JobStatus::Pending, "pending"),
        (JobStatus::Running, "running"),
        (JobStatus::Completed, "completed"),
        (JobStatus::Failed, "failed"),
    ];
    assert_eq!(rows.len(), expected.len());
    for ((id, name), (status, expected_name)) in rows.iter().zip(expected) {
        assert_eq!(*id, status.id(), "job_statuses.{name} id mismatch");
        assert_eq!(name, expected_name);
    }
}

/// All `id` columns must be bigint (entity tables) or smallint (lookup tables).
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_correct_type(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert!(
            data_type == "bigint" || data_type == "smallint",
            "Table {table}.id should be bigint or smallint, got {data_type}"
        );
    }
}
