use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    pixgrid_db::health_check(&pool).await.unwrap();

    for table in ["photo_likes", "photo_downloads"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The like uniqueness constraint is enforced by the schema itself.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_pair_is_unique(pool: PgPool) {
    let insert = "INSERT INTO photo_likes (user_id, photo_id) VALUES ('u1', 'p1')";
    sqlx::query(insert).execute(&pool).await.unwrap();

    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("uq_photo_likes_user_photo"));
}
