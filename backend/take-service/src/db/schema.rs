/// Schema bootstrap
///
/// Creates the backing tables on startup if they do not exist. The composite
/// primary key on `votes` makes a voter's membership in the tally sets
/// mutually exclusive at the storage layer: one row per (post, voter), and
/// the row's direction is the whole vote state.
use sqlx::PgPool;

pub async fn ensure_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS takes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            agree_count BIGINT NOT NULL DEFAULT 0,
            disagree_count BIGINT NOT NULL DEFAULT 0,
            interactions BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS votes (
            post_id UUID NOT NULL REFERENCES takes(id) ON DELETE CASCADE,
            voter UUID NOT NULL,
            direction TEXT NOT NULL CHECK (direction IN ('agree', 'disagree')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            PRIMARY KEY (post_id, voter)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            post_id UUID NOT NULL REFERENCES takes(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            replies JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id, created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_votes_post ON votes (post_id, direction)")
        .execute(pool)
        .await?;

    Ok(())
}
