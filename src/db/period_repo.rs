// src/db/period_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{db_utils::search_pattern, error::AppError, pagination::PageRequest},
    models::{admin::PeriodPayload, roster::Period},
};

#[derive(Clone)]
pub struct PeriodRepository {
    pool: PgPool,
}

impl PeriodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ESCALA DE AGORA
    // =========================================================================

    /// Período que contém `now`. Havendo mais de um, vale a ordem padrão
    /// da listagem (início mais recente primeiro).
    pub async fn find_active(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError> {
        let period = sqlx::query_as::<_, Period>(
            r#"
            SELECT id, description, starts_at, ends_at
            FROM periods
            WHERE starts_at <= $1 AND ends_at >= $1
            ORDER BY starts_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(period)
    }

    /// Próximo período a começar depois de `now`.
    pub async fn find_next(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError> {
        let period = sqlx::query_as::<_, Period>(
            r#"
            SELECT id, description, starts_at, ends_at
            FROM periods
            WHERE starts_at > $1
            ORDER BY starts_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(period)
    }

    // =========================================================================
    //  LISTAGENS
    // =========================================================================

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM periods")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    pub async fn list_page(&self, page: PageRequest) -> Result<Vec<Period>, AppError> {
        let periods = sqlx::query_as::<_, Period>(
            r#"
            SELECT id, description, starts_at, ends_at
            FROM periods
            ORDER BY starts_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(periods)
    }

    /// Busca do painel: descrição e intervalo de início `[from, to)`.
    pub async fn search(
        &self,
        search: Option<&str>,
        starts_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Period>, AppError> {
        let (from, to) = starts_between.unzip();

        let periods = sqlx::query_as::<_, Period>(
            r#"
            SELECT id, description, starts_at, ends_at
            FROM periods
            WHERE ($1::text IS NULL OR description ILIKE $1)
              AND ($2::timestamptz IS NULL OR starts_at >= $2)
              AND ($3::timestamptz IS NULL OR starts_at < $3)
            ORDER BY starts_at DESC, id DESC
            "#,
        )
        .bind(search_pattern(search))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(periods)
    }

    // =========================================================================
    //  CRUD
    // =========================================================================

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Period>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let period = sqlx::query_as::<_, Period>(
            "SELECT id, description, starts_at, ends_at FROM periods WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(period)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &PeriodPayload) -> Result<Period, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let period = sqlx::query_as::<_, Period>(
            r#"
            INSERT INTO periods (description, starts_at, ends_at)
            VALUES ($1, $2, $3)
            RETURNING id, description, starts_at, ends_at
            "#,
        )
        .bind(input.description.trim())
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(executor)
        .await?;

        Ok(period)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &PeriodPayload,
    ) -> Result<Option<Period>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let period = sqlx::query_as::<_, Period>(
            r#"
            UPDATE periods
            SET description = $2, starts_at = $3, ends_at = $4
            WHERE id = $1
            RETURNING id, description, starts_at, ends_at
            "#,
        )
        .bind(id)
        .bind(input.description.trim())
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_optional(executor)
        .await?;

        Ok(period)
    }

    /// Apaga o período; as escalas dele vão junto (ON DELETE CASCADE).
    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM periods WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
