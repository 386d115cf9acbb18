// src/db/department_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{map_constraint_error, search_pattern, ConstraintField},
        error::AppError,
    },
    models::{admin::DepartmentPayload, roster::Department},
};

const CONSTRAINTS: &[ConstraintField] = &[("departments_name_key", "name")];

#[derive(Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista por nome, com busca e filtro de escala ativa opcionais.
    pub async fn list(
        &self,
        search: Option<&str>,
        roster_active: Option<bool>,
    ) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, roster_active
            FROM departments
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2::bool IS NULL OR roster_active = $2)
            ORDER BY name ASC
            "#,
        )
        .bind(search_pattern(search))
        .bind(roster_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, roster_active FROM departments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn create<'e, E>(&self, executor: E, input: &DepartmentPayload) -> Result<Department, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, roster_active)
            VALUES ($1, $2)
            RETURNING id, name, roster_active
            "#,
        )
        .bind(input.name.trim())
        .bind(input.roster_active)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &DepartmentPayload,
    ) -> Result<Option<Department>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = $2, roster_active = $3
            WHERE id = $1
            RETURNING id, name, roster_active
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.roster_active)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))
    }

    /// Apaga a secretaria; plantonistas e suas escalas vão junto (ON DELETE CASCADE).
    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
