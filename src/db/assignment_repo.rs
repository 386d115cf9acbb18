// src/db/assignment_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{map_constraint_error, ConstraintField},
        error::AppError,
    },
    models::roster::Assignment,
};

const ASSIGNMENT_SELECT: &str = r#"
    SELECT a.id, a.staff_member_id, s.full_name AS staff_member_name,
           a.period_id, p.description AS period_description, a.created_at
    FROM assignments a
    INNER JOIN staff_members s ON s.id = a.staff_member_id
    INNER JOIN periods p ON p.id = a.period_id
"#;

const CONSTRAINTS: &[ConstraintField] = &[
    ("assignments_staff_member_id_period_id_key", "staffMemberId"),
    ("assignments_staff_member_id_fkey", "staffMemberId"),
    ("assignments_period_id_fkey", "periodId"),
];

// Nas linhas da escala dentro do período os erros vão para o campo do formulário inline.
const INLINE_CONSTRAINTS: &[ConstraintField] = &[
    ("assignments_staff_member_id_period_id_key", "assignments"),
    ("assignments_staff_member_id_fkey", "assignments"),
    ("assignments_period_id_fkey", "assignments"),
];

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        period_id: Option<i64>,
        staff_member_id: Option<i64>,
    ) -> Result<Vec<Assignment>, AppError> {
        let assignments = sqlx::query_as::<_, Assignment>(&format!(
            r#"{ASSIGNMENT_SELECT}
            WHERE ($1::bigint IS NULL OR a.period_id = $1)
              AND ($2::bigint IS NULL OR a.staff_member_id = $2)
            ORDER BY p.starts_at DESC, s.full_name ASC
            "#
        ))
        .bind(period_id)
        .bind(staff_member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, Assignment>(&format!("{ASSIGNMENT_SELECT} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(assignment)
    }

    /// Cria uma escala avulsa. Par (plantonista, período) repetido vira erro de validação.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        staff_member_id: i64,
        period_id: i64,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO assignments (staff_member_id, period_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(staff_member_id)
        .bind(period_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))
    }

    /// Remove do período quem não está mais na lista.
    pub async fn delete_for_period_except<'e, E>(
        &self,
        executor: E,
        period_id: i64,
        keep_staff_ids: &[i64],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM assignments
            WHERE period_id = $1 AND NOT (staff_member_id = ANY($2))
            "#,
        )
        .bind(period_id)
        .bind(keep_staff_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Adiciona quem ainda não está escalado. Quem já estava mantém a data de criação.
    pub async fn insert_missing_for_period<'e, E>(
        &self,
        executor: E,
        period_id: i64,
        staff_ids: &[i64],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO assignments (staff_member_id, period_id)
            SELECT staff_id, $1 FROM UNNEST($2::bigint[]) AS staff_id
            ON CONFLICT (staff_member_id, period_id) DO NOTHING
            "#,
        )
        .bind(period_id)
        .bind(staff_ids)
        .execute(executor)
        .await
        .map_err(|e| map_constraint_error(e, INLINE_CONSTRAINTS))?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
