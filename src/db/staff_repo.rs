// src/db/staff_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{map_constraint_error, search_pattern, ConstraintField},
        error::AppError,
        pagination::PageRequest,
    },
    models::{admin::StaffMemberPayload, roster::StaffMember},
};

// Todo SELECT de plantonista traz o nome da secretaria junto.
const STAFF_SELECT: &str = r#"
    SELECT s.id, s.department_id, d.name AS department_name,
           s.user_id, s.full_name, s.phones
    FROM staff_members s
    INNER JOIN departments d ON d.id = s.department_id
"#;

const CONSTRAINTS: &[ConstraintField] = &[
    ("staff_members_user_id_key", "userId"),
    ("staff_members_department_id_fkey", "departmentId"),
    ("staff_members_user_id_fkey", "userId"),
];

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff_members")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Uma página da listagem pública, ordenada por nome.
    pub async fn list_page(&self, page: PageRequest) -> Result<Vec<StaffMember>, AppError> {
        let staff = sqlx::query_as::<_, StaffMember>(&format!(
            "{STAFF_SELECT} ORDER BY s.full_name ASC, s.id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Busca do painel: nome completo ou nome da secretaria, filtro por secretaria.
    pub async fn search(
        &self,
        search: Option<&str>,
        department_id: Option<i64>,
    ) -> Result<Vec<StaffMember>, AppError> {
        let staff = sqlx::query_as::<_, StaffMember>(&format!(
            r#"{STAFF_SELECT}
            WHERE ($1::text IS NULL OR s.full_name ILIKE $1 OR d.name ILIKE $1)
              AND ($2::bigint IS NULL OR s.department_id = $2)
            ORDER BY s.full_name ASC, s.id ASC
            "#
        ))
        .bind(search_pattern(search))
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn autocomplete(&self, term: Option<&str>, limit: i64) -> Result<Vec<StaffMember>, AppError> {
        let staff = sqlx::query_as::<_, StaffMember>(&format!(
            r#"{STAFF_SELECT}
            WHERE ($1::text IS NULL OR s.full_name ILIKE $1 OR d.name ILIKE $1)
            ORDER BY s.full_name ASC
            LIMIT $2
            "#
        ))
        .bind(search_pattern(term))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Plantonistas escalados num período (via tabela de escalas).
    pub async fn list_by_period(&self, period_id: i64) -> Result<Vec<StaffMember>, AppError> {
        let staff = sqlx::query_as::<_, StaffMember>(&format!(
            r#"{STAFF_SELECT}
            INNER JOIN assignments a ON a.staff_member_id = s.id
            WHERE a.period_id = $1
            ORDER BY s.full_name ASC, s.id ASC
            "#
        ))
        .bind(period_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<StaffMember>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, StaffMember>(&format!("{STAFF_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(staff)
    }

    /// Insere e devolve apenas o ID; o service relê com o JOIN.
    pub async fn create<'e, E>(&self, executor: E, input: &StaffMemberPayload) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO staff_members (department_id, user_id, full_name, phones)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.department_id)
        .bind(input.user_id)
        .bind(input.full_name.trim())
        .bind(input.phones.trim())
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &StaffMemberPayload,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE staff_members
            SET department_id = $2, user_id = $3, full_name = $4, phones = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(input.department_id)
        .bind(input.user_id)
        .bind(input.full_name.trim())
        .bind(input.phones.trim())
        .execute(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM staff_members WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
