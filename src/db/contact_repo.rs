// src/db/contact_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{map_constraint_error, search_pattern, ConstraintField},
        error::AppError,
    },
    models::{admin::EmergencyContactPayload, roster::EmergencyContact},
};

const CONSTRAINTS: &[ConstraintField] = &[("emergency_contacts_organization_key", "organization")];

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos os contatos por ordem de órgão, com busca opcional.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<EmergencyContact>, AppError> {
        let contacts = sqlx::query_as::<_, EmergencyContact>(
            r#"
            SELECT id, organization, phones, notes
            FROM emergency_contacts
            WHERE ($1::text IS NULL OR organization ILIKE $1)
            ORDER BY organization ASC
            "#,
        )
        .bind(search_pattern(search))
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<EmergencyContact>, AppError> {
        let contact = sqlx::query_as::<_, EmergencyContact>(
            "SELECT id, organization, phones, notes FROM emergency_contacts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &EmergencyContactPayload,
    ) -> Result<EmergencyContact, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            INSERT INTO emergency_contacts (organization, phones, notes)
            VALUES ($1, $2, $3)
            RETURNING id, organization, phones, notes
            "#,
        )
        .bind(input.organization.trim())
        .bind(input.phones.trim())
        .bind(blank_to_none(input.notes.as_deref()))
        .fetch_one(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        input: &EmergencyContactPayload,
    ) -> Result<Option<EmergencyContact>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            UPDATE emergency_contacts
            SET organization = $2, phones = $3, notes = $4
            WHERE id = $1
            RETURNING id, organization, phones, notes
            "#,
        )
        .bind(id)
        .bind(input.organization.trim())
        .bind(input.phones.trim())
        .bind(blank_to_none(input.notes.as_deref()))
        .fetch_optional(executor)
        .await
        .map_err(|e| map_constraint_error(e, CONSTRAINTS))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM emergency_contacts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Observação em branco é gravada como NULL.
fn blank_to_none(notes: Option<&str>) -> Option<&str> {
    notes.map(str::trim).filter(|n| !n.is_empty())
}
