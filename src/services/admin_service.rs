// src/services/admin_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::{
        AssignmentRepository, ContactRepository, DepartmentRepository, PeriodRepository,
        StaffRepository,
    },
    models::{
        admin::{
            AssignmentFilter, AssignmentPayload, DepartmentFilter, DepartmentPayload,
            EmergencyContactFilter, EmergencyContactPayload, PeriodFilter, PeriodPayload,
            StaffMemberFilter, StaffMemberPayload,
        },
        roster::{Assignment, Department, EmergencyContact, Period, PeriodDetail, StaffMember},
    },
};

const AUTOCOMPLETE_LIMIT: i64 = 20;

/// Operações do painel administrativo. A validação dos formulários acontece nos
/// handlers; aqui ficam as transações e as regras de existência.
#[derive(Clone)]
pub struct AdminService {
    department_repo: DepartmentRepository,
    staff_repo: StaffRepository,
    period_repo: PeriodRepository,
    assignment_repo: AssignmentRepository,
    contact_repo: ContactRepository,
    pool: PgPool,
}

impl AdminService {
    pub fn new(
        department_repo: DepartmentRepository,
        staff_repo: StaffRepository,
        period_repo: PeriodRepository,
        assignment_repo: AssignmentRepository,
        contact_repo: ContactRepository,
        pool: PgPool,
    ) -> Self {
        Self { department_repo, staff_repo, period_repo, assignment_repo, contact_repo, pool }
    }

    // =========================================================================
    //  SECRETARIAS
    // =========================================================================

    pub async fn list_departments(&self, filter: &DepartmentFilter) -> Result<Vec<Department>, AppError> {
        self.department_repo.list(filter.q.as_deref(), filter.roster_active).await
    }

    pub async fn get_department(&self, id: i64) -> Result<Department, AppError> {
        self.department_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Department))
    }

    pub async fn create_department(&self, input: &DepartmentPayload) -> Result<Department, AppError> {
        let department = self.department_repo.create(&self.pool, input).await?;
        tracing::info!("🏛️ Secretaria criada: {} (#{})", department.name, department.id);
        Ok(department)
    }

    pub async fn update_department(&self, id: i64, input: &DepartmentPayload) -> Result<Department, AppError> {
        self.department_repo
            .update(&self.pool, id, input)
            .await?
            .ok_or(AppError::NotFound(Resource::Department))
    }

    /// Apaga a secretaria junto com seus plantonistas e as escalas deles.
    pub async fn delete_department(&self, id: i64) -> Result<(), AppError> {
        if !self.department_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Resource::Department));
        }
        tracing::info!("🗑️ Secretaria #{} removida (plantonistas em cascata)", id);
        Ok(())
    }

    // =========================================================================
    //  PLANTONISTAS
    // =========================================================================

    pub async fn list_staff(&self, filter: &StaffMemberFilter) -> Result<Vec<StaffMember>, AppError> {
        self.staff_repo.search(filter.q.as_deref(), filter.department_id).await
    }

    pub async fn autocomplete_staff(&self, term: Option<&str>) -> Result<Vec<StaffMember>, AppError> {
        self.staff_repo.autocomplete(term, AUTOCOMPLETE_LIMIT).await
    }

    pub async fn get_staff(&self, id: i64) -> Result<StaffMember, AppError> {
        self.staff_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::StaffMember))
    }

    pub async fn create_staff(&self, input: &StaffMemberPayload) -> Result<StaffMember, AppError> {
        let id = self.staff_repo.create(&self.pool, input).await?;
        tracing::info!("👷 Plantonista criado: {} (#{})", input.full_name, id);
        self.get_staff(id).await
    }

    pub async fn update_staff(&self, id: i64, input: &StaffMemberPayload) -> Result<StaffMember, AppError> {
        if !self.staff_repo.update(&self.pool, id, input).await? {
            return Err(AppError::NotFound(Resource::StaffMember));
        }
        self.get_staff(id).await
    }

    pub async fn delete_staff(&self, id: i64) -> Result<(), AppError> {
        if !self.staff_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Resource::StaffMember));
        }
        Ok(())
    }

    // =========================================================================
    //  PERÍODOS (com a escala editada no mesmo formulário)
    // =========================================================================

    pub async fn list_periods(&self, filter: &PeriodFilter, now: DateTime<Utc>) -> Result<Vec<Period>, AppError> {
        let range = filter.starts_at.map(|f| f.range(now));
        self.period_repo.search(filter.q.as_deref(), range).await
    }

    pub async fn get_period(&self, id: i64) -> Result<PeriodDetail, AppError> {
        let period = self.period_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Period))?;

        let staff = self.staff_repo.list_by_period(id).await?;
        Ok(PeriodDetail::new(period, staff))
    }

    /// Cria o período e a escala inline na mesma transação: ou grava tudo ou nada.
    pub async fn create_period(&self, input: &PeriodPayload) -> Result<PeriodDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let period = self.period_repo.create(&mut *tx, input).await?;

        if let Some(staff_ids) = input.staff_ids() {
            self.assignment_repo
                .insert_missing_for_period(&mut *tx, period.id, &staff_ids)
                .await?;
        }

        tx.commit().await?;
        tracing::info!("📅 Período criado: {}", period.label());

        self.get_period(period.id).await
    }

    /// Atualiza o período. Se a escala vier no formulário, ela substitui a atual:
    /// sai quem não está na lista, entra quem faltava, quem fica mantém a data de criação.
    pub async fn update_period(&self, id: i64, input: &PeriodPayload) -> Result<PeriodDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let period = self.period_repo
            .update(&mut *tx, id, input)
            .await?
            .ok_or(AppError::NotFound(Resource::Period))?;

        if let Some(staff_ids) = input.staff_ids() {
            let removed = self.assignment_repo
                .delete_for_period_except(&mut *tx, period.id, &staff_ids)
                .await?;
            let added = self.assignment_repo
                .insert_missing_for_period(&mut *tx, period.id, &staff_ids)
                .await?;
            tracing::debug!("Escala do período #{}: +{} -{}", period.id, added, removed);
        }

        tx.commit().await?;

        self.get_period(period.id).await
    }

    pub async fn delete_period(&self, id: i64) -> Result<(), AppError> {
        if !self.period_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Resource::Period));
        }
        Ok(())
    }

    // =========================================================================
    //  ESCALAS AVULSAS
    // =========================================================================

    pub async fn list_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, AppError> {
        self.assignment_repo.list(filter.period_id, filter.staff_member_id).await
    }

    pub async fn get_assignment(&self, id: i64) -> Result<Assignment, AppError> {
        self.assignment_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Assignment))
    }

    /// Falha com erro de validação se o plantonista já estiver escalado no período.
    pub async fn create_assignment(&self, input: &AssignmentPayload) -> Result<Assignment, AppError> {
        let id = self.assignment_repo
            .create(&self.pool, input.staff_member_id, input.period_id)
            .await?;
        self.get_assignment(id).await
    }

    pub async fn delete_assignment(&self, id: i64) -> Result<(), AppError> {
        if !self.assignment_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Resource::Assignment));
        }
        Ok(())
    }

    // =========================================================================
    //  CONTATOS EMERGENCIAIS
    // =========================================================================

    pub async fn list_contacts(&self, filter: &EmergencyContactFilter) -> Result<Vec<EmergencyContact>, AppError> {
        self.contact_repo.list(filter.q.as_deref()).await
    }

    pub async fn get_contact(&self, id: i64) -> Result<EmergencyContact, AppError> {
        self.contact_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::EmergencyContact))
    }

    pub async fn create_contact(&self, input: &EmergencyContactPayload) -> Result<EmergencyContact, AppError> {
        self.contact_repo.create(&self.pool, input).await
    }

    pub async fn update_contact(&self, id: i64, input: &EmergencyContactPayload) -> Result<EmergencyContact, AppError> {
        self.contact_repo
            .update(&self.pool, id, input)
            .await?
            .ok_or(AppError::NotFound(Resource::EmergencyContact))
    }

    pub async fn delete_contact(&self, id: i64) -> Result<(), AppError> {
        if !self.contact_repo.delete(&self.pool, id).await? {
            return Err(AppError::NotFound(Resource::EmergencyContact));
        }
        Ok(())
    }
}
