// src/services/roster_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::{
        error::{AppError, Resource},
        pagination::{Page, PageRequest},
    },
    db::{ContactRepository, DepartmentRepository, PeriodRepository, StaffRepository},
    models::roster::{
        CurrentPeriod, Department, EmergencyContactCard, Period, PeriodDetail, RosterNow,
        RosterStatus, StaffMemberCard,
    },
};

pub const PERIODS_PER_PAGE: i64 = 10;
pub const STAFF_PER_PAGE: i64 = 15;

/// As duas consultas de que o resolvedor precisa.
#[allow(async_fn_in_trait)]
pub trait PeriodLookup {
    /// Algum período com `início <= now <= fim`.
    async fn active_at(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError>;
    /// O período de menor início estritamente depois de `now`.
    async fn next_after(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError>;
}

impl PeriodLookup for PeriodRepository {
    async fn active_at(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError> {
        self.find_active(now).await
    }

    async fn next_after(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError> {
        self.find_next(now).await
    }
}

/// Decide o que mostrar como "escala de agora": o período ativo ou, na falta dele,
/// o próximo. `None` quando não há nenhum dos dois.
pub async fn resolve_current_period<L: PeriodLookup>(
    lookup: &L,
    now: DateTime<Utc>,
) -> Result<Option<CurrentPeriod>, AppError> {
    if let Some(period) = lookup.active_at(now).await? {
        return Ok(Some(CurrentPeriod { status: RosterStatus::Active, period }));
    }

    let next = lookup.next_after(now).await?;
    Ok(next.map(|period| CurrentPeriod { status: RosterStatus::Next, period }))
}

#[derive(Clone)]
pub struct RosterService {
    period_repo: PeriodRepository,
    staff_repo: StaffRepository,
    department_repo: DepartmentRepository,
    contact_repo: ContactRepository,
    pool: PgPool,
}

impl RosterService {
    pub fn new(
        period_repo: PeriodRepository,
        staff_repo: StaffRepository,
        department_repo: DepartmentRepository,
        contact_repo: ContactRepository,
        pool: PgPool,
    ) -> Self {
        Self { period_repo, staff_repo, department_repo, contact_repo, pool }
    }

    /// Página inicial: período ativo/próximo com a escala + todos os contatos emergenciais.
    pub async fn roster_at(&self, now: DateTime<Utc>) -> Result<RosterNow, AppError> {
        let current = resolve_current_period(&self.period_repo, now).await?;

        let (status, period) = match current {
            Some(CurrentPeriod { status, period }) => {
                let staff = self.staff_repo.list_by_period(period.id).await?;
                (Some(status), Some(PeriodDetail::new(period, staff)))
            }
            None => {
                tracing::debug!("Nenhum período ativo ou futuro em {}", now);
                (None, None)
            }
        };

        let emergency_contacts = self.list_contacts().await?;

        Ok(RosterNow {
            status,
            period,
            emergency_contacts,
            generated_at: now,
        })
    }

    pub async fn list_periods(&self, page: Option<i64>) -> Result<Page<Period>, AppError> {
        let request = PageRequest::new(page, PERIODS_PER_PAGE);
        let total = self.period_repo.count().await?;

        let items = if request.is_valid() {
            self.period_repo.list_page(request).await?
        } else {
            Vec::new()
        };

        Ok(Page::new(items, total, request))
    }

    pub async fn period_detail(&self, id: i64) -> Result<PeriodDetail, AppError> {
        let period = self.period_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Period))?;

        let staff = self.staff_repo.list_by_period(period.id).await?;
        Ok(PeriodDetail::new(period, staff))
    }

    pub async fn list_staff(&self, page: Option<i64>) -> Result<Page<StaffMemberCard>, AppError> {
        let request = PageRequest::new(page, STAFF_PER_PAGE);
        let total = self.staff_repo.count().await?;

        let items = if request.is_valid() {
            self.staff_repo.list_page(request).await?
        } else {
            Vec::new()
        };

        Ok(Page::new(items, total, request).map(StaffMemberCard::from))
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        self.department_repo.list(None, None).await
    }

    pub async fn list_contacts(&self) -> Result<Vec<EmergencyContactCard>, AppError> {
        let contacts = self.contact_repo.list(None).await?;
        Ok(contacts.into_iter().map(EmergencyContactCard::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Mesma semântica das consultas SQL, sobre uma lista em memória.
    struct InMemoryPeriods(Vec<Period>);

    impl PeriodLookup for InMemoryPeriods {
        async fn active_at(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError> {
            Ok(self.0.iter().find(|p| p.contains(now)).cloned())
        }

        async fn next_after(&self, now: DateTime<Utc>) -> Result<Option<Period>, AppError> {
            Ok(self
                .0
                .iter()
                .filter(|p| p.starts_at > now)
                .min_by_key(|p| (p.starts_at, p.id))
                .cloned())
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn period(id: i64, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Period {
        Period { id, description: format!("Período {id}"), starts_at, ends_at }
    }

    #[tokio::test]
    async fn period_containing_now_is_active() {
        let a = period(1, at(2024, 1, 1, 0), at(2024, 1, 2, 0));
        let lookup = InMemoryPeriods(vec![a.clone()]);

        let current = resolve_current_period(&lookup, at(2024, 1, 1, 12)).await.unwrap();

        assert_eq!(current, Some(CurrentPeriod { status: RosterStatus::Active, period: a }));
    }

    #[tokio::test]
    async fn earliest_future_period_is_next() {
        let past = period(1, at(2024, 5, 1, 0), at(2024, 5, 2, 0));
        let later = period(2, at(2024, 6, 20, 0), at(2024, 6, 21, 0));
        let b = period(3, at(2024, 6, 5, 0), at(2024, 6, 6, 0));
        let lookup = InMemoryPeriods(vec![past, later, b.clone()]);

        let current = resolve_current_period(&lookup, at(2024, 6, 1, 0)).await.unwrap();

        assert_eq!(current, Some(CurrentPeriod { status: RosterStatus::Next, period: b }));
    }

    #[tokio::test]
    async fn active_wins_over_a_closer_future_period() {
        let long = period(1, at(2024, 1, 1, 0), at(2024, 12, 31, 0));
        let soon = period(2, at(2024, 3, 1, 13), at(2024, 3, 2, 0));
        let lookup = InMemoryPeriods(vec![soon, long]);

        let current = resolve_current_period(&lookup, at(2024, 3, 1, 12)).await.unwrap().unwrap();

        assert_eq!(current.status, RosterStatus::Active);
        assert_eq!(current.period.id, 1);
    }

    #[tokio::test]
    async fn overlapping_active_periods_return_one_of_them() {
        let lookup = InMemoryPeriods(vec![
            period(1, at(2024, 1, 1, 0), at(2024, 1, 5, 0)),
            period(2, at(2024, 1, 2, 0), at(2024, 1, 3, 0)),
        ]);
        let now = at(2024, 1, 2, 12);

        let current = resolve_current_period(&lookup, now).await.unwrap().unwrap();

        assert_eq!(current.status, RosterStatus::Active);
        assert!(current.period.contains(now));
    }

    #[tokio::test]
    async fn nothing_active_or_ahead_is_absent() {
        let lookup = InMemoryPeriods(vec![period(1, at(2023, 1, 1, 0), at(2023, 1, 2, 0))]);

        let current = resolve_current_period(&lookup, at(2024, 1, 1, 0)).await.unwrap();

        assert_eq!(current, None);
    }

    #[tokio::test]
    async fn period_starting_exactly_now_is_active_not_next() {
        let p = period(1, at(2024, 1, 1, 0), at(2024, 1, 2, 0));
        let lookup = InMemoryPeriods(vec![p]);

        let current = resolve_current_period(&lookup, at(2024, 1, 1, 0)).await.unwrap().unwrap();

        assert_eq!(current.status, RosterStatus::Active);
    }

    #[tokio::test]
    async fn inverted_range_is_tolerated_and_never_active() {
        // início > fim: nunca contém `now`, mas ainda pode ser o próximo
        let broken = period(1, at(2024, 2, 10, 0), at(2024, 2, 1, 0));
        let lookup = InMemoryPeriods(vec![broken]);

        let current = resolve_current_period(&lookup, at(2024, 2, 5, 0)).await.unwrap().unwrap();

        assert_eq!(current.status, RosterStatus::Next);
    }
}
