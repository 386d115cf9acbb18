// src/models/admin.rs
//
// Formulários e filtros do painel administrativo.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

fn default_true() -> bool {
    true
}

// =============================================================================
//  FORMULÁRIOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Secretaria de Saúde")]
    pub name: String,

    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub roster_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffMemberPayload {
    #[schema(example = 1)]
    pub department_id: i64,

    pub user_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[validate(length(min = 1, max = 100))]
    #[schema(example = "(11) 99999-8888, (11) 4798-0000")]
    pub phones: String,
}

/// Linha da escala editada dentro do formulário do período.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InlineAssignment {
    #[schema(example = 3)]
    pub staff_member_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPayload {
    #[validate(length(min = 1, max = 150))]
    #[schema(example = "Final de Semana de Carnaval")]
    pub description: String,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    /// `None` mantém a escala atual; uma lista substitui a escala inteira
    #[serde(default)]
    pub assignments: Option<Vec<InlineAssignment>>,
}

impl PeriodPayload {
    /// Validação completa do formulário: campos, ordem das datas e escala sem repetição.
    pub fn validate_form(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.starts_at > self.ends_at {
            errors.add("endsAt", ValidationError::new("range_order"));
        }

        if let Some(inline) = &self.assignments {
            let mut seen = HashSet::new();
            if inline.iter().any(|row| !seen.insert(row.staff_member_id)) {
                errors.add("assignments", ValidationError::new("duplicate"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// IDs da escala na ordem recebida (sem validação).
    pub fn staff_ids(&self) -> Option<Vec<i64>> {
        self.assignments
            .as_ref()
            .map(|rows| rows.iter().map(|row| row.staff_member_id).collect())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPayload {
    pub staff_member_id: i64,
    pub period_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactPayload {
    #[validate(length(min = 1, max = 150))]
    #[schema(example = "Defesa Civil")]
    pub organization: String,

    #[validate(length(min = 1, max = 200))]
    #[schema(example = "199")]
    pub phones: String,

    pub notes: Option<String>,
}

// =============================================================================
//  FILTROS DAS LISTAGENS
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentFilter {
    /// Busca por nome
    pub q: Option<String>,
    pub roster_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StaffMemberFilter {
    /// Busca por nome completo ou nome da secretaria
    pub q: Option<String>,
    pub department_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PeriodFilter {
    /// Busca pela descrição
    pub q: Option<String>,
    pub starts_at: Option<DateFilter>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactFilter {
    /// Busca pelo órgão
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFilter {
    pub period_id: Option<i64>,
    pub staff_member_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AutocompleteQuery {
    pub term: Option<String>,
}

/// Resposta do autocomplete, no formato `{ "results": [{ "id", "text" }] }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AutocompleteResponse {
    pub results: Vec<AutocompleteItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AutocompleteItem {
    #[schema(example = "42")]
    pub id: String,
    #[schema(example = "Maria da Silva (Secretaria de Saúde)")]
    pub text: String,
}

/// Atalhos de data do filtro lateral de períodos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DateFilter {
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

impl DateFilter {
    /// Intervalo `[início, fim)` relativo a `now` (UTC).
    pub fn range(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = now.date_naive();
        let tomorrow = midnight(today) + Duration::days(1);

        match self {
            DateFilter::Today => (midnight(today), tomorrow),
            DateFilter::Past7Days => (midnight(today) - Duration::days(7), tomorrow),
            DateFilter::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let next = if first.month() == 12 {
                    NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
                }
                .unwrap_or(first);
                (midnight(first), midnight(next))
            }
            DateFilter::ThisYear => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let next = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap_or(today);
                (midnight(first), midnight(next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn period_payload(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> PeriodPayload {
        PeriodPayload {
            description: "Feriado".into(),
            starts_at,
            ends_at,
            assignments: None,
        }
    }

    #[test]
    fn end_before_start_is_rejected_on_ends_at() {
        let payload = period_payload(at(2024, 1, 2, 0), at(2024, 1, 1, 0));
        let errors = payload.validate_form().unwrap_err();
        assert!(errors.field_errors().contains_key("endsAt"));
    }

    #[test]
    fn zero_length_period_is_accepted() {
        let payload = period_payload(at(2024, 1, 1, 0), at(2024, 1, 1, 0));
        assert!(payload.validate_form().is_ok());
    }

    #[test]
    fn repeated_staff_in_inline_rows_is_rejected() {
        let mut payload = period_payload(at(2024, 1, 1, 0), at(2024, 1, 2, 0));
        payload.assignments = Some(vec![
            InlineAssignment { staff_member_id: 4 },
            InlineAssignment { staff_member_id: 9 },
            InlineAssignment { staff_member_id: 4 },
        ]);

        let errors = payload.validate_form().unwrap_err();
        assert!(errors.field_errors().contains_key("assignments"));
    }

    #[test]
    fn empty_description_and_bad_range_are_reported_together() {
        let mut payload = period_payload(at(2024, 1, 2, 0), at(2024, 1, 1, 0));
        payload.description = String::new();

        let errors = payload.validate_form().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("endsAt"));
    }

    #[test]
    fn date_filter_ranges() {
        let now = at(2024, 12, 18, 15);

        assert_eq!(DateFilter::Today.range(now), (at(2024, 12, 18, 0), at(2024, 12, 19, 0)));
        assert_eq!(DateFilter::Past7Days.range(now), (at(2024, 12, 11, 0), at(2024, 12, 19, 0)));
        assert_eq!(DateFilter::ThisMonth.range(now), (at(2024, 12, 1, 0), at(2025, 1, 1, 0)));
        assert_eq!(DateFilter::ThisYear.range(now), (at(2024, 1, 1, 0), at(2025, 1, 1, 0)));
    }

    #[test]
    fn date_filter_parses_from_query_value() {
        let filter: PeriodFilter = serde_json::from_value(serde_json::json!({
            "q": "carnaval",
            "startsAt": "past7Days"
        }))
        .unwrap();
        assert_eq!(filter.starts_at, Some(DateFilter::Past7Days));
    }
}
