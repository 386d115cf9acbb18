// src/models/roster.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Separa uma lista de telefones "a, b , c" em itens limpos.
pub fn split_phones(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

// --- SECRETARIA ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Secretaria de Saúde")]
    pub name: String,
    #[schema(example = true)]
    pub roster_active: bool,
}

// --- PLANTONISTA ---

// Sempre lido com JOIN em departments para trazer o nome da secretaria.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: i64,
    pub department_id: i64,
    #[schema(example = "Secretaria de Obras")]
    pub department_name: String,
    pub user_id: Option<Uuid>,
    #[schema(example = "Maria da Silva")]
    pub full_name: String,
    #[schema(example = "(11) 99999-8888, (11) 4798-0000")]
    pub phones: String,
}

impl StaffMember {
    pub fn label(&self) -> String {
        format!("{} ({})", self.full_name, self.department_name)
    }

    pub fn phone_list(&self) -> Vec<String> {
        split_phones(&self.phones)
    }
}

/// Plantonista pronto para exibição: rótulo e telefones já separados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffMemberCard {
    #[serde(flatten)]
    pub staff: StaffMember,
    pub label: String,
    pub phone_list: Vec<String>,
}

impl From<StaffMember> for StaffMemberCard {
    fn from(staff: StaffMember) -> Self {
        Self {
            label: staff.label(),
            phone_list: staff.phone_list(),
            staff,
        }
    }
}

// --- PERÍODO ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: i64,
    #[schema(example = "Final de Semana de Carnaval")]
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Period {
    /// Início e fim inclusivos, como na consulta do período ativo.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.starts_at <= instant && instant <= self.ends_at
    }

    pub fn label(&self) -> String {
        format!(
            "{} ({} a {})",
            self.description,
            self.starts_at.format("%d/%m/%Y %H:%M"),
            self.ends_at.format("%d/%m/%Y %H:%M")
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDetail {
    #[serde(flatten)]
    pub period: Period,
    pub label: String,
    pub staff: Vec<StaffMemberCard>,
}

impl PeriodDetail {
    pub fn new(period: Period, staff: Vec<StaffMember>) -> Self {
        Self {
            label: period.label(),
            staff: staff.into_iter().map(StaffMemberCard::from).collect(),
            period,
        }
    }
}

// --- ESCALA (plantonista <-> período) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub staff_member_id: i64,
    #[schema(example = "Maria da Silva")]
    pub staff_member_name: String,
    pub period_id: i64,
    #[schema(example = "Final de Semana de Carnaval")]
    pub period_description: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn label(&self) -> String {
        format!(
            "Escala de {} para o período {}",
            self.staff_member_name, self.period_description
        )
    }
}

// --- CONTATO EMERGENCIAL ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub id: i64,
    #[schema(example = "Defesa Civil")]
    pub organization: String,
    #[schema(example = "199, (11) 4798-1234")]
    pub phones: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContactCard {
    #[serde(flatten)]
    pub contact: EmergencyContact,
    pub phone_list: Vec<String>,
}

impl From<EmergencyContact> for EmergencyContactCard {
    fn from(contact: EmergencyContact) -> Self {
        Self {
            phone_list: split_phones(&contact.phones),
            contact,
        }
    }
}

// --- ESCALA DE AGORA ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RosterStatus {
    Active,
    Next,
}

/// Resultado do resolvedor: qual período mostrar e por quê.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPeriod {
    pub status: RosterStatus,
    pub period: Period,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterNow {
    /// `null` quando não há período ativo nem futuro
    pub status: Option<RosterStatus>,
    pub period: Option<PeriodDetail>,
    pub emergency_contacts: Vec<EmergencyContactCard>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn period() -> Period {
        Period {
            id: 7,
            description: "Carnaval".into(),
            starts_at: Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2024, 2, 14, 18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn phones_are_split_and_trimmed() {
        assert_eq!(
            split_phones("(11) 99999-8888, (11) 4798-0000 ,,"),
            vec!["(11) 99999-8888", "(11) 4798-0000"]
        );
        assert!(split_phones("").is_empty());
    }

    #[test]
    fn period_label_uses_brazilian_date_format() {
        assert_eq!(period().label(), "Carnaval (10/02/2024 08:00 a 14/02/2024 18:30)");
    }

    #[test]
    fn period_bounds_are_inclusive() {
        let p = period();
        assert!(p.contains(p.starts_at));
        assert!(p.contains(p.ends_at));
        assert!(!p.contains(p.ends_at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn staff_card_carries_label_and_phones() {
        let card = StaffMemberCard::from(StaffMember {
            id: 1,
            department_id: 2,
            department_name: "Obras".into(),
            user_id: None,
            full_name: "João Souza".into(),
            phones: "1111, 2222".into(),
        });

        assert_eq!(card.label, "João Souza (Obras)");
        assert_eq!(card.phone_list, vec!["1111", "2222"]);

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["fullName"], "João Souza");
        assert_eq!(json["departmentName"], "Obras");
    }

    #[test]
    fn roster_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RosterStatus::Active).unwrap(), "active");
        assert_eq!(serde_json::to_value(RosterStatus::Next).unwrap(), "next");
    }
}
