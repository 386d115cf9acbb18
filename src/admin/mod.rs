// src/admin/mod.rs
//
// Descrição declarativa do painel administrativo: cada entidade registra o que
// aparece na listagem, onde a busca procura, quais filtros existem e o que é
// editado inline. O frontend monta telas e formulários a partir disso.

use serde::Serialize;

mod registry;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminModel {
    /// Segmento da rota em `/admin/{slug}`
    pub slug: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub ordering: &'static str,
    pub list_display: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub list_filter: &'static [ListFilter],
    pub autocomplete_fields: &'static [Autocomplete],
    pub inlines: &'static [InlineModel],
    pub form_fields: &'static [FormField],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    pub field: &'static str,
    pub kind: FilterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FilterKind {
    Boolean,
    ForeignKey { related: &'static str },
    /// Atalhos: today, past7Days, thisMonth, thisYear
    Date,
}

/// Campo com busca assistida e a rota que a atende.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Autocomplete {
    pub field: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineModel {
    pub slug: &'static str,
    pub field: &'static str,
    pub verbose_name_plural: &'static str,
    /// Linhas em branco oferecidas para novos registros
    pub extra: u8,
    pub fields: &'static [FormField],
    pub autocomplete_fields: &'static [Autocomplete],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    Text,
    TextArea,
    Checkbox,
    DateTime,
    Select,
    Autocomplete,
}

inventory::collect!(AdminModel);

/// Todas as entidades registradas, em ordem alfabética de slug.
pub fn registry() -> Vec<&'static AdminModel> {
    let mut models: Vec<&'static AdminModel> = inventory::iter::<AdminModel>.into_iter().collect();
    models.sort_by_key(|m| m.slug);
    models
}

/// Descrição de uma entidade pelo slug da rota.
pub fn find(slug: &str) -> Option<&'static AdminModel> {
    inventory::iter::<AdminModel>.into_iter().find(|m| m.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_is_registered_once() {
        let slugs: Vec<&str> = registry().iter().map(|m| m.slug).collect();
        assert_eq!(slugs, vec!["contatos", "escalas", "periodos", "plantonistas", "secretarias"]);
    }

    #[test]
    fn period_form_edits_assignments_inline() {
        let periodos = find("periodos").expect("periodos registrado");
        let inline = &periodos.inlines[0];

        assert_eq!(inline.slug, "escalas");
        assert_eq!(inline.extra, 1);
        assert_eq!(inline.autocomplete_fields[0].field, "staffMemberId");
        assert_eq!(periodos.list_filter[0].kind, FilterKind::Date);
    }

    #[test]
    fn staff_search_covers_department_name() {
        let plantonistas = find("plantonistas").unwrap();

        assert!(plantonistas.search_fields.contains(&"department.name"));
        assert_eq!(
            plantonistas.list_filter[0].kind,
            FilterKind::ForeignKey { related: "secretarias" }
        );
        assert_eq!(plantonistas.autocomplete_fields[0].field, "userId");
    }

    #[test]
    fn unknown_slug_is_not_registered() {
        assert!(find("usuarios").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn department_filters_on_roster_flag() {
        let secretarias = find("secretarias").unwrap();
        assert_eq!(secretarias.list_filter[0].field, "rosterActive");
        assert_eq!(secretarias.list_filter[0].kind, FilterKind::Boolean);
    }

    #[test]
    fn schema_serializes_for_the_frontend() {
        let json = serde_json::to_value(find("contatos").unwrap()).unwrap();
        assert_eq!(json["searchFields"][0], "organization");
        assert_eq!(json["formFields"][0]["maxLength"], 150);
    }
}
