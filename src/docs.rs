// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Escala (páginas públicas) ---
        handlers::roster::roster_now,
        handlers::roster::list_periods,
        handlers::roster::get_period,
        handlers::roster::list_staff,
        handlers::roster::list_departments,
        handlers::roster::list_contacts,

        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Admin ---
        handlers::admin::schema,
        handlers::admin::schema_for,
        handlers::admin::list_departments,
        handlers::admin::create_department,
        handlers::admin::get_department,
        handlers::admin::update_department,
        handlers::admin::delete_department,
        handlers::admin::list_staff,
        handlers::admin::create_staff,
        handlers::admin::get_staff,
        handlers::admin::update_staff,
        handlers::admin::delete_staff,
        handlers::admin::list_periods,
        handlers::admin::create_period,
        handlers::admin::get_period,
        handlers::admin::update_period,
        handlers::admin::delete_period,
        handlers::admin::list_assignments,
        handlers::admin::create_assignment,
        handlers::admin::get_assignment,
        handlers::admin::delete_assignment,
        handlers::admin::list_contacts,
        handlers::admin::create_contact,
        handlers::admin::get_contact,
        handlers::admin::update_contact,
        handlers::admin::delete_contact,
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::delete_user,
        handlers::admin::autocomplete_staff,
        handlers::admin::autocomplete_users,
    ),
    components(
        schemas(
            // --- Escala ---
            models::roster::Department,
            models::roster::StaffMember,
            models::roster::StaffMemberCard,
            models::roster::Period,
            models::roster::PeriodDetail,
            models::roster::Assignment,
            models::roster::EmergencyContact,
            models::roster::EmergencyContactCard,
            models::roster::RosterStatus,
            models::roster::RosterNow,

            // --- Auth ---
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::CreateUserPayload,
            models::auth::AuthResponse,

            // --- Admin ---
            models::admin::DepartmentPayload,
            models::admin::StaffMemberPayload,
            models::admin::InlineAssignment,
            models::admin::PeriodPayload,
            models::admin::AssignmentPayload,
            models::admin::EmergencyContactPayload,
            models::admin::DateFilter,
            models::admin::AutocompleteResponse,
            models::admin::AutocompleteItem,
        )
    ),
    tags(
        (name = "Escala", description = "Escala de plantão: período ativo, períodos, plantonistas, secretarias e contatos"),
        (name = "Auth", description = "Autenticação"),
        (name = "Admin", description = "Painel administrativo (somente equipe)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/"));
        assert!(paths.contains_key("/periodo/{id}/"));
        assert!(paths.contains_key("/admin/periodos/{id}"));
        assert!(paths.contains_key("/admin/schema/{slug}"));
        assert!(paths.contains_key("/admin/autocomplete/plantonistas"));
        assert!(doc.components.as_ref().is_some_and(|c| c.security_schemes.contains_key("api_jwt")));
    }
}
