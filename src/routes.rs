// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::auth::{auth_guard, staff_guard},
};

/// Monta o roteador completo da aplicação.
pub fn build_router(app_state: AppState) -> Router {
    // Páginas públicas da escala (com e sem a barra final)
    let public_routes = Router::new()
        .route("/", get(handlers::roster::roster_now))
        .route("/periodos", get(handlers::roster::list_periods))
        .route("/periodos/", get(handlers::roster::list_periods))
        .route("/periodo/{id}", get(handlers::roster::get_period))
        .route("/periodo/{id}/", get(handlers::roster::get_period))
        .route("/plantonistas", get(handlers::roster::list_staff))
        .route("/plantonistas/", get(handlers::roster::list_staff))
        .route("/secretarias", get(handlers::roster::list_departments))
        .route("/secretarias/", get(handlers::roster::list_departments))
        .route("/contatos", get(handlers::roster::list_contacts))
        .route("/contatos/", get(handlers::roster::list_contacts));

    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route("/schema", get(handlers::admin::schema))
        .route("/schema/{slug}", get(handlers::admin::schema_for))
        .route("/secretarias"
               ,get(handlers::admin::list_departments)
               .post(handlers::admin::create_department)
        )
        .route("/secretarias/{id}"
               ,get(handlers::admin::get_department)
               .put(handlers::admin::update_department)
               .delete(handlers::admin::delete_department)
        )
        .route("/plantonistas"
               ,get(handlers::admin::list_staff)
               .post(handlers::admin::create_staff)
        )
        .route("/plantonistas/{id}"
               ,get(handlers::admin::get_staff)
               .put(handlers::admin::update_staff)
               .delete(handlers::admin::delete_staff)
        )
        .route("/periodos"
               ,get(handlers::admin::list_periods)
               .post(handlers::admin::create_period)
        )
        .route("/periodos/{id}"
               ,get(handlers::admin::get_period)
               .put(handlers::admin::update_period)
               .delete(handlers::admin::delete_period)
        )
        .route("/escalas"
               ,get(handlers::admin::list_assignments)
               .post(handlers::admin::create_assignment)
        )
        .route("/escalas/{id}"
               ,get(handlers::admin::get_assignment)
               .delete(handlers::admin::delete_assignment)
        )
        .route("/contatos"
               ,get(handlers::admin::list_contacts)
               .post(handlers::admin::create_contact)
        )
        .route("/contatos/{id}"
               ,get(handlers::admin::get_contact)
               .put(handlers::admin::update_contact)
               .delete(handlers::admin::delete_contact)
        )
        .route("/usuarios"
               ,get(handlers::admin::list_users)
               .post(handlers::admin::create_user)
        )
        .route("/usuarios/{id}", delete(handlers::admin::delete_user))
        .route("/autocomplete/plantonistas", get(handlers::admin::autocomplete_staff))
        .route("/autocomplete/usuarios", get(handlers::admin::autocomplete_users))
        // A última camada roda primeiro: autentica, depois exige is_staff
        .layer(axum_middleware::from_fn(staff_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(public_routes)
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/admin", admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
