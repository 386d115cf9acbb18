// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    admin,
    common::error::{ApiError, AppError, Resource},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        admin::{
            AssignmentFilter, AssignmentPayload, AutocompleteItem, AutocompleteQuery,
            AutocompleteResponse, DepartmentFilter, DepartmentPayload, EmergencyContactFilter,
            EmergencyContactPayload, PeriodFilter, PeriodPayload, StaffMemberFilter,
            StaffMemberPayload,
        },
        auth::{CreateUserPayload, User},
        roster::{Assignment, Department, EmergencyContact, Period, PeriodDetail, StaffMember},
    },
};

// GET /admin/schema
#[utoipa::path(
    get,
    path = "/admin/schema",
    tag = "Admin",
    responses(
        (status = 200, description = "Descrição das telas do painel (listagem, busca, filtros, formulários, inlines)")
    ),
    security(("api_jwt" = []))
)]
pub async fn schema() -> impl IntoResponse {
    Json(admin::registry())
}

// GET /admin/schema/{slug}
#[utoipa::path(
    get,
    path = "/admin/schema/{slug}",
    tag = "Admin",
    params(("slug" = String, Path, description = "Entidade do painel, ex.: periodos")),
    responses(
        (status = 200, description = "Descrição da tela de uma entidade"),
        (status = 404, description = "Entidade não registrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn schema_for(
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let model = admin::find(&slug)
        .ok_or_else(|| AppError::NotFound(Resource::AdminModel).to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(model)))
}

// =============================================================================
//  SECRETARIAS
// =============================================================================

// GET /admin/secretarias
#[utoipa::path(
    get,
    path = "/admin/secretarias",
    tag = "Admin",
    params(DepartmentFilter),
    responses((status = 200, description = "Secretarias", body = Vec<Department>)),
    security(("api_jwt" = []))
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<DepartmentFilter>,
) -> Result<impl IntoResponse, ApiError> {

    let departments = app_state.admin_service
        .list_departments(&filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(departments)))
}

// POST /admin/secretarias
#[utoipa::path(
    post,
    path = "/admin/secretarias",
    tag = "Admin",
    request_body = DepartmentPayload,
    responses(
        (status = 201, description = "Secretaria criada", body = Department),
        (status = 400, description = "Dados inválidos ou nome repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<DepartmentPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let department = app_state.admin_service
        .create_department(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(department)))
}

// GET /admin/secretarias/{id}
#[utoipa::path(
    get,
    path = "/admin/secretarias/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID da secretaria")),
    responses(
        (status = 200, description = "Secretaria", body = Department),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_department(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    let department = app_state.admin_service
        .get_department(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(department)))
}

// PUT /admin/secretarias/{id}
#[utoipa::path(
    put,
    path = "/admin/secretarias/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID da secretaria")),
    request_body = DepartmentPayload,
    responses(
        (status = 200, description = "Secretaria atualizada", body = Department),
        (status = 400, description = "Dados inválidos ou nome repetido"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let department = app_state.admin_service
        .update_department(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(department)))
}

// DELETE /admin/secretarias/{id}
#[utoipa::path(
    delete,
    path = "/admin/secretarias/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID da secretaria")),
    responses(
        (status = 204, description = "Secretaria removida junto com os plantonistas"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_department(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.admin_service
        .delete_department(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PLANTONISTAS
// =============================================================================

// GET /admin/plantonistas
#[utoipa::path(
    get,
    path = "/admin/plantonistas",
    tag = "Admin",
    params(StaffMemberFilter),
    responses((status = 200, description = "Plantonistas", body = Vec<StaffMember>)),
    security(("api_jwt" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<StaffMemberFilter>,
) -> Result<impl IntoResponse, ApiError> {

    let staff = app_state.admin_service
        .list_staff(&filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(staff)))
}

// POST /admin/plantonistas
#[utoipa::path(
    post,
    path = "/admin/plantonistas",
    tag = "Admin",
    request_body = StaffMemberPayload,
    responses(
        (status = 201, description = "Plantonista criado", body = StaffMember),
        (status = 400, description = "Dados inválidos, secretaria inexistente ou usuário já vinculado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<StaffMemberPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let staff = app_state.admin_service
        .create_staff(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(staff)))
}

// GET /admin/plantonistas/{id}
#[utoipa::path(
    get,
    path = "/admin/plantonistas/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do plantonista")),
    responses(
        (status = 200, description = "Plantonista", body = StaffMember),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    let staff = app_state.admin_service
        .get_staff(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(staff)))
}

// PUT /admin/plantonistas/{id}
#[utoipa::path(
    put,
    path = "/admin/plantonistas/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do plantonista")),
    request_body = StaffMemberPayload,
    responses(
        (status = 200, description = "Plantonista atualizado", body = StaffMember),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<StaffMemberPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let staff = app_state.admin_service
        .update_staff(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(staff)))
}

// DELETE /admin/plantonistas/{id}
#[utoipa::path(
    delete,
    path = "/admin/plantonistas/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do plantonista")),
    responses(
        (status = 204, description = "Plantonista removido junto com as escalas"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.admin_service
        .delete_staff(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PERÍODOS
// =============================================================================

// GET /admin/periodos
#[utoipa::path(
    get,
    path = "/admin/periodos",
    tag = "Admin",
    params(PeriodFilter),
    responses((status = 200, description = "Períodos", body = Vec<Period>)),
    security(("api_jwt" = []))
)]
pub async fn list_periods(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<PeriodFilter>,
) -> Result<impl IntoResponse, ApiError> {

    let periods = app_state.admin_service
        .list_periods(&filter, Utc::now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(periods)))
}

// POST /admin/periodos
#[utoipa::path(
    post,
    path = "/admin/periodos",
    tag = "Admin",
    request_body = PeriodPayload,
    responses(
        (status = 201, description = "Período criado com a escala", body = PeriodDetail),
        (status = 400, description = "Dados inválidos, fim antes do início ou plantonista repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_period(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<PeriodPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate_form()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let detail = app_state.admin_service
        .create_period(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /admin/periodos/{id}
#[utoipa::path(
    get,
    path = "/admin/periodos/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do período")),
    responses(
        (status = 200, description = "Período com a escala", body = PeriodDetail),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_period(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    let detail = app_state.admin_service
        .get_period(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /admin/periodos/{id}
#[utoipa::path(
    put,
    path = "/admin/periodos/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do período")),
    request_body = PeriodPayload,
    responses(
        (status = 200, description = "Período atualizado; a escala enviada substitui a anterior", body = PeriodDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_period(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<PeriodPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate_form()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let detail = app_state.admin_service
        .update_period(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(detail)))
}

// DELETE /admin/periodos/{id}
#[utoipa::path(
    delete,
    path = "/admin/periodos/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do período")),
    responses(
        (status = 204, description = "Período removido junto com a escala"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_period(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.admin_service
        .delete_period(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ESCALAS
// =============================================================================

// GET /admin/escalas
#[utoipa::path(
    get,
    path = "/admin/escalas",
    tag = "Admin",
    params(AssignmentFilter),
    responses((status = 200, description = "Escalas", body = Vec<Assignment>)),
    security(("api_jwt" = []))
)]
pub async fn list_assignments(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<AssignmentFilter>,
) -> Result<impl IntoResponse, ApiError> {

    let assignments = app_state.admin_service
        .list_assignments(&filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(assignments)))
}

// POST /admin/escalas
#[utoipa::path(
    post,
    path = "/admin/escalas",
    tag = "Admin",
    request_body = AssignmentPayload,
    responses(
        (status = 201, description = "Escala criada", body = Assignment),
        (status = 400, description = "Plantonista já escalado no período ou referência inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_assignment(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<AssignmentPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let assignment = app_state.admin_service
        .create_assignment(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

// GET /admin/escalas/{id}
#[utoipa::path(
    get,
    path = "/admin/escalas/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID da escala")),
    responses(
        (status = 200, description = "Escala", body = Assignment),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_assignment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    let assignment = app_state.admin_service
        .get_assignment(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(assignment)))
}

// DELETE /admin/escalas/{id}
#[utoipa::path(
    delete,
    path = "/admin/escalas/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID da escala")),
    responses(
        (status = 204, description = "Escala removida"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.admin_service
        .delete_assignment(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CONTATOS EMERGENCIAIS
// =============================================================================

// GET /admin/contatos
#[utoipa::path(
    get,
    path = "/admin/contatos",
    tag = "Admin",
    params(EmergencyContactFilter),
    responses((status = 200, description = "Contatos emergenciais", body = Vec<EmergencyContact>)),
    security(("api_jwt" = []))
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<EmergencyContactFilter>,
) -> Result<impl IntoResponse, ApiError> {

    let contacts = app_state.admin_service
        .list_contacts(&filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(contacts)))
}

// POST /admin/contatos
#[utoipa::path(
    post,
    path = "/admin/contatos",
    tag = "Admin",
    request_body = EmergencyContactPayload,
    responses(
        (status = 201, description = "Contato criado", body = EmergencyContact),
        (status = 400, description = "Dados inválidos ou órgão repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<EmergencyContactPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let contact = app_state.admin_service
        .create_contact(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(contact)))
}

// GET /admin/contatos/{id}
#[utoipa::path(
    get,
    path = "/admin/contatos/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do contato")),
    responses(
        (status = 200, description = "Contato", body = EmergencyContact),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    let contact = app_state.admin_service
        .get_contact(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(contact)))
}

// PUT /admin/contatos/{id}
#[utoipa::path(
    put,
    path = "/admin/contatos/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do contato")),
    request_body = EmergencyContactPayload,
    responses(
        (status = 200, description = "Contato atualizado", body = EmergencyContact),
        (status = 400, description = "Dados inválidos ou órgão repetido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
    Json(payload): Json<EmergencyContactPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let contact = app_state.admin_service
        .update_contact(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(contact)))
}

// DELETE /admin/contatos/{id}
#[utoipa::path(
    delete,
    path = "/admin/contatos/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID do contato")),
    responses(
        (status = 204, description = "Contato removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.admin_service
        .delete_contact(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CONTAS DO SISTEMA
// =============================================================================

// GET /admin/usuarios
#[utoipa::path(
    get,
    path = "/admin/usuarios",
    tag = "Admin",
    params(AutocompleteQuery),
    responses((status = 200, description = "Contas (busca por e-mail)", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AutocompleteQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let users = app_state.auth_service
        .search_users(query.term.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(users)))
}

// POST /admin/usuarios
#[utoipa::path(
    post,
    path = "/admin/usuarios",
    tag = "Admin",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Conta criada", body = User),
        (status = 400, description = "Dados inválidos ou e-mail repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let user = app_state.auth_service
        .create_user(&payload.email, &payload.password, payload.is_staff)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// DELETE /admin/usuarios/{id}
#[utoipa::path(
    delete,
    path = "/admin/usuarios/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 204, description = "Conta removida; o plantonista vinculado fica sem usuário"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.auth_service
        .delete_user(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  AUTOCOMPLETE
// =============================================================================

// GET /admin/autocomplete/plantonistas
#[utoipa::path(
    get,
    path = "/admin/autocomplete/plantonistas",
    tag = "Admin",
    params(AutocompleteQuery),
    responses((status = 200, description = "Sugestões de plantonistas", body = AutocompleteResponse)),
    security(("api_jwt" = []))
)]
pub async fn autocomplete_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AutocompleteQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let staff = app_state.admin_service
        .autocomplete_staff(query.term.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let results = staff
        .into_iter()
        .map(|s| AutocompleteItem { id: s.id.to_string(), text: s.label() })
        .collect();

    Ok((StatusCode::OK, Json(AutocompleteResponse { results })))
}

// GET /admin/autocomplete/usuarios
#[utoipa::path(
    get,
    path = "/admin/autocomplete/usuarios",
    tag = "Admin",
    params(AutocompleteQuery),
    responses((status = 200, description = "Sugestões de contas", body = AutocompleteResponse)),
    security(("api_jwt" = []))
)]
pub async fn autocomplete_users(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AutocompleteQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let users = app_state.auth_service
        .search_users(query.term.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    let results = users
        .into_iter()
        .map(|u| AutocompleteItem { id: u.id.to_string(), text: u.email })
        .collect();

    Ok((StatusCode::OK, Json(AutocompleteResponse { results })))
}
