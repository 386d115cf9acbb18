// src/handlers/roster.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::{
        error::ApiError,
        pagination::{Page, PageQuery},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::roster::{
        Department, EmergencyContactCard, Period, PeriodDetail, RosterNow, StaffMemberCard,
    },
};

// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Escala",
    responses(
        (status = 200, description = "Período ativo (ou o próximo) com a escala e os contatos emergenciais", body = RosterNow)
    )
)]
pub async fn roster_now(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let roster = app_state.roster_service
        .roster_at(Utc::now())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(roster)))
}

// GET /periodos/
#[utoipa::path(
    get,
    path = "/periodos/",
    tag = "Escala",
    params(PageQuery),
    responses(
        (status = 200, description = "Períodos do mais recente para o mais antigo (10 por página)", body = Page<Period>)
    )
)]
pub async fn list_periods(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let page = app_state.roster_service
        .list_periods(query.page)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /periodo/{id}/
#[utoipa::path(
    get,
    path = "/periodo/{id}/",
    tag = "Escala",
    params(
        ("id" = i64, Path, description = "ID do período")
    ),
    responses(
        (status = 200, description = "Período com os plantonistas escalados", body = PeriodDetail),
        (status = 404, description = "Período não encontrado")
    )
)]
pub async fn get_period(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {

    let detail = app_state.roster_service
        .period_detail(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(detail)))
}

// GET /plantonistas/
#[utoipa::path(
    get,
    path = "/plantonistas/",
    tag = "Escala",
    params(PageQuery),
    responses(
        (status = 200, description = "Plantonistas por nome (15 por página)", body = Page<StaffMemberCard>)
    )
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let page = app_state.roster_service
        .list_staff(query.page)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /secretarias/
#[utoipa::path(
    get,
    path = "/secretarias/",
    tag = "Escala",
    responses(
        (status = 200, description = "Secretarias por nome", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let departments = app_state.roster_service
        .list_departments()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(departments)))
}

// GET /contatos/
#[utoipa::path(
    get,
    path = "/contatos/",
    tag = "Escala",
    responses(
        (status = 200, description = "Contatos emergenciais por órgão", body = Vec<EmergencyContactCard>)
    )
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let contacts = app_state.roster_service
        .list_contacts()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(contacts)))
}
