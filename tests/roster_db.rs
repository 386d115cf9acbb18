// tests/roster_db.rs
//
// Testes contra um Postgres real. Rodar com:
//   DATABASE_URL=postgres://... cargo test -- --ignored

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;
use tower::ServiceExt;

use escala::{
    common::error::AppError,
    config::AppState,
    models::{
        admin::{
            AssignmentPayload, DepartmentPayload, InlineAssignment, PeriodPayload,
            StaffMemberPayload,
        },
        roster::{Department, Period, RosterStatus, StaffMember},
    },
    routes::build_router,
};

const SECRET: &str = "segredo-de-teste";

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

async fn department(state: &AppState, name: &str) -> Department {
    state.admin_service
        .create_department(&DepartmentPayload { name: name.into(), roster_active: true })
        .await
        .unwrap()
}

async fn staff(state: &AppState, department_id: i64, name: &str) -> StaffMember {
    state.admin_service
        .create_staff(&StaffMemberPayload {
            department_id,
            user_id: None,
            full_name: name.into(),
            phones: "(11) 99999-0000".into(),
        })
        .await
        .unwrap()
}

async fn period(state: &AppState, description: &str, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>, staff_ids: &[i64]) -> Period {
    let payload = PeriodPayload {
        description: description.into(),
        starts_at,
        ends_at,
        assignments: Some(
            staff_ids
                .iter()
                .map(|&staff_member_id| InlineAssignment { staff_member_id })
                .collect(),
        ),
    };
    state.admin_service.create_period(&payload).await.unwrap().period
}

#[sqlx::test]
#[ignore]
async fn roster_shows_active_period_with_its_staff(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let saude = department(&state, "Secretaria de Saúde").await;
    let maria = staff(&state, saude.id, "Maria").await;
    let joao = staff(&state, saude.id, "João").await;

    let active = period(&state, "Carnaval", at(1, 0), at(5, 0), &[maria.id, joao.id]).await;
    period(&state, "Páscoa", at(20, 0), at(22, 0), &[maria.id]).await;

    let roster = state.roster_service.roster_at(at(3, 12)).await.unwrap();
    assert_eq!(roster.status, Some(RosterStatus::Active));

    let detail = roster.period.unwrap();
    assert_eq!(detail.period.id, active.id);
    // Escalados em ordem alfabética
    let names: Vec<_> = detail.staff.iter().map(|s| s.staff.full_name.as_str()).collect();
    assert_eq!(names, vec!["João", "Maria"]);
}

#[sqlx::test]
#[ignore]
async fn roster_falls_back_to_next_period_and_then_to_nothing(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let upcoming = period(&state, "Páscoa", at(20, 0), at(22, 0), &[]).await;
    period(&state, "Aniversário da cidade", at(25, 0), at(26, 0), &[]).await;

    let roster = state.roster_service.roster_at(at(10, 0)).await.unwrap();
    assert_eq!(roster.status, Some(RosterStatus::Next));
    assert_eq!(roster.period.unwrap().period.id, upcoming.id);

    let roster = state.roster_service.roster_at(at(28, 0)).await.unwrap();
    assert!(roster.status.is_none());
    assert!(roster.period.is_none());
}

#[sqlx::test]
#[ignore]
async fn overlapping_periods_pick_latest_start(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    period(&state, "Mês inteiro", at(1, 0), at(31, 0), &[]).await;
    let feriado = period(&state, "Feriado", at(10, 0), at(12, 0), &[]).await;

    let roster = state.roster_service.roster_at(at(11, 0)).await.unwrap();
    assert_eq!(roster.period.unwrap().period.id, feriado.id);
}

#[sqlx::test]
#[ignore]
async fn deleting_department_cascades_to_staff_and_assignments(pool: PgPool) {
    let state = AppState::with_pool(pool.clone(), SECRET.into());
    let obras = department(&state, "Secretaria de Obras").await;
    let ana = staff(&state, obras.id, "Ana").await;
    let feriado = period(&state, "Feriado", at(1, 0), at(2, 0), &[ana.id]).await;

    state.admin_service.delete_department(obras.id).await.unwrap();

    let staff_left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff_members")
        .fetch_one(&pool)
        .await
        .unwrap();
    let assignments_left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assignments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(staff_left, 0);
    assert_eq!(assignments_left, 0);

    // O período continua existindo, só sem escala
    let detail = state.roster_service.period_detail(feriado.id).await.unwrap();
    assert!(detail.staff.is_empty());
}

#[sqlx::test]
#[ignore]
async fn deleting_user_keeps_staff_member_unlinked(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let user = state.auth_service
        .create_user("ana@prefeitura.sp.gov.br", "segredo123", false)
        .await
        .unwrap();
    let saude = department(&state, "Secretaria de Saúde").await;

    let ana = state.admin_service
        .create_staff(&StaffMemberPayload {
            department_id: saude.id,
            user_id: Some(user.id),
            full_name: "Ana".into(),
            phones: "199".into(),
        })
        .await
        .unwrap();

    state.auth_service.delete_user(user.id).await.unwrap();

    let ana = state.admin_service.get_staff(ana.id).await.unwrap();
    assert!(ana.user_id.is_none());
}

#[sqlx::test]
#[ignore]
async fn duplicate_assignment_is_a_validation_error(pool: PgPool) {
    let state = AppState::with_pool(pool.clone(), SECRET.into());
    let saude = department(&state, "Secretaria de Saúde").await;
    let maria = staff(&state, saude.id, "Maria").await;
    let feriado = period(&state, "Feriado", at(1, 0), at(2, 0), &[maria.id]).await;

    let err = state.admin_service
        .create_assignment(&AssignmentPayload { staff_member_id: maria.id, period_id: feriado.id })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assignments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test]
#[ignore]
async fn repeated_department_name_is_a_validation_error(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    department(&state, "Secretaria de Saúde").await;

    let err = state.admin_service
        .create_department(&DepartmentPayload { name: "Secretaria de Saúde".into(), roster_active: false })
        .await
        .unwrap_err();

    match err {
        AppError::ValidationError(errors) => assert!(errors.field_errors().contains_key("name")),
        other => panic!("esperava erro de validação, veio {other:?}"),
    }
}

#[sqlx::test]
#[ignore]
async fn updating_period_replaces_inline_assignments(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let saude = department(&state, "Secretaria de Saúde").await;
    let maria = staff(&state, saude.id, "Maria").await;
    let joao = staff(&state, saude.id, "João").await;
    let feriado = period(&state, "Feriado", at(1, 0), at(2, 0), &[maria.id]).await;

    let payload = PeriodPayload {
        description: "Feriado prolongado".into(),
        starts_at: at(1, 0),
        ends_at: at(3, 0),
        assignments: Some(vec![InlineAssignment { staff_member_id: joao.id }]),
    };
    let detail = state.admin_service.update_period(feriado.id, &payload).await.unwrap();

    assert_eq!(detail.period.description, "Feriado prolongado");
    let ids: Vec<_> = detail.staff.iter().map(|s| s.staff.id).collect();
    assert_eq!(ids, vec![joao.id]);
}

#[sqlx::test]
#[ignore]
async fn sixteen_staff_members_span_two_pages(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let saude = department(&state, "Secretaria de Saúde").await;
    for i in 0..16 {
        staff(&state, saude.id, &format!("Plantonista {i:02}")).await;
    }

    let first = state.roster_service.list_staff(Some(1)).await.unwrap();
    assert_eq!(first.items.len(), 15);
    assert!(first.has_next);

    let second = state.roster_service.list_staff(Some(2)).await.unwrap();
    assert_eq!(second.items.len(), 1);
    assert!(!second.has_next);
    assert!(second.has_previous);

    let beyond = state.roster_service.list_staff(Some(9)).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.num_pages, 2);
}

#[sqlx::test]
#[ignore]
async fn periods_are_listed_newest_first(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let base = at(1, 0);
    for i in 0..11 {
        let start = base + Duration::days(i);
        period(&state, &format!("Período {i}"), start, start + Duration::hours(12), &[]).await;
    }

    let page = state.roster_service.list_periods(None).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.items[0].description, "Período 10");
    assert_eq!(page.total, 11);
}

#[sqlx::test]
#[ignore]
async fn missing_period_detail_is_not_found(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    let response = build_router(state)
        .oneshot(Request::get("/periodo/999/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore]
async fn admin_requires_staff_account(pool: PgPool) {
    let state = AppState::with_pool(pool, SECRET.into());
    state.auth_service.create_user("equipe@prefeitura.sp.gov.br", "segredo123", true).await.unwrap();
    state.auth_service.create_user("comum@prefeitura.sp.gov.br", "segredo123", false).await.unwrap();

    let staff_token = state.auth_service.login_user("equipe@prefeitura.sp.gov.br", "segredo123").await.unwrap();
    let plain_token = state.auth_service.login_user("comum@prefeitura.sp.gov.br", "segredo123").await.unwrap();
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::get("/admin/schema")
                .header(header::AUTHORIZATION, format!("Bearer {plain_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(
            Request::get("/admin/schema/periodos")
                .header(header::AUTHORIZATION, format!("Bearer {staff_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::get("/admin/schema/nada")
                .header(header::AUTHORIZATION, format!("Bearer {staff_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::post("/admin/secretarias")
                .header(header::AUTHORIZATION, format!("Bearer {staff_token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Secretaria de Educação"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
