//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{CappedContributionRate, FlatContributionRate, OvertimeBand, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::{Bonus, EmployeeId, SalaryAdvance, YearMonth};
use crate::store::RateCatalogSource;

use super::request::{CheckInRequest, CheckOutRequest, DailyQuery, ReportQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/attendance/daily", get(daily_handler))
        .route("/attendance/report", get(report_handler))
        .route("/attendance/report/export", get(export_handler))
        .route(
            "/paystubs/:employee_id/:month",
            post(generate_pay_stub_handler).get(get_pay_stub_handler),
        )
        .route("/bonuses", post(create_bonus_handler).get(list_bonuses_handler))
        .route(
            "/salary-advances",
            post(create_salary_advance_handler).get(list_salary_advances_handler),
        )
        .route("/salary-advances/:id/approve", post(approve_salary_advance_handler))
        .route("/salary-advances/:id/reject", post(reject_salary_advance_handler))
        .route("/rates", get(get_rates_handler))
        .route("/rates/capped-contribution", put(set_capped_contribution_handler))
        .route("/rates/flat-contribution", put(set_flat_contribution_handler))
        .route("/rates/tax-brackets", post(add_tax_bracket_handler))
        .route(
            "/rates/tax-brackets/:id",
            put(update_tax_bracket_handler).delete(delete_tax_bracket_handler),
        )
        .route("/rates/overtime-bands", post(add_overtime_band_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn respond<T: Serialize>(correlation_id: Uuid, status: StatusCode, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn parameter_rejection_response(correlation_id: Uuid, message: String) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %message,
        "Invalid request parameters"
    );
    json_response(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
}

/// Handler for POST /attendance/check-in.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        "Processing check-in"
    );

    let at = request.at.unwrap_or_else(|| Local::now().naive_local());
    let result = state.clock().check_in(
        request.employee_id,
        request.entry_type,
        at,
        request.note,
        state.attendance_config(),
    );
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /attendance/check-out.
async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckOutRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        "Processing check-out"
    );

    let at = request.at.unwrap_or_else(|| Local::now().naive_local());
    let result = state
        .clock()
        .check_out(request.employee_id, at, state.attendance_config());
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /attendance/daily.
async fn daily_handler(
    State(state): State<AppState>,
    query: Result<Query<DailyQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            return parameter_rejection_response(correlation_id, rejection.body_text());
        }
    };

    let result = state.clock().daily_entries(query.employee_id, query.date);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /attendance/report.
async fn report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            return parameter_rejection_response(correlation_id, rejection.body_text());
        }
    };

    let result = state
        .clock()
        .report(query.employee_id, query.start_date, query.end_date);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /attendance/report/export.
///
/// Returns the attendance report as a CSV attachment.
async fn export_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            return parameter_rejection_response(correlation_id, rejection.body_text());
        }
    };

    let export = state
        .clock()
        .report(query.employee_id, query.start_date, query.end_date)
        .and_then(|report| Ok((report.entries.len(), report.to_csv()?)));

    match export {
        Ok((entries, csv)) => {
            info!(
                correlation_id = %correlation_id,
                entries,
                "Attendance report exported"
            );
            let disposition = format!(
                "attachment; filename=\"attendance_{}_{}.csv\"",
                query.start_date, query.end_date
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn pay_stub_target(
    path: Result<Path<(EmployeeId, String)>, PathRejection>,
) -> EngineResult<(EmployeeId, YearMonth)> {
    let Path((employee_id, month)) =
        path.map_err(|rejection| EngineError::validation("path", rejection.body_text()))?;
    Ok((employee_id, month.parse()?))
}

/// Handler for POST /paystubs/:employee_id/:month.
async fn generate_pay_stub_handler(
    State(state): State<AppState>,
    path: Result<Path<(EmployeeId, String)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (employee_id, month) = match pay_stub_target(path) {
        Ok(target) => target,
        Err(err) => return error_response(correlation_id, err),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id,
        month = %month,
        "Processing pay stub generation"
    );

    let result = state.payroll().generate_pay_stub(employee_id, month);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /paystubs/:employee_id/:month.
async fn get_pay_stub_handler(
    State(state): State<AppState>,
    path: Result<Path<(EmployeeId, String)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (employee_id, month) = match pay_stub_target(path) {
        Ok(target) => target,
        Err(err) => return error_response(correlation_id, err),
    };

    let result = state.payroll().get_pay_stub(employee_id, month);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /bonuses.
async fn create_bonus_handler(
    State(state): State<AppState>,
    payload: Result<Json<Bonus>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(bonus)) => respond(
            correlation_id,
            StatusCode::CREATED,
            state.compensation().create_bonus(bonus),
        ),
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}

/// Handler for GET /bonuses.
async fn list_bonuses_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        StatusCode::OK,
        state.compensation().list_bonuses(),
    )
}

/// Handler for POST /salary-advances.
async fn create_salary_advance_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryAdvance>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(advance)) => respond(
            correlation_id,
            StatusCode::CREATED,
            state.compensation().create_salary_advance(advance),
        ),
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}

/// Handler for GET /salary-advances.
async fn list_salary_advances_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        StatusCode::OK,
        state.compensation().list_salary_advances(),
    )
}

/// Handler for POST /salary-advances/:id/approve.
async fn approve_salary_advance_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match path {
        Ok(Path(id)) => respond(
            correlation_id,
            StatusCode::OK,
            state.compensation().approve_salary_advance(id),
        ),
        Err(rejection) => parameter_rejection_response(correlation_id, rejection.body_text()),
    }
}

/// Handler for POST /salary-advances/:id/reject.
async fn reject_salary_advance_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match path {
        Ok(Path(id)) => respond(
            correlation_id,
            StatusCode::OK,
            state.compensation().reject_salary_advance(id),
        ),
        Err(rejection) => parameter_rejection_response(correlation_id, rejection.body_text()),
    }
}

/// Handler for GET /rates.
///
/// Returns the rate catalog the next pay stub will be computed with.
async fn get_rates_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.rates().snapshot())
}

/// Handler for PUT /rates/capped-contribution.
async fn set_capped_contribution_handler(
    State(state): State<AppState>,
    payload: Result<Json<CappedContributionRate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(rate)) => {
            let result = state
                .rates()
                .set_capped_contribution(rate)
                .and_then(|()| state.rates().snapshot());
            respond(correlation_id, StatusCode::OK, result)
        }
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}

/// Handler for PUT /rates/flat-contribution.
async fn set_flat_contribution_handler(
    State(state): State<AppState>,
    payload: Result<Json<FlatContributionRate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(rate)) => {
            let result = state
                .rates()
                .set_flat_contribution(rate)
                .and_then(|()| state.rates().snapshot());
            respond(correlation_id, StatusCode::OK, result)
        }
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}

/// Handler for POST /rates/tax-brackets.
async fn add_tax_bracket_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxBracket>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(bracket)) => respond(
            correlation_id,
            StatusCode::CREATED,
            state.rates().add_tax_bracket(bracket),
        ),
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}

/// Handler for PUT /rates/tax-brackets/:id.
async fn update_tax_bracket_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<TaxBracket>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => {
            return parameter_rejection_response(correlation_id, rejection.body_text());
        }
    };
    match payload {
        Ok(Json(bracket)) => respond(
            correlation_id,
            StatusCode::OK,
            state.rates().update_tax_bracket(id, bracket),
        ),
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}

/// Handler for DELETE /rates/tax-brackets/:id.
async fn delete_tax_bracket_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match path {
        Ok(Path(id)) => match state.rates().delete_tax_bracket(id) {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(err) => error_response(correlation_id, err),
        },
        Err(rejection) => parameter_rejection_response(correlation_id, rejection.body_text()),
    }
}

/// Handler for POST /rates/overtime-bands.
async fn add_overtime_band_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeBand>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match payload {
        Ok(Json(band)) => {
            let result = state
                .rates()
                .add_overtime_band(band)
                .and_then(|()| state.rates().snapshot());
            respond(correlation_id, StatusCode::CREATED, result)
        }
        Err(rejection) => json_rejection_response(correlation_id, rejection),
    }
}
