use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::CollectionStore;
use crate::domain::model::{
    Department, DepartmentPatch, Employee, EmployeeCountChange, EmployeePatch, NewDepartment,
    NewEmployee,
};
use crate::utils::error::{ErrorKind, HrError, Result};

pub type AppState = Arc<CollectionStore>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDeleted {
    pub message: String,
    pub department_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeDeleted {
    pub message: String,
}

impl IntoResponse for HrError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::InvalidPayload => StatusCode::BAD_REQUEST,
            ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            HrError::Unexpected { .. } => self.to_string(),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Unhandled error: {}", self);
                HrError::unexpected("handling the request").to_string()
            }
            _ => self.to_string(),
        };

        tracing::debug!("{} -> {}", message, status);

        (status, Json(ErrorResponse::new(&message))).into_response()
    }
}

/// Ids that do not parse behave like ids that do not exist.
fn department_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| HrError::department_not_found(raw))
}

fn employee_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| HrError::employee_not_found(raw))
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| HrError::InvalidPayload {
            message: rejection.body_text(),
        })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// departments

pub async fn list_departments(State(store): State<AppState>) -> Result<Json<Vec<Department>>> {
    Ok(Json(store.list_departments()?))
}

pub async fn create_department(
    State(store): State<AppState>,
    payload: std::result::Result<Json<NewDepartment>, JsonRejection>,
) -> Result<(StatusCode, Json<Department>)> {
    let new = body(payload)?;
    let department = store.create_department(new)?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn get_department(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Department>> {
    let id = department_id(&id)?;
    Ok(Json(store.get_department(id)?))
}

pub async fn update_department(
    State(store): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<DepartmentPatch>, JsonRejection>,
) -> Result<Json<Department>> {
    let id = department_id(&id)?;
    let patch = body(payload)?;
    Ok(Json(store.update_department(id, patch)?))
}

pub async fn delete_department(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DepartmentDeleted>> {
    let id = department_id(&id)?;
    let department_id = store.delete_department(id)?;
    tracing::info!("Deleted department {}", department_id);
    Ok(Json(DepartmentDeleted {
        message: "Department deleted successfully".to_string(),
        department_id,
    }))
}

pub async fn patch_employee_count(
    State(store): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<EmployeeCountChange>, JsonRejection>,
) -> Result<Json<Department>> {
    let id = department_id(&id)?;
    let change = body(payload)?;
    Ok(Json(store.change_employee_count(id, change.count_change)?))
}

// employees

pub async fn list_employees(State(store): State<AppState>) -> Result<Json<Vec<Employee>>> {
    Ok(Json(store.list_employees()?))
}

pub async fn create_employee(
    State(store): State<AppState>,
    payload: std::result::Result<Json<NewEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>)> {
    let new = body(payload)?;
    let employee = store.create_employee(new)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get_employee(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>> {
    let id = employee_id(&id)?;
    Ok(Json(store.get_employee(id)?))
}

pub async fn update_employee(
    State(store): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<EmployeePatch>, JsonRejection>,
) -> Result<Json<Employee>> {
    let id = employee_id(&id)?;
    let patch = body(payload)?;
    Ok(Json(store.update_employee(id, patch)?))
}

pub async fn delete_employee(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeDeleted>> {
    let id = employee_id(&id)?;
    store.delete_employee(id)?;
    Ok(Json(EmployeeDeleted {
        message: "Employee deleted successfully".to_string(),
    }))
}
