//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    Department, Employee, EmployeeCreate, EmployeeUpdate, EmploymentCountry, IdType,
};
use crate::db::repository::{EmployeeFilter, EmployeeRepository, default_ordering, parse_ordering};
use crate::utils::{AppError, AppResult};

/// Query params for listing employees
///
/// Filter match mode follows the field: names, id_number and email match
/// as substrings; the enum fields and status match exactly. `ordering` is
/// a comma-separated list over {first_surname, first_name, hire_date,
/// created_at}, `-` prefix for descending.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub first_name: Option<String>,
    pub other_names: Option<String>,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    pub id_number: Option<String>,
    pub email: Option<String>,
    pub id_type: Option<IdType>,
    pub employment_country: Option<EmploymentCountry>,
    pub department: Option<Department>,
    pub status: Option<String>,
    pub ordering: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> EmployeeFilter {
        EmployeeFilter {
            first_name: self.first_name,
            other_names: self.other_names,
            first_surname: self.first_surname,
            second_surname: self.second_surname,
            id_number: self.id_number,
            email: self.email,
            id_type: self.id_type,
            employment_country: self.employment_country,
            department: self.department,
            status: self.status,
        }
    }
}

/// GET /api/employees - list employees with filters and ordering
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let ordering = match &query.ordering {
        Some(raw) => parse_ordering(raw).map_err(|e| AppError::validation(vec![e]))?,
        None => default_ordering(),
    };

    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.find_all(query.into_filter(), &ordering).await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id - get a single employee
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// POST /api/employees - create an employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.create(payload).await?;
    Ok(Json(employee))
}

/// PUT /api/employees/:id - update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.update(&id, payload).await?;
    Ok(Json(employee))
}

/// DELETE /api/employees/:id - delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
