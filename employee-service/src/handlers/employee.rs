//! HTTP handlers for `/employee`
//!
//! Every handler opens one persistence context, runs a single
//! [`EmployeeResource`] operation against it and commits. An early return
//! drops the context, which rolls it back.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::error::{ApiError, ApiOperation};
use super::extract::{EmployeeIdPath, SearchBody};
use super::response::Saved;
use crate::model::{Employee, EmployeeId};
use crate::repository::{EmployeeStore, PersistenceContext};
use crate::resource::EmployeeResource;
use crate::state::AppState;

/// Routes for the employee collection and its members
pub fn routes<S: EmployeeStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/employee", get(list_all::<S>).put(create::<S>))
        .route("/employee/", get(list_all::<S>).put(create::<S>))
        .route("/employee/search", post(search::<S>))
        .route(
            "/employee/{id}",
            get(retrieve::<S>).put(update::<S>).delete(delete::<S>),
        )
}

/// Location of a single employee
pub fn employee_location(id: EmployeeId) -> String {
    format!("/employee/{}", id)
}

async fn begin<S: EmployeeStore>(
    state: &AppState<S>,
    operation: ApiOperation,
) -> Result<S::Context, ApiError> {
    state
        .store()
        .begin()
        .await
        .map_err(|e| ApiError::from(e).with_operation(operation))
}

async fn commit<C: PersistenceContext>(context: C, operation: ApiOperation) -> Result<(), ApiError> {
    context
        .commit()
        .await
        .map_err(|e| ApiError::from(e).with_operation(operation))
}

/// GET /employee/{id}
async fn retrieve<S: EmployeeStore>(
    State(state): State<AppState<S>>,
    EmployeeIdPath(id): EmployeeIdPath,
) -> Result<Json<Option<Employee>>, ApiError> {
    let mut context = begin(&state, ApiOperation::Retrieve).await?;
    let employee = EmployeeResource::new(&mut context).retrieve(id).await?;
    commit(context, ApiOperation::Retrieve).await?;

    Ok(Json(employee))
}

/// GET /employee
async fn list_all<S: EmployeeStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let mut context = begin(&state, ApiOperation::List).await?;
    let employees = EmployeeResource::new(&mut context).list_all().await?;
    commit(context, ApiOperation::List).await?;

    Ok(Json(employees))
}

/// PUT /employee
async fn create<S: EmployeeStore>(
    State(state): State<AppState<S>>,
    Json(employee): Json<Employee>,
) -> Result<Saved, ApiError> {
    let mut context = begin(&state, ApiOperation::Create).await?;
    let saved = EmployeeResource::new(&mut context).create(employee).await?;
    commit(context, ApiOperation::Create).await?;

    let response = match saved.id {
        Some(id) => {
            tracing::info!(id, "Employee created");
            Saved::new().with_location(employee_location(id))
        }
        None => Saved::new(),
    };
    Ok(response)
}

/// PUT /employee/{id}
async fn update<S: EmployeeStore>(
    State(state): State<AppState<S>>,
    EmployeeIdPath(id): EmployeeIdPath,
    Json(employee): Json<Employee>,
) -> Result<Saved, ApiError> {
    let mut context = begin(&state, ApiOperation::Update).await?;
    EmployeeResource::new(&mut context)
        .update(Some(id), employee)
        .await?;
    commit(context, ApiOperation::Update).await?;

    tracing::info!(id, "Employee saved");
    Ok(Saved::new())
}

/// DELETE /employee/{id}
async fn delete<S: EmployeeStore>(
    State(state): State<AppState<S>>,
    EmployeeIdPath(id): EmployeeIdPath,
) -> Result<StatusCode, ApiError> {
    let mut context = begin(&state, ApiOperation::Delete).await?;
    let removed = EmployeeResource::new(&mut context).delete(id).await?;
    commit(context, ApiOperation::Delete).await?;

    tracing::info!(id, removed, "Employee deleted");
    Ok(StatusCode::OK)
}

/// POST /employee/search
async fn search<S: EmployeeStore>(
    State(state): State<AppState<S>>,
    SearchBody(criteria): SearchBody,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let mut context = begin(&state, ApiOperation::Search).await?;
    let employees = EmployeeResource::new(&mut context)
        .search(criteria.as_ref())
        .await?;
    commit(context, ApiOperation::Search).await?;

    Ok(Json(employees))
}
