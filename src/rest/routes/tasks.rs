// rest/routes/tasks.rs — Task CRUD routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::model::{Task, TaskDraft, TaskUpdate};
use crate::rest::auth::UserId;
use crate::AppContext;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub status: String,
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<UserId>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = ctx.tasks.create(draft, &user.0).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<UserId>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = ctx.tasks.list(&user.0, &params.status).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = ctx.tasks.get(id, &user.0).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<UserId>,
    Path(id): Path<i64>,
    Json(patch): Json<TaskUpdate>,
) -> Result<Json<Task>, ApiError> {
    let task = ctx.tasks.update(id, patch, &user.0).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    ctx.tasks.delete(id, &user.0).await?;
    Ok(Json(json!({ "message": "task deleted" })))
}
