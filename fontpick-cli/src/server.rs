//! HTTP server for fontpick: the non-blocking front desk.
//!
//! The engines stay synchronous; this boundary takes care of the async
//! calling convention by dispatching each request into a worker task.
//! Completion order across independent calls is unspecified, but within one
//! call the usual steps run in order: validate, snapshot, match, cover.

use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task;

use fontpick_core::error::Error;
use fontpick_core::manager::FontManager;
use fontpick_core::query::FaceQuery;

/// Common source parameters shared by every request body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontsRequest {
    /// Font directories to enumerate
    pub paths: Vec<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindRequest {
    pub paths: Vec<PathBuf>,
    /// Partial descriptor; null or absent matches everything
    pub query: Option<Value>,
    /// Resolve the single best match instead of listing exact matches
    pub best: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubstituteRequest {
    pub paths: Vec<PathBuf>,
    pub postscript_name: String,
    pub text: String,
}

/// Bind and serve until the caller shuts us down.
pub async fn serve(bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    axum::serve(listener, router()).await.context("serving HTTP")?;
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/fonts", post(fonts_handler))
        .route("/find", post(find_handler))
        .route("/substitute", post(substitute_handler))
}

async fn fonts_handler(
    Json(req): Json<FontsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let paths = require_paths(req.paths)?;

    let faces = task::spawn_blocking(move || FontManager::scanning(paths).available_fonts())
        .await
        .map_err(join_error)?
        .map_err(core_error)?;

    Ok(Json(faces))
}

async fn find_handler(
    Json(req): Json<FindRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let paths = require_paths(req.paths)?;
    // normalize (and reject malformed descriptors) before any catalog work
    let query = FaceQuery::from_json(req.query.as_ref()).map_err(core_error)?;

    if req.best {
        let face = task::spawn_blocking(move || FontManager::scanning(paths).find_font(&query))
            .await
            .map_err(join_error)?
            .map_err(core_error)?;
        Ok(Json(face).into_response())
    } else {
        let faces = task::spawn_blocking(move || FontManager::scanning(paths).find_fonts(&query))
            .await
            .map_err(join_error)?
            .map_err(core_error)?;
        Ok(Json(faces).into_response())
    }
}

async fn substitute_handler(
    Json(req): Json<SubstituteRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let paths = require_paths(req.paths)?;

    let faces = task::spawn_blocking(move || {
        FontManager::scanning(paths).substitute_font(&req.postscript_name, &req.text)
    })
    .await
    .map_err(join_error)?
    .map_err(core_error)?;

    Ok(Json(faces))
}

fn require_paths(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>, (StatusCode, String)> {
    if paths.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "at least one font path is required".to_string(),
        ));
    }
    Ok(paths)
}

fn core_error(err: Error) -> (StatusCode, String) {
    let status = match err {
        Error::InvalidDescriptor
        | Error::MissingPostscriptName
        | Error::MissingSubstitutionText => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn join_error(err: task::JoinError) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("task join error: {err}"),
    )
}
