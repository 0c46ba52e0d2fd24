//! API request handlers

use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    response::Response,
};

use super::response::{json_response, not_found, ApiError};
use super::routes::AppState;
use crate::error::Error;
use crate::types::GraphData;

/// Read a node, or a single field of it
///
/// Serves `/gun/nodes/<soul>` and `/gun/key/<key>/from_node/<soul>`. The body
/// is the adapter's JSON text as-is, or `null` with 404 when nothing is found.
pub async fn handle_get(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    let route = state.routes.resolve(uri.path());

    if route.soul.is_empty() {
        tracing::debug!("No soul in {}", uri.path());
        return Ok(not_found());
    }

    let opts = route.options();
    let json = state.adapter.read(&route.soul, opts.as_ref()).await?;

    if json.is_empty() {
        tracing::debug!(soul = %route.soul, key = ?route.single_key, "Node not found");
        return Ok(not_found());
    }

    Ok(json_response(StatusCode::OK, json))
}

/// Merge a graph fragment and return the diff
pub async fn handle_put(State(state): State<AppState>, body: Body) -> Result<Response, ApiError> {
    let bytes = axum::body::to_bytes(body, state.options.max_body_bytes).await?;
    if bytes.is_empty() {
        return Err(Error::MissingBody.into());
    }

    let data: GraphData = serde_json::from_slice(&bytes)?;
    let diff = state.adapter.write(&data).await?;

    tracing::debug!("Put {} nodes, {} changed", data.len(), diff.len());

    Ok(json_response(StatusCode::OK, serde_json::to_string(&diff)?))
}
