//! Request handlers.
//!
//! Every request outside `/_router/` goes through [`dispatch`], which is the
//! only place the route table is consulted on the hot path.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::{Method, Uri},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::response::{self, RouteSummary};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Resolves the request against the active route table.
pub async fn dispatch(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();
    let table = state.table();
    let path = uri.path();

    match table.at(method.as_str(), path) {
        Some(found) => {
            metrics::record_lookup(&method, "hit", start);
            tracing::debug!(
                method = %method,
                path = %path,
                route = %found.value.name,
                "Route matched"
            );
            response::matched(&method, found.value, &found.params)
        }
        None => {
            metrics::record_lookup(&method, "miss", start);
            tracing::debug!(method = %method, path = %path, "No route matched");
            response::not_found(&method, path)
        }
    }
}

/// Lists the active route table.
pub async fn list_routes(State(state): State<AppState>) -> Json<Value> {
    let table = state.table();
    let mut routes: Vec<RouteSummary<'_>> = table.values().map(RouteSummary::from).collect();
    routes.sort_by(|a, b| (a.method, a.path).cmp(&(b.method, b.path)));

    Json(json!({
        "count": routes.len(),
        "routes": routes,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub method: Option<String>,
    pub path: String,
}

/// Resolves a path without dispatching to it.
pub async fn resolve(State(state): State<AppState>, Query(query): Query<ResolveQuery>) -> Json<Value> {
    let table = state.table();
    let method = query.method.as_deref().unwrap_or("GET");

    Json(match table.at(method, &query.path) {
        Some(found) => json!({
            "matched": true,
            "route": found.value.name,
            "pattern": found.value.path,
            "params": found.params,
        }),
        None => json!({ "matched": false }),
    })
}
