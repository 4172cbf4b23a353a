//! Response shaping for matched and unmatched requests.
//!
//! # Design Decisions
//! - A configured `body` is sent verbatim; otherwise the match is echoed as JSON
//! - `x-route-name` names the matched route on every hit

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::RouteConfig;
use crate::routing::Params;

/// Header carrying the matched route's name.
pub const X_ROUTE_NAME: &str = "x-route-name";

/// JSON echoed for a matched route without a fixed body.
#[derive(Debug, Serialize)]
pub struct MatchBody<'a> {
    pub route: &'a str,
    pub method: &'a str,
    pub pattern: &'a str,
    pub params: &'a Params,
}

#[derive(Debug, Serialize)]
pub struct NotFoundBody<'a> {
    pub error: &'static str,
    pub method: &'a str,
    pub path: &'a str,
}

/// One entry of the route listing.
#[derive(Debug, Serialize)]
pub struct RouteSummary<'a> {
    pub name: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub status: u16,
}

impl<'a> From<&'a RouteConfig> for RouteSummary<'a> {
    fn from(route: &'a RouteConfig) -> Self {
        Self {
            name: &route.name,
            method: &route.method,
            path: &route.path,
            status: route.status,
        }
    }
}

/// Builds the response for a request that matched `route`.
pub fn matched(method: &Method, route: &RouteConfig, params: &Params) -> Response {
    let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::OK);

    let mut response = match &route.body {
        Some(body) => (status, body.clone()).into_response(),
        None => (
            status,
            Json(MatchBody {
                route: &route.name,
                method: method.as_str(),
                pattern: &route.path,
                params,
            }),
        )
            .into_response(),
    };

    if let Ok(name) = HeaderValue::from_str(&route.name) {
        response.headers_mut().insert(X_ROUTE_NAME, name);
    }
    response
}

/// Builds the `404` for a request no route matched.
pub fn not_found(method: &Method, path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "no route matched",
            method: method.as_str(),
            path,
        }),
    )
        .into_response()
}
