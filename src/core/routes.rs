use crate::core::{forward, Route, Upstream, UpstreamBody, UpstreamRequest};
use crate::domain::model::{
    CalendarEventsQuery, DateConversionQuery, ForexQuery, MonthCalendarQuery, RashifalQuery,
};
use crate::utils::error::ProxyError;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }
}

/// An upstream call that failed on behalf of `route`. The cause is logged;
/// the caller only sees the route's fixed message.
#[derive(Debug)]
pub struct RouteFailure {
    pub route: Route,
    pub source: ProxyError,
}

impl IntoResponse for RouteFailure {
    fn into_response(self) -> Response {
        match &self.source {
            ProxyError::UpstreamStatus { status, body } => tracing::error!(
                route = %self.route,
                upstream_status = status,
                upstream_body = %body,
                "Upstream call failed"
            ),
            other => tracing::error!(
                route = %self.route,
                error = %other,
                category = ?other.category(),
                "Upstream call failed"
            ),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.route.failure_message() })),
        )
            .into_response()
    }
}

fn passthrough(body: UpstreamBody) -> Response {
    let content_type = body
        .content_type
        .unwrap_or_else(|| "application/json".to_string());

    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body.bytes).into_response()
}

async fn relay(state: &AppState, request: UpstreamRequest) -> Response {
    match state.upstream.fetch(&request).await {
        Ok(body) => passthrough(body),
        Err(source) => RouteFailure {
            route: request.route,
            source,
        }
        .into_response(),
    }
}

/// Raw query pairs in arrival order. Decoding into a list never trips over
/// repeated names; the per-route structs pick the first value of each name
/// they forward and ignore the rest.
type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_pairs(route: Route, query: RawQuery) -> Vec<(String, String)> {
    match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::warn!(route = %route, error = %rejection, "Ignoring malformed query string");
            Vec::new()
        }
    }
}

pub async fn calendar_events(State(state): State<AppState>, query: RawQuery) -> Response {
    let pairs = query_pairs(Route::CalendarEvents, query);
    let query = CalendarEventsQuery::from_pairs(&pairs);
    relay(&state, forward::calendar_events(&query)).await
}

pub async fn date_conversion(State(state): State<AppState>, query: RawQuery) -> Response {
    let pairs = query_pairs(Route::DateConversion, query);
    let query = DateConversionQuery::from_pairs(&pairs);
    relay(&state, forward::date_conversion(&query)).await
}

pub async fn month_calendar(State(state): State<AppState>, query: RawQuery) -> Response {
    let pairs = query_pairs(Route::MonthCalendar, query);
    let query = MonthCalendarQuery::from_pairs(&pairs);
    relay(&state, forward::month_calendar(&query)).await
}

pub async fn vegetables(State(state): State<AppState>) -> Response {
    relay(&state, forward::vegetables()).await
}

pub async fn metals(State(state): State<AppState>) -> Response {
    relay(&state, forward::metals()).await
}

pub async fn rashifal(State(state): State<AppState>, query: RawQuery) -> Response {
    let pairs = query_pairs(Route::Rashifal, query);
    let query = RashifalQuery::from_pairs(&pairs);
    relay(&state, forward::rashifal(&query)).await
}

pub async fn forex(State(state): State<AppState>, query: RawQuery) -> Response {
    let pairs = query_pairs(Route::Forex, query);
    let query = ForexQuery::from_pairs(&pairs);
    relay(&state, forward::forex(&query)).await
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
