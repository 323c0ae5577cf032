//! Local web dashboard.
//!
//! Thin presentation layer over the core: handlers fetch plain data from
//! the aggregation engine and the session lifecycle, embed it as JSON into
//! the dashboard page, and never aggregate anything themselves. Logging
//! happens only here; the core returns errors and stays silent.

pub mod template;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Datelike;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::core::cache::ChartCache;
use crate::core::{lifecycle, summary};
use crate::db::pool::DbPool;
use crate::db::{aggregates, sessions};
use crate::errors::{AppError, AppResult};
use crate::utils::date;

pub struct AppState {
    db_path: String,
    cache: ChartCache,
    default_activity: String,
}

impl AppState {
    pub fn new(db_path: String, default_activity: String) -> Self {
        Self {
            db_path,
            cache: ChartCache::new(),
            default_activity,
        }
    }

    fn pool(&self) -> AppResult<DbPool> {
        Ok(DbPool::new(&self.db_path)?)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/summary", get(chart_for_year))
        .route("/sessions/start/:activity", get(start_session))
        .route("/sessions/end", get(end_session))
        .with_state(state)
}

/// Serve the dashboard until ctrl-c, then drain in-flight requests.
pub async fn serve(db_path: String, addr: String, default_activity: String) -> AppResult<()> {
    let state = Arc::new(AppState::new(db_path, default_activity));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("cannot bind {addr}: {e}")))?;

    info!(%addr, "starting summary server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to install ctrl-c handler: {e}");
        return;
    }
    info!("shutdown signal received");
}

fn internal_error(err: AppError) -> Response {
    error!("request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Run closure on the blocking pool; SQLite calls must not sit on the
/// async executor.
async fn blocking<T, F>(func: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(func)
        .await
        .map_err(|e| AppError::Server(format!("blocking task failed: {e}")))?
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    let result = blocking({
        let state = Arc::clone(&state);
        move || {
            let mut pool = state.pool()?;

            let active = sessions::active_session(&mut pool)?;
            let (oldest, latest) = aggregates::year_range(&mut pool)?;

            let current_year = date::current_year();
            let today_entries = summary::today(&mut pool)?;
            let monthly = summary::monthly_chart(&mut pool, current_year)?;
            let yearly = summary::yearly_chart(&mut pool)?;
            let grid = state.cache.get_or_compute(&mut pool, current_year)?;

            let payload = json!({
                "todays_data": summary::today_chart(&today_entries),
                "monthly_data": monthly,
                "overall_data": yearly,
                "calendar": &*grid,
            });

            Ok(template::render_home(&template::HomeData {
                active_session: active,
                year_options: (oldest..=latest).collect(),
                current_year,
                payload: serde_json::to_string(&payload)?,
            }))
        }
    })
    .await;

    match result {
        Ok(page) => Html(page).into_response(),
        Err(e) => internal_error(e),
    }
}

#[derive(Deserialize)]
struct ChartParams {
    year: Option<i32>,
}

/// JSON calendar grid for one year, served through the per-year cache.
async fn chart_for_year(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> Response {
    let year = params.year.unwrap_or_else(date::current_year);

    let result = blocking({
        let state = Arc::clone(&state);
        move || {
            let mut pool = state.pool()?;
            state.cache.get_or_compute(&mut pool, year)
        }
    })
    .await;

    match result {
        Ok(grid) => match serde_json::to_string(&*grid) {
            Ok(body) => ([("content-type", "application/json")], body).into_response(),
            Err(e) => internal_error(e.into()),
        },
        Err(e) => internal_error(e),
    }
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Path(activity): Path<String>,
) -> Response {
    let result = blocking({
        let state = Arc::clone(&state);
        move || {
            let mut pool = state.pool()?;
            lifecycle::start(&mut pool, &activity, &state.default_activity)
        }
    })
    .await;

    match result {
        Ok(name) => {
            info!(activity = %name, "session started");
            Redirect::to("/").into_response()
        }
        Err(AppError::ActiveSession(name)) => {
            warn!(activity = %name, "start rejected, session already active");
            Redirect::to("/").into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// Close the open session and refresh the affected day's cache entry before
/// responding, so the page rendered next already shows the closed interval.
async fn end_session(State(state): State<Arc<AppState>>) -> Response {
    let result = blocking({
        let state = Arc::clone(&state);
        move || {
            let mut pool = state.pool()?;
            let (closed_date, activity) = lifecycle::end(&mut pool)?;
            state.cache.refresh_day(&mut pool, closed_date)?;
            Ok((closed_date, activity))
        }
    })
    .await;

    match result {
        Ok((closed_date, activity)) => {
            info!(%activity, year = closed_date.year(), "session ended");
            Redirect::to("/").into_response()
        }
        Err(AppError::NoActiveSession) => {
            warn!("end rejected, no session active");
            Redirect::to("/").into_response()
        }
        Err(e) => internal_error(e),
    }
}
