use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use livebetyg::common::Client;
use livebetyg::modules::bokadirekt::{Listing, LISTING_URL};
use livebetyg::snapshot::FetchOutcome;

/// Route the site's enhancement script calls.
pub const RATING_ROUTE: &str = "/api/bokadirekt-rating";

/// Twelve hours fresh at the edge plus twelve hours stale-while-revalidate:
/// at most one real upstream fetch per window per edge node, regardless of
/// client volume.
pub const CACHE_CONTROL_LIVE: &str = "public, s-maxage=43200, stale-while-revalidate=43200";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    listing_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_listing_url(LISTING_URL)
    }
}

impl AppState {
    /// State scraping an explicit listing URL. Tests point this at a local
    /// stand-in for the Bokadirekt page.
    pub fn with_listing_url<S: Into<String>>(url: S) -> Self {
        Self {
            inner: Arc::new(Inner {
                client: Client::default(),
                listing_url: url.into(),
            }),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(RATING_ROUTE, get(bokadirekt_rating))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Always 200 with a snapshot body. Only the live arm carries the cache
/// header; a fallback answer should not pin the edge for twelve hours.
async fn bokadirekt_rating(State(state): State<AppState>) -> Response {
    match Listing::fetch_from(&state.inner.client, &state.inner.listing_url).await {
        FetchOutcome::Live(snapshot) => {
            ([(header::CACHE_CONTROL, CACHE_CONTROL_LIVE)], Json(snapshot)).into_response()
        }
        FetchOutcome::Fallback(snapshot) => Json(snapshot).into_response(),
    }
}

async fn health() -> &'static str {
    "ok"
}
