//! HTTP front end serving the navigation pages and the prediction form

use crate::artifacts::ArtifactStore;
use crate::data::FeatureVector;
use crate::error::SegmentError;
use crate::nav::{render, FormValues, Navigator, Page, PredictOutcome, View};
use crate::predict::PredictionService;
use crate::segments::ELBOW_CURVE;
use crate::viz::render_elbow_chart;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Immutable state shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub artifacts: ArtifactStore,
    pub navigator: Navigator,
}

impl AppState {
    /// Build the state, pre-rendering the elbow chart. A chart failure is
    /// logged and the interpretation page falls back to the numeric table.
    pub fn new(artifacts: ArtifactStore) -> Self {
        let chart_svg = match render_elbow_chart(&ELBOW_CURVE) {
            Ok(svg) => Some(svg),
            Err(e) => {
                warn!("Elbow chart unavailable: {:#}", e);
                None
            }
        };
        Self::with_chart(artifacts, chart_svg)
    }

    pub fn with_chart(artifacts: ArtifactStore, chart_svg: Option<String>) -> Self {
        Self {
            artifacts,
            navigator: Navigator::new(chart_svg),
        }
    }

    pub fn predictor(&self) -> PredictionService<'_> {
        PredictionService::new(&self.artifacts)
    }
}

#[derive(Debug, Deserialize)]
pub struct NavQuery {
    pub page: Option<String>,
}

/// Prediction form as submitted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub yearly_avg_views: String,
    #[serde(default)]
    pub yearly_avg_checkins: String,
    #[serde(default)]
    pub daily_avg_minutes: String,
}

impl PredictForm {
    /// Parse the three fields; blanks and non-numbers are user errors
    pub fn parse(&self) -> Result<FeatureVector, SegmentError> {
        Ok(FeatureVector::new(
            parse_field("Yearly Average Views", &self.yearly_avg_views)?,
            parse_field("Yearly Average Outstation Check-ins", &self.yearly_avg_checkins)?,
            parse_field("Daily Average Minutes", &self.daily_avg_minutes)?,
        ))
    }

    fn values(&self) -> FormValues {
        FormValues {
            yearly_avg_views: self.yearly_avg_views.clone(),
            yearly_avg_checkins: self.yearly_avg_checkins.clone(),
            daily_avg_minutes: self.daily_avg_minutes.clone(),
        }
    }
}

fn parse_field(label: &str, raw: &str) -> Result<f64, SegmentError> {
    raw.trim().parse::<f64>().map_err(|_| {
        SegmentError::InvalidInput(format!(
            "{} must be a non-negative number, got '{}'",
            label,
            raw.trim()
        ))
    })
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/predict", post(submit_prediction))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn show_page(State(state): State<Arc<AppState>>, Query(nav): Query<NavQuery>) -> Response {
    let view = match nav.page.as_deref() {
        None | Some("") => state.navigator.view(Page::Home),
        Some(key) => state.navigator.view_for_key(key),
    };
    let status = if view.page().is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Html(render(&view))).into_response()
}

async fn submit_prediction(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> Response {
    let result = form
        .parse()
        .and_then(|features| state.predictor().predict(&features));

    let (status, outcome) = match result {
        Ok(prediction) => {
            info!(cluster_id = prediction.cluster_id, "Served prediction");
            (StatusCode::OK, PredictOutcome::Predicted(prediction))
        }
        Err(e) if e.is_user_error() => {
            (e.status_code(), PredictOutcome::Rejected(e.to_string()))
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            (
                e.status_code(),
                PredictOutcome::Rejected(format!(
                    "The loaded model cannot score this input ({}). Please contact the administrator.",
                    e
                )),
            )
        }
    };

    let view = View::Predict {
        values: form.values(),
        outcome,
    };
    (status, Html(render(&view))).into_response()
}

async fn health_check() -> &'static str {
    "ok"
}

/// Serve the application until Ctrl-C
pub async fn serve(artifacts: ArtifactStore, addr: SocketAddr) -> crate::Result<()> {
    let state = Arc::new(AppState::new(artifacts));
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
