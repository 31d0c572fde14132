//! Routes for the manuscript checks.

use std::path::PathBuf;

use axum::extract::State;
use axum::{Json, Router, routing::post};
use novel_core::result::CheckResult;
use novel_manuscript::domain::layout::ManuscriptLayout;
use novel_manuscript::domain::scope::Scope;
use novel_scene::application::command_handlers::handle_check_scenes;
use novel_scene::domain::commands::CheckScenes;
use novel_scene::domain::config::SceneConfig;
use novel_scene::domain::stats::SceneStats;
use novel_structure::application::command_handlers::handle_check_structure;
use novel_structure::domain::commands::CheckStructure;
use novel_structure::domain::config::StructureConfig;
use novel_structure::domain::stats::StructureStats;
use novel_style::application::command_handlers::handle_check_style;
use novel_style::domain::commands::CheckStyle;
use novel_style::domain::config::StyleConfig;
use novel_style::domain::stats::StyleStats;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

const fn default_write_report() -> bool {
    true
}

/// Where to look, what to analyze, and whether to write the report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetArgs {
    /// Project root. Defaults to the server's root directory.
    pub root_dir: Option<PathBuf>,
    /// Manuscript directory relative to the root.
    pub manuscript_dir: Option<String>,
    /// Report directory relative to the root.
    pub output_dir: Option<String>,
    /// Chapters to analyze.
    #[serde(default)]
    pub scope: Scope,
    /// Whether to write the markdown report.
    #[serde(default = "default_write_report")]
    pub write_report: bool,
}

impl TargetArgs {
    fn layout(&self, state: &AppState) -> ManuscriptLayout {
        let root = self.root_dir.clone().unwrap_or_else(|| state.root_dir.clone());
        ManuscriptLayout::new(root)
            .with_manuscript_dir(self.manuscript_dir.as_deref())
            .with_output_dir(self.output_dir.as_deref())
    }
}

/// Request body for POST /scene.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneCheckRequest {
    /// Target selection.
    #[serde(flatten)]
    pub target: TargetArgs,
    /// Scene fields required in addition to the built-in ones.
    #[serde(default)]
    pub required_fields: Vec<String>,
}

/// Request body for POST /structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureCheckRequest {
    /// Target selection.
    #[serde(flatten)]
    pub target: TargetArgs,
    /// Required beats in order. Defaults to the seven standard beats.
    pub required_beats: Option<Vec<String>>,
    /// Minimum beat coverage in `[0, 1]`.
    pub min_coverage: Option<f64>,
}

/// Request body for POST /style.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleCheckRequest {
    /// Target selection.
    #[serde(flatten)]
    pub target: TargetArgs,
    /// Words or phrases to flag in prose.
    #[serde(default)]
    pub avoid_words: Vec<String>,
    /// Catchphrase uses above which a warning is raised.
    pub catchphrase_max_count: Option<usize>,
    /// Whether unused catchphrases are reported.
    pub catchphrase_report_missing: Option<bool>,
}

/// POST /scene
#[instrument(skip(state, request))]
async fn check_scenes(
    State(state): State<AppState>,
    Json(request): Json<SceneCheckRequest>,
) -> Result<Json<CheckResult<SceneStats>>, ApiError> {
    let command = CheckScenes {
        correlation_id: Uuid::new_v4(),
        layout: request.target.layout(&state),
        scope: request.target.scope,
        write_report: request.target.write_report,
        config: SceneConfig {
            required_fields: request.required_fields,
        },
    };

    info!(correlation_id = %command.correlation_id, "handling check_scenes command");

    let clock = state.clock.clone();
    let result =
        tokio::task::spawn_blocking(move || handle_check_scenes(&command, clock.as_ref()))
            .await??;

    Ok(Json(result))
}

/// POST /structure
#[instrument(skip(state, request))]
async fn check_structure(
    State(state): State<AppState>,
    Json(request): Json<StructureCheckRequest>,
) -> Result<Json<CheckResult<StructureStats>>, ApiError> {
    let mut config = StructureConfig {
        min_coverage: request.min_coverage,
        ..StructureConfig::default()
    };
    if let Some(required_beats) = request.required_beats {
        config.required_beats = required_beats;
    }
    let command = CheckStructure {
        correlation_id: Uuid::new_v4(),
        layout: request.target.layout(&state),
        scope: request.target.scope,
        write_report: request.target.write_report,
        config,
    };

    info!(correlation_id = %command.correlation_id, "handling check_structure command");

    let clock = state.clock.clone();
    let result =
        tokio::task::spawn_blocking(move || handle_check_structure(&command, clock.as_ref()))
            .await??;

    Ok(Json(result))
}

/// POST /style
#[instrument(skip(state, request))]
async fn check_style(
    State(state): State<AppState>,
    Json(request): Json<StyleCheckRequest>,
) -> Result<Json<CheckResult<StyleStats>>, ApiError> {
    let defaults = StyleConfig::default();
    let command = CheckStyle {
        correlation_id: Uuid::new_v4(),
        layout: request.target.layout(&state),
        scope: request.target.scope,
        write_report: request.target.write_report,
        config: StyleConfig {
            avoid_words: request.avoid_words,
            catchphrase_max_count: request
                .catchphrase_max_count
                .unwrap_or(defaults.catchphrase_max_count),
            catchphrase_report_missing: request
                .catchphrase_report_missing
                .unwrap_or(defaults.catchphrase_report_missing),
        },
    };

    info!(correlation_id = %command.correlation_id, "handling check_style command");

    let clock = state.clock.clone();
    let result = tokio::task::spawn_blocking(move || handle_check_style(&command, clock.as_ref()))
        .await??;

    Ok(Json(result))
}

/// Returns the router for the checks.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scene", post(check_scenes))
        .route("/structure", post(check_structure))
        .route("/style", post(check_style))
}
