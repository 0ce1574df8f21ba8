//! Feed file uploads.
//!
//! The admin UI posts `{fileContent, fileName}`; the handler stages the
//! content in a transient file, runs the matching importer, and removes
//! the file again whether or not the import succeeded. The importers are
//! file-based because operators also feed them from disk via the CLI.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Upload request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Raw feed text.
    pub file_content: String,
    /// Original file name, for logging only.
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Feed format selected by the endpoint path.
#[derive(Debug, Clone, Copy)]
enum FeedFormat {
    Csv,
    Xml,
}

impl FeedFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xml => "xml",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xml => "XML",
        }
    }
}

/// POST /upload/csv -- import an uploaded Denea CSV export.
pub async fn upload_csv(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> AppResult<impl IntoResponse> {
    process_upload(state, request, FeedFormat::Csv).await
}

/// POST /upload/xml -- import an uploaded Denea XML export.
pub async fn upload_xml(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> AppResult<impl IntoResponse> {
    process_upload(state, request, FeedFormat::Xml).await
}

async fn process_upload(
    state: AppState,
    request: UploadRequest,
    format: FeedFormat,
) -> AppResult<impl IntoResponse> {
    if request.file_content.trim().is_empty() {
        return Err(AppError::BadRequest("File content is required".to_string()));
    }

    tracing::info!(
        file = request.file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = request.file_content.len(),
        "Processing uploaded {} file",
        format.label()
    );

    let staged = std::env::temp_dir().join(format!(
        "denea-upload-{}.{}",
        Uuid::new_v4(),
        format.extension()
    ));

    tokio::fs::write(&staged, &request.file_content)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to stage uploaded file: {e}")))?;

    let result = match format {
        FeedFormat::Csv => state.engine.import_csv_file(&staged).await,
        FeedFormat::Xml => state.engine.import_xml_file(&staged).await,
    };

    // The staging file is transient regardless of the import outcome.
    if let Err(e) = tokio::fs::remove_file(&staged).await {
        tracing::warn!(staged = %staged.display(), error = %e, "Failed to remove staged upload");
    }

    let report = result?;

    Ok(Json(json!({
        "message": format!("{} file processed successfully", format.label()),
        "result": report,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
