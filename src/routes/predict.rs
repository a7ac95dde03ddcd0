use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::post,
    Form, Json, Router,
};
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::assessment::{self, classifier::ClassifierError, encoder};
use crate::auth::CurrentUser;
use crate::error::ErrorBody;
use crate::models::{PredictForm, PredictionRecord};
use crate::routes::AppState;
use crate::store::StoreError;
use crate::views;

#[derive(Debug, Error)]
enum PredictError {
    #[error("{0}")]
    Form(#[from] FormRejection),

    #[error("{0}")]
    Input(#[from] encoder::InvalidInput),

    #[error("{0}")]
    Classifier(#[from] ClassifierError),

    #[error("could not save prediction")]
    Store(#[from] StoreError),
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .with_state(state)
}

/// Any failure becomes a JSON `{"error": ..}` body with the default status
/// so the form page never sees a server crash.
async fn predict(
    State(state): State<AppState>,
    user: CurrentUser,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Response {
    if !user.admitted(&state) {
        return Redirect::to("/login").into_response();
    }

    match run_prediction(&state, form).await {
        Ok(record) => Html(views::result_page(&record)).into_response(),
        Err(e) => {
            if let PredictError::Store(source) = &e {
                tracing::error!("❌ Prediction not stored: {}", source);
            } else {
                tracing::warn!("⚠️ Prediction rejected: {}", e);
            }
            Json(ErrorBody { error: e.to_string() }).into_response()
        }
    }
}

async fn run_prediction(
    state: &AppState,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Result<PredictionRecord, PredictError> {
    let Form(form) = form?;
    let report = encoder::parse_report(&form)?;
    let assessment = assessment::assess(&report, state.classifier.as_ref())?;

    tracing::info!(
        severity = assessment.severity.code(),
        source = ?assessment.source,
        "🫁 Severity assessed"
    );

    let record = PredictionRecord {
        id: Uuid::new_v4(),
        name: report.name,
        symptoms: report.symptoms,
        age: report.age,
        gender: report.gender,
        severity: assessment.severity,
        recommendation: assessment.recommendation().to_string(),
        created_at: Utc::now(),
    };
    state.store.insert_prediction(&record).await?;

    Ok(record)
}
