//! Contact and job application endpoints.

use super::AppState;
use super::error::AppError;
use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::HeaderMap;
use blokfront_client::{ForwardOutcome, forward};
use blokfront_core::Locale;
use blokfront_validator::{ContactForm, JobApplication, Submission};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    /// Locale the form was submitted from
    locale: Option<String>,
}

pub async fn contact(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Result<Json<Value>, AppError> {
    let form = form.normalized();
    let report = form.validate();
    if !report.is_valid() {
        return Err(AppError::Invalid(report));
    }

    let locale = submission_locale(&state, &query);
    submit(&state, Submission::Contact(form), locale, &headers).await
}

pub async fn apply(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
    headers: HeaderMap,
    Form(form): Form<JobApplication>,
) -> Result<Json<Value>, AppError> {
    let form = form.normalized();
    let mut report = form.validate();
    if !report.is_valid() {
        return Err(AppError::Invalid(report));
    }

    let locale = submission_locale(&state, &query);
    if state
        .store
        .vacancy_by_slug(&form.vacancy, locale, false)
        .await?
        .is_none()
    {
        report.error("vacancy", "This position is no longer open");
        return Err(AppError::Invalid(report));
    }

    submit(&state, Submission::JobApplication(form), locale, &headers).await
}

async fn submit(
    state: &AppState,
    submission: Submission,
    locale: Locale,
    headers: &HeaderMap,
) -> Result<Json<Value>, AppError> {
    let Some(backend) = &state.forms else {
        return Err(AppError::FormsDisabled);
    };

    let ip = client_ip(headers);
    match forward(
        backend.spam.as_ref(),
        backend.crm.as_ref(),
        &submission,
        locale,
        ip.as_deref(),
    )
    .await?
    {
        ForwardOutcome::Accepted => Ok(Json(json!({ "ok": true }))),
        ForwardOutcome::RejectedAsSpam => Err(AppError::Spam),
    }
}

fn submission_locale(state: &AppState, query: &FormQuery) -> Locale {
    let locales = &state.config.locales;
    query
        .locale
        .as_deref()
        .and_then(|l| locales.recognize(l))
        .unwrap_or_else(|| locales.default_locale())
}

/// First address of `X-Forwarded-For`, as set by the fronting proxy.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}
