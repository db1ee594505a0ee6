//! Form submission delivery: spam check, then CRM write.

use crate::{ClientError, Result};
use async_trait::async_trait;
use blokfront_core::Locale;
use blokfront_core::config::FormsConfig;
use blokfront_validator::Submission;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[async_trait]
pub trait SpamChecker: Send + Sync {
    async fn is_spam(&self, submission: &Submission, client_ip: Option<&str>) -> Result<bool>;
}

#[async_trait]
pub trait CrmSink: Send + Sync {
    async fn submit(&self, submission: &Submission, locale: Locale) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    Accepted,
    RejectedAsSpam,
}

/// Check a submission for spam and forward it to the CRM.
///
/// The two calls run in sequence. A CRM failure after a passed spam check
/// is returned as-is; nothing is rolled back.
pub async fn forward(
    spam: &dyn SpamChecker,
    crm: &dyn CrmSink,
    submission: &Submission,
    locale: Locale,
    client_ip: Option<&str>,
) -> Result<ForwardOutcome> {
    if spam.is_spam(submission, client_ip).await? {
        tracing::info!(kind = submission.kind(), %locale, "submission rejected as spam");
        return Ok(ForwardOutcome::RejectedAsSpam);
    }
    crm.submit(submission, locale).await?;
    tracing::info!(kind = submission.kind(), %locale, "submission forwarded to CRM");
    Ok(ForwardOutcome::Accepted)
}

#[derive(Debug, Serialize)]
struct SpamCheckRequest<'a> {
    name: &'a str,
    email: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SpamCheckResponse {
    spam: bool,
}

/// Spam check over HTTP: posts the submission text, reads `{ "spam": bool }`.
pub struct HttpSpamChecker {
    client: reqwest::Client,
    url: String,
}

impl HttpSpamChecker {
    pub fn new(config: &FormsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: config.spam_check_url.clone(),
        })
    }
}

#[async_trait]
impl SpamChecker for HttpSpamChecker {
    async fn is_spam(&self, submission: &Submission, client_ip: Option<&str>) -> Result<bool> {
        let request = SpamCheckRequest {
            name: submission.name(),
            email: submission.email(),
            content: submission.body(),
            ip: client_ip,
        };
        let response = self.client.post(&self.url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }
        let body: SpamCheckResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.without_url().to_string()))?;
        Ok(body.spam)
    }
}

#[derive(Debug, Serialize)]
struct CrmRequest<'a> {
    locale: Locale,
    submitted_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    submission: &'a Submission,
}

/// CRM write over HTTP: posts the submission JSON with an optional bearer
/// token.
pub struct HttpCrmSink {
    client: reqwest::Client,
    url: String,
}

impl HttpCrmSink {
    pub fn new(config: &FormsConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.crm_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::Config(format!("Invalid CRM token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: config.crm_url.clone(),
        })
    }
}

#[async_trait]
impl CrmSink for HttpCrmSink {
    async fn submit(&self, submission: &Submission, locale: Locale) -> Result<()> {
        let request = CrmRequest {
            locale,
            submitted_at: chrono::Utc::now(),
            submission,
        };
        let response = self.client.post(&self.url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }
        Ok(())
    }
}
