// Form schemas for the contact and job application endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MAX_NAME: usize = 100;
const MAX_TEXT: usize = 5000;

/// Per-field validation failures. Empty means the submission is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<&'static str, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure for `field`. The first message per field wins.
    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    fn required(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        if len == 0 {
            self.error(field, "This field is required");
        } else if len < min {
            self.error(field, format!("Must be at least {} characters", min));
        } else if len > max {
            self.error(field, format!("Must be at most {} characters", max));
        }
    }

    fn email(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.error(field, "This field is required");
        } else if !is_email(value.trim()) {
            self.error(field, "Enter a valid email address");
        }
    }

    fn optional_phone(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(phone) = value.map(str::trim).filter(|p| !p.is_empty())
            && !is_phone(phone)
        {
            self.error(field, "Enter a valid phone number");
        }
    }

    fn optional_max(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        if value.is_some_and(|v| v.trim().chars().count() > max) {
            self.error(field, format!("Must be at most {} characters", max));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.required("name", &self.name, 2, MAX_NAME);
        report.email("email", &self.email);
        report.optional_max("company", self.company.as_deref(), MAX_NAME);
        report.optional_phone("phone", self.phone.as_deref());
        report.required("message", &self.message, 10, MAX_TEXT);
        report
    }

    /// Trim every field and drop empty optional ones.
    pub fn normalized(self) -> Self {
        ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: normalize_optional(self.company),
            phone: normalize_optional(self.phone),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobApplication {
    /// Slug of the job posting within the vacancies folder
    pub vacancy: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub motivation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl JobApplication {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.vacancy.trim().is_empty() {
            report.error("vacancy", "This field is required");
        }
        report.required("name", &self.name, 2, MAX_NAME);
        report.email("email", &self.email);
        report.optional_phone("phone", self.phone.as_deref());
        report.required("motivation", &self.motivation, 20, MAX_TEXT);
        if let Some(url) = self.linkedin.as_deref().map(str::trim).filter(|u| !u.is_empty())
            && !is_linkedin_url(url)
        {
            report.error("linkedin", "Enter a LinkedIn profile URL");
        }
        report
    }

    pub fn normalized(self) -> Self {
        JobApplication {
            vacancy: self.vacancy.trim().trim_matches('/').to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: normalize_optional(self.phone),
            motivation: self.motivation.trim().to_string(),
            linkedin: normalize_optional(self.linkedin),
        }
    }
}

/// A validated submission as forwarded to the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Submission {
    Contact(ContactForm),
    JobApplication(JobApplication),
}

impl Submission {
    /// Form type, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Contact(_) => "contact",
            Submission::JobApplication(_) => "job_application",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Submission::Contact(form) => &form.email,
            Submission::JobApplication(form) => &form.email,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Submission::Contact(form) => &form.name,
            Submission::JobApplication(form) => &form.name,
        }
    }

    /// Free text a spam check should look at.
    pub fn body(&self) -> &str {
        match self {
            Submission::Contact(form) => &form.message,
            Submission::JobApplication(form) => &form.motivation,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}

fn is_phone(s: &str) -> bool {
    let digits = s.chars().filter(char::is_ascii_digit).count();
    (6..=15).contains(&digits)
        && s
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || " -()".contains(c) || (c == '+' && i == 0))
}

fn is_linkedin_url(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("https://") else {
        return false;
    };
    let host = rest.split('/').next().unwrap_or_default();
    host == "linkedin.com" || host.ends_with(".linkedin.com")
}
