//! A single battlecard request as recorded in the submission log.

use chrono::{DateTime, SecondsFormat, Utc};

/// Header row written once when the submission log is created.
pub const CSV_HEADER: &str = "Timestamp,User URL,Competitor URL,Email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub user_url: String,
    pub competitor_url: String,
    pub user_email: String,
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    pub fn new(
        user_url: impl Into<String>,
        competitor_url: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            user_url: user_url.into(),
            competitor_url: competitor_url.into(),
            user_email: user_email.into(),
            timestamp: Utc::now(),
        }
    }

    /// Render as one newline-terminated CSV record. The timestamp is bare,
    /// every other field is quoted.
    pub fn to_csv_record(&self) -> String {
        format!(
            "{},{},{},{}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            quote_csv_field(&self.user_url),
            quote_csv_field(&self.competitor_url),
            quote_csv_field(&self.user_email),
        )
    }
}

fn quote_csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
