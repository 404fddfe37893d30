// SPDX-License-Identifier: Apache-2.0

//! Wiz issue queries.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use tracing::instrument;

use super::WizClient;
use crate::dispatch::ApiResponse;
use crate::error::SecApiError;
use crate::query::TemplateValues;

/// Parameters for the `get_issues` analytics query.
#[derive(Debug, Clone)]
pub struct IssueAnalyticsQuery {
    /// Start of the reporting window.
    pub start_date: DateTime<Utc>,
    /// End of the reporting window.
    pub end_date: DateTime<Utc>,
    /// Analytics type (e.g., `OPEN_ISSUES`).
    pub issue_type: String,
    /// Bucket size (e.g., `DAY`).
    pub interval: String,
    /// `filterBy` object passed through to the query.
    pub filter_by: Value,
}

impl IssueAnalyticsQuery {
    /// Window with the default type, interval and filter.
    #[must_use]
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            end_date,
            issue_type: "OPEN_ISSUES".to_string(),
            interval: "DAY".to_string(),
            filter_by: json!({"sourceRule": {}}),
        }
    }

    fn template_values(&self) -> TemplateValues {
        TemplateValues::from([
            ("filterBy".to_string(), self.filter_by.to_string()),
            (
                "startDate".to_string(),
                self.start_date.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "endDate".to_string(),
                self.end_date.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("type".to_string(), self.issue_type.clone()),
            ("interval".to_string(), self.interval.clone()),
        ])
    }
}

impl WizClient {
    /// Fetches the first `first` rows of the issues table.
    #[instrument(skip(self))]
    pub async fn issues_table(&self, first: u32) -> Result<ApiResponse, SecApiError> {
        let values = TemplateValues::from([("first".to_string(), first.to_string())]);
        let loaded = self.queries.load("issues_table", &values)?;
        self.graphql(&loaded.query, &loaded.variables).await
    }

    /// Fetches issue analytics over a time window.
    #[instrument(skip(self))]
    pub async fn get_issues(&self, query: &IssueAnalyticsQuery) -> Result<ApiResponse, SecApiError> {
        let loaded = self.queries.load("get_issues", &query.template_values())?;
        self.graphql(&loaded.query, &loaded.variables).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_template_values_defaults() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let values = IssueAnalyticsQuery::new(start, end).template_values();

        assert_eq!(values["filterBy"], r#"{"sourceRule":{}}"#);
        assert_eq!(values["startDate"], "2025-01-01T00:00:00Z");
        assert_eq!(values["endDate"], "2025-02-01T00:00:00Z");
        assert_eq!(values["type"], "OPEN_ISSUES");
        assert_eq!(values["interval"], "DAY");
    }
}
