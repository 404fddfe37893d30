// SPDX-License-Identifier: Apache-2.0

//! Issue listings, v1 reporting and REST.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};
use tracing::instrument;

use super::SnykClient;
use crate::dispatch::{ApiResponse, CallOptions, HttpMethod};
use crate::error::SecApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Adds `orgId` to the caller's reporting filters, overriding any existing one.
#[must_use]
pub fn reporting_filters(filters: &Map<String, Value>, org_ids: &[String]) -> Value {
    let mut merged = filters.clone();
    merged.insert("orgId".to_string(), json!(org_ids));
    json!({ "filters": merged })
}

/// Drops filters that are an empty object, which mean "no filters".
pub(super) fn non_empty(filters: Option<Value>) -> Option<Value> {
    filters.filter(|f| f.as_object().is_none_or(|m| !m.is_empty()))
}

impl SnykClient {
    /// <https://docs.snyk.io/snyk-api/reference/reporting-api-v1#reporting-issues>
    #[instrument(skip(self, filters))]
    pub async fn list_issues_v1(
        &self,
        org_ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
        filters: &Map<String, Value>,
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.url(&format!(
            "/v1/reporting/issues?from={}&to={}",
            from.format(DATE_FORMAT),
            to.format(DATE_FORMAT)
        ));
        let body = reporting_filters(filters, org_ids);
        self.call(HttpMethod::Post, &url, CallOptions::new().json(body))
            .await
    }

    /// <https://docs.snyk.io/snyk-api/reference/reporting-api-v1#reporting-issues-latest>
    #[instrument(skip(self, filters))]
    pub async fn list_latest_issues_v1(
        &self,
        page: u32,
        page_size: u32,
        filters: Option<Value>,
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.url(&format!(
            "/v1/reporting/issues/latest?page={page}&page_size={page_size}"
        ));
        let body = non_empty(filters).map(|filters| json!({ "filters": filters }));
        self.call(HttpMethod::Post, &url, CallOptions::new().maybe_json(body))
            .await
    }

    /// <https://docs.snyk.io/snyk-api/reference/issues#orgs-org_id-issues>
    #[instrument(skip(self))]
    pub async fn get_issues_by_org_id(&self, org_id: &str) -> Result<ApiResponse, SecApiError> {
        let url = self.versioned_url(&format!("/rest/orgs/{org_id}/issues"), &[]);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }

    /// <https://docs.snyk.io/snyk-api/reference/issues#groups-group_id-issues>
    #[instrument(skip(self))]
    pub async fn get_issues_by_group_id(&self, group_id: &str) -> Result<ApiResponse, SecApiError> {
        let url = self.versioned_url(&format!("/rest/groups/{group_id}/issues"), &[]);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }
}
