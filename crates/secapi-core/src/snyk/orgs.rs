// SPDX-License-Identifier: Apache-2.0

//! Groups, organizations, members and audit logs.

use tracing::instrument;

use super::SnykClient;
use crate::dispatch::{ApiResponse, CallOptions, HttpMethod};
use crate::error::SecApiError;

impl SnykClient {
    /// <https://apidocs.snyk.io/?version=2024-10-15#get-/groups>
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> Result<ApiResponse, SecApiError> {
        let url = self.versioned_url("/rest/groups", &[]);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }

    /// <https://docs.snyk.io/snyk-api/reference/organizations-v1#orgs>
    #[instrument(skip(self))]
    pub async fn list_organizations(&self) -> Result<ApiResponse, SecApiError> {
        let url = self.url("/v1/orgs");
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }

    /// <https://docs.snyk.io/snyk-api/reference/organizations-v1#org-orgid-members-userid-1>
    #[instrument(skip(self))]
    pub async fn remove_member_from_org(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.url(&format!("/v1/orgs/org/{org_id}/members/{user_id}"));
        self.call(HttpMethod::Delete, &url, CallOptions::new()).await
    }

    /// URL for [`Self::search_org_audit_logs`].
    #[must_use]
    pub fn audit_logs_search_url(&self, org_id: &str, query_params: &[(String, String)]) -> String {
        self.versioned_url(&format!("/rest/orgs/{org_id}/audit_logs/search"), query_params)
    }

    /// <https://docs.snyk.io/snyk-api/reference/audit-logs>
    ///
    /// `query_params` follow `version` in the order given.
    #[instrument(skip(self))]
    pub async fn search_org_audit_logs(
        &self,
        org_id: &str,
        query_params: &[(String, String)],
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.audit_logs_search_url(org_id, query_params);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }
}
