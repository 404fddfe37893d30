// SPDX-License-Identifier: Apache-2.0

//! Projects, SBOM documents and dependencies.

use serde_json::{Value, json};
use tracing::instrument;

use super::SnykClient;
use super::issues::non_empty;
use crate::dispatch::{ApiResponse, CallOptions, HttpMethod};
use crate::error::SecApiError;

impl SnykClient {
    /// <https://docs.snyk.io/snyk-api/reference/projects#orgs-org_id-projects>
    #[instrument(skip(self))]
    pub async fn list_projects(&self, org_id: &str) -> Result<ApiResponse, SecApiError> {
        let url = self.versioned_url(&format!("/rest/orgs/{org_id}/projects"), &[]);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }

    /// <https://docs.snyk.io/snyk-api/reference/projects#orgs-org_id-projects-project_id>
    #[instrument(skip(self))]
    pub async fn get_project(
        &self,
        org_id: &str,
        project_id: &str,
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.versioned_url(&format!("/rest/orgs/{org_id}/projects/{project_id}"), &[]);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }

    /// URL for [`Self::get_project_sbom`].
    #[must_use]
    pub fn project_sbom_url(&self, org_id: &str, project_id: &str) -> String {
        self.versioned_url(
            &format!("/rest/orgs/{org_id}/projects/{project_id}/sbom"),
            &[],
        )
    }

    /// <https://docs.snyk.io/snyk-api/reference/sbom>
    #[instrument(skip(self))]
    pub async fn get_project_sbom(
        &self,
        org_id: &str,
        project_id: &str,
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.project_sbom_url(org_id, project_id);
        self.call(HttpMethod::Get, &url, CallOptions::new()).await
    }

    /// <https://docs.snyk.io/snyk-api/reference/dependencies-v1>
    ///
    /// `filters` becomes `{"filters": ...}`; no body is sent when it is absent or empty.
    #[instrument(skip(self, filters))]
    pub async fn list_dependencies_v1(
        &self,
        org_id: &str,
        page: u32,
        page_size: u32,
        filters: Option<Value>,
    ) -> Result<ApiResponse, SecApiError> {
        let url = self.url(&format!(
            "/v1/org/{org_id}/dependencies?page={page}&perPage={page_size}"
        ));
        let body = non_empty(filters).map(|filters| json!({ "filters": filters }));
        self.call(HttpMethod::Post, &url, CallOptions::new().maybe_json(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::client;

    #[test]
    fn test_project_sbom_url() {
        assert_eq!(
            client().project_sbom_url("o1", "p1"),
            "https://api.snyk.io/rest/orgs/o1/projects/p1/sbom?version=2025-01-01"
        );
    }
}
