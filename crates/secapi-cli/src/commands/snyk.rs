// SPDX-License-Identifier: Apache-2.0

//! Snyk command handlers.

use anyhow::Result;
use secapi_core::SnykClient;
use secapi_core::snyk::SERVICE;
use serde_json::Map;
use tracing::debug;

use super::{CommandContext, finish, maybe_spinner};
use crate::cli::SnykCommand;

/// Runs one Snyk subcommand.
pub async fn run(command: SnykCommand, ctx: &CommandContext<'_>) -> Result<()> {
    let client = SnykClient::from_credentials(
        ctx.dispatcher.clone(),
        &ctx.config.snyk,
        ctx.credentials,
    )?;
    debug!(version = client.api_version(), "Snyk client ready");

    let spinner = maybe_spinner(&ctx.output, "Calling Snyk...");
    let result = match command {
        SnykCommand::ListGroups => client.list_groups().await,
        SnykCommand::ListOrganizations => client.list_organizations().await,
        SnykCommand::ListProjects { org_id } => client.list_projects(&org_id).await,
        SnykCommand::GetProject { org_id, project_id } => {
            client.get_project(&org_id, &project_id).await
        }
        SnykCommand::ListIssues { org_id, from, to } => {
            client
                .list_issues_v1(&[org_id], from, to, &Map::new())
                .await
        }
        SnykCommand::ListLatestIssues { page, page_size } => {
            client.list_latest_issues_v1(page, page_size, None).await
        }
        SnykCommand::ListDependencies {
            org_id,
            page,
            page_size,
        } => {
            client
                .list_dependencies_v1(&org_id, page, page_size, None)
                .await
        }
        SnykCommand::GetIssuesByOrgId { org_id } => client.get_issues_by_org_id(&org_id).await,
        SnykCommand::GetIssuesByGroupId { group_id } => {
            client.get_issues_by_group_id(&group_id).await
        }
        SnykCommand::GetSbom { org_id, project_id } => {
            client.get_project_sbom(&org_id, &project_id).await
        }
        SnykCommand::SearchAudit { org_id, params } => {
            client.search_org_audit_logs(&org_id, &params).await
        }
        SnykCommand::RemoveMember { org_id, user_id } => {
            client.remove_member_from_org(&org_id, &user_id).await
        }
    };
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    finish(result?, SERVICE, &ctx.output)
}
