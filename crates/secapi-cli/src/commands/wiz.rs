// SPDX-License-Identifier: Apache-2.0

//! Wiz command handlers.

use anyhow::{Context, Result};
use console::style;
use secapi_core::wiz::SERVICE;
use secapi_core::{IssueAnalyticsQuery, WizClient, WizSession};
use serde_json::json;

use super::{CommandContext, finish, maybe_spinner};
use crate::cli::{OutputContext, OutputFormat, WizCommand};

/// Runs one Wiz subcommand.
pub async fn run(command: WizCommand, ctx: &CommandContext<'_>) -> Result<()> {
    let spinner = maybe_spinner(&ctx.output, "Authenticating with Wiz...");
    let connected = WizClient::connect(
        ctx.dispatcher.clone(),
        &ctx.config.wiz,
        ctx.credentials,
    )
    .await;
    if let Some(s) = &spinner {
        s.finish_and_clear();
    }
    let client = connected?;

    let response = match command {
        WizCommand::Token => return render_session(client.session(), client.api_url(), &ctx.output),
        WizCommand::IssuesTable { first } => client.issues_table(first).await?,
        WizCommand::Issues {
            from,
            to,
            issue_type,
            interval,
        } => {
            let query = IssueAnalyticsQuery {
                issue_type,
                interval,
                ..IssueAnalyticsQuery::new(from, to)
            };
            client.get_issues(&query).await?
        }
    };

    finish(response, SERVICE, &ctx.output)
}

/// Prints where the token came from and which endpoint it targets. Never the token.
fn render_session(session: &WizSession, api_url: &str, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let value = json!({
                "data_center": session.data_center,
                "source": session.source,
                "api_url": api_url,
            });
            let text =
                serde_json::to_string_pretty(&value).context("Failed to serialize to JSON")?;
            println!("{text}");
        }
        OutputFormat::Text => {
            println!("{} {}", style("Data center:").bold(), session.data_center);
            println!("{} {}", style("Token source:").bold(), session.source);
            println!("{} {api_url}", style("GraphQL endpoint:").bold());
        }
    }
    Ok(())
}
