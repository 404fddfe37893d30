// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for secapi.
//!
//! Uses clap's derive API with noun-verb subcommands, one noun per service.

use std::io::IsTerminal;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the completion subcommand.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc:
      eval "$(secapi completion bash)"

  zsh
    secapi completion zsh > ~/.zsh/completions/_secapi

  fish
    secapi completion fish > ~/.config/fish/completions/secapi.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed body plus the HTTP status on stderr (default)
    #[default]
    Text,
    /// Pretty-printed body only
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if spinners should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Parses a `key=value` pair for repeated `--param` flags.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

/// Parses `YYYY-MM-DD` (midnight UTC) or RFC3339 into a UTC timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected YYYY-MM-DD or RFC3339, got `{raw}`"))
}

/// secapi - thin CLI wrappers for the Snyk and Wiz security APIs.
#[derive(Parser)]
#[command(name = "secapi")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log requests and responses at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Snyk REST and v1 API calls
    #[command(subcommand)]
    Snyk(SnykCommand),

    /// Wiz GraphQL API calls
    #[command(subcommand)]
    Wiz(WizCommand),

    /// Generate a shell completion script (output to stdout)
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Snyk subcommands
#[derive(Subcommand)]
pub enum SnykCommand {
    /// List groups
    #[command(alias = "list_groups")]
    ListGroups,

    /// List organizations (v1)
    #[command(alias = "list_organizations")]
    ListOrganizations,

    /// List projects in an organization
    #[command(alias = "list_projects")]
    ListProjects {
        /// Organization ID
        org_id: String,
    },

    /// Get one project
    #[command(alias = "get_project")]
    GetProject {
        /// Organization ID
        org_id: String,
        /// Project ID
        project_id: String,
    },

    /// Reporting issues for an organization over a date range (v1)
    #[command(alias = "list_issues")]
    ListIssues {
        /// Organization ID
        org_id: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2025-01-01")]
        from: NaiveDate,
        /// End date (YYYY-MM-DD)
        #[arg(long, default_value = "2025-02-01")]
        to: NaiveDate,
    },

    /// Latest reporting issues (v1)
    #[command(alias = "list_latest_issues")]
    ListLatestIssues {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Results per page
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },

    /// Dependencies of an organization (v1)
    #[command(alias = "list_dependencies")]
    ListDependencies {
        /// Organization ID
        org_id: String,
        /// Page number (zero-based)
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Results per page
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },

    /// Issues of an organization
    #[command(alias = "get_issues_by_org_id")]
    GetIssuesByOrgId {
        /// Organization ID
        org_id: String,
    },

    /// Issues of a group
    #[command(alias = "get_issues_by_group_id")]
    GetIssuesByGroupId {
        /// Group ID
        group_id: String,
    },

    /// SBOM document of a project
    #[command(alias = "get_sbom")]
    GetSbom {
        /// Organization ID
        org_id: String,
        /// Project ID
        project_id: String,
    },

    /// Search an organization's audit logs
    #[command(alias = "search_audit")]
    SearchAudit {
        /// Organization ID
        org_id: String,
        /// Extra query parameter, repeatable (e.g. --param sort=asc)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Remove a member from an organization (v1)
    #[command(alias = "remove_member")]
    RemoveMember {
        /// Organization ID
        org_id: String,
        /// User ID
        user_id: String,
    },
}

/// Wiz subcommands
#[derive(Subcommand)]
pub enum WizCommand {
    /// Resolve a token and show its data center and source
    Token,

    /// First page of the issues table
    #[command(alias = "issues_table")]
    IssuesTable {
        /// Number of issues to fetch
        #[arg(long, default_value_t = 5)]
        first: u32,
    },

    /// Issue analytics over a time window
    #[command(alias = "get_issues")]
    Issues {
        /// Window start (YYYY-MM-DD or RFC3339)
        #[arg(long, value_parser = parse_timestamp)]
        from: DateTime<Utc>,
        /// Window end (YYYY-MM-DD or RFC3339)
        #[arg(long, value_parser = parse_timestamp)]
        to: DateTime<Utc>,
        /// Analytics type
        #[arg(long = "type", default_value = "OPEN_ISSUES")]
        issue_type: String,
        /// Bucket interval
        #[arg(long, default_value = "DAY")]
        interval: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("sort=asc"),
            Ok(("sort".to_string(), "asc".to_string()))
        );
        assert_eq!(
            parse_key_value("filter=a=b"),
            Ok(("filter".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_value("sort").is_err());
        assert!(parse_key_value("=asc").is_err());
    }

    #[test]
    fn test_parse_timestamp() {
        let day = parse_timestamp("2025-01-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2025-01-01T00:00:00+00:00");

        let offset = parse_timestamp("2025-01-01T02:00:00+02:00").unwrap();
        assert_eq!(offset, day);

        assert!(parse_timestamp("01/01/2025").is_err());
    }

    #[test]
    fn test_snake_case_alias() {
        let cli = Cli::try_parse_from(["secapi", "snyk", "get_sbom", "o1", "p1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Snyk(SnykCommand::GetSbom { .. })
        ));
    }

    #[test]
    fn test_search_audit_params() {
        let cli = Cli::try_parse_from([
            "secapi",
            "snyk",
            "search-audit",
            "o1",
            "--param",
            "sort=asc",
            "--param",
            "size=10",
        ])
        .unwrap();
        match cli.command {
            Commands::Snyk(SnykCommand::SearchAudit { org_id, params }) => {
                assert_eq!(org_id, "o1");
                assert_eq!(params.len(), 2);
                assert_eq!(params[0], ("sort".to_string(), "asc".to_string()));
            }
            _ => panic!("expected search-audit"),
        }
    }

    #[test]
    fn test_list_issues_default_window() {
        let cli = Cli::try_parse_from(["secapi", "snyk", "list-issues", "o1"]).unwrap();
        match cli.command {
            Commands::Snyk(SnykCommand::ListIssues { from, to, .. }) => {
                assert_eq!(from.to_string(), "2025-01-01");
                assert_eq!(to.to_string(), "2025-02-01");
            }
            _ => panic!("expected list-issues"),
        }
    }

    #[test]
    fn test_pagination_defaults() {
        let cli = Cli::try_parse_from(["secapi", "snyk", "list-latest-issues"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Snyk(SnykCommand::ListLatestIssues {
                page: 1,
                page_size: 10
            })
        ));

        let cli = Cli::try_parse_from(["secapi", "snyk", "list-dependencies", "o1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Snyk(SnykCommand::ListDependencies {
                page: 0,
                page_size: 10,
                ..
            })
        ));
    }
}
