// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return an `ApiResponse`; this module handles presentation.
//! Bodies go to stdout, status lines to stderr.

use std::io::{self, Write};

use anyhow::{Context, Result};
use console::style;
use secapi_core::ApiResponse;
use serde_json::Value;

use crate::cli::{OutputContext, OutputFormat};

/// Pretty-prints a JSON body, falling back to the raw text.
pub fn format_body(bytes: &[u8]) -> String {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned()),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Writes the response body, plus its status line in text mode.
pub fn render_response(response: &ApiResponse, ctx: &OutputContext) -> Result<()> {
    if ctx.format == OutputFormat::Text {
        let status = response.status();
        let line = format!("HTTP {status}");
        let line = if status.is_success() {
            style(line).green()
        } else {
            style(line).red()
        };
        eprintln!("{line}");
    }

    if response.bytes().is_empty() {
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", format_body(response.bytes())).context("Failed to write response")?;
    Ok(())
}
