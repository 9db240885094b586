//! Validate command - report problem records in a pool snapshot

use crate::{checks, pool};
use owo_colors::OwoColorize;
use rideshare_cli::output::{format_count, Status};
use rideshare_core::config::ConfigSchema;
use rideshare_core::{Result, ResultExt};
use std::path::Path;
use std::time::Duration;

/// Run the validate command
pub async fn run(pool_flag: Option<&Path>, config: &ConfigSchema, json: bool) -> Result<()> {
    let path = pool::resolve_path(pool_flag, &config.pool)?;
    let timeout = Duration::from_millis(config.pool.fetch_timeout_ms);
    let offers = pool::load(&path, timeout).await?;

    let result = checks::check_pool(&offers);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Status::header(&format!(
            "Checked {} in {}",
            format_count(offers.len(), "ride offer", "ride offers"),
            path.display()
        ));

        for error in result.errors() {
            println!("  {} {}", "✗".red(), error);
        }
        for warning in result.warnings() {
            println!("  {} {}", "⚠".yellow(), warning);
        }

        if result.is_valid() {
            Status::success(&format!(
                "No problems found ({})",
                format_count(result.warnings().len(), "warning", "warnings")
            ));
        }
    }

    result
        .to_result()
        .context(format!("Pool file: {}", path.display()))
}
