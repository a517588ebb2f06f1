use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::Args;
use serde_json::json;

use crate::cli::utils::{output_error, output_report};
use crate::cli::OutputFormat;
use crate::events::time::COMPOSED_FORMAT;
use crate::events::validate_submission;

#[derive(Args)]
pub struct ValidateArgs {
    #[arg(help = "Composed start, YYYY-MM-DDTHH:MM")]
    pub start: String,
    #[arg(help = "Composed end, YYYY-MM-DDTHH:MM")]
    pub end: String,
    #[arg(long, help = "Validate as an edit of an existing event")]
    pub editing: bool,
    #[arg(long, help = "Reference time, YYYY-MM-DDTHH:MM (defaults to the local clock)")]
    pub now: Option<String>,
}

pub fn handle(args: ValidateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let now = match &args.now {
        Some(value) => NaiveDateTime::parse_from_str(value, COMPOSED_FORMAT)
            .with_context(|| format!("--now '{}' is not a YYYY-MM-DDTHH:MM timestamp", value))?,
        None => Local::now().naive_local(),
    };

    match validate_submission(&args.start, &args.end, args.editing, now) {
        Ok(interval) => output_report(
            output_format,
            &json!({
                "success": true,
                "interval": interval,
            }),
            &[format!("ok: {} -> {}", interval.starts_at, interval.ends_at)],
        ),
        Err(e) => {
            output_error(output_format, &e.to_string(), Some(e.reason()))?;
            Err(anyhow::anyhow!("submission rejected: {}", e.reason()))
        }
    }
}
