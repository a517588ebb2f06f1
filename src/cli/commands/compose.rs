use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use serde_json::json;

use crate::cli::utils::output_report;
use crate::cli::OutputFormat;
use crate::events::compose;

#[derive(Args)]
pub struct ComposeArgs {
    #[arg(help = "Calendar date, YYYY-MM-DD")]
    pub date: String,
    #[arg(help = "Clock time, HH:MM (may be empty)")]
    pub time: String,
}

pub fn handle(args: ComposeArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d")
        .with_context(|| format!("'{}' is not a YYYY-MM-DD date", args.date))?;
    let composed = compose(Some(date), &args.time);

    let line = if composed.is_empty() {
        "(incomplete)".to_string()
    } else {
        composed.clone()
    };

    output_report(
        output_format,
        &json!({
            "date": args.date,
            "time": args.time,
            "composed": composed,
        }),
        &[line],
    )
}
