use clap::Args;
use serde::Serialize;

use crate::cli::utils::output_report;
use crate::cli::OutputFormat;
use crate::routing::{AccessDecision, RoutePolicy};

#[derive(Args)]
pub struct RouteArgs {
    #[arg(required = true, help = "Request paths to classify, e.g. /en/events/42")]
    pub paths: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub path: String,
    pub bypassed: bool,
    #[serde(flatten)]
    pub decision: AccessDecision,
    pub matched_pattern: Option<String>,
}

pub fn classify(policy: &RoutePolicy, path: &str) -> RouteReport {
    RouteReport {
        path: path.to_string(),
        bypassed: policy.bypasses(path),
        decision: policy.evaluate(path),
        matched_pattern: policy.matching_pattern(path).map(str::to_string),
    }
}

pub fn handle(args: RouteArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let policy = RoutePolicy::global();
    let reports: Vec<RouteReport> = args.paths.iter().map(|p| classify(policy, p)).collect();

    let lines: Vec<String> = reports
        .iter()
        .map(|r| {
            if r.bypassed {
                return format!("{}  bypassed (static asset or framework internal)", r.path);
            }
            format!(
                "{}  auth={} locale={} pattern={}",
                r.path,
                if r.decision.requires_auth { "required" } else { "public" },
                if r.decision.apply_locale_routing { "yes" } else { "no" },
                r.matched_pattern.as_deref().unwrap_or("-")
            )
        })
        .collect();

    output_report(output_format, &reports, &lines)
}
