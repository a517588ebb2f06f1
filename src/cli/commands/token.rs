use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::SessionKeys;
use crate::cli::utils::output_report;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "User id the token is issued for")]
    pub user_id: Uuid,
    #[arg(long, help = "Display name carried in the token")]
    pub name: String,
    #[arg(long, default_value = "student", help = "Role carried in the token")]
    pub role: String,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let keys = SessionKeys::from_config();
    let token = keys.issue(args.user_id, args.name.as_str(), args.role.as_str())?;
    tracing::debug!("Issued session token for {}", args.user_id);

    output_report(
        output_format,
        &json!({
            "token": token,
            "user_id": args.user_id,
            "name": args.name,
            "role": args.role,
        }),
        &[token.clone()],
    )
}
