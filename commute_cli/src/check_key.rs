use std::collections::BTreeMap;

use comfy_table::{Table, presets::UTF8_FULL};
use commute_providers::{
    config::ProviderConfig,
    diagnostics::{ApiCheck, ApiCheckStatus, KeyDiagnostics},
};
use tracing::info;

const MESSAGE_COLUMN_CHARS: usize = 80;

pub async fn run() -> Result<(), anyhow::Error> {
    let config = ProviderConfig::from_env()?;

    info!("Checking API key permissions");
    let results = KeyDiagnostics::new(config.api_key)
        .check_api_key_permissions()
        .await;

    println!("{}", render_table(&results));

    Ok(())
}

fn render_table(results: &BTreeMap<String, ApiCheck>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["API", "Status", "OK", "Message"]);

    for (name, check) in results {
        let status = match &check.status {
            ApiCheckStatus::Code(code) => code.to_string(),
            ApiCheckStatus::Error(_) => String::from("error"),
        };

        table.add_row(vec![
            name.clone(),
            status,
            String::from(if check.success { "yes" } else { "no" }),
            check.message.chars().take(MESSAGE_COLUMN_CHARS).collect(),
        ]);
    }

    table
}
