use commute_providers::{config::ProviderConfig, places_api::GooglePlacesClient};
use tracing::info;

pub async fn run(input: &str) -> Result<(), anyhow::Error> {
    let config = ProviderConfig::from_env()?;

    let suggestions = GooglePlacesClient::new(config.api_key)
        .autocomplete(input)
        .await?;

    if suggestions.is_empty() {
        info!("No suggestions for {:?}", input);
    }

    for suggestion in suggestions {
        println!("{}", suggestion);
    }

    Ok(())
}
