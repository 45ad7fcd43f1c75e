use std::path::Path;

use crate::app::Config;
use crate::cli::output;
use crate::error::Result;

/// Probe reachability of the configured structured market API. Does not
/// exercise the query or scrape fallback sources, since those are only
/// meant to be hit when the structured API is already failing.
pub async fn execute_connection<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path)?;

    output::section("Connection check");
    output::field("Structured API", &config.market.structured_base_url);

    let client = reqwest::Client::new();
    print!("  structured API reachability... ");
    match client.get(&config.market.structured_base_url).send().await {
        Ok(response) => println!("responded ({})", response.status()),
        Err(err) => println!("unreachable ({err})"),
    }

    if config.models.entries.is_empty() {
        output::warning("no models configured; forecasting would have nothing to dispatch");
    } else {
        output::success(&format!("{} model endpoint(s) configured", config.models.entries.len()));
    }

    Ok(())
}
