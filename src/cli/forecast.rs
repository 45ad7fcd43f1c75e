use crate::app::config::Config;
use crate::cli::{output, ForecastArgs};
use crate::core::domain::EventReference;
use crate::core::enrichment::{NewsProvider, SentimentProvider};
use crate::core::market::MarketGateway;
use crate::core::orchestrator::client::HttpModelClient;
use crate::core::orchestrator::registry::ModelRegistry;
use crate::core::pipeline::Pipeline;
use crate::error::Result;

const CACHE_DIR: &str = ".marketcast_cache";
const NEWS_ENDPOINT: &str = "https://newsapi.org/v2/everything";
const SENTIMENT_ENDPOINT: &str = "https://example-sentiment-index.invalid/v1/index";

/// Execute the `forecast` subcommand: resolve the reference, run it
/// through the full pipeline, and print the result.
pub async fn execute(args: ForecastArgs, config: Config) -> Result<()> {
    if !args.no_banner {
        crate::cli::banner::print_banner();
    }

    let reference = EventReference::parse(&args.reference)?;

    let gateway = MarketGateway::new(
        config.market.structured_base_url.clone(),
        config.market.query_base_url.clone(),
        config.market.scrape_base_url.clone(),
        config.low_probability_threshold,
        config.allow_mock_event,
    );
    let registry = ModelRegistry::new(config.models.entries.clone());
    let client = Box::new(HttpModelClient::new());
    let news = Box::new(NewsProvider::new(NEWS_ENDPOINT, CACHE_DIR));
    let sentiment = Box::new(SentimentProvider::new(SENTIMENT_ENDPOINT, CACHE_DIR));
    let pipeline = Pipeline::new(gateway, registry, client, news, sentiment);

    let spinner = output::spinner(&format!("forecasting \"{}\"", args.reference));
    let result = pipeline.predict(&reference, &config).await;
    match &result {
        Ok(_) => output::spinner_success(&spinner, "forecast complete"),
        Err(err) => output::spinner_fail(&spinner, &err.to_string()),
    }

    let prediction = result?;

    if args.json {
        output::print_prediction_json(&prediction)?;
    } else {
        output::print_prediction(&prediction);
    }

    Ok(())
}
