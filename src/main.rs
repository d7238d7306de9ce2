// =============================================================================
// Tavern Signals — Main Entry Point
// =============================================================================
//
// Usage: tavern-signals <history.json> [item_id] [item_name]
//
// Reads a JSON array of price samples, runs the full analysis and prints a
// JSON report to stdout.  Configuration comes from the file named by
// TAVERN_CONFIG (default analysis_config.json); a missing or invalid file
// falls back to the built-in defaults.
// =============================================================================

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tavern_signals::{
    AnalysisConfig, AnalysisService, IndicatorSummary, MarketSentiment, MultiTimeFrameAnalysis,
    PriceSample, TradingSuggestion,
};

const DEFAULT_CONFIG_PATH: &str = "analysis_config.json";

#[derive(Serialize)]
struct Report {
    item_id: u32,
    item_name: String,
    samples: usize,
    indicators: Option<IndicatorSummary>,
    multi_timeframe: Option<MultiTimeFrameAnalysis>,
    sentiment: MarketSentiment,
    suggestion: Option<TradingSuggestion>,
}

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path =
        std::env::var("TAVERN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AnalysisConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load analysis config, using defaults");
        AnalysisConfig::default()
    });

    // ── 2. Arguments ─────────────────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let Some(history_path) = args.next() else {
        bail!("usage: tavern-signals <history.json> [item_id] [item_name]");
    };
    let item_id: u32 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid item id '{}'", raw))?,
        None => 0,
    };
    let item_name = args.next().unwrap_or_else(|| "unknown".to_string());

    // ── 3. Price history ─────────────────────────────────────────────────
    let history = load_history(&history_path)?;
    let first = history.first().and_then(PriceSample::high_time);
    let last = history.last().and_then(PriceSample::high_time);
    info!(
        path = %history_path,
        samples = history.len(),
        from = ?first,
        to = ?last,
        "Price history loaded"
    );

    // ── 4. Analysis ──────────────────────────────────────────────────────
    let service = AnalysisService::new(config);
    let indicators = service.analyze(&history);

    let report = Report {
        item_id,
        item_name: item_name.clone(),
        samples: history.len(),
        indicators: indicators.as_ref().map(IndicatorSummary::from),
        multi_timeframe: service.analyze_multi_timeframe(&history),
        sentiment: service.analyze_sentiment(&history),
        suggestion: service.suggest(item_id, &item_name, &history),
    };

    if let Some(suggestion) = &report.suggestion {
        info!(
            action = %suggestion.action,
            confidence = format!("{:.3}", suggestion.confidence),
            "{}",
            suggestion.reasoning
        );
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );
    Ok(())
}

fn load_history(path: &str) -> anyhow::Result<Vec<PriceSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read price history from {}", path))?;
    let history: Vec<PriceSample> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse price history from {}", path))?;
    Ok(history)
}
