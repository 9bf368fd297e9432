//! Invest CLI - Command line interface for portfolio analysis.
//!
//! Prints the analysis transcript, or JSON wrapped in an `ApiResponse` with
//! `--json`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invest_core::{
    portfolio::{rebalancing_candidates, PortfolioSource},
    report::{percent, InvestmentAnalysis, PortfolioReport, PositionDetail, ValuationCheck},
    total_value, ApiResponse, Portfolio,
};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "invest")]
#[command(about = "Investment analytics CLI - performance, risk, tax and rebalancing")]
#[command(version)]
struct Cli {
    /// Portfolio JSON file (defaults to $INVEST_PORTFOLIO_FILE, then ~/.invest/portfolio.json)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full portfolio analysis (default)
    Report,
    /// Positions outside the equal-weight tolerance band
    Rebalance,
    /// Every metric for a single position
    Position {
        /// Ticker symbol
        ticker: String,
        /// Total earnings attributed to the position, enables P/E
        #[arg(short, long)]
        earnings: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            if json {
                println!("{}", to_json(&ApiResponse::<()>::err(format!("{:#}", e))));
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let source = PortfolioSource::resolve(cli.file);
    tracing::info!(?source, "Loading portfolio");
    let portfolio = source
        .load()
        .with_context(|| format!("failed to load portfolio from {:?}", source))?;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => handle_report(&portfolio, cli.json),
        Commands::Rebalance => handle_rebalance(&portfolio, cli.json),
        Commands::Position { ticker, earnings } => {
            handle_position(&portfolio, &ticker, earnings, cli.json)
        }
    }
}

fn handle_report(portfolio: &Portfolio, json: bool) -> Result<String> {
    let report = PortfolioReport::build(portfolio).context("failed to analyze portfolio")?;
    if json {
        return Ok(to_json(&ApiResponse::ok(report)));
    }
    Ok(report.render_text())
}

fn handle_rebalance(portfolio: &Portfolio, json: bool) -> Result<String> {
    let candidates =
        rebalancing_candidates(portfolio).context("failed to evaluate rebalancing")?;
    if json {
        return Ok(to_json(&ApiResponse::ok(json!({
            "total_value": total_value(portfolio),
            "candidates": candidates,
        }))));
    }

    let mut lines = vec!["Rebalancing Recommendations:".to_string()];
    lines.extend(candidates.iter().map(|c| {
        format!(
            "- Rebalance {} to reach target weight of {} (currently {})",
            c.ticker,
            percent(c.target_weight * 100.0),
            percent(c.current_weight * 100.0)
        )
    }));
    if candidates.is_empty() {
        lines.push("All positions are within tolerance".to_string());
    }
    Ok(lines.join("\n"))
}

fn handle_position(
    portfolio: &Portfolio,
    ticker: &str,
    earnings: Option<f64>,
    json: bool,
) -> Result<String> {
    let investment = portfolio
        .find(ticker)
        .with_context(|| format!("position not found: {}", ticker))?;

    let analysis = InvestmentAnalysis::analyze(
        investment,
        total_value(portfolio),
        chrono::Local::now().date_naive(),
    );
    let valuation = earnings
        .map(|e| ValuationCheck::evaluate(investment, e))
        .transpose()
        .context("failed to compute P/E ratio")?;

    if json {
        return Ok(to_json(&ApiResponse::ok(json!({
            "analysis": analysis,
            "valuation": valuation,
        }))));
    }

    Ok(PositionDetail {
        analysis: &analysis,
        valuation: valuation.as_ref(),
    }
    .to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| serialization_failure(&e).to_string())
}

fn serialization_failure(error: &serde_json::Error) -> serde_json::Value {
    json!({
        "ok": false,
        "error": format!("JSON serialization failed: {}", error),
    })
}
