//! # Payments Dispatch
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Register the processor variants
//! - Create the dispatcher
//! - Dispatch one payment and print the result

mod config;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments_hex::outbound::SimulatedGateway;
use payments_hex::{PaymentDispatcher, ProcessorRegistry};
use payments_types::{IdempotencyKey, PaymentRequest};

#[derive(Parser)]
#[command(name = "payments-dispatch")]
#[command(author, version, about = "Dispatch a payment through a processor variant", long_about = None)]
struct Cli {
    /// Amount in major currency units (e.g. 10.50)
    #[arg(allow_negative_numbers = true)]
    amount: Decimal,

    /// Currency code (USD, EUR, GBP, INR, JPY)
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Processor variant; falls back to PAYMENTS_DEFAULT_VARIANT
    #[arg(long)]
    variant: Option<String>,

    /// Idempotency key; a random one is generated when omitted
    #[arg(long, env = "PAYMENTS_IDEMPOTENCY_KEY")]
    idempotency_key: Option<String>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,payments_app=debug,payments_hex=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Registers the in-process variants. Fails fast on a bad registration.
fn build_registry() -> anyhow::Result<ProcessorRegistry> {
    let mut builder = ProcessorRegistry::builder();
    builder
        .register(
            "gatewayA",
            SimulatedGateway::new("gwa").with_latency(Duration::from_millis(20)),
        )?
        .register(
            "gatewayB",
            SimulatedGateway::new("gwb")
                .with_failure_rates(0.1, 0.4)
                .with_latency(Duration::from_millis(50)),
        )?;
    Ok(builder.build())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = config::Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let registry = build_registry()?;
    tracing::info!(variants = ?registry.names(), "processor registry ready");

    let dispatcher =
        PaymentDispatcher::new(registry, config.retry_policy()).with_default(&config.default_variant)?;

    let key = cli
        .idempotency_key
        .map(IdempotencyKey::new)
        .unwrap_or_else(IdempotencyKey::random);
    let request = PaymentRequest::new(cli.amount, cli.currency, key);

    let outcome = match cli.variant.as_deref() {
        Some(variant) => dispatcher.dispatch(variant, &request).await,
        None => dispatcher.dispatch_default(&request).await,
    };

    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, attempts = e.attempts(), "dispatch failed");
            eprintln!("error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
