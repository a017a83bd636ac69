use std::{fs::File, io::Read};

use anyhow::{Context, Result};
use dynamo_dashboard::bin_utils::{Report, Service};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // stdout carries the report, logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a clients CSV file name as the first argument")?;
    let report = match args.next() {
        Some(name) => name.parse::<Report>()?,
        None => Report::default(),
    };
    // an unreadable export falls back to the demo data like any failed import
    let input: Box<dyn Read> = match File::open(&filename) {
        Ok(file) => Box::new(file),
        Err(err) => {
            warn!(%err, file = %filename, "cannot open clients export");
            Box::new(std::io::empty())
        }
    };

    let service = Service {
        input,
        output: &mut std::io::stdout(),
        report,
        today: chrono::Local::now().date_naive(),
    };
    service.run()
}
