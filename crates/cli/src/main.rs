use clap::Parser;
use dnssec_probe_application::use_cases::MeasurementReport;
use dnssec_probe_domain::CliOverrides;
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "dnssec-probe")]
#[command(version = "0.1.0")]
#[command(about = "Measures DNSSEC-related record reachability through the system resolvers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Nameserver to query instead of the system ones (repeatable, IPv4[:port])
    #[arg(short = 'n', long = "nameserver", value_name = "ADDR")]
    nameservers: Vec<String>,

    /// UDP attempts per nameserver
    #[arg(short = 'a', long)]
    attempts: Option<u32>,

    /// Write telemetry events to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        nameservers: cli.nameservers,
        udp_attempts: cli.attempts,
        telemetry_output: cli.output,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dnssec-probe v{}", env!("CARGO_PKG_VERSION"));

    let telemetry = di::Telemetry::new(&config).await?;
    let use_cases = di::UseCases::new(&config, Arc::new(telemetry.emitter.clone()))?;

    let outcome = use_cases.run_measurement.execute().await;

    // The use cases hold emitter clones; release them before draining.
    drop(use_cases);
    telemetry.finish().await?;

    match outcome {
        Ok(Some(report)) => {
            log_summary(&report);
            Ok(())
        }
        Ok(None) => {
            info!("Telemetry disabled, nothing measured");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Measurement aborted");
            Err(e.into())
        }
    }
}

fn log_summary(report: &MeasurementReport) {
    let nameservers: Vec<String> = report.nameservers.iter().map(|n| n.to_string()).collect();
    info!(
        measurement_id = %report.measurement_id,
        nameservers = %nameservers.join(","),
        total_attempts = report.state.total_attempts(),
        responses = report.state.responses_collected(),
        "Measurement summary"
    );

    for key in report.state.keys() {
        let response_len = report.state.response(key).map_or(0, <[u8]>::len);
        info!(
            key = %key,
            attempts = report.state.attempts(key),
            response_len,
            "Probe result"
        );
    }
}
