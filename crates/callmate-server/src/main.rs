use anyhow::Result;
use callmate_server::cli::{Cli, Commands};
use callmate_server::config::CallmateConfig;
use callmate_server::server::run_server;
use callmate_server::state::AppState;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_logging(args.verbose);

            let config = CallmateConfig::load(&args.config, &args)?;
            info!(
                context_capacity = config.context.capacity,
                known_names = config.redaction.known_names.len(),
                data_dir = %config.storage.data_dir.display(),
                "Configuration loaded"
            );

            let metrics_handle = init_metrics()?;
            let state = AppState::new(&config, Some(metrics_handle))?;

            let addr: SocketAddr =
                format!("{}:{}", config.server.listen, config.server.port).parse()?;
            run_server(state, addr).await?;
        }

        Commands::Simulate {
            target,
            call_id,
            verbose,
        } => {
            init_logging(verbose);
            callmate_server::simulate::run(&target, &call_id).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "callmate=debug,tower_http=debug"
    } else {
        "callmate=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the Prometheus recorder and return the handle `/metrics` renders
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!("callmate_suggestions_total", "Suggestions returned");
    metrics::describe_counter!(
        "callmate_escalations_total",
        "Suggestions that recommended supervisor escalation"
    );
    metrics::describe_counter!(
        "callmate_redactions_total",
        "Utterances in which PII was redacted"
    );
    metrics::describe_counter!("callmate_failures_total", "Failed requests by route");
    metrics::describe_counter!("callmate_summaries_total", "Post-call reports generated");
    metrics::describe_counter!("callmate_feedback_total", "Feedback received by verdict");
    metrics::describe_counter!("callmate_consents_total", "Consent decisions recorded");
    metrics::describe_histogram!(
        "callmate_suggest_latency_ms",
        metrics::Unit::Milliseconds,
        "End-to-end suggestion latency"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
