//! trend-forecast entry point: CLI wiring, config loading, and server startup.

use std::net::{IpAddr, SocketAddr};
use std::process;
use std::sync::Arc;

use tracing::info;

use trend_forecast::api::{self, AppState};
use trend_forecast::cli::{self, CliOptions};
use trend_forecast::config::ServiceConfig;
use trend_forecast::telemetry;

/// Loads the config file (or defaults) and applies CLI overrides.
fn load_config(cli: &CliOptions) -> Result<ServiceConfig, String> {
    let mut config = match cli.config {
        Some(ref path) => ServiceConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => ServiceConfig::default(),
    };

    if let Some(ref host) = cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(joined.join("\n"));
    }

    Ok(config)
}

fn bind_addr(config: &ServiceConfig) -> Result<SocketAddr, String> {
    let ip: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| format!("config error: server.host: \"{}\": {e}", config.server.host))?;
    Ok(SocketAddr::new(ip, config.server.port))
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        process::exit(0);
    }

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Err(e) = telemetry::init_logging(&config.logging.filter) {
        eprintln!("warning: logging already initialised: {e}");
    }

    let addr = bind_addr(&config).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    info!(
        window_size = config.analysis.window_size,
        future_points = config.analysis.future_points,
        test_fraction = config.analysis.test_fraction,
        seed = config.analysis.seed,
        "trend-forecast v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let state = Arc::new(AppState {
        analysis: config.analysis,
    });
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(api::serve(state, addr)) {
        eprintln!("error: server failed on {addr}: {e}");
        process::exit(1);
    }
}
