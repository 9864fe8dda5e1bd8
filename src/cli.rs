//! Command-line argument parsing for the server binary.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--host" => {
                i += 1;
                let host =
                    args.next_or_err(i, "missing value for --host (expected an address)")?;
                if opts.host.replace(host.to_string()).is_some() {
                    return Err("--host provided more than once".to_string());
                }
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if opts.port.replace(port).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                opts.help = true;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("trend-forecast: linear trend analysis and sliding-window forecast service");
    eprintln!();
    eprintln!("Usage: trend-forecast [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>   Load service configuration from a TOML file");
    eprintln!("  --host <addr>     Interface to bind (default: 127.0.0.1)");
    eprintln!("  --port <u16>      Port to bind (default: 5000)");
    eprintln!("  --help            Show this help message");
    eprintln!();
    eprintln!("Log verbosity follows RUST_LOG, falling back to logging.filter from the config.");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_args_use_defaults() {
        let opts = parse_args_from(&[]).expect("parse should succeed");
        assert!(opts.config.is_none());
        assert!(opts.host.is_none());
        assert!(opts.port.is_none());
        assert!(!opts.help);
    }

    #[test]
    fn supports_config_host_and_port() {
        let opts = parse_args_from(&args(&[
            "--config",
            "service.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]))
        .expect("parse should succeed");
        assert_eq!(
            opts.config.as_deref().and_then(|p| p.to_str()),
            Some("service.toml")
        );
        assert_eq!(opts.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(opts.port, Some(8080));
    }

    #[test]
    fn rejects_bad_port() {
        assert!(parse_args_from(&args(&["--port", "99999"])).is_err());
        assert!(parse_args_from(&args(&["--port"])).is_err());
    }

    #[test]
    fn rejects_duplicates_and_unknown_flags() {
        assert!(parse_args_from(&args(&["--port", "1", "--port", "2"])).is_err());
        assert!(parse_args_from(&args(&["--serve"])).is_err());
    }

    #[test]
    fn help_flag_is_reported() {
        let opts = parse_args_from(&args(&["-h"])).expect("parse should succeed");
        assert!(opts.help);
    }
}
