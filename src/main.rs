/// Resolve timestamps to their as-of business day
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bizday::{
    config::{build_resolver, load_config},
    utils::{exchange_now, jul_date, parse_timestamp},
    Config, Resolution,
};

#[derive(Parser, Debug)]
#[command(name = "bizday")]
#[command(about = "Resolve timestamps to the as-of business day", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// Print one JSON object per resolution
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Exchange-local timestamps (YYYY-MM-DD[THH:MM[:SS]]); defaults to now
    timestamps: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path))?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let resolver = build_resolver(&config)?;

    let inputs = if cli.timestamps.is_empty() {
        let now = exchange_now();
        info!("No timestamp given, using exchange time {}", now);
        vec![now]
    } else {
        cli.timestamps
            .iter()
            .map(|s| parse_timestamp(s))
            .collect::<bizday::Result<Vec<_>>>()?
    };

    for input in inputs {
        let business_day = match resolver.get_business_day(input) {
            Ok(day) => day,
            Err(e) => {
                error!("Resolving {} failed: {} ({})", input, e, e.error_code());
                return Err(e.into());
            }
        };

        let resolution = Resolution {
            input,
            business_day,
            julian_date: jul_date(business_day),
        };

        if cli.json {
            println!("{}", resolution.to_json()?);
        } else {
            println!("{} -> {}", resolution.input, resolution.business_day);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["bizday", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_config_equals_form() {
        let cli = Cli::try_parse_from(["bizday", "--config=bizday.toml", "--json", "2023-12-25"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some("bizday.toml"));
        assert!(cli.json);
        assert_eq!(cli.timestamps, vec!["2023-12-25".to_string()]);
    }

    #[test]
    fn test_timestamps_are_positional() {
        let cli = Cli::try_parse_from(["bizday", "2024-01-02", "2024-03-11T07:45"]).unwrap();
        assert!(!cli.json);
        assert_eq!(cli.timestamps.len(), 2);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Cli::try_parse_from(["bizday", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
