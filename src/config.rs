use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::loader::{DataFormat, DataSource};

/// Command line / environment options.
#[derive(Debug, Clone, Parser)]
#[command(name = "periodic-explorer", version, about = "Interactive periodic table explorer")]
pub struct Cli {
    /// Element table to load: a .json or .csv path, or an http(s) URL.
    /// The bundled table is used when omitted.
    #[arg(long, short, env = "PERIODIC_DATA")]
    pub data: Option<String>,

    /// Timeout for remote tables, in seconds.
    #[arg(
        long = "timeout",
        env = "PERIODIC_TIMEOUT",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_seconds: u64,

    /// Initial window width.
    #[arg(long, default_value_t = 1400.0)]
    pub width: f32,

    /// Initial window height.
    #[arg(long, default_value_t = 860.0)]
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
    pub timeout: Duration,
    pub window_size: [f32; 2],
}

impl Config {
    /// Resolve CLI options. Local paths with an unsupported extension are
    /// rejected here rather than after the window opens.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let source = match cli.data.as_deref() {
            None | Some("") => DataSource::Bundled,
            Some(location) => DataSource::parse(location),
        };
        if let DataSource::File(path) = &source {
            DataFormat::from_path(path)
                .with_context(|| format!("--data {}", path.display()))?;
        }

        Ok(Config {
            source,
            timeout: Duration::from_secs(cli.timeout_seconds),
            window_size: [cli.width, cli.height],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("periodic-explorer").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn url_and_timeout_are_honoured() {
        let config = Config::from_cli(parse(&[
            "--data",
            "https://example.org/elements.json",
            "--timeout",
            "3",
        ]))
        .unwrap();
        assert_eq!(
            config.source,
            DataSource::Url("https://example.org/elements.json".to_string())
        );
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn unsupported_file_extension_is_rejected() {
        let err = Config::from_cli(parse(&["--data", "table.xml"])).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported file extension"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["periodic-explorer", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
