//! Logging setup using tracing.

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How the CLI should emit its spans and events.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Write formatted events to stderr.
    pub print: bool,
    /// Default level when `RUST_LOG` is unset.
    pub level: Level,
    /// Attach source file and line to each event.
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            print: false,
            level: Level::INFO,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Config for the CLI. `verbose` forces `debug` with locations; otherwise
    /// the configured level is used and printing is on only if one was set.
    ///
    /// An unparseable configured level falls back to `info`.
    pub fn for_cli(verbose: bool, configured: Option<&str>) -> Self {
        let level = if verbose {
            Level::DEBUG
        } else {
            configured
                .and_then(|s| s.parse::<Level>().ok())
                .unwrap_or(Level::INFO)
        };

        Self {
            print: verbose || configured.is_some(),
            level,
            include_location: verbose,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy()
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives take precedence over `config.level`. Only the first
/// call installs anything.
pub fn init(config: LogConfig) {
    let registry = tracing_subscriber::registry().with(config.filter());

    let installed = if config.print {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init()
    } else {
        registry.try_init()
    };

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Subscriber already set");
    }
}
