//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` when it is set and from the `-v` count
//! otherwise. `PARTIQ_LOG_FORMAT=json` switches to JSON output. Log output
//! goes to stderr so `--json` summaries on stdout stay parseable.

use partiq_compile::DIAGNOSTIC_TARGET;
use tracing_subscriber::EnvFilter;

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output.
    Console,
    /// JSON structured logging.
    Json,
}

impl TracingFormat {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => TracingFormat::Json,
            _ => TracingFormat::Console,
        }
    }
}

/// Tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter directives (e.g. `warn,partiq::diag=info`).
    pub filter: String,
    /// Directives derived from `-v`, used when `filter` does not parse.
    pub fallback: String,
    /// Output format.
    pub format: TracingFormat,
}

impl TracingConfig {
    /// Create config from the environment and the CLI verbosity.
    ///
    /// Environment variables:
    /// - `RUST_LOG`: filter directives, overriding `-v`
    /// - `PARTIQ_LOG_FORMAT`: "console" or "json" (default: "console")
    pub fn from_env(verbose: u8, diagnostics: bool) -> Self {
        Self::resolve(
            std::env::var("RUST_LOG").ok(),
            std::env::var("PARTIQ_LOG_FORMAT").ok(),
            verbose,
            diagnostics,
        )
    }

    /// Build the config from already-read settings.
    ///
    /// When `diagnostics` is set and `RUST_LOG` is not, diagnostic records
    /// are enabled at `info` even if the base level is `warn`.
    pub fn resolve(
        rust_log: Option<String>,
        format: Option<String>,
        verbose: u8,
        diagnostics: bool,
    ) -> Self {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let fallback = if diagnostics && verbose == 0 {
            format!("{level},{DIAGNOSTIC_TARGET}=info")
        } else {
            level.to_string()
        };

        let filter = rust_log
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| fallback.clone());

        Self {
            filter,
            fallback,
            format: TracingFormat::parse(format.as_deref()),
        }
    }

    /// Parse the filter, falling back to the `-v` directives when it is
    /// malformed. The parse error is returned alongside so it can be shown.
    pub fn env_filter(&self) -> (EnvFilter, Option<String>) {
        match EnvFilter::try_new(&self.filter) {
            Ok(filter) => (filter, None),
            Err(e) => (
                EnvFilter::new(&self.fallback),
                Some(format!("ignoring invalid RUST_LOG '{}': {e}", self.filter)),
            ),
        }
    }

    /// Install the global subscriber.
    pub fn init(self) {
        let (env_filter, warning) = self.env_filter();

        match self.format {
            TracingFormat::Console => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init(),
            TracingFormat::Json => tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .json()
                .init(),
        }

        if let Some(warning) = warning {
            tracing::warn!("{warning}");
        }
    }
}
