//! Tracing and logging plugin.
//!
//! Provides [`TracingPlugin`] which configures the `tracing` subscriber and
//! exposes configuration as a global.
//!
//! # Lifecycle
//!
//! - **`build()`** inserts the [`TracingConfig`] global so other plugins can
//!   read the intended configuration during build.
//! - **`ready()`** installs the subscriber and writes the mod's load line.
//!   Installation is deferred so group configuration applies first, and it
//!   never replaces a subscriber the host already installed.
//! - **`cleanup()`** writes the mod's dispose line.
//!
//! # Example
//!
//! ```
//! use modgate_core_plugins::{ModInfoPlugin, TracingFormat, TracingPlugin};
//! use modgate_system::host::ModHost;
//! use tracing::Level;
//!
//! let mut host = ModHost::new();
//! host.add_plugins(ModInfoPlugin::new("Your Mod Name", "1.0.0"));
//! host.add_plugins(
//!     TracingPlugin::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact),
//! );
//! host.finish();
//! ```

use crate::mod_info::{ModInfo, ModInfoPlugin};
use modgate_system::host::ModHost;
use modgate_system::plugin::{Plugin, PluginId};
use modgate_system::resource::GlobalResource;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output, closest to a game log file.
    Compact,
    /// JSON structured output.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing configuration global.
///
/// Systems can read this to skip building expensive debug output.
///
/// ```ignore
/// if host.get_global::<TracingConfig>().is_some_and(|c| c.level >= Level::DEBUG) {
///     tracing::debug!(state = ?expensive_dump(), "frame state");
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    /// The configured log level.
    pub level: Level,
    /// The configured output format.
    pub format: TracingFormat,
}

impl GlobalResource for TracingConfig {}

// ─────────────────────────────────────────────────────────────────────────────
// TracingPlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing and logging plugin.
///
/// # Globals Provided
///
/// | Global | Description |
/// |--------|-------------|
/// | [`TracingConfig`] | Tracing configuration (read-only) |
///
/// # Dependencies
///
/// - [`ModInfoPlugin`]
///
/// # Environment Filter
///
/// Use `with_env_filter` to set target-specific log levels:
///
/// ```
/// use modgate_core_plugins::TracingPlugin;
///
/// TracingPlugin::default()
///     .with_env_filter("modgate_lifecycle=debug,modgate_system=warn")
/// # ;
/// ```
#[derive(Debug, Clone)]
pub struct TracingPlugin {
    level: Level,
    format: TracingFormat,
    /// Environment filter (e.g., `"modgate_lifecycle=debug"`).
    env_filter: Option<String>,
    /// Whether to include span enter/exit events.
    span_events: bool,
}

impl Default for TracingPlugin {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingPlugin {
    /// Creates a new `TracingPlugin` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`. An unparsable filter falls
    /// back to the plain level.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }
}

impl Plugin for TracingPlugin {
    fn build(&self, host: &mut ModHost) {
        host.insert_global(TracingConfig {
            level: self.level,
            format: self.format,
        });
    }

    fn ready(&self, host: &mut ModHost) {
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        // try_init().ok() keeps a subscriber the host already installed.
        match self.format {
            TracingFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(self.filter())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            TracingFormat::Compact => {
                tracing_subscriber::registry()
                    .with(self.filter())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            TracingFormat::Json => {
                tracing_subscriber::registry()
                    .with(self.filter())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
        }

        if let Some(info) = host.get_global::<ModInfo>() {
            tracing::info!(
                version = %info.version,
                framework = info.framework_version,
                debug = info.debug,
                "{} {} OnLoad",
                info.name,
                info.version
            );
        }
    }

    fn cleanup(&self, host: &mut ModHost) {
        if let Some(info) = host.get_global::<ModInfo>() {
            tracing::info!("{} OnDispose", info.name);
        }
    }

    fn name(&self) -> &str {
        "TracingPlugin"
    }

    fn dependencies(&self) -> Vec<PluginId> {
        vec![PluginId::of::<ModInfoPlugin>()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_format_default_is_pretty() {
        assert_eq!(TracingFormat::default(), TracingFormat::Pretty);
    }

    #[test]
    fn tracing_plugin_builders() {
        let plugin = TracingPlugin::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Json)
            .with_env_filter("modgate_lifecycle=debug")
            .with_span_events(true);

        assert_eq!(plugin.level, Level::DEBUG);
        assert_eq!(plugin.format, TracingFormat::Json);
        assert_eq!(plugin.env_filter.as_deref(), Some("modgate_lifecycle=debug"));
        assert!(plugin.span_events);
    }

    #[test]
    fn tracing_plugin_registers_config() {
        let mut host = ModHost::new();
        host.add_plugins(ModInfoPlugin::default());
        host.add_plugins(TracingPlugin::default().with_format(TracingFormat::Compact));
        host.finish();

        let config = host.get_global::<TracingConfig>().unwrap();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, TracingFormat::Compact);
    }

    #[test]
    #[should_panic(expected = "requires")]
    fn tracing_plugin_requires_mod_info() {
        let mut host = ModHost::new();
        host.add_plugins(TracingPlugin::default());
        host.finish();
    }
}
