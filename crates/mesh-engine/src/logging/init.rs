use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g.
/// `"info,mesh_engine=debug,wgpu_core=warn"`. When unset, `RUST_LOG` is
/// consulted, then [`LoggingConfig::default_filter`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_filter: String,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            // wgpu is chatty at info.
            default_filter: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".to_string(),
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or(config.default_filter);

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .init();

        log::debug!("logging initialized ({filter})");
    });
}
