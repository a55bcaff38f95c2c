//! Logger setup. Everything else logs through the `log` facade.

use std::sync::Once;

// ------------------------------------------------------------

/// `env_filter` follows the `env_logger` filter syntax, e.g. "info" or
/// "learnopengl_triangle=debug".
#[derive(Debug, Clone)]
pub struct LoggingConfig
{
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle
}

impl Default for LoggingConfig
{
    fn default() -> Self
    {
        Self
        {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Calls after the first are ignored.
pub fn init_logging(config: LoggingConfig) -> ()
{
    INIT.call_once
    (
        ||
        {
            let mut builder = env_logger::Builder::new();
            match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok())
            {
                Some(filter) => builder.parse_filters(&filter),
                None => builder.filter_level(log::LevelFilter::Info)
            };
            builder.write_style(config.write_style);
            if builder.try_init().is_ok()
            {
                log::debug!("logging initialized");
            }
        }
    )
}

// ------------------------------------------------------------
