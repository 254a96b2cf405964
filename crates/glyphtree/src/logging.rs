use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

use crate::error::Result;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "glyphtree=debug,glyphtree_core=warn").
///
/// The terminal belongs to the UI while the main loop runs, so anything written to stderr lands
/// in the middle of the screen. Set `file` to send log output there instead.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            write_style: env_logger::WriteStyle::Never,
            file: Some(path.into()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Later calls do nothing and return `Ok`. Fails only if the log file cannot be created.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if let Some(path) = &config.file {
            match File::create(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => {
                    result = Err(e.into());
                    return;
                }
            }
        }

        if let Err(e) = builder.try_init() {
            log::warn!("logger already set elsewhere: {e}");
            return;
        }
        log::debug!("logging initialized");
    });
    result
}
