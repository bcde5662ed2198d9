//! Configuration file loader for gptc.
//!
//! Reads `gptc.toml` (from the working directory unless `--config` points
//! elsewhere) and deserializes it into [`ChatConfig`]. Falls back to defaults
//! when the file is missing or malformed.

use std::path::Path;

use gptc_types::config::ChatConfig;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "gptc.toml";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_chat_config(path: &Path) -> ChatConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return ChatConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ChatConfig::default();
        }
    };

    match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ChatConfig::default()
        }
    }
}
