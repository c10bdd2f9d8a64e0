use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Dashboard, Data, Server, Settings};

/// Loads the application configuration.
///
/// Reads the given TOML file when it exists, then applies `SALESBOARD_*`
/// environment overrides (e.g. `SALESBOARD_SERVER__PORT=8080`). A missing
/// file is not an error, since every setting has a default.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("SALESBOARD").separator("__"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    if settings.data.sales_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.sales_file must not be empty".to_string(),
        ));
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load_settings(Path::new("no-such-config.toml")).unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(
            settings.data.sales_file.to_string_lossy(),
            "data/sales_data.csv"
        );
        assert!(settings.dashboard.colors.contains_key("primary"));
    }
}
