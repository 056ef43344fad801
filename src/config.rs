use rocket::figment::Figment;
use serde::Deserialize;

use std::path::PathBuf;

use crate::internal_error::InternalResult;
use crate::todo::data::{Settings, Theme};

pub const CONFIG_KEY: &str = "planner";

/// Application settings read from the `planner` table of Rocket's configuration,
/// e.g. `[default.planner]` in `Rocket.toml`. Every field has a default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub host_page: PathBuf,
    pub static_dir: PathBuf,
    pub mount_target: String,
    pub default_theme: Theme,
    pub auto_delete_completed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host_page: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/web/index.html")),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/web")),
            mount_target: "app".to_string(),
            default_theme: Theme::Default,
            auto_delete_completed: false,
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> InternalResult<AppConfig> {
        Ok(figment.focus(CONFIG_KEY).extract()?)
    }

    pub fn initial_settings(&self) -> Settings {
        Settings {
            theme: self.default_theme,
            auto_delete_completed: self.auto_delete_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::figment::providers::{Format, Serialized, Toml};

    #[test]
    fn missing_table_gives_defaults() {
        let figment = Figment::new();

        assert_eq!(AppConfig::from_figment(&figment).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_the_planner_table() {
        let figment = Figment::from(Toml::string(
            r#"
            [planner]
            mount_target = "root"
            default_theme = "forest"
            auto_delete_completed = true
            "#,
        ));

        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.mount_target, "root");
        assert_eq!(config.initial_settings().theme, Theme::Forest);
        assert!(config.initial_settings().auto_delete_completed);
        assert_eq!(config.host_page, AppConfig::default().host_page);
    }

    #[test]
    fn unknown_theme_is_a_configuration_error() {
        let figment = Figment::from(Serialized::default(
            "planner",
            serde_json::json!({ "default_theme": "neon" }),
        ));

        assert!(AppConfig::from_figment(&figment).is_err());
    }
}
