use serde::{Deserialize, Serialize};

use crate::domain::a003_card_item::icon::IconSource;

/// Ключи localStorage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageKeys {
    pub document: String,
    pub display_title: String,
    pub edit_mode: String,
    pub background: String,
    pub background_enabled: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            document: "document".into(),
            display_title: "displayTitle".into(),
            edit_mode: "editModeEnabled".into(),
            background: "customBackground".into(),
            background_enabled: "customBackgroundEnabled".into(),
        }
    }
}

impl StorageKeys {
    pub fn all(&self) -> [&str; 5] {
        [
            &self.document,
            &self.display_title,
            &self.edit_mode,
            &self.background,
            &self.background_enabled,
        ]
    }
}

/// Настройки дашборда
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub default_title: String,
    /// Favicon service, the encoded page url is appended
    pub favicon_endpoint: String,
    pub icon_dir: String,
    pub default_icon: String,
    /// Icon picker value meaning "use the site's own icon"
    pub site_icon_sentinel: String,
    pub icon_catalog: Vec<String>,
    pub card_styles: Vec<String>,
    /// Group name used when bookmark folders are flattened
    pub bookmarks_group_name: String,
    pub notice_timeout_ms: u32,
    /// Writes larger than this are rejected before reaching the browser
    pub storage_limit_bytes: usize,
    pub storage_keys: StorageKeys,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_title: "Web Navigation".into(),
            favicon_endpoint: "https://www.google.com/s2/favicons?domain=".into(),
            icon_dir: "images/web-icon/".into(),
            default_icon: "a-hua1.png".into(),
            site_icon_sentinel: "use-website-icon.png".into(),
            icon_catalog: [
                1, 2, 5, 6, 7, 12, 13, 15, 17, 18, 23, 24, 26, 28, 29, 31, 32, 33, 36, 40,
            ]
            .into_iter()
            .map(|n| format!("a-hua{n}.png"))
            .collect(),
            card_styles: (1..=5).map(|i| format!("card{i}")).collect(),
            bookmarks_group_name: "Chrome Bookmarks".into(),
            notice_timeout_ms: 3000,
            storage_limit_bytes: 5 * 1024 * 1024,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl DashboardConfig {
    pub fn icon_source(&self) -> IconSource {
        IconSource::new(&self.favicon_endpoint, &self.site_icon_sentinel)
    }

    pub fn local_icon_path(&self, name: &str) -> String {
        format!("{}{}", self.icon_dir, name)
    }

    pub fn default_icon_path(&self) -> String {
        self.local_icon_path(&self.default_icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"defaultTitle":"Links"}"#).unwrap();
        assert_eq!(config.default_title, "Links");
        assert_eq!(config.card_styles.len(), 5);
        assert_eq!(config.storage_keys.edit_mode, "editModeEnabled");
    }

    #[test]
    fn test_icon_paths() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_icon_path(), "images/web-icon/a-hua1.png");
        assert_eq!(
            config.icon_source().favicon_url("https://x.test"),
            "https://www.google.com/s2/favicons?domain=https%3A%2F%2Fx.test"
        );
    }
}
