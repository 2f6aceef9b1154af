use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const THEME_KEY: &str = "theme";
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Font Awesome icon shown on the theme toggle.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "moon",
            Theme::Light => "sun",
        }
    }
}

/// String key-value storage for UI preferences (browser `localStorage` or
/// an in-memory map).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Preferences {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl Preferences {
    /// Anything other than a stored `light` theme means dark; anything other
    /// than a stored `true` means an open sidebar.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let theme = match store.get(THEME_KEY).as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        };
        let sidebar_collapsed = store.get(SIDEBAR_COLLAPSED_KEY).as_deref() == Some("true");
        Preferences {
            theme,
            sidebar_collapsed,
        }
    }

    pub fn toggle_theme(&mut self, store: &mut impl PreferenceStore) -> Result<Theme> {
        self.theme = self.theme.toggled();
        store.set(THEME_KEY, self.theme.as_ref())?;
        Ok(self.theme)
    }

    pub fn toggle_sidebar(&mut self, store: &mut impl PreferenceStore) -> Result<bool> {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        store.set(
            SIDEBAR_COLLAPSED_KEY,
            if self.sidebar_collapsed { "true" } else { "false" },
        )?;
        Ok(self.sidebar_collapsed)
    }

    /// Narrow viewports always collapse the sidebar; wider ones follow the
    /// saved preference.
    pub fn sidebar_collapsed_at(&self, viewport_width: u32, breakpoint_px: u32) -> bool {
        viewport_width <= breakpoint_px || self.sidebar_collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_dark_and_open() {
        let store = MemoryStore::default();
        let preferences = Preferences::load(&store);
        assert_eq!(preferences.theme, Theme::Dark);
        assert!(!preferences.sidebar_collapsed);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        store.set(SIDEBAR_COLLAPSED_KEY, "yes").unwrap();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn test_toggles_persist() {
        let mut store = MemoryStore::default();
        let mut preferences = Preferences::load(&store);

        assert_eq!(preferences.toggle_theme(&mut store).unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(preferences.theme.icon(), "sun");

        assert!(preferences.toggle_sidebar(&mut store).unwrap());
        assert_eq!(store.get(SIDEBAR_COLLAPSED_KEY).as_deref(), Some("true"));

        let reloaded = Preferences::load(&store);
        assert_eq!(reloaded, preferences);

        assert_eq!(preferences.toggle_theme(&mut store).unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert!(!preferences.toggle_sidebar(&mut store).unwrap());
        assert_eq!(store.get(SIDEBAR_COLLAPSED_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_responsive_sidebar() {
        let open = Preferences::default();
        assert!(open.sidebar_collapsed_at(768, 768));
        assert!(open.sidebar_collapsed_at(375, 768));
        assert!(!open.sidebar_collapsed_at(769, 768));

        let collapsed = Preferences {
            sidebar_collapsed: true,
            ..open
        };
        assert!(collapsed.sidebar_collapsed_at(1440, 768));
    }
}
