//! Light/dark theme, persisted in local storage on the web.

use dioxus::prelude::*;

use crate::icons::{FaMoon, FaSun};
use crate::Icon;

const STORAGE_KEY: &str = "openlab-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Context wrapper so the theme signal is not confused with other `Signal<Theme>`s.
#[derive(Clone, Copy)]
pub struct ThemeSignal(pub Signal<Theme>);

pub fn use_theme_provider() -> ThemeSignal {
    let theme = use_signal(load_theme_from_storage);
    use_effect(move || apply_theme(theme()));
    use_context_provider(|| ThemeSignal(theme))
}

#[cfg(target_arch = "wasm32")]
pub fn load_theme_from_storage() -> Theme {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
        .and_then(|v| Theme::parse(&v))
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_theme_from_storage() -> Theme {
    Theme::default()
}

/// Set `data-theme` on the document root and remember the choice.
#[cfg(target_arch = "wasm32")]
pub fn apply_theme(theme: Theme) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(STORAGE_KEY, theme.as_str());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn apply_theme(theme: Theme) {
    tracing::debug!(key = STORAGE_KEY, theme = theme.as_str(), "theme applied");
}

#[component]
pub fn ThemeToggle() -> Element {
    let ThemeSignal(mut theme) = use_context::<ThemeSignal>();
    let dark = theme() == Theme::Dark;

    rsx! {
        button {
            class: "theme-toggle",
            title: if dark { "Modo claro" } else { "Modo oscuro" },
            onclick: move |_| {
                let next = theme().toggled();
                theme.set(next);
            },
            if dark {
                Icon { icon: FaSun, width: 16, height: 16 }
            } else {
                Icon { icon: FaMoon, width: 16, height: 16 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
