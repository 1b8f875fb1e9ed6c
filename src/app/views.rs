//! Derived projections over [`AppState`].
//!
//! Every function here is pure: it reads raw state (or nothing at all)
//! and builds a fresh value. Nothing is cached.

use serde::Serialize;

use crate::app::state::AppState;
use crate::models::{Content, Mode};

/// Content keys of the tab labels, in tab order: main, models, settings, profile
const TAB_KEYS: [(&str, &str); 4] = [
    ("menu_main", "Description"),
    ("menu_models", "Models"),
    ("menu_settings", "Settings"),
    ("menu_profile", "Profile"),
];

/// Labels shown before any content has loaded
const FALLBACK_TABS: [&str; 4] = ["Profile", "Description", "Models", "Settings"];

/// A selectable mode with its display label
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModeOption {
    pub label: String,
    pub value: Mode,
}

/// An aspect-ratio preset, `value` is `[width, height]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub label: &'static str,
    pub value: [u32; 2],
}

/// A language selector entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub label: &'static str,
    pub value: &'static str,
}

static RESOLUTIONS: [Resolution; 5] = [
    Resolution { label: "1:2", value: [768, 1536] },
    Resolution { label: "9:16", value: [832, 1472] },
    Resolution { label: "2:3", value: [896, 1344] },
    Resolution { label: "3:4", value: [960, 1280] },
    Resolution { label: "1:1", value: [1024, 1024] },
];

static LANGUAGES: [(&str, &str); 25] = [
    ("🇷🇺 Русский", "ru"),
    ("🇺🇸 English", "en"),
    ("🇺🇦 Українська", "uk"),
    ("🇧🇾 Беларуская", "be"),
    ("🇧🇬 Български", "bg"),
    ("🇷🇸 Српски", "sr"),
    ("🇪🇸 Español", "es"),
    ("🇫🇷 Français", "fr"),
    ("🇮🇹 Italiano", "it"),
    ("🇵🇹 Português", "pt"),
    ("🇩🇪 Deutsch", "de"),
    ("🇹🇷 Türkçe", "tr"),
    ("🇷🇴 Română", "ro"),
    ("🇵🇱 Polski", "pl"),
    ("🇬🇷 Νέα Ελληνικά", "el"),
    ("🇬🇪 ქართული", "ka"),
    ("🇨🇳 中文", "zh"),
    ("🇮🇳 हिन्दी", "hi"),
    ("🇸🇦 العربية", "ar"),
    ("🇧🇩 বাংলা", "bn"),
    ("🇯🇵 日本語", "ja"),
    ("🇰🇷 한국어", "ko"),
    ("🇻🇳 Tiếng Việt", "vi"),
    ("🇹🇭 ไทย", "th"),
    ("🇲🇲 မြန်မာစာ", "my"),
];

/// Model names in catalog order
pub fn model_names(state: &AppState) -> Vec<String> {
    state.models.iter().map(|m| m.name.clone()).collect()
}

/// The four tab labels.
///
/// With content loaded they follow tab order, each missing key falling
/// back to its own English label. Without content the fixed
/// `FALLBACK_TABS` list is returned as is.
pub fn tab_headers(content: Option<&Content>) -> Vec<String> {
    let Some(content) = content else {
        return FALLBACK_TABS.iter().map(|t| t.to_string()).collect();
    };
    TAB_KEYS
        .iter()
        .map(|(key, fallback)| localized(Some(content), key, fallback))
        .collect()
}

/// The three generation modes with their labels
pub fn modes(content: Option<&Content>) -> Vec<ModeOption> {
    Mode::ALL
        .into_iter()
        .map(|mode| {
            let (key, fallback) = mode_label_key(mode);
            ModeOption {
                label: localized(content, key, fallback),
                value: mode,
            }
        })
        .collect()
}

fn mode_label_key(mode: Mode) -> (&'static str, &'static str) {
    match mode {
        Mode::Roleplay => ("settings_mode_RP", "Roleplay"),
        Mode::RoleplayArt => ("settings_mode_RPART", "Roleplay and art"),
        Mode::Art => ("settings_mode_ART", "Art"),
    }
}

fn localized(content: Option<&Content>, key: &str, fallback: &str) -> String {
    content
        .and_then(|c| c.text(key))
        .unwrap_or(fallback)
        .to_string()
}

/// Fixed resolution presets, tallest first
pub fn resolutions() -> &'static [Resolution] {
    &RESOLUTIONS
}

/// Preset whose dimensions match exactly, if any
pub fn find_resolution(width: u32, height: u32) -> Option<&'static Resolution> {
    RESOLUTIONS.iter().find(|r| r.value == [width, height])
}

/// Display names of the supported locales
pub fn languages() -> Vec<&'static str> {
    LANGUAGES.iter().map(|(label, _)| *label).collect()
}

/// Supported locales as label/code pairs
pub fn language_objects() -> Vec<LanguageOption> {
    LANGUAGES
        .iter()
        .map(|&(label, value)| LanguageOption { label, value })
        .collect()
}

pub fn is_supported_language(code: &str) -> bool {
    LANGUAGES.iter().any(|(_, c)| *c == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentValue, Model};

    #[test]
    fn test_default_modes() {
        let labels: Vec<_> = modes(None)
            .into_iter()
            .map(|m| (m.label, m.value.as_str()))
            .collect();
        assert_eq!(
            labels,
            [
                ("Roleplay".to_string(), "RP"),
                ("Roleplay and art".to_string(), "RP_ART"),
                ("Art".to_string(), "ART"),
            ]
        );
    }

    #[test]
    fn test_modes_serialize_like_backend() {
        let json = serde_json::to_value(modes(None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"label": "Roleplay", "value": "RP"},
                {"label": "Roleplay and art", "value": "RP_ART"},
                {"label": "Art", "value": "ART"}
            ])
        );
    }

    #[test]
    fn test_localized_tabs_and_modes() {
        let content: Content = [
            ("menu_main", "Главная"),
            ("menu_models", "Модели"),
            ("menu_settings", "Настройки"),
            ("menu_profile", "Профиль"),
            ("settings_mode_RP", "Ролевая игра"),
            ("settings_mode_RPART", "Ролевая игра и арт"),
            ("settings_mode_ART", "Арт"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            tab_headers(Some(&content)),
            ["Главная", "Модели", "Настройки", "Профиль"]
        );
        let modes = modes(Some(&content));
        assert_eq!(modes[1].label, "Ролевая игра и арт");
        assert_eq!(modes[1].value, Mode::RoleplayArt);
    }

    #[test]
    fn test_missing_keys_fall_back() {
        let mut content: Content = [("menu_models", "Modelle")].into_iter().collect();
        content.insert("menu_main", ContentValue::List(vec!["x".into()]));

        assert_eq!(
            tab_headers(Some(&content)),
            ["Description", "Modelle", "Settings", "Profile"]
        );
        assert_eq!(modes(Some(&content)), modes(None));
        assert_eq!(modes(Some(&Content::default()))[2].label, "Art");
    }

    #[test]
    fn test_fallback_tabs() {
        assert_eq!(
            tab_headers(None),
            ["Profile", "Description", "Models", "Settings"]
        );
        // loaded but empty content keeps tab order
        assert_eq!(
            tab_headers(Some(&Content::default())),
            ["Description", "Models", "Settings", "Profile"]
        );
    }

    #[test]
    fn test_resolutions_fixed() {
        let presets: Vec<_> = resolutions().iter().map(|r| (r.label, r.value)).collect();
        assert_eq!(
            presets,
            [
                ("1:2", [768, 1536]),
                ("9:16", [832, 1472]),
                ("2:3", [896, 1344]),
                ("3:4", [960, 1280]),
                ("1:1", [1024, 1024]),
            ]
        );
        assert_eq!(find_resolution(896, 1344).map(|r| r.label), Some("2:3"));
        assert!(find_resolution(512, 512).is_none());
    }

    #[test]
    fn test_model_names_order() {
        let mut state = AppState::new(1, "en");
        state.models = vec![Model::named("A"), Model::named("B")];
        assert_eq!(model_names(&state), ["A", "B"]);
    }

    #[test]
    fn test_language_catalog() {
        let langs = language_objects();
        assert_eq!(langs.len(), 25);
        assert_eq!(langs[0], LanguageOption { label: "🇷🇺 Русский", value: "ru" });
        assert_eq!(langs[24].value, "my");
        assert_eq!(languages()[1], "🇺🇸 English");
        assert!(is_supported_language("ka"));
        assert!(!is_supported_language("xx"));
    }
}
