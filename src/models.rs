use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// HTTP methods the backend API uses
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
        }
    }
}

/// Top-level generation behavior
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "RP")]
    Roleplay,
    #[serde(rename = "RP_ART")]
    RoleplayArt,
    #[serde(rename = "ART")]
    Art,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Roleplay, Mode::RoleplayArt, Mode::Art];

    /// Wire value, as the backend spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Roleplay => "RP",
            Mode::RoleplayArt => "RP_ART",
            Mode::Art => "ART",
        }
    }

    pub fn parse(value: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

/// The part of a user record the client may edit and send back.
///
/// Every known field is optional and skipped when absent, and fields the
/// client does not know about are kept in `extra`, so a fetched record
/// posts back in the shape it arrived in. `seed` keeps an explicit
/// `null` apart from a missing key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSettings {
    /// Apply a `[width, height]` resolution preset
    pub fn set_resolution(&mut self, [width, height]: [u32; 2]) {
        self.width = Some(width);
        self.height = Some(height);
    }

    pub fn feature_enabled(&self, name: &str) -> bool {
        self.features
            .as_ref()
            .and_then(|f| f.get(name).copied())
            .unwrap_or(false)
    }
}

/// A present key always lands in `Some`, so `null` becomes `Some(None)`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unix-seconds timestamps that tolerate what the backend actually sends.
///
/// Integers, floats, numeric strings and RFC 3339 strings are read;
/// anything else decodes to `None` instead of failing the whole record.
/// Always written back as integer seconds.
mod lenient_ts {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_i64(dt.timestamp()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(parse(&Value::deserialize(deserializer)?))
    }

    fn from_float(secs: f64) -> Option<DateTime<Utc>> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
    }

    fn parse(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(secs) => DateTime::from_timestamp(secs, 0),
                None => n.as_f64().and_then(from_float),
            },
            Value::String(s) => {
                let s = s.trim();
                s.parse::<f64>().ok().and_then(from_float).or_else(|| {
                    DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                })
            }
            _ => None,
        }
    }
}

/// A user as the backend returns it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub settings: UserSettings,
    pub premium: bool,
    pub quota: f64,
    #[serde(with = "lenient_ts")]
    pub history_timestamp: Option<DateTime<Utc>>,
    #[serde(with = "lenient_ts")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "lenient_ts")]
    pub updated_at: Option<DateTime<Utc>>,
    pub balance: f64,
    pub days: u32,
    pub lang: Option<String>,
}

impl User {
    /// Active locale: the settings value wins over the account value
    pub fn language(&self) -> Option<&str> {
        self.settings
            .lang
            .as_deref()
            .or(self.lang.as_deref())
            .filter(|l| !l.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    pub balance: f64,
    pub quota: f64,
}

/// A single balance movement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    #[serde(default, with = "lenient_ts")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response of `GET /user/{id}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
    #[serde(default)]
    pub balance: Option<Balance>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelFile {
    pub path: Option<String>,
    pub sha256sum: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDownload {
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub files: Vec<ModelFile>,
    pub download: Vec<ModelDownload>,
}

/// A generation model from the catalog, with live worker telemetry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    pub name: String,
    pub baseline: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub inpainting: Option<bool>,
    pub description: String,
    pub showcases: Vec<String>,
    pub version: Option<String>,
    pub style: Option<String>,
    pub homepage: Option<String>,
    pub nsfw: Option<bool>,
    pub download_all: Option<bool>,
    pub config: Option<ModelConfig>,
    pub available: Option<bool>,
    pub size_on_disk_bytes: Option<u64>,
    pub count: Option<u32>,
    pub performance: Option<f64>,
    pub eta: Option<f64>,
    pub jobs: Option<f64>,
}

impl Model {
    pub fn named(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A localized text entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

/// Localized site text for one language, keyed by UI-text key
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(BTreeMap<String, ContentValue>);

impl Content {
    pub fn get(&self, key: &str) -> Option<&ContentValue> {
        self.0.get(key)
    }

    /// String entry for `key`; `None` if absent or not a string
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ContentValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(ContentValue::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ContentValue) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Content {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Content(
            iter.into_iter()
                .map(|(k, v)| (k.into(), ContentValue::Text(v.into())))
                .collect(),
        )
    }
}

/// Response body of `POST /dry_run`, plus the status it came with
#[derive(Clone, Debug, PartialEq)]
pub struct DryRunOutcome {
    pub status: u16,
    pub kudos: Option<f64>,
}

impl DryRunOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_keep_unknown_fields() {
        let raw = json!({
            "mode": "RP_ART",
            "model": "Juggernaut",
            "width": 832,
            "height": 1472,
            "seed": null,
            "steps": 30,
            "cfg_scale": 7.5,
            "negative_prompt": "blurry",
            "features": {"hires_fix": true},
            "lang": "ru",
            "sampler": "k_euler"
        });
        let settings: UserSettings = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(settings.mode, Some(Mode::RoleplayArt));
        assert_eq!(settings.seed, Some(None));
        assert!(settings.feature_enabled("hires_fix"));
        assert!(!settings.feature_enabled("upscale"));
        assert_eq!(serde_json::to_value(&settings).unwrap(), raw);
    }

    #[test]
    fn test_partial_settings_post_back_unchanged() {
        let raw = json!({"mode": "RP", "model": "A"});
        let settings: UserSettings = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(settings.width, None);
        assert_eq!(settings.seed, None);
        assert!(!settings.feature_enabled("hires_fix"));
        assert_eq!(serde_json::to_value(&settings).unwrap(), raw);

        let empty: UserSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    #[test]
    fn test_timestamps_accept_floats_and_strings() {
        let data: UserData = serde_json::from_value(json!({
            "user": {
                "id": 1,
                "history_timestamp": 1_700_000_000.5,
                "created_at": "1700000100",
                "updated_at": "2023-11-14T22:13:20Z"
            },
            "expenses": [
                {"amount": 2.0, "timestamp": 1_700_000_200.25},
                {"amount": 1.0, "timestamp": "soon"}
            ]
        }))
        .unwrap();
        let user = &data.user;
        let history = user.history_timestamp.unwrap();
        assert_eq!(history.timestamp(), 1_700_000_000);
        assert_eq!(history.timestamp_subsec_millis(), 500);
        assert_eq!(user.created_at.unwrap().timestamp(), 1_700_000_100);
        assert_eq!(user.updated_at.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(data.expenses[0].timestamp.unwrap().timestamp(), 1_700_000_200);
        assert!(data.expenses[1].timestamp.is_none());

        let back = serde_json::to_value(user).unwrap();
        assert_eq!(back["history_timestamp"], json!(1_700_000_000));
    }

    #[test]
    fn test_user_decodes_with_missing_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "anna",
            "lang": "uk",
            "created_at": 1_700_000_000
        }))
        .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.language(), Some("uk"));
        assert_eq!(user.created_at.unwrap().timestamp(), 1_700_000_000);
        assert!(user.history_timestamp.is_none());
    }

    #[test]
    fn test_settings_language_wins() {
        let mut user = User {
            lang: Some("uk".into()),
            ..Default::default()
        };
        user.settings.lang = Some("de".into());
        assert_eq!(user.language(), Some("de"));
    }

    #[test]
    fn test_model_type_field() {
        let model: Model = serde_json::from_value(json!({
            "name": "A",
            "type": "ckpt",
            "nsfw": false,
            "config": {"files": [{"path": "a.safetensors"}]}
        }))
        .unwrap();
        assert_eq!(model.kind.as_deref(), Some("ckpt"));
        assert_eq!(model.config.unwrap().files.len(), 1);
    }

    #[test]
    fn test_content_values() {
        let content: Content = serde_json::from_value(json!({
            "menu_main": "Главная",
            "tips": ["one", "two"],
            "version": 3
        }))
        .unwrap();
        assert_eq!(content.text("menu_main"), Some("Главная"));
        assert_eq!(content.list("tips").map(|l| l.len()), Some(2));
        assert_eq!(content.text("tips"), None);
        assert!(matches!(content.get("version"), Some(ContentValue::Other(_))));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("ART"), Some(Mode::Art));
        assert_eq!(Mode::parse("art"), None);
    }
}
