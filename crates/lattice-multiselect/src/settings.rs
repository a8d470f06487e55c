//! Widget configuration.
//!
//! [`Settings`] is a flat set of named options, all optional. It can be
//! built in code with [`Settings::builder`] or read from loosely-typed JSON
//! with [`Settings::from_json_str`] / [`Settings::from_value`].
//!
//! JSON parsing never rejects a value: anything malformed falls back to the
//! option's default and is logged. Keys may be written in `snake_case` or
//! `camelCase`; unknown keys are ignored.
//!
//! ```
//! use lattice_multiselect::settings::Settings;
//!
//! let settings = Settings::from_json_str(r#"{
//!     "enableSearch": true,
//!     "limit": "3",
//!     "hide_empty_groups": true
//! }"#).unwrap();
//!
//! assert_eq!(settings.limit.get(), Some(3));
//! assert!(settings.hide_empty_groups);
//! ```

use lattice_multiselect_core::logging::targets;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SettingsResult;
use crate::limit::SelectionLimit;

/// Placeholder (and title) of the search box when none is configured.
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

/// Per-widget configuration, fixed once the widget is attached.
///
/// Deserializing goes through [`Settings::from_value`], so it never fails on
/// malformed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Show the search box and filter the available pane.
    pub enable_search: bool,
    /// Placeholder and title of the search box.
    pub search_placeholder: String,
    /// Caption of the available pane.
    pub non_selected_header: Option<String>,
    /// Caption of the selected pane.
    pub selected_header: Option<String>,
    /// Maximum number of selected options.
    pub limit: SelectionLimit,
    /// Hide group nodes that have no rows after filtering.
    pub hide_empty_groups: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_search: true,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            non_selected_header: None,
            selected_header: None,
            limit: SelectionLimit::Unlimited,
            hide_empty_groups: false,
        }
    }
}

impl Settings {
    /// Starts a builder from the defaults.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`](crate::SettingsError::Parse) only if the text is not valid JSON.
    /// Malformed values inside valid JSON fall back to defaults.
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Reads settings from a JSON value, replacing malformed entries with
    /// their defaults.
    pub fn from_value(value: &Value) -> Self {
        let mut settings = Self::default();

        let object = match value {
            Value::Object(object) => object,
            Value::Null => return settings,
            other => {
                tracing::warn!(target: targets::SETTINGS, value = %other, "settings are not an object, using defaults");
                return settings;
            }
        };

        let lookup = |snake: &'static str, camel: &'static str| {
            object.get(snake).or_else(|| object.get(camel)).map(|v| (snake, v))
        };

        if let Some((key, v)) = lookup("enable_search", "enableSearch") {
            settings.enable_search = read_bool(key, v).unwrap_or(settings.enable_search);
        }
        if let Some((key, v)) = lookup("search_placeholder", "searchPlaceholder") {
            if let Some(text) = read_string(key, v) {
                settings.search_placeholder = text;
            }
        }
        if let Some((key, v)) = lookup("non_selected_header", "nonSelectedHeader") {
            settings.non_selected_header = read_string(key, v);
        }
        if let Some((key, v)) = lookup("selected_header", "selectedHeader") {
            settings.selected_header = read_string(key, v);
        }
        if let Some((_, v)) = lookup("limit", "limit") {
            settings.limit = parse_limit(v);
        }
        if let Some((key, v)) = lookup("hide_empty_groups", "hideEmptyGroups") {
            settings.hide_empty_groups = read_bool(key, v).unwrap_or(settings.hide_empty_groups);
        }

        settings
    }

    /// Both pane captions, if both are configured and non-empty.
    pub fn headers(&self) -> Option<(&str, &str)> {
        fn caption(header: &Option<String>) -> Option<&str> {
            header.as_deref().filter(|h| !h.is_empty())
        }
        Some((caption(&self.non_selected_header)?, caption(&self.selected_header)?))
    }

    /// Returns `true` if both pane captions are configured.
    pub fn has_headers(&self) -> bool {
        self.headers().is_some()
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Shows or hides the search box.
    pub fn enable_search(mut self, enable: bool) -> Self {
        self.settings.enable_search = enable;
        self
    }

    /// Sets the search box placeholder.
    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.settings.search_placeholder = placeholder.into();
        self
    }

    /// Sets both pane captions.
    pub fn headers(mut self, non_selected: impl Into<String>, selected: impl Into<String>) -> Self {
        self.settings.non_selected_header = Some(non_selected.into());
        self.settings.selected_header = Some(selected.into());
        self
    }

    /// Sets the caption of the available pane.
    pub fn non_selected_header(mut self, header: impl Into<String>) -> Self {
        self.settings.non_selected_header = Some(header.into());
        self
    }

    /// Sets the caption of the selected pane.
    pub fn selected_header(mut self, header: impl Into<String>) -> Self {
        self.settings.selected_header = Some(header.into());
        self
    }

    /// Sets the selection limit; values `<= 0` mean unlimited.
    pub fn limit(mut self, limit: i64) -> Self {
        self.settings.limit = SelectionLimit::from(limit);
        self
    }

    /// Hides groups left empty by the search filter.
    pub fn hide_empty_groups(mut self, hide: bool) -> Self {
        self.settings.hide_empty_groups = hide;
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> Settings {
        self.settings
    }
}

/// Interprets a loosely-typed limit value.
///
/// Integers are used as-is, floats are truncated, and strings are read like
/// a leading-integer parse (`"3"`, `" 12px"`). Anything else, and any value
/// `<= 0`, is unlimited.
pub fn parse_limit(value: &Value) -> SelectionLimit {
    let parsed = match value {
        Value::Null => return SelectionLimit::Unlimited,
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(truncate_f64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(raw) => SelectionLimit::from(raw),
        None => {
            tracing::warn!(target: targets::SETTINGS, value = %value, "invalid limit, treating as unlimited");
            SelectionLimit::Unlimited
        }
    }
}

fn truncate_f64(f: f64) -> i64 {
    if f >= i64::MAX as f64 {
        i64::MAX
    } else if f <= i64::MIN as f64 {
        i64::MIN
    } else {
        f.trunc() as i64
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }

    // Overlong digit runs saturate; any positive overflow is still "a limit".
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn read_bool(key: &str, value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        other => {
            tracing::warn!(target: targets::SETTINGS, key, value = %other, "expected a boolean, using default");
            None
        }
    }
}

fn read_string(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        Value::Number(n) => Some(n.to_string()),
        other => {
            tracing::warn!(target: targets::SETTINGS, key, value = %other, "expected a string, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.enable_search);
        assert_eq!(settings.search_placeholder, "Search...");
        assert!(settings.non_selected_header.is_none());
        assert!(settings.selected_header.is_none());
        assert!(settings.limit.is_unlimited());
        assert!(!settings.hide_empty_groups);
        assert!(!settings.has_headers());
    }

    #[test]
    fn test_from_value_camel_and_snake() {
        let settings = Settings::from_value(&json!({
            "enableSearch": false,
            "search_placeholder": "Find...",
            "nonSelectedHeader": "Available",
            "selected_header": "Chosen",
            "limit": 2,
            "hideEmptyGroups": true,
            "unknown": [1, 2, 3]
        }));

        assert!(!settings.enable_search);
        assert_eq!(settings.search_placeholder, "Find...");
        assert_eq!(settings.non_selected_header.as_deref(), Some("Available"));
        assert_eq!(settings.selected_header.as_deref(), Some("Chosen"));
        assert_eq!(settings.limit.get(), Some(2));
        assert!(settings.hide_empty_groups);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let settings = Settings::from_value(&json!({
            "enable_search": {"nested": true},
            "search_placeholder": [],
            "hide_empty_groups": 3,
            "limit": "many"
        }));

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(parse_limit(&json!(3)).get(), Some(3));
        assert_eq!(parse_limit(&json!(2.9)).get(), Some(2));
        assert_eq!(parse_limit(&json!("4")).get(), Some(4));
        assert_eq!(parse_limit(&json!(" 5 items")).get(), Some(5));
        assert_eq!(parse_limit(&json!("+6")).get(), Some(6));
        assert!(parse_limit(&json!(-1)).is_unlimited());
        assert!(parse_limit(&json!(0)).is_unlimited());
        assert!(parse_limit(&json!("-3")).is_unlimited());
        assert!(parse_limit(&json!("abc")).is_unlimited());
        assert!(parse_limit(&json!(null)).is_unlimited());
        assert!(parse_limit(&json!(true)).is_unlimited());
    }

    #[test]
    fn test_non_object_is_default() {
        assert_eq!(Settings::from_value(&json!("limit=3")), Settings::default());
        assert_eq!(Settings::from_value(&json!(null)), Settings::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(Settings::from_json_str("{ nope"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_builder() {
        let settings = Settings::builder()
            .enable_search(false)
            .search_placeholder("Filter")
            .headers("Left", "Right")
            .limit(0)
            .hide_empty_groups(true)
            .build();

        assert!(!settings.enable_search);
        assert_eq!(settings.search_placeholder, "Filter");
        assert!(settings.has_headers());
        assert!(settings.limit.is_unlimited());
        assert!(settings.hide_empty_groups);
    }

    #[test]
    fn test_serde_round_trip_uses_raw_limit() {
        let settings = Settings::builder().limit(3).build();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["limit"], json!(3));

        let unlimited = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(unlimited["limit"], json!(-1));
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let settings: Settings = serde_json::from_str(r#"{"limit": "3"}"#).unwrap();
        assert_eq!(settings.limit.get(), Some(3));

        let settings: Settings = serde_json::from_str(r#"{"limit": 2.5}"#).unwrap();
        assert_eq!(settings.limit.get(), Some(2));

        let settings: Settings =
            serde_json::from_str(r#"{"enableSearch": "maybe", "limit": [1]}"#).unwrap();
        assert_eq!(settings, Settings::default());

        let limit: SelectionLimit = serde_json::from_str(r#""7""#).unwrap();
        assert_eq!(limit, SelectionLimit::at_most(7));
    }

    #[test]
    fn test_empty_headers_count_as_unset() {
        let settings = Settings::from_value(&json!({
            "non_selected_header": "",
            "selected_header": ""
        }));
        assert!(!settings.has_headers());
        assert_eq!(settings.headers(), None);

        let settings = Settings::builder().headers("Available", "Chosen").build();
        assert_eq!(settings.headers(), Some(("Available", "Chosen")));
    }
}
