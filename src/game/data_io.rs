use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::game::settings::Settings;
use crate::model::Statistics;

pub const EXPORT_VERSION: &str = "1.0.0";

/// The interchange blob a player carries between installs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedData {
    pub stats: Statistics,
    pub settings: Settings,
    #[serde(default = "Utc::now")]
    pub export_date: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    EXPORT_VERSION.to_string()
}

#[derive(Debug)]
pub enum ImportError {
    /// The blob is not JSON, or does not decode into the data shapes.
    Malformed(serde_json::Error),
    /// `stats.gamesPlayed` is absent or not a number.
    StatsNotRecognized,
    /// `settings.soundEnabled` is absent or not a boolean.
    SettingsNotRecognized,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Malformed(err) => write!(f, "unreadable game data: {}", err),
            ImportError::StatsNotRecognized => {
                write!(f, "game data has no numeric stats.gamesPlayed")
            }
            ImportError::SettingsNotRecognized => {
                write!(f, "game data has no boolean settings.soundEnabled")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// Renders the interchange blob, pretty-printed for hand inspection.
pub fn export_blob(
    stats: &Statistics,
    settings: &Settings,
    exported_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportedData {
        stats: stats.clone(),
        settings: settings.clone(),
        export_date: exported_at,
        version: EXPORT_VERSION.to_string(),
    })
}

/// Validates and decodes an interchange blob. The shape probe runs
/// before any decoding so a rejected blob cannot leave partial state
/// anywhere: callers only see a fully decoded value or an error.
pub fn import_blob(blob: &str) -> Result<ExportedData, ImportError> {
    let value: Value = serde_json::from_str(blob).map_err(ImportError::Malformed)?;
    if !value
        .pointer("/stats/gamesPlayed")
        .map_or(false, Value::is_number)
    {
        return Err(ImportError::StatsNotRecognized);
    }
    if !value
        .pointer("/settings/soundEnabled")
        .map_or(false, Value::is_boolean)
    {
        return Err(ImportError::SettingsNotRecognized);
    }
    serde_json::from_value(value).map_err(ImportError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_export_import_round_trip() {
        let mut stats = Statistics::default();
        stats.games_played = 7;
        stats.total_score = 4200;
        stats.best_time = Some(Duration::from_millis(31_250));
        let mut settings = Settings::default();
        settings.sound_enabled = false;

        let blob = export_blob(&stats, &settings, Utc::now()).unwrap();
        let imported = import_blob(&blob).unwrap();
        assert_eq!(imported.stats, stats);
        assert_eq!(imported.settings, settings);
        assert_eq!(imported.version, EXPORT_VERSION);
    }

    #[test]
    fn test_export_date_is_iso_8601() {
        let blob = export_blob(
            &Statistics::default(),
            &Settings::default(),
            "2024-05-01T12:30:00Z".parse().unwrap(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(
            value.get("exportDate").and_then(Value::as_str),
            Some("2024-05-01T12:30:00Z")
        );
    }

    #[test]
    fn test_missing_sound_enabled_is_rejected() {
        let blob = r#"{"stats":{"gamesPlayed":3},"settings":{"showHints":true}}"#;
        assert!(matches!(
            import_blob(blob),
            Err(ImportError::SettingsNotRecognized)
        ));
    }

    #[test]
    fn test_non_numeric_games_played_is_rejected() {
        let blob = r#"{"stats":{"gamesPlayed":"three"},"settings":{"soundEnabled":true}}"#;
        assert!(matches!(
            import_blob(blob),
            Err(ImportError::StatsNotRecognized)
        ));
        let blob = r#"{"settings":{"soundEnabled":true}}"#;
        assert!(matches!(
            import_blob(blob),
            Err(ImportError::StatsNotRecognized)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            import_blob("not json at all"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_minimal_valid_blob_fills_defaults() {
        let blob = r#"{"stats":{"gamesPlayed":2},"settings":{"soundEnabled":false}}"#;
        let imported = import_blob(blob).unwrap();
        assert_eq!(imported.stats.games_played, 2);
        assert!(!imported.settings.sound_enabled);
        assert!(imported.settings.show_hints, "missing fields take defaults");
        assert_eq!(imported.version, EXPORT_VERSION);
    }
}
