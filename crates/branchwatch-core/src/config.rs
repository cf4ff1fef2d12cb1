//! Deployment profiles.
//!
//! A profile bundles everything that used to differ between copies of the
//! dashboard: which routes to poll, how cards are sorted, which summary fields
//! are shown, where the severity bands start, how often to poll and how fetch
//! errors are displayed.
//!
//! Profiles come from a built-in preset, optionally overridden by a TOML file:
//!
//! ```toml
//! preset = "weekly"
//! sort_key = "vacant_desc"
//! poll_interval_ms = 10000
//!
//! [thresholds]
//! low_max = 60.0
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::Route;

/// Shortest accepted poll interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 1_000;

/// Default per-request timeout for HTTP sources.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building or validating a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No preset with this name.
    UnknownPreset(String),
    /// Profile file could not be read.
    Io(String),
    /// Profile file is not valid TOML or has unknown keys.
    Parse(String),
    /// Profile values are inconsistent.
    Invalid(String),
    /// Endpoint URL is missing or unusable.
    InvalidEndpoint(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownPreset(name) => write!(
                f,
                "unknown profile '{}' (available: {})",
                name,
                DeploymentProfile::preset_names().join(", ")
            ),
            ConfigError::Io(msg) => write!(f, "cannot read profile: {}", msg),
            ConfigError::Parse(msg) => write!(f, "invalid profile file: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "invalid profile: {}", msg),
            ConfigError::InvalidEndpoint(msg) => write!(f, "invalid endpoint: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Card ordering within a route pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Lowest current percentage first.
    #[default]
    PercentAsc,
    /// Most vacancies first.
    VacantDesc,
}

/// Severity band boundaries (inclusive upper bounds of `low` and `medium`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_max: 66.0,
            medium_max: 80.0,
        }
    }
}

/// Per-deployment dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentProfile {
    pub name: String,
    /// Routes to poll, in tab order.
    pub routes: Vec<Route>,
    pub sort_key: SortKey,
    /// Show the mean current/prior percentages on the summary card.
    pub summary_percentages: bool,
    /// Routes whose cards carry joined/left counts.
    pub movement_routes: Vec<Route>,
    pub thresholds: Thresholds,
    pub poll_interval_ms: u64,
    /// Replace a route pane with the error text when its fetch fails.
    pub inline_errors: bool,
}

impl Default for DeploymentProfile {
    fn default() -> Self {
        Self::weekly()
    }
}

impl DeploymentProfile {
    /// Weekly attendance board: lowest percentage first, one-minute refresh.
    pub fn weekly() -> Self {
        Self {
            name: "weekly".to_string(),
            routes: Route::all().to_vec(),
            sort_key: SortKey::PercentAsc,
            summary_percentages: true,
            movement_routes: vec![Route::Main, Route::Courier],
            thresholds: Thresholds::default(),
            poll_interval_ms: 60_000,
            inline_errors: false,
        }
    }

    /// Same board on a ten-second refresh.
    pub fn weekly_fast() -> Self {
        Self {
            name: "weekly-fast".to_string(),
            poll_interval_ms: 10_000,
            ..Self::weekly()
        }
    }

    /// Staffing board: most vacancies first, errors shown in place.
    pub fn vacancies() -> Self {
        Self {
            name: "vacancies".to_string(),
            sort_key: SortKey::VacantDesc,
            poll_interval_ms: 10_000,
            inline_errors: true,
            ..Self::weekly()
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &["weekly", "weekly-fast", "vacancies"]
    }

    /// Looks up a built-in profile by name.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim() {
            "weekly" => Ok(Self::weekly()),
            "weekly-fast" => Ok(Self::weekly_fast()),
            "vacancies" => Ok(Self::vacancies()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Builds a profile from TOML. `base` is used unless the file names a preset.
    pub fn from_toml_str(content: &str, base: Self) -> Result<Self, ConfigError> {
        let file: ProfileFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let profile = file.apply(base)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reads a TOML profile file.
    pub fn load(path: &Path, base: Self) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content, base)
    }

    /// Resolves the effective profile: preset, then the optional file, then
    /// command-line overrides. The result is validated.
    pub fn resolve(
        preset: &str,
        path: Option<&Path>,
        interval: Option<Duration>,
        routes: &[Route],
    ) -> Result<Self, ConfigError> {
        let mut profile = Self::preset(preset)?;
        if let Some(path) = path {
            profile = Self::load(path, profile)?;
        }
        if let Some(interval) = interval {
            profile = profile.with_poll_interval(interval);
        }
        if !routes.is_empty() {
            profile = profile.with_routes(routes.to_vec());
        }
        profile.validate()?;
        Ok(profile)
    }

    /// Overrides the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Restricts polling to the given routes.
    pub fn with_routes(mut self, routes: Vec<Route>) -> Self {
        self.routes = routes;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns true if cards of this route show joined/left counts.
    pub fn shows_movement(&self, route: Route) -> bool {
        self.movement_routes.contains(&route)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::Invalid("no routes enabled".to_string()));
        }
        for (i, route) in self.routes.iter().enumerate() {
            if self.routes[..i].contains(route) {
                return Err(ConfigError::Invalid(format!("route '{}' listed twice", route)));
            }
        }
        let Thresholds {
            low_max,
            medium_max,
        } = self.thresholds;
        if !low_max.is_finite() || !medium_max.is_finite() || low_max >= medium_max {
            return Err(ConfigError::Invalid(format!(
                "thresholds must satisfy low_max < medium_max (got {} and {})",
                low_max, medium_max
            )));
        }
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "poll interval must be at least {} ms (got {})",
                MIN_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdOverrides {
    low_max: Option<f64>,
    medium_max: Option<f64>,
}

/// On-disk profile: every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    preset: Option<String>,
    name: Option<String>,
    routes: Option<Vec<Route>>,
    sort_key: Option<SortKey>,
    summary_percentages: Option<bool>,
    movement_routes: Option<Vec<Route>>,
    thresholds: Option<ThresholdOverrides>,
    poll_interval_ms: Option<u64>,
    inline_errors: Option<bool>,
}

impl ProfileFile {
    fn apply(self, base: DeploymentProfile) -> Result<DeploymentProfile, ConfigError> {
        let mut profile = match &self.preset {
            Some(preset) => DeploymentProfile::preset(preset)?,
            None => base,
        };
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(routes) = self.routes {
            profile.routes = routes;
        }
        if let Some(sort_key) = self.sort_key {
            profile.sort_key = sort_key;
        }
        if let Some(summary_percentages) = self.summary_percentages {
            profile.summary_percentages = summary_percentages;
        }
        if let Some(movement_routes) = self.movement_routes {
            profile.movement_routes = movement_routes;
        }
        if let Some(thresholds) = self.thresholds {
            if let Some(low_max) = thresholds.low_max {
                profile.thresholds.low_max = low_max;
            }
            if let Some(medium_max) = thresholds.medium_max {
                profile.thresholds.medium_max = medium_max;
            }
        }
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            profile.poll_interval_ms = poll_interval_ms;
        }
        if let Some(inline_errors) = self.inline_errors {
            profile.inline_errors = inline_errors;
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        for name in DeploymentProfile::preset_names() {
            let profile = DeploymentProfile::preset(name).unwrap();
            assert_eq!(profile.name, *name);
            profile.validate().unwrap();
        }
    }

    #[test]
    fn test_preset_intervals() {
        assert_eq!(
            DeploymentProfile::weekly().poll_interval(),
            Duration::from_secs(60)
        );
        assert_eq!(
            DeploymentProfile::vacancies().poll_interval(),
            Duration::from_secs(10)
        );
        assert_eq!(DeploymentProfile::vacancies().sort_key, SortKey::VacantDesc);
    }

    #[test]
    fn test_unknown_preset() {
        let err = DeploymentProfile::preset("hourly").unwrap_err();
        assert_eq!(err, ConfigError::UnknownPreset("hourly".to_string()));
        assert!(err.to_string().contains("weekly-fast"));
    }

    #[test]
    fn test_toml_overrides_base() {
        let profile = DeploymentProfile::from_toml_str(
            r#"
            sort_key = "vacant_desc"
            routes = ["courier", "main"]
            poll_interval_ms = 15000

            [thresholds]
            low_max = 50.0
            "#,
            DeploymentProfile::weekly(),
        )
        .unwrap();
        assert_eq!(profile.name, "weekly");
        assert_eq!(profile.sort_key, SortKey::VacantDesc);
        assert_eq!(profile.routes, vec![Route::Courier, Route::Main]);
        assert_eq!(profile.poll_interval(), Duration::from_secs(15));
        assert_eq!(profile.thresholds.low_max, 50.0);
        assert_eq!(profile.thresholds.medium_max, 80.0);
    }

    #[test]
    fn test_toml_preset_replaces_base() {
        let profile =
            DeploymentProfile::from_toml_str("preset = \"vacancies\"", DeploymentProfile::weekly())
                .unwrap();
        assert!(profile.inline_errors);
        assert_eq!(profile.name, "vacancies");
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = DeploymentProfile::from_toml_str("sortKey = 1", DeploymentProfile::weekly())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let bad_thresholds = DeploymentProfile {
            thresholds: Thresholds {
                low_max: 80.0,
                medium_max: 66.0,
            },
            ..DeploymentProfile::weekly()
        };
        assert!(matches!(
            bad_thresholds.validate(),
            Err(ConfigError::Invalid(_))
        ));

        let too_fast = DeploymentProfile::weekly().with_poll_interval(Duration::from_millis(200));
        assert!(too_fast.validate().is_err());

        let no_routes = DeploymentProfile::weekly().with_routes(Vec::new());
        assert!(no_routes.validate().is_err());

        let twice = DeploymentProfile::weekly().with_routes(vec![Route::Main, Route::Main]);
        assert!(twice.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "preset = \"weekly-fast\"\ninline_errors = true").unwrap();

        let profile = DeploymentProfile::load(file.path(), DeploymentProfile::weekly()).unwrap();
        assert_eq!(profile.name, "weekly-fast");
        assert!(profile.inline_errors);

        let missing = DeploymentProfile::load(
            Path::new("/nonexistent/branchwatch.toml"),
            DeploymentProfile::weekly(),
        );
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_resolve_applies_overrides_last() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_ms = 30000\nsort_key = \"vacant_desc\"").unwrap();

        let profile = DeploymentProfile::resolve(
            "weekly",
            Some(file.path()),
            Some(Duration::from_secs(5)),
            &[Route::Courier],
        )
        .unwrap();
        assert_eq!(profile.poll_interval_ms, 5_000);
        assert_eq!(profile.sort_key, SortKey::VacantDesc);
        assert_eq!(profile.routes, vec![Route::Courier]);

        let err = DeploymentProfile::resolve("weekly", None, Some(Duration::ZERO), &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(matches!(
            DeploymentProfile::resolve("daily", None, None, &[]),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_shows_movement() {
        let profile = DeploymentProfile::weekly();
        assert!(profile.shows_movement(Route::Main));
        assert!(profile.shows_movement(Route::Courier));
        assert!(!profile.shows_movement(Route::Franchise));
    }
}
