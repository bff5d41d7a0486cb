//! Scenario sources: bundled drill content and external JSON files.
use std::path::{Path, PathBuf};

use drillwise_engine::{ScenarioGraph, ScenarioSource};
use thiserror::Error;

/// Drill scenarios compiled into the binary, keyed by name.
const BUNDLED: &[(&str, &str)] = &[
    ("fire", include_str!("../assets/scenarios/fire.json")),
    ("flood", include_str!("../assets/scenarios/flood.json")),
    (
        "earthquake",
        include_str!("../assets/scenarios/earthquake.json"),
    ),
    ("pandemic", include_str!("../assets/scenarios/pandemic.json")),
    (
        "severe-weather",
        include_str!("../assets/scenarios/severe_weather.json"),
    ),
];

/// Names of all bundled scenarios, in listing order.
pub fn bundled_names() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|(name, _)| *name)
}

/// Raw JSON for a bundled scenario, if one exists under that name.
#[must_use]
pub fn bundled_json(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, json)| *json)
}

/// Errors raised while loading scenario content.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no bundled scenario named '{0}' (try --list-scenarios)")]
    UnknownScenario(String),
    #[error("failed to read scenario file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scenario JSON is malformed")]
    Parse(#[from] serde_json::Error),
}

/// Scenario source backed by the bundled drills plus optional file paths.
///
/// When `file` is set every load reads that path and the scenario name is
/// ignored. Otherwise a name containing a path separator or ending in
/// `.json` is read from disk, and anything else is looked up in the bundled
/// table.
#[derive(Debug, Clone, Default)]
pub struct CliScenarioSource {
    pub file: Option<PathBuf>,
}

impl CliScenarioSource {
    fn load_file(path: &Path) -> Result<ScenarioGraph, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ScenarioGraph::from_json(&json)?)
    }
}

impl ScenarioSource for CliScenarioSource {
    type Error = SourceError;

    fn load_scenario(&self, name: &str) -> Result<ScenarioGraph, Self::Error> {
        if let Some(path) = &self.file {
            return Self::load_file(path);
        }
        if name.ends_with(".json") || name.contains(std::path::MAIN_SEPARATOR) {
            return Self::load_file(Path::new(name));
        }
        let json = bundled_json(name)
            .ok_or_else(|| SourceError::UnknownScenario(name.to_string()))?;
        Ok(ScenarioGraph::from_json(json)?)
    }
}
