//! Versioned project files.
//!
//! JSON with a schema version; older files are migrated on load.

use cutline_core::{CutlineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::project::Project;

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub version: u32,
    pub project: Project,
    /// Version of the library that wrote the file.
    pub app_version: String,
}

impl ProjectFile {
    pub fn new(project: Project) -> Self {
        Self {
            version: CURRENT_VERSION,
            project,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| CutlineError::Serialization(format!("Failed to serialize project: {e}")))
    }

    /// Parse a file, migrating older versions. Files newer than
    /// [`CURRENT_VERSION`] are rejected.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| CutlineError::Serialization(format!("Invalid JSON: {e}")))?;

        let version = raw.get("version").and_then(serde_json::Value::as_u64).unwrap_or(0);
        if version > u64::from(CURRENT_VERSION) {
            return Err(CutlineError::Serialization(format!(
                "Project file version {version} is newer than supported version {CURRENT_VERSION}"
            )));
        }

        let migrated = migrate(raw, version as u32)?;
        serde_json::from_value(migrated)
            .map_err(|e| CutlineError::Serialization(format!("Failed to parse project: {e}")))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), "project saved");
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Step a raw document from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 files are a bare project record.
                if data.get("version").is_none() {
                    data = serde_json::json!({
                        "version": 1,
                        "project": data,
                        "appVersion": "0.0.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(CutlineError::Serialization(format!(
                    "No migration path from version {version}"
                )));
            }
        }
        debug!(version, "project file migrated");
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RenderStatus;
    use cutline_audio::AudioConfig;
    use cutline_timeline::{TimelineClip, TimelineTrack};

    fn sample() -> Project {
        let mut project = Project::new("Test Project");
        let mut track = TimelineTrack::new_video("V1");
        let clip = TimelineClip::new(track.id, "a.mp4", 0.0, 4.0);
        let clip_id = clip.id;
        track.add_clip(clip);
        project.add_track(track);
        project.audio.insert(
            clip_id,
            AudioConfig {
                volume: 0.5,
                ..AudioConfig::default()
            },
        );
        project
    }

    #[test]
    fn test_project_roundtrip() {
        let project = sample();
        let json = ProjectFile::new(project.clone()).to_json().unwrap();
        let loaded = ProjectFile::from_json(&json).unwrap();
        assert_eq!(loaded.version, CURRENT_VERSION);
        assert_eq!(loaded.project, project);
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let json = ProjectFile::new(sample()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert!(value.get("appVersion").is_some());
        let project = &value["project"];
        assert_eq!(project["settings"]["sampleRate"], 48_000);
        assert_eq!(project["status"], "draft");
        assert!(project["tracks"][0]["clips"][0].get("startTime").is_some());
    }

    #[test]
    fn test_migration_v0() {
        let raw = serde_json::to_vec(&sample()).unwrap();
        let loaded = ProjectFile::from_json(&raw).unwrap();
        assert_eq!(loaded.version, CURRENT_VERSION);
        assert_eq!(loaded.project.name, "Test Project");
        assert_eq!(loaded.app_version, "0.0.0");
    }

    #[test]
    fn test_minimal_v0_record_gets_defaults() {
        let raw = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Bare",
            "settings": {
                "width": 1280,
                "height": 720,
                "frameRate": { "numerator": 25, "denominator": 1 },
                "sampleRate": 44100
            },
            "tracks": [],
            "duration": 0.0
        });
        let loaded = ProjectFile::from_json(&serde_json::to_vec(&raw).unwrap()).unwrap();
        assert_eq!(loaded.project.status, RenderStatus::Draft);
        assert!(loaded.project.transitions.is_empty());
        assert_eq!(loaded.project.mixer.master_volume, 1.0);
    }

    #[test]
    fn test_future_version_rejected() {
        let data = serde_json::to_vec(&serde_json::json!({
            "version": 999,
            "project": {},
            "appVersion": "99.0.0",
        }))
        .unwrap();
        assert!(matches!(
            ProjectFile::from_json(&data),
            Err(CutlineError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.cutline.json");
        ProjectFile::new(sample()).save_to_file(&path).unwrap();
        let loaded = ProjectFile::load_from_file(&path).unwrap();
        assert_eq!(loaded.project.name, "Test Project");

        assert!(matches!(
            ProjectFile::load_from_file(&dir.path().join("missing.json")),
            Err(CutlineError::Io(_))
        ));
    }
}
