//! Runtime configuration.
//!
//! Precedence, highest first: command-line flags, the JSON config file,
//! built-in defaults. Every field is optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::path::{CurveKind, Parameterization, PathSpec};

/// Environment variable overriding the default model path
pub const MODEL_ENV_VAR: &str = "GLTF_FILE";

const DEFAULT_MODEL_PATH: &str = "models/tardis/scene.gltf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// glTF model carried along the path
    pub model_path: PathBuf,
    pub path: PathConfig,
    pub camera: CameraConfig,
    pub background: BackgroundConfig,
    pub stars: StarsConfig,
    pub window: WindowConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            path: PathConfig::default(),
            camera: CameraConfig::default(),
            background: BackgroundConfig::default(),
            stars: StarsConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

fn default_model_path() -> PathBuf {
    std::env::var_os(MODEL_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

impl SceneConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Tracked object's path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub points: Vec<Vec3>,
    pub closed: bool,
    pub curve: CurveKind,
    /// Only used by the uniform curve kind
    pub tension: f32,
    pub parameterization: Parameterization,
    pub arc_length_divisions: usize,
    /// Seconds per full loop
    pub period_secs: f64,
    pub show_line: bool,
    /// Segments of the drawn path line
    pub line_samples: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            points: vec![
                Vec3::new(-100.0, 0.0, 100.0),
                Vec3::new(-50.0, 5.0, 50.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(50.0, -5.0, 50.0),
                Vec3::new(100.0, 0.0, 100.0),
                Vec3::new(75.0, 0.0, 75.0),
                Vec3::new(-100.0, 0.0, 100.0),
            ],
            closed: true,
            curve: CurveKind::Uniform,
            tension: 0.5,
            parameterization: Parameterization::ArcLength,
            arc_length_divisions: 1000,
            period_secs: 2.0,
            show_line: true,
            line_samples: 50,
        }
    }
}

impl PathConfig {
    pub fn spec(&self) -> PathSpec {
        PathSpec::new(self.points.clone())
            .closed(self.closed)
            .kind(self.curve)
            .tension(self.tension)
            .parameterization(self.parameterization)
            .divisions(self.arc_length_divisions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Multiplier on drag orbiting; also radians per second for Q/E
    pub orbit_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 50.0, 100.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            orbit_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub enabled: bool,
    /// How often the field is re-evaluated
    pub update_hz: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            update_hz: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarsConfig {
    pub count: usize,
    /// Side of the cube the stars fill
    pub extent: f32,
    pub seed: u64,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            extent: 2000.0,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Path Scene".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config.path, PathConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SceneConfig::from_json(
            r#"{ "path": { "parameterization": "index", "closed": false }, "stars": { "count": 5 } }"#,
        )
        .unwrap();

        assert_eq!(config.path.parameterization, Parameterization::Index);
        assert!(!config.path.closed);
        assert_eq!(config.path.period_secs, 2.0);
        assert_eq!(config.stars.count, 5);
        assert_eq!(config.stars.extent, 2000.0);
    }

    #[test]
    fn points_are_xyz_arrays() {
        let config = SceneConfig::from_json(r#"{ "camera": { "position": [1.0, 2.0, 3.0] } }"#).unwrap();
        assert_eq!(config.camera.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn json_round_trip() {
        let config = SceneConfig::default();
        let back = SceneConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn default_path_builds() {
        let animator = PathConfig::default().spec().build().unwrap();
        assert!(animator.length().unwrap() > 400.0);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(SceneConfig::from_json(r#"{ "path": { "curve": "bezier" } }"#).is_err());
    }
}
