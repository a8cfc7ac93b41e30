//! Render job files.

use std::fs;
use std::path::{Path, PathBuf};

use glint_renderer::{Camera, RenderConfig, Resolution, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scenes::ScenePreset;

/// Errors raised while loading a job file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid job: {0}")]
    Invalid(String),
}

/// Camera placement and lens, as written in a job file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter
    pub aperture: f32,
    /// Distance to the plane in focus; negative disables depth of field
    pub focus_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: [-2.0, 2.0, 1.0],
            look_at: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aperture: 0.0,
            focus_distance: -1.0,
        }
    }
}

impl CameraSettings {
    pub fn build(&self, aspect: f32) -> Camera {
        Camera::builder()
            .with_position(
                Vec3::from(self.look_from),
                Vec3::from(self.look_at),
                Vec3::from(self.up),
            )
            .with_lens(self.vfov, self.aperture, self.focus_distance)
            .with_aspect(aspect)
            .build()
    }
}

/// A complete render job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub scene: ScenePreset,
    /// Seed for the cover scene layout
    pub scene_seed: u64,
    pub camera: CameraSettings,
    pub render: RenderConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            output: PathBuf::from("scene.ppm"),
            scene: ScenePreset::Basic,
            scene_seed: 0,
            camera: CameraSettings::default(),
            render: RenderConfig::default(),
        }
    }
}

impl JobConfig {
    /// Load a job from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let job: JobConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.camera.vfov > 0.0 && self.camera.vfov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "vfov must be in (0, 180) degrees, got {}",
                self.camera.vfov
            )));
        }
        if !self.camera.aperture.is_finite() || self.camera.aperture < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "aperture must be finite and non-negative, got {}",
                self.camera.aperture
            )));
        }
        // Zero collapses the image plane onto the lens
        if !self.camera.focus_distance.is_finite() || self.camera.focus_distance == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "focus_distance must be finite and non-zero, got {}",
                self.camera.focus_distance
            )));
        }
        if self.camera.look_from == self.camera.look_at {
            return Err(ConfigError::Invalid("look_from and look_at coincide".into()));
        }
        self.render
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    pub fn camera(&self) -> Camera {
        self.camera.build(self.resolution().aspect())
    }
}
