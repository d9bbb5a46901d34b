//! Scene description: one light source and an ordered list of prisms.
//!
//! Prism order is display and selection order only; it has no effect on the
//! physics apart from breaking exact distance ties during tracing.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::prism::Prism;
use crate::vector::{from_angle, length};

/// Points this close to the source select it.
pub const SOURCE_PICK_RADIUS: f32 = 8.0;

/// Editable x range for positions, matching the configuration panel sliders.
pub const POS_X_RANGE: (f32, f32) = (0.0, 800.0);
/// Editable y range for positions.
pub const POS_Y_RANGE: (f32, f32) = (0.0, 700.0);
/// Editable source angle range in degrees.
pub const SOURCE_ANGLE_RANGE_DEG: (f32, f32) = (-180.0, 180.0);
/// Editable prism circumradius range.
pub const PRISM_SIZE_RANGE: (f32, f32) = (50.0, 300.0);
/// Editable prism rotation range in degrees.
pub const PRISM_ROTATION_RANGE_DEG: (f32, f32) = (0.0, 360.0);

/// Errors raised while loading or validating a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("failed to read scene file {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The text is not a valid scene document.
    #[error("failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),
    /// A prism breaks a geometric invariant.
    #[error("invalid prism '{name}': {reason}")]
    InvalidPrism {
        /// Display name of the prism.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result alias for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Point light emitting a single collimated beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// Emission point.
    pub pos: Vec2,
    /// Beam angle in radians from `+x` toward `+y`.
    #[serde(default)]
    pub angle: f32,
}

impl LightSource {
    /// Source at `pos` aiming at `angle` radians.
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self { pos, angle }
    }

    /// Unit beam direction, always derived from `angle`.
    pub fn direction(&self) -> Vec2 {
        from_angle(self.angle)
    }
}

/// Light source plus prisms, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// The single light source.
    pub source: LightSource,
    /// Prisms in display order.
    #[serde(default)]
    pub prisms: Vec<Prism>,
}

impl Scene {
    /// Scene with a source and no prisms.
    pub fn new(source: LightSource) -> Self {
        Self {
            source,
            prisms: Vec::new(),
        }
    }

    /// Two-prism bench: a large prism splits the beam and a smaller rotated
    /// one further spreads the spectrum.
    pub fn demo() -> Self {
        let mut scene = Self::new(LightSource::new(Vec2::new(50.0, 350.0), -0.2));
        scene.add_prism(Prism::new("Prism 1", Vec2::new(350.0, 350.0), 150.0, 0.0));
        scene.add_prism(Prism::new("Prism 2", Vec2::new(650.0, 350.0), 120.0, PI / 6.0));
        scene
    }

    /// Append a prism on top of the others.
    pub fn add_prism(&mut self, prism: Prism) {
        self.prisms.push(prism);
    }

    /// Builder form of [`add_prism`](Self::add_prism).
    pub fn with_prism(mut self, prism: Prism) -> Self {
        self.add_prism(prism);
        self
    }

    /// Check the invariants the tracer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        for prism in &self.prisms {
            let invalid = |reason: String| SceneError::InvalidPrism {
                name: prism.name.clone(),
                reason,
            };
            if !(prism.size > 0.0 && prism.size.is_finite()) {
                return Err(invalid(format!("size must be positive, got {}", prism.size)));
            }
            if prism.sides < 3 {
                return Err(invalid(format!("needs at least 3 sides, got {}", prism.sides)));
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML scene.
    pub fn from_toml_str(text: &str) -> SceneResult<Self> {
        let scene: Scene = toml::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a TOML scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_toml_str(&text)?;
        debug!("Loaded scene from {} with {} prisms", path.display(), scene.prisms.len());
        Ok(scene)
    }

    /// Object under `point`: the source first, then the topmost prism.
    pub fn pick(&self, point: Vec2) -> Selection {
        if length(point - self.source.pos) <= SOURCE_PICK_RADIUS {
            return Selection::Light;
        }
        self.prisms
            .iter()
            .rposition(|prism| prism.contains(point))
            .map_or(Selection::None, Selection::Prism)
    }

    /// `selection` if it still names an object, otherwise [`Selection::None`].
    pub fn resolve(&self, selection: Selection) -> Selection {
        match selection {
            Selection::Prism(index) if index >= self.prisms.len() => Selection::None,
            other => other,
        }
    }

    /// Resolve a selection to the object it names.
    ///
    /// Returns `None` for [`Selection::None`] and for a prism index that no
    /// longer exists.
    pub fn selected_mut(&mut self, selection: Selection) -> Option<Selected<'_>> {
        match selection {
            Selection::None => None,
            Selection::Light => Some(Selected::Light(&mut self.source)),
            Selection::Prism(index) => self.prisms.get_mut(index).map(Selected::Prism),
        }
    }

    /// Apply a configuration edit to the selected object, clamped to the
    /// editable range. Returns false if the edit does not fit the selection.
    pub fn apply(&mut self, selection: Selection, edit: Edit) -> bool {
        let Some(selected) = self.selected_mut(selection) else {
            return false;
        };
        match (selected, edit) {
            (Selected::Light(source), Edit::PosX(x)) => source.pos.x = clamp(x, POS_X_RANGE),
            (Selected::Light(source), Edit::PosY(y)) => source.pos.y = clamp(y, POS_Y_RANGE),
            (Selected::Light(source), Edit::AngleDeg(deg)) => {
                source.angle = clamp(deg, SOURCE_ANGLE_RANGE_DEG).to_radians()
            }
            (Selected::Prism(prism), Edit::PosX(x)) => prism.pos.x = clamp(x, POS_X_RANGE),
            (Selected::Prism(prism), Edit::PosY(y)) => prism.pos.y = clamp(y, POS_Y_RANGE),
            (Selected::Prism(prism), Edit::Size(size)) => {
                prism.size = clamp(size, PRISM_SIZE_RANGE)
            }
            (Selected::Prism(prism), Edit::AngleDeg(deg)) => {
                prism.rotation = clamp(deg, PRISM_ROTATION_RANGE_DEG).to_radians()
            }
            (Selected::Light(_), Edit::Size(_)) => return false,
        }
        true
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo()
    }
}

fn clamp(value: f32, (min, max): (f32, f32)) -> f32 {
    value.clamp(min, max)
}

/// Which scene object the user is working with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// The light source.
    Light,
    /// Index into [`Scene::prisms`].
    Prism(usize),
}

/// A resolved, mutable reference to the selected object.
#[derive(Debug)]
pub enum Selected<'a> {
    /// The light source.
    Light(&'a mut LightSource),
    /// One of the prisms.
    Prism(&'a mut Prism),
}

/// A single parameter change from the configuration panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    /// Horizontal position.
    PosX(f32),
    /// Vertical position.
    PosY(f32),
    /// Prism circumradius. Not applicable to the light source.
    Size(f32),
    /// Source beam angle or prism rotation, in degrees.
    AngleDeg(f32),
}
