use glam::Vec3;
use lightlab_common::{Color, Transform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six light models the scene supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    Ambient,
    Directional,
    Hemisphere,
    Point,
    RectArea,
    Spot,
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ambient => "ambient",
            Self::Directional => "directional",
            Self::Hemisphere => "hemisphere",
            Self::Point => "point",
            Self::RectArea => "rect-area",
            Self::Spot => "spot",
        };
        f.write_str(s)
    }
}

/// Kind-specific light geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightShape {
    Ambient,
    Directional {
        position: Vec3,
        target: Vec3,
    },
    Hemisphere {
        position: Vec3,
        ground_color: Color,
    },
    Point {
        position: Vec3,
        /// Cutoff distance; `0` means no cutoff.
        distance: f32,
        decay: f32,
    },
    RectArea {
        position: Vec3,
        width: f32,
        height: f32,
        /// Unit direction of the emitting face. Set once when the light is
        /// aimed; moving the light does not re-aim it.
        facing: Vec3,
    },
    Spot {
        position: Vec3,
        target: Vec3,
        distance: f32,
        /// Half-angle of the cone in radians.
        angle: f32,
        penumbra: f32,
        decay: f32,
    },
}

/// A light source in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    pub shape: LightShape,
}

impl Light {
    pub fn ambient(name: impl Into<String>, color: Color, intensity: f32) -> Self {
        Self::new(name, color, intensity, LightShape::Ambient)
    }

    pub fn directional(
        name: impl Into<String>,
        color: Color,
        intensity: f32,
        position: Vec3,
    ) -> Self {
        Self::new(
            name,
            color,
            intensity,
            LightShape::Directional {
                position,
                target: Vec3::ZERO,
            },
        )
    }

    pub fn hemisphere(
        name: impl Into<String>,
        sky_color: Color,
        ground_color: Color,
        intensity: f32,
    ) -> Self {
        Self::new(
            name,
            sky_color,
            intensity,
            LightShape::Hemisphere {
                position: Vec3::Y,
                ground_color,
            },
        )
    }

    pub fn point(
        name: impl Into<String>,
        color: Color,
        intensity: f32,
        distance: f32,
        decay: f32,
    ) -> Self {
        Self::new(
            name,
            color,
            intensity,
            LightShape::Point {
                position: Vec3::ZERO,
                distance,
                decay,
            },
        )
    }

    pub fn rect_area(
        name: impl Into<String>,
        color: Color,
        intensity: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self::new(
            name,
            color,
            intensity,
            LightShape::RectArea {
                position: Vec3::ZERO,
                width,
                height,
                facing: Vec3::NEG_Z,
            },
        )
    }

    pub fn spot(
        name: impl Into<String>,
        color: Color,
        intensity: f32,
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
    ) -> Self {
        Self::new(
            name,
            color,
            intensity,
            LightShape::Spot {
                position: Vec3::ZERO,
                target: Vec3::ZERO,
                distance,
                angle,
                penumbra,
                decay,
            },
        )
    }

    fn new(name: impl Into<String>, color: Color, intensity: f32, shape: LightShape) -> Self {
        Self {
            name: name.into(),
            color,
            intensity,
            shape,
        }
    }

    /// Builder-style position override. No-op for ambient lights.
    pub fn at(mut self, p: Vec3) -> Self {
        if let Some(pos) = self.position_mut() {
            *pos = p;
        }
        self
    }

    /// Builder-style target override for directional and spot lights. A
    /// rect-area light turns its face toward `p` from its current position.
    pub fn aimed_at(mut self, p: Vec3) -> Self {
        match &mut self.shape {
            LightShape::Directional { target, .. } | LightShape::Spot { target, .. } => {
                *target = p
            }
            LightShape::RectArea {
                position, facing, ..
            } => *facing = (p - *position).try_normalize().unwrap_or(Vec3::NEG_Z),
            _ => {}
        }
        self
    }

    pub fn kind(&self) -> LightKind {
        match self.shape {
            LightShape::Ambient => LightKind::Ambient,
            LightShape::Directional { .. } => LightKind::Directional,
            LightShape::Hemisphere { .. } => LightKind::Hemisphere,
            LightShape::Point { .. } => LightKind::Point,
            LightShape::RectArea { .. } => LightKind::RectArea,
            LightShape::Spot { .. } => LightKind::Spot,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        match self.shape {
            LightShape::Ambient => None,
            LightShape::Directional { position, .. }
            | LightShape::Hemisphere { position, .. }
            | LightShape::Point { position, .. }
            | LightShape::RectArea { position, .. }
            | LightShape::Spot { position, .. } => Some(position),
        }
    }

    pub fn position_mut(&mut self) -> Option<&mut Vec3> {
        match &mut self.shape {
            LightShape::Ambient => None,
            LightShape::Directional { position, .. }
            | LightShape::Hemisphere { position, .. }
            | LightShape::Point { position, .. }
            | LightShape::RectArea { position, .. }
            | LightShape::Spot { position, .. } => Some(position),
        }
    }

    /// Target point for directional and spot lights.
    pub fn target(&self) -> Option<Vec3> {
        match self.shape {
            LightShape::Directional { target, .. } | LightShape::Spot { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }
}

/// Procedural geometry of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

/// A standard (roughness-based) surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub color: Color,
    pub roughness: f32,
}

impl Material {
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            roughness: 1.0,
        }
    }
}

/// A visible mesh: geometry, transform and the name of its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub shape: Shape,
    pub material: String,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(name: impl Into<String>, shape: Shape, material: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape,
            material: material.into(),
            transform: Transform::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Any named thing the registry can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Light(Light),
    Mesh(Mesh),
    Material(Material),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Self::Light(l) => &l.name,
            Self::Mesh(m) => &m.name,
            Self::Material(m) => &m.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Light(_) => EntityKind::Light,
            Self::Mesh(_) => EntityKind::Mesh,
            Self::Material(_) => EntityKind::Material,
        }
    }
}

impl From<Light> for Entity {
    fn from(l: Light) -> Self {
        Self::Light(l)
    }
}

impl From<Mesh> for Entity {
    fn from(m: Mesh) -> Self {
        Self::Mesh(m)
    }
}

impl From<Material> for Entity {
    fn from(m: Material) -> Self {
        Self::Material(m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Light,
    Mesh,
    Material,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Light => "light",
            Self::Mesh => "mesh",
            Self::Material => "material",
        };
        f.write_str(s)
    }
}
