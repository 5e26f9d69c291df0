use lightlab_common::Color;
use lightlab_kernel::{Entity, LightShape};
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;
use std::fmt;

/// A value exchanged with a control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value {
    Scalar(f32),
    /// Packed `0xRRGGBB`.
    Color(u32),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Color(hex) => write!(f, "#{hex:06x}"),
        }
    }
}

/// Typed tag for every tunable field, dispatched by `match` instead of
/// looking properties up by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Intensity,
    Color,
    GroundColor,
    Distance,
    Decay,
    Angle,
    Penumbra,
    Width,
    Height,
    PositionX,
    PositionY,
    PositionZ,
    Roughness,
}

impl Field {
    /// Default control label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Color => "color",
            Self::GroundColor => "groundColor",
            Self::Distance => "distance",
            Self::Decay => "decay",
            Self::Angle => "angle",
            Self::Penumbra => "penumbra",
            Self::Width => "width",
            Self::Height => "height",
            Self::PositionX => "x",
            Self::PositionY => "y",
            Self::PositionZ => "z",
            Self::Roughness => "roughness",
        }
    }

    pub fn is_color(self) -> bool {
        matches!(self, Self::Color | Self::GroundColor)
    }

    /// Fields that change a light's shape and therefore its helper.
    pub fn is_geometric(self) -> bool {
        matches!(
            self,
            Self::Distance
                | Self::Angle
                | Self::Width
                | Self::Height
                | Self::PositionX
                | Self::PositionY
                | Self::PositionZ
        )
    }

    /// Physically meaningful bounds of a scalar field, if it has any.
    pub fn domain(self) -> Option<(f32, f32)> {
        match self {
            Self::Intensity | Self::Distance | Self::Decay | Self::Width | Self::Height => {
                Some((0.0, f32::INFINITY))
            }
            Self::Angle => Some((0.0, FRAC_PI_2)),
            Self::Penumbra | Self::Roughness => Some((0.0, 1.0)),
            Self::PositionX | Self::PositionY | Self::PositionZ => None,
            Self::Color | Self::GroundColor => None,
        }
    }

    /// Current value of this field on `entity`, or `None` if the entity has
    /// no such field.
    pub fn read(self, entity: &Entity) -> Option<Value> {
        if self.is_color() {
            self.color(entity).map(|c| Value::Color(c.to_hex()))
        } else {
            self.scalar(entity).map(Value::Scalar)
        }
    }

    /// Store `value` into the field. Colors are decoded from their packed
    /// form into the engine's float representation.
    pub fn write(self, entity: &mut Entity, value: Value) -> Result<(), WriteError> {
        match value {
            Value::Scalar(v) => {
                if self.is_color() {
                    return Err(WriteError::ValueMismatch);
                }
                *self.scalar_slot(entity).ok_or(WriteError::NotApplicable)? = v;
            }
            Value::Color(hex) => {
                if !self.is_color() {
                    return Err(WriteError::ValueMismatch);
                }
                *self.color_slot(entity).ok_or(WriteError::NotApplicable)? = Color::from_hex(hex);
            }
        }
        Ok(())
    }

    fn scalar(self, entity: &Entity) -> Option<f32> {
        match (self, entity) {
            (Self::Intensity, Entity::Light(l)) => Some(l.intensity),
            (Self::PositionX, Entity::Light(l)) => l.position().map(|p| p.x),
            (Self::PositionY, Entity::Light(l)) => l.position().map(|p| p.y),
            (Self::PositionZ, Entity::Light(l)) => l.position().map(|p| p.z),
            (Self::PositionX, Entity::Mesh(m)) => Some(m.transform.position.x),
            (Self::PositionY, Entity::Mesh(m)) => Some(m.transform.position.y),
            (Self::PositionZ, Entity::Mesh(m)) => Some(m.transform.position.z),
            (Self::Roughness, Entity::Material(m)) => Some(m.roughness),
            (field, Entity::Light(l)) => match (field, l.shape) {
                (Self::Distance, LightShape::Point { distance, .. })
                | (Self::Distance, LightShape::Spot { distance, .. }) => Some(distance),
                (Self::Decay, LightShape::Point { decay, .. })
                | (Self::Decay, LightShape::Spot { decay, .. }) => Some(decay),
                (Self::Angle, LightShape::Spot { angle, .. }) => Some(angle),
                (Self::Penumbra, LightShape::Spot { penumbra, .. }) => Some(penumbra),
                (Self::Width, LightShape::RectArea { width, .. }) => Some(width),
                (Self::Height, LightShape::RectArea { height, .. }) => Some(height),
                _ => None,
            },
            _ => None,
        }
    }

    fn scalar_slot(self, entity: &mut Entity) -> Option<&mut f32> {
        match (self, entity) {
            (Self::Intensity, Entity::Light(l)) => Some(&mut l.intensity),
            (Self::PositionX, Entity::Light(l)) => l.position_mut().map(|p| &mut p.x),
            (Self::PositionY, Entity::Light(l)) => l.position_mut().map(|p| &mut p.y),
            (Self::PositionZ, Entity::Light(l)) => l.position_mut().map(|p| &mut p.z),
            (Self::PositionX, Entity::Mesh(m)) => Some(&mut m.transform.position.x),
            (Self::PositionY, Entity::Mesh(m)) => Some(&mut m.transform.position.y),
            (Self::PositionZ, Entity::Mesh(m)) => Some(&mut m.transform.position.z),
            (Self::Roughness, Entity::Material(m)) => Some(&mut m.roughness),
            (field, Entity::Light(l)) => match (field, &mut l.shape) {
                (Self::Distance, LightShape::Point { distance, .. })
                | (Self::Distance, LightShape::Spot { distance, .. }) => Some(distance),
                (Self::Decay, LightShape::Point { decay, .. })
                | (Self::Decay, LightShape::Spot { decay, .. }) => Some(decay),
                (Self::Angle, LightShape::Spot { angle, .. }) => Some(angle),
                (Self::Penumbra, LightShape::Spot { penumbra, .. }) => Some(penumbra),
                (Self::Width, LightShape::RectArea { width, .. }) => Some(width),
                (Self::Height, LightShape::RectArea { height, .. }) => Some(height),
                _ => None,
            },
            _ => None,
        }
    }

    fn color(self, entity: &Entity) -> Option<Color> {
        match (self, entity) {
            (Self::Color, Entity::Light(l)) => Some(l.color),
            (Self::Color, Entity::Material(m)) => Some(m.color),
            (
                Self::GroundColor,
                Entity::Light(lightlab_kernel::Light {
                    shape: LightShape::Hemisphere { ground_color, .. },
                    ..
                }),
            ) => Some(*ground_color),
            _ => None,
        }
    }

    fn color_slot(self, entity: &mut Entity) -> Option<&mut Color> {
        match (self, entity) {
            (Self::Color, Entity::Light(l)) => Some(&mut l.color),
            (Self::Color, Entity::Material(m)) => Some(&mut m.color),
            (Self::GroundColor, Entity::Light(l)) => match &mut l.shape {
                LightShape::Hemisphere { ground_color, .. } => Some(ground_color),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a field write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// The entity has no such field.
    NotApplicable,
    /// Scalar written to a color field or the reverse.
    ValueMismatch,
}
