//! The lighting showcase scene: six lights of every kind, three spinning
//! meshes and a ground plane sharing one standard material.

use crate::animation::Animator;
use crate::entity::{Light, Material, Mesh, Shape};
use crate::helper::HelperFactory;
use crate::registry::{SceneError, SceneRegistry};
use glam::{Vec2, Vec3};
use lightlab_common::{Color, Transform};
use std::f32::consts::PI;

/// Stable entity names of the showcase scene.
pub mod names {
    pub const AMBIENT: &str = "ambient";
    pub const DIRECTIONAL: &str = "directional";
    pub const HEMISPHERE: &str = "hemisphere";
    pub const POINT: &str = "point";
    pub const RECT_AREA: &str = "rect_area";
    pub const SPOT: &str = "spot";

    pub const MATERIAL: &str = "standard";

    pub const SPHERE: &str = "sphere";
    pub const CUBE: &str = "cube";
    pub const TORUS: &str = "torus";
    pub const PLANE: &str = "plane";

    pub const LIGHTS: [&str; 6] = [AMBIENT, DIRECTIONAL, HEMISPHERE, POINT, RECT_AREA, SPOT];
    pub const SPINNING: [&str; 3] = [SPHERE, CUBE, TORUS];
}

/// Spin rate shared by the sphere, cube and torus (rad/s about x, y).
pub const SPIN: Vec2 = Vec2::new(0.15, 0.1);

/// Display size of the small gizmo helpers.
pub const HELPER_SIZE: f32 = 0.2;

pub fn lights() -> Vec<Light> {
    vec![
        Light::ambient(names::AMBIENT, Color::from_hex(0xffffff), 0.5),
        Light::directional(
            names::DIRECTIONAL,
            Color::from_hex(0x00fffc),
            0.3,
            Vec3::new(1.0, 0.25, 0.0),
        ),
        Light::hemisphere(
            names::HEMISPHERE,
            Color::from_hex(0xff0000),
            Color::from_hex(0x0000ff),
            0.3,
        ),
        Light::point(names::POINT, Color::from_hex(0xff9000), 0.5, 10.0, 2.0)
            .at(Vec3::new(1.0, -0.5, 1.0)),
        Light::rect_area(names::RECT_AREA, Color::from_hex(0x4e00ff), 2.0, 1.0, 1.0)
            .at(Vec3::new(1.0, -0.5, 1.5))
            .aimed_at(Vec3::ZERO),
        Light::spot(
            names::SPOT,
            Color::from_hex(0x78ff00),
            0.5,
            10.0,
            PI * 0.1,
            0.25,
            1.0,
        )
        .at(Vec3::new(0.0, 2.0, 3.0))
        .aimed_at(Vec3::new(-0.75, 0.0, 0.0)),
    ]
}

pub fn material() -> Material {
    Material {
        roughness: 0.4,
        ..Material::standard(names::MATERIAL)
    }
}

pub fn meshes() -> Vec<Mesh> {
    vec![
        Mesh::new(
            names::SPHERE,
            Shape::Sphere {
                radius: 0.5,
                width_segments: 32,
                height_segments: 32,
            },
            names::MATERIAL,
        )
        .with_transform(Transform::from_position(Vec3::new(-1.5, 0.0, 0.0))),
        Mesh::new(
            names::CUBE,
            Shape::Box {
                width: 0.75,
                height: 0.75,
                depth: 0.75,
            },
            names::MATERIAL,
        ),
        Mesh::new(
            names::TORUS,
            Shape::Torus {
                radius: 0.3,
                tube: 0.2,
                radial_segments: 32,
                tubular_segments: 64,
            },
            names::MATERIAL,
        )
        .with_transform(Transform::from_position(Vec3::new(1.5, 0.0, 0.0))),
        Mesh::new(
            names::PLANE,
            Shape::Plane {
                width: 5.0,
                height: 5.0,
            },
            names::MATERIAL,
        )
        .with_transform(Transform {
            position: Vec3::new(0.0, -0.65, 0.0),
            rotation: Vec3::new(-PI * 0.5, 0.0, 0.0),
            ..Transform::default()
        }),
    ]
}

/// Build the showcase scene with helpers attached and the spinning meshes
/// tracked by the returned animator.
pub fn showcase() -> Result<(SceneRegistry, Animator), SceneError> {
    let mut registry = SceneRegistry::new();
    registry.register(material())?;

    for light in lights() {
        let kind = light.kind();
        let name = light.name.clone();
        registry.register(light)?;
        if let Some(factory) = HelperFactory::for_kind(kind, HELPER_SIZE) {
            registry.attach_helper(&name, factory)?;
        }
    }

    for mesh in meshes() {
        registry.register(mesh)?;
    }

    let mut animator = Animator::new();
    for name in names::SPINNING {
        animator.track(&registry, name, SPIN)?;
    }

    tracing::info!(
        entities = registry.len(),
        helpers = registry.helpers().count(),
        animated = animator.len(),
        "showcase scene built"
    );
    Ok((registry, animator))
}
