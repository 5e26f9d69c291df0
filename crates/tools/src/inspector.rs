use lightlab_common::Color;
use lightlab_kernel::{Animator, EntityKind, LightKind, SceneRegistry};
use serde::Serialize;
use std::fmt;

/// Scene inspector for developer tooling.
///
/// Read-only queries against the registry for logging, the CLI and the
/// desktop side panel.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(registry: &SceneRegistry, animator: &Animator) -> SceneSummary {
        let count = |kind| registry.entities().filter(|e| e.kind() == kind).count();
        SceneSummary {
            entities: registry.len(),
            lights: count(EntityKind::Light),
            meshes: count(EntityKind::Mesh),
            materials: count(EntityKind::Material),
            helpers: registry.helpers().count(),
            animated: animator.len(),
        }
    }

    pub fn inspect_light(registry: &SceneRegistry, name: &str) -> Option<LightInfo> {
        let light = registry.light(name).ok()?;
        Some(LightInfo {
            name: light.name.clone(),
            kind: light.kind(),
            color: light.color.to_hex(),
            intensity: light.intensity,
            position: light.position().map(|p| p.to_array()),
            helper_segments: registry.helper(name).map(|h| h.segments.len()),
        })
    }

    pub fn inspect_mesh(registry: &SceneRegistry, name: &str) -> Option<MeshInfo> {
        let mesh = registry.mesh(name).ok()?;
        Some(MeshInfo {
            name: mesh.name.clone(),
            material: mesh.material.clone(),
            position: mesh.transform.position.to_array(),
            rotation: mesh.transform.rotation.to_array(),
        })
    }

    /// Every light and mesh, in registration order.
    pub fn snapshot(registry: &SceneRegistry) -> SceneSnapshot {
        SceneSnapshot {
            lights: registry
                .lights()
                .filter_map(|l| Self::inspect_light(registry, &l.name))
                .collect(),
            meshes: registry
                .meshes()
                .filter_map(|m| Self::inspect_mesh(registry, &m.name))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub entities: usize,
    pub lights: usize,
    pub meshes: usize,
    pub materials: usize,
    pub helpers: usize,
    pub animated: usize,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: entities={} lights={} meshes={} materials={} helpers={} animated={}",
            self.entities, self.lights, self.meshes, self.materials, self.helpers, self.animated
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightInfo {
    pub name: String,
    pub kind: LightKind,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub intensity: f32,
    pub position: Option<[f32; 3]>,
    pub helper_segments: Option<usize>,
}

impl fmt::Display for LightInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} intensity={:.2}",
            self.name,
            self.kind,
            Color::from_hex(self.color),
            self.intensity
        )?;
        if let Some([x, y, z]) = self.position {
            write!(f, " pos=({x:.2}, {y:.2}, {z:.2})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshInfo {
    pub name: String,
    pub material: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl fmt::Display for MeshInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        let [rx, ry, rz] = self.rotation;
        write!(
            f,
            "{} [{}] pos=({x:.2}, {y:.2}, {z:.2}) rot=({rx:.3}, {ry:.3}, {rz:.3})",
            self.name, self.material
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub lights: Vec<LightInfo>,
    pub meshes: Vec<MeshInfo>,
}
