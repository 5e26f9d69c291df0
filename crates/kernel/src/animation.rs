use crate::registry::{SceneError, SceneRegistry};
use glam::{Vec2, Vec3};

/// A mesh that spins at constant angular velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedMesh {
    pub mesh: String,
    /// Orientation at `t = 0`.
    pub base: Vec3,
    /// Radians per second about the x and y axes.
    pub angular_velocity: Vec2,
}

impl AnimatedMesh {
    /// Orientation at time `t`. Depends only on `t`, never on prior frames.
    pub fn rotation_at(&self, t: f32) -> Vec3 {
        Vec3::new(
            self.base.x + self.angular_velocity.x * t,
            self.base.y + self.angular_velocity.y * t,
            self.base.z,
        )
    }
}

/// The set of animated meshes and the rotation update applied each frame.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    meshes: Vec<AnimatedMesh>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating a registered mesh. Its current rotation becomes the
    /// base orientation.
    pub fn track(
        &mut self,
        registry: &SceneRegistry,
        mesh: &str,
        angular_velocity: Vec2,
    ) -> Result<(), SceneError> {
        let base = registry.mesh(mesh)?.transform.rotation;
        self.meshes.push(AnimatedMesh {
            mesh: mesh.to_owned(),
            base,
            angular_velocity,
        });
        Ok(())
    }

    pub fn meshes(&self) -> &[AnimatedMesh] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Assign every tracked mesh its orientation for time `t`.
    pub fn apply(&self, registry: &mut SceneRegistry, t: f32) -> Result<(), SceneError> {
        for anim in &self.meshes {
            registry.mesh_mut(&anim.mesh)?.transform.rotation = anim.rotation_at(t);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Mesh, Shape};
    use lightlab_common::Transform;

    fn registry_with_cube(rotation: Vec3) -> SceneRegistry {
        let mut r = SceneRegistry::new();
        r.register(
            Mesh::new(
                "cube",
                Shape::Box {
                    width: 0.75,
                    height: 0.75,
                    depth: 0.75,
                },
                "standard",
            )
            .with_transform(Transform {
                rotation,
                ..Transform::default()
            }),
        )
        .unwrap();
        r
    }

    #[test]
    fn rotation_is_absolute_from_base() {
        let mut r = registry_with_cube(Vec3::new(0.0, 0.0, 0.3));
        let mut anim = Animator::new();
        anim.track(&r, "cube", Vec2::new(0.15, 0.1)).unwrap();

        anim.apply(&mut r, 2.0).unwrap();
        let rot = r.mesh("cube").unwrap().transform.rotation;
        assert!((rot.x - 0.3).abs() < 1e-6);
        assert!((rot.y - 0.2).abs() < 1e-6);
        assert_eq!(rot.z, 0.3);
    }

    #[test]
    fn apply_is_idempotent_for_same_time() {
        let mut r = registry_with_cube(Vec3::ZERO);
        let mut anim = Animator::new();
        anim.track(&r, "cube", Vec2::new(0.15, 0.1)).unwrap();

        for t in [0.0, 0.5, 3.25, 100.0] {
            anim.apply(&mut r, t).unwrap();
            let first = r.mesh("cube").unwrap().transform;
            anim.apply(&mut r, t).unwrap();
            assert_eq!(r.mesh("cube").unwrap().transform, first);
        }
    }

    #[test]
    fn replay_out_of_order_matches() {
        let mut r = registry_with_cube(Vec3::ZERO);
        let mut anim = Animator::new();
        anim.track(&r, "cube", Vec2::new(0.15, 0.1)).unwrap();

        anim.apply(&mut r, 4.0).unwrap();
        let direct = r.mesh("cube").unwrap().transform.rotation;
        anim.apply(&mut r, 9.0).unwrap();
        anim.apply(&mut r, 4.0).unwrap();
        assert_eq!(r.mesh("cube").unwrap().transform.rotation, direct);
    }

    #[test]
    fn tracking_unknown_mesh_fails() {
        let r = SceneRegistry::new();
        let mut anim = Animator::new();
        assert!(matches!(
            anim.track(&r, "ghost", Vec2::ONE),
            Err(SceneError::NotFound(_))
        ));
        assert!(anim.is_empty());
    }
}
