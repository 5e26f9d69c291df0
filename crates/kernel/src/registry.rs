use crate::entity::{Entity, EntityKind, Light, Material, Mesh};
use crate::helper::{Helper, HelperFactory};
use std::collections::BTreeMap;

/// Errors from registry construction and lookup.
///
/// All of these indicate a static configuration defect; callers abort
/// initialization rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("an entity named {0:?} is already registered")]
    DuplicateName(String),
    #[error("no entity named {0:?}")]
    NotFound(String),
    #[error("{name:?} is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: EntityKind,
        found: EntityKind,
    },
    #[error("light {0:?} has no helper attached")]
    NoHelper(String),
    #[error("light {0:?} already has a helper attached")]
    HelperExists(String),
}

struct HelperSlot {
    helper: Helper,
    factory: HelperFactory,
}

/// Name-keyed store of every light, mesh and material in the scene.
///
/// The population is write-once: entities are registered during startup and
/// never removed. Iteration follows registration order.
#[derive(Default)]
pub struct SceneRegistry {
    entities: Vec<Entity>,
    index: BTreeMap<String, usize>,
    helpers: BTreeMap<String, HelperSlot>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named entity. Fails without modifying the registry if the
    /// name is taken.
    pub fn register(&mut self, entry: impl Into<Entity>) -> Result<(), SceneError> {
        let entry = entry.into();
        let name = entry.name().to_owned();
        if self.index.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }
        tracing::debug!(name = %name, kind = %entry.kind(), "registered entity");
        self.index.insert(name, self.entities.len());
        self.entities.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Entity, SceneError> {
        self.index
            .get(name)
            .map(|&i| &self.entities[i])
            .ok_or_else(|| SceneError::NotFound(name.to_owned()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Entity, SceneError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.entities[i]),
            None => Err(SceneError::NotFound(name.to_owned())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Light(l) => Some(l),
            _ => None,
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Mesh(m) => Some(m),
            _ => None,
        })
    }

    pub fn light(&self, name: &str) -> Result<&Light, SceneError> {
        match self.get(name)? {
            Entity::Light(l) => Ok(l),
            other => Err(wrong_kind(name, EntityKind::Light, other)),
        }
    }

    pub fn light_mut(&mut self, name: &str) -> Result<&mut Light, SceneError> {
        match self.get_mut(name)? {
            Entity::Light(l) => Ok(l),
            other => Err(wrong_kind(name, EntityKind::Light, other)),
        }
    }

    pub fn mesh(&self, name: &str) -> Result<&Mesh, SceneError> {
        match self.get(name)? {
            Entity::Mesh(m) => Ok(m),
            other => Err(wrong_kind(name, EntityKind::Mesh, other)),
        }
    }

    pub fn mesh_mut(&mut self, name: &str) -> Result<&mut Mesh, SceneError> {
        match self.get_mut(name)? {
            Entity::Mesh(m) => Ok(m),
            other => Err(wrong_kind(name, EntityKind::Mesh, other)),
        }
    }

    pub fn material(&self, name: &str) -> Result<&Material, SceneError> {
        match self.get(name)? {
            Entity::Material(m) => Ok(m),
            other => Err(wrong_kind(name, EntityKind::Material, other)),
        }
    }

    pub fn material_mut(&mut self, name: &str) -> Result<&mut Material, SceneError> {
        match self.get_mut(name)? {
            Entity::Material(m) => Ok(m),
            other => Err(wrong_kind(name, EntityKind::Material, other)),
        }
    }

    /// Build a helper from the light's current attributes and keep the
    /// factory so the helper can be refreshed later.
    pub fn attach_helper(
        &mut self,
        light_name: &str,
        factory: HelperFactory,
    ) -> Result<&Helper, SceneError> {
        if self.helpers.contains_key(light_name) {
            return Err(SceneError::HelperExists(light_name.to_owned()));
        }
        let helper = factory.build(self.light(light_name)?);
        tracing::debug!(light = light_name, factory = factory.label(), "attached helper");
        let slot = self
            .helpers
            .entry(light_name.to_owned())
            .or_insert(HelperSlot { helper, factory });
        Ok(&slot.helper)
    }

    /// Re-run the light's helper factory against its current attributes.
    pub fn refresh_helper(&mut self, light_name: &str) -> Result<&Helper, SceneError> {
        let light = match self.index.get(light_name) {
            Some(&i) => match &self.entities[i] {
                Entity::Light(l) => l,
                other => return Err(wrong_kind(light_name, EntityKind::Light, other)),
            },
            None => return Err(SceneError::NotFound(light_name.to_owned())),
        };
        let slot = self
            .helpers
            .get_mut(light_name)
            .ok_or_else(|| SceneError::NoHelper(light_name.to_owned()))?;
        slot.helper = slot.factory.build(light);
        tracing::trace!(light = light_name, "refreshed helper");
        Ok(&slot.helper)
    }

    pub fn has_helper(&self, light_name: &str) -> bool {
        self.helpers.contains_key(light_name)
    }

    pub fn helper(&self, light_name: &str) -> Option<&Helper> {
        self.helpers.get(light_name).map(|s| &s.helper)
    }

    /// All helpers, ordered by light name.
    pub fn helpers(&self) -> impl Iterator<Item = &Helper> {
        self.helpers.values().map(|s| &s.helper)
    }
}

fn wrong_kind(name: &str, expected: EntityKind, found: &Entity) -> SceneError {
    SceneError::WrongKind {
        name: name.to_owned(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Shape;
    use glam::Vec3;
    use lightlab_common::Color;

    fn point_light() -> Light {
        Light::point("point", Color::from_hex(0xff9000), 0.5, 10.0, 2.0)
            .at(Vec3::new(1.0, -0.5, 1.0))
    }

    #[test]
    fn registry_starts_empty() {
        let r = SceneRegistry::new();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn register_and_get() {
        let mut r = SceneRegistry::new();
        r.register(point_light()).unwrap();
        assert!(r.contains("point"));
        assert_eq!(r.get("point").unwrap().name(), "point");
        assert_eq!(r.light("point").unwrap().intensity, 0.5);
    }

    #[test]
    fn duplicate_name_keeps_first_entity() {
        let mut r = SceneRegistry::new();
        r.register(point_light()).unwrap();
        let imposter = Light::ambient("point", Color::BLACK, 0.9);
        let err = r.register(imposter).unwrap_err();
        assert_eq!(err, SceneError::DuplicateName("point".into()));
        assert_eq!(r.len(), 1);
        let kept = r.light("point").unwrap();
        assert_eq!(kept.intensity, 0.5);
        assert_eq!(kept.color, Color::from_hex(0xff9000));
    }

    #[test]
    fn duplicate_across_kinds_is_rejected() {
        let mut r = SceneRegistry::new();
        r.register(Material::standard("shared")).unwrap();
        let mesh = Mesh::new(
            "shared",
            Shape::Plane {
                width: 5.0,
                height: 5.0,
            },
            "shared",
        );
        assert!(matches!(
            r.register(mesh),
            Err(SceneError::DuplicateName(_))
        ));
    }

    #[test]
    fn missing_name_is_not_found() {
        let r = SceneRegistry::new();
        assert_eq!(
            r.get("nope").unwrap_err(),
            SceneError::NotFound("nope".into())
        );
    }

    #[test]
    fn typed_lookup_rejects_wrong_kind() {
        let mut r = SceneRegistry::new();
        r.register(Material::standard("standard")).unwrap();
        let err = r.light("standard").unwrap_err();
        assert_eq!(
            err,
            SceneError::WrongKind {
                name: "standard".into(),
                expected: EntityKind::Light,
                found: EntityKind::Material,
            }
        );
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut r = SceneRegistry::new();
        r.register(Light::ambient("b", Color::WHITE, 0.5)).unwrap();
        r.register(Light::ambient("a", Color::WHITE, 0.5)).unwrap();
        let names: Vec<&str> = r.entities().map(|e| e.name()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn helper_tracks_light_after_refresh() {
        let mut r = SceneRegistry::new();
        r.register(point_light()).unwrap();
        r.attach_helper("point", HelperFactory::point(0.2)).unwrap();
        let before = r.helper("point").unwrap().clone();

        *r.light_mut("point").unwrap().position_mut().unwrap() = Vec3::new(0.0, 1.0, 0.0);
        // stale until refreshed
        assert_eq!(r.helper("point").unwrap(), &before);

        let after = r.refresh_helper("point").unwrap();
        assert_ne!(after, &before);
        assert!(
            after
                .segments
                .iter()
                .any(|s| (s.a - Vec3::new(0.0, 1.2, 0.0)).length() < 1e-6)
        );
    }

    #[test]
    fn attach_helper_requires_a_light() {
        let mut r = SceneRegistry::new();
        r.register(Material::standard("standard")).unwrap();
        assert!(matches!(
            r.attach_helper("standard", HelperFactory::point(0.2)),
            Err(SceneError::WrongKind { .. })
        ));
        assert!(matches!(
            r.attach_helper("ghost", HelperFactory::point(0.2)),
            Err(SceneError::NotFound(_))
        ));
    }

    #[test]
    fn helper_is_one_to_one() {
        let mut r = SceneRegistry::new();
        r.register(point_light()).unwrap();
        r.attach_helper("point", HelperFactory::point(0.2)).unwrap();
        assert_eq!(
            r.attach_helper("point", HelperFactory::point(0.5))
                .unwrap_err(),
            SceneError::HelperExists("point".into())
        );
    }

    #[test]
    fn refresh_without_helper_fails() {
        let mut r = SceneRegistry::new();
        r.register(point_light()).unwrap();
        assert_eq!(
            r.refresh_helper("point").unwrap_err(),
            SceneError::NoHelper("point".into())
        );
    }
}
