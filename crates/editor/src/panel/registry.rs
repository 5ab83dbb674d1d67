use lumen_engine::prelude::*;
use std::collections::BTreeMap;

/// The first light of each kind found in the scene.
///
/// Kinds with no light in the scene are simply absent. `H` is whatever the
/// caller uses to refer back to a scene object; in the editor it is the
/// light's [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub struct LightRegistry<H = Entity> {
    representatives: BTreeMap<LightKind, H>,
}

impl<H> Default for LightRegistry<H> {
    fn default() -> Self {
        Self {
            representatives: BTreeMap::new(),
        }
    }
}

impl<H: Copy> LightRegistry<H> {
    /// Classify `objects` in the order given, keeping the first of each kind
    pub fn from_scene<'a>(objects: impl IntoIterator<Item = (H, &'a Light)>) -> Self {
        let mut representatives = BTreeMap::new();
        for (handle, light) in objects {
            representatives.entry(light.kind()).or_insert(handle);
        }
        Self { representatives }
    }

    pub fn get(&self, kind: LightKind) -> Option<H> {
        self.representatives.get(&kind).copied()
    }

    pub fn contains(&self, kind: LightKind) -> bool {
        self.representatives.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightKind, H)> + '_ {
        self.representatives
            .iter()
            .map(|(kind, handle)| (*kind, *handle))
    }
}

impl LightRegistry<Entity> {
    /// Scan every light in the world in spawn order.
    /// Entities spawned without a [`SpawnOrder`] come last.
    pub fn from_world(world: &mut World) -> Self {
        let mut query = world.query::<(Entity, &Light, Option<&SpawnOrder>)>();
        let mut lights: Vec<_> = query.iter(world).collect();
        lights.sort_by_key(|(entity, _, order)| (order.is_none(), order.copied(), *entity));

        let registry = Self::from_scene(lights.into_iter().map(|(entity, light, _)| (entity, light)));

        log::debug!(
            "Found {} light kinds to expose: {:?}",
            registry.len(),
            registry.iter().map(|(kind, _)| kind).collect::<Vec<_>>()
        );

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Light {
        PointLight::new(0xff9000, 0.5, 10.0, 2.0).into()
    }

    fn ambient() -> Light {
        AmbientLight::new(0xffffff, 0.5).into()
    }

    #[test]
    fn empty_scene_has_no_representatives() {
        let registry = LightRegistry::<usize>::from_scene([]);
        assert!(registry.is_empty());
        for kind in LightKind::ALL {
            assert_eq!(registry.get(kind), None);
        }
    }

    #[test]
    fn first_of_each_kind_wins() {
        let (first, second, ambient) = (point(), point(), ambient());
        let registry = LightRegistry::from_scene([(7, &first), (3, &ambient), (1, &second)]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(LightKind::Point), Some(7));
        assert_eq!(registry.get(LightKind::Ambient), Some(3));
        assert!(!registry.contains(LightKind::Spot));
    }

    #[test]
    fn world_scan_follows_spawn_order() {
        let mut world = World::new();
        let later = world.spawn((point(), SpawnOrder(5))).id();
        let earlier = world.spawn((point(), SpawnOrder(2))).id();
        world.spawn(point());

        let registry = LightRegistry::from_world(&mut world);
        assert_eq!(registry.get(LightKind::Point), Some(earlier));
        assert_ne!(registry.get(LightKind::Point), Some(later));
    }

    #[test]
    fn unordered_lights_still_register() {
        let mut world = World::new();
        let entity = world.spawn(ambient()).id();

        let registry = LightRegistry::from_world(&mut world);
        assert_eq!(registry.get(LightKind::Ambient), Some(entity));
    }
}
