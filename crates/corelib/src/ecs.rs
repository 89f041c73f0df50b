//! Tiny ECS: World, Entity, components: Transform + Renderable.

use crate::transform::Transform;

/// Entity id (dense, index into component arrays).
pub type Entity = u32;

/// Handle to a mesh uploaded by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Handle to a texture uploaded by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Renderable component: one mesh drawn with one texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub mesh: MeshId,
    pub texture: TextureId,
}

/// Very small ECS world with dense parallel arrays.
/// No allocations per-frame; spawn may allocate to grow capacity.
#[derive(Default)]
pub struct World {
    transforms: Vec<Transform>,
    renderables: Vec<Option<Renderable>>,
    alive: Vec<bool>,
    len: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn entity with Transform and optional Renderable.
    pub fn spawn(&mut self, t: Transform, r: Option<Renderable>) -> Entity {
        let id = self.len;
        let idx = id as usize;
        self.len += 1;

        if idx >= self.transforms.len() {
            // grow all arrays equally
            let new_len = (idx + 1).next_power_of_two().max(8);
            self.transforms.resize(new_len, Transform::identity());
            self.renderables.resize(new_len, None);
            self.alive.resize(new_len, false);
        }

        self.transforms[idx] = t;
        self.renderables[idx] = r;
        self.alive[idx] = true;
        id
    }

    /// Number of entities ever spawned.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_alive(&self, e: Entity) -> bool {
        let i = e as usize;
        i < self.alive.len() && self.alive[i]
    }

    #[inline]
    pub fn transform(&self, e: Entity) -> Option<&Transform> {
        self.is_alive(e).then(|| &self.transforms[e as usize])
    }

    #[inline]
    pub fn transform_mut(&mut self, e: Entity) -> Option<&mut Transform> {
        let i = e as usize;
        if self.is_alive(e) {
            Some(&mut self.transforms[i])
        } else {
            None
        }
    }

    /// Iterate over (Entity, Transform, Renderable) for drawable entities.
    pub fn iter_renderables(&self) -> impl Iterator<Item = (Entity, &Transform, &Renderable)> {
        (0..self.len as usize).filter_map(move |i| {
            if self.alive.get(i).copied().unwrap_or(false) {
                if let Some(r) = self.renderables[i].as_ref() {
                    return Some((i as Entity, &self.transforms[i], r));
                }
            }
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    fn renderable(mesh: u32) -> Renderable {
        Renderable {
            mesh: MeshId(mesh),
            texture: TextureId(mesh),
        }
    }

    #[test]
    fn spawn_grows_past_initial_capacity() {
        let mut world = World::new();
        for i in 0..33 {
            world.spawn(Transform::identity(), Some(renderable(i)));
        }
        assert_eq!(world.len(), 33);
        assert!(world.is_alive(32));
        assert!(!world.is_alive(33));
        assert_eq!(world.iter_renderables().count(), 33);
    }

    #[test]
    fn entities_without_renderable_are_skipped() {
        let mut world = World::new();
        let anchor = world.spawn(Transform::identity(), None);
        let piece = world.spawn(Transform::identity(), Some(renderable(4)));

        let drawn: Vec<_> = world.iter_renderables().map(|(e, _, r)| (e, *r)).collect();
        assert_eq!(drawn, vec![(piece, renderable(4))]);

        if let Some(t) = world.transform_mut(anchor) {
            t.translation = vec3(1.0, 2.0, 3.0);
        }
        assert_eq!(
            world.transform(anchor).map(|t| t.translation),
            Some(vec3(1.0, 2.0, 3.0))
        );
    }
}
