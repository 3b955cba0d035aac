use crate::components::{Ease, Highlight, Material, NodeClass, Shape, Transform, Tween};
use crate::entity::EntityId;
use crate::viewpoint::OrthoViewpoint;
use foundation::handles::Handle;
use foundation::math::Vec3;
use foundation::time::{Time, TimeSpan};

/// Flat scene graph with per-component columns indexed by slot.
///
/// Slots are recycled after `despawn`; the generation stored in each
/// `EntityId` rejects stale ids, so every accessor returns `None` (or does
/// nothing) for a node that no longer exists.
#[derive(Debug, Default)]
pub struct World {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    parents: Vec<Option<EntityId>>,
    transforms: Vec<Option<Transform>>,
    tweens: Vec<Option<Tween>>,
    shapes: Vec<Option<Shape>>,
    materials: Vec<Option<Material>>,
    classes: Vec<Option<NodeClass>>,
    highlights: Vec<Option<Highlight>>,
    viewpoint: Option<OrthoViewpoint>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let index = match self.free.pop() {
            Some(idx) => idx,
            None => {
                let idx = self.generations.len() as u32;
                self.ensure_capacity(idx as usize);
                idx
            }
        };
        let idx = index as usize;
        self.alive[idx] = true;
        EntityId(Handle::new(index, self.generations[idx]))
    }

    pub fn spawn_child(&mut self, parent: EntityId) -> EntityId {
        let child = self.spawn();
        if self.is_alive(parent) {
            self.parents[child.index() as usize] = Some(parent);
        }
        child
    }

    /// Removes `entity` and all of its descendants. Returns `false` for stale ids.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        for child in self.children(entity) {
            self.despawn(child);
        }
        self.release(entity.index() as usize);
        self.free.push(entity.index());
        true
    }

    /// Drops every node and the viewpoint. Slot generations survive, so ids
    /// handed out before the clear stay stale.
    pub fn clear(&mut self) {
        for idx in 0..self.alive.len() {
            if self.alive[idx] {
                self.release(idx);
            }
        }
        // Lowest slot is reused first.
        self.free = (0..self.alive.len() as u32).rev().collect();
        self.viewpoint = None;
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        let idx = entity.index() as usize;
        self.alive.get(idx).copied().unwrap_or(false)
            && self.generations[idx] == entity.generation()
    }

    pub fn len(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entities in ascending slot order.
    pub fn entities(&self) -> Vec<EntityId> {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| self.id_at(idx))
            .collect()
    }

    pub fn entities_with_class(&self, class: NodeClass) -> Vec<EntityId> {
        self.entities()
            .into_iter()
            .filter(|e| self.class(*e) == Some(class))
            .collect()
    }

    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.slot(entity).and_then(|idx| self.parents[idx])
    }

    pub fn children(&self, entity: EntityId) -> Vec<EntityId> {
        if !self.is_alive(entity) {
            return Vec::new();
        }
        self.parents
            .iter()
            .enumerate()
            .filter(|(idx, p)| self.alive[*idx] && **p == Some(entity))
            .map(|(idx, _)| self.id_at(idx))
            .collect()
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        if let Some(idx) = self.slot(entity) {
            self.transforms[idx] = Some(transform);
        }
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.slot(entity).and_then(|idx| self.transforms[idx])
    }

    pub fn set_shape(&mut self, entity: EntityId, shape: Shape) {
        if let Some(idx) = self.slot(entity) {
            self.shapes[idx] = Some(shape);
        }
    }

    pub fn shape(&self, entity: EntityId) -> Option<&Shape> {
        self.slot(entity).and_then(|idx| self.shapes[idx].as_ref())
    }

    pub fn shape_mut(&mut self, entity: EntityId) -> Option<&mut Shape> {
        let idx = self.slot(entity)?;
        self.shapes[idx].as_mut()
    }

    pub fn set_material(&mut self, entity: EntityId, material: Material) {
        if let Some(idx) = self.slot(entity) {
            self.materials[idx] = Some(material);
        }
    }

    pub fn material(&self, entity: EntityId) -> Option<Material> {
        self.slot(entity).and_then(|idx| self.materials[idx])
    }

    pub fn material_mut(&mut self, entity: EntityId) -> Option<&mut Material> {
        let idx = self.slot(entity)?;
        self.materials[idx].as_mut()
    }

    pub fn set_class(&mut self, entity: EntityId, class: NodeClass) {
        if let Some(idx) = self.slot(entity) {
            self.classes[idx] = Some(class);
        }
    }

    pub fn class(&self, entity: EntityId) -> Option<NodeClass> {
        self.slot(entity).and_then(|idx| self.classes[idx])
    }

    pub fn set_highlight(&mut self, entity: EntityId, highlight: Highlight) {
        if let Some(idx) = self.slot(entity) {
            self.highlights[idx] = Some(highlight);
        }
    }

    pub fn highlight(&self, entity: EntityId) -> Option<Highlight> {
        self.slot(entity).and_then(|idx| self.highlights[idx])
    }

    pub fn set_viewpoint(&mut self, viewpoint: OrthoViewpoint) {
        self.viewpoint = Some(viewpoint);
    }

    pub fn viewpoint(&self) -> Option<&OrthoViewpoint> {
        self.viewpoint.as_ref()
    }

    /// Transitions `entity` towards `target`, starting from wherever it is at `now`.
    ///
    /// A pending transition is replaced rather than queued. A non-positive
    /// duration applies `target` immediately.
    pub fn animate_transform(
        &mut self,
        entity: EntityId,
        target: Transform,
        now: Time,
        duration_s: f64,
        ease: Ease,
    ) {
        let Some(idx) = self.slot(entity) else {
            return;
        };
        if duration_s <= 0.0 {
            self.transforms[idx] = Some(target);
            self.tweens[idx] = None;
            return;
        }
        let from = match self.tweens[idx] {
            Some(tween) => tween.sample(now),
            None => self.transforms[idx].unwrap_or_default(),
        };
        self.transforms[idx] = Some(from);
        self.tweens[idx] = Some(Tween::new(
            from,
            target,
            TimeSpan::starting_at(now, duration_s),
            ease,
        ));
    }

    pub fn tween(&self, entity: EntityId) -> Option<Tween> {
        self.slot(entity).and_then(|idx| self.tweens[idx])
    }

    /// Target transform: the tween's destination if one is running.
    pub fn target_transform(&self, entity: EntityId) -> Option<Transform> {
        self.tween(entity)
            .map(|t| t.to)
            .or_else(|| self.transform(entity))
    }

    /// Steps every transition to `now`. Returns the number still running.
    pub fn advance(&mut self, now: Time) -> usize {
        let mut running = 0;
        for idx in 0..self.tweens.len() {
            let Some(tween) = self.tweens[idx] else {
                continue;
            };
            if tween.is_finished(now) {
                self.transforms[idx] = Some(tween.to);
                self.tweens[idx] = None;
            } else {
                self.transforms[idx] = Some(tween.sample(now));
                running += 1;
            }
        }
        running
    }

    pub fn is_settled(&self) -> bool {
        self.tweens.iter().all(Option::is_none)
    }

    /// Maps a point from `entity`'s local space through its ancestors into world space.
    pub fn to_world(&self, entity: EntityId, local: Vec3) -> Option<Vec3> {
        let mut p = local;
        let mut cur = Some(entity);
        while let Some(e) = cur {
            let idx = self.slot(e)?;
            if let Some(t) = self.transforms[idx] {
                p = t.apply(p);
            }
            cur = self.parents[idx];
        }
        Some(p)
    }

    /// Root-first chain of transforms from the top ancestor down to `entity`.
    pub fn transform_chain(&self, entity: EntityId) -> Option<Vec<Transform>> {
        let mut chain = Vec::new();
        let mut cur = Some(entity);
        while let Some(e) = cur {
            let idx = self.slot(e)?;
            chain.push(self.transforms[idx].unwrap_or_default());
            cur = self.parents[idx];
        }
        chain.reverse();
        Some(chain)
    }

    fn slot(&self, entity: EntityId) -> Option<usize> {
        self.is_alive(entity).then_some(entity.index() as usize)
    }

    fn release(&mut self, idx: usize) {
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.parents[idx] = None;
        self.transforms[idx] = None;
        self.tweens[idx] = None;
        self.shapes[idx] = None;
        self.materials[idx] = None;
        self.classes[idx] = None;
        self.highlights[idx] = None;
    }

    fn id_at(&self, idx: usize) -> EntityId {
        EntityId(Handle::new(idx as u32, self.generations[idx]))
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.generations.len() <= idx {
            let new_len = idx + 1;
            self.generations.resize(new_len, 0);
            self.alive.resize(new_len, false);
            self.parents.resize(new_len, None);
            self.transforms.resize(new_len, None);
            self.tweens.resize(new_len, None);
            self.shapes.resize(new_len, None);
            self.materials.resize(new_len, None);
            self.classes.resize(new_len, None);
            self.highlights.resize(new_len, None);
        }
    }
}
