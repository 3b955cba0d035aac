//! Keyed enter/update/exit reconciliation of scene nodes against data.

use std::collections::BTreeMap;

use scene::World;
use scene::entity::EntityId;

/// Counts from one reconciliation pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct JoinReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl JoinReport {
    pub fn is_structural(&self) -> bool {
        self.entered > 0 || self.exited > 0
    }
}

/// Nodes bound to data keys.
///
/// Iteration and therefore node creation order follow key order, which keeps
/// passes deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join<K: Ord + Copy> {
    nodes: BTreeMap<K, EntityId>,
}

impl<K: Ord + Copy> Default for Join<K> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Join<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: K) -> Option<EntityId> {
        self.nodes.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes.values().copied()
    }

    /// Forgets every binding without touching the world (used after `World::clear`).
    pub fn forget(&mut self) {
        self.nodes.clear();
    }

    /// Reconciles bound nodes with keyed `items`.
    ///
    /// - nodes whose key is absent are despawned (exit);
    /// - keys without a live node get one from `enter`;
    /// - every key then goes through `update`, entered ones included.
    ///
    /// Duplicate keys are bound once, to the first item carrying them.
    pub fn reconcile<V, I, E, U>(
        &mut self,
        world: &mut World,
        items: I,
        mut enter: E,
        mut update: U,
    ) -> JoinReport
    where
        I: IntoIterator<Item = (K, V)>,
        E: FnMut(&mut World, K, &V) -> EntityId,
        U: FnMut(&mut World, K, &V, EntityId),
    {
        let mut report = JoinReport::default();
        let mut wanted: BTreeMap<K, V> = BTreeMap::new();
        for (key, value) in items {
            wanted.entry(key).or_insert(value);
        }

        let stale: Vec<K> = self
            .nodes
            .iter()
            .filter(|(k, e)| !wanted.contains_key(*k) || !world.is_alive(**e))
            .map(|(k, _)| *k)
            .collect();
        for key in stale {
            if let Some(entity) = self.nodes.remove(&key)
                && world.despawn(entity)
            {
                report.exited += 1;
            }
        }

        for (key, value) in wanted {
            let entity = match self.nodes.get(&key) {
                Some(e) => *e,
                None => {
                    let e = enter(world, key, &value);
                    self.nodes.insert(key, e);
                    report.entered += 1;
                    e
                }
            };
            update(world, key, &value, entity);
            report.updated += 1;
        }

        report
    }
}
