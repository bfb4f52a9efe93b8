//! Identity-keyed store of live organisms.

use crate::error::{Result, SimError};
use phyta_data::{Dna, Organism, OrganismId, Position};
use std::collections::BTreeMap;

/// Owns every live [`Organism`]. Ids come from a monotonic counter and are
/// never handed out twice, even after the organism is gone.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    organisms: BTreeMap<OrganismId, Organism>,
    next_id: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newborn and returns its fresh id.
    pub fn create(&mut self, dna: Dna, position: Position, environmental_richness: f64) -> OrganismId {
        let id = OrganismId(self.next_id);
        self.next_id += 1;
        self.organisms
            .insert(id, Organism::newborn(id, position, dna, environmental_richness));
        id
    }

    /// Removes and returns the organism. Unknown ids are an error, not a panic.
    pub fn destroy(&mut self, id: OrganismId) -> Result<Organism> {
        self.organisms.remove(&id).ok_or(SimError::NotFound(id))
    }

    #[must_use]
    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn get_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.organisms.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: OrganismId) -> bool {
        self.organisms.contains_key(&id)
    }

    /// Owned copy of every live organism, ordered by id.
    #[must_use]
    pub fn all(&self) -> Vec<Organism> {
        self.organisms.values().cloned().collect()
    }

    /// Ids alive right now, ordered. Later inserts or removals do not affect it.
    #[must_use]
    pub fn ids(&self) -> Vec<OrganismId> {
        self.organisms.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Id the next `create` will return.
    #[must_use]
    pub fn next_id(&self) -> OrganismId {
        OrganismId(self.next_id)
    }

    /// Removes everyone, returning them in id order. The id counter keeps going.
    pub fn drain_all(&mut self) -> Vec<Organism> {
        std::mem::take(&mut self.organisms).into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyta_data::Decision;

    fn dna() -> Dna {
        Dna::new(2, vec![Decision::Invest], vec![1]).unwrap()
    }

    #[test]
    fn test_ids_are_monotonic_and_not_reused() {
        let mut registry = Registry::new();
        let a = registry.create(dna(), Position::new(0, 0), 1.0);
        let b = registry.create(dna(), Position::new(1, 0), 1.0);
        registry.destroy(a).unwrap();
        let c = registry.create(dna(), Position::new(0, 0), 1.0);
        assert_eq!(a, OrganismId(0));
        assert_eq!(b, OrganismId(1));
        assert_eq!(c, OrganismId(2));
    }

    #[test]
    fn test_destroy_unknown_is_not_found() {
        let mut registry = Registry::new();
        let id = registry.create(dna(), Position::new(0, 0), 1.0);
        registry.destroy(id).unwrap();
        assert_eq!(registry.destroy(id), Err(SimError::NotFound(id)));
    }

    #[test]
    fn test_snapshot_is_stable() {
        let mut registry = Registry::new();
        let a = registry.create(dna(), Position::new(0, 0), 1.0);
        let ids = registry.ids();
        let all = registry.all();
        registry.create(dna(), Position::new(1, 0), 1.0);
        registry.destroy(a).unwrap();
        assert_eq!(ids, vec![a]);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, a);
    }

    #[test]
    fn test_create_captures_richness() {
        let mut registry = Registry::new();
        let id = registry.create(dna(), Position::new(3, 4), 7.5);
        let plant = registry.get(id).unwrap();
        assert_eq!(plant.environmental_richness, 7.5);
        assert_eq!(plant.position, Position::new(3, 4));
        assert_eq!(plant.vitality, 2);
    }

    #[test]
    fn test_drain_keeps_counter() {
        let mut registry = Registry::new();
        registry.create(dna(), Position::new(0, 0), 1.0);
        registry.create(dna(), Position::new(1, 0), 1.0);
        let drained = registry.drain_all();
        assert_eq!(drained.len(), 2);
        assert!(registry.is_empty());
        assert_eq!(registry.next_id(), OrganismId(2));
    }
}
