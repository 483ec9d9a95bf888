//! Chains of carried mushrooms
//!
//! A carrier (the player or a mole) keeps the keys of the mushrooms it has
//! picked up, first picked first. Each mushroom follows the one picked just
//! before it, and the first one follows the carrier.

use super::BodyKey;

/// Ordered keys of the mushrooms a carrier drags along
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    links: Vec<BodyKey>,
}

impl Trail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mushroom to the end of the trail
    pub fn attach(&mut self, key: BodyKey) {
        if !self.links.contains(&key) {
            self.links.push(key);
        }
    }

    /// Remove a mushroom; the ones behind it close the gap.
    ///
    /// Returns whether the key was on the trail.
    pub fn detach(&mut self, key: BodyKey) -> bool {
        match self.links.iter().position(|&k| k == key) {
            Some(index) => {
                self.links.remove(index);
                true
            }
            None => false,
        }
    }

    /// The link a mushroom follows: the one ahead of it, or `None` when it
    /// is first in line (and so follows the carrier)
    pub fn leader_of(&self, key: BodyKey) -> Option<BodyKey> {
        let index = self.links.iter().position(|&k| k == key)?;
        index.checked_sub(1).map(|ahead| self.links[ahead])
    }

    /// Whether the mushroom is on this trail
    pub fn contains(&self, key: BodyKey) -> bool {
        self.links.contains(&key)
    }

    /// Empty the trail, returning its keys in order
    pub fn take(&mut self) -> Vec<BodyKey> {
        std::mem::take(&mut self.links)
    }

    /// Keys in order
    pub fn keys(&self) -> &[BodyKey] {
        &self.links
    }

    /// Number of carried mushrooms
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether nothing is carried
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<BodyKey> {
        let mut map: SlotMap<BodyKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_leaders_follow_pick_order() {
        let k = keys(3);
        let mut trail = Trail::new();
        for &key in &k {
            trail.attach(key);
        }
        assert_eq!(trail.leader_of(k[0]), None);
        assert_eq!(trail.leader_of(k[1]), Some(k[0]));
        assert_eq!(trail.leader_of(k[2]), Some(k[1]));
    }

    #[test]
    fn test_detach_closes_gap() {
        let k = keys(3);
        let mut trail = Trail::new();
        for &key in &k {
            trail.attach(key);
        }
        assert!(trail.detach(k[1]));
        assert!(!trail.detach(k[1]));
        assert_eq!(trail.leader_of(k[2]), Some(k[0]));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn test_attach_twice_is_noop() {
        let k = keys(1);
        let mut trail = Trail::new();
        trail.attach(k[0]);
        trail.attach(k[0]);
        assert_eq!(trail.take(), vec![k[0]]);
        assert!(trail.is_empty());
    }
}
