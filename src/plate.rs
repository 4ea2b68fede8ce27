//! Plates: groups of regions that drift together.

/// Handle into the simulation's region arena. Regions are referred to by
/// index everywhere; the arena in [`Simulation`](crate::Simulation) is the
/// single owner of the region data.
pub type RegionId = usize;

/// A set of regions moving as one tectonic unit. Every region id belongs to
/// exactly one plate; the simulation maintains that invariant as regions
/// split and collide.
#[derive(Debug, Clone, Default)]
pub struct Plate {
    regions: Vec<RegionId>,
}

impl Plate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_region(region: RegionId) -> Self {
        Self { regions: vec![region] }
    }

    pub fn from_regions(regions: Vec<RegionId>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.regions.contains(&region)
    }

    pub fn add_region(&mut self, region: RegionId) {
        if !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    pub fn remove_region(&mut self, region: RegionId) {
        self.regions.retain(|r| *r != region);
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_a_region_twice_keeps_one_entry() {
        let mut plate = Plate::from_region(3);
        plate.add_region(3);
        plate.add_region(5);
        assert_eq!(plate.regions(), &[3, 5]);
    }

    #[test]
    fn removing_a_region_empties_the_plate() {
        let mut plate = Plate::from_regions(vec![1, 2]);
        plate.remove_region(1);
        plate.remove_region(2);
        assert!(plate.is_empty());
        assert!(!plate.contains(1));
    }
}
