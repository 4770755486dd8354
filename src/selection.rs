use crate::scenario::{DisasterType, Strategy};

/// Snapshot of what the user asked to see.
///
/// Never mutated in place: each interaction builds a new value and every
/// render reads whichever snapshot is current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub disaster: DisasterType,
    chosen: [bool; 3],
}

impl Selection {
    pub fn new(disaster: DisasterType, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        let mut chosen = [false; 3];
        for strategy in strategies {
            chosen[strategy.index()] = true;
        }
        Self { disaster, chosen }
    }

    pub fn with_disaster(self, disaster: DisasterType) -> Self {
        Self { disaster, ..self }
    }

    /// Flip one strategy in or out of the chosen set
    pub fn with_toggled(self, strategy: Strategy) -> Self {
        let mut chosen = self.chosen;
        chosen[strategy.index()] = !chosen[strategy.index()];
        Self { chosen, ..self }
    }

    pub fn contains(&self, strategy: Strategy) -> bool {
        self.chosen[strategy.index()]
    }

    /// Chosen strategies in declaration order, whatever order they were picked in
    pub fn strategies(&self) -> impl Iterator<Item = Strategy> + '_ {
        Strategy::ALL.into_iter().filter(|s| self.contains(*s))
    }

    pub fn len(&self) -> usize {
        self.chosen.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_flood_with_nothing_chosen() {
        let sel = Selection::default();
        assert_eq!(sel.disaster, DisasterType::Flood);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_iterates_in_declaration_order() {
        let sel = Selection::new(
            DisasterType::Flood,
            [Strategy::VulnerablePriority, Strategy::ShortestPath],
        );
        let order: Vec<_> = sel.strategies().collect();
        assert_eq!(order, [Strategy::ShortestPath, Strategy::VulnerablePriority]);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_toggle_returns_new_snapshot() {
        let before = Selection::default();
        let after = before.with_toggled(Strategy::EthicalBalance);
        assert!(!before.contains(Strategy::EthicalBalance));
        assert!(after.contains(Strategy::EthicalBalance));
        assert_eq!(after.with_toggled(Strategy::EthicalBalance), before);
    }

    #[test]
    fn test_duplicates_collapse() {
        let sel = Selection::new(
            DisasterType::Earthquake,
            [Strategy::ShortestPath, Strategy::ShortestPath],
        );
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.with_disaster(DisasterType::Flood).disaster, DisasterType::Flood);
    }
}
