use crate::model::{Attribute, ATTRIBUTE_COUNT};

/// Attributes compared by skyline, k-means and medrank.
///
/// Independent of the weight vector: an attribute can be ranked without
/// being weighted and the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankingSet([bool; ATTRIBUTE_COUNT]);

impl RankingSet {
    pub fn set(&mut self, attribute: Attribute, enabled: bool) {
        self.0[attribute.index()] = enabled;
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.0[attribute.index()]
    }

    /// Selected attributes in canonical order.
    pub fn attributes(&self) -> Vec<Attribute> {
        Attribute::ALL
            .iter()
            .copied()
            .filter(|a| self.contains(*a))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|on| *on)
    }
}

impl FromIterator<Attribute> for RankingSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = RankingSet::default();
        for attribute in iter {
            set.set(attribute, true);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        assert!(RankingSet::default().is_empty());
    }

    #[test]
    fn test_set_and_unset() {
        let mut set = RankingSet::default();
        set.set(Attribute::Weight, true);
        set.set(Attribute::AirSpeed, true);
        set.set(Attribute::Weight, false);
        assert_eq!(set.attributes(), vec![Attribute::AirSpeed]);
        assert!(!set.is_empty());
    }
}
