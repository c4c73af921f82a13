use crate::model::{Attribute, ATTRIBUTE_COUNT};

/// Per-attribute scoring weights.
///
/// Every weight starts at zero. Weights are set one attribute at a time by
/// `weight_<attribute>` directives and are never cleared implicitly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Weights([f64; ATTRIBUTE_COUNT]);

impl Weights {
    pub fn get(&self, attribute: Attribute) -> f64 {
        self.0[attribute.index()]
    }

    /// Overwrite one weight. Callers validate that `value` is finite and
    /// non-negative before getting here.
    pub fn set(&mut self, attribute: Attribute, value: f64) {
        self.0[attribute.index()] = value;
    }

    /// Attributes carrying a non-zero weight, in canonical order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL
            .iter()
            .map(move |a| (*a, self.get(*a)))
            .filter(|(_, w)| *w != 0.0)
    }

    pub fn nonzero_count(&self) -> usize {
        self.nonzero().count()
    }

    pub fn is_zero(&self) -> bool {
        self.nonzero_count() == 0
    }
}
