use crate::model::{Attribute, NamedBuild};

/// `a` dominates `b` when it is at least as good on every attribute and
/// strictly better on at least one.
pub fn dominates(a: &NamedBuild, b: &NamedBuild, attributes: &[Attribute]) -> bool {
    let mut strictly_better = false;
    for attr in attributes {
        let (x, y) = (a.stats[*attr], b.stats[*attr]);
        if x < y {
            return false;
        }
        if x > y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Pareto frontier by block nested loop.
///
/// Candidates are visited in input order. A candidate dominated by a retained
/// build is dropped; otherwise it evicts every retained build it dominates
/// and joins the window. Survivors keep their insertion order.
pub fn frontier(candidates: Vec<NamedBuild>, attributes: &[Attribute]) -> Vec<NamedBuild> {
    let mut window: Vec<NamedBuild> = Vec::new();

    for candidate in candidates {
        if window.iter().any(|kept| dominates(kept, &candidate, attributes)) {
            continue;
        }
        window.retain(|kept| !dominates(&candidate, kept, attributes));
        window.push(candidate);
    }

    window
}
