use crate::{Direction, FractionalFill, Knapsack, RatioOrder};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairOutcome {
    pub home_tightened: bool,
    pub partner_tightened: bool,
}

impl PairOutcome {
    pub fn num_tightened(&self) -> usize {
        self.home_tightened as usize + self.partner_tightened as usize
    }
}

/// Refines the violation bounds of two knapsacks against each other with a
/// single sort.
///
/// Items are ranked by home profit over partner profit. Read forward, that
/// ranking is the greedy order for packing home profits into the partner's
/// capacity; read backwards it is the greedy order for packing partner
/// profits into the home capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairEvaluator {
    fill: FractionalFill,
}

impl PairEvaluator {
    pub fn new(fill: FractionalFill) -> Self {
        Self { fill }
    }

    pub fn fill(&self) -> &FractionalFill {
        &self.fill
    }

    /// `indices` must hold a permutation of the item indices; its order is
    /// overwritten.
    pub fn evaluate<'a>(
        &self,
        home: Knapsack<'a>,
        partner: Knapsack<'a>,
        home_best: &mut f64,
        partner_best: &mut f64,
        indices: &mut [usize],
    ) -> PairOutcome {
        RatioOrder::new(home.coefficients, partner.coefficients).sort(indices);
        PairOutcome {
            home_tightened: self
                .fill
                .refine(home, partner, indices, Direction::Forward, home_best),
            partner_tightened: self
                .fill
                .refine(partner, home, indices, Direction::Reverse, partner_best),
        }
    }
}
