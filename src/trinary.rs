//! Three-valued logic for type relationship queries.
//!
//! Subtype/supertype questions over PHP types are frequently undecidable
//! without full class-hierarchy reflection (which this crate does not do),
//! so relationship queries answer with a [`TrinaryLogic`] value instead of
//! a plain `bool`.  Callers that only act on a definite positive answer
//! check [`TrinaryLogic::yes`]; everything else counts as "not proven".

use serde::{Deserialize, Serialize};

/// The result of a type relationship query: definitely true, definitely
/// false, or not decidable with the information at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrinaryLogic {
    Yes,
    Maybe,
    No,
}

impl TrinaryLogic {
    /// `true` only for a definite positive answer.
    pub fn yes(self) -> bool {
        self == TrinaryLogic::Yes
    }

    /// `true` only for a definite negative answer.
    pub fn no(self) -> bool {
        self == TrinaryLogic::No
    }

    /// `true` when the question could not be decided.
    pub fn maybe(self) -> bool {
        self == TrinaryLogic::Maybe
    }

    /// Conjunction: `Yes` only if both are `Yes`, `No` if either is `No`.
    pub fn and(self, other: TrinaryLogic) -> TrinaryLogic {
        use TrinaryLogic::*;
        match (self, other) {
            (No, _) | (_, No) => No,
            (Yes, Yes) => Yes,
            _ => Maybe,
        }
    }

    /// Disjunction: `Yes` if either is `Yes`, `No` only if both are `No`.
    pub fn or(self, other: TrinaryLogic) -> TrinaryLogic {
        use TrinaryLogic::*;
        match (self, other) {
            (Yes, _) | (_, Yes) => Yes,
            (No, No) => No,
            _ => Maybe,
        }
    }

    /// Fold a conjunction over an iterator.  An empty iterator is `Yes`
    /// (vacuous truth), matching "all members satisfy the relation".
    pub fn all(results: impl IntoIterator<Item = TrinaryLogic>) -> TrinaryLogic {
        results
            .into_iter()
            .fold(TrinaryLogic::Yes, TrinaryLogic::and)
    }

    /// Fold a disjunction over an iterator.  An empty iterator is `No`.
    pub fn any(results: impl IntoIterator<Item = TrinaryLogic>) -> TrinaryLogic {
        results.into_iter().fold(TrinaryLogic::No, TrinaryLogic::or)
    }
}
