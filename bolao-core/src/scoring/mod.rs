//! Match scoring
//!
//! Compares a selection of numbers against the numbers of one drawing and
//! classifies the outcome into a prize tier. Everything here is pure: the
//! same inputs always give the same classification and nothing is cached.

pub mod status;

pub use status::{derive_status, status_for, GameStatus, PENDING_LABEL, PENDING_STATUS};

use crate::types::Number;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Prize tier for a given hit count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    NotAwarded,
    Quadra,
    Quina,
    Sena,
}

impl Tier {
    /// Exact-match table; anything other than 4, 5 or 6 hits is not awarded.
    pub fn from_hit_count(hit_count: usize) -> Self {
        match hit_count {
            4 => Tier::Quadra,
            5 => Tier::Quina,
            6 => Tier::Sena,
            _ => Tier::NotAwarded,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::NotAwarded => "Não premiado",
            Tier::Quadra => "Quadra",
            Tier::Quina => "Quina",
            Tier::Sena => "Sena",
        }
    }

    pub fn is_awarded(&self) -> bool {
        !matches!(self, Tier::NotAwarded)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing one selection with one drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Hit numbers in the order they appear in the selection
    pub hits: Vec<Number>,
    pub hit_count: usize,
    pub tier: Tier,
    pub is_winner: bool,
}

impl Classification {
    pub fn is_hit(&self, number: Number) -> bool {
        self.hits.contains(&number)
    }
}

/// Score `selection` against `result`.
///
/// Works for inputs of any size, including empty ones. Repeated numbers in
/// either input are counted once.
pub fn evaluate(selection: &[Number], result: &[Number]) -> Classification {
    let drawn: HashSet<Number> = result.iter().copied().collect();
    let mut seen = HashSet::with_capacity(drawn.len());

    let hits: Vec<Number> = selection
        .iter()
        .copied()
        .filter(|n| drawn.contains(n) && seen.insert(*n))
        .collect();

    let hit_count = hits.len();

    Classification {
        hits,
        hit_count,
        tier: Tier::from_hit_count(hit_count),
        is_winner: hit_count >= 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_set(numbers: &[Number]) -> HashSet<Number> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn test_full_match_is_sena() {
        let numbers = [4, 11, 25, 33, 42, 59];
        let c = evaluate(&numbers, &numbers);

        assert_eq!(c.hit_count, 6);
        assert_eq!(c.tier, Tier::Sena);
        assert_eq!(c.tier.label(), "Sena");
        assert!(c.is_winner);
    }

    #[test]
    fn test_no_match() {
        let c = evaluate(&[2, 18, 29, 31, 45, 51], &[4, 11, 25, 33, 42, 59]);

        assert_eq!(c.hit_count, 0);
        assert!(c.hits.is_empty());
        assert_eq!(c.tier.label(), "Não premiado");
        assert!(!c.is_winner);
    }

    #[test]
    fn test_pool_sized_selection_quadra() {
        let c = evaluate(&[1, 2, 3, 4, 5, 6, 7, 8], &[1, 2, 3, 4, 60, 59]);

        assert_eq!(as_set(&c.hits), as_set(&[1, 2, 3, 4]));
        assert_eq!(c.hit_count, 4);
        assert_eq!(c.tier, Tier::Quadra);
        assert!(c.is_winner);
    }

    #[test]
    fn test_quina() {
        let c = evaluate(&[10, 20, 30, 40, 50, 1], &[10, 20, 30, 40, 50, 60]);
        assert_eq!(c.hit_count, 5);
        assert_eq!(c.tier.label(), "Quina");
        assert!(c.is_winner);
    }

    #[test]
    fn test_tier_table_is_exact() {
        for n in 0..=3 {
            assert_eq!(Tier::from_hit_count(n), Tier::NotAwarded);
        }
        assert_eq!(Tier::from_hit_count(4), Tier::Quadra);
        assert_eq!(Tier::from_hit_count(5), Tier::Quina);
        assert_eq!(Tier::from_hit_count(6), Tier::Sena);
        assert_eq!(Tier::from_hit_count(7), Tier::NotAwarded);
        assert_eq!(Tier::from_hit_count(20), Tier::NotAwarded);
    }

    #[test]
    fn test_more_than_six_hits_not_awarded_but_winner() {
        // Oversized drawing: tier falls through while the winner flag follows the count
        let selection: Vec<Number> = (1..=8).collect();
        let result: Vec<Number> = (1..=10).collect();
        let c = evaluate(&selection, &result);

        assert_eq!(c.hit_count, 8);
        assert_eq!(c.tier, Tier::NotAwarded);
        assert!(c.is_winner);
    }

    #[test]
    fn test_empty_inputs() {
        let c = evaluate(&[], &[]);
        assert_eq!(c.hit_count, 0);
        assert_eq!(c.tier, Tier::NotAwarded);
        assert!(!c.is_winner);

        let c = evaluate(&[1, 2, 3], &[]);
        assert_eq!(c.hit_count, 0);
    }

    #[test]
    fn test_hits_follow_selection_order_and_dedupe() {
        let c = evaluate(&[42, 4, 42, 11], &[4, 11, 25, 33, 42, 59]);
        assert_eq!(c.hits, vec![42, 4, 11]);
        assert_eq!(c.hit_count, 3);
        assert!(c.is_hit(4));
        assert!(!c.is_hit(25));
    }

    #[test]
    fn test_intersection_size_is_symmetric() {
        let a = [1, 5, 9, 13, 17, 21, 25];
        let b = [5, 13, 21, 30, 40, 50];
        assert_eq!(evaluate(&a, &b).hit_count, evaluate(&b, &a).hit_count);
        assert_eq!(
            as_set(&evaluate(&a, &b).hits),
            as_set(&evaluate(&b, &a).hits)
        );
    }

    #[test]
    fn test_idempotent() {
        let a = [3, 7, 19, 28, 44, 51];
        let b = [7, 19, 28, 44, 2, 9];
        assert_eq!(evaluate(&a, &b), evaluate(&a, &b));
    }

    #[test]
    fn test_winner_flag_matches_threshold() {
        let result: Vec<Number> = (1..=6).collect();
        for k in 0..=6u32 {
            let selection: Vec<Number> = (1..=k).chain(50..56).collect();
            let c = evaluate(&selection, &result);
            assert_eq!(c.hit_count, k as usize);
            assert_eq!(c.is_winner, k >= 4);
        }
    }
}
