pub mod manager;

pub use manager::{GameEntry, GameManager};

use crate::types::Number;
use rand::seq::index;

/// Quick pick ("Surpresinha"): `count` distinct numbers from 1..=max_number,
/// sorted ascending.
pub fn quick_pick(count: usize, max_number: u32) -> Vec<Number> {
    let count = count.min(max_number as usize);
    let mut rng = rand::thread_rng();
    let mut numbers: Vec<Number> = index::sample(&mut rng, max_number as usize, count)
        .into_iter()
        .map(|i| i as Number + 1)
        .collect();
    numbers.sort_unstable();
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_quick_pick_shape() {
        for _ in 0..200 {
            let numbers = quick_pick(6, 60);
            assert_eq!(numbers.len(), 6);
            assert!(numbers.iter().all(|n| (1..=60).contains(n)));
            assert_eq!(numbers.iter().collect::<HashSet<_>>().len(), 6);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_quick_pick_whole_range() {
        let numbers = quick_pick(10, 10);
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        assert_eq!(quick_pick(20, 5).len(), 5);
    }
}
