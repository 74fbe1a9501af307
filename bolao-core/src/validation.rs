//! Input checks applied before anything is written to the store.

use crate::config::BolaoConfig;
use crate::error::{BolaoError, Result};
use crate::types::Number;
use std::collections::HashSet;

fn check_range_and_uniqueness(numbers: &[Number], max_number: u32) -> Result<()> {
    let mut seen = HashSet::with_capacity(numbers.len());
    for &number in numbers {
        if number == 0 || number > max_number {
            return Err(BolaoError::NumberOutOfRange {
                number,
                max: max_number,
            });
        }
        if !seen.insert(number) {
            return Err(BolaoError::DuplicateNumber { number });
        }
    }
    Ok(())
}

/// Validate a game selection and return it sorted ascending.
pub fn validate_selection(numbers: &[Number], config: &BolaoConfig) -> Result<Vec<Number>> {
    if numbers.len() < config.min_selection || numbers.len() > config.max_selection {
        return Err(BolaoError::InvalidNumberCount {
            expected: format!("{}-{}", config.min_selection, config.max_selection),
            got: numbers.len(),
        });
    }

    check_range_and_uniqueness(numbers, config.max_number)?;

    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    Ok(sorted)
}

/// Validate the drawn numbers of a result and return them sorted ascending.
pub fn validate_draw(numbers: &[Number], config: &BolaoConfig) -> Result<Vec<Number>> {
    if numbers.len() != config.draw_size {
        return Err(BolaoError::InvalidNumberCount {
            expected: config.draw_size.to_string(),
            got: numbers.len(),
        });
    }

    check_range_and_uniqueness(numbers, config.max_number)?;

    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    Ok(sorted)
}

pub fn validate_contest(contest: u32) -> Result<()> {
    if contest == 0 {
        return Err(BolaoError::validation("Contest number must be positive"));
    }
    Ok(())
}

/// Trimmed pool name, rejecting blank input
pub fn validate_pool_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BolaoError::validation("Pool name is required"));
    }
    Ok(name.to_string())
}
