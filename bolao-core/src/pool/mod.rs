pub mod manager;

pub use manager::PoolManager;

use crate::error::{BolaoError, Result};
use crate::types::Pool;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CODE_LENGTH: usize = 6;

/// Random join code, each character drawn uniformly from `CODE_ALPHABET`.
/// Uniqueness is the caller's concern.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Normalize user input into a lookup key: trimmed and uppercased.
pub fn normalize_code(input: &str) -> Result<String> {
    let code = input.trim().to_uppercase();

    if code.chars().count() != CODE_LENGTH {
        return Err(BolaoError::InvalidJoinCode(format!(
            "code must have {} characters",
            CODE_LENGTH
        )));
    }

    if !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return Err(BolaoError::InvalidJoinCode(format!(
            "'{}' contains characters outside A-Z and 0-9",
            code
        )));
    }

    Ok(code)
}

/// Payment completion across the current members of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub paid: usize,
    pub total: usize,
    pub complete: bool,
}

impl PaymentSummary {
    /// Payment keys of users no longer in `members` are ignored.
    pub fn for_pool(pool: &Pool) -> Self {
        let total = pool.members.len();
        let paid = pool.members.iter().filter(|m| pool.has_paid(m)).count();

        Self {
            paid,
            total,
            complete: total > 0 && paid == total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..500 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" x7y9z2 ").unwrap(), "X7Y9Z2");
        assert!(matches!(
            normalize_code("X7Y9Z"),
            Err(BolaoError::InvalidJoinCode(_))
        ));
        assert!(normalize_code("X7Y9Z2A").is_err());
        assert!(normalize_code("X7-9Z2").is_err());
        assert!(normalize_code("ÇÇÇÇÇÇ").is_err());
    }

    #[test]
    fn test_payment_summary_ignores_stale_keys() {
        let pool = Pool {
            id: "p1".to_string(),
            name: "Firma".to_string(),
            description: String::new(),
            code: "AAAAAA".to_string(),
            admin_id: "ana".to_string(),
            members: vec!["ana".to_string(), "bia".to_string()],
            members_details: Vec::new(),
            payments: HashMap::from([
                ("ana".to_string(), true),
                ("caio".to_string(), true),
            ]),
            created_at: Utc::now(),
        };

        let summary = PaymentSummary::for_pool(&pool);
        assert_eq!(summary.paid, 1);
        assert_eq!(summary.total, 2);
        assert!(!summary.complete);
    }
}
