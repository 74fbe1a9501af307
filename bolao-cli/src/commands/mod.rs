pub mod auth;
pub mod check;
pub mod game;
pub mod pool;
pub mod result;

pub use auth::{handle_auth_command, AuthCommands};
pub use check::{handle_check, CheckArgs};
pub use game::{handle_game_command, GameCommands};
pub use pool::{handle_pool_command, PoolCommands};
pub use result::{handle_result_command, ResultCommands};

use bolao_core::{Number, Result};
use dialoguer::Confirm;

/// Zero-padded numbers, hits wrapped in brackets
pub fn format_numbers(numbers: &[Number], hits: &[Number]) -> String {
    numbers
        .iter()
        .map(|n| {
            if hits.contains(n) {
                format!("[{:02}]", n)
            } else {
                format!("{:02}", n)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ask before a destructive action unless `force` is set
pub fn confirm(prompt: String, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbers_marks_hits() {
        assert_eq!(format_numbers(&[4, 11, 25], &[11]), "04 [11] 25");
        assert_eq!(format_numbers(&[], &[]), "");
    }
}
