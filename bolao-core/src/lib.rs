//! Bolão core library
//!
//! Match scoring for lottery selections plus the record keeping around it:
//! games, official results, shared pools with join codes and payment
//! tracking, and the signed-in session.

pub mod client;
pub mod config;
pub mod draw;
pub mod error;
pub mod game;
pub mod pool;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod types;
pub mod validation;

pub use client::Bolao;
pub use config::BolaoConfig;
pub use error::{BolaoError, Result};
pub use scoring::{derive_status, evaluate, Classification, GameStatus, Tier};
pub use session::{Identity, Session};
pub use types::{DrawResult, Game, GameKind, MemberDetails, Number, Pool};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_pool_member_sees_own_winning_game() {
        let temp_dir = tempdir().unwrap();
        let app = Bolao::open(temp_dir.path(), BolaoConfig::default())
            .await
            .unwrap();

        app.sign_in(Identity::new("ana", "ana@example.com").with_display_name("Ana"))
            .await
            .unwrap();
        let pool = app.pools().create_pool("Bolão da Firma", "").await.unwrap();
        app.games()
            .create_game(&[1, 2, 3, 4, 5, 6, 7, 8], GameKind::Group)
            .await
            .unwrap();

        app.sign_in(Identity::new("bia", "bia@example.com"))
            .await
            .unwrap();
        app.pools().join_pool(&pool.code).await.unwrap();
        app.results()
            .record_result(2670, &[1, 2, 3, 4, 60, 59])
            .await
            .unwrap();

        app.sign_in(Identity::new("ana", "ana@example.com"))
            .await
            .unwrap();
        let entries = app.games().list_games().await.unwrap();
        assert_eq!(entries[0].status.label, "Quadra");
        assert!(entries[0].status.is_winner);

        let pools = app.pools().my_pools().await.unwrap();
        assert_eq!(pools[0].members.len(), 2);
    }
}
