use crate::config::BolaoConfig;
use crate::draw::{FeedClient, ResultManager};
use crate::error::Result;
use crate::game::GameManager;
use crate::pool::PoolManager;
use crate::session::{Identity, Session};
use crate::storage::{SessionStore, Storage};
use std::path::Path;
use std::sync::Arc;

/// Entry point wiring storage, session and the per-collection managers.
pub struct Bolao {
    storage: Arc<Storage>,
    session: Arc<Session>,
    config: BolaoConfig,
    games: GameManager,
    results: ResultManager,
    pools: PoolManager,
}

impl Bolao {
    /// Open (or create) the store under `data_dir` and restore any saved
    /// identity.
    pub async fn open(data_dir: &Path, config: BolaoConfig) -> Result<Self> {
        config.validate()?;

        let db_path = data_dir.join("bolao.db");
        let storage = Arc::new(Storage::new(&db_path).await?);

        let identity = SessionStore::new(&storage).load_identity().await?;
        let session = Arc::new(Session::restored(identity));

        Ok(Self {
            games: GameManager::new(storage.clone(), session.clone(), config.clone()),
            results: ResultManager::new(storage.clone(), session.clone(), config.clone()),
            pools: PoolManager::new(storage.clone(), session.clone(), config.clone()),
            storage,
            session,
            config,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn config(&self) -> &BolaoConfig {
        &self.config
    }

    pub fn games(&self) -> &GameManager {
        &self.games
    }

    pub fn results(&self) -> &ResultManager {
        &self.results
    }

    pub fn pools(&self) -> &PoolManager {
        &self.pools
    }

    pub fn feed(&self) -> Result<FeedClient> {
        FeedClient::new(&self.config)
    }

    /// Sign in and remember the identity for later runs.
    pub async fn sign_in(&self, identity: Identity) -> Result<()> {
        SessionStore::new(&self.storage)
            .save_identity(&identity)
            .await?;
        self.session.sign_in(identity);
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<()> {
        SessionStore::new(&self.storage).clear().await?;
        self.session.sign_out();
        Ok(())
    }
}
