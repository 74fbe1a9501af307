use crate::config::BolaoConfig;
use crate::error::{BolaoError, Result};
use crate::pool::{generate_code, normalize_code};
use crate::session::{Identity, Session};
use crate::storage::{PoolStore, Storage};
use crate::types::{MemberDetails, Pool};
use crate::validation::validate_pool_name;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct PoolManager {
    storage: Arc<Storage>,
    session: Arc<Session>,
    config: BolaoConfig,
}

fn snapshot(identity: &Identity) -> MemberDetails {
    MemberDetails {
        uid: identity.uid.clone(),
        email: identity.email.clone(),
        display_name: identity.display_name_or_default().to_string(),
    }
}

impl PoolManager {
    pub fn new(storage: Arc<Storage>, session: Arc<Session>, config: BolaoConfig) -> Self {
        Self {
            storage,
            session,
            config,
        }
    }

    /// Create a pool administered by the current user.
    pub async fn create_pool(&self, name: &str, description: &str) -> Result<Pool> {
        let user = self.session.require_user()?;
        let name = validate_pool_name(name)?;
        let code = self.unused_code().await?;

        let pool = Pool {
            id: Uuid::new_v4().to_string(),
            name,
            description: description.trim().to_string(),
            code,
            admin_id: user.uid.clone(),
            members: vec![user.uid.clone()],
            members_details: vec![snapshot(&user)],
            payments: HashMap::from([(user.uid.clone(), false)]),
            created_at: Utc::now(),
        };

        PoolStore::new(&self.storage).insert_pool(&pool).await?;

        tracing::info!(
            "Created pool '{}' with code {} (admin {})",
            pool.name,
            pool.code,
            pool.admin_id
        );
        Ok(pool)
    }

    /// Draw codes until one is free or the retry budget runs out.
    async fn unused_code(&self) -> Result<String> {
        let pool_store = PoolStore::new(&self.storage);

        for attempt in 1..=self.config.code_attempts {
            let code = generate_code();
            if !pool_store.code_exists(&code).await? {
                return Ok(code);
            }
            tracing::warn!("Join code collision on attempt {}: {}", attempt, code);
        }

        Err(BolaoError::internal(format!(
            "Could not find a free join code after {} attempts",
            self.config.code_attempts
        )))
    }

    /// Join the pool identified by a user-entered code.
    pub async fn join_pool(&self, code_input: &str) -> Result<Pool> {
        let user = self.session.require_user()?;
        let code = normalize_code(code_input)?;

        let pool = PoolStore::new(&self.storage)
            .modify_by_code(&code, |pool| {
                if pool.is_member(&user.uid) {
                    return Err(BolaoError::AlreadyMember {
                        pool: pool.name.clone(),
                    });
                }

                pool.members.push(user.uid.clone());
                pool.members_details.push(snapshot(&user));
                pool.payments.insert(user.uid.clone(), false);
                Ok(())
            })
            .await?
            .ok_or_else(|| BolaoError::PoolNotFound { key: code.clone() })?;

        tracing::info!("User {} joined pool '{}'", user.uid, pool.name);
        Ok(pool)
    }

    /// Pools the current user belongs to
    pub async fn my_pools(&self) -> Result<Vec<Pool>> {
        let user = self.session.require_user()?;
        let mut pools = PoolStore::new(&self.storage)
            .pools_for_member(&user.uid)
            .await?;
        pools.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!("Loaded {} pools for {}", pools.len(), user.uid);
        Ok(pools)
    }

    /// Load a pool the current user is a member of.
    pub async fn get_pool(&self, pool_id: &str) -> Result<Pool> {
        let user = self.session.require_user()?;
        let pool = self.load(pool_id).await?;

        if !pool.is_member(&user.uid) {
            return Err(BolaoError::not_authorized(format!(
                "{} is not a member of pool '{}'",
                user.uid, pool.name
            )));
        }

        Ok(pool)
    }

    pub async fn update_pool(&self, pool_id: &str, name: &str, description: &str) -> Result<Pool> {
        let name = validate_pool_name(name)?;
        let pool = self
            .modify_as_admin(pool_id, "edit pool", |pool| {
                pool.name = name;
                pool.description = description.trim().to_string();
                Ok(())
            })
            .await?;

        tracing::info!("Updated pool {}", pool.id);
        Ok(pool)
    }

    pub async fn set_payment(&self, pool_id: &str, member: &str, paid: bool) -> Result<Pool> {
        let pool = self
            .modify_as_admin(pool_id, "change payments", |pool| {
                require_member(pool, member)?;
                pool.payments.insert(member.to_string(), paid);
                Ok(())
            })
            .await?;

        log_payment(&pool, member);
        Ok(pool)
    }

    /// Flip the payment flag of `member`
    pub async fn toggle_payment(&self, pool_id: &str, member: &str) -> Result<Pool> {
        let pool = self
            .modify_as_admin(pool_id, "change payments", |pool| {
                require_member(pool, member)?;
                let paid = pool.has_paid(member);
                pool.payments.insert(member.to_string(), !paid);
                Ok(())
            })
            .await?;

        log_payment(&pool, member);
        Ok(pool)
    }

    /// Remove a non-admin member, dropping their snapshot and payment flag.
    pub async fn remove_member(&self, pool_id: &str, member: &str) -> Result<Pool> {
        let pool = self
            .modify_as_admin(pool_id, "remove members", |pool| {
                if pool.is_admin(member) {
                    return Err(BolaoError::validation("The pool admin cannot be removed"));
                }
                require_member(pool, member)?;

                pool.members.retain(|m| m != member);
                pool.members_details.retain(|d| d.uid != member);
                pool.payments.remove(member);
                Ok(())
            })
            .await?;

        tracing::info!("Removed {} from pool {}", member, pool.id);
        Ok(pool)
    }

    pub async fn delete_pool(&self, pool_id: &str) -> Result<()> {
        let pool = self.load_as_admin(pool_id, "delete pool").await?;

        if !PoolStore::new(&self.storage).delete_pool(&pool.id).await? {
            return Err(BolaoError::PoolNotFound {
                key: pool_id.to_string(),
            });
        }

        tracing::info!("Deleted pool '{}' ({})", pool.name, pool.id);
        Ok(())
    }

    async fn load(&self, pool_id: &str) -> Result<Pool> {
        PoolStore::new(&self.storage)
            .load_pool(pool_id)
            .await?
            .ok_or_else(|| BolaoError::PoolNotFound {
                key: pool_id.to_string(),
            })
    }

    async fn load_as_admin(&self, pool_id: &str, action: &str) -> Result<Pool> {
        let user = self.session.require_user()?;
        let pool = self.load(pool_id).await?;
        check_admin(&user, &pool, action)?;
        Ok(pool)
    }

    /// Apply `change` to the pool in one store transaction, after checking
    /// that the current user administers it.
    async fn modify_as_admin<F>(&self, pool_id: &str, action: &str, change: F) -> Result<Pool>
    where
        F: FnOnce(&mut Pool) -> Result<()>,
    {
        let user = self.session.require_user()?;

        PoolStore::new(&self.storage)
            .modify_pool(pool_id, |pool| {
                check_admin(&user, pool, action)?;
                change(pool)
            })
            .await?
            .ok_or_else(|| BolaoError::PoolNotFound {
                key: pool_id.to_string(),
            })
    }
}

fn check_admin(user: &Identity, pool: &Pool, action: &str) -> Result<()> {
    if !pool.is_admin(&user.uid) {
        tracing::warn!(
            "User {} tried to {} on pool {} without admin rights",
            user.uid,
            action,
            pool.id
        );
        return Err(BolaoError::not_authorized(format!(
            "only the pool admin can {}",
            action
        )));
    }

    Ok(())
}

fn require_member(pool: &Pool, member: &str) -> Result<()> {
    if !pool.is_member(member) {
        return Err(BolaoError::MemberNotFound {
            pool: pool.name.clone(),
            member: member.to_string(),
        });
    }
    Ok(())
}

fn log_payment(pool: &Pool, member: &str) {
    tracing::info!(
        "Marked {} as {} in pool {}",
        member,
        if pool.has_paid(member) { "paid" } else { "unpaid" },
        pool.id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PaymentSummary;
    use tempfile::{tempdir, TempDir};

    async fn setup() -> (TempDir, Arc<Session>, PoolManager) {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(Storage::new(&temp_dir.path().join("bolao.db")).await.unwrap());
        let session = Arc::new(Session::restored(Some(
            Identity::new("ana", "ana@example.com").with_display_name("Ana"),
        )));
        let manager = PoolManager::new(storage, session.clone(), BolaoConfig::default());
        (temp_dir, session, manager)
    }

    fn as_bia(session: &Session) {
        session.sign_in(Identity::new("bia", "bia@example.com").with_display_name("Bia"));
    }

    fn as_ana(session: &Session) {
        session.sign_in(Identity::new("ana", "ana@example.com").with_display_name("Ana"));
    }

    #[tokio::test]
    async fn test_create_pool_admin_is_member() {
        let (_dir, _session, manager) = setup().await;

        let pool = manager.create_pool("  Bolão da Firma ", "setor X").await.unwrap();
        assert_eq!(pool.name, "Bolão da Firma");
        assert_eq!(pool.admin_id, "ana");
        assert_eq!(pool.members, vec!["ana"]);
        assert_eq!(pool.members_details[0].display_name, "Ana");
        assert_eq!(pool.code.len(), 6);
        assert!(!pool.has_paid("ana"));

        assert!(manager.create_pool("   ", "").await.is_err());
    }

    #[tokio::test]
    async fn test_join_flow() {
        let (_dir, session, manager) = setup().await;
        let pool = manager.create_pool("Firma", "").await.unwrap();

        as_bia(&session);
        let joined = manager.join_pool(&pool.code.to_lowercase()).await.unwrap();
        assert_eq!(joined.members, vec!["ana", "bia"]);
        assert_eq!(joined.member_details("bia").unwrap().email, "bia@example.com");

        assert!(matches!(
            manager.join_pool(&pool.code).await,
            Err(BolaoError::AlreadyMember { .. })
        ));
        assert_eq!(manager.my_pools().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_join_unknown_or_malformed_code() {
        let (_dir, _session, manager) = setup().await;

        // No pools exist yet
        let err = manager.join_pool("000000").await.unwrap_err();
        assert!(matches!(err, BolaoError::PoolNotFound { .. }));

        let err = manager.join_pool("ABC").await.unwrap_err();
        assert!(matches!(err, BolaoError::InvalidJoinCode(_)));
    }

    #[tokio::test]
    async fn test_admin_actions_are_gated() {
        let (_dir, session, manager) = setup().await;
        let pool = manager.create_pool("Firma", "").await.unwrap();

        as_bia(&session);
        manager.join_pool(&pool.code).await.unwrap();

        assert!(matches!(
            manager.set_payment(&pool.id, "bia", true).await,
            Err(BolaoError::NotAuthorized(_))
        ));
        assert!(matches!(
            manager.update_pool(&pool.id, "Outro", "").await,
            Err(BolaoError::NotAuthorized(_))
        ));
        assert!(matches!(
            manager.remove_member(&pool.id, "ana").await,
            Err(BolaoError::NotAuthorized(_))
        ));
        assert!(matches!(
            manager.delete_pool(&pool.id).await,
            Err(BolaoError::NotAuthorized(_))
        ));

        // Members can still view
        assert_eq!(manager.get_pool(&pool.id).await.unwrap().id, pool.id);
    }

    #[tokio::test]
    async fn test_payments_and_summary() {
        let (_dir, session, manager) = setup().await;
        let pool = manager.create_pool("Firma", "").await.unwrap();

        as_bia(&session);
        manager.join_pool(&pool.code).await.unwrap();
        as_ana(&session);

        let updated = manager.toggle_payment(&pool.id, "bia").await.unwrap();
        assert!(updated.has_paid("bia"));
        assert!(!PaymentSummary::for_pool(&updated).complete);

        let updated = manager.set_payment(&pool.id, "ana", true).await.unwrap();
        let summary = PaymentSummary::for_pool(&updated);
        assert_eq!((summary.paid, summary.total), (2, 2));
        assert!(summary.complete);

        let updated = manager.toggle_payment(&pool.id, "bia").await.unwrap();
        assert!(!updated.has_paid("bia"));

        assert!(matches!(
            manager.set_payment(&pool.id, "caio", true).await,
            Err(BolaoError::MemberNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_member_prunes_payment() {
        let (_dir, session, manager) = setup().await;
        let pool = manager.create_pool("Firma", "").await.unwrap();

        as_bia(&session);
        manager.join_pool(&pool.code).await.unwrap();
        as_ana(&session);
        manager.set_payment(&pool.id, "bia", true).await.unwrap();

        let updated = manager.remove_member(&pool.id, "bia").await.unwrap();
        assert_eq!(updated.members, vec!["ana"]);
        assert!(updated.member_details("bia").is_none());
        assert!(!updated.payments.contains_key("bia"));

        assert!(manager.remove_member(&pool.id, "ana").await.is_err());

        as_bia(&session);
        assert!(manager.my_pools().await.unwrap().is_empty());
        assert!(matches!(
            manager.get_pool(&pool.id).await,
            Err(BolaoError::NotAuthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_and_delete() {
        let (_dir, _session, manager) = setup().await;
        let pool = manager.create_pool("Firma", "").await.unwrap();

        let edited = manager
            .update_pool(&pool.id, "Firma 2026", "nova descrição")
            .await
            .unwrap();
        assert_eq!(edited.name, "Firma 2026");
        assert_eq!(edited.code, pool.code);

        manager.delete_pool(&pool.id).await.unwrap();
        assert!(matches!(
            manager.get_pool(&pool.id).await,
            Err(BolaoError::PoolNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_requires_sign_in() {
        let (_dir, session, manager) = setup().await;
        session.sign_out();
        assert!(matches!(
            manager.create_pool("Firma", "").await,
            Err(BolaoError::NotSignedIn)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_keep_every_member() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(Storage::new(&temp_dir.path().join("bolao.db")).await.unwrap());
        let admin = Arc::new(Session::restored(Some(Identity::new("ana", "ana@example.com"))));
        let pool = PoolManager::new(storage.clone(), admin.clone(), BolaoConfig::default())
            .create_pool("Firma", "")
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let session = Arc::new(Session::restored(Some(Identity::new(
                format!("user{}", i),
                format!("user{}@example.com", i),
            ))));
            let manager = PoolManager::new(storage.clone(), session, BolaoConfig::default());
            let code = pool.code.clone();
            handles.push(tokio::spawn(async move { manager.join_pool(&code).await }));
        }

        // Admin flips a payment while members are joining
        let admin_manager = PoolManager::new(storage.clone(), admin, BolaoConfig::default());
        admin_manager.toggle_payment(&pool.id, "ana").await.unwrap();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = admin_manager.get_pool(&pool.id).await.unwrap();
        assert_eq!(stored.members.len(), 17);
        assert_eq!(stored.members_details.len(), 17);
        assert_eq!(stored.payments.len(), 17);
        assert!(stored.has_paid("ana"));
        for i in 0..16 {
            assert!(stored.is_member(&format!("user{}", i)));
        }
    }
}
