//! Process-wide signed-in identity.
//!
//! Readers take snapshots with [`Session::current`] or follow changes through
//! [`Session::subscribe`]. Only sign-in/sign-out mutate it.

use crate::error::{BolaoError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Name shown to other pool members
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Usuário")
    }
}

pub struct Session {
    state: RwLock<SessionState>,
    tx: watch::Sender<Option<Identity>>,
}

#[derive(Debug, Clone)]
struct SessionState {
    current: Option<Identity>,
    loading: bool,
}

impl Session {
    /// New session still waiting for its first identity
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            state: RwLock::new(SessionState {
                current: None,
                loading: true,
            }),
            tx,
        }
    }

    /// Session already resolved to `identity` (or to nobody)
    pub fn restored(identity: Option<Identity>) -> Self {
        let session = Self::new();
        session.publish(identity);
        session
    }

    pub fn current(&self) -> Option<Identity> {
        self.state.read().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Identity of the signed-in user, or `NotSignedIn`
    pub fn require_user(&self) -> Result<Identity> {
        self.current().ok_or(BolaoError::NotSignedIn)
    }

    pub fn sign_in(&self, identity: Identity) {
        tracing::info!("Signed in as {} ({})", identity.uid, identity.email);
        self.publish(Some(identity));
    }

    pub fn sign_out(&self) {
        if let Some(identity) = self.current() {
            tracing::info!("Signed out {}", identity.uid);
        }
        self.publish(None);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }

    fn publish(&self, identity: Option<Identity>) {
        {
            let mut state = self.state.write();
            state.current = identity.clone();
            state.loading = false;
        }
        self.tx.send_replace(identity);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_until_first_publish() {
        let session = Session::new();
        assert!(session.is_loading());
        assert!(session.current().is_none());

        session.sign_in(Identity::new("ana", "ana@example.com"));
        assert!(!session.is_loading());
        assert_eq!(session.require_user().unwrap().uid, "ana");
    }

    #[test]
    fn test_require_user_when_signed_out() {
        let session = Session::restored(None);
        assert!(!session.is_loading());
        assert!(matches!(session.require_user(), Err(BolaoError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let session = Session::restored(None);
        let mut rx = session.subscribe();

        session.sign_in(Identity::new("ana", "ana@example.com").with_display_name("Ana"));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|i| i.uid.clone()),
            Some("ana".to_string())
        );

        session.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_identity_json_shape() {
        let identity = Identity::new("ana", "ana@example.com").with_photo_url("http://x/a.png");
        let value = serde_json::to_value(&identity).unwrap();
        assert_eq!(value["photoURL"], "http://x/a.png");
        assert_eq!(value["displayName"], serde_json::Value::Null);
        assert_eq!(identity.display_name_or_default(), "Usuário");
    }
}
