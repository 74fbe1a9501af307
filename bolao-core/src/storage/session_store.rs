use crate::error::Result;
use crate::session::Identity;
use crate::storage::Storage;
use rusqlite::{params, OptionalExtension};

/// Persists the signed-in identity between process runs
pub struct SessionStore<'a> {
    storage: &'a Storage,
}

impl<'a> SessionStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn save_identity(&self, identity: &Identity) -> Result<()> {
        let conn = self.storage.get_connection().await;

        conn.execute(
            "INSERT OR REPLACE INTO session (slot, uid, email, display_name, photo_url)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![
                identity.uid,
                identity.email,
                identity.display_name,
                identity.photo_url,
            ],
        )?;

        Ok(())
    }

    pub async fn load_identity(&self) -> Result<Option<Identity>> {
        let conn = self.storage.get_connection().await;

        let identity = conn
            .query_row(
                "SELECT uid, email, display_name, photo_url FROM session WHERE slot = 1",
                [],
                |row| {
                    Ok(Identity {
                        uid: row.get(0)?,
                        email: row.get(1)?,
                        display_name: row.get(2)?,
                        photo_url: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(identity)
    }

    pub async fn clear(&self) -> Result<()> {
        let conn = self.storage.get_connection().await;
        conn.execute("DELETE FROM session", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_single_slot() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::new(&temp_dir.path().join("bolao.db")).await.unwrap();
        let store = SessionStore::new(&storage);

        assert!(store.load_identity().await.unwrap().is_none());

        store
            .save_identity(&Identity::new("ana", "ana@example.com"))
            .await
            .unwrap();
        store
            .save_identity(&Identity::new("bia", "bia@example.com").with_display_name("Bia"))
            .await
            .unwrap();

        let loaded = store.load_identity().await.unwrap().unwrap();
        assert_eq!(loaded.uid, "bia");
        assert_eq!(loaded.display_name.as_deref(), Some("Bia"));

        store.clear().await.unwrap();
        assert!(store.load_identity().await.unwrap().is_none());
    }
}
