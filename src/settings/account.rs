//! Linked Minecraft account settings.

use uuid::Uuid;

use super::{SettingsError, SETTINGS_TTL};
use crate::cache::{Cached, KeyedCache};
use crate::database::SettingsStore;

/// Read-through cache for the Discord-user to Minecraft-uuid link.
///
/// An unlinked user is cached as an absence entry, so the "nothing linked"
/// answer is as cheap as a hit.
#[derive(Clone)]
pub struct AccountManager {
    cache: KeyedCache,
    store: SettingsStore,
}

impl AccountManager {
    pub fn new(cache: KeyedCache, store: SettingsStore) -> Self {
        Self { cache, store }
    }

    /// The uuid linked to a user, or `None` when nothing is linked.
    pub async fn get_account(&self, user_id: u64) -> Result<Option<Uuid>, SettingsError> {
        let key = format!("account_{user_id}");
        if let Some(entry) = self.cache.get::<Uuid>(&key).await? {
            return Ok(entry.into_option());
        }
        let uuid = self.store.account_uuid(user_id).await?;
        self.cache
            .set(&key, &Cached::from(uuid), SETTINGS_TTL)
            .await?;
        Ok(uuid)
    }

    /// Link (`Some`) or unlink (`None`) a Minecraft account.
    pub async fn set_account(
        &self,
        user_id: u64,
        uuid: Option<Uuid>,
    ) -> Result<(), SettingsError> {
        self.store.set_account_uuid(user_id, uuid).await?;
        self.cache
            .set(
                &format!("account_{user_id}"),
                &Cached::from(uuid),
                SETTINGS_TTL,
            )
            .await?;
        Ok(())
    }
}
