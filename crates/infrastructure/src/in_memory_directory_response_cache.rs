use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rolescope_application::DirectoryResponseCache;
use rolescope_core::{AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, RoleAssignment, UserRecord};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

type RolesKey = (AccessToken, UserPrincipalName);

/// In-memory cache adapter for directory responses.
///
/// Expired entries are dropped on read and swept on every write.
#[derive(Default)]
pub struct InMemoryDirectoryResponseCache {
    users: RwLock<HashMap<AccessToken, CacheEntry<Vec<UserRecord>>>>,
    roles: RwLock<HashMap<RolesKey, CacheEntry<Vec<RoleAssignment>>>>,
}

impl InMemoryDirectoryResponseCache {
    /// Creates an empty in-memory response cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

async fn read_entry<K, T>(entries: &RwLock<HashMap<K, CacheEntry<T>>>, key: &K) -> Option<T>
where
    K: Eq + Hash,
    T: Clone,
{
    {
        let entries = entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }
    }

    let mut entries = entries.write().await;
    if entries
        .get(key)
        .is_some_and(|entry| entry.expires_at <= Instant::now())
    {
        entries.remove(key);
    }

    None
}

async fn write_entry<K, T>(
    entries: &RwLock<HashMap<K, CacheEntry<T>>>,
    key: K,
    value: T,
    ttl_seconds: u32,
) where
    K: Eq + Hash,
{
    if ttl_seconds == 0 {
        return;
    }

    let now = Instant::now();
    let expires_at = now
        .checked_add(Duration::from_secs(u64::from(ttl_seconds)))
        .unwrap_or(now);

    let mut entries = entries.write().await;
    entries.retain(|_, entry| entry.expires_at > now);
    entries.insert(key, CacheEntry { value, expires_at });
}

#[async_trait]
impl DirectoryResponseCache for InMemoryDirectoryResponseCache {
    async fn get_users(&self, token: &AccessToken) -> AppResult<Option<Vec<UserRecord>>> {
        Ok(read_entry(&self.users, token).await)
    }

    async fn set_users(
        &self,
        token: &AccessToken,
        users: Vec<UserRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        write_entry(&self.users, token.clone(), users, ttl_seconds).await;
        Ok(())
    }

    async fn get_roles(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Option<Vec<RoleAssignment>>> {
        Ok(read_entry(&self.roles, &(token.clone(), user.clone())).await)
    }

    async fn set_roles(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
        roles: Vec<RoleAssignment>,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        write_entry(
            &self.roles,
            (token.clone(), user.clone()),
            roles,
            ttl_seconds,
        )
        .await;
        Ok(())
    }
}
