use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rolescope_core::{AppError, AppResult, UserPrincipalName};
use rolescope_domain::{AccessToken, RoleAssignment, UserQuery, UserRecord};
use tokio::sync::Mutex;

use super::DirectoryService;
use crate::{DirectoryGateway, DirectoryResponseCache};

#[derive(Default)]
struct CountingGateway {
    users: Vec<UserRecord>,
    roles: HashMap<String, Vec<RoleAssignment>>,
    user_calls: Mutex<usize>,
    role_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl DirectoryGateway for CountingGateway {
    async fn list_users(&self, _token: &AccessToken) -> AppResult<Vec<UserRecord>> {
        *self.user_calls.lock().await += 1;
        Ok(self.users.clone())
    }

    async fn list_role_assignments(
        &self,
        _token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Vec<RoleAssignment>> {
        self.role_calls.lock().await.push(user.to_string());
        Ok(self.roles.get(user.as_str()).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct MapCache {
    users: Mutex<HashMap<String, Vec<UserRecord>>>,
    roles: Mutex<HashMap<(String, String), Vec<RoleAssignment>>>,
    ttls: Mutex<Vec<u32>>,
}

#[async_trait]
impl DirectoryResponseCache for MapCache {
    async fn get_users(&self, token: &AccessToken) -> AppResult<Option<Vec<UserRecord>>> {
        Ok(self.users.lock().await.get(token.as_str()).cloned())
    }

    async fn set_users(
        &self,
        token: &AccessToken,
        users: Vec<UserRecord>,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        self.ttls.lock().await.push(ttl_seconds);
        self.users
            .lock()
            .await
            .insert(token.as_str().to_owned(), users);
        Ok(())
    }

    async fn get_roles(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
    ) -> AppResult<Option<Vec<RoleAssignment>>> {
        Ok(self
            .roles
            .lock()
            .await
            .get(&(token.as_str().to_owned(), user.to_string()))
            .cloned())
    }

    async fn set_roles(
        &self,
        token: &AccessToken,
        user: &UserPrincipalName,
        roles: Vec<RoleAssignment>,
        ttl_seconds: u32,
    ) -> AppResult<()> {
        self.ttls.lock().await.push(ttl_seconds);
        self.roles
            .lock()
            .await
            .insert((token.as_str().to_owned(), user.to_string()), roles);
        Ok(())
    }
}

struct FailingGateway;

#[async_trait]
impl DirectoryGateway for FailingGateway {
    async fn list_users(&self, _token: &AccessToken) -> AppResult<Vec<UserRecord>> {
        Err(AppError::Upstream {
            status: 503,
            message: "unavailable".to_owned(),
        })
    }

    async fn list_role_assignments(
        &self,
        _token: &AccessToken,
        _user: &UserPrincipalName,
    ) -> AppResult<Vec<RoleAssignment>> {
        Err(AppError::Network("connection reset".to_owned()))
    }
}

fn upn(value: &str) -> UserPrincipalName {
    UserPrincipalName::new(value).unwrap_or_else(|_| unreachable!())
}

fn gateway() -> CountingGateway {
    CountingGateway {
        users: vec![
            UserRecord::new("Alice", "alice@x.com", "alice@x.com"),
            UserRecord::new("Bob", "bob@x.com", "bob@x.com"),
        ],
        roles: HashMap::from([
            (
                "alice@x.com".to_owned(),
                vec![RoleAssignment::with_app_role_id("r1")],
            ),
            (
                "bob@x.com".to_owned(),
                vec![
                    RoleAssignment::with_app_role_id("r1"),
                    RoleAssignment::with_app_role_id("r2"),
                ],
            ),
        ]),
        ..CountingGateway::default()
    }
}

#[tokio::test]
async fn search_users_filters_without_touching_the_listing() {
    let service = DirectoryService::new(Arc::new(gateway()));
    let token = AccessToken::new("t1");

    let found = service
        .search_users(&token, &UserQuery::new(Some("BOB")))
        .await;
    assert!(found.is_ok());
    let found = found.unwrap_or_default();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "Bob");

    let everyone = service.list_users(&token).await.unwrap_or_default();
    assert_eq!(everyone.len(), 2);
}

#[tokio::test]
async fn uncached_service_calls_gateway_every_time() {
    let gateway = Arc::new(gateway());
    let service = DirectoryService::new(gateway.clone());
    let token = AccessToken::new("t1");

    assert!(service.list_users(&token).await.is_ok());
    assert!(service.list_users(&token).await.is_ok());

    assert_eq!(*gateway.user_calls.lock().await, 2);
}

#[tokio::test]
async fn cached_service_reuses_responses_keyed_by_arguments() {
    let gateway = Arc::new(gateway());
    let cache = Arc::new(MapCache::default());
    let service = DirectoryService::new(gateway.clone()).with_cache(cache.clone(), 600);
    let token = AccessToken::new("t1");

    assert!(service.list_users(&token).await.is_ok());
    assert!(service.list_users(&token).await.is_ok());
    assert!(service.list_users(&AccessToken::new("t2")).await.is_ok());
    assert_eq!(*gateway.user_calls.lock().await, 2);

    assert!(service.roles_for(&token, &upn("alice@x.com")).await.is_ok());
    assert!(service.roles_for(&token, &upn("alice@x.com")).await.is_ok());
    assert!(service.roles_for(&token, &upn("bob@x.com")).await.is_ok());
    assert_eq!(
        *gateway.role_calls.lock().await,
        vec!["alice@x.com".to_owned(), "bob@x.com".to_owned()]
    );

    assert!(cache.ttls.lock().await.iter().all(|ttl| *ttl == 600));
}

#[tokio::test]
async fn zero_ttl_disables_cache() {
    let gateway = Arc::new(gateway());
    let cache = Arc::new(MapCache::default());
    let service = DirectoryService::new(gateway.clone()).with_cache(cache.clone(), 0);
    let token = AccessToken::new("t1");

    assert!(service.list_users(&token).await.is_ok());
    assert!(service.list_users(&token).await.is_ok());

    assert_eq!(*gateway.user_calls.lock().await, 2);
    assert!(cache.users.lock().await.is_empty());
}

#[tokio::test]
async fn role_heatmap_pivots_every_requested_user() {
    let service = DirectoryService::new(Arc::new(gateway()));
    let heatmap = service
        .role_heatmap(
            &AccessToken::new("t1"),
            &[upn("alice@x.com"), upn("bob@x.com")],
        )
        .await;

    assert!(heatmap.is_ok());
    let heatmap = heatmap.unwrap_or_default();
    assert_eq!(heatmap.roles(), ["r1".to_owned(), "r2".to_owned()]);
    assert_eq!(heatmap.rows()[0].cells, vec![1, 0]);
    assert_eq!(heatmap.rows()[1].cells, vec![1, 1]);
}

#[tokio::test]
async fn gateway_errors_propagate_without_retry() {
    let service = DirectoryService::new(Arc::new(FailingGateway));
    let token = AccessToken::new("t1");

    assert!(matches!(
        service.list_users(&token).await,
        Err(AppError::Upstream { status: 503, .. })
    ));
    assert!(matches!(
        service.roles_for(&token, &upn("alice@x.com")).await,
        Err(AppError::Network(_))
    ));
}
