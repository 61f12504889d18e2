use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{Principal, TokenService};
use crate::database::models::drawer::DrawerProfile;
use crate::database::models::user::UserProfile;
use crate::database::models::{Drawer, User};
use crate::database::{DatabaseError, Store};

use super::{required, required_password, ServiceError};

#[derive(Debug, Clone, Serialize)]
pub struct UserSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawerSession {
    pub token: String,
    pub drawer: DrawerProfile,
}

/// Registration and login for users and drawers.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    pub async fn register_user(
        &self,
        email: Option<String>,
        password: Option<String>,
        username: Option<String>,
    ) -> Result<UserSession, ServiceError> {
        let email = normalize_email(required("email", email)?);
        let password = required_password(password)?;
        let username = username.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash: hash_password_blocking(password).await?,
            created_at: Utc::now(),
        };

        self.store.insert_user(&user).await.map_err(|e| match e {
            DatabaseError::Duplicate(_) => ServiceError::DuplicateEmail,
            other => other.into(),
        })?;

        info!("Registered user {}", user.id);
        let token = self.tokens.issue(&Principal::User { id: user.id })?;
        Ok(UserSession {
            token,
            user: UserProfile::from(&user),
        })
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login_user(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<UserSession, ServiceError> {
        let email = normalize_email(required("email", email)?);
        let password = required_password(password)?;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!("User login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password_blocking(password, user.password_hash.clone()).await? {
            warn!("User login failed for {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&Principal::User { id: user.id })?;
        Ok(UserSession {
            token,
            user: UserProfile::from(&user),
        })
    }

    pub async fn create_drawer(
        &self,
        drawer_name: Option<String>,
        password: Option<String>,
    ) -> Result<DrawerSession, ServiceError> {
        let drawer_name = required("drawerName", drawer_name)?;
        let password = required_password(password)?;

        if self.store.find_drawer_by_name(&drawer_name).await?.is_some() {
            return Err(ServiceError::DuplicateDrawerName);
        }

        let drawer = Drawer {
            id: Uuid::new_v4(),
            drawer_name,
            password_hash: hash_password_blocking(password).await?,
            created_at: Utc::now(),
        };

        self.store.insert_drawer(&drawer).await.map_err(|e| match e {
            DatabaseError::Duplicate(_) => ServiceError::DuplicateDrawerName,
            other => other.into(),
        })?;

        info!("Created drawer {}", drawer.id);
        let token = self.tokens.issue(&Principal::Drawer { id: drawer.id })?;
        Ok(DrawerSession {
            token,
            drawer: DrawerProfile::from(&drawer),
        })
    }

    pub async fn login_drawer(
        &self,
        drawer_name: Option<String>,
        password: Option<String>,
    ) -> Result<String, ServiceError> {
        let drawer_name = required("drawerName", drawer_name)?;
        let password = required_password(password)?;

        let Some(drawer) = self.store.find_drawer_by_name(&drawer_name).await? else {
            warn!("Drawer login failed: unknown drawer");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password_blocking(password, drawer.password_hash.clone()).await? {
            warn!("Drawer login failed for {}", drawer.id);
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(self.tokens.issue(&Principal::Drawer { id: drawer.id })?)
    }
}

fn normalize_email(email: String) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn service() -> (AccountService, TokenService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenService::new("test-secret", 24 * 7);
        (AccountService::new(store.clone(), tokens.clone()), tokens, store)
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[tokio::test]
    async fn register_twice_is_duplicate() {
        let (accounts, _, _) = service();
        accounts.register_user(s("a@x.com"), s("pw1"), None).await.unwrap();

        let err = accounts.register_user(s("A@X.com "), s("pw2"), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail));
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let (accounts, _, store) = service();
        accounts.register_user(s("a@x.com"), s("pw1"), s("alice")).await.unwrap();

        let user = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert_eq!(user.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn login_token_decodes_to_stored_user() {
        let (accounts, tokens, store) = service();
        accounts.register_user(s("a@x.com"), s("pw1"), None).await.unwrap();

        let session = accounts.login_user(s("a@x.com"), s("pw1")).await.unwrap();
        let stored = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(tokens.verify(&session.token).unwrap(), Principal::User { id: stored.id });
        assert_eq!(session.user.id, stored.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (accounts, _, _) = service();
        accounts.register_user(s("a@x.com"), s("pw1"), None).await.unwrap();

        let wrong = accounts.login_user(s("a@x.com"), s("wrong")).await.unwrap_err();
        let unknown = accounts.login_user(s("b@x.com"), s("pw1")).await.unwrap_err();
        assert!(matches!(wrong, ServiceError::InvalidCredentials));
        assert!(matches!(unknown, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let (accounts, _, _) = service();
        assert!(matches!(
            accounts.register_user(None, s("pw"), None).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            accounts.register_user(s("a@x.com"), s(""), None).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            accounts.create_drawer(s("   "), s("pw")).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn drawer_lifecycle() {
        let (accounts, tokens, _) = service();
        let session = accounts.create_drawer(s("team1"), s("pw")).await.unwrap();
        assert_eq!(session.drawer.drawer_name, "team1");

        let dup = accounts.create_drawer(s("team1"), s("other")).await.unwrap_err();
        assert!(matches!(dup, ServiceError::DuplicateDrawerName));

        let token = accounts.login_drawer(s("team1"), s("pw")).await.unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), Principal::Drawer { id: session.drawer.id });

        let bad = accounts.login_drawer(s("team1"), s("nope")).await.unwrap_err();
        assert!(matches!(bad, ServiceError::InvalidCredentials));
    }
}
