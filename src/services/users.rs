use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::ServiceError;
use crate::models::User;

/// Реестр пользователей. Выдача учёток - внешняя по отношению к ядру
/// забота: движку резервирования нужен только проверенный user_id.
pub struct UserRegistry {
    by_email: RwLock<HashMap<String, User>>,
    next_id: AtomicI32,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            by_email: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub async fn register(
        &self,
        email: String,
        password: &str,
        first_name: String,
        surname: String,
    ) -> Result<User, ServiceError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::InvalidRequest(format!("password rejected: {}", e)))?;

        let mut users = self.by_email.write().await;
        if users.contains_key(&email) {
            return Err(ServiceError::InvalidRequest(
                "email already registered".to_string(),
            ));
        }

        let user = User {
            user_id: self.next_id.fetch_add(1, Ordering::Relaxed),
            email: email.clone(),
            password_hash,
            first_name,
            surname,
            registered_at: Utc::now().naive_utc(),
            is_active: true,
        };
        users.insert(email, user.clone());
        info!("user {} registered: {}", user.user_id, user.email);
        Ok(user)
    }

    /// Basic-auth проверка: active пользователь + bcrypt-совпадение пароля
    pub async fn verify(&self, email: &str, password: &str) -> Option<User> {
        let users = self.by_email.read().await;
        let user = users.get(email)?;
        if user.is_active && user.verify_password(password) {
            Some(user.clone())
        } else {
            None
        }
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_and_verify() {
        let registry = UserRegistry::new();
        let user = registry
            .register("ana@cine.es".into(), "secreto", "Ana".into(), "García".into())
            .await
            .unwrap();
        assert_eq!(user.user_id, 1);

        assert!(registry.verify("ana@cine.es", "secreto").await.is_some());
        assert!(registry.verify("ana@cine.es", "wrong").await.is_none());
        assert!(registry.verify("nadie@cine.es", "secreto").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let registry = UserRegistry::new();
        registry
            .register("ana@cine.es".into(), "a", "Ana".into(), "García".into())
            .await
            .unwrap();
        let err = registry
            .register("ana@cine.es".into(), "b", "Otra".into(), "Ana".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }
}
