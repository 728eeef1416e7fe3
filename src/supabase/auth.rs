use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use super::{RemoteClient, Supabase};
use crate::models::{Session, User};
use crate::store::{AuthService, StoreResult};

#[async_trait]
impl AuthService for Supabase {
    async fn user_for_token(&self, access_token: &str) -> StoreResult<User> {
        let url = self.restricted.endpoint("auth/v1/user")?;
        let request = self
            .restricted
            .request(Method::GET, url, Some(access_token));
        RemoteClient::send(request).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        let url = self.elevated.endpoint("auth/v1/token")?;
        let request = self
            .elevated
            .request(Method::POST, url, None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        RemoteClient::send(request).await
    }

    async fn create_user(&self, email: &str, password: &str) -> StoreResult<User> {
        let url = self.elevated.endpoint("auth/v1/admin/users")?;
        let request = self
            .elevated
            .request(Method::POST, url, None)
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true
            }));
        RemoteClient::send(request).await
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let url = self
            .elevated
            .endpoint(&format!("auth/v1/admin/users/{}", id))?;
        let request = self.elevated.request(Method::DELETE, url, None);
        RemoteClient::send_discarding(request).await
    }
}
