//! [`ApiProvider`] implementation for [`ApiClient`].

use ezwash_core::types::{Credentials, OrderRecord, OrderRequest, Profile, Registration};
use ezwash_core::{ApiProvider, ApiService, TokenPair};

use crate::client::{ApiClient, TRACING_TARGET};

impl ApiClient {
    /// Converts this client into an [`ApiService`] for dependency injection.
    pub fn into_service(self) -> ApiService {
        ApiService::new(self)
    }
}

#[async_trait::async_trait]
impl ApiProvider for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ezwash_core::Result<TokenPair> {
        let pair: TokenPair = self.post("/users/login/", credentials, false).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            username = %credentials.username,
            "login accepted"
        );

        Ok(pair)
    }

    async fn register(&self, registration: &Registration) -> ezwash_core::Result<()> {
        // The created-user ack is decoded for validity and discarded; the
        // session is established by the follow-up login.
        let _ack: serde_json::Value = self.post("/users/register/", registration, false).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            username = %registration.username,
            "registration accepted"
        );

        Ok(())
    }

    async fn fetch_profile(&self) -> ezwash_core::Result<Profile> {
        Ok(self.get("/users/profile/", true).await?)
    }

    async fn create_order(&self, order: &OrderRequest) -> ezwash_core::Result<OrderRecord> {
        let record: OrderRecord = self.post("/orders/", order, true).await?;

        tracing::info!(
            target: TRACING_TARGET,
            order_id = %record.order_id,
            items = order.items.len(),
            "order placed"
        );

        Ok(record)
    }

    async fn list_orders(&self) -> ezwash_core::Result<Vec<OrderRecord>> {
        Ok(self.get("/orders/", true).await?)
    }

    async fn fetch_order(&self, order_id: &str) -> ezwash_core::Result<OrderRecord> {
        Ok(self.get(&format!("/orders/{order_id}/"), true).await?)
    }
}
