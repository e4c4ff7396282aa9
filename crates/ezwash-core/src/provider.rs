//! The API provider trait and its injectable service wrapper.

use std::ops::Deref;
use std::sync::Arc;

use crate::Result;
use crate::types::{Credentials, OrderRecord, OrderRequest, Profile, Registration};

/// Core trait for talking to the EZWash REST API.
///
/// Implement this trait to provide a concrete transport; downstream code
/// (session manager, order composer) depends only on this abstraction.
#[async_trait::async_trait]
pub trait ApiProvider: Send + Sync {
    /// Exchanges credentials for a token pair. Unauthenticated.
    async fn login(&self, credentials: &Credentials) -> Result<crate::TokenPair>;

    /// Creates an account. Unauthenticated; the created-user ack body is
    /// discarded — callers establish a session with a follow-up login.
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Fetches the authenticated actor's own profile.
    async fn fetch_profile(&self) -> Result<Profile>;

    /// Submits one order; returns the stored record including its id.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderRecord>;

    /// Lists the caller's own orders, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>>;

    /// Fetches a single order by its public identifier.
    async fn fetch_order(&self, order_id: &str) -> Result<OrderRecord>;
}

/// Cloneable handle around a boxed [`ApiProvider`] for dependency injection.
#[derive(Clone)]
pub struct ApiService {
    inner: Arc<dyn ApiProvider>,
}

impl ApiService {
    /// Wraps a provider implementation.
    pub fn new(provider: impl ApiProvider + 'static) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Wraps an already-shared provider.
    pub fn from_arc(provider: Arc<dyn ApiProvider>) -> Self {
        Self { inner: provider }
    }
}

impl Deref for ApiService {
    type Target = dyn ApiProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService").finish_non_exhaustive()
    }
}
