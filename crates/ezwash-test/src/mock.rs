//! Mock API provider for testing.

use std::sync::{Arc, Mutex};

use ezwash_core::types::{
    Credentials, Location, OrderRecord, OrderRequest, Profile, Registration, Role,
};
use ezwash_core::{ApiProvider, Error, ErrorBody, ErrorKind, Result, TokenPair};

/// One recorded call against the mock provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login { username: String, password: String },
    Register { username: String },
    FetchProfile,
    CreateOrder { order: OrderRequest },
    ListOrders,
    FetchOrder { order_id: String },
}

/// A canned failure for one mock operation.
#[derive(Debug, Clone)]
struct CannedError {
    status: u16,
    detail: String,
}

impl CannedError {
    fn into_error(self) -> Error {
        Error::new(ErrorKind::from_status(self.status))
            .with_status(self.status)
            .with_message(self.detail.clone())
            .with_body(ErrorBody::Detail {
                detail: self.detail,
            })
    }
}

#[derive(Debug, Default)]
struct MockApiInner {
    calls: Mutex<Vec<ApiCall>>,
    orders: Mutex<Vec<OrderRecord>>,
    profile: Mutex<Option<Profile>>,
    token_pair: Mutex<Option<TokenPair>>,
    next_order_id: Mutex<String>,
    login_error: Mutex<Option<CannedError>>,
    register_error: Mutex<Option<CannedError>>,
    profile_error: Mutex<Option<CannedError>>,
    create_order_error: Mutex<Option<CannedError>>,
}

/// Mock API provider with canned responses and a call log.
///
/// Defaults to a successful customer session: logins yield a fixed token
/// pair, the profile is [`customer_profile`], and order submissions are
/// acknowledged under the identifier `EZ-2001`.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    inner: Arc<MockApiInner>,
}

impl MockApi {
    /// Creates a mock answering every operation successfully.
    pub fn new() -> Self {
        let mock = Self::default();
        *mock.inner.profile.lock().unwrap() = Some(customer_profile());
        *mock.inner.token_pair.lock().unwrap() =
            Some(TokenPair::new("mock-access", "mock-refresh"));
        *mock.inner.next_order_id.lock().unwrap() = "EZ-2001".to_owned();
        mock
    }

    /// Replaces the profile returned by `fetch_profile`.
    #[must_use]
    pub fn with_profile(self, profile: Profile) -> Self {
        *self.inner.profile.lock().unwrap() = Some(profile);
        self
    }

    /// Replaces the token pair returned by `login`.
    #[must_use]
    pub fn with_token_pair(self, pair: TokenPair) -> Self {
        *self.inner.token_pair.lock().unwrap() = Some(pair);
        self
    }

    /// Sets the identifier assigned to the next created order.
    #[must_use]
    pub fn with_next_order_id(self, order_id: impl Into<String>) -> Self {
        *self.inner.next_order_id.lock().unwrap() = order_id.into();
        self
    }

    /// Makes `login` fail with the given status and detail message.
    #[must_use]
    pub fn with_login_error(self, status: u16, detail: impl Into<String>) -> Self {
        *self.inner.login_error.lock().unwrap() = Some(CannedError {
            status,
            detail: detail.into(),
        });
        self
    }

    /// Makes `register` fail with the given status and detail message.
    #[must_use]
    pub fn with_register_error(self, status: u16, detail: impl Into<String>) -> Self {
        *self.inner.register_error.lock().unwrap() = Some(CannedError {
            status,
            detail: detail.into(),
        });
        self
    }

    /// Makes `fetch_profile` fail with the given status and detail message.
    #[must_use]
    pub fn with_profile_error(self, status: u16, detail: impl Into<String>) -> Self {
        *self.inner.profile_error.lock().unwrap() = Some(CannedError {
            status,
            detail: detail.into(),
        });
        self
    }

    /// Makes `create_order` fail with the given status and detail message.
    #[must_use]
    pub fn with_create_order_error(self, status: u16, detail: impl Into<String>) -> Self {
        *self.inner.create_order_error.lock().unwrap() = Some(CannedError {
            status,
            detail: detail.into(),
        });
        self
    }

    /// Returns every call recorded so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// Returns the number of calls made to `login`.
    pub fn login_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Login { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.inner.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ApiProvider for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair> {
        self.record(ApiCall::Login {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        });

        if let Some(canned) = self.inner.login_error.lock().unwrap().clone() {
            return Err(canned.into_error());
        }

        self.inner
            .token_pair
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::internal_error().with_message("mock has no token pair"))
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        self.record(ApiCall::Register {
            username: registration.username.clone(),
        });

        if let Some(canned) = self.inner.register_error.lock().unwrap().clone() {
            return Err(canned.into_error());
        }

        Ok(())
    }

    async fn fetch_profile(&self) -> Result<Profile> {
        self.record(ApiCall::FetchProfile);

        if let Some(canned) = self.inner.profile_error.lock().unwrap().clone() {
            return Err(canned.into_error());
        }

        self.inner
            .profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::internal_error().with_message("mock has no profile"))
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderRecord> {
        self.record(ApiCall::CreateOrder {
            order: order.clone(),
        });

        if let Some(canned) = self.inner.create_order_error.lock().unwrap().clone() {
            return Err(canned.into_error());
        }

        let order_id = self.inner.next_order_id.lock().unwrap().clone();
        let record = OrderRecord {
            order_id,
            user_id: None,
            customer_name: None,
            items: order.items.clone(),
            total_price: order.total_price.clone(),
            status: Default::default(),
            pickup_location: order.location.clone(),
            phone_number: order.phone_number.clone(),
            assigned_rider_id: None,
            assigned_rider_name: None,
            created_at: None,
            updated_at: None,
        };

        self.inner.orders.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>> {
        self.record(ApiCall::ListOrders);
        Ok(self.inner.orders.lock().unwrap().clone())
    }

    async fn fetch_order(&self, order_id: &str) -> Result<OrderRecord> {
        self.record(ApiCall::FetchOrder {
            order_id: order_id.to_owned(),
        });

        self.inner
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.order_id == order_id)
            .cloned()
            .ok_or_else(|| {
                Error::not_found()
                    .with_status(404)
                    .with_message("Order not found")
            })
    }
}

/// A customer profile fixture with contact data filled in.
pub fn customer_profile() -> Profile {
    Profile {
        id: 12,
        username: "ama".to_owned(),
        email: "ama@example.com".to_owned(),
        role: Role::Customer,
        phone_number: Some("+233200000000".to_owned()),
        location: Some(Location::from_address("12 Oxford St, Osu, Accra")),
        is_email_verified: Some(true),
        custom_id: Some("CS-1A2B3C".to_owned()),
        is_online: None,
        streak_count: Some(4),
    }
}

/// A rider profile fixture.
pub fn rider_profile() -> Profile {
    Profile {
        id: 31,
        username: "kofi".to_owned(),
        email: "kofi@example.com".to_owned(),
        role: Role::Rider,
        phone_number: Some("+233240000000".to_owned()),
        location: None,
        is_email_verified: Some(true),
        custom_id: Some("RD-9X8Y7Z".to_owned()),
        is_online: Some(true),
        streak_count: None,
    }
}
