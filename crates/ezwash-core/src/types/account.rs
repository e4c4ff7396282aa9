//! Account, profile, and authentication types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Actor category governing which protected area and API scope an actor
/// may use. Serialized in the backend's SCREAMING_SNAKE_CASE form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Places laundry orders.
    #[default]
    Customer,
    /// Picks up and delivers orders.
    Rider,
    /// Manages the marketplace.
    Admin,
    /// Manages the marketplace, including other admins.
    SuperAdmin,
    /// Refers customers and earns commissions.
    Ambassador,
}

impl Role {
    /// Returns true for roles with access to the admin area.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// A pickup/delivery location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Free-form street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// `[longitude, latitude]` pair, when geocoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

impl Location {
    /// Creates a location from a street address.
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            coordinates: None,
        }
    }
}

/// The authenticated actor's profile as returned by `/users/profile/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Numeric account identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Actor category.
    pub role: Role,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Default pickup location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Whether the contact email has been verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_verified: Option<bool>,
    /// Opaque display identifier, e.g. `CS-1A2B3C`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    /// Rider availability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    /// Customer loyalty streak.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_count: Option<u32>,
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration request body for `/users/register/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Ambassador referral code, validated server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl Registration {
    /// Creates a registration with the required fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            phone_number: None,
            role: None,
            location: None,
            referral_code: None,
        }
    }

    /// Sets the contact phone number.
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Sets the requested role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the default pickup location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets an ambassador referral code.
    pub fn with_referral_code(mut self, referral_code: impl Into<String>) -> Self {
        self.referral_code = Some(referral_code.into());
        self
    }

    /// Returns the credentials used for the post-registration login.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
        let role: Role = serde_json::from_str("\"AMBASSADOR\"").unwrap();
        assert_eq!(role, Role::Ambassador);
    }

    #[test]
    fn test_role_admin_predicate() {
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
        assert!(!Role::Customer.is_admin());
        assert!(!Role::Rider.is_admin());
    }

    #[test]
    fn test_profile_tolerates_missing_optionals() {
        let profile: Profile = serde_json::from_str(
            r#"{"id": 7, "username": "ama", "email": "ama@example.com", "role": "CUSTOMER"}"#,
        )
        .unwrap();

        assert_eq!(profile.id, 7);
        assert_eq!(profile.role, Role::Customer);
        assert!(profile.phone_number.is_none());
        assert!(profile.location.is_none());
    }

    #[test]
    fn test_registration_skips_empty_optionals() {
        let registration = Registration::new("ama", "ama@example.com", "hunter2");
        let json = serde_json::to_value(&registration).unwrap();

        assert_eq!(json["username"], "ama");
        assert!(json.get("referral_code").is_none());
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_registration_credentials_match() {
        let registration =
            Registration::new("ama", "ama@example.com", "hunter2").with_role(Role::Customer);
        let credentials = registration.credentials();

        assert_eq!(credentials.username, "ama");
        assert_eq!(credentials.password, "hunter2");
    }
}
