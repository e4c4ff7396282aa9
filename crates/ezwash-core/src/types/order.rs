//! Order wire types.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use super::Location;

/// Wash variant chosen per line item; lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemColor {
    /// Whites load.
    White,
    /// Colored load; the default for a fresh selection.
    #[default]
    Colored,
}

/// One line item of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog item display name.
    pub name: String,
    /// Number of pieces; at least 1.
    pub quantity: u32,
    /// Chosen wash variant.
    pub color: ItemColor,
    /// Free-text handling note; may be empty.
    pub note: String,
    /// Unit price in Ghanaian cedi, sent as a JSON number.
    #[serde(with = "bigdecimal::serde::json_num")]
    pub price_per_unit: BigDecimal,
}

/// Body of `POST /orders/`: the serialized cart plus the customer's
/// contact data from their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub total_price: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Lifecycle state of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, awaiting acceptance.
    #[default]
    Pending,
    /// Accepted by the shop.
    Accepted,
    /// Collected by a rider.
    PickedUp,
    /// Being washed.
    Cleaning,
    /// Ready for delivery.
    Ready,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Returns true once the order has reached a terminal state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// An order record as stored and returned by the backend.
///
/// Timestamps arrive as naive ISO-8601 datetimes (the backend emits UTC
/// without an offset), hence the civil datetime representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Public order identifier, e.g. `ORD-4F2A1B`.
    pub order_id: String,
    /// Owning account id, stringified by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Customer display name snapshot taken at submission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Submitted line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Total as computed by the submitting client.
    #[serde(default, with = "bigdecimal::serde::json_num")]
    pub total_price: BigDecimal,
    /// Current lifecycle state.
    #[serde(default)]
    pub status: OrderStatus,
    /// Where the rider collects the laundry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<Location>,
    /// Customer contact number snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Assigned rider account id, once accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_rider_id: Option<String>,
    /// Assigned rider display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_rider_name: Option<String>,
    /// Submission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::civil::DateTime>,
    /// Last status change time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<jiff::civil::DateTime>,
}
