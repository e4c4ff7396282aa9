//! Wire types for the EZWash REST API.

mod account;
mod order;

pub use account::{Credentials, Location, Profile, Registration, Role};
pub use order::{ItemColor, OrderItem, OrderRecord, OrderRequest, OrderStatus};
