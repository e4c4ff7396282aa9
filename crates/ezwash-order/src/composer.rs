//! The order composer: a cart over the embedded catalog.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use ezwash_core::types::{ItemColor, OrderItem, OrderRequest};
use ezwash_core::{ApiService, Error, Result};
use ezwash_session::{Route, SessionState};

use crate::catalog::{CatalogItem, catalog_item};
use crate::TRACING_TARGET;

/// One selected catalog item with its per-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The catalog item this line refers to.
    pub item: &'static CatalogItem,
    /// Number of pieces; starts at 1 and the stepper paths keep it there.
    pub quantity: u32,
    /// Chosen wash variant.
    pub color: ItemColor,
    /// Free-text handling note.
    pub note: String,
}

impl Selection {
    fn new(item: &'static CatalogItem) -> Self {
        Self {
            item,
            quantity: 1,
            color: ItemColor::default(),
            note: String::new(),
        }
    }

    /// Returns this line's contribution to the order total.
    pub fn line_total(&self) -> BigDecimal {
        self.item.unit_price() * BigDecimal::from(self.quantity)
    }

    fn to_order_item(&self) -> OrderItem {
        OrderItem {
            name: self.item.name.to_owned(),
            quantity: self.quantity,
            color: self.color,
            note: self.note.clone(),
            price_per_unit: self.item.unit_price(),
        }
    }
}

/// A partial edit applied to one selection; `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionUpdate {
    pub quantity: Option<u32>,
    pub color: Option<ItemColor>,
    pub note: Option<String>,
}

impl SelectionUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the piece count.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the wash variant.
    pub fn color(mut self, color: ItemColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the handling note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// No session; the actor must log in first. The cart is untouched and
    /// no request was made.
    RedirectToLogin,
    /// The order was accepted; the cart has been cleared.
    Placed {
        /// Public identifier assigned by the backend.
        order_id: String,
        /// Where to send the actor next.
        next: Route,
    },
}

/// Builds up an order against the embedded catalog and submits it.
///
/// Selections are keyed by catalog id, so re-toggling an item removes
/// exactly that line and iteration follows catalog order.
#[derive(Debug)]
pub struct OrderComposer {
    api: ApiService,
    selections: BTreeMap<u32, Selection>,
    expanded: Option<u32>,
    last_order_id: Option<String>,
}

impl OrderComposer {
    /// Creates an empty composer submitting through the given provider.
    pub fn new(api: ApiService) -> Self {
        Self {
            api,
            selections: BTreeMap::new(),
            expanded: None,
            last_order_id: None,
        }
    }

    /// Adds the item with defaults (one piece, colored wash, empty note),
    /// or removes it if already selected. Returns whether the item is
    /// selected afterwards; unknown ids are ignored.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.selections.remove(&id).is_some() {
            if self.expanded == Some(id) {
                self.expanded = None;
            }
            return false;
        }

        let Some(item) = catalog_item(id) else {
            return false;
        };

        self.selections.insert(id, Selection::new(item));
        self.expanded = Some(id);
        true
    }

    /// Applies a partial edit to an existing selection. Editing an
    /// unselected item is a no-op.
    ///
    /// The quantity is applied as given; the floor lives in
    /// [`OrderComposer::decrement`], the only decrementing path.
    pub fn update(&mut self, id: u32, update: SelectionUpdate) {
        let Some(selection) = self.selections.get_mut(&id) else {
            return;
        };

        if let Some(quantity) = update.quantity {
            selection.quantity = quantity;
        }
        if let Some(color) = update.color {
            selection.color = color;
        }
        if let Some(note) = update.note {
            selection.note = note;
        }
    }

    /// Adds one piece to an existing selection.
    pub fn increment(&mut self, id: u32) {
        if let Some(selection) = self.selections.get_mut(&id) {
            selection.quantity = selection.quantity.saturating_add(1);
        }
    }

    /// Removes one piece from an existing selection, never going below 1.
    pub fn decrement(&mut self, id: u32) {
        if let Some(selection) = self.selections.get_mut(&id) {
            selection.quantity = selection.quantity.saturating_sub(1).max(1);
        }
    }

    /// Marks a selection's options panel as open, or closes it with `None`.
    pub fn set_expanded(&mut self, id: Option<u32>) {
        self.expanded = id.filter(|id| self.selections.contains_key(id));
    }

    /// Returns the selection whose options panel is open.
    pub fn expanded(&self) -> Option<&Selection> {
        self.expanded.and_then(|id| self.selections.get(&id))
    }

    /// Returns the selection for a catalog id.
    pub fn selection(&self, id: u32) -> Option<&Selection> {
        self.selections.get(&id)
    }

    /// Iterates selections in catalog order.
    pub fn selections(&self) -> impl Iterator<Item = &Selection> {
        self.selections.values()
    }

    /// Returns true when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Total number of pieces across all selections.
    pub fn count(&self) -> u32 {
        self.selections.values().map(|s| s.quantity).sum()
    }

    /// Sum of all line totals.
    pub fn total(&self) -> BigDecimal {
        self.selections
            .values()
            .map(Selection::line_total)
            .sum::<BigDecimal>()
    }

    /// Identifier of the most recently placed order.
    pub fn last_order_id(&self) -> Option<&str> {
        self.last_order_id.as_deref()
    }

    /// Submits the cart as one order.
    ///
    /// Without an authenticated session this returns
    /// [`Submission::RedirectToLogin`] before any request is made. On
    /// success the cart is cleared and the actor is routed to their order
    /// history; on failure the cart is preserved so the actor can retry.
    pub async fn submit(&mut self, state: &SessionState) -> Result<Submission> {
        let Some(profile) = state.profile() else {
            tracing::debug!(
                target: TRACING_TARGET,
                "submission without a session; redirecting to login"
            );
            return Ok(Submission::RedirectToLogin);
        };

        if self.selections.is_empty() {
            return Err(Error::invalid_input().with_message("No items selected"));
        }

        let request = OrderRequest {
            items: self
                .selections
                .values()
                .map(Selection::to_order_item)
                .collect(),
            total_price: self.total(),
            phone_number: profile.phone_number.clone(),
            location: profile.location.clone(),
        };

        let record = self.api.create_order(&request).await?;
        tracing::debug!(
            target: TRACING_TARGET,
            order_id = %record.order_id,
            total = %record.total_price,
            "cart submitted"
        );

        self.selections.clear();
        self.expanded = None;
        self.last_order_id = Some(record.order_id.clone());

        Ok(Submission::Placed {
            order_id: record.order_id,
            next: Route::History,
        })
    }
}
