use bigdecimal::BigDecimal;
use ezwash_core::ApiService;
use ezwash_core::types::ItemColor;
use ezwash_session::{Route, SessionState};
use ezwash_test::{ApiCall, MockApi, customer_profile};
use ezwash_order::{OrderComposer, SelectionUpdate, Submission};

fn composer_with(mock: MockApi) -> OrderComposer {
    OrderComposer::new(ApiService::new(mock))
}

fn authenticated() -> SessionState {
    SessionState::Authenticated(customer_profile())
}

#[test]
fn test_toggle_adds_with_defaults() {
    let mut composer = composer_with(MockApi::new());

    assert!(composer.toggle(1));
    let selection = composer.selection(1).unwrap();
    assert_eq!(selection.quantity, 1);
    assert_eq!(selection.color, ItemColor::Colored);
    assert!(selection.note.is_empty());
    assert_eq!(composer.expanded().map(|s| s.item.id), Some(1));
}

#[test]
fn test_toggle_twice_removes_exactly_that_item() {
    let mut composer = composer_with(MockApi::new());
    composer.toggle(1);
    composer.toggle(4);

    assert!(!composer.toggle(1));
    assert!(composer.selection(1).is_none());
    assert!(composer.selection(4).is_some());
    assert_eq!(composer.count(), 1);
}

#[test]
fn test_toggle_unknown_id_is_ignored() {
    let mut composer = composer_with(MockApi::new());
    assert!(!composer.toggle(99));
    assert!(composer.is_empty());
}

#[test]
fn test_running_total_and_count() {
    let mut composer = composer_with(MockApi::new());
    composer.toggle(1); // T-Shirt, 3 cedi
    composer.update(1, SelectionUpdate::new().quantity(3));

    assert_eq!(composer.total(), BigDecimal::from(9));
    assert_eq!(composer.count(), 3);

    composer.toggle(4); // Jeans, 7 cedi
    assert_eq!(composer.total(), BigDecimal::from(16));
    assert_eq!(composer.count(), 4);
}

#[test]
fn test_update_edits_only_given_fields() {
    let mut composer = composer_with(MockApi::new());
    composer.toggle(2);
    composer.update(
        2,
        SelectionUpdate::new().color(ItemColor::White).note("starch"),
    );

    let selection = composer.selection(2).unwrap();
    assert_eq!(selection.quantity, 1);
    assert_eq!(selection.color, ItemColor::White);
    assert_eq!(selection.note, "starch");
}

#[test]
fn test_update_unselected_item_is_noop() {
    let mut composer = composer_with(MockApi::new());
    composer.update(3, SelectionUpdate::new().quantity(5));
    assert!(composer.selection(3).is_none());
}

#[test]
fn test_decrement_never_drops_below_one() {
    let mut composer = composer_with(MockApi::new());
    composer.toggle(1);

    composer.decrement(1);
    assert_eq!(composer.selection(1).unwrap().quantity, 1);

    composer.increment(1);
    composer.increment(1);
    assert_eq!(composer.selection(1).unwrap().quantity, 3);
}

#[test]
fn test_update_applies_quantity_verbatim() {
    let mut composer = composer_with(MockApi::new());
    composer.toggle(1);

    // The floor belongs to decrement alone; update trusts its caller.
    composer.update(1, SelectionUpdate::new().quantity(0));
    assert_eq!(composer.selection(1).unwrap().quantity, 0);

    composer.update(1, SelectionUpdate::new().quantity(12));
    assert_eq!(composer.selection(1).unwrap().quantity, 12);
}

#[tokio::test]
async fn test_anonymous_submission_makes_no_request() {
    let mock = MockApi::new();
    let mut composer = composer_with(mock.clone());
    composer.toggle(1);

    let outcome = composer.submit(&SessionState::Anonymous).await.unwrap();

    assert_eq!(outcome, Submission::RedirectToLogin);
    assert!(mock.calls().is_empty());
    assert_eq!(composer.count(), 1);
}

#[tokio::test]
async fn test_empty_cart_submission_is_rejected() {
    let mut composer = composer_with(MockApi::new());
    let error = composer.submit(&authenticated()).await.unwrap_err();
    assert_eq!(error.to_string(), "[invalid_input]: No items selected");
}

#[tokio::test]
async fn test_successful_submission_clears_cart() {
    let mock = MockApi::new();
    let mut composer = composer_with(mock.clone());
    composer.toggle(1);
    composer.update(1, SelectionUpdate::new().quantity(3));

    let outcome = composer.submit(&authenticated()).await.unwrap();

    assert_eq!(
        outcome,
        Submission::Placed {
            order_id: "EZ-2001".to_owned(),
            next: Route::History,
        }
    );
    assert!(composer.is_empty());
    assert_eq!(composer.last_order_id(), Some("EZ-2001"));

    let calls = mock.calls();
    let ApiCall::CreateOrder { order } = &calls[0] else {
        panic!("expected a create_order call, got {calls:?}");
    };
    assert_eq!(order.total_price, BigDecimal::from(9));
    assert_eq!(order.items[0].name, "T-Shirt");
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(
        order.phone_number,
        customer_profile().phone_number
    );
}

#[tokio::test]
async fn test_failed_submission_preserves_cart() {
    let mock = MockApi::new().with_create_order_error(500, "Server error");
    let mut composer = composer_with(mock);
    composer.toggle(1);
    composer.toggle(4);

    assert!(composer.submit(&authenticated()).await.is_err());

    assert_eq!(composer.count(), 2);
    assert!(composer.selection(1).is_some());
    assert!(composer.selection(4).is_some());
    assert!(composer.last_order_id().is_none());
}

#[tokio::test]
async fn test_items_submitted_in_catalog_order() {
    let mock = MockApi::new();
    let mut composer = composer_with(mock.clone());
    composer.toggle(16);
    composer.toggle(1);
    composer.toggle(5);

    composer.submit(&authenticated()).await.unwrap();

    let calls = mock.calls();
    let ApiCall::CreateOrder { order } = &calls[0] else {
        panic!("expected a create_order call");
    };
    let names: Vec<&str> = order.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["T-Shirt", "Dress", "Blanket"]);
}
