//! One handler per subcommand.

use anyhow::{Context, bail};
use ezwash_core::ApiService;
use ezwash_core::types::{Credentials, ItemColor, OrderRecord, Profile, Registration};
use ezwash_order::{CATALOG, OrderComposer, SelectionUpdate, Submission, catalog_item, format_money};
use ezwash_session::{SessionManager, SessionState};

use crate::config::{LoginArgs, OrderArgs, RegisterArgs, StatusArgs};

pub async fn login(session: &SessionManager, args: LoginArgs) -> anyhow::Result<()> {
    let credentials = Credentials::new(args.username, args.password);
    let route = session.login(&credentials).await?;

    if let Some(profile) = session.state().profile() {
        println!("Logged in as {} ({})", profile.username, profile.role);
    }
    println!("Landing route: {route}");
    Ok(())
}

pub async fn register(session: &SessionManager, args: RegisterArgs) -> anyhow::Result<()> {
    let mut registration = Registration::new(args.username, args.email, args.password);
    if let Some(phone_number) = args.phone_number {
        registration = registration.with_phone_number(phone_number);
    }
    if let Some(referral_code) = args.referral_code {
        registration = registration.with_referral_code(referral_code);
    }

    let route = session.register(&registration).await?;

    println!("Account created and logged in.");
    println!("Landing route: {route}");
    Ok(())
}

pub fn logout(session: &SessionManager) -> anyhow::Result<()> {
    let route = session.logout();
    println!("Logged out. Landing route: {route}");
    Ok(())
}

pub async fn profile(session: &SessionManager) -> anyhow::Result<()> {
    let profile = require_session(session).await?;

    println!("Username: {}", profile.username);
    println!("Email:    {}", profile.email);
    println!("Role:     {}", profile.role);
    if let Some(phone_number) = &profile.phone_number {
        println!("Phone:    {phone_number}");
    }
    if let Some(custom_id) = &profile.custom_id {
        println!("Id:       {custom_id}");
    }
    if let Some(location) = profile.location.as_ref().and_then(|l| l.address.as_deref()) {
        println!("Address:  {location}");
    }
    Ok(())
}

pub fn catalog() -> anyhow::Result<()> {
    println!("{:<4} {:<20} {}", "ID", "ITEM", "PRICE");
    for item in &CATALOG {
        println!(
            "{:<4} {:<20} {}",
            item.id,
            item.name,
            format_money(&item.unit_price())
        );
    }
    Ok(())
}

pub async fn order(
    api: &ApiService,
    session: &SessionManager,
    args: OrderArgs,
) -> anyhow::Result<()> {
    require_session(session).await?;

    let mut composer = OrderComposer::new(api.clone());
    for spec in &args.items {
        let (id, quantity, color) = parse_item_spec(spec)?;
        if !composer.toggle(id) {
            bail!("unknown catalog item id {id}; run `ezwash-cli catalog`");
        }

        let mut update = SelectionUpdate::new().quantity(quantity);
        if let Some(color) = color {
            update = update.color(color);
        }
        if let Some(note) = &args.note {
            update = update.note(note.clone());
        }
        composer.update(id, update);
    }

    println!(
        "Placing order: {} piece(s), {}",
        composer.count(),
        format_money(&composer.total())
    );

    match composer.submit(&session.state()).await? {
        Submission::Placed { order_id, next } => {
            println!("Order {order_id} placed. Next: {next}");
        }
        Submission::RedirectToLogin => {
            bail!("not logged in; run `ezwash-cli login` first");
        }
    }
    Ok(())
}

pub async fn history(api: &ApiService, session: &SessionManager) -> anyhow::Result<()> {
    require_session(session).await?;

    let orders = api.list_orders().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for record in &orders {
        print_order(record);
    }
    Ok(())
}

pub async fn status(
    api: &ApiService,
    session: &SessionManager,
    args: StatusArgs,
) -> anyhow::Result<()> {
    require_session(session).await?;

    let record = api.fetch_order(&args.order_id).await?;
    print_order(&record);
    for item in &record.items {
        println!(
            "  {} x{} ({}) {}",
            item.name,
            item.quantity,
            item.color,
            format_money(&item.price_per_unit)
        );
    }
    Ok(())
}

/// Resolves the stored tokens into an authenticated profile, or fails
/// with a hint to log in.
async fn require_session(session: &SessionManager) -> anyhow::Result<Profile> {
    match session.initialize().await {
        SessionState::Authenticated(profile) => Ok(profile),
        _ => bail!("not logged in; run `ezwash-cli login` first"),
    }
}

fn print_order(record: &OrderRecord) {
    let placed = record
        .created_at
        .map(|at| at.to_string())
        .unwrap_or_else(|| "-".to_owned());

    println!(
        "{:<12} {:<10} {:<8} {}",
        record.order_id,
        record.status,
        format_money(&record.total_price),
        placed
    );
}

/// Parses an item argument of the form `ID`, `IDxQTY`, or `IDxQTY@COLOR`.
fn parse_item_spec(spec: &str) -> anyhow::Result<(u32, u32, Option<ItemColor>)> {
    let (head, color) = match spec.split_once('@') {
        Some((head, color)) => {
            let color = color
                .parse::<ItemColor>()
                .ok()
                .with_context(|| format!("unknown color `{color}` in `{spec}`"))?;
            (head, Some(color))
        }
        None => (spec, None),
    };

    let (id, quantity) = match head.split_once('x') {
        Some((id, quantity)) => (
            id.parse::<u32>()
                .with_context(|| format!("invalid item id in `{spec}`"))?,
            quantity
                .parse::<u32>()
                .with_context(|| format!("invalid quantity in `{spec}`"))?,
        ),
        None => (
            head.parse::<u32>()
                .with_context(|| format!("invalid item id in `{spec}`"))?,
            1,
        ),
    };

    if quantity == 0 {
        bail!("quantity must be at least 1 in `{spec}`");
    }
    if catalog_item(id).is_none() {
        bail!("unknown catalog item id {id}; run `ezwash-cli catalog`");
    }

    Ok((id, quantity, color))
}
