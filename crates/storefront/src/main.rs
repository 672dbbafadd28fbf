//! Vitrine - terminal storefront.
//!
//! Bootstraps the storefront components and drives them from a small
//! interactive loop: trending products on startup, category-filtered grid,
//! product details, and the cart.
//!
//! The components themselves never print; they hand view data back (or
//! publish it through subscriptions) and this binary renders it as text.

#![cfg_attr(not(test), forbid(unsafe_code))]
// The terminal is this binary's rendering surface.
#![allow(clippy::print_stdout)]

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::ProductId;
use vitrine_storefront::browser::Selection;
use vitrine_storefront::catalog::Product;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::state::AppState;
use vitrine_storefront::views::{
    CartView, ProductCardView, format_price, product_detail,
};

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine=info,vitrine_storefront=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");

    spawn_cart_badge(&state);

    render_trending(&state).await;
    render_categories(&state).await;
    match state.browser().refresh().await {
        Ok(Some(products)) => render_grid(&products),
        Ok(None) => {}
        Err(e) => println!("could not load products: {e}"),
    }

    println!();
    println!("commands: all | cat <name> | show <id> | add <id> | rm <id> | cart | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "" => {}
            "all" => select(&state, Selection::All).await,
            "cat" => select(&state, Selection::parse(arg)).await,
            "show" => show_detail(&state, arg).await,
            "add" => add_to_cart(&state, arg).await,
            "rm" => remove_from_cart(&state, arg).await,
            "cart" => render_cart(&state),
            "quit" | "exit" => break,
            _ => println!("unknown command: {command}"),
        }
    }
}

/// Re-render the cart badge whenever the cart store publishes a change.
fn spawn_cart_badge(state: &AppState) {
    let mut updates = state.cart().subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let summary = *updates.borrow_and_update();
            println!(
                "[cart] {} item(s) - {}",
                summary.item_count,
                format_price(summary.total)
            );
        }
    });
}

async fn select(state: &AppState, selection: Selection) {
    match state.browser().select_category(selection).await {
        Ok(Some(products)) => render_grid(&products),
        // A newer selection superseded this one; its result already rendered.
        Ok(None) => {}
        Err(e) => println!("could not load products: {e}"),
    }
}

async fn render_trending(state: &AppState) {
    match state.browser().trending().await {
        Ok(products) => {
            println!("== Trending ==");
            render_grid(&products);
        }
        Err(e) => println!("could not load trending products: {e}"),
    }
}

async fn render_categories(state: &AppState) {
    match state.browser().categories().await {
        Ok(categories) => {
            let mut controls = vec!["all".to_string()];
            controls.extend(categories);
            println!("categories: {}", controls.join(" | "));
        }
        Err(e) => println!("could not load categories: {e}"),
    }
}

fn render_grid(products: &[Product]) {
    if products.is_empty() {
        println!("(no products)");
        return;
    }
    for card in products.iter().map(ProductCardView::from) {
        println!(
            "#{:<4} {:<45} {:>8}  {} ({})  [{}]",
            card.id, card.title, card.price, card.stars, card.rating_count, card.category
        );
    }
}

async fn show_detail(state: &AppState, arg: &str) {
    let Ok(id) = arg.parse::<ProductId>() else {
        println!("usage: show <id>");
        return;
    };
    match product_detail(state.catalog(), state.cache(), id).await {
        Ok(detail) => {
            println!("== {} ==", detail.title);
            println!("{} | {} | {} ({})", detail.category, detail.price, detail.stars, detail.rating_count);
            println!("{}", detail.description);
        }
        Err(e) => println!("could not load product {id}: {e}"),
    }
}

async fn add_to_cart(state: &AppState, arg: &str) {
    let Ok(id) = arg.parse::<ProductId>() else {
        println!("usage: add <id>");
        return;
    };
    // Resolution failures are surfaced, not silently dropped.
    if let Err(e) = state.cart().add(id).await {
        println!("could not add product {id}: {e}");
    }
}

async fn remove_from_cart(state: &AppState, arg: &str) {
    let Ok(id) = arg.parse::<ProductId>() else {
        println!("usage: rm <id>");
        return;
    };
    if let Err(e) = state.cart().remove(id).await {
        println!("could not update cart: {e}");
    }
}

fn render_cart(state: &AppState) {
    let lines = state.cart().lines();
    let view = CartView::from(lines.as_slice());
    if view.items.is_empty() {
        println!("cart is empty");
        return;
    }
    for item in &view.items {
        println!(
            "#{:<4} {:<45} x{:<3} {:>8}",
            item.id, item.title, item.quantity, item.line_price
        );
    }
    println!("total: {} ({} item(s))", view.subtotal, view.item_count);
}
