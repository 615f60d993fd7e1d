//! Process bootstrap and a line-oriented demo transport.
//!
//! The real chat frontend is an external collaborator; this binary wires
//! the adapters together and drives the dispatcher from stdin so the
//! engine can be exercised end to end against a running CMS and redis.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fishmonger::adapters::session::RedisSessionStore;
use fishmonger::adapters::strapi::{StrapiCartStore, StrapiCatalogClient, StrapiClient};
use fishmonger::application::{Dispatcher, Reply};
use fishmonger::config::AppConfig;
use fishmonger::domain::foundation::{LineId, ProductId, Quantity, UserId};
use fishmonger::domain::session::{RenderInstruction, UserAction};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let strapi = StrapiClient::new(&config.cms);
    let catalog = Arc::new(StrapiCatalogClient::new(strapi.clone()));
    let cart_store = Arc::new(StrapiCartStore::new(strapi));

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_tokio_connection().await?;
    let sessions = Arc::new(RedisSessionStore::new(redis_conn));

    let dispatcher = Dispatcher::new(catalog, sessions, cart_store);

    let user_id = UserId::new(
        std::env::args().nth(1).unwrap_or_else(|| "demo".to_string()),
    )?;
    info!(user_id = %user_id, "fishmonger demo transport ready");
    println!("commands: menu | product <id> | qty <id> <amount> | cart | remove <line> | checkout");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(action) = parse_command(line.trim()) else {
            println!("unparseable command");
            continue;
        };
        let reply = dispatcher.handle_action(&user_id, action).await?;
        print_reply(&reply);
    }

    Ok(())
}

/// Decodes a line of input into a tagged action, once, at the boundary.
fn parse_command(line: &str) -> Option<UserAction> {
    let mut parts = line.split_whitespace();
    let action = match parts.next()? {
        "menu" | "/start" => UserAction::ShowMenu,
        "product" => UserAction::SelectProduct {
            product_id: ProductId::new(parts.next()?).ok()?,
        },
        "qty" => UserAction::SetQuantity {
            product_id: ProductId::new(parts.next()?).ok()?,
            quantity: Quantity::new(parts.next()?.parse().ok()?).ok()?,
        },
        "cart" => UserAction::ViewCart,
        "remove" => UserAction::RemoveLine {
            line_id: LineId::new(parts.next()?).ok()?,
        },
        "checkout" => UserAction::Checkout,
        _ => UserAction::FreeText {
            input: line.to_string(),
        },
    };
    Some(action)
}

fn print_reply(reply: &Reply) {
    println!("[{:?}]", reply.state);
    match &reply.render {
        RenderInstruction::ShowProductList { products } => {
            for product in products {
                println!("  {} - {}", product.id, product.title);
            }
        }
        RenderInstruction::ShowProductDetail { product } => {
            println!("  {} ({} / unit)", product.title(), product.price());
            println!("  {}", product.description());
            println!("  [image: {} bytes]", product.image().len());
        }
        RenderInstruction::ShowCartSummary { summary } => {
            for line in &summary.lines {
                println!(
                    "  {} | {} x {} = {}",
                    line.id(),
                    line.title(),
                    line.quantity(),
                    line.total()
                );
            }
            println!("  total: {}", summary.total);
        }
        RenderInstruction::PromptForEmail => {
            println!("  please enter your email address");
        }
        RenderInstruction::ShowError { message, retry } => {
            println!("  error: {}", message);
            if retry.is_some() {
                println!("  (type the command again to retry)");
            }
        }
    }
}
