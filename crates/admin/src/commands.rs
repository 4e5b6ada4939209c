use crate::catalog::{Notice, ProductCatalog};
use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use shared::{
    domain::requests::{CreateOrderRequest, CreateProductRequest, UpdateProductRequest},
    model::{InventoryOp, OrderItem, OrderStatus},
};
use std::str::FromStr;
use storefront_client::state::AppState;
use tracing::info;
use validator::Validate;

#[derive(Debug, Parser)]
#[command(
    name = "storefront-admin",
    about = "Administer storefront products, orders and inventory"
)]
pub struct Cli {
    /// Overrides STOREFRONT_API_URL (e.g. "http://localhost:8080").
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print the client metrics in OpenMetrics text format after the command.
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Product catalog.
    #[command(subcommand)]
    Products(ProductCommand),

    #[command(subcommand)]
    Orders(OrderCommand),

    #[command(subcommand)]
    Inventory(InventoryCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// One page of the catalog as a table.
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    Get {
        id: String,
    },
    Create(ProductForm),
    /// Partial update; only the given flags are sent.
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProductForm {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long)]
    pub price: f64,

    #[arg(long)]
    pub category: String,
}

impl From<ProductForm> for CreateProductRequest {
    fn from(form: ProductForm) -> Self {
        CreateProductRequest {
            name: form.name,
            description: form.description,
            price: form.price,
            category: form.category,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    Create {
        #[arg(long)]
        customer: String,

        /// productId:productName:quantity:price, repeatable.
        #[arg(long = "item", required = true)]
        items: Vec<ItemArg>,
    },
    Get {
        id: String,
    },
    /// pending, confirmed, shipped, delivered or cancelled.
    Status {
        id: String,
        status: OrderStatus,
    },
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    Get {
        product_id: String,
    },
    /// Applies a signed delta; a reserve of -3 moves 3 units to reserved.
    Update {
        product_id: String,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,

        /// reserve, release or restock.
        #[arg(long = "op")]
        operation: InventoryOp,
    },
}

/// An order line given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemArg(pub OrderItem);

impl FromStr for ItemArg {
    type Err = String;

    // the name sits between the id and the two numeric fields and may contain ':'
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expected = || format!("expected productId:productName:quantity:price, got '{s}'");

        let (product_id, rest) = s.split_once(':').ok_or_else(expected)?;
        let (rest, price) = rest.rsplit_once(':').ok_or_else(expected)?;
        let (product_name, quantity) = rest.rsplit_once(':').ok_or_else(expected)?;

        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
        let price = price
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid price '{price}': {e}"))?;

        Ok(ItemArg(OrderItem {
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            quantity,
            price,
        }))
    }
}

fn pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to render response")
}

fn notices_to_result(ok: bool, notices: Vec<Notice>) -> Result<String> {
    let text = notices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    if ok { Ok(text) } else { Err(anyhow!(text)) }
}

/// Runs one command and returns what should be printed.
pub async fn run(command: Command, state: &AppState) -> Result<String> {
    let di = &state.di_container;

    match command {
        Command::Products(action) => match action {
            ProductCommand::List {
                category,
                page,
                page_size,
            } => {
                let mut catalog =
                    ProductCatalog::with_page_size(di.product_clients.clone(), page_size);
                let ok = catalog.open(category.as_deref(), page).await;
                notices_to_result(ok, catalog.take_notices())?;
                Ok(catalog.render_table())
            }
            ProductCommand::Get { id } => pretty(&di.product_clients.get(&id).await?),
            ProductCommand::Create(form) => {
                let mut catalog = ProductCatalog::new(di.product_clients.clone());
                let ok = catalog.create(&form.into()).await;
                let message = notices_to_result(ok, catalog.take_notices())?;
                Ok(format!("{message}\n{}", catalog.render_table()))
            }
            ProductCommand::Update {
                id,
                name,
                description,
                price,
                category,
            } => {
                let req = UpdateProductRequest {
                    name,
                    description,
                    price,
                    category,
                };
                if req.is_empty() {
                    bail!("Nothing to update: pass --name, --description, --price or --category");
                }
                req.validate().context("Invalid update")?;
                pretty(&di.product_clients.update(&id, &req).await?)
            }
            ProductCommand::Delete { id } => pretty(&di.product_clients.delete(&id).await?),
        },
        Command::Orders(action) => match action {
            OrderCommand::Create { customer, items } => {
                let req = CreateOrderRequest {
                    customer_id: customer,
                    items: items.into_iter().map(|ItemArg(item)| item).collect(),
                };
                req.validate().context("Invalid order")?;
                let response = di.order_clients.create(&req).await?;
                info!("Order {} placed", response.order_id);
                pretty(&response)
            }
            OrderCommand::Get { id } => pretty(&di.order_clients.get(&id).await?),
            OrderCommand::Status { id, status } => {
                pretty(&di.order_clients.update_status(&id, status).await?)
            }
        },
        Command::Inventory(action) => match action {
            InventoryCommand::Get { product_id } => {
                pretty(&di.inventory_clients.get(&product_id).await?)
            }
            InventoryCommand::Update {
                product_id,
                quantity,
                operation,
            } => {
                let response = di
                    .inventory_clients
                    .update(&product_id, quantity, operation)
                    .await?;
                pretty(&response)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_arg_splits_on_the_outer_colons() {
        let ItemArg(item) = "p1:Widget: deluxe:2:9.5".parse().unwrap();
        assert_eq!(item.product_id, "p1");
        assert_eq!(item.product_name, "Widget: deluxe");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 9.5);
    }

    #[test]
    fn item_arg_rejects_malformed_lines() {
        assert!("p1:Widget:2".parse::<ItemArg>().is_err());
        assert!("p1:Widget:two:9.5".parse::<ItemArg>().is_err());
        assert!("p1:Widget:-1:9.5".parse::<ItemArg>().is_err());
        assert!("p1".parse::<ItemArg>().is_err());
    }

    #[test]
    fn cli_parses_nested_commands_and_global_flags() {
        let cli = Cli::try_parse_from([
            "storefront-admin",
            "inventory",
            "update",
            "p1",
            "--quantity",
            "-3",
            "--op",
            "reserve",
            "--metrics",
        ])
        .unwrap();

        assert!(cli.metrics);
        match cli.command {
            Command::Inventory(InventoryCommand::Update {
                product_id,
                quantity,
                operation,
            }) => {
                assert_eq!(product_id, "p1");
                assert_eq!(quantity, -3);
                assert_eq!(operation, InventoryOp::Reserve);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn order_status_is_parsed_from_text() {
        let cli = Cli::try_parse_from([
            "storefront-admin",
            "--base-url",
            "http://127.0.0.1:9000",
            "orders",
            "status",
            "o1",
            "shipped",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(matches!(
            cli.command,
            Command::Orders(OrderCommand::Status {
                status: OrderStatus::Shipped,
                ..
            })
        ));

        assert!(
            Cli::try_parse_from(["storefront-admin", "orders", "status", "o1", "lost"]).is_err()
        );
    }

    #[test]
    fn list_defaults_to_first_page_of_ten() {
        let cli = Cli::try_parse_from(["storefront-admin", "products", "list"]).unwrap();
        match cli.command {
            Command::Products(ProductCommand::List {
                category,
                page,
                page_size,
            }) => {
                assert_eq!(category, None);
                assert_eq!((page, page_size), (1, 10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
