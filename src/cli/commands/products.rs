use clap::Subcommand;

use crate::catalog::{CatalogParams, ProductDetail};
use crate::cli::utils::{open_store, output_empty_collection, output_json};
use crate::cli::OutputFormat;
use crate::services::CatalogService;

#[derive(Subcommand)]
pub enum ProductCommands {
    #[command(about = "List products, filtered and paginated like GET /catalog")]
    List {
        #[arg(long, help = "List every product with variants, ignoring filters")]
        all: bool,

        #[arg(long, help = "Number of matching products to skip")]
        offset: Option<String>,

        #[arg(long, help = "Page size (1-100, default 10)")]
        limit: Option<String>,

        #[arg(long, help = "Category code")]
        category: Option<String>,

        #[arg(long = "price-lt", help = "Only products strictly cheaper than this")]
        price_lt: Option<String>,
    },

    #[command(about = "Show product detail with inherited variant prices")]
    Show {
        #[arg(help = "Product code")]
        code: String,
    },
}

pub async fn handle(cmd: ProductCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = CatalogService::new(open_store().await?);

    match cmd {
        ProductCommands::List { all: true, .. } => {
            let products = service.all_products().await?;
            if products.is_empty() {
                return output_empty_collection(output_format, "products", "No products found");
            }
            match output_format {
                OutputFormat::Json => output_json(&products),
                OutputFormat::Text => {
                    for product in &products {
                        print_detail(product);
                        println!();
                    }
                    Ok(())
                }
            }
        }
        ProductCommands::List {
            offset,
            limit,
            category,
            price_lt,
            ..
        } => {
            let query = CatalogParams {
                offset,
                limit,
                category,
                price_lt,
            }
            .normalize();
            let response = service.list_products(&query).await?;

            match output_format {
                OutputFormat::Json => output_json(&response),
                OutputFormat::Text => {
                    println!("{:<12} {:>10} {:<15} {}", "CODE", "PRICE", "CATEGORY", "NAME");
                    println!("{}", "-".repeat(55));
                    for product in &response.products {
                        println!(
                            "{:<12} {:>10} {:<15} {}",
                            product.code, product.price, product.category.code, product.category.name
                        );
                    }
                    println!(
                        "\n{} of {} (offset {}, limit {})",
                        response.products.len(),
                        response.total,
                        query.pagination.offset,
                        query.pagination.limit
                    );
                    Ok(())
                }
            }
        }
        ProductCommands::Show { code } => {
            let detail = service.product_detail(&code).await?;
            match output_format {
                OutputFormat::Json => output_json(&detail),
                OutputFormat::Text => {
                    print_detail(&detail);
                    Ok(())
                }
            }
        }
    }
}

fn print_detail(detail: &ProductDetail) {
    println!("{}  {}  [{} / {}]", detail.code, detail.price, detail.category.code, detail.category.name);
    for variant in &detail.variants {
        println!("  {:<12} {:<20} {:>10}", variant.sku, variant.name, variant.price);
    }
}
