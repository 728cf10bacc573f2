use clap::Subcommand;

use crate::cli::utils::{open_store, output_empty_collection, output_json, output_success};
use crate::cli::OutputFormat;
use crate::services::{CategoryService, CreateCategoryRequest};

#[derive(Subcommand)]
pub enum CategoryCommands {
    #[command(about = "List all categories")]
    List,

    #[command(about = "Create a category")]
    Create {
        #[arg(help = "Unique category code")]
        code: String,

        #[arg(help = "Display name")]
        name: String,
    },
}

pub async fn handle(cmd: CategoryCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = CategoryService::new(open_store().await?);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list().await?;
            if categories.is_empty() {
                return output_empty_collection(output_format, "categories", "No categories found");
            }
            match output_format {
                OutputFormat::Json => output_json(&categories),
                OutputFormat::Text => {
                    println!("{:<20} {}", "CODE", "NAME");
                    println!("{}", "-".repeat(40));
                    for category in &categories {
                        println!("{:<20} {}", category.code, category.name);
                    }
                    Ok(())
                }
            }
        }
        CategoryCommands::Create { code, name } => {
            let category = CreateCategoryRequest {
                code: Some(code),
                name: Some(name),
            }
            .validate()?;
            let created = service.create(category).await?;
            output_success(output_format, &format!("Category '{}' created", created.code))
        }
    }
}
