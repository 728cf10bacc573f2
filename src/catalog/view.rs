//! Response shapes for the catalog endpoints.
//!
//! Prices are exact decimals internally and rendered as JSON numbers.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::database::models::{Category, Product, ProductPage, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: CategoryView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListResponse {
    pub total: i64,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantView {
    pub name: String,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: CategoryView,
    pub variants: Vec<VariantView>,
}

/// The variant's own price, or the parent's when absent or zero
pub fn effective_variant_price(variant: &Variant, parent_price: Decimal) -> Decimal {
    match variant.price {
        Some(price) if !price.is_zero() => price,
        _ => parent_price,
    }
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        CategoryView {
            code: category.code.clone(),
            name: category.name.clone(),
        }
    }
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        ProductSummary {
            code: product.code.clone(),
            price: product.price,
            category: CategoryView::from(&product.category),
        }
    }
}

impl From<&ProductPage> for ProductListResponse {
    fn from(page: &ProductPage) -> Self {
        ProductListResponse {
            total: page.total,
            products: page.products.iter().map(ProductSummary::from).collect(),
        }
    }
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        let variants = product
            .variants
            .iter()
            .map(|variant| VariantView {
                name: variant.name.clone(),
                sku: variant.sku.clone(),
                price: effective_variant_price(variant, product.price),
            })
            .collect();

        ProductDetail {
            code: product.code.clone(),
            price: product.price,
            category: CategoryView::from(&product.category),
            variants,
        }
    }
}
