use std::fmt;
use std::sync::Arc;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::CategoryView;
use crate::database::models::NewCategory;
use crate::database::store::{CatalogStore, StoreError};

/// Client-side problems with a category creation body
#[derive(Debug, Error)]
pub enum CategoryInputError {
    #[error("Invalid JSON body")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing code or name")]
    MissingField,
}

/// Body of `POST /categories`. Both fields are required; empty strings count
/// as missing.
///
/// Keys match case-insensitively and the last occurrence wins. A `null`
/// value leaves an earlier one in place; unknown keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct CreateCategoryRequest {
    pub code: Option<String>,
    pub name: Option<String>,
}

impl<'de> Deserialize<'de> for CreateCategoryRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CreateCategoryVisitor)
    }
}

struct CreateCategoryVisitor;

impl<'de> Visitor<'de> for CreateCategoryVisitor {
    type Value = CreateCategoryRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with code and name")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = CreateCategoryRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = if key.eq_ignore_ascii_case("code") {
                &mut request.code
            } else if key.eq_ignore_ascii_case("name") {
                &mut request.name
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = Some(value);
            }
        }
        Ok(request)
    }
}

impl CreateCategoryRequest {
    /// Decode a request body; a JSON `null` body is treated as an empty object
    pub fn from_json(body: &[u8]) -> Result<Self, CategoryInputError> {
        let request: Option<Self> = serde_json::from_slice(body)?;
        Ok(request.unwrap_or_default())
    }

    pub fn validate(self) -> Result<NewCategory, CategoryInputError> {
        match (self.code, self.name) {
            (Some(code), Some(name)) if !code.is_empty() && !name.is_empty() => {
                Ok(NewCategory { code, name })
            }
            _ => Err(CategoryInputError::MissingField),
        }
    }
}

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<CategoryView>, StoreError> {
        let categories = self.store.all_categories().await?;
        Ok(categories.iter().map(CategoryView::from).collect())
    }

    pub async fn create(&self, category: NewCategory) -> Result<CategoryView, StoreError> {
        let created = self.store.create_category(category).await?;
        info!("Created category {} ({})", created.code, created.name);
        Ok(CategoryView::from(&created))
    }
}
