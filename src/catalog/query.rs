use std::str::FromStr;

use rust_decimal::Decimal;

use crate::database::models::ProductFilters;
use crate::database::store::Pagination;

pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;

/// Raw listing parameters as they arrive on the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub price_lt: Option<String>,
}

/// Normalized listing request. Never fails to build: malformed input
/// degrades to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub pagination: Pagination,
    pub filters: ProductFilters,
}

impl CatalogParams {
    /// Extract the listing keys from a raw query string. When a key repeats,
    /// the first occurrence wins; unknown keys are ignored.
    pub fn from_query_string(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "offset" => &mut params.offset,
                "limit" => &mut params.limit,
                "category" => &mut params.category,
                "price_lt" => &mut params.price_lt,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    pub fn normalize(&self) -> CatalogQuery {
        CatalogQuery {
            pagination: Pagination {
                offset: parse_offset(self.offset.as_deref()),
                limit: parse_limit(self.limit.as_deref()),
            },
            filters: ProductFilters {
                category_code: parse_category(self.category.as_deref()),
                price_less_than: parse_price(self.price_lt.as_deref()),
            },
        }
    }
}

impl CatalogQuery {
    pub fn from_query_string(raw: Option<&str>) -> Self {
        CatalogParams::from_query_string(raw.unwrap_or_default()).normalize()
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogParams::default().normalize()
    }
}

/// max(parse(raw) or 0, 0)
pub fn parse_offset(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|offset| *offset >= 0)
        .unwrap_or(DEFAULT_OFFSET)
}

/// clamp(parse(raw) or 10, 1, 100)
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(MIN_LIMIT, MAX_LIMIT)
}

pub fn parse_category(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Plain or scientific decimal notation; anything else means no filter.
///
/// Numbers outside the `Decimal` range still filter: a negative one (or
/// `-inf`) matches nothing, a positive one matches everything.
pub fn parse_price(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw.filter(|s| !s.is_empty())?;
    if let Ok(price) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return Some(price);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_nan() => None,
        Ok(value) if value.abs() >= 1.0 => (value < 0.0).then_some(Decimal::MIN),
        // Below Decimal's smallest scale; nearest representable bound
        Ok(value) if value > 0.0 => Some(Decimal::new(1, 28)),
        Ok(value) if value < 0.0 => Some(Decimal::new(-1, 28)),
        Ok(_) => Some(Decimal::ZERO),
        Err(_) => None,
    }
}
