use serde::{Deserialize, Serialize};

use crate::{
    domain::Page,
    error::ShopError,
    models::InventoryItem,
    store::InventoryRepository,
};

#[derive(Deserialize, Debug, Default)]
pub struct ProductQuery{
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>
}

#[derive(Serialize, Debug)]
pub struct ProductPage{
    pub products: Vec<InventoryItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64
}

#[tracing::instrument(
    "Listing products",
    skip(store)
)]
pub fn list_products<S: InventoryRepository>(
    store: &mut S,
    query: &ProductQuery
) -> Result<ProductPage, ShopError> {
    let page = Page::new(query.page, query.limit);
    let category = query.category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let (products, total) = store.active_products(category, page.limit, page.offset())?;

    Ok(ProductPage { products, total, page: page.page, limit: page.limit })
}
