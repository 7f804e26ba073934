use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::{error::StoreError, models::{InventoryItem, ACTIVE_PRODUCT_STATUS}, schema::inventory, store::InventoryRepository};

use super::PgStore;

fn active_products_query(category: Option<&str>) -> inventory::BoxedQuery<'static, Pg> {
    let mut query = inventory::table
        .filter(inventory::status.eq(ACTIVE_PRODUCT_STATUS))
        .into_boxed();

    if let Some(category) = category {
        query = query.filter(inventory::category.eq(category.to_string()));
    }

    query
}

impl InventoryRepository for PgStore<'_> {
    #[tracing::instrument(
        "Getting inventory items by id",
        skip(self)
    )]
    fn products_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(inventory::table
            .filter(inventory::item_id.eq_any(ids.to_vec()))
            .select(InventoryItem::as_select())
            .load::<InventoryItem>(self.conn())?)
    }

    #[tracing::instrument(
        "Getting active inventory items",
        skip(self)
    )]
    fn active_products(
        &mut self,
        category: Option<&str>,
        limit: i64,
        offset: i64
    ) -> Result<(Vec<InventoryItem>, i64), StoreError> {
        let total = active_products_query(category)
            .count()
            .get_result::<i64>(self.conn())?;

        let items = active_products_query(category)
            .select(InventoryItem::as_select())
            .order((inventory::name.asc(), inventory::item_id.asc()))
            .limit(limit)
            .offset(offset)
            .load::<InventoryItem>(self.conn())?;

        Ok((items, total))
    }
}
