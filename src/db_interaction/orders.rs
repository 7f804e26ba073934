use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{OrderFilters, OrderStatus, SortBy, SortOrder},
    error::StoreError,
    models::{Order, OrderItemModel, OrderLine},
    schema::{inventory, order_items, orders},
    store::OrderRepository,
};

use super::PgStore;

// Rows written by the fulfilment side may still say "approved"
const COMPLETED_ALIASES: [&str; 2] = ["completed", "approved"];

fn customer_orders_query(customer_id: Uuid, filters: &OrderFilters) -> orders::BoxedQuery<'static, Pg> {
    let mut query = orders::table
        .filter(orders::guest_id.eq(customer_id))
        .into_boxed();

    match filters.status {
        Some(OrderStatus::Completed) => {
            query = query.filter(orders::status.eq_any(COMPLETED_ALIASES.to_vec()));
        },
        Some(status) => {
            query = query.filter(orders::status.eq(status));
        },
        None => {}
    }

    if let Some(date_from) = filters.date_from {
        query = query.filter(orders::order_date.ge(date_from));
    }

    if let Some(date_to) = filters.date_to {
        query = query.filter(orders::order_date.lt(date_to));
    }

    query
}

impl OrderRepository for PgStore<'_> {
    #[tracing::instrument(
        "Inserting order with its items",
        skip_all,
        fields(order_number = %order.order_number, items = items.len())
    )]
    fn insert_order(&mut self, order: &Order, items: &[OrderItemModel]) -> Result<(), StoreError> {
        self.conn().transaction::<(), StoreError, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(order)
                .execute(conn)?;

            diesel::insert_into(order_items::table)
                .values(items)
                .execute(conn)?;

            Ok(())
        })
    }

    #[tracing::instrument(
        "Cancelling pending order",
        skip(self)
    )]
    fn cancel_pending_order(&mut self, order_id: Uuid, customer_id: Uuid) -> Result<bool, StoreError> {
        let affected_rows = diesel::update(orders::table)
            .filter(orders::order_id.eq(order_id))
            .filter(orders::guest_id.eq(customer_id))
            .filter(orders::status.eq(OrderStatus::Pending))
            .set(orders::status.eq(OrderStatus::Cancelled))
            .execute(self.conn())?;

        Ok(affected_rows == 1)
    }

    #[tracing::instrument(
        "Getting order owned by customer",
        skip(self)
    )]
    fn find_customer_order(&mut self, order_id: Uuid, customer_id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(orders::table
            .filter(orders::order_id.eq(order_id))
            .filter(orders::guest_id.eq(customer_id))
            .select(Order::as_select())
            .first::<Order>(self.conn())
            .optional()?)
    }

    #[tracing::instrument(
        "Getting order lines",
        skip(self)
    )]
    fn order_lines(&mut self, order_id: Uuid) -> Result<Vec<OrderLine>, StoreError> {
        Ok(order_items::table
            .inner_join(inventory::table)
            .filter(order_items::order_id.eq(order_id))
            .select((
                order_items::product_id,
                inventory::name,
                order_items::quantity,
                order_items::unit_price
            ))
            .order((inventory::name.asc(), order_items::order_item_id.asc()))
            .load::<OrderLine>(self.conn())?)
    }

    #[tracing::instrument(
        "Listing customer orders",
        skip(self)
    )]
    fn list_customer_orders(
        &mut self,
        customer_id: Uuid,
        filters: &OrderFilters
    ) -> Result<(Vec<Order>, i64), StoreError> {
        let total = customer_orders_query(customer_id, filters)
            .count()
            .get_result::<i64>(self.conn())?;

        let query = customer_orders_query(customer_id, filters);
        let query = match (filters.sort_by, filters.sort_order) {
            (SortBy::OrderDate, SortOrder::Asc) => query.order(orders::order_date.asc()),
            (SortBy::OrderDate, SortOrder::Desc) => query.order(orders::order_date.desc()),
            (SortBy::TotalAmount, SortOrder::Asc) => query.order(orders::total_amount.asc()),
            (SortBy::TotalAmount, SortOrder::Desc) => query.order(orders::total_amount.desc()),
            (SortBy::Status, SortOrder::Asc) => query.order(orders::status.asc()),
            (SortBy::Status, SortOrder::Desc) => query.order(orders::status.desc())
        };

        let rows = query
            .then_order_by(orders::order_number.desc())
            .select(Order::as_select())
            .limit(filters.page.limit)
            .offset(filters.page.offset())
            .load::<Order>(self.conn())?;

        Ok((rows, total))
    }
}
