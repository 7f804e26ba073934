//! Repository ports used by the services.
//!
//! The Postgres implementation lives in `db_interaction`; services only see
//! these traits, so every rule can run against any store. All queries that
//! take customer input bind it as parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    domain::OrderFilters,
    error::StoreError,
    models::{Customer, CustomerUpdate, Feedback, InventoryItem, Order, OrderItemModel, OrderLine, Promotion},
};

pub trait InventoryRepository {
    // Products with the given ids, whatever their status
    fn products_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<InventoryItem>, StoreError>;

    // Active products ordered by name, plus the total number matching
    fn active_products(
        &mut self,
        category: Option<&str>,
        limit: i64,
        offset: i64
    ) -> Result<(Vec<InventoryItem>, i64), StoreError>;
}

pub trait PromotionRepository {
    // Exact code match that is active and whose window contains `now`
    fn find_redeemable_promotion(
        &mut self,
        code: &str,
        now: DateTime<Utc>
    ) -> Result<Option<Promotion>, StoreError>;
}

pub trait OrderRepository {
    // Header and all items are written together or not at all
    fn insert_order(&mut self, order: &Order, items: &[OrderItemModel]) -> Result<(), StoreError>;

    // Conditioned single write: only a pending order owned by the customer is
    // touched. Returns whether a row changed.
    fn cancel_pending_order(&mut self, order_id: Uuid, customer_id: Uuid) -> Result<bool, StoreError>;

    // Ownership-scoped lookup
    fn find_customer_order(&mut self, order_id: Uuid, customer_id: Uuid) -> Result<Option<Order>, StoreError>;

    fn order_lines(&mut self, order_id: Uuid) -> Result<Vec<OrderLine>, StoreError>;

    fn list_customer_orders(
        &mut self,
        customer_id: Uuid,
        filters: &OrderFilters
    ) -> Result<(Vec<Order>, i64), StoreError>;
}

pub trait FeedbackRepository {
    fn feedback_for_order(&mut self, order_id: Uuid) -> Result<Option<Feedback>, StoreError>;

    // Inserts, or overwrites rating/comment/date of the order's existing row.
    // Returns the row as stored, which keeps the existing id on overwrite.
    fn upsert_feedback(&mut self, feedback: &Feedback) -> Result<Feedback, StoreError>;
}

pub trait CustomerRepository {
    fn find_customer(&mut self, customer_id: Uuid) -> Result<Option<Customer>, StoreError>;

    fn find_customer_by_email(&mut self, email: &str) -> Result<Option<Customer>, StoreError>;

    fn update_customer(&mut self, customer_id: Uuid, update: &CustomerUpdate) -> Result<(), StoreError>;
}
