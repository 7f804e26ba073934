use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::{Insertable, Queryable, Selectable};
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{DiscountType, OrderStatus};
use crate::schema::{customer, feedback, inventory, order_items, orders, promotions};

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = customer, check_for_backend(Pg))]
pub struct Customer{
    pub customer_id: Uuid,
    pub fullname: String,
    pub email: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub password_hash: String
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = customer, check_for_backend(Pg))]
pub struct CustomerProfile{
    pub fullname: String,
    pub email: String,
    pub contact: Option<String>,
    pub address: Option<String>
}

// Written with a single UPDATE so contact details and password change together
#[derive(Debug, Clone)]
pub struct CustomerUpdate{
    pub fullname: String,
    pub email: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    // None leaves the stored hash untouched
    pub password_hash: Option<String>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = inventory, check_for_backend(Pg))]
pub struct InventoryItem{
    pub item_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub stock_level: i32,
    pub status: String,
    pub category: Option<String>,
    pub description: Option<String>
}

pub const ACTIVE_PRODUCT_STATUS: &str = "active";

impl InventoryItem {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_PRODUCT_STATUS
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = promotions, check_for_backend(Pg))]
pub struct Promotion{
    pub promotion_id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: BigDecimal,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = orders, check_for_backend(Pg))]
pub struct Order{
    pub order_id: Uuid,
    pub order_number: String,
    pub guest_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub order_type: String,
    pub payment_method: String,
    pub payment_status: String,
    pub delivery_address: Option<String>,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total_amount: BigDecimal,
    pub promo_code: Option<String>
}

// Line items are never updated once written
#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = order_items, check_for_backend(Pg))]
pub struct OrderItemModel{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal
}

// Line item joined with the product name, as shown on details and receipts
#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct OrderLine{
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = feedback, check_for_backend(Pg))]
pub struct Feedback{
    pub feedback_id: Uuid,
    pub order_id: Uuid,
    pub guest_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub feedback_date: DateTime<Utc>
}
