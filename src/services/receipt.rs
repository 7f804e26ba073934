use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{money::line_total, OrderStatus},
    error::ShopError,
    store::{CustomerRepository, OrderRepository},
};

#[derive(Serialize, Debug, PartialEq)]
pub struct ReceiptLine{
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal
}

#[derive(Serialize, Debug)]
pub struct Receipt{
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub order_type: String,
    pub delivery_address: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub items: Vec<ReceiptLine>,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub promo_code: Option<String>
}

// Same ownership scoping as order details: None for foreign orders too.
#[tracing::instrument(
    "Building receipt",
    skip(store)
)]
pub fn get_receipt<S>(
    store: &mut S,
    order_id: Uuid,
    customer_id: Uuid
) -> Result<Option<Receipt>, ShopError>
where
    S: OrderRepository + CustomerRepository,
{
    let order = match store.find_customer_order(order_id, customer_id)? {
        Some(order) => order,
        None => return Ok(None)
    };

    let customer = store
        .find_customer(customer_id)?
        .ok_or(ShopError::Authorization)?;

    let items = store
        .order_lines(order.order_id)?
        .into_iter()
        .map(|line| ReceiptLine {
            line_total: line_total(&line.unit_price, line.quantity),
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price
        })
        .collect();

    Ok(Some(Receipt {
        order_number: order.order_number,
        order_date: order.order_date,
        status: order.status,
        customer_name: customer.fullname,
        customer_contact: customer.contact,
        order_type: order.order_type,
        delivery_address: order.delivery_address,
        payment_method: order.payment_method,
        payment_status: order.payment_status,
        items,
        subtotal: order.subtotal,
        discount: order.discount,
        total: order.total_amount,
        promo_code: order.promo_code
    }))
}
