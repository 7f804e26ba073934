use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{money::{max_amount, zero}, OrderFilters, OrderStatus, OrderType},
    error::ShopError,
    models::{Feedback, Order, OrderItemModel, OrderLine},
    services::pricing::{price_order, PricedItem},
    store::{CustomerRepository, FeedbackRepository, InventoryRepository, OrderRepository, PromotionRepository},
};

pub const INITIAL_PAYMENT_STATUS: &str = "pending";
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;
pub const MAX_LINE_QUANTITY: i32 = 1_000;

// Body of the order placement request
#[derive(Deserialize, Debug)]
pub struct PlaceOrderForm{
    // product id -> quantity
    pub items: BTreeMap<Uuid, i32>,
    pub payment_method: String,
    #[serde(default)]
    pub order_type: OrderType,
    pub delivery_address: Option<String>,
    pub promo_code: Option<String>
}

#[derive(Debug, Clone)]
pub struct NewOrder{
    pub customer_id: Uuid,
    pub items: Vec<PricedItem>,
    pub payment_method: String,
    pub order_type: OrderType,
    pub delivery_address: Option<String>,
    pub promo_code: Option<String>,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal
}

#[derive(Serialize, Debug)]
pub struct PlacedOrder{
    pub order: Order,
    pub items: Vec<PricedItem>
}

#[derive(Serialize, Debug)]
pub struct OrderDetails{
    pub order: Order,
    pub items: Vec<OrderLine>,
    pub feedback: Option<Feedback>
}

#[derive(Serialize, Debug)]
pub struct OrderPage{
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64
}

// e.g. ORD-20241018153012-0042
pub fn generate_order_number(now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    format!("ORD-{}-{:04}", now.format("%Y%m%d%H%M%S"), rng.gen_range(0..10_000))
}

fn validation(message: &str) -> ShopError {
    ShopError::Validation(message.to_string())
}

// Persists a priced order and its lines in one go.
#[tracing::instrument(
    "Creating order",
    skip_all,
    fields(customer_id = %new_order.customer_id)
)]
pub fn create_order<S: OrderRepository>(
    store: &mut S,
    new_order: NewOrder,
    now: DateTime<Utc>
) -> Result<Order, ShopError> {
    if new_order.items.is_empty() || new_order.items.iter().any(|i| i.quantity <= 0) {
        return Err(validation("An order needs at least one item with a positive quantity"));
    }

    if new_order.discount < zero()
        || new_order.discount > new_order.subtotal
        || new_order.total != &new_order.subtotal - &new_order.discount
    {
        return Err(validation("Order totals do not add up"));
    }

    let order = Order {
        order_id: Uuid::new_v4(),
        order_number: generate_order_number(now, &mut rand::thread_rng()),
        guest_id: new_order.customer_id,
        order_date: now,
        status: OrderStatus::Pending,
        order_type: new_order.order_type.as_str().to_string(),
        payment_method: new_order.payment_method,
        payment_status: INITIAL_PAYMENT_STATUS.to_string(),
        delivery_address: new_order.delivery_address,
        subtotal: new_order.subtotal,
        discount: new_order.discount,
        total_amount: new_order.total,
        promo_code: new_order.promo_code
    };

    let items: Vec<OrderItemModel> = new_order.items
        .iter()
        .map(|item| OrderItemModel {
            order_item_id: Uuid::new_v4(),
            order_id: order.order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price.clone()
        })
        .collect();

    store.insert_order(&order, &items)?;

    tracing::info!(order_number = %order.order_number, "Order created");
    Ok(order)
}

// Validates the request, prices it, and creates the order.
#[tracing::instrument(
    "Placing order",
    skip(store, form)
)]
pub fn place_order<S>(
    store: &mut S,
    customer_id: Uuid,
    form: PlaceOrderForm,
    now: DateTime<Utc>
) -> Result<PlacedOrder, ShopError>
where
    S: InventoryRepository + PromotionRepository + OrderRepository + CustomerRepository,
{
    let payment_method = form.payment_method.trim().to_string();
    if payment_method.is_empty() {
        return Err(validation("Please choose a payment method"));
    }
    if payment_method.chars().count() > MAX_PAYMENT_METHOD_LEN {
        return Err(validation("Payment method is too long"));
    }

    if form.items.values().any(|quantity| *quantity > MAX_LINE_QUANTITY) {
        return Err(ShopError::Validation(format!(
            "At most {} of a single product can be ordered at once", MAX_LINE_QUANTITY
        )));
    }

    let customer = store
        .find_customer(customer_id)?
        .ok_or(ShopError::Authorization)?;

    let delivery_address = match form.order_type {
        OrderType::Delivery => {
            let address = form.delivery_address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .or(customer.address)
                .ok_or_else(|| validation("Please provide a delivery address"))?;
            Some(address)
        },
        OrderType::Pickup => None
    };

    let priced = price_order(store, &form.items, form.promo_code.as_deref(), now)?;
    if priced.subtotal > max_amount() {
        return Err(validation("Order total is too large"));
    }

    let order = create_order(store, NewOrder {
        customer_id,
        items: priced.items.clone(),
        payment_method,
        order_type: form.order_type,
        delivery_address,
        promo_code: priced.promo_code,
        subtotal: priced.subtotal,
        discount: priced.discount,
        total: priced.total
    }, now)?;

    Ok(PlacedOrder { order, items: priced.items })
}

// Ok(false) covers missing, foreign and no-longer-pending orders alike.
#[tracing::instrument(
    "Cancelling order",
    skip(store)
)]
pub fn cancel_order<S: OrderRepository>(
    store: &mut S,
    order_id: Uuid,
    customer_id: Uuid
) -> Result<bool, ShopError> {
    let cancelled = store.cancel_pending_order(order_id, customer_id)?;
    if !cancelled {
        tracing::info!("Order could not be cancelled");
    }

    Ok(cancelled)
}

// Orders of other customers come back as None, same as unknown ids.
#[tracing::instrument(
    "Getting order details",
    skip(store)
)]
pub fn get_order_details<S>(
    store: &mut S,
    order_id: Uuid,
    customer_id: Uuid
) -> Result<Option<OrderDetails>, ShopError>
where
    S: OrderRepository + FeedbackRepository,
{
    let order = match store.find_customer_order(order_id, customer_id)? {
        Some(order) => order,
        None => return Ok(None)
    };

    let items = store.order_lines(order.order_id)?;
    let feedback = store.feedback_for_order(order.order_id)?;

    Ok(Some(OrderDetails { order, items, feedback }))
}

#[tracing::instrument(
    "Listing orders",
    skip(store)
)]
pub fn list_orders<S: OrderRepository>(
    store: &mut S,
    customer_id: Uuid,
    filters: &OrderFilters
) -> Result<OrderPage, ShopError> {
    let (orders, total) = store.list_customer_orders(customer_id, filters)?;
    let limit = filters.page.limit;

    Ok(OrderPage {
        orders,
        total,
        page: filters.page.page,
        limit,
        total_pages: (total + limit - 1) / limit
    })
}
