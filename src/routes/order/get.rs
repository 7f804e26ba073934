use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    auth::CustomerContext,
    domain::{OrderFilters, OrderListQuery},
    error::ShopError,
    services::{
        lifecycle::{get_order_details, list_orders},
        receipt::get_receipt,
    },
    utils::{run_in_transaction, DbPool},
};

#[tracing::instrument(
    "Getting list of orders",
    skip(pool, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn get_orders(
    pool: web::Data<DbPool>,
    query: web::Query<OrderListQuery>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let filters = OrderFilters::from_query(&query);
    let customer_id = ctx.customer_id;

    let page = run_in_transaction(&pool, move |store| {
        list_orders(store, customer_id, &filters)
    })
    .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(
    "Getting order details",
    skip(pool, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn get_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let order_id = path.into_inner();
    let customer_id = ctx.customer_id;

    let details = run_in_transaction(&pool, move |store| {
        get_order_details(store, order_id, customer_id)
    })
    .await?
    .ok_or(ShopError::NotFound)?;

    Ok(HttpResponse::Ok().json(details))
}

#[tracing::instrument(
    "Getting order receipt",
    skip(pool, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn get_order_receipt(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let order_id = path.into_inner();
    let customer_id = ctx.customer_id;

    let receipt = run_in_transaction(&pool, move |store| {
        get_receipt(store, order_id, customer_id)
    })
    .await?
    .ok_or(ShopError::NotFound)?;

    Ok(HttpResponse::Ok().json(receipt))
}
