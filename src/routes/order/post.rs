use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::{
    auth::CustomerContext,
    error::ShopError,
    services::lifecycle::{place_order, PlaceOrderForm},
    utils::{run_in_transaction, DbPool},
};

#[tracing::instrument(
    "Placing a new order",
    skip(pool, form, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn post_order(
    pool: web::Data<DbPool>,
    form: web::Json<PlaceOrderForm>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let form = form.into_inner();
    let customer_id = ctx.customer_id;

    let placed = run_in_transaction(&pool, move |store| {
        place_order(store, customer_id, form, Utc::now())
    })
    .await?;

    Ok(HttpResponse::Created().json(placed))
}
