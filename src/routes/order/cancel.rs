use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{
    auth::CustomerContext,
    error::ShopError,
    services::lifecycle::cancel_order,
    utils::{run_in_transaction, DbPool},
};

// Unknown, foreign and non-pending orders all get the same answer
pub const CANNOT_CANCEL_MESSAGE: &str = "This order cannot be cancelled";

#[tracing::instrument(
    "Cancelling order",
    skip(pool, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn cancel_customer_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let order_id = path.into_inner();
    let customer_id = ctx.customer_id;

    let cancelled = run_in_transaction(&pool, move |store| {
        cancel_order(store, order_id, customer_id)
    })
    .await?;

    if cancelled {
        Ok(HttpResponse::Ok().json(json!({ "message": "Order cancelled" })))
    } else {
        Ok(HttpResponse::BadRequest().json(json!({ "message": CANNOT_CANCEL_MESSAGE })))
    }
}
