use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    auth::CustomerContext,
    error::ShopError,
    services::promotion::validate_promotion,
    utils::{run_in_transaction, DbPool},
};

#[derive(Deserialize, Debug)]
pub struct ValidatePromotionQuery{
    pub code: String,
    pub subtotal: BigDecimal
}

// Preview used by the checkout page before the order is submitted
#[tracing::instrument(
    "Previewing promotion code",
    skip(pool, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn validate_promotion_code(
    pool: web::Data<DbPool>,
    query: web::Query<ValidatePromotionQuery>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let ValidatePromotionQuery { code, subtotal } = query.into_inner();

    let validation = run_in_transaction(&pool, move |store| {
        Ok(validate_promotion(store, &code, &subtotal, Utc::now())?)
    })
    .await?;

    Ok(HttpResponse::Ok().json(validation))
}
