use actix_web::{web, HttpResponse};

use crate::{
    auth::CustomerContext,
    error::ShopError,
    services::profile::get_profile,
    utils::{run_in_transaction, DbPool},
};

#[tracing::instrument(
    "Get profile data of logged in customer",
    skip(pool, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn get_customer_profile(
    pool: web::Data<DbPool>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError>{
    let customer_id = ctx.customer_id;

    let profile = run_in_transaction(&pool, move |store| {
        get_profile(store, customer_id)
    })
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}
