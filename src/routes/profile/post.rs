use actix_web::{web, HttpResponse};

use crate::{
    auth::CustomerContext,
    error::ShopError,
    services::profile::{update_profile, ProfileForm},
    utils::{run_in_transaction, DbPool},
};

#[tracing::instrument(
    "Posting customer profile info",
    skip_all,
    fields(customer_id = %ctx.customer_id)
)]
pub async fn post_customer_profile(
    pool: web::Data<DbPool>,
    form: web::Form<ProfileForm>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError>{
    let customer_id = ctx.customer_id;
    let form = form.into_inner();

    let profile = run_in_transaction(&pool, move |store| {
        update_profile(store, customer_id, form)
    })
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}
