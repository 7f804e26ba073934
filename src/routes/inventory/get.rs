use actix_web::{web, HttpResponse};

use crate::{
    error::ShopError,
    services::catalog::{list_products, ProductQuery},
    utils::{run_in_transaction, DbPool},
};

#[tracing::instrument(
    "Get product listing",
    skip(pool)
)]
pub async fn get_products(
    pool: web::Data<DbPool>,
    query: web::Query<ProductQuery>
) -> Result<HttpResponse, ShopError> {
    let query = query.into_inner();

    let products = run_in_transaction(&pool, move |store| {
        list_products(store, &query)
    })
    .await?;

    Ok(HttpResponse::Ok().json(products))
}
