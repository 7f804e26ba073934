use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    auth::CustomerContext,
    error::ShopError,
    services::feedback::{submit_feedback, FeedbackForm, FeedbackOutcome},
    utils::{run_in_transaction, DbPool},
};

#[tracing::instrument(
    "Submitting order feedback",
    skip(pool, form, ctx),
    fields(customer_id = %ctx.customer_id)
)]
pub async fn post_feedback(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<FeedbackForm>,
    ctx: CustomerContext
) -> Result<HttpResponse, ShopError> {
    let order_id = path.into_inner();
    let customer_id = ctx.customer_id;
    let FeedbackForm { rating, comment } = form.into_inner();

    let (feedback, outcome) = run_in_transaction(&pool, move |store| {
        submit_feedback(store, order_id, customer_id, rating, comment, Utc::now())
    })
    .await?;

    let body = json!({ "feedback": feedback, "outcome": outcome });
    match outcome {
        FeedbackOutcome::Inserted => Ok(HttpResponse::Created().json(body)),
        FeedbackOutcome::Updated => Ok(HttpResponse::Ok().json(body))
    }
}
