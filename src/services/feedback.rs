use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{OrderStatus, Rating},
    error::ShopError,
    models::Feedback,
    store::{FeedbackRepository, OrderRepository},
};

#[derive(Deserialize, Debug)]
pub struct FeedbackForm{
    pub rating: i32,
    pub comment: Option<String>
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackOutcome{
    Inserted,
    Updated
}

// One feedback row per order. Only the owner of a completed order may leave
// one, and a second submission overwrites the first.
#[tracing::instrument(
    "Submitting feedback",
    skip(store, comment)
)]
pub fn submit_feedback<S>(
    store: &mut S,
    order_id: Uuid,
    customer_id: Uuid,
    rating: i32,
    comment: Option<String>,
    now: DateTime<Utc>
) -> Result<(Feedback, FeedbackOutcome), ShopError>
where
    S: OrderRepository + FeedbackRepository,
{
    let rating = Rating::parse(rating).map_err(ShopError::Validation)?;

    let order = store
        .find_customer_order(order_id, customer_id)?
        .ok_or(ShopError::Authorization)?;

    if order.status != OrderStatus::Completed {
        return Err(ShopError::Authorization);
    }

    let comment = comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let entry = Feedback {
        feedback_id: Uuid::new_v4(),
        order_id,
        guest_id: customer_id,
        rating: rating.inner(),
        comment,
        feedback_date: now
    };

    // A fresh id coming back means no earlier row existed for the order
    let stored = store.upsert_feedback(&entry)?;
    let outcome = if stored.feedback_id == entry.feedback_id {
        FeedbackOutcome::Inserted
    } else {
        FeedbackOutcome::Updated
    };

    tracing::info!(?outcome, "Feedback recorded");
    Ok((stored, outcome))
}
