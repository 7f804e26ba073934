use diesel::prelude::*;
use uuid::Uuid;

use crate::{error::StoreError, models::Feedback, schema::feedback, store::FeedbackRepository};

use super::PgStore;

impl FeedbackRepository for PgStore<'_> {
    #[tracing::instrument(
        "Getting feedback for order",
        skip(self)
    )]
    fn feedback_for_order(&mut self, order_id: Uuid) -> Result<Option<Feedback>, StoreError> {
        Ok(feedback::table
            .filter(feedback::order_id.eq(order_id))
            .select(Feedback::as_select())
            .first::<Feedback>(self.conn())
            .optional()?)
    }

    // order_id is unique, so a second submission lands on the existing row
    #[tracing::instrument(
        "Upserting order feedback",
        skip_all
    )]
    fn upsert_feedback(&mut self, entry: &Feedback) -> Result<Feedback, StoreError> {
        Ok(diesel::insert_into(feedback::table)
            .values(entry)
            .on_conflict(feedback::order_id)
            .do_update()
            .set((
                feedback::rating.eq(entry.rating),
                feedback::comment.eq(entry.comment.clone()),
                feedback::feedback_date.eq(entry.feedback_date)
            ))
            .returning(Feedback::as_returning())
            .get_result::<Feedback>(self.conn())?)
    }
}
