use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{domain::promotion::ACTIVE_PROMOTION_STATUS, error::StoreError, models::Promotion, schema::promotions, store::PromotionRepository};

use super::PgStore;

impl PromotionRepository for PgStore<'_> {
    #[tracing::instrument(
        "Looking up redeemable promotion",
        skip(self)
    )]
    fn find_redeemable_promotion(
        &mut self,
        code: &str,
        now: DateTime<Utc>
    ) -> Result<Option<Promotion>, StoreError> {
        Ok(promotions::table
            .filter(promotions::code.eq(code))
            .filter(promotions::status.eq(ACTIVE_PROMOTION_STATUS))
            .filter(promotions::start_date.le(now))
            .filter(promotions::end_date.ge(now))
            .select(Promotion::as_select())
            .first::<Promotion>(self.conn())
            .optional()?)
    }
}
