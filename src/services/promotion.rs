use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::{
    domain::{promotion::{INVALID_CODE_MESSAGE, MISSING_CODE_MESSAGE}, PromotionValidation},
    error::StoreError,
    store::PromotionRepository,
};

// The one place a promotion code is judged. The preview endpoint and order
// placement both go through here so they can never disagree.
#[tracing::instrument(
    "Validating promotion code",
    skip(store)
)]
pub fn validate_promotion<S: PromotionRepository>(
    store: &mut S,
    code: &str,
    subtotal: &BigDecimal,
    now: DateTime<Utc>
) -> Result<PromotionValidation, StoreError> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(PromotionValidation::invalid(MISSING_CODE_MESSAGE));
    }

    let validation = match store.find_redeemable_promotion(code, now)? {
        Some(promotion) => promotion.check(subtotal),
        None => PromotionValidation::invalid(INVALID_CODE_MESSAGE)
    };

    Ok(validation)
}
