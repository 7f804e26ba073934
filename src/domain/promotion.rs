use std::{io::Write, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
};
use serde::{Deserialize, Serialize};

use crate::{domain::money::{round_to_cents, zero}, models::Promotion};

pub const ACTIVE_PROMOTION_STATUS: &str = "active";

pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired promotion code";
pub const MISSING_CODE_MESSAGE: &str = "Please enter a promotion code";
pub const SUBTOTAL_TOO_SMALL_MESSAGE: &str = "Order subtotal must be greater than discount amount";
pub const NEGATIVE_SUBTOTAL_MESSAGE: &str = "Order subtotal cannot be negative";
pub const APPLIED_MESSAGE: &str = "Promotion code applied";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType{
    Percentage,
    Fixed
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed"
        }
    }
}

impl FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            other => Err(format!("{} is not a valid discount type", other))
        }
    }
}

impl ToSql<Text, Pg> for DiscountType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for DiscountType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        Ok(raw.parse::<DiscountType>()?)
    }
}

// Answer to "can this code be used on this subtotal". Serialised as-is by the
// preview endpoint, and consumed by order placement.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PromotionValidation{
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<BigDecimal>,
    pub message: String
}

impl PromotionValidation {
    pub fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            discount_type: None,
            discount_value: None,
            discount: None,
            message: message.to_string()
        }
    }
}

impl Promotion {
    // Start and end are both inclusive
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ACTIVE_PROMOTION_STATUS
            && self.start_date <= now
            && now <= self.end_date
    }

    // Never negative and never more than the subtotal
    pub fn discount_for(&self, subtotal: &BigDecimal) -> BigDecimal {
        let discount = match self.discount_type {
            DiscountType::Percentage => {
                round_to_cents(&(subtotal * &self.discount_value / BigDecimal::from(100)))
            },
            DiscountType::Fixed => self.discount_value.clone()
        };

        discount.min(subtotal.clone()).max(zero())
    }

    pub fn check(&self, subtotal: &BigDecimal) -> PromotionValidation {
        if *subtotal < zero() {
            return PromotionValidation::invalid(NEGATIVE_SUBTOTAL_MESSAGE);
        }

        if self.discount_type == DiscountType::Fixed && *subtotal < self.discount_value {
            return PromotionValidation::invalid(SUBTOTAL_TOO_SMALL_MESSAGE);
        }

        PromotionValidation {
            valid: true,
            discount_type: Some(self.discount_type),
            discount_value: Some(self.discount_value.clone()),
            discount: Some(self.discount_for(subtotal)),
            message: APPLIED_MESSAGE.to_string()
        }
    }
}
