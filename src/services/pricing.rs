use std::collections::{BTreeMap, HashMap};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::money::{line_total, zero},
    error::{InsufficientStock, ShopError},
    services::promotion::validate_promotion,
    store::{InventoryRepository, PromotionRepository},
};

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one product";
pub const UNAVAILABLE_PRODUCT_MESSAGE: &str = "One or more selected products are no longer available";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PricedItem{
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
    // price at the moment of ordering
    pub unit_price: BigDecimal
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PricedOrder{
    pub items: Vec<PricedItem>,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub promo_code: Option<String>
}

// Prices a selection against current prices and stock. Nothing is written.
//
// Quantities of zero or less are dropped. A single shortfall rejects the
// whole selection, with every short line reported.
#[tracing::instrument(
    "Pricing order",
    skip(store, requested),
    fields(lines = requested.len())
)]
pub fn price_order<S>(
    store: &mut S,
    requested: &BTreeMap<Uuid, i32>,
    promo_code: Option<&str>,
    now: DateTime<Utc>
) -> Result<PricedOrder, ShopError>
where
    S: InventoryRepository + PromotionRepository,
{
    let wanted: Vec<(Uuid, i32)> = requested
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .map(|(id, quantity)| (*id, *quantity))
        .collect();

    if wanted.is_empty() {
        return Err(ShopError::Validation(EMPTY_SELECTION_MESSAGE.to_string()));
    }

    let ids: Vec<Uuid> = wanted.iter().map(|(id, _)| *id).collect();
    let products: HashMap<Uuid, _> = store
        .products_by_ids(&ids)?
        .into_iter()
        .map(|p| (p.item_id, p))
        .collect();

    let mut items = Vec::with_capacity(wanted.len());
    let mut shortfalls = Vec::new();
    let mut subtotal = zero();

    for (product_id, quantity) in wanted {
        let product = match products.get(&product_id) {
            Some(product) if product.is_active() => product,
            _ => return Err(ShopError::Validation(UNAVAILABLE_PRODUCT_MESSAGE.to_string()))
        };

        if quantity > product.stock_level {
            shortfalls.push(InsufficientStock {
                product_id,
                name: product.name.clone(),
                requested: quantity,
                available: product.stock_level
            });
            continue;
        }

        subtotal += line_total(&product.price, quantity);
        items.push(PricedItem {
            product_id,
            name: product.name.clone(),
            quantity,
            unit_price: product.price.clone()
        });
    }

    if !shortfalls.is_empty() {
        tracing::info!(shortfalls = shortfalls.len(), "Rejecting order for insufficient stock");
        return Err(ShopError::Stock(shortfalls));
    }

    let promo_code = promo_code
        .map(str::trim)
        .filter(|code| !code.is_empty());

    let discount = match promo_code {
        Some(code) => {
            let validation = validate_promotion(store, code, &subtotal, now)?;
            if !validation.valid {
                return Err(ShopError::Validation(validation.message));
            }
            validation.discount.unwrap_or_else(zero)
        },
        None => zero()
    };

    let total = &subtotal - &discount;

    Ok(PricedOrder {
        items,
        subtotal,
        discount,
        total,
        promo_code: promo_code.map(str::to_string)
    })
}
