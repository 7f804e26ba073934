use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    domain::{promotion::ACTIVE_PROMOTION_STATUS, DiscountType, OrderFilters, OrderStatus, SortBy, SortOrder},
    error::StoreError,
    models::{Customer, CustomerUpdate, Feedback, InventoryItem, Order, OrderItemModel, OrderLine, Promotion, ACTIVE_PRODUCT_STATUS},
    password::compute_password_hash,
    store::{CustomerRepository, FeedbackRepository, InventoryRepository, OrderRepository, PromotionRepository},
};

// In-memory stand-in for Postgres used by the service tests
#[derive(Default)]
pub struct MemoryStore{
    pub customers: Vec<Customer>,
    pub products: Vec<InventoryItem>,
    pub promotions: Vec<Promotion>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItemModel>,
    pub feedback: Vec<Feedback>,
    // Makes the next order insert fail as if the item insert had errored
    pub fail_item_insert: bool
}

pub fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

impl MemoryStore {
    pub fn add_customer(&mut self, fullname: &str, email: &str, password: &str) -> Uuid {
        let customer_id = Uuid::new_v4();
        let password_hash = compute_password_hash(password.to_string().into()).unwrap();
        self.customers.push(Customer {
            customer_id,
            fullname: fullname.to_string(),
            email: email.to_string(),
            contact: None,
            address: Some("12 Rye Street".to_string()),
            password_hash: secrecy::ExposeSecret::expose_secret(&password_hash).to_string()
        });
        customer_id
    }

    pub fn add_product(&mut self, name: &str, price: &str, stock_level: i32) -> Uuid {
        let item_id = Uuid::new_v4();
        self.products.push(InventoryItem {
            item_id,
            name: name.to_string(),
            price: dec(price),
            stock_level,
            status: ACTIVE_PRODUCT_STATUS.to_string(),
            category: Some("bread".to_string()),
            description: None
        });
        item_id
    }

    pub fn add_promotion(&mut self, code: &str, discount_type: DiscountType, value: &str) -> Uuid {
        let promotion_id = Uuid::new_v4();
        let now = Utc::now();
        self.promotions.push(Promotion {
            promotion_id,
            code: code.to_string(),
            discount_type,
            discount_value: dec(value),
            status: ACTIVE_PROMOTION_STATUS.to_string(),
            start_date: now - Duration::days(7),
            end_date: now + Duration::days(7)
        });
        promotion_id
    }

    pub fn set_order_status(&mut self, order_id: Uuid, status: OrderStatus) {
        if let Some(order) = self.orders.iter_mut().find(|o| o.order_id == order_id) {
            order.status = status;
        }
    }

    pub fn order(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_id == order_id)
    }
}

fn within(order: &Order, customer_id: Uuid, filters: &OrderFilters) -> bool {
    order.guest_id == customer_id
        && filters.status.map_or(true, |s| order.status == s)
        && filters.date_from.map_or(true, |d| order.order_date >= d)
        && filters.date_to.map_or(true, |d| order.order_date < d)
}

impl InventoryRepository for MemoryStore {
    fn products_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(self.products.iter().filter(|p| ids.contains(&p.item_id)).cloned().collect())
    }

    fn active_products(
        &mut self,
        category: Option<&str>,
        limit: i64,
        offset: i64
    ) -> Result<(Vec<InventoryItem>, i64), StoreError> {
        let mut matching: Vec<InventoryItem> = self.products
            .iter()
            .filter(|p| p.is_active())
            .filter(|p| category.map_or(true, |c| p.category.as_deref() == Some(c)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));

        let total = matching.len() as i64;
        let page = matching.into_iter().skip(offset as usize).take(limit as usize).collect();
        Ok((page, total))
    }
}

impl PromotionRepository for MemoryStore {
    fn find_redeemable_promotion(
        &mut self,
        code: &str,
        now: DateTime<Utc>
    ) -> Result<Option<Promotion>, StoreError> {
        Ok(self.promotions
            .iter()
            .find(|p| p.code == code && p.is_redeemable_at(now))
            .cloned())
    }
}

impl OrderRepository for MemoryStore {
    fn insert_order(&mut self, order: &Order, items: &[OrderItemModel]) -> Result<(), StoreError> {
        if self.orders.iter().any(|o| o.order_number == order.order_number) {
            return Err(StoreError::UniqueViolation("orders_order_number_key".to_string()));
        }
        if self.fail_item_insert {
            return Err(StoreError::QueryError(diesel::result::Error::RollbackTransaction));
        }

        self.orders.push(order.clone());
        self.order_items.extend(items.iter().cloned());
        Ok(())
    }

    fn cancel_pending_order(&mut self, order_id: Uuid, customer_id: Uuid) -> Result<bool, StoreError> {
        match self.orders.iter_mut().find(|o| {
            o.order_id == order_id && o.guest_id == customer_id && o.status == OrderStatus::Pending
        }) {
            Some(order) => {
                order.status = OrderStatus::Cancelled;
                Ok(true)
            },
            None => Ok(false)
        }
    }

    fn find_customer_order(&mut self, order_id: Uuid, customer_id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.orders
            .iter()
            .find(|o| o.order_id == order_id && o.guest_id == customer_id)
            .cloned())
    }

    fn order_lines(&mut self, order_id: Uuid) -> Result<Vec<OrderLine>, StoreError> {
        let mut lines: Vec<OrderLine> = self.order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .map(|i| OrderLine {
                product_id: i.product_id,
                product_name: self.products
                    .iter()
                    .find(|p| p.item_id == i.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                quantity: i.quantity,
                unit_price: i.unit_price.clone()
            })
            .collect();
        lines.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(lines)
    }

    fn list_customer_orders(
        &mut self,
        customer_id: Uuid,
        filters: &OrderFilters
    ) -> Result<(Vec<Order>, i64), StoreError> {
        let mut matching: Vec<Order> = self.orders
            .iter()
            .filter(|o| within(o, customer_id, filters))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = match filters.sort_by {
                SortBy::OrderDate => a.order_date.cmp(&b.order_date),
                SortBy::TotalAmount => a.total_amount.cmp(&b.total_amount),
                SortBy::Status => a.status.as_str().cmp(b.status.as_str())
            };
            match filters.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse()
            }
        });

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filters.page.offset() as usize)
            .take(filters.page.limit as usize)
            .collect();
        Ok((page, total))
    }
}

impl FeedbackRepository for MemoryStore {
    fn feedback_for_order(&mut self, order_id: Uuid) -> Result<Option<Feedback>, StoreError> {
        Ok(self.feedback.iter().find(|f| f.order_id == order_id).cloned())
    }

    fn upsert_feedback(&mut self, entry: &Feedback) -> Result<Feedback, StoreError> {
        match self.feedback.iter_mut().find(|f| f.order_id == entry.order_id) {
            Some(existing) => {
                existing.rating = entry.rating;
                existing.comment = entry.comment.clone();
                existing.feedback_date = entry.feedback_date;
                Ok(existing.clone())
            },
            None => {
                self.feedback.push(entry.clone());
                Ok(entry.clone())
            }
        }
    }
}

impl CustomerRepository for MemoryStore {
    fn find_customer(&mut self, customer_id: Uuid) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.iter().find(|c| c.customer_id == customer_id).cloned())
    }

    fn find_customer_by_email(&mut self, email: &str) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.iter().find(|c| c.email == email).cloned())
    }

    fn update_customer(&mut self, customer_id: Uuid, update: &CustomerUpdate) -> Result<(), StoreError> {
        if self.customers.iter().any(|c| c.email == update.email && c.customer_id != customer_id) {
            return Err(StoreError::UniqueViolation("customer_email_key".to_string()));
        }

        if let Some(customer) = self.customers.iter_mut().find(|c| c.customer_id == customer_id) {
            customer.fullname = update.fullname.clone();
            customer.email = update.email.clone();
            customer.contact = update.contact.clone();
            customer.address = update.address.clone();
            if let Some(hash) = &update.password_hash {
                customer.password_hash = hash.clone();
            }
        }
        Ok(())
    }
}
