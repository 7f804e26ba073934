use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::OrderStatus;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page{
    pub page: i64,
    pub limit: i64
}

impl Page {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy{
    #[default]
    OrderDate,
    TotalAmount,
    Status
}

impl SortBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "order_date" => Some(SortBy::OrderDate),
            "total_amount" => Some(SortBy::TotalAmount),
            "status" => Some(SortBy::Status),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder{
    Asc,
    #[default]
    Desc
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None
        }
    }
}

// Raw query string of the order history listing
#[derive(Deserialize, Debug, Default)]
pub struct OrderListQuery{
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderFilters{
    pub status: Option<OrderStatus>,
    // inclusive
    pub date_from: Option<DateTime<Utc>>,
    // exclusive
    pub date_to: Option<DateTime<Utc>>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub page: Page
}

impl OrderFilters {
    // Values that cannot be understood are dropped instead of rejected.
    pub fn from_query(query: &OrderListQuery) -> Self {
        let status = query.status
            .as_deref()
            .and_then(|s| s.parse::<OrderStatus>().ok());

        let date_from = query.date_from
            .as_deref()
            .and_then(parse_date)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc());

        let date_to = query.date_to
            .as_deref()
            .and_then(parse_date)
            .and_then(|d| d.succ_opt())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc());

        Self {
            status,
            date_from,
            date_to,
            sort_by: query.sort_by.as_deref().and_then(SortBy::parse).unwrap_or_default(),
            sort_order: query.sort_order.as_deref().and_then(SortOrder::parse).unwrap_or_default(),
            page: Page::new(query.page, query.limit)
        }
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
