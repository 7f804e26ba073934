use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::utils::error_fmt_chain;

// One line of a rejected order: the customer asked for more than is on the shelf.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InsufficientStock{
    pub product_id: Uuid,
    pub name: String,
    pub requested: i32,
    pub available: i32
}

#[derive(Error)]
pub enum ShopError{
    #[error("{0}")]
    Validation(String),
    #[error("Some items do not have enough stock")]
    Stock(Vec<InsufficientStock>),
    #[error("{0}")]
    Unauthorized(String),
    // Ownership and status preconditions share one message so that other
    // customers' orders stay indistinguishable from missing ones.
    #[error("Unable to process the request for this order")]
    Authorization,
    #[error("Order not found")]
    NotFound,
    #[error("Something went wrong, please try again")]
    Persistence(#[source] anyhow::Error)
}

impl Debug for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl From<StoreError> for ShopError {
    fn from(e: StoreError) -> Self {
        ShopError::Persistence(e.into())
    }
}

impl From<diesel::result::Error> for ShopError {
    fn from(e: diesel::result::Error) -> Self {
        StoreError::from(e).into()
    }
}

impl ResponseError for ShopError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShopError::Validation(_) => StatusCode::BAD_REQUEST,
            ShopError::Stock(_) => StatusCode::CONFLICT,
            ShopError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ShopError::Authorization => StatusCode::FORBIDDEN,
            ShopError::NotFound => StatusCode::NOT_FOUND,
            ShopError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if let ShopError::Persistence(_) = self {
            tracing::error!(error.cause_chain = ?self, "Store operation failed");
        }

        let body = match self {
            ShopError::Stock(items) => json!({
                "message": self.to_string(),
                "items": items
            }),
            _ => json!({ "message": self.to_string() })
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

// Failures raised by the repository layer
#[derive(Error)]
pub enum StoreError{
    #[error("Failed to run query")]
    QueryError(#[source] diesel::result::Error),
    #[error("Unique constraint {0} was violated")]
    UniqueViolation(String)
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                ref info
            ) => StoreError::UniqueViolation(
                info.constraint_name().unwrap_or("unknown").to_string()
            ),
            _ => StoreError::QueryError(e)
        }
    }
}
