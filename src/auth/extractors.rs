use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use super::jwt::{Tokenizer, UserRole};
use crate::error::ShopError;

// The logged-in customer, resolved from the bearer token on each request
#[derive(Debug, Clone)]
pub struct CustomerContext{
    pub customer_id: Uuid,
    pub email: String
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: &str) -> actix_web::Error {
    ShopError::Unauthorized(message.to_string()).into()
}

impl FromRequest for CustomerContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let tokenizer = match req.app_data::<web::Data<Tokenizer>>() {
            Some(tokenizer) => tokenizer,
            None => {
                return ready(Err(ShopError::Persistence(
                    anyhow::anyhow!("Tokenizer is not registered as app data")
                ).into()));
            }
        };

        let token = match bearer_token(req) {
            Some(token) => token,
            None => return ready(Err(unauthorized("Invalid token")))
        };

        match tokenizer.decode_key(token) {
            Some(claims) => match claims.role {
                UserRole::CUSTOMER => ready(Ok(CustomerContext {
                    customer_id: claims.sub,
                    email: claims.email
                })),
                _ => ready(Err(unauthorized("Unauthorized Role")))
            },
            None => ready(Err(unauthorized("Invalid Token")))
        }
    }
}
