use actix_web::{web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{Tokenizer, UserRole},
    domain::user_email::UserEmail,
    error::ShopError,
    password::verify_password,
    store::CustomerRepository,
    utils::{run_in_transaction, DbPool},
};

pub const LOGIN_FAILED_MESSAGE: &str = "Email or password is incorrect";

fn login_failed() -> ShopError {
    ShopError::Unauthorized(LOGIN_FAILED_MESSAGE.to_string())
}

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in customer",
    skip(pool, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Form<LoginForm>
) -> Result<HttpResponse, ShopError>{
    let LoginForm { email, password } = form.into_inner();

    let email = UserEmail::parse(email)
        .map_err(|_| login_failed())?;

    let lookup_email = email.inner();
    let customer = run_in_transaction(&pool, move |store| {
        Ok(store.find_customer_by_email(&lookup_email)?)
    })
    .await?;

    let customer = match customer {
        Some(customer) => customer,
        None => {
            tracing::info!("No customer registered with this email");
            return Err(login_failed());
        }
    };

    let matches = verify_password(password, customer.password_hash.clone())
        .await
        .map_err(ShopError::Persistence)?;

    if !matches {
        tracing::info!("Passwords did not match");
        return Err(login_failed());
    }

    let token = tokenizer
        .generate_key(customer.customer_id, customer.email, UserRole::CUSTOMER)
        .map_err(|e| ShopError::Persistence(anyhow::anyhow!(e).context("Failed to sign token")))?;

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}
