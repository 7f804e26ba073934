use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    domain::{phone_number::PhoneNumberDomain, user_email::UserEmail},
    error::{ShopError, StoreError},
    models::{Customer, CustomerProfile, CustomerUpdate},
    password::{compute_password_hash, verify_password_hash},
    store::CustomerRepository,
};

pub const MIN_PASSWORD_LEN: usize = 8;

// Absent fields keep their current value. A blank contact or address clears it.
#[derive(Deserialize, Debug, Default)]
pub struct ProfileForm{
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub current_password: Option<SecretString>,
    pub new_password: Option<SecretString>,
    pub confirm_password: Option<SecretString>
}

impl From<Customer> for CustomerProfile {
    fn from(customer: Customer) -> Self {
        CustomerProfile {
            fullname: customer.fullname,
            email: customer.email,
            contact: customer.contact,
            address: customer.address
        }
    }
}

fn validation(message: impl Into<String>) -> ShopError {
    ShopError::Validation(message.into())
}

fn optional_field(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

#[tracing::instrument(
    "Getting customer profile",
    skip(store)
)]
pub fn get_profile<S: CustomerRepository>(
    store: &mut S,
    customer_id: Uuid
) -> Result<CustomerProfile, ShopError> {
    store
        .find_customer(customer_id)?
        .map(CustomerProfile::from)
        .ok_or(ShopError::NotFound)
}

#[tracing::instrument(
    "Checking password change",
    skip_all
)]
fn new_password_hash(customer: &Customer, form: &ProfileForm) -> Result<Option<String>, ShopError> {
    let new_password = match &form.new_password {
        Some(password) if !password.expose_secret().is_empty() => password,
        _ => return Ok(None)
    };

    let current_password = form.current_password
        .as_ref()
        .ok_or_else(|| validation("Please enter your current password"))?;

    let matches = verify_password_hash(current_password, &customer.password_hash)
        .map_err(ShopError::Persistence)?;
    if !matches {
        return Err(validation("Current password is incorrect"));
    }

    if new_password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
        return Err(validation(format!("New password must be at least {} characters", MIN_PASSWORD_LEN)));
    }

    let confirmed = form.confirm_password
        .as_ref()
        .map_or(false, |c| c.expose_secret() == new_password.expose_secret());
    if !confirmed {
        return Err(validation("New passwords do not match"));
    }

    let hash = compute_password_hash(SecretString::from(new_password.expose_secret().to_string()))
        .map_err(ShopError::Persistence)?;

    Ok(Some(hash.expose_secret().to_string()))
}

// Contact fields and the new password hash land in one UPDATE.
#[tracing::instrument(
    "Updating customer profile",
    skip(store, form)
)]
pub fn update_profile<S: CustomerRepository>(
    store: &mut S,
    customer_id: Uuid,
    form: ProfileForm
) -> Result<CustomerProfile, ShopError> {
    let customer = store
        .find_customer(customer_id)?
        .ok_or(ShopError::NotFound)?;

    let password_hash = new_password_hash(&customer, &form)?;

    let fullname = match form.fullname {
        Some(name) => optional_field(name).ok_or_else(|| validation("Name cannot be empty"))?,
        None => customer.fullname
    };

    let email = match form.email {
        Some(email) => UserEmail::parse(email).map_err(validation)?.inner(),
        None => customer.email
    };

    let contact = match form.contact {
        Some(contact) => match optional_field(contact) {
            Some(number) => Some(PhoneNumberDomain::parse(number).map_err(validation)?.inner()),
            None => None
        },
        None => customer.contact
    };

    let address = match form.address {
        Some(address) => optional_field(address),
        None => customer.address
    };

    let update = CustomerUpdate { fullname, email, contact, address, password_hash };

    store
        .update_customer(customer_id, &update)
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => validation("Email is already in use"),
            e => e.into()
        })?;

    Ok(CustomerProfile {
        fullname: update.fullname,
        email: update.email,
        contact: update.contact,
        address: update.address
    })
}
