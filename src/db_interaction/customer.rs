use diesel::prelude::*;
use uuid::Uuid;

use crate::{error::StoreError, models::{Customer, CustomerUpdate}, schema::customer, store::CustomerRepository};

use super::PgStore;

impl CustomerRepository for PgStore<'_> {
    #[tracing::instrument(
        "Getting customer by id",
        skip(self)
    )]
    fn find_customer(&mut self, customer_id: Uuid) -> Result<Option<Customer>, StoreError> {
        Ok(customer::table
            .filter(customer::customer_id.eq(customer_id))
            .select(Customer::as_select())
            .first::<Customer>(self.conn())
            .optional()?)
    }

    #[tracing::instrument(
        "Getting customer by email",
        skip(self)
    )]
    fn find_customer_by_email(&mut self, email: &str) -> Result<Option<Customer>, StoreError> {
        Ok(customer::table
            .filter(customer::email.eq(email))
            .select(Customer::as_select())
            .first::<Customer>(self.conn())
            .optional()?)
    }

    #[tracing::instrument(
        "Updating customer profile",
        skip(self, update)
    )]
    fn update_customer(&mut self, customer_id: Uuid, update: &CustomerUpdate) -> Result<(), StoreError> {
        let target = customer::table.filter(customer::customer_id.eq(customer_id));

        match &update.password_hash {
            Some(password_hash) => diesel::update(target)
                .set((
                    customer::fullname.eq(update.fullname.clone()),
                    customer::email.eq(update.email.clone()),
                    customer::contact.eq(update.contact.clone()),
                    customer::address.eq(update.address.clone()),
                    customer::password_hash.eq(password_hash.clone())
                ))
                .execute(self.conn())?,
            None => diesel::update(target)
                .set((
                    customer::fullname.eq(update.fullname.clone()),
                    customer::email.eq(update.email.clone()),
                    customer::contact.eq(update.contact.clone()),
                    customer::address.eq(update.address.clone())
                ))
                .execute(self.conn())?
        };

        Ok(())
    }
}
