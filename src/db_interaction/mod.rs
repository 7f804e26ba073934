mod customer;
mod feedback;
mod inventory;
mod orders;
mod promotions;

use diesel::PgConnection;

// Diesel-backed implementation of the repository ports. Borrows one
// connection, so everything done through a single store shares the caller's
// transaction.
pub struct PgStore<'a>{
    conn: &'a mut PgConnection
}

impl<'a> PgStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    fn conn(&mut self) -> &mut PgConnection {
        &mut *self.conn
    }
}
