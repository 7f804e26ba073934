use std::{error::Error, str::FromStr};

use bakery_orders::{
    configuration::{DatabaseSettings, Settings},
    domain::{DiscountType, OrderStatus},
    models::{Customer, InventoryItem, Promotion, ACTIVE_PRODUCT_STATUS},
    password::compute_password_hash,
    schema::{customer, inventory, orders, promotions},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
    utils::DbPool,
};
use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use diesel::{pg::Pg, r2d2::ConnectionManager, Connection, ExpressionMethods, PgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use once_cell::sync::Lazy;
use r2d2::Pool;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "bakery-orders-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const PASSWORD: &str = "rye-and-honey";

fn run_migrations(connection: &mut impl MigrationHarness<Pg>)
    -> Result<(), Box<dyn Error + Send + Sync + 'static>>
{
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse{
    pub token: String
}

pub struct TestCustomer{
    pub customer_id: Uuid,
    pub email: String,
    pub token: String
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

pub fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        let pool = Pool::new(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database");

        let mut conn = pool.get().expect("Failed to get connection to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");

        pool
    }

    pub fn url(&self, path: &str) -> String{
        format!("http://{}:{}{}", self.host, self.port, path)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();

        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .expect("Failed to build application");

        tokio::task::spawn(application.server);

        TestApp{
            host: application.host,
            port: application.port,
            pool,
            api_client: reqwest::Client::new()
        }
    }

    pub fn add_customer(&self, email: &str) -> Uuid{
        let password_hash = compute_password_hash(SecretString::from(PASSWORD.to_string())).unwrap();
        let row = Customer{
            customer_id: Uuid::new_v4(),
            fullname: "Ada Crumb".to_string(),
            email: email.to_string(),
            contact: None,
            address: Some("12 Rye Street".to_string()),
            password_hash: password_hash.expose_secret().to_string()
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(customer::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        row.customer_id
    }

    pub fn add_product(&self, name: &str, price: &str, stock_level: i32) -> Uuid{
        let row = InventoryItem{
            item_id: Uuid::new_v4(),
            name: name.to_string(),
            price: dec(price),
            stock_level,
            status: ACTIVE_PRODUCT_STATUS.to_string(),
            category: Some("bread".to_string()),
            description: None
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(inventory::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();

        row.item_id
    }

    pub fn add_promotion(&self, code: &str, discount_type: DiscountType, value: &str){
        let now = Utc::now();
        let row = Promotion{
            promotion_id: Uuid::new_v4(),
            code: code.to_string(),
            discount_type,
            discount_value: dec(value),
            status: "active".to_string(),
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(1)
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(promotions::table)
            .values(&row)
            .execute(&mut conn)
            .unwrap();
    }

    // Stands in for the fulfilment side completing an order
    pub fn set_order_status(&self, order_id: Uuid, status: OrderStatus){
        let mut conn = self.pool.get().unwrap();
        diesel::update(orders::table)
            .filter(orders::order_id.eq(order_id))
            .set(orders::status.eq(status))
            .execute(&mut conn)
            .unwrap();
    }

    pub fn set_legacy_approved(&self, order_id: Uuid){
        let mut conn = self.pool.get().unwrap();
        diesel::sql_query("UPDATE orders SET status = 'approved' WHERE order_id = $1")
            .bind::<diesel::sql_types::Uuid, _>(order_id)
            .execute(&mut conn)
            .unwrap();
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response{
        self.api_client.post(self.url("/login"))
            .form(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send request to login endpoint")
    }

    pub async fn customer(&self, email: &str) -> TestCustomer{
        let customer_id = self.add_customer(email);
        let token = self.login(email, PASSWORD)
            .await
            .json::<LoginResponse>()
            .await
            .expect("Login did not return a token")
            .token;

        TestCustomer{ customer_id, email: email.to_string(), token }
    }

    pub async fn place_order(&self, customer: &TestCustomer, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(self.url("/customer/orders"))
            .bearer_auth(&customer.token)
            .json(body)
            .send()
            .await
            .expect("Failed to send order")
    }
}
