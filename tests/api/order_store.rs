use bakery_orders::{
    db_interaction::PgStore,
    domain::{OrderStatus, OrderType},
    models::{Order, OrderItemModel},
    schema::{order_items, orders},
    services::lifecycle::INITIAL_PAYMENT_STATUS,
    store::OrderRepository,
};
use chrono::Utc;
use claim::{assert_err, assert_ok};
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::helpers::{dec, TestApp};

fn order_for(customer_id: Uuid) -> Order{
    let order_id = Uuid::new_v4();
    Order{
        order_id,
        order_number: format!("ORD-{}", order_id.simple()),
        guest_id: customer_id,
        order_date: Utc::now(),
        status: OrderStatus::Pending,
        order_type: OrderType::Pickup.as_str().to_string(),
        payment_method: "cash".to_string(),
        payment_status: INITIAL_PAYMENT_STATUS.to_string(),
        delivery_address: None,
        subtotal: dec("13.00"),
        discount: dec("0.00"),
        total_amount: dec("13.00"),
        promo_code: None
    }
}

fn line(order_id: Uuid, product_id: Uuid) -> OrderItemModel{
    OrderItemModel{
        order_item_id: Uuid::new_v4(),
        order_id,
        product_id,
        quantity: 2,
        unit_price: dec("6.50")
    }
}

fn stored_rows(app: &TestApp, order_id: Uuid) -> (i64, i64){
    let mut conn = app.pool.get().unwrap();
    let headers = orders::table
        .filter(orders::order_id.eq(order_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    let lines = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    (headers, lines)
}

#[actix_web::test]
#[ignore = "requires a running postgres"]
async fn order_with_a_failing_line_leaves_no_header_behind(){
    let app = TestApp::spawn_app().await;
    let customer_id = app.add_customer("ada@example.com");
    let loaf = app.add_product("Sourdough loaf", "6.50", 20);

    let order = order_for(customer_id);
    // The second line points at a product with no inventory row
    let items = vec![line(order.order_id, loaf), line(order.order_id, Uuid::new_v4())];

    let mut conn = app.pool.get().unwrap();
    assert_err!(PgStore::new(&mut conn).insert_order(&order, &items));
    drop(conn);

    assert_eq!(stored_rows(&app, order.order_id), (0, 0));
}

#[actix_web::test]
#[ignore = "requires a running postgres"]
async fn order_with_valid_lines_is_stored_whole(){
    let app = TestApp::spawn_app().await;
    let customer_id = app.add_customer("ada@example.com");
    let loaf = app.add_product("Sourdough loaf", "6.50", 20);

    let order = order_for(customer_id);
    let items = vec![line(order.order_id, loaf)];

    let mut conn = app.pool.get().unwrap();
    assert_ok!(PgStore::new(&mut conn).insert_order(&order, &items));
    drop(conn);

    assert_eq!(stored_rows(&app, order.order_id), (1, 1));
}
