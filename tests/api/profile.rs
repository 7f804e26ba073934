use serde_json::{json, Value};

use crate::helpers::{TestApp, PASSWORD};

#[actix_web::test]
#[ignore = "requires a running postgres"]
async fn get_profile_returns_stored_details(){
    let app = TestApp::spawn_app().await;
    let customer = app.customer("ada@example.com").await;

    let body: Value = app.api_client.get(app.url("/customer/profile"))
        .bearer_auth(&customer.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["email"], customer.email);
    assert_eq!(body["address"], "12 Rye Street");
}

#[actix_web::test]
#[ignore = "requires a running postgres"]
async fn post_profile_changes_contact_and_password_together(){
    let app = TestApp::spawn_app().await;
    let customer = app.customer("ada@example.com").await;

    let response = app.api_client.post(app.url("/customer/profile"))
        .bearer_auth(&customer.token)
        .form(&json!({
            "contact": "+16502530000",
            "current_password": PASSWORD,
            "new_password": "sesame-seed-bagel",
            "confirm_password": "sesame-seed-bagel"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.login(&customer.email, PASSWORD).await.status().as_u16(), 401);
    assert_eq!(app.login(&customer.email, "sesame-seed-bagel").await.status().as_u16(), 200);
}

#[actix_web::test]
#[ignore = "requires a running postgres"]
async fn post_profile_rejects_taken_email(){
    let app = TestApp::spawn_app().await;
    let customer = app.customer("ada@example.com").await;
    app.add_customer("bo@example.com");

    let response = app.api_client.post(app.url("/customer/profile"))
        .bearer_auth(&customer.token)
        .form(&json!({ "email": "bo@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email is already in use");
}
