use crate::helpers::TestApp;

#[actix_web::test]
#[ignore = "requires a running postgres"]
async fn check_health_route(){
    let app = TestApp::spawn_app().await;

    let response = reqwest::get(app.url("/health"))
                    .await
                    .expect("Failed to get response");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Working");
}
