//! Admin catalog CRUD tests: the access gate on the editor and the
//! refetch-after-mutation behavior.

use rust_decimal::Decimal;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kiosk_core::{CategoryId, CategoryInput, ProductId, ProductInput};
use kiosk_integration_tests::{detail_json, mount_login, product_json, storefront};
use kiosk_storefront::AppError;
use kiosk_storefront::session::LoginEntry;

fn credentials(username: &str) -> kiosk_core::Credentials {
    kiosk_core::Credentials {
        username: username.to_owned(),
        password: "secret".to_owned(),
    }
}

fn widget_input() -> ProductInput {
    ProductInput {
        name: "Widget".to_owned(),
        description: "A widget".to_owned(),
        price: Decimal::from(100),
        image_url: None,
        category_id: CategoryId::new(1),
        stock: 5,
    }
}

#[tokio::test]
async fn guests_cannot_open_the_editor() {
    let server = MockServer::start().await;
    let (mut app, _store) = storefront(&server).await;

    let err = app.admin_editor().expect_err("guest must be rejected");
    assert!(matches!(err, AppError::NotAuthenticated));
}

#[tokio::test]
async fn regular_users_cannot_open_the_editor() {
    let server = MockServer::start().await;
    mount_login(&server, "alice", false, "alice-token").await;

    let (mut app, _store) = storefront(&server).await;
    app.login(&credentials("alice"), LoginEntry::Storefront)
        .await
        .expect("login");

    let err = app.admin_editor().expect_err("non-admin must be rejected");
    assert!(matches!(err, AppError::NotAdmin));
}

#[tokio::test]
async fn create_product_sends_bearer_and_refetches_the_list() {
    let server = MockServer::start().await;
    mount_login(&server, "root", true, "root-token").await;

    let created = product_json(9, "Widget", 100.0);
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(header("authorization", "Bearer root-token"))
        .and(body_json(serde_json::json!({
            "name": "Widget",
            "description": "A widget",
            "price": 100.0,
            "category_id": 1,
            "stock": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&created))
        .expect(1)
        .mount(&server)
        .await;

    // The create is followed by a fresh product list fetch.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([created])))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _store) = storefront(&server).await;
    app.login(&credentials("root"), LoginEntry::Admin)
        .await
        .expect("admin login");

    let mut editor = app.admin_editor().expect("editor");
    let product = editor
        .create_product(&widget_input())
        .await
        .expect("create product");

    assert_eq!(product.id, ProductId::new(9));
    assert_eq!(app.catalog().products().len(), 1);
}

#[tokio::test]
async fn delete_category_refetches_categories() {
    let server = MockServer::start().await;
    mount_login(&server, "root", true, "root-token").await;

    Mock::given(method("DELETE"))
        .and(path("/categories/2"))
        .and(header("authorization", "Bearer root-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Category deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Fruit", "description": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _store) = storefront(&server).await;
    app.login(&credentials("root"), LoginEntry::Admin)
        .await
        .expect("admin login");

    let mut editor = app.admin_editor().expect("editor");
    editor
        .delete_category(CategoryId::new(2))
        .await
        .expect("delete category");

    assert_eq!(app.catalog().categories().len(), 1);
}

#[tokio::test]
async fn create_category_refetches_categories() {
    let server = MockServer::start().await;
    mount_login(&server, "root", true, "root-token").await;

    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(body_json(serde_json::json!({"name": "Fruit"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
            {"id": 1, "name": "Fruit", "description": null}
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Fruit", "description": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, _store) = storefront(&server).await;
    app.login(&credentials("root"), LoginEntry::Admin)
        .await
        .expect("admin login");

    let mut editor = app.admin_editor().expect("editor");
    let category = editor
        .create_category(&CategoryInput {
            name: "Fruit".to_owned(),
            description: None,
        })
        .await
        .expect("create category");

    assert_eq!(category.id, CategoryId::new(1));
    assert_eq!(app.catalog().categories().len(), 1);
}

#[tokio::test]
async fn backend_rejection_surfaces_through_the_editor() {
    let server = MockServer::start().await;
    mount_login(&server, "root", true, "root-token").await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(403).set_body_json(detail_json("Not enough privileges")))
        .mount(&server)
        .await;

    let (mut app, _store) = storefront(&server).await;
    app.login(&credentials("root"), LoginEntry::Admin)
        .await
        .expect("admin login");

    let mut editor = app.admin_editor().expect("editor");
    let err = editor
        .create_product(&widget_input())
        .await
        .expect_err("backend rejection should surface");

    assert!(err.is_backend_rejection());
}
