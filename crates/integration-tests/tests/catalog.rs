//! Catalog read-path tests: response caching, category scoping, and the
//! filter pipeline end to end.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kiosk_core::{CategoryId, ProductId};
use kiosk_integration_tests::{api_client, product_json, storefront};
use secrecy::SecretString;

#[tokio::test]
async fn repeated_product_reads_are_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(1, "Apple", 10.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = api_client(&server);
    let first = client.products(None).await.expect("first fetch");
    let second = client.products(None).await.expect("cached fetch");

    assert_eq!(first, second);
}

#[tokio::test]
async fn scoped_and_unscoped_product_lists_are_cached_separately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("category_id", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(5, "Banana", 8.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            product_json(1, "Apple", 10.0),
            product_json(5, "Banana", 8.0)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_client(&server);
    let scoped = client
        .products(Some(CategoryId::new(2)))
        .await
        .expect("scoped fetch");
    let all = client.products(None).await.expect("unscoped fetch");

    assert_eq!(scoped.len(), 1);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn admin_mutation_invalidates_the_catalog_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(1, "Apple", 10.0)])),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Product deleted successfully"})),
        )
        .mount(&server)
        .await;

    let client = api_client(&server);
    client.products(None).await.expect("first fetch");
    client
        .delete_product(&SecretString::from("root-token"), ProductId::new(1))
        .await
        .expect("delete");
    client.products(None).await.expect("post-mutation fetch");
}

#[tokio::test]
async fn filters_narrow_the_visible_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Fruit", "description": null}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            product_json(1, "Apple", 10.0),
            product_json(2, "Banana", 8.0),
            product_json(3, "Cherry", 25.0)
        ])))
        .mount(&server)
        .await;

    let (mut app, _store) = storefront(&server).await;
    app.refresh_catalog().await.expect("refresh");
    assert_eq!(app.visible_products().len(), 3);

    app.set_search("an");
    assert_eq!(app.visible_products().len(), 1);

    app.set_search("");
    app.set_min_price("9");
    app.set_max_price("20");
    let visible = app.visible_products();
    assert_eq!(visible.len(), 1);
    let apple = visible.first().expect("one product");
    assert_eq!(apple.id, ProductId::new(1));
}
