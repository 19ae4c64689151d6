use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orders_client::controller::{
    FLASH_ORDER_CANCELLED, FLASH_ORDER_DELETED, FLASH_ORDER_ID_REQUIRED, FLASH_SERVER_ERROR,
    FLASH_SUCCESS,
};
use orders_client::{OrderController, OrdersApi};

async fn controller(server: &MockServer) -> OrderController {
    let api = OrdersApi::new(server.uri()).expect("client should build");
    OrderController::new(api)
}

fn order_json(id: &str, customer_id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customer_id": customer_id,
        "order_date": "2024-01-01",
        "status": status,
        "shipping_address": "1 Main St",
        "total_amount": "19.99",
        "payment_method": "credit",
        "shipping_cost": "2.50",
        "expected_date": "2024-01-05",
        "order_notes": "leave at door",
        "items": []
    })
}

#[tokio::test]
async fn create_posts_the_form_and_mirrors_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({
            "customer_id": "42",
            "order_date": "2024-01-01",
            "status": "pending",
            "shipping_address": "",
            "total_amount": "",
            "payment_method": "",
            "shipping_cost": "",
            "expected_date": "",
            "order_notes": "",
            "items": []
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(order_json("100", "42", "pending")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().customer_id = "42".to_string();
    ctl.form_mut().order_date = "2024-01-01".to_string();
    ctl.form_mut().status = "pending".to_string();
    ctl.create().await;

    assert_eq!(ctl.flash(), FLASH_SUCCESS);
    assert_eq!(ctl.form().order_id, "100");
    assert_eq!(ctl.form().customer_id, "42");
    assert_eq!(ctl.form().shipping_address, "1 Main St");
}

#[tokio::test]
async fn create_failure_shows_the_server_message_and_keeps_the_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"message": "customer_id is required"})),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_notes = "keep me".to_string();
    ctl.create().await;

    assert_eq!(ctl.flash(), "customer_id is required");
    assert_eq!(ctl.form().order_notes, "keep me");
    assert_eq!(ctl.form().order_id, "");
}

#[tokio::test]
async fn update_puts_to_the_order_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("7", "42", "shipped")))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.form_mut().customer_id = "42".to_string();
    ctl.update().await;

    assert_eq!(ctl.flash(), FLASH_SUCCESS);
    assert_eq!(ctl.form().status, "shipped");
}

#[tokio::test]
async fn retrieve_overwrites_every_field_from_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("7", "9", "delivered")))
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.form_mut().customer_id = "stale".to_string();
    ctl.retrieve().await;

    assert_eq!(ctl.flash(), FLASH_SUCCESS);
    assert_eq!(ctl.form().customer_id, "9");
    assert_eq!(ctl.form().order_notes, "leave at door");
}

#[tokio::test]
async fn failed_retrieve_blanks_everything_but_the_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Order with id '999' was not found."})),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "999".to_string();
    ctl.form_mut().customer_id = "42".to_string();
    ctl.form_mut().status = "pending".to_string();
    ctl.retrieve().await;

    assert_eq!(ctl.flash(), "Order with id '999' was not found.");
    assert_eq!(ctl.form().order_id, "999");
    assert_eq!(ctl.form().customer_id, "");
    assert_eq!(ctl.form().status, "");
}

#[tokio::test]
async fn delete_blanks_the_fields_and_confirms() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.form_mut().customer_id = "42".to_string();
    ctl.delete().await;

    assert_eq!(ctl.flash(), FLASH_ORDER_DELETED);
    assert_eq!(ctl.form().order_id, "7");
    assert_eq!(ctl.form().customer_id, "");
}

#[tokio::test]
async fn delete_failure_discards_the_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/orders/7"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database on fire"})),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.form_mut().customer_id = "42".to_string();
    ctl.delete().await;

    // Fixed string regardless of what the server said; form untouched.
    assert_eq!(ctl.flash(), FLASH_SERVER_ERROR);
    assert_eq!(ctl.form().customer_id, "42");
}

#[tokio::test]
async fn cancel_without_an_id_never_touches_the_network() {
    let server = MockServer::start().await;

    let mut ctl = controller(&server).await;
    ctl.cancel().await;

    assert_eq!(ctl.flash(), FLASH_ORDER_ID_REQUIRED);
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn cancel_puts_an_empty_body_and_blanks_the_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/7/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("7", "42", "cancelled")))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.form_mut().status = "pending".to_string();
    ctl.cancel().await;

    assert_eq!(ctl.flash(), FLASH_ORDER_CANCELLED);
    assert_eq!(ctl.form().order_id, "7");
    assert_eq!(ctl.form().status, "");
}

#[tokio::test]
async fn cancel_failure_shows_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/7/cancel"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "Order 7 is already shipped"})),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.cancel().await;

    assert_eq!(ctl.flash(), "Order 7 is already shipped");
}

#[tokio::test]
async fn clear_blanks_the_form_without_a_request() {
    let server = MockServer::start().await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "7".to_string();
    ctl.form_mut().customer_id = "42".to_string();
    ctl.clear();

    assert_eq!(ctl.form().order_id, "");
    assert_eq!(ctl.form().customer_id, "");
    assert!(ctl.flash().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn search_sends_renamed_filter_keys_and_copies_the_first_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("customer-id", "5"))
        .and(query_param("status", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("1", "5", "open"),
            order_json("2", "5", "open"),
            order_json("3", "6", "open"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().customer_id = "5".to_string();
    ctl.form_mut().status = "open".to_string();
    ctl.search().await;

    assert_eq!(ctl.flash(), FLASH_SUCCESS);
    assert_eq!(ctl.results().len(), 3);
    assert_eq!(ctl.results()[2].id, "3");
    // First row lands in the form wholesale.
    assert_eq!(ctl.form().order_id, "1");
    assert_eq!(ctl.form().customer_id, "5");

    let html = ctl.results_html();
    assert!(html.contains(r#"<tr id="row_0"><td>1</td>"#));
    assert!(html.contains(r#"<tr id="row_2"><td>3</td>"#));
}

#[tokio::test]
async fn search_with_zero_results_leaves_the_form_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().customer_id = "5".to_string();
    ctl.search().await;

    assert_eq!(ctl.flash(), FLASH_SUCCESS);
    assert!(ctl.results().is_empty());
    assert_eq!(ctl.form().customer_id, "5");
    assert_eq!(ctl.form().order_id, "");
}

#[tokio::test]
async fn failed_search_keeps_the_previous_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("customer-id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_json(
            "1", "5", "open"
        )])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("status", "bad"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "search exploded"})),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().customer_id = "5".to_string();
    ctl.search().await;
    assert_eq!(ctl.results().len(), 1);

    // Second search fails; the first result set stays on screen.
    let form = ctl.form_mut();
    form.customer_id.clear();
    form.order_date.clear();
    form.total_amount.clear();
    form.status = "bad".to_string();
    ctl.search().await;

    assert_eq!(ctl.flash(), "search exploded");
    assert_eq!(ctl.results().len(), 1);
}

#[tokio::test]
async fn failure_without_a_message_field_falls_back_to_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway upstream"))
        .mount(&server)
        .await;

    let mut ctl = controller(&server).await;
    ctl.form_mut().order_id = "1".to_string();
    ctl.retrieve().await;

    assert_eq!(ctl.flash(), "bad gateway upstream");
}
