use billed_core::{BillList, BillStatus, CreateBill};
use reqwest::Method;
use serde_json::Value;

use crate::{TestApp, TestError, EMPLOYEE_EMAIL};

fn new_bill() -> CreateBill {
    CreateBill {
        email: EMPLOYEE_EMAIL.to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: "encore".to_string(),
        amount: 400,
        vat: "80".to_string(),
        pct: 20,
        date: "2004-04-04".to_string(),
        file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
        file_url: Some("/receipts/facture.jpg".to_string()),
        ..CreateBill::default()
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn lists_fixture_bills() {
    let (_app, client) = TestApp::start_and_connect().await;

    let bills: BillList = client
        .get("/api/v1/bills")
        .await
        .expect("failed to list bills");

    assert_eq!(4, bills.data.len());
    assert!(bills.data.iter().any(|b| b.id == "47qAXb6fIm2zOKkLzMro"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn creating_a_bill_returns_updated_list() {
    let (_app, client) = TestApp::start_and_connect().await;

    let bills: BillList = client
        .post("/api/v1/bills", new_bill())
        .await
        .expect("failed to create bill");

    assert_eq!(5, bills.data.len());
    let created = bills.data.last().unwrap();
    assert!(!created.id.is_empty());
    assert_eq!("encore", created.name);
    assert_eq!(BillStatus::Pending, created.status);

    let bills: BillList = client.get("/api/v1/bills").await.unwrap();
    assert_eq!(5, bills.data.len());
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn fractional_amount_is_truncated() {
    let (_app, client) = TestApp::start_and_connect().await;

    let mut bill = serde_json::to_value(new_bill()).unwrap();
    bill["amount"] = serde_json::json!(348.5);
    let bills: BillList = client
        .post("/api/v1/bills", bill)
        .await
        .expect("failed to create bill");

    assert_eq!(348, bills.data.last().unwrap().amount);
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn malformed_json_is_unprocessable() {
    let (_app, client) = TestApp::start_and_connect().await;

    let response = client
        .send_body(
            Method::POST,
            "/api/v1/bills",
            "application/json",
            r#"{"name": "encore", "amount": }"#,
        )
        .await
        .unwrap();

    assert_eq!(422, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("failure", body["result"]);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("failed to parse JSON at line 1"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn wrongly_typed_json_is_unprocessable() {
    let (_app, client) = TestApp::start_and_connect().await;

    let result = client
        .post::<Value, BillList>("/api/v1/bills", serde_json::json!({ "amount": "lots" }))
        .await;

    if let Err(TestError::RequestError(e)) = result {
        assert_eq!(422, e.status().unwrap().as_u16());
    } else {
        panic!("expected a bill with a text amount to be refused");
    }
}
