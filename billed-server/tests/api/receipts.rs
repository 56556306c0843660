use reqwest::Method;
use serde_json::Value;

use crate::TestApp;

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn uploaded_receipt_can_be_downloaded() {
    let (_app, client) = TestApp::start_and_connect().await;

    let response = client
        .send_body(
            Method::PUT,
            "/api/v1/receipts/facture.png",
            "application/octet-stream",
            &b"\x89PNG receipt"[..],
        )
        .await
        .unwrap();
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("facture.png", body["fileName"]);
    let file_url = body["fileUrl"].as_str().unwrap().to_string();
    assert!(file_url.starts_with("/receipts/"));

    let response = client.send(Method::GET, &file_url).await.unwrap();

    assert_eq!(200, response.status().as_u16());
    assert_eq!("image/png", response.headers()["content-type"]);
    assert_eq!(&b"\x89PNG receipt"[..], &response.bytes().await.unwrap()[..]);
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn receipts_in_other_formats_are_refused() {
    let (_app, client) = TestApp::start_and_connect().await;

    let response = client
        .send_body(
            Method::PUT,
            "/api/v1/receipts/image.txt",
            "application/octet-stream",
            "image.txt",
        )
        .await
        .unwrap();

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("failure", body["result"]);
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn unknown_receipt_is_not_found() {
    let (_app, client) = TestApp::start_and_connect().await;

    let response = client
        .send(Method::GET, "/receipts/missing.png")
        .await
        .unwrap();

    assert_eq!(404, response.status().as_u16());
}
