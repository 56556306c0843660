use billed_core::{BillList, BillStatus, Route};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::ui::{has_class, tag};
use crate::{assert_redirect, TestApp, EMPLOYEE_EMAIL};

fn fields() -> Form {
    Form::new()
        .text("type", "Transports")
        .text("name", "Vol Paris Londres")
        .text("date", "2022-05-12")
        .text("amount", "348")
        .text("vat", "70")
        .text("pct", "")
        .text("commentary", "séminaire")
}

fn form(file_name: &str) -> Form {
    fields().part(
        "file",
        Part::bytes(file_name.as_bytes().to_vec()).file_name(file_name.to_string()),
    )
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn form_is_rendered_with_hidden_error() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let html = client.get_string(Route::NewBill.path()).await.unwrap();

    assert!(tag(&html, "form-new-bill").is_some());
    assert!(tag(&html, "file").is_some());
    assert!(tag(&html, "submit-btn").is_some());
    assert!(!has_class(&html, "error-msg", "visible"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn valid_submission_creates_bill_and_returns_to_bills() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let response = client
        .send_multipart(Route::NewBill.path(), form("image.png"))
        .await
        .unwrap();
    assert_redirect(&response, Route::Bills.path());

    let bills: BillList = client.get("/api/v1/bills").await.unwrap();
    assert_eq!(5, bills.data.len());
    let created = bills.data.last().unwrap();
    assert_eq!(EMPLOYEE_EMAIL, created.email);
    assert_eq!(BillStatus::Pending, created.status);
    assert_eq!(348, created.amount);
    assert_eq!(20, created.pct);
    assert_eq!(Some("image.png".to_string()), created.file_name);

    let html = client.get_string(Route::Bills.path()).await.unwrap();
    assert_eq!(5, html.matches(r#"data-testid="icon-eye""#).count());
    assert!(html.contains("12 Mai. 22"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn submission_without_receipt_creates_bill_and_returns_to_bills() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let response = client
        .send_multipart(Route::NewBill.path(), fields())
        .await
        .unwrap();
    assert_redirect(&response, Route::Bills.path());

    let bills: BillList = client.get("/api/v1/bills").await.unwrap();
    assert_eq!(5, bills.data.len());
    let created = bills.data.last().unwrap();
    assert_eq!("Vol Paris Londres", created.name);
    assert!(created.file_name.is_none());
    assert!(created.file_url.is_none());
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn wrong_receipt_format_shows_error() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let response = client
        .send_multipart(Route::NewBill.path(), form("image.txt"))
        .await
        .unwrap();

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(has_class(&html, "error-msg", "visible"));

    let bills: BillList = client.get("/api/v1/bills").await.unwrap();
    assert_eq!(4, bills.data.len());
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn submission_without_session_goes_to_login() {
    let (_app, client) = TestApp::start_and_connect().await;

    let response = client
        .send_multipart(Route::NewBill.path(), form("image.png"))
        .await
        .unwrap();

    assert_redirect(&response, Route::Login.path());
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn store_errors_are_shown() {
    for status in [404u16, 500] {
        let store = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path_regex("^/api/v1/receipts/.+$"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&store)
            .await;
        let app = TestApp::start_with_store(&store.uri()).await;
        let client = app.connect().await.unwrap();
        client.login(EMPLOYEE_EMAIL).await.unwrap();

        let response = client
            .send_multipart(Route::NewBill.path(), form("image.jpg"))
            .await
            .unwrap();

        assert_eq!(200, response.status().as_u16());
        let html = response.text().await.unwrap();
        assert!(tag(&html, "error-message").is_some());
        assert!(html.contains(&format!("Erreur {}", status)));
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn create_errors_are_shown() {
    for status in [404u16, 500] {
        let store = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path_regex("^/api/v1/receipts/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "fileName": "image.jpg",
                "fileUrl": "/receipts/abc.jpg"
            })))
            .expect(1)
            .mount(&store)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/bills"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&store)
            .await;
        let app = TestApp::start_with_store(&store.uri()).await;
        let client = app.connect().await.unwrap();
        client.login(EMPLOYEE_EMAIL).await.unwrap();

        let response = client
            .send_multipart(Route::NewBill.path(), form("image.jpg"))
            .await
            .unwrap();

        assert_eq!(200, response.status().as_u16());
        let html = response.text().await.unwrap();
        assert!(tag(&html, "error-message").is_some());
        assert!(html.contains(&format!("Erreur {}", status)));
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn receipts_uploaded_to_remote_store_are_served_by_it() {
    let store = TestApp::start().await;
    store.connect().await.unwrap();
    let app = TestApp::start_with_store(store.url().as_str()).await;
    let client = app.connect().await.unwrap();
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let response = client
        .send_multipart(Route::NewBill.path(), form("image.png"))
        .await
        .unwrap();
    assert_redirect(&response, Route::Bills.path());

    let bills: BillList = client.get("/api/v1/bills").await.unwrap();
    let created = bills.data.last().unwrap();
    let file_url = created.file_url.clone().unwrap();
    assert!(file_url.starts_with(&store.url().join("/receipts/").unwrap().to_string()));

    let html = client
        .get_string(&format!("/employee/bills/receipt/{}", created.id))
        .await
        .unwrap();
    assert!(html.contains(&format!(r#"src="{}""#, file_url)));

    let response = client.send(Method::GET, &file_url).await.unwrap();
    assert_eq!(200, response.status().as_u16());
    assert_eq!(&b"image.png"[..], &response.bytes().await.unwrap()[..]);
}
