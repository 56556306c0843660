use billed_core::Route;
use regex::Regex;
use reqwest::Method;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::ui::{has_class, tag};
use crate::{assert_redirect, TestApp, EMPLOYEE_EMAIL};

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn bills_page_highlights_bill_icon() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let html = client.get_string(Route::Bills.path()).await.unwrap();

    assert!(has_class(&html, "icon-window", "active-icon"));
    assert!(!has_class(&html, "icon-mail", "active-icon"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn bills_are_listed_latest_first() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let html = client.get_string(Route::Bills.path()).await.unwrap();

    let date = Regex::new(r"<td>(\d{1,2} [^ <]+\. \d{2})</td>").unwrap();
    let dates: Vec<&str> = date
        .captures_iter(&html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    assert_eq!(vec!["4 Avr. 04", "3 Mar. 03", "2 Fév. 02", "1 Jan. 01"], dates);
    assert!(html.contains("En attente"));
    assert!(html.contains("400 €"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn other_employees_see_no_fixture_bills() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login("b@b").await.unwrap();

    let html = client.get_string(Route::Bills.path()).await.unwrap();

    assert!(tag(&html, "tbody").is_some());
    assert!(tag(&html, "icon-eye").is_none());
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn new_bill_button_opens_form() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();
    let html = client.get_string(Route::Bills.path()).await.unwrap();
    let button = tag(&html, "btn-new-bill").unwrap();
    let href = Regex::new(r#"href="([^"]+)""#).unwrap().captures(&button).unwrap()[1].to_string();

    let response = client.send(Method::GET, &href).await.unwrap();
    let location = assert_redirect(&response, Route::NewBill.path());

    let html = client.get_string(location).await.unwrap();
    assert!(html.contains("Envoyer une note de frais"));
    assert!(has_class(&html, "icon-mail", "active-icon"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn eye_icon_opens_receipt_modal() {
    let (_app, client) = TestApp::start_and_connect().await;
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let html = client
        .get_string("/employee/bills/receipt/47qAXb6fIm2zOKkLzMro")
        .await
        .unwrap();

    assert!(has_class(&html, "modaleFile", "show"));
    assert!(html.contains("preview-facture-free-201801-pdf-1.jpg"));
    assert!(html.contains(r#"<img width="100%" src="https://firebasestorage.googleapis.com/"#));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn store_errors_are_shown() {
    for status in [404u16, 500] {
        let store = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/bills"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&store)
            .await;
        let app = TestApp::start_with_store(&store.uri()).await;
        let client = app.connect().await.unwrap();
        client.login(EMPLOYEE_EMAIL).await.unwrap();

        let html = client.get_string(Route::Bills.path()).await.unwrap();

        assert!(tag(&html, "error-message").is_some());
        assert!(html.contains(&format!("Erreur {}", status)));
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn bills_are_read_from_remote_store() {
    let store = TestApp::start().await;
    store.connect().await.unwrap();
    let app = TestApp::start_with_store(store.url().as_str()).await;
    let client = app.connect().await.unwrap();
    client.login(EMPLOYEE_EMAIL).await.unwrap();

    let html = client.get_string(Route::Bills.path()).await.unwrap();

    assert_eq!(4, html.matches(r#"data-testid="icon-eye""#).count());
}
