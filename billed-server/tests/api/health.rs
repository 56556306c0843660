use crate::TestApp;

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn health_check() {
    let (_, client) = TestApp::start_and_connect().await;

    let response = client
        .get_string("/health")
        .await
        .expect("failed to perform health check");

    assert_eq!("UP", response);
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
pub async fn unknown_paths_are_json_not_found() {
    let (_, client) = TestApp::start_and_connect().await;

    let response = client
        .send(reqwest::Method::GET, "/admin/dashboard")
        .await
        .unwrap();

    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("failure", body["result"]);
    assert_eq!("not found", body["message"]);
}
