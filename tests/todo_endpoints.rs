//! Integration tests for the todo endpoints in session storage mode.

mod common;

use axum::http::StatusCode;
use rstest::{fixture, rstest};

use common::TestClient;

#[fixture]
async fn groceries() -> TestClient {
    let mut client = TestClient::new();
    client.create_list("Groceries").await.assert_redirect("/lists");
    client
}

// =============================================================================
// POST /lists/{id}/todos
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_create_todo(#[future] groceries: TestClient) {
    let mut client = groceries.await;

    let response = client.create_todo(1, "Milk").await;
    response.assert_redirect("/lists/1");

    let page = client.follow(&response).await;
    assert!(page.body.contains("The todo was added."));
    assert!(page.body.contains("<h3>Milk</h3>"));
    assert!(page.body.contains("1 / 1"));
}

#[rstest]
#[case("todo=")]
#[case("todo=++")]
#[tokio::test]
async fn test_create_todo_empty_name_rejected(
    #[future] groceries: TestClient,
    #[case] body: &str,
) {
    let mut client = groceries.await;

    let response = client.post_form("/lists/1/todos", body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .body
            .contains("Todo must be between 1 and 100 characters.")
    );
    assert!(response.body.contains("<h2>Groceries</h2>"));
}

#[rstest]
#[tokio::test]
async fn test_create_todo_too_long_keeps_draft(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    let name = "x".repeat(101);

    let response = client.create_todo(1, &name).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(&format!("value=\"{name}\"")));
}

#[rstest]
#[tokio::test]
async fn test_create_todo_missing_list() {
    let mut client = TestClient::new();

    let response = client.create_todo(4, "Milk").await;
    response.assert_redirect("/lists");

    let page = client.follow(&response).await;
    assert!(page.body.contains("The specified list was not found."));
}

// =============================================================================
// POST /lists/{id}/todos/{todo_id}
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_toggle_todo(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;

    let response = client
        .post_form("/lists/1/todos/1", "completed=true")
        .await;
    response.assert_redirect("/lists/1");

    let page = client.follow(&response).await;
    assert!(page.body.contains("The todo has been updated."));
    assert!(page.body.contains("name=\"completed\" value=\"false\""));
    assert!(page.body.contains("0 / 1"));

    client
        .post_form("/lists/1/todos/1", "completed=false")
        .await;
    let page = client.get("/lists/1").await;
    assert!(page.body.contains("1 / 1"));
}

#[rstest]
#[tokio::test]
async fn test_toggle_todo_missing_field_marks_incomplete(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;
    client.post_form("/lists/1/todos/1", "completed=true").await;

    client.post_form("/lists/1/todos/1", "").await;

    let page = client.get("/lists/1").await;
    assert!(page.body.contains("1 / 1"));
}

#[rstest]
#[tokio::test]
async fn test_grocery_list_shows_incomplete_first(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;
    client.create_todo(1, "Eggs").await;
    client.post_form("/lists/1/todos/1", "completed=true").await;

    let page = client.get("/lists/1").await;

    assert!(page.position_of("<h3>Eggs</h3>") < page.position_of("<h3>Milk</h3>"));
    assert!(page.body.contains("1 / 2"));
    assert!(!page.body.contains("id=\"todos\" class=\"complete\""));
}

// =============================================================================
// POST /lists/{id}/complete_all
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_complete_all(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;
    client.create_todo(1, "Eggs").await;

    let response = client.post_form("/lists/1/complete_all", "").await;
    response.assert_redirect("/lists/1");

    let page = client.follow(&response).await;
    assert!(page.body.contains("All todos are marked completed."));
    assert!(page.body.contains("id=\"todos\" class=\"complete\""));
    assert!(page.body.contains("0 / 2"));
}

#[rstest]
#[tokio::test]
async fn test_complete_all_on_empty_list_is_not_complete(#[future] groceries: TestClient) {
    let mut client = groceries.await;

    client.post_form("/lists/1/complete_all", "").await;

    let page = client.get("/lists/1").await;
    assert!(!page.body.contains("id=\"todos\" class=\"complete\""));
}

// =============================================================================
// POST /lists/{id}/todos/{todo_id}/destroy
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_delete_todo(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;

    let response = client.post_form("/lists/1/todos/1/destroy", "").await;
    response.assert_redirect("/lists/1");

    let page = client.follow(&response).await;
    assert!(page.body.contains("The todo has been deleted."));
    assert!(!page.body.contains("<h3>Milk</h3>"));
}

#[rstest]
#[tokio::test]
async fn test_delete_todo_ajax_returns_no_content(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;
    client.get("/lists/1").await;

    let response = client.post_ajax("/lists/1/todos/1/destroy").await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    let page = client.get("/lists/1").await;
    assert!(!page.body.contains("The todo has been deleted."));
    assert!(!page.body.contains("<h3>Milk</h3>"));
}

#[rstest]
#[tokio::test]
async fn test_todo_ids_are_scoped_to_their_list(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_list("Chores").await;
    client.create_todo(1, "Milk").await;
    client.create_todo(2, "Laundry").await;

    client.post_form("/lists/2/todos/1/destroy", "").await;

    let groceries_page = client.get("/lists/1").await;
    let chores_page = client.get("/lists/2").await;
    assert!(groceries_page.body.contains("<h3>Milk</h3>"));
    assert!(!chores_page.body.contains("<h3>Laundry</h3>"));
}

#[rstest]
#[tokio::test]
async fn test_delete_unknown_todo_is_noop(#[future] groceries: TestClient) {
    let mut client = groceries.await;
    client.create_todo(1, "Milk").await;

    client
        .post_form("/lists/1/todos/abc/destroy", "")
        .await
        .assert_redirect("/lists/1");

    let page = client.get("/lists/1").await;
    assert!(page.body.contains("<h3>Milk</h3>"));
}
