//! End-to-end session flows against a mock server
//!
//! These exercise the fire-and-refresh contract over real HTTP: each user
//! action issues its call and is followed by exactly one collection fetch
//! and one analytics fetch, in that order.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use todo_manager_rust::gateway::HttpGateway;
use todo_manager_rust::model::{Category, TodoId};
use todo_manager_rust::session::Session;
use todo_manager_rust::store::FilterCriteria;

fn todo_json(id: i64, title: &str, category: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "priority": "LOW",
        "category": category,
        "expiryDate": null,
        "isCompleted": completed,
        "createdAt": "2025-05-01T08:30:00Z",
        "updatedAt": null
    })
}

fn session_for(server: &MockServer) -> Session<HttpGateway> {
    let gateway = HttpGateway::new(&format!("{}/todos", server.uri())).expect("valid base");
    Session::new(gateway)
}

async fn mount_analytics(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/todos/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalTasks": 0,
            "completedTasks": 0,
            "pendingTasks": 0,
            "expiredTasks": 0
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn accepted_create_issues_exactly_one_create_and_one_refresh_of_each() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/todos/addTodo"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/todos/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalTasks": 1,
            "completedTasks": 0,
            "pendingTasks": 1,
            "expiredTasks": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.open_form();
    session.draft_mut().title = "Call dentist".to_string();
    session.submit_draft().await;

    assert_eq!(session.analytics().unwrap().total_tasks, 1);
    // Mock expectations (exactly one call each) are verified on drop
}

#[tokio::test]
async fn blank_title_submit_issues_no_requests_at_all() {
    let server = MockServer::start().await;

    let mut session = session_for(&server);
    session.open_form();
    session.draft_mut().title = String::new();
    session.submit_draft().await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn toggling_an_incomplete_item_hits_the_mark_completed_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([todo_json(1, "A", "WORK", false)])),
        )
        .expect(2) // initial load + post-toggle refresh
        .mount(&server)
        .await;
    mount_analytics(&server).await;
    Mock::given(method("PUT"))
        .and(path("/todos/markAsCompleted/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.refresh().await;
    session.toggle_completion(TodoId::new(1)).await;
}

#[tokio::test]
async fn toggling_a_completed_item_hits_the_mark_uncompleted_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([todo_json(1, "A", "WORK", true)])),
        )
        .expect(2)
        .mount(&server)
        .await;
    mount_analytics(&server).await;
    Mock::given(method("PUT"))
        .and(path("/todos/markAsUncompleted/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.refresh().await;
    session.toggle_completion(TodoId::new(1)).await;
}

#[tokio::test]
async fn declined_delete_all_confirmation_issues_zero_requests() {
    let server = MockServer::start().await;

    let mut session = session_for(&server);
    session.delete_all(false).await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_the_last_good_collection() {
    let server = MockServer::start().await;
    // First load succeeds, everything after that breaks
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([todo_json(1, "A", "WORK", false)])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
        .mount(&server)
        .await;
    mount_analytics(&server).await;

    let mut session = session_for(&server);
    session.refresh().await;
    assert_eq!(session.store().len(), 1);

    session.refresh().await;
    assert_eq!(session.store().len(), 1, "stale-but-consistent on failure");
    assert_eq!(session.store().get(TodoId::new(1)).unwrap().title, "A");
}

#[tokio::test]
async fn filtering_narrows_the_loaded_collection_without_network_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            todo_json(1, "A", "WORK", false),
            todo_json(2, "B", "HOME", false)
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_analytics(&server).await;

    let mut session = session_for(&server);
    session.refresh().await;
    let loaded = server.received_requests().await.unwrap().len();

    session.set_filter(FilterCriteria::category(Category::Work));
    let visible: Vec<&str> = session.visible().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(visible, vec!["A"]);

    session.clear_filter();
    let visible: Vec<&str> = session.visible().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(visible, vec!["A", "B"]);

    assert_eq!(server.received_requests().await.unwrap().len(), loaded);
}
