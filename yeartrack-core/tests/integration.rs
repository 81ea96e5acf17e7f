//! Integration tests for the gateway, collector and aggregator pipeline
//!
//! These tests run the real HTTP client against a `wiremock` server that
//! imitates the tracker's REST API.

use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yeartrack_core::analytics::AchievementKind;
use yeartrack_core::gateway::PAGE_SIZE;
use yeartrack_core::{
    Aggregator, Collector, Credential, Error, NoProgress, TrackerApi, TrackerClient,
};

const TOKEN: &str = "perm:test-token";
const CREATED_QUERY: &str = "created: 2025-01-01 .. 2025-12-31 created by: jane";
const RESOLVED_QUERY: &str = "resolved date: 2025-01-01 .. 2025-12-31 Assignee: jane";
const COMMENTED_QUERY: &str = "commenter: jane commented: 2025-01-01 .. 2025-12-31";

// 2025-03-01T10:00:00Z
const MARCH_FIRST_MS: i64 = 1_740_823_200_000;
const DAY_MS: i64 = 86_400_000;

fn client_for(server: &MockServer) -> TrackerClient {
    TrackerClient::new(&Credential::new(server.uri(), TOKEN)).expect("client should build")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn user_json() -> Value {
    json!({
        "id": "1-1",
        "login": "jane",
        "fullName": "Jane Doe",
        "avatarUrl": "/hub/api/rest/avatar/1-1",
        "$type": "Me"
    })
}

fn issue_json(n: usize, created_ms: i64) -> Value {
    json!({
        "id": format!("2-{}", n),
        "idReadable": format!("AL-{}", n),
        "summary": format!("Issue number {}", n),
        "created": created_ms,
        "resolved": null,
        "project": {"id": "0-1", "name": "Alpha", "shortName": "AL"},
        "customFields": []
    })
}

fn issue_page(start: usize, len: usize) -> Value {
    Value::Array((start..start + len).map(|n| issue_json(n, MARCH_FIRST_MS)).collect())
}

fn article_json(id: &str, reporter: &str, created_ms: i64) -> Value {
    json!({
        "id": id,
        "idReadable": format!("KB-A-{}", id),
        "summary": format!("Article {}", id),
        "content": "Knowledge worth sharing",
        "created": created_ms,
        "updated": created_ms,
        "reporter": {"id": "1-1", "login": reporter},
        "project": {"id": "0-9", "name": "Knowledge", "shortName": "KB"}
    })
}

async fn mount_page(server: &MockServer, query: &str, skip: usize, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/issues"))
        .and(query_param("query", query))
        .and(query_param("$skip", skip.to_string()))
        .and(query_param("$top", PAGE_SIZE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================
// Gateway
// ============================================

#[tokio::test]
async fn test_pagination_stops_on_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, CREATED_QUERY, 0, issue_page(0, 100)).await;
    mount_page(&server, CREATED_QUERY, 100, issue_page(100, 100)).await;
    mount_page(&server, CREATED_QUERY, 200, issue_page(200, 37)).await;

    let client = client_for(&server);
    let issues = client
        .get_issues_created_by("jane", date(2025, 1, 1), date(2025, 12, 31), &|_| {})
        .await
        .unwrap();

    assert_eq!(issues.len(), 237);
    assert_eq!(issues[0].human_readable_id, "AL-0");
    assert_eq!(issues[236].human_readable_id, "AL-236");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_requests_carry_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server).get_current_user().await.unwrap();

    assert_eq!(user.login, "jane");
    assert_eq!(user.display_name(), "Jane Doe");
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_current_user().await.unwrap_err();

    assert!(err.is_auth());
    assert!(matches!(err, Error::Auth { status: 401, .. }));
}

#[tokio::test]
async fn test_server_error_maps_to_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_current_user().await.unwrap_err();

    match err {
        Error::Protocol { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database on fire");
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_shape_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_current_user().await.unwrap_err();

    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_transport_error() {
    // Reserve a port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = TrackerClient::new(&Credential::new(uri, TOKEN)).unwrap();
    let err = client.get_current_user().await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_get_projects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/projects"))
        .and(query_param("$top", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "0-1", "name": "Alpha", "shortName": "AL"},
            {"id": "0-9", "name": "Knowledge", "shortName": "KB"}
        ])))
        .mount(&server)
        .await;

    let projects = client_for(&server).get_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].short_name, "KB");
}

// ============================================
// End to end
// ============================================

/// Mount a tracker where `jane` created 25 issues, resolved 2, commented
/// on one issue and owns articles in projects A and C (B is forbidden).
async fn mount_tracker(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(server)
        .await;

    // One created issue per day, March 1-25
    let mut created: Vec<Value> = (0..25)
        .map(|n| issue_json(n, MARCH_FIRST_MS + n as i64 * DAY_MS))
        .collect();
    created[0]["resolved"] = json!(MARCH_FIRST_MS + 2 * DAY_MS);
    mount_page(server, CREATED_QUERY, 0, Value::Array(created)).await;

    let mut resolved = vec![issue_json(0, MARCH_FIRST_MS), issue_json(1, MARCH_FIRST_MS)];
    resolved[0]["resolved"] = json!(MARCH_FIRST_MS + 2 * DAY_MS);
    mount_page(server, RESOLVED_QUERY, 0, Value::Array(resolved)).await;

    let mut commented = issue_json(7, MARCH_FIRST_MS);
    commented["comments"] = json!([
        {"id": "4-1", "text": "Mine, in range", "created": MARCH_FIRST_MS + DAY_MS,
         "author": {"id": "1-1", "login": "jane"}},
        {"id": "4-2", "text": "Someone else", "created": MARCH_FIRST_MS,
         "author": {"id": "1-2", "login": "bob"}},
        // 2026-01-01T00:00:00Z, outside the window
        {"id": "4-3", "text": "Mine, next year", "created": 1_767_225_600_000i64,
         "author": {"id": "1-1", "login": "jane"}}
    ]);
    mount_page(server, COMMENTED_QUERY, 0, json!([commented])).await;

    for (project, status, body) in [
        ("A", 200u16, json!([article_json("a1", "jane", MARCH_FIRST_MS)])),
        ("B", 403, json!({"error": "forbidden"})),
        (
            "C",
            200,
            json!([
                article_json("c1", "jane", MARCH_FIRST_MS),
                article_json("c2", "bob", MARCH_FIRST_MS)
            ]),
        ),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/api/admin/projects/{}/articles", project)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_collect_and_aggregate_year() {
    yeartrack_core::logging::init_test();
    let server = MockServer::start().await;
    mount_tracker(&server).await;

    let client = client_for(&server);
    let projects: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    let dataset = Collector::new(&client)
        .collect_year_data(2025, &projects, &NoProgress)
        .await
        .unwrap();

    assert_eq!(dataset.user.login, "jane");
    assert_eq!(dataset.created_issues.len(), 25);
    assert_eq!(dataset.resolved_issues.len(), 2);
    assert_eq!(dataset.comments.len(), 1);
    assert_eq!(dataset.comments[0].issue.human_readable_id, "AL-7");

    let article_ids: Vec<_> = dataset.articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(article_ids, vec!["a1", "c1"]);

    let report = Aggregator::utc().calculate_all(&dataset);

    assert_eq!(report.summary.total_contributions, 25 + 2 + 1 + 2);
    assert_eq!(report.issue_stats.avg_resolution_days, 2);
    assert_eq!(report.time_stats.longest_streak.days, 25);
    assert_eq!(
        report.time_stats.longest_streak.start_date,
        Some(date(2025, 3, 1))
    );

    let top = report.project_stats.top_project.as_ref().unwrap();
    assert_eq!(top.name, "Alpha");
    assert_eq!(top.total_activity, 25 + 2 + 1);

    let kinds: Vec<_> = report.achievements.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AchievementKind::IssuesCreated,
            AchievementKind::Streak
        ]
    );
}

#[tokio::test]
async fn test_collection_fails_when_a_search_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;
    mount_page(&server, CREATED_QUERY, 0, json!([])).await;
    mount_page(&server, COMMENTED_QUERY, 0, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/issues"))
        .and(query_param("query", RESOLVED_QUERY))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Collector::new(&client)
        .collect_year_data(2025, &[], &NoProgress)
        .await;

    assert!(matches!(result, Err(Error::Protocol { status: 502, .. })));
}
