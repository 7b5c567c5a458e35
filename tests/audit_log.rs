mod common;

use common::signed_in;
use mockito::Matcher;
use opsconsole::app::AuditLogController;
use opsconsole::domain::audit::parse_bound;
use opsconsole::domain::HttpMethod;

const HISTORY: &str = "/api/logging/history/date-range";

const ONE_ENTRY: &str = r#"{"data":[{"id":"42","timestamp":"2024-03-14T10:00:00.123","apiEndpoint":"/api/tier",
    "httpMethod":"POST","userIdentifier":"ada@example.com","responseStatus":201,"requestDurationMs":7,
    "clientIp":"10.0.0.1","userAgent":"curl/8"}],"totalElements":41}"#;

fn screen(client: opsconsole::api::ApiClient) -> AuditLogController {
    AuditLogController::new(client, 20, parse_bound("2024-03-15T12:00:00").unwrap())
}

#[tokio::test]
async fn default_query_sends_only_paging_and_window() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);

    // Anchored: any extra parameter fails the match.
    let history = server
        .mock("GET", HISTORY)
        .match_query(Matcher::Regex(
            r"^page=0&size=20&startDate=2024-03-08T12(%3A|:)00(%3A|:)00&endDate=2024-03-15T12(%3A|:)00(%3A|:)00$"
                .to_string(),
        ))
        .with_header("content-type", "application/json")
        .with_body(ONE_ENTRY)
        .expect(1)
        .create_async()
        .await;

    let mut screen = screen(client);
    screen.refresh().await;

    history.assert_async().await;
    assert_eq!(screen.entries().len(), 1);
    assert_eq!(screen.total_count(), 41);
    assert_eq!(screen.page_count(), 3);
    assert!(screen.error_message().is_none());
}

#[tokio::test]
async fn filter_edits_wait_for_apply() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);

    let filtered = server
        .mock("GET", HISTORY)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "0".into()),
            Matcher::UrlEncoded("size".into(), "20".into()),
            Matcher::UrlEncoded("startDate".into(), "2024-03-01T00:00:00".into()),
            Matcher::UrlEncoded("method".into(), "POST".into()),
            Matcher::UrlEncoded("status".into(), "201".into()),
            Matcher::UrlEncoded("userIdentifier".into(), "ada@example.com".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(ONE_ENTRY)
        .expect(1)
        .create_async()
        .await;

    let mut screen = screen(client);
    screen.set_start(parse_bound("2024-03-01").unwrap());
    screen.set_method(Some(HttpMethod::Post));
    screen.set_status(Some(201));
    screen.set_user_identifier("ada@example.com");
    screen.set_endpoint("   ");

    // Nothing fetched yet, and paging still uses the old criteria.
    assert!(screen.entries().is_empty());
    assert!(screen.applied_filter().method.is_none());

    screen.apply_filters().await;

    filtered.assert_async().await;
    assert_eq!(screen.applied_filter(), screen.pending_filter());
    assert_eq!(screen.entries()[0].http_method, "POST");
}

#[tokio::test]
async fn apply_returns_to_first_page() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);

    let page_two = server
        .mock("GET", HISTORY)
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_header("content-type", "application/json")
        .with_body(ONE_ENTRY)
        .expect(1)
        .create_async()
        .await;
    let page_zero = server
        .mock("GET", HISTORY)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "0".into()),
            Matcher::UrlEncoded("endpoint".into(), "/api/tier".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(ONE_ENTRY)
        .expect(1)
        .create_async()
        .await;

    let mut screen = screen(client);
    screen.set_page(2).await;
    assert_eq!(screen.page(), 2);

    screen.set_endpoint("/api/tier");
    screen.apply_filters().await;

    page_two.assert_async().await;
    page_zero.assert_async().await;
    assert_eq!(screen.page(), 0);
}

#[tokio::test]
async fn apply_at_page_fetches_once() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);

    let first_page = server
        .mock("GET", HISTORY)
        .match_query(Matcher::UrlEncoded("page".into(), "0".into()))
        .expect(0)
        .create_async()
        .await;
    let third_page = server
        .mock("GET", HISTORY)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("userIdentifier".into(), "ada@example.com".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(ONE_ENTRY)
        .expect(1)
        .create_async()
        .await;

    let mut screen = screen(client);
    screen.set_user_identifier("ada@example.com");
    screen.apply_filters_at(2).await;

    first_page.assert_async().await;
    third_page.assert_async().await;
    assert_eq!(screen.page(), 2);
    assert_eq!(screen.entries().len(), 1);
    assert!(screen.error_message().is_none());
}

#[tokio::test]
async fn failed_fetch_sets_banner() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);
    server
        .mock("GET", HISTORY)
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let mut screen = screen(client);
    screen.refresh().await;

    assert_eq!(screen.error_message(), Some("Failed to fetch API logs"));
    assert!(!screen.is_loading());
}
