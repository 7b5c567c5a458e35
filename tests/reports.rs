mod common;

use common::{list_query, signed_in};
use mockito::Matcher;
use opsconsole::api::reports::{CumulativeSalary, DepartmentAnalysis, EmployeeRanking};
use opsconsole::app::{EntityCounts, OverviewController, ReportController};
use opsconsole::ui::viewmodel::report_view;
use rust_decimal::Decimal;

#[tokio::test]
async fn empty_report_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);
    let report = server
        .mock("GET", "/api/employee/cumulative-salary")
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let mut screen = ReportController::<CumulativeSalary>::new(client);
    screen.mount().await;
    screen.mount().await;

    report.assert_async().await;
    assert!(screen.rows().is_empty());
    assert!(screen.error_message().is_none());

    let view = report_view(&screen);
    assert_eq!(view.title, "Cumulative Salary Analysis");
    assert!(view.banner.is_none());
}

#[tokio::test]
async fn ranking_rows_are_parsed() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);
    server
        .mock("GET", "/api/employee/employee-ranking")
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"locationName":"New York","departmentName":"Engineering","employeeName":"Grace Hopper",
                "position":"Senior","salary":9000.5,"rank":"1","salaryGap":0}]"#,
        )
        .create_async()
        .await;

    let mut screen = ReportController::<EmployeeRanking>::new(client);
    screen.mount().await;

    assert_eq!(screen.rows().len(), 1);
    assert_eq!(screen.rows()[0].salary, Some(Decimal::new(90005, 1)));
    assert_eq!(screen.rows()[0].rank, "1");
}

#[tokio::test]
async fn report_failure_shows_its_banner() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);
    server
        .mock("GET", "/api/employee/department-analysis")
        .with_status(500)
        .create_async()
        .await;

    let mut screen = ReportController::<DepartmentAnalysis>::new(client);
    screen.mount().await;

    assert_eq!(screen.error_message(), Some("Failed to fetch department analysis data"));
    assert!(screen.rows().is_empty());
    assert!(!screen.is_loading());
}

async fn total_mock(server: &mut mockito::ServerGuard, path: &str, total: u64) -> mockito::Mock {
    server
        .mock("GET", path)
        .match_query(list_query(0, 1))
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"data":[],"totalElements":{total}}}"#))
        .create_async()
        .await
}

#[tokio::test]
async fn overview_counts_every_entity() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);
    total_mock(&mut server, "/api/employee", 120).await;
    total_mock(&mut server, "/api/department", 8).await;
    total_mock(&mut server, "/api/location", 3).await;
    total_mock(&mut server, "/api/tier", 4).await;

    let mut overview = OverviewController::new(client);
    overview.refresh().await;

    assert_eq!(
        overview.counts(),
        EntityCounts {
            employees: 120,
            departments: 8,
            locations: 3,
            tiers: 4,
        }
    );
    assert!(overview.error_message().is_none());
}

#[tokio::test]
async fn overview_failure_keeps_previous_counts() {
    let mut server = mockito::Server::new_async().await;
    let (client, _, _) = signed_in(&server);
    total_mock(&mut server, "/api/employee", 120).await;
    total_mock(&mut server, "/api/department", 8).await;
    total_mock(&mut server, "/api/location", 3).await;
    server
        .mock("GET", "/api/tier")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let mut overview = OverviewController::new(client);
    overview.refresh().await;

    assert_eq!(overview.counts(), EntityCounts::default());
    assert_eq!(overview.error_message(), Some("Failed to fetch dashboard statistics"));
}
