//! Tests for the work order endpoints.

use super::work_orders::{
    WorkOrderAppointment, WorkOrderFields, WorkOrderPriority, WorkOrderQuery, WorkOrderStatus,
    WorkOrderUpdate, WorkOrders,
};
use crate::connector::ResManError;
use crate::test_support::{MockClient, TestConnector, body_of, connector, query_of};
use crate::time::FixedClock;
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use serde_json::{Value, json};
use std::sync::Arc;

/// 2024-06-01 15:00 UTC.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(now().into())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn work_order() -> Value {
    json!({
        "workOrderId": "wo1",
        "propertyId": "p1",
        "number": 1042,
        "description": "Leaky faucet",
        "category": "Plumbing",
        "categoryId": "c1",
        "isMakeReady": false,
        "appointment": "Permission Given",
        "status": "In Progress",
        "priority": "High",
        "cost": 0,
        "location": { "id": "l1", "name": "Unit 4B", "type": "Unit" },
        "lastModified": "2024-05-30T10:00:00Z"
    })
}

async fn rejected(
    mock: &Arc<MockClient>,
    connector: &TestConnector,
    query: WorkOrderQuery,
) -> String {
    let clock = clock();
    let error = WorkOrders::new(connector, &clock)
        .get_work_orders(&query)
        .await
        .unwrap_err();

    assert_eq!(mock.calls(), 0, "validation must run before any request");
    match error {
        ResManError::InvalidArgument(message) => message,
        other => panic!("unexpected error: {other}"),
    }
}

mod get_work_orders {
    use super::*;

    #[tokio::test]
    async fn sends_all_filters() {
        let mock = Arc::new(MockClient::ok(&json!({ "workOrders": [work_order()] })));
        let connector = connector(&mock);
        let clock = clock();
        let query = WorkOrderQuery::new("p1")
            .modified_since(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap())
            .assigned_to("per9")
            .between(date(2024, 5, 1), date(2024, 5, 31))
            .with_statuses([WorkOrderStatus::NotStarted, WorkOrderStatus::OnHold])
            .number(1042);

        let orders = WorkOrders::new(&connector, &clock)
            .get_work_orders(&query)
            .await
            .unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, WorkOrderStatus::InProgress);
        assert_eq!(orders[0].appointment, WorkOrderAppointment::PermissionGiven);
        assert_eq!(orders[0].location.as_ref().unwrap().location_type, "Unit");

        let req = mock.last_request();
        assert_eq!(req.url.path(), "/WorkOrders");
        assert_eq!(
            query_of(&req),
            vec![
                ("propertyId".to_string(), "p1".to_string()),
                (
                    "modifiedSince".to_string(),
                    "Wed, 01 May 2024 08:30:00 GMT".to_string()
                ),
                ("assignedToPersonId".to_string(), "per9".to_string()),
                ("startDate".to_string(), "2024-05-01".to_string()),
                ("endDate".to_string(), "2024-05-31".to_string()),
                ("statuses".to_string(), "Not Started,On Hold".to_string()),
                ("workOrderNumber".to_string(), "1042".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn sends_only_property_when_unfiltered() {
        let mock = Arc::new(MockClient::ok(&json!({ "workOrders": [] })));
        let connector = connector(&mock);
        let clock = clock();

        let orders = WorkOrders::new(&connector, &clock)
            .get_work_orders(&WorkOrderQuery::new("p1"))
            .await
            .unwrap();

        assert!(orders.is_empty());
        assert_eq!(
            query_of(&mock.last_request()),
            vec![("propertyId".to_string(), "p1".to_string())]
        );
    }

    #[tokio::test]
    async fn rejects_modified_since_today() {
        let mock = Arc::new(MockClient::default());
        let connector = connector(&mock);
        let query = WorkOrderQuery::new("p1").modified_since(now() - TimeDelta::hours(1));

        assert_eq!(
            rejected(&mock, &connector, query).await,
            "Modified since must be in the past"
        );
    }

    #[tokio::test]
    async fn rejects_modified_since_older_than_a_year() {
        let mock = Arc::new(MockClient::default());
        let connector = connector(&mock);
        let query = WorkOrderQuery::new("p1").modified_since(now() - TimeDelta::days(400));

        assert_eq!(
            rejected(&mock, &connector, query).await,
            "Modified since date cannot be more than one year ago"
        );
    }

    #[tokio::test]
    async fn rejects_half_open_range() {
        let mock = Arc::new(MockClient::default());
        let connector = connector(&mock);
        let query = WorkOrderQuery {
            start_date: Some(date(2024, 5, 1)),
            ..WorkOrderQuery::new("p1")
        };

        assert_eq!(
            rejected(&mock, &connector, query).await,
            "endDate is required if startDate is provided"
        );
    }

    #[tokio::test]
    async fn rejects_reversed_range() {
        let mock = Arc::new(MockClient::default());
        let connector = connector(&mock);
        let query = WorkOrderQuery::new("p1").between(date(2024, 5, 31), date(2024, 5, 1));

        assert_eq!(
            rejected(&mock, &connector, query).await,
            "startDate must be before endDate"
        );
    }

    #[tokio::test]
    async fn rejects_future_end() {
        let mock = Arc::new(MockClient::default());
        let connector = connector(&mock);
        let query = WorkOrderQuery::new("p1").between(date(2024, 5, 1), date(2024, 6, 2));

        assert_eq!(
            rejected(&mock, &connector, query).await,
            "endDate cannot be in the future"
        );
    }
}

mod writes {
    use super::*;

    #[tokio::test]
    async fn add_work_order_posts_only_set_fields() {
        let mock = Arc::new(MockClient::ok(
            &json!({ "workOrderId": "wo9", "number": 7, "propertyId": "p1" }),
        ));
        let connector = connector(&mock);
        let clock = clock();
        let fields = WorkOrderFields {
            description: Some("Replace filter".to_string()),
            priority: Some(WorkOrderPriority::Low),
            reported_date: Some(Utc.with_ymd_and_hms(2024, 5, 30, 12, 0, 0).unwrap()),
            areas: Some(vec!["Kitchen".to_string()]),
            ..WorkOrderFields::new("p1")
        };

        let receipt = WorkOrders::new(&connector, &clock)
            .add_work_order(&fields)
            .await
            .unwrap();

        assert_eq!(receipt.work_order_id, "wo9");
        assert_eq!(receipt.number, 7);
        let req = mock.last_request();
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(
            body_of(&req),
            json!({
                "propertyId": "p1",
                "description": "Replace filter",
                "priority": "Low",
                "reportedDate": "2024-05-30T12:00:00Z",
                "areas": ["Kitchen"]
            })
        );
    }

    #[tokio::test]
    async fn update_work_order_puts_id_with_fields() {
        let mock = Arc::new(MockClient::ok(
            &json!({ "workOrderId": "wo1", "number": 1042, "propertyId": "p1" }),
        ));
        let connector = connector(&mock);
        let clock = clock();
        let update = WorkOrderUpdate {
            work_order_id: "wo1".to_string(),
            fields: WorkOrderFields {
                status: Some(WorkOrderStatus::Completed),
                completed_notes: Some("Done".to_string()),
                ..WorkOrderFields::new("p1")
            },
        };

        let receipt = WorkOrders::new(&connector, &clock)
            .update_work_order(&update)
            .await
            .unwrap();

        assert_eq!(receipt.number, 1042);
        let req = mock.last_request();
        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(
            body_of(&req),
            json!({
                "workOrderId": "wo1",
                "propertyId": "p1",
                "status": "Completed",
                "completedNotes": "Done"
            })
        );
    }

    #[tokio::test]
    async fn api_rejection_carries_details() {
        let mock = Arc::new(MockClient::json(
            400,
            &json!({ "message": "categoryId is invalid", "code": "INVALID_CATEGORY" }),
        ));
        let connector = connector(&mock);
        let clock = clock();

        let error = WorkOrders::new(&connector, &clock)
            .add_work_order(&WorkOrderFields::new("p1"))
            .await
            .unwrap_err();

        let api = error.as_api_error().unwrap();
        assert_eq!(api.message, "categoryId is invalid");
        assert_eq!(api.code.as_deref(), Some("INVALID_CATEGORY"));
        assert_eq!(mock.calls(), 1);
    }
}

mod lookups {
    use super::*;

    #[tokio::test]
    async fn areas_are_plain_strings() {
        let mock = Arc::new(MockClient::ok(&json!({ "areas": ["Kitchen", "Bath"] })));
        let connector = connector(&mock);
        let clock = clock();

        let areas = WorkOrders::new(&connector, &clock)
            .get_work_order_areas("p1")
            .await
            .unwrap();

        assert_eq!(areas, vec!["Kitchen", "Bath"]);
        let req = mock.last_request();
        assert_eq!(req.url.path(), "/WorkOrders/Areas");
        assert_eq!(
            query_of(&req),
            vec![("propertyId".to_string(), "p1".to_string())]
        );
    }

    #[tokio::test]
    async fn categories_are_typed() {
        let mock = Arc::new(MockClient::ok(
            &json!({ "categories": [{ "categoryId": "c1", "name": "Plumbing" }] }),
        ));
        let connector = connector(&mock);
        let clock = clock();

        let categories = WorkOrders::new(&connector, &clock)
            .get_work_order_categories("p1")
            .await
            .unwrap();

        assert_eq!(categories[0].name, "Plumbing");
        assert_eq!(mock.last_request().url.path(), "/WorkOrders/Categories");
    }

    #[tokio::test]
    async fn locations_are_typed() {
        let mock = Arc::new(MockClient::ok(&json!({
            "locations": [{ "locationId": "l1", "name": "Unit 4B", "type": "Unit" }]
        })));
        let connector = connector(&mock);
        let clock = clock();

        let locations = WorkOrders::new(&connector, &clock)
            .get_work_order_locations("p1")
            .await
            .unwrap();

        assert_eq!(locations[0].location_id, "l1");
        assert_eq!(mock.last_request().url.path(), "/WorkOrders/Locations");
    }
}

#[test]
fn status_wire_names_match_serde() {
    let all = [
        WorkOrderStatus::Submitted,
        WorkOrderStatus::NotStarted,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Scheduled,
        WorkOrderStatus::Cancelled,
        WorkOrderStatus::Closed,
        WorkOrderStatus::OnHold,
    ];

    for status in all {
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            json!(status.as_str())
        );
    }
}
