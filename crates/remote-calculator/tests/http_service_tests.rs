//! HTTP service integration tests against a mock backend

use chrono::Utc;
use httpmock::prelude::*;
use serde_json::json;

use remote_calculator::prelude::*;

fn service_for(server: &MockServer) -> HttpArithmeticService {
    let config = ClientConfig::new().with_base_url(&server.base_url());
    HttpArithmeticService::new(&config).unwrap()
}

// =============================================================================
// Calculation requests
// =============================================================================

#[tokio::test]
async fn calculate_sends_operands_as_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/add")
            .query_param("operand1", "12")
            .query_param("operand2", "3");
        then.status(200).json_body(json!({"result": 15}));
    });

    let result = service_for(&server)
        .calculate(Operation::Add, 12.0, 3.0)
        .await
        .unwrap();

    assert_eq!(result, 15.0);
    mock.assert();
}

#[tokio::test]
async fn every_operation_hits_its_own_path() {
    let server = MockServer::start();
    let service = service_for(&server);

    for op in Operation::ALL {
        let mock = server.mock(|when, then| {
            when.method(GET).path(format!("/{}", op.path()));
            then.status(200).json_body(json!({"result": 1}));
        });
        service.calculate(op, 2.0, 1.0).await.unwrap();
        mock.assert_calls(1);
    }
}

#[tokio::test]
async fn fractional_and_nan_operands_are_sent_as_text() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/divide")
            .query_param("operand1", "1.5")
            .query_param("operand2", "NaN");
        then.status(200).json_body(json!({"result": null}));
    });

    // A null result does not decode as a number
    let err = service_for(&server)
        .calculate(Operation::Divide, 1.5, f64::NAN)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Decode(_)));
    mock.assert();
}

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/multiply")
            .header("authorization", "Bearer secret-token");
        then.status(200).json_body(json!({"result": 42}));
    });

    let config = ClientConfig::new()
        .with_base_url(&server.base_url())
        .with_token("secret-token");
    let service = HttpArithmeticService::new(&config).unwrap();

    assert_eq!(
        service.calculate(Operation::Multiply, 6.0, 7.0).await.unwrap(),
        42.0
    );
    mock.assert();
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/divide");
        then.status(400).body("Division by zero\n");
    });

    let err = service_for(&server)
        .calculate(Operation::Divide, 1.0, 0.0)
        .await
        .unwrap_err();

    match err {
        ServiceError::Status { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "Division by zero");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/power");
        then.status(200).body("not json");
    });

    let err = service_for(&server)
        .calculate(Operation::Power, 2.0, 3.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let config = ClientConfig::new().with_base_url("http://127.0.0.1:1");
    let service = HttpArithmeticService::new(&config).unwrap();
    let err = service
        .calculate(Operation::Add, 1.0, 1.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Http(_)));
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/add");
        then.status(200).json_body(json!({"result": 2}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/subtract");
        then.status(200).json_body(json!({"result": 0}));
    });

    let service = service_for(&server);
    let (sum, difference) = futures::join!(
        service.calculate(Operation::Add, 1.0, 1.0),
        service.calculate(Operation::Subtract, 1.0, 1.0),
    );
    assert_eq!(sum.unwrap(), 2.0);
    assert_eq!(difference.unwrap(), 0.0);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn history_records_are_decoded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/history");
        then.status(200).json_body(json!([
            {
                "Timestamp": "2024-03-01T14:05:00Z",
                "Operation": "Add",
                "Operand1": 3,
                "Operand2": 4,
                "Result": 7
            },
            {
                "Timestamp": "garbage",
                "Operation": "Sqrt",
                "Operand1": 9,
                "Operand2": 0,
                "Result": 3
            }
        ]));
    });

    let entries = service_for(&server).history().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].display(&Utc), "1/3/24 14.05: 3 + 4 = 7");
    assert_eq!(entries[1].display(&Utc), "Invalid Date: 9  0 = 3");
}

#[tokio::test]
async fn null_history_is_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/history");
        then.status(200).body("null");
    });

    assert!(service_for(&server).history().await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_history_posts() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/history/reset")
            .header("authorization", "Bearer t");
        then.status(204);
    });

    let config = ClientConfig::new()
        .with_base_url(&server.base_url())
        .with_token("t");
    HttpArithmeticService::new(&config)
        .unwrap()
        .reset_history()
        .await
        .unwrap();
    mock.assert();
}

// =============================================================================
// Full page against the mock backend
// =============================================================================

#[tokio::test]
async fn page_calculates_and_shows_history() {
    let server = MockServer::start();
    let calc = server.mock(|when, then| {
        when.method(GET)
            .path("/add")
            .query_param("operand1", "12")
            .query_param("operand2", "3");
        then.status(200).json_body(json!({"result": 15}));
    });
    let history = server.mock(|when, then| {
        when.method(GET).path("/history");
        then.status(200).json_body(json!([{
            "Timestamp": "2024-03-01T14:05:00Z",
            "Operation": "Add",
            "Operand1": 12,
            "Operand2": 3,
            "Result": 15
        }]));
    });

    let mut page = UiDriver::with_zone(service_for(&server), Utc);
    for id in ["btn-1", "btn-2", "btn-add", "btn-3", "btn-equals"] {
        page.click(id).await;
    }
    assert_eq!(page.display_text(), "15");

    page.click("historyButton").await;
    assert!(page.is_history_visible());
    assert_eq!(page.history_items(), vec!["1/3/24 14.05: 12 + 3 = 15"]);

    calc.assert_calls(1);
    history.assert_calls(1);
}

#[tokio::test]
async fn page_shows_error_and_keeps_operands() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/divide");
        then.status(500);
    });

    let mut page = UiDriver::with_zone(service_for(&server), Utc);
    for key in ["8", "/", "0", "Enter"] {
        page.press_key(key).await;
    }

    assert_eq!(page.display_text(), "Error occurred");
    let state = page.calculator().state();
    assert_eq!(state.first_operand(), "8");
    assert_eq!(state.operator(), Some(Operation::Divide));
    assert_eq!(state.second_operand(), "0");
}

#[tokio::test]
async fn page_history_failure_is_silent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/history");
        then.status(503);
    });

    let mut page = UiDriver::with_zone(service_for(&server), Utc);
    page.press_key("H").await;

    assert!(!page.is_history_visible());
    assert_eq!(page.display_text(), "0");
}
