//! Integration tests for the request logging interceptor.
//!
//! These drive the interceptor the way a host does: as a tower layer around a
//! plain service and around an axum router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use std::convert::Infallible;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::{routing::get, Router};
use http_request_logger::interceptor::{CaptureSink, RequestLoggingLayer};
use http_request_logger::observability::init_test_tracing;
use tower::{service_fn, Layer, ServiceExt};

fn duration_secs(line: &str) -> f64 {
    line.strip_prefix("Request duration: ")
        .and_then(|rest| rest.strip_suffix(" seconds"))
        .expect("duration line format")
        .parse()
        .expect("duration is a number")
}

fn health_app(sink: &CaptureSink) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                "ok"
            }),
        )
        .layer(RequestLoggingLayer::new(sink.clone()))
}

/// `GET /health` answering 200 after 10ms logs the four lines in order.
#[tokio::test]
async fn test_health_request_scenario() {
    init_test_tracing();
    let sink = CaptureSink::new();

    let response = health_app(&sink)
        .oneshot(
            Request::get("/health")
                .header("host", "host")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let lines = sink.lines();
    assert_eq!(lines.len(), 4, "unexpected lines: {:?}", lines);
    assert_eq!(lines[0], "Incoming GET request to http://host/health");
    assert!(lines[1].starts_with("Request started at: "));
    assert_eq!(lines[2], "Request completed with status 200");

    let secs = duration_secs(&lines[3]);
    assert!(
        (0.010..0.5).contains(&secs),
        "duration {} outside tolerance",
        secs
    );
}

/// `POST /items` whose downstream fails logs only the start lines and the
/// caller sees the original error.
#[tokio::test]
async fn test_failing_downstream_scenario() {
    #[derive(Debug, PartialEq, Eq)]
    struct DownstreamError {
        code: u32,
    }

    let sink = CaptureSink::new();
    let svc = RequestLoggingLayer::new(sink.clone()).layer(service_fn(
        |_req: Request<Body>| async { Err::<Response<Body>, _>(DownstreamError { code: 42 }) },
    ));

    let err = svc
        .oneshot(
            Request::post("/items")
                .header("host", "host")
                .body(Body::from("{\"name\":\"widget\"}"))
                .unwrap(),
        )
        .await
        .unwrap_err();

    assert_eq!(err, DownstreamError { code: 42 });

    let lines = sink.lines();
    assert_eq!(lines.len(), 2, "unexpected lines: {:?}", lines);
    assert_eq!(lines[0], "Incoming POST request to http://host/items");
    assert!(lines[1].starts_with("Request started at: "));
}

/// Status codes other than 200 are logged verbatim, not just successes.
#[tokio::test]
async fn test_error_status_is_still_a_completed_request() {
    let sink = CaptureSink::new();
    let svc = RequestLoggingLayer::new(sink.clone()).layer(service_fn(
        |_req: Request<Body>| async {
            Ok::<_, Infallible>(
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::empty())
                    .unwrap(),
            )
        },
    ));

    let response = svc
        .oneshot(Request::get("/broken").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let lines = sink.lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Incoming GET request to /broken");
    assert_eq!(lines[2], "Request completed with status 500");
}

/// Two requests in flight on the same router each log their own values.
#[tokio::test]
async fn test_concurrent_requests_do_not_mix_values() {
    let sink = CaptureSink::new();
    let app = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(40)).await;
                "slow"
            }),
        )
        .route("/created", get(|| async { (StatusCode::CREATED, "made") }))
        .layer(RequestLoggingLayer::new(sink.clone()));

    let slow = app.clone().oneshot(
        Request::get("/slow")
            .header("host", "host")
            .body(Body::empty())
            .unwrap(),
    );
    let created = app.oneshot(
        Request::get("/created")
            .header("host", "host")
            .body(Body::empty())
            .unwrap(),
    );

    let (slow, created) = tokio::join!(slow, created);
    assert_eq!(slow.unwrap().status(), StatusCode::OK);
    assert_eq!(created.unwrap().status(), StatusCode::CREATED);

    let lines = sink.lines();
    assert_eq!(lines.len(), 8, "unexpected lines: {:?}", lines);

    let count = |needle: &str| lines.iter().filter(|l| *l == needle).count();
    assert_eq!(count("Incoming GET request to http://host/slow"), 1);
    assert_eq!(count("Incoming GET request to http://host/created"), 1);
    assert_eq!(count("Request completed with status 200"), 1);
    assert_eq!(count("Request completed with status 201"), 1);

    // The fast request finishes while the slow one is still suspended, so its
    // completion lines come first.
    let fast_done = lines
        .iter()
        .position(|l| l == "Request completed with status 201")
        .unwrap();
    let slow_done = lines
        .iter()
        .position(|l| l == "Request completed with status 200")
        .unwrap();
    assert!(fast_done < slow_done);
    assert!(duration_secs(&lines[fast_done + 1]) < duration_secs(&lines[slow_done + 1]));
    assert!(duration_secs(&lines[slow_done + 1]) >= 0.040);
}

/// The layer hands back exactly what the router produced.
#[tokio::test]
async fn test_response_body_is_untouched() {
    let sink = CaptureSink::new();

    let response = health_app(&sink)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ok");
    assert_eq!(sink.lines()[0], "Incoming GET request to /health");
}
