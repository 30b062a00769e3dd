use gridfront_kernel::Solution;
use gridfront_server::{routes, ErrorResponse, HealthResponse, SolveRequest};
use gridfront_test_utils::{CANONICAL, CANONICAL_FRONT, LAVA_ENCLOSED, LAVA_ENCLOSED_HEALTH};
use pretty_assertions::assert_eq;
use warp::http::StatusCode;

async fn post_solve(body: &SolveRequest) -> (StatusCode, Vec<u8>) {
    let res = warp::test::request()
        .method("POST")
        .path("/solve")
        .json(body)
        .reply(&routes())
        .await;
    (res.status(), res.body().to_vec())
}

#[tokio::test]
async fn test_health() {
    let res = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, gridfront_kernel::VERSION);
}

#[tokio::test]
async fn test_solve_canonical_grid() {
    let (status, body) = post_solve(&SolveRequest::new(CANONICAL)).await;
    assert_eq!(status, StatusCode::OK);

    let solution: Solution = serde_json::from_slice(&body).unwrap();
    assert!(solution.converged);
    assert_eq!((solution.rows, solution.cols), (3, 3));
    let front: Vec<(i32, i32)> = solution.ends[0]
        .paths
        .iter()
        .map(|p| (p.health, p.moves))
        .collect();
    let expected: Vec<(i32, i32)> = CANONICAL_FRONT.iter().map(|r| (r.health, r.moves)).collect();
    assert_eq!(front, expected);
}

#[tokio::test]
async fn test_solve_with_low_health_finds_nothing() {
    let request = SolveRequest {
        starting_health: Some(LAVA_ENCLOSED_HEALTH),
        ..SolveRequest::new(LAVA_ENCLOSED)
    };
    let (status, body) = post_solve(&request).await;
    assert_eq!(status, StatusCode::OK);

    let solution: Solution = serde_json::from_slice(&body).unwrap();
    assert_eq!(solution.ends.len(), 1);
    assert!(solution.ends[0].paths.is_empty());
}

#[tokio::test]
async fn test_solve_rejects_bad_grid() {
    let (status, body) = post_solve(&SolveRequest::new("AEE\nEXB")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("unknown symbol"), "{}", error.error);
}

#[tokio::test]
async fn test_solve_rejects_non_positive_budget() {
    let request = SolveRequest {
        max_moves: Some(0),
        ..SolveRequest::new(CANONICAL)
    };
    let (status, body) = post_solve(&request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("max_moves"), "{}", error.error);
}

#[tokio::test]
async fn test_solve_rejects_malformed_body() {
    let res = warp::test::request()
        .method("POST")
        .path("/solve")
        .header("content-type", "application/json")
        .body(r#"{"grid": 42}"#)
        .reply(&routes())
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(res.body()).unwrap();
    assert!(error.error.starts_with("invalid request body"));
}

#[tokio::test]
async fn test_pop_budget_reports_unconverged() {
    let request = SolveRequest {
        max_pops: Some(1),
        ..SolveRequest::new("AEEEB")
    };
    let (status, body) = post_solve(&request).await;
    assert_eq!(status, StatusCode::OK);

    let solution: Solution = serde_json::from_slice(&body).unwrap();
    assert!(!solution.converged);
    assert_eq!(solution.pops, 1);
}

#[tokio::test]
async fn test_unknown_route() {
    let res = warp::test::request()
        .method("GET")
        .path("/nowhere")
        .reply(&routes())
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
