//! HTTP front end for the gridfront solver
//!
//! | Method | Path      | Body             | Response                  |
//! |--------|-----------|------------------|---------------------------|
//! | POST   | `/solve`  | [`SolveRequest`] | [`Solution`] or `{error}` |
//! | GET    | `/health` |                  | [`HealthResponse`]        |
//!
//! Searches run on the blocking pool; the async workers only decode and
//! encode JSON.

use gridfront_kernel::{Grid, Solution, Solver, SolverConfig};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Body of `POST /solve`. Omitted budgets fall back to the solver defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolveRequest {
    /// Grid text, one row per line
    pub grid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_moves: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pops: Option<u64>,
}

impl SolveRequest {
    pub fn new(grid: impl Into<String>) -> Self {
        Self {
            grid: grid.into(),
            starting_health: None,
            max_moves: None,
            max_pops: None,
        }
    }

    /// Solver configuration for this request.
    pub fn config(&self) -> SolverConfig {
        let mut config = SolverConfig::new().with_max_pops(self.max_pops);
        if let Some(health) = self.starting_health {
            config = config.with_starting_health(health);
        }
        if let Some(moves) = self.max_moves {
            config = config.with_max_moves(moves);
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures while serving a request
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Solve(#[from] gridfront_kernel::Error),

    #[error("solver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Solve(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Parse, solve and collect the fronts of one request.
pub fn solve_request(request: &SolveRequest) -> Result<Solution, gridfront_kernel::Error> {
    let mut grid = Grid::parse(&request.grid)?;
    let solver = Solver::new(request.config())?;
    let report = solver.solve(&mut grid);
    Ok(Solution::from_grid(&grid, &report))
}

/// All routes, with rejections turned into JSON errors.
pub fn routes() -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            warp::reply::json(&HealthResponse {
                status: "ok".to_string(),
                version: gridfront_kernel::VERSION.to_string(),
            })
        });

    let solve = warp::path("solve")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and_then(handle_solve);

    health
        .or(solve)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

async fn handle_solve(request: SolveRequest) -> Result<warp::reply::Response, Infallible> {
    let outcome = tokio::task::spawn_blocking(move || solve_request(&request))
        .await
        .map_err(ApiError::from)
        .and_then(|result| result.map_err(ApiError::from));

    Ok(match outcome {
        Ok(solution) => {
            tracing::info!(
                rows = solution.rows,
                cols = solution.cols,
                pops = solution.pops,
                "Solved"
            );
            warp::reply::json(&solution).into_response()
        }
        Err(e) => {
            let status = e.status();
            if status.is_server_error() {
                tracing::error!(error = %e, "Solve failed");
            } else {
                tracing::debug!(error = %e, "Rejected solve request");
            }
            error_reply(status, e.to_string())
        }
    })
}

fn error_reply(status: StatusCode, error: String) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(&ErrorResponse { error }), status).into_response()
}

async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("invalid request body: {e}"))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "request body too large".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "expected application/json".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        tracing::error!(?err, "Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    };
    Ok(error_reply(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfront_kernel::{ConfigError, Error, GridError};

    #[test]
    fn request_defaults_to_solver_defaults() {
        let config = SolveRequest::new("AB").config();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn request_overrides_budget() {
        let request = SolveRequest {
            starting_health: Some(50),
            max_pops: Some(10),
            ..SolveRequest::new("AB")
        };
        let config = request.config();
        assert_eq!(config.starting_health, 50);
        assert_eq!(config.max_moves, 450);
        assert_eq!(config.max_pops, Some(10));
    }

    #[test]
    fn input_errors_are_bad_requests() {
        let grid = ApiError::from(Error::from(GridError::MissingStart));
        assert_eq!(grid.status(), StatusCode::BAD_REQUEST);

        let config = ApiError::from(Error::from(ConfigError::NonPositive {
            field: "max_moves",
            value: 0,
        }));
        assert_eq!(config.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn solve_request_reports_grid_errors() {
        let err = solve_request(&SolveRequest::new("EEB")).unwrap_err();
        assert!(matches!(err, Error::Grid(GridError::MissingStart)));
    }
}
