use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use showcase_core::errors::Error as CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                CoreError::Validation(_) | CoreError::Rebalance(_) => StatusCode::BAD_REQUEST,
                CoreError::Transport(_) | CoreError::Api { .. } => StatusCode::BAD_GATEWAY,
                CoreError::InvalidConfigValue(_) | CoreError::Unexpected(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::rebalance::RebalanceError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CoreError::NotFound("cycle".into()), StatusCode::NOT_FOUND),
            (
                CoreError::Rebalance(RebalanceError::InvalidCycle(0)),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::Transport("timeout".into()), StatusCode::BAD_GATEWAY),
            (
                CoreError::Api {
                    status: 503,
                    message: "down".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                CoreError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }
}
