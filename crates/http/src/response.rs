//! Success envelope shared by every module

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{ status: "success", message?, data? }` with an HTTP status
#[derive(Debug)]
pub struct ApiSuccess<T> {
    status_code: StatusCode,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Serialize)]
struct SuccessBody<'a, T: Serialize> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
}

impl<T> ApiSuccess<T> {
    /// 200 OK with a data payload
    pub fn ok(data: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            message: None,
            data: Some(data),
        }
    }

    /// 201 Created with a message and a data payload
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiSuccess<()> {
    /// 200 OK carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            status: "success",
            message: self.message.as_deref(),
            data: self.data.as_ref(),
        };
        (self.status_code, Json(body)).into_response()
    }
}
