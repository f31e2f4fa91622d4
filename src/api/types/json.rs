//! Custom JSON extractor that reports body errors as plain text

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

/// Wrapper around `axum::Json` whose rejections match the service's
/// plain-text error rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// JSON body rejection carried as a status and a plain-text message
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                status: rejection.status(),
                message: rejection_message(&rejection),
            }),
        }
    }
}

fn rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("invalid request body: {}", err.body_text()),
        JsonSyntaxError(err) => format!("invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "missing Content-Type header, expected 'application/json'".to_string()
        }
        BytesRejection(err) => format!("failed to read request body: {}", err.body_text()),
        _ => "invalid request body".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
