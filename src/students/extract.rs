use super::types::{MSG_INVALID_BODY, MessageResponse, StudentPayload};

use axum::extract::{FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json, async_trait};

/// Student payload read from either a JSON or a URL-encoded form body.
///
/// The body is treated as a form when the request says so, and as JSON
/// otherwise. Any rejection becomes a `400` with a JSON message.
#[derive(Debug)]
pub struct StudentBody(pub StudentPayload);

#[async_trait]
impl<S> FromRequest<S> for StudentBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let payload = if is_form {
            Form::<StudentPayload>::from_request(req, state)
                .await
                .map(|Form(payload)| payload)
                .map_err(|e| {
                    tracing::warn!("Rejected form body: {}", e.body_text());
                    invalid_body()
                })?
        } else {
            Json::<StudentPayload>::from_request(req, state)
                .await
                .map(|Json(payload)| payload)
                .map_err(|e| {
                    tracing::warn!("Rejected JSON body: {}", e.body_text());
                    invalid_body()
                })?
        };

        Ok(StudentBody(payload))
    }
}

fn invalid_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse::new(MSG_INVALID_BODY)),
    )
        .into_response()
}
