use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::codes::StatusClass;
use super::variants::AppError;
use crate::schema::Schema;

lazy_static::lazy_static! {
    static ref ERROR_SCHEMA: Schema<ErrorEnvelope> =
        Schema::compile().expect("error envelope schema must compile");
}

/// Shared schema for parsing and validating error envelopes
pub fn error_schema() -> &'static Schema<ErrorEnvelope> {
    &ERROR_SCHEMA
}

/// Wire representation of every error this service returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ErrorDetail,
}

/// Error details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ErrorDetail {
    /// Human-readable error message
    pub message: String,
    /// Error code, unique within the error's category
    pub code: u32,
    /// HTTP status the error was returned with (400 or 500)
    pub status: u16,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, code: u32, status: u16) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code,
                status,
            },
        }
    }
}

/// Capability for emitting a JSON body with a status code.
///
/// Supplied by whatever is handling the request; the error mapper never
/// builds transport responses on its own.
pub trait JsonResponder {
    type Output;

    fn json<B: Serialize>(self, body: B, status: StatusCode) -> Self::Output;
}

/// Responder producing axum responses
#[derive(Debug, Clone, Copy, Default)]
pub struct AxumJson;

impl JsonResponder for AxumJson {
    type Output = Response;

    fn json<B: Serialize>(self, body: B, status: StatusCode) -> Response {
        (status, Json(body)).into_response()
    }
}

/// Emit `error` as an [`ErrorEnvelope`] through `responder`.
///
/// The status class `C` must be the variant's own class. Asking for any other
/// class does not compile:
///
/// ```compile_fail
/// use typed_error_api::errors::{error_to_http_exception, AxumJson, Status500};
/// use typed_error_api::errors::data_access::BadRequest;
///
/// let _ = error_to_http_exception::<BadRequest, Status500, _>(
///     AxumJson,
///     &BadRequest::new("Invalid request"),
/// );
/// ```
///
/// Nor does passing a different variant than the one named:
///
/// ```compile_fail
/// use typed_error_api::errors::{error_to_http_exception, AxumJson, Status400};
/// use typed_error_api::errors::data_access::{BadRequest, UnknownError};
///
/// let _ = error_to_http_exception::<UnknownError, Status400, _>(
///     AxumJson,
///     &BadRequest::new("Invalid request"),
/// );
/// ```
///
/// The matching class is accepted:
///
/// ```
/// use typed_error_api::errors::{error_to_http_exception, AxumJson, Status400};
/// use typed_error_api::errors::data_access::BadRequest;
///
/// let response = error_to_http_exception::<BadRequest, Status400, _>(
///     AxumJson,
///     &BadRequest::new("Invalid request"),
/// );
/// assert_eq!(response.status(), 400);
/// ```
pub fn error_to_http_exception<E, C, R>(responder: R, error: &E) -> R::Output
where
    E: AppError<Status = C>,
    C: StatusClass,
    R: JsonResponder,
{
    responder.json(error.envelope(), C::STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::data_access::{
        AlreadyExists, BadRequest, DataAccessError, InternalServerError, ResourceNotFound,
        UnknownError,
    };
    use crate::errors::general::{ClientError, ServerError};
    use serde_json::{json, Value};
    use std::cell::RefCell;

    /// Records every emission instead of building a transport response
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(Value, StatusCode)>>,
    }

    impl JsonResponder for &Recorder {
        type Output = (Value, StatusCode);

        fn json<B: Serialize>(self, body: B, status: StatusCode) -> Self::Output {
            let body = serde_json::to_value(body).unwrap();
            self.calls.borrow_mut().push((body.clone(), status));
            (body, status)
        }
    }

    fn map<E: AppError>(error: &E) -> (Value, StatusCode) {
        let recorder = Recorder::default();
        let out = error_to_http_exception(&recorder, error);
        assert_eq!(recorder.calls.borrow().len(), 1);
        out
    }

    #[test]
    fn test_bad_request_envelope() {
        let (body, status) = map(&BadRequest::new("Invalid request"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": {"message": "Invalid request", "code": 100, "status": 400}})
        );
    }

    #[test]
    fn test_internal_server_error_envelope() {
        let (body, status) = map(&InternalServerError::new("Server error"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": {"message": "Server error", "code": 101, "status": 500}})
        );
    }

    #[test]
    fn test_resource_not_found_envelope() {
        let (body, status) = map(&ResourceNotFound::new("Resource not found"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": {"message": "Resource not found", "code": 103, "status": 400}})
        );
    }

    #[test]
    fn test_remaining_variants() {
        let (body, status) = map(&UnknownError::new("???"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], 102);

        let (body, status) = map(&AlreadyExists::new("taken"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 104);

        let (body, status) = map(&ClientError::new("nope"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], 400);

        let (body, status) = map(&ServerError::new("down"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], 500);
    }

    #[test]
    fn test_envelope_status_matches_emitted_status() {
        let errors = [
            DataAccessError::from(BadRequest::new("a")),
            InternalServerError::new("b").into(),
            UnknownError::new("c").into(),
            ResourceNotFound::new("d").into(),
            AlreadyExists::new("e").into(),
        ];

        for err in errors {
            let envelope = err.envelope();
            assert_eq!(envelope.error.status, err.status().as_u16());
            assert!(matches!(envelope.error.status, 400 | 500));

            let response = err.clone().into_response();
            assert_eq!(response.status(), err.status());
        }
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let err = AlreadyExists::new("already there");
        let first = serde_json::to_vec(&err.envelope()).unwrap();
        let second = serde_json::to_vec(&err.envelope()).unwrap();
        assert_eq!(first, second);

        let (a, _) = map(&err);
        let (b, _) = map(&err);
        assert_eq!(a, b);
    }

    #[test]
    fn test_axum_responder_status() {
        let response = error_to_http_exception(AxumJson, &UnknownError::new("oops"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelopes_satisfy_error_schema() {
        let schema = error_schema();
        for err in [
            DataAccessError::from(BadRequest::new("a")),
            UnknownError::new("").into(),
        ] {
            let envelope = schema.construct(err.envelope()).unwrap();
            let text = schema.stringify(&envelope).unwrap();
            assert_eq!(schema.json_parse(text).unwrap(), envelope);
        }
    }

    #[test]
    fn test_error_schema_rejects_malformed_envelope() {
        let err = error_schema()
            .json_parse(json!({"error": {"message": "m", "code": 1}}))
            .unwrap_err();
        assert!(!err.issues().is_empty());

        let err = error_schema()
            .json_parse(json!({"message": "m", "code": 1, "status": 400}))
            .unwrap_err();
        assert!(!err.issues().is_empty());
    }

    #[test]
    fn test_envelope_deserializes() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "error": {"message": "m", "code": 7, "status": 400}
        }))
        .unwrap();
        assert_eq!(envelope, ErrorEnvelope::new("m", 7, 400));
    }
}
