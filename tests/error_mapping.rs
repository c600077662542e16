//! Every variant of the taxonomy mapped through the axum responder

use axum::{http::StatusCode, response::IntoResponse};
use serde_json::{json, Value};
use std::collections::HashSet;

use typed_error_api::errors::data_access::{
    AlreadyExists, BadRequest, InternalServerError, ResourceNotFound, UnknownError,
};
use typed_error_api::errors::general::{ClientError, ServerError};
use typed_error_api::errors::{
    error_to_http_exception, AppError, AxumJson, DataAccessError, GeneralError, VariantInfo,
};

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn assert_maps<E: AppError>(error: E, code: u32, status: StatusCode) {
    let response = error_to_http_exception(AxumJson, &error);
    assert_eq!(response.status(), status);
    assert_eq!(
        body_json(response).await,
        json!({"error": {"message": error.message(), "code": code, "status": status.as_u16()}})
    );
}

#[tokio::test]
async fn test_every_variant_maps_to_its_fixed_code_and_status() {
    assert_maps(BadRequest::new("Invalid request"), 100, StatusCode::BAD_REQUEST).await;
    assert_maps(
        InternalServerError::new("Server error"),
        101,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert_maps(UnknownError::new("?"), 102, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_maps(
        ResourceNotFound::new("Resource not found"),
        103,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_maps(AlreadyExists::new("dup"), 104, StatusCode::BAD_REQUEST).await;
    assert_maps(ClientError::new("client"), 0, StatusCode::BAD_REQUEST).await;
    assert_maps(ServerError::new("server"), 1, StatusCode::INTERNAL_SERVER_ERROR).await;
}

#[tokio::test]
async fn test_enum_into_response_matches_typed_mapping() {
    let err: DataAccessError = ResourceNotFound::new("gone").into();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": {"message": "gone", "code": 103, "status": 400}})
    );

    let err: GeneralError = ServerError::new("down").into();
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_catalogs_are_closed_and_unique() {
    let catalogs: [&[VariantInfo]; 2] = [DataAccessError::VARIANTS, GeneralError::VARIANTS];

    for catalog in catalogs {
        let codes: HashSet<u32> = catalog.iter().map(|v| v.code).collect();
        assert_eq!(codes.len(), catalog.len());
        assert!(catalog.iter().all(|v| v.status == 400 || v.status == 500));
    }
}
