use utoipa::openapi::{
    ContentBuilder, OpenApi as OpenApiDoc, Ref, RefOr, Response, ResponseBuilder,
};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::api::handlers::HelloResponse;
use crate::errors::{ErrorDetail, ErrorEnvelope};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Example API",
        version = "1.0.0",
        description = "Demonstration service for the typed error envelope. Every failure is returned as {\"error\": {\"message\", \"code\", \"status\"}} with status 400 or 500.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::hello,
    ),
    components(
        schemas(
            HelloResponse,
            ErrorEnvelope,
            ErrorDetail,
        )
    ),
    modifiers(&ErrorResponses),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "hello", description = "Demonstration endpoints"),
    )
)]
pub struct ApiDoc;

/// JSON response whose body is the named component schema `T`
pub fn json_response<'s, T: ToSchema<'s>>(description: &str) -> Response {
    let (name, _) = T::schema();

    ResponseBuilder::new()
        .description(description)
        .content(
            "application/json",
            ContentBuilder::new()
                .schema(Ref::from_schema_name(name))
                .build(),
        )
        .build()
}

/// Registers the reusable error responses under `components.responses`
struct ErrorResponses;

impl Modify for ErrorResponses {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.responses.insert(
            "BadRequest".to_string(),
            RefOr::T(json_response::<ErrorEnvelope>("Bad request")),
        );
        components.responses.insert(
            "InternalServerError".to_string(),
            RefOr::T(json_response::<ErrorEnvelope>("Internal server error")),
        );
    }
}
