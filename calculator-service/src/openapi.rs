use crate::dtos::ResultEnvelope;
use crate::handlers;
use crate::operation::Operation;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator Microservice",
        description = "Add, subtract, multiply or divide two numbers passed as query parameters."
    ),
    paths(handlers::usage, handlers::calculate),
    components(schemas(ResultEnvelope, Operation)),
    tags((name = "Calculator", description = "Arithmetic operations"))
)]
pub struct ApiDoc;
