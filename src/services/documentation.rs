use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Trivia-RPG proxy.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::external::external_questions,
        crate::routes::questions::list_questions,
        crate::routes::questions::create_question,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::trivia::QuestionDto,
            crate::dto::question_bank::CreateQuestionRequest,
            crate::dto::question_bank::QuestionDocument,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "trivia", description = "Proxy to the external trivia service"),
        (name = "questions", description = "Image question bank"),
    )
)]
pub struct ApiDoc;
