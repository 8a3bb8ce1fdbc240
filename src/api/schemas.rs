use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable code for programmatic handling
    #[schema(example = "UNSUPPORTED_FILE_TYPE")]
    pub code: String,

    #[schema(example = "Only JPEG, PNG and HEIC images are supported")]
    pub message: String,
}
