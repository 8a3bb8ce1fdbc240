//! Raw-body image uploads shared by the thumbnail and editor endpoints.

use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::media::application::domain::entities::IncomingImage;
use crate::media::application::domain::image_policy::ImageValidationError;
use crate::media::application::ports::incoming::use_cases::ProcessImageError;
use crate::media::application::ports::outgoing::StorageError;
use crate::shared::api::ApiResponse;

pub const FILENAME_HEADER: &str = "X-Filename";
const FALLBACK_FILENAME: &str = "upload";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Body limit for raw image uploads. Slightly above the policy maximum so
/// oversize files reach validation and get the descriptive 413.
pub const MAX_RAW_UPLOAD_BYTES: usize = 51 * 1024 * 1024;

/// Builds the incoming image from the request body.
///
/// The filename comes from the `filename` query parameter, then the
/// `X-Filename` header.
pub fn incoming_image(
    req: &HttpRequest,
    filename: Option<String>,
    body: web::Bytes,
) -> IncomingImage {
    let filename = filename
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .or_else(|| {
            req.headers()
                .get(FILENAME_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

    IncomingImage::new(filename, content_type, body.to_vec())
}

pub fn validation_error_response(e: &ImageValidationError) -> HttpResponse {
    match e {
        ImageValidationError::Empty => ApiResponse::bad_request("EMPTY_FILE", &e.to_string()),
        ImageValidationError::TooLarge { .. } => {
            ApiResponse::payload_too_large("FILE_TOO_LARGE", &e.to_string())
        }
        ImageValidationError::UnsupportedType(_) => {
            ApiResponse::unsupported_media_type("UNSUPPORTED_FILE_TYPE", &e.to_string())
        }
    }
}

pub fn processing_error_response(e: &ProcessImageError) -> HttpResponse {
    match e {
        ProcessImageError::UnsupportedType => {
            ApiResponse::unsupported_media_type("UNSUPPORTED_FILE_TYPE", &e.to_string())
        }
        ProcessImageError::ConversionFailed(msg) => {
            ApiResponse::unprocessable("CONVERSION_FAILED", msg)
        }
        ProcessImageError::ExceedsCeiling { .. } => {
            ApiResponse::unprocessable("IMAGE_TOO_LARGE", &e.to_string())
        }
    }
}

pub fn storage_error_response(e: &StorageError) -> HttpResponse {
    tracing::error!(error = %e, "Image upload to object storage failed");
    ApiResponse::bad_gateway("STORAGE_ERROR", "Failed to upload image")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[test]
    fn test_filename_from_query_wins_over_header() {
        let req = TestRequest::default()
            .insert_header((FILENAME_HEADER, "header.jpg"))
            .insert_header((header::CONTENT_TYPE, "image/jpeg"))
            .to_http_request();

        let image = incoming_image(&req, Some("query.jpg".to_string()), web::Bytes::from_static(b"x"));

        assert_eq!(image.filename, "query.jpg");
        assert_eq!(image.content_type, "image/jpeg");
    }

    #[test]
    fn test_header_and_fallbacks() {
        let req = TestRequest::default()
            .insert_header((FILENAME_HEADER, "IMG_0001.HEIC"))
            .to_http_request();
        let image = incoming_image(&req, Some("  ".to_string()), web::Bytes::new());
        assert_eq!(image.filename, "IMG_0001.HEIC");
        assert_eq!(image.content_type, "application/octet-stream");

        let bare = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "Image/PNG; charset=binary"))
            .to_http_request();
        let image = incoming_image(&bare, None, web::Bytes::new());
        assert_eq!(image.filename, "upload");
        assert_eq!(image.content_type, "image/png");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            validation_error_response(&ImageValidationError::TooLarge {
                max_bytes: 1,
                actual_bytes: 2
            })
            .status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            validation_error_response(&ImageValidationError::UnsupportedType("text/plain".into()))
                .status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            processing_error_response(&ProcessImageError::ConversionFailed("nope".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            storage_error_response(&StorageError::NetworkInterrupted).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
