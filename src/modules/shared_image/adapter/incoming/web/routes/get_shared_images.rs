use actix_web::{get, web, FromRequest, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::shared::api::ApiResponse;
use crate::shared_image::application::domain::entities::EntityType;
use crate::shared_image::application::ports::incoming::use_cases::{
    ListScope, ListSharedImagesError, ListSharedImagesQuery,
};
use crate::AppState;

use super::dto::{parse_id, resolve_entity, SharedImageDto, SharedImagesResponse};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SharedImagesQueryParams {
    /// `all` for the admin library view, otherwise one entity.
    pub scope: Option<String>,
    /// `blog` or `portfolio`
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    /// Legacy alias of `entityType=blog&entityId=`.
    pub blog_post_id: Option<String>,
    /// Case-insensitive substring of the original file name.
    pub filename: Option<String>,
}

enum Scope {
    Entity,
    All,
}

fn parse_scope(raw: Option<&str>) -> Result<Scope, HttpResponse> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None | Some("entity") => Ok(Scope::Entity),
        Some("all") => Ok(Scope::All),
        Some(other) => Err(ApiResponse::bad_request(
            "INVALID_SCOPE",
            &format!("Unknown scope '{}'", other),
        )),
    }
}

fn empty() -> HttpResponse {
    HttpResponse::Ok().json(SharedImagesResponse { images: Vec::new() })
}

#[utoipa::path(
    get,
    path = "/api/shared-images",
    tag = "shared-images",
    params(SharedImagesQueryParams),
    responses(
        (status = 200, description = "Active images, newest first", body = SharedImagesResponse),
        (status = 400, description = "Invalid entity type or scope"),
        (status = 401, description = "scope=all without a bearer token"),
        (status = 500, description = "Store error")
    )
)]
#[get("/api/shared-images")]
pub async fn get_shared_images_handler(
    req: HttpRequest,
    params: web::Query<SharedImagesQueryParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let params = params.into_inner();

    let scope = match parse_scope(params.scope.as_deref()) {
        Ok(scope) => scope,
        Err(resp) => return resp,
    };

    let entity_id = parse_id(params.entity_id.as_deref());
    let blog_post_id = parse_id(params.blog_post_id.as_deref());

    let list_scope = match scope {
        Scope::Entity => {
            match resolve_entity(params.entity_type.as_deref(), entity_id, blog_post_id) {
                Ok(Some(entity)) => ListScope::Entity(entity),
                // no entity yet, e.g. a post that is still being written
                Ok(None) => return empty(),
                Err(resp) => return resp,
            }
        }
        Scope::All => {
            if let Err(e) = VerifiedUser::extract(&req).await {
                return HttpResponse::from_error(e);
            }

            let entity_type = match params.entity_type.as_deref().map(str::trim) {
                Some(raw) if !raw.is_empty() => match raw.parse::<EntityType>() {
                    Ok(t) => Some(t),
                    Err(e) => return ApiResponse::bad_request("INVALID_ENTITY_TYPE", &e.to_string()),
                },
                _ if blog_post_id.is_some() => Some(EntityType::Blog),
                _ => None,
            };

            ListScope::All {
                entity_type,
                entity_id: entity_id.or(blog_post_id),
            }
        }
    };

    match data
        .shared_image
        .list
        .execute(ListSharedImagesQuery {
            scope: list_scope,
            filename: params.filename,
        })
        .await
    {
        Ok(listings) => HttpResponse::Ok().json(SharedImagesResponse {
            images: listings.into_iter().map(SharedImageDto::from).collect(),
        }),
        Err(ListSharedImagesError::RepositoryError(msg)) => {
            tracing::error!("Error fetching shared images: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
