// src/presentation/http/controllers/catalog.rs
use crate::application::dto::CatalogDto;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/v1/catalog",
    responses(
        (status = 200, description = "Issue categories and areas offered by the reporting form.", body = CatalogDto)
    ),
    tag = "Issues"
)]
pub async fn catalog() -> Json<CatalogDto> {
    Json(CatalogDto::current())
}
