use actix_web::{get, http::header, web, HttpResponse};

use crate::{error::ApiError, state::ApiState};

/// The locator is the rest of the path and may itself contain `/`.
#[get("/download/{locator:.*}")]
pub async fn download(
    state: web::Data<ApiState>,
    locator: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let blob = state.retrieval.retrieve(&locator).await?;

    Ok(HttpResponse::Ok()
        .content_type(blob.content_type)
        .insert_header((header::CONTENT_DISPOSITION, blob.content_disposition()))
        .body(blob.content))
}
