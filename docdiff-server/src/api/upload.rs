use actix_multipart::{Field, Multipart};
use actix_web::{post, web};
use docdiff_api_schema::upload::{UploadResponse, CUSTOMER_FILE_FIELD, STANDARD_FILE_FIELD};
use docdiff_gateway::{Document, GatewayError, SubmitRequest};
use futures_util::TryStreamExt;

use crate::{error::ApiError, state::ApiState};

#[post("/upload")]
pub async fn upload(
    state: web::Data<ApiState>,
    mut payload: Multipart,
) -> Result<web::Json<UploadResponse>, ApiError> {
    let mut standard = None;
    let mut customer = None;

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());
        // Unknown parts are drained too, so the limit applies to them as well.
        let content = read_field(&mut field, &name, state.max_upload_bytes).await?;

        match name.as_str() {
            STANDARD_FILE_FIELD => standard = Some(Document::new(filename, content)),
            CUSTOMER_FILE_FIELD => customer = Some(Document::new(filename, content)),
            _ => log::debug!("ignoring multipart field `{}`", name),
        }
    }

    // A missing part is submitted as empty and rejected by the gateway.
    let request = SubmitRequest {
        standard: standard.unwrap_or_else(|| Document::new(STANDARD_FILE_FIELD, vec![])),
        customer: customer.unwrap_or_else(|| Document::new(CUSTOMER_FILE_FIELD, vec![])),
    };
    let res = state.submission.submit(request).await?;

    Ok(web::Json(UploadResponse::success(res.locator)))
}

async fn read_field(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut content = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if content.len() + chunk.len() > limit {
            return Err(GatewayError::Input(format!(
                "field `{}` exceeds the upload limit of {} bytes",
                name, limit
            ))
            .into());
        }
        content.extend_from_slice(&chunk);
    }
    Ok(content)
}

fn malformed(error: actix_multipart::MultipartError) -> ApiError {
    GatewayError::Input(format!("malformed multipart body: {}", error)).into()
}
