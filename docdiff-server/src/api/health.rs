use actix_web::{get, web, Responder};
use docdiff_api_schema::health::HealthResponse;

#[get("/health")]
pub async fn health() -> impl Responder {
    web::Json(HealthResponse {
        status: "ok".to_string(),
    })
}
