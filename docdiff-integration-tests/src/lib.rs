//! Harness for end-to-end tests: a stand-in comparison function served over
//! HTTP, plus helpers for driving the gateway with ureq.

use std::path::PathBuf;
use std::time::Duration;

use actix_web::{get, post, web, App, HttpResponse, HttpServer};
use docdiff_object_store::file_store::FileObjectStore;
use docdiff_remote_function::{decode_document, InvocationPayload};
use serde_json::json;

pub const RESULTS_CONTAINER: &str = "results";
pub const RESULT_KEY: &str = "comparisons/202503041528_customer_合同条款偏离结果.html";

/// Standard document content that makes the fake function omit the locator.
pub const NO_LOCATOR_TRIGGER: &[u8] = b"no-locator";
/// Standard document content that makes the fake function answer with an error status.
pub const FAILURE_TRIGGER: &[u8] = b"fail";

pub const BOUNDARY: &str = "docdiff-integration-boundary";

#[derive(Clone)]
struct FakeFunctionState {
    store: FileObjectStore,
}

#[post("/invoke")]
async fn fake_invoke(
    state: web::Data<FakeFunctionState>,
    payload: web::Json<InvocationPayload>,
) -> HttpResponse {
    let (Ok(standard), Ok(customer)) = (
        decode_document(&payload.standard_contract_file_base64),
        decode_document(&payload.customer_contract_file_base64),
    ) else {
        return HttpResponse::BadRequest().finish();
    };

    if standard == FAILURE_TRIGGER {
        return HttpResponse::InternalServerError().json(json!({"message": "comparison failed"}));
    }
    if standard == NO_LOCATOR_TRIGGER {
        let body = json!({"summary": "no deviations"}).to_string();
        return HttpResponse::Ok().json(json!({"statusCode": 200, "body": body}));
    }

    let html = format!(
        "<html><body><pre>{}</pre><pre>{}</pre></body></html>",
        String::from_utf8_lossy(&standard),
        String::from_utf8_lossy(&customer)
    );
    if let Err(e) = state
        .store
        .put_object(RESULTS_CONTAINER, RESULT_KEY, html.as_bytes())
    {
        log::error!("fake function could not store result: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    let locator = format!("s3://{}/{}", RESULTS_CONTAINER, RESULT_KEY);
    let body = json!({ "s3path": locator }).to_string();
    HttpResponse::Ok().json(json!({"statusCode": 200, "body": body}))
}

#[get("/ready")]
async fn fake_ready() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Runs the fake comparison function on its own thread. It writes results
/// into `store_root` the way the real function writes to object storage.
/// `GET /ready` answers once it accepts connections.
pub fn spawn_fake_function(port: u16, store_root: PathBuf) {
    let store = FileObjectStore::new(store_root);
    store
        .create_container(RESULTS_CONTAINER)
        .expect("failed to create results container");
    let state = FakeFunctionState { store };

    std::thread::spawn(move || {
        actix_web::rt::System::new().block_on(async move {
            HttpServer::new(move || {
                App::new()
                    .app_data(web::Data::new(state.clone()))
                    .service(fake_invoke)
                    .service(fake_ready)
            })
            .bind(("127.0.0.1", port))
            .expect("failed to bind fake function")
            .run()
            .await
        })
    });
}

/// Polls `url` until it answers, or panics after a few seconds.
pub fn wait_until_ready(url: &str) {
    for _ in 0..50 {
        if ureq::get(url).call().is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("{} did not become ready", url);
}

pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Percent-encodes each path segment of a locator for use in a URL.
pub fn locator_to_path(locator: &str) -> String {
    locator
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
