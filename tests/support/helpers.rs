// tests/support/helpers.rs
use super::mocks::{
    CapturingNotifier, InMemoryStore, SteppingClock, StrictPasswordHasher, TestTokenManager,
    fixed_now,
};
use axum::body::{self, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use civiccare::application::{
    commands::issues::{ReportIssueCommand, UpdateIssueStatusCommand},
    ports::report::ReportRenderer,
    services::{ApplicationServices, Collaborators, Repositories},
};
use civiccare::domain::user::{
    ContactProfile, NewUser, PasswordHash, Role, User, UserRepository, Username,
};
use civiccare::infrastructure::{report::PdfReportRenderer, storage::LocalImageStore};
use civiccare::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt as _;

pub const MAX_TEST_UPLOAD: usize = 1024 * 1024;
pub const PASSWORD: &str = "chennai2024";

/// Services wired over the in-memory store, with a real image store in a
/// temporary directory and the real PDF renderer.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<CapturingNotifier>,
    pub services: Arc<ApplicationServices>,
    pub uploads: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_parts(
            CapturingNotifier::default(),
            Arc::new(PdfReportRenderer::default()),
        )
    }

    pub fn with_parts(notifier: CapturingNotifier, renderer: Arc<dyn ReportRenderer>) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(notifier);
        let uploads = tempfile::tempdir().unwrap();

        let services = Arc::new(ApplicationServices::new(
            Repositories {
                users: store.clone(),
                issue_writes: store.clone(),
                issue_reads: store.clone(),
                ledger: store.clone(),
                feedback: store.clone(),
            },
            Collaborators {
                password_hasher: Arc::new(StrictPasswordHasher),
                token_manager: Arc::new(TestTokenManager),
                image_store: Arc::new(LocalImageStore::new(uploads.path(), MAX_TEST_UPLOAD)),
                notifier: notifier.clone(),
                renderer,
                clock: Arc::new(SteppingClock::default()),
            },
        ));

        Self {
            store,
            notifier,
            services,
            uploads,
        }
    }

    pub fn router(&self) -> axum::Router {
        let options = RouterOptions {
            max_upload_bytes: MAX_TEST_UPLOAD,
            rate_limit: false,
            ..RouterOptions::default()
        };
        build_router(
            HttpState {
                services: Arc::clone(&self.services),
            },
            &options,
        )
    }

    /// Insert an account directly, bypassing the first-user rule.
    pub async fn seed_user(&self, username: &str, role: Role, email: Option<&str>) -> User {
        let contact =
            ContactProfile::from_raw(None, email.map(str::to_string), None).unwrap();
        let new_user = NewUser::new(
            Username::new(username).unwrap(),
            PasswordHash::new(format!("hash::{PASSWORD}")).unwrap(),
            role,
            contact,
            fixed_now(),
        );
        UserRepository::insert(self.store.as_ref(), new_user)
            .await
            .unwrap()
    }
}

/* -------------------------------- requests -------------------------------- */

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json(method: Method, uri: &str, token: Option<&str>, payload: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

const BOUNDARY: &str = "civiccare-test-boundary";

/// `multipart/form-data` POST with text `fields` and `(name, file name, bytes)` files.
pub fn multipart(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Request<Body> {
    let mut payload = Vec::new();
    for (name, value) in fields {
        payload.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, content) in files {
        payload.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        payload.extend_from_slice(content);
        payload.extend_from_slice(b"\r\n");
    }
    payload.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(payload))
        .unwrap()
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let (parts, body_stream) = response.into_parts();
    let bytes = body::to_bytes(body_stream, 16 * 1024 * 1024).await.unwrap();
    (status, parts.headers, bytes.to_vec())
}

pub fn read_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|err| {
        panic!(
            "expected JSON body ({err}): {}",
            String::from_utf8_lossy(bytes)
        )
    })
}

/// Assert the `{error, message}` body every failure carries.
pub fn assert_error_body(bytes: &[u8], expected_error: &str) -> String {
    let value = read_json(bytes);
    assert_eq!(value["error"], expected_error, "unexpected body: {value}");
    let message = value["message"].as_str().unwrap_or_default().to_string();
    assert!(!message.is_empty(), "expected a message in {value}");
    message
}

/// A small solid-colour PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/* -------------------------------- commands -------------------------------- */

/// A road damage report in T. Nagar with no contact details or photo.
pub fn report_command(description: &str) -> ReportIssueCommand {
    ReportIssueCommand {
        issue_type: "Potholes / Road Damage".into(),
        description: description.into(),
        area: "T. Nagar".into(),
        street: Some("Usman Road".into()),
        landmark: None,
        name: None,
        email: None,
        phone: None,
        before_image: None,
    }
}

pub fn status_command(
    issue_id: i64,
    status: Option<&str>,
    remarks: Option<&str>,
) -> UpdateIssueStatusCommand {
    UpdateIssueStatusCommand {
        issue_id,
        status: status.map(str::to_string),
        remarks: remarks.map(str::to_string),
        after_image: None,
    }
}
