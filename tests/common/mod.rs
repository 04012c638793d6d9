#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use clap::Parser;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use phd_portal::app::create_app;
use phd_portal::bootstrap::initialize_admin_user;
use phd_portal::config::Config;
use phd_portal::redis_service::JwtBlacklist;
use phd_portal::state::AppState;
use phd_portal::statistics::StatisticsRules;

pub const ADMIN_EMAIL: &str = "admin@portal.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PASSWORD: &str = "scholar-password";
pub const MAX_CERTIFICATE_BYTES: usize = 2048;
pub const PDF: &[u8] = b"%PDF-1.4\n1 0 obj <<>> endobj\ntrailer <<>>\n%%EOF\n";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: TempDir,
}

pub struct Scholar {
    pub user_id: Uuid,
    pub scholar_id: Uuid,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("temp upload dir");
        let max_bytes = MAX_CERTIFICATE_BYTES.to_string();
        let config = Config::parse_from([
            "phd_portal_api",
            "--database-url",
            "sqlite::memory:",
            "--jwt-secret",
            "integration-secret",
            "--admin-email",
            ADMIN_EMAIL,
            "--admin-password",
            ADMIN_PASSWORD,
            "--password-hash-cost",
            "4",
            "--upload-dir",
            upload_dir.path().to_str().expect("utf-8 temp path"),
            "--max-certificate-bytes",
            max_bytes.as_str(),
        ]);

        // In-memory SQLite lives as long as its single connection
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.expect("connect sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        initialize_admin_user(&db, &config).await.expect("seed admin");

        let state = AppState::new(db, config, JwtBlacklist::local(), StatisticsRules::default());
        let router = create_app(state.clone());

        Self {
            router,
            state,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let (status, bytes) = self.send(request).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["accessToken"]
            .as_str()
            .expect("accessToken in login response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn signup(&self, email: &str, department: &str, mode: &str) -> Scholar {
        let (status, body) = self
            .post(
                "/api/v1/signup",
                None,
                json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": "Asha",
                    "lastName": "Nair",
                    "department": department,
                    "modeOfProgram": mode,
                    "researchSupervisor": "Dr. Meera Rao"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");

        let user_id = body["userId"].as_str().expect("userId").parse().expect("uuid");
        let scholar_id = body["scholarId"].as_str().expect("scholarId").parse().expect("uuid");
        let token = self.login(email, PASSWORD).await;

        Scholar {
            user_id,
            scholar_id,
            token,
        }
    }

    /// Signs up an account, grants the supervisor flag and logs in again.
    pub async fn supervisor(&self, email: &str, first_name: &str, last_name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/signup",
                None,
                json!({
                    "email": email,
                    "password": PASSWORD,
                    "firstName": first_name,
                    "lastName": last_name
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");

        let admin = self.admin_token().await;
        let uri = format!("/api/v1/admin/users/{}/roles", body["userId"].as_str().expect("userId"));
        let (status, _) = self.put(&uri, &admin, json!({ "isSupervisor": true })).await;
        assert_eq!(status, StatusCode::OK);

        self.login(email, PASSWORD).await
    }

    pub async fn upload(
        &self,
        token: &str,
        phd_id: &str,
        course_number: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> (StatusCode, Value) {
        let boundary = "----phd-portal-test-boundary";
        let mut body = Vec::new();
        for (name, value) in [("phdId", phd_id), ("courseNumber", course_number)] {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/user/phd-scholar/course-certificate")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("valid request");

        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}
