use std::path::PathBuf;

use clap::Parser;

pub const JWT_ISSUER: &str = "phd-portal";

// Certificates
pub const MAX_CERTIFICATE_BYTES: usize = 5 * 1024 * 1024;
pub const CERTIFICATE_CONTENT_TYPE: &str = "application/pdf";
pub const COURSE_SLOTS: i32 = 4;

#[derive(Debug, Parser, Clone)]
#[clap(name = "phd_portal_api", about = "PhD scholar administration portal")]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    /// Lifetime of a session token; expiry is enforced on every request.
    #[clap(long, env, default_value_t = 86400)]
    pub session_ttl_seconds: i64,

    /// Token blacklist backend. Falls back to in-process storage when unset.
    #[clap(long, env)]
    pub redis_url: Option<String>,

    /// bcrypt work factor for stored passwords
    #[clap(long, env, default_value_t = bcrypt::DEFAULT_COST)]
    pub password_hash_cost: u32,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "./uploads")]
    pub upload_dir: PathBuf,

    #[clap(long, env, default_value_t = MAX_CERTIFICATE_BYTES)]
    pub max_certificate_bytes: usize,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,

    /// JSON file replacing the built-in department prefix and code lists.
    #[clap(long, env)]
    pub statistics_rules_path: Option<PathBuf>,
}
