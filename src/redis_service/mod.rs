pub mod redis_service;

pub use redis_service::{JwtBlacklist, init_redis_connection};
