use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::redis_service::JwtBlacklist;
use crate::statistics::StatisticsRules;
use crate::utils::jwt::JwtManager;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtManager>,
    pub blacklist: JwtBlacklist,
    pub statistics_rules: Arc<StatisticsRules>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        blacklist: JwtBlacklist,
        statistics_rules: StatisticsRules,
    ) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.session_ttl_seconds);
        Self {
            db,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            blacklist,
            statistics_rules: Arc::new(statistics_rules),
        }
    }
}
