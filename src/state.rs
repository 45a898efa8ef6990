use crate::config::AppConfig;
use crate::mailer::Mailer;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub mailer: Mailer,
}
