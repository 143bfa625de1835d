pub mod app_config;
pub mod config;
pub mod insights;
pub mod profiles;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use insights::{
    round_percent, DataQualityMetrics, LanguageCount, PendingProfilesStatus, QueryStat,
    SeniorityBucket, SeniorityDistribution, SkillCount, TopProfile,
};
pub use profiles::{derive_profile, experience_years, DerivedProfile, MAX_SKILLS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed profile payload: {0}")]
    MalformedPayload(String),
}
