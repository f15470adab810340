use anyhow::{Context, Result};

#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub payment: PaymentConfig,
    pub mail: MailConfig,
    pub sweep: SweepConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env_var("DATABASE_HOST")?,
            port: env_var_or("DATABASE_PORT", "5432").parse()?,
            username: env_var("DATABASE_USERNAME")?,
            password: env_var("DATABASE_PASSWORD")?,
            database: env_var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: env_var("REDIS_HOST")?,
            port: env_var_or("REDIS_PORT", "6379").parse()?,
        };
        let auth = AuthConfig {
            ttl: env_var_or("AUTH_TOKEN_TTL", "86400").parse()?,
        };
        let payment = PaymentConfig {
            api_base: env_var("PAYMENT_API_BASE")?,
            secret_key: env_var("PAYMENT_SECRET_KEY")?,
            currency: env_var_or("PAYMENT_CURRENCY", "inr"),
            success_url: env_var("PAYMENT_SUCCESS_URL")?,
            cancel_url: env_var("PAYMENT_CANCEL_URL")?,
            timeout_secs: env_var_or("PAYMENT_TIMEOUT_SECS", "10").parse()?,
        };
        let mail = MailConfig {
            endpoint: env_var("MAIL_API_ENDPOINT")?,
            token: env_var("MAIL_API_TOKEN")?,
            sender: env_var("MAIL_SENDER")?,
            timeout_secs: env_var_or("MAIL_TIMEOUT_SECS", "10").parse()?,
        };
        let sweep = SweepConfig {
            interval_secs: env_var_or("SWEEP_INTERVAL_SECS", "300").parse()?,
            pending_ttl_secs: env_var_or("PENDING_INTENT_TTL_SECS", "1800").parse()?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            payment,
            mail,
            sweep,
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("environment variable {key} is not set"))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// Access token lifetime in seconds.
    pub ttl: u64,
}

#[derive(Clone)]
pub struct PaymentConfig {
    pub api_base: String,
    pub secret_key: String,
    pub currency: String,
    /// Template the gateway redirects to after a completed payment.
    /// Correlation parameters are appended as a query string.
    pub success_url: String,
    pub cancel_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub token: String,
    pub sender: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct SweepConfig {
    pub interval_secs: u64,
    /// Pending intents older than this are swept to `failed`.
    pub pending_ttl_secs: i64,
}
