use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL for the section store, e.g. sqlite:portfolio.sqlite
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared admin secret checked by the login route. An empty value
    /// disables login entirely rather than matching an empty password.
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Address contact-form submissions are delivered to.
    pub recipient: String,
    /// HTTP mail relay endpoint. When unset, messages are logged instead.
    pub webhook_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("PORTFOLIO_DB") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.admin.password = v;
        }
        if let Ok(v) = env::var("CONTACT_RECIPIENT") {
            self.mail.recipient = v;
        }
        if let Ok(v) = env::var("CONTACT_WEBHOOK_URL") {
            self.mail.webhook_url = Some(v);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "sqlite:portfolio.sqlite".to_string(),
            },
            admin: AdminConfig {
                password: "admin123".to_string(),
            },
            mail: MailConfig {
                recipient: "admin@localhost".to_string(),
                webhook_url: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "sqlite:portfolio.sqlite".to_string(),
            },
            admin: AdminConfig {
                // Must be supplied via ADMIN_PASSWORD; empty disables login.
                password: String::new(),
            },
            mail: MailConfig {
                recipient: "admin@localhost".to_string(),
                webhook_url: None,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.admin.password, "admin123");
        assert!(config.mail.webhook_url.is_none());
    }

    #[test]
    fn production_has_no_default_password() {
        let config = AppConfig::production();
        assert!(config.admin.password.is_empty());
    }
}
