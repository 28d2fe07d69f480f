use std::env;
use std::path::PathBuf;

use brochure_cms::SanityConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Where content is read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsBackend {
    Sanity,
    /// In-process store, optionally seeded from `CONTENT_SEED_FILE`.
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    pub cms_backend: CmsBackend,
    pub sanity_project_id: Option<String>,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_token: Option<String>,
    pub sanity_use_cdn: bool,
    pub content_seed_file: Option<PathBuf>,
    /// Shared secret expected in `x-sanity-webhook-secret`.
    pub webhook_secret: Option<String>,
    /// Reject webhooks outright when no secret is configured.
    pub require_webhook_secret: bool,
    pub resend_api_key: Option<String>,
    pub email_from: Option<String>,
    pub contact_email_to: Option<String>,
    /// Hosting platform cache purge endpoint.
    pub purge_url: Option<String>,
    pub purge_token: Option<String>,
    /// `s-maxage` for rendered pages.
    pub page_revalidate_seconds: u64,
    pub site_name: String,
    pub body_limit_bytes: usize,
    pub event_bus_capacity: usize,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cms_backend = match get("CMS_BACKEND").as_deref() {
            None | Some("sanity") => CmsBackend::Sanity,
            Some("memory") => CmsBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "CMS_BACKEND",
                    expected: "\"sanity\" or \"memory\"",
                    value: other.to_string(),
                })
            }
        };

        let event_bus_capacity = parse_or(
            get("EVENT_BUS_CAPACITY"),
            "EVENT_BUS_CAPACITY",
            "a positive integer",
            256usize,
        )?;
        if event_bus_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "EVENT_BUS_CAPACITY",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", "a valid port number", 3000)?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            cms_backend,
            sanity_project_id: get("SANITY_PROJECT_ID"),
            sanity_dataset: get("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
            sanity_api_version: get("SANITY_API_VERSION")
                .unwrap_or_else(|| "2024-01-01".to_string()),
            sanity_token: get("SANITY_API_TOKEN"),
            sanity_use_cdn: parse_bool(get("SANITY_USE_CDN"), "SANITY_USE_CDN", false)?,
            content_seed_file: get("CONTENT_SEED_FILE").map(PathBuf::from),
            webhook_secret: get("SANITY_WEBHOOK_SECRET"),
            require_webhook_secret: parse_bool(
                get("REVALIDATE_REQUIRE_SECRET"),
                "REVALIDATE_REQUIRE_SECRET",
                true,
            )?,
            resend_api_key: get("RESEND_API_KEY"),
            email_from: get("EMAIL_FROM"),
            contact_email_to: get("CONTACT_EMAIL_TO"),
            purge_url: get("PURGE_URL"),
            purge_token: get("PURGE_TOKEN"),
            page_revalidate_seconds: parse_or(
                get("PAGE_REVALIDATE_SECONDS"),
                "PAGE_REVALIDATE_SECONDS",
                "a number of seconds",
                60,
            )?,
            site_name: get("SITE_NAME").unwrap_or_else(|| "Brochure".to_string()),
            body_limit_bytes: parse_or(
                get("BODY_LIMIT_BYTES"),
                "BODY_LIMIT_BYTES",
                "a byte count",
                64 * 1024,
            )?,
            event_bus_capacity,
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Sanity client settings, if a project is configured.
    pub fn sanity(&self) -> Option<SanityConfig> {
        Some(SanityConfig {
            project_id: self.sanity_project_id.clone()?,
            dataset: self.sanity_dataset.clone(),
            api_version: self.sanity_api_version.clone(),
            token: self.sanity_token.clone(),
            use_cdn: self.sanity_use_cdn,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: v,
        }),
    }
}

fn parse_bool(value: Option<String>, var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            var,
            expected: "a boolean",
            value: value.unwrap_or_default(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A missing or suspicious configuration value found at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvIssue {
    pub var: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl EnvIssue {
    fn new(var: &'static str, severity: Severity, message: &str) -> Self {
        Self {
            var,
            severity,
            message: message.to_string(),
        }
    }
}

/// Values copied from a template without being filled in.
fn is_placeholder(value: &str) -> bool {
    let v = value.to_ascii_lowercase();
    v.starts_with("your-")
        || v.starts_with("your_")
        || v.contains("xxxx")
        || v.contains("placeholder")
        || matches!(v.as_str(), "changeme" | "change-me" | "todo" | "replace-me")
}

fn check(
    issues: &mut Vec<EnvIssue>,
    var: &'static str,
    value: Option<&str>,
    missing: Option<(Severity, &str)>,
) {
    match value {
        Some(v) if is_placeholder(v) => {
            let severity = missing.map_or(Severity::Warning, |(s, _)| s);
            issues.push(EnvIssue::new(var, severity, "looks like a placeholder value"));
        }
        Some(_) => {}
        None => {
            if let Some((severity, message)) = missing {
                issues.push(EnvIssue::new(var, severity, message));
            }
        }
    }
}

/// Report missing or placeholder settings. Nothing here aborts startup.
pub fn check_environment(config: &AppConfig) -> Vec<EnvIssue> {
    use Severity::{Error, Warning};

    let mut issues = Vec::new();

    match config.cms_backend {
        CmsBackend::Sanity => {
            check(
                &mut issues,
                "SANITY_PROJECT_ID",
                config.sanity_project_id.as_deref(),
                Some((Error, "required: pages and forms cannot reach the CMS")),
            );
            check(
                &mut issues,
                "SANITY_API_TOKEN",
                config.sanity_token.as_deref(),
                Some((Warning, "not set: form submissions will fail")),
            );
        }
        CmsBackend::Memory => issues.push(EnvIssue::new(
            "CMS_BACKEND",
            Warning,
            "memory backend: submissions are not persisted",
        )),
    }

    let secret_missing = if config.require_webhook_secret {
        (Error, "not set: every revalidation webhook will be rejected")
    } else {
        (Warning, "not set: revalidation webhooks are unauthenticated")
    };
    check(
        &mut issues,
        "SANITY_WEBHOOK_SECRET",
        config.webhook_secret.as_deref(),
        Some(secret_missing),
    );

    check(
        &mut issues,
        "RESEND_API_KEY",
        config.resend_api_key.as_deref(),
        Some((Warning, "not set: email notifications are disabled")),
    );
    if config.resend_api_key.is_some() {
        check(
            &mut issues,
            "EMAIL_FROM",
            config.email_from.as_deref(),
            Some((Error, "required when RESEND_API_KEY is set")),
        );
    }
    check(
        &mut issues,
        "CONTACT_EMAIL_TO",
        config.contact_email_to.as_deref(),
        Some((Warning, "not set: contact submissions are not emailed")),
    );
    check(&mut issues, "PURGE_TOKEN", config.purge_token.as_deref(), None);

    issues
}
