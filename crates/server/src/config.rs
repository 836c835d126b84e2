use std::fs;

use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub owner_email: String,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            owner_email: "owner@example.com".into(),
            allowed_origins: vec!["http://localhost:3000".into()],
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    owner_email: Option<String>,
    allowed_origins: Option<Vec<String>>,
    max_body_bytes: Option<usize>,
}

/// Defaults, then `server.toml`, then environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(file = SETTINGS_FILE, %error, "ignoring unreadable settings file");
            return;
        }
    };
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.owner_email {
        settings.owner_email = v;
    }
    if let Some(v) = file_cfg.allowed_origins {
        settings.allowed_origins = normalize_origins(v);
    }
    if let Some(v) = file_cfg.max_body_bytes {
        settings.max_body_bytes = v;
    }
}

pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("OWNER_EMAIL") {
        settings.owner_email = v;
    }
    if let Some(v) = lookup("APP__OWNER_EMAIL") {
        settings.owner_email = v;
    }

    if let Some(v) = lookup("APP__ALLOWED_ORIGINS") {
        settings.allowed_origins = normalize_origins(v.split(','));
    }

    if let Some(v) = lookup("APP__MAX_BODY_BYTES") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.max_body_bytes = parsed,
            Err(error) => warn!(value = %v, %error, "ignoring invalid APP__MAX_BODY_BYTES"),
        }
    }
}

fn normalize_origins<I, S>(origins: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    origins
        .into_iter()
        .map(|origin| origin.as_ref().trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .filter(|origin| {
            // Credentialed CORS cannot answer for any origin.
            if origin == "*" {
                warn!("ignoring wildcard CORS origin; list origins explicitly");
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
