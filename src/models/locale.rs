// src/models/locale.rs

//! User-facing message catalog.
//!
//! All console text lives here so deployments can relabel or translate
//! output by shipping a `locale.toml`. Templates use `{placeholder}`
//! substitution applied at the call site.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Locale configuration with all user-facing text.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocaleConfig {
    /// Command progress and result messages
    #[serde(default)]
    pub messages: MessageLocale,

    /// Transient change-notification messages
    #[serde(default)]
    pub toasts: ToastLocale,
}

impl LocaleConfig {
    /// Load locale configuration or return defaults if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let loaded = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        match loaded {
            Ok(locale) => locale,
            Err(e) => {
                log::warn!(
                    "Locale load failed from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Command progress and result messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageLocale {
    pub fetch_starting: String,
    pub fetch_complete: String,
    pub sections_starting: String,
    pub plan_loaded: String,
    pub dry_run_header: String,
    pub submit_refused_no_period: String,
    pub submit_refused_empty: String,
    pub submit_success: String,
    pub submit_failed: String,
    pub watch_starting: String,
    pub watch_connected: String,
    pub watch_closed: String,
    pub stream_error: String,
    pub cache_warmed: String,
    pub inbox_header: String,
    pub request_create_success: String,
    pub request_delete_success: String,
    pub validate_starting: String,
    pub validate_config_success: String,
    pub validate_locale_success: String,
    pub validate_plan_success: String,
    pub validate_failed: String,
}

impl Default for MessageLocale {
    fn default() -> Self {
        Self {
            fetch_starting: "📋 Fetching {what} from the scheduling service...".to_string(),
            fetch_complete: "{count} {what} loaded".to_string(),
            sections_starting: "🗂️  Drafting sections for subject {subject}...".to_string(),
            plan_loaded: "Plan {file}: {count} draft section(s)".to_string(),
            dry_run_header: "Derived creation requests (dry run)".to_string(),
            submit_refused_no_period: "No draft section has a period assigned; nothing to submit"
                .to_string(),
            submit_refused_empty: "Derived request batch is empty; nothing to submit".to_string(),
            submit_success: "💾 Created {count} section(s) for subject {subject}".to_string(),
            submit_failed: "Section creation failed: {error}".to_string(),
            watch_starting: "🔔 Watching scheduling changes...".to_string(),
            watch_connected: "Notification stream connected: {url}".to_string(),
            watch_closed: "Notification stream closed".to_string(),
            stream_error: "Notification stream error: {error}".to_string(),
            cache_warmed: "Warmed cache with {count} request(s) for faculty {faculty}".to_string(),
            inbox_header: "Inbox ({unread} unread)".to_string(),
            request_create_success: "Staffing request {id} created (faculty {faculty})".to_string(),
            request_delete_success: "Staffing request {id} deleted".to_string(),
            validate_starting: "Validating configuration...".to_string(),
            validate_config_success: "Configuration OK".to_string(),
            validate_locale_success: "Locale catalog OK".to_string(),
            validate_plan_success: "Plan OK ({count} section(s) for subject {subject})".to_string(),
            validate_failed: "Validation failed: {error}".to_string(),
        }
    }
}

/// Transient change-notification messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastLocale {
    pub request_created: String,
    pub request_updated: String,
    pub request_deleted: String,
    pub session_created: String,
    pub session_updated: String,
    pub session_deleted: String,
    pub request_body: String,
    pub session_body: String,
}

impl Default for ToastLocale {
    fn default() -> Self {
        Self {
            request_created: "Staffing request created".to_string(),
            request_updated: "Staffing request updated".to_string(),
            request_deleted: "Staffing request deleted".to_string(),
            session_created: "Session created".to_string(),
            session_updated: "Session updated".to_string(),
            session_deleted: "Session deleted".to_string(),
            request_body: "Request {id} · faculty {faculty}".to_string(),
            session_body: "Session {id} · request {request}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_templates_have_placeholders() {
        let locale = LocaleConfig::default();
        assert!(locale.messages.submit_success.contains("{count}"));
        assert!(locale.toasts.request_body.contains("{faculty}"));
        assert!(locale.toasts.session_body.contains("{request}"));
    }

    #[test]
    fn test_load_or_default_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[toasts]").unwrap();
        writeln!(file, "request_created = \"Solicitud creada\"").unwrap();

        let locale = LocaleConfig::load_or_default(file.path());
        assert_eq!(locale.toasts.request_created, "Solicitud creada");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let locale = LocaleConfig::load_or_default("/nonexistent/locale.toml");
        assert_eq!(
            locale.toasts.request_created,
            LocaleConfig::default().toasts.request_created
        );
    }
}
