// src/commands/validate.rs

//! Configuration and plan validation.

use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, LocaleConfig, Plan};
use crate::utils::log;

use super::sections::build_drafts;

/// Validate config, locale, and (optionally) a plan file.
pub fn run_validate(
    locale: &LocaleConfig,
    config_path: &Path,
    locale_path: &Path,
    plan_path: Option<&Path>,
) -> Result<()> {
    log::header(&locale.messages.validate_starting);

    let checked = Config::load(config_path).and_then(|config| {
        config.validate()?;
        let stream_url = config.stream_url()?;
        Ok((config, stream_url))
    });
    match checked {
        Ok((config, stream_url)) => {
            log::success(&locale.messages.validate_config_success);
            log::sub_item(&format!("base_url: {}", config.api.base_url));
            log::sub_item(&format!("timeout_secs: {}", config.api.timeout_secs));
            log::sub_item(&format!("stream: {stream_url}"));
        }
        Err(e) => {
            log::error(
                &locale
                    .messages
                    .validate_failed
                    .replace("{error}", &e.to_string()),
            );
            return Err(e);
        }
    }

    // The locale file is optional; defaults apply when it is absent.
    if locale_path.exists() {
        let parsed = fs::read_to_string(locale_path)
            .map_err(AppError::from)
            .and_then(|content| toml::from_str::<LocaleConfig>(&content).map_err(AppError::from));
        match parsed {
            Ok(_) => log::success(&locale.messages.validate_locale_success),
            Err(e) => {
                log::error(
                    &locale
                        .messages
                        .validate_failed
                        .replace("{error}", &e.to_string()),
                );
                return Err(e);
            }
        }
    } else {
        log::sub_item(&format!(
            "locale file {} not found, defaults apply",
            locale_path.display()
        ));
    }

    if let Some(path) = plan_path {
        let checked = Plan::load(path).and_then(|plan| {
            plan.validate()?;
            let builder = build_drafts(&plan);
            builder.validate_for_submit()?;
            Ok(plan)
        });
        match checked {
            Ok(plan) => {
                log::success(
                    &locale
                        .messages
                        .validate_plan_success
                        .replace("{count}", &plan.sections.len().to_string())
                        .replace("{subject}", &plan.subject),
                );
            }
            Err(e) => {
                log::error(
                    &locale
                        .messages
                        .validate_failed
                        .replace("{error}", &e.to_string()),
                );
                return Err(e);
            }
        }
    }

    Ok(())
}
