// src/commands/fetch.rs

//! Entity listing command.

use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::LocaleConfig;
use crate::services::ScheduleApi;
use crate::utils::log;

/// What to list from the scheduling service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Faculties,
    Periods,
    Professors,
    Modules,
    Subjects,
    Requests,
}

impl FetchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchTarget::Faculties => "faculties",
            FetchTarget::Periods => "periods",
            FetchTarget::Professors => "professors",
            FetchTarget::Modules => "modules",
            FetchTarget::Subjects => "subjects",
            FetchTarget::Requests => "requests",
        }
    }
}

impl FromStr for FetchTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "faculties" => Ok(FetchTarget::Faculties),
            "periods" => Ok(FetchTarget::Periods),
            "professors" => Ok(FetchTarget::Professors),
            "modules" => Ok(FetchTarget::Modules),
            "subjects" => Ok(FetchTarget::Subjects),
            "requests" => Ok(FetchTarget::Requests),
            other => Err(format!("Unknown fetch target: {other}")),
        }
    }
}

/// List one entity collection to the console.
pub async fn run_fetch(
    api: &dyn ScheduleApi,
    locale: &LocaleConfig,
    show_detail: bool,
    target: FetchTarget,
    faculty: Option<&str>,
) -> Result<()> {
    log::header(
        &locale
            .messages
            .fetch_starting
            .replace("{what}", target.as_str()),
    );

    let lines = match target {
        FetchTarget::Faculties => api
            .fetch_faculties()
            .await?
            .into_iter()
            .map(|f| format!("{} — {}", f.id, f.name))
            .collect::<Vec<_>>(),
        FetchTarget::Periods => api
            .fetch_periods()
            .await?
            .into_iter()
            .map(|p| format!("{} — {}", p.token(), p.label))
            .collect(),
        FetchTarget::Professors => api
            .fetch_professors()
            .await?
            .into_iter()
            .map(|p| match p.email {
                Some(email) => format!("{} — {} <{}>", p.id, p.name, email),
                None => format!("{} — {}", p.id, p.name),
            })
            .collect(),
        FetchTarget::Modules => api
            .fetch_modules()
            .await?
            .into_iter()
            .map(|m| {
                let span = match (m.start_time, m.end_time) {
                    (Some(start), Some(end)) => format!(" {start}-{end}"),
                    _ => String::new(),
                };
                format!("{} — {}{}", m.id, m.label, span)
            })
            .collect(),
        FetchTarget::Subjects => api
            .fetch_subjects()
            .await?
            .into_iter()
            .map(|s| format!("{} — {} (faculty {})", s.id, s.name, s.faculty_id))
            .collect(),
        FetchTarget::Requests => {
            let faculty_id = faculty.ok_or_else(|| {
                AppError::validation("the requests target needs --faculty <id>")
            })?;
            api.fetch_requests(faculty_id)
                .await?
                .into_iter()
                .map(|r| {
                    format!(
                        "{} — subject {}, status {}",
                        r.id,
                        r.subject_id.as_deref().unwrap_or("?"),
                        r.status.as_deref().unwrap_or("?")
                    )
                })
                .collect()
        }
    };

    if show_detail {
        for line in &lines {
            log::sub_item(line);
        }
    }

    log::success(
        &locale
            .messages
            .fetch_complete
            .replace("{count}", &lines.len().to_string())
            .replace("{what}", target.as_str()),
    );
    Ok(())
}
