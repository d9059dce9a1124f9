// src/commands/sections.rs

//! Section drafting and batch submission.

use std::path::Path;
use std::str::FromStr;

use crate::builder::OfferBuilder;
use crate::error::Result;
use crate::models::{LocaleConfig, Plan, SessionKind};
use crate::services::ScheduleApi;
use crate::utils::log;

/// A `--set <number>:<kind>=<raw>` count override from the CLI.
///
/// The raw value is passed through the builder's text parsing, so empty
/// or non-numeric input sets the count to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOverride {
    pub section_number: u32,
    pub kind: SessionKind,
    pub raw: String,
}

impl FromStr for SetOverride {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (target, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected <number>:<kind>=<count>, got: {s}"))?;
        let (number, kind) = target
            .split_once(':')
            .ok_or_else(|| format!("Expected <number>:<kind>=<count>, got: {s}"))?;
        let section_number: u32 = number
            .trim()
            .parse()
            .map_err(|_| format!("Invalid section number in override: {s}"))?;
        let kind = SessionKind::from_str(kind)?;
        Ok(Self {
            section_number,
            kind,
            raw: raw.to_string(),
        })
    }
}

/// Replay a plan through the builder operations.
///
/// The builder starts with one empty draft; the first plan entry fills
/// it and later entries append, so numbering starts at 1 exactly as it
/// does when drafting interactively.
pub fn build_drafts(plan: &Plan) -> OfferBuilder {
    let mut builder = OfferBuilder::new();
    for (i, entry) in plan.sections.iter().enumerate() {
        let id = if i == 0 {
            builder.sections()[0].id.clone()
        } else {
            builder.add_section()
        };
        if !entry.period.is_empty() {
            builder.update_section_period(&id, &entry.period);
        }
        for (kind, count) in entry.counts() {
            builder.update_session_count(&id, kind, count);
        }
        if let Some(number) = entry.number {
            builder.update_section_number(&id, number);
        }
    }
    builder
}

/// Apply CLI count overrides, addressed by section number.
fn apply_overrides(builder: &mut OfferBuilder, overrides: &[SetOverride]) {
    for over in overrides {
        match builder.find_by_number(over.section_number) {
            Some(section) => {
                let id = section.id.clone();
                builder.set_session_count(&id, over.kind, &over.raw);
            }
            None => {
                log::warn(&format!(
                    "No draft section numbered {}; override ignored",
                    over.section_number
                ));
            }
        }
    }
}

/// Load a plan, compose the drafts, and submit the derived batch.
pub async fn run_sections(
    api: &dyn ScheduleApi,
    locale: &LocaleConfig,
    plan_path: &Path,
    overrides: &[SetOverride],
    dry_run: bool,
) -> Result<()> {
    let plan = Plan::load(plan_path)?;
    plan.validate()?;

    log::header(
        &locale
            .messages
            .sections_starting
            .replace("{subject}", &plan.subject),
    );
    log::info(
        &locale
            .messages
            .plan_loaded
            .replace("{file}", &plan_path.display().to_string())
            .replace("{count}", &plan.sections.len().to_string()),
    );

    let mut builder = build_drafts(&plan);
    apply_overrides(&mut builder, overrides);
    builder.prune_empty();

    let requests = builder.creation_requests();

    if dry_run {
        log::info(&locale.messages.dry_run_header);
        for request in &requests {
            log::sub_item(&format!(
                "#{} {} (period {}, group {})",
                request.code,
                request.session.label(),
                request.period_id,
                request.group_id
            ));
        }
        print_totals(&builder, requests.len());
        return Ok(());
    }

    // Local refusal: surfaced as a no-op, no network call is made.
    if !builder.sections().iter().any(|s| s.period_id().is_some()) {
        log::warn(&locale.messages.submit_refused_no_period);
        return Ok(());
    }
    if requests.is_empty() {
        log::warn(&locale.messages.submit_refused_empty);
        return Ok(());
    }

    match api.create_sections(&plan.subject, &requests).await {
        Ok(created) => {
            log::success(
                &locale
                    .messages
                    .submit_success
                    .replace("{count}", &created.len().to_string())
                    .replace("{subject}", &plan.subject),
            );
            print_totals(&builder, requests.len());
            // Fresh slate only after a confirmed create.
            builder.reset();
            Ok(())
        }
        Err(e) => {
            // Drafts stay untouched so the plan can be resubmitted.
            log::error(
                &locale
                    .messages
                    .submit_failed
                    .replace("{error}", &e.to_string()),
            );
            Err(e)
        }
    }
}

fn print_totals(builder: &OfferBuilder, batch_size: usize) {
    let totals = builder.totals();
    let items: Vec<(&str, String)> = SessionKind::ALL
        .iter()
        .map(|kind| (kind.label(), totals.get(*kind).to_string()))
        .chain(std::iter::once(("Batch size", batch_size.to_string())))
        .collect();
    log::summary("Derived sessions", &items);
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::builder::SectionCreationRequest;
    use crate::error::AppError;
    use crate::models::{
        Faculty, Module, NewStaffRequest, Period, Professor, RequestDetail, Section, StaffRequest,
        Subject,
    };

    use super::*;

    #[derive(Default)]
    struct StubApi {
        fail_create: bool,
        created: Mutex<Vec<(String, Vec<SectionCreationRequest>)>>,
    }

    #[async_trait]
    impl ScheduleApi for StubApi {
        async fn fetch_faculties(&self) -> Result<Vec<Faculty>> {
            Ok(Vec::new())
        }

        async fn fetch_periods(&self) -> Result<Vec<Period>> {
            Ok(Vec::new())
        }

        async fn fetch_professors(&self) -> Result<Vec<Professor>> {
            Ok(Vec::new())
        }

        async fn fetch_modules(&self) -> Result<Vec<Module>> {
            Ok(Vec::new())
        }

        async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
            Ok(Vec::new())
        }

        async fn fetch_requests(&self, _faculty_id: &str) -> Result<Vec<StaffRequest>> {
            Ok(Vec::new())
        }

        async fn fetch_request_details(&self, _request_id: &str) -> Result<Vec<RequestDetail>> {
            Ok(Vec::new())
        }

        async fn create_sections(
            &self,
            subject_id: &str,
            batch: &[SectionCreationRequest],
        ) -> Result<Vec<Section>> {
            if self.fail_create {
                return Err(AppError::api(500, "boom"));
            }
            self.created
                .lock()
                .unwrap()
                .push((subject_id.to_string(), batch.to_vec()));
            Ok(batch
                .iter()
                .enumerate()
                .map(|(i, request)| Section {
                    id: format!("s{i}"),
                    subject_id: subject_id.to_string(),
                    period_id: request.period_id.clone(),
                    code: request.code,
                    session: request.session,
                })
                .collect())
        }

        async fn create_request(&self, _request: &NewStaffRequest) -> Result<StaffRequest> {
            unimplemented!("not used by these tests")
        }

        async fn delete_request(&self, _request_id: &str) -> Result<()> {
            Ok(())
        }

        fn origin(&self) -> &str {
            "stub-origin"
        }
    }

    fn write_plan(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_set_override_parsing() {
        let over: SetOverride = "2:lab=3".parse().unwrap();
        assert_eq!(over.section_number, 2);
        assert_eq!(over.kind, SessionKind::Lab);
        assert_eq!(over.raw, "3");

        assert!("lab=3".parse::<SetOverride>().is_err());
        assert!("2:seminar=3".parse::<SetOverride>().is_err());
        assert!("x:lab=3".parse::<SetOverride>().is_err());
    }

    #[test]
    fn test_build_drafts_numbers_from_one() {
        let plan: Plan = toml::from_str(
            "subject = \"s\"\n\
             [[sections]]\nperiod = \"p1-T\"\nlectures = 1\n\
             [[sections]]\nperiod = \"p1-T\"\nlabs = 2\n",
        )
        .unwrap();

        let builder = build_drafts(&plan);
        let numbers: Vec<u32> = builder.sections().iter().map(|s| s.section_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_build_drafts_resolves_number_collisions() {
        let plan: Plan = toml::from_str(
            "subject = \"s\"\n\
             [[sections]]\nperiod = \"p1-T\"\nlectures = 1\nnumber = 4\n\
             [[sections]]\nperiod = \"p1-T\"\nlabs = 1\nnumber = 4\n",
        )
        .unwrap();

        let builder = build_drafts(&plan);
        let mut numbers: Vec<u32> = builder.sections().iter().map(|s| s.section_number).collect();
        assert_eq!(numbers[0], 4);
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), 2);
    }

    #[tokio::test]
    async fn test_run_sections_submits_batch() {
        let file = write_plan(
            "subject = \"subj-9\"\n\
             [[sections]]\nperiod = \"2026A-First Term\"\nlectures = 2\nlabs = 1\n",
        );
        let api = StubApi::default();

        run_sections(&api, &LocaleConfig::default(), file.path(), &[], false)
            .await
            .unwrap();

        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        let (subject, batch) = &created[0];
        assert_eq!(subject, "subj-9");
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|r| r.period_id == "2026A"));
    }

    #[tokio::test]
    async fn test_run_sections_refuses_without_period() {
        let file = write_plan(
            "subject = \"subj-9\"\n\
             [[sections]]\nlectures = 2\n",
        );
        let api = StubApi::default();

        // Refusal is a local no-op, not an error.
        run_sections(&api, &LocaleConfig::default(), file.path(), &[], false)
            .await
            .unwrap();
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_sections_refuses_empty_batch() {
        let file = write_plan(
            "subject = \"subj-9\"\n\
             [[sections]]\nperiod = \"p1-T\"\n",
        );
        let api = StubApi::default();

        run_sections(&api, &LocaleConfig::default(), file.path(), &[], false)
            .await
            .unwrap();
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_sections_override_zeroes_count() {
        let file = write_plan(
            "subject = \"subj-9\"\n\
             [[sections]]\nperiod = \"p1-T\"\nlectures = 2\n",
        );
        let api = StubApi::default();
        let overrides = vec![SetOverride {
            section_number: 1,
            kind: SessionKind::Lecture,
            raw: String::new(),
        }];

        // Zeroing the only count leaves an empty batch: refused, no call.
        run_sections(&api, &LocaleConfig::default(), file.path(), &overrides, false)
            .await
            .unwrap();
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_sections_propagates_transport_failure() {
        let file = write_plan(
            "subject = \"subj-9\"\n\
             [[sections]]\nperiod = \"p1-T\"\nworkshops = 1\n",
        );
        let api = StubApi {
            fail_create: true,
            ..StubApi::default()
        };

        let result = run_sections(&api, &LocaleConfig::default(), file.path(), &[], false).await;
        assert!(matches!(result, Err(AppError::Api { status: 500, .. })));
    }
}
