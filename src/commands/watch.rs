// src/commands/watch.rs

//! Live change watching.
//!
//! Connects to the notification stream and feeds every frame through the
//! synchronizer until the stream ends, errors out, or the user hits
//! Ctrl-C. Dropping the stream on any exit path closes the connection;
//! there is no automatic reconnect.

use crate::error::Result;
use crate::models::{Config, LocaleConfig};
use crate::services::ScheduleApi;
use crate::sync::{EventStream, Synchronizer};
use crate::utils::http::create_stream_client;
use crate::utils::log;

/// How many recent notifications to print when the watch ends.
const INBOX_DISPLAY_MAX: usize = 10;

/// Watch the change feed, optionally warming the cache for one faculty.
pub async fn run_watch(
    api: &dyn ScheduleApi,
    config: &Config,
    locale: &LocaleConfig,
    faculty: Option<&str>,
    ack_all: bool,
) -> Result<()> {
    log::header(&locale.messages.watch_starting);

    let mut sync = Synchronizer::new(api.origin(), locale.clone());

    if let Some(faculty_id) = faculty {
        warm_cache(api, locale, &mut sync, faculty_id).await?;
    }

    let stream_client = create_stream_client(&config.api)?;
    let url = config.stream_url()?;
    let mut stream = match EventStream::connect(&stream_client, &url).await {
        Ok(stream) => stream,
        Err(e) => {
            log::error(
                &locale
                    .messages
                    .stream_error
                    .replace("{error}", &e.to_string()),
            );
            return Err(e);
        }
    };
    log::info(
        &locale
            .messages
            .watch_connected
            .replace("{url}", url.as_str()),
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info(&locale.messages.watch_closed);
                break;
            }
            frame = stream.next_frame() => match frame {
                Some(Ok(payload)) => {
                    sync.handle_frame(&payload);
                }
                Some(Err(e)) => {
                    log::error(
                        &locale
                            .messages
                            .stream_error
                            .replace("{error}", &e.to_string()),
                    );
                    break;
                }
                None => {
                    log::info(&locale.messages.watch_closed);
                    break;
                }
            }
        }
    }

    print_session_summary(&mut sync, locale, ack_all);
    // The inbox dies with the session.
    sync.inbox_mut().clear_all();
    Ok(())
}

/// Seed the cache from fetches before the stream starts patching it.
async fn warm_cache(
    api: &dyn ScheduleApi,
    locale: &LocaleConfig,
    sync: &mut Synchronizer,
    faculty_id: &str,
) -> Result<()> {
    let requests = api.fetch_requests(faculty_id).await?;
    for request in &requests {
        let details = api.fetch_request_details(&request.id).await?;
        sync.cache_mut().seed_details(&request.id, details);
    }
    log::info(
        &locale
            .messages
            .cache_warmed
            .replace("{count}", &requests.len().to_string())
            .replace("{faculty}", faculty_id),
    );
    sync.cache_mut().seed_requests(faculty_id, requests);
    Ok(())
}

/// Print the inbox and session stats.
///
/// Displayed notifications count as read; `ack_all` marks the rest read
/// too.
fn print_session_summary(sync: &mut Synchronizer, locale: &LocaleConfig, ack_all: bool) {
    log::info(
        &locale
            .messages
            .inbox_header
            .replace("{unread}", &sync.inbox().unread_count().to_string()),
    );

    let displayed: Vec<(String, String, String)> = sync
        .inbox()
        .notifications()
        .iter()
        .take(INBOX_DISPLAY_MAX)
        .map(|n| (n.id.clone(), n.title.clone(), n.message.clone()))
        .collect();
    for (id, title, message) in displayed {
        log::sub_item(&format!("{title}: {message}"));
        sync.inbox_mut().mark_as_read(&id);
    }

    if ack_all {
        sync.inbox_mut().mark_all_as_read();
    }

    log::summary(
        "Watch session",
        &[
            ("Events applied", sync.applied().to_string()),
            ("Notifications", sync.inbox().len().to_string()),
            ("Still unread", sync.inbox().unread_count().to_string()),
            ("Cached entities", sync.cache().len().to_string()),
        ],
    );
}

#[cfg(test)]
mod tests {
    use crate::models::LocaleConfig;
    use crate::sync::Synchronizer;

    use super::*;

    fn frame(id: &str) -> String {
        format!(
            r#"{{"message":{{"id":"{id}","facultyId":"f1"}},"action":"create","type":"request","origin":"other"}}"#
        )
    }

    #[test]
    fn test_summary_marks_displayed_as_read() {
        let mut sync = Synchronizer::new("me", LocaleConfig::default());
        for i in 0..3 {
            sync.handle_frame(&frame(&format!("r{i}")));
        }
        assert_eq!(sync.inbox().unread_count(), 3);

        print_session_summary(&mut sync, &LocaleConfig::default(), false);
        // All three fit on screen, so all three count as read.
        assert_eq!(sync.inbox().len(), 3);
        assert_eq!(sync.inbox().unread_count(), 0);
    }

    #[test]
    fn test_overflow_stays_unread_unless_acked() {
        let mut sync = Synchronizer::new("me", LocaleConfig::default());
        for i in 0..(INBOX_DISPLAY_MAX + 5) {
            sync.handle_frame(&frame(&format!("r{i}")));
        }

        print_session_summary(&mut sync, &LocaleConfig::default(), false);
        assert_eq!(sync.inbox().unread_count(), 5);

        print_session_summary(&mut sync, &LocaleConfig::default(), true);
        assert_eq!(sync.inbox().unread_count(), 0);
    }
}
