//! Notification / cache synchronization.
//!
//! Consumes the scheduling service's change feed and reconciles two
//! pieces of local state: the partitioned query cache and the
//! notification inbox.

mod cache;
mod events;
mod inbox;
mod stream;
mod synchronizer;

pub use cache::{CacheEntity, QueryCache};
pub use events::{parse_event, ChangeAction, ChangeEvent, EntityKind};
pub use inbox::{Notification, NotificationInbox};
pub use stream::{EventStream, StreamState};
pub use synchronizer::{SyncOutcome, Synchronizer};
