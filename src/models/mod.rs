// src/models/mod.rs

//! Domain models for the offerdesk client.
//!
//! This module contains all data structures used throughout the
//! application, organized by their primary purpose.

mod config;
mod entities;
mod locale;
mod plan;
mod session;

// Re-export all public types
pub use config::{ApiConfig, Config, LoggingConfig, StreamConfig};
pub use entities::{
    Faculty, Module, NewStaffRequest, Period, Professor, RequestDetail, Section, StaffRequest,
    Subject,
};
pub use locale::{LocaleConfig, MessageLocale, ToastLocale};
pub use plan::{Plan, PlanSection};
pub use session::SessionKind;
