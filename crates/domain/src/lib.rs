//! Domain layer for the registration portal.
//!
//! This crate contains:
//! - Domain models (Program, Announcement, Application, EmailTemplate, AdminUser)
//! - Per-program form field extraction
//! - Notification template formatting

pub mod models;
pub mod services;
