//! Lead Intake API Library
//!
//! Core functionality for the lead-intake backend of a financial-services
//! chatbot: HTTP handlers, a rule-based lead scorer, a double-booking guard
//! over a spreadsheet-backed ledger, and transactional email delivery.
//!
//! # Modules
//!
//! - `booking`: Double-booking guard and recorder for appointment slots.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `mailer`: SMTP email delivery and message composition.
//! - `models`: Core data models.
//! - `scoring`: Lead scoring and product recommendation engine.
//! - `sheets`: Google Sheets values API client.

pub mod booking;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod scoring;
pub mod sheets;
