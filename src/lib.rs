//! Complaint Intake - Conversational cyber-crime complaint collection
//!
//! This crate drives a complaint intake dialogue over a one-message-at-a-time
//! channel: it collects personal and per-transaction details, validates each
//! value, supports serial-number edits before confirmation and registers the
//! confirmed complaint exactly once.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
