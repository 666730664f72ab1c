//! Hostnote - hospitality operations backend
//!
//! Records venue sessions for a tenant, links the patrons and staff who took
//! part, and keeps a one-per-day attendance history per patron.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
