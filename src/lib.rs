//! HygieneCheck client library
//!
//! Core pipeline: an analysis result from the backend is normalized
//! into a [`models::Report`], appended to the durable
//! [`storage::ReportStore`], and the dashboard recomputes its KPIs and
//! filtered views from the fresh snapshot.

pub mod backend;
pub mod cli;
pub mod dashboard;
pub mod models;
pub mod storage;
