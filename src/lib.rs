//! CoS Portal - Certificate of Sponsorship applicant extraction backend.
//!
//! This crate turns email attachments (PDF/Word) into structured UK CoS
//! applicant records via LLM-assisted extraction, merges multi-document
//! batches into one record per artist, and tracks the downstream workflow
//! (copy-to-clipboard, supporting-document upload, reply drafts).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
