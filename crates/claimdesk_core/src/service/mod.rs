//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs for the editor shell.
//! - Keep UI layers decoupled from storage details.

pub mod document_service;
