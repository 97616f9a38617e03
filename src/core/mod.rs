//! Core bootstrap infrastructure.
//!
//! - [`attributes`] - Capability attribute parsing
//! - [`config`] - Configuration file parsing and validation
//! - [`context`] - Bootstrap context and initialization
//! - [`error`] - Error types
//! - [`runtime`] - Process lifecycle around the context

pub mod attributes;
pub mod config;
pub mod context;
pub mod error;
pub mod runtime;
