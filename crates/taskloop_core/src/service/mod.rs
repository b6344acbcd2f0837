//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations, recurrence generation and
//!   persistence into use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod task_service;
