//! Shared type definitions for the Recreation Equalizer.
//!
//! This crate is the single source of truth for the values exchanged between
//! the propagation engine and the UI shell. Types defined here flow to
//! `TypeScript` via `ts-rs` so a web front end can render them directly.
//!
//! # Modules
//!
//! - [`service`] -- The five ecosystem services, driver designation, slider domains
//! - [`vector`] -- Interaction rows and bounded result vectors
//! - [`context`] -- Area, regime and integrity parameters
//! - [`event`] -- Change notifications and the outcome rendered in response

pub mod context;
pub mod event;
pub mod service;
pub mod vector;

// Re-export all public types at crate root for convenience.
pub use context::{ContextParameters, Integrity, managed_fraction};
pub use event::{Trigger, UpdateEvent, UpdateOutcome};
pub use service::{SERVICE_COUNT, Service, ServiceRange};
pub use vector::{InteractionRow, ResultVector};
