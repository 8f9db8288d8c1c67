//! # sigbox-domain
//!
//! Pure domain model for the sigbox telemetry receiver.
//!
//! ## Responsibilities
//! - Foundational types: record identifiers, error conventions, timestamps
//! - Define **Telemetry** (the fields a network operator callback carries)
//! - Define **Device records** (telemetry once the store has accepted it)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod record;
