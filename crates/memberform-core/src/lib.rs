//! Member Form Core
//!
//! Capped, contiguously indexed member-number field lists with a
//! submission flow. State is the single source of truth; markup and
//! control visibility are derived projections of it.
//!
//! # Core Concepts
//!
//! - [`Roster`]: ordered field list, indices `1..=n` with no holes
//! - [`FormRegistry`]: concurrent handle over many live forms
//! - [`SubmitPhase`]: Idle / InFlight / Failed / Redirected machine
//! - [`SubmitTransport`]: async seam for the submission endpoint
//! - [`journal::Journal`]: append-only event log of every mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use memberform_core::{FormRegistry, FormManager, RosterOps};
//!
//! let registry = FormRegistry::new();
//! let form_id = registry.create_form()?;
//!
//! // Fields take the lowest free index and renumber on removal
//! let receipt = registry.add_field(form_id)?;
//! assert_eq!(receipt.field_name, "member_number_2");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod journal;
pub mod naming;
pub mod phase;
pub mod render;
pub mod roster;
pub mod submit;
pub mod test_harness;
pub mod types;

pub mod api;
pub mod error;
pub mod registry;

pub use api::*;
pub use error::*;
pub use registry::*;
pub use types::*;

pub use phase::SubmitPhase;
pub use roster::{FieldSnapshot, Roster};
pub use submit::{SubmitPayload, SubmitTransport};

/// Re-export test harness for external use
pub use test_harness::{run_simulator, SimulatorConfig, TestHarness};
