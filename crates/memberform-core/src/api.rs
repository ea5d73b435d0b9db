//! Operation traits implemented by [`crate::registry::FormRegistry`],
//! and the receipt types callers apply to the page. Receipts carry the
//! markup/rename deltas so the host can project each structural change
//! without re-rendering the whole container.

use crate::error::FormError;
use crate::journal::{EventFilter, FormEvent};
use crate::phase::SubmitPhase;
use crate::roster::FieldSnapshot;
use crate::submit::SubmitTransport;
use crate::types::{FormId, PhaseKind, Timestamp};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

pub const FORM_API_VERSION: ApiVersion = ApiVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormStats {
    pub form_id: FormId,
    pub live_fields: usize,
    /// Allocation counter: `live_fields + 1`.
    pub count: usize,
    pub cap: usize,
    pub phase: PhaseKind,
    pub created_at: Timestamp,
}

/// Successful add: the new field's index, contract names, and the row to
/// append to the container.
#[derive(Debug, Clone, Serialize)]
pub struct AddReceipt {
    pub form_id: FormId,
    pub index: usize,
    pub field_name: String,
    pub remove_name: String,
    pub row: String,
}

/// One rename to apply after a removal. Names are the field's new names
/// at `to_index`; the remove control's bound index moves with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameDelta {
    pub from_index: usize,
    pub to_index: usize,
    pub field_name: String,
    pub remove_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovalReceipt {
    pub form_id: FormId,
    pub removed_index: usize,
    /// Ascending by `from_index`; safe to apply in order.
    pub renames: Vec<RenameDelta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    Redirected {
        url: String,
    },
    Failed {
        status: u16,
        error_fragment: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub form_id: FormId,
    pub outcome: SubmitOutcome,
    pub timestamp: Timestamp,
}

/// Full authoritative state of one form.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub form_id: FormId,
    pub cap: usize,
    pub fields: Vec<FieldSnapshot>,
    pub phase: SubmitPhase,
}

pub trait FormManager {
    fn create_form(&self) -> Result<FormId, FormError>;
    fn discard_form(&self, form_id: FormId) -> Result<(), FormError>;
    fn form_stats(&self, form_id: FormId) -> Result<FormStats, FormError>;
}

pub trait RosterOps {
    fn add_field(&self, form_id: FormId) -> Result<AddReceipt, FormError>;
    fn remove_field(&self, form_id: FormId, index: usize) -> Result<RemovalReceipt, FormError>;
    fn set_field_value(&self, form_id: FormId, index: usize, value: &str)
        -> Result<(), FormError>;
    fn snapshot(&self, form_id: FormId) -> Result<FormSnapshot, FormError>;
}

/// The synchronous validation gate, checkable without dispatching.
pub trait SubmitGate {
    fn check_submit(&self, form_id: FormId) -> Result<(), FormError>;
}

/// The full submission flow: gate, dispatch through the transport, and
/// settle the phase from the outcome.
#[async_trait]
pub trait SubmitFlow {
    async fn submit(
        &self,
        form_id: FormId,
        transport: &dyn SubmitTransport,
    ) -> Result<SubmitReceipt, FormError>;
}

pub trait EventQuery {
    fn query_events(&self, filter: EventFilter, limit: usize)
        -> Result<Vec<FormEvent>, FormError>;
}
