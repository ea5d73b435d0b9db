//! The form registry: every live form on a page, each an independent
//! instance behind one handle. Operations take the state lock for their
//! full duration; the submission flow awaits its transport with the lock
//! released and settles the phase afterwards.

use crate::api::{
    AddReceipt, ApiVersion, EventQuery, FormManager, FormSnapshot, FormStats, RemovalReceipt,
    RenameDelta, RosterOps, SubmitFlow, SubmitGate, SubmitOutcome, SubmitReceipt,
    FORM_API_VERSION,
};
use crate::error::{FormError, SubmitError};
use crate::journal::{EventFilter, FormEvent, Journal};
use crate::naming;
use crate::phase::{self, SubmitPhase};
use crate::render::{self, FormView};
use crate::roster::{Roster, DEFAULT_MAX_FIELDS};
use crate::submit::{extract_error_fragment, SubmitPayload, SubmitTransport};
use crate::types::{now_timestamp, FormId, PhaseKind, Timestamp};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Registry configuration
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub max_fields: usize,
    pub placeholder: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_fields: DEFAULT_MAX_FIELDS,
            placeholder: render::FIELD_PLACEHOLDER.to_string(),
        }
    }
}

/// Form entry in the registry
#[derive(Debug)]
#[allow(dead_code)]
struct FormEntry {
    form_id: FormId,
    roster: Roster,
    phase: SubmitPhase,
    created_at: Timestamp,
}

/// Main registry handle that implements all operational traits
pub struct FormRegistry {
    config: FormConfig,
    forms: RwLock<HashMap<FormId, FormEntry>>,
    journal: Journal,
}

impl FormRegistry {
    /// Create a new registry with default configuration
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    /// Create a new registry with custom configuration
    pub fn with_config(config: FormConfig) -> Self {
        Self {
            config,
            forms: RwLock::new(HashMap::new()),
            journal: Journal::default(),
        }
    }

    pub fn api_version(&self) -> ApiVersion {
        FORM_API_VERSION
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn form_count(&self) -> usize {
        self.forms.read().len()
    }

    /// Rendered contents of the appended-rows container.
    pub fn container_markup(&self, form_id: FormId) -> Result<String, FormError> {
        let forms = self.forms.read();
        let entry = forms
            .get(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        Ok(render::container(
            &entry.roster.snapshot(),
            &self.config.placeholder,
        ))
    }

    /// Current view of the submission affordances.
    pub fn view(&self, form_id: FormId) -> Result<FormView, FormError> {
        let forms = self.forms.read();
        let entry = forms
            .get(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        Ok(render::view(&entry.phase))
    }

    fn log(&self, form_id: FormId, action: &str, result: &str) {
        self.journal.append(FormEvent::new(form_id, action, result));
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormManager for FormRegistry {
    fn create_form(&self) -> Result<FormId, FormError> {
        let form_id = FormId::new();
        let entry = FormEntry {
            form_id,
            roster: Roster::with_cap(self.config.max_fields),
            phase: SubmitPhase::Idle,
            created_at: now_timestamp(),
        };
        self.forms.write().insert(form_id, entry);
        self.log(form_id, "create_form", "success");
        debug!(%form_id, "form created");
        Ok(form_id)
    }

    fn discard_form(&self, form_id: FormId) -> Result<(), FormError> {
        let removed = self.forms.write().remove(&form_id);
        match removed {
            Some(_) => {
                self.log(form_id, "discard_form", "success");
                debug!(%form_id, "form discarded");
                Ok(())
            }
            None => Err(FormError::FormNotFound(form_id)),
        }
    }

    fn form_stats(&self, form_id: FormId) -> Result<FormStats, FormError> {
        let forms = self.forms.read();
        let entry = forms
            .get(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        Ok(FormStats {
            form_id,
            live_fields: entry.roster.live_count(),
            count: entry.roster.count(),
            cap: entry.roster.cap(),
            phase: entry.phase.kind(),
            created_at: entry.created_at,
        })
    }
}

impl RosterOps for FormRegistry {
    fn add_field(&self, form_id: FormId) -> Result<AddReceipt, FormError> {
        let mut forms = self.forms.write();
        let entry = forms
            .get_mut(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        match entry.roster.add_field() {
            Ok(index) => {
                self.log(form_id, "add_field", &format!("success: index={index}"));
                debug!(%form_id, index, "field added");
                Ok(AddReceipt {
                    form_id,
                    index,
                    field_name: naming::field_name(index),
                    remove_name: naming::remove_name(index),
                    row: render::field_row(index, "", &self.config.placeholder),
                })
            }
            Err(e) => {
                self.log(form_id, "add_field", &format!("rejected: {e}"));
                warn!(%form_id, error = %e, "add rejected");
                Err(e.into())
            }
        }
    }

    fn remove_field(&self, form_id: FormId, index: usize) -> Result<RemovalReceipt, FormError> {
        let mut forms = self.forms.write();
        let entry = forms
            .get_mut(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        match entry.roster.remove_field(index) {
            Ok(removal) => {
                let renames: Vec<RenameDelta> = removal
                    .renames
                    .iter()
                    .map(|r| RenameDelta {
                        from_index: r.from_index,
                        to_index: r.to_index,
                        field_name: naming::field_name(r.to_index),
                        remove_name: naming::remove_name(r.to_index),
                    })
                    .collect();
                self.log(
                    form_id,
                    "remove_field",
                    &format!("success: index={index} shifted={}", renames.len()),
                );
                debug!(%form_id, index, shifted = renames.len(), "field removed");
                Ok(RemovalReceipt {
                    form_id,
                    removed_index: removal.removed_index,
                    renames,
                })
            }
            Err(e) => {
                self.log(form_id, "remove_field", &format!("rejected: {e}"));
                warn!(%form_id, index, error = %e, "remove rejected");
                Err(e.into())
            }
        }
    }

    fn set_field_value(&self, form_id: FormId, index: usize, value: &str) -> Result<(), FormError> {
        let mut forms = self.forms.write();
        let entry = forms
            .get_mut(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        match entry.roster.set_value(index, value) {
            Ok(()) => {
                // member numbers are personal data; log the index only
                self.log(form_id, "set_field_value", &format!("success: index={index}"));
                Ok(())
            }
            Err(e) => {
                self.log(form_id, "set_field_value", &format!("rejected: {e}"));
                Err(e.into())
            }
        }
    }

    fn snapshot(&self, form_id: FormId) -> Result<FormSnapshot, FormError> {
        let forms = self.forms.read();
        let entry = forms
            .get(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        Ok(FormSnapshot {
            form_id,
            cap: entry.roster.cap(),
            fields: entry.roster.snapshot(),
            phase: entry.phase.clone(),
        })
    }
}

impl SubmitGate for FormRegistry {
    fn check_submit(&self, form_id: FormId) -> Result<(), FormError> {
        let forms = self.forms.read();
        let entry = forms
            .get(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        match entry.roster.validate_for_submit() {
            Ok(()) => {
                self.log(form_id, "check_submit", "success");
                Ok(())
            }
            Err(e) => {
                self.log(form_id, "check_submit", &format!("rejected: {e}"));
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl SubmitFlow for FormRegistry {
    async fn submit(
        &self,
        form_id: FormId,
        transport: &dyn SubmitTransport,
    ) -> Result<SubmitReceipt, FormError> {
        // Gate and dispatch under the lock; the transport await must not
        // hold it.
        let payload = {
            let mut forms = self.forms.write();
            let entry = forms
                .get_mut(&form_id)
                .ok_or(FormError::FormNotFound(form_id))?;
            match &entry.phase {
                SubmitPhase::InFlight => {
                    self.log(form_id, "submit", "rejected: in flight");
                    warn!(%form_id, "submit while in flight");
                    return Err(SubmitError::SubmissionInProgress.into());
                }
                SubmitPhase::Redirected { url } => {
                    let url = url.clone();
                    self.log(form_id, "submit", "rejected: already redirected");
                    return Err(SubmitError::AlreadyRedirected { url }.into());
                }
                SubmitPhase::Idle | SubmitPhase::Failed { .. } => {}
            }
            if let Err(e) = entry.roster.validate_for_submit() {
                self.log(form_id, "submit", &format!("rejected: {e}"));
                return Err(e.into());
            }
            phase::validate_transition(entry.phase.kind(), PhaseKind::InFlight)
                .map_err(FormError::from)?;
            entry.phase = SubmitPhase::InFlight;
            self.log(form_id, "submit", "dispatched");
            debug!(%form_id, fields = entry.roster.live_count(), "submission dispatched");
            SubmitPayload::from_roster(&entry.roster)
        };

        let outcome = transport.submit(&payload).await;

        let mut forms = self.forms.write();
        let entry = forms
            .get_mut(&form_id)
            .ok_or(FormError::FormNotFound(form_id))?;
        let receipt_outcome = match outcome {
            Ok(success) => {
                phase::validate_transition(entry.phase.kind(), PhaseKind::Redirected)
                    .map_err(FormError::from)?;
                entry.phase = SubmitPhase::Redirected {
                    url: success.redirect_url.clone(),
                };
                self.log(form_id, "submit_settled", "redirected");
                debug!(%form_id, url = %success.redirect_url, "submission redirected");
                SubmitOutcome::Redirected {
                    url: success.redirect_url,
                }
            }
            Err(failure) => {
                let error_fragment = extract_error_fragment(&failure.body);
                phase::validate_transition(entry.phase.kind(), PhaseKind::Failed)
                    .map_err(FormError::from)?;
                entry.phase = SubmitPhase::Failed {
                    status: failure.status,
                    error_fragment: error_fragment.clone(),
                };
                self.log(
                    form_id,
                    "submit_settled",
                    &format!("failed: status={}", failure.status),
                );
                warn!(%form_id, status = failure.status, "submission failed");
                SubmitOutcome::Failed {
                    status: failure.status,
                    error_fragment,
                }
            }
        };
        Ok(SubmitReceipt {
            form_id,
            outcome: receipt_outcome,
            timestamp: now_timestamp(),
        })
    }
}

impl EventQuery for FormRegistry {
    fn query_events(
        &self,
        filter: EventFilter,
        limit: usize,
    ) -> Result<Vec<FormEvent>, FormError> {
        Ok(self.journal.query(&filter, limit))
    }
}
