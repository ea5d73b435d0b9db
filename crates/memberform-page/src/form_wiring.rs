//! Wiring for the member-number form on the event page.
//!
//! The template seeds field 1 and the furniture around the submit
//! control; everything here projects registry receipts and phase views
//! onto those elements as ordered command lists.

use crate::dom::{DomOp, Target};
use memberform_core::api::{AddReceipt, RemovalReceipt};
use memberform_core::render::FormView;
use memberform_core::{naming, render};
use tracing::debug;

/// Where the form's fixed elements live on the page.
#[derive(Debug, Clone)]
pub struct FormElements {
    pub container: Target,
    pub loading: Target,
    pub submit: Target,
    pub retry: Target,
    pub errors: Target,
    pub add_control: Target,
}

impl Default for FormElements {
    fn default() -> Self {
        Self {
            container: Target::id("form-members-numbers"),
            loading: Target::id("loading"),
            submit: Target::id("submit_btn"),
            retry: Target::id("retry"),
            errors: Target::id("errors"),
            add_control: Target::id("add_field"),
        }
    }
}

impl FormElements {
    /// Page load: the loading indicator starts hidden.
    pub fn on_ready(&self) -> Vec<DomOp> {
        vec![DomOp::Hide {
            target: self.loading.clone(),
        }]
    }

    /// Append the new row from an accepted add.
    pub fn apply_add(&self, receipt: &AddReceipt) -> Vec<DomOp> {
        vec![DomOp::AppendHtml {
            target: self.container.clone(),
            html: receipt.row.clone(),
        }]
    }

    /// The notice shown when an add is rejected at the cap.
    pub fn cap_alert(&self, cap: usize) -> Vec<DomOp> {
        vec![DomOp::Alert {
            message: render::cap_notice(cap),
        }]
    }

    /// Drop the removed row and renumber everything behind it. Rename
    /// ops address elements by their old names, so the emitted order is
    /// the only valid application order.
    pub fn apply_removal(&self, receipt: &RemovalReceipt) -> Vec<DomOp> {
        let removed_field = naming::field_name(receipt.removed_index);
        let removed_control = naming::remove_name(receipt.removed_index);
        let mut ops = vec![
            DomOp::SetValue {
                target: Target::name(removed_field.as_str()),
                value: String::new(),
            },
            DomOp::RemoveNode {
                target: Target::name(removed_field.as_str()),
            },
            DomOp::RemoveNode {
                target: Target::name(removed_control.as_str()),
            },
        ];
        for rename in &receipt.renames {
            let old_field = naming::field_name(rename.from_index);
            let old_control = naming::remove_name(rename.from_index);
            ops.push(DomOp::SetAttr {
                target: Target::name(old_field.as_str()),
                attr: "name".to_string(),
                value: rename.field_name.clone(),
            });
            // data-remove-index first, while the old name still matches
            ops.push(DomOp::SetAttr {
                target: Target::name(old_control.as_str()),
                attr: "data-remove-index".to_string(),
                value: rename.to_index.to_string(),
            });
            ops.push(DomOp::SetAttr {
                target: Target::name(old_control.as_str()),
                attr: "name".to_string(),
                value: rename.remove_name.clone(),
            });
        }
        debug!(
            removed = receipt.removed_index,
            ops = ops.len(),
            "removal projected"
        );
        ops
    }

    /// Project a phase view onto the page furniture. `Navigate` comes
    /// last; the host stops applying ops once it fires.
    pub fn apply_view(&self, view: &FormView) -> Vec<DomOp> {
        let mut ops = Vec::new();
        if let Some(fragment) = &view.error_fragment {
            ops.push(DomOp::SetHtml {
                target: self.errors.clone(),
                html: fragment.clone(),
            });
        }
        ops.push(toggle(&self.retry, view.retry_visible));
        if let Some(label) = view.submit_label {
            ops.push(DomOp::SetValue {
                target: self.submit.clone(),
                value: label.to_string(),
            });
        }
        ops.push(toggle(&self.loading, view.loading_visible));
        ops.push(toggle(&self.submit, view.submit_visible));
        if let Some(url) = &view.redirect {
            ops.push(DomOp::Navigate { url: url.clone() });
        }
        ops
    }
}

fn toggle(target: &Target, visible: bool) -> DomOp {
    if visible {
        DomOp::Show {
            target: target.clone(),
        }
    } else {
        DomOp::Hide {
            target: target.clone(),
        }
    }
}
