//! One-way projection of roster and phase onto the page.
//!
//! Markup is produced from state, applied by the host, and never read
//! back. Row markup matches what the page always appended, except that
//! the remove control carries its current index as a data attribute
//! instead of regenerated inline handler code.

use crate::naming;
use crate::phase::SubmitPhase;
use crate::roster::FieldSnapshot;
use serde::Serialize;

pub const FIELD_PLACEHOLDER: &str = "Insert your member number here";
pub const REMOVE_LABEL: &str = "X";
pub const SUBMIT_LABEL_RETRY: &str = "Retry";

/// User-facing notice when an add is rejected at the cap. With the
/// default cap this is the exact text the page alerts with.
pub fn cap_notice(cap: usize) -> String {
    format!("You can only add up to {cap} member's numbers")
}

/// Markup for one manager-created row: the number input and its paired
/// remove control. A blank value renders no `value` attribute, which is
/// byte-identical to the row as first appended.
pub fn field_row(index: usize, value: &str, placeholder: &str) -> String {
    let field = naming::field_name(index);
    let remove = naming::remove_name(index);
    let value_attr = if value.is_empty() {
        String::new()
    } else {
        format!(" value=\"{}\"", escape_attr(value))
    };
    format!(
        "<div class=\"input-group input-group-lg mx-auto width-50-percentage\">\
         <input name=\"{field}\" type=\"number\" class=\"form-control mt-3 input_added\" \
         placeholder=\"{placeholder}\"{value_attr} required/>\
         <input name=\"{remove}\" type=\"button\" value=\"{REMOVE_LABEL}\" \
         data-remove-index=\"{index}\"/></div>"
    )
}

/// Full contents of the appended-rows container. The seeded field lives
/// in the page template, so only removable fields produce rows here.
pub fn container(fields: &[FieldSnapshot], placeholder: &str) -> String {
    fields
        .iter()
        .filter(|f| f.removable)
        .map(|f| field_row(f.index, &f.value, placeholder))
        .collect()
}

/// What the page shows for a given phase: which of the submit control,
/// loading indicator and retry region are visible, the submit label
/// override, and the failure fragment or redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub submit_visible: bool,
    pub loading_visible: bool,
    pub retry_visible: bool,
    pub submit_label: Option<&'static str>,
    pub error_fragment: Option<String>,
    pub redirect: Option<String>,
}

pub fn view(phase: &SubmitPhase) -> FormView {
    match phase {
        SubmitPhase::Idle => FormView {
            submit_visible: true,
            loading_visible: false,
            retry_visible: false,
            submit_label: None,
            error_fragment: None,
            redirect: None,
        },
        SubmitPhase::InFlight => FormView {
            submit_visible: false,
            loading_visible: true,
            retry_visible: false,
            submit_label: None,
            error_fragment: None,
            redirect: None,
        },
        SubmitPhase::Failed { error_fragment, .. } => FormView {
            submit_visible: true,
            loading_visible: false,
            retry_visible: true,
            submit_label: Some(SUBMIT_LABEL_RETRY),
            error_fragment: error_fragment.clone(),
            redirect: None,
        },
        // The success handler re-shows the submit control while the
        // browser navigates away.
        SubmitPhase::Redirected { url } => FormView {
            submit_visible: true,
            loading_visible: false,
            retry_visible: false,
            submit_label: None,
            error_fragment: None,
            redirect: Some(url.clone()),
        },
    }
}

/// Minimal attribute-value escape for markup built from field values.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
