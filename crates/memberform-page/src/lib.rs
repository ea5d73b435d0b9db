//! Member Form Page
//!
//! Glue between [`memberform_core`] and the event page. Every behavior
//! here is expressed as ordered [`dom::DomOp`] lists derived from state;
//! the host applies them and never feeds DOM readings back.
//!
//! # Core Concepts
//!
//! - [`FormElements`]: projects form receipts and phase views
//! - [`PanelSwitch`] / [`DiscountKind`]: discount selector wiring
//! - [`StickyHeader`]: edge-triggered scroll pinning
//! - [`SharePopover`]: attendee link popover with clipboard copy

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod dom;
pub mod error;
pub mod form_wiring;
pub mod share;
pub mod sticky;
pub mod visibility;

pub use dom::{DomOp, Target};
pub use error::PageError;
pub use form_wiring::FormElements;
pub use share::{PopoverSpec, SharePopover};
pub use sticky::{StickyHeader, STICKY_THRESHOLD};
pub use visibility::{DiscountKind, DiscountScope, Disclosure, Panel, PanelSwitch};
