//! The command vocabulary the page host executes.
//!
//! Wiring code never touches elements directly. It emits ordered
//! [`DomOp`] lists; the host applies them one by one and reads nothing
//! back.

use serde::{Deserialize, Serialize};

/// How a command addresses its elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "key", rename_all = "snake_case")]
pub enum Target {
    /// `#id` lookup
    Id(String),
    /// CSS selector, possibly matching several elements
    Css(String),
    /// `[name="..."]` lookup
    Name(String),
}

impl Target {
    pub fn id(value: impl Into<String>) -> Self {
        Target::Id(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Target::Css(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Target::Name(value.into())
    }
}

/// One host-side mutation. Ops in a list apply in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomOp {
    Show { target: Target },
    Hide { target: Target },
    SetText { target: Target, text: String },
    SetValue { target: Target, value: String },
    SetHtml { target: Target, html: String },
    SetStyle { target: Target, property: String, value: String },
    SetAttr { target: Target, attr: String, value: String },
    AppendHtml { target: Target, html: String },
    RemoveNode { target: Target },
    /// Select the element's contents and copy them to the clipboard.
    CopySelection { target: Target },
    Navigate { url: String },
    Alert { message: String },
}
