//! Share popover for the attendee's personal page link.
//!
//! The popover body is generated markup: a read-only input holding the
//! link, a copy button bound through a data attribute, and an outbound
//! anchor to the page itself.

use crate::dom::{DomOp, Target};
use memberform_core::render::escape_attr;
use serde::Serialize;

pub const PLACEMENT: &str = "bottom";

/// What the host hands its popover widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopoverSpec {
    pub placement: &'static str,
    pub html: bool,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct SharePopover {
    attendee_url: String,
    copy_icon_src: String,
    landing_url: String,
    view_label: String,
}

impl SharePopover {
    pub fn new(
        attendee_url: impl Into<String>,
        copy_icon_src: impl Into<String>,
        landing_url: impl Into<String>,
    ) -> Self {
        Self {
            attendee_url: attendee_url.into(),
            copy_icon_src: copy_icon_src.into(),
            landing_url: landing_url.into(),
            view_label: "View your page".to_string(),
        }
    }

    pub fn spec(&self) -> PopoverSpec {
        PopoverSpec {
            placement: PLACEMENT,
            html: true,
            content: self.content(),
        }
    }

    /// Popover body markup. Attribute values are quoted and escaped.
    pub fn content(&self) -> String {
        format!(
            "<input id=\"link\" value=\"{url}\"></input> \
             <button data-copy-target=\"link\"> \
             <img class=\"img-w15-h15\" src=\"{icon}\"> \
             </button> \
             <a href=\"{landing}\" target=\"_blank\">{label}</a>",
            url = escape_attr(&self.attendee_url),
            icon = escape_attr(&self.copy_icon_src),
            landing = escape_attr(&self.landing_url),
            label = self.view_label,
        )
    }

    /// The copy button: select the link input's contents and copy them.
    pub fn copy_ops(&self) -> Vec<DomOp> {
        vec![DomOp::CopySelection {
            target: Target::id("link"),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_quotes_and_escapes_the_link() {
        let popover = SharePopover::new(
            "https://example.com/attendee?id=7&ref=\"x\"",
            "/static/img/copy.png",
            "/attendee/7",
        );
        let content = popover.content();
        assert!(content
            .contains("value=\"https://example.com/attendee?id=7&amp;ref=&quot;x&quot;\""));
        assert!(content.contains("data-copy-target=\"link\""));
        assert!(!content.contains("onclick"));
        assert!(content.contains("<a href=\"/attendee/7\" target=\"_blank\">View your page</a>"));
    }

    #[test]
    fn spec_is_a_bottom_html_popover() {
        let popover = SharePopover::new("/a", "/i.png", "/p");
        let spec = popover.spec();
        assert_eq!(spec.placement, "bottom");
        assert!(spec.html);
        assert_eq!(spec.content, popover.content());
    }

    #[test]
    fn copy_targets_the_link_input() {
        let popover = SharePopover::new("/a", "/i.png", "/p");
        assert_eq!(
            popover.copy_ops(),
            vec![DomOp::CopySelection {
                target: Target::id("link")
            }]
        );
    }
}
