//! Scroll-pinned event header.
//!
//! Past the threshold the title bar pins to the top of the viewport and
//! its compact companions (event name, ticket shortcut) appear; back
//! above it everything returns to the flow. Transitions are edge
//! triggered, so repeated scroll events inside one region emit nothing.

use crate::dom::{DomOp, Target};

pub const STICKY_THRESHOLD: f64 = 450.0;

const PIN_SHADOW: &str = "0 4px 8px 0 rgba(0, 0, 0, 0.2), 0 6px 20px 0 rgba(0, 0, 0, 0.19)";

#[derive(Debug, Clone)]
pub struct StickyHeader {
    threshold: f64,
    pinned: bool,
    bar: Target,
    companions: Vec<Target>,
}

impl Default for StickyHeader {
    fn default() -> Self {
        Self {
            threshold: STICKY_THRESHOLD,
            pinned: false,
            bar: Target::css(".fixedElement"),
            companions: vec![Target::id("event_name_box"), Target::id("event_tickets")],
        }
    }
}

impl StickyHeader {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// First paint: companions hidden, compact title size preset.
    pub fn init(&self) -> Vec<DomOp> {
        vec![
            DomOp::Hide {
                target: Target::id("event_name_box"),
            },
            DomOp::SetStyle {
                target: Target::id("event_name_box"),
                property: "font-size".to_string(),
                value: "1.3em".to_string(),
            },
            DomOp::Hide {
                target: Target::id("event_tickets"),
            },
        ]
    }

    /// Scroll position report. Exactly at the threshold nothing changes.
    pub fn on_scroll(&mut self, y: f64) -> Vec<DomOp> {
        if y > self.threshold && !self.pinned {
            self.pinned = true;
            self.pin_ops()
        } else if y < self.threshold && self.pinned {
            self.pinned = false;
            self.unpin_ops()
        } else {
            Vec::new()
        }
    }

    fn pin_ops(&self) -> Vec<DomOp> {
        let mut ops = vec![
            self.bar_style("position", "fixed"),
            self.bar_style("top", "0px"),
            self.bar_style("width", "75%"),
            self.bar_style("box-shadow", PIN_SHADOW),
            self.bar_style("z-index", "100"),
        ];
        for companion in &self.companions {
            ops.push(DomOp::Show {
                target: companion.clone(),
            });
        }
        ops
    }

    fn unpin_ops(&self) -> Vec<DomOp> {
        let mut ops = vec![
            self.bar_style("position", "static"),
            self.bar_style("top", "0px"),
            self.bar_style("width", "100%"),
            self.bar_style("box-shadow", "none"),
        ];
        for companion in &self.companions {
            ops.push(DomOp::Hide {
                target: companion.clone(),
            });
        }
        ops
    }

    fn bar_style(&self, property: &str, value: &str) -> DomOp {
        DomOp::SetStyle {
            target: self.bar.clone(),
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_once_past_the_threshold() {
        let mut header = StickyHeader::default();

        assert!(header.on_scroll(100.0).is_empty());

        let ops = header.on_scroll(451.0);
        assert!(header.is_pinned());
        assert_eq!(
            ops[0],
            DomOp::SetStyle {
                target: Target::css(".fixedElement"),
                property: "position".to_string(),
                value: "fixed".to_string(),
            }
        );
        assert!(ops.contains(&DomOp::SetStyle {
            target: Target::css(".fixedElement"),
            property: "box-shadow".to_string(),
            value: PIN_SHADOW.to_string(),
        }));
        assert!(ops.contains(&DomOp::Show {
            target: Target::id("event_name_box")
        }));
        assert!(ops.contains(&DomOp::Show {
            target: Target::id("event_tickets")
        }));

        // Further scrolling in the pinned region is quiet
        assert!(header.on_scroll(900.0).is_empty());
    }

    #[test]
    fn unpins_once_back_above_the_threshold() {
        let mut header = StickyHeader::default();
        header.on_scroll(500.0);

        let ops = header.on_scroll(300.0);
        assert!(!header.is_pinned());
        assert!(ops.contains(&DomOp::SetStyle {
            target: Target::css(".fixedElement"),
            property: "position".to_string(),
            value: "static".to_string(),
        }));
        assert!(ops.contains(&DomOp::SetStyle {
            target: Target::css(".fixedElement"),
            property: "width".to_string(),
            value: "100%".to_string(),
        }));
        assert!(ops.contains(&DomOp::Hide {
            target: Target::id("event_name_box")
        }));

        assert!(header.on_scroll(100.0).is_empty());
    }

    #[test]
    fn exactly_at_the_threshold_nothing_moves() {
        let mut header = StickyHeader::default();
        assert!(header.on_scroll(STICKY_THRESHOLD).is_empty());

        header.on_scroll(600.0);
        assert!(header.on_scroll(STICKY_THRESHOLD).is_empty());
        assert!(header.is_pinned());
    }

    #[test]
    fn init_presets_the_compact_title() {
        let header = StickyHeader::default();
        let ops = header.init();
        assert_eq!(ops.len(), 3);
        assert_eq!(
            ops[1],
            DomOp::SetStyle {
                target: Target::id("event_name_box"),
                property: "font-size".to_string(),
                value: "1.3em".to_string(),
            }
        );
    }
}
