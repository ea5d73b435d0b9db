//! Show/hide wiring for the discount controls on the event pages: the
//! panel pair behind the type selector, the per-kind symbol hints, and
//! the disclosure that reveals the member form.

use crate::dom::{DomOp, Target};
use crate::error::PageError;

/// One switchable panel and the label shown for it.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: String,
    pub label: String,
}

/// Exclusive panel switch driven by a `<select>` control. Exactly one
/// panel is selected at a time; the selection label mirrors it.
#[derive(Debug, Clone)]
pub struct PanelSwitch {
    panels: Vec<Panel>,
    selected: usize,
    select_control: Target,
    label_target: Target,
}

/// Which scope an existing discount applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountScope {
    Event,
    Ticket,
}

impl DiscountScope {
    fn panel_id(self) -> &'static str {
        match self {
            DiscountScope::Event => "event_discount",
            DiscountScope::Ticket => "ticket_discount",
        }
    }
}

impl PanelSwitch {
    pub fn new(panels: Vec<Panel>, select_control: Target, label_target: Target) -> Self {
        Self {
            panels,
            selected: 0,
            select_control,
            label_target,
        }
    }

    /// The event/ticket pair as the discount page wires it.
    pub fn discount() -> Self {
        Self::new(
            vec![
                Panel {
                    id: "event_discount".to_string(),
                    label: "Event Discount".to_string(),
                },
                Panel {
                    id: "ticket_discount".to_string(),
                    label: "Ticket Discount".to_string(),
                },
            ],
            Target::id("discount_type_select"),
            Target::id("selected_value_discount_type"),
        )
    }

    pub fn selected_panel(&self) -> Option<&Panel> {
        self.panels.get(self.selected)
    }

    /// Selection change: hide every panel, show the chosen one, mirror
    /// its label.
    pub fn select(&mut self, panel_id: &str) -> Result<Vec<DomOp>, PageError> {
        let position = self
            .panels
            .iter()
            .position(|p| p.id == panel_id)
            .ok_or_else(|| PageError::UnknownPanel {
                id: panel_id.to_string(),
            })?;
        self.selected = position;

        let mut ops: Vec<DomOp> = self
            .panels
            .iter()
            .map(|p| DomOp::Hide {
                target: Target::id(p.id.as_str()),
            })
            .collect();
        ops.push(DomOp::Show {
            target: Target::id(panel_id),
        });
        ops.push(DomOp::SetText {
            target: self.label_target.clone(),
            text: self.panels[position].label.clone(),
        });
        Ok(ops)
    }

    /// First paint. A known scope picks its panel, points the selector
    /// at it, and hides the rest; no scope hides every panel. The label
    /// always mirrors the selection.
    pub fn init(&mut self, scope: Option<DiscountScope>) -> Vec<DomOp> {
        let mut ops = Vec::new();

        let position = scope.and_then(|s| self.panels.iter().position(|p| p.id == s.panel_id()));
        match position {
            Some(position) => {
                self.selected = position;
                for (i, panel) in self.panels.iter().enumerate() {
                    if i != position {
                        ops.push(DomOp::Hide {
                            target: Target::id(panel.id.as_str()),
                        });
                    }
                }
                ops.push(DomOp::SetValue {
                    target: self.select_control.clone(),
                    value: self.panels[position].id.clone(),
                });
            }
            None => {
                for panel in &self.panels {
                    ops.push(DomOp::Hide {
                        target: Target::id(panel.id.as_str()),
                    });
                }
            }
        }

        if let Some(panel) = self.selected_panel() {
            ops.push(DomOp::SetText {
                target: self.label_target.clone(),
                text: panel.label.clone(),
            });
        }
        ops
    }
}

/// Discount amount kind, from the kind selector's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    Fixed,
    Percentage,
}

impl DiscountKind {
    /// `None` for the placeholder option; the page then changes nothing.
    pub fn from_select_value(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(DiscountKind::Fixed),
            "percentage" => Some(DiscountKind::Percentage),
            _ => None,
        }
    }

    /// Swap the currency/percent hint next to the amount input.
    pub fn symbol_ops(self) -> Vec<DomOp> {
        match self {
            DiscountKind::Fixed => vec![
                DomOp::Show {
                    target: Target::id("fixed_symbol"),
                },
                DomOp::Hide {
                    target: Target::id("percentage_symbol"),
                },
            ],
            DiscountKind::Percentage => vec![
                DomOp::Show {
                    target: Target::id("percentage_symbol"),
                },
                DomOp::Hide {
                    target: Target::id("fixed_symbol"),
                },
            ],
        }
    }
}

/// Both symbol hints start hidden until a kind is picked.
pub fn symbol_init_ops() -> Vec<DomOp> {
    vec![
        DomOp::Hide {
            target: Target::id("fixed_symbol"),
        },
        DomOp::Hide {
            target: Target::id("percentage_symbol"),
        },
    ]
}

/// A region revealed and re-hidden by its trigger button.
#[derive(Debug, Clone)]
pub struct Disclosure {
    target: Target,
    open: bool,
}

impl Disclosure {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            open: false,
        }
    }

    /// The member form behind the "get discount" button.
    pub fn get_discount() -> Self {
        Self::new(Target::id("get_discount"))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Starts hidden.
    pub fn init(&self) -> Vec<DomOp> {
        vec![DomOp::Hide {
            target: self.target.clone(),
        }]
    }

    pub fn toggle(&mut self) -> Vec<DomOp> {
        self.open = !self.open;
        if self.open {
            vec![DomOp::Show {
                target: self.target.clone(),
            }]
        } else {
            vec![DomOp::Hide {
                target: self.target.clone(),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_hides_all_then_shows_the_choice() {
        let mut switch = PanelSwitch::discount();
        let ops = switch.select("ticket_discount").unwrap();
        assert_eq!(
            ops,
            vec![
                DomOp::Hide {
                    target: Target::id("event_discount")
                },
                DomOp::Hide {
                    target: Target::id("ticket_discount")
                },
                DomOp::Show {
                    target: Target::id("ticket_discount")
                },
                DomOp::SetText {
                    target: Target::id("selected_value_discount_type"),
                    text: "Ticket Discount".to_string(),
                },
            ]
        );
        assert_eq!(switch.selected_panel().unwrap().id, "ticket_discount");
    }

    #[test]
    fn select_rejects_unknown_panel() {
        let mut switch = PanelSwitch::discount();
        let err = switch.select("weekend_discount").unwrap_err();
        assert_eq!(
            err,
            PageError::UnknownPanel {
                id: "weekend_discount".to_string()
            }
        );
        // Selection unchanged
        assert_eq!(switch.selected_panel().unwrap().id, "event_discount");
    }

    #[test]
    fn init_with_scope_points_the_selector() {
        let mut switch = PanelSwitch::discount();
        let ops = switch.init(Some(DiscountScope::Ticket));
        assert_eq!(
            ops,
            vec![
                DomOp::Hide {
                    target: Target::id("event_discount")
                },
                DomOp::SetValue {
                    target: Target::id("discount_type_select"),
                    value: "ticket_discount".to_string(),
                },
                DomOp::SetText {
                    target: Target::id("selected_value_discount_type"),
                    text: "Ticket Discount".to_string(),
                },
            ]
        );
    }

    #[test]
    fn init_without_scope_hides_every_panel() {
        let mut switch = PanelSwitch::discount();
        let ops = switch.init(None);
        assert_eq!(
            ops,
            vec![
                DomOp::Hide {
                    target: Target::id("event_discount")
                },
                DomOp::Hide {
                    target: Target::id("ticket_discount")
                },
                DomOp::SetText {
                    target: Target::id("selected_value_discount_type"),
                    text: "Event Discount".to_string(),
                },
            ]
        );
    }

    #[test]
    fn kind_parses_only_real_values() {
        assert_eq!(DiscountKind::from_select_value("fixed"), Some(DiscountKind::Fixed));
        assert_eq!(
            DiscountKind::from_select_value("percentage"),
            Some(DiscountKind::Percentage)
        );
        assert_eq!(DiscountKind::from_select_value("choose..."), None);
        assert_eq!(DiscountKind::from_select_value(""), None);
    }

    #[test]
    fn kind_symbols_swap() {
        assert_eq!(
            DiscountKind::Fixed.symbol_ops(),
            vec![
                DomOp::Show {
                    target: Target::id("fixed_symbol")
                },
                DomOp::Hide {
                    target: Target::id("percentage_symbol")
                },
            ]
        );
        assert_eq!(symbol_init_ops().len(), 2);
    }

    #[test]
    fn disclosure_toggles_between_states() {
        let mut disclosure = Disclosure::get_discount();
        assert!(!disclosure.is_open());
        assert_eq!(
            disclosure.init(),
            vec![DomOp::Hide {
                target: Target::id("get_discount")
            }]
        );

        let ops = disclosure.toggle();
        assert!(disclosure.is_open());
        assert_eq!(
            ops,
            vec![DomOp::Show {
                target: Target::id("get_discount")
            }]
        );

        let ops = disclosure.toggle();
        assert!(!disclosure.is_open());
        assert_eq!(
            ops,
            vec![DomOp::Hide {
                target: Target::id("get_discount")
            }]
        );
    }
}
