//! The field list itself: a capped, ordered sequence of member-number
//! fields whose live indices are always the contiguous range `1..=len`.
//!
//! The roster is the authoritative state. Markup is derived from it
//! (see [`crate::render`]) and never read back. Indices are 1-based to
//! match the naming contract; a field's index is its position plus one,
//! so renumbering after a removal cannot drift from the stored order.

use crate::error::RosterError;
use crate::naming;
use serde::{Deserialize, Serialize};

/// Cap on simultaneously live fields, the seeded field included.
pub const DEFAULT_MAX_FIELDS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Field {
    value: String,
    removable: bool,
}

/// Read-only view of one live field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub index: usize,
    pub name: String,
    pub value: String,
    /// Whether the field carries a remove control. The page-seeded field
    /// does not; every manager-created field does, and the flag travels
    /// with the field through renumbering.
    pub removable: bool,
}

/// One rename produced by a removal: the field formerly at `from_index`
/// now answers to `to_index`, and its remove control must target
/// `to_index` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub from_index: usize,
    pub to_index: usize,
}

/// Outcome of a removal: which index was deleted and which surviving
/// fields shifted down. Removing the highest index shifts nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub removed_index: usize,
    pub renames: Vec<Rename>,
}

/// Bounded, contiguously indexed field list. One instance per form.
#[derive(Debug, Clone)]
pub struct Roster {
    fields: Vec<Field>,
    cap: usize,
}

impl Roster {
    /// A roster as the page loads: the seeded field 1, blank, without a
    /// remove control.
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_MAX_FIELDS)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            fields: vec![Field {
                value: String::new(),
                removable: false,
            }],
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Number of live fields.
    pub fn live_count(&self) -> usize {
        self.fields.len()
    }

    /// The allocation counter: live fields plus the reserved slot, so it
    /// starts at 2 with only the seeded field present. The next add, if
    /// allowed, takes this value as its index.
    pub fn count(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slot(index).is_some()
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.slot(index).map(|s| self.fields[s].value.as_str())
    }

    /// Append a field at index `count`. Rejected without mutation once
    /// the live set holds `cap` fields.
    pub fn add_field(&mut self) -> Result<usize, RosterError> {
        if self.count() > self.cap {
            return Err(RosterError::CapExceeded { cap: self.cap });
        }
        self.fields.push(Field {
            value: String::new(),
            removable: true,
        });
        Ok(self.fields.len())
    }

    /// Delete the field at `index` and shift every higher field down by
    /// one. The returned renames are in ascending order of the old index,
    /// which is also a safe order to apply to markup.
    pub fn remove_field(&mut self, index: usize) -> Result<Removal, RosterError> {
        let slot = self
            .slot(index)
            .ok_or(RosterError::FieldNotFound { index })?;
        let old_max = self.fields.len();
        self.fields.remove(slot);
        let renames = (index + 1..=old_max)
            .map(|i| Rename {
                from_index: i,
                to_index: i - 1,
            })
            .collect();
        Ok(Removal {
            removed_index: index,
            renames,
        })
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<(), RosterError> {
        let slot = self
            .slot(index)
            .ok_or(RosterError::FieldNotFound { index })?;
        self.fields[slot].value = value.into();
        Ok(())
    }

    /// The submit gate. Field 1 blank fails immediately with `[1]` and no
    /// other field is inspected; otherwise every blank field from index 2
    /// up is reported. Ok means every live field is non-empty.
    pub fn validate_for_submit(&self) -> Result<(), RosterError> {
        match self.fields.first() {
            None => return Err(RosterError::FieldNotFound { index: 1 }),
            Some(first) if first.value.is_empty() => {
                return Err(RosterError::EmptyRequiredField { indices: vec![1] });
            }
            Some(_) => {}
        }
        let empty: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, f)| f.value.is_empty())
            .map(|(pos, _)| pos + 1)
            .collect();
        if empty.is_empty() {
            Ok(())
        } else {
            Err(RosterError::EmptyRequiredField { indices: empty })
        }
    }

    pub fn snapshot(&self) -> Vec<FieldSnapshot> {
        self.fields
            .iter()
            .enumerate()
            .map(|(pos, f)| FieldSnapshot {
                index: pos + 1,
                name: naming::field_name(pos + 1),
                value: f.value.clone(),
                removable: f.removable,
            })
            .collect()
    }

    /// Live `(index, value)` pairs in field order.
    pub fn live_values(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .map(|(pos, f)| (pos + 1, f.value.as_str()))
    }

    fn slot(&self, index: usize) -> Option<usize> {
        if index >= 1 && index <= self.fields.len() {
            Some(index - 1)
        } else {
            None
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
