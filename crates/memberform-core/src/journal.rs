//! Append-only journal of form operations. Nothing functional reads it
//! back; it exists so rejected adds, blocked submits and settled
//! submissions are never silently swallowed.

use crate::types::{now_timestamp, EventId, FormId, Timestamp};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormEvent {
    pub event_id: EventId,
    pub timestamp: Timestamp,
    pub form_id: FormId,
    pub action: String,
    pub result: String,
}

impl FormEvent {
    /// Timestamp is assigned by [`Journal::append`].
    pub fn new(form_id: FormId, action: &str, result: &str) -> Self {
        Self {
            event_id: EventId::new(),
            timestamp: 0,
            form_id,
            action: action.to_string(),
            result: result.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Journal {
    inner: Mutex<Vec<FormEvent>>,
}

impl Journal {
    /// Append, stamping a timestamp that never runs behind the previous
    /// event even if the wall clock does.
    pub fn append(&self, mut event: FormEvent) -> EventId {
        let mut guard = self.inner.lock();
        let floor = guard.last().map(|e| e.timestamp).unwrap_or(0);
        event.timestamp = now_timestamp().max(floor);
        let event_id = event.event_id;
        guard.push(event);
        event_id
    }

    pub fn events(&self) -> Vec<FormEvent> {
        self.inner.lock().clone()
    }

    /// Events from position `start` on. Lets pollers resume where they
    /// left off instead of copying the whole log.
    pub fn events_since(&self, start: usize) -> Vec<FormEvent> {
        let inner = self.inner.lock();
        inner.get(start..).map(<[FormEvent]>::to_vec).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Events matching `filter`, oldest first, at most `limit`.
    pub fn query(&self, filter: &EventFilter, limit: usize) -> Vec<FormEvent> {
        self.inner
            .lock()
            .iter()
            .filter(|e| filter.matches(e))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    pub form_id: Option<FormId>,
    pub action: Option<String>,
    pub since: Option<Timestamp>,
}

impl EventFilter {
    fn matches(&self, event: &FormEvent) -> bool {
        if let Some(form_id) = self.form_id {
            if event.form_id != form_id {
                return false;
            }
        }
        if let Some(action) = &self.action {
            if &event.action != action {
                return false;
            }
        }
        if let Some(since) = self.since {
            if event.timestamp < since {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_never_run_backwards() {
        let journal = Journal::default();
        let form_id = FormId::new();
        for _ in 0..50 {
            journal.append(FormEvent::new(form_id, "add_field", "success"));
        }
        let events = journal.events();
        assert_eq!(events.len(), 50);
        for pair in events.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn query_filters_by_form_action_and_limit() {
        let journal = Journal::default();
        let a = FormId::new();
        let b = FormId::new();
        journal.append(FormEvent::new(a, "add_field", "success"));
        journal.append(FormEvent::new(b, "add_field", "success"));
        journal.append(FormEvent::new(a, "remove_field", "success"));
        journal.append(FormEvent::new(a, "add_field", "rejected: cap"));

        let by_form = journal.query(
            &EventFilter {
                form_id: Some(a),
                ..Default::default()
            },
            usize::MAX,
        );
        assert_eq!(by_form.len(), 3);

        let by_action = journal.query(
            &EventFilter {
                form_id: Some(a),
                action: Some("add_field".into()),
                ..Default::default()
            },
            usize::MAX,
        );
        assert_eq!(by_action.len(), 2);

        let limited = journal.query(&EventFilter::default(), 2);
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn since_filter_cuts_older_events() {
        let journal = Journal::default();
        let form_id = FormId::new();
        journal.append(FormEvent::new(form_id, "create_form", "success"));
        let cutoff = journal.events()[0].timestamp + 1;

        let none = journal.query(
            &EventFilter {
                since: Some(cutoff),
                ..Default::default()
            },
            usize::MAX,
        );
        assert!(none.is_empty());
    }
}
