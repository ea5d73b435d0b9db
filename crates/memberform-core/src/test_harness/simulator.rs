//! Randomized simulator for the form registry.
//!
//! Generates seeded sequences of structural operations, classifies the
//! expected outcome of each against a mirror model, executes them, and
//! checks every list invariant after every operation.

use crate::api::{EventQuery, FormManager, FormSnapshot, RosterOps, SubmitGate};
use crate::error::FormError;
use crate::journal::EventFilter;
use crate::registry::FormRegistry;
use crate::types::{FormId, PhaseKind};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Total operations to execute
    pub total_operations: u64,
    /// Distribution of operation types
    pub operation_distribution: OperationDistribution,
    /// How many forms may be live at once
    pub max_concurrent_forms: usize,
    /// Stop conditions
    pub stop_on_first_violation: bool,
    pub stop_on_error_count: Option<usize>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            total_operations: 10_000,
            operation_distribution: OperationDistribution::default(),
            max_concurrent_forms: 8,
            stop_on_first_violation: true,
            stop_on_error_count: None,
        }
    }
}

/// Probability distribution for operation generation
#[derive(Debug, Clone)]
pub struct OperationDistribution {
    /// Operations aimed at the happy path
    pub valid_ops: f64,
    /// Boundary pokes (cap, highest index, index 1)
    pub edge_cases: f64,
    /// Operations that must be rejected
    pub invalid_ops: f64,
}

impl Default for OperationDistribution {
    fn default() -> Self {
        Self {
            valid_ops: 0.70,
            edge_cases: 0.20,
            invalid_ops: 0.10,
        }
    }
}

/// All operations the simulator can generate
#[derive(Debug, Clone)]
pub enum SimulatedOperation {
    CreateForm,
    DiscardForm(FormId),
    AddField(FormId),
    RemoveField(FormId, usize),
    SetFieldValue(FormId, usize, String),
    CheckSubmit(FormId),
    QueryStats(FormId),
    Snapshot(FormId),
    QueryJournal,
}

/// Expected result classification for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedResult {
    ShouldSucceed,
    ShouldFail,
}

/// A violation detected during simulation
#[derive(Debug, Clone)]
pub enum Violation {
    /// Operation outcome didn't match the mirror model's expectation
    UnexpectedOutcome {
        operation_index: u64,
        operation: SimulatedOperation,
        expected: ExpectedResult,
        actual: Result<String, String>,
    },
    /// Invariant was violated
    Invariant(InvariantViolation),
}

/// A specific invariant violation
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub check: InvariantCheck,
    pub details: String,
}

/// Types of invariant checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantCheck {
    IndicesAreContiguous,
    CountTracksLiveFields,
    CapNeverExceeded,
    RemoveControlsTargetOwnIndex,
    ValuesMatchModel,
    ViewMatchesPhase,
    JournalTimestampsAreMonotonic,
}

/// Statistics collected during simulation
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    pub operations_by_type: HashMap<String, u64>,
}

impl OperationStats {
    pub fn record(&mut self, operation: &SimulatedOperation, result: &Result<String, String>) {
        self.total_operations += 1;

        let type_name = format!("{:?}", operation)
            .split(['(', ' '])
            .next()
            .unwrap_or("Unknown")
            .to_string();
        *self.operations_by_type.entry(type_name).or_insert(0) += 1;

        match result {
            Ok(_) => self.successful_operations += 1,
            Err(_) => self.failed_operations += 1,
        }
    }
}

/// Final report from the simulator
#[derive(Debug, Clone)]
pub struct SimulatorReport {
    pub config: SimulatorConfig,
    pub stats: OperationStats,
    pub violations: Vec<Violation>,
    pub final_form_count: usize,
    pub final_field_count: usize,
}

impl SimulatorReport {
    /// Check if simulation passed all criteria
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Generate a text report
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Member Form Simulator Report ===\n\n");
        report.push_str(&format!("Seed: {}\n", self.config.seed));
        report.push_str(&format!("Total Operations: {}\n", self.stats.total_operations));
        report.push_str(&format!("Successful: {}\n", self.stats.successful_operations));
        report.push_str(&format!("Failed: {}\n", self.stats.failed_operations));
        report.push_str(&format!("Violations: {}\n", self.violations.len()));
        report.push_str(&format!("Final Forms: {}\n", self.final_form_count));
        report.push_str(&format!("Final Fields: {}\n", self.final_field_count));

        if !self.violations.is_empty() {
            report.push_str("\n=== Violations ===\n");
            for (i, v) in self.violations.iter().enumerate() {
                report.push_str(&format!("{}. {:?}\n", i + 1, v));
            }
        }

        report.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));

        report
    }
}

/// Mirror of one form's field list, kept outside the registry so the
/// simulator can classify outcomes and detect divergence.
#[derive(Debug, Clone, Default)]
struct MirrorForm {
    fields: Vec<MirrorField>,
}

#[derive(Debug, Clone)]
struct MirrorField {
    value: String,
    removable: bool,
}

impl MirrorForm {
    fn seeded() -> Self {
        Self {
            fields: vec![MirrorField {
                value: String::new(),
                removable: false,
            }],
        }
    }

    fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        Self {
            fields: snapshot
                .fields
                .iter()
                .map(|f| MirrorField {
                    value: f.value.clone(),
                    removable: f.removable,
                })
                .collect(),
        }
    }

    fn live(&self) -> usize {
        self.fields.len()
    }

    fn gate_passes(&self) -> bool {
        match self.fields.first() {
            None => false,
            Some(first) if first.value.is_empty() => false,
            Some(_) => self.fields.iter().all(|f| !f.value.is_empty()),
        }
    }
}

/// Run the simulator
pub fn run_simulator(config: SimulatorConfig) -> SimulatorReport {
    let registry = FormRegistry::new();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stats = OperationStats::default();
    let mut violations = Vec::new();

    // Tracked simulator state
    let mut form_ids: Vec<FormId> = Vec::new();
    let mut mirror: HashMap<FormId, MirrorForm> = HashMap::new();
    let mut journal_checked = 0;

    let cap = registry.config().max_fields;

    for i in 0..config.total_operations {
        let operation = generate_operation(
            &mut rng,
            &config,
            &form_ids,
            &mirror,
            cap,
        );

        let expected_result = classify_expected_result(&operation, &mirror, cap);

        let actual_result =
            execute_operation(&registry, &operation, &mut form_ids, &mut mirror);

        let outcome_matches = matches!(
            (expected_result, &actual_result),
            (ExpectedResult::ShouldSucceed, Ok(_)) | (ExpectedResult::ShouldFail, Err(_))
        );

        let actual_str: Result<String, String> = match &actual_result {
            Ok(msg) => Ok(msg.clone()),
            Err(e) => Err(format!("{e}")),
        };
        stats.record(&operation, &actual_str);

        if !outcome_matches {
            violations.push(Violation::UnexpectedOutcome {
                operation_index: i,
                operation: operation.clone(),
                expected: expected_result,
                actual: actual_str.clone(),
            });
            resync_mirror(&registry, &operation, &mut form_ids, &mut mirror);

            if config.stop_on_first_violation {
                break;
            }
            if let Some(max_errors) = config.stop_on_error_count {
                if violations.len() >= max_errors {
                    break;
                }
            }
        }

        // Check invariants after every operation. The journal is scanned
        // incrementally so long runs stay linear.
        let mut inv_violations = Vec::new();
        for form_id in &form_ids {
            if let Err(v) = FormInvariants::check_form(&registry, *form_id) {
                inv_violations.extend(v);
            }
        }
        if let Some(v) = journal_tail_violation(&registry, &mut journal_checked) {
            inv_violations.push(v);
        }
        inv_violations.extend(check_mirror(&registry, &form_ids, &mirror));
        if !inv_violations.is_empty() {
            violations.extend(inv_violations.into_iter().map(Violation::Invariant));
            if config.stop_on_first_violation {
                break;
            }
        }
    }

    // Full sweep over the final state
    if violations.is_empty() {
        if let Err(v) = FormInvariants::check_all(&registry, &form_ids) {
            violations.extend(v.into_iter().map(Violation::Invariant));
        }
    }

    let final_field_count = mirror.values().map(MirrorForm::live).sum();
    SimulatorReport {
        config,
        stats,
        violations,
        final_form_count: form_ids.len(),
        final_field_count,
    }
}

/// Generate a random operation based on the distribution
fn generate_operation(
    rng: &mut StdRng,
    config: &SimulatorConfig,
    form_ids: &[FormId],
    mirror: &HashMap<FormId, MirrorForm>,
    cap: usize,
) -> SimulatedOperation {
    let r: f64 = rng.gen();
    let distribution = &config.operation_distribution;

    if r < distribution.valid_ops {
        generate_valid_operation(rng, config, form_ids, mirror, cap)
    } else if r < distribution.valid_ops + distribution.edge_cases {
        generate_edge_case_operation(rng, form_ids, mirror, cap)
    } else {
        generate_invalid_operation(rng, form_ids, mirror)
    }
}

fn pick(rng: &mut StdRng, ids: &[FormId]) -> FormId {
    ids[rng.gen_range(0..ids.len())]
}

fn random_value(rng: &mut StdRng) -> String {
    if rng.gen_bool(0.2) {
        String::new()
    } else {
        format!("{}", rng.gen_range(1_000u32..100_000_000))
    }
}

/// Generate an operation aimed at the happy path
fn generate_valid_operation(
    rng: &mut StdRng,
    config: &SimulatorConfig,
    form_ids: &[FormId],
    mirror: &HashMap<FormId, MirrorForm>,
    cap: usize,
) -> SimulatedOperation {
    if form_ids.is_empty() {
        return SimulatedOperation::CreateForm;
    }

    match rng.gen_range(0..8) {
        0 if form_ids.len() < config.max_concurrent_forms => SimulatedOperation::CreateForm,
        1 => {
            // prefer a form with headroom
            let under_cap: Vec<FormId> = form_ids
                .iter()
                .copied()
                .filter(|id| mirror.get(id).map(|m| m.live() < cap).unwrap_or(false))
                .collect();
            if under_cap.is_empty() {
                SimulatedOperation::QueryStats(pick(rng, form_ids))
            } else {
                SimulatedOperation::AddField(pick(rng, &under_cap))
            }
        }
        2 => {
            let form_id = pick(rng, form_ids);
            let live = mirror.get(&form_id).map(MirrorForm::live).unwrap_or(0);
            if live == 0 {
                SimulatedOperation::Snapshot(form_id)
            } else {
                SimulatedOperation::RemoveField(form_id, rng.gen_range(1..=live))
            }
        }
        3 => {
            let form_id = pick(rng, form_ids);
            let live = mirror.get(&form_id).map(MirrorForm::live).unwrap_or(0);
            if live == 0 {
                SimulatedOperation::QueryStats(form_id)
            } else {
                SimulatedOperation::SetFieldValue(
                    form_id,
                    rng.gen_range(1..=live),
                    random_value(rng),
                )
            }
        }
        4 => SimulatedOperation::QueryStats(pick(rng, form_ids)),
        5 => SimulatedOperation::Snapshot(pick(rng, form_ids)),
        6 => SimulatedOperation::QueryJournal,
        7 if form_ids.len() > 1 => SimulatedOperation::DiscardForm(pick(rng, form_ids)),
        _ => SimulatedOperation::QueryJournal,
    }
}

/// Generate a boundary operation
fn generate_edge_case_operation(
    rng: &mut StdRng,
    form_ids: &[FormId],
    mirror: &HashMap<FormId, MirrorForm>,
    cap: usize,
) -> SimulatedOperation {
    if form_ids.is_empty() {
        return SimulatedOperation::CreateForm;
    }

    match rng.gen_range(0..5) {
        0 => {
            // add at a form already at the cap, if any
            let at_cap: Vec<FormId> = form_ids
                .iter()
                .copied()
                .filter(|id| mirror.get(id).map(|m| m.live() >= cap).unwrap_or(false))
                .collect();
            if at_cap.is_empty() {
                SimulatedOperation::AddField(pick(rng, form_ids))
            } else {
                SimulatedOperation::AddField(pick(rng, &at_cap))
            }
        }
        1 => {
            let form_id = pick(rng, form_ids);
            let live = mirror.get(&form_id).map(MirrorForm::live).unwrap_or(0);
            if live == 0 {
                SimulatedOperation::QueryStats(form_id)
            } else {
                SimulatedOperation::RemoveField(form_id, live)
            }
        }
        2 => SimulatedOperation::RemoveField(pick(rng, form_ids), 1),
        3 => SimulatedOperation::CheckSubmit(pick(rng, form_ids)),
        _ => SimulatedOperation::QueryJournal,
    }
}

/// Generate an operation that must be rejected
fn generate_invalid_operation(
    rng: &mut StdRng,
    form_ids: &[FormId],
    mirror: &HashMap<FormId, MirrorForm>,
) -> SimulatedOperation {
    match rng.gen_range(0..6) {
        0 if !form_ids.is_empty() => SimulatedOperation::RemoveField(pick(rng, form_ids), 0),
        1 if !form_ids.is_empty() => {
            let form_id = pick(rng, form_ids);
            let live = mirror.get(&form_id).map(MirrorForm::live).unwrap_or(0);
            SimulatedOperation::RemoveField(form_id, live + 1)
        }
        2 => SimulatedOperation::AddField(FormId::new()),
        3 => SimulatedOperation::SetFieldValue(FormId::new(), 1, "123".into()),
        4 => SimulatedOperation::QueryStats(FormId::new()),
        _ => SimulatedOperation::DiscardForm(FormId::new()),
    }
}

/// Classify an operation against the mirror model
fn classify_expected_result(
    operation: &SimulatedOperation,
    mirror: &HashMap<FormId, MirrorForm>,
    cap: usize,
) -> ExpectedResult {
    let known = |id: &FormId| mirror.contains_key(id);
    match operation {
        SimulatedOperation::CreateForm | SimulatedOperation::QueryJournal => {
            ExpectedResult::ShouldSucceed
        }
        SimulatedOperation::DiscardForm(id)
        | SimulatedOperation::QueryStats(id)
        | SimulatedOperation::Snapshot(id) => {
            if known(id) {
                ExpectedResult::ShouldSucceed
            } else {
                ExpectedResult::ShouldFail
            }
        }
        SimulatedOperation::AddField(id) => match mirror.get(id) {
            Some(m) if m.live() < cap => ExpectedResult::ShouldSucceed,
            _ => ExpectedResult::ShouldFail,
        },
        SimulatedOperation::RemoveField(id, index)
        | SimulatedOperation::SetFieldValue(id, index, _) => match mirror.get(id) {
            Some(m) if *index >= 1 && *index <= m.live() => ExpectedResult::ShouldSucceed,
            _ => ExpectedResult::ShouldFail,
        },
        SimulatedOperation::CheckSubmit(id) => match mirror.get(id) {
            Some(m) if m.gate_passes() => ExpectedResult::ShouldSucceed,
            _ => ExpectedResult::ShouldFail,
        },
    }
}

/// Execute an operation against the registry, updating tracked state on
/// success
fn execute_operation(
    registry: &FormRegistry,
    operation: &SimulatedOperation,
    form_ids: &mut Vec<FormId>,
    mirror: &mut HashMap<FormId, MirrorForm>,
) -> Result<String, FormError> {
    match operation {
        SimulatedOperation::CreateForm => {
            let id = registry.create_form()?;
            form_ids.push(id);
            mirror.insert(id, MirrorForm::seeded());
            Ok(format!("created form {id}"))
        }
        SimulatedOperation::DiscardForm(id) => {
            registry.discard_form(*id)?;
            form_ids.retain(|f| f != id);
            mirror.remove(id);
            Ok("discarded form".to_string())
        }
        SimulatedOperation::AddField(id) => {
            let receipt = registry.add_field(*id)?;
            if let Some(m) = mirror.get_mut(id) {
                m.fields.push(MirrorField {
                    value: String::new(),
                    removable: true,
                });
            }
            Ok(format!("added field {}", receipt.index))
        }
        SimulatedOperation::RemoveField(id, index) => {
            let receipt = registry.remove_field(*id, *index)?;
            if let Some(m) = mirror.get_mut(id) {
                // a diverged mirror must surface as a violation, not a panic
                if (1..=m.fields.len()).contains(index) {
                    m.fields.remove(*index - 1);
                }
            }
            Ok(format!(
                "removed field {} ({} shifted)",
                receipt.removed_index,
                receipt.renames.len()
            ))
        }
        SimulatedOperation::SetFieldValue(id, index, value) => {
            registry.set_field_value(*id, *index, value)?;
            if let Some(field) = index
                .checked_sub(1)
                .and_then(|i| mirror.get_mut(id).and_then(|m| m.fields.get_mut(i)))
            {
                field.value = value.clone();
            }
            Ok(format!("set field {index}"))
        }
        SimulatedOperation::CheckSubmit(id) => {
            registry.check_submit(*id)?;
            Ok("gate passed".to_string())
        }
        SimulatedOperation::QueryStats(id) => {
            let stats = registry.form_stats(*id)?;
            Ok(format!("live={} count={}", stats.live_fields, stats.count))
        }
        SimulatedOperation::Snapshot(id) => {
            let snapshot = registry.snapshot(*id)?;
            Ok(format!("{} fields", snapshot.fields.len()))
        }
        SimulatedOperation::QueryJournal => {
            let events = registry.query_events(EventFilter::default(), 100)?;
            Ok(format!("{} events", events.len()))
        }
    }
}

/// After a divergence, re-seat the mirror on the registry's actual state
/// so one bad classification does not cascade.
fn resync_mirror(
    registry: &FormRegistry,
    operation: &SimulatedOperation,
    form_ids: &mut Vec<FormId>,
    mirror: &mut HashMap<FormId, MirrorForm>,
) {
    let id = match operation {
        SimulatedOperation::CreateForm | SimulatedOperation::QueryJournal => return,
        SimulatedOperation::DiscardForm(id)
        | SimulatedOperation::AddField(id)
        | SimulatedOperation::RemoveField(id, _)
        | SimulatedOperation::SetFieldValue(id, _, _)
        | SimulatedOperation::CheckSubmit(id)
        | SimulatedOperation::QueryStats(id)
        | SimulatedOperation::Snapshot(id) => *id,
    };
    match registry.snapshot(id) {
        Ok(snapshot) => {
            mirror.insert(id, MirrorForm::from_snapshot(&snapshot));
            if !form_ids.contains(&id) {
                form_ids.push(id);
            }
        }
        Err(_) => {
            mirror.remove(&id);
            form_ids.retain(|f| *f != id);
        }
    }
}

/// Divergence check between the registry and the simulator's model.
fn check_mirror(
    registry: &FormRegistry,
    form_ids: &[FormId],
    mirror: &HashMap<FormId, MirrorForm>,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for form_id in form_ids {
        let Some(model) = mirror.get(form_id) else {
            continue;
        };
        let snapshot = match registry.snapshot(*form_id) {
            Ok(s) => s,
            Err(e) => {
                violations.push(InvariantViolation {
                    check: InvariantCheck::ValuesMatchModel,
                    details: format!("tracked form {form_id} unreadable: {e}"),
                });
                continue;
            }
        };
        let snap_fields: Vec<(&str, bool)> = snapshot
            .fields
            .iter()
            .map(|f| (f.value.as_str(), f.removable))
            .collect();
        let model_fields: Vec<(&str, bool)> = model
            .fields
            .iter()
            .map(|f| (f.value.as_str(), f.removable))
            .collect();
        if snap_fields != model_fields {
            violations.push(InvariantViolation {
                check: InvariantCheck::ValuesMatchModel,
                details: format!(
                    "form {form_id}: state {snap_fields:?} != model {model_fields:?}"
                ),
            });
        }
    }
    violations
}

/// Registry invariant checks
pub struct FormInvariants;

impl FormInvariants {
    /// Check all invariants across every tracked form
    pub fn check_all(
        registry: &FormRegistry,
        form_ids: &[FormId],
    ) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        for form_id in form_ids {
            if let Err(v) = Self::check_form(registry, *form_id) {
                violations.extend(v);
            }
        }
        if let Err(v) = Self::check_journal(registry) {
            violations.push(v);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    fn check_form(
        registry: &FormRegistry,
        form_id: FormId,
    ) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        let snapshot = match registry.snapshot(form_id) {
            Ok(s) => s,
            Err(e) => {
                violations.push(InvariantViolation {
                    check: InvariantCheck::IndicesAreContiguous,
                    details: format!("tracked form {form_id} unreadable: {e}"),
                });
                return Err(violations);
            }
        };

        for (pos, field) in snapshot.fields.iter().enumerate() {
            let expected_index = pos + 1;
            if field.index != expected_index
                || field.name != crate::naming::field_name(expected_index)
            {
                violations.push(InvariantViolation {
                    check: InvariantCheck::IndicesAreContiguous,
                    details: format!(
                        "form {form_id}: position {pos} holds index {} name {}",
                        field.index, field.name
                    ),
                });
            }
        }

        match registry.form_stats(form_id) {
            Ok(stats) => {
                if stats.count != stats.live_fields + 1
                    || stats.live_fields != snapshot.fields.len()
                {
                    violations.push(InvariantViolation {
                        check: InvariantCheck::CountTracksLiveFields,
                        details: format!(
                            "form {form_id}: count={} live={} snapshot={}",
                            stats.count,
                            stats.live_fields,
                            snapshot.fields.len()
                        ),
                    });
                }
                if stats.live_fields > stats.cap {
                    violations.push(InvariantViolation {
                        check: InvariantCheck::CapNeverExceeded,
                        details: format!(
                            "form {form_id}: {} live fields over cap {}",
                            stats.live_fields, stats.cap
                        ),
                    });
                }
            }
            Err(e) => violations.push(InvariantViolation {
                check: InvariantCheck::CountTracksLiveFields,
                details: format!("form {form_id}: stats unreadable: {e}"),
            }),
        }

        if let Ok(markup) = registry.container_markup(form_id) {
            let rendered = remove_indices(&markup);
            let expected: Vec<usize> = snapshot
                .fields
                .iter()
                .filter(|f| f.removable)
                .map(|f| f.index)
                .collect();
            if rendered != expected {
                violations.push(InvariantViolation {
                    check: InvariantCheck::RemoveControlsTargetOwnIndex,
                    details: format!(
                        "form {form_id}: controls target {rendered:?}, live removable {expected:?}"
                    ),
                });
            }
        }

        if let Ok(view) = registry.view(form_id) {
            let consistent = match snapshot.phase.kind() {
                PhaseKind::Idle => view.submit_visible && !view.loading_visible,
                PhaseKind::InFlight => !view.submit_visible && view.loading_visible,
                PhaseKind::Failed => view.retry_visible && view.submit_label.is_some(),
                PhaseKind::Redirected => view.redirect.is_some(),
            };
            if !consistent {
                violations.push(InvariantViolation {
                    check: InvariantCheck::ViewMatchesPhase,
                    details: format!("form {form_id}: view {view:?} for phase {:?}", snapshot.phase),
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    fn check_journal(registry: &FormRegistry) -> Result<(), InvariantViolation> {
        let events = registry.journal().events();
        for pair in events.windows(2) {
            if pair[0].timestamp > pair[1].timestamp {
                return Err(InvariantViolation {
                    check: InvariantCheck::JournalTimestampsAreMonotonic,
                    details: format!(
                        "event {:?} precedes {:?}",
                        pair[0].event_id, pair[1].event_id
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Scan journal entries appended since the last call for timestamp
/// regressions.
fn journal_tail_violation(
    registry: &FormRegistry,
    checked: &mut usize,
) -> Option<InvariantViolation> {
    let start = checked.saturating_sub(1);
    let tail = registry.journal().events_since(start);
    *checked = start + tail.len();
    for pair in tail.windows(2) {
        if pair[0].timestamp > pair[1].timestamp {
            return Some(InvariantViolation {
                check: InvariantCheck::JournalTimestampsAreMonotonic,
                details: format!(
                    "event {:?} precedes {:?}",
                    pair[0].event_id, pair[1].event_id
                ),
            });
        }
    }
    None
}

/// `data-remove-index` values in rendered order.
fn remove_indices(markup: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let probe = "data-remove-index=\"";
    let mut from = 0;
    while let Some(i) = markup[from..].find(probe) {
        let start = from + i + probe.len();
        if let Some(end) = markup[start..].find('"') {
            if let Ok(index) = markup[start..start + end].parse() {
                out.push(index);
            }
            from = start + end;
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_simulation_passes() {
        let report = run_simulator(SimulatorConfig {
            total_operations: 2_000,
            ..Default::default()
        });
        assert!(report.passed(), "{}", report.generate_text());
    }

    #[test]
    fn seeds_are_reproducible() {
        let run = |seed| {
            let report = run_simulator(SimulatorConfig {
                seed,
                total_operations: 500,
                ..Default::default()
            });
            (
                report.stats.successful_operations,
                report.stats.failed_operations,
                report.final_form_count,
                report.final_field_count,
            )
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn report_text_carries_the_verdict() {
        let report = run_simulator(SimulatorConfig {
            total_operations: 100,
            ..Default::default()
        });
        let text = report.generate_text();
        assert!(text.contains("Member Form Simulator Report"));
        assert!(text.contains("Result: PASS"));
    }
}
