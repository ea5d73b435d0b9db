//! Stress test - 10,000 randomized operations with invariant checks
//!
//! Run with: cargo test -p memberform-core --test stress_test

use memberform_core::test_harness::{run_simulator, SimulatorConfig};
use std::time::Instant;

#[test]
fn stress_test_10k_operations() {
    println!("\n[STRESS TEST] Running 10,000 operations...");

    let start = Instant::now();
    let report = run_simulator(SimulatorConfig::default());
    let duration = start.elapsed();

    let ops_per_sec = report.stats.total_operations as f64 / duration.as_secs_f64();
    println!(
        "  Completed in {:.2}s ({:.0} ops/sec)",
        duration.as_secs_f64(),
        ops_per_sec
    );
    println!("  Final forms: {}", report.final_form_count);
    println!("  Final fields: {}", report.final_field_count);

    assert!(report.passed(), "{}", report.generate_text());
    assert_eq!(report.stats.total_operations, 10_000);
    assert!(report.stats.successful_operations > 0);
    assert!(
        report.stats.failed_operations > 0,
        "The invalid-operation mix should produce rejections"
    );
}

#[test]
fn stress_test_across_seeds() {
    for seed in [1, 7, 99, 12345] {
        let report = run_simulator(SimulatorConfig {
            seed,
            total_operations: 2_000,
            ..Default::default()
        });
        assert!(report.passed(), "seed {seed}: {}", report.generate_text());
    }
}
