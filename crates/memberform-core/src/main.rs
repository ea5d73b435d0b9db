use clap::{value_parser, Arg, ArgAction, Command};
use memberform_core::submit::CannedTransport;
use memberform_core::test_harness::{run_simulator, SimulatorConfig, TestHarness};
use memberform_core::{
    EventQuery, FormManager, FormRegistry, RosterOps, SubmitFlow, SubmitGate,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("memberform")
        .version("0.1.0")
        .about("Member number form service")
        .arg_required_else_help(false)
        .subcommand(
            Command::new("simulate")
                .about("Run form simulator")
                .arg(
                    Arg::new("operations")
                        .long("ops")
                        .default_value("10000")
                        .value_parser(value_parser!(u64))
                        .help("Number of operations to simulate"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("stop-on-violation")
                        .long("stop-on-violation")
                        .action(ArgAction::SetTrue)
                        .help("Stop simulation on first violation"),
                ),
        )
        .subcommand(
            Command::new("stress")
                .about("Run stress test")
                .arg(
                    Arg::new("forms")
                        .long("forms")
                        .default_value("8")
                        .value_parser(value_parser!(usize))
                        .help("Number of concurrent forms"),
                )
                .arg(
                    Arg::new("iterations")
                        .long("iterations")
                        .default_value("5000")
                        .value_parser(value_parser!(usize))
                        .help("Number of iterations"),
                ),
        )
        .subcommand(Command::new("certify").about("Run certification across multiple seeds"))
        .subcommand(
            Command::new("render")
                .about("Walk one form through add, remove, and submit, printing each projection"),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("simulate", args)) => {
            let operations = *args.get_one::<u64>("operations").unwrap();
            let seed = *args.get_one::<u64>("seed").unwrap();
            let stop_on_violation = args.get_flag("stop-on-violation");

            println!("Running form simulator...");
            println!("Operations: {}", operations);
            println!("Seed: {}", seed);
            println!();

            let config = SimulatorConfig {
                seed,
                total_operations: operations,
                stop_on_first_violation: stop_on_violation,
                ..Default::default()
            };

            let report = run_simulator(config);

            println!("{}", report.generate_text());

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        Some(("stress", args)) => {
            let forms = *args.get_one::<usize>("forms").unwrap();
            let iterations = *args.get_one::<usize>("iterations").unwrap();

            println!("Running stress test...");
            println!("Forms: {}", forms);
            println!("Iterations: {}", iterations);
            println!();

            let report = TestHarness::run_stress_test(forms, iterations);

            println!("Stress Test Report:");
            println!("  Forms: {}", report.forms);
            println!("  Iterations: {}", report.iterations);
            println!("  Violations: {}", report.violations);
            println!("  Success: {}", report.success);

            std::process::exit(if report.success { 0 } else { 1 });
        }
        Some(("certify", _)) => {
            let report = TestHarness::run_certification();

            println!("Certification Report:");
            println!("  Seeds tested: {}", report.seeds_tested);
            println!("  Total violations: {}", report.total_violations);
            println!("  Passed: {}", report.passed);

            std::process::exit(if report.passed { 0 } else { 1 });
        }
        Some(("render", _)) => {
            if let Err(e) = run_walkthrough().await {
                eprintln!("walkthrough failed: {e}");
                std::process::exit(1);
            }
        }
        _ => {}
    }
}

/// Drive one form through the whole lifecycle against a canned endpoint.
async fn run_walkthrough() -> anyhow::Result<()> {
    let registry = FormRegistry::new();
    let form_id = registry.create_form()?;

    println!("=== Member Form Walkthrough ===");
    println!();
    println!("Form: {}", form_id);
    println!("API version: {}", registry.api_version());
    println!();

    println!("--- Adding three fields ---");
    for _ in 0..3 {
        let receipt = registry.add_field(form_id)?;
        println!("{}", receipt.row);
    }
    println!();

    registry.set_field_value(form_id, 1, "240012345678")?;
    registry.set_field_value(form_id, 2, "240087654321")?;
    registry.set_field_value(form_id, 4, "240011112222")?;

    println!("--- Submit gate with field 3 blank ---");
    match registry.check_submit(form_id) {
        Ok(()) => println!("gate passed"),
        Err(e) => println!("gate rejected: {e}"),
    }
    registry.set_field_value(form_id, 3, "240099998888")?;
    println!();

    println!("--- Removing field 2 ---");
    let removal = registry.remove_field(form_id, 2)?;
    for rename in &removal.renames {
        println!(
            "field {} now answers to {} / {}",
            rename.to_index, rename.field_name, rename.remove_name
        );
    }
    println!();

    println!("--- Added-row markup ---");
    println!("{}", registry.container_markup(form_id)?);
    println!();

    println!("--- Snapshot ---");
    let snapshot = registry.snapshot(form_id)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!();

    println!("--- Submit against a rejecting endpoint ---");
    let body = concat!(
        "<html><body>",
        "<div id=\"errors_form\"><p>stale page copy</p></div>",
        "<form><div id=\"errors_form\"><p>Member number not found</p></div></form>",
        "</body></html>",
    );
    let failing = CannedTransport::rejecting(500, body);
    let receipt = registry.submit(form_id, &failing).await?;
    println!("outcome: {}", serde_json::to_string_pretty(&receipt.outcome)?);
    println!("view: {}", serde_json::to_string_pretty(&registry.view(form_id)?)?);
    println!();

    println!("--- Retry against an accepting endpoint ---");
    let accepting = CannedTransport::accepting("/discount/applied");
    let receipt = registry.submit(form_id, &accepting).await?;
    println!("outcome: {}", serde_json::to_string_pretty(&receipt.outcome)?);
    println!("view: {}", serde_json::to_string_pretty(&registry.view(form_id)?)?);
    println!();

    let events = registry.query_events(Default::default(), 100)?;
    println!("--- Journal ({} events) ---", events.len());
    for event in &events {
        println!("  [{}] {} -> {}", event.timestamp, event.action, event.result);
    }

    Ok(())
}
