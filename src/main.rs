use andromeda_harness::core::ConfigProvider;
use andromeda_harness::utils::error::HarnessError;
use andromeda_harness::utils::{logger, validation::Validate};
use andromeda_harness::{CliArgs, Harness, HarnessConfig, SuiteReport};
use anyhow::Context;
use clap::Parser;

fn fail(e: HarnessError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}

fn print_report(report: &SuiteReport) {
    for case in &report.cases {
        println!("{:<10} {:?} ({}ms)", case.name, case.outcome, case.duration_ms);
    }
    println!(
        "{} passed, {} failed, {} total",
        report.passed(),
        report.failed(),
        report.cases.len()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting andromeda-harness");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match HarnessConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no commands will be sent");
        println!("interface: {:?}", config.interface.kind);
        for app in config.apps() {
            println!("would install and test: {}", app);
        }
        return Ok(());
    }

    let interface = match config.build_interface() {
        Ok(interface) => interface,
        Err(e) => fail(e),
    };

    let harness = Harness::for_apps(interface, config.apps(), &config.credentials());

    let report = harness.run().await;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    let code = report.exit_code();
    if code != 0 {
        std::process::exit(code);
    }

    tracing::info!("✅ All test cases passed");
    Ok(())
}
