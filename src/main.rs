use anyhow::Result;
use clap::Parser;
use jobdrift::cli::{Cli, OutputFormat};
use jobdrift::comparison::{analyze, DriftAnalysis, IntegrityPolicy};
use jobdrift::config::SimulationConfig;
use jobdrift::csv_output::{CsvComparisonOutput, CsvWeeklyOutput};
use jobdrift::json_output::{JsonOutput, JsonRunInfo};
use jobdrift::record::JobRunRecord;
use jobdrift::summary::PopulationSummary;
use jobdrift::workload::RecordGenerator;
use jobdrift::{ingest, text_output};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Records to analyze, plus the summary when they were generated here
struct Workload {
    records: Vec<JobRunRecord>,
    summary: Option<PopulationSummary>,
    seed: Option<u64>,
}

/// Generate a population from `config`, optionally exporting it
fn generate_workload(config: &SimulationConfig, args: &Cli) -> Result<Workload> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let generator = RecordGenerator::new(config.clone(), &mut rng)?;
    let population = generator.generate(&mut rng);

    if let Some(path) = &args.records_out {
        ingest::write_records(path, &population.records)?;
    }

    let summary = if args.summary {
        Some(PopulationSummary::from_population(
            &population,
            generator.catalog(),
        )?)
    } else {
        None
    };

    Ok(Workload {
        records: population.records,
        summary,
        seed: Some(config.seed),
    })
}

fn load_workload(path: &std::path::Path, args: &Cli) -> Result<Workload> {
    if args.summary {
        tracing::warn!("--summary needs a generated population; ignored with --input");
    }
    if args.records_out.is_some() {
        anyhow::bail!("--records-out only applies to generated populations, not --input");
    }

    Ok(Workload {
        records: ingest::load_records(path)?,
        summary: None,
        seed: None,
    })
}

fn print_text(analysis: &DriftAnalysis, workload: &Workload, args: &Cli) {
    if let Some(summary) = &workload.summary {
        println!("{}", summary.to_report_string());
    }

    print!("{}", text_output::comparison_report(&analysis.comparison, args.top));

    if args.weekly {
        println!();
        print!("{}", text_output::weekly_report(&analysis.weekly.aggregates));
    }
}

fn print_json(
    analysis: &DriftAnalysis,
    workload: Workload,
    config: &SimulationConfig,
    args: &Cli,
) -> Result<()> {
    let run = JsonRunInfo {
        cutover_date: config.cutover_date,
        records: workload.records.len(),
        rejected_records: analysis.weekly.rejected.len(),
        seed: workload.seed,
    };

    let mut output = JsonOutput::new(run, &analysis.comparison);
    if args.weekly {
        output.set_weekly(&analysis.weekly.aggregates);
    }
    if let Some(summary) = workload.summary {
        output.set_summary(summary);
    }

    println!("{}", output.to_json()?);
    Ok(())
}

fn print_csv(analysis: &DriftAnalysis, args: &Cli) {
    let mut comparison = CsvComparisonOutput::new();
    for row in &analysis.comparison.rows {
        comparison.add_row(row.clone());
    }
    print!("{}", comparison.to_csv());

    if args.weekly {
        let mut weekly = CsvWeeklyOutput::new();
        for week in &analysis.weekly.aggregates {
            weekly.add_week(week.clone());
        }
        println!();
        print!("{}", weekly.to_csv());
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let base = match &args.config {
        Some(path) => SimulationConfig::from_toml(path)?,
        None => SimulationConfig::default(),
    };
    let config = args.apply_overrides(base);

    let workload = match &args.input {
        Some(path) => load_workload(path, &args)?,
        None => generate_workload(&config, &args)?,
    };

    let policy = if args.reject_invalid {
        IntegrityPolicy::Reject
    } else {
        IntegrityPolicy::Abort
    };
    let analysis = analyze(&workload.records, config.cutover_date, policy)?;

    if !analysis.weekly.rejected.is_empty() {
        eprintln!(
            "warning: rejected {} record(s) that violate causality",
            analysis.weekly.rejected.len()
        );
    }

    match args.format {
        OutputFormat::Text => print_text(&analysis, &workload, &args),
        OutputFormat::Json => print_json(&analysis, workload, &config, &args)?,
        OutputFormat::Csv => print_csv(&analysis, &args),
    }

    Ok(())
}
