use anyhow::{Context, Result};
use benchmatrix::{
    cli::{Cli, OutputFormat},
    config::AnalysisConfig,
    csv_output::CsvOutput,
    html_output::HtmlOutput,
    json_output::JsonOutput,
    render::RenderSink,
    report::Report,
    results::ResultsTable,
    svg_output::SvgOutput,
    text_output::{pretty_print_record, TextOutput},
};
use clap::Parser;
use std::fs;
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
    }
}

/// Config file or preset, with command-line overrides applied
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None if args.dacapo => AnalysisConfig::dacapo(),
        None => AnalysisConfig::default(),
    };
    args.apply_overrides(&mut config);
    Ok(config)
}

fn make_sink(args: &Cli) -> Result<Box<dyn RenderSink>> {
    let sink: Box<dyn RenderSink> = match args.format {
        OutputFormat::Text => Box::new(TextOutput::new()),
        OutputFormat::Html => {
            let title = format!("Benchmark comparison: {}", args.results.display());
            Box::new(HtmlOutput::new(title))
        }
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Csv => Box::new(CsvOutput::new()),
        OutputFormat::Svg => {
            let dir = args
                .output
                .as_ref()
                .context("--format svg requires --output <DIR>")?;
            Box::new(SvgOutput::new(dir)?)
        }
    };
    Ok(sink)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let table = ResultsTable::from_file(&args.results)
        .with_context(|| format!("Failed to load results from {}", args.results.display()))?;
    tracing::info!("Loaded {} records", table.len());

    if args.print_records {
        for (key, record) in table.iter() {
            print!("{}", pretty_print_record(key, record));
        }
    }

    let config = load_config(&args)?;
    let plan = config.resolve(&table).context("Invalid analysis configuration")?;

    let report = Report::build(&table, &plan, args.report_options())?;

    let mut sink = make_sink(&args)?;
    report.render(sink.as_mut())?;
    let document = sink.finish()?;

    match (&args.output, args.format) {
        (Some(path), format) if format != OutputFormat::Svg => {
            fs::write(path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        _ => print!("{}", document),
    }

    // Skipped workloads only happen under --keep-going; the run still succeeds
    for failure in report.failures() {
        eprintln!(
            "warning: skipped {} {} ({}): {}",
            failure.workload, failure.phase, failure.stage, failure.message
        );
    }

    Ok(())
}
