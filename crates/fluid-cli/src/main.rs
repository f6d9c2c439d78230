//! Fluid CLI.
//!
//! Generates versioned API code from the history of a schema.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fluid_compiler::schema::VersionDelta;
use fluid_compiler::{parse_addons, FluidError, GenerateResult, Generator, GeneratorConfig, Resolution, Side};

mod ui;

#[derive(Parser)]
#[command(name = "fluid")]
#[command(version)]
#[command(about = "Fluid - versioned API code generator driven by schema history")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from a spec history
    Generate {
        /// JSON array of specs, or a directory of *.json specs (oldest first)
        #[arg(short, long, env = "FLUID_SRC")]
        src: PathBuf,

        /// Output directory for generated code
        #[arg(short, long, env = "FLUID_DEST", default_value = "generated")]
        dest: PathBuf,

        /// Name of the generated file and directory
        #[arg(short, long, env = "FLUID_NAME", default_value = "Api")]
        name: String,

        /// Target language (haskell, json)
        #[arg(short, long, env = "FLUID_LANG", default_value = "haskell")]
        lang: String,

        /// Module name or prefix
        #[arg(short = 'm', long, env = "FLUID_PREFIX", default_value = "Api")]
        prefix: String,

        /// Side to generate (client, server)
        #[arg(short = 'e', long, env = "FLUID_SIDE", default_value = "client")]
        side: String,

        /// Oldest major version to support
        #[arg(short = 'v', long = "major", env = "FLUID_MAJOR", default_value_t = 0)]
        major: u32,

        /// Comma-separated add-ons passed to the emitter
        #[arg(short, long, env = "FLUID_ADDON", default_value = "")]
        addon: String,
    },

    /// Show the diff and assigned version of every spec transition
    Diff {
        /// JSON array of specs, or a directory of *.json specs (oldest first)
        #[arg(short, long, env = "FLUID_SRC")]
        src: PathBuf,

        /// Oldest major version to support
        #[arg(short = 'v', long = "major", env = "FLUID_MAJOR", default_value_t = 0)]
        major: u32,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Generate {
            src,
            dest,
            name,
            lang,
            prefix,
            side,
            major,
            addon,
        } => {
            let config = GeneratorConfig {
                src,
                dest,
                name,
                target: lang,
                side: side.parse::<Side>()?,
                prefix,
                major_floor: major,
                addons: parse_addons(&addon),
                ..GeneratorConfig::default()
            };
            generate(config).await?;
        }

        Commands::Diff { src, major } => {
            let config = GeneratorConfig {
                src,
                major_floor: major,
                ..GeneratorConfig::default()
            };
            diff(config).await?;
        }
    }

    Ok(())
}

async fn generate(config: GeneratorConfig) -> miette::Result<()> {
    let start = Instant::now();
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
    println!();
    tracing::debug!(
        src = %config.src.display(),
        lang = %config.target,
        side = %config.side,
        floor = config.major_floor,
        "starting generation"
    );

    let spinner = ui::spinner("Resolving spec history...");
    let generator = Generator::new(config);
    let (generator, result) = tokio::task::spawn_blocking(move || {
        let result = generator.generate();
        (generator, result)
    })
    .await
    .into_diagnostic()?;
    spinner.finish_and_clear();

    let result = result.map_err(report_run_failure)?;
    print_issues(&result.resolution);
    print_summary(generator.config(), &result);

    ui::timing("Done", start.elapsed().as_millis());
    println!();
    Ok(())
}

async fn diff(config: GeneratorConfig) -> miette::Result<()> {
    let spinner = ui::spinner("Comparing specs...");
    let resolution = tokio::task::spawn_blocking(move || Generator::new(config).inspect())
        .await
        .into_diagnostic()?;
    spinner.finish_and_clear();

    let resolution = resolution.map_err(report_run_failure)?;
    print_issues(&resolution);

    println!();
    ui::box_header(&format!("{} Spec History", ui::symbols::TRIANGLE));
    ui::box_line("");
    ui::box_line(&format!("#0  {}  initial", resolution.versions[0]));

    for (i, diff) in resolution.diffs.iter().enumerate() {
        let (from, to) = (resolution.versions[i], resolution.versions[i + 1]);
        let delta = VersionDelta::between(from, to).map_or("declared", |d| d.as_str());
        ui::box_line("");
        ui::box_line(&format!("#{}  {} {} {}  [{}]", i + 1, from, ui::symbols::ARROW, to, delta));
        if diff.is_empty() {
            ui::box_line("  no changes");
        }
        for line in diff.format_changes().lines() {
            ui::box_line(line);
        }
    }

    ui::box_line("");
    ui::box_footer();
    println!();

    let resolved: Vec<String> = resolution.specs.iter().map(|s| s.version.to_string()).collect();
    ui::info(&format!("Resolved for generation: {}", resolved.join(", ")));
    Ok(())
}

/// Prints a short headline for run-level failures before miette renders the report.
fn report_run_failure(err: FluidError) -> miette::Report {
    match &err {
        FluidError::NoSpecs => ui::error_header("No specs"),
        FluidError::NoSupportedVersion { .. } => ui::error_header("Spec support is too high"),
        _ => ui::error_header("Hold up."),
    }
    err.into()
}

fn print_issues(resolution: &Resolution) {
    let diagnostics = &resolution.diagnostics;
    if diagnostics.is_empty() {
        return;
    }

    for issue in diagnostics.iter() {
        if issue.is_error() {
            ui::error(&issue.to_string());
        } else {
            ui::warn(&issue.to_string());
        }
    }
    println!();
}

fn print_summary(config: &GeneratorConfig, result: &GenerateResult) {
    let latest = result
        .resolution
        .latest()
        .map(|spec| spec.version.to_string())
        .unwrap_or_default();

    ui::success(&format!(
        "Generated {} {} code for version {}",
        config.target, config.side, latest
    ));
    let diagnostics = &result.resolution.diagnostics;
    ui::dim(&format!(
        "{} specs, {} major versions, {} supported, {} issues ({} dropped data)",
        result.specs,
        result.majors,
        result.resolution.specs.len(),
        diagnostics.len(),
        diagnostics.error_count()
    ));
    println!();

    ui::box_header("FILES");
    for path in &result.files {
        ui::box_line(&path.display().to_string());
    }
    ui::box_footer();
    println!();
}
