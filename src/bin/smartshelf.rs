//! Command-line interface for the SmartShelf demo core
//!
//! Drives the same workflows the browser panels expose: pixel filtering,
//! object counting, property detection, and the CSV priority preview.
//! Results print as JSON on stdout with a human summary on stderr.

use clap::{Parser, Subcommand};
use serde_json::json;
use smartshelf::detection::{placement_recommendation, SyntheticDetector};
use smartshelf::views::{PriorityPanel, PropertyPanel};
use smartshelf::{
    image_loader, AnalysisBackend, BackendConfig, CsvUpload, FilterKind, ImageUpload,
    LocalBackend, RemoteBackend, ShelfError,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "SmartShelf demo workflows: filters, counting, properties, CSV priority"
)]
struct Cli {
    /// Forward work to the remote vision service instead of simulating
    #[arg(long, global = true)]
    remote: bool,

    /// Backend configuration file (JSON); defaults to http://localhost:8000
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the local simulation, for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a pixel filter to an image
    Preprocess {
        /// Image file to process
        image: PathBuf,
        /// Filter to apply: grayscale, edges, or threshold
        #[arg(long, default_value = "grayscale")]
        filter: FilterKind,
        /// Where to write the processed image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Count objects on a shelf image
    Count {
        /// Image file to analyze
        image: PathBuf,
        /// Where to write the annotated image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Detect synthetic product properties on a shelf image
    Properties {
        /// Image file to analyze
        image: PathBuf,
        /// Where to write the annotated image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Preview a CSV table and generate images for top-priority items
    Priority {
        /// CSV file with a header row
        csv: PathBuf,
        /// How many top-priority items to generate images for
        #[arg(long, default_value_t = 5)]
        top_n: u32,
        /// 1-based table page to print
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("Error: {error}");
        eprintln!("{}", error.user_message());
        process::exit(1);
    }
}

fn run(cli: &Cli) -> smartshelf::Result<()> {
    let mut backend = make_backend(cli)?;
    match &cli.command {
        Command::Preprocess {
            image,
            filter,
            output,
        } => preprocess(backend.as_mut(), image, *filter, output.as_deref()),
        Command::Count { image, output } => count(backend.as_mut(), image, output.as_deref()),
        Command::Properties { image, output } => properties(cli, image, output.as_deref()),
        Command::Priority { csv, top_n, page } => {
            priority(backend.as_mut(), csv, *top_n, *page)
        }
    }
}

fn make_backend(cli: &Cli) -> smartshelf::Result<Box<dyn AnalysisBackend>> {
    if cli.remote {
        let config = match &cli.config {
            Some(path) => BackendConfig::from_json_file(path).map_err(|e| {
                ShelfError::validation(format!("Could not read backend config: {e}"))
            })?,
            None => BackendConfig::default_local(),
        };
        Ok(Box::new(RemoteBackend::new(config)))
    } else {
        let backend = match cli.seed {
            Some(seed) => LocalBackend::seeded(seed),
            None => LocalBackend::from_entropy(),
        };
        Ok(Box::new(backend))
    }
}

fn preprocess(
    backend: &mut dyn AnalysisBackend,
    image: &Path,
    filter: FilterKind,
    output: Option<&Path>,
) -> smartshelf::Result<()> {
    let upload = ImageUpload::from_file(image)?;
    let outcome = backend.process_image(&upload, filter)?;

    let saved = save_data_url(outcome.processed_image.as_deref(), image, output, "processed")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "filter": filter.as_str(),
            "output": saved,
        }))
        .unwrap_or_default()
    );
    eprintln!("Applied {filter} to {}", image.display());
    Ok(())
}

fn count(
    backend: &mut dyn AnalysisBackend,
    image: &Path,
    output: Option<&Path>,
) -> smartshelf::Result<()> {
    let upload = ImageUpload::from_file(image)?;
    let outcome = backend.count_objects(&upload)?;

    let saved = save_data_url(outcome.processed_image.as_deref(), image, output, "annotated")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "object_count": outcome.object_count,
            "output": saved,
        }))
        .unwrap_or_default()
    );
    match outcome.object_count {
        Some(count) => eprintln!("Objects detected: {count}"),
        None => eprintln!("Backend returned no object count"),
    }
    Ok(())
}

fn properties(cli: &Cli, image: &Path, output: Option<&Path>) -> smartshelf::Result<()> {
    let mut panel = PropertyPanel::new();
    panel.set_image(ImageUpload::from_file(image)?);
    let mut detector = match cli.seed {
        Some(seed) => SyntheticDetector::seeded(seed),
        None => SyntheticDetector::from_entropy(),
    };
    panel.run(&mut detector)?;

    let saved = save_data_url(panel.processed_image(), image, output, "properties")?;
    let report: Vec<_> = panel
        .objects()
        .iter()
        .map(|object| {
            json!({
                "object": object,
                "recommendation": placement_recommendation(object),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "products": report,
            "output": saved,
        }))
        .unwrap_or_default()
    );
    eprintln!("Detected {} products", panel.objects().len());
    Ok(())
}

fn priority(
    backend: &mut dyn AnalysisBackend,
    csv: &Path,
    top_n: u32,
    page: usize,
) -> smartshelf::Result<()> {
    let upload = CsvUpload::from_file(csv, top_n)?;
    let mut panel = PriorityPanel::new();
    panel.upload(&upload, backend)?;

    let mut total_pages = 0;
    if let Some(table) = panel.table() {
        total_pages = table.total_pages();
        eprintln!("{}", table.header().join(" | "));
        for row in table.page(page) {
            eprintln!("{}", row.join(" | "));
        }
        eprintln!("Page {} of {total_pages}", page.clamp(1, total_pages.max(1)));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "top_items": panel.top_items(),
            "generated_images": panel.generated_images().len(),
            "total_pages": total_pages,
        }))
        .unwrap_or_default()
    );
    Ok(())
}

/// Decode a data-URL result and write it next to the input (or to `output`)
fn save_data_url(
    data_url: Option<&str>,
    input: &Path,
    output: Option<&Path>,
    suffix: &str,
) -> smartshelf::Result<Option<String>> {
    let Some(data_url) = data_url else {
        return Ok(None);
    };
    let image = image_loader::from_data_url(data_url)?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("result");
            input.with_file_name(format!("{stem}_{suffix}.png"))
        }
    };
    image
        .save(&path)
        .map_err(|e| ShelfError::decode("Failed to write output image", e))?;
    Ok(Some(path.display().to_string()))
}
