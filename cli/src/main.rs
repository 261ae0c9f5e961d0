//! regionlink CLI - inspect document-analysis region payloads

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use regionlink::codec::decode;
use regionlink::geometry::{ViewContext, ViewOptions};
use regionlink::model::{ContentId, Point, Region};
use regionlink::{IndexOptions, JsonFormat, RegionIndex, SelectionSynchronizer};

#[derive(Parser)]
#[command(name = "regionlink")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Inspect region overlays of document-analysis payloads", long_about = None)]
struct Cli {
    /// Normalize pages one at a time
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of the payload
    Info {
        /// Payload JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List the regions of a page as a content list would
    #[command(alias = "ls")]
    Regions {
        /// Payload JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Include regions the content list hides
        #[arg(short, long)]
        all: bool,
    },

    /// Resolve a click on the rendered page to a region
    Hit {
        /// Payload JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Click x in view pixels
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,

        /// Click y in view pixels
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,

        #[command(flatten)]
        view: ViewArgs,

        /// Print the selection notification the click produces
        #[arg(long)]
        select: bool,
    },

    /// Decode a compound cell token
    Cell {
        /// Token such as T1_cell_0_0_cell_0_1_cell_0_1
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Export the normalized index (or one page's overlay) as JSON
    Json {
        /// Payload JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Export the projected overlay of the view's page instead
        #[arg(long)]
        projection: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show version information
    Version,
}

/// How the page is shown in the viewer.
#[derive(Args)]
struct ViewArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    page: u32,

    /// Zoom factor
    #[arg(long, default_value = "1.0", env = "REGIONLINK_ZOOM")]
    zoom: f64,

    /// Rotation in degrees (quarter turns)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    rotation: i32,

    /// Rendered page width at zoom 1 (defaults to the page width)
    #[arg(long)]
    base_width: Option<f64>,

    /// Rendered page height at zoom 1 (defaults to the page height)
    #[arg(long)]
    base_height: Option<f64>,
}

impl ViewArgs {
    fn to_view(&self, index: &RegionIndex) -> Result<ViewContext, Box<dyn std::error::Error>> {
        let page = index
            .page(self.page)
            .ok_or(regionlink::Error::PageNotFound(self.page))?;
        let width = self
            .base_width
            .or(page.width)
            .ok_or("page has no width, pass --base-width")?;
        let height = self
            .base_height
            .or(page.height)
            .ok_or("page has no height, pass --base-height")?;

        Ok(ViewContext::new(width, height)
            .with_zoom(self.zoom)
            .with_rotation(self.rotation)
            .with_page(self.page))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = if cli.sequential {
        IndexOptions::new().sequential()
    } else {
        IndexOptions::default()
    };

    let result = match cli.command {
        Some(Commands::Info { input }) => cmd_info(&input, &options),
        Some(Commands::Regions { input, page, all }) => cmd_regions(&input, &options, page, all),
        Some(Commands::Hit {
            input,
            x,
            y,
            view,
            select,
        }) => cmd_hit(&input, &options, Point::new(x, y), &view, select),
        Some(Commands::Cell { token }) => cmd_cell(&token),
        Some(Commands::Json {
            input,
            output,
            compact,
            projection,
            view,
        }) => cmd_json(
            &input,
            &options,
            output.as_deref(),
            compact,
            projection.then_some(&view),
        ),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: regionlink <COMMAND> <FILE>".yellow());
            println!("       regionlink --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, options: &IndexOptions) -> regionlink::Result<RegionIndex> {
    if input == Path::new("-") {
        log::debug!("Reading payload from stdin");
        regionlink::load_reader_with_options(io::stdin().lock(), options)
    } else {
        regionlink::load_file_with_options(input, options)
    }
}

fn cmd_info(input: &Path, options: &IndexOptions) -> Result<(), Box<dyn std::error::Error>> {
    let index = load(input, options)?;

    println!("{}", "Payload Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), index.page_count());
    println!("{}: {}", "Regions".bold(), index.region_count());
    println!("{}: {}", "Metrics".bold(), index.metrics().len());
    println!(
        "{}: {}",
        "Markdown".bold(),
        if index.markdown().is_some() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in index.pages() {
        let shape = index
            .page_shape(page.page_id)
            .map(|s| s.field())
            .unwrap_or("none");
        let size = page
            .dimensions()
            .map(|(w, h)| format!("{} x {}", w, h))
            .unwrap_or_else(|| "unknown size".to_string());
        let line = format!(
            "{:>4}  {:<12} {:>4} regions  {}",
            page.page_id,
            shape,
            page.region_count(),
            size
        );
        if page.is_empty() {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

fn cmd_regions(
    input: &Path,
    options: &IndexOptions,
    page_id: u32,
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load(input, options)?;
    let page = index
        .page(page_id)
        .ok_or(regionlink::Error::PageNotFound(page_id))?;

    let regions: Vec<&Region> = if all {
        page.regions.iter().collect()
    } else {
        index.list_entries(page_id)
    };

    for region in &regions {
        print_region(region);
    }

    println!(
        "\n{} {} of {} regions on page {}",
        "Listed".green().bold(),
        regions.len(),
        page.region_count(),
        page_id
    );

    Ok(())
}

fn print_region(region: &Region) {
    let id = format!("[{}]", region.content_id);
    let kind = region.kind.label();
    let mut line = format!("{:<10} {:<12}", id.bold(), kind.cyan());

    if let Some(label) = &region.label {
        line.push_str(&format!(" ({})", label));
    }
    if let Some(table) = &region.table {
        line.push_str(&format!(
            " {}x{} table, {} cells",
            table.row_count(),
            table.column_count(),
            table.len()
        ));
    }
    if let Some(text) = region.text.as_deref().filter(|t| !t.trim().is_empty()) {
        line.push_str(&format!(" {}", preview(text, 60)));
    }

    if region.clickable {
        println!("{}", line);
    } else {
        println!("{} {}", line.dimmed(), "(inactive)".dimmed());
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}…", cut)
    }
}

fn cmd_hit(
    input: &Path,
    options: &IndexOptions,
    click: Point,
    view_args: &ViewArgs,
    select: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load(input, options)?;
    let view = view_args.to_view(&index)?;
    let view_options = ViewOptions::default();

    let Some(hit) = index.hit_at(view_args.page, click, &view, &view_options)? else {
        println!("{}", "No region at this point".yellow());
        return Ok(());
    };

    print_region(hit.region);
    if let Some(token) = &hit.cell_token {
        println!("{}: {}", "Cell".bold(), token);
    }

    if select {
        let content_id: ContentId = hit.region.content_id.clone();
        let token = hit.cell_token.clone();
        let mut sync = SelectionSynchronizer::new(std::sync::Arc::new(index.clone()));
        let notification =
            sync.activate_from_overlay(&content_id, view_args.page, token.as_deref())?;
        println!("{}", serde_json::to_string_pretty(&notification)?);
    }

    Ok(())
}

fn cmd_cell(token: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = decode(token).ok_or_else(|| format!("not a cell token: {}", token))?;

    println!("{}: {}", "Table".bold(), id.table_id);
    println!("{}: {}", "Row index".bold(), id.row_index);
    println!("{}: {}", "Column index".bold(), id.col_index);
    println!("{}: {} (span {})", "Row".bold(), id.row, id.row_span);
    println!("{}: {} (span {})", "Column".bold(), id.col, id.col_span);

    Ok(())
}

fn cmd_json(
    input: &Path,
    options: &IndexOptions,
    output: Option<&Path>,
    compact: bool,
    projection: Option<&ViewArgs>,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = match projection {
        Some(view_args) => {
            let view = view_args.to_view(&index)?;
            let projected = index.project_page(view_args.page, &view, &ViewOptions::default())?;
            regionlink::index::to_json(&projected, format)?
        }
        None => index.to_json(format)?,
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "regionlink".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Region overlay and selection sync for document analysis");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYLOAD: &str = r#"{"pages": [{"page_id": 1, "width": 300, "height": 450,
        "structured": [{"id": 4, "type": "paragraph", "text": "Hello  world",
                        "pos": [30, 60, 60, 60, 60, 90, 30, 90]}]}]}"#;

    #[test]
    fn test_cli_parses_hit() {
        let cli = Cli::try_parse_from([
            "regionlink", "hit", "a.json", "-x", "10", "-y", "20", "--zoom", "2", "--rotation", "-90",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Hit { x, y, view, .. }) => {
                assert_eq!((x, y), (10.0, 20.0));
                assert_eq!(view.zoom, 2.0);
                assert_eq!(view.rotation, -90);
                assert_eq!(view.page, 1);
            }
            _ => panic!("expected hit command"),
        }
    }

    #[test]
    fn test_view_defaults_to_page_size() {
        let index = regionlink::load_str(PAYLOAD).unwrap();
        let args = ViewArgs {
            page: 1,
            zoom: 1.0,
            rotation: 0,
            base_width: Some(200.0),
            base_height: None,
        };
        let view = args.to_view(&index).unwrap();
        assert_eq!(view.rendered_page_width, 200.0);
        assert_eq!(view.rendered_page_height, 450.0);

        let missing = ViewArgs { page: 2, ..args };
        assert!(missing.to_view(&index).is_err());
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("Hello  world", 60), "Hello world");
        assert_eq!(preview("abcdef", 3), "abc…");
    }

    #[test]
    fn test_json_to_file() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        input.write_all(PAYLOAD.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.json");

        cmd_json(input.path(), &IndexOptions::default(), Some(&out), true, None).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("\"content_id\":4"));
    }

    #[test]
    fn test_cell_rejects_garbage() {
        assert!(cmd_cell("nope").is_err());
        assert!(cmd_cell("T1_cell_0_0_cell_0_1_cell_0_1").is_ok());
    }
}
