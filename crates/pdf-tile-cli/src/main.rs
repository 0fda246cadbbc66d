use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use pdf_tile::constants::pt_to_mm;
use pdf_tile::{ArtifactKind, LayoutMode, SheetGeometry, TileOptions, TileSession};
use std::path::{Path, PathBuf};

mod logger;

#[derive(Parser)]
#[command(name = "pdft", about = "Print-ready sheet tiling for PDF pages", version)]
struct Cli {
    /// Log per-page and per-sheet detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize a PDF and tile its pages onto A4 sheets
    Tile {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Rasterization scale (pixels per point)
        #[arg(long)]
        render_scale: Option<f32>,

        /// JPEG quality for flattened pages (1-100)
        #[arg(long)]
        jpeg_quality: Option<u8>,

        /// Only write the merged PDF
        #[arg(long)]
        no_per_page: bool,

        /// Save the effective options as JSON
        #[arg(long)]
        save_config: Option<PathBuf>,
    },

    /// Show how pages would be tiled, without rendering
    Stats {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Maximum rows of copies per page (default: as many as fit)
    #[arg(long)]
    max_rows: Option<usize>,

    /// Pack one copy of every page onto shared sheets
    #[arg(long, conflicts_with = "stacked")]
    pack_all: bool,

    /// Stack each page's rows of copies onto shared sheets
    #[arg(long)]
    stacked: bool,

    /// Load options from a JSON file (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl LayoutArgs {
    async fn to_options(&self) -> Result<TileOptions> {
        let mut options = match &self.config {
            Some(path) => TileOptions::load(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?,
            None => TileOptions::default(),
        };

        if self.max_rows.is_some() {
            options.max_rows = self.max_rows;
        }
        if self.pack_all {
            options.mode = LayoutMode::PackAll;
        } else if self.stacked {
            options.mode = LayoutMode::Stacked;
        }

        Ok(options)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

fn artifact_path(dir: &Path, stem: &str, kind: ArtifactKind) -> PathBuf {
    match kind {
        ArtifactKind::Merged => dir.join(format!("{}-all-pages.pdf", stem)),
        ArtifactKind::PerPage(index) => dir.join(format!("{}-page-{}.pdf", stem, index + 1)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Tile {
            input,
            output,
            layout,
            render_scale,
            jpeg_quality,
            no_per_page,
            save_config,
        } => {
            let mut options = layout.to_options().await?;
            if let Some(scale) = render_scale {
                options.render_scale = scale;
            }
            if let Some(quality) = jpeg_quality {
                options.jpeg_quality = quality;
            }
            options.validate()?;

            if let Some(path) = save_config {
                options.save(&path).await?;
                println!("Saved options → {}", path.display());
            }

            let bytes = pdf_tile::read_document(&input)
                .await
                .with_context(|| format!("reading {}", input.display()))?;
            tokio::fs::create_dir_all(&output).await?;

            let mut session = TileSession::new();
            let name = input.display().to_string();
            let artifacts = session
                .extract(name, bytes, &options, |p| {
                    if p.total > 0 {
                        eprint!("\rRendering page {}/{}", p.current, p.total);
                        if p.is_complete() {
                            eprintln!();
                        }
                    }
                })
                .await?;

            if artifacts.is_empty() {
                bail!("{} has no pages", input.display());
            }

            let write_per_page = !no_per_page && options.mode.has_per_page_outputs();
            let stem = file_stem(&input);
            for artifact in artifacts.iter() {
                if !write_per_page && artifact.kind != ArtifactKind::Merged {
                    continue;
                }
                let path = artifact_path(&output, &stem, artifact.kind);
                pdf_tile::save_artifact(artifact, &path).await?;
                println!("Wrote {}", path.display());
            }

            for warning in session.warnings() {
                println!("Warning: no tiles for {}", warning);
            }
            session.clear();
        }

        Commands::Stats { input, layout } => {
            let options = layout.to_options().await?;
            let bytes = pdf_tile::read_document(&input)
                .await
                .with_context(|| format!("reading {}", input.display()))?;
            let sizes = pdf_tile::read_page_sizes(&bytes)?;
            let geometry = SheetGeometry::A4;
            let stats = pdf_tile::calculate_statistics(&sizes, &options, &geometry)?;

            println!("Tiling Statistics:");
            println!(
                "  Sheet: {:.0} x {:.0} mm, {:.1} mm margin",
                pt_to_mm(geometry.width_pt),
                pt_to_mm(geometry.height_pt),
                pt_to_mm(geometry.margin_pt)
            );
            println!("  Source pages: {}", stats.source_pages);
            println!("  Merged sheets: {}", stats.merged_sheets);
            println!("  Per-page outputs: {}", stats.per_page_outputs);
            println!("  Total tiles: {}", stats.total_tiles);
            for (index, tiles) in stats.tiles_per_page.iter().enumerate() {
                println!("  Page {}: {} tile(s)", index + 1, tiles);
            }
            if stats.skipped_pages > 0 {
                println!("  Skipped pages: {}", stats.skipped_pages);
            }
        }
    }

    Ok(())
}
