// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use place_chronicle::utils::logging::{
    format_error, format_info, format_success, format_warning, init_logger,
};
use place_chronicle::{
    Config, GenerateOptions, GenerateOutcome, PLACES, PipelineError, PostWriter,
    SelectionStrategy, run_generate, score_catalog,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "place_chronicle")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Generates dated markdown posts about the current state of notable places", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a place and write its post
    Generate {
        /// Overrides selection.strategy from the configuration
        #[arg(short, long, value_enum)]
        strategy: Option<SelectionStrategy>,

        /// Skip selection and use this catalog entry
        #[arg(short, long, value_name = "NAME")]
        place: Option<String>,

        /// Print the rendered post instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the place catalog
    Places {
        /// Collect and show trend scores
        #[arg(long)]
        scores: bool,
    },

    /// List posts already written
    Posts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    info!("Place Chronicle");
    info!("Loading configuration from: {}", cli.config.display());

    if !cli.config.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
    }
    let config =
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            strategy,
            place,
            dry_run,
        } => {
            let options = GenerateOptions {
                strategy: strategy.unwrap_or(config.selection.strategy),
                place,
                dry_run,
                show_progress: !cli.verbose,
                colored: cli.color,
            };
            cmd_generate(&config, &options).await?;
        }
        Commands::Places { scores } => {
            cmd_places(&config, scores, !cli.verbose, cli.color).await;
        }
        Commands::Posts => {
            cmd_posts(&config)?;
        }
    }

    Ok(())
}

async fn cmd_generate(config: &Config, options: &GenerateOptions) -> Result<()> {
    info!("Generating post (strategy: {:?})", options.strategy);

    match run_generate(config, options).await {
        Ok(GenerateOutcome::Written(path)) => {
            println!("{}", format_success(&format!("Post written to {}", path.display())));
        }
        Ok(GenerateOutcome::Skipped) => {
            println!("{}", format_warning("A post for this place and date already exists"));
        }
        Ok(GenerateOutcome::Preview(markdown)) => {
            println!("{}", markdown);
        }
        Err(PipelineError::Config(message)) => {
            // nothing is written without search credentials
            error!("Configuration error: {}", message);
            println!(
                "{}",
                format_error("Set GOOGLE_API_KEY and GOOGLE_CSE_ID in the environment or a .env file")
            );
        }
        Err(e) => return Err(e).context("Post generation failed"),
    }

    Ok(())
}

async fn cmd_places(config: &Config, scores: bool, show_progress: bool, colored: bool) {
    if !scores {
        println!("\nPlace catalog ({} entries)\n", PLACES.len());
        for place in PLACES {
            println!("  {:<20} {}", place.name, place.location);
        }
        return;
    }

    let ranked = score_catalog(config, show_progress, colored).await;
    if ranked.is_empty() {
        println!("{}", format_warning("No places were scored"));
        return;
    }

    println!("\nTrend scores ({} of {} places)\n", ranked.len(), PLACES.len());
    for (idx, scored) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>3}  {}",
            idx + 1,
            scored.place.name,
            scored.score,
            scored.place.location
        );
    }
}

fn cmd_posts(config: &Config) -> Result<()> {
    let writer = PostWriter::new(config.output.posts_dir.clone());
    let posts = writer
        .list_posts()
        .with_context(|| format!("Failed to list {}", writer.posts_dir().display()))?;

    if posts.is_empty() {
        println!(
            "{}",
            format_info(&format!("No posts in {}", writer.posts_dir().display()))
        );
        return Ok(());
    }

    println!("\n{} post(s) in {}\n", posts.len(), writer.posts_dir().display());
    for post in posts {
        println!("  {}  {}", post.frontmatter.date, post.frontmatter.title);
        println!("     {}", post.filename);
    }

    Ok(())
}
