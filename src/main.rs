use clap::{Args, Parser, Subcommand};
use rgen_studio::logger::{self, LoggerConfig};
use rgen_studio::notify::ConsoleNotifier;
use rgen_studio::storage::{open_quota_store, QuotaStore};
use rgen_studio::{Config, GenerationResult, GenerationWorkflow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_DOWNLOAD_NAME: &str = "generated-image.png";

#[derive(Parser)]
#[command(name = "rgen-studio")]
#[command(about = "Generate styled images from text prompts, within a fixed quota")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    log_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one image from a prompt
    Generate(GenerateArgs),

    /// Prompt repeatedly, with regenerate and download commands
    Interactive,

    /// List style presets
    Styles,

    /// List output sizes
    Sizes,

    /// Show how many generations are left
    Quota,

    /// Clear the persisted generation counter
    ResetQuota,
}

#[derive(Args)]
struct GenerateArgs {
    /// Description of the image
    #[arg(required = true)]
    prompt: Vec<String>,

    /// Output size, e.g. 1024x1792
    #[arg(short, long)]
    size: Option<String>,

    /// Style preset id
    #[arg(long)]
    style: Option<String>,

    /// Save the image to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let mut log_config = LoggerConfig::new().with_verbosity(cli.verbose);
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file_output(path);
    }
    logger::init_with_config(log_config)?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }

    let config = Config::from_env();

    match cli.command {
        Commands::Generate(args) => generate(&config, args).await,
        Commands::Interactive => interactive(&config).await,
        Commands::Styles => {
            for style in rgen_studio::Catalog::default().styles() {
                println!("{:<12} {}", style.id, style.display_name);
            }
            Ok(())
        }
        Commands::Sizes => {
            for size in rgen_studio::Catalog::default().sizes() {
                println!("{:<12} {}", size.value, size.display_name);
            }
            Ok(())
        }
        Commands::Quota => {
            let used = open_quota_store(&config).read().await?;
            println!(
                "{} of {} generations used, {} remaining",
                used,
                config.max_generations,
                config.max_generations.saturating_sub(used)
            );
            Ok(())
        }
        Commands::ResetQuota => {
            open_quota_store(&config).write(0).await?;
            println!("Generation counter reset");
            Ok(())
        }
    }
}

async fn build_workflow(config: &Config) -> Result<GenerationWorkflow, Box<dyn std::error::Error>> {
    Ok(GenerationWorkflow::from_config(config)
        .await?
        .with_notifier(Arc::new(ConsoleNotifier)))
}

async fn generate(config: &Config, args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let workflow = build_workflow(config).await?;

    if let Some(size) = &args.size {
        workflow.select_size(size)?;
    }
    if let Some(style) = args.style {
        workflow.select_style(style);
    }
    workflow.set_prompt(args.prompt.join(" "));

    // the notifier has already reported the failure
    let result = match workflow.request_generation().await {
        Ok(result) => result,
        Err(_) => std::process::exit(1),
    };
    print_result(&result, args.json)?;

    if let Some(path) = args.output {
        save_image(&result.image_url, &path).await?;
    }
    Ok(())
}

fn print_result(result: &GenerationResult, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.image_url);
    }
    Ok(())
}

async fn save_image(url: &str, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    tokio::fs::write(path, &bytes).await?;
    println!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

const INTERACTIVE_HELP: &str = "\
Type a prompt to generate an image, or one of:
  :size <value>       select output size
  :style <id>         select style preset
  :regen              regenerate with the last size and style
  :download [path]    save the current image
  :quota              show remaining generations
  :quit               exit";

async fn interactive(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let workflow = build_workflow(config).await?;
    println!("{}", INTERACTIVE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            ":quit" | ":q" => break,
            ":help" => println!("{}", INTERACTIVE_HELP),
            ":size" => {
                if let Err(e) = workflow.select_size(arg) {
                    eprintln!("{}", e);
                }
            }
            ":style" => workflow.select_style(arg),
            ":quota" => println!("{} generations remaining", workflow.remaining()),
            ":regen" => {
                if let Ok(result) = workflow.regenerate().await {
                    println!("{}", result.image_url);
                }
            }
            ":download" => match workflow.download_current_image() {
                Some(url) => {
                    let path = if arg.is_empty() { DEFAULT_DOWNLOAD_NAME } else { arg };
                    if let Err(e) = save_image(&url, Path::new(path)).await {
                        eprintln!("Download failed: {}", e);
                    }
                }
                None => eprintln!("Nothing to download yet"),
            },
            _ => {
                workflow.set_prompt(line);
                if let Ok(result) = workflow.request_generation().await {
                    println!("{}", result.image_url);
                }
            }
        }
    }
    Ok(())
}
