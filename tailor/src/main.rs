mod input;
mod render;

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use generation_client::{
    ApiKey, Clipboard, Config, GenerationClient, GenerationError, GenerationRequest,
    GenerationResult, ScorePolicy, SystemClipboard,
};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "tailor",
    about = "Tailor a resume to a job posting using Gemini",
    long_about = "Rewrites a resume for a target job description and reports an ATS match score with its reasoning"
)]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tailor a resume to a job description
    Run(RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug)]
struct RunArgs {
    /// Resume text file (`-` for stdin)
    #[arg(short, long)]
    resume: PathBuf,

    /// Target job title
    #[arg(short = 't', long)]
    job_title: String,

    /// Job description text file (`-` for stdin)
    #[arg(short = 'j', long)]
    job_description: PathBuf,

    /// Gemini API key (overrides GEMINI_API_KEY and the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Accept ATS scores outside 0-100
    #[arg(long)]
    lenient_score: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also write the tailored resume to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Copy the tailored resume to the clipboard
    #[arg(short, long)]
    copy: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Set the default model
    SetModel { model: String },
    /// Store an API key in the config file
    SetApiKey { key: String },
    /// Set the API base URL
    SetBaseUrl { url: String },
    /// Set the request timeout in seconds
    SetTimeout { secs: u64 },
    /// Set how out-of-range ATS scores are treated
    SetScorePolicy {
        #[arg(value_parser = parse_score_policy)]
        policy: ScorePolicy,
    },
}

fn parse_score_policy(s: &str) -> std::result::Result<ScorePolicy, String> {
    ScorePolicy::from_str(s).ok_or_else(|| format!("expected 'strict' or 'lenient', got '{}'", s))
}

fn init_logging(debug: bool) {
    let default_filter = if debug {
        "info,generation_client=debug,tailor=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Handle config subcommands
fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("Config file: {}", Config::config_path()?.display());
            println!();
            print!("{}", redacted(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
        }
        ConfigAction::SetModel { model } => {
            update_config(|config| config.model = model.clone())?;
            println!("Default model set to: {}", model);
        }
        ConfigAction::SetApiKey { key } => {
            if key.trim().is_empty() {
                bail!("API key must not be empty");
            }
            update_config(|config| config.api_key = Some(key.trim().to_string()))?;
            println!("API key saved to {}", Config::config_path()?.display());
        }
        ConfigAction::SetBaseUrl { url } => {
            update_config(|config| config.base_url = url.clone())?;
            println!("Base URL set to: {}", url);
        }
        ConfigAction::SetTimeout { secs } => {
            update_config(|config| config.timeout_secs = *secs)?;
            println!("Timeout set to: {}s", secs);
        }
        ConfigAction::SetScorePolicy { policy } => {
            update_config(|config| config.score_policy = *policy)?;
            println!("Score policy set to: {:?}", policy);
        }
    }
    Ok(())
}

fn update_config(change: impl FnOnce(&mut Config)) -> Result<()> {
    let mut config = Config::load()?;
    change(&mut config);
    config.save()?;
    Ok(())
}

/// Config as TOML with the API key hidden
fn redacted(config: &Config) -> Result<String> {
    let mut shown = config.clone();
    if shown.api_key.is_some() {
        shown.api_key = Some("<redacted>".to_string());
    }
    Ok(toml::to_string_pretty(&shown)?)
}

fn build_request(args: &RunArgs, api_key: Option<ApiKey>) -> Result<GenerationRequest> {
    input::check_single_stdin(&[args.resume.as_path(), args.job_description.as_path()])?;

    let resume = input::read_source(&args.resume, "resume")?;
    let job_description = input::read_source(&args.job_description, "job description")?;

    Ok(GenerationRequest::new(
        api_key.unwrap_or_else(|| ApiKey::new("")),
        resume,
        args.job_title.trim(),
        job_description,
    ))
}

async fn copy_resume(clipboard: &dyn Clipboard, result: &GenerationResult) -> Result<()> {
    clipboard
        .copy_text(&result.tailored_resume)
        .await
        .context("Failed to copy tailored resume")
}

fn write_output(path: &Path, result: &GenerationResult) -> Result<()> {
    std::fs::write(path, &result.tailored_resume)
        .with_context(|| format!("Failed to write {}", path.display()))
}

async fn run(args: &RunArgs) -> Result<ExitCode> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if args.lenient_score {
        config.score_policy = ScorePolicy::Lenient;
    }

    let request = build_request(args, config.resolve_api_key(args.api_key.as_deref()))?;
    let client = GenerationClient::from_config(&config)?;

    info!(
        "Using {} (model: {}, score policy: {:?})",
        client.provider_name(),
        config.model,
        config.score_policy
    );

    let result = match client.generate(&request).await {
        Ok(result) => result,
        Err(err) => {
            if let GenerationError::MalformedResponse { detail } = &err {
                debug!("Malformed response: {}", detail);
            }
            eprintln!("{}", render::error_message(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.json {
        println!("{}", render::render_json(&result)?);
    } else {
        print!("{}", render::render_text(&result));
    }

    if let Some(path) = &args.output {
        write_output(path, &result)?;
        info!("Wrote tailored resume to {}", path.display());
    }

    if args.copy {
        let copied = match SystemClipboard::detect() {
            Ok(clipboard) => copy_resume(&clipboard, &result).await,
            Err(e) => Err(e.into()),
        };
        match copied {
            Ok(()) => eprintln!("Tailored resume copied to clipboard!"),
            Err(e) => warn!("{:#}", e),
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.debug);

    match &args.command {
        Commands::Config { action } => {
            handle_config_command(action)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run(run_args) => run(run_args).await,
    }
}
