#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use comment_analyzer::{
    analyzer::{
        AttributeParameters, AttributeScore, Comment, CommentAnalyzer, HttpCommentAnalyzer,
        RequestConfig,
    },
    config::{Config, RequestDefaults},
};
use tracing_subscriber::EnvFilter;

/// Score comments with the Perspective comment analyzer API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// YAML configuration file (CA_* environment variables still take priority)
    #[arg(long, global = true, default_value = "config.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Request attribute scores for a comment
    Analyze(AnalyzeArgs),
    /// Suggest scores for a comment
    SuggestScore(SuggestScoreArgs),
}

#[derive(Debug, Args)]
struct CommentArgs {
    /// Comment text
    #[arg(long)]
    text: String,

    /// Comment text type
    #[arg(long, default_value = "PLAIN_TEXT")]
    text_type: String,

    /// Language code (repeatable); falls back to `defaults.languages`
    #[arg(long = "language")]
    languages: Vec<String>,

    /// Opaque token echoed back by the API
    #[arg(long)]
    client_token: Option<String>,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    comment: CommentArgs,

    /// Attribute to score, e.g. TOXICITY (repeatable)
    #[arg(long = "attribute", required = true)]
    attributes: Vec<String>,

    /// Return per-span scores
    #[arg(long)]
    span_annotations: bool,

    /// Ask the API not to store the comment
    #[arg(long)]
    do_not_store: bool,

    #[arg(long)]
    session_id: Option<String>,
}

#[derive(Debug, Args)]
struct SuggestScoreArgs {
    #[command(flatten)]
    comment: CommentArgs,

    /// Suggested summary score as NAME=VALUE, e.g. TOXICITY=0.9 (repeatable)
    #[arg(long = "attribute", required = true, value_parser = parse_attribute_score)]
    attributes: Vec<(String, f64)>,

    #[arg(long)]
    community_id: Option<String>,
}

fn parse_attribute_score(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let value: f64 = value
        .parse()
        .map_err(|e| format!("invalid score '{value}': {e}"))?;
    Ok((name.to_string(), value))
}

/// Fill the fields shared by both operations.
fn apply_comment(request: &mut RequestConfig, args: &CommentArgs, defaults: &RequestDefaults) {
    request.comment(Comment {
        text: args.text.clone(),
        text_type: Some(args.text_type.clone()),
    });

    if !args.languages.is_empty() {
        request.languages(args.languages.iter().cloned());
    } else if !defaults.languages.is_empty() {
        request.languages(defaults.languages.iter().cloned());
    }

    if let Some(token) = &args.client_token {
        request.client_token(token.clone());
    }
}

fn build_analyze(args: &AnalyzeArgs, defaults: &RequestDefaults) -> RequestConfig {
    let mut request = RequestConfig::new();
    apply_comment(&mut request, &args.comment, defaults);
    request.requested_attributes(
        args.attributes
            .iter()
            .map(|name| (name.clone(), AttributeParameters::default())),
    );
    if args.span_annotations {
        request.span_annotations(true);
    }
    if args.do_not_store || defaults.do_not_store {
        request.do_not_store(true);
    }
    if let Some(session_id) = &args.session_id {
        request.session_id(session_id.clone());
    }
    request
}

fn build_suggest_score(args: &SuggestScoreArgs, defaults: &RequestDefaults) -> RequestConfig {
    let mut request = RequestConfig::new();
    apply_comment(&mut request, &args.comment, defaults);
    request.attribute_scores(
        args.attributes
            .iter()
            .map(|(name, value)| (name.clone(), AttributeScore::summary(*value))),
    );
    if let Some(community_id) = &args.community_id {
        request.community_id(community_id.clone());
    }
    request
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = Config::load_from(&cli.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up logging from config; RUST_LOG wins when present
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid logging.level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        api = ?config.api,
        "comment-analyzer starting up"
    );

    let client = HttpCommentAnalyzer::from_config(&config.api);

    let result = match &cli.command {
        Command::Analyze(args) => {
            let request = build_analyze(args, &config.defaults);
            client.analyze(&request).await?
        }
        Command::SuggestScore(args) => {
            let request = build_suggest_score(args, &config.defaults);
            client.suggest_score(&request).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(result.as_json())?);

    Ok(())
}
