//! # CLI
//!
//! Command definitions and their implementations.
//!
//! Every `cmd_*` function returns the text to print so commands can be
//! tested without capturing stdout.

use crate::analyzer::Analyzer;
use crate::api::{self, AppState};
use crate::config::{
    AnalyzerConfig, DEFAULT_BIND, DEFAULT_BRAVE_URL, DEFAULT_WIKIPEDIA_URL, ServerConfig,
    WebSearchConfig,
};
use crate::error::{AppError, validate_text};
use crate::search::BraveSearchClient;
use clap::{Parser, Subcommand};
use factlens_core::formats::{load_model, save_model};
use factlens_core::report::claims_to_text;
use factlens_core::{Classifier, LookupOutcome, RuleTable, extract_entities};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "factlens")]
#[command(author, version, about = "Fake-news analysis: ML patterns plus fact checks", long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Rule table JSON file (defaults to the built-in rules)
    #[arg(long, global = true, env = "FACTLENS_RULES")]
    pub rules: Option<PathBuf>,

    /// Brave search API key; web search is off without one
    #[arg(long, global = true, env = "BRAVE_API_KEY", hide_env_values = true)]
    pub brave_api_key: Option<String>,

    /// Brave search endpoint
    #[arg(long, global = true, env = "FACTLENS_BRAVE_URL", default_value = DEFAULT_BRAVE_URL)]
    pub brave_url: String,

    /// Wikipedia REST API root
    #[arg(long, global = true, env = "FACTLENS_WIKIPEDIA_URL", default_value = DEFAULT_WIKIPEDIA_URL)]
    pub wikipedia_url: String,

    /// Disable every network collaborator
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a text and fact-check it
    Analyze {
        /// Text to analyze
        text: String,
        /// Classifier model (.json, .flm or .bin)
        #[arg(short, long, env = "FACTLENS_MODEL")]
        model: PathBuf,
        /// Emit JSON
        #[arg(long)]
        json: bool,
        /// Skip the display-only reference lookup
        #[arg(long)]
        no_lookup: bool,
        /// Turn reference hits into claims when no rule fires
        #[arg(long)]
        reference_claims: bool,
    },
    /// Fact-check a text without a classifier
    Check {
        text: String,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        reference_claims: bool,
    },
    /// Show the entities found in a text
    Entities {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// List the active rule table
    Rules {
        /// Print the full table as loadable JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up the encyclopedia summary for a text
    Lookup {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Search the web for evidence about a claim
    Search {
        claim: String,
        #[arg(long)]
        json: bool,
    },
    /// Convert a model file between JSON and binary formats
    ConvertModel { input: PathBuf, output: PathBuf },
    /// Start the HTTP server
    Serve {
        #[arg(short, long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
        /// Classifier model
        #[arg(short, long, env = "FACTLENS_MODEL")]
        model: Option<PathBuf>,
        /// Start without a model; /analyze then answers 503
        #[arg(long)]
        allow_no_model: bool,
        /// Bearer token required on every route but /health
        #[arg(long, env = "FACTLENS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

impl Cli {
    /// Analyzer settings implied by the global flags.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        if self.offline {
            return AnalyzerConfig::offline();
        }
        let web_search = WebSearchConfig::from_api_key(self.brave_api_key.clone(), &self.brave_url);
        AnalyzerConfig::online(&self.wikipedia_url, web_search)
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run a parsed command line and return what should be printed.
pub async fn run(cli: Cli) -> Result<String, AppError> {
    let mut config = cli.analyzer_config();
    let rules = cli.rules.as_deref();

    match cli.command {
        Commands::Analyze {
            text,
            model,
            json,
            no_lookup,
            reference_claims,
        } => {
            config.display_lookup &= !no_lookup;
            config.reference_claims = reference_claims;
            cmd_analyze(&config, rules, &model, &text, json).await
        }
        Commands::Check {
            text,
            json,
            reference_claims,
        } => {
            config.reference_claims = reference_claims;
            cmd_check(&config, rules, &text, json).await
        }
        Commands::Entities { text, json } => cmd_entities(&text, json),
        Commands::Rules { json } => cmd_rules(rules, json),
        Commands::Lookup { text, json } => cmd_lookup(&config, &text, json).await,
        Commands::Search { claim, json } => cmd_search(&config, &claim, json).await,
        Commands::ConvertModel { input, output } => cmd_convert_model(&input, &output),
        Commands::Serve {
            bind,
            model,
            allow_no_model,
            api_key,
        } => {
            let server = ServerConfig { bind, api_key };
            cmd_serve(&config, rules, model.as_deref(), allow_no_model, &server).await
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Rule table from `path`, or the built-in table.
pub fn load_rules(path: Option<&Path>) -> Result<RuleTable, AppError> {
    match path {
        Some(path) => {
            let table = RuleTable::from_json_path(path)?;
            info!(path = %path.display(), rules = table.len(), "loaded rule table");
            Ok(table)
        }
        None => Ok(RuleTable::builtin()),
    }
}

/// Classifier model from disk.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, AppError> {
    let model = load_model(path)?;
    info!(
        path = %path.display(),
        features = model.feature_count(),
        "loaded classifier model"
    );
    Ok(Arc::new(model))
}

// =============================================================================
// COMMANDS
// =============================================================================

pub async fn cmd_analyze(
    config: &AnalyzerConfig,
    rules: Option<&Path>,
    model: &Path,
    text: &str,
    json: bool,
) -> Result<String, AppError> {
    let text = validate_text(text)?;
    let classifier = load_classifier(model)?;
    let analyzer = Analyzer::new(config, load_rules(rules)?, Some(classifier))?;
    let report = analyzer.analyze(text).await?;

    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_text())
    }
}

pub async fn cmd_check(
    config: &AnalyzerConfig,
    rules: Option<&Path>,
    text: &str,
    json: bool,
) -> Result<String, AppError> {
    let text = validate_text(text)?;
    let analyzer = Analyzer::new(config, load_rules(rules)?, None)?;
    let report = analyzer.check(text).await;

    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(claims_to_text(&report.claims))
    }
}

pub fn cmd_entities(text: &str, json: bool) -> Result<String, AppError> {
    let entities = extract_entities(text);
    if json {
        return Ok(serde_json::to_string_pretty(&entities)?);
    }

    let mut output = String::new();
    let join = |items: Vec<String>| {
        if items.is_empty() {
            String::from("(none)")
        } else {
            items.join(", ")
        }
    };
    output.push_str(&format!(
        "candidates: {}\n",
        join(entities.candidates.iter().cloned().collect())
    ));
    output.push_str(&format!(
        "people:     {}\n",
        join(entities.people.iter().cloned().collect())
    ));
    output.push_str(&format!("years:      {}\n", join(entities.years.clone())));
    Ok(output)
}

pub fn cmd_rules(rules: Option<&Path>, json: bool) -> Result<String, AppError> {
    let table = load_rules(rules)?;
    if json {
        return Ok(table.to_json_pretty()?);
    }

    let mut output = format!("{} rules\n", table.len());
    for summary in table.summaries() {
        output.push_str(&format!(
            "  {:<24} [{}] {} ({})\n",
            summary.id, summary.status, summary.claim, summary.source
        ));
    }
    Ok(output)
}

pub async fn cmd_lookup(
    config: &AnalyzerConfig,
    text: &str,
    json: bool,
) -> Result<String, AppError> {
    let text = validate_text(text)?;
    let analyzer = Analyzer::new(config, RuleTable::builtin(), None)?;
    let outcome = analyzer.lookup(text).await;

    if json {
        return Ok(serde_json::to_string_pretty(&outcome)?);
    }
    Ok(match outcome {
        LookupOutcome::Found { reference } => {
            let mut output = format!("{}\n{}\n", reference.title, reference.extract);
            if !reference.url.is_empty() {
                output.push_str(&format!("{}\n", reference.url));
            }
            output
        }
        LookupOutcome::NotFound => String::from("no reference found\n"),
        LookupOutcome::Failed { reason } => format!("lookup failed: {reason}\n"),
    })
}

pub async fn cmd_search(
    config: &AnalyzerConfig,
    claim: &str,
    json: bool,
) -> Result<String, AppError> {
    let claim = validate_text(claim)?;
    let WebSearchConfig::Brave {
        api_key,
        endpoint,
        max_results,
        timeout,
    } = &config.web_search
    else {
        return Err(AppError::InvalidInput(String::from(
            "web search is disabled; set BRAVE_API_KEY",
        )));
    };

    let client = BraveSearchClient::new(api_key.as_str(), endpoint.as_str(), *max_results, *timeout)?;
    let assessment = client.verify_claim(claim).await;

    if json {
        return Ok(serde_json::to_string_pretty(&assessment)?);
    }
    let mut output = format!(
        "[{}] {} [{}% confidence]\n{}\n",
        assessment.status, assessment.claim, assessment.confidence, assessment.explanation
    );
    for source in &assessment.sources {
        output.push_str(&format!(
            "  - {} ({}, trust {})\n",
            source.title, source.url, source.trust_level
        ));
    }
    Ok(output)
}

pub fn cmd_convert_model(input: &Path, output: &Path) -> Result<String, AppError> {
    let model = load_model(input)?;
    save_model(&model, output)?;
    info!(input = %input.display(), output = %output.display(), "converted model");
    Ok(format!(
        "converted {} -> {} ({} features)\n",
        input.display(),
        output.display(),
        model.feature_count()
    ))
}

pub async fn cmd_serve(
    config: &AnalyzerConfig,
    rules: Option<&Path>,
    model: Option<&Path>,
    allow_no_model: bool,
    server: &ServerConfig,
) -> Result<String, AppError> {
    let classifier = model.map(load_classifier).transpose()?;
    if classifier.is_none() {
        if !allow_no_model {
            return Err(AppError::Config(String::from(
                "serve needs --model (or --allow-no-model)",
            )));
        }
        warn!("no classifier model given; /analyze will answer 503");
    }
    let analyzer = Analyzer::new(config, load_rules(rules)?, classifier)?;
    api::serve(AppState::new(analyzer, server.api_key.clone()), server).await?;
    Ok(String::new())
}
