use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::{
    AnalysisController, AnalysisRequest, AnalysisResult, AnalysisService, ApiClient, ClientConfig,
    EmotionStats, HealthStatus,
};
use crate::form::validate_reflection;

/// emotion-reflect - Reflect on how you feel with an emotion analysis service
#[derive(Parser, Debug)]
#[command(name = "emotion-reflect")]
#[command(about = "Send emotional reflections to an emotion analysis service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis service base URL (overrides config and EMOTION_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a reflection
    Analyze(AnalyzeArgs),

    /// Check whether the analysis service is up
    Health(OutputArgs),

    /// Show aggregate analysis statistics
    Stats(OutputArgs),

    /// List the emotions the service can detect
    Emotions(OutputArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Text to analyze; read from stdin when omitted
    pub text: Option<String>,

    /// Use the service's transformer model
    #[arg(long)]
    pub real_model: bool,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Print the raw response as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolve configuration: defaults, then file, then environment, then flags
    pub async fn resolve_config(&self) -> Result<ClientConfig> {
        let path = self.config.clone().or_else(ClientConfig::default_path);

        let mut config = match path {
            Some(path) => ClientConfig::load_from_file(&path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => ClientConfig::default(),
        };

        config.apply_env()?;

        if let Some(ref url) = self.api_url {
            config.base_url = url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Command-line interface handler
pub struct CliHandler {
    client: Arc<ApiClient>,
    controller: AnalysisController,
}

impl CliHandler {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Arc::new(ApiClient::new(config)?);
        let controller = AnalysisController::new(client.clone());
        Ok(Self { client, controller })
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Analyze(args) => self.handle_analyze(args).await,
            Commands::Health(args) => self.handle_health(args).await,
            Commands::Stats(args) => self.handle_stats(args).await,
            Commands::Emotions(args) => self.handle_emotions(args).await,
            Commands::Config => self.handle_config(),
        }
    }

    async fn handle_analyze(&self, args: AnalyzeArgs) -> Result<()> {
        let raw = match args.text {
            Some(text) => text,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read reflection from stdin")?;
                buffer
            }
        };

        let text = validate_reflection(&raw)?;
        let request = AnalysisRequest::new(text).with_real_model(args.real_model);

        match self.controller.analyze(request).await {
            Ok(result) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print!("{}", render_result(&result));
                }
                Ok(())
            }
            // The controller already turned this into a user-facing message
            Err(e) => Err(anyhow!("❌ {}", e.message)),
        }
    }

    async fn handle_health(&self, args: OutputArgs) -> Result<()> {
        let health = self
            .client
            .health_check()
            .await
            .map_err(|e| anyhow!("❌ Health check failed: {}", e))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&health)?);
        } else {
            print!("{}", render_health(&health));
        }
        Ok(())
    }

    async fn handle_stats(&self, args: OutputArgs) -> Result<()> {
        let stats = self
            .client
            .stats()
            .await
            .map_err(|e| anyhow!("❌ Failed to fetch statistics: {}", e))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print!("{}", render_stats(&stats));
        }
        Ok(())
    }

    async fn handle_emotions(&self, args: OutputArgs) -> Result<()> {
        let emotions = self
            .client
            .supported_emotions()
            .await
            .map_err(|e| anyhow!("❌ Failed to fetch supported emotions: {}", e))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&emotions)?);
        } else {
            for emotion in emotions {
                println!("  • {}", emotion);
            }
        }
        Ok(())
    }

    fn handle_config(&self) -> Result<()> {
        print!("{}", self.client.config().to_toml()?);
        Ok(())
    }
}

/// Render an analysis for the terminal
pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Emotion:     {} ({}% confidence, {} intensity)\n",
        result.emotion,
        result.confidence_percent(),
        result.emotion_intensity
    ));

    if !result.secondary_emotions.is_empty() {
        out.push_str(&format!(
            "Also noticed: {}\n",
            result.secondary_emotions.join(", ")
        ));
    }

    if !result.suggestions.is_empty() {
        out.push_str("Suggestions:\n");
        for suggestion in &result.suggestions {
            out.push_str(&format!("  • {}\n", suggestion));
        }
    }

    let analyzed_at = result
        .parsed_timestamp()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S %:z").to_string())
        .unwrap_or_else(|| result.timestamp.clone());
    out.push_str(&format!(
        "Analysis {} at {} in {:.2}s\n",
        result.analysis_id, analyzed_at, result.processing_time_seconds
    ));

    out
}

fn render_health(health: &HealthStatus) -> String {
    let marker = if health.is_healthy() { "✅" } else { "⚠️" };
    let mut out = format!("{} {}", marker, health.status);
    if !health.service.is_empty() {
        out.push_str(&format!(" ({})", health.service));
    }
    out.push('\n');

    let details = [
        ("Message", &health.message),
        ("Version", &health.version),
        ("Uptime", &health.uptime),
        ("Environment", &health.environment),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            out.push_str(&format!("  {}: {}\n", label, value));
        }
    }

    out
}

fn render_stats(stats: &EmotionStats) -> String {
    format!(
        "Total analyses:       {}\nMost common emotion:  {}\nAverage confidence:   {:.0}%\nAverage process time: {:.3}s\n",
        stats.total_analyses,
        stats.most_common_emotion,
        stats.average_confidence * 100.0,
        stats.processing_time_avg
    )
}
