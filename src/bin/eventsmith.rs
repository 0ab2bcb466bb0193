//! eventsmith — generate event titles and descriptions from the terminal.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use eventsmith::advice::{self, CATEGORIES, EVENT_TYPES, TONES};
use eventsmith::{
    AnalyticsReport, Config, CostMode, DescriptionRequest, Eventsmith, GenerationEngine, Secrets,
    TitleRequest, fuzzy_correct,
};

/// Eventsmith CLI
#[derive(Parser)]
#[command(name = "eventsmith")]
#[command(version)]
#[command(about = "Cost-aware event title and description generator")]
struct Args {
    /// Config file (default: ~/.eventsmith/config.toml)
    #[arg(short, long, env = "EVENTSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Print results and diagnostics as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs)]
struct EventArgs {
    /// Event category (fuzzy-matched, e.g. "Tecnology" → "Technology")
    #[arg(long)]
    category: String,
    /// Event type (fuzzy-matched)
    #[arg(long = "type")]
    event_type: String,
    /// Tone (fuzzy-matched; default: suggested for category and type)
    #[arg(long)]
    tone: Option<String>,
    /// Extra context to weave into the copy
    #[arg(long)]
    context: Option<String>,
    /// Cost mode: economy, balanced or premium
    #[arg(short, long, default_value = "balanced")]
    mode: CostMode,
}

impl EventArgs {
    /// Inputs corrected against the known vocabularies.
    fn corrected(&self) -> (String, String, String) {
        let category = fuzzy_correct(self.category.trim(), &CATEGORIES);
        let event_type = fuzzy_correct(self.event_type.trim(), &EVENT_TYPES);
        let tone = match &self.tone {
            Some(tone) => fuzzy_correct(tone.trim(), &TONES),
            None => advice::suggest_settings(&category, &event_type)
                .tone
                .to_string(),
        };
        (category, event_type, tone)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate event titles
    Titles {
        #[command(flatten)]
        event: EventArgs,
        /// Number of titles (1-5)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Generate an event description
    Description {
        /// Event title
        title: String,
        #[command(flatten)]
        event: EventArgs,
        /// Character budget (100-5000)
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Fuzzy-correct a category, event type or tone
    Correct {
        /// Input to correct
        input: String,
        /// Vocabulary to match against
        #[arg(long, value_enum, default_value = "category")]
        vocab: Vocab,
    },

    /// Show suggested settings and a titling tip
    Suggest {
        #[arg(long)]
        category: String,
        #[arg(long = "type")]
        event_type: String,
        #[arg(long)]
        tone: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Vocab {
    Category,
    Type,
    Tone,
}

fn build_engine(config_path: Option<&std::path::Path>) -> eventsmith::Result<GenerationEngine> {
    let config = Config::load(config_path)?;
    let secrets = Secrets::load()?;
    Eventsmith::builder().from_config(&config, &secrets).build()
}

fn print_report(report: &AnalyticsReport) {
    let m = &report.metrics;
    eprintln!(
        "session: {} requests, {:.1}% cache hits, ${:.4} spent, {:.2}s avg, {:.1}% errors",
        m.total_requests,
        report.cache_hit_rate * 100.0,
        m.total_cost,
        m.avg_response_time,
        m.error_rate * 100.0,
    );
    eprintln!(
        "efficiency {:.1}%, est. savings ${:.4}",
        report.efficiency_score, report.cost_savings
    );
    for rec in &report.recommendations {
        eprintln!("  - {rec}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Correct { input, vocab } => {
            let corrected = match vocab {
                Vocab::Category => fuzzy_correct(&input, &CATEGORIES),
                Vocab::Type => fuzzy_correct(&input, &EVENT_TYPES),
                Vocab::Tone => fuzzy_correct(&input, &TONES),
            };
            println!("{corrected}");
        }

        Command::Suggest {
            category,
            event_type,
            tone,
        } => {
            let category = fuzzy_correct(category.trim(), &CATEGORIES);
            let event_type = fuzzy_correct(event_type.trim(), &EVENT_TYPES);
            let settings = advice::suggest_settings(&category, &event_type);
            let tone = tone
                .map(|t| fuzzy_correct(t.trim(), &TONES))
                .unwrap_or_else(|| settings.tone.to_string());
            let tip = advice::optimization_tip(&category, &event_type, &tone);
            if args.json {
                let out = serde_json::json!({
                    "category": category,
                    "event_type": event_type,
                    "settings": settings,
                    "tip": tip,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{category} / {event_type}");
                println!("  tone:        {}", settings.tone);
                println!("  titles:      {}", settings.title_count);
                println!("  description: {} chars", settings.description_chars);
                println!("  tip:         {tip}");
            }
        }

        Command::Titles { event, count } => {
            let engine = build_engine(args.config.as_deref())?;
            let (category, event_type, tone) = event.corrected();
            let count = count
                .unwrap_or_else(|| advice::suggest_settings(&category, &event_type).title_count);
            let mut request = TitleRequest::new(category, event_type, tone)
                .count(count)
                .cost_mode(event.mode);
            if let Some(ctx) = event.context {
                request = request.context(ctx);
            }

            let result = engine.generate_titles(&request).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for err in &result.diagnostics.errors {
                    eprintln!("error: {err}");
                }
                for (i, title) in result.titles.iter().enumerate() {
                    println!("{}. {title}", i + 1);
                }
                for warning in &result.diagnostics.warnings {
                    eprintln!("warning: {warning}");
                }
                eprintln!(
                    "{} tokens, ${:.5} (incurred ${:.5}), {:.2}s{}",
                    result.diagnostics.total_tokens,
                    result.diagnostics.estimated_cost,
                    result.diagnostics.incremental_cost,
                    result.diagnostics.elapsed_secs,
                    if result.diagnostics.cache_hit {
                        ", cached"
                    } else {
                        ""
                    },
                );
                print_report(&engine.global_analytics());
            }
            if result.is_rejected() {
                std::process::exit(2);
            }
        }

        Command::Description {
            title,
            event,
            max_chars,
        } => {
            let engine = build_engine(args.config.as_deref())?;
            let (category, event_type, tone) = event.corrected();
            let max_chars = max_chars.unwrap_or_else(|| {
                advice::suggest_settings(&category, &event_type).description_chars
            });
            let mut request = DescriptionRequest::new(title, category, event_type, tone)
                .max_chars(max_chars)
                .cost_mode(event.mode);
            if let Some(ctx) = event.context {
                request = request.context(ctx);
            }

            let result = engine.generate_description(&request).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for err in &result.diagnostics.errors {
                    eprintln!("error: {err}");
                }
                if !result.description.is_empty() {
                    println!("{}", result.description);
                }
                for warning in &result.diagnostics.warnings {
                    eprintln!("warning: {warning}");
                }
                eprintln!(
                    "{} chars ({:.1}% of {}), {} tokens, ${:.5}, {:.2}s",
                    result.description.chars().count(),
                    result.diagnostics.target_utilization,
                    result.diagnostics.max_chars,
                    result.diagnostics.total_tokens,
                    result.diagnostics.estimated_cost,
                    result.diagnostics.elapsed_secs,
                );
                print_report(&engine.global_analytics());
            }
            if result.is_failed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
