use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use giftwise::config::{Config, API_KEY_ENV};
use giftwise::recipient::{Recipient, OCCASIONS, RELATIONSHIPS};
use giftwise::render;
use giftwise::suggest::llm::GeminiClient;
use giftwise::suggest::{static_catalog, GiftSuggestion, SuggestionEngine, SuggestionOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "giftwise",
    about = "Gift ideas for the people in your life",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe the recipient and get gift ideas
    Suggest(SuggestArgs),
    /// Show or update saved settings
    Config(ConfigArgs),
    /// List the suggested occasions and relationships
    Presets,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    /// Recipient's name
    #[arg(long)]
    name: String,

    #[arg(long, default_value_t = 0)]
    age: u32,

    /// e.g. Birthday, Anniversary (see `giftwise presets`); free text is fine
    #[arg(short, long, default_value = "")]
    occasion: String,

    /// e.g. Friend, Family (see `giftwise presets`); free text is fine
    #[arg(short, long, default_value = "")]
    relationship: String,

    /// An interest or hobby (repeat for more)
    #[arg(short, long = "interest")]
    interests: Vec<String>,

    /// Budget in dollars
    #[arg(short, long, default_value_t = 0.0)]
    budget: f64,

    /// Use the built-in catalog instead of the AI service
    #[arg(long)]
    offline: bool,

    /// Print suggestions as JSON
    #[arg(long)]
    json: bool,
}

impl SuggestArgs {
    fn recipient(&self) -> Recipient {
        Recipient::new(self.name.trim())
            .with_age(self.age)
            .with_occasion(self.occasion.trim())
            .with_relationship(self.relationship.trim())
            .with_interests(&self.interests)
            .with_budget(self.budget)
    }
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Gemini model id or alias (flash, flash-lite, pro)
    #[arg(long)]
    model: Option<String>,

    /// Number of ideas to request
    #[arg(long)]
    ideas: Option<usize>,

    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GIFTWISE_LOG", "warn"))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Suggest(args) => suggest(args).await,
        Command::Config(args) => configure(args),
        Command::Presets => {
            println!("Occasions:     {}", OCCASIONS.join(", "));
            println!("Relationships: {}", RELATIONSHIPS.join(", "));
            Ok(())
        }
    }
}

async fn suggest(args: SuggestArgs) -> Result<()> {
    let recipient = args.recipient();

    let suggestions = if args.offline {
        static_catalog::suggestions_for_budget(recipient.budget)
    } else {
        match generate(&recipient).await? {
            Some(suggestions) => suggestions,
            None => return Ok(()),
        }
    };

    if args.json {
        println!("{}", render::render_json(&suggestions)?);
    } else if suggestions.is_empty() {
        eprintln!("No gift ideas to show.");
    } else {
        print!("{}", render::render_cards(&suggestions));
    }
    Ok(())
}

/// Run the AI pipeline; `None` when the user cancelled with Ctrl-C.
async fn generate(recipient: &Recipient) -> Result<Option<Vec<GiftSuggestion>>> {
    let config = Config::load();
    let api_key = Config::api_key();
    if api_key.is_none() {
        eprintln!("  Warning: {} is not set; AI suggestions will fail.", API_KEY_ENV);
        eprintln!("  Tip: Use --offline for the built-in catalog.");
    }

    let client = GeminiClient::new(config.client_settings(api_key))?;
    let engine = SuggestionEngine::new(client).with_idea_count(config.idea_count);

    eprintln!("Generating gift ideas with {}...", engine.service().model());
    let outcome = tokio::select! {
        outcome = engine.run(recipient) => outcome,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Cancelled.");
            return Ok(None);
        }
    };

    match &outcome {
        SuggestionOutcome::Skipped { missing } => {
            eprintln!("Please fill in: {}.", missing.join(", "));
        }
        SuggestionOutcome::Fallback { error, .. } => {
            eprintln!("  Warning: {}", error);
        }
        SuggestionOutcome::Generated(_) => {}
    }
    Ok(Some(outcome.into_suggestions()))
}

fn configure(args: ConfigArgs) -> Result<()> {
    let mut config = Config::load();
    let changed =
        args.model.is_some() || args.ideas.is_some() || args.api_base.is_some() || args.timeout.is_some();

    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(ideas) = args.ideas {
        config.idea_count = ideas.max(1);
    }
    if let Some(api_base) = args.api_base {
        config.api_base = api_base;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }

    if changed {
        let path = config.save()?;
        eprintln!("  + Saved settings to {}", path.display());
    }

    println!("Config file: {}", Config::config_location());
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!(
        "API key:     {}",
        if Config::api_key().is_some() {
            format!("set via {}", API_KEY_ENV)
        } else {
            format!("missing (set {})", API_KEY_ENV)
        }
    );
    Ok(())
}
