use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use chat_chronicler::summarize::{self, ChronicleOptions, Chronicler, TopicOptions};
use chat_chronicler::{
    load_export, parse_message_link, ChatHistory, Config, MessageStore, OpenAiModel, SummaryCache,
};

/// Chronicler - turns chat exports into histories
#[derive(Parser)]
#[command(name = "chronicler", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the whole export into a chronicle
    Chronicle {
        /// Path to the exported result.json
        export: PathBuf,

        /// Messages per chunk (overrides config)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Chunk summaries per condensation group (overrides config)
        #[arg(long)]
        group_size: Option<usize>,
    },
    /// Summarize everything said about the given topics
    Topic {
        /// Path to the exported result.json
        export: PathBuf,

        /// Topics to search for, verbatim and case-sensitive
        #[arg(required = true)]
        topics: Vec<String>,

        /// Conversation window around relevant messages, in minutes
        #[arg(long)]
        window_minutes: Option<i64>,
    },
    /// Summarize the discussion between two linked messages
    Discussion {
        /// Path to the exported result.json
        export: PathBuf,

        /// Link to the first message of the discussion (prompted for if omitted)
        #[arg(short, long)]
        start: Option<String>,

        /// Link to the last message; omit to run to the end of the export
        #[arg(short, long)]
        end: Option<String>,

        /// Instructions for the model
        #[arg(short, long)]
        instructions: Option<String>,
    },
    /// Interactive first-run setup
    Setup,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,chat_chronicler=info",
        1 => "info,chat_chronicler=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Chronicle {
            export,
            chunk_size,
            group_size,
        } => chronicle(&export, chunk_size, group_size).await,
        Command::Topic {
            export,
            topics,
            window_minutes,
        } => topic(&export, &topics, window_minutes).await,
        Command::Discussion {
            export,
            start,
            end,
            instructions,
        } => discussion(&export, start.as_deref(), end.as_deref(), instructions.as_deref()).await,
        Command::Setup => chat_chronicler::setup::run_setup(),
    }
}

/// Summarize the whole export into a chronicle
async fn chronicle(
    export: &Path,
    chunk_size: Option<usize>,
    group_size: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(size) = chunk_size {
        config.chunk_size = size;
    }
    if let Some(size) = group_size {
        config.group_size = size;
    }
    if config.chunk_size == 0 || config.group_size == 0 {
        anyhow::bail!("chunk and group sizes must be at least 1");
    }

    let history = load_export(export)?;
    let community = community_name(&config, &history);
    let store = MessageStore::from_history(history);

    let chunk_model = build_model(&config, &config.models.chunk)?;
    let group_model = build_model(&config, &config.models.group)?;
    let final_model = build_model(&config, &config.models.final_pass)?;

    let cache = SummaryCache::new(config.cache_dir())?;
    let chronicler = Chronicler::new(
        cache,
        ChronicleOptions {
            community,
            chunk_size: config.chunk_size,
            group_size: config.group_size,
            summary_dir: config.summaries_dir(),
        },
    );

    let summary = chronicler
        .run(&store, &chunk_model, &group_model, &final_model)
        .await?;

    println!("\n{summary}");
    println!(
        "\nFinal summary written to {}",
        config.summaries_dir().join("final_summary.txt").display()
    );
    Ok(())
}

/// Summarize everything said about the given topics
async fn topic(
    export: &Path,
    topics: &[String],
    window_minutes: Option<i64>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(minutes) = window_minutes {
        if minutes < 0 {
            anyhow::bail!("the window must not be negative");
        }
        config.window = TimeDelta::minutes(minutes);
    }

    let history = load_export(export)?;
    let community = community_name(&config, &history);
    let store = MessageStore::from_history(history);
    let model = build_model(&config, &config.models.topic)?;

    let options = TopicOptions {
        community,
        window: config.window,
        output_dir: config.topics_dir(),
    };

    match summarize::summarize_topics(&store, topics, &model, &options).await? {
        Some(report) => {
            println!("{}", report.summary);
            println!(
                "\nSummary of {} messages written to {}",
                report.message_count,
                report.path.display()
            );
        }
        None => println!("No messages mention the given topics; nothing to summarize."),
    }
    Ok(())
}

/// Summarize the discussion between two linked messages
async fn discussion(
    export: &Path,
    start: Option<&str>,
    end: Option<&str>,
    instructions: Option<&str>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let start = match start {
        Some(link) => parse_message_link(link)?,
        None => {
            let link: String = Input::new()
                .with_prompt("Link to the first message (https://t.me/...)")
                .interact_text()?;
            parse_message_link(&link)?
        }
    };
    let end = end.map(parse_message_link).transpose()?;

    let history = load_export(export)?;
    let store = MessageStore::from_history(history);
    let model = build_model(&config, &config.models.topic)?;

    let instructions = instructions.unwrap_or(summarize::DEFAULT_INSTRUCTIONS);
    match summarize::summarize_discussion(&store, &start, end.as_ref(), instructions, &model)
        .await?
    {
        Some(summary) => {
            println!("\n======= Summary =======\n");
            println!("{summary}");
        }
        None => println!("No messages found in the linked range."),
    }
    Ok(())
}

fn community_name(config: &Config, history: &ChatHistory) -> String {
    config
        .community
        .clone()
        .unwrap_or_else(|| history.name.clone())
}

fn build_model(config: &Config, name: &str) -> chat_chronicler::Result<OpenAiModel> {
    OpenAiModel::new(&config.base_url, &config.api_key, name, config.temperature)
}
