use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use std::env;
use std::io::stdout;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twitter_sim::scenario::Scenario;
use twitter_sim::ui::TimelineWriter;
use twitter_sim::user_config::{UserConfig, CONFIG_ENV_VAR};
use twitter_sim::Twitter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON scenario to replay; the built-in Alice and Bob demo runs when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Timeline ranking: popularity or recency
    #[arg(short, long)]
    mode: Option<String>,

    /// JSON config file (falls back to $TWITTER_SIM_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Timeline width in columns (defaults to the config value)
    #[arg(short, long)]
    width: Option<usize>,

    /// Print the timeline without colour escape codes
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    dotenv().ok();

    // NB: logs go to stderr so stdout carries only the timeline
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config_path = args
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    let user_config = UserConfig::load_or_default(config_path.as_deref())?;

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::demo(),
    };

    let twitter = Twitter::new();
    let summary = scenario.replay(&twitter);
    info!(
        num_tweets = twitter.tweets().len(),
        num_users = twitter.users().len(),
        num_failures = summary.failures.len(),
        "scenario replayed"
    );

    let display_width = args.width.unwrap_or(user_config.display_width);
    let color = user_config.color && !args.no_color;
    let mut writer = TimelineWriter::new(stdout().lock(), display_width, color);

    match &args.mode {
        Some(mode) => twitter.load_timeline_named(mode, &mut writer)?,
        None => twitter.load_timeline(user_config.default_mode, &mut writer)?,
    };

    Ok(())
}
