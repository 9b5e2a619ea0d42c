//! forward-sim - Main Binary
//!
//! Runs Monte Carlo batches of FORWARD and prints the balance report.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use forward_sim::{
    batch::{DEFAULT_CAMPAIGN_RUNS, DEFAULT_SINGLE_RUNS},
    run_batch, BatchStats, Deck, GameRng, Mode, Placement, Report, RulesProfile, SimConfig, Summary,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forward-sim")]
#[command(about = "FORWARD balance simulator - Monte Carlo playtests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Location 1 playtest with three-card lineups and peeking
    Single {
        /// Number of trials
        #[arg(long, default_value_t = DEFAULT_SINGLE_RUNS)]
        runs: u64,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Full nine-location campaign
    Campaign {
        /// Number of trials
        #[arg(long, default_value_t = DEFAULT_CAMPAIGN_RUNS)]
        runs: u64,

        /// Never spend Lux on healing between cards
        #[arg(long)]
        no_auto_heal: bool,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Print one shuffled campaign deck for a stage
    Deck {
        /// Stage number (1-9)
        #[arg(long, default_value_t = 1)]
        stage: u8,

        /// Shuffle seed (default: random)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct BatchArgs {
    /// Batch seed (default: random, printed to stderr)
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials on one thread
    #[arg(long)]
    sequential: bool,

    /// Print a JSON summary instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Single { runs, batch } => {
            let profile = RulesProfile::single_stage();
            run_and_report(profile, runs, &batch)
        }
        Commands::Campaign {
            runs,
            no_auto_heal,
            batch,
        } => {
            let profile = RulesProfile::campaign().with_auto_heal(!no_auto_heal);
            run_and_report(profile, runs, &batch)
        }
        Commands::Deck { stage, seed } => print_deck(stage, seed),
    }
}

fn run_and_report(profile: RulesProfile, runs: u64, args: &BatchArgs) -> Result<()> {
    let seed = resolve_seed(args.seed);
    let mode = profile.mode;
    let config = SimConfig::for_mode(mode)
        .with_runs(runs)
        .with_seed(seed)
        .with_parallel(!args.sequential)
        .with_profile(profile);

    let stats = run_batch(&config).with_context(|| format!("{mode} batch of {runs} runs failed"))?;
    print_stats(&stats, args.json)
}

fn print_stats(stats: &BatchStats, json: bool) -> Result<()> {
    if json {
        let summary = Summary::from_stats(stats);
        let text = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{text}");
    } else {
        print!("{}", Report::new(stats));
    }
    Ok(())
}

fn print_deck(stage: u8, seed: Option<u64>) -> Result<()> {
    let profile = RulesProfile::for_mode(Mode::Campaign);
    let table = profile
        .checked_tier_table(stage)
        .with_context(|| format!("cannot build a deck for stage {stage}"))?;

    let mut rng = GameRng::new(resolve_seed(seed));
    let deck = Deck::build(stage, &table, Placement::BossInLastThree, &mut rng);

    println!("Location {stage} (tier {}), {} cards:", table.tier, deck.len());
    for (i, card) in deck.iter().enumerate() {
        println!("{:>3}. {card}", i + 1);
    }
    Ok(())
}

/// Use the given seed or draw a fresh one, reporting it so the run can be
/// repeated.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        eprintln!("Using seed: {seed}");
        seed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(7)), 7);
    }

    #[test]
    fn test_missing_seed_is_drawn_fresh() {
        assert_ne!(resolve_seed(None), resolve_seed(None));
    }
}
