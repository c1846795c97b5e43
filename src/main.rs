//! battle-station: run and inspect 1v1 battles from the command line.

use clap::{Parser, Subcommand};
use pkmn_battle_station::{
    config, BattleConfig, BattleResult, BattleRunner, Combatant, Dataset, InMemoryStore,
    PokemonType, StatType,
};
use schema::effectiveness_label;
use std::path::PathBuf;
use std::process::ExitCode;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "battle-station")]
#[command(about = "Simulate 1v1 Pokemon battles from a stat dataset")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fight two Pokemon and print the transcript
    Battle {
        first: String,
        second: String,

        /// Dataset file (RON, or a `.bin` snapshot)
        #[arg(long)]
        data: PathBuf,

        /// Battle config file (RON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Random seed for reproducible battles
        #[arg(long)]
        seed: Option<u64>,

        /// Rounds before the battle is called a draw
        #[arg(long)]
        max_turns: Option<u32>,

        /// Print the full report as JSON instead of the transcript
        #[arg(long)]
        json: bool,
    },
    /// Show the derived battle stats of one Pokemon
    Show {
        name: String,

        #[arg(long)]
        data: PathBuf,
    },
    /// List every species in a dataset
    List {
        #[arg(long)]
        data: PathBuf,
    },
    /// Convert a dataset between RON and the binary snapshot format
    Snapshot {
        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> BattleResult<()> {
    match command {
        Command::Battle {
            first,
            second,
            data,
            config,
            seed,
            max_turns,
            json,
        } => {
            let store = InMemoryStore::load(&data)?;
            let mut battle_config = match config {
                Some(path) => BattleConfig::load(path)?,
                None => BattleConfig::default(),
            };
            if let Some(seed) = seed {
                battle_config = battle_config.with_seed(seed);
            }
            if let Some(max_turns) = max_turns {
                battle_config = battle_config.with_max_turns(max_turns);
            }

            let report = BattleRunner::new(&store, battle_config).run(&first, &second)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{}", line);
                }
            }
        }
        Command::Show { name, data } => {
            let store = InMemoryStore::load(&data)?;
            let pokemon = Combatant::from_store(&name, &store)?;
            print_details(&pokemon);
        }
        Command::List { data } => {
            let store = InMemoryStore::load(&data)?;
            for name in store.species_names() {
                println!("{}", name);
            }
            println!("{} species", store.species_count());
        }
        Command::Snapshot { data, out } => {
            let dataset = Dataset::load(&data)?;
            dataset.save(&out)?;
            tracing::info!(
                species = dataset.species.len(),
                moves = dataset.moves.len(),
                out = %out.display(),
                "dataset written"
            );
        }
    }
    Ok(())
}

fn print_details(pokemon: &Combatant) {
    println!("#{:03} {}", pokemon.species_id, pokemon);
    if !pokemon.ability.is_empty() {
        println!("  Ability: {}", pokemon.ability);
    }
    if !pokemon.item.is_empty() {
        println!("  Item: {}", pokemon.item);
    }
    println!("  Nature: {}", pokemon.nature);

    let base_total: u32 = pokemon.base_stats.to_array().iter().map(|&s| s as u32).sum();
    println!("  Base stat total: {}", base_total);
    for stat in StatType::ALL {
        println!("  {:<16} {:>3}", stat.to_string(), pokemon.stat(stat));
    }

    let defending = pokemon.types();
    for attacking in PokemonType::iter() {
        let multiplier = PokemonType::effectiveness_against(attacking, &defending);
        if multiplier != 1.0 {
            println!("  vs {:<9} {}", attacking.to_string(), effectiveness_label(multiplier));
        }
    }

    if pokemon.moves.is_empty() {
        println!("  No moves");
    }
    for move_ in &pokemon.moves {
        println!("  - {}", move_);
    }
}
