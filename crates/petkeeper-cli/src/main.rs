use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use uuid::Uuid;

use petkeeper_core::engine::DEFAULT_LIST_LIMIT;
use petkeeper_core::models::MAX_NAME_LEN;
use petkeeper_core::progression::level_threshold;
use petkeeper_core::{Action, Database, EngineConfig, Pet, PetEngine, Species, StatsUpdate, SystemClock};

#[derive(Parser)]
#[command(name = "petkeeper", version, about = "Group virtual pet keeper")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, default_value = "petkeeper.db")]
    db: String,

    /// Optional TOML file overriding decay rates and action effects
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print pets as JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Adopt a pet for a group
    Create {
        /// Group ID (UUID)
        group: Uuid,
        /// Pet name
        name: String,
        /// Species: dog, cat, dragon, duck
        species: Species,
    },
    /// Show a group's pet with decay applied
    Show {
        /// Group ID (UUID)
        group: Uuid,
    },
    /// Feed a group's pet
    Feed {
        /// Group ID (UUID)
        group: Uuid,
    },
    /// Clean a group's pet
    Clean {
        /// Group ID (UUID)
        group: Uuid,
    },
    /// Play with a group's pet
    Play {
        /// Group ID (UUID)
        group: Uuid,
    },
    /// Rename a group's pet
    Rename {
        /// Group ID (UUID)
        group: Uuid,
        /// New name
        name: String,
    },
    /// Directly set vitals (values are clamped to 0-100)
    SetStats {
        /// Group ID (UUID)
        group: Uuid,
        #[arg(long, allow_negative_numbers = true)]
        hunger: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        hygiene: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        health: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        happiness: Option<i64>,
    },
    /// List stored pets
    List {
        /// Skip this many pets
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Max results
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,
    },
    /// Show the available species and the current tuning
    Info,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> petkeeper_core::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load(p),
        None => Ok(EngineConfig::default()),
    }
}

fn open_engine(cli: &Cli) -> petkeeper_core::Result<PetEngine<Database, SystemClock>> {
    let config = load_config(cli.config.as_ref())?;
    log::debug!("Opening {} with {:?}", cli.db, config);
    let db = Database::open(&cli.db)?;
    Ok(PetEngine::with_clock(db, SystemClock, config))
}

fn run(cli: Cli) -> petkeeper_core::Result<()> {
    if let Commands::Info = cli.command {
        return cmd_info(cli.config.as_ref());
    }

    let engine = open_engine(&cli)?;
    let xp_per_level = engine.config().xp_per_level;
    let json = cli.json;
    let emit = |pet: Pet| print_pets(&[pet], xp_per_level, json);
    match cli.command {
        Commands::Create { group, name, species } => {
            emit(engine.create(group, &name, species)?)
        }
        Commands::Show { group } => emit(engine.get(group)?),
        Commands::Feed { group } => cmd_action(&engine, group, Action::Feed, json),
        Commands::Clean { group } => cmd_action(&engine, group, Action::Clean, json),
        Commands::Play { group } => cmd_action(&engine, group, Action::Play, json),
        Commands::Rename { group, name } => emit(engine.rename(group, &name)?),
        Commands::SetStats { group, hunger, hygiene, health, happiness } => {
            let update = StatsUpdate { hunger, hygiene, health, happiness };
            if update.is_empty() {
                println!("Nothing to set. Pass at least one of --hunger, --hygiene, --health, --happiness.");
                return Ok(());
            }
            emit(engine.set_stats(group, &update)?)
        }
        Commands::List { offset, limit } => cmd_list(&engine, offset, limit, json),
        Commands::Info => Ok(()),
    }
}

fn cmd_action(
    engine: &PetEngine<Database, SystemClock>,
    group: Uuid,
    action: Action,
    json: bool,
) -> petkeeper_core::Result<()> {
    let outcome = engine.perform_action(group, action)?;
    let pet = outcome.pet;
    if !json && outcome.levels_gained > 0 {
        println!("{} reached level {}!", pet.name, pet.level);
    }
    print_pets(&[pet], engine.config().xp_per_level, json)
}

fn cmd_list(
    engine: &PetEngine<Database, SystemClock>,
    offset: usize,
    limit: usize,
    json: bool,
) -> petkeeper_core::Result<()> {
    let pets = engine.list(offset, limit)?;
    if pets.is_empty() && !json {
        println!("No pets found. Run 'petkeeper create <group> <name> <species>' first.");
        return Ok(());
    }
    print_pets(&pets, engine.config().xp_per_level, json)?;
    if !json {
        let total = engine.repository().pet_count()?;
        println!("Showing {} of {} pet(s)", pets.len(), total);
    }
    Ok(())
}

fn cmd_info(config_path: Option<&PathBuf>) -> petkeeper_core::Result<()> {
    let config = load_config(config_path)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Species"]);
    for s in Species::ALL {
        table.add_row(vec![s.as_str()]);
    }
    println!("{table}");

    println!();
    println!("--- Decay (per hour) ---");
    println!("Hunger:         {}", config.decay.hunger_per_hour);
    println!("Hygiene:        {}", config.decay.hygiene_per_hour);
    println!("Health:         {}", config.decay.health_per_hour);
    println!("Grace window:   {} min", config.decay.grace_minutes);
    println!();
    println!("--- Actions ---");
    println!("Feed:           +{} hunger", config.actions.feed_hunger);
    println!("Clean:          +{} hygiene", config.actions.clean_hygiene);
    println!(
        "Play:           +{} happiness, +{} health",
        config.actions.play_happiness, config.actions.play_health
    );
    println!("XP per action:  {}", config.actions.xp_per_action);
    println!("XP per level:   level x {}", config.xp_per_level);
    println!("Max name:       {} characters", MAX_NAME_LEN);
    Ok(())
}

fn print_pets(pets: &[Pet], xp_per_level: u32, json: bool) -> petkeeper_core::Result<()> {
    if json {
        let out = if pets.len() == 1 {
            serde_json::to_string_pretty(&pets[0])?
        } else {
            serde_json::to_string_pretty(pets)?
        };
        println!("{}", out);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Group", "Name", "Species", "Level", "XP", "Hunger", "Hygiene", "Health", "Happiness",
            "Updated",
        ]);

    for p in pets {
        table.add_row(vec![
            p.group_id.to_string(),
            p.name.clone(),
            p.species.to_string(),
            p.level.to_string(),
            format!("{}/{}", p.xp, level_threshold(p.level, xp_per_level)),
            p.hunger.to_string(),
            p.hygiene.to_string(),
            p.health.to_string(),
            p.happiness.to_string(),
            p.last_updated.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
