use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{
    get_styles, print_empty_list, print_error, print_key_value, print_success, TableBuilder,
};
use plant_catalog_server::plant_store::{LookupKind, SqlitePlantStore};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Maintenance commands for a plant catalog database.
#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to the SQLite plant database file.
    #[clap(value_parser = parse_path)]
    pub db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows every plant, ordered by id.
    List,

    /// Deletes every plant, lookup tables are left untouched.
    Truncate {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Creates or upgrades the database schema, then shows its version.
    Migrate,

    /// Shows the entries of a lookup table (names, families or locations).
    Lookups { kind: String },
}

fn list_plants(store: &SqlitePlantStore) -> Result<()> {
    let plants = store.get_all_plants()?;
    if plants.is_empty() {
        print_empty_list("No plants");
        return Ok(());
    }

    let mut table = TableBuilder::new(vec![
        "id",
        "botanical name",
        "name",
        "family",
        "location",
        "image",
        "date",
    ]);
    for plant in &plants {
        table.add_row(vec![
            plant.plant_id.to_string(),
            plant.botanical_name.clone(),
            plant.plant_name_id.to_string(),
            plant.family_id.to_string(),
            plant.location_id.to_string(),
            plant.image_path.clone(),
            plant.plant_date.to_string(),
        ]);
    }
    table.print();
    print_key_value("Total", &plants.len().to_string());
    Ok(())
}

fn list_lookups(store: &SqlitePlantStore, kind: &str) -> Result<()> {
    let kind: LookupKind = kind.parse()?;
    let entries = store.list_lookups(kind)?;
    if entries.is_empty() {
        print_empty_list(&format!("No {}", kind.collection_name()));
        return Ok(());
    }

    let mut table = TableBuilder::new(vec!["id", "english", "japanese"]);
    for entry in entries {
        table.add_row(vec![entry.id.to_string(), entry.name_en, entry.name_ja]);
    }
    table.print();
    Ok(())
}

fn run(cli_args: CliArgs) -> Result<()> {
    if cli_args.db_path.is_dir() {
        bail!("{:?} is a directory", cli_args.db_path);
    }
    let store = SqlitePlantStore::new(&cli_args.db_path)
        .with_context(|| format!("Could not open plant database {:?}", cli_args.db_path))?;

    match cli_args.command {
        Command::List => list_plants(&store)?,
        Command::Truncate { yes } => {
            if !yes {
                bail!("Refusing to delete every plant without --yes");
            }
            let deleted = store.truncate_plants()?;
            print_success(&format!("Deleted {} plants", deleted));
        }
        Command::Migrate => {
            print_success("Schema is up to date");
            print_key_value("Database", &cli_args.db_path.display().to_string());
            print_key_value("Schema version", &store.schema_version()?.to_string());
        }
        Command::Lookups { kind } => list_lookups(&store, &kind)?,
    }

    store.close()
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    if let Err(err) = run(CliArgs::parse()) {
        print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
