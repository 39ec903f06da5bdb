use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use sheet_core::core_api::{CoreError, Engine};
use sheet_core::patches::PatchTable;
use sheet_render::{
    FieldSelection, JsonStyle, render_field_pairs, render_json_full, render_json_selected,
    render_text_sheet,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Character JSON as returned by the character service, or `-` for stdin.
    #[arg(value_name = "CHARACTER.json")]
    path: PathBuf,
    #[arg(long)]
    name: bool,
    #[arg(long)]
    race: bool,
    #[arg(long)]
    level: bool,
    #[arg(long)]
    classes: bool,
    #[arg(long)]
    hp: bool,
    #[arg(long = "max-hp")]
    max_hp: bool,
    #[arg(long = "temp-hp")]
    temp_hp: bool,
    #[arg(long)]
    ac: bool,
    #[arg(long)]
    stats: bool,
    #[arg(long)]
    senses: bool,
    #[arg(long)]
    avatar: bool,
    #[arg(long)]
    json: bool,
    /// Replace the built-in point patches with a JSON table.
    #[arg(long, value_name = "FILE", env = "BEYOND_SHEET_PATCHES")]
    patches: Option<PathBuf>,
    /// Disable point patches, ignoring `--patches` and its environment variable.
    #[arg(long = "no-patches")]
    no_patches: bool,
}

fn field_selection(cli: &Cli) -> FieldSelection {
    FieldSelection {
        name: cli.name,
        race: cli.race,
        level: cli.level,
        classes: cli.classes,
        hp: cli.hp,
        max_hp: cli.max_hp,
        temp_hp: cli.temp_hp,
        ac: cli.ac,
        stats: cli.stats,
        senses: cli.senses,
        avatar: cli.avatar,
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        return Ok(bytes);
    }
    fs::read(path)
}

fn load_patches(cli: &Cli) -> Result<PatchTable, String> {
    if cli.no_patches {
        return Ok(PatchTable::empty());
    }
    let Some(path) = cli.patches.as_ref() else {
        return Ok(PatchTable::builtin());
    };

    let bytes = fs::read(path).map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    let table = PatchTable::from_json_slice(&bytes)
        .map_err(|e| format!("Error loading patches from {}: {}", path.display(), e.message))?;
    debug!(path = %path.display(), characters = table.len(), "loaded patch table");
    Ok(table)
}

fn report_core_error(path: &Path, error: &CoreError) -> ! {
    eprintln!("Error resolving character: {}", path.display());
    eprintln!("  {}: {}", error.code.as_str(), error.message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging();
    let fields = field_selection(&cli);

    let patches = load_patches(&cli).unwrap_or_else(|message| {
        eprintln!("{message}");
        process::exit(1);
    });

    let bytes = read_input(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });

    let engine = Engine::new().with_patches(patches);
    let session = engine
        .open_bytes(bytes)
        .unwrap_or_else(|e| report_core_error(&cli.path, &e));
    let character = session.character();

    if cli.json {
        let json = if fields.is_any_selected() {
            render_json_selected(character, &fields, JsonStyle::CanonicalV1)
        } else {
            render_json_full(character, JsonStyle::CanonicalV1)
        };
        let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    if fields.is_any_selected() {
        for (key, value) in render_field_pairs(character, &fields) {
            println!("{key}={value}");
        }
        return;
    }

    print!("{}", render_text_sheet(character));
}
