use clap::{Parser, Subcommand};
use flowpath::config::{self, Config};
use flowpath::flow::{self, SwitchRole};
use flowpath::pipeline::{build_graph_from_files, read_dump};
use flowpath::telemetry::init_logging;
use flowpath::{Error, Result};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "flowpath")]
#[command(about = "Derive a connectivity graph from OpenFlow flow table dumps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print the renderer view as JSON
    Graph {
        #[command(flatten)]
        dumps: DumpArgs,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the rule preview table
    Table {
        #[command(flatten)]
        dumps: DumpArgs,

        /// Only show rules carrying this tag (e.g. mac_001122334455)
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Parse a single dump and print its rules as JSON
    Parse {
        /// Switch role: ssw or psw
        #[arg(short, long)]
        role: String,

        /// Path to the dump-flows output
        dump: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct DumpArgs {
    /// Spine switch dump-flows output
    #[arg(long)]
    ssw: PathBuf,

    /// Pod switch dump-flows output
    #[arg(long)]
    psw: PathBuf,

    /// Path to flowpath.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate flowpath.toml
    Validate {
        /// Path to flowpath.toml
        #[arg(short, long, default_value = "flowpath.toml")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Graph { dumps, compact } => cmd_graph(&dumps, compact),
        Commands::Table { dumps, tag } => cmd_table(&dumps, tag.as_deref()),
        Commands::Parse { role, dump } => cmd_parse(&role, &dump),
        Commands::Config { action } => match action {
            ConfigAction::Validate { config } => cmd_config_validate(&config),
        },
    };

    if let Err(e) = result {
        eprintln!("[ERROR] {}", e);
        std::process::exit(1);
    }
}

/// Load config (if any) and start logging with its settings
fn setup(config_path: Option<&PathBuf>) -> Result<Config> {
    let cfg = config::load_or_default(config_path)?;
    init_logging(Some(&cfg.logging));

    let validation = config::validate(&cfg);
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if validation.has_errors() {
        return Err(Error::Config(validation.errors.join("; ")));
    }
    Ok(cfg)
}

fn cmd_graph(dumps: &DumpArgs, compact: bool) -> Result<()> {
    let cfg = setup(dumps.config.as_ref())?;
    info!("Loading {} and {}...", dumps.ssw.display(), dumps.psw.display());

    let graph = build_graph_from_files(&dumps.ssw, &dumps.psw, &cfg.topology)?;
    let view = graph.view();
    let json = if compact {
        serde_json::to_string(&view)
    } else {
        serde_json::to_string_pretty(&view)
    }
    .map_err(|e| Error::Serialize(e.to_string()))?;

    println!("{}", json);
    Ok(())
}

fn cmd_table(dumps: &DumpArgs, tag: Option<&str>) -> Result<()> {
    let cfg = setup(dumps.config.as_ref())?;

    let graph = build_graph_from_files(&dumps.ssw, &dumps.psw, &cfg.topology)?;
    let rows = match tag {
        Some(tag) => graph.table_with_tag(tag),
        None => graph.table(),
    };

    println!("{:<6} {:>5}  {:<40} Rule", "Switch", "Index", "Tags");
    for row in rows {
        println!(
            "{:<6} {:>5}  {:<40} {}",
            row.switch,
            row.index,
            row.tags,
            row.rule.trim()
        );
    }
    Ok(())
}

fn cmd_parse(role: &str, dump: &PathBuf) -> Result<()> {
    init_logging(None);

    let role: SwitchRole = role.parse()?;
    let content = read_dump(dump)?;

    let topology = config::Topology::default();
    let mut records = flow::parse(&content, role);
    flow::tag_records(&mut records, &topology);

    let json =
        serde_json::to_string_pretty(&records).map_err(|e| Error::Serialize(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn cmd_config_validate(config_path: &PathBuf) -> Result<()> {
    println!("[INFO] Validating {}...", config_path.display());

    let cfg = config::load(config_path)?;

    let validation = config::validate(&cfg);
    validation.print_diagnostics();

    if validation.has_errors() {
        Err(Error::Config("validation failed".to_string()))
    } else {
        println!("[INFO] Configuration is valid");
        Ok(())
    }
}
