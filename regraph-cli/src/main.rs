use clap::{Parser, Subcommand};
use colored::Colorize;
use regraph::{EditorConfig, EditorError, Session, Vec2, scan_paths, template};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "regraph")]
#[command(about = "Regraph - build regular expressions from node graphs")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Maximum number of edges followed when linearizing
    #[arg(long, global = true, default_value_t = regraph::linearize::DEFAULT_TRAVERSAL_LIMIT)]
    traversal_limit: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project holding only the start anchor
    New {
        /// Project file to write
        file: PathBuf,
    },
    /// Print the pattern a project linearizes to
    Pattern {
        /// Project file
        file: PathBuf,
    },
    /// Print a template's pattern, or splice it into a project
    Template {
        /// Template name (see `regraph templates`)
        name: String,
        /// Project file to add the template to
        #[arg(short, long)]
        project: Option<PathBuf>,
        /// Link the end of the current chain to the template
        #[arg(short, long, requires = "project")]
        link: bool,
    },
    /// List the built-in templates
    Templates,
    /// Show every match of a project's pattern in a test string
    Debug {
        /// Project file
        file: PathBuf,
        /// Text to match against
        text: String,
    },
    /// Count matches of a project's pattern in files
    Scan {
        /// Project file
        file: PathBuf,
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EditorConfig {
        traversal_limit: cli.traversal_limit,
        ..EditorConfig::default()
    };

    let result = match cli.command {
        Commands::New { file } => cmd_new(&file, config),
        Commands::Pattern { file } => cmd_pattern(&file, config),
        Commands::Template {
            name,
            project,
            link,
        } => cmd_template(&name, project.as_deref(), link, config),
        Commands::Templates => {
            cmd_templates();
            Ok(())
        }
        Commands::Debug { file, text } => cmd_debug(&file, &text, config),
        Commands::Scan { file, paths } => cmd_scan(&file, &paths, config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("REGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_project(file: &Path, config: EditorConfig) -> Result<Session, EditorError> {
    let contents = fs::read_to_string(file)
        .map_err(|e| EditorError::Io(format!("{}: {}", file.display(), e)))?;
    let mut session = Session::with_config(config);
    session.load_project(&contents)?;
    Ok(session)
}

fn save_project(session: &Session, file: &Path) -> Result<(), EditorError> {
    let json = session.save_project()?;
    fs::write(file, json).map_err(|e| EditorError::Io(format!("{}: {}", file.display(), e)))
}

fn cmd_new(file: &Path, config: EditorConfig) -> Result<(), EditorError> {
    let session = Session::with_config(config);
    save_project(&session, file)?;
    println!("{} {}", "Created".green().bold(), file.display());
    Ok(())
}

fn cmd_pattern(file: &Path, config: EditorConfig) -> Result<(), EditorError> {
    let session = open_project(file, config)?;
    let pattern = session.pattern();
    if pattern.is_empty() {
        println!("{}", "(empty pattern)".dimmed());
    } else {
        println!("{}", pattern.cyan());
    }
    Ok(())
}

fn cmd_template(
    name: &str,
    project: Option<&Path>,
    link: bool,
    config: EditorConfig,
) -> Result<(), EditorError> {
    let template = template::find(name)?;
    let Some(file) = project else {
        println!("{}", template.pattern().cyan());
        return Ok(());
    };

    let mut session = open_project(file, config)?;
    let tail = session.chain().last().copied();
    let ids = session.apply_template(name, placement(&session))?;
    if link && let (Some(tail), Some(&first)) = (tail, ids.first()) {
        session.connect(tail, first)?;
    }
    save_project(&session, file)?;

    println!(
        "{} {} ({} nodes) into {}",
        "Added".green().bold(),
        template.name,
        ids.len(),
        file.display()
    );
    println!("  Pattern: {}", session.pattern().cyan());
    Ok(())
}

/// Right of everything already on the canvas, level with the first node
fn placement(session: &Session) -> Vec2 {
    let nodes = session.graph().nodes();
    let right = nodes
        .iter()
        .map(|node| node.position.x)
        .fold(f32::NEG_INFINITY, f32::max);
    match nodes.first() {
        Some(first) => Vec2::new(right + session.config().template_spacing, first.position.y),
        None => regraph::graph::DEFAULT_ANCHOR_POSITION,
    }
}

fn cmd_templates() {
    println!("{}", "Templates:".bold());
    for template in template::CATALOG {
        println!(
            "  {:<6} {} {}",
            template.name.green(),
            template.description,
            template.pattern().dimmed()
        );
    }
}

fn cmd_debug(file: &Path, text: &str, config: EditorConfig) -> Result<(), EditorError> {
    let mut session = open_project(file, config)?;
    let pattern = session.pattern();
    println!("  Pattern: {}", pattern.cyan());
    println!("  Input:   {}", text.yellow());
    println!();

    session.set_test_text(text);
    let navigator = session.debug();
    if let Some(err) = navigator.error() {
        return Err(err.clone().into());
    }

    let matches = navigator.matches();
    if matches.is_empty() {
        println!("{}", "No matches found".red());
        return Ok(());
    }

    println!(
        "{} {}",
        "Found".bold(),
        format!("{} match(es)", matches.len()).green()
    );
    for (i, m) in matches.iter().enumerate() {
        println!("  [{}] {}..{} = {}", i + 1, m.start, m.end(), m.text.green());
        for group in &m.groups {
            match group.start {
                Some(start) => println!(
                    "      Group {}: {}..{} = {}",
                    group.index,
                    start,
                    start + group.length,
                    group.text.green()
                ),
                None => println!("      Group {}: {}", group.index, "(unmatched)".dimmed()),
            }
        }
    }
    Ok(())
}

fn cmd_scan(file: &Path, paths: &[PathBuf], config: EditorConfig) -> Result<(), EditorError> {
    let session = open_project(file, config)?;
    let pattern = session.pattern();
    let results = scan_paths(&pattern, paths)?;

    let mut total = 0;
    for result in &results {
        total += result.count;
        let count = if result.count > 0 {
            result.count.to_string().green()
        } else {
            result.count.to_string().dimmed()
        };
        println!("  {:>6}  {}", count, result.path.display());
    }
    println!(
        "{} {} in {} file(s)",
        "Total".bold(),
        format!("{} match(es)", total).green(),
        results.len()
    );
    Ok(())
}
