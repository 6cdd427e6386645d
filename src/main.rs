use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static site from Markdown pages")]
struct Cli {
    /// Log every block and file that gets processed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site into the output directory
    Build {
        /// Site config file
        #[arg(short, long, default_value = "site.toml")]
        config: PathBuf,

        /// Directory of Markdown pages
        #[arg(long)]
        content: Option<PathBuf>,

        /// Directory of static assets copied as-is
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Output directory (cleared before building)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML page template
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
    /// Convert a single Markdown file to an HTML fragment
    Convert {
        /// Input Markdown file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> mdsite::Result<()> {
    match command {
        Command::Build {
            config,
            content,
            static_dir,
            output,
            template,
        } => {
            let mut config = Config::load(&config)?;
            if let Some(dir) = content {
                config.site.content_dir = dir;
            }
            if let Some(dir) = static_dir {
                config.site.static_dir = dir;
            }
            if let Some(dir) = output {
                config.site.output_dir = dir;
            }
            if let Some(path) = template {
                config.site.template = path;
            }

            let pages = mdsite::build_site(&config)?;
            println!(
                "Generated {} pages in {}",
                pages,
                config.site.output_dir.display()
            );
        }
        Command::Convert { input, output } => {
            let markdown =
                fs::read_to_string(&input).map_err(|source| mdsite::Error::Io {
                    path: input.clone(),
                    source,
                })?;
            let html = mdsite::markdown_to_html(&markdown)?;

            match output {
                Some(path) => fs::write(&path, html)
                    .map_err(|source| mdsite::Error::Io { path, source })?,
                None => println!("{}", html),
            }
        }
    }
    Ok(())
}
