//! CLI entry point for blogkit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogkit::commands::{self, list::ListFilter, new::NewPost};
use blogkit::hooks::{EnvGuardHook, FrontMatterHook};

#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version)]
#[command(about = "Load, list and validate the posts of a file-based blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published posts, tags or categories
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Only posts with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show a single post, published or not
    Show {
        slug: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate post front-matter (all posts when no file is given)
    Validate { files: Vec<PathBuf> },

    /// Create a new unpublished post
    New {
        /// Title of the new post
        title: String,

        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// File name without extension
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Run an editor hook on a JSON payload read from stdin
    Hook {
        #[command(subcommand)]
        kind: HookKind,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum HookKind {
    /// Reject post writes with invalid front-matter
    Frontmatter,
    /// Reject reads and searches of .env files
    EnvGuard,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.debug {
        "blogkit=debug,info"
    } else {
        "blogkit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List {
            r#type,
            category,
            tag,
        } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            commands::list::run(&blog, &r#type, &ListFilter { category, tag })?;
        }

        Commands::Show { slug, json } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            commands::show::run(&blog, &slug, json)?;
        }

        Commands::Validate { files } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            commands::validate::run(&blog, &files)?;
        }

        Commands::New {
            title,
            category,
            tags,
            slug,
        } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let post = NewPost {
                title,
                category,
                tags,
                slug,
                date: chrono::Local::now().date_naive(),
            };
            commands::new::run(&blog, &post)?;
        }

        Commands::Hook { kind } => {
            let blog = match blogkit::Blog::new(&base_dir) {
                Ok(blog) => blog,
                Err(e) => {
                    eprintln!("Hook error: {:#}", e);
                    std::process::exit(blogkit::hooks::Verdict::ERROR_CODE);
                }
            };
            match kind {
                HookKind::Frontmatter => {
                    commands::hook::run(&FrontMatterHook::from_config(&blog.config))
                }
                HookKind::EnvGuard => {
                    commands::hook::run(&EnvGuardHook::from_config(&blog.config.hook))
                }
            }
        }

        Commands::Version => {
            println!("blogkit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
