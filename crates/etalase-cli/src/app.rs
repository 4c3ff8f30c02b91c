//! The Etalase CLI application.
//!
//! [`EtalaseCli`] owns the loaded configuration and the content repository
//! built from it, and dispatches each parsed command to its handler.

use std::sync::Arc;

use etalase_content::ContentRepository;
use etalase_core::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::EtalaseConfig;
use crate::content_handlers::{self, ListOptions, RelatedOptions};
use crate::{config_handlers, server};

// ============================================================================
// EtalaseCli
// ============================================================================

/// CLI application over one content root.
pub struct EtalaseCli {
    name: String,
    config: Arc<EtalaseConfig>,
    repository: Arc<ContentRepository>,
    version: String,
}

impl EtalaseCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = EtalaseConfig::load(args.config.as_deref())?;
        Self::new(name, config)
    }

    /// Create a CLI application, resolving the content root from `config`.
    pub fn new(name: impl Into<String>, config: EtalaseConfig) -> Result<Self> {
        let repository = ContentRepository::from_config(&config)?
            .with_extension(config.content.extension.as_str())
            .with_cache(config.cache_ttl());

        Ok(Self {
            name: name.into(),
            config: Arc::new(config),
            repository: Arc::new(repository),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &EtalaseConfig {
        &self.config
    }

    pub fn repository(&self) -> &ContentRepository {
        &self.repository
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// `log` records from the library crates are forwarded to the same
    /// subscriber.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        let output = match args.command {
            Some(Command::Version) => format!("{} {}", self.name, self.version),
            Some(Command::Health) => content_handlers::handle_health(&self.repository).await?,
            Some(Command::Serve { port, host }) => {
                let host = host.unwrap_or_else(|| self.config.server.host.clone());
                let port = port.unwrap_or(self.config.server.port);
                tracing::info!("starting {} {}", self.name, self.version);
                return server::serve(Arc::clone(&self.repository), &format!("{host}:{port}"))
                    .await;
            }
            Some(Command::Render { file, align }) => {
                content_handlers::handle_render(file.as_deref(), align.as_deref()).await?
            }
            Some(Command::List {
                content_type,
                category,
                search,
                sort,
                page,
                page_size,
                json,
            }) => {
                let options = ListOptions {
                    content_type,
                    category,
                    search,
                    sort,
                    page,
                    page_size,
                    json,
                };
                content_handlers::handle_list(&self.repository, &options).await?
            }
            Some(Command::Show {
                content_type,
                slug,
                html,
            }) => content_handlers::handle_show(&self.repository, &content_type, &slug, html).await?,
            Some(Command::Related {
                content_type,
                slug,
                field,
                limit,
            }) => {
                let options = RelatedOptions {
                    content_type,
                    slug,
                    field,
                    limit,
                };
                content_handlers::handle_related(&self.repository, &options).await?
            }
            Some(Command::SetVariants { slug, file }) => {
                content_handlers::handle_set_variants(&self.repository, &slug, &file).await?
            }
            Some(Command::Config(config_cmd)) => {
                return config_handlers::handle_config_command(
                    args.config.as_deref(),
                    config_cmd.command,
                );
            }
            None => format!("{} {} (use --help for usage)", self.name, self.version),
        };

        println!("{output}");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
