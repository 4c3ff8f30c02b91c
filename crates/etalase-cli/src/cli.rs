//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "etalase", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "ETALASE_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the content API over HTTP.
    Serve {
        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Render markdown to HTML.
    Render {
        /// Markdown file; reads stdin when omitted.
        file: Option<String>,

        /// Wrap the output in an alignment container (left, center, right, justify).
        #[arg(short, long)]
        align: Option<String>,
    },

    /// List, filter, and page through a content type.
    List {
        /// Content type (products, portfolio, articles, ...).
        content_type: String,

        /// Only show this category.
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over name, description, and tags.
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (name-asc, name-desc, price-asc, price-desc, rating-desc, date-desc, date-asc).
        #[arg(long, default_value = "name-asc")]
        sort: String,

        /// 1-based page number.
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Items per page.
        #[arg(long, default_value = "9")]
        page_size: usize,

        /// Print JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Show a single document.
    Show {
        /// Content type.
        content_type: String,

        /// Document slug.
        slug: String,

        /// Render the body to HTML.
        #[arg(long)]
        html: bool,
    },

    /// List documents sharing a field value with the given document.
    Related {
        /// Content type.
        content_type: String,

        /// Document slug.
        slug: String,

        /// Field to match on.
        #[arg(short, long, default_value = "category")]
        field: String,

        /// Maximum number of results.
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Replace a product's variants from a JSON file.
    SetVariants {
        /// Product slug.
        slug: String,

        /// JSON file holding an array of variants.
        file: String,
    },

    /// Print version information.
    Version,

    /// Check that the content root is readable.
    Health,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "server.port").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "server.port").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["etalase"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_flags() {
        let args = CliArgs::parse_from(["etalase", "-v", "--config", "/tmp/c.toml"]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("/tmp/c.toml"));
    }

    #[test]
    fn test_serve_command() {
        let args = CliArgs::parse_from(["etalase", "serve", "--port", "8080"]);
        match args.command {
            Some(Command::Serve { port, host }) => {
                assert_eq!(port, Some(8080));
                assert!(host.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_render_command() {
        let args = CliArgs::parse_from(["etalase", "render", "about.md", "--align", "center"]);
        match args.command {
            Some(Command::Render { file, align }) => {
                assert_eq!(file.as_deref(), Some("about.md"));
                assert_eq!(align.as_deref(), Some("center"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_list_command_defaults() {
        let args = CliArgs::parse_from(["etalase", "list", "products"]);
        match args.command {
            Some(Command::List {
                content_type,
                category,
                search,
                sort,
                page,
                page_size,
                json,
            }) => {
                assert_eq!(content_type, "products");
                assert!(category.is_none());
                assert!(search.is_none());
                assert_eq!(sort, "name-asc");
                assert_eq!(page, 1);
                assert_eq!(page_size, 9);
                assert!(!json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_command_options() {
        let args = CliArgs::parse_from([
            "etalase", "list", "products", "--category", "kaos", "-s", "polos", "--sort",
            "price-desc", "-p", "2", "--page-size", "3", "--json",
        ]);
        match args.command {
            Some(Command::List {
                category,
                search,
                sort,
                page,
                page_size,
                json,
                ..
            }) => {
                assert_eq!(category.as_deref(), Some("kaos"));
                assert_eq!(search.as_deref(), Some("polos"));
                assert_eq!(sort, "price-desc");
                assert_eq!(page, 2);
                assert_eq!(page_size, 3);
                assert!(json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_related_command() {
        let args = CliArgs::parse_from(["etalase", "related", "articles", "tips", "-l", "5"]);
        match args.command {
            Some(Command::Related {
                content_type,
                slug,
                field,
                limit,
            }) => {
                assert_eq!(content_type, "articles");
                assert_eq!(slug, "tips");
                assert_eq!(field, "category");
                assert_eq!(limit, 5);
            }
            _ => panic!("Expected Related command"),
        }
    }

    #[test]
    fn test_set_variants_command() {
        let args = CliArgs::parse_from(["etalase", "set-variants", "kaos-polos", "v.json"]);
        assert!(matches!(
            args.command,
            Some(Command::SetVariants { ref slug, ref file }) if slug == "kaos-polos" && file == "v.json"
        ));
    }

    #[test]
    fn test_config_commands() {
        let args = CliArgs::parse_from(["etalase", "config", "set", "server.port", "8080"]);
        match args.command {
            Some(Command::Config(cmd)) => match cmd.command {
                ConfigAction::Set { key, value } => {
                    assert_eq!(key, "server.port");
                    assert_eq!(value, "8080");
                }
                _ => panic!("Expected Set action"),
            },
            _ => panic!("Expected Config command"),
        }

        let args = CliArgs::parse_from(["etalase", "config", "init", "--force"]);
        assert!(matches!(
            args.command,
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Init { force: true, .. }
            }))
        ));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
