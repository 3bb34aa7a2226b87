use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::finder::TagFinder;
use crate::tools::{
    SearchRequest, execute_list_tags, execute_search, format_search_results, format_tag_list,
    search_expression,
};
use crate::vault::{TagCatalog, TagCollector};
use anyhow::bail;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagfind")]
#[command(version, about = "Fuzzy-find tags across a folder of markdown notes", long_about = None)]
pub struct Cli {
    /// Vault root (default: `vault` from config, then the current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Config file to use instead of the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank tags against a fuzzy query
    Search {
        /// Query; leave empty to list the most used tags
        #[arg(default_value = "")]
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Print only the search expression (`tag:#...`) for the best match
        #[arg(long)]
        expression: bool,
    },
    /// List every tag with the number of notes carrying it
    Tags {
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

/// Run a parsed command line and return what should be printed.
pub fn run(cli: Cli) -> Result<String> {
    let config = Config::load(cli.config.as_deref())?;
    let root = config.vault_root(cli.vault.as_deref())?;
    let collector = TagCollector::new(root, config.exclude.clone());
    let mut finder = TagFinder::new(TagCatalog::new(collector));

    match cli.command {
        Commands::Search {
            query,
            limit,
            format,
            expression,
        } => {
            let request = SearchRequest {
                query,
                limit: Some(config.limit(limit)),
            };
            let results = execute_search(&mut finder, &request)?;

            if expression {
                return match results.first() {
                    Some(best) => Ok(search_expression(&best.label)),
                    None => bail!("No tags match '{}'", request.query),
                };
            }
            format_search_results(&results, &request.query, config.format(format))
        }
        Commands::Tags { format } => {
            let tags = execute_list_tags(&mut finder)?;
            format_tag_list(&tags, config.format(format))
        }
    }
}
