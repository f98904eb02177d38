//! Operator CLI for cloud-dictionary.
//!
//! Reads and writes definitions directly through the PostgreSQL store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Add a definition (prompts for missing word/content)
//! cargo run --bin admin -- definition add --word latency --tag networking
//!
//! # Show one definition, or a random one
//! cargo run --bin admin -- definition get 3f0c...
//! cargo run --bin admin -- definition random
//!
//! # List every definition with a tag
//! cargo run --bin admin -- definition list --tag networking
//!
//! # Merge new content into an existing definition
//! cargo run --bin admin -- definition update 3f0c... --content "..." --merge
//!
//! # Distinct words
//! cargo run --bin admin -- words
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*`): PostgreSQL connection string
//! - `REDIS_URL` (or `REDIS_*`, optional): lookup cache refreshed after updates

use cloud_dictionary::config::Config;
use cloud_dictionary::infrastructure::cache::{CacheService, lookup};
use cloud_dictionary::infrastructure::persistence::PgDefinitionStore;
use cloud_dictionary::prelude::*;
use cloud_dictionary::server;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::collections::BTreeSet;
use std::sync::Arc;

type Dictionary = DictionaryRepository<PgDefinitionStore>;

/// CLI tool for managing cloud-dictionary.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage definitions
    Definition {
        #[command(subcommand)]
        action: DefinitionAction,
    },

    /// List every distinct word
    Words {
        /// Only words of definitions with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DefinitionAction {
    /// Add a new definition
    Add(FieldArgs),

    /// Show a definition by id
    Get { id: String },

    /// Show a random definition
    Random,

    /// List all definitions
    List {
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Update an existing definition
    Update {
        id: String,

        #[command(flatten)]
        fields: FieldArgs,

        /// Keep stored values for fields not given
        #[arg(long)]
        merge: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Definition fields accepted by `add` and `update`.
#[derive(Args)]
struct FieldArgs {
    #[arg(short, long)]
    word: Option<String>,

    #[arg(short, long)]
    content: Option<String>,

    #[arg(short, long)]
    tag: Option<String>,

    #[arg(short, long)]
    abbreviation: Option<String>,

    #[arg(long)]
    learn_more_url: Option<String>,

    #[arg(long)]
    author_name: Option<String>,

    #[arg(long)]
    author_link: Option<String>,
}

impl FieldArgs {
    fn into_input(self, word: String, content: String) -> DefinitionInput {
        DefinitionInput {
            word,
            content,
            author_name: self.author_name,
            author_link: self.author_link,
            learn_more_url: self.learn_more_url,
            tag: self.tag,
            abbreviation: self.abbreviation,
        }
    }
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .context("admin works on the postgres store; set DATABASE_URL")?;
    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    let cache = server::build_cache(&config).await;

    let dictionary = DictionaryRepository::new(Arc::new(PgDefinitionStore::new(Arc::new(
        pool.clone(),
    ))));

    match cli.command {
        Commands::Definition { action } => {
            handle_definition_action(action, &dictionary, cache.as_ref()).await?
        }
        Commands::Words { tag } => list_words(&dictionary, tag).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &dictionary).await?,
    }

    Ok(())
}

async fn handle_definition_action(
    action: DefinitionAction,
    dictionary: &Dictionary,
    cache: &dyn CacheService,
) -> Result<()> {
    match action {
        DefinitionAction::Add(fields) => add_definition(dictionary, fields).await,
        DefinitionAction::Get { id } => {
            let definition = dictionary.get_definition(&id).await?;
            print_definition(&definition);
            Ok(())
        }
        DefinitionAction::Random => {
            let definition = dictionary.get_random_definition().await?;
            print_definition(&definition);
            Ok(())
        }
        DefinitionAction::List { tag } => list_definitions(dictionary, tag).await,
        DefinitionAction::Update {
            id,
            fields,
            merge,
            yes,
        } => update_definition(dictionary, cache, id, fields, merge, yes).await,
    }
}

/// Adds a definition, prompting for `word` and `content` when not given.
async fn add_definition(dictionary: &Dictionary, mut fields: FieldArgs) -> Result<()> {
    println!("{}", "📖 Add Definition".bright_blue().bold());
    println!();

    let word = match fields.word.take() {
        Some(w) => w,
        None => Input::new().with_prompt("Word").interact_text()?,
    };
    let content = match fields.content.take() {
        Some(c) => c,
        None => Input::new().with_prompt("Content").interact_text()?,
    };

    let definition = dictionary
        .add_definition(fields.into_input(word, content))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to add definition: {}", e))?;

    println!("{}", "✅ Definition added".green().bold());
    println!();
    print_definition(&definition);

    Ok(())
}

/// Shows the stored entry and the requested change, then applies it.
///
/// With `--merge`, fields not given on the command line keep their stored
/// value. Without it every field not given is cleared, so `word` and
/// `content` must be supplied. The lookup cache entry is replaced so the
/// HTTP API serves the new version immediately.
async fn update_definition(
    dictionary: &Dictionary,
    cache: &dyn CacheService,
    id: String,
    mut fields: FieldArgs,
    merge: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✏️  Update Definition".bright_blue().bold());
    println!();

    let current = dictionary.get_definition(&id).await?;
    print_definition(&current);

    let policy = if merge {
        UpdatePolicy::Merge
    } else {
        UpdatePolicy::Replace
    };
    let word = fields.word.take().unwrap_or_default();
    let content = fields.content.take().unwrap_or_default();
    let input = fields.into_input(word, content);

    let mut preview = current.clone();
    preview.apply(input.clone(), policy);
    println!("{}", "Will become:".bright_white().bold());
    print_definition(&preview);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Apply this update?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let updated = dictionary
        .update_definition(&id, input, policy)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update definition: {}", e))?;
    lookup::refresh(cache, &updated).await;

    println!("{}", "✅ Definition updated".green().bold());
    println!();

    Ok(())
}

/// Walks every page and prints one line per definition.
///
/// # Output Format
///
/// ```text
/// 📋 Definitions
///
///   ID                                    Word                 Tag
///   ────────────────────────────────────────────────────────────────────────
///   0b4e5c1a-8f7d-4e2b-9a51-2c6f0d3e7b19  latency              networking
/// ```
async fn list_definitions(dictionary: &Dictionary, tag: Option<String>) -> Result<()> {
    println!("{}", "📋 Definitions".bright_blue().bold());
    println!();

    let filter = DefinitionFilter::new().with_tag(tag);
    let mut token = None;
    let mut total = 0usize;

    println!(
        "  {:<37} {:<20} {}",
        "ID".bright_white().bold(),
        "Word".bright_white().bold(),
        "Tag".bright_white().bold()
    );
    println!("  {}", "─".repeat(72).bright_black());

    loop {
        let page = dictionary.get_definitions(&filter, token).await?;
        for definition in &page.items {
            println!(
                "  {:<37} {:<20} {}",
                definition.id.bright_black(),
                definition.word.cyan(),
                definition.tag.as_deref().unwrap_or("-")
            );
        }
        total += page.items.len();

        match page.next_page_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    println!();
    println!("  Total: {}", total.to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints every distinct word, aggregated across pages.
async fn list_words(dictionary: &Dictionary, tag: Option<String>) -> Result<()> {
    let filter = DefinitionFilter::new().with_tag(tag);
    let mut token = None;
    let mut words = BTreeSet::new();

    loop {
        let page = dictionary.get_words(&filter, token).await?;
        words.extend(page.items);
        match page.next_page_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    for word in &words {
        println!("  {}", word.cyan());
    }
    println!();
    println!("  Total: {}", words.len().to_string().bright_white().bold());

    Ok(())
}

fn print_definition(definition: &Definition) {
    println!("  ID:       {}", definition.id.bright_black());
    println!("  Word:     {}", definition.word.cyan().bold());
    if let Some(abbreviation) = &definition.abbreviation {
        println!("  Abbrev:   {}", abbreviation);
    }
    println!("  Content:  {}", definition.content);
    if let Some(tag) = &definition.tag {
        println!("  Tag:      {}", tag.yellow());
    }
    if let Some(url) = &definition.learn_more_url {
        println!("  More:     {}", url.underline());
    }
    if !definition.author.name.is_empty() {
        match &definition.author.link {
            Some(link) => println!("  Author:   {} ({})", definition.author.name, link),
            None => println!("  Author:   {}", definition.author.name),
        }
    }
    println!();
}

async fn handle_db_action(action: DbAction, pool: &PgPool, dictionary: &Dictionary) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", version.bright_black());

            match dictionary.count().await {
                Ok(count) => println!(
                    "  Definitions: {}",
                    count.to_string().bright_green().bold()
                ),
                Err(e) => println!(
                    "{} {}",
                    "⚠️  definitions table unavailable:".yellow(),
                    e
                ),
            }
        }
    }

    Ok(())
}
