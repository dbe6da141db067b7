//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use crate::commands::{self, Outcome};
use crate::config::Settings;
use crate::core::model::ResultSet;
use crate::core::render::Renderer;
use crate::translate::http::DEFAULT_ENDPOINT;

/// linguaease - cached text translation from the command line.
#[derive(Parser, Debug)]
#[command(name = "linguaease")]
#[command(
    author,
    version,
    about,
    long_about = r#"linguaease translates short texts between languages and remembers every
answer in a local JSON cache, so repeated requests never leave the machine.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: translations only, one per line

Exit codes:
- 0: every request succeeded
- 1: a translation was unavailable (provider failure, cache miss, unreadable cache)
- 2: the request was invalid (unknown language, empty text)

Examples:
    linguaease translate "Hello" --to french
    linguaease translate --from es --to en "Buenos días"
    linguaease languages --filter chin
    linguaease cache list --format md
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
The cache directory is resolved relative to this root unless --cache-dir is absolute."
    )]
    pub root: PathBuf,

    /// Directory holding the translation cache.
    #[arg(
        long,
        global = true,
        env = "LINGUAEASE_CACHE_DIR",
        value_name = "DIR",
        long_help = "Directory holding translation_cache.json.\n\n\
Defaults to ROOT/translation_cache. The directory is created on the first write."
    )]
    pub cache_dir: Option<PathBuf>,

    /// Translation provider base URL.
    #[arg(
        long,
        global = true,
        env = "LINGUAEASE_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        value_name = "URL",
        long_help = "Base URL of the translation provider. Requests are sent to\n\
URL/translate_a/single using the public gtx client protocol."
    )]
    pub endpoint: String,

    /// Provider timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "LINGUAEASE_TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        value_name = "SECS",
        long_help = "Upper bound for a single provider call, in seconds. A call that runs\n\
longer is reported as TRANSLATION_FAILED and nothing is cached."
    )]
    pub timeout: u64,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. Results are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log cache and provider activity to stderr. RUST_LOG takes precedence\n\
when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text, serving repeated requests from the cache.
    #[command(
        long_about = "Translate one or more texts from one language to another.\n\n\
Each text is trimmed, then looked up in the cache; only misses reach the provider,\n\
and every fresh translation is written to the cache before it is printed.\n\
Languages may be given by display name (\"english\") or by code (\"en\").\n\n\
Examples:\n\
  linguaease translate Hello\n\
  linguaease translate --to japanese \"Good morning\" \"Good night\"\n\
  cat lines.txt | linguaease translate --stdin --from de --to en\n"
    )]
    Translate {
        /// Texts to translate.
        #[arg(value_name = "TEXT")]
        texts: Vec<String>,

        /// Source language (display name or code).
        #[arg(long, default_value = "english", value_name = "LANG")]
        from: String,

        /// Target language (display name or code).
        #[arg(long, default_value = "spanish", value_name = "LANG")]
        to: String,

        /// Also read one text per non-empty line from stdin.
        #[arg(long)]
        stdin: bool,
    },

    /// List supported languages.
    #[command(
        long_about = "List every supported language as a code/name pair.\n\n\
Examples:\n\
  linguaease languages\n\
  linguaease languages --filter portu\n"
    )]
    Languages {
        /// Keep languages whose code or name contains this text.
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Resolve a language name to its code (or a code to its name).
    Lookup {
        /// Display name or code.
        #[arg(value_name = "LANG")]
        name: String,
    },

    /// Inspect or reset the translation cache.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show a cached translation without contacting the provider.
    Get {
        /// Source text.
        text: String,

        /// Source language (display name or code).
        #[arg(long, default_value = "english", value_name = "LANG")]
        from: String,

        /// Target language (display name or code).
        #[arg(long, default_value = "spanish", value_name = "LANG")]
        to: String,
    },

    /// List every cached translation.
    List,

    /// Show cache location, size and entry count.
    Stats,

    /// Remove every cached translation.
    #[command(
        long_about = "Replace the cache document with an empty one.\n\n\
This also recovers from a cache file that can no longer be parsed; such a\n\
file is discarded without being repaired."
    )]
    Clear,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<Outcome> {
    let settings = Settings::new(
        cli.root,
        cli.cache_dir,
        cli.endpoint,
        cli.timeout,
        &cli.format,
        cli.pretty,
    )?;
    debug!(
        root = %settings.root.display(),
        cache_dir = %settings.cache_dir.display(),
        "settings resolved"
    );

    let result_set = match cli.command {
        Commands::Translate {
            texts,
            from,
            to,
            stdin,
        } => {
            let stdin = stdin.then(|| io::stdin().lock());
            let inputs = commands::translate::collect_inputs(&texts, stdin)?;
            commands::translate::run_translate(&settings, &inputs, &from, &to)?
        }

        Commands::Languages { filter } => commands::languages::run_languages(filter.as_deref()),

        Commands::Lookup { name } => commands::languages::run_lookup(&name),

        Commands::Cache { action } => match action {
            CacheCommands::Get { text, from, to } => {
                commands::cache::run_get(&settings, &text, &from, &to)
            }
            CacheCommands::List => commands::cache::run_list(&settings),
            CacheCommands::Stats => commands::cache::run_stats(&settings),
            CacheCommands::Clear => commands::cache::run_clear(&settings),
        },
    };

    let renderer = Renderer::with_config(settings.render);
    renderer.render_to(&result_set, io::stdout().lock())?;

    if !cli.quiet {
        report_errors(&result_set);
    }

    Ok(Outcome::from_results(&result_set))
}

/// Echo result errors on stderr
fn report_errors(result_set: &ResultSet) {
    for error in result_set.errors() {
        eprintln!("{} {}: {}", "error".red().bold(), error.code, error.message);
    }
}
