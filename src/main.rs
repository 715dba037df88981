use clap::{Parser, Subcommand};
use flashread::cache::{document_id, CacheStamp, TokenCache};
use flashread::config::Config;
use flashread::input::load_document;
use flashread::reading::ReadingState;
use flashread::ui::TuiManager;
use flashread::{process_document, FlashreadError, TokenizedDocument};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flashread", version, about = "Speed-read PDF, EPUB, Markdown and text files")]
struct Cli {
    /// Words per synthesized page for formats without real pages
    #[arg(long, global = true, default_value_t = 300)]
    words_per_page: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reading tokens of a document
    Tokens {
        file: PathBuf,
        /// Emit `{tokens, pages, weights, page_count}` JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Segment a document and store its tokens in the cache
    Process {
        file: PathBuf,
        #[arg(long, default_value = ".flashread")]
        cache_dir: PathBuf,
        /// Cache id (defaults to the sanitized file name)
        #[arg(long)]
        id: Option<String>,
    },
    /// Read a document in the terminal
    Read {
        file: PathBuf,
        #[arg(long, default_value_t = 300)]
        wpm: u32,
        /// Start at this page (or the first page after it that has text)
        #[arg(long)]
        page: Option<u32>,
        /// Reuse cached tokens from this directory when available
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Tokens shown per screen (a sentence end always closes the screen)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
        group_size: u8,
        /// Hide the preview of the upcoming screen
        #[arg(long)]
        no_preview: bool,
    },
}

fn segment_file(path: &Path, config: &Config) -> Result<TokenizedDocument, FlashreadError> {
    let extracted = load_document(path, &config.extraction)?;
    if extracted.words.is_empty() {
        return Err(FlashreadError::NoText(extracted.source));
    }
    Ok(process_document(extracted))
}

fn cmd_tokens(path: &Path, json: bool, config: &Config) -> Result<(), FlashreadError> {
    let document = segment_file(path, config)?;

    if json {
        let payload = serde_json::to_string_pretty(&document)
            .map_err(flashread::cache::CacheError::from)?;
        println!("{payload}");
        return Ok(());
    }

    for (index, token) in document.stream.iter().enumerate() {
        println!("{}\t{}\t{}\t{}", index, token.page, token.weight, token.text);
    }
    Ok(())
}

fn cmd_process(path: &Path, id: Option<String>, config: &Config) -> Result<(), FlashreadError> {
    let cache = TokenCache::new(config.cache_dir.clone().unwrap_or_default());
    let id = id.unwrap_or_else(|| document_id(path));

    let document = segment_file(path, config)?;
    let stamp = CacheStamp::for_file(path, &config.extraction)?;
    let written = cache.save(&id, &stamp, &document)?;

    println!(
        "{id}: {} tokens, {} pages -> {}",
        document.len(),
        document.page_count,
        written.display()
    );
    Ok(())
}

fn load_or_segment(path: &Path, config: &Config) -> Result<TokenizedDocument, FlashreadError> {
    let Some(dir) = &config.cache_dir else {
        return segment_file(path, config);
    };
    // Missing files are reported by the loader
    if !path.exists() {
        return segment_file(path, config);
    }

    let cache = TokenCache::new(dir);
    let id = document_id(path);
    let stamp = CacheStamp::for_file(path, &config.extraction)?;
    if let Some(document) = cache.load(&id, &stamp)? {
        info!(id = %id, "using cached tokens");
        return Ok(document);
    }

    let document = segment_file(path, config)?;
    cache.save(&id, &stamp, &document)?;
    Ok(document)
}

fn cmd_read(path: &Path, page: Option<u32>, config: &Config) -> Result<(), FlashreadError> {
    let document = load_or_segment(path, config)?;

    let mut state = ReadingState::new(document, config.timing.wpm, config.timing.clone())
        .with_display(config.display.clone());
    if let Some(page) = page {
        state.jump_to_page(page);
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut state)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), FlashreadError> {
    let mut config = Config::default();
    config.extraction.words_per_page = cli.words_per_page.max(1);

    match cli.command {
        Commands::Tokens { file, json } => cmd_tokens(&file, json, &config),
        Commands::Process { file, cache_dir, id } => {
            config.cache_dir = Some(cache_dir);
            cmd_process(&file, id, &config)
        }
        Commands::Read {
            file,
            wpm,
            page,
            cache_dir,
            group_size,
            no_preview,
        } => {
            config.timing.wpm = wpm;
            config.cache_dir = cache_dir;
            config.display.group_size = usize::from(group_size);
            config.display.show_next_preview = !no_preview;
            cmd_read(&file, page, &config)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
