//! `versicle` - command-line scripture lookup and search.
//!
//! Thin presentation layer over the library core: argument parsing, the
//! interactive menu, prompts, and table rendering. All lookup, search,
//! and persistence logic lives in the library.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use versicle::bookmarks::BookmarkStore;
use versicle::config::Config;
use versicle::constants::context::DEFAULT_WINDOW;
use versicle::constants::render::PAGE_SIZE;
use versicle::corpus::{Corpus, Testament};
use versicle::daily;
use versicle::lookup::{self, LookupResult, Passage};
use versicle::reference;
use versicle::render;
use versicle::resolve::{AutoAccept, ConfirmMatch};
use versicle::search::{self, SearchHit, SearchOptions};

#[derive(Parser)]
#[command(name = "versicle")]
#[command(about = "Scripture lookup and search over a static corpus")]
#[command(version)]
struct Cli {
    /// Reference to look up (e.g. "John 3:16", "Genesis 1", "Psalms")
    scripture: Option<String>,

    /// Search for a keyword or phrase
    #[arg(short, long)]
    search: Option<String>,

    /// Treat the search pattern as a regular expression
    #[arg(long)]
    regex: bool,

    /// Restrict search to one testament
    #[arg(long, value_parser = ["old", "new"])]
    testament: Option<String>,

    /// Minimum words in matching verses
    #[arg(long)]
    min_words: Option<usize>,

    /// Maximum words in matching verses
    #[arg(long)]
    max_words: Option<usize>,

    /// Show today's verse
    #[arg(long)]
    daily: bool,

    /// List saved bookmarks
    #[arg(long)]
    bookmarks: bool,

    /// Accept fuzzy book matches without prompting
    #[arg(long)]
    non_interactive: bool,

    /// Corpus file override
    #[arg(long)]
    corpus: Option<PathBuf>,
}

/// Print a message and read one trimmed line from stdin.
fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// True for a "y"/"yes" answer to the given question.
fn prompt_yes(message: &str) -> bool {
    prompt(message)
        .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false)
}

/// Asks the user whether a fuzzy book candidate is what they meant.
struct PromptConfirm;

impl ConfirmMatch for PromptConfirm {
    fn confirm(&self, candidate: &str) -> bool {
        prompt_yes(&format!("Did you mean {candidate}? (y/n): "))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    // Corpus-load failure is fatal: without it nothing else can function.
    let corpus_path = cli.corpus.clone().unwrap_or_else(|| config.corpus_path.clone());
    let corpus = Corpus::load(&corpus_path)?;

    let confirm: Box<dyn ConfirmMatch> = if cli.non_interactive || cli.scripture.is_none() {
        Box::new(AutoAccept)
    } else {
        Box::new(PromptConfirm)
    };

    let testament = cli.testament.as_deref().and_then(|t| t.parse::<Testament>().ok());

    if let Some(pattern) = cli.search.as_deref() {
        let options = SearchOptions {
            regex: cli.regex,
            testament,
            min_words: cli.min_words,
            max_words: cli.max_words,
        };
        match search::search(&corpus, pattern, &options) {
            Ok(hits) => print_search_results(&hits, pattern),
            Err(e) => eprintln!("{e}"),
        }
    } else if cli.daily {
        show_daily(&corpus);
    } else if cli.bookmarks {
        show_bookmarks(&config)?;
    } else if let Some(raw) = cli.scripture.as_deref() {
        run_reference(&corpus, raw, confirm.as_ref());
    } else {
        menu_loop(&corpus, &config)?;
    }

    Ok(())
}

/// Parse and execute one reference string, rendering the result or the
/// failure without aborting the process.
fn run_reference(corpus: &Corpus, raw: &str, confirm: &dyn ConfirmMatch) {
    let result = reference::parse(raw).and_then(|parsed| lookup::execute(corpus, &parsed, confirm));
    match result {
        Ok(found) => print_lookup_result(&found),
        Err(e) => eprintln!("{e}"),
    }
}

/// Rows for the verse table: one `(reference, text)` pair per verse.
fn passage_rows(passage: &Passage) -> Vec<(String, String)> {
    passage
        .verses
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let verse = passage.start_verse + i as u32;
            (
                format!("{} {}:{}", passage.book, passage.chapter, verse),
                render::convert_braces(text),
            )
        })
        .collect()
}

fn print_rows(rows: &[(String, String)]) {
    print!("{}", render::verse_table(rows, render::terminal_width()));
}

fn print_passage(passage: &Passage) {
    print_rows(&passage_rows(passage));
}

fn print_lookup_result(result: &LookupResult) {
    match result {
        LookupResult::Book { name, chapters } => {
            for (chapter_idx, chapter) in chapters.iter().enumerate() {
                let rows: Vec<(String, String)> = chapter
                    .iter()
                    .enumerate()
                    .map(|(verse_idx, text)| {
                        (
                            format!("{} {}:{}", name, chapter_idx + 1, verse_idx + 1),
                            render::convert_braces(text),
                        )
                    })
                    .collect();
                print_rows(&rows);
            }
        }
        LookupResult::Chapter(passage)
        | LookupResult::Verse(passage)
        | LookupResult::Range(passage) => print_passage(passage),
    }
}

/// Rows for search output: highlighted text keyed by reference.
fn search_rows(hits: &[SearchHit]) -> Vec<(String, String)> {
    hits.iter()
        .map(|hit| {
            let highlighted = render::highlight_spans(&hit.text, &hit.spans);
            (hit.display(), render::convert_braces(&highlighted))
        })
        .collect()
}

fn print_search_results(hits: &[SearchHit], pattern: &str) {
    if hits.is_empty() {
        println!("No results found for '{pattern}'.");
        return;
    }
    println!("Search results for '{pattern}' ({} verses):", hits.len());
    print_rows(&search_rows(hits));
}

fn show_daily(corpus: &Corpus) {
    match daily::daily_verse(corpus, chrono::Local::now().date_naive()) {
        Ok(verse) => {
            println!("Today's verse:");
            print_rows(&[(verse.display(), render::convert_braces(&verse.text))]);
        }
        Err(e) => eprintln!("{e}"),
    }
}

fn show_bookmarks(config: &Config) -> Result<()> {
    let store = BookmarkStore::open(config.bookmarks_path.clone())?;
    if store.is_empty() {
        println!("No bookmarks found.");
        return Ok(());
    }
    let rows: Vec<(String, String)> = store
        .iter()
        .map(|(reference, bookmark)| {
            let note =
                if bookmark.note.is_empty() { "No note" } else { bookmark.note.as_str() };
            let stamp = bookmark.timestamp.format("%Y-%m-%d %H:%M");
            (reference.clone(), format!("({stamp}) {note}"))
        })
        .collect();
    print_rows(&rows);
    Ok(())
}

/// Print rows a page at a time, stopping when the user asks to quit.
fn paginate(rows: &[(String, String)]) {
    for (i, page) in rows.chunks(PAGE_SIZE).enumerate() {
        if i > 0 && !prompt_yes("Continue? (y/n): ") {
            return;
        }
        print_rows(page);
    }
}

/// Interactive lookup: execute the reference, then offer context and a
/// bookmark for single-verse and range results.
fn menu_lookup(corpus: &Corpus, config: &Config, raw: &str) {
    let parsed = match reference::parse(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let found = match lookup::execute(corpus, &parsed, &PromptConfirm) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    match &found {
        LookupResult::Book { name, chapters } => {
            println!("{name}: {} chapters", chapters.len());
            print_lookup_result(&found);
        }
        LookupResult::Chapter(passage) => {
            println!("{} chapter {}: {} verses", passage.book, passage.chapter, passage.verses.len());
            paginate(&passage_rows(passage));
        }
        LookupResult::Verse(passage) | LookupResult::Range(passage) => {
            print_passage(passage);
            offer_context(corpus, passage);
            offer_bookmark(config, passage);
        }
    }
}

fn offer_context(corpus: &Corpus, passage: &Passage) {
    if !prompt_yes("Would you like to see the context? (y/n): ") {
        return;
    }
    match lookup::context(
        corpus,
        &passage.book,
        passage.chapter,
        passage.start_verse,
        DEFAULT_WINDOW,
        &AutoAccept,
    ) {
        Ok(context) => {
            let rows: Vec<(String, String)> = context
                .into_iter()
                .map(|(verse, text)| {
                    (
                        format!("{} {}:{}", passage.book, passage.chapter, verse),
                        render::convert_braces(&text),
                    )
                })
                .collect();
            println!("Context:");
            print_rows(&rows);
        }
        Err(e) => eprintln!("{e}"),
    }
}

fn offer_bookmark(config: &Config, passage: &Passage) {
    if !prompt_yes("Would you like to bookmark this verse? (y/n): ") {
        return;
    }
    let note = prompt("Add a note (optional): ").unwrap_or_default();
    let reference = format!("{} {}:{}", passage.book, passage.chapter, passage.start_verse);
    match BookmarkStore::open(config.bookmarks_path.clone())
        .and_then(|mut store| store.save(reference, note))
    {
        Ok(()) => println!("Bookmark saved."),
        Err(e) => eprintln!("{e}"),
    }
}

/// Prompt-driven advanced search mirroring the `--search` flags.
fn menu_advanced_search(corpus: &Corpus) {
    let Ok(pattern) = prompt("Enter keyword to search: ") else { return };
    let mut options = SearchOptions {
        regex: prompt_yes("Enable regex search? (y/n): "),
        ..SearchOptions::default()
    };
    if let Ok(answer) = prompt("Filter by testament? (old/new/both): ") {
        options.testament = answer.parse::<Testament>().ok();
    }
    if let Ok(answer) = prompt("Minimum words in verse (optional): ") {
        options.min_words = answer.parse().ok();
    }
    if let Ok(answer) = prompt("Maximum words in verse (optional): ") {
        options.max_words = answer.parse().ok();
    }
    run_search(corpus, &pattern, &options);
}

fn run_search(corpus: &Corpus, pattern: &str, options: &SearchOptions) {
    match search::search(corpus, pattern, options) {
        Ok(hits) => {
            if hits.is_empty() {
                println!("No results found for '{pattern}'.");
                return;
            }
            println!("Search results for '{pattern}' ({} verses):", hits.len());
            paginate(&search_rows(&hits));
        }
        Err(e) => eprintln!("{e}"),
    }
}

fn menu_loop(corpus: &Corpus, config: &Config) -> Result<()> {
    loop {
        println!();
        println!("1. Lookup a scripture");
        println!("2. Search for a keyword");
        println!("3. Display bookmarks");
        println!("4. Get daily verse");
        println!("5. Advanced search");
        println!("6. Exit");

        match prompt("Enter your choice: ")?.as_str() {
            "1" => {
                let raw = prompt("Enter scripture (e.g. 'John 3:16'): ")?;
                menu_lookup(corpus, config, &raw);
            }
            "2" => {
                let pattern = prompt("Enter keyword to search: ")?;
                let options = SearchOptions {
                    regex: prompt_yes("Enable regex search? (y/n): "),
                    ..SearchOptions::default()
                };
                run_search(corpus, &pattern, &options);
            }
            "3" => show_bookmarks(config)?,
            "4" => show_daily(corpus),
            "5" => menu_advanced_search(corpus),
            "6" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}
