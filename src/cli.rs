//! Terminal front-end
//!
//! Every subcommand drives one of the library views and prints it as plain
//! text.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use wordly_core::dates::{parse_date, parse_date_list};
use wordly_core::import::parse_file;
use wordly_core::views::NO_SENTENCES_FOUND;
use wordly_core::{
    AdminForms, AdminGate, AnswerOutcome, Config, DateView, HttpWordService, MonthView,
    QuizDriver, QuizSession, QuizState, SearchView, SqliteStore, VocabularySet, VocabularyStore,
    WordInput, WordListView,
};

#[derive(Parser, Debug)]
#[command(
    name = "wordly",
    version,
    about = "Browse word/synonym pairs and take synonym quizzes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and list every word pair
    Words,
    /// Look up a single word
    Search(SearchArgs),
    /// List the words added on a date (D/M/YYYY)
    Date { date: String },
    /// List the words added during a month (1-12)
    Month { month: u32 },
    /// Add words for a date, e.g. --word "candid=honest, frank"
    AddWords(AddWordsArgs),
    /// Add words in bulk, one "Word: synonym1, synonym2" per line
    AddBulk(AddBulkArgs),
    /// Add words from a CSV or XLSX file with Word and Synonyms columns
    Import(ImportArgs),
    /// Add an example sentence
    AddSentence(AddSentenceArgs),
    /// Take a multiple-choice synonym quiz
    Quiz(QuizArgs),
    /// Clear the cached words
    Clear,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub word: String,

    /// Also list example sentences
    #[arg(long)]
    pub sentences: bool,
}

#[derive(Args, Debug)]
pub struct AdminArgs {
    /// Admin passkey
    #[arg(long)]
    pub passkey: String,

    /// Date the words belong to (D/M/YYYY)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddWordsArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// WORD=synonym1,synonym2 (repeatable)
    #[arg(long = "word", required = true)]
    pub words: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AddBulkArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    /// Read from this file instead of stdin
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub admin: AdminArgs,

    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct AddSentenceArgs {
    #[arg(long)]
    pub passkey: String,

    pub sentence: String,
}

#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Number of questions; asked interactively when omitted
    #[arg(long)]
    pub count: Option<usize>,

    /// Dated quiz over these dates, e.g. "6/7/2024, 8/7/2024"
    #[arg(long)]
    pub dates: Option<String>,

    /// Use the cached words without fetching
    #[arg(long)]
    pub offline: bool,

    /// Seed for reproducible questions
    #[arg(long)]
    pub seed: Option<u64>,
}

struct App {
    config: Config,
    service: Arc<HttpWordService>,
    store: VocabularyStore,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let service = Arc::new(
            HttpWordService::new(&config.backend_url, config.request_timeout)
                .context("Failed to build HTTP client")?,
        );
        let cache = SqliteStore::open(&config.cache_path)
            .with_context(|| format!("Failed to open cache {}", config.cache_path.display()))?;
        let mut store = VocabularyStore::new(Box::new(cache), service.clone());
        store.restore()?;
        Ok(Self { config, service, store })
    }

    fn admin_forms(&self, args: &AdminArgs) -> Result<AdminForms> {
        let mut gate = AdminGate::new(self.config.admin_passkey.clone());
        if !gate.submit(&args.passkey) {
            bail!("{}", gate.error().unwrap_or_default());
        }
        let mut forms = AdminForms::new(gate);
        forms.selected_date = args.date.as_deref().map(parse_date).transpose()?;
        Ok(forms)
    }
}

impl Cli {
    pub async fn run(self, config: Config) -> Result<()> {
        let mut app = App::new(config)?;
        match self.command {
            Commands::Words => run_words(&mut app).await,
            Commands::Search(args) => run_search(&app, args).await,
            Commands::Date { date } => run_date(&app, &date).await,
            Commands::Month { month } => run_month(&app, month).await,
            Commands::AddWords(args) => run_add_words(&app, args).await,
            Commands::AddBulk(args) => run_add_bulk(&app, args).await,
            Commands::Import(args) => run_import(&app, args).await,
            Commands::AddSentence(args) => run_add_sentence(&app, args).await,
            Commands::Quiz(args) => run_quiz(&mut app, args).await,
            Commands::Clear => {
                app.store.clear()?;
                println!("Cached words cleared.");
                Ok(())
            }
        }
    }
}

fn print_vocab(vocab: &VocabularySet) {
    for entry in vocab {
        println!("{}", entry);
    }
}

async fn run_words(app: &mut App) -> Result<()> {
    let mut view = WordListView::default();
    view.toggle(&mut app.store).await;
    if let Some(error) = &view.error {
        bail!("{}", error);
    }
    print_vocab(&app.store.current());
    Ok(())
}

async fn run_search(app: &App, args: SearchArgs) -> Result<()> {
    let mut view = SearchView::default();
    view.search(app.service.as_ref(), &app.store.current(), &args.word).await;
    match (&view.result, &view.error) {
        (Some(entry), _) => println!("{}", entry),
        (None, Some(error)) => {
            println!("{}", error);
            if !view.suggestions.is_empty() {
                println!("Did you mean: {}?", view.suggestions.join(", "));
            }
        }
        (None, None) => {}
    }

    if args.sentences {
        view.search_sentences(app.service.as_ref(), &args.word).await;
        match &view.sentences {
            Some(sentences) if sentences.is_empty() => println!("No sentences found"),
            Some(sentences) => {
                println!("Sentences:");
                for sentence in sentences {
                    println!("  {}", sentence);
                }
            }
            None => println!("{}", NO_SENTENCES_FOUND),
        }
    }
    Ok(())
}

async fn run_date(app: &App, date: &str) -> Result<()> {
    let mut view = DateView {
        selected: Some(parse_date(date)?),
        ..Default::default()
    };
    view.toggle(app.service.as_ref()).await?;
    if let Some(error) = &view.error {
        println!("{}", error);
    }
    for (word, synonyms) in &view.word_pairs {
        println!("{}: {}", word, synonyms.join(", "));
    }
    Ok(())
}

async fn run_month(app: &App, month: u32) -> Result<()> {
    let mut view = MonthView::default();
    view.select(app.service.as_ref(), month).await?;
    match view.empty_message() {
        Some(message) => println!("{}", message),
        None => print_vocab(&view.words),
    }
    Ok(())
}

fn parse_word_flag(raw: &str) -> Result<WordInput> {
    match raw.split_once('=') {
        Some((word, synonyms)) => Ok(WordInput::new(word, synonyms)),
        None => bail!("Expected WORD=synonym1,synonym2, got '{}'", raw),
    }
}

async fn run_add_words(app: &App, args: AddWordsArgs) -> Result<()> {
    let mut forms = app.admin_forms(&args.admin)?;
    forms.rows = args
        .words
        .iter()
        .map(|w| parse_word_flag(w))
        .collect::<Result<_>>()?;
    let count = forms.submit_words(app.service.as_ref()).await?;
    println!("Words added successfully ({})", count);
    Ok(())
}

async fn run_add_bulk(app: &App, args: AddBulkArgs) -> Result<()> {
    let forms = app.admin_forms(&args.admin)?;
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let count = forms.submit_bulk(app.service.as_ref(), &text).await?;
    println!("Words added successfully ({})", count);
    Ok(())
}

async fn run_import(app: &App, args: ImportArgs) -> Result<()> {
    let forms = app.admin_forms(&args.admin)?;
    let rows = parse_file(&args.path)?;
    let count = forms.submit(app.service.as_ref(), &rows).await?;
    println!("Words added successfully ({})", count);
    Ok(())
}

async fn run_add_sentence(app: &App, args: AddSentenceArgs) -> Result<()> {
    let mut forms = app.admin_forms(&AdminArgs {
        passkey: args.passkey,
        date: None,
    })?;
    forms.sentence = args.sentence;
    forms.submit_sentence(app.service.as_ref()).await?;
    println!("Sentence added successfully");
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

async fn run_quiz(app: &mut App, args: QuizArgs) -> Result<()> {
    if let Some(dates) = &args.dates {
        let dates = parse_date_list(dates)?;
        let vocab = app.store.load_dates(&dates).await?;
        println!("Words fetched successfully! Number of words found: {}", vocab.len());
    } else if !args.offline {
        if let Err(e) = app.store.load().await {
            println!("{} - using cached words", e);
        }
    }

    let session = match args.seed {
        Some(seed) => QuizSession::with_seed(seed),
        None => QuizSession::default(),
    };
    let mut driver = QuizDriver::new(session, app.config.feedback_delay);
    driver.begin()?;

    let mut count = args.count;
    loop {
        let requested = match count.take() {
            Some(n) => n,
            None => match prompt("Number of questions: ")?.parse() {
                Ok(n) => n,
                Err(_) => {
                    println!("Please enter a number");
                    continue;
                }
            },
        };
        match driver.start(requested, app.store.current()) {
            Ok(_) => break,
            Err(e) => {
                println!("{}", e);
                if args.count.is_some() {
                    return Ok(());
                }
            }
        }
    }

    while driver.state() == QuizState::InProgress {
        let question = match driver.session().current_question() {
            Some(q) => q.clone(),
            None => break,
        };
        println!(
            "\nQuestion {} of {}: {}",
            driver.session().current_index() + 1,
            driver.session().total_requested(),
            question.display_text()
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let choice = prompt("Your answer (1-4, blank to skip): ")?;
        let selected = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.options.get(i))
            .map(String::as_str);

        match driver.submit_answer(selected)? {
            AnswerOutcome::Correct => println!("Correct!"),
            AnswerOutcome::Incorrect { feedback, pending } => {
                println!("{}", feedback);
                if pending.is_some() {
                    driver.wait_feedback().await?;
                }
            }
        }
    }

    println!("\nQuiz completed");
    if let Some(summary) = driver.summary() {
        if !summary.incorrect.is_empty() {
            println!("Summary of Incorrect Answers:");
            for (i, record) in summary.incorrect.iter().enumerate() {
                println!("Question {}: {}", i + 1, record.question_text);
                println!("  Your answer: {}", record.user_answer_display());
                println!("  Correct answer: {}", record.correct_answer);
                println!("  All synonyms: {}", record.all_synonyms.join(", "));
            }
        }
        println!("{}", summary);
    }

    let clear = prompt("Clear test and cached words? [y/N]: ")?;
    if clear.eq_ignore_ascii_case("y") {
        driver.reset();
        app.store.clear()?;
        println!("Cleared.");
    }
    Ok(())
}
