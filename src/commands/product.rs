use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::commands::CommonArgs;
use crate::config::{EnvSource, Settings};
use crate::error::AppError;
use crate::llm::OpenAiClient;
use crate::products::display::render_results;
use crate::products::{Catalog, DEFAULT_CATALOG_PATH, ProductSearch};

const FAREWELL: &str = "Thanks for using the Product Search System!";
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Debug, Args, Clone)]
pub struct ProductArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_CATALOG_PATH,
        help = "JSON product catalog"
    )]
    pub catalog: PathBuf,
    #[command(flatten)]
    pub common: CommonArgs,
}

/// What one line of user input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    Quit,
    Query(&'a str),
}

pub fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Empty
    } else if QUIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
        Input::Quit
    } else {
        Input::Query(trimmed)
    }
}

pub async fn run(args: ProductArgs) -> Result<(), AppError> {
    args.common.init_logging()?;

    // The catalog is checked before credentials or any network traffic.
    let catalog = Catalog::load(&args.catalog)?;
    info!(
        "Loaded {} products from {}",
        catalog.len(),
        args.catalog.display()
    );

    let env = EnvSource::from_process()?;
    let settings = Settings::resolve(&args.common.overrides(None), &env)?;
    let client = OpenAiClient::new(&settings)?;
    let search = ProductSearch::new(catalog, client);

    print_banner();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\n\n{FAREWELL}");
                return Ok(());
            }
            step = next_query(&search, &mut lines) => {
                if !step? {
                    println!("{FAREWELL}");
                    return Ok(());
                }
            }
        }
    }
}

/// Handles one prompt. Returns `false` when the user wants to leave.
async fn next_query(
    search: &ProductSearch,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, AppError> {
    print!("What are you looking for? ");
    std::io::stdout().flush().map_err(AppError::Console)?;

    let Some(line) = lines.next_line().await.map_err(AppError::Console)? else {
        println!();
        return Ok(false);
    };

    match classify(&line) {
        Input::Empty => {
            println!("Please enter a search query.");
            Ok(true)
        }
        Input::Quit => Ok(false),
        Input::Query(query) => {
            println!("\nProcessing your query: '{query}'");
            let results = search.search(query).await;
            println!("\n{}", render_results(&results));
            Ok(true)
        }
    }
}

fn print_banner() {
    println!("Welcome to the AI-Powered Product Search System!");
    println!("{}", "=".repeat(60));
    println!("Describe what you need in plain language and matching products");
    println!("are picked from the catalog.");
    println!("\nExample queries:");
    println!("  - 'I need electronics under $100 that are in stock'");
    println!("  - 'Show me highly rated fitness equipment'");
    println!("  - 'Find affordable kitchen appliances'");
    println!("  - 'I want premium books with great reviews'");
    println!("\nType 'quit' or 'exit' to leave.\n");
}
