use std::process;

use clap::Parser;
use lltools::commands::VERSION;
use lltools::commands::product::{self, ProductArgs};

#[derive(Debug, Parser)]
#[command(
    name = "product-search",
    about = "Search a product catalog in natural language",
    version = VERSION
)]
struct Cli {
    #[command(flatten)]
    product: ProductArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = product::run(cli.product).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
