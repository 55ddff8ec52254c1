use log::error;
use recipe_scrape::scrape_recipe;
use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    // Get the URL from command-line arguments
    let Some(url) = env::args().nth(1) else {
        eprintln!("Usage: recipe-scrape <url>");
        return ExitCode::FAILURE;
    };

    match scrape_recipe(&url).await {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to serialize recipe: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
