use thiserror::Error;

/// None of the extraction strategies produced a usable recipe.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No recipe data could be extracted from this page")]
pub struct ExtractionFailed;

/// Transport-level failures reported by the fetch collaborator
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out while fetching the recipe")]
    Timeout,

    /// DNS failure, refused connection or similar
    #[error("Unable to connect to the recipe website: {0}")]
    Unreachable(String),

    /// The server answered with a non-success status
    #[error("Recipe website returned HTTP {0}")]
    Status(u16),

    /// Any other HTTP client failure
    #[error("Failed to fetch URL: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors that can occur while scraping a recipe from a URL
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Only http and https pages can be scraped
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    ExtractionFailed(#[from] ExtractionFailed),

    /// Extraction succeeded but the result failed caller-level validation
    #[error("Incomplete recipe: {0}")]
    IncompleteRecipe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ScrapeError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScrapeError::InvalidUrl(_) | ScrapeError::UnsupportedScheme(_) => {
                "Please provide a valid http or https URL"
            }
            ScrapeError::Fetch(FetchError::Timeout) => "Request timed out while fetching the recipe",
            ScrapeError::Fetch(_) => "Unable to connect to the recipe website",
            ScrapeError::ExtractionFailed(_) | ScrapeError::IncompleteRecipe(_) => {
                "This site is not supported or no recipe data was found on the page"
            }
            ScrapeError::ConfigError(_) => "The scraper is misconfigured",
        }
    }
}
