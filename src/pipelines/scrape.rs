use crate::config::{ScraperConfig, ValidationConfig};
use crate::error::ScrapeError;
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::model::{ScrapedRecipe, ScrapedRecord, Source};
use crate::orchestrator::Orchestrator;
use log::{debug, info};
use url::Url;

/// Fetches a page and turns it into a record ready for storage.
///
/// This is the caller side of the extraction core: it owns URL validation,
/// the network fetch and the final completeness policy.
pub struct RecipeScraper {
    fetcher: Box<dyn Fetcher>,
    orchestrator: Orchestrator,
    validation: ValidationConfig,
}

impl RecipeScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let fetcher = RequestFetcher::new(&config.fetch)?;
        Ok(Self::with_fetcher(Box::new(fetcher), config.validation.clone()))
    }

    pub fn with_fetcher(fetcher: Box<dyn Fetcher>, validation: ValidationConfig) -> Self {
        Self {
            fetcher,
            orchestrator: Orchestrator::default(),
            validation,
        }
    }

    /// Scrape a recipe from `url`
    ///
    /// # Returns
    /// * `Ok(ScrapedRecord)` - the recipe tagged with its source URL
    /// * `Err(ScrapeError::Fetch(..))` - the page could not be retrieved
    /// * `Err(ScrapeError::ExtractionFailed(..))` - no strategy found a recipe
    /// * `Err(ScrapeError::IncompleteRecipe(..))` - the recipe failed validation
    pub async fn scrape(&self, url: &str) -> Result<ScrapedRecord, ScrapeError> {
        let page_url = parse_page_url(url)?;
        let html = self.fetcher.fetch(page_url.as_str()).await?;

        let (mut recipe, strategy) = crate::extract_recipe_with(&self.orchestrator, &html)?;
        recipe.image_url = recipe
            .image_url
            .take()
            .and_then(|image| resolve_image(&page_url, &image));

        self.validate(&recipe)?;
        info!(
            "Scraped '{}' from {} ({} ingredients, {} steps)",
            recipe.title,
            page_url,
            recipe.ingredients.len(),
            recipe.steps.len()
        );

        Ok(ScrapedRecord {
            recipe,
            source: Source::scraped(url.trim()),
            strategy,
        })
    }

    fn validate(&self, recipe: &ScrapedRecipe) -> Result<(), ScrapeError> {
        if recipe.title.chars().count() < self.validation.min_title_length {
            return Err(ScrapeError::IncompleteRecipe(format!(
                "title '{}' is shorter than {} characters",
                recipe.title, self.validation.min_title_length
            )));
        }
        if recipe.ingredients.is_empty() {
            return Err(ScrapeError::IncompleteRecipe("no ingredients".to_string()));
        }
        if recipe.steps.is_empty() {
            return Err(ScrapeError::IncompleteRecipe("no steps".to_string()));
        }
        Ok(())
    }
}

/// Only absolute http(s) URLs are fetched.
fn parse_page_url(url: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScrapeError::UnsupportedScheme(other.to_string())),
    }
}

/// Resolve a possibly relative image reference against the page it came from.
fn resolve_image(page_url: &Url, image: &str) -> Option<String> {
    match page_url.join(image) {
        Ok(resolved) if matches!(resolved.scheme(), "http" | "https") => Some(resolved.into()),
        Ok(resolved) => {
            debug!("Dropping image with unsupported scheme: {resolved}");
            None
        }
        Err(e) => {
            debug!("Dropping unresolvable image {image:?}: {e}");
            None
        }
    }
}
