pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod pipelines;

pub use config::ScraperConfig;
pub use error::{ExtractionFailed, FetchError, ScrapeError};
pub use model::{Ingredient, IntermediateRecipe, ScrapedRecipe, ScrapedRecord, Source, Step};
pub use orchestrator::Orchestrator;
pub use pipelines::RecipeScraper;

use log::debug;
use scraper::Html;

/// Extract a structured recipe from a page's HTML.
///
/// Tries embedded JSON-LD metadata, then conventional recipe markup, then a
/// broad heuristic sweep. Pure and synchronous: the page must already be
/// fetched.
///
/// # Example
/// ```
/// let html = r#"<script type="application/ld+json">
///     {"@type": "Recipe", "name": "Toast",
///      "recipeIngredient": ["2 slices bread"],
///      "recipeInstructions": ["Toast the bread until golden."]}
/// </script>"#;
///
/// let recipe = recipe_scrape::extract_recipe(html).unwrap();
/// assert_eq!(recipe.title, "Toast");
/// assert_eq!(recipe.ingredients[0].unit, "slices");
/// ```
pub fn extract_recipe(html: &str) -> Result<ScrapedRecipe, ExtractionFailed> {
    extract_recipe_with(&Orchestrator::default(), html).map(|(recipe, _)| recipe)
}

/// Like [`extract_recipe`] with a caller-supplied strategy chain. Also
/// returns the name of the strategy that produced the recipe.
pub fn extract_recipe_with(
    orchestrator: &Orchestrator,
    html: &str,
) -> Result<(ScrapedRecipe, &'static str), ExtractionFailed> {
    let document = Html::parse_document(html);
    let extraction = orchestrator.run(&document)?;
    let recipe = normalize::normalize(extraction.recipe);

    // Normalization only removes text; if it emptied a list there is no recipe
    if recipe.ingredients.is_empty() || recipe.steps.is_empty() {
        debug!("Normalization left '{}' without ingredients or steps", recipe.title);
        return Err(ExtractionFailed);
    }
    Ok((recipe, extraction.strategy))
}

/// Fetch `url` and scrape it using configuration from the environment and
/// an optional `recipe-scrape.toml`.
pub async fn scrape_recipe(url: &str) -> Result<ScrapedRecord, ScrapeError> {
    let config = ScraperConfig::load()?;
    RecipeScraper::new(&config)?.scrape(url).await
}
