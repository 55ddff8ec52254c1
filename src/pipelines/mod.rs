mod scrape;

pub use scrape::RecipeScraper;
