use crate::error::ExtractionFailed;
use crate::extractors::{AggressiveExtractor, Extractor, JsonLdExtractor, StructuralExtractor};
use crate::model::IntermediateRecipe;
use log::{debug, info, warn};
use scraper::Html;

/// Where a run of the orchestrator currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    NotTried,
    /// The named strategy ran and found nothing usable
    Tried(&'static str),
    Succeeded(&'static str),
    Failed,
}

/// A usable recipe together with the strategy that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub recipe: IntermediateRecipe,
    pub strategy: &'static str,
}

/// Runs extraction strategies in priority order and stops at the first one
/// that yields a usable recipe.
pub struct Orchestrator {
    strategies: Vec<Box<dyn Extractor>>,
}

impl Default for Orchestrator {
    /// Metadata first, then conventional markup, then the wide net.
    fn default() -> Self {
        Self::new(vec![
            Box::new(JsonLdExtractor),
            Box::new(StructuralExtractor),
            Box::new(AggressiveExtractor),
        ])
    }
}

impl Orchestrator {
    pub fn new(strategies: Vec<Box<dyn Extractor>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, document: &Html) -> Result<Extraction, ExtractionFailed> {
        let mut state = ExtractionState::NotTried;

        for strategy in &self.strategies {
            debug!("Orchestrator: {:?} -> trying {}", state, strategy.name());
            match strategy.extract(document) {
                // Strategies should only hand back usable recipes, but a
                // violating one is treated the same as no result
                Some(recipe) if recipe.is_usable() => {
                    state = ExtractionState::Succeeded(strategy.name());
                    info!(
                        "Extracted recipe '{}' using {} strategy",
                        recipe.name,
                        strategy.name()
                    );
                    debug!("Orchestrator: {:?}", state);
                    return Ok(Extraction {
                        recipe,
                        strategy: strategy.name(),
                    });
                }
                Some(_) => {
                    debug!(
                        "Orchestrator: {} returned an unusable recipe",
                        strategy.name()
                    );
                    state = ExtractionState::Tried(strategy.name());
                }
                None => state = ExtractionState::Tried(strategy.name()),
            }
        }

        debug!("Orchestrator: {:?} -> {:?}", state, ExtractionState::Failed);
        warn!("No extraction strategy found a usable recipe");
        Err(ExtractionFailed)
    }
}
