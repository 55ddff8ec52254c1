use serde::Serialize;

/// Recipe as produced by an extractor, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateRecipe {
    pub name: String,
    pub raw_ingredients: Vec<String>,
    pub raw_instructions: Vec<String>,
    pub image: Option<String>,
    pub servings: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
}

impl IntermediateRecipe {
    /// A recipe is usable when it has a name and at least one ingredient and
    /// one instruction line. Anything else counts as a failed extraction.
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.raw_ingredients.is_empty()
            && !self.raw_instructions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// Quantity text exactly as written ("1/2", "1 ½"); empty when none was found.
    pub amount: String,
    /// Unit text exactly as written ("tbsp", "fluid ounces"); empty when none was found.
    pub unit: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(amount: impl Into<String>, unit: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            unit: unit.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedRecipe {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub image_url: Option<String>,
    pub servings: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Manual,
    Scraped,
}

/// Where a recipe record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub source_url: Option<String>,
}

impl Source {
    pub fn scraped(url: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Scraped,
            source_url: Some(url.into()),
        }
    }
}

/// A scraped recipe tagged with its provenance, ready to be handed to storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedRecord {
    #[serde(flatten)]
    pub recipe: ScrapedRecipe,
    pub source: Source,
    /// Name of the extraction strategy that produced the recipe.
    pub strategy: &'static str,
}
