use super::Extractor;
use crate::model::IntermediateRecipe;
use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

/// Reads schema.org Recipe objects from `application/ld+json` blocks.
pub struct JsonLdExtractor;

/// Fragments of a newline-split instruction string this short are noise.
const MIN_SPLIT_INSTRUCTION_CHARS: usize = 10;

// Every field type below has a catch-all variant so that an odd shape in one
// field never fails deserialization of the whole recipe.

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<Scalar>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<TextList>,
    /// Legacy schema.org name for recipeIngredient
    ingredients: Option<TextList>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<TextList>,
    step: Option<TextList>,
    instructions: Option<TextList>,
    directions: Option<TextList>,
    image: Option<ImageType>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<Scalar>,
    #[serde(rename = "prepTime")]
    prep_time: Option<Scalar>,
    #[serde(rename = "cookTime")]
    cook_time: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Multiple(Vec<Scalar>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextList {
    Single(String),
    Multiple(Vec<TextItem>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextItem {
    Text(String),
    Step(HowToStep),
    Other(Value),
}

/// HowToStep, or a HowToSection when `itemListElement` is present.
#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
    #[serde(rename = "itemListElement")]
    item_list_element: Option<Vec<TextItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    Multiple(Vec<ImageItem>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageItem {
    Object(ImageObject),
    String(String),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

/// The ways a JSON-LD node can hold a Recipe.
#[derive(Debug)]
enum NodeShape<'a> {
    /// `"@type": "Recipe"`
    SingleRecipe(&'a Value),
    /// `"@type": ["Recipe", ...]`
    RecipeArray(&'a Value),
    /// `"@graph": [...]` with the Recipe somewhere inside
    GraphWrapper(&'a [Value]),
    Unrelated,
}

fn classify(node: &Value) -> NodeShape<'_> {
    match node.get("@type") {
        Some(Value::String(kind)) if kind.eq_ignore_ascii_case("recipe") => {
            return NodeShape::SingleRecipe(node);
        }
        Some(Value::Array(kinds))
            if kinds
                .iter()
                .filter_map(Value::as_str)
                .any(|kind| kind.eq_ignore_ascii_case("recipe")) =>
        {
            return NodeShape::RecipeArray(node);
        }
        _ => {}
    }

    match node.get("@graph") {
        Some(Value::Array(items)) => NodeShape::GraphWrapper(items),
        _ => NodeShape::Unrelated,
    }
}

/// First Recipe object in a parsed block, whether the block is a single node
/// or an array of nodes.
fn find_recipe_node(block: &Value) -> Option<&Value> {
    let nodes: &[Value] = match block {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    };

    nodes.iter().find_map(|node| match classify(node) {
        NodeShape::SingleRecipe(recipe) | NodeShape::RecipeArray(recipe) => Some(recipe),
        NodeShape::GraphWrapper(items) => items.iter().find(|item| {
            matches!(
                classify(item),
                NodeShape::SingleRecipe(_) | NodeShape::RecipeArray(_)
            )
        }),
        NodeShape::Unrelated => None,
    })
}

impl JsonLdExtractor {
    fn convert_to_recipe(&self, recipe: JsonLdRecipe) -> IntermediateRecipe {
        let name = match recipe.name {
            Some(Scalar::Text(name)) => decode_html_symbols(&name).trim().to_string(),
            _ => String::new(),
        };

        let raw_ingredients = recipe
            .recipe_ingredient
            .or(recipe.ingredients)
            .map(|list| list.into_lines())
            .unwrap_or_default();

        let mut raw_instructions = match recipe.recipe_instructions {
            Some(TextList::Single(text)) => split_instruction_text(&text),
            Some(list) => list.into_lines(),
            None => Vec::new(),
        };

        if raw_instructions.is_empty() {
            raw_instructions = [recipe.step, recipe.instructions, recipe.directions]
                .into_iter()
                .flatten()
                .map(|list| list.into_lines())
                .find(|lines| !lines.is_empty())
                .unwrap_or_default();
        }

        IntermediateRecipe {
            name,
            raw_ingredients,
            raw_instructions,
            image: recipe.image.and_then(image_url),
            servings: recipe.recipe_yield.and_then(stringify_yield),
            prep_time: recipe.prep_time.and_then(Scalar::into_text),
            cook_time: recipe.cook_time.and_then(Scalar::into_text),
        }
    }
}

impl TextList {
    /// Every line in the list, decoded and trimmed, empties dropped. A single
    /// string becomes a one-line list.
    fn into_lines(self) -> Vec<String> {
        let mut texts = Vec::new();
        match self {
            TextList::Single(text) => texts.push(text),
            TextList::Multiple(items) => items.into_iter().for_each(|i| i.collect_into(&mut texts)),
            TextList::Other(_) => {}
        }
        texts
            .iter()
            .map(|text| decode_html_symbols(text).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl TextItem {
    fn collect_into(self, texts: &mut Vec<String>) {
        match self {
            TextItem::Text(text) => texts.push(text),
            TextItem::Step(HowToStep {
                item_list_element: Some(items),
                ..
            }) => items.into_iter().for_each(|i| i.collect_into(texts)),
            // Prefer text over name
            TextItem::Step(step) => {
                if let Some(text) = step.text.or(step.name) {
                    texts.push(text);
                }
            }
            TextItem::Other(_) => {}
        }
    }
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn split_instruction_text(text: &str) -> Vec<String> {
    decode_html_symbols(text)
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_SPLIT_INSTRUCTION_CHARS)
        .map(str::to_string)
        .collect()
}

fn image_url(image: ImageType) -> Option<String> {
    let url = match image {
        ImageType::String(url) => Some(url),
        ImageType::Object(object) => object.url,
        ImageType::Multiple(images) => match images.into_iter().next() {
            Some(ImageItem::Object(object)) => object.url,
            Some(ImageItem::String(url)) => Some(url),
            _ => None,
        },
        ImageType::Other(_) => None,
    }?;
    let url = decode_html_symbols(&url).trim().to_string();
    (!url.is_empty()).then_some(url)
}

fn stringify_yield(recipe_yield: Scalar) -> Option<String> {
    match recipe_yield {
        Scalar::Multiple(values) => {
            let values: Vec<String> = values.into_iter().filter_map(Scalar::into_text).collect();
            // Prefer the descriptive form ("12 cookies") over a bare number
            values
                .iter()
                .find(|v| v.contains(char::is_alphabetic))
                .or_else(|| values.first())
                .cloned()
        }
        other => other.into_text(),
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode their entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn extract(&self, document: &Html) -> Option<IntermediateRecipe> {
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;
        let scripts: Vec<_> = document.select(&selector).collect();
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", scripts.len());

        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.text().collect::<String>();
            let block = match serde_json::from_str::<Value>(raw_json.trim()) {
                Ok(block) => block,
                Err(e) => {
                    debug!("JsonLdExtractor: Skipping malformed JSON-LD block {index}: {e}");
                    continue;
                }
            };

            let Some(node) = find_recipe_node(&block) else {
                debug!("JsonLdExtractor: No Recipe in JSON-LD block {index}");
                continue;
            };

            // The first Recipe found is the answer, usable or not
            let recipe = match JsonLdRecipe::try_from(node) {
                Ok(recipe) => self.convert_to_recipe(recipe),
                Err(e) => {
                    debug!("JsonLdExtractor: Recipe in block {index} could not be read: {e}");
                    return None;
                }
            };

            if recipe.is_usable() {
                debug!(
                    "JsonLdExtractor: Found recipe '{}' with {} ingredients and {} instructions",
                    recipe.name,
                    recipe.raw_ingredients.len(),
                    recipe.raw_instructions.len()
                );
                return Some(recipe);
            }
            debug!("JsonLdExtractor: Recipe in block {index} is incomplete");
            return None;
        }

        None
    }
}
