use super::{
    collect_lines, compile, document_title, first_attr, first_text_of, Extractor,
    MIN_INGREDIENT_CHARS, MIN_INSTRUCTION_CHARS,
};
use crate::model::IntermediateRecipe;
use log::debug;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Last-resort extractor: a much wider selector net, with duplicate lines
/// removed and whatever heading comes first taken as the title.
pub struct AggressiveExtractor;

static TITLE_SELECTORS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&["h1", "h2", ".recipe-title", ".post-title"]));

static INGREDIENT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        r#"li[class*="ingredient"]"#,
        ".ingredient",
        r#"[itemprop="recipeIngredient"]"#,
        ".recipe-ingredients li",
        ".ingredients li",
        "ul.ingredients li",
        "ol.ingredients li",
        ".recipe-ingredient",
        ".ingredient-item",
    ])
});

static INSTRUCTION_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        r#"li[class*="instruction"]"#,
        r#"li[class*="step"]"#,
        ".instruction",
        ".step",
        r#"[itemprop="recipeInstructions"] li"#,
        ".recipe-instructions li",
        ".instructions li",
        "ol.instructions li",
        ".recipe-step",
        ".cooking-step",
        ".directions li",
    ])
});

static IMAGE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        r#"img[class*="recipe"]"#,
        r#"meta[property="og:image"]"#,
        r#"img[itemprop="image"]"#,
        ".recipe-image img",
        ".post-image img",
        r#"img[alt*="recipe"]"#,
    ])
});

fn find_title(document: &Html) -> Option<String> {
    first_text_of(document, &TITLE_SELECTORS).or_else(|| document_title(document, &['|', '-']))
}

fn find_unique_lines(document: &Html, selectors: &[Selector], min_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for selector in selectors {
        collect_lines(document, selector, min_chars, true, &mut lines);
    }
    lines
}

/// First absolute http(s) image URL among the image selectors.
fn find_image(document: &Html) -> Option<String> {
    IMAGE_SELECTORS
        .iter()
        .filter_map(|selector| first_attr(document, selector, &["src", "content"]))
        .find(|url| url.starts_with("http://") || url.starts_with("https://"))
}

impl Extractor for AggressiveExtractor {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn extract(&self, document: &Html) -> Option<IntermediateRecipe> {
        let name = find_title(document).unwrap_or_default();
        let raw_ingredients =
            find_unique_lines(document, &INGREDIENT_SELECTORS, MIN_INGREDIENT_CHARS);
        let raw_instructions =
            find_unique_lines(document, &INSTRUCTION_SELECTORS, MIN_INSTRUCTION_CHARS);

        debug!(
            "AggressiveExtractor: title={:?}, {} ingredients, {} instructions",
            name,
            raw_ingredients.len(),
            raw_instructions.len()
        );

        let recipe = IntermediateRecipe {
            name,
            raw_ingredients,
            raw_instructions,
            image: find_image(document),
            ..Default::default()
        };
        recipe.is_usable().then_some(recipe)
    }
}
