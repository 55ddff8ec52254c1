use super::{
    collect_lines, compile, document_title, first_attr, first_text_of, Extractor,
    MIN_INGREDIENT_CHARS, MIN_INSTRUCTION_CHARS,
};
use crate::model::IntermediateRecipe;
use log::debug;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Looks for conventionally named recipe markup when a page has no metadata.
pub struct StructuralExtractor;

static TITLE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        r#"h1[class*="recipe"], h1[id*="recipe"]"#,
        r#"h1[class*="title"], h1[id*="title"]"#,
        "h1",
    ])
});

static INGREDIENT_SELECTOR: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[r#"li[class*="ingredient"], .ingredient, [itemprop="recipeIngredient"]"#])
});

static INSTRUCTION_SELECTOR: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[concat!(
        r#"li[class*="instruction"], li[class*="step"], .instruction, .step, "#,
        r#"[itemprop="recipeInstructions"] li, ol[class*="instructions"] li"#
    )])
});

/// (selector, attribute) pairs tried in order for the recipe image.
static IMAGE_SOURCES: LazyLock<Vec<(Selector, &'static str)>> = LazyLock::new(|| {
    [
        (r#"img[class*="recipe"]"#, "src"),
        (r#"meta[property="og:image"]"#, "content"),
        (r#"img[itemprop="image"]"#, "src"),
    ]
    .into_iter()
    .filter_map(|(css, attr)| Selector::parse(css).ok().map(|s| (s, attr)))
    .collect()
});

fn find_title(document: &Html) -> Option<String> {
    first_text_of(document, &TITLE_SELECTORS).or_else(|| document_title(document, &['|']))
}

fn find_lines(document: &Html, selectors: &[Selector], min_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for selector in selectors {
        collect_lines(document, selector, min_chars, false, &mut lines);
    }
    lines
}

fn find_image(document: &Html) -> Option<String> {
    IMAGE_SOURCES
        .iter()
        .find_map(|(selector, attr)| first_attr(document, selector, &[*attr]))
}

impl Extractor for StructuralExtractor {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract(&self, document: &Html) -> Option<IntermediateRecipe> {
        let name = find_title(document).unwrap_or_default();
        let raw_ingredients = find_lines(document, &INGREDIENT_SELECTOR, MIN_INGREDIENT_CHARS);
        let raw_instructions = find_lines(document, &INSTRUCTION_SELECTOR, MIN_INSTRUCTION_CHARS);

        debug!(
            "StructuralExtractor: title={:?}, {} ingredients, {} instructions",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wprm_style_markup() {
        let html = r#"
        <html>
            <head>
                <title>Banana Bread | Baking Blog</title>
                <meta property="og:image" content="https://example.com/og.jpg">
            </head>
            <body>
                <h1 class="site-title">Baking Blog</h1>
                <h1 class="wprm-recipe-name">Banana Bread</h1>
                <ul>
                    <li class="wprm-recipe-ingredient">3 ripe bananas</li>
                    <li class="wprm-recipe-ingredient">2 cups flour</li>
                    <li class="wprm-recipe-ingredient">ok</li>
                </ul>
                <ol>
                    <li class="wprm-recipe-instruction">Mash the bananas in a bowl.</li>
                    <li class="wprm-recipe-instruction">Stir.</li>
                    <li class="wprm-recipe-instruction">Bake at 350F for an hour.</li>
                </ol>
            </body>
        </html>
        "#;

        let recipe = StructuralExtractor
            .extract(&Html::parse_document(html))
            .unwrap();

        assert_eq!(recipe.name, "Banana Bread");
        assert_eq!(recipe.raw_ingredients, vec!["3 ripe bananas", "2 cups flour"]);
        assert_eq!(
            recipe.raw_instructions,
            vec!["Mash the bananas in a bowl.", "Bake at 350F for an hour."]
        );
        assert_eq!(recipe.image.as_deref(), Some("https://example.com/og.jpg"));
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        let html = r#"
        <html>
            <head><title>  Lentil Soup | Soups Daily </title></head>
            <body>
                <div class="ingredient">1 cup lentils</div>
                <ol itemprop="recipeInstructions">
                    <li>Simmer the lentils for thirty minutes.</li>
                </ol>
                <img itemprop="image" src="/img/soup.jpg">
            </body>
        </html>
        "#;

        let recipe = StructuralExtractor
            .extract(&Html::parse_document(html))
            .unwrap();

        assert_eq!(recipe.name, "Lentil Soup");
        assert_eq!(recipe.raw_ingredients, vec!["1 cup lentils"]);
        assert_eq!(
            recipe.raw_instructions,
            vec!["Simmer the lentils for thirty minutes."]
        );
        assert_eq!(recipe.image.as_deref(), Some("/img/soup.jpg"));
    }

    #[test]
    fn test_no_instructions_is_no_result() {
        let html = r#"
        <html><body>
            <h1>Shopping List</h1>
            <li class="ingredient">2 lemons</li>
        </body></html>
        "#;

        assert!(StructuralExtractor
            .extract(&Html::parse_document(html))
            .is_none());
    }
}
