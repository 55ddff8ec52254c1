mod ingredient;
mod step;

pub use ingredient::{is_unit, parse_ingredient};
pub use step::parse_step;

use crate::model::{Ingredient, IntermediateRecipe, ScrapedRecipe, Step};

pub fn normalize_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<Ingredient> {
    lines
        .iter()
        .filter_map(|line| parse_ingredient(line.as_ref()))
        .collect()
}

pub fn normalize_steps<S: AsRef<str>>(lines: &[S]) -> Vec<Step> {
    lines
        .iter()
        .filter_map(|line| parse_step(line.as_ref()))
        .collect()
}

/// Turn an extracted recipe into its final structured form.
pub fn normalize(recipe: IntermediateRecipe) -> ScrapedRecipe {
    ScrapedRecipe {
        title: recipe.name.trim().to_string(),
        ingredients: normalize_ingredients(&recipe.raw_ingredients),
        steps: normalize_steps(&recipe.raw_instructions),
        image_url: recipe.image,
        servings: recipe.servings,
        prep_time: recipe.prep_time,
        cook_time: recipe.cook_time,
    }
}
