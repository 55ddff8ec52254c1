//! Splits free-text ingredient lines into amount, unit and name.
//!
//! Patterns are tried from most to least specific and the first one that
//! produces a sensible split wins:
//!
//! 1. amount + a run of words containing a unit ("2 fluid ounces milk")
//! 2. amount + a single unit word ("2 cups x")
//! 3. amount + anything ("2 eggs")
//! 4. the whole line as the name
//!
//! Unit detection is a plain dictionary lookup: the first word found in the
//! unit table is the unit, even when it really belongs to the name.

use crate::model::Ingredient;
use regex::Regex;
use std::sync::LazyLock;

/// Digits, decimal points, slashes, whitespace and vulgar fraction glyphs.
const AMOUNT: &str = r"[\d./\s¼½¾⅓⅔⅛⅜⅝⅞]+";

const FRACTION_GLYPHS: &[char] = &['¼', '½', '¾', '⅓', '⅔', '⅛', '⅜', '⅝', '⅞'];

/// Recognised unit words, lowercase, singular and plural.
#[rustfmt::skip]
const UNITS: &[&str] = &[
    // volume
    "cup", "cups",
    "tablespoon", "tablespoons", "tbsp", "tbsps", "tbs",
    "teaspoon", "teaspoons", "tsp", "tsps",
    "ounce", "ounces", "oz",
    "pint", "pints",
    "quart", "quarts", "qt",
    "gallon", "gallons", "gal",
    "milliliter", "milliliters", "millilitre", "millilitres", "ml",
    "liter", "liters", "litre", "litres",
    // weight
    "pound", "pounds", "lb", "lbs",
    "gram", "grams", "g",
    "kilogram", "kilograms", "kg",
    // count and misc
    "pinch", "pinches",
    "dash", "dashes",
    "drop", "drops",
    "slice", "slices",
    "piece", "pieces",
    "clove", "cloves",
    "can", "cans",
    "package", "packages", "pkg",
    "bag", "bags",
    "bunch", "bunches",
    "head", "heads",
    "stalk", "stalks",
];

static MULTI_WORD_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)^({AMOUNT})\s+([A-Za-z]+(?:\s+[A-Za-z]+)*)\s+(.+)$"
    ))
    .expect("Invalid multi-word unit regex")
});

static SINGLE_WORD_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)^({AMOUNT})\s+([A-Za-z]+)\s+(.+)$"))
        .expect("Invalid single-word unit regex")
});

static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)^({AMOUNT})\s+(.+)$")).expect("Invalid bare number regex")
});

pub fn is_unit(word: &str) -> bool {
    UNITS.contains(&word.to_lowercase().as_str())
}

/// Parse one ingredient line. Returns `None` only for blank lines.
pub fn parse_ingredient(line: &str) -> Option<Ingredient> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let parsed = multi_word_unit(line)
        .or_else(|| single_word_unit(line))
        .or_else(|| bare_number(line))
        .unwrap_or_else(|| Ingredient::new("", "", line));
    Some(parsed)
}

fn captures<'a>(pattern: &Regex, line: &'a str) -> Option<Vec<&'a str>> {
    let caps = pattern.captures(line)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|group| group.map_or("", |m| m.as_str().trim()))
            .collect(),
    )
}

/// An amount has to carry an actual number, not just punctuation.
fn valid_amount(amount: &str) -> bool {
    amount
        .chars()
        .any(|c| c.is_ascii_digit() || FRACTION_GLYPHS.contains(&c))
}

fn multi_word_unit(line: &str) -> Option<Ingredient> {
    let groups = captures(&MULTI_WORD_UNIT, line)?;
    let (amount, words, rest) = (groups[0], groups[1], groups[2]);
    if !valid_amount(amount) {
        return None;
    }

    let tokens: Vec<&str> = words.split_whitespace().collect();
    let index = tokens.iter().position(|token| is_unit(token))?;

    let unit = tokens[..=index].join(" ");
    let name = tokens[index + 1..]
        .iter()
        .copied()
        .chain(std::iter::once(rest))
        .collect::<Vec<_>>()
        .join(" ");

    if name.chars().count() <= 1 {
        return None;
    }
    Some(Ingredient::new(amount, unit, name))
}

fn single_word_unit(line: &str) -> Option<Ingredient> {
    let groups = captures(&SINGLE_WORD_UNIT, line)?;
    let (amount, unit, rest) = (groups[0], groups[1], groups[2]);
    if !valid_amount(amount) || !is_unit(unit) || rest.is_empty() {
        return None;
    }
    Some(Ingredient::new(amount, unit, rest))
}

fn bare_number(line: &str) -> Option<Ingredient> {
    let groups = captures(&BARE_NUMBER, line)?;
    let (amount, rest) = (groups[0], groups[1]);
    if !valid_amount(amount) || rest.is_empty() {
        return None;
    }
    Some(Ingredient::new(amount, "", rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(MULTI_WORD_UNIT.is_match("2 fluid ounces milk"));
        assert!(SINGLE_WORD_UNIT.is_match("2 cups flour"));
        assert!(BARE_NUMBER.is_match("2 eggs"));
    }

    fn parse(line: &str) -> Ingredient {
        parse_ingredient(line).unwrap()
    }

    #[test]
    fn test_amount_unit_name() {
        assert_eq!(parse("2 cups flour"), Ingredient::new("2", "cups", "flour"));
        assert_eq!(parse("1/2 tsp salt"), Ingredient::new("1/2", "tsp", "salt"));
        assert_eq!(
            parse("1 1/2 Tablespoons olive oil"),
            Ingredient::new("1 1/2", "Tablespoons", "olive oil")
        );
        assert_eq!(
            parse("½ cup butter, softened"),
            Ingredient::new("½", "cup", "butter, softened")
        );
    }

    #[test]
    fn test_words_before_the_unit_join_the_unit() {
        assert_eq!(
            parse("2 fluid ounces whole milk"),
            Ingredient::new("2", "fluid ounces", "whole milk")
        );
        assert_eq!(
            parse("1 large can crushed tomatoes"),
            Ingredient::new("1", "large can", "crushed tomatoes")
        );
    }

    #[test]
    fn test_words_after_the_unit_join_the_name() {
        assert_eq!(
            parse("2 cups finely chopped parsley"),
            Ingredient::new("2", "cups", "finely chopped parsley")
        );
        assert_eq!(
            parse("3 cloves garlic, minced"),
            Ingredient::new("3", "cloves", "garlic, minced")
        );
    }

    #[test]
    fn test_single_word_unit_with_one_letter_name() {
        assert_eq!(parse("2 cups x"), Ingredient::new("2", "cups", "x"));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(parse("2 eggs"), Ingredient::new("2", "", "eggs"));
        assert_eq!(
            parse("3 large ripe bananas"),
            Ingredient::new("3", "", "large ripe bananas")
        );
        assert_eq!(parse("1.5 lemons"), Ingredient::new("1.5", "", "lemons"));
    }

    #[test]
    fn test_fallback_keeps_whole_line() {
        assert_eq!(
            parse("a pinch of salt to taste"),
            Ingredient::new("", "", "a pinch of salt to taste")
        );
        assert_eq!(parse("  Salt and pepper "), Ingredient::new("", "", "Salt and pepper"));
        assert_eq!(parse("... garnish"), Ingredient::new("", "", "... garnish"));
        assert_eq!(parse("12"), Ingredient::new("", "", "12"));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_ingredient("   "), None);
    }

    #[test]
    fn test_reparsing_the_name_is_stable() {
        for line in ["2 cups flour", "2 eggs", "a pinch of salt to taste", "1/2 tsp salt"] {
            let first = parse(line);
            let again = parse(&first.name);
            assert_eq!(again.name, first.name);
            assert!(again.amount.is_empty());
        }
    }

    #[test]
    fn test_nothing_is_dropped() {
        for line in [
            "2 cups finely chopped parsley",
            "2 fluid ounces whole milk",
            "3 large ripe bananas",
        ] {
            let parsed = parse(line);
            let rebuilt = [parsed.amount, parsed.unit, parsed.name]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(rebuilt, line);
        }
    }

    #[test]
    fn test_unit_lookup_is_case_insensitive() {
        assert!(is_unit("TBSP"));
        assert!(is_unit("Cups"));
        assert!(!is_unit("orange"));
    }
}
