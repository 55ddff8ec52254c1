use crate::model::IntermediateRecipe;
use log::debug;
use scraper::{ElementRef, Html, Selector};

mod aggressive;
mod json_ld;
mod structural;

pub use aggressive::AggressiveExtractor;
pub use json_ld::JsonLdExtractor;
pub use structural::StructuralExtractor;

/// One way of pulling a recipe out of a parsed page.
///
/// Returning `None` is the normal "nothing here" answer; the orchestrator then
/// moves on to the next strategy.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Html) -> Option<IntermediateRecipe>;
}

/// Ingredient lines must be longer than this many characters.
pub(crate) const MIN_INGREDIENT_CHARS: usize = 2;
/// Instruction lines must be longer than this many characters.
pub(crate) const MIN_INSTRUCTION_CHARS: usize = 10;

pub(crate) fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|css| match Selector::parse(css) {
            Ok(selector) => Some(selector),
            Err(e) => {
                debug!("Skipping invalid selector {css}: {e:?}");
                None
            }
        })
        .collect()
}

/// Text content of an element with whitespace runs collapsed.
pub(crate) fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching `selector`, if non-empty.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// First non-empty text among `selectors`, tried in order.
pub(crate) fn first_text_of(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| first_text(document, selector))
}

/// The page `<title>`, cut at the first of each delimiter in turn.
pub(crate) fn document_title(document: &Html, delimiters: &[char]) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let mut title = first_text(document, &selector)?;
    for delimiter in delimiters {
        if let Some(head) = title.split(*delimiter).next() {
            title = head.trim().to_string();
        }
    }
    Some(title).filter(|t| !t.is_empty())
}

/// Appends the text of every element matched by `selector` that is longer than
/// `min_chars`. With `dedupe`, text already in `lines` is skipped.
pub(crate) fn collect_lines(
    document: &Html,
    selector: &Selector,
    min_chars: usize,
    dedupe: bool,
    lines: &mut Vec<String>,
) {
    for element in document.select(selector) {
        let text = element_text(element);
        if text.chars().count() <= min_chars {
            continue;
        }
        if dedupe && lines.contains(&text) {
            continue;
        }
        lines.push(text);
    }
}

/// First `src` or `content` attribute among elements matched by `selector`.
pub(crate) fn first_attr(document: &Html, selector: &Selector, attrs: &[&str]) -> Option<String> {
    let element = document.select(selector).next()?;
    attrs
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
