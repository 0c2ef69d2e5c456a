//! Ingredient-list extraction from raw OCR text
//!
//! Product labels bury the ingredient list between a marker word
//! ("Ingredients:") and the next section heading ("Nutrition Facts",
//! allergen or warning blocks). The parser isolates that span and tokenizes
//! it into cleaned ingredient names.

use regex::Regex;

/// Parses raw label text into an ordered ingredient list
///
/// The parser has no failure mode: degenerate input yields an empty list.
/// Duplicates are kept; order reflects label order.
#[derive(Debug, Clone)]
pub struct IngredientParser {
    span_re: Regex,
    split_re: Regex,
    paren_re: Regex,
}

impl IngredientParser {
    pub fn new() -> Self {
        Self {
            // Span starts after "ingredients" plus a separator and ends at
            // the first nutrition/allergen/warning marker or end of text.
            span_re: Regex::new(r"(?is)ingredients[:\s]+(.+?)(?:nutrition|allergen|warning|$)")
                .expect("ingredient span pattern is valid"),
            split_re: Regex::new(r"[,;|\n]+").expect("token split pattern is valid"),
            paren_re: Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"),
        }
    }

    /// Extracts cleaned ingredient tokens from raw text
    ///
    /// If no "ingredients" marker exists, the whole text is treated as the
    /// ingredient span. Tokens of length <= 2 after cleaning are dropped.
    pub fn parse(&self, raw_text: &str) -> Vec<String> {
        let span = self
            .span_re
            .captures(raw_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(raw_text);

        self.split_re
            .split(span)
            .filter_map(|token| self.clean_token(token))
            .collect()
    }

    fn clean_token(&self, token: &str) -> Option<String> {
        let without_parens = self.paren_re.replace_all(token, "");
        let collapsed = without_parens.split_whitespace().collect::<Vec<_>>().join(" ");
        let cleaned = collapsed
            .trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-') || c.is_whitespace());

        if cleaned.chars().count() > 2 {
            Some(cleaned.to_string())
        } else {
            None
        }
    }
}

impl Default for IngredientParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_label() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Ingredients: Water, Sugar, Salt. Nutrition Facts: ...");
        assert_eq!(ingredients, vec!["Water", "Sugar", "Salt"]);
    }

    #[test]
    fn test_parse_strips_parentheticals() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Ingredients: Water (aqua), Salt");
        assert_eq!(ingredients, vec!["Water", "Salt"]);
    }

    #[test]
    fn test_parse_without_marker_uses_whole_text() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Sodium Fluoride, Hydrated Silica");
        assert_eq!(ingredients, vec!["Sodium Fluoride", "Hydrated Silica"]);
    }

    #[test]
    fn test_parse_stops_at_allergen_marker() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("INGREDIENTS: Wheat Flour, Milk Powder ALLERGEN ADVICE: contains wheat");
        assert_eq!(ingredients, vec!["Wheat Flour", "Milk Powder"]);
    }

    #[test]
    fn test_parse_splits_on_mixed_separators() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Ingredients: Water; Glycerin | Sorbitol\nCellulose Gum");
        assert_eq!(
            ingredients,
            vec!["Water", "Glycerin", "Sorbitol", "Cellulose Gum"]
        );
    }

    #[test]
    fn test_parse_collapses_internal_whitespace() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Ingredients: Sodium   Laureth\t Sulfate, Water");
        assert_eq!(ingredients, vec!["Sodium Laureth Sulfate", "Water"]);
    }

    #[test]
    fn test_parse_drops_short_tokens() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Ingredients: Water, ab, -, Salt");
        assert_eq!(ingredients, vec!["Water", "Salt"]);
    }

    #[test]
    fn test_all_tokens_longer_than_two_chars() {
        let parser = IngredientParser::new();
        let ingredients =
            parser.parse("Ingredients: a, bb, ccc, Water (aqua), (only parens), ...");
        for token in &ingredients {
            assert!(token.chars().count() > 2, "short token survived: {:?}", token);
        }
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = IngredientParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("  \n ").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates_and_order() {
        let parser = IngredientParser::new();
        let ingredients = parser.parse("Ingredients: Salt, Water, Salt");
        assert_eq!(ingredients, vec!["Salt", "Water", "Salt"]);
    }
}
