//! Text utilities shared by the deriver, classifier, and normalizer.
//!
//! Recipe content is Spanish free text that may come from an untrusted
//! generation path, so every matcher here folds case and accents before
//! comparing. Numeric parsing accepts both `.` and `,` decimal separators.

use once_cell::sync::Lazy;
use regex::Regex;

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)").expect("valid regex"));

static EXPLICIT_UNIT_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(huevo|pechuga|bistec|filete)\s*[12]\b").expect("valid regex"));

/// Lowercases and strips Spanish diacritics so keyword matching is
/// case- and accent-insensitive.
pub fn normalize_text(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Canonical key for an ingredient name: normalized text with runs of
/// non-alphanumeric characters collapsed to single dashes.
pub fn ingredient_key(name: &str) -> String {
    let normalized = normalize_text(name);
    let mut key = String::with_capacity(normalized.len());
    let mut pending_dash = false;
    for c in normalized.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !key.is_empty() {
                key.push('-');
            }
            pending_dash = false;
            key.push(c);
        } else {
            pending_dash = true;
        }
    }
    key
}

/// Slug identifier for an imported recipe, derived from its name.
pub fn recipe_slug(name: &str) -> String {
    let slug: String = ingredient_key(name).chars().take(40).collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "receta-importada".to_string()
    } else {
        slug
    }
}

/// Extracts the first number found in free text ("2 cdas" -> 2.0,
/// "1,5 tazas" -> 1.5).
pub fn parse_first_number(value: &str) -> Option<f64> {
    let captures = FIRST_NUMBER.captures(value)?;
    let raw = captures.get(1)?.as_str().replace(',', ".");
    let parsed: f64 = raw.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Parses free text into a whole unit count usable as a loop total.
/// Counts outside 2..=12 are rejected (a single unit needs no loop and
/// larger values are almost certainly weights, not counts).
pub fn parse_unit_count(value: &str) -> Option<u32> {
    let parsed = parse_first_number(value)?;
    let rounded = parsed.round();
    if (2.0..=12.0).contains(&rounded) {
        Some(rounded as u32)
    } else {
        None
    }
}

/// Parses timer text into whole seconds ("90 segundos" -> 90).
/// Zero and negative values are rejected.
pub fn parse_timer_seconds(value: &str) -> Option<u32> {
    let parsed = parse_first_number(value)?;
    if parsed > 0.0 {
        Some(parsed.round() as u32)
    } else {
        None
    }
}

/// True when the step texts already spell out per-unit numbering
/// ("huevo 1", "huevo 2"), meaning repetition is structural and a loop
/// cursor must not be layered on top.
pub fn has_explicit_unit_numbering(text: &str) -> bool {
    EXPLICIT_UNIT_NUMBERING.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_folds_accents() {
        assert_eq!(normalize_text("Freír Huevo"), "freir huevo");
        assert_eq!(normalize_text("SARTÉN"), "sarten");
        assert_eq!(normalize_text("pequeño"), "pequeno");
    }

    #[test]
    fn test_ingredient_key() {
        assert_eq!(ingredient_key("Ajo picado"), "ajo-picado");
        assert_eq!(ingredient_key("  Cebolla  china "), "cebolla-china");
        assert_eq!(ingredient_key("Sal"), "sal");
    }

    #[test]
    fn test_recipe_slug() {
        assert_eq!(recipe_slug("Lomo Saltado Casero"), "lomo-saltado-casero");
        assert_eq!(recipe_slug("***"), "receta-importada");
    }

    #[test]
    fn test_parse_first_number() {
        assert_eq!(parse_first_number("2 cdas"), Some(2.0));
        assert_eq!(parse_first_number("1,5 tazas"), Some(1.5));
        assert_eq!(parse_first_number("Al gusto"), None);
    }

    #[test]
    fn test_parse_unit_count_bounds() {
        assert_eq!(parse_unit_count("3 huevos"), Some(3));
        assert_eq!(parse_unit_count("1 huevo"), None);
        assert_eq!(parse_unit_count("500 g"), None);
    }

    #[test]
    fn test_parse_timer_seconds() {
        assert_eq!(parse_timer_seconds("90"), Some(90));
        assert_eq!(parse_timer_seconds("1,5"), Some(2));
        assert_eq!(parse_timer_seconds("sin tiempo"), None);
    }

    #[test]
    fn test_explicit_unit_numbering() {
        assert!(has_explicit_unit_numbering("freir huevo 2"));
        assert!(!has_explicit_unit_numbering("freir huevos"));
        assert!(!has_explicit_unit_numbering("pechuga a la plancha"));
    }
}
