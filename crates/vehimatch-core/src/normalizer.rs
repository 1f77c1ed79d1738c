//! # Description Normalizer
//!
//! Canonicalizes free-text vehicle descriptions into a comparable form:
//! lowercase, punctuation replaced by spaces, common abbreviations expanded
//! as whole words, and whitespace collapsed.

use regex::Regex;

use crate::error::Result;

/// Whole-word abbreviation expansions, applied in order.
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    // Make
    ("vw", "volkswagen"),
    // Drive type
    ("fwd", "front wheel drive"),
    ("rwd", "rear wheel drive"),
    ("awd", "all wheel drive"),
    ("4wd", "four wheel drive"),
    ("4x4", "four wheel drive"),
    // Transmission typo
    ("quto", "automatic"),
];

/// Deterministic, stateless text normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    re_special: Regex,
    re_whitespace: Regex,
    abbreviations: Vec<(Regex, String)>,
}

impl Normalizer {
    /// Constructs a normalizer with [`DEFAULT_ABBREVIATIONS`].
    ///
    /// # Errors
    ///
    /// Returns `MatchError::Regex` if a pattern fails to compile (should
    /// never happen with the static table).
    pub fn new() -> Result<Self> {
        Self::with_abbreviations(DEFAULT_ABBREVIATIONS.iter().copied())
    }

    /// Constructs a normalizer with a custom abbreviation table.
    ///
    /// Abbreviations are matched literally and only as whole words.
    pub fn with_abbreviations<'a, I>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let abbreviations = table
            .into_iter()
            .map(|(short, long)| -> Result<(Regex, String)> {
                let pattern = format!(r"\b{}\b", regex::escape(&short.to_lowercase()));
                Ok((Regex::new(&pattern)?, long.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            re_special: Regex::new(r"[^a-z0-9\s-]")?,
            re_whitespace: Regex::new(r"\s+")?,
            abbreviations,
        })
    }

    /// Normalizes a raw description.
    ///
    /// # Examples
    /// ```
    /// use vehimatch_core::Normalizer;
    ///
    /// let normalizer = Normalizer::new().unwrap();
    /// assert_eq!(normalizer.normalize("VW@Golf#R-Line!2020"), "volkswagen golf r-line 2020");
    /// assert_eq!(normalizer.normalize("Ranger 4x4 QUTO"), "ranger four wheel drive automatic");
    /// ```
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let stripped = self.re_special.replace_all(&lowered, " ");
        let expanded = self.expand_abbreviations(&stripped);
        self.re_whitespace.replace_all(&expanded, " ").trim().to_string()
    }

    fn expand_abbreviations(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (pattern, replacement) in &self.abbreviations {
            // Replacements are literal text, never capture references.
            text = pattern
                .replace_all(&text, regex::NoExpand(replacement.as_str()))
                .into_owned();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(s: &str) -> String {
        Normalizer::new().unwrap().normalize(s)
    }

    #[test]
    fn lowercases_input() {
        assert_eq!(normalize("VolksWagen"), "volkswagen");
    }

    #[test]
    fn special_characters_become_spaces() {
        assert_eq!(normalize("VW@Golf#R-Line!2020"), "volkswagen golf r-line 2020");
    }

    #[test]
    fn keeps_dashes() {
        assert_eq!(normalize("R-Line"), "r-line");
    }

    #[test]
    fn expands_make_abbreviation() {
        assert_eq!(normalize("VW Golf"), "volkswagen golf");
    }

    #[test]
    fn expands_drive_type_abbreviations() {
        let cases = [
            ("FWD", "front wheel drive"),
            ("RWD", "rear wheel drive"),
            ("AWD", "all wheel drive"),
            ("4WD", "four wheel drive"),
            ("4x4", "four wheel drive"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize(input), expected, "input: {input}");
        }
    }

    #[test]
    fn corrects_transmission_typo() {
        assert_eq!(normalize("quto"), "automatic");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \t\n "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn abbreviations_only_match_whole_words() {
        assert_eq!(normalize("petrol"), "petrol");
        assert_eq!(normalize("vwx awdy 4wdrive quoto"), "vwx awdy 4wdrive quoto");
        assert_eq!(normalize("Hilux 4x4x"), "hilux 4x4x");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  toyota \t  86\n gt  "), "toyota 86 gt");
    }

    #[test]
    fn punctuation_does_not_fuse_tokens() {
        assert_eq!(normalize("golf,gti"), "golf gti");
        assert_eq!(normalize("(vw)"), "volkswagen");
    }

    #[test]
    fn normalize_is_idempotent() {
        let normalizer = Normalizer::new().unwrap();
        let inputs = [
            "",
            "VW Golf R 2020",
            "Toyota 86 GT Automatic Petrol RWD",
            "Amarok TDI580 Ultimate 4x4 QUTO",
            "  weird__spacing -- and/slashes ",
            "Škoda Octavia RS",
            "awd,fwd;rwd:4wd",
        ];
        for input in inputs {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn custom_abbreviation_table() {
        let normalizer =
            Normalizer::with_abbreviations([("merc", "mercedes-benz"), ("auto", "automatic")])
                .unwrap();
        assert_eq!(normalizer.normalize("Merc C63 Auto"), "mercedes-benz c63 automatic");
        assert_eq!(normalizer.normalize("VW"), "vw");
    }
}
