use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub trait Normalizer {
    /// Canonical form used for both dictionary keys and lookup terms.
    ///
    /// NFKD, lower-case, NFKD again (lower-casing can yield decomposable
    /// characters), drop combining marks, trim. Idempotent.
    fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.nfkd().collect::<String>().to_lowercase();

        // Marks go before the trim so a trailing mark can't hide whitespace
        lowered
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .collect::<String>()
            .trim()
            .to_string()
    }
}

pub struct TextNormalizer;
impl Normalizer for TextNormalizer {}

/// Shorthand for [`TextNormalizer`].
pub fn normalize(text: &str) -> String {
    TextNormalizer.normalize(text)
}

/// Absent input stays absent.
pub fn normalize_opt(text: Option<&str>) -> Option<String> {
    text.map(normalize)
}
