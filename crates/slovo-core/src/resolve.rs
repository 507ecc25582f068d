use crate::dictionary::Dictionary;

/// How a term matched a dictionary key, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// Term equals the key
    Exact,
    /// Term is a whole whitespace-delimited word of a multi-word key
    Word,
    /// Term is a substring of the key
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub key: &'a str,
    pub translation: &'a str,
    pub kind: MatchKind,
}

/// Find the best entry for an already normalized term.
///
/// Exact matches always win. Otherwise the first key in dictionary order
/// matching as a whole word is taken, then the first key containing the term.
/// An empty term never matches.
pub fn resolve<'a>(term: &str, dictionary: &'a Dictionary) -> Option<Resolution<'a>> {
    if term.is_empty() {
        return None;
    }

    if let Some(entry) = dictionary.get_entry(term) {
        return Some(Resolution {
            key: &entry.source,
            translation: &entry.target,
            kind: MatchKind::Exact,
        });
    }

    let mut contains = None;

    for entry in dictionary.iter() {
        if !entry.source.contains(term) {
            continue;
        }

        if entry.source.split_whitespace().any(|word| word == term) {
            return Some(Resolution {
                key: &entry.source,
                translation: &entry.target,
                kind: MatchKind::Word,
            });
        }

        if contains.is_none() {
            contains = Some(Resolution {
                key: &entry.source,
                translation: &entry.target,
                kind: MatchKind::Contains,
            });
        }
    }

    contains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        [
            ("домик", "small house"),
            ("дом", "house"),
            ("доброе утро", "good morning"),
            ("утренний", "morning"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn exact_match_wins_over_earlier_substring() {
        let dict = sample();
        let hit = resolve("дом", &dict).unwrap();

        assert_eq!(hit.translation, "house");
        assert_eq!(hit.kind, MatchKind::Exact);
    }

    #[test]
    fn whole_word_beats_substring() {
        let dict: Dictionary = [
            ("утренний", "morning-ish"),
            ("доброе утро", "good morning"),
        ]
        .into_iter()
        .collect();
        let hit = resolve("утр", &dict).unwrap();
        assert_eq!(hit.kind, MatchKind::Contains);
        assert_eq!(hit.translation, "morning-ish");

        let dict: Dictionary = [
            ("утром", "in the morning"),
            ("доброе утро", "good morning"),
        ]
        .into_iter()
        .collect();
        let hit = resolve("утро", &dict).unwrap();
        assert_eq!(hit.kind, MatchKind::Word);
        assert_eq!(hit.translation, "good morning");
    }

    #[test]
    fn substring_fallback_takes_first_in_order() {
        let dict = sample();
        let hit = resolve("ом", &dict).unwrap();

        assert_eq!(hit.kind, MatchKind::Contains);
        assert_eq!(hit.key, "домик");
    }

    #[test]
    fn missing_term_is_none() {
        assert_eq!(resolve("кот", &sample()), None);
    }

    #[test]
    fn empty_term_never_matches() {
        assert_eq!(resolve("", &sample()), None);
    }

    #[test]
    fn empty_dictionary_never_matches() {
        assert_eq!(resolve("дом", &Dictionary::new()), None);
    }
}
