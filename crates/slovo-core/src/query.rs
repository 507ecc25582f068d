/// Collect batch terms from a raw query string.
///
/// Every `words` parameter is split on commas, so `words=a,b` and
/// `words=a&words=b` mean the same thing. Empty items are dropped.
pub fn batch_words(raw_query: Option<&str>) -> Vec<String> {
    let Some(raw) = raw_query else {
        return Vec::new();
    };

    url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == "words")
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
