/// Form field the index page submits once per word.
pub const WORDS_FIELD: &str = "words[]";

/// Pull the submitted words out of a url-encoded form body.
///
/// Keeps submission order, trims each value and drops blank ones.
pub fn submitted_words(body: &[u8]) -> Vec<String> {
    url::form_urlencoded::parse(body)
        .filter(|(key, _)| key == WORDS_FIELD)
        .map(|(_, value)| value.trim().to_string())
        .filter(|word| !word.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_field_in_order() {
        let body = b"words%5B%5D=zebra&words%5B%5D=apple&words%5B%5D=Mango";
        assert_eq!(submitted_words(body), vec!["zebra", "apple", "Mango"]);
    }

    #[test]
    fn test_trims_and_drops_blank() {
        let body = b"words%5B%5D=+ice+cream+&words%5B%5D=%20%20&words%5B%5D=&words%5B%5D=%09tea";
        assert_eq!(submitted_words(body), vec!["ice cream", "tea"]);
    }

    #[test]
    fn test_ignores_other_fields() {
        let body = b"words=plain&word%5B%5D=typo&words%5B%5D=kept";
        assert_eq!(submitted_words(body), vec!["kept"]);
    }

    #[test]
    fn test_decodes_utf8() {
        let body = "words%5B%5D=fa%C3%A7ade".as_bytes();
        assert_eq!(submitted_words(body), vec!["façade"]);
    }
}
