//! Codec for ordered integer lists stored inside single text columns.
//!
//! Several tables keep variable-length per-row data (a form's ordered task
//! ids, a check's 0/1 grades and collected error ids) as `", "`-separated
//! decimal text. The separator is a fixed wire contract: rows written by
//! earlier deployments must keep decoding to the same lists.
//!
//! Decoding is deliberately lenient. Tokens that are not plain non-negative
//! integers are dropped without an error, so malformed stored text degrades
//! to a shorter list instead of failing the caller.

/// Separator between elements in the stored text form.
pub const SEPARATOR: &str = ", ";

/// Encodes an ordered list of integers into its stored text form.
///
/// An empty slice encodes to the empty string.
pub fn encode(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Decodes stored text back into an ordered list of integers.
///
/// Splits on commas, trims whitespace, and silently drops every token that
/// is not a valid non-negative decimal integer. Surviving tokens keep their
/// order. Empty input yields an empty list. Never fails.
pub fn decode(text: &str) -> Vec<i64> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<i64>().ok())
        .collect()
}

/// Decodes an optional column value; `None` behaves like empty text.
pub fn decode_opt(text: Option<&str>) -> Vec<i64> {
    text.map(decode).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order_and_duplicates() {
        let xs = vec![3, 1, 4, 1, 5, 9, 2, 6];
        assert_eq!(decode(&encode(&xs)), xs);
    }

    #[test]
    fn empty_list_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode(""), Vec::<i64>::new());
        assert_eq!(decode_opt(None), Vec::<i64>::new());
    }

    #[test]
    fn single_element_has_no_separator() {
        assert_eq!(encode(&[42]), "42");
        assert_eq!(decode("42"), vec![42]);
    }

    #[test]
    fn lenient_decode_drops_bad_tokens_in_order() {
        assert_eq!(decode("3, x, 7,,2"), vec![3, 7, 2]);
    }

    #[test]
    fn lenient_decode_drops_negative_and_fractional_tokens() {
        assert_eq!(decode("-1, 2, 3.5, 4"), vec![2, 4]);
    }

    #[test]
    fn decode_tolerates_irregular_whitespace() {
        assert_eq!(decode("  1 ,2,   3 "), vec![1, 2, 3]);
    }

    #[test]
    fn decode_of_a_stringified_list_is_not_a_flat_list() {
        // A historical bug stored the Display form of a whole list in place
        // of a single element. The lenient decoder salvages the digits but
        // the encoder must never produce such text.
        assert_eq!(encode(&[1, 0, 1]), "1, 0, 1");
        assert_eq!(decode("[1, 0, 1]"), vec![0]);
    }
}
