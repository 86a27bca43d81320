//! Text helpers for diagram labels.

const WORDS_PER_LINE: usize = 7;

/// Break a description into lines of seven words
///
/// Lines are joined with a Markdown hard break (two spaces and a newline).
/// Descriptions of seven words or fewer are returned unchanged.
pub fn reflow_description(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= WORDS_PER_LINE {
        return text.to_string();
    }

    words
        .chunks(WORDS_PER_LINE)
        .map(|chunk| chunk.join(" "))
        .collect::<Vec<_>>()
        .join("  \n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_empty_descriptions_are_unchanged() {
        assert_eq!(reflow_description(""), "");
        assert_eq!(
            reflow_description("one two three four five six seven"),
            "one two three four five six seven"
        );
    }

    #[test]
    fn test_long_description_is_chunked_by_seven_words() {
        let text = "a b c d e f g h i j k l m n o";
        assert_eq!(
            reflow_description(text),
            "a b c d e f g  \nh i j k l m n  \no"
        );
    }

    #[test]
    fn test_reflow_collapses_irregular_whitespace() {
        assert_eq!(
            reflow_description("a  b\tc d e f g\nh"),
            "a b c d e f g  \nh"
        );
    }
}
