use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::html;

/// Content tokenization strategy: invokes `emit` once per produced term,
/// in document order.
pub trait ContentTokenizer: Send + Sync {
    fn process(&self, content: String, emit: &mut dyn FnMut(String));

    fn name(&self) -> &str;
}

/// Whitespace-split tokenizer for plain text
pub struct WhitespaceTokenizer;

impl ContentTokenizer for WhitespaceTokenizer {
    fn process(&self, content: String, emit: &mut dyn FnMut(String)) {
        for term in content.split_whitespace() {
            emit(term.to_string());
        }
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// HTML tokenizer: strips markup, then emits maximal alphanumeric runs
pub struct HtmlTokenizer;

impl ContentTokenizer for HtmlTokenizer {
    fn process(&self, content: String, emit: &mut dyn FnMut(String)) {
        let text = html::cleantext(&content);
        if text.is_empty() {
            return;
        }

        let mut term = String::new();
        for ch in text.chars() {
            if ch.is_alphanumeric() {
                term.push(ch);
            } else if !term.is_empty() {
                emit(std::mem::take(&mut term));
            }
        }
        if !term.is_empty() {
            emit(term);
        }
    }

    fn name(&self) -> &str {
        "html"
    }
}

/// Unicode tokenizer splitting on UAX#29 word boundaries
pub struct UnicodeTokenizer;

impl ContentTokenizer for UnicodeTokenizer {
    fn process(&self, content: String, emit: &mut dyn FnMut(String)) {
        for word in content.unicode_words() {
            emit(word.to_string());
        }
    }

    fn name(&self) -> &str {
        "unicode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(tokenizer: &dyn ContentTokenizer, content: &str) -> Vec<String> {
        let mut terms = Vec::new();
        tokenizer.process(content.to_string(), &mut |term| terms.push(term));
        terms
    }

    #[test]
    fn test_whitespace_split() {
        let terms = collect(&WhitespaceTokenizer, "a b  a\tc\n");
        assert_eq!(terms, vec!["a", "b", "a", "c"]);
    }

    #[test]
    fn test_whitespace_empty_content() {
        assert!(collect(&WhitespaceTokenizer, "").is_empty());
        assert!(collect(&WhitespaceTokenizer, "   ").is_empty());
    }

    #[test]
    fn test_whitespace_keeps_punctuation() {
        let terms = collect(&WhitespaceTokenizer, "Hello, world!");
        assert_eq!(terms, vec!["Hello,", "world!"]);
    }

    #[test]
    fn test_html_alphanumeric_runs() {
        let terms = collect(&HtmlTokenizer, "<p>Hello, world!</p>");
        assert_eq!(terms, vec!["Hello", "world"]);
    }

    #[test]
    fn test_html_splits_on_markup_boundaries() {
        let terms = collect(&HtmlTokenizer, "<b>one</b><i>two</i> three4");
        assert_eq!(terms, vec!["one", "two", "three4"]);
    }

    #[test]
    fn test_html_empty_after_cleaning() {
        assert!(collect(&HtmlTokenizer, "<br/>").is_empty());
    }

    #[test]
    fn test_unicode_words() {
        let terms = collect(&UnicodeTokenizer, "can't stop won't stop");
        assert_eq!(terms, vec!["can't", "stop", "won't", "stop"]);
    }
}
