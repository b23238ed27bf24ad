use crate::constants::FITNESS_KEYWORDS;

/// Returns true if any fitness keyword occurs anywhere in `text`, ignoring case.
///
/// This is a plain substring test: no tokenization and no negation handling,
/// so "I don't want to exercise" passes and "capital of France" does not.
pub fn is_in_domain(text: &str) -> bool {
    let lowercase = text.to_lowercase();
    FITNESS_KEYWORDS
        .iter()
        .any(|keyword| lowercase.contains(keyword))
}
