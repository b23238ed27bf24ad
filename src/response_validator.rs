use crate::constants::REFUSAL_SENTENCE;

/// False when the model answered with its own off-topic refusal.
pub fn accepts(response_text: &str) -> bool {
    !response_text.contains(REFUSAL_SENTENCE)
}
