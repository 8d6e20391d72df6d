use rand::Rng;
use rand::seq::IndexedRandom;

/// Keyword used when the prompt has no significant word.
pub const UNTITLED_KEYWORD: &str = "Untitled";

const TEMPLATE_COUNT: usize = 5;

/// Builds a track title from a random significant prompt word and the
/// requested genre or mood.
///
/// A word is significant when it is longer than three characters.
pub fn compose_track_title<R: Rng + ?Sized>(
    prompt: &str,
    genre: &str,
    mood: &str,
    rng: &mut R,
) -> String {
    let words: Vec<&str> = prompt
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .collect();
    let keyword = words.choose(rng).copied().unwrap_or(UNTITLED_KEYWORD);

    match rng.random_range(0..TEMPLATE_COUNT) {
        0 => format!("{keyword} in {genre}"),
        1 => format!("{mood} {keyword}"),
        2 => format!("{keyword} Dreams"),
        3 => format!("{genre} {keyword}"),
        _ => format!("{keyword} Vibes"),
    }
}
