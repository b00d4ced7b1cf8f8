//! Static motivational quotes.
//!
//! One is picked at random whenever a work session starts; there is no
//! other contract.

use rand::seq::SliceRandom;

pub const QUOTES: &[&str] = &[
    "Focus on being productive instead of busy.",
    "The secret of getting ahead is getting started.",
    "It always seems impossible until it is done.",
    "Don't watch the clock; do what it does. Keep going.",
    "Discipline is doing what needs to be done, even if you don't want to do it.",
];

pub fn random_quote() -> &'static str {
    let mut rng = rand::thread_rng();
    QUOTES.choose(&mut rng).copied().unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_non_empty() {
        assert!(!QUOTES.is_empty());
    }

    #[test]
    fn random_quote_comes_from_the_list() {
        for _ in 0..20 {
            assert!(QUOTES.contains(&random_quote()));
        }
    }
}
