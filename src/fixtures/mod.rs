//! Test fixtures for execute tests.
//!
//! Recorded notification streams in the replay format, loaded at compile time
//! using `include_str!`.
//!
//! ## Available Fixtures
//!
//! - [`CHECKOUT`] - A complete trace with scopes, locations, values and timings
//! - [`TRUNCATED`] - A trace stopped while two calls were still running

/// Complete checkout trace.
///
/// Contains:
/// - `Shop::Cart#checkout` calling `total` (which prices two items) and then
///   `Shop::Audit#log`
/// - 7 nodes once built: 2 parents, 3 leaves, max depth 2
/// - Start times on a 1/8 s grid so durations print exactly
pub const CHECKOUT: &str = include_str!("checkout.jsonl");

/// Truncated trace.
///
/// `checkout` and `total` never return, so only the `log` and `price`
/// leaves survive, at depths 1 and 2.
pub const TRUNCATED: &str = include_str!("truncated.jsonl");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Replay;
    use crate::tree::TreeBuilder;

    #[test]
    fn test_checkout_builds_complete_tree() {
        let nodes = TreeBuilder::new()
            .run(Replay::from_string(CHECKOUT))
            .expect("CHECKOUT should replay");
        assert_eq!(nodes.len(), 7);
        assert_eq!(crate::tree::check(&nodes), Ok(()));
    }

    #[test]
    fn test_truncated_replays() {
        let nodes = TreeBuilder::new()
            .run(Replay::from_string(TRUNCATED))
            .expect("TRUNCATED should replay");
        assert_eq!(nodes.len(), 2);
        assert!(crate::tree::check(&nodes).is_err());
    }
}
