//! Floor-coverage spec parsing.
//!
//! A coverage spec is operator-entered text: comma-separated integers and/or
//! hyphenated ranges, e.g. `"1-5,7,10-12"`. Partial information beats a hard
//! failure here, so malformed tokens are skipped instead of aborting the
//! whole parse.

use std::collections::BTreeSet;

/// Expand a coverage spec into the set of floors it covers.
///
/// - `"1-3,7,9-10"` → `{1,2,3,7,9,10}`; duplicates across tokens collapse.
/// - Negative floors are ordinary integers: `"-2"` is the single floor -2,
///   `"-2-1"` is the range -2..=1.
/// - An inverted range (`"10-5"`) yields no floors for that token.
/// - Empty/blank input → empty set.
pub fn parse_floors(spec: &str) -> BTreeSet<i32> {
    let mut floors = BTreeSet::new();
    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Ok(n) = token.parse::<i32>() {
            floors.insert(n);
            continue;
        }
        // Range token. The separator is a '-' past the first character, so a
        // leading minus sign stays part of the start floor.
        let Some(sep) = token
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
        else {
            continue;
        };
        let start = token[..sep].trim().parse::<i32>();
        let end = token[sep + 1..].trim().parse::<i32>();
        let (Ok(start), Ok(end)) = (start, end) else {
            continue;
        };
        floors.extend(start..=end);
    }
    floors
}
