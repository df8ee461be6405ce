//! Duplicate target detection among siblings.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::tree::Target;

/// Targets that appear more than once in one sibling list.
///
/// Slugs and links are separate namespaces: `slug x` and `link x` never
/// collide. Exposed for tooling that edits a sidebar incrementally.
pub fn find_duplicate_targets<'a>(
    targets: impl IntoIterator<Item = &'a Target>,
) -> BTreeSet<&'a Target> {
    let mut seen: FxHashMap<&Target, usize> = FxHashMap::default();
    for target in targets {
        *seen.entry(target).or_default() += 1;
    }
    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(target, _)| target)
        .collect()
}

/// Every repeated occurrence as `(later, first)` positions.
pub(crate) fn duplicate_positions(targets: &[&Target]) -> Vec<(usize, usize)> {
    let mut first: FxHashMap<&Target, usize> = FxHashMap::default();
    let mut pairs = Vec::new();
    for (i, &target) in targets.iter().enumerate() {
        match first.get(target) {
            Some(&origin) => pairs.push((i, origin)),
            None => {
                first.insert(target, i);
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_duplicate_targets() {
        let targets = [
            Target::slug("x"),
            Target::slug("y"),
            Target::link("x"),
            Target::slug("x"),
            Target::link("https://discord.gg"),
            Target::link("https://discord.gg"),
        ];
        let dups = find_duplicate_targets(&targets);
        let expected: BTreeSet<_> = [&targets[0], &targets[4]].into_iter().collect();
        assert_eq!(dups, expected);
    }

    #[test]
    fn test_no_duplicates() {
        let targets = [Target::slug("a"), Target::slug("b")];
        assert!(find_duplicate_targets(&targets).is_empty());
        assert!(find_duplicate_targets(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_duplicate_positions() {
        let (x, y) = (Target::slug("x"), Target::slug("y"));
        let targets = [&x, &y, &x, &x];
        assert_eq!(duplicate_positions(&targets), [(2, 0), (3, 0)]);
    }
}
