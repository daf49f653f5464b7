//! Property-based tests for version comparison
//!
//! Uses proptest to generate random version strings and check that
//! comparison behaves as a total order.

use std::cmp::Ordering;

use proptest::prelude::*;
use docvault::shared::{compare_versions, Version};

fn release() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1000, 1..5)
}

fn render(parts: &[u64]) -> String {
    parts.iter().map(u64::to_string).collect::<Vec<_>>().join(".")
}

fn pre_release() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::collection::vec("[a-z]{1,5}|[0-9]{1,3}", 1..3).prop_map(|ids| ids.join(".")))
}

fn version_string() -> impl Strategy<Value = String> {
    (release(), pre_release()).prop_map(|(parts, pre)| match pre {
        Some(pre) => format!("{}-{}", render(&parts), pre),
        None => render(&parts),
    })
}

proptest! {
    #[test]
    fn test_comparison_is_reflexive(v in version_string()) {
        prop_assert_eq!(compare_versions(&v, &v).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_comparison_is_antisymmetric(a in version_string(), b in version_string()) {
        let forward = compare_versions(&a, &b).unwrap();
        let backward = compare_versions(&b, &a).unwrap();
        prop_assert_eq!(forward, backward.reverse());
    }

    #[test]
    fn test_comparison_is_transitive(
        a in version_string(),
        b in version_string(),
        c in version_string(),
    ) {
        let (a, b, c) = (
            Version::parse(&a).unwrap(),
            Version::parse(&b).unwrap(),
            Version::parse(&c).unwrap(),
        );
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn test_trailing_zeros_do_not_matter(parts in release(), zeros in 1usize..4) {
        let mut padded = parts.clone();
        padded.extend(std::iter::repeat(0).take(zeros));
        prop_assert_eq!(
            compare_versions(&render(&parts), &render(&padded)).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_release_components_compare_numerically(parts in release(), bump in 1u64..1000) {
        let mut higher = parts.clone();
        let last = higher.len() - 1;
        higher[last] += bump;
        prop_assert_eq!(
            compare_versions(&render(&higher), &render(&parts)).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_prerelease_sorts_before_release(parts in release(), pre in "[a-z]{1,5}") {
        let release = render(&parts);
        let tagged = format!("{}-{}", release, pre);
        prop_assert_eq!(compare_versions(&tagged, &release).unwrap(), Ordering::Less);
    }
}
