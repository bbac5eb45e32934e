//! Reconciliation of detailed size reports
//!
//! Two steps run on each object file's section map:
//!
//! 1. [`check_consistency`] compares the detailed total against the summary
//!    total. A detailed total below the summary total means the recognized
//!    section families miss something, which is fatal. A detailed total above
//!    it is expected: the summary omits some read-only sections.
//! 2. [`normalize_clones`] folds compiler-generated clones such as
//!    `expand_key.constprop.0` or `mix_columns.isra.3` into their base entry.

use crate::error::CodeSizeError;
use crate::size::SectionSizeMap;

/// Check the detailed total against the summary total and return the detailed total.
///
/// # Examples
///
/// ```
/// use code_size::reconcile::check_consistency;
/// use code_size::size::SectionSizeMap;
///
/// let sizes = SectionSizeMap::from([(".text".to_string(), 95)]);
/// let sections = vec!["text".to_string()];
///
/// assert!(check_consistency("cipher.o", &sizes, 110, &sections).is_err());
/// assert_eq!(check_consistency("cipher.o", &sizes, 90, &sections).unwrap(), 95);
/// ```
pub fn check_consistency(
    file: &str,
    sizes: &SectionSizeMap,
    expected: u64,
    sections: &[String],
) -> Result<u64, CodeSizeError> {
    let actual: u64 = sizes.values().sum();

    if actual < expected {
        return Err(CodeSizeError::InvalidCodeSize {
            file: file.to_string(),
            actual,
            expected,
            sections: sections.to_vec(),
        });
    }

    if actual > expected {
        log::debug!(
            "{}: detailed report has {} bytes more than the summary",
            file,
            actual - expected
        );
    }

    Ok(actual)
}

/// Base name of a clone, or `None` when `name` is not a clone.
///
/// A clone is a symbol carrying a dotted suffix; its base is the text before
/// the first dot. Names starting with a dot are section names and never clones.
///
/// ```
/// use code_size::reconcile::clone_base;
///
/// assert_eq!(clone_base("expand_key.constprop.0"), Some("expand_key"));
/// assert_eq!(clone_base("expand_key"), None);
/// assert_eq!(clone_base(".rodata"), None);
/// ```
pub fn clone_base(name: &str) -> Option<&str> {
    if name.starts_with('.') {
        return None;
    }
    name.split_once('.')
        .map(|(base, _)| base)
        .filter(|base| !base.is_empty())
}

/// Merge every clone entry into its base entry.
///
/// Bytes are moved, never created or dropped, so the map total is unchanged.
/// Running it twice is the same as running it once.
pub fn normalize_clones(sizes: &mut SectionSizeMap) {
    let clones: Vec<String> = sizes
        .keys()
        .filter(|name| clone_base(name).is_some())
        .cloned()
        .collect();

    for clone in clones {
        let Some(size) = sizes.remove(&clone) else {
            continue;
        };
        if let Some(base) = clone_base(&clone) {
            log::trace!("merging {} ({} bytes) into {}", clone, size, base);
            *sizes.entry(base.to_string()).or_insert(0) += size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, u64)]) -> SectionSizeMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn sections() -> Vec<String> {
        vec!["text".to_string(), "data".to_string(), "rodata".to_string()]
    }

    #[test]
    fn test_check_consistency_detailed_below_summary_is_invalid() {
        let sizes = map(&[(".text", 85), (".data", 10)]);
        let err = check_consistency("foo.o", &sizes, 110, &sections()).unwrap_err();

        match err {
            CodeSizeError::InvalidCodeSize {
                file,
                actual,
                expected,
                sections: reported,
            } => {
                assert_eq!(file, "foo.o");
                assert_eq!(actual, 95);
                assert_eq!(expected, 110);
                assert_eq!(reported, sections());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_consistency_equal_totals_pass() {
        let sizes = map(&[(".text", 100), (".data", 10)]);
        assert_eq!(check_consistency("foo.o", &sizes, 110, &sections()).unwrap(), 110);
    }

    #[test]
    fn test_check_consistency_surplus_is_tolerated() {
        let sizes = map(&[(".text", 100), (".data", 10), ("sbox", 30)]);
        assert_eq!(check_consistency("foo.o", &sizes, 110, &sections()).unwrap(), 140);
    }

    #[test]
    fn test_check_consistency_empty_map_with_zero_expected_passes() {
        assert_eq!(check_consistency("empty.o", &SectionSizeMap::new(), 0, &sections()).unwrap(), 0);
    }

    #[test]
    fn test_normalize_merges_clones_into_base() {
        let mut sizes = map(&[
            (".text", 100),
            ("helper", 5),
            ("helper.constprop.0", 20),
            ("helper.isra.42", 7),
            (".data", 10),
        ]);
        normalize_clones(&mut sizes);

        assert_eq!(sizes, map(&[(".text", 100), ("helper", 32), (".data", 10)]));
    }

    #[test]
    fn test_normalize_creates_missing_base() {
        let mut sizes = map(&[("mix_columns.part.0", 64)]);
        normalize_clones(&mut sizes);
        assert_eq!(sizes, map(&[("mix_columns", 64)]));
    }

    #[test]
    fn test_normalize_keeps_section_names() {
        let mut sizes = map(&[(".text", 100), (".progmem.data", 12), (".eh_frame", 8)]);
        let before = sizes.clone();
        normalize_clones(&mut sizes);
        assert_eq!(sizes, before);
    }

    #[test]
    fn test_clone_base_edge_cases() {
        assert_eq!(clone_base("a.b.c"), Some("a"));
        assert_eq!(clone_base("trailing."), Some("trailing"));
        assert_eq!(clone_base("plain"), None);
        assert_eq!(clone_base(".text"), None);
    }

    mod proptest_reconcile {
        use super::*;
        use proptest::prelude::*;

        fn name_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                "[a-c]{1,2}",
                "[a-c]{1,2}\\.(constprop|isra|part)\\.[0-9]{1,2}",
                "\\.(text|data|rodata)",
            ]
        }

        fn map_strategy() -> impl Strategy<Value = SectionSizeMap> {
            prop::collection::btree_map(name_strategy(), 0u64..1_000_000, 0..24)
        }

        proptest! {
            #[test]
            fn test_normalize_preserves_total(mut sizes in map_strategy()) {
                let before: u64 = sizes.values().sum();
                normalize_clones(&mut sizes);
                let after: u64 = sizes.values().sum();
                prop_assert_eq!(before, after);
            }

            #[test]
            fn test_normalize_is_idempotent(mut sizes in map_strategy()) {
                normalize_clones(&mut sizes);
                let once = sizes.clone();
                normalize_clones(&mut sizes);
                prop_assert_eq!(once, sizes);
            }

            #[test]
            fn test_normalize_leaves_no_clones(mut sizes in map_strategy()) {
                normalize_clones(&mut sizes);
                prop_assert!(sizes.keys().all(|k| clone_base(k).is_none()));
            }

            #[test]
            fn test_normalize_order_independent(
                clones in prop::collection::vec(0u64..10_000, 1..8),
                base in 0u64..10_000,
            ) {
                // Same clones inserted in forward and reverse order
                let names: Vec<String> = (0..clones.len())
                    .map(|i| format!("key_schedule.constprop.{}", i))
                    .collect();

                let mut forward = SectionSizeMap::new();
                forward.insert("key_schedule".to_string(), base);
                for (name, size) in names.iter().zip(&clones) {
                    forward.insert(name.clone(), *size);
                }

                let mut reverse = SectionSizeMap::new();
                for (name, size) in names.iter().zip(&clones).rev() {
                    reverse.insert(name.clone(), *size);
                }
                reverse.insert("key_schedule".to_string(), base);

                normalize_clones(&mut forward);
                normalize_clones(&mut reverse);

                let expected = base + clones.iter().sum::<u64>();
                prop_assert_eq!(forward.get("key_schedule").copied(), Some(expected));
                prop_assert_eq!(forward, reverse);
            }
        }
    }
}
