//! Property-based tests for parsing, resolution and composition.
//!
//! These tests use proptest to generate random fragment graphs and sources
//! and verify that ordering invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::catalog::{Catalog, Registry};
    use crate::composer::compose;
    use crate::error::Error;
    use crate::fragment::Fragment;
    use crate::parser::parse;
    use crate::resolver::resolve;
    use crate::serializer::{to_sh, SerializeOptions};
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::collections::HashSet;

    /// Build an acyclic graph: fragment `fN` may only depend on `f0..fN-1`.
    fn acyclic_fragments(choices: &[Vec<Index>]) -> Vec<Fragment> {
        choices
            .iter()
            .enumerate()
            .map(|(i, picks)| {
                let mut fragment = Fragment::named(format!("f{}", i));
                if i > 0 {
                    let deps: Vec<String> = picks
                        .iter()
                        .map(|pick| format!("f{}", pick.index(i)))
                        .collect();
                    fragment = fragment.with_dependencies(deps);
                }
                fragment
            })
            .collect()
    }

    fn graph_strategy() -> impl Strategy<Value = Vec<Vec<Index>>> {
        prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), 1..9)
    }

    fn position(order: &[String], name: &str) -> Option<usize> {
        order.iter().position(|n| n == name)
    }

    // ============================================================================
    // resolve property tests
    // ============================================================================

    proptest! {
        /// Property: every dependency is emitted before the fragment needing it
        #[test]
        fn resolve_emits_ancestors_first(choices in graph_strategy()) {
            let fragments = acyclic_fragments(&choices);
            let baseline = Catalog::from_fragments(&fragments);
            let top = fragments.last().unwrap().key().to_string();

            let mut order = resolve(&top, &baseline, &Registry::empty()).unwrap();
            order.push(top);

            for (index, name) in order.iter().enumerate() {
                for dependency in baseline.get(name).unwrap().dependencies() {
                    let first = position(&order, dependency).unwrap();
                    prop_assert!(
                        first < index,
                        "{} at {} but its dependency {} first at {}",
                        name, index, dependency, first
                    );
                }
            }
        }

        /// Property: resolution never lists the requested fragment itself
        #[test]
        fn resolve_excludes_requested_name(choices in graph_strategy()) {
            let fragments = acyclic_fragments(&choices);
            let baseline = Catalog::from_fragments(&fragments);
            let top = fragments.last().unwrap().key();

            let order = resolve(top, &baseline, &Registry::empty()).unwrap();
            prop_assert!(!order.iter().any(|n| n == top));
        }

        /// Property: a ring of any length is reported as a cycle
        #[test]
        fn resolve_detects_rings(len in 1usize..8) {
            let fragments: Vec<Fragment> = (0..len)
                .map(|i| Fragment::named(format!("r{}", i)).with_dependencies([format!("r{}", (i + 1) % len)]))
                .collect();
            let baseline = Catalog::from_fragments(&fragments);

            let result = resolve("r0", &baseline, &Registry::empty());
            let is_cycle = matches!(result, Err(Error::CycleDetected { .. }));
            prop_assert!(is_cycle);
        }
    }

    // ============================================================================
    // compose property tests
    // ============================================================================

    proptest! {
        /// Property: the composed order has no duplicates and keeps dependencies first
        #[test]
        fn compose_order_is_unique_and_dependency_first(choices in graph_strategy()) {
            let fragments = acyclic_fragments(&choices);
            let composition = compose(&fragments, &Registry::empty()).unwrap();

            let unique: HashSet<&String> = composition.order.iter().collect();
            prop_assert_eq!(unique.len(), composition.order.len());

            for (index, name) in composition.order.iter().enumerate() {
                for dependency in composition.catalog.get(name).unwrap().dependencies() {
                    prop_assert!(position(&composition.order, dependency).unwrap() < index);
                }
            }
        }

        /// Property: every input fragment is emitted exactly once
        #[test]
        fn compose_emits_every_input(choices in graph_strategy()) {
            let fragments = acyclic_fragments(&choices);
            let composition = compose(&fragments, &Registry::empty()).unwrap();

            prop_assert_eq!(composition.fragments().len(), fragments.len());
            prop_assert!(composition.failures.is_empty());
        }
    }

    // ============================================================================
    // parser property tests
    // ============================================================================

    proptest! {
        /// Property: parsing accepts any text and yields at least one fragment
        #[test]
        fn parse_never_fails(text in ".*") {
            prop_assert!(!parse(&text).is_empty());
        }

        /// Property: script lines survive parsing in order
        #[test]
        fn parse_preserves_script_lines(lines in prop::collection::vec("[a-z0-9 =]{0,12}", 1..6)) {
            let text = format!("# app\n{}\n", lines.join("\n"));
            let fragments = parse(&text);
            prop_assert_eq!(fragments.len(), 1);
            prop_assert_eq!(&fragments[0].script, &lines);
        }

        /// Property: a single-header fragment survives serialize + parse
        #[test]
        fn serialize_round_trips_single_header(
            name in "[a-c][a-z]{0,7}",
            tag in proptest::option::of("[a-z]{1,8}"),
            script in prop::collection::vec("[a-z0-9 =]{0,12}", 0..5),
        ) {
            let mut fragment = Fragment::named(name).with_script(script);
            fragment.tag = tag;

            let text = to_sh([&fragment], &SerializeOptions::default());
            let reparsed = parse(&text);
            prop_assert_eq!(reparsed, vec![fragment]);
        }

        /// Property: fragment boundaries and dependency lists survive
        /// serialize + parse, even for fragments without script lines
        #[test]
        fn serialize_keeps_fragment_boundaries(
            blocks in prop::collection::vec(
                (
                    prop::collection::vec("[a-z]{1,6}", 0..3),
                    prop::collection::vec("[a-z0-9 =]{1,12}", 0..3),
                ),
                1..6,
            ),
        ) {
            let fragments: Vec<Fragment> = blocks
                .iter()
                .enumerate()
                .map(|(i, (deps, script))| {
                    let fragment = Fragment::named(format!("f{}", i)).with_script(script.clone());
                    if deps.is_empty() {
                        fragment
                    } else {
                        fragment.with_dependencies(deps.clone())
                    }
                })
                .collect();
            let options = SerializeOptions {
                include_dependencies: true,
                ..SerializeOptions::default()
            };

            let reparsed = parse(&to_sh(&fragments, &options));
            prop_assert_eq!(reparsed.len(), fragments.len());
            for (before, after) in fragments.iter().zip(&reparsed) {
                prop_assert_eq!(before.key(), after.key());
                prop_assert_eq!(before.dependencies(), after.dependencies());
            }
        }
    }
}
