//! Property-based tests for rule compilation and matching.

use super::compiler::{strip_type_marker, MappingCompiler};
use crate::config::{MapEntry, RawMaps, TaskDefaults};
use crate::kind::ResourceKind;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = ResourceKind> {
    prop_oneof![
        Just(ResourceKind::Script),
        Just(ResourceKind::Stylesheet),
        Just(ResourceKind::Image),
    ]
}

fn extension(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Script => "js",
        ResourceKind::Stylesheet => "css",
        ResourceKind::Image => "png",
    }
}

// Object maps whose locals can never be suffixes of one another
fn distinct_maps_strategy() -> impl Strategy<Value = Vec<(ResourceKind, String)>> {
    prop::collection::vec((kind_strategy(), "[a-z]{1,10}"), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Every declared local rewrites to its own target, under its own kind only
    #[test]
    fn rules_rewrite_declared_locals(entries in distinct_maps_strategy(), dir in "[a-z]{1,6}") {
        let pairs: Vec<(String, String)> = entries
            .iter()
            .enumerate()
            .map(|(i, (kind, cdn))| {
                let ext = extension(*kind);
                (format!("m{i}x.{ext}"), format!("{cdn}/{i}.min.{ext}"))
            })
            .collect();
        let defaults = TaskDefaults {
            prefix: "//cdn.example.com".into(),
            ..TaskDefaults::default()
        };
        let compilation = MappingCompiler::compile(&RawMaps::object(pairs.clone()), &defaults);
        prop_assert!(compilation.is_clean());

        for (i, (kind, _)) in entries.iter().enumerate() {
            let url = format!("{dir}/{}", pairs[i].0);
            let expected = format!("//cdn.example.com/{}", pairs[i].1);
            prop_assert_eq!(compilation.rules.rewrite(&url, *kind), expected);

            for other in ResourceKind::ALL.into_iter().filter(|k| k != kind) {
                prop_assert_eq!(compilation.rules.rewrite(&url, other), url.clone());
            }
        }
        // Every target is a CDN URL, so nothing is rewritten twice.
        prop_assert!(compilation.rules.rewritable_targets().is_empty());
    }

    // Compilation accounts for every entry, in declaration order
    #[test]
    fn rules_partition_entries(
        entries in prop::collection::vec(
            (prop::option::of("[a-z]{1,6}(\\.(js|css|png|txt))?"), prop::option::of("[a-z/]{1,10}(\\.(js|css|gif))?(:(image|js|x))?")),
            0..16,
        )
    ) {
        let maps = RawMaps::List(
            entries
                .into_iter()
                .map(|(local, cdn)| MapEntry { local, cdn, ..MapEntry::default() })
                .collect(),
        );
        let compilation = MappingCompiler::compile(&maps, &TaskDefaults::default());
        prop_assert_eq!(compilation.rules.len() + compilation.dropped.len(), maps.len());

        let indices: Vec<usize> = compilation.dropped.iter().map(|d| d.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        prop_assert_eq!(indices, sorted);
    }

    // URLs that are not local references are never rewritten
    #[test]
    fn rules_leave_remote_urls_alone(
        host in "[a-z]{1,10}",
        path in "[a-z/]{0,10}",
        kind in kind_strategy(),
    ) {
        let maps = RawMaps::List(vec![
            MapEntry::new(".*", "cdn/all.js").with_regex(true).with_src_type(kind.token()),
        ]);
        let rules = MappingCompiler::compile(&maps, &TaskDefaults::default()).rules;
        for url in [
            format!("http://{host}/{path}"),
            format!("//{host}/{path}"),
            format!("data:{host}"),
            String::new(),
        ] {
            prop_assert_eq!(rules.rewrite(&url, kind), url.clone());
        }
        prop_assert_eq!(rules.rewrite(&format!("{host}.x"), kind), "cdn/all.js");
    }

    // Only recognized markers are stripped, and only once
    #[test]
    fn rules_strip_marker_once(
        base in "[a-z/.]{0,12}",
        token in "(js|css|image|png|gif|jpeg|jpg|ico|bmp|svg|tif|x)",
    ) {
        let marked = format!("{base}:{token}");
        let stripped = strip_type_marker(&marked, ":");
        if ResourceKind::classify(&token).is_some() {
            prop_assert_eq!(stripped, base.as_str());
        } else {
            prop_assert_eq!(stripped, marked.as_str());
        }

        let double = format!("{base}:{token}:{token}");
        prop_assert!(strip_type_marker(&double, ":").len() >= marked.len());
    }
}
