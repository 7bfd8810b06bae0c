//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, MapEntry, RawMaps};
use proptest::prelude::*;

// Strategy for generating map entries with optional overrides
fn map_entry_strategy() -> impl Strategy<Value = MapEntry> {
    (
        "[a-z]{1,8}\\.(js|css|png)",
        "[a-z/]{1,12}\\.min\\.(js|css|png)",
        prop::option::of("(https?:)?//[a-z]{1,8}\\.com"),
        prop::option::of(any::<bool>()),
        prop::option::of("(js|css|image)"),
        prop::option::of("[:@#$]{1,3}"),
    )
        .prop_map(|(local, cdn, prefix, regex, src_type, separator)| MapEntry {
            local: Some(local),
            cdn: Some(cdn),
            prefix,
            regex,
            src_type,
            separator,
            invalid: None,
        })
}

fn raw_maps_strategy() -> impl Strategy<Value = RawMaps> {
    prop_oneof![
        // Object keys are unique, so derive them from the position
        prop::collection::vec("[a-z/]{1,12}\\.js", 0..6).prop_map(|cdns| {
            RawMaps::object(
                cdns.into_iter()
                    .enumerate()
                    .map(|(i, cdn)| (format!("m{i}.js"), cdn)),
            )
        }),
        prop::collection::vec(map_entry_strategy(), 0..6).prop_map(RawMaps::List),
    ]
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(raw_maps_strategy()),
        prop::option::of("(https?:)?//[a-z]{1,8}\\.com/"),
        prop::option::of(any::<bool>()),
        prop::option::of("[:@#$]{1,3}"),
    )
        .prop_map(|(maps, prefix, regex, separator)| Config {
            maps,
            prefix,
            regex,
            separator,
            files: None,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Set fields of the higher-precedence source always win
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(&merged.maps, if high.maps.is_some() { &high.maps } else { &low.maps });
        prop_assert_eq!(&merged.prefix, if high.prefix.is_some() { &high.prefix } else { &low.prefix });
        prop_assert_eq!(merged.regex, high.regex.or(low.regex));
        prop_assert_eq!(
            &merged.separator,
            if high.separator.is_some() { &high.separator } else { &low.separator }
        );
    }

    // Merging a config into itself changes nothing
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Serializing and re-reading keeps the shape and declaration order
    #[test]
    fn config_yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, config);
    }

    // Task defaults always carry a usable separator
    #[test]
    fn config_defaults_separator_never_empty(config in config_strategy()) {
        prop_assert!(!config.defaults().separator.is_empty());
    }
}
