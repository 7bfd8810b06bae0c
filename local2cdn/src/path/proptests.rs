//! Property-based tests for slash normalization.

use super::normalize::{join_prefix, normalize, normalize_url};
use proptest::prelude::*;

// Strategy for path-like strings mixing separators
fn messy_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof!["[a-z0-9_.-]{1,8}", Just("/".to_string()), Just("\\".to_string())],
        0..16,
    )
    .prop_map(|parts| parts.concat())
}

fn scheme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("http:".to_string()),
        Just("https:".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Normalization is idempotent
    #[test]
    fn normalize_idempotent(path in messy_path_strategy()) {
        let once = normalize(&path);
        prop_assert_eq!(normalize(&once), once);
    }

    // Normalized output never contains a backslash or a doubled slash
    #[test]
    fn normalize_output_is_clean(path in messy_path_strategy()) {
        let out = normalize(&path);
        prop_assert!(!out.contains('\\'));
        prop_assert!(!out.contains("//"));
    }

    // The protocol part survives and the remainder is clean
    #[test]
    fn normalize_url_keeps_protocol(
        scheme in scheme_strategy(),
        host in "[a-z]{1,10}\\.[a-z]{2,3}",
        path in messy_path_strategy()
    ) {
        let url = format!("{scheme}//{host}/{path}");
        let out = normalize_url(&url);
        let expected_prefix = format!("{scheme}//{host}");
        prop_assert!(out.starts_with(&expected_prefix));
        prop_assert!(!out[scheme.len() + 2..].contains("//"));
    }

    // Joining with an empty prefix is the identity
    #[test]
    fn join_empty_prefix_identity(path in messy_path_strategy()) {
        prop_assert_eq!(join_prefix("", &path), path);
    }
}
