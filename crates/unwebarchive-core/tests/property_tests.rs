//! Property-based tests for resolver and rewriter invariants.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use unwebarchive_core::ExtractConfig;
use unwebarchive_core::PathPlanner;
use unwebarchive_core::ResourceRole;
use unwebarchive_core::RewriteKind;
use unwebarchive_core::rewrite;

proptest! {
    /// Content without an absolute-origin reference is returned unchanged,
    /// for both rewritable kinds.
    #[test]
    fn rewrite_is_idempotent_without_targets(content in "[ -~]{0,200}") {
        prop_assume!(!content.contains("http"));

        let bytes = content.into_bytes();

        let (out, changed) = rewrite::rewrite(RewriteKind::Markup, bytes.clone());
        prop_assert!(!changed);
        prop_assert_eq!(&out, &bytes);

        let (out, changed) = rewrite::rewrite(RewriteKind::Stylesheet, bytes.clone());
        prop_assert!(!changed);
        prop_assert_eq!(&out, &bytes);
    }

    /// Asset and opaque payloads are never touched, whatever they contain.
    #[test]
    fn non_rewritable_kinds_pass_through(payload in prop::collection::vec(any::<u8>(), 0..256)) {
        let (out, changed) = rewrite::rewrite(RewriteKind::Asset, payload.clone());
        prop_assert!(!changed);
        prop_assert_eq!(&out, &payload);

        let (out, changed) = rewrite::rewrite(RewriteKind::Opaque, payload.clone());
        prop_assert!(!changed);
        prop_assert_eq!(&out, &payload);
    }

    /// A file-scheme locator resolves to exactly its prefix-stripped path.
    #[test]
    fn file_locators_strip_to_their_path(segments in prop::collection::vec("[a-z0-9]{1,8}", 1..4)) {
        let joined = segments.join("/");
        let locator = format!("file:///{joined}");

        let config = ExtractConfig::default();
        let mut planner = PathPlanner::new(&config);
        let path = planner.plan(ResourceRole::Subresource, &locator).unwrap();

        prop_assert_eq!(path.as_path(), Path::new(&joined));
    }

    /// A network locator resolves to `host/path` with the scheme stripped.
    #[test]
    fn network_locators_strip_to_host_and_path(
        host in "[a-z]{1,10}\\.(com|org|test)",
        segments in prop::collection::vec("[a-z0-9]{1,8}", 1..4),
    ) {
        let joined = segments.join("/");
        let locator = format!("https://{host}/{joined}");

        let config = ExtractConfig::default();
        let mut planner = PathPlanner::new(&config);
        let path = planner.plan(ResourceRole::Subresource, &locator).unwrap();

        let expected = format!("{host}/{joined}");
        prop_assert_eq!(path.as_path(), Path::new(&expected));
    }

    /// Distinct locators planned in one run never land on the same path.
    #[test]
    fn planned_paths_are_unique_per_run(names in prop::collection::hash_set("[a-z]{1,10}", 1..20)) {
        let config = ExtractConfig::default();
        let mut planner = PathPlanner::new(&config);
        let mut seen = HashSet::new();

        for name in &names {
            let locator = format!("file:///{name}.bin");
            let path = planner.plan(ResourceRole::Subresource, &locator).unwrap();
            prop_assert!(seen.insert(path.into_path_buf()), "duplicate path for {}", locator);
        }

        prop_assert_eq!(planner.claimed_count(), names.len());
    }
}
