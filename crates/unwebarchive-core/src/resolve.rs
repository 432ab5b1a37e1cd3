//! Locator resolution: original resource references to output paths.
//!
//! A locator is the reference stored in the container for each resource,
//! either file-style (`file:///css/site.css`) or network-style
//! (`https://host/css/site.css?v=2`). Resolution strips the scheme,
//! percent-decodes file-style remainders, validates the result into an
//! [`OutputPath`], and disambiguates collisions deterministically.

use crate::ExtractConfig;
use crate::OutputPath;
use crate::SkipReason;
use percent_encoding::percent_decode_str;
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashMap;

/// Canonical output name for the archive's entry page.
///
/// The main record always materializes here regardless of its literal
/// locator, so every extracted tree opens the same way.
pub const MAIN_RESOURCE_NAME: &str = "index.html";

const LOCAL_SCHEME: &str = "file://";
const NETWORK_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether a record is the entry page or one of its subresources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRole {
    /// The archive's single entry page.
    Main,
    /// Any resource referenced by the entry page.
    Subresource,
}

/// Per-run path planner.
///
/// Resolves locators to output paths while tracking every path already
/// claimed in this run, so two distinct locators never silently land on the
/// same file. The first claimant keeps the plain path; a later colliding
/// locator gets a short stable suffix derived from its own bytes, making
/// the layout reproducible across runs.
#[derive(Debug)]
pub struct PathPlanner<'a> {
    config: &'a ExtractConfig,
    claimed: HashMap<OutputPath, String>,
}

impl<'a> PathPlanner<'a> {
    /// Creates a planner with no claimed paths.
    #[must_use]
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self {
            config,
            claimed: HashMap::new(),
        }
    }

    /// Resolves a locator to a claimed, collision-free output path.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] describing why the resource cannot be
    /// materialized; the caller records the skip and moves on.
    pub fn plan(&mut self, role: ResourceRole, locator: &str) -> Result<OutputPath, SkipReason> {
        let candidate = match role {
            ResourceRole::Main => MAIN_RESOURCE_NAME.to_owned(),
            ResourceRole::Subresource => candidate_for(locator)?,
        };

        let path = OutputPath::validate(&candidate, self.config.max_path_depth)?;
        if self.claim(&path, locator) {
            return Ok(path);
        }

        let disambiguated = path.with_suffix(&locator_tag(locator));
        if self.claim(&disambiguated, locator) {
            tracing::debug!(
                locator,
                path = %disambiguated,
                "output path collision, applied stable suffix"
            );
            return Ok(disambiguated);
        }

        Err(SkipReason::CollisionUnresolvable)
    }

    /// Claims `path` for `locator`; false if already taken.
    fn claim(&mut self, path: &OutputPath, locator: &str) -> bool {
        if self.claimed.contains_key(path) {
            return false;
        }
        self.claimed.insert(path.clone(), locator.to_owned());
        true
    }

    /// Number of paths claimed so far.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}

/// Maps a subresource locator to its candidate relative path.
///
/// File-style locators lose the `file://` prefix and any leading slashes,
/// then percent-decode; network-style locators lose scheme and `://` and
/// keep the remainder verbatim, query string included. Anything else is an
/// unsupported scheme.
fn candidate_for(locator: &str) -> Result<String, SkipReason> {
    if let Some(rest) = strip_prefix_ignore_case(locator, LOCAL_SCHEME) {
        let rest = rest.trim_start_matches('/');
        return Ok(percent_decode_str(rest).decode_utf8_lossy().into_owned());
    }

    for scheme in NETWORK_SCHEMES {
        if let Some(rest) = strip_prefix_ignore_case(locator, scheme) {
            return Ok(rest.to_owned());
        }
    }

    Err(SkipReason::UnsupportedScheme)
}

/// ASCII-case-insensitive prefix strip, safe on multibyte input.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let n = prefix.len();
    if s.len() >= n && s.as_bytes()[..n].eq_ignore_ascii_case(prefix.as_bytes()) {
        Some(&s[n..])
    } else {
        None
    }
}

/// Short stable tag for collision suffixes: first four bytes of the
/// locator's SHA-256, hex-encoded.
fn locator_tag(locator: &str) -> String {
    let digest = Sha256::digest(locator.as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::Path;

    fn planner(config: &ExtractConfig) -> PathPlanner<'_> {
        PathPlanner::new(config)
    }

    #[test]
    fn test_main_always_canonical() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        let path = planner
            .plan(ResourceRole::Main, "file:///Some%20Saved%20Page.html")
            .unwrap();
        assert_eq!(path.as_path(), Path::new("index.html"));
    }

    #[test]
    fn test_file_scheme_stripped_and_decoded() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        let path = planner
            .plan(ResourceRole::Subresource, "file:///assets/logo%201.png")
            .unwrap();
        assert_eq!(path.as_path(), Path::new("assets/logo 1.png"));
    }

    #[test]
    fn test_network_scheme_stripped_query_kept() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        let path = planner
            .plan(ResourceRole::Subresource, "https://example.com/css/site.css?v=2")
            .unwrap();
        assert_eq!(path.as_path(), Path::new("example.com/css/site.css?v=2"));
    }

    #[test]
    fn test_scheme_matching_is_case_insensitive() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        let path = planner
            .plan(ResourceRole::Subresource, "HTTP://Example.com/a.png")
            .unwrap();
        assert_eq!(path.as_path(), Path::new("Example.com/a.png"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        assert_eq!(
            planner.plan(ResourceRole::Subresource, "ftp://host/x"),
            Err(SkipReason::UnsupportedScheme)
        );
        assert_eq!(
            planner.plan(ResourceRole::Subresource, "data:image/png;base64,AAAA"),
            Err(SkipReason::UnsupportedScheme)
        );
        // Scheme must match exactly, not merely start with "http".
        assert_eq!(
            planner.plan(ResourceRole::Subresource, "httpfoo://host/x"),
            Err(SkipReason::UnsupportedScheme)
        );
    }

    #[test]
    fn test_traversal_rejected() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        assert_eq!(
            planner.plan(ResourceRole::Subresource, "file:///../../etc/passwd"),
            Err(SkipReason::UnsafePath)
        );
        // Percent-encoded traversal decodes before validation.
        assert_eq!(
            planner.plan(ResourceRole::Subresource, "file:///%2e%2e/%2e%2e/etc/passwd"),
            Err(SkipReason::UnsafePath)
        );
    }

    #[test]
    fn test_empty_candidate_rejected() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        assert_eq!(
            planner.plan(ResourceRole::Subresource, "https://"),
            Err(SkipReason::UnsafePath)
        );
        assert_eq!(
            planner.plan(ResourceRole::Subresource, "file:///"),
            Err(SkipReason::UnsafePath)
        );
    }

    #[test]
    fn test_collision_gets_stable_suffix() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        let first = planner
            .plan(ResourceRole::Subresource, "http://a.example/logo.png")
            .unwrap();
        let second = planner
            .plan(ResourceRole::Subresource, "https://a.example/logo.png")
            .unwrap();

        assert_eq!(first.as_path(), Path::new("a.example/logo.png"));
        assert_ne!(first, second);
        let name = second.as_path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("logo-"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_collision_suffix_is_deterministic() {
        let config = ExtractConfig::default();

        let run = || {
            let mut planner = PathPlanner::new(&config);
            planner
                .plan(ResourceRole::Subresource, "http://a.example/logo.png")
                .unwrap();
            planner
                .plan(ResourceRole::Subresource, "https://a.example/logo.png")
                .unwrap()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_triple_collision_unresolvable() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        planner
            .plan(ResourceRole::Subresource, "http://a.example/logo.png")
            .unwrap();
        planner
            .plan(ResourceRole::Subresource, "https://a.example/logo.png")
            .unwrap();
        // Same locator again: plain path and suffixed path are both taken.
        assert_eq!(
            planner.plan(ResourceRole::Subresource, "https://a.example/logo.png"),
            Err(SkipReason::CollisionUnresolvable)
        );
    }

    #[test]
    fn test_main_collides_with_subresource() {
        let config = ExtractConfig::default();
        let mut planner = planner(&config);

        planner.plan(ResourceRole::Main, "file:///page.html").unwrap();
        let sub = planner
            .plan(ResourceRole::Subresource, "file:///index.html")
            .unwrap();
        assert_ne!(sub.as_path(), Path::new("index.html"));
    }

    #[test]
    fn test_locator_tag_shape() {
        let tag = locator_tag("https://a.example/logo.png");
        assert_eq!(tag.len(), 8);
        assert!(tag.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
