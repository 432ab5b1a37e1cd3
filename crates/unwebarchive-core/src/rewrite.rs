//! Best-effort lexical rewriting of extracted text resources.
//!
//! Markup and stylesheets saved from the network carry absolute references
//! (`http(s)://host/...`) that would leave the extracted tree. The rewriter
//! redirects them with targeted byte-level substitutions so they resolve
//! against the materialized layout (`host/path`). This is deliberately not
//! a parser: the substitutions tolerate malformed input, an unmatched
//! pattern is a no-op, and the component never fails.

use crate::OutputPath;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Markup attribute openings that embed an absolute origin. The match spans
/// from the opening quote through the scheme separator, so replacing it
/// with the bare attribute opening leaves `host/path...` behind.
static RE_HREF_ABS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?-u)href="[^=]*http[^=]*://"#).expect("valid href regex"));
static RE_SRC_ABS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?-u)src="[^=]*http[^=]*://"#).expect("valid src regex"));

/// Stylesheet `url(...)` references, quoted and unquoted. Replaced with a
/// two-levels-up prefix matching the usual `host/dir/file` asset depth.
static RE_CSS_URL_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)url\('[^)]*http[^)]*://").expect("valid css url regex"));
static RE_CSS_URL_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)url\([^')]*http[^')]*://").expect("valid css url regex"));

/// Literal local-file scheme occurrences in the entry page.
static RE_LOCAL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)file:///").expect("valid local ref regex"));

/// Extensions that are known binary/asset payloads; no rewriting attempted.
const ASSET_EXTENSIONS: [&str; 8] = ["png", "jpg", "gif", "svg", "woff", "woff2", "aspx", "js"];

/// How a resource's payload is treated before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    /// HTML markup; `href`/`src` absolute origins are stripped.
    Markup,
    /// CSS; absolute `url(...)` references are redirected upward.
    Stylesheet,
    /// Known asset type; never rewritten.
    Asset,
    /// Unrecognized extension; written unchanged, correctness not assured.
    Opaque,
}

/// Dispatches a resolved output path to its rewrite kind.
///
/// Only the extension decides, taken from the path portion of the final
/// component: anything after a `?` (a preserved query string) is ignored.
#[must_use]
pub fn kind_for(path: &OutputPath) -> RewriteKind {
    match dispatch_extension(path).as_deref() {
        Some("html" | "htm") => RewriteKind::Markup,
        Some("css") => RewriteKind::Stylesheet,
        Some(ext) if ASSET_EXTENSIONS.contains(&ext) => RewriteKind::Asset,
        _ => RewriteKind::Opaque,
    }
}

/// Lowercased extension of the final path component, query stripped.
fn dispatch_extension(path: &OutputPath) -> Option<String> {
    let name = path.as_path().file_name()?.to_string_lossy();
    let name = name.split('?').next().unwrap_or("");
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(name[idx + 1..].to_ascii_lowercase()),
        _ => None,
    }
}

/// Applies the substitutions for `kind` to `payload`.
///
/// Returns the possibly-rewritten bytes and whether anything changed.
/// [`RewriteKind::Asset`] and [`RewriteKind::Opaque`] payloads pass through
/// untouched.
#[must_use]
pub fn rewrite(kind: RewriteKind, payload: Vec<u8>) -> (Vec<u8>, bool) {
    let mut changed = false;
    let payload = match kind {
        RewriteKind::Markup => {
            let payload = apply(&RE_HREF_ABS, payload, b"href=\"", &mut changed);
            apply(&RE_SRC_ABS, payload, b"src=\"", &mut changed)
        }
        RewriteKind::Stylesheet => {
            let payload = apply(&RE_CSS_URL_QUOTED, payload, b"url('../../", &mut changed);
            apply(&RE_CSS_URL_BARE, payload, b"url(../../", &mut changed)
        }
        RewriteKind::Asset | RewriteKind::Opaque => payload,
    };
    (payload, changed)
}

/// Replaces every literal `file:///` with `./`.
///
/// Applied to the main record only: an entry page saved from disk
/// references its assets through the local-file scheme, and the extracted
/// tree sits next to the page.
#[must_use]
pub(crate) fn relativize_local_refs(payload: Vec<u8>) -> (Vec<u8>, bool) {
    let mut changed = false;
    let payload = apply(&RE_LOCAL_REF, payload, b"./", &mut changed);
    (payload, changed)
}

fn apply(re: &Regex, payload: Vec<u8>, replacement: &[u8], changed: &mut bool) -> Vec<u8> {
    match re.replace_all(&payload, replacement) {
        Cow::Borrowed(_) => payload,
        Cow::Owned(rewritten) => {
            *changed = true;
            rewritten
        }
    }
}
