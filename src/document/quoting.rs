//! Pre/post-processing for Concourse-style `{{token}}` templating.
//!
//! Concourse pipelines embed `{{parameter}}` tokens that are not valid
//! YAML flow syntax. When enabled, the loader wraps each token in double
//! quotes before decoding so the parser sees an opaque string, and the
//! writer strips those quotes from the final output. Both transforms are
//! textual and symmetric; the merge and resolve stages never see them.

use std::sync::LazyLock;

use regex::Regex;
use regex::bytes::Regex as BytesRegex;

const TOKEN: &str = r"\{\{[-\w]+\}\}";

static QUOTE_RE: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(&format!("({TOKEN})")).expect("templating token pattern is valid")
});

static DEQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("['\"]({TOKEN})[\"']")).expect("templating token pattern is valid")
});

/// Wrap every `{{token}}` occurrence in double quotes.
///
/// Applied to raw bytes before YAML decoding.
#[must_use]
pub fn quote_templating(input: &[u8]) -> Vec<u8> {
    QUOTE_RE.replace_all(input, &b"\"$1\""[..]).into_owned()
}

/// Strip the quotes [`quote_templating`] added.
///
/// Applied to the encoded output text. Accepts either quote style, since
/// the YAML writer chooses its own.
#[must_use]
pub fn dequote_templating(output: &str) -> String {
    DEQUOTE_RE.replace_all(output, "$1").into_owned()
}
