//! Ref namespace classification for label color-coding

use crate::ui::{Color, theme};

const TAG_PREFIX: &str = "refs/tags/";
const HEAD_PREFIX: &str = "refs/heads/";
const REMOTE_PREFIX: &str = "refs/remotes/";

/// Namespace a ref label belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefCategory {
    Tag,
    Head,
    Remote,
    Other,
}

impl RefCategory {
    /// Fill color of a label block in this namespace
    pub fn fill_color(self) -> Color {
        match self {
            RefCategory::Tag => theme::LABEL_TAG,
            RefCategory::Head => theme::LABEL_HEAD,
            RefCategory::Remote => theme::LABEL_REMOTE,
            RefCategory::Other => theme::LABEL_OTHER,
        }
    }

    /// Namespace prefix stripped from display names, if any
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            RefCategory::Tag => Some(TAG_PREFIX),
            RefCategory::Head => Some(HEAD_PREFIX),
            RefCategory::Remote => Some(REMOTE_PREFIX),
            RefCategory::Other => None,
        }
    }
}

/// Classify `name` by namespace and return the text to display.
///
/// Prefixes are tried in the order tags, heads, remotes; the first match is
/// stripped once. Anything else is `Other` and keeps its full name.
pub fn classify(name: &str) -> (RefCategory, &str) {
    if let Some(rest) = name.strip_prefix(TAG_PREFIX) {
        (RefCategory::Tag, rest)
    } else if let Some(rest) = name.strip_prefix(HEAD_PREFIX) {
        (RefCategory::Head, rest)
    } else if let Some(rest) = name.strip_prefix(REMOTE_PREFIX) {
        (RefCategory::Remote, rest)
    } else {
        (RefCategory::Other, name)
    }
}
