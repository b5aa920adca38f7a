// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content normalization for inbound Discord messages.
//!
//! The NLU service expects plain text, so emoji and Discord's `<...>`
//! markup (user/role/channel mentions, custom emoji, timestamps) are
//! stripped before relaying.

use std::sync::LazyLock;

use regex::Regex;

/// Discord inline markup: `<@123>`, `<#456>`, `<:name:789>`, `<t:...>`.
/// Tags never span lines.
static MARKUP_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^\n>]*>").expect("markup tag pattern is valid"));

/// Pictographic emoji plus the joiners and modifiers that travel with
/// them (ZWJ sequences, variation selectors, skin tones, keycap combiner).
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\u{FE0F}\u{200D}\u{20E3}\u{1F3FB}-\u{1F3FF}]")
        .expect("emoji pattern is valid")
});

/// Strips emoji and Discord markup, returning trimmed plain text.
pub fn normalize_content(raw: &str) -> String {
    let without_emoji = EMOJI.replace_all(raw, "");
    let without_tags = MARKUP_TAGS.replace_all(&without_emoji, "");
    without_tags.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(normalize_content("what are your hours?"), "what are your hours?");
    }

    #[test]
    fn user_and_channel_mentions_are_stripped() {
        assert_eq!(
            normalize_content("<@111> check <#222> please"),
            "check  please"
        );
    }

    #[test]
    fn custom_emoji_tags_are_stripped() {
        assert_eq!(normalize_content("hi <:wave:12345>"), "hi");
    }

    #[test]
    fn unicode_emoji_are_stripped() {
        assert_eq!(normalize_content("hello 😀🎉"), "hello");
        assert_eq!(normalize_content("thumbs 👍🏽 up"), "thumbs  up");
    }

    #[test]
    fn tags_do_not_span_lines() {
        let input = "a <\nb> c";
        assert_eq!(normalize_content(input), "a <\nb> c");
    }

    #[test]
    fn emoji_only_message_normalizes_to_empty() {
        assert_eq!(normalize_content("🎉🎉🎉"), "");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_content("  spaced out  "), "spaced out");
    }
}
