//! Mention display-name rewriting.
//!
//! Rewrites `@username` tokens to the configured display form. The text is
//! first split into prose and inline-code segments; code segments pass
//! through untouched, so `` `@channel` `` style escapes survive
//! byte-identical. Special mentions (channel, all, here) are never
//! rewritten, and matching is whole-token: `user@example.com` contains no
//! mention.

use std::collections::HashMap;

use chathub_core::config::push::NameFormat;
use chathub_core::types::id::UserId;
use chathub_entity::User;

/// Mention tokens with channel-wide meaning; never rewritten.
const SPECIAL_MENTIONS: [&str; 3] = ["channel", "all", "here"];

/// A piece of message text.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// Prose; mention tokens inside are candidates for rewriting.
    Text(&'a str),
    /// An inline-code span including its backticks; opaque.
    Code(&'a str),
}

/// Split a message into prose and inline-code segments.
///
/// An inline-code span is a single backtick pair; an unmatched backtick is
/// plain prose.
fn segment_inline_code(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = input;
    while let Some(open) = rest.find('`') {
        match rest[open + 1..].find('`') {
            Some(close_rel) => {
                let close = open + 1 + close_rel;
                if open > 0 {
                    segments.push(Segment::Text(&rest[..open]));
                }
                segments.push(Segment::Code(&rest[open..=close]));
                rest = &rest[close + 1..];
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// Find the member display name for a mention token.
///
/// Usernames may end in `.`/`-`/`_`, but so may sentences; on a lookup
/// miss, trailing punctuation is trimmed one character at a time and the
/// lookup retried. Returns the matched source length and the display name.
fn lookup<'a>(token: &str, names: &'a HashMap<String, String>) -> Option<(usize, &'a str)> {
    let mut candidate = token;
    while !candidate.is_empty() {
        let lower = candidate.to_lowercase();
        if SPECIAL_MENTIONS.contains(&lower.as_str()) {
            return None;
        }
        if let Some(display) = names.get(&lower) {
            return Some((candidate.len(), display));
        }
        match candidate.char_indices().next_back() {
            Some((idx, '.' | '-' | '_')) => candidate = &candidate[..idx],
            _ => return None,
        }
    }
    None
}

/// Rewrite mention tokens in one prose segment into `out`.
fn rewrite_segment(out: &mut String, text: &str, names: &HashMap<String, String>) {
    let mut prev: Option<char> = None;
    let mut i = 0;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap_or('\0');
        let at_boundary = prev.map_or(true, |p| !is_username_char(p));
        if c == '@' && at_boundary {
            let token_start = i + 1;
            let token_end = text[token_start..]
                .find(|ch| !is_username_char(ch))
                .map(|offset| token_start + offset)
                .unwrap_or(text.len());
            let token = &text[token_start..token_end];
            if let Some((matched_len, display)) = lookup(token, names) {
                out.push('@');
                out.push_str(display);
                i = token_start + matched_len;
                prev = token[..matched_len].chars().next_back();
                continue;
            }
        }
        out.push(c);
        prev = Some(c);
        i += c.len_utf8();
    }
}

/// Rewrite `@username` mentions to the configured display form.
///
/// The `Username` format is the identity transform. Unknown usernames are
/// left untouched; every occurrence of a known one is rewritten.
pub fn rewrite_mentions(
    message: &str,
    members: &HashMap<UserId, User>,
    format: NameFormat,
) -> String {
    if format == NameFormat::Username || message.is_empty() {
        return message.to_string();
    }

    let names: HashMap<String, String> = members
        .values()
        .map(|user| (user.username.to_lowercase(), user.display_name(format)))
        .collect();

    let mut out = String::with_capacity(message.len());
    for segment in segment_inline_code(message) {
        match segment {
            Segment::Code(code) => out.push_str(code),
            Segment::Text(text) => rewrite_segment(&mut out, text, &names),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(username: &str, first: &str, last: &str, nickname: &str) -> User {
        let mut user = User::new(username);
        user.first_name = first.to_string();
        user.last_name = last.to_string();
        user.nickname = nickname.to_string();
        user
    }

    fn channel_members() -> HashMap<UserId, User> {
        [
            member("testuser1", "John", "Doe", "JD"),
            member("testuser2", "Jane", "Smith", "JS"),
            member("testuser3", "Bob", "Johnson", ""),
            member("channel", "Channel", "User", ""),
        ]
        .into_iter()
        .map(|user| (user.id, user))
        .collect()
    }

    fn rewrite(message: &str, format: NameFormat) -> String {
        rewrite_mentions(message, &channel_members(), format)
    }

    #[test]
    fn test_username_format_is_identity() {
        assert_eq!(
            rewrite("Hello @testuser1 and @testuser2", NameFormat::Username),
            "Hello @testuser1 and @testuser2"
        );
    }

    #[test]
    fn test_full_name_format() {
        assert_eq!(
            rewrite("Hello @testuser1 and @testuser2", NameFormat::FullName),
            "Hello @John Doe and @Jane Smith"
        );
    }

    #[test]
    fn test_nickname_format() {
        assert_eq!(
            rewrite("Hello @testuser1 and @testuser2", NameFormat::NicknameFullName),
            "Hello @JD and @JS"
        );
    }

    #[test]
    fn test_nickname_format_falls_back_to_full_name() {
        assert_eq!(
            rewrite("Hello @testuser3", NameFormat::NicknameFullName),
            "Hello @Bob Johnson"
        );
    }

    #[test]
    fn test_special_mentions_never_rewritten() {
        assert_eq!(rewrite("Hello @channel", NameFormat::FullName), "Hello @channel");
        assert_eq!(rewrite("Hello @all", NameFormat::FullName), "Hello @all");
        assert_eq!(rewrite("Hello @here", NameFormat::FullName), "Hello @here");
    }

    #[test]
    fn test_mixed_user_and_special_mentions() {
        assert_eq!(
            rewrite("@testuser1 mentioned @channel and @testuser2", NameFormat::FullName),
            "@John Doe mentioned @channel and @Jane Smith"
        );
    }

    #[test]
    fn test_unknown_user_untouched() {
        assert_eq!(
            rewrite("Hello @unknownuser", NameFormat::FullName),
            "Hello @unknownuser"
        );
    }

    #[test]
    fn test_inline_code_is_byte_identical() {
        assert_eq!(
            rewrite("Use `@channel` to mention everyone", NameFormat::FullName),
            "Use `@channel` to mention everyone"
        );
        assert_eq!(
            rewrite("Example: `@testuser1` or `@all`", NameFormat::FullName),
            "Example: `@testuser1` or `@all`"
        );
        assert_eq!(
            rewrite("Syntax: `@channel`, `@all`, `@here`", NameFormat::FullName),
            "Syntax: `@channel`, `@all`, `@here`"
        );
    }

    #[test]
    fn test_mixed_escaped_and_unescaped_mentions() {
        assert_eq!(
            rewrite("@testuser1 said use `@channel` not @all", NameFormat::FullName),
            "@John Doe said use `@channel` not @all"
        );
        assert_eq!(
            rewrite(
                "Use `@testuser1` or contact @testuser2 directly, not `@all`",
                NameFormat::FullName
            ),
            "Use `@testuser1` or contact @Jane Smith directly, not `@all`"
        );
    }

    #[test]
    fn test_code_span_at_start_and_end() {
        assert_eq!(
            rewrite("`@all` means everyone, @testuser1", NameFormat::FullName),
            "`@all` means everyone, @John Doe"
        );
        assert_eq!(
            rewrite("@testuser1 use `@here`", NameFormat::FullName),
            "@John Doe use `@here`"
        );
    }

    #[test]
    fn test_mention_inside_code_with_surrounding_words() {
        assert_eq!(
            rewrite("Example: `use @testuser1` and @testuser1 will see", NameFormat::FullName),
            "Example: `use @testuser1` and @John Doe will see"
        );
    }

    #[test]
    fn test_mention_at_start_and_end_of_message() {
        assert_eq!(rewrite("@testuser1 hello", NameFormat::FullName), "@John Doe hello");
        assert_eq!(rewrite("hello @testuser1", NameFormat::FullName), "hello @John Doe");
    }

    #[test]
    fn test_multiple_occurrences_all_rewritten() {
        assert_eq!(
            rewrite("@testuser1 and @testuser1 again", NameFormat::FullName),
            "@John Doe and @John Doe again"
        );
    }

    #[test]
    fn test_mention_with_punctuation() {
        assert_eq!(
            rewrite("Hi @testuser1! How are you @testuser2?", NameFormat::FullName),
            "Hi @John Doe! How are you @Jane Smith?"
        );
    }

    #[test]
    fn test_trailing_period_is_not_part_of_the_mention() {
        assert_eq!(
            rewrite("ping @testuser1.", NameFormat::FullName),
            "ping @John Doe."
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert_eq!(
            rewrite("Hello @TestUser1 and @TESTUSER2", NameFormat::FullName),
            "Hello @John Doe and @Jane Smith"
        );
    }

    #[test]
    fn test_empty_and_mention_free_messages() {
        assert_eq!(rewrite("", NameFormat::FullName), "");
        assert_eq!(
            rewrite("This is a regular message without any mentions", NameFormat::FullName),
            "This is a regular message without any mentions"
        );
    }

    #[test]
    fn test_email_address_is_not_a_mention() {
        assert_eq!(
            rewrite("Email: user@example.com", NameFormat::FullName),
            "Email: user@example.com"
        );
    }

    #[test]
    fn test_unmatched_backtick_is_prose() {
        assert_eq!(
            rewrite("stray ` then @testuser1", NameFormat::FullName),
            "stray ` then @John Doe"
        );
    }

    #[test]
    fn test_segmenter() {
        assert_eq!(
            segment_inline_code("a `b` c"),
            vec![
                Segment::Text("a "),
                Segment::Code("`b`"),
                Segment::Text(" c"),
            ]
        );
        assert_eq!(segment_inline_code("`b`"), vec![Segment::Code("`b`")]);
        assert_eq!(segment_inline_code("a ` b"), vec![Segment::Text("a ` b")]);
    }
}
