//! Output file names.

use crate::Conversation;
use crate::config::{GROUP_PLACEHOLDER, NAME_PLACEHOLDER};

/// Characters that may not appear in a file name on any supported platform.
pub const INVALID_FILE_NAME_CHARS: &[char] = &['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

/// Replacement for every invalid character.
pub const SUBSTITUTE_CHAR: char = '-';

/// Substitutes `{Group}` and `{Name}` in `template`, then sanitizes the result.
///
/// # Example
///
/// ```
/// use qqtable::Conversation;
/// use qqtable::core::naming::render_file_name;
///
/// let c = Conversation::new("我的好友", "a/b", vec![]);
/// assert_eq!(render_file_name("{Group}-{Name}.csv", &c), "我的好友-a-b.csv");
/// ```
pub fn render_file_name(template: &str, conversation: &Conversation) -> String {
    let name = template
        .replace(GROUP_PLACEHOLDER, &conversation.group)
        .replace(NAME_PLACEHOLDER, &conversation.name);
    sanitize_file_name(&name)
}

/// Replaces every character illegal in a file name with [`SUBSTITUTE_CHAR`].
///
/// Control characters (U+0000 to U+001F) are illegal too. All other
/// characters, including non-ASCII, are kept.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_invalid(c) { SUBSTITUTE_CHAR } else { c })
        .collect()
}

fn is_invalid(c: char) -> bool {
    c < ' ' || INVALID_FILE_NAME_CHARS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_each_invalid_char() {
        assert_eq!(sanitize_file_name(r#"a"b<c>d|e:f*g?h\i/j"#), "a-b-c-d-e-f-g-h-i-j");
    }

    #[test]
    fn test_sanitize_control_chars() {
        assert_eq!(sanitize_file_name("a\tb\nc\0d"), "a-b-c-d");
    }

    #[test]
    fn test_sanitize_keeps_unicode_and_punctuation() {
        let name = "群聊（测试）🎉 [x] #1 .csv";
        assert_eq!(sanitize_file_name(name), name);
    }

    #[test]
    fn test_render_placeholders() {
        let c = Conversation::new("Friends", "Alice", vec![]);
        assert_eq!(render_file_name("{Group}-{Name}.csv", &c), "Friends-Alice.csv");
        assert_eq!(render_file_name("{Name}.csv", &c), "Alice.csv");
        assert_eq!(render_file_name("all.csv", &c), "all.csv");
    }

    #[test]
    fn test_render_sanitizes_after_substitution() {
        let c = Conversation::new("A:B", "C?", vec![]);
        assert_eq!(render_file_name("{Group}/{Name}.csv", &c), "A-B-C-.csv");
    }
}
