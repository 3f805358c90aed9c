//! Property-based tests for qqtable.
//!
//! These tests generate random exports to find edge cases.

use proptest::prelude::*;

use qqtable::core::{FilterConfig, apply_filters};
use qqtable::message::BodyJoin;
use qqtable::parser::{Diagnostic, GROUP_LABEL, RecordParser, SEPARATOR, SUBJECT_LABEL};

const PREAMBLE: &str = "消息记录\n\n";

/// A body line that can never be a header or a separator.
fn arb_body_line() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        String::new(),
        "   ".to_string(),
        "hello".to_string(),
        "你好，世界".to_string(),
        "a,b \"quoted\"".to_string(),
        "2023-01-05 9:30 no seconds".to_string(),
        "=".repeat(63),
        "🎉🔥 emoji".to_string(),
        "[图片]".to_string(),
    ])
}

fn arb_message() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        prop::sample::select(vec![
            "Alice".to_string(),
            "Bob".to_string(),
            "张三(10001)".to_string(),
            "我".to_string(),
        ]),
        prop::collection::vec(arb_body_line(), 0..5),
    )
}

/// A conversation block: group, name and messages (possibly none).
fn arb_block() -> impl Strategy<Value = (String, String, Vec<(String, Vec<String>)>)> {
    (
        prop::sample::select(vec![
            "我的好友".to_string(),
            "最近联系人".to_string(),
            "我的群聊".to_string(),
        ]),
        "[a-z]{1,8}",
        prop::collection::vec(arb_message(), 0..6),
    )
}

fn render(blocks: &[(String, String, Vec<(String, Vec<String>)>)]) -> String {
    let mut out = String::from(PREAMBLE);
    for (group, name, messages) in blocks {
        out.push_str(&format!(
            "{SEPARATOR}\n{GROUP_LABEL}{group}\n{SEPARATOR}\n{SUBJECT_LABEL}{name}\n{SEPARATOR}\n"
        ));
        for (i, (sender, body)) in messages.iter().enumerate() {
            out.push_str(&format!("2023-01-05 9:{:02}:00 {sender}\n", i % 60));
            for line in body {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn conversation_count_matches_non_empty_blocks(blocks in prop::collection::vec(arb_block(), 0..8)) {
        let input = render(&blocks);
        let conversations = RecordParser::new().parse_str(&input).unwrap();
        let expected = blocks.iter().filter(|(_, _, m)| !m.is_empty()).count();
        prop_assert_eq!(conversations.len(), expected);
    }

    #[test]
    fn messages_preserved_in_order(blocks in prop::collection::vec(arb_block(), 0..8)) {
        let input = render(&blocks);
        let conversations = RecordParser::new().parse_str(&input).unwrap();
        let non_empty: Vec<_> = blocks.iter().filter(|(_, _, m)| !m.is_empty()).collect();

        for (conversation, (group, name, messages)) in conversations.iter().zip(non_empty) {
            prop_assert_eq!(&conversation.group, group);
            prop_assert_eq!(&conversation.name, name);
            let senders: Vec<_> = conversation.messages.iter().map(|m| m.sender.clone()).collect();
            let expected: Vec<_> = messages.iter().map(|(s, _)| s.clone()).collect();
            prop_assert_eq!(senders, expected);
        }
    }

    #[test]
    fn content_never_ends_with_line_terminator(
        blocks in prop::collection::vec(arb_block(), 0..8),
        multi_lines in any::<bool>(),
    ) {
        let input = render(&blocks);
        let parser = RecordParser::with_body_join(BodyJoin::from_multi_lines(multi_lines));
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let conversations = parser.parse_str_with(&input, &mut diagnostics).unwrap();

        prop_assert!(diagnostics.is_empty());
        for message in conversations.iter().flat_map(|c| &c.messages) {
            prop_assert!(!message.content.ends_with('\n'));
            prop_assert!(!message.content.ends_with('\r'));
        }
    }

    #[test]
    fn single_line_content_has_no_newlines(blocks in prop::collection::vec(arb_block(), 0..8)) {
        let input = render(&blocks);
        let conversations = RecordParser::with_body_join(BodyJoin::Concat)
            .parse_str(&input)
            .unwrap();
        for message in conversations.iter().flat_map(|c| &c.messages) {
            prop_assert!(!message.content.contains('\n'));
        }
    }

    #[test]
    fn filters_preserve_order_and_drop_only_matches(
        blocks in prop::collection::vec(arb_block(), 0..8),
        ignore_empty in any::<bool>(),
        ignore_recent in any::<bool>(),
    ) {
        let input = render(&blocks);
        let conversations = RecordParser::new().parse_str(&input).unwrap();
        let config = FilterConfig::new()
            .with_ignore_empty(ignore_empty)
            .with_ignore_recent(ignore_recent);
        let filtered = apply_filters(conversations.clone(), &config);

        let expected: Vec<_> = conversations
            .iter()
            .filter(|c| !(ignore_recent && c.is_recent_contacts()))
            .map(|c| c.name.clone())
            .collect();
        let names: Vec<_> = filtered.iter().map(|c| c.name.clone()).collect();
        prop_assert_eq!(names, expected);

        for conversation in &filtered {
            if ignore_empty {
                prop_assert!(conversation.messages.iter().all(|m| !m.content.is_empty()));
            }
        }
    }
}
