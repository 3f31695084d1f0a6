//! Inline notes on `removed_cols` entries.
//!
//! YAML parsers drop comments, so the notes written next to removed columns
//! (`- dPwgt1  # sampling weight`) are recovered with a line scan of the
//! source text. Only the block-sequence form under `features.removed_cols`
//! is scanned; flow sequences carry no notes.

use std::collections::HashMap;

/// Map each annotated removed column to its note.
pub fn removed_notes(text: &str) -> HashMap<String, String> {
    let mut notes = HashMap::new();

    // Inside the top-level `features:` block?
    let mut in_features = false;
    // Indent of the `removed_cols:` key while its items are being read.
    let mut list_indent: Option<usize> = None;

    for line in text.lines() {
        let (content, _) = split_comment(line);
        if content.trim().is_empty() {
            continue;
        }
        let indent = indent_of(line);

        if indent == 0 {
            in_features = is_block_key(content, "features");
            list_indent = None;
            continue;
        }
        if !in_features {
            continue;
        }

        if let Some(key_indent) = list_indent {
            let trimmed = content.trim_start();
            let is_item = trimmed == "-" || trimmed.starts_with("- ");
            if is_item && indent >= key_indent {
                if let Some((name, note)) = parse_item(line.trim_start()) {
                    notes.insert(name, note);
                }
                continue;
            }
            list_indent = None;
        }

        if is_block_key(content.trim_start(), "removed_cols") {
            list_indent = Some(indent);
        }
    }

    notes
}

/// `key:` with nothing after the colon (the value is a block below).
fn is_block_key(content: &str, key: &str) -> bool {
    content
        .trim_end()
        .strip_prefix(key)
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
        .is_some_and(|rest| rest.trim().is_empty())
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// `- name  # note` -> `(name, note)` when the note is non-empty.
fn parse_item(item: &str) -> Option<(String, String)> {
    let body = item.strip_prefix('-')?.trim_start();
    let (value, comment) = split_comment(body);
    let note = normalize_note(comment?)?;
    let name = unquote(value.trim());
    if name.is_empty() {
        return None;
    }
    Some((name, note))
}

/// Split a line into content and trailing comment, respecting quotes.
///
/// A `#` starts a comment only at the start of the text or after whitespace;
/// a quote opens a quoted scalar only in the same positions (`O'Brien` is plain).
fn split_comment(line: &str) -> (&str, Option<&str>) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev_is_space = true;

    for (i, ch) in line.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if ch == '\\' => escaped = true,
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if (ch == '"' || ch == '\'') && prev_is_space => quote = Some(ch),
            None if ch == '#' && prev_is_space => {
                return (&line[..i], Some(&line[i + 1..]));
            }
            None => {}
        }
        prev_is_space = ch.is_whitespace();
    }

    (line, None)
}

/// Notes live in trailing comments: one line, trimmed, never empty.
pub(crate) fn normalize_note(note: &str) -> Option<String> {
    let note = note.replace(['\r', '\n'], " ");
    let note = note.trim();
    (!note.is_empty()).then(|| note.to_string())
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return serde_json::from_str::<String>(value)
            .unwrap_or_else(|_| value[1..value.len() - 1].to_string());
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].replace("''", "'");
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_notes_from_block_list() {
        let text = "\
features:
  binary_cols:
    - iSex  # not a removed column
  removed_cols:
    - caseid  # row identifier
    - dIncome5
    - dPwgt1 #sampling weight
    # standalone comment
    - \"odd # name\"  # quoted
  categorical_cols:
    - iClass  # verified
model:
  removed_cols:
    - other  # outside features
";
        let notes = removed_notes(text);
        assert_eq!(notes.len(), 3);
        assert_eq!(notes["caseid"], "row identifier");
        assert_eq!(notes["dPwgt1"], "sampling weight");
        assert_eq!(notes["odd # name"], "quoted");
        assert!(!notes.contains_key("dIncome5"));
        assert!(!notes.contains_key("iSex"));
        assert!(!notes.contains_key("iClass"));
        assert!(!notes.contains_key("other"));
    }

    #[test]
    fn accepts_sequence_at_key_indent() {
        let text = "features:\n  removed_cols:\n  - caseid  # id\n  hour_col: dHour89\n";
        let notes = removed_notes(text);
        assert_eq!(notes["caseid"], "id");
    }

    #[test]
    fn flow_sequence_has_no_notes() {
        let text = "features:\n  removed_cols: [caseid, dPwgt1]  # all of them\n";
        assert!(removed_notes(text).is_empty());
    }

    #[test]
    fn hash_inside_word_is_not_a_comment() {
        assert_eq!(split_comment("col#1"), ("col#1", None));
        assert_eq!(split_comment("col #1"), ("col ", Some("1")));
        assert_eq!(split_comment("'a # b' # c"), ("'a # b' ", Some(" c")));
    }

    #[test]
    fn apostrophe_inside_plain_name_is_not_a_quote() {
        assert_eq!(split_comment("O'Brien  # surname"), ("O'Brien  ", Some(" surname")));
        let text = "features:\n  removed_cols:\n    - O'Brien  # surname column\n    - say\"hi\"  # odd\n";
        let notes = removed_notes(text);
        assert_eq!(notes["O'Brien"], "surname column");
        assert_eq!(notes["say\"hi\""], "odd");
    }

    #[test]
    fn notes_are_single_line_and_non_empty() {
        assert_eq!(normalize_note("  confounding:\nincome  ").as_deref(), Some("confounding: income"));
        assert_eq!(normalize_note("keep  inner  spacing").as_deref(), Some("keep  inner  spacing"));
        assert_eq!(normalize_note("   "), None);
    }

    #[test]
    fn single_quoted_names_are_unquoted() {
        assert_eq!(unquote("'it''s'"), "it's");
        assert_eq!(unquote("\"a\\\"b\""), "a\"b");
        assert_eq!(unquote("plain"), "plain");
    }
}
