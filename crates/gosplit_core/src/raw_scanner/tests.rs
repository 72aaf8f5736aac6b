use super::*;
use crate::SourceBuffer;
use pretty_assertions::assert_eq;

/// Helper: scan a script and collect all tokens (excluding Eof).
fn scan(source: &str) -> Vec<RawToken> {
    tokenize(source)
}

/// Helper: scan and return tags only.
fn scan_tags(source: &str) -> Vec<RawTag> {
    scan(source).iter().map(|t| t.tag).collect()
}

/// Helper: scan and return `(tag, text)` pairs.
fn scan_texts(source: &str) -> Vec<(RawTag, &str)> {
    let mut pos = 0usize;
    scan(source)
        .into_iter()
        .map(|t| {
            let end = pos + t.len as usize;
            let text = &source[pos..end];
            pos = end;
            (t.tag, text)
        })
        .collect()
}

// ─── Invariants ────────────────────────────────────────────────

#[test]
fn total_len_equals_source_len() {
    let sources = [
        "",
        "GO",
        "SELECT 1\nGO\nSELECT 2",
        "SELECT 'it''s' AS [a]]b]",
        "/* GO */ -- GO\r\n",
        "[unterminated",
        "'unterminated",
        "/* unterminated",
        "a\0b",
    ];
    for source in sources {
        let total_len: u32 = scan(source).iter().map(|t| t.len).sum();
        assert_eq!(
            total_len,
            u32::try_from(source.len()).expect("test source fits in u32"),
            "total token length mismatch for {source:?}",
        );
    }
}

#[test]
fn every_token_has_positive_length() {
    let sources = ["SELECT 1;", "'x' [y] /*z*/ --w", " \t\n\r\n\r", "-/*"];
    for source in sources {
        for tok in scan(source) {
            assert!(tok.len > 0, "zero-length token {tok:?} in {source:?}");
        }
    }
}

#[test]
fn repeated_eof_returns_eof() {
    let buf = SourceBuffer::new("GO");
    let mut scanner = RawScanner::new(buf.cursor());
    assert_eq!(scanner.next_token().tag, RawTag::Word);
    for _ in 0..3 {
        let tok = scanner.next_token();
        assert_eq!(tok.tag, RawTag::Eof);
        assert_eq!(tok.len, 0);
    }
}

#[test]
fn pos_tracks_token_starts() {
    let buf = SourceBuffer::new("GO;\n");
    let mut scanner = RawScanner::new(buf.cursor());
    assert_eq!(scanner.pos(), 0);
    scanner.next_token();
    assert_eq!(scanner.pos(), 2);
    scanner.next_token();
    assert_eq!(scanner.pos(), 3);
}

#[test]
fn empty_source() {
    assert!(scan("").is_empty());
}

#[test]
fn all_ascii_bytes_scan_to_completion() {
    for byte in 0u8..=127 {
        let source = String::from(char::from(byte));
        let tokens = scan(&source);
        let total: u32 = tokens.iter().map(|t| t.len).sum();
        assert_eq!(total, 1, "byte {byte:#04x} not fully consumed");
    }
}

// ─── Whitespace & Newlines ─────────────────────────────────────

#[test]
fn whitespace_run_is_one_token() {
    assert_eq!(scan_texts(" \t \x0C"), vec![(RawTag::Whitespace, " \t \x0C")]);
}

#[test]
fn newline_lf() {
    assert_eq!(scan_tags("\n\n"), vec![RawTag::Newline, RawTag::Newline]);
}

#[test]
fn newline_crlf_normalized() {
    assert_eq!(scan_texts("\r\n"), vec![(RawTag::Newline, "\r\n")]);
}

#[test]
fn lone_cr_is_whitespace() {
    assert_eq!(scan_tags("\rGO"), vec![RawTag::Whitespace, RawTag::Word]);
}

// ─── Words ─────────────────────────────────────────────────────

#[test]
fn words_and_punctuation() {
    assert_eq!(
        scan_texts("SELECT @x, #t.$col"),
        vec![
            (RawTag::Word, "SELECT"),
            (RawTag::Whitespace, " "),
            (RawTag::Word, "@x"),
            (RawTag::Punct, ","),
            (RawTag::Whitespace, " "),
            (RawTag::Word, "#t"),
            (RawTag::Punct, "."),
            (RawTag::Word, "$col"),
        ]
    );
}

#[test]
fn keyword_prefix_stays_in_word() {
    assert_eq!(scan_texts("GOVERNMENT"), vec![(RawTag::Word, "GOVERNMENT")]);
    assert_eq!(scan_texts("GO_1"), vec![(RawTag::Word, "GO_1")]);
}

#[test]
fn non_ascii_stays_in_word() {
    assert_eq!(scan_texts("GO\u{e9}"), vec![(RawTag::Word, "GO\u{e9}")]);
}

#[test]
fn semicolon_is_its_own_token() {
    assert_eq!(
        scan_tags("GO;"),
        vec![RawTag::Word, RawTag::Semicolon]
    );
}

#[test]
fn interior_null_is_a_token() {
    assert_eq!(
        scan_tags("a\0b"),
        vec![RawTag::Word, RawTag::InteriorNull, RawTag::Word]
    );
}

// ─── Comments ──────────────────────────────────────────────────

#[test]
fn line_comment() {
    assert_eq!(
        scan_texts("-- GO\nx"),
        vec![
            (RawTag::LineComment, "-- GO"),
            (RawTag::Newline, "\n"),
            (RawTag::Word, "x"),
        ]
    );
}

#[test]
fn line_comment_directly_after_word() {
    assert_eq!(
        scan_texts("GO--Dummy comment"),
        vec![(RawTag::Word, "GO"), (RawTag::LineComment, "--Dummy comment")]
    );
}

#[test]
fn single_minus_is_punct() {
    assert_eq!(
        scan_tags("1-2"),
        vec![RawTag::Word, RawTag::Punct, RawTag::Word]
    );
}

#[test]
fn block_comment_spans_lines() {
    assert_eq!(
        scan_texts("/*\nGO\n*/x"),
        vec![(RawTag::BlockComment, "/*\nGO\n*/"), (RawTag::Word, "x")]
    );
}

#[test]
fn block_comment_with_stars() {
    assert_eq!(scan_texts("/** x **/"), vec![(RawTag::BlockComment, "/** x **/")]);
}

#[test]
fn block_comments_do_not_nest() {
    assert_eq!(
        scan_texts("/* /* */ */"),
        vec![
            (RawTag::BlockComment, "/* /* */"),
            (RawTag::Whitespace, " "),
            (RawTag::Punct, "*"),
            (RawTag::Punct, "/"),
        ]
    );
}

#[test]
fn unterminated_block_comment_extends_to_eof() {
    assert_eq!(
        scan_texts("/* GO\nGO"),
        vec![(RawTag::UnterminatedBlockComment, "/* GO\nGO")]
    );
    assert_eq!(scan_tags("/*"), vec![RawTag::UnterminatedBlockComment]);
    assert_eq!(scan_tags("/*/"), vec![RawTag::UnterminatedBlockComment]);
}

#[test]
fn slash_alone_is_punct() {
    assert_eq!(scan_tags("/"), vec![RawTag::Punct]);
}

// ─── Strings ───────────────────────────────────────────────────

#[test]
fn string_literal() {
    assert_eq!(
        scan_texts("'GO' x"),
        vec![
            (RawTag::String, "'GO'"),
            (RawTag::Whitespace, " "),
            (RawTag::Word, "x"),
        ]
    );
}

#[test]
fn string_with_doubled_quote() {
    assert_eq!(scan_texts("'it''s'"), vec![(RawTag::String, "'it''s'")]);
    assert_eq!(scan_texts("''''"), vec![(RawTag::String, "''''")]);
}

#[test]
fn empty_string() {
    assert_eq!(scan_texts("''"), vec![(RawTag::String, "''")]);
}

#[test]
fn string_spans_lines() {
    assert_eq!(
        scan_texts("'a\nGO\nb'"),
        vec![(RawTag::String, "'a\nGO\nb'")]
    );
}

#[test]
fn string_hides_comment_openers() {
    assert_eq!(
        scan_texts("N'/*x*/ --y'"),
        vec![(RawTag::Word, "N"), (RawTag::String, "'/*x*/ --y'")]
    );
}

#[test]
fn unterminated_string_extends_to_eof() {
    assert_eq!(
        scan_texts("'abc\nGO"),
        vec![(RawTag::UnterminatedString, "'abc\nGO")]
    );
    // A trailing doubled quote is an escape, not a close.
    assert_eq!(scan_tags("'abc''"), vec![RawTag::UnterminatedString]);
}

// ─── Bracketed Identifiers ─────────────────────────────────────

#[test]
fn bracket_ident() {
    assert_eq!(
        scan_texts("[GO] x"),
        vec![
            (RawTag::BracketIdent, "[GO]"),
            (RawTag::Whitespace, " "),
            (RawTag::Word, "x"),
        ]
    );
}

#[test]
fn quote_inside_bracket_does_not_open_string() {
    assert_eq!(
        scan_texts("[']\nGO"),
        vec![
            (RawTag::BracketIdent, "[']"),
            (RawTag::Newline, "\n"),
            (RawTag::Word, "GO"),
        ]
    );
}

#[test]
fn bracket_inside_string_does_not_open_bracket() {
    assert_eq!(scan_texts("'['"), vec![(RawTag::String, "'['")]);
}

#[test]
fn doubled_brackets_resolve_left_to_right() {
    assert_eq!(
        scan_texts("[[a]][b]][c]]]"),
        vec![(RawTag::BracketIdent, "[[a]][b]][c]]]")]
    );
}

#[test]
fn unterminated_bracket_extends_to_eof() {
    assert_eq!(
        scan_texts("([Text)\nVALUES (N'x')"),
        vec![
            (RawTag::Punct, "("),
            (RawTag::UnterminatedBracketIdent, "[Text)\nVALUES (N'x')"),
        ]
    );
}

#[test]
fn stray_closing_bracket_is_punct() {
    assert_eq!(scan_tags("]"), vec![RawTag::Punct]);
}

// ─── Property Tests ────────────────────────────────────────────

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_scanner {
    use super::scan;
    use proptest::prelude::*;

    fn fragment() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "GO", "go", "SELECT", " ", "\t", "\n", "\r\n", "\r", "'", "''", "[", "]", "]]",
            "--", "-", "/*", "*/", "*", "/", ";", "x", "\u{e9}", "\0",
        ])
    }

    proptest! {
        #[test]
        fn tokens_cover_source_exactly(parts in proptest::collection::vec(fragment(), 0..64)) {
            let source = parts.concat();
            let tokens = scan(&source);
            let total: usize = tokens.iter().map(|t| t.len as usize).sum();
            prop_assert_eq!(total, source.len());
            prop_assert!(tokens.iter().all(|t| t.len > 0));
        }

        #[test]
        fn token_boundaries_are_char_boundaries(parts in proptest::collection::vec(fragment(), 0..64)) {
            let source = parts.concat();
            let mut pos = 0usize;
            for tok in scan(&source) {
                pos += tok.len as usize;
                prop_assert!(source.is_char_boundary(pos));
            }
        }
    }
}
