// Dweve DSV - Delimiter-Separated Values
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Behavioral tests for the parser driver.
//!
//! Most scenarios run once per line terminator (LF, CR, CRLF).

use dsv_core::{ParseError, Parser, ParserOptions, Row};

const TERMINATORS: [&str; 3] = ["\n", "\r", "\r\n"];

const HEADER: [&str; 3] = ["first_name", "last_name", "email_address"];

fn rows(fields: &[&[&str]]) -> Vec<Row> {
    fields
        .iter()
        .map(|row| row.iter().map(|f| f.to_string()).collect())
        .collect()
}

fn parser() -> Parser {
    Parser::new(ParserOptions::default()).unwrap()
}

fn parser_with(options: ParserOptions) -> Parser {
    Parser::new(options).unwrap()
}

fn parse(parser: &mut Parser, input: &str, has_more: bool) -> (Vec<Row>, String) {
    let chunk = parser.parse(input, has_more).unwrap();
    (chunk.rows, chunk.carry.to_string())
}

// ==================== Reference scenarios ====================

#[test]
fn test_scenario_complete_buffer() {
    assert_eq!(
        parse(&mut parser(), "a,b\nc,d", false),
        (rows(&[&["a", "b"], &["c", "d"]]), String::new())
    );
}

#[test]
fn test_scenario_more_data_leaves_carry() {
    assert_eq!(
        parse(&mut parser(), "a,b\nc,d", true),
        (rows(&[&["a", "b"]]), "c,d".to_string())
    );
}

#[test]
fn test_scenario_quoted_delimiter() {
    assert_eq!(
        parse(&mut parser(), "first,\"a,b\",last", false).0,
        rows(&[&["first", "a,b", "last"]])
    );
}

#[test]
fn test_scenario_doubled_quote() {
    assert_eq!(
        parse(&mut parser(), "a,\"b\"\"c\"", false).0,
        rows(&[&["a", "b\"c"]])
    );
}

#[test]
fn test_scenario_trailing_delimiter() {
    assert_eq!(
        parse(&mut parser(), "a,b,", false).0,
        rows(&[&["a", "b", ""]])
    );
}

#[test]
fn test_scenario_trailing_cr_deferred() {
    assert_eq!(
        parse(&mut parser(), "a,b\r", true),
        (Vec::new(), "a,b\r".to_string())
    );
}

#[test]
fn test_scenario_comment() {
    let options = ParserOptions::builder().comment("#").build().unwrap();
    assert_eq!(
        parse(&mut parser_with(options), "#comment\na,b", false).0,
        rows(&[&["a", "b"]])
    );
}

// ==================== Unquoted data ====================

#[test]
fn test_block_of_text() {
    for nl in TERMINATORS {
        let data = format!("first_name,last_name,email_address{nl}First1,Last1,email1@email.com");
        assert_eq!(
            parse(&mut parser(), &data, false),
            (
                rows(&[&HEADER, &["First1", "Last1", "email1@email.com"]]),
                String::new()
            ),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_trailing_delimiter_then_terminator() {
    for nl in TERMINATORS {
        let data = format!("a,b,c,empty{nl}1,2,3,{nl}");
        assert_eq!(
            parse(&mut parser(), &data, false).0,
            rows(&[&["a", "b", "c", "empty"], &["1", "2", "3", ""]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_trailing_delimiter_then_space() {
    for nl in TERMINATORS {
        let data = format!("a,b,c,empty{nl}1,2,3, {nl}");
        assert_eq!(
            parse(&mut parser(), &data, false).0,
            rows(&[&["a", "b", "c", "empty"], &["1", "2", "3", " "]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_space_separated_trailing_delimiter() {
    let options = ParserOptions::builder().delimiter(" ").build().unwrap();
    for nl in TERMINATORS {
        let data = format!("a b c empty{nl}1 2 3 {nl}");
        assert_eq!(
            parse(&mut parser_with(options.clone()), &data, false).0,
            rows(&[&["a", "b", "c", "empty"], &["1", "2", "3", ""]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_rest_of_line_returned_with_more_data() {
    for nl in TERMINATORS {
        let data = format!("first_name,last_name,email_address{nl}First1,Last1,email1@email.com");
        assert_eq!(
            parse(&mut parser(), &data, true),
            (rows(&[&HEADER]), "First1,Last1,email1@email.com".to_string()),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_carry_accepts_new_data() {
    for nl in TERMINATORS {
        let mut parser = parser();
        let data = format!("first_name,last_name,email_address{nl}First1,Last1,email1@email.com");
        let (_, carry) = parse(&mut parser, &data, true);
        let next = format!("{carry}{nl}First2,Last2,email2@email.com");
        assert_eq!(
            parse(&mut parser, &next, false),
            (
                rows(&[
                    &["First1", "Last1", "email1@email.com"],
                    &["First2", "Last2", "email2@email.com"],
                ]),
                String::new()
            ),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_row_without_terminator_deferred() {
    let data = "first_name,last_name,email_address";
    assert_eq!(parse(&mut parser(), data, true), (Vec::new(), data.to_string()));
}

#[test]
fn test_trailing_delimiter_deferred() {
    for data in [
        "first_name,last_name,email_address,",
        "first_name,last_name,email_address, ",
    ] {
        assert_eq!(parse(&mut parser(), data, true), (Vec::new(), data.to_string()));
    }
}

#[test]
fn test_complete_row_with_more_data() {
    for nl in ["\n", "\r\n"] {
        let data = format!("first_name,last_name,email_address{nl}");
        assert_eq!(
            parse(&mut parser(), &data, true),
            (rows(&[&HEADER]), String::new()),
            "terminator {nl:?}"
        );
    }
}

// ==================== Quoted data ====================

#[test]
fn test_quoted_block_of_text() {
    for nl in TERMINATORS {
        let data = format!("first_name,last_name,email_address{nl}\"First,1\",\"Last,1\",\"email1@email.com\"");
        assert_eq!(
            parse(&mut parser(), &data, false).0,
            rows(&[&HEADER, &["First,1", "Last,1", "email1@email.com"]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_escaped_quotes() {
    for nl in TERMINATORS {
        let data = format!(
            "first_name,last_name,email_address{nl}\"First,\"\"1\"\"\",\"Last,\"\"1\"\"\",\"email1@email.com\""
        );
        assert_eq!(
            parse(&mut parser(), &data, false).0,
            rows(&[&HEADER, &["First,\"1\"", "Last,\"1\"", "email1@email.com"]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_alternate_escape_character() {
    let options = ParserOptions::builder().escape("\\").build().unwrap();
    for nl in TERMINATORS {
        let data = format!(
            "first_name,last_name,email_address{nl}\"First,\\\"1\\\"\",\"Last,\\\"1\\\"\",\"email1@email.com\""
        );
        assert_eq!(
            parse(&mut parser_with(options.clone()), &data, false).0,
            rows(&[&HEADER, &["First,\"1\"", "Last,\"1\"", "email1@email.com"]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_incomplete_quoted_value_carried_and_resumed() {
    for nl in TERMINATORS {
        let mut parser = parser();
        let data = format!(
            "first_name,last_name,email_address{nl}\"First,\"\"1\"\"\",\"Last,\"\"1\"\"\",\"email1@email.com"
        );
        let (first, carry) = parse(&mut parser, &data, true);
        assert_eq!(first, rows(&[&HEADER]));
        assert_eq!(carry, "\"First,\"\"1\"\"\",\"Last,\"\"1\"\"\",\"email1@email.com");

        let next = format!("{carry}\"{nl}\"First,\"\"2\"\"\",\"Last,\"\"2\"\"\",\"email2@email.com\"");
        assert_eq!(
            parse(&mut parser, &next, false),
            (
                rows(&[
                    &["First,\"1\"", "Last,\"1\"", "email1@email.com"],
                    &["First,\"2\"", "Last,\"2\"", "email2@email.com"],
                ]),
                String::new()
            ),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_unterminated_quote_then_garbage_is_error() {
    for nl in TERMINATORS {
        let mut parser = parser();
        let data = format!(
            "first_name,last_name,email_address{nl}\"First,\"\"1\"\"\",\"Last,\"\"1\"\"\",\"email1@email.com"
        );
        let (_, carry) = parse(&mut parser, &data, true);
        let next = format!("{carry}{nl}\"First,\"\",2\"\"\",\"Last\"\"2\"\"\",\"email2@email.com\"");
        let err = parser.parse(&next, false).unwrap_err();
        match &err {
            ParseError::UnexpectedCharacterAfterQuote { found, context, .. } => {
                assert_eq!(*found, 'F');
                assert!(context.starts_with("First,"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("expected delimiter or new line, got 'F'"));
    }
}

#[test]
fn test_empty_values() {
    for nl in TERMINATORS {
        let data = format!("\"\",\"\",\"\"{nl},Last4,email4@email.com");
        assert_eq!(
            parse(&mut parser(), &data, false).0,
            rows(&[&["", "", ""], &["", "Last4", "email4@email.com"]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_quoted_row_deferred_with_more_data() {
    for data in [
        "\"first_name\",\"last_name\",\"email_address\"",
        "\"first_name\",\"last_name\",\"email_address\",",
        "\"first_name\",\"last_name\",\"email_address\"\r",
    ] {
        assert_eq!(parse(&mut parser(), data, true), (Vec::new(), data.to_string()));
    }
}

#[test]
fn test_quoted_row_complete_with_more_data() {
    for nl in ["\n", "\r\n"] {
        let data = format!("\"first_name\",\"last_name\",\"email_address\"{nl}");
        assert_eq!(
            parse(&mut parser(), &data, true),
            (rows(&[&HEADER]), String::new())
        );
    }
}

#[test]
fn test_null_quote_keeps_quotes() {
    let options = ParserOptions::builder().no_quote().build().unwrap();
    for nl in TERMINATORS {
        let data = format!("first_name,last_name,email_address{nl}\"First1\",\"Last1\",\"email1@email.com\"");
        assert_eq!(
            parse(&mut parser_with(options.clone()), &data, false).0,
            rows(&[&HEADER, &["\"First1\"", "\"Last1\"", "\"email1@email.com\""]]),
            "terminator {nl:?}"
        );
    }
}

#[test]
fn test_missing_closing_quote_at_end_of_input() {
    let err = parser().parse("a,\"unterminated", false).unwrap_err();
    assert!(matches!(err, ParseError::MissingClosingQuote { offset: 2, .. }));
}

// ==================== Comments ====================

fn comment_parser() -> Parser {
    parser_with(ParserOptions::builder().comment("#").build().unwrap())
}

#[test]
fn test_comment_between_rows() {
    let data = "first_name,last_name,email_address\n#The first row of data\nFirst1,Last1,email1@email.com";
    assert_eq!(
        parse(&mut comment_parser(), data, false),
        (
            rows(&[&HEADER, &["First1", "Last1", "email1@email.com"]]),
            String::new()
        )
    );
}

#[test]
fn test_trailing_comment_carried() {
    let data = "first_name,last_name,email_address\n#First1,Last1,email1@email.com";
    assert_eq!(
        parse(&mut comment_parser(), data, true),
        (rows(&[&HEADER]), "#First1,Last1,email1@email.com".to_string())
    );
}

#[test]
fn test_comment_carry_accepts_new_data() {
    let mut parser = comment_parser();
    let (_, carry) = parse(&mut parser, "first_name,last_name,email_address\n#This is a comment", true);
    assert_eq!(carry, "#This is a comment");
    let next = format!("{carry}\nFirst1,Last1,email1@email.com\nFirst2,Last2,email2@email.com");
    assert_eq!(
        parse(&mut parser, &next, false).0,
        rows(&[
            &["First1", "Last1", "email1@email.com"],
            &["First2", "Last2", "email2@email.com"],
        ])
    );
}

#[test]
fn test_comment_marker_inside_field_is_data() {
    assert_eq!(
        parse(&mut comment_parser(), "f#irst_name,last_name,email_address", false).0,
        rows(&[&["f#irst_name", "last_name", "email_address"]])
    );
}

#[test]
fn test_quoted_comment_marker_is_data() {
    assert_eq!(
        parse(&mut comment_parser(), "\"#first_name\",last_name,email_address", false).0,
        rows(&[&["#first_name", "last_name", "email_address"]])
    );
}

#[test]
fn test_only_comments() {
    for data in ["#Comment1\n#Comment2", "#Comment1\n#Comment2\n"] {
        assert_eq!(parse(&mut comment_parser(), data, false), (Vec::new(), String::new()));
    }
}

// ==================== Trimming ====================

#[test]
fn test_trim_options() {
    let data = "  a  ,\"  b  \"\n";
    let cases = [
        (ParserOptions::builder().trim(true), ["a", "b"]),
        (ParserOptions::builder().ltrim(true), ["a  ", "b  "]),
        (ParserOptions::builder().rtrim(true), ["  a", "  b"]),
    ];
    for (builder, expected) in cases {
        let mut parser = parser_with(builder.build().unwrap());
        assert_eq!(parse(&mut parser, data, false).0, rows(&[&expected]));
    }
    assert_eq!(
        parse(&mut parser(), data, false).0,
        rows(&[&["  a  ", "  b  "]])
    );
}

// ==================== Empty rows ====================

#[test]
fn test_ignore_empty_row() {
    let options = ParserOptions::builder().ignore_empty_row(true).build().unwrap();
    let data = "a,b\n\n,\n\"\",\"\"\n  \nc,d\n";
    assert_eq!(
        parse(&mut parser_with(options), data, false).0,
        rows(&[&["a", "b"], &["c", "d"]])
    );
}

#[test]
fn test_strict_column_handling() {
    let options = ParserOptions::builder()
        .strict_column_handling(true)
        .build()
        .unwrap();
    assert_eq!(
        parse(&mut parser_with(options), "a,b,\nc,,d\n", false).0,
        rows(&[&["a", "b"], &["c", "", "d"]])
    );
}

#[test]
fn test_strict_column_handling_keeps_ragged_rows() {
    let options = ParserOptions::builder()
        .strict_column_handling(true)
        .build()
        .unwrap();
    assert_eq!(
        parse(&mut parser_with(options), "h1,h2,h3\nshort\nx,y,z,extra,\n", false).0,
        rows(&[&["h1", "h2", "h3"], &["short"], &["x", "y", "z", "extra"]])
    );
}

// ==================== Delimiters ====================

#[test]
fn test_alternate_delimiters() {
    for delimiter in ["\t", "|", ";"] {
        let options = ParserOptions::builder().delimiter(delimiter).build().unwrap();
        let data = format!("a{delimiter}\"b{delimiter}c\"{delimiter}d\n");
        let quoted = format!("b{delimiter}c");
        assert_eq!(
            parse(&mut parser_with(options), &data, false).0,
            rows(&[&["a", quoted.as_str(), "d"]])
        );
    }
}

#[test]
fn test_byte_order_mark() {
    let mut parser = parser();
    assert_eq!(
        parse(&mut parser, "\u{FEFF}a,b\n", false).0,
        rows(&[&["a", "b"]])
    );
}
