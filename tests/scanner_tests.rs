// Scanner behaviour: token kinds, maximal munch, comments, literals, lexical errors.

use spartie::error::{ErrorKind, Span};
use spartie::scanner::{scan, TokenType};
use spartie::value::Value;

fn kinds(source: &str) -> Vec<TokenType> {
    scan(source)
        .unwrap_or_else(|e| panic!("scan of {:?} failed: {}", source, e))
        .into_iter()
        .map(|token| token.token_type)
        .collect()
}

#[test]
fn single_character_punctuation() {
    assert_eq!(
        kinds("; , { } ( ) + - * |"),
        vec![
            TokenType::Semicolon,
            TokenType::Comma,
            TokenType::LeftBrace,
            TokenType::RightBrace,
            TokenType::LeftParen,
            TokenType::RightParen,
            TokenType::Add,
            TokenType::Subtract,
            TokenType::Multiply,
            TokenType::Or,
        ]
    );
}

#[test]
fn two_character_operators_use_maximal_munch() {
    let tokens = scan("<=").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token_type, TokenType::LessEqual);
    assert_eq!(tokens[0].lexeme, "<=");

    assert_eq!(
        kinds(">= == !="),
        vec![TokenType::GreaterEqual, TokenType::Equivalent, TokenType::NotEqual]
    );
    assert_eq!(
        kinds("< > = !"),
        vec![
            TokenType::LessThan,
            TokenType::GreaterThan,
            TokenType::Assign,
            TokenType::Not,
        ]
    );
}

#[test]
fn separated_comparison_is_two_tokens() {
    assert_eq!(kinds("! ="), vec![TokenType::Not, TokenType::Assign]);
    assert_eq!(kinds("==="), vec![TokenType::Equivalent, TokenType::Assign]);
}

#[test]
fn lookahead_stops_at_end_of_input() {
    assert_eq!(kinds("1 <"), vec![TokenType::Number, TokenType::LessThan]);
    assert_eq!(kinds("x ="), vec![TokenType::Identifier, TokenType::Assign]);
}

#[test]
fn line_comment_produces_no_token() {
    let tokens = scan("// comment\n42").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token_type, TokenType::Number);
    assert_eq!(tokens[0].literal, Some(Value::Number(42.0)));
    assert_eq!(tokens[0].line, 2);
}

#[test]
fn comment_runs_to_end_of_input() {
    assert_eq!(kinds("a // trailing"), vec![TokenType::Identifier]);
    assert_eq!(kinds("a//b"), vec![TokenType::Identifier]);
}

#[test]
fn bare_slash_is_divide() {
    assert_eq!(
        kinds("6 / 2"),
        vec![TokenType::Number, TokenType::Divide, TokenType::Number]
    );
}

#[test]
fn newlines_advance_the_line_counter() {
    let tokens = scan("a\n\nb\r\n\tc").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|token| token.line).collect();
    assert_eq!(lines, vec![1, 3, 4]);
}

#[test]
fn string_literal_keeps_quotes_in_lexeme_only() {
    let tokens = scan("\"hello world\"").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token_type, TokenType::String);
    assert_eq!(tokens[0].lexeme, "\"hello world\"");
    assert_eq!(
        tokens[0].literal,
        Some(Value::String("hello world".to_string()))
    );
}

#[test]
fn string_may_span_lines() {
    let tokens = scan("\"a\nb\" x").unwrap();
    assert_eq!(tokens[0].literal, Some(Value::String("a\nb".to_string())));
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].token_type, TokenType::Identifier);
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn unterminated_string_cites_starting_line() {
    let error = scan("\"abc").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.line(), Some(1));
    assert!(error.to_string().contains("Unterminated string"));

    let error = scan("\n\n\"abc\ndef").unwrap_err();
    assert_eq!(error.line(), Some(3));
}

#[test]
fn numbers_decode_to_floats() {
    let tokens = scan("3.14 42 7.").unwrap();
    assert_eq!(tokens[0].lexeme, "3.14");
    assert_eq!(tokens[0].literal, Some(Value::Number(3.14)));
    assert_eq!(tokens[1].literal, Some(Value::Number(42.0)));
    assert_eq!(tokens[2].literal, Some(Value::Number(7.0)));
}

#[test]
fn second_decimal_point_is_rejected() {
    let error = scan("1.2.3").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert!(error.to_string().contains("multiple decimal points"));
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("if else for while true false fun return var print null"),
        vec![
            TokenType::If,
            TokenType::Else,
            TokenType::For,
            TokenType::While,
            TokenType::True,
            TokenType::False,
            TokenType::Fun,
            TokenType::Return,
            TokenType::Var,
            TokenType::Print,
            TokenType::Null,
        ]
    );

    let tokens = scan("foo_bar x1 iff").unwrap();
    assert!(tokens
        .iter()
        .all(|token| token.token_type == TokenType::Identifier));
    assert_eq!(tokens[0].lexeme, "foo_bar");
}

#[test]
fn number_followed_by_letters_splits() {
    assert_eq!(kinds("3abc"), vec![TokenType::Number, TokenType::Identifier]);
}

#[test]
fn unexpected_character_reports_position_and_line() {
    let error = scan("1 +\n  @").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.line(), Some(2));
    assert_eq!(error.span(), Some(Span::single(6)));
    assert!(error.to_string().contains("Unexpected character '@' at 6"));
}

#[test]
fn leading_underscore_is_not_an_identifier() {
    let error = scan("_x").unwrap_err();
    assert!(error.to_string().contains("Unexpected character '_'"));
}

#[test]
fn spans_cover_the_lexeme() {
    let tokens = scan("a <= b").unwrap();
    assert_eq!(tokens[1].span, Span::new(2, 4));
}

#[test]
fn empty_and_blank_input_scan_to_nothing() {
    assert!(scan("").unwrap().is_empty());
    assert!(scan("  \t\r\n ").unwrap().is_empty());
}

#[test]
fn rescanning_joined_lexemes_is_stable() {
    let source = "var total = ( 1 + 2.5 ) * \"x\" ; total != null | !done";
    let first = scan(source).unwrap();
    let second = scan(source).unwrap();
    assert_eq!(first, second);

    let joined = first
        .iter()
        .map(|token| token.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let rescanned = scan(&joined).unwrap();

    let strip = |tokens: &[spartie::Token]| {
        tokens
            .iter()
            .map(|token| (token.token_type, token.lexeme.clone(), token.literal.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&first), strip(&rescanned));
}
