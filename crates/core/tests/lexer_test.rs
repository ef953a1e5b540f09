//! Tokenizer tests.

use bicdir_core::parser::lexer::{Lexer, Token};

fn tokens(data: &[u8]) -> Vec<Token> {
    let mut lexer = Lexer::new(data);
    let mut out = Vec::new();
    while let Some(result) = lexer.next_token() {
        let (_, tok) = result.expect("lex failure");
        out.push(tok);
    }
    out
}

#[test]
fn lexes_numbers() {
    assert_eq!(
        tokens(b"42 -7 +3 3.14 -0.5 .25 4."),
        vec![
            Token::Int(42),
            Token::Int(-7),
            Token::Int(3),
            Token::Real(3.14),
            Token::Real(-0.5),
            Token::Real(0.25),
            Token::Real(4.0),
        ]
    );
}

#[test]
fn lexes_names_with_hex_escapes() {
    assert_eq!(
        tokens(b"/Type /A#20B"),
        vec![
            Token::Name("Type".to_string()),
            Token::Name("A B".to_string()),
        ]
    );
}

#[test]
fn lexes_literal_strings_with_escapes() {
    assert_eq!(
        tokens(b"(hello) (a\\(b\\)c) (line\\nbreak) (oct\\101al)"),
        vec![
            Token::Str(b"hello".to_vec()),
            Token::Str(b"a(b)c".to_vec()),
            Token::Str(b"line\nbreak".to_vec()),
            Token::Str(b"octAal".to_vec()),
        ]
    );
}

#[test]
fn lexes_nested_parens() {
    assert_eq!(
        tokens(b"(outer (inner) tail)"),
        vec![Token::Str(b"outer (inner) tail".to_vec())]
    );
}

#[test]
fn lexes_hex_strings() {
    assert_eq!(
        tokens(b"<48 65 6C6C 6F>"),
        vec![Token::Str(b"Hello".to_vec())]
    );
    // odd trailing digit acts as high nibble
    assert_eq!(tokens(b"<484>"), vec![Token::Str(vec![0x48, 0x40])]);
}

#[test]
fn lexes_dict_delimiters_and_keywords() {
    assert_eq!(
        tokens(b"<< /K true >> stream"),
        vec![
            Token::Keyword(b"<<".to_vec()),
            Token::Name("K".to_string()),
            Token::Bool(true),
            Token::Keyword(b">>".to_vec()),
            Token::Keyword(b"stream".to_vec()),
        ]
    );
}

#[test]
fn skips_comments_and_whitespace() {
    assert_eq!(
        tokens(b"% a comment\n 1 % another\r\n 2"),
        vec![Token::Int(1), Token::Int(2)]
    );
}

#[test]
fn reports_token_positions() {
    let mut lexer = Lexer::new(b"  12 /Name");
    let (pos, _) = lexer.next_token().unwrap().unwrap();
    assert_eq!(pos, 2);
    let (pos, _) = lexer.next_token().unwrap().unwrap();
    assert_eq!(pos, 5);
}

#[test]
fn unterminated_string_is_an_error() {
    let mut lexer = Lexer::new(b"(never closed");
    assert!(lexer.next_token().unwrap().is_err());
}
