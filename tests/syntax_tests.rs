//! Conformance tests for the object syntax, token by token.

use pdf_graph::lexer::Cursor;
use pdf_graph::{from_slice, to_string, Error, Name, Number, Object, PdfString, Reference};

fn parse(input: &str) -> Object {
    from_slice(input.as_bytes()).unwrap()
}

fn render(value: &Object) -> String {
    to_string(value).unwrap()
}

// Integers

#[test]
fn test_integer_tokens() {
    let token = Cursor::new(b"123").parse_integer().unwrap();
    assert_eq!(token.value, Number::from(123));
    assert_eq!(token.offset, 0);

    assert_eq!(parse("+17"), Object::from(17));
    assert_eq!(parse("-0"), Object::from(0));
    assert_eq!(parse("00042"), Object::from(42));
}

#[test]
fn test_integer_rejects_non_digits() {
    assert_eq!(
        Cursor::new(b"abc").parse_integer(),
        Err(Error::InvalidIntegerToken { offset: 0 })
    );
    assert!(Cursor::new(b"-").parse_integer().is_err());
    assert!(Cursor::new(b"").parse_integer().is_err());
}

#[test]
fn test_integer_never_swallows_dot() {
    let mut cursor = Cursor::new(b"12.5");
    assert!(cursor.parse_integer().is_err());
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.parse_number().unwrap().value, Number::Real(12.5));

    assert_eq!(parse("12."), Object::Number(Number::Real(12.0)));
}

#[test]
fn test_big_integers() {
    let huge = "123456789012345678901234567890";
    let value = parse(huge);
    assert!(value.as_number().unwrap().is_integer());
    assert_eq!(value.as_i64(), None);
    assert_eq!(render(&value), huge);
}

// Reals

#[test]
fn test_real_tokens() {
    let token = Cursor::new(b"3.1400").parse_real().unwrap();
    assert_eq!(token.value, Number::Real(3.14));
    assert_eq!(token.value.to_string(), "3.14");

    assert_eq!(parse(".5"), Object::Number(Number::Real(0.5)));
    assert_eq!(parse("-.002"), Object::Number(Number::Real(-0.002)));
    assert_eq!(parse("1.5e3"), Object::Number(Number::Real(1500.0)));
}

#[test]
fn test_real_rejects_missing_digits() {
    assert_eq!(
        Cursor::new(b" .").parse_real(),
        Err(Error::InvalidRealToken { offset: 1 })
    );
    assert!(Cursor::new(b"42").parse_real().is_err());
    assert!(Cursor::new(b"x.1").parse_real().is_err());
}

#[test]
fn test_real_rendering() {
    let cases = [
        (3.14, "3.14"),
        (2.0, "2"),
        (-0.5, "-0.5"),
        (0.001, "0.001"),
        (1e20, "100000000000000000000"),
        (1.5e-7, "0.00000015"),
    ];
    for (value, expected) in cases {
        assert_eq!(render(&Object::from(value)), expected, "{value}");
    }
}

#[test]
fn test_number_kinds_stay_apart() {
    let three = Number::from(3);
    let half = Number::Real(0.5);
    assert!((three.clone() + Number::from(4)).is_integer());
    assert!((three.clone() * half.clone()).is_real());
    assert_eq!(three.checked_div(&Number::from(2)).unwrap(), Number::from(1));
    assert!(matches!(three.checked_div(&Number::from(0)), Err(Error::Arithmetic(_))));
    assert!(half.bit_and(&three).is_err());
}

// Names

#[test]
fn test_names() {
    assert_eq!(parse("/Type"), Object::Name(Name::new("Type")));
    assert_eq!(parse("/A#42"), Object::Name(Name::new("AB")));
    assert_eq!(parse("/"), Object::Name(Name::new("")));
    assert_eq!(render(&Object::Name(Name::new("Lime Green"))), "/Lime#20Green");
    assert!(from_slice(b"/Bad#G1").is_err());
}

#[test]
fn test_delimiters_end_tokens() {
    let items = parse("[/A/B(c)<64>[]<<>>]");
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[1], Object::Name(Name::new("B")));
    assert_eq!(items[3], Object::String(PdfString::hex(b"d".to_vec())));
}

// Strings

#[test]
fn test_literal_string_escapes() {
    let value = parse(r"(a\nb\tc\(d\)e\\f\101\7g)");
    assert_eq!(value.as_string().unwrap().as_bytes(), b"a\nb\tc(d)e\\fA\x07g");
}

#[test]
fn test_literal_string_nesting_and_lines() {
    let value = parse("(outer (inner) text)");
    assert_eq!(value.as_string().unwrap().as_bytes(), b"outer (inner) text");

    let value = from_slice(b"(one\\\r\ntwo\r\nthree)").unwrap();
    assert_eq!(value.as_string().unwrap().as_bytes(), b"onetwo\nthree");

    assert!(matches!(
        from_slice(b"(unterminated"),
        Err(Error::UnexpectedEof { .. })
    ));
}

#[test]
fn test_hex_strings() {
    let value = parse("<48 65 6C\n6c 6F>");
    assert_eq!(value.as_string().unwrap().as_bytes(), b"Hello");
    assert_eq!(parse("<901FA>").as_string().unwrap().as_bytes(), &[0x90, 0x1F, 0xA0]);
    assert!(from_slice(b"<4X>").is_err());
    assert_eq!(render(&parse("<ab>")), "<AB>");
}

// Keywords and references

#[test]
fn test_keywords() {
    assert_eq!(parse("null"), Object::Null);
    assert_eq!(parse("true"), Object::Boolean(true));
    assert_eq!(parse("false"), Object::Boolean(false));
    assert!(from_slice(b"nil").is_err());
    assert!(from_slice(b"trueish").is_err());
}

#[test]
fn test_references() {
    assert_eq!(parse("12 0 R"), Object::Reference(Reference::new(12, 0)));
    assert_eq!(parse("12 3 R"), Object::Reference(Reference::new(12, 3)));

    let items = parse("[1 2 R 3 4 5]");
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], Object::Reference(Reference::new(1, 2)));

    // `R` must be a whole keyword.
    assert!(from_slice(b"1 0 Rx").is_err());
    let items = parse("[1 0 /R]");
    assert_eq!(items.as_array().unwrap().len(), 3);
}

#[test]
fn test_comments_are_whitespace() {
    let value = parse("% header\n[1 % one\n 2 % two\r 3]% end");
    assert_eq!(value.as_array().unwrap().len(), 3);
}

// Containers

#[test]
fn test_dictionaries() {
    let value = parse("<< /Type /Page /Kids [4 0 R] /Nested << /Deep 1.0 >> >>");
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 3);
    assert_eq!(dict.type_name(), Some("Page"));
    let deep = dict.get("Nested").and_then(Object::as_dict).and_then(|d| d.get("Deep"));
    assert_eq!(deep, Some(&Object::Number(Number::Real(1.0))));

    // Later duplicate keys win.
    let value = parse("<< /A 1 /A 2 >>");
    assert_eq!(value.as_dict().unwrap().get("A"), Some(&Object::from(2)));
}

#[test]
fn test_nesting_limit() {
    let deep = "[".repeat(1000) + &"]".repeat(1000);
    assert!(matches!(from_slice(deep.as_bytes()), Err(Error::Syntax { .. })));
    let fine = "[".repeat(50) + &"]".repeat(50);
    assert!(from_slice(fine.as_bytes()).is_ok());
}

#[test]
fn test_indirect_object_syntax() {
    let mut cursor = Cursor::new(b"12 0 obj\n(payload)\nendobj\n13 1 obj 5 endobj");
    let first = cursor.parse_indirect_object().unwrap();
    assert_eq!(first.reference, Reference::new(12, 0));
    let second = cursor.parse_indirect_object().unwrap();
    assert_eq!(second.reference, Reference::new(13, 1));
    assert_eq!(second.value, Object::from(5));

    assert!(Cursor::new(b"1 0 obj 5").parse_indirect_object().is_err());
    assert!(Cursor::new(b"1 0 5 endobj").parse_indirect_object().is_err());
}
