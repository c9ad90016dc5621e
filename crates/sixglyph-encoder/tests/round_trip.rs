use sixglyph_encoder::{encode_num, encode_num_string, Alphabet, AlphabetRegistry, SkipVerification};
use sixglyph_host::{Expected, Harness, Host, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn registry() -> &'static AlphabetRegistry {
    sixglyph_encoder::registry().unwrap()
}

#[test]
fn test_compiled_program_returns_its_result() {
    init_logging();
    let program = sixglyph_encoder::compile("return 3").unwrap();
    Harness::default().expect(program.as_str(), &3.0.into()).unwrap();
}

#[test]
fn test_encoded_text_evaluates_to_itself() {
    init_logging();
    let harness = Harness::default();
    for text in [
        "hello world",
        "Hello, World!",
        "tab\tand\nnewline",
        "caf\u{e9} \u{1F600}",
        "{\"quoted\": 'yes'}",
    ] {
        let encoded = sixglyph_encoder::encode(text).unwrap();
        assert!(Alphabet::validate(encoded.as_str()).is_ok());
        harness.expect(encoded.as_str(), &text.into()).unwrap();
    }
}

#[test]
fn test_empty_program() {
    init_logging();
    let compiler = registry().compiler();
    assert_eq!(compiler.encode("").as_str(), "[]+[]");

    let program = compiler.compile("");
    Harness::default()
        .expect(program.as_str(), &Expected::Undefined)
        .unwrap();
}

#[test]
fn test_side_effects_are_preserved() {
    init_logging();
    let source = "var x = 6;\nconsole.log('answer', x * 7);\nreturn x";
    let program = registry().compiler().compile(source);

    let direct = Host::default();
    let direct_result = direct.run(source).unwrap();

    let encoded = Host::default();
    let encoded_result = encoded.eval(program.as_str()).unwrap();

    assert!(matches!(encoded_result, Value::Number(n) if n == 6.0));
    assert!(direct_result.strict_equals(&encoded_result));
    assert_eq!(encoded.console_output(), vec!["answer 42".to_string()]);
    assert_eq!(encoded.console_output(), direct.console_output());
}

#[test]
fn test_program_sees_the_global_object() {
    init_logging();
    let program = registry().compiler().compile("return this");
    Harness::default()
        .expect(program.as_str(), &Expected::Global)
        .unwrap();
}

#[test]
fn test_every_character_is_representable() {
    let compiler = registry().compiler();
    for character in ['Z', '~', '\u{0}', '\u{10FFFF}', '\u{1F600}'] {
        let expr = compiler.encode_char(character);
        Harness::default()
            .expect(expr.as_str(), &character.into())
            .unwrap();
    }
}

#[test]
fn test_compilation_is_deterministic() {
    let unverified = AlphabetRegistry::bootstrap_with(&SkipVerification).unwrap();
    let source = "return 'same' + 1";
    assert_eq!(
        unverified.compiler().compile(source),
        registry().compiler().compile(source)
    );
    assert_eq!(
        registry().compiler().compile(source),
        registry().compiler().compile(source)
    );
}

#[test]
fn test_encode_num_evaluates_to_its_value() {
    let harness = Harness::default();
    for n in 0..200u64 {
        harness.expect(encode_num(n).as_str(), &(n as f64).into()).unwrap();
    }
}

#[test]
fn test_encode_num_string_evaluates_to_its_digits() {
    let harness = Harness::default();
    for n in 0..2000u64 {
        let digits = n.to_string();
        let expr = encode_num_string(&digits).unwrap();
        harness.expect(expr.as_str(), &digits.as_str().into()).unwrap();
    }
    for digits in ["007", "0000", "9876543210"] {
        let expr = encode_num_string(digits).unwrap();
        harness.expect(expr.as_str(), &digits.into()).unwrap();
    }
}

#[test]
fn test_stats_count_fallbacks() {
    let (program, stats) = registry().compiler().compile_with_stats("return 'Hi!'");
    assert_eq!(stats.input_chars, 12);
    assert_eq!(stats.fallbacks, 4);
    assert_eq!(stats.table_hits, 8);
    assert_eq!(stats.output_len, program.len());
    Harness::default().expect(program.as_str(), &"Hi!".into()).unwrap();
}
