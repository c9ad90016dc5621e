use sixglyph_host::{Builtin, Expected, Harness, Host, HostConfig, NativeStyle, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn single_line() -> HostConfig {
    HostConfig {
        native_style: NativeStyle::SingleLine,
        ..HostConfig::default()
    }
}

fn text(value: Value) -> String {
    match value {
        Value::Str(s) => s.to_string(),
        other => panic!("Expected a string, got {}", other),
    }
}

#[test]
fn test_stringified_builtins_keep_fixed_offsets() {
    init_logging();
    for config in [HostConfig::default(), single_line()] {
        let host = Host::new(config);
        let at: Vec<char> = text(host.eval("[]['at']+[]").unwrap()).chars().collect();
        assert_eq!((at[3], at[6], at[8]), ('c', 'o', ' '));

        let string: Vec<char> = text(host.eval("([]+[])['constructor']+[]").unwrap())
            .chars()
            .collect();
        assert_eq!((string[9], string[14]), ('S', 'g'));

        let number: Vec<char> = text(host.eval("(+[])['constructor']+[]").unwrap())
            .chars()
            .collect();
        assert_eq!((number[11], number[12]), ('m', 'b'));
    }
}

#[test]
fn test_constructor_chain_reaches_function() {
    init_logging();
    let harness = Harness::default();
    harness
        .expect("[]['at']['constructor']", &Builtin::Function.into())
        .unwrap();
    harness
        .expect("(+[])['constructor']", &Builtin::Number.into())
        .unwrap();
    harness
        .expect("[]['constructor']", &Builtin::Array.into())
        .unwrap();
    harness
        .expect("([]+[])['constructor']['fromCodePoint']", &Builtin::StringFromCodePoint.into())
        .unwrap();
}

#[test]
fn test_transcoding_through_the_global_object() {
    init_logging();
    let harness = Harness::default();
    harness
        .expect("Function('return this')()['btoa']('   ')", &"ICAg".into())
        .unwrap();
    harness
        .expect("Function('return this')()['atob']('01A0')[1]", &"P".into())
        .unwrap();
    assert!(harness.evaluate("atob('*')").is_err());
}

#[test]
fn test_code_point_reconstruction() {
    init_logging();
    let harness = Harness::default();
    harness
        .expect("String.fromCodePoint(+('128' + '512'))", &Expected::Str("\u{1F600}".into()))
        .unwrap();
    harness
        .expect("String.fromCharCode(72, 105)", &"Hi".into())
        .unwrap();
    assert!(harness.evaluate("String.fromCodePoint(-1)").is_err());
}

#[test]
fn test_global_tag_is_configurable() {
    let host = Host::new(HostConfig {
        global_tag: "global".to_string(),
        ..HostConfig::default()
    });
    let value = host.eval("globalThis+[]").unwrap();
    assert!(matches!(value, Value::Str(s) if &*s == "[object global]"));
}

#[test]
fn test_programs_run_with_side_effects() {
    init_logging();
    let host = Host::default();
    let value = host
        .run("var greeting = 'hi ' + 2; console.log(greeting); return greeting === 'hi 2'")
        .unwrap();
    assert!(matches!(value, Value::Bool(true)));
    assert_eq!(host.console_output(), vec!["hi 2".to_string()]);
}

#[test]
fn test_strings_are_measured_in_code_points() {
    let host = Host::default();
    assert!(matches!(
        host.eval("'\\u{1F600}'['length']").unwrap(),
        Value::Number(n) if n == 1.0
    ));
    assert_eq!(text(host.eval("'a\\u{1F600}b'[1]").unwrap()), "\u{1F600}");
    assert_eq!(text(host.eval("'a\\u{1F600}b'['at'](-1)").unwrap()), "b");
}
