use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::ast::Stmt;
use crate::builtins::Builtin;
use crate::capabilities::Capabilities;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Bool(bool),
    Number(f64),
    /// A sequence of Unicode scalar values. `length`, indexing and `at` count
    /// code points rather than UTF-16 code units, so an astral character is
    /// one element and lone surrogates cannot occur.
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Function(Rc<Function>),
    Object(Rc<JsObject>),
}

#[derive(Debug, PartialEq)]
pub enum Function {
    Builtin(Builtin),
    Script(ScriptFunction),
}

/// A callable produced by the `Function` constructor.
#[derive(Debug, PartialEq)]
pub struct ScriptFunction {
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub source: String,
}

/// A plain object with a fixed set of properties.
#[derive(Debug, PartialEq)]
pub struct JsObject {
    pub class: String,
    pub properties: FxHashMap<String, Value>,
}

impl Value {
    pub fn str(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn builtin(builtin: Builtin) -> Self {
        Value::Function(Rc::new(Function::Builtin(builtin)))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Array(_) | Value::Object(_) => "object",
        }
    }

    pub fn as_builtin(&self) -> Option<Builtin> {
        match self {
            Value::Function(f) => match f.as_ref() {
                Function::Builtin(b) => Some(*b),
                Function::Script(_) => None,
            },
            _ => None,
        }
    }

    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Function(_) | Value::Object(_) => true,
        }
    }

    /// Primitives pass through; everything else becomes its string form.
    pub fn to_primitive(&self, caps: &dyn Capabilities) -> Value {
        match self {
            Value::Array(_) | Value::Function(_) | Value::Object(_) => {
                Value::str(self.to_js_string(caps))
            }
            primitive => primitive.clone(),
        }
    }

    pub fn to_js_string(&self, caps: &dyn Capabilities) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => join(items, ",", caps),
            Value::Function(f) => match f.as_ref() {
                Function::Builtin(b) => caps.native_source(*b),
                Function::Script(script) => script.source.clone(),
            },
            Value::Object(obj) => format!("[object {}]", obj.class),
        }
    }

    pub fn to_number(&self, caps: &dyn Capabilities) -> f64 {
        match self.to_primitive(caps) {
            Value::Undefined => f64::NAN,
            Value::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => n,
            Value::Str(s) => string_to_number(&s),
            _ => f64::NAN,
        }
    }

    pub fn to_property_key(&self, caps: &dyn Capabilities) -> String {
        self.to_js_string(caps)
    }

    /// `===`, with built-ins compared by identity of the built-in.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => match (a.as_ref(), b.as_ref()) {
                (Function::Builtin(x), Function::Builtin(y)) => x == y,
                _ => Rc::ptr_eq(a, b),
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Array(items) => write!(f, "[array of {}]", items.len()),
            Value::Function(func) => match func.as_ref() {
                Function::Builtin(b) => write!(f, "[function {}]", b.name()),
                Function::Script(_) => write!(f, "[function anonymous]"),
            },
            Value::Object(obj) => write!(f, "[object {}]", obj.class),
        }
    }
}

pub(crate) fn join(items: &[Value], separator: &str, caps: &dyn Capabilities) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Undefined => String::new(),
            other => other.to_js_string(caps),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Number-to-string conversion with the host's formatting rules.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let rendered = format!("{:e}", n);
        return match rendered.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => rendered,
        };
    }
    format!("{}", n)
}

/// Renders `n` in `radix` (2..=36), lowercase digits.
pub fn number_to_radix_string(n: f64, radix: u32) -> String {
    if radix == 10 || !n.is_finite() {
        return number_to_string(n);
    }

    let base = radix as f64;
    let mut int = n.abs().trunc();
    let mut frac = n.abs() - int;
    let mut digits = Vec::new();

    if int == 0.0 {
        digits.push('0');
    }
    while int >= 1.0 {
        let digit = (int % base) as u32;
        digits.push(std::char::from_digit(digit, radix).unwrap_or('0'));
        int = (int / base).trunc();
    }
    if n < 0.0 {
        digits.push('-');
    }
    digits.reverse();

    let mut out: String = digits.into_iter().collect();
    if frac > 0.0 {
        out.push('.');
        for _ in 0..52 {
            frac *= base;
            let digit = frac.trunc();
            out.push(std::char::from_digit(digit as u32, radix).unwrap_or('0'));
            frac -= digit;
            if frac == 0.0 {
                break;
            }
        }
    }
    out
}

/// String-to-number conversion: decimal, `0x`/`0o`/`0b` and `Infinity`.
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    let numeric = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if numeric {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Canonical array index form of a property key (`"0"`, `"17"`, not `"01"`).
pub fn array_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::StandardCapabilities;
    use crate::config::NativeStyle;

    fn caps() -> StandardCapabilities {
        StandardCapabilities::new(NativeStyle::MultiLine)
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number_to_string(3.0), "3");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_radix_rendering() {
        assert_eq!(number_to_radix_string(17.0, 36), "h");
        assert_eq!(number_to_radix_string(35.0, 36), "z");
        assert_eq!(number_to_radix_string(255.0, 16), "ff");
        assert_eq!(number_to_radix_string(-5.0, 2), "-101");
        assert_eq!(number_to_radix_string(0.5, 2), "0.1");
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number(" 42 "), 42.0);
        assert_eq!(string_to_number("0x1f"), 31.0);
        assert!(string_to_number("false").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_array_coercions() {
        let caps = caps();
        let empty = Value::array(vec![]);
        assert_eq!(empty.to_js_string(&caps), "");
        assert_eq!(empty.to_number(&caps), 0.0);
        assert!(empty.to_boolean());

        let single_false = Value::array(vec![Value::Bool(false)]);
        assert!(single_false.to_number(&caps).is_nan());

        let holes = Value::array(vec![Value::Undefined, Value::Number(1.0)]);
        assert_eq!(holes.to_js_string(&caps), ",1");
    }

    #[test]
    fn test_builtin_identity() {
        assert!(Value::builtin(Builtin::Array).strict_equals(&Value::builtin(Builtin::Array)));
        assert!(!Value::builtin(Builtin::Array).strict_equals(&Value::builtin(Builtin::String)));
        assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
    }

    #[test]
    fn test_array_index_keys() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("17"), Some(17));
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("length"), None);
    }
}
