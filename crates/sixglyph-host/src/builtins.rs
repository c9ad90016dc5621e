use crate::interpreter::Host;
use crate::value::{array_index, join, number_to_radix_string, Function, Value};
use crate::{HostError, HostResult};

/// Native functions of the host. Each stringifies to `function <name>() ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Array,
    ArrayAt,
    ArrayJoin,
    String,
    StringAt,
    StringFromCodePoint,
    StringFromCharCode,
    Number,
    NumberToString,
    Boolean,
    Function,
    /// `toString` of strings, booleans, arrays and functions
    ToString,
    IsNaN,
    Btoa,
    Atob,
    ConsoleLog,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Array => "Array",
            Builtin::ArrayAt | Builtin::StringAt => "at",
            Builtin::ArrayJoin => "join",
            Builtin::String => "String",
            Builtin::StringFromCodePoint => "fromCodePoint",
            Builtin::StringFromCharCode => "fromCharCode",
            Builtin::Number => "Number",
            Builtin::NumberToString | Builtin::ToString => "toString",
            Builtin::Boolean => "Boolean",
            Builtin::Function => "Function",
            Builtin::IsNaN => "isNaN",
            Builtin::Btoa => "btoa",
            Builtin::Atob => "atob",
            Builtin::ConsoleLog => "log",
        }
    }

    /// Names the global object exposes directly.
    pub fn globals() -> &'static [Builtin] {
        &[
            Builtin::Array,
            Builtin::String,
            Builtin::Number,
            Builtin::Boolean,
            Builtin::Function,
            Builtin::IsNaN,
            Builtin::Btoa,
            Builtin::Atob,
        ]
    }
}

/// Reads `target[key]`, including the prototype members the host provides.
pub(crate) fn get_property(target: &Value, key: &str) -> HostResult<Value> {
    let found = match target {
        Value::Undefined => {
            return Err(HostError::Type(format!(
                "Cannot read properties of undefined (reading '{}')",
                key
            )))
        }
        Value::Bool(_) => match key {
            "constructor" => Some(Value::builtin(Builtin::Boolean)),
            "toString" => Some(Value::builtin(Builtin::ToString)),
            _ => None,
        },
        Value::Number(_) => match key {
            "constructor" => Some(Value::builtin(Builtin::Number)),
            "toString" => Some(Value::builtin(Builtin::NumberToString)),
            _ => None,
        },
        Value::Str(s) => match key {
            "length" => Some(Value::Number(s.chars().count() as f64)),
            "constructor" => Some(Value::builtin(Builtin::String)),
            "toString" => Some(Value::builtin(Builtin::ToString)),
            "at" => Some(Value::builtin(Builtin::StringAt)),
            _ => array_index(key)
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::str(c.to_string())),
        },
        Value::Array(items) => match key {
            "length" => Some(Value::Number(items.len() as f64)),
            "constructor" => Some(Value::builtin(Builtin::Array)),
            "toString" => Some(Value::builtin(Builtin::ToString)),
            "at" => Some(Value::builtin(Builtin::ArrayAt)),
            "join" => Some(Value::builtin(Builtin::ArrayJoin)),
            _ => array_index(key).and_then(|i| items.get(i).cloned()),
        },
        Value::Function(f) => match (key, f.as_ref()) {
            ("constructor", _) => Some(Value::builtin(Builtin::Function)),
            ("toString", _) => Some(Value::builtin(Builtin::ToString)),
            ("name", Function::Builtin(b)) => Some(Value::str(b.name())),
            ("name", Function::Script(_)) => Some(Value::str("anonymous")),
            ("fromCodePoint", Function::Builtin(Builtin::String)) => {
                Some(Value::builtin(Builtin::StringFromCodePoint))
            }
            ("fromCharCode", Function::Builtin(Builtin::String)) => {
                Some(Value::builtin(Builtin::StringFromCharCode))
            }
            _ => None,
        },
        Value::Object(obj) => obj.properties.get(key).cloned(),
    };

    Ok(found.unwrap_or(Value::Undefined))
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

fn required(args: &[Value], builtin: Builtin) -> HostResult<Value> {
    args.first().cloned().ok_or_else(|| {
        HostError::Type(format!(
            "Failed to execute '{}': 1 argument required, but only 0 present.",
            builtin.name()
        ))
    })
}

fn relative_index(position: f64, len: usize) -> Option<usize> {
    let position = if position.is_nan() { 0.0 } else { position.trunc() };
    let resolved = if position < 0.0 {
        len as f64 + position
    } else {
        position
    };
    (resolved >= 0.0 && resolved < len as f64).then_some(resolved as usize)
}

/// Arrays are stored densely, so `Array(n)` is capped well below `u32::MAX`.
pub const MAX_ARRAY_LENGTH: usize = 1 << 24;

/// Invokes a native function with receiver `this`.
pub(crate) fn call_builtin(
    host: &Host,
    builtin: Builtin,
    this: &Value,
    args: &[Value],
) -> HostResult<Value> {
    let caps = host.capabilities();

    match builtin {
        Builtin::Array => match args {
            [Value::Number(n)] => {
                if n.fract() != 0.0 || *n < 0.0 || *n > u32::MAX as f64 {
                    return Err(HostError::Range("Invalid array length".to_string()));
                }
                if *n > MAX_ARRAY_LENGTH as f64 {
                    return Err(HostError::Range(format!(
                        "Array length {} exceeds the host limit of {}",
                        n, MAX_ARRAY_LENGTH
                    )));
                }
                Ok(Value::array(vec![Value::Undefined; *n as usize]))
            }
            _ => Ok(Value::array(args.to_vec())),
        },
        Builtin::ArrayAt => match this {
            Value::Array(items) => {
                let position = arg(args, 0).to_number(caps);
                Ok(relative_index(position, items.len())
                    .map(|i| items[i].clone())
                    .unwrap_or(Value::Undefined))
            }
            other => Err(HostError::Type(format!(
                "Array.prototype.at called on a value of type {}",
                other.type_name()
            ))),
        },
        Builtin::ArrayJoin => match this {
            Value::Array(items) => {
                let separator = match arg(args, 0) {
                    Value::Undefined => ",".to_string(),
                    other => other.to_js_string(caps),
                };
                Ok(Value::str(join(items, &separator, caps)))
            }
            other => Err(HostError::Type(format!(
                "Array.prototype.join called on a value of type {}",
                other.type_name()
            ))),
        },
        Builtin::String => Ok(match args.first() {
            None => Value::str(""),
            Some(value) => Value::str(value.to_js_string(caps)),
        }),
        Builtin::StringAt => {
            let text = this.to_js_string(caps);
            let chars: Vec<char> = text.chars().collect();
            let position = arg(args, 0).to_number(caps);
            Ok(relative_index(position, chars.len())
                .map(|i| Value::str(chars[i].to_string()))
                .unwrap_or(Value::Undefined))
        }
        Builtin::StringFromCodePoint => {
            let mut out = String::with_capacity(args.len());
            for value in args {
                let n = value.to_number(caps);
                let c = (n.fract() == 0.0 && (0.0..=1_114_111.0).contains(&n))
                    .then(|| char::from_u32(n as u32))
                    .flatten()
                    .ok_or_else(|| {
                        HostError::Range(format!("Invalid code point {}", value.to_js_string(caps)))
                    })?;
                out.push(c);
            }
            Ok(Value::str(out))
        }
        Builtin::StringFromCharCode => Ok(Value::str(
            args.iter()
                .map(|value| {
                    let n = value.to_number(caps);
                    let unit = if n.is_finite() { (n.trunc() as i64).rem_euclid(65536) } else { 0 };
                    char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect::<String>(),
        )),
        Builtin::Number => Ok(Value::Number(match args.first() {
            None => 0.0,
            Some(value) => value.to_number(caps),
        })),
        Builtin::NumberToString => {
            let n = match this {
                Value::Number(n) => *n,
                other => {
                    return Err(HostError::Type(format!(
                        "Number.prototype.toString requires that 'this' be a Number, \
                         got a value of type {}",
                        other.type_name()
                    )))
                }
            };
            let radix = match arg(args, 0) {
                Value::Undefined => 10.0,
                other => other.to_number(caps).trunc(),
            };
            if !(2.0..=36.0).contains(&radix) {
                return Err(HostError::Range(
                    "toString() radix must be between 2 and 36".to_string(),
                ));
            }
            Ok(Value::str(number_to_radix_string(n, radix as u32)))
        }
        Builtin::Boolean => Ok(Value::Bool(arg(args, 0).to_boolean())),
        Builtin::Function => {
            let mut texts = args
                .iter()
                .map(|value| value.to_js_string(caps))
                .collect::<Vec<_>>();
            let body = texts.pop().unwrap_or_default();
            let params = texts
                .iter()
                .flat_map(|list| list.split(','))
                .map(|param| param.trim().to_string())
                .filter(|param| !param.is_empty())
                .collect::<Vec<_>>();
            caps.construct_function(&params, &body)
        }
        Builtin::ToString => match this {
            Value::Undefined => Err(HostError::Type(
                "Cannot convert undefined to string".to_string(),
            )),
            other => Ok(Value::str(other.to_js_string(caps))),
        },
        Builtin::IsNaN => Ok(Value::Bool(arg(args, 0).to_number(caps).is_nan())),
        Builtin::Btoa => {
            let input = required(args, builtin)?.to_js_string(caps);
            caps.encode_base64(&input).map(Value::str)
        }
        Builtin::Atob => {
            let input = required(args, builtin)?.to_js_string(caps);
            caps.decode_base64(&input).map(Value::str)
        }
        Builtin::ConsoleLog => {
            let line = args
                .iter()
                .map(|value| value.to_js_string(caps))
                .collect::<Vec<_>>()
                .join(" ");
            log::trace!("console.log: {}", line);
            host.push_console(line);
            Ok(Value::Undefined)
        }
    }
}
