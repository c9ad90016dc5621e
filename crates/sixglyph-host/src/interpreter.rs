use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::ast::{BinaryOp, Expr, Stmt, UnaryOp};
use crate::builtins::{call_builtin, get_property, Builtin};
use crate::capabilities::{Capabilities, StandardCapabilities};
use crate::config::HostConfig;
use crate::lexer::lex;
use crate::parser::parse_expression;
use crate::value::{Function, JsObject, ScriptFunction, Value};
use crate::{HostError, HostResult};

/// A single-threaded host runtime: one global object, one console buffer.
pub struct Host {
    config: HostConfig,
    capabilities: Box<dyn Capabilities>,
    global: Rc<JsObject>,
    console: RefCell<Vec<String>>,
}

/// Bindings visible while evaluating one function body.
struct Scope {
    this: Value,
    vars: FxHashMap<String, Value>,
}

impl Host {
    pub fn new(config: HostConfig) -> Self {
        let capabilities = StandardCapabilities::new(config.native_style);
        Self::with_capabilities(config, Box::new(capabilities))
    }

    pub fn with_capabilities(config: HostConfig, capabilities: Box<dyn Capabilities>) -> Self {
        let mut properties: FxHashMap<String, Value> = Builtin::globals()
            .iter()
            .map(|b| (b.name().to_string(), Value::builtin(*b)))
            .collect();

        let mut console = FxHashMap::default();
        console.insert("log".to_string(), Value::builtin(Builtin::ConsoleLog));
        properties.insert(
            "console".to_string(),
            Value::Object(Rc::new(JsObject {
                class: "console".to_string(),
                properties: console,
            })),
        );

        log::debug!(
            "Initializing host (global object [object {}], {:?} native sources)",
            config.global_tag,
            config.native_style
        );

        let global = Rc::new(JsObject {
            class: config.global_tag.clone(),
            properties,
        });

        Self {
            config,
            capabilities,
            global,
            console: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &dyn Capabilities {
        self.capabilities.as_ref()
    }

    pub fn global(&self) -> Value {
        Value::Object(Rc::clone(&self.global))
    }

    pub fn is_global(&self, value: &Value) -> bool {
        matches!(value, Value::Object(obj) if Rc::ptr_eq(obj, &self.global))
    }

    /// Lines written through `console.log`, oldest first.
    pub fn console_output(&self) -> Vec<String> {
        self.console.borrow().clone()
    }

    pub fn clear_console(&self) {
        self.console.borrow_mut().clear();
    }

    pub(crate) fn push_console(&self, line: String) {
        self.console.borrow_mut().push(line);
    }

    /// Evaluates a single expression at top level (`this` is the global object).
    pub fn eval(&self, source: &str) -> HostResult<Value> {
        let tokens = lex(source)?;
        let expr = parse_expression(&tokens)?;
        let mut scope = Scope {
            this: self.global(),
            vars: FxHashMap::default(),
        };
        self.evaluate(&expr, &mut scope)
    }

    /// Runs `source` as a function body, the way `Function(source)()` would.
    pub fn run(&self, source: &str) -> HostResult<Value> {
        let function = self.capabilities.construct_function(&[], source)?;
        self.call(&function, &Value::Undefined, &[])
    }

    pub fn call(&self, callee: &Value, this: &Value, args: &[Value]) -> HostResult<Value> {
        match callee {
            Value::Function(function) => match function.as_ref() {
                Function::Builtin(builtin) => call_builtin(self, *builtin, this, args),
                Function::Script(script) => self.call_script(script, this, args),
            },
            other => Err(HostError::Type(format!(
                "{} is not a function (typeof {})",
                other,
                other.type_name()
            ))),
        }
    }

    fn call_script(
        &self,
        script: &ScriptFunction,
        this: &Value,
        args: &[Value],
    ) -> HostResult<Value> {
        // Sloppy-mode receiver: an undefined `this` becomes the global object.
        let this = match this {
            Value::Undefined => self.global(),
            other => other.clone(),
        };
        let vars = script
            .params
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), args.get(i).cloned().unwrap_or(Value::Undefined)))
            .collect();
        let mut scope = Scope { this, vars };

        for stmt in &script.body {
            match stmt {
                Stmt::Return(Some(expr)) => return self.evaluate(expr, &mut scope),
                Stmt::Return(None) => return Ok(Value::Undefined),
                Stmt::Declare { name, init } => {
                    let value = self.evaluate(init, &mut scope)?;
                    scope.vars.insert(name.clone(), value);
                }
                Stmt::Expr(expr) => {
                    self.evaluate(expr, &mut scope)?;
                }
            }
        }

        Ok(Value::Undefined)
    }

    fn lookup(&self, name: &str, scope: &Scope) -> HostResult<Value> {
        if let Some(value) = scope.vars.get(name) {
            return Ok(value.clone());
        }
        match name {
            "undefined" => Ok(Value::Undefined),
            "NaN" => Ok(Value::Number(f64::NAN)),
            "Infinity" => Ok(Value::Number(f64::INFINITY)),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "globalThis" => Ok(self.global()),
            _ => self
                .global
                .properties
                .get(name)
                .cloned()
                .ok_or_else(|| HostError::Reference(name.to_string())),
        }
    }

    fn evaluate(&self, expr: &Expr, scope: &mut Scope) -> HostResult<Value> {
        let caps = self.capabilities();

        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::str(s.as_str())),
            Expr::This => Ok(scope.this.clone()),
            Expr::Ident(name) => self.lookup(name, scope),
            Expr::Array(items) => items
                .iter()
                .map(|item| self.evaluate(item, scope))
                .collect::<HostResult<Vec<_>>>()
                .map(Value::array),
            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand, scope)?;
                Ok(match op {
                    UnaryOp::Not => Value::Bool(!value.to_boolean()),
                    UnaryOp::Plus => Value::Number(value.to_number(caps)),
                    UnaryOp::Minus => Value::Number(-value.to_number(caps)),
                })
            }
            Expr::Chain { first, rest } => {
                let mut acc = self.evaluate(first, scope)?;
                for (op, operand) in rest {
                    let rhs = self.evaluate(operand, scope)?;
                    acc = self.binary(*op, &acc, &rhs);
                }
                Ok(acc)
            }
            Expr::Member { object, property } => {
                let target = self.evaluate(object, scope)?;
                let key = self.evaluate(property, scope)?.to_property_key(caps);
                get_property(&target, &key)
            }
            Expr::Call { callee, args } => {
                // A member callee supplies the receiver.
                let (function, this) = match callee.as_ref() {
                    Expr::Member { object, property } => {
                        let target = self.evaluate(object, scope)?;
                        let key = self.evaluate(property, scope)?.to_property_key(caps);
                        (get_property(&target, &key)?, target)
                    }
                    other => (self.evaluate(other, scope)?, Value::Undefined),
                };
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg, scope))
                    .collect::<HostResult<Vec<_>>>()?;
                self.call(&function, &this, &args)
            }
        }
    }

    fn binary(&self, op: BinaryOp, lhs: &Value, rhs: &Value) -> Value {
        let caps = self.capabilities();

        match op {
            BinaryOp::Add => {
                let left = lhs.to_primitive(caps);
                let right = rhs.to_primitive(caps);
                if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
                    let mut joined = left.to_js_string(caps);
                    joined.push_str(&right.to_js_string(caps));
                    Value::str(joined)
                } else {
                    Value::Number(left.to_number(caps) + right.to_number(caps))
                }
            }
            BinaryOp::Sub => Value::Number(lhs.to_number(caps) - rhs.to_number(caps)),
            BinaryOp::Mul => Value::Number(lhs.to_number(caps) * rhs.to_number(caps)),
            BinaryOp::Div => Value::Number(lhs.to_number(caps) / rhs.to_number(caps)),
            BinaryOp::Rem => Value::Number(lhs.to_number(caps) % rhs.to_number(caps)),
            BinaryOp::StrictEq => Value::Bool(lhs.strict_equals(rhs)),
            BinaryOp::StrictNe => Value::Bool(!lhs.strict_equals(rhs)),
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}
