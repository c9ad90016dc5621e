use sixglyph_host::Builtin;

use crate::charset::CharacterTable;
use crate::error::BootstrapError;
use crate::literal::LiteralExpr;
use crate::verify::{checked, Verifier};

/// Runs program text through the `Function` constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executor {
    function: LiteralExpr,
}

impl Executor {
    /// Reaches `Function` as `[]["at"]["constructor"]` and checks that a
    /// constructed body actually runs.
    pub(crate) fn derive(
        at: &LiteralExpr,
        constructor: &LiteralExpr,
        table: &CharacterTable,
        verifier: &dyn Verifier,
    ) -> Result<Self, BootstrapError> {
        let function = checked(verifier, "Function", at.member(constructor), Builtin::Function)?;
        let executor = Self { function };
        checked(
            verifier,
            "Function(\"return 3\")()",
            executor.run(&table.spell("return 3")?),
            3.0,
        )?;
        Ok(executor)
    }

    pub fn function(&self) -> &LiteralExpr {
        &self.function
    }

    /// `Function(program)()`
    pub fn run(&self, program: &LiteralExpr) -> LiteralExpr {
        self.function.call(program).invoke()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_shape() {
        let executor = Executor {
            function: LiteralExpr::parse("[][[]]").unwrap(),
        };
        let program = LiteralExpr::parse("[]+[]").unwrap();
        assert_eq!(executor.run(&program).as_str(), "[][[]]([]+[])()");
    }
}
