use crate::literal::LiteralExpr;
use crate::number::encode_digits;
use crate::registry::AlphabetRegistry;

/// Counters gathered while encoding one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Code points read from the input.
    pub input_chars: usize,
    pub table_hits: usize,
    /// Code points that went through `String.fromCodePoint`.
    pub fallbacks: usize,
    pub output_len: usize,
}

/// Turns program text into alphabet-only expressions using a sealed registry.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r AlphabetRegistry,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r AlphabetRegistry) -> Self {
        Self { registry }
    }

    /// The table entry for `character`, or a `String.fromCodePoint` call.
    pub fn encode_char(&self, character: char) -> LiteralExpr {
        self.lookup(character)
            .unwrap_or_else(|| self.code_point(character))
    }

    /// An expression evaluating to `text` itself.
    pub fn encode(&self, text: &str) -> LiteralExpr {
        self.encode_counting(text, &mut CompileStats::default())
    }

    /// An expression that runs `text` as a program.
    pub fn compile(&self, text: &str) -> LiteralExpr {
        self.registry.executor().run(&self.encode(text))
    }

    pub fn compile_with_stats(&self, text: &str) -> (LiteralExpr, CompileStats) {
        let mut stats = CompileStats::default();
        let encoded = self.encode_counting(text, &mut stats);
        let program = self.registry.executor().run(&encoded);
        stats.output_len = program.len();

        log::debug!(
            "Compiled {} code points ({} from the table, {} by code point) into {} symbols",
            stats.input_chars,
            stats.table_hits,
            stats.fallbacks,
            stats.output_len
        );
        (program, stats)
    }

    fn lookup(&self, character: char) -> Option<LiteralExpr> {
        self.registry.table().get(character).cloned()
    }

    fn code_point(&self, character: char) -> LiteralExpr {
        let code = encode_digits(u64::from(u32::from(character))).to_number();
        self.registry.from_code_point().call(&code)
    }

    fn encode_counting(&self, text: &str, stats: &mut CompileStats) -> LiteralExpr {
        let parts: Vec<LiteralExpr> = text
            .chars()
            .map(|character| {
                stats.input_chars += 1;
                match self.lookup(character) {
                    Some(expr) => {
                        stats.table_hits += 1;
                        expr
                    }
                    None => {
                        stats.fallbacks += 1;
                        self.code_point(character)
                    }
                }
            })
            .collect();

        let encoded = LiteralExpr::concat(&parts);
        stats.output_len = encoded.len();
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::SkipVerification;

    fn registry() -> AlphabetRegistry {
        AlphabetRegistry::bootstrap_with(&SkipVerification).unwrap()
    }

    #[test]
    fn test_table_characters_are_reused() {
        let registry = registry();
        let compiler = registry.compiler();
        assert_eq!(&compiler.encode_char('f'), registry.table().get('f').unwrap());
        assert_eq!(compiler.encode("f"), compiler.encode_char('f'));
    }

    #[test]
    fn test_unknown_characters_use_code_points() {
        let registry = registry();
        let compiler = registry.compiler();
        let expr = compiler.encode_char('Z');
        assert!(expr.as_str().starts_with(registry.from_code_point().as_str()));
    }

    #[test]
    fn test_empty_input_is_the_empty_string() {
        let registry = registry();
        assert_eq!(registry.compiler().encode("").as_str(), "[]+[]");
    }

    #[test]
    fn test_stats() {
        let registry = registry();
        let (program, stats) = registry.compiler().compile_with_stats("Zap!");
        assert_eq!(
            stats,
            CompileStats {
                input_chars: 4,
                table_hits: 2,
                fallbacks: 2,
                output_len: program.len(),
            }
        );
    }
}
