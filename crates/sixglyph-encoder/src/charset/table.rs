use indexmap::IndexMap;

use crate::error::BootstrapError;
use crate::literal::LiteralExpr;
use crate::verify::Verifier;

/// Characters with a known alphabet-only encoding, in derivation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterTable {
    entries: IndexMap<char, LiteralExpr>,
}

impl CharacterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, character: char) -> Option<&LiteralExpr> {
        self.entries.get(&character)
    }

    pub fn contains(&self, character: char) -> bool {
        self.entries.contains_key(&character)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &LiteralExpr)> {
        self.entries.iter().map(|(c, expr)| (*c, expr))
    }

    /// Looks up `character`, naming `word` as the reason it was needed.
    pub fn require(&self, character: char, word: &str) -> Result<&LiteralExpr, BootstrapError> {
        self.get(character).ok_or_else(|| BootstrapError::MissingEntry {
            character,
            word: word.to_string(),
        })
    }

    /// Concatenates the entries for each character of `word`.
    pub fn spell(&self, word: &str) -> Result<LiteralExpr, BootstrapError> {
        let parts = word
            .chars()
            .map(|c| self.require(c, word))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LiteralExpr::concat(parts))
    }

    pub(crate) fn insert(
        &mut self,
        character: char,
        expr: LiteralExpr,
    ) -> Result<(), BootstrapError> {
        if self.contains(character) {
            return Err(BootstrapError::DuplicateEntry(character));
        }
        self.entries.insert(character, expr);
        Ok(())
    }

    /// Verifies `expr` evaluates to `character`, then records it.
    pub(crate) fn derive(
        &mut self,
        verifier: &dyn Verifier,
        character: char,
        expr: LiteralExpr,
    ) -> Result<(), BootstrapError> {
        if self.contains(character) {
            return Err(BootstrapError::DuplicateEntry(character));
        }
        verifier.verify(&format!("{:?}", character), &expr, &character.into())?;
        self.insert(character, expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::SkipVerification;

    fn lit(text: &str) -> LiteralExpr {
        LiteralExpr::parse(text).unwrap()
    }

    #[test]
    fn test_entries_are_write_once() {
        let mut table = CharacterTable::new();
        table.insert('f', lit("(![]+[])[+[]]")).unwrap();
        assert_eq!(
            table.insert('f', lit("[]")),
            Err(BootstrapError::DuplicateEntry('f'))
        );
        assert_eq!(
            table.derive(&SkipVerification, 'f', lit("[]")),
            Err(BootstrapError::DuplicateEntry('f'))
        );
        assert_eq!(table.get('f').unwrap().as_str(), "(![]+[])[+[]]");
    }

    #[test]
    fn test_spell_names_the_missing_character() {
        let mut table = CharacterTable::new();
        table.insert('a', lit("(![]+[])[+!![]]")).unwrap();
        assert_eq!(
            table.spell("at"),
            Err(BootstrapError::MissingEntry {
                character: 't',
                word: "at".to_string()
            })
        );
    }

    #[test]
    fn test_iteration_keeps_derivation_order() {
        let mut table = CharacterTable::new();
        for c in ['z', 'a', 'm'] {
            table.insert(c, lit("[]")).unwrap();
        }
        let order: String = table.iter().map(|(c, _)| c).collect();
        assert_eq!(order, "zam");
        assert_eq!(table.len(), 3);
    }
}
