use std::fmt;

use sixglyph_host::Harness;

use crate::charset::derive;
use crate::charset::{CharacterTable, ConstructorAccess};
use crate::compiler::Compiler;
use crate::config::EncoderConfig;
use crate::constants::Constants;
use crate::error::BootstrapError;
use crate::executor::Executor;
use crate::literal::LiteralExpr;
use crate::verify::{SkipVerification, Verifier};

/// Bootstrap stages, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Constants,
    Digits,
    EasyLetters,
    ConstructorAccess,
    Executor,
    RemainingLetters,
    Sealed,
}

impl Phase {
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Constants => Some(Phase::Digits),
            Phase::Digits => Some(Phase::EasyLetters),
            Phase::EasyLetters => Some(Phase::ConstructorAccess),
            Phase::ConstructorAccess => Some(Phase::Executor),
            Phase::Executor => Some(Phase::RemainingLetters),
            Phase::RemainingLetters => Some(Phase::Sealed),
            Phase::Sealed => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Drives the bootstrap one phase at a time.
///
/// Every phase consumes what the previous ones produced; starting a phase
/// early is reported as [`BootstrapError::PhaseOrder`].
pub struct RegistryBuilder<'v> {
    verifier: &'v dyn Verifier,
    completed: Option<Phase>,
    table: CharacterTable,
}

impl<'v> RegistryBuilder<'v> {
    pub fn new(verifier: &'v dyn Verifier) -> Self {
        Self {
            verifier,
            completed: None,
            table: CharacterTable::new(),
        }
    }

    pub fn completed(&self) -> Option<Phase> {
        self.completed
    }

    pub fn table(&self) -> &CharacterTable {
        &self.table
    }

    fn begin(&self, phase: Phase) -> Result<(), BootstrapError> {
        let expected = match self.completed {
            None => Phase::Constants,
            Some(done) => done.next().unwrap_or(Phase::Sealed),
        };
        if phase != expected || self.completed == Some(Phase::Sealed) {
            return Err(BootstrapError::PhaseOrder {
                expected,
                found: phase,
            });
        }
        log::debug!("Starting bootstrap phase {}", phase);
        Ok(())
    }

    fn finish(&mut self, phase: Phase) {
        log::debug!(
            "Finished bootstrap phase {} ({} table entries)",
            phase,
            self.table.len()
        );
        self.completed = Some(phase);
    }

    pub fn constants(&mut self) -> Result<Constants, BootstrapError> {
        self.begin(Phase::Constants)?;
        let constants = Constants::derive(self.verifier)?;
        self.finish(Phase::Constants);
        Ok(constants)
    }

    pub fn digits(&mut self) -> Result<(), BootstrapError> {
        self.begin(Phase::Digits)?;
        derive::digits(&mut self.table, self.verifier)?;
        self.finish(Phase::Digits);
        Ok(())
    }

    /// Returns `[]["at"]`, whose source text supplied `c`, `o` and space.
    pub fn easy_letters(&mut self, constants: &Constants) -> Result<LiteralExpr, BootstrapError> {
        self.begin(Phase::EasyLetters)?;
        let at = derive::easy_letters(&mut self.table, constants, self.verifier)?;
        self.finish(Phase::EasyLetters);
        Ok(at)
    }

    pub fn constructor_access(
        &mut self,
        constants: &Constants,
        at: LiteralExpr,
    ) -> Result<ConstructorAccess, BootstrapError> {
        self.begin(Phase::ConstructorAccess)?;
        let access = derive::constructor_access(&mut self.table, constants, at, self.verifier)?;
        self.finish(Phase::ConstructorAccess);
        Ok(access)
    }

    pub fn executor(&mut self, access: &ConstructorAccess) -> Result<Executor, BootstrapError> {
        self.begin(Phase::Executor)?;
        let executor =
            Executor::derive(&access.at, &access.constructor, &self.table, self.verifier)?;
        self.finish(Phase::Executor);
        Ok(executor)
    }

    /// Returns `String.fromCodePoint`.
    pub fn remaining_letters(
        &mut self,
        constants: &Constants,
        access: &ConstructorAccess,
        executor: &Executor,
    ) -> Result<LiteralExpr, BootstrapError> {
        self.begin(Phase::RemainingLetters)?;
        let from_code_point =
            derive::remaining_letters(&mut self.table, constants, access, executor, self.verifier)?;
        self.finish(Phase::RemainingLetters);
        Ok(from_code_point)
    }

    pub fn seal(
        mut self,
        constants: Constants,
        executor: Executor,
        from_code_point: LiteralExpr,
    ) -> Result<AlphabetRegistry, BootstrapError> {
        self.begin(Phase::Sealed)?;
        self.finish(Phase::Sealed);
        log::info!("Alphabet registry sealed with {} table entries", self.table.len());

        Ok(AlphabetRegistry {
            constants,
            table: self.table,
            executor,
            from_code_point,
        })
    }
}

/// The finished, read-only product of the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetRegistry {
    constants: Constants,
    table: CharacterTable,
    executor: Executor,
    from_code_point: LiteralExpr,
}

impl AlphabetRegistry {
    pub fn bootstrap(config: &EncoderConfig) -> Result<Self, BootstrapError> {
        if config.verify {
            let harness = Harness::new(config.host.clone());
            Self::bootstrap_with(&harness)
        } else {
            Self::bootstrap_with(&SkipVerification)
        }
    }

    pub fn bootstrap_with(verifier: &dyn Verifier) -> Result<Self, BootstrapError> {
        let mut builder = RegistryBuilder::new(verifier);
        let constants = builder.constants()?;
        builder.digits()?;
        let at = builder.easy_letters(&constants)?;
        let access = builder.constructor_access(&constants, at)?;
        let executor = builder.executor(&access)?;
        let from_code_point = builder.remaining_letters(&constants, &access, &executor)?;
        builder.seal(constants, executor, from_code_point)
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn table(&self) -> &CharacterTable {
        &self.table
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn from_code_point(&self) -> &LiteralExpr {
        &self.from_code_point
    }

    pub fn compiler(&self) -> Compiler<'_> {
        Compiler::new(self)
    }
}
