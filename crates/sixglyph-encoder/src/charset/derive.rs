//! Derivation steps for the character table.
//!
//! Each step only uses entries recorded by earlier steps; the registry
//! drives them in order.

use sixglyph_host::{Builtin, Expected};

use crate::charset::CharacterTable;
use crate::constants::Constants;
use crate::error::{BootstrapError, EncodeError};
use crate::executor::Executor;
use crate::literal::LiteralExpr;
use crate::number::{encode_digits, get_item};
use crate::verify::{checked, Verifier};

/// Expressions reached through `constructor` that later steps build on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorAccess {
    /// `[]["at"]`
    pub at: LiteralExpr,
    /// `"constructor"`
    pub constructor: LiteralExpr,
    /// The `String` constructor.
    pub string: LiteralExpr,
    /// `"toString"`
    pub to_string: LiteralExpr,
}

/// `(+"<10 + k>")["toString"](+"36")` for the k-th lowercase letter.
pub fn lowercase_letter(letter: char, to_string: &LiteralExpr) -> Result<LiteralExpr, EncodeError> {
    if !letter.is_ascii_lowercase() {
        return Err(EncodeError::NotALowercaseLetter(letter));
    }
    let value = 10 + u64::from(letter as u8 - b'a');
    Ok(encode_digits(value)
        .to_number()
        .member(to_string)
        .call(&encode_digits(36).to_number()))
}

pub(crate) fn digits(
    table: &mut CharacterTable,
    verifier: &dyn Verifier,
) -> Result<(), BootstrapError> {
    for digit in 0..=9u8 {
        table.derive(verifier, char::from(b'0' + digit), encode_digits(u64::from(digit)))?;
    }
    Ok(())
}

/// Letters indexed out of `"false"`, `"true"`, `"undefined"` and `"NaN"`,
/// then `c`, `o` and space out of the source text of `[]["at"]`.
pub(crate) fn easy_letters(
    table: &mut CharacterTable,
    constants: &Constants,
    verifier: &dyn Verifier,
) -> Result<LiteralExpr, BootstrapError> {
    let sources: [(&LiteralExpr, &[(char, u64)]); 4] = [
        (&constants.false_string, &[('f', 0), ('a', 1), ('l', 2), ('s', 3), ('e', 4)]),
        (&constants.true_string, &[('t', 0), ('r', 1), ('u', 2)]),
        (&constants.undefined_string, &[('n', 1), ('d', 2), ('i', 5)]),
        (&constants.nan_string, &[('N', 0)]),
    ];
    for (source, picks) in sources {
        for &(character, index) in picks {
            table.derive(verifier, character, get_item(source, index))?;
        }
    }

    let at = checked(
        verifier,
        "[].at",
        LiteralExpr::empty_array().member(&table.spell("at")?),
        Builtin::ArrayAt,
    )?;
    let at_source = at.to_str();
    for (character, index) in [('c', 3), ('o', 6), (' ', 8)] {
        table.derive(verifier, character, get_item(&at_source, index))?;
    }

    Ok(at)
}

/// `S` and `g` from `String`, `m` and `b` from `Number`, `A` from `Array`,
/// and `h` through radix-36 formatting.
pub(crate) fn constructor_access(
    table: &mut CharacterTable,
    constants: &Constants,
    at: LiteralExpr,
    verifier: &dyn Verifier,
) -> Result<ConstructorAccess, BootstrapError> {
    let constructor = checked(
        verifier,
        "\"constructor\"",
        table.spell("constructor")?,
        "constructor",
    )?;

    let string = checked(
        verifier,
        "String",
        constants.empty_string.member(&constructor),
        Builtin::String,
    )?;
    let string_source = string.to_str();
    table.derive(verifier, 'S', get_item(&string_source, 9))?;
    table.derive(verifier, 'g', get_item(&string_source, 14))?;

    let number = checked(verifier, "Number", constants.zero.member(&constructor), Builtin::Number)?;
    let number_source = number.to_str();
    table.derive(verifier, 'm', get_item(&number_source, 11))?;
    table.derive(verifier, 'b', get_item(&number_source, 12))?;

    let array = checked(
        verifier,
        "Array",
        LiteralExpr::empty_array().member(&constructor),
        Builtin::Array,
    )?;
    table.derive(verifier, 'A', get_item(&array.to_str(), 9))?;

    let to_string = checked(verifier, "\"toString\"", table.spell("toString")?, "toString")?;
    table.derive(verifier, 'h', lowercase_letter('h', &to_string)?)?;

    Ok(ConstructorAccess {
        at,
        constructor,
        string,
        to_string,
    })
}

/// `C` and `P` through base64 transcoding on the global object, the rest of
/// the lowercase letters, and `String.fromCodePoint` for everything else.
pub(crate) fn remaining_letters(
    table: &mut CharacterTable,
    constants: &Constants,
    access: &ConstructorAccess,
    executor: &Executor,
    verifier: &dyn Verifier,
) -> Result<LiteralExpr, BootstrapError> {
    let global = checked(
        verifier,
        "the global object",
        executor.run(&table.spell("return this")?),
        Expected::Global,
    )?;
    let btoa = checked(verifier, "btoa", global.member(&table.spell("btoa")?), Builtin::Btoa)?;
    let atob = checked(verifier, "atob", global.member(&table.spell("atob")?), Builtin::Atob)?;

    let spaces = table.spell("   ")?;
    let encoded = checked(verifier, "btoa(\"   \")", btoa.call(&spaces), "ICAg")?;
    table.derive(verifier, 'C', get_item(&encoded, 1))?;

    let upper_a = table.require('A', "01A0")?;
    let payload = LiteralExpr::concat([
        &constants.empty_string,
        &constants.zero,
        &constants.one,
        upper_a,
        &constants.zero,
    ]);
    let decoded = checked(verifier, "atob(\"01A0\")", atob.call(&payload), "\u{d3}P4")?;
    table.derive(verifier, 'P', get_item(&decoded, 1))?;

    for letter in 'a'..='z' {
        if !table.contains(letter) {
            let expr = lowercase_letter(letter, &access.to_string)?;
            table.derive(verifier, letter, expr)?;
        }
    }

    checked(
        verifier,
        "String.fromCodePoint",
        access.string.member(&table.spell("fromCodePoint")?),
        Builtin::StringFromCodePoint,
    )
}
