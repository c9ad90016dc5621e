pub mod derive;
mod table;

pub use derive::{lowercase_letter, ConstructorAccess};
pub use table::CharacterTable;
