//! Small in-memory registries: a lending library, bank accounts and
//! id-keyed rosters of employees and students.

pub mod bank;
pub mod library;
pub mod roster;

pub use bank::{Account, Bank};
pub use library::{Book, Library};
pub use roster::{Employee, Record, Roster, Student};
