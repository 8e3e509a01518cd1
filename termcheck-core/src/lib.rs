//! # Termcheck Core
//!
//! Drives a fixed, timed sequence of ANSI/VT100 control codes at a terminal
//! so an operator can check cursor positioning and erase handling by eye.

pub mod ansi;
pub mod error;
pub mod exerciser;
pub mod script;

pub use ansi::{ControlSequence, EraseMode};
pub use error::ExerciseError;
pub use exerciser::{Exerciser, Outcome, RunReport};
pub use script::{Script, Step, UnitKind, WriteUnit};
