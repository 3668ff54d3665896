// Score module
// Symbol model, durations, accidentals, and the page container

pub mod duration;
pub mod page;
pub mod symbol;

pub use duration::NoteDuration;
pub use page::Page;
pub use symbol::{Accidental, Symbol, SymbolId, SymbolKind, generate_symbol_id};
