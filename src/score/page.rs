// Page - the canvas-side container of placed symbols
// Symbols are stored in placement order; reading order is derived by X

use crate::score::symbol::{Accidental, Symbol, SymbolId, SymbolKind};

/// A single page of placed symbols
///
/// The page exclusively owns its symbols. Hit-testing walks placement
/// order; playback consumes the reading-order view.
#[derive(Debug, Clone, Default)]
pub struct Page {
    symbols: Vec<Symbol>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// All symbols in placement order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Add a symbol and return its id
    pub fn add(&mut self, symbol: Symbol) -> SymbolId {
        let id = symbol.id;
        self.symbols.push(symbol);
        id
    }

    /// Remove a symbol by id
    pub fn remove(&mut self, id: SymbolId) -> Option<Symbol> {
        if let Some(index) = self.symbols.iter().position(|s| s.id == id) {
            Some(self.symbols.remove(index))
        } else {
            None
        }
    }

    /// Get a symbol by id
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// Get a mutable symbol by id
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.iter_mut().find(|s| s.id == id)
    }

    /// Clear a note's accidental. Returns true only if the note had one.
    pub fn clear_accidental(&mut self, id: SymbolId) -> bool {
        match self.get_mut(id) {
            Some(Symbol {
                kind: SymbolKind::Note { accidental, .. },
                ..
            }) if *accidental != Accidental::None => {
                *accidental = Accidental::None;
                true
            }
            _ => false,
        }
    }

    /// Symbols sorted left to right by X (stable, so placement order
    /// breaks ties)
    pub fn in_reading_order(&self) -> Vec<Symbol> {
        let mut ordered = self.symbols.clone();
        ordered.sort_by_key(|s| s.x);
        ordered
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
