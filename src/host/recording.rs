//! In-memory [`Host`] that records bindings.

use crate::binding::Binding;
use crate::operation::{Hotkey, Operation};
use crate::traits::Host;
use std::collections::HashMap;
use std::convert::Infallible;

/// Keeps every registered binding in registration order.
///
/// Re-binding a hotkey replaces its operation in place; the hotkey keeps the
/// position of its first registration.
#[derive(Debug, Default)]
pub struct RecordingHost {
    bindings: Vec<Binding>,
    index: HashMap<String, usize>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }

    /// The operation currently bound to `hotkey` (in `key:mods` notation).
    pub fn get(&self, hotkey: &str) -> Option<&Operation> {
        self.index.get(hotkey).map(|&i| &self.bindings[i].operation)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Host for RecordingHost {
    type Error = Infallible;

    fn bind(&mut self, hotkey: &Hotkey, operation: &Operation) -> Result<(), Infallible> {
        let key = hotkey.to_string();
        match self.index.get(&key).copied() {
            Some(i) => self.bindings[i].operation = operation.clone(),
            None => {
                self.index.insert(key, self.bindings.len());
                self.bindings.push(Binding {
                    hotkey: hotkey.clone(),
                    operation: operation.clone(),
                });
            }
        }
        Ok(())
    }
}
