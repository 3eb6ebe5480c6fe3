use log::warn;

use crate::error::SimError;
use crate::traits::{Model, Named};

/// Insertion-ordered set of uniquely named entities owned by one simulator.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    owner: String,
    kind: &'static str,
    entries: Vec<T>,
}

impl<T: Named> Registry<T> {
    /// `owner` is the simulator name and `kind` the entity label used in
    /// lookup diagnostics ("motor", "robot", ...).
    pub fn new(owner: impl Into<String>, kind: &'static str) -> Self {
        Registry {
            owner: owner.into(),
            kind,
            entries: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn insert(&mut self, entry: T) -> Result<(), SimError> {
        if self.contains(entry.name()) {
            return Err(SimError::DuplicateName {
                kind: self.kind,
                name: entry.name().to_string(),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes and returns the entry called `name`. A miss is logged and
    /// leaves the registry untouched.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        match self.position(name) {
            Some(index) => Some(self.entries.remove(index)),
            None => {
                self.report_missing(name);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.iter_mut().find(|e| e.name() == name)
    }

    /// Like `get_mut`, but logs when nothing matches.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.position(name) {
            Some(index) => Some(&mut self.entries[index]),
            None => {
                self.report_missing(name);
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    fn report_missing(&self, name: &str) {
        warn!("No {} named {} in simulator {}.", self.kind, name, self.owner);
    }
}

impl<T: Model> Model for Registry<T> {
    fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.reset();
        }
    }
}
