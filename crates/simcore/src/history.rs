use std::ops::Index;

/// Append-only signal history.
///
/// Always holds at least its initial sample, so `last()` never fails.
/// Consumers get read-only slices; stepping code appends through `push`.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    samples: Vec<T>,
}

impl<T: Copy> History<T> {
    pub fn new(initial: T) -> Self {
        History { samples: vec![initial] }
    }

    pub fn push(&mut self, sample: T) {
        self.samples.push(sample);
    }

    pub fn last(&self) -> T {
        self.samples[self.samples.len() - 1]
    }

    pub fn initial(&self) -> T {
        self.samples[0]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// A history is never empty, so this is always false.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.samples.iter()
    }

    /// Drops everything after the initial sample.
    pub fn reset(&mut self) {
        self.samples.truncate(1);
    }
}

impl<T> Index<usize> for History<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.samples[index]
    }
}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
