//! Property sets: the names a client asked a provider to fill in

/// Ordered, duplicate-free set of property names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    names: Vec<String>,
}

impl PropertySet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was already present
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Whether a name is present
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Remove every name
    pub fn clear(&mut self) {
        self.names.clear();
    }
}
