//! Element Attributes
//!
//! Ordered attribute storage: get, set, remove, has, toggle.

/// Named node map (attribute collection)
///
/// Attribute names are stored lowercased; insertion order is preserved
/// so serialisation stays stable across set/remove cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn length(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.attributes[i].value.as_str())
    }

    /// Set attribute, returning the previous value if there was one
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        match self.position(name) {
            Some(i) => Some(std::mem::replace(&mut self.attributes[i].value, value.to_string())),
            None => {
                self.attributes.push(Attr::new(name, value));
                None
            }
        }
    }

    /// Remove attribute by name
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attr> {
        self.position(name).map(|i| self.attributes.remove(i))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Toggle a boolean attribute
    pub fn toggle_attribute(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = match force {
            Some(force) => force,
            None => !self.has_attribute(name),
        };
        if present {
            if !self.has_attribute(name) {
                self.set_attribute(name, "");
            }
        } else {
            self.remove_attribute(name);
        }
        present
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}
