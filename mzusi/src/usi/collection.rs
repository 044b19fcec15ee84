use serde::{Deserialize, Serialize};

/// The shape of a collection identifier: a fixed prefix followed by a fixed number of digits
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CollectionTemplate {
    /// The name of the repository or collection type
    pub name: String,
    /// The literal prefix, case sensitive
    pub prefix: String,
    /// The exact number of digits after the prefix
    pub digits: usize,
}

impl CollectionTemplate {
    /// Create a new template
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, digits: usize) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            digits,
        }
    }

    /// Check if the identifier has the shape of this template
    pub fn matches(&self, identifier: &str) -> bool {
        identifier.strip_prefix(self.prefix.as_str()).is_some_and(|number| {
            number.len() == self.digits && number.bytes().all(|b| b.is_ascii_digit())
        })
    }
}

/// The settings for the USI parser
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UsiSettings {
    /// All known collection identifier shapes, tried in order
    pub collections: Vec<CollectionTemplate>,
}

impl Default for UsiSettings {
    fn default() -> Self {
        Self {
            collections: vec![
                CollectionTemplate::new("ProteomeXchange dataset", "PXD", 6),
                CollectionTemplate::new("ProteomeXchange library", "PXL", 6),
                CollectionTemplate::new("MassIVE", "MSV", 9),
                CollectionTemplate::new("PeptideAtlas", "PASS", 5),
                CollectionTemplate::new("jPOST", "JPST", 6),
                CollectionTemplate::new("iProX", "IPX", 10),
            ],
        }
    }
}

impl UsiSettings {
    /// Read the settings from JSON
    /// # Errors
    /// If the text is not valid JSON or does not have the expected structure.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Add another collection template
    #[must_use]
    pub fn with_collection(mut self, template: CollectionTemplate) -> Self {
        self.collections.push(template);
        self
    }

    /// Find the template the identifier matches
    pub fn collection(&self, identifier: &str) -> Option<&CollectionTemplate> {
        self.collections.iter().find(|t| t.matches(identifier))
    }
}
