use crate::parser::code_parser::ParsedFiles;
use std::collections::{BTreeSet, HashMap};

/// Position of an element within a parsed batch. Overloads share a name
/// but never an id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId {
    pub file_key: String,
    pub index: usize,
}

impl ElementId {
    pub fn new(file_key: &str, index: usize) -> Self {
        Self {
            file_key: file_key.to_string(),
            index,
        }
    }
}

/// Callers of each element name across a parsed batch, by literal name
/// matching on `referenced_names`.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    /// name -> (caller label, caller id)
    callers: HashMap<String, BTreeSet<(String, ElementId)>>,
}

impl ReferenceIndex {
    pub fn build(parsed: &ParsedFiles) -> Self {
        let mut callers: HashMap<String, BTreeSet<(String, ElementId)>> = HashMap::new();

        for (file_key, elements) in &parsed.files {
            for (index, element) in elements.iter().enumerate() {
                let label = format!("{}.{}", file_key, element.name);
                let id = ElementId::new(file_key, index);
                for name in &element.referenced_names {
                    callers
                        .entry(name.clone())
                        .or_default()
                        .insert((label.clone(), id.clone()));
                }
            }
        }

        Self { callers }
    }

    /// Sorted, deduplicated `File.Name` labels of the callers of `name`,
    /// excluding the element `own` itself.
    pub fn callers_of(&self, name: &str, own: &ElementId) -> Vec<String> {
        let mut labels: Vec<String> = self
            .callers
            .get(name)
            .map(|set| {
                set.iter()
                    .filter(|(_, id)| id != own)
                    .map(|(label, _)| label.clone())
                    .collect()
            })
            .unwrap_or_default();
        labels.dedup();
        labels
    }
}
