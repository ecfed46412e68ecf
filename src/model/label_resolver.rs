//! Label resolution for Nexus file and Newick tree parsing.
//!
//! This module provides [LabelResolver], which turns the raw leaf labels
//! found in a Newick string into taxon names, using the TRANSLATE command
//! and the TAXA block of a Nexus file where available.

use std::collections::HashMap;

// =#========================================================================#=
// LABEL RESOLVER
// =#========================================================================#=
/// Resolves leaf labels in Newick strings during parsing.
///
/// A label is resolved in order:
/// 1. Key provided by TRANSLATE map
///    (e.g. "terny" -> "White-fronted tern")
/// 2. Integer as 1-based index of label in TAXA block
///    (e.g. 12 -> "White-fronted tern")
/// 3. Verbatim label
///    ("White-fronted tern" -> "White-fronted tern")
///
/// The [Default] resolver has neither map nor taxa and keeps all labels
/// verbatim, as used for raw Newick strings.
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    translation: HashMap<String, String>,
    taxa: Vec<String>,
}

impl LabelResolver {
    /// Creates a resolver that keeps every label verbatim.
    pub fn verbatim() -> Self {
        Self::default()
    }

    /// Creates a resolver from a TRANSLATE mapping (key -> taxon label) and
    /// the TAXLABELS of a TAXA block (empty if the file has none).
    pub fn for_nexus(translation: HashMap<String, String>, taxa: Vec<String>) -> Self {
        LabelResolver { translation, taxa }
    }

    /// Resolves a raw label into the taxon name.
    ///
    /// # Example
    /// ```
    /// use cftools::model::LabelResolver;
    /// use std::collections::HashMap;
    ///
    /// let translation = HashMap::from([("kea".to_string(), "Nestor notabilis".to_string())]);
    /// let taxa = vec!["Nestor notabilis".to_string(), "Strigops habroptilus".to_string()];
    /// let resolver = LabelResolver::for_nexus(translation, taxa);
    ///
    /// assert_eq!(resolver.resolve("kea"), "Nestor notabilis");
    /// assert_eq!(resolver.resolve("2"), "Strigops habroptilus");
    /// assert_eq!(resolver.resolve("3"), "3");
    /// assert_eq!(resolver.resolve("Kakapo"), "Kakapo");
    /// ```
    pub fn resolve(&self, label: &str) -> String {
        if let Some(translated) = self.translation.get(label) {
            return translated.clone();
        }

        if let Ok(index) = label.parse::<usize>()
            && (1..=self.taxa.len()).contains(&index)
        {
            return self.taxa[index - 1].clone();
        }

        label.to_string()
    }
}
