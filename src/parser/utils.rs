//! Label escaping for writing Newick strings.
//!
//! Names are stored unescaped. Names containing Newick metacharacters are
//! wrapped in single quotes, with internal single quotes doubled; plain
//! names only have their spaces replaced by underscores.

/// Characters that force a label to be quoted.
const SPECIAL_CHARS: &[char] = &[',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Escapes a label for use in a Newick string.
///
/// # Examples
/// ```
/// # use cftools::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label("'x'"), "'''x'''");
/// assert_eq!(escape_label("55.95/19.05/20.24/4.76"), "55.95/19.05/20.24/4.76");
/// ```
pub fn escape_label(label: &str) -> String {
    if label.contains(SPECIAL_CHARS) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}
