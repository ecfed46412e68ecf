//! Annotation comments attached to tree vertices.
//!
//! IQ-TREE (like BEAST and other tools) writes per-vertex statistics into
//! Nexus comments of the form
//! `[&label="100",sCF="43.44",sCF/sDF1/sDF2="43.44/42.83/13.73"]`.
//! This module splits the raw comment content (without brackets) into
//! [AnnotationField]s following the grammar
//!
//! ```text
//! comment ::= ['&'] field (',' field)*
//! field   ::= key ['=' value]
//! value   ::= '"' any-but-quote* '"' | bare
//! ```
//!
//! Commas inside double quotes belong to the value.

// =#========================================================================#=
// ANNOTATION FIELD
// =#========================================================================#=
/// A single `key=value` field from an annotation comment.
///
/// The key is trimmed of surrounding whitespace. The value is `None` for
/// fields without `=` and otherwise holds the text after the first `=`,
/// with one layer of enclosing double quotes removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationField<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> AnnotationField<'a> {
    /// Parses a single field, splitting on its first `=`.
    ///
    /// # Example
    /// ```
    /// use cftools::model::AnnotationField;
    ///
    /// let field = AnnotationField::parse(" sCF=\"43.44\"");
    /// assert_eq!(field.key, "sCF");
    /// assert_eq!(field.value, Some("43.44"));
    /// assert_eq!(AnnotationField::parse("flag").value, None);
    /// ```
    pub fn parse(field: &'a str) -> Self {
        match field.split_once('=') {
            Some((key, value)) => AnnotationField {
                key: key.trim(),
                value: Some(unquote(value)),
            },
            None => AnnotationField {
                key: field.trim(),
                value: None,
            },
        }
    }
}

/// Removes one leading and one trailing double quote, each if present.
///
/// # Example
/// ```
/// use cftools::model::annotation::unquote;
///
/// assert_eq!(unquote("\"43.44\""), "43.44");
/// assert_eq!(unquote("100"), "100");
/// assert_eq!(unquote("\"\"x\"\""), "\"x\"");
/// ```
pub fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Returns an iterator over the non-empty fields of an annotation comment.
///
/// A leading `&` marker is dropped before splitting.
///
/// # Example
/// ```
/// use cftools::model::annotation::fields;
///
/// let keys: Vec<&str> = fields("&label=\"100\",note=\"a,b\",sCF=\"43.44\"")
///     .map(|f| f.key)
///     .collect();
/// assert_eq!(keys, vec!["label", "note", "sCF"]);
/// ```
pub fn fields(comment: &str) -> impl Iterator<Item = AnnotationField<'_>> {
    let body = comment.trim_start();
    let body = body.strip_prefix('&').unwrap_or(body);

    FieldSplit {
        rest: Some(body),
    }
    .filter(|field| !field.trim().is_empty())
    .map(AnnotationField::parse)
}

/// Returns the value of the first field in `comment` whose key equals `key`
/// and that has a value.
///
/// # Example
/// ```
/// use cftools::model::annotation::find_value;
///
/// let comment = "&label=\"100\",sCF/sDF1/sDF2=\"43.44/42.83/13.73\",sN=\"902.7\"";
/// assert_eq!(find_value(comment, "sCF/sDF1/sDF2"), Some("43.44/42.83/13.73"));
/// assert_eq!(find_value(comment, "label"), Some("100"));
/// assert_eq!(find_value(comment, "gCF/gDF1/gDF2/gDFP"), None);
/// ```
pub fn find_value<'a>(comment: &'a str, key: &str) -> Option<&'a str> {
    fields(comment)
        .find(|field| field.key == key && field.value.is_some())
        .and_then(|field| field.value)
}

/// Splits on commas outside of double quotes.
struct FieldSplit<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for FieldSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let mut in_quotes = false;

        for (i, c) in rest.char_indices() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    self.rest = Some(&rest[i + 1..]);
                    return Some(&rest[..i]);
                }
                _ => {}
            }
        }

        self.rest = None;
        Some(rest)
    }
}
