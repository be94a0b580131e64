//! One concrete way of running an entity's query.

const NAMESPACE_PLACEHOLDER: &str = "{namespace}";
const WHERE_PLACEHOLDER: &str = "{where}";

/// Destination, catalog and extra filter for one task built from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskVariant {
    /// Archive entry the rows are written to.
    pub destination: String,
    /// Catalog substituted for `{namespace}`.
    pub namespace: String,
    /// Filter substituted for `{where}`, including its leading space.
    pub where_clause: String,
}

impl TaskVariant {
    /// Create a variant without an extra filter.
    pub fn new(destination: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            namespace: namespace.into(),
            where_clause: String::new(),
        }
    }

    /// Set the variant's extra filter.
    pub fn with_where(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    /// Substitute this variant's namespace and filter into a template.
    ///
    /// Substitution is a single left-to-right pass, so text coming from the
    /// namespace or filter is never rescanned for placeholders. Anything else
    /// in the template, including unknown `{...}` text, is copied unchanged.
    pub fn format(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + self.namespace.len());
        let mut rest = template;

        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if let Some(after) = tail.strip_prefix(NAMESPACE_PLACEHOLDER) {
                out.push_str(&self.namespace);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(WHERE_PLACEHOLDER) {
                out.push_str(&self.where_clause);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);

        out
    }
}
