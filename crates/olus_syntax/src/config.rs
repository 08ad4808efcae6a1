//! Parse configuration for Oluś
//!
//! The indentation-aware grammar is the default dialect. The flat dialect (no INDENT/DEDENT, no blocks) is selected
//! with [`ParseConfig::flat`].

/// Parse configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Synthesize INDENT/DEDENT tokens and parse indented blocks
    pub with_indentation: bool,
    /// Number of columns a tab counts for when measuring indentation
    pub tab_width: usize,
    /// Maximum number of syntax nodes a single parse may build
    pub max_nodes: Option<usize>,
    /// Maximum nesting of groups, strings and blocks
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            with_indentation: true,
            tab_width: 4,
            max_nodes: None,
            max_depth: 256,
        }
    }
}

impl ParseConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for the flat dialect: line structure only, leading whitespace is insignificant.
    pub fn flat() -> Self {
        Self::default().with_indentation(false)
    }

    /// Enable or disable indentation awareness
    pub fn with_indentation(mut self, enabled: bool) -> Self {
        self.with_indentation = enabled;
        self
    }

    /// Set the tab width
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Bound the number of nodes in the tree
    pub fn with_max_nodes(mut self, limit: usize) -> Self {
        self.max_nodes = Some(limit);
        self
    }

    /// Bound the nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert!(config.with_indentation);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.max_nodes, None);
        assert_eq!(config.max_depth, 256);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ParseConfig::new(), ParseConfig::default());
    }

    #[test]
    fn test_flat_disables_indentation_only() {
        let config = ParseConfig::flat();
        assert!(!config.with_indentation);
        assert_eq!(config.tab_width, 4);
    }

    #[test]
    fn test_builder_chain() {
        let config = ParseConfig::new()
            .with_tab_width(8)
            .with_max_nodes(100)
            .with_max_depth(3)
            .with_indentation(false);

        assert_eq!(config.tab_width, 8);
        assert_eq!(config.max_nodes, Some(100));
        assert_eq!(config.max_depth, 3);
        assert!(!config.with_indentation);
    }

    #[test]
    fn test_builder_override() {
        let config = ParseConfig::new().with_tab_width(2).with_tab_width(8);
        assert_eq!(config.tab_width, 8); // Last value wins
    }
}
