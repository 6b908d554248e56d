//! Limits applied while parsing.

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum size of an input document (10MB).
pub const MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Options for `parse_with_options`, `parse_str` and `parse_reader`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// How many arrays/objects may be open at once.
    pub max_depth: usize,
    /// Largest `&str` input accepted by `parse_str`.
    pub max_input_bytes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_bytes: MAX_INPUT_BYTES,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let options = ParseOptions::default();
        assert_eq!(options.max_depth, 100);
        assert_eq!(options.max_input_bytes, 10 * 1024 * 1024);

        let options = options.with_max_depth(3).with_max_input_bytes(64);
        assert_eq!(options, ParseOptions { max_depth: 3, max_input_bytes: 64 });
    }
}
