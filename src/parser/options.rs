use std::num::NonZeroUsize;

/// Settings for a single parse.
///
/// ```
/// use frontend::parser::options::ParserOptions;
///
/// let options = ParserOptions::default()
///     .with_check_loop_jumps(false)
///     .with_error_limit(Some(10));
/// assert!(!options.check_loop_jumps);
/// assert_eq!(options.error_limit.map(|limit| limit.get()), Some(10));
///
/// // A limit of zero means no limit
/// assert_eq!(ParserOptions::default().with_error_limit(Some(0)).error_limit, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Report `break`/`continue` outside of a loop while parsing. When
    /// disabled the check is left to a later pass.
    pub check_loop_jumps: bool,
    /// Stop after this many errors. `None` reports everything.
    pub error_limit: Option<NonZeroUsize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            check_loop_jumps: true,
            error_limit: None,
        }
    }
}

impl ParserOptions {
    pub fn with_check_loop_jumps(mut self, check_loop_jumps: bool) -> Self {
        self.check_loop_jumps = check_loop_jumps;
        self
    }

    /// Sets the error limit. `Some(0)` is treated like `None`.
    pub fn with_error_limit(mut self, error_limit: Option<usize>) -> Self {
        self.error_limit = error_limit.and_then(NonZeroUsize::new);
        self
    }
}
