//! Forbidden-character screening for user-supplied filter and insert values
//!
//! This is a blunt character filter, not a grammar check. It runs before
//! tokenization so that nothing capable of altering SQL structure ever
//! reaches the assembler.

/// Characters rejected on the filter/search path
pub const FORBIDDEN_FILTER: &[char] = &[';', '(', ')', '-', '"', '\''];

/// Characters rejected on the insert path (`-` is allowed for ISO dates)
pub const FORBIDDEN_INSERT: &[char] = &[';', '(', ')', '"', '\''];

/// Returns true if the input contains none of the filter-path forbidden characters.
pub fn is_clean(input: &str) -> bool {
    !input.contains(FORBIDDEN_FILTER)
}

/// Insert-path variant: permits `-` so date values like `2025-06-01` pass.
pub fn is_clean_insert(input: &str) -> bool {
    !input.contains(FORBIDDEN_INSERT)
}

/// First forbidden filter-path character in the input, if any.
pub fn first_forbidden(input: &str) -> Option<char> {
    input.chars().find(|c| FORBIDDEN_FILTER.contains(c))
}
