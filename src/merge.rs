// 🔀 Merge-on-load strategies
//
// How hydrated file content combines with caller-supplied defaults.
// Sets and sequences default to Additive, mappings to Overwrite.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Defaults are kept as-is; file content only adds.
    /// Set: file elements with a known identity are ignored.
    /// Sequence: file elements are appended after the defaults.
    /// Mapping: file entries only fill keys the defaults lack.
    Additive,

    /// File content wins.
    /// Set: a file element replaces the default with the same identity.
    /// Sequence: file content replaces the defaults entirely.
    /// Mapping: file values overwrite default keys.
    Overwrite,
}
