/// Configuration options for type resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Collapse each run's results to one per resolved type, keeping the
    /// first seen. When false the raw traversal order is returned.
    pub deduplicate: bool,

    /// Fail with `FieldNotFound` when a path names a field its type does not
    /// declare. When false the walk stops there and the last resolved type is
    /// reported instead.
    pub strict: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            deduplicate: true,
            strict: false,
        }
    }
}

impl ResolverOptions {
    /// Create a new options instance with strict field checking enabled
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    /// Create a new options instance that keeps duplicate results
    pub fn raw() -> Self {
        Self {
            deduplicate: false,
            ..Default::default()
        }
    }
}
