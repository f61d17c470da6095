use std::collections::HashSet;
use typepath_model::TypeDescriptor;

/// One type an expression can evaluate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult<C> {
    pub resolved_type: TypeDescriptor,
    /// Caller-supplied tag of the run that produced this result
    pub category: C,
    /// Rendered path that reaches the type; absent for results that do not
    /// come from walking a path (`exists()`)
    pub path: Option<String>,
}

impl<C> ResolutionResult<C> {
    pub fn new(resolved_type: TypeDescriptor, category: C, path: Option<String>) -> Self {
        Self {
            resolved_type,
            category,
            path,
        }
    }

    pub fn type_name(&self) -> &str {
        self.resolved_type.name()
    }
}

/// Keep the first result for each resolved type, preserving first-seen order
pub fn deduplicate<C>(results: Vec<ResolutionResult<C>>) -> Vec<ResolutionResult<C>> {
    let mut seen = HashSet::new();

    results
        .into_iter()
        .filter(|result| seen.insert(result.resolved_type.clone()))
        .collect()
}
