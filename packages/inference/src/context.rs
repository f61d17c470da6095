use std::rc::Rc;
use typepath_ast::Expression;
use typepath_model::TypeDescriptor;

/// One member-access step collected while descending a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    /// Type pinned by a cast; when set the field's declared type is not consulted
    pub type_override: Option<TypeDescriptor>,
}

impl PathSegment {
    pub fn new(name: impl Into<String>, type_override: Option<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_override,
        }
    }
}

#[derive(Debug)]
struct SegmentNode {
    segment: PathSegment,
    below: Option<Rc<SegmentNode>>,
}

/// Persistent stack of path segments.
///
/// Pushing returns a new stack that shares everything below the new top, so a
/// branch can extend its path without any sibling branch observing it.
/// Descending `Patient.name` pushes `name` first and `Patient` last, which
/// leaves the stack reading top-to-bottom in source order.
#[derive(Debug, Clone, Default)]
pub struct SegmentPath {
    top: Option<Rc<SegmentNode>>,
    len: usize,
}

impl SegmentPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, segment: PathSegment) -> Self {
        Self {
            top: Some(Rc::new(SegmentNode {
                segment,
                below: self.top.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Most recently pushed segment
    pub fn top(&self) -> Option<&PathSegment> {
        self.top.as_deref().map(|node| &node.segment)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Segments from the top (most recently pushed) down
    pub fn iter(&self) -> SegmentIter<'_> {
        SegmentIter {
            next: self.top.as_deref(),
        }
    }
}

pub struct SegmentIter<'a> {
    next: Option<&'a SegmentNode>,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = &'a PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.below.as_deref();
        Some(&node.segment)
    }
}

/// State threaded through one branch of a resolution.
///
/// Contexts are values: every `with_*` method returns a new context and
/// leaves the receiver untouched, so sibling branches of a union or of a
/// composite resolution each see only their own path.
#[derive(Debug, Clone)]
pub struct ResolutionContext<'e, C> {
    path: SegmentPath,
    root_type: TypeDescriptor,
    enclosing: Option<&'e Expression>,
    cast: Option<TypeDescriptor>,
    category: C,
}

impl<'e, C: Clone> ResolutionContext<'e, C> {
    /// Fresh context for a run starting at `root_type`
    pub fn new(root_type: TypeDescriptor, category: C) -> Self {
        Self {
            path: SegmentPath::new(),
            root_type,
            enclosing: None,
            cast: None,
            category,
        }
    }

    /// Resolve relative to `enclosing`: the first axis reached hands control
    /// to it instead of walking the path.
    pub fn with_enclosing(mut self, enclosing: &'e Expression) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    /// Push a member, pinned to the pending cast if there is one. The cast is
    /// consumed by the push.
    pub fn with_path(&self, name: impl Into<String>) -> Self {
        self.with_segment(name, None)
    }

    /// Push a member with an explicitly known type, falling back to the
    /// pending cast
    pub fn with_segment(&self, name: impl Into<String>, known: Option<TypeDescriptor>) -> Self {
        let type_override = known.or_else(|| self.cast.clone());

        Self {
            path: self.path.push(PathSegment::new(name, type_override)),
            root_type: self.root_type.clone(),
            enclosing: self.enclosing,
            cast: None,
            category: self.category.clone(),
        }
    }

    /// Reinterpret the next member pushed as `type_`
    pub fn with_cast(&self, type_: TypeDescriptor) -> Self {
        Self {
            cast: Some(type_),
            ..self.clone()
        }
    }

    /// Same context with the enclosing expression cleared so it is entered once
    pub fn without_enclosing(&self) -> Self {
        Self {
            enclosing: None,
            ..self.clone()
        }
    }

    pub fn path(&self) -> &SegmentPath {
        &self.path
    }

    pub fn root_type(&self) -> &TypeDescriptor {
        &self.root_type
    }

    pub fn enclosing(&self) -> Option<&'e Expression> {
        self.enclosing
    }

    pub fn cast(&self) -> Option<&TypeDescriptor> {
        self.cast.as_ref()
    }

    pub fn category(&self) -> &C {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &SegmentPath) -> Vec<&str> {
        path.iter().map(|segment| segment.name.as_str()).collect()
    }

    #[test]
    fn test_push_reads_top_down() {
        let path = SegmentPath::new()
            .push(PathSegment::new("name", None))
            .push(PathSegment::new("Patient", None));

        assert_eq!(path.len(), 2);
        assert_eq!(path.top().map(|s| s.name.as_str()), Some("Patient"));
        assert_eq!(names(&path), vec!["Patient", "name"]);
    }

    #[test]
    fn test_branches_do_not_share_pushes() {
        let base = SegmentPath::new().push(PathSegment::new("value", None));
        let left = base.push(PathSegment::new("left", None));
        let right = base.push(PathSegment::new("right", None));

        assert_eq!(names(&base), vec!["value"]);
        assert_eq!(names(&left), vec!["left", "value"]);
        assert_eq!(names(&right), vec!["right", "value"]);
    }

    #[test]
    fn test_cast_is_consumed_by_next_push() {
        let quantity = TypeDescriptor::new("Quantity");
        let ctx = ResolutionContext::new(TypeDescriptor::new("Observation"), "quantity")
            .with_cast(quantity.clone());

        let pinned = ctx.with_path("value");
        assert_eq!(pinned.path().top().unwrap().type_override, Some(quantity));
        assert!(pinned.cast().is_none());

        let next = pinned.with_path("Observation");
        assert_eq!(next.path().top().unwrap().type_override, None);
    }

    #[test]
    fn test_known_type_wins_over_cast() {
        let ctx = ResolutionContext::new(TypeDescriptor::new("Observation"), ())
            .with_cast(TypeDescriptor::new("Quantity"));

        let pinned = ctx.with_segment("value", Some(TypeDescriptor::new("string")));
        assert_eq!(
            pinned.path().top().unwrap().type_override,
            Some(TypeDescriptor::new("string"))
        );
    }

    #[test]
    fn test_with_path_leaves_receiver_untouched() {
        let ctx = ResolutionContext::new(TypeDescriptor::new("Patient"), 1u8);
        let _child = ctx.with_path("name");

        assert!(ctx.path().is_empty());
    }

    #[test]
    fn test_enclosing_cleared_once() {
        let primary = Expression::path("Observation.component");
        let ctx = ResolutionContext::new(TypeDescriptor::new("Observation"), "token")
            .with_enclosing(&primary)
            .with_path("code");

        assert_eq!(ctx.enclosing(), Some(&primary));

        let inner = ctx.without_enclosing();
        assert!(inner.enclosing().is_none());
        assert_eq!(names(inner.path()), vec!["code"]);
        assert_eq!(inner.category(), &"token");
        assert_eq!(inner.root_type(), &TypeDescriptor::new("Observation"));
    }
}
