use crate::context::{PathSegment, ResolutionContext};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ResolveError, ResolveResult};
use crate::options::ResolverOptions;
use crate::result::{deduplicate, ResolutionResult};
use tracing::{debug, instrument};
use typepath_ast::{BinaryOperator, Expression, MemberOperator, BUILTIN_PREFIX};
use typepath_model::{ElementKind, TypeDescriptor, TypeDirectory, BOOLEAN_TYPE_NAME};

/// Static type resolver for path expressions
///
/// Walks an expression tree against a [`TypeDirectory`] and reports every
/// concrete type the expression can evaluate to, with the path reaching it.
pub struct Resolver<'d, D: TypeDirectory + ?Sized> {
    directory: &'d D,
    options: ResolverOptions,
    sink: Option<Box<dyn DiagnosticSink + 'd>>,
}

impl<'d, D: TypeDirectory + ?Sized> Resolver<'d, D> {
    /// Create a new resolver over the given directory with default options
    pub fn new(directory: &'d D) -> Self {
        Self::with_options(directory, ResolverOptions::default())
    }

    pub fn with_options(directory: &'d D, options: ResolverOptions) -> Self {
        Self {
            directory,
            options,
            sink: None,
        }
    }

    /// Also send diagnostic messages to `sink`
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'd) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Main entry point: resolve `primary` starting from the type named
    /// `root_type_name`.
    ///
    /// With no components the primary expression is resolved on its own. With
    /// components, each component is resolved relative to the primary
    /// expression and tagged with its own category; the primary then
    /// contributes no results of its own.
    #[instrument(skip_all, fields(root_type = root_type_name, components = components.len()))]
    pub fn resolve<C: Clone>(
        &self,
        root_type_name: &str,
        primary: (C, &Expression),
        components: &[(C, &Expression)],
    ) -> ResolveResult<Vec<ResolutionResult<C>>> {
        let root_type = self
            .directory
            .resolve_root_type_name(root_type_name)
            .or_else(|| self.directory.find_by_nominal_name(root_type_name))
            .ok_or_else(|| ResolveError::type_name_not_found(root_type_name))?;

        self.resolve_type(&root_type, primary, components)
    }

    /// Same as [`Resolver::resolve`] for an already resolved root type
    pub fn resolve_type<C: Clone>(
        &self,
        root_type: &TypeDescriptor,
        primary: (C, &Expression),
        components: &[(C, &Expression)],
    ) -> ResolveResult<Vec<ResolutionResult<C>>> {
        let (category, expression) = primary;

        if components.is_empty() {
            let ctx = ResolutionContext::new(root_type.clone(), category);
            return self.run(expression, &ctx);
        }

        let mut results = Vec::new();
        for (component_category, component) in components {
            let ctx = ResolutionContext::new(root_type.clone(), component_category.clone())
                .with_enclosing(expression);
            results.extend(self.run(component, &ctx)?);
        }

        Ok(results)
    }

    /// One traversal run, deduplicated on its own
    fn run<C: Clone>(
        &self,
        expression: &Expression,
        ctx: &ResolutionContext<'_, C>,
    ) -> ResolveResult<Vec<ResolutionResult<C>>> {
        let mut results = Vec::new();
        self.visit(expression, ctx, &mut results)?;

        debug!(count = results.len(), "Traversal of '{}' complete", expression);

        if self.options.deduplicate {
            Ok(deduplicate(results))
        } else {
            Ok(results)
        }
    }

    fn visit<C: Clone>(
        &self,
        expr: &Expression,
        ctx: &ResolutionContext<'_, C>,
        out: &mut Vec<ResolutionResult<C>>,
    ) -> ResolveResult<()> {
        debug!(kind = expr.kind_name(), depth = ctx.path().len(), "Visiting '{}'", expr);

        match expr {
            Expression::Child {
                focus,
                operator,
                name,
            } => match (operator, name) {
                (MemberOperator::Children, Some(name)) => self.visit(focus, &ctx.with_path(name), out),
                (MemberOperator::Children, None) => self.visit(focus, ctx, out),
                (MemberOperator::Descendants, _) => {
                    Err(ResolveError::unsupported(expr, "descendants() member access"))
                }
            },

            Expression::Binary {
                operator,
                left,
                right,
            } => self.visit_binary(expr, *operator, left, right, ctx, out),

            Expression::Call {
                focus, function, ..
            } => self.visit_call(expr, focus.as_deref(), function, ctx, out),

            Expression::Axis(_) => match ctx.enclosing() {
                // Relative resolution: the enclosing expression supplies the
                // leading segments of the path
                Some(enclosing) => self.visit(enclosing, &ctx.without_enclosing(), out),
                None => self.walk_path(ctx, out),
            },

            // Arguments are read by the operator or function that owns them
            Expression::Constant(_) => Ok(()),

            Expression::Variable { .. } => Err(ResolveError::unsupported(
                expr,
                "variable references have no static type",
            )),
        }
    }

    fn visit_binary<C: Clone>(
        &self,
        expr: &Expression,
        operator: BinaryOperator,
        left: &Expression,
        right: &Expression,
        ctx: &ResolutionContext<'_, C>,
        out: &mut Vec<ResolutionResult<C>>,
    ) -> ResolveResult<()> {
        use BinaryOperator::*;

        match operator {
            As => {
                let target = self.cast_target(expr, &expr.arguments())?;
                self.visit(right, &ctx.with_cast(target), out)
            }

            // Every operand may produce the value, left to right
            Union | NotEqual | Equal | And => {
                for operand in [left, right] {
                    self.visit(operand, ctx, out)?;
                }
                Ok(())
            }

            other => Err(ResolveError::unsupported(
                expr,
                format!("operator '{}'", other.symbol()),
            )),
        }
    }

    fn visit_call<C: Clone>(
        &self,
        expr: &Expression,
        focus: Option<&Expression>,
        function: &str,
        ctx: &ResolutionContext<'_, C>,
        out: &mut Vec<ResolutionResult<C>>,
    ) -> ResolveResult<()> {
        let focus = match focus {
            Some(focus) => focus,
            None => {
                return Err(ResolveError::unsupported(
                    expr,
                    format!("function '{}' without a receiver", function),
                ))
            }
        };

        let name = function.strip_prefix(BUILTIN_PREFIX).unwrap_or(function);

        match name {
            // Runtime type tag, not a value of the model
            "type" => Ok(()),

            "exists" | "is" => {
                let boolean = self.resolve_type_name(BOOLEAN_TYPE_NAME)?;
                out.push(ResolutionResult::new(boolean, ctx.category().clone(), None));
                Ok(())
            }

            "as" => {
                let target = self.cast_target(expr, &expr.arguments())?;
                self.visit(focus, &ctx.with_cast(target), out)
            }

            // Narrow cardinality, keep the type
            "where" | "children" | "item" => self.visit(focus, ctx, out),

            other => Err(ResolveError::unsupported(
                expr,
                format!("function '{}'", other),
            )),
        }
    }

    /// Walk the collected path through the directory, starting at the first
    /// segment (a root type name, a pinned type, or a field of the root type).
    fn walk_path<C: Clone>(
        &self,
        ctx: &ResolutionContext<'_, C>,
        out: &mut Vec<ResolutionResult<C>>,
    ) -> ResolveResult<()> {
        let segments: Vec<&PathSegment> = ctx.path().iter().collect();

        let first = match segments.first() {
            Some(first) => *first,
            None => {
                // Bare `$this`: the root, or whatever it was cast to
                let current = ctx.cast().unwrap_or(ctx.root_type()).clone();
                out.push(ResolutionResult::new(current, ctx.category().clone(), None));
                return Ok(());
            }
        };

        let mut rendered = String::new();
        let (mut current, start) = if let Some(pinned) = &first.type_override {
            append_segment(&mut rendered, &first.name);
            append_types(&mut rendered, std::slice::from_ref(pinned));
            (pinned.clone(), 1)
        } else if let Some(root) = self.directory.resolve_root_type_name(&first.name) {
            append_segment(&mut rendered, &first.name);
            (root, 1)
        } else {
            // Walked below as a field of the root; rendered once, here
            rendered.push_str(&first.name);
            (ctx.root_type().clone(), 0)
        };

        for (index, segment) in segments.iter().enumerate().skip(start) {
            if let Some(pinned) = &segment.type_override {
                append_segment(&mut rendered, &segment.name);
                append_types(&mut rendered, std::slice::from_ref(pinned));
                current = pinned.clone();
                continue;
            }

            let field = match self.directory.field(&current, &segment.name) {
                Some(field) => field,
                None if self.options.strict => {
                    return Err(ResolveError::FieldNotFound {
                        type_name: current.name().to_string(),
                        field: segment.name.clone(),
                        path: rendered,
                    });
                }
                None => {
                    debug!(
                        "Field '{}' not declared on '{}', stopping at '{}'",
                        segment.name, current, rendered
                    );
                    break;
                }
            };

            if index > 0 {
                append_segment(&mut rendered, &segment.name);
            }

            match &field.kind {
                ElementKind::Concrete(declared) => current = declared.clone(),
                ElementKind::Polymorphic(candidates) => {
                    for candidate in candidates {
                        out.push(ResolutionResult::new(
                            candidate.clone(),
                            ctx.category().clone(),
                            Some(rendered.clone()),
                        ));
                    }

                    append_types(&mut rendered, candidates);
                    self.log_resolved(&rendered);
                    return Ok(());
                }
            }
        }

        self.log_resolved(&rendered);
        out.push(ResolutionResult::new(
            current,
            ctx.category().clone(),
            Some(rendered),
        ));

        Ok(())
    }

    /// Type named by the single string literal among a cast's arguments
    fn cast_target(
        &self,
        node: &Expression,
        arguments: &[&Expression],
    ) -> ResolveResult<TypeDescriptor> {
        let constants: Vec<&Expression> = arguments
            .iter()
            .copied()
            .filter(|argument| argument.is_constant())
            .collect();

        let type_name = match constants.as_slice() {
            [single] => single.as_str_literal(),
            _ => None,
        }
        .ok_or_else(|| ResolveError::malformed_cast(node, constants.len()))?;

        self.resolve_type_name(type_name)
    }

    fn resolve_type_name(&self, name: &str) -> ResolveResult<TypeDescriptor> {
        self.directory
            .resolve_type_name(name)
            .ok_or_else(|| ResolveError::type_name_not_found(name))
    }

    fn log_resolved(&self, path: &str) {
        let message = format!("Resolved path '{}'", path);
        debug!("{}", message);

        if let Some(sink) = &self.sink {
            sink.log(&message);
        }
    }
}

fn append_segment(rendered: &mut String, name: &str) {
    if !rendered.is_empty() {
        rendered.push('.');
    }
    rendered.push_str(name);
}

fn append_types(rendered: &mut String, types: &[TypeDescriptor]) {
    rendered.push('(');
    for (i, type_) in types.iter().enumerate() {
        if i > 0 {
            rendered.push(',');
        }
        rendered.push_str(type_.name());
    }
    rendered.push(')');
}
