//! Radix tree node implementation.
//!
//! Each node owns one path segment. Static children are kept sorted so
//! lookups can binary search; a node has at most one parameter child.

use http::Method;

use crate::error::RouteError;
use crate::method_router::MethodRouter;
use crate::params::Params;

/// Type of path segment in the radix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Static path segment (e.g., "users", "api")
    Static,
    /// Named parameter (e.g., "{id}", "{userId}")
    Param(String),
}

/// A node in the radix tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The path segment this node represents
    pub segment: String,

    /// The kind of segment (static or param)
    pub kind: SegmentKind,

    /// Method router for this node (if it's a route endpoint)
    pub methods: Option<MethodRouter<T>>,

    /// Static children, sorted by segment for binary search
    pub static_children: Vec<Node<T>>,

    /// Parameter child (at most one per node)
    pub param_child: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// Creates a new static node.
    #[must_use]
    pub fn new_static(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            kind: SegmentKind::Static,
            methods: None,
            static_children: Vec::new(),
            param_child: None,
        }
    }

    /// Creates a new parameter node.
    #[must_use]
    pub fn new_param(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            segment: format!("{{{name}}}"),
            kind: SegmentKind::Param(name),
            methods: None,
            static_children: Vec::new(),
            param_child: None,
        }
    }

    /// Creates a root node for the tree.
    #[must_use]
    pub fn root() -> Self {
        Self::new_static("")
    }

    /// Inserts the methods of a route into the tree.
    ///
    /// Fails without modifying the leaf if any of the methods is already
    /// registered for the same pattern.
    pub fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) -> Result<(), RouteError> {
        let segments = parse_pattern(pattern)?;
        self.insert_segments(pattern, &segments, methods)
    }

    fn insert_segments(
        &mut self,
        pattern: &str,
        segments: &[(String, SegmentKind)],
        methods: MethodRouter<T>,
    ) -> Result<(), RouteError> {
        let Some(((segment, kind), remaining)) = segments.split_first() else {
            return match &mut self.methods {
                Some(existing) => existing.merge(methods).map_err(|method| RouteError::Conflict {
                    method,
                    pattern: pattern.to_string(),
                }),
                None => {
                    self.methods = Some(methods);
                    Ok(())
                }
            };
        };

        match kind {
            SegmentKind::Static => {
                match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(segment))
                {
                    Ok(i) => self.static_children[i].insert_segments(pattern, remaining, methods),
                    Err(i) => {
                        let mut child = Node::new_static(segment.clone());
                        child.insert_segments(pattern, remaining, methods)?;
                        self.static_children.insert(i, child);
                        Ok(())
                    }
                }
            }
            SegmentKind::Param(name) => {
                if let Some(child) = &mut self.param_child {
                    if let SegmentKind::Param(existing) = &child.kind {
                        if existing != name {
                            return Err(RouteError::ParamNameConflict {
                                pattern: pattern.to_string(),
                                existing: existing.clone(),
                                name: name.clone(),
                            });
                        }
                    }
                    child.insert_segments(pattern, remaining, methods)
                } else {
                    let mut child = Node::new_param(name.clone());
                    child.insert_segments(pattern, remaining, methods)?;
                    self.param_child = Some(Box::new(child));
                    Ok(())
                }
            }
        }
    }

    /// Matches a request path against the tree.
    ///
    /// Returns the method router and the captured parameters if found.
    /// One trailing `/` is ignored; any other empty segment (`/users//7`)
    /// matches nothing.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path
            .strip_suffix('/')
            .filter(|rest| !rest.is_empty())
            .unwrap_or(path);
        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };
        if segments.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        let mut params = Params::new();
        let methods = self.match_segments(&segments, &mut params)?;
        Some((methods, params))
    }

    fn match_segments<'a>(
        &'a self,
        segments: &[&str],
        params: &mut Params,
    ) -> Option<&'a MethodRouter<T>> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.methods.as_ref();
        };

        // Static segments win over parameters
        if let Some(child) = self.find_static_child(segment) {
            if let Some(found) = child.match_segments(remaining, params) {
                return Some(found);
            }
        }

        if let Some(child) = &self.param_child {
            if let SegmentKind::Param(name) = &child.kind {
                let mark = params.len();
                params.push(name.clone(), (*segment).to_string());
                if let Some(found) = child.match_segments(remaining, params) {
                    return Some(found);
                }
                params.truncate(mark);
            }
        }

        None
    }

    fn find_static_child(&self, segment: &str) -> Option<&Node<T>> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}

/// Splits a `/a/{b}/c` pattern into typed segments.
fn parse_pattern(pattern: &str) -> Result<Vec<(String, SegmentKind)>, RouteError> {
    let invalid = |reason: &str| RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    if !pattern.starts_with('/') {
        return Err(invalid("pattern must start with '/'"));
    }

    let mut segments = Vec::new();
    for raw in pattern.split('/').filter(|s| !s.is_empty()) {
        if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("parameter names must be non-empty [A-Za-z0-9_]"));
            }
            if segments
                .iter()
                .any(|(_, kind)| matches!(kind, SegmentKind::Param(n) if n == name))
            {
                return Err(invalid("duplicate parameter name"));
            }
            segments.push((raw.to_string(), SegmentKind::Param(name.to_string())));
        } else if raw.contains(['{', '}']) {
            return Err(invalid("unbalanced braces"));
        } else {
            segments.push((raw.to_string(), SegmentKind::Static));
        }
    }
    Ok(segments)
}

/// Returns true if `method` can be registered in a [`MethodRouter`].
pub(crate) fn is_routable(method: &Method) -> bool {
    MethodRouter::<()>::new().slot_mut(method).is_some()
}
