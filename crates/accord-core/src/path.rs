//! Path templates: ordered literal and parameter segments.
//!
//! A template is declared once per endpoint type and used in both
//! directions. The client renders an instance into percent-encoded path
//! components; the server turns the template into a router pattern and
//! assigns matched components back onto a fresh instance.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{PathError, TemplateError};
use crate::value::{PathValue, PathValueError};

type RenderFn<E> = Arc<dyn Fn(&E) -> String + Send + Sync>;
type AssignFn<E> = Arc<dyn Fn(&mut E, &str) -> Result<(), PathValueError> + Send + Sync>;

/// A reference to one field of an endpoint instance.
pub struct ParamRef<E> {
    name: &'static str,
    render: RenderFn<E>,
    assign: AssignFn<E>,
}

impl<E> ParamRef<E> {
    /// The field identifier, also used as the router placeholder name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<E> Clone for ParamRef<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            render: Arc::clone(&self.render),
            assign: Arc::clone(&self.assign),
        }
    }
}

/// One segment of a [`PathTemplate`].
pub enum PathSegment<E> {
    /// Fixed text, emitted verbatim.
    Literal(Cow<'static, str>),
    /// A field of the endpoint instance.
    Param(ParamRef<E>),
}

impl<E> Clone for PathSegment<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(text) => Self::Literal(text.clone()),
            Self::Param(param) => Self::Param(param.clone()),
        }
    }
}

impl<E> fmt::Debug for PathSegment<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Param(param) => f.debug_tuple("Param").field(&param.name).finish(),
        }
    }
}

/// The ordered path segments of an endpoint.
///
/// # Example
///
/// ```rust
/// use accord_core::PathTemplate;
///
/// #[derive(Default)]
/// struct SetUserName {
///     id: u64,
/// }
///
/// let template = PathTemplate::<SetUserName>::new()
///     .literal("user")
///     .param("id", |e| &e.id, |e, v| e.id = v)
///     .literal("name");
///
/// assert_eq!(template.pattern(), "/user/{id}/name");
/// assert_eq!(
///     template.render(&SetUserName { id: 7 }).unwrap(),
///     vec!["user", "7", "name"]
/// );
/// ```
pub struct PathTemplate<E> {
    segments: Vec<PathSegment<E>>,
}

impl<E: 'static> PathTemplate<E> {
    /// Creates an empty template, which addresses `/`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Appends a literal segment.
    #[must_use]
    pub fn literal(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.segments.push(PathSegment::Literal(text.into()));
        self
    }

    /// Appends a parameter segment bound to one field.
    ///
    /// `get` and `set` may reach into nested records, e.g.
    /// `|e| &e.user.id` and `|e, v| e.user.id = v`.
    #[must_use]
    pub fn param<V>(mut self, name: &'static str, get: fn(&E) -> &V, set: fn(&mut E, V)) -> Self
    where
        V: PathValue + 'static,
    {
        let render: RenderFn<E> = Arc::new(move |endpoint: &E| get(endpoint).to_path_value());
        let assign: AssignFn<E> = Arc::new(move |endpoint: &mut E, raw: &str| {
            set(endpoint, V::from_path_value(raw)?);
            Ok(())
        });
        self.segments.push(PathSegment::Param(ParamRef {
            name,
            render,
            assign,
        }));
        self
    }
}

impl<E> PathTemplate<E> {
    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment<E>] {
        &self.segments
    }

    /// Names of the parameter segments in order.
    pub fn param_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Param(param) => Some(param.name),
            PathSegment::Literal(_) => None,
        })
    }

    /// Returns true when the template has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Checks that the template can be registered and rendered.
    ///
    /// Literals must be non-empty path characters (RFC 3986 `pchar` without
    /// percent escapes) and not `.` or `..`. Parameter names must be unique
    /// identifiers made of `[A-Za-z0-9_]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`TemplateError`] found.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let mut seen = HashSet::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Literal(text) => validate_literal(text)?,
                PathSegment::Param(param) => {
                    let valid = !param.name.is_empty()
                        && param
                            .name
                            .bytes()
                            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
                    if !valid {
                        return Err(TemplateError::InvalidParamName(param.name));
                    }
                    if !seen.insert(param.name) {
                        return Err(TemplateError::DuplicateParam(param.name));
                    }
                }
            }
        }
        Ok(())
    }

    /// Renders `endpoint` into ordered, percent-encoded path components.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Unencodable`] when a parameter renders to an
    /// empty string, `.` or `..`, none of which survive as one component.
    pub fn render(&self, endpoint: &E) -> Result<Vec<String>, PathError> {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => Ok(text.to_string()),
                PathSegment::Param(param) => {
                    let raw = (param.render)(endpoint);
                    match raw.as_str() {
                        "" => Err(PathError::Unencodable {
                            field: param.name,
                            reason: "value is empty",
                        }),
                        "." | ".." => Err(PathError::Unencodable {
                            field: param.name,
                            reason: "dot segments are normalized away",
                        }),
                        _ => Ok(urlencoding::encode(&raw).into_owned()),
                    }
                }
            })
            .collect()
    }

    /// Renders `endpoint` as an absolute path such as `/user/42/name`.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_path(&self, endpoint: &E) -> Result<String, PathError> {
        let components = self.render(endpoint)?;
        if components.is_empty() {
            return Ok("/".to_string());
        }
        let mut path = String::new();
        for component in components {
            path.push('/');
            path.push_str(&component);
        }
        Ok(path)
    }

    /// The router pattern, with every parameter written as `{name}`.
    #[must_use]
    pub fn pattern(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut pattern = String::new();
        for segment in &self.segments {
            pattern.push('/');
            match segment {
                PathSegment::Literal(text) => pattern.push_str(text),
                PathSegment::Param(param) => {
                    pattern.push('{');
                    pattern.push_str(param.name);
                    pattern.push('}');
                }
            }
        }
        pattern
    }

    /// Collects the decoded value of every parameter from `lookup`, which
    /// maps a parameter name to its raw, percent-encoded component.
    ///
    /// # Errors
    ///
    /// [`PathError::Missing`] when `lookup` has no value for a parameter,
    /// [`PathError::Undecodable`] when the value is not percent-encoded UTF-8.
    pub fn extract<'a, F>(&self, lookup: F) -> Result<Vec<(&'static str, String)>, PathError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.param_names()
            .map(|field| {
                let raw = lookup(field).ok_or(PathError::Missing { field })?;
                let decoded =
                    urlencoding::decode(raw).map_err(|_| PathError::Undecodable { field })?;
                Ok((field, decoded.into_owned()))
            })
            .collect()
    }

    /// Extracts every parameter and assigns it onto `endpoint`.
    ///
    /// # Errors
    ///
    /// As [`extract`](Self::extract), plus [`PathError::Invalid`] when a
    /// value does not parse as its field's type.
    pub fn assign<'a, F>(&self, endpoint: &mut E, lookup: F) -> Result<(), PathError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let values = self.extract(lookup)?;
        let params = self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Param(param) => Some(param),
            PathSegment::Literal(_) => None,
        });
        for (param, (field, value)) in params.zip(values) {
            (param.assign)(endpoint, &value)
                .map_err(|source| PathError::Invalid { field, source })?;
        }
        Ok(())
    }
}

impl<E: 'static> Default for PathTemplate<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for PathTemplate<E> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
        }
    }
}

impl<E> fmt::Debug for PathTemplate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathTemplate")
            .field("pattern", &self.pattern())
            .finish()
    }
}

fn validate_literal(text: &str) -> Result<(), TemplateError> {
    let invalid = |reason| TemplateError::InvalidLiteral {
        segment: text.to_string(),
        reason,
    };
    match text {
        "" => return Err(invalid("literal is empty")),
        "." | ".." => return Err(invalid("dot segments are normalized away")),
        _ => {}
    }
    let is_pchar = |c: char| {
        c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@".contains(c)
    };
    if text.chars().all(is_pchar) {
        Ok(())
    } else {
        Err(invalid("only unescaped path characters are allowed"))
    }
}
