//! Directory and filename conventions
//!
//! Pure functions: same input → same output, no I/O.
//!
//! ```text
//! segment   := literal | "(" literal ")" | "[" literal "]"
//! filename  := name ("." component)* "." method "." ext
//! name      := "index" | "route" | literal
//! ```

use crate::method::{HttpMethod, UnknownMethod};

/// How a directory name contributes to the route path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `users` → `/users`
    Literal(&'a str),
    /// `(admin)` → nothing; only groups files on disk
    Group(&'a str),
    /// `[id]` → `/:id`
    Dynamic(&'a str),
}

/// Classifies a directory name
///
/// # Examples
///
/// ```
/// use burrow_router::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("users"), Segment::Literal("users"));
/// assert_eq!(classify_segment("(admin)"), Segment::Group("admin"));
/// assert_eq!(classify_segment("[id]"), Segment::Dynamic("id"));
/// ```
pub fn classify_segment(name: &str) -> Segment<'_> {
    if let Some(inner) = name.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return Segment::Group(inner);
    }

    match name.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(param) => Segment::Dynamic(param),
        None => Segment::Literal(name),
    }
}

impl Segment<'_> {
    /// Route prefix for entries inside a directory with this name
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow_router::classify_segment;
    ///
    /// assert_eq!(classify_segment("[id]").extend("/users"), "/users/:id");
    /// assert_eq!(classify_segment("(auth)").extend("/users"), "/users");
    /// assert_eq!(classify_segment("posts").extend(""), "/posts");
    /// ```
    pub fn extend(&self, prefix: &str) -> String {
        match self {
            Segment::Group(_) => prefix.to_string(),
            Segment::Dynamic(param) => format!("{}/:{}", prefix, param),
            Segment::Literal(name) => format!("{}/{}", prefix, name),
        }
    }
}

/// A filename split into route name and method token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFileName<'a> {
    /// Everything before the method token (`users.export` in `users.export.get.rs`)
    pub name: String,
    /// Trailing token, parsed
    pub method: Result<HttpMethod, UnknownMethod>,
    /// Trailing token as written
    pub token: &'a str,
}

/// Splits `file_name` if it carries the `.{extension}` suffix
///
/// Returns `None` for files with another extension. Files with the right
/// extension but no method token still come back, with `method` set to `Err`.
///
/// # Examples
///
/// ```
/// use burrow_router::{parse_file_name, HttpMethod};
///
/// let parsed = parse_file_name("index.post.rs", "rs").unwrap();
/// assert_eq!(parsed.name, "index");
/// assert_eq!(parsed.method, Ok(HttpMethod::Post));
///
/// assert!(parse_file_name("utils.rs", "rs").unwrap().method.is_err());
/// assert!(parse_file_name("notes.md", "rs").is_none());
/// ```
pub fn parse_file_name<'a>(file_name: &'a str, extension: &str) -> Option<RouteFileName<'a>> {
    let stem = file_name
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))?;

    let (name, token) = match stem.rsplit_once('.') {
        Some((name, token)) => (name, token),
        None => ("", stem),
    };

    Some(RouteFileName {
        name: name.to_string(),
        method: token.parse(),
        token,
    })
}

/// Resolves the route path for a file named `name` under `prefix`
///
/// `index` and `route` stand for the directory itself.
///
/// # Examples
///
/// ```
/// use burrow_router::resolve_route_path;
///
/// assert_eq!(resolve_route_path("/users", "index"), "/users");
/// assert_eq!(resolve_route_path("", "route"), "/");
/// assert_eq!(resolve_route_path("/users", "profile"), "/users/profile");
/// ```
pub fn resolve_route_path(prefix: &str, name: &str) -> String {
    match name {
        "index" | "route" if prefix.is_empty() => "/".to_string(),
        "index" | "route" => prefix.to_string(),
        _ => format!("{}/{}", prefix, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbalanced_markers_are_literal() {
        assert_eq!(classify_segment("(admin"), Segment::Literal("(admin"));
        assert_eq!(classify_segment("id]"), Segment::Literal("id]"));
        assert_eq!(classify_segment("("), Segment::Literal("("));
    }

    #[test]
    fn test_dotted_names_keep_inner_dots() {
        let parsed = parse_file_name("sitemap.xml.get.rs", "rs").unwrap();
        assert_eq!(parsed.name, "sitemap.xml");
        assert_eq!(parsed.method, Ok(HttpMethod::Get));
        assert_eq!(resolve_route_path("", &parsed.name), "/sitemap.xml");
    }

    #[test]
    fn test_bare_method_file_has_empty_name() {
        let parsed = parse_file_name("get.rs", "rs").unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.method, Ok(HttpMethod::Get));
    }

    #[test]
    fn test_extension_must_follow_a_dot() {
        assert!(parse_file_name("index.getrs", "rs").is_none());
        assert!(parse_file_name("index.get.ts", "rs").is_none());
        assert!(parse_file_name("index.get.ts", "ts").is_some());
    }

    #[test]
    fn test_unknown_token_is_reported() {
        let parsed = parse_file_name("types.rs", "rs").unwrap();
        assert_eq!(parsed.token, "types");
        assert!(parsed.method.is_err());
    }
}
