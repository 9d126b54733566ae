//! Lexical path manipulation on `/`-separated strings.
//!
//! Build files describe paths as strings. Nothing here touches the
//! filesystem.

/// Join `b` onto `a`. An absolute `b` replaces `a`.
pub fn join(a: &str, b: &str) -> String {
    if b.starts_with('/') || a.is_empty() {
        return b.to_string();
    }
    if b.is_empty() {
        return a.to_string();
    }
    let a = a.trim_end_matches('/');
    format!("{a}/{b}")
}

pub fn is_absolute(p: &str) -> bool {
    p.starts_with('/')
}

/// Final component of `p`.
pub fn basename(p: &str) -> &str {
    let p = p.trim_end_matches('/');
    match p.rfind('/') {
        Some(i) => &p[i + 1..],
        None => p,
    }
}

/// Everything before the final component, or `.` if there is none.
pub fn dirname(p: &str) -> &str {
    let trimmed = p.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(i) => &trimmed[..i],
        None if p.starts_with('/') => "/",
        None => ".",
    }
}

/// Final component without its last extension.
pub fn stem(p: &str) -> &str {
    let base = basename(p);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(i) => &base[..i],
    }
}

/// Collapse `.` components, empty components, and `..` after a named
/// component.
pub fn normalize(p: &str) -> String {
    let absolute = is_absolute(p);
    let mut parts: Vec<&str> = Vec::new();
    for part in p.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }
    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// `p` relative to `base`, when `p` lies underneath it.
pub fn relative_to<'p>(p: &'p str, base: &str) -> Option<&'p str> {
    let base = base.trim_end_matches('/');
    let rest = p.strip_prefix(base)?;
    if rest.is_empty() {
        return Some(".");
    }
    rest.strip_prefix('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_paths() {
        assert_eq!(join("a", "b"), "a/b");
        assert_eq!(join("a/", "b"), "a/b");
        assert_eq!(join("a", "/b"), "/b");
        assert_eq!(join("", "b"), "b");
        assert_eq!(join("a", ""), "a");
        assert_eq!(join("/", "b"), "/b");
    }

    #[test]
    fn components() {
        assert_eq!(basename("src/main.c"), "main.c");
        assert_eq!(basename("main.c"), "main.c");
        assert_eq!(dirname("src/main.c"), "src");
        assert_eq!(dirname("main.c"), ".");
        assert_eq!(dirname("/main.c"), "/");
        assert_eq!(stem("src/main.tar.gz"), "main.tar");
        assert_eq!(stem(".hidden"), ".hidden");
    }

    #[test]
    fn normalize_paths() {
        assert_eq!(normalize("a/./b//c/../d"), "a/b/d");
        assert_eq!(normalize("../a"), "../a");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("a/.."), ".");
    }

    #[test]
    fn relative() {
        assert_eq!(relative_to("/src/a/b", "/src"), Some("a/b"));
        assert_eq!(relative_to("/src", "/src/"), Some("."));
        assert_eq!(relative_to("/srcx/a", "/src"), None);
    }
}
