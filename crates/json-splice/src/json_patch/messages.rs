//! Error message catalog.
//!
//! Templates are looked up by [`ErrorKind`] and [`Locale`]; placeholders in
//! braces (`{path}`, `{token}`, ...) are filled from the error payload. The
//! English catalog produces exactly the `Display` text of [`PatchError`].

use super::types::{ErrorKind, PatchError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    De,
}

/// The message template for `kind` in `locale`.
pub fn template(kind: ErrorKind, locale: Locale) -> &'static str {
    match (locale, kind) {
        (Locale::En, ErrorKind::MalformedPointer) => "malformed pointer: {reason}",
        (Locale::En, ErrorKind::InvalidPatch) => "invalid patch{at}: {reason}",
        (Locale::En, ErrorKind::NoSuchParent) => "no parent container for path \"{path}\"",
        (Locale::En, ErrorKind::ParentNotContainer) => {
            "parent of path \"{path}\" is not an array or object"
        }
        (Locale::En, ErrorKind::NotAnIndex) => {
            "token \"{token}\" in path \"{path}\" is not an array index"
        }
        (Locale::En, ErrorKind::NoSuchIndex) => {
            "index {index} is out of bounds for path \"{path}\""
        }
        (Locale::En, ErrorKind::NoSuchPath) => "no value at path \"{path}\"",
        (Locale::En, ErrorKind::ValueMismatch) => {
            "test failed at path \"{path}\": expected {expected}, found {actual}"
        }

        (Locale::De, ErrorKind::MalformedPointer) => "fehlerhafter Zeiger: {reason}",
        (Locale::De, ErrorKind::InvalidPatch) => "ungültiger Patch{at}: {reason}",
        (Locale::De, ErrorKind::NoSuchParent) => {
            "kein übergeordneter Container für Pfad \"{path}\""
        }
        (Locale::De, ErrorKind::ParentNotContainer) => {
            "übergeordnetes Element von Pfad \"{path}\" ist weder Array noch Objekt"
        }
        (Locale::De, ErrorKind::NotAnIndex) => {
            "Token \"{token}\" in Pfad \"{path}\" ist kein Array-Index"
        }
        (Locale::De, ErrorKind::NoSuchIndex) => {
            "Index {index} liegt außerhalb der Grenzen für Pfad \"{path}\""
        }
        (Locale::De, ErrorKind::NoSuchPath) => "kein Wert unter Pfad \"{path}\"",
        (Locale::De, ErrorKind::ValueMismatch) => {
            "Test an Pfad \"{path}\" fehlgeschlagen: erwartet {expected}, gefunden {actual}"
        }
    }
}

fn at_phrase(index: Option<usize>, locale: Locale) -> String {
    match (index, locale) {
        (None, _) => String::new(),
        (Some(i), Locale::En) => format!(" at operation {i}"),
        (Some(i), Locale::De) => format!(" bei Operation {i}"),
    }
}

fn arguments(err: &PatchError, locale: Locale) -> Vec<(&'static str, String)> {
    match err {
        PatchError::MalformedPointer(e) => vec![("reason", e.to_string())],
        PatchError::InvalidPatch { index, reason } => vec![
            ("at", at_phrase(*index, locale)),
            ("reason", reason.clone()),
        ],
        PatchError::NoSuchParent { path }
        | PatchError::ParentNotContainer { path }
        | PatchError::NoSuchPath { path } => vec![("path", path.to_string())],
        PatchError::NotAnIndex { path, token } => {
            vec![("path", path.to_string()), ("token", token.clone())]
        }
        PatchError::NoSuchIndex { path, index } => {
            vec![("path", path.to_string()), ("index", index.to_string())]
        }
        PatchError::ValueMismatch {
            path,
            expected,
            actual,
        } => vec![
            ("path", path.to_string()),
            ("expected", expected.to_string()),
            ("actual", actual.to_string()),
        ],
    }
}

/// Substitutes `{name}` placeholders in a single pass, so argument text that
/// happens to contain braces is never expanded again.
fn fill(template: &str, args: &[(&'static str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find('}') {
            Some(close) => {
                let name = &tail[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders `err` in `locale`.
pub fn render(err: &PatchError, locale: Locale) -> String {
    fill(template(err.kind(), locale), &arguments(err, locale))
}
