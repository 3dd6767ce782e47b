//! `Exec=` field code expansion.
//!
//! The value goes through three steps:
//! 1. Desktop Entry string unescaping (`\s`, `\n`, `\t`, `\r`, `\\`).
//! 2. Splitting into arguments following the Exec quoting rules (double quotes only,
//!    with `\"`, `` \` ``, `\$` and `\\` escapes inside quotes).
//! 3. Per-argument field code substitution.
//!
//! URIs are substituted after splitting and the result is meant for direct `execve`-style
//! spawning, so nothing a URI contains is ever interpreted as quoting or as another
//! argument.

// -- crate imports
use url::Url;

// -- module imports
use crate::{
    desktop::DesktopEntry,
    error::{DesktopEntryError, Result},
};

/// Expand `exec` (the main line or an action's line of `de`) with the given URIs.
///
/// Field codes:
/// - `%f` / `%u`: next URI as a local path / verbatim. Dropped with its argument when no
///   URI is left.
/// - `%F` / `%U`: every URI, one argument each.
/// - `%i`: `--icon <Icon>` if `Icon` is set.
/// - `%c`: the entry name. `%k`: the entry file name. `%%`: a literal `%`.
/// - Deprecated (`%d %D %n %N %v %m`) and unknown codes are removed.
///
/// An argument that is not empty in `Exec` but expands to nothing is dropped.
///
/// # Errors
/// - [`DesktopEntryError::UnterminatedQuote`] if quoting is unbalanced.
/// - [`DesktopEntryError::MisplacedFieldCode`] if `%F`, `%U` or `%i` is part of a larger
///   argument.
/// - [`DesktopEntryError::NonLocalUri`] if `%f`/`%F` receives a non-`file` URI.
/// - [`DesktopEntryError::EmptyCommand`] if no program name remains.
pub fn expand_exec(de: &DesktopEntry, exec: &str, uris: &[String]) -> Result<Vec<String>> {
    let words = split_exec(&unescape_value(exec)).ok_or_else(|| {
        DesktopEntryError::UnterminatedQuote {
            filename: de.filename.clone(),
            exec: exec.to_string(),
        }
    })?;

    let mut remaining = uris.iter();
    let mut argv = Vec::with_capacity(words.len() + uris.len());

    for word in words {
        match word.as_str() {
            "%f" => {
                if let Some(uri) = remaining.next() {
                    argv.push(local_path(de, uri)?);
                }
            }
            "%u" => {
                if let Some(uri) = remaining.next() {
                    argv.push(uri.clone());
                }
            }
            "%F" => {
                for uri in uris {
                    argv.push(local_path(de, uri)?);
                }
            }
            "%U" => argv.extend(uris.iter().cloned()),
            "%i" => {
                if !de.icon.is_empty() {
                    argv.push("--icon".to_string());
                    argv.push(de.icon.clone());
                }
            }
            _ => {
                if let Some(arg) = expand_word(de, &word, &mut remaining)? {
                    argv.push(arg);
                }
            }
        }
    }

    if argv.first().is_none_or(|program| program.is_empty()) {
        return Err(DesktopEntryError::EmptyCommand {
            filename: de.filename.clone(),
            exec: exec.to_string(),
        });
    }
    Ok(argv)
}

/// Substitute field codes embedded in a single argument.
///
/// Returns `Ok(None)` when the argument has to be dropped.
fn expand_word<'a>(
    de: &DesktopEntry,
    word: &str,
    remaining: &mut impl Iterator<Item = &'a String>,
) -> Result<Option<String>> {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('c') => out.push_str(&de.name),
            Some('k') => out.push_str(&de.filename.to_string_lossy()),
            Some('f') => match remaining.next() {
                Some(uri) => out.push_str(&local_path(de, uri)?),
                None => return Ok(None),
            },
            Some('u') => match remaining.next() {
                Some(uri) => out.push_str(uri),
                None => return Ok(None),
            },
            Some(code @ ('F' | 'U' | 'i')) => {
                return Err(DesktopEntryError::MisplacedFieldCode {
                    filename: de.filename.clone(),
                    code,
                    arg: word.to_string(),
                });
            }
            Some(_) | None => {}
        }
    }

    if out.is_empty() && !word.is_empty() {
        return Ok(None);
    }
    Ok(Some(out))
}

/// Convert a URI handed to `%f`/`%F` into a local path.
///
/// Only `scheme://...` and `file:...` count as URIs; anything else, including relative
/// names with a colon such as `notes:v2.txt`, is taken to be a path already. `file` URIs
/// are decoded.
fn local_path(de: &DesktopEntry, uri: &str) -> Result<String> {
    if !is_uri(uri) {
        return Ok(uri.to_string());
    }
    Url::parse(uri)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .map(|p| p.to_string_lossy().into_owned())
        .ok_or_else(|| DesktopEntryError::NonLocalUri {
            filename: de.filename.clone(),
            uri: uri.to_string(),
        })
}

/// True for `scheme://...` and `file:...` (RFC 3986 scheme syntax).
fn is_uri(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid_scheme && (rest.starts_with("//") || scheme.eq_ignore_ascii_case("file"))
}

/// Decode the escapes allowed in Desktop Entry string values.
///
/// Unknown sequences are kept as-is so the quoting stage can see them.
pub fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split an unescaped `Exec` value into arguments.
///
/// Returns `None` if a double quote is left open.
pub fn split_exec(exec: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            esc @ ('"' | '`' | '$' | '\\') => word.push(esc),
                            other => {
                                word.push('\\');
                                word.push(other);
                            }
                        },
                        other => word.push(other),
                    }
                }
            }
            c if c.is_ascii_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                word.push(other);
            }
        }
    }
    if in_word {
        words.push(word);
    }
    Some(words)
}
