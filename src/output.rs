/// Block-style YAML output.
///
/// Writes `Value` trees as block collections: one mapping entry or sequence
/// item per line, sequences under a mapping key not indented, mappings inside
/// a sequence item starting on the `- ` line. Strings that a YAML 1.1 reader
/// would resolve to another type are single-quoted. Uses `itoa` for integers.
use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Remove every `'` from the rendered document (on by default).
    pub strip_quotes: bool,
    /// Escape non-ASCII characters to `\uXXXX` sequences (`--ascii-output`).
    pub ascii_output: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            strip_quotes: true,
            ascii_output: false,
        }
    }
}

/// Render a document to a `String`.
pub fn to_string(value: &Value, config: &OutputConfig) -> io::Result<String> {
    let mut buf = Vec::new();
    write_document(&mut buf, value, config)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write a document to the output sink. The document ends in a newline.
pub fn write_document<W: Write + ?Sized>(
    w: &mut W,
    value: &Value,
    config: &OutputConfig,
) -> io::Result<()> {
    let mut buf = Vec::with_capacity(64 * 1024);
    render(&mut buf, value, config.ascii_output)?;
    if config.strip_quotes {
        strip_apostrophes(&mut buf);
    }
    w.write_all(&buf)
}

/// Remove all `'` bytes in place.
pub fn strip_apostrophes(buf: &mut Vec<u8>) {
    if memchr::memchr(b'\'', buf).is_some() {
        buf.retain(|&b| b != b'\'');
    }
}

// ---------------------------------------------------------------------------
// Block writer
// ---------------------------------------------------------------------------

fn render<W: Write>(w: &mut W, value: &Value, ascii: bool) -> io::Result<()> {
    match value {
        Value::Map(pairs) if !pairs.is_empty() => write_map(w, pairs, 0, false, ascii),
        Value::Seq(items) if !items.is_empty() => write_seq(w, items, 0, false, ascii),
        _ => {
            write_flow(w, value, ascii)?;
            w.write_all(b"\n")
        }
    }
}

/// Mapping at column `col`. With `inline`, the first key continues the
/// current line (after a `- `).
fn write_map<W: Write>(
    w: &mut W,
    pairs: &[(String, Value)],
    col: usize,
    inline: bool,
    ascii: bool,
) -> io::Result<()> {
    for (i, (k, v)) in pairs.iter().enumerate() {
        if i > 0 || !inline {
            write_indent(w, col)?;
        }
        write_str(w, k, ascii)?;
        w.write_all(b":")?;
        match v {
            Value::Seq(items) if !items.is_empty() => {
                w.write_all(b"\n")?;
                write_seq(w, items, col, false, ascii)?;
            }
            Value::Map(inner) if !inner.is_empty() => {
                w.write_all(b"\n")?;
                write_map(w, inner, col + 2, false, ascii)?;
            }
            _ => {
                w.write_all(b" ")?;
                write_flow(w, v, ascii)?;
                w.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn write_seq<W: Write>(
    w: &mut W,
    items: &[Value],
    col: usize,
    inline: bool,
    ascii: bool,
) -> io::Result<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 || !inline {
            write_indent(w, col)?;
        }
        w.write_all(b"- ")?;
        match item {
            Value::Map(pairs) if !pairs.is_empty() => write_map(w, pairs, col + 2, true, ascii)?,
            Value::Seq(inner) if !inner.is_empty() => write_seq(w, inner, col + 2, true, ascii)?,
            _ => {
                write_flow(w, item, ascii)?;
                w.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Scalars and empty collections.
fn write_flow<W: Write>(w: &mut W, value: &Value, ascii: bool) -> io::Result<()> {
    match value {
        Value::Int(n) => {
            let mut buf = itoa::Buffer::new();
            w.write_all(buf.format(*n).as_bytes())
        }
        Value::String(s) => write_str(w, s, ascii),
        Value::Seq(_) => w.write_all(b"[]"),
        Value::Map(_) => w.write_all(b"{}"),
    }
}

fn write_indent<W: Write>(w: &mut W, col: usize) -> io::Result<()> {
    for _ in 0..col {
        w.write_all(b" ")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scalar styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    SingleQuoted,
    DoubleQuoted,
}

/// YAML 1.1 implicit resolvers: a plain scalar matching any of these would
/// not read back as a string.
static IMPLICIT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(?:yes|Yes|YES|no|No|NO|true|True|TRUE|false|False|FALSE|on|On|ON|off|Off|OFF|y|Y|n|N)$",
        r"^(?:[-+]?0b[0-1_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
        r"^(?:[-+]?(?:[0-9][0-9_]*)\.[0-9_]*(?:[eE][-+][0-9]+)?|\.[0-9][0-9_]*(?:[eE][-+][0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
        r"^(?:~|null|Null|NULL)$",
        r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)$",
        r"^(?:<<|=)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

fn scalar_style(s: &str, ascii: bool) -> Style {
    if s.chars().any(|c| c.is_control()) || (ascii && !s.is_ascii()) {
        return Style::DoubleQuoted;
    }
    if s.is_empty() || IMPLICIT.iter().any(|re| re.is_match(s)) {
        return Style::SingleQuoted;
    }
    let bytes = s.as_bytes();
    let first = bytes[0];
    let followed_by_space = bytes.get(1).is_none_or(|b| *b == b' ');
    if matches!(
        first,
        b'#' | b',' | b'[' | b']' | b'{' | b'}' | b'&' | b'*' | b'!' | b'|' | b'>' | b'\''
            | b'"' | b'%' | b'@' | b'`'
    ) || (matches!(first, b'-' | b'?' | b':') && followed_by_space)
    {
        return Style::SingleQuoted;
    }
    if s.starts_with(' ')
        || s.ends_with(' ')
        || s.ends_with(':')
        || s.contains(": ")
        || s.contains(" #")
        || s.starts_with("---")
        || s.starts_with("...")
    {
        return Style::SingleQuoted;
    }
    Style::Plain
}

fn write_str<W: Write>(w: &mut W, s: &str, ascii: bool) -> io::Result<()> {
    match scalar_style(s, ascii) {
        Style::Plain => w.write_all(s.as_bytes()),
        Style::SingleQuoted => write_single_quoted(w, s),
        Style::DoubleQuoted => write_double_quoted(w, s, ascii),
    }
}

fn write_single_quoted<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    w.write_all(b"'")?;
    let bytes = s.as_bytes();
    let mut start = 0;
    for pos in memchr::memchr_iter(b'\'', bytes) {
        w.write_all(&bytes[start..=pos])?;
        w.write_all(b"'")?;
        start = pos + 1;
    }
    w.write_all(&bytes[start..])?;
    w.write_all(b"'")
}

/// Double-quoted YAML string. With `ascii`, non-ASCII characters become
/// `\uXXXX` (or `\UXXXXXXXX` outside the BMP).
fn write_double_quoted<W: Write>(w: &mut W, s: &str, ascii: bool) -> io::Result<()> {
    w.write_all(b"\"")?;
    for ch in s.chars() {
        match ch {
            '"' => w.write_all(b"\\\"")?,
            '\\' => w.write_all(b"\\\\")?,
            '\n' => w.write_all(b"\\n")?,
            '\r' => w.write_all(b"\\r")?,
            '\t' => w.write_all(b"\\t")?,
            '\0' => w.write_all(b"\\0")?,
            c if (c as u32) < 0x20 || c == '\x7f' => write!(w, "\\x{:02X}", c as u32)?,
            c if c.is_ascii() => w.write_all(&[c as u8])?,
            c if ascii && (c as u32) <= 0xFFFF => write!(w, "\\u{:04X}", c as u32)?,
            c if ascii => write!(w, "\\U{:08X}", c as u32)?,
            c if c.is_control() => write!(w, "\\u{:04X}", c as u32)?,
            c => {
                let mut utf8 = [0u8; 4];
                w.write_all(c.encode_utf8(&mut utf8).as_bytes())?;
            }
        }
    }
    w.write_all(b"\"")
}
