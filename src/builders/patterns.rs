use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

lazy_static! {
    /// `//` up to, not including, the line terminator (`\n` or `\r\n`).
    /// Applied per line, so a `//` inside a string literal still starts a
    /// comment.
    static ref LINE_SLASH_COMMENT: Regex = Regex::new(r"//[^\r\n]*").unwrap();
    /// `/* ... */`, shortest match, across newlines.
    static ref BLOCK_SLASH_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref LINE_HASH_COMMENT: Regex = Regex::new(r"#[^\r\n]*").unwrap();
    static ref TRIPLE_SINGLE_QUOTED: Regex = Regex::new(r"(?s)'''.*?'''").unwrap();
    static ref TRIPLE_DOUBLE_QUOTED: Regex = Regex::new(r#"(?s)""".*?""""#).unwrap();
    static ref MARKUP_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
}

/// The comment syntax family a file belongs to, decided by its extension.
///
/// Each class maps to a fixed sequence of regex passes. The passes are purely
/// lexical: comment delimiters inside string literals are removed as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionClass {
    /// `//` line comments and `/* */` block comments (`.js .jsx .ts .tsx .json`).
    Brace,
    /// `#` line comments and triple-quoted blocks (`.py`).
    Hash,
    /// `<!-- -->` comments (`.html .htm .xml`).
    Markup,
    /// Brace passes followed by the markup pass (`.css`).
    Hybrid,
    /// Anything else. Files of this class are never read or written.
    Unsupported,
}

impl fmt::Display for ExtensionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionClass::Brace => write!(f, "brace-comment-style"),
            ExtensionClass::Hash => write!(f, "hash-comment-style"),
            ExtensionClass::Markup => write!(f, "markup-comment-style"),
            ExtensionClass::Hybrid => write!(f, "hybrid"),
            ExtensionClass::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl ExtensionClass {
    /// Classifies a path by its lowercased extension.
    ///
    /// Paths without an extension (including dotfiles such as `.bashrc`) are
    /// `Unsupported`.
    pub fn classify(path: &Path) -> Self {
        let extension = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => return ExtensionClass::Unsupported,
        };

        match extension.as_str() {
            "js" | "jsx" | "ts" | "tsx" | "json" => ExtensionClass::Brace,
            "py" => ExtensionClass::Hash,
            "html" | "htm" | "xml" => ExtensionClass::Markup,
            "css" => ExtensionClass::Hybrid,
            _ => ExtensionClass::Unsupported,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, ExtensionClass::Unsupported)
    }
}

/// Removes comments from text according to a comment syntax.
///
/// Implemented by `ExtensionClass` so that the engine can stay agnostic of the
/// individual regex passes.
pub trait CommentStripper {
    /// Returns `content` with every comment matched by this syntax removed.
    /// Text outside comments, including newlines ending `//` or `#` comments,
    /// is left as is.
    fn strip<'a>(&self, content: &'a str) -> Cow<'a, str>;
}

impl CommentStripper for ExtensionClass {
    fn strip<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match self {
            ExtensionClass::Brace => strip_brace(content),
            ExtensionClass::Hash => {
                let content = remove_all(&LINE_HASH_COMMENT, content);
                let content = remove_all_owned(&TRIPLE_SINGLE_QUOTED, content);
                remove_all_owned(&TRIPLE_DOUBLE_QUOTED, content)
            }
            ExtensionClass::Markup => remove_all(&MARKUP_COMMENT, content),
            ExtensionClass::Hybrid => {
                let content = strip_brace(content);
                remove_all_owned(&MARKUP_COMMENT, content)
            }
            ExtensionClass::Unsupported => Cow::Borrowed(content),
        }
    }
}

fn strip_brace(content: &str) -> Cow<'_, str> {
    let content = remove_all(&LINE_SLASH_COMMENT, content);
    remove_all_owned(&BLOCK_SLASH_COMMENT, content)
}

fn remove_all<'a>(pattern: &Regex, content: &'a str) -> Cow<'a, str> {
    pattern.replace_all(content, "")
}

// Chains a pass onto the output of a previous one without reallocating when
// nothing matched.
fn remove_all_owned<'a>(pattern: &Regex, content: Cow<'a, str>) -> Cow<'a, str> {
    match content {
        Cow::Borrowed(text) => pattern.replace_all(text, ""),
        Cow::Owned(text) if pattern.is_match(&text) => {
            Cow::Owned(pattern.replace_all(&text, "").into_owned())
        }
        owned => owned,
    }
}
