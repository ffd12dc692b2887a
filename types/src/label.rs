//! Status labels for files in the build panel.

/// Glyphs used to decorate a file label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelGlyphs {
    pub file: &'static str,
    pub finished: &'static str,
    pub token: &'static str,
}

impl LabelGlyphs {
    pub const UNICODE: Self = Self {
        file: "📄",
        finished: "✅",
        token: "🪙",
    };

    pub const ASCII: Self = Self {
        file: "-",
        finished: "[done]",
        token: "tok",
    };
}

/// Format one file's progress as a build panel label.
///
/// A finished file shows only the completion mark, never its token count.
/// An unfinished file shows its count once at least one token has streamed.
#[must_use]
pub fn format_label(path: &str, tokens: u32, finished: bool, glyphs: &LabelGlyphs) -> String {
    let LabelGlyphs {
        file,
        finished: done,
        token,
    } = glyphs;

    if finished {
        format!("{file} {path} {done}")
    } else if tokens > 0 {
        format!("{file} {path} {tokens} {token}")
    } else {
        format!("{file} {path}")
    }
}
