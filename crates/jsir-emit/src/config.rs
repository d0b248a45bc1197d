use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Highlight keywords with ANSI colors. Off by default so output stays valid JavaScript.
    pub use_colors: bool,
    pub indent_style: IndentStyle,
    pub style: OutputStyle,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: false,
            indent_style: IndentStyle::Spaces(4),
            style: OutputStyle::Pretty,
        }
    }
}

impl EmitterConfig {
    pub fn compact() -> Self {
        Self {
            style: OutputStyle::Compact,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl IndentStyle {
    pub fn to_string(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}

/// `Pretty` puts every statement on its own indented line, `Compact` keeps the whole
/// output on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputStyle {
    Pretty,
    Compact,
}
