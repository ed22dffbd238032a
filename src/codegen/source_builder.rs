// ============================================================================
// Structured source emission
// ============================================================================

/// Indentation unit of the emitted dialect.
pub const INDENT: &str = "    ";

/// Line-oriented builder for indentation-sensitive source text.
///
/// Lines are stored without their indentation; the prefix is applied when
/// the line is pushed, from the builder's current level.
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    lines: Vec<String>,
    level: usize,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given indentation level (function bodies start at 1).
    pub fn at_level(level: usize) -> Self {
        Self {
            lines: Vec::new(),
            level,
        }
    }

    /// Push one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let line = format!("{}{}", INDENT.repeat(self.level), text.as_ref());
        self.lines.push(line);
        self
    }

    /// Push an empty line (never indented).
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Push a pre-rendered fragment verbatim, one entry per line.
    pub fn raw(&mut self, fragment: &str) -> &mut Self {
        self.lines.extend(fragment.split('\n').map(str::to_string));
        self
    }

    /// Run `body` one level deeper.
    pub fn indented<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.level += 1;
        body(self);
        self.level -= 1;
        self
    }

    /// Append another builder's lines as they are.
    pub fn append(&mut self, other: SourceBuilder) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    /// Push `items` separated by one blank line each.
    pub fn separated<I, F>(&mut self, items: I, mut emit: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            emit(self, item);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join lines with `\n`, without a trailing newline.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
