//! Lexical analysis of a single input line into argument tokens.
//!
//! Quoting rules follow the POSIX shell subset the interpreter supports:
//! single quotes keep everything literal, double quotes keep everything literal
//! except for backslash escapes of `$`, `"` and `\`, and outside of quotes a
//! backslash makes the next character literal.
//!
//! Tokenizing never fails. An unterminated quote or a trailing backslash simply
//! runs to the end of the line and whatever was accumulated becomes the last token.

/// Characters that a backslash escapes inside double quotes.
const DOUBLE_QUOTE_ESCAPABLE: [char; 3] = ['$', '"', '\\'];

#[derive(Debug, Default)]
struct LexingFSM {
    in_single_quote: bool,
    in_double_quote: bool,
    pending_escape: bool,
    current: String,
    tokens: Vec<String>,
}

impl LexingFSM {
    fn feed(&mut self, ch: char) {
        if self.pending_escape {
            self.pending_escape = false;
            if self.in_double_quote && !DOUBLE_QUOTE_ESCAPABLE.contains(&ch) {
                // Not a meaningful escape inside double quotes: keep the backslash.
                self.current.push('\\');
            }
            self.current.push(ch);
            return;
        }

        match ch {
            '\\' if !self.in_single_quote => self.pending_escape = true,
            '\'' if !self.in_double_quote => self.in_single_quote = !self.in_single_quote,
            '"' if !self.in_single_quote => self.in_double_quote = !self.in_double_quote,
            ' ' if !self.in_single_quote && !self.in_double_quote => self.end_token(),
            c => self.current.push(c),
        }
    }

    fn end_token(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<String> {
        if self.in_single_quote || self.in_double_quote || self.pending_escape {
            log::trace!("line ended inside a quote or escape, keeping partial token");
        }
        self.end_token();
        self.tokens
    }
}

/// Split `line` into tokens, resolving quotes and escapes.
///
/// ```
/// assert_eq!(minish::tokenize("echo 'a b' c"), vec!["echo", "a b", "c"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut lexer = LexingFSM::default();
    for ch in line.chars() {
        lexer.feed(ch);
    }
    let tokens = lexer.finish();
    log::debug!("tokens: {:?}", tokens);
    tokens
}
