//! Bot command parsing: `/name[@botname] [args]`.

/// A parsed bot command borrowed from the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    /// Command name without the leading `/` and without any `@botname` suffix.
    pub name: &'a str,
    /// Remaining text after the command, trimmed. Empty when there are no arguments.
    pub args: &'a str,
}

impl<'a> Command<'a> {
    /// Parses `text` as a command. Returns `None` for plain text or a bare `/`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;

        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head);

        if name.is_empty() {
            return None;
        }
        Some(Self { name, args })
    }

    /// Case-insensitive name match.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
