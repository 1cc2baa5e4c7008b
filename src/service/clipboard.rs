use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use base64::Engine as _;
use is_terminal::IsTerminal;

use crate::core::errors::WalletError;

/// Destination for copied public keys, revealed private keys and phrases.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), WalletError>;
}

/// Clipboard that remembers the last text; clones share the contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), WalletError> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Terminal clipboard using the OSC 52 escape sequence
/// (`ESC ] 52 ; c ; <base64> BEL`), understood by most modern terminals.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Only available when stdout is a terminal.
    pub fn stdout() -> Result<Self, WalletError> {
        let stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(WalletError::Clipboard(
                "stdout is not a terminal; OSC 52 clipboard unavailable".to_string(),
            ));
        }
        Ok(Self::new(stdout))
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), WalletError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", encoded)
            .and_then(|_| self.out.flush())
            .map_err(|e| WalletError::Clipboard(e.to_string()))
    }
}

/// Clipboard for non-interactive runs; every write fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), WalletError> {
        Err(WalletError::Clipboard("no clipboard available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        let handle = clipboard.clone();
        clipboard.write_text("hello").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("hello"));
    }

    #[test]
    fn test_osc52_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("hi").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_unavailable_clipboard() {
        let err = UnavailableClipboard.write_text("x").unwrap_err();
        assert_eq!(err.kind(), "Clipboard");
    }
}
