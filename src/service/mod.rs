//! Hosting layer: session, notifications and clipboard
pub mod clipboard;
pub mod notifier;
pub mod session;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard, UnavailableClipboard};
pub use notifier::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use session::WalletSession;
