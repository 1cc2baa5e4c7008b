use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::{domain::ChainType, mnemonic::Mnemonic};
use crate::service::{Notification, NotificationLevel, Notifier, WalletSession};

/// Multi-chain HD wallet CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(name = "wallet-cli", about = "Solana / Ethereum HD wallet", version, disable_help_subcommand = true)]
pub struct Cli {
    /// Override the store file from the configuration
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a fresh recovery phrase without touching the store
    GenerateMnemonic {
        #[arg(long, default_value_t = 12)]
        words: usize,
    },
    #[command(flatten)]
    Session(SessionCommand),
    /// Interactive session; private key reveal flags live for its duration
    Shell,
}

/// Operations available both one-shot and inside the shell.
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Select the chain new wallets are derived for
    Choose {
        #[arg(long)]
        chain: ChainType,
    },
    /// Create the first wallet, importing a phrase or generating one
    Create {
        #[arg(long)]
        chain: ChainType,
        /// Recovery phrase words; omit to generate
        #[arg(long, num_args = 1..)]
        mnemonic: Vec<String>,
    },
    /// Derive the next wallet from the stored phrase
    Add,
    List,
    Delete {
        #[arg(long)]
        index: usize,
    },
    /// Remove all wallets, the phrase and the chain selection
    Clear,
    /// Copy a value to the terminal clipboard
    Copy {
        #[arg(value_enum)]
        target: CopyTarget,
        #[arg(long, required_if_eq_any([("target", "public"), ("target", "private")]))]
        index: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyTarget {
    Public,
    Private,
    Mnemonic,
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Session(SessionCommand),
    /// Reveal or hide a private key
    Toggle {
        #[arg(long)]
        index: usize,
    },
    #[command(alias = "quit")]
    Exit,
}

/// Prints notifications to stderr so stdout only carries command output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                eprintln!("{}", notification.message)
            }
            level => eprintln!("{}: {}", level, notification.message),
        }
    }
}

pub fn generate_mnemonic(words: usize, out: &mut dyn Write) -> anyhow::Result<()> {
    let mnemonic = Mnemonic::generate_with_word_count(words)?;
    writeln!(out, "{}", mnemonic.phrase())?;
    Ok(())
}

/// Run one session command. Failures are already reported through the
/// session's notifier when this returns `Err`.
pub fn execute(command: SessionCommand, session: &mut WalletSession, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        SessionCommand::Choose { chain } => {
            session.choose_chain(chain)?;
        }
        SessionCommand::Create { chain, mnemonic } => {
            let generated = mnemonic.is_empty();
            let wallet = session.create_first_wallet(chain, &mnemonic.join(" "))?;
            if generated {
                writeln!(out, "Recovery phrase: {}", wallet.mnemonic)?;
            }
            writeln!(out, "{}  {}", wallet.path, wallet.public_key)?;
        }
        SessionCommand::Add => {
            let wallet = session.add_wallet()?;
            writeln!(out, "{}  {}", wallet.path, wallet.public_key)?;
        }
        SessionCommand::List => print_wallets(session, out)?,
        SessionCommand::Delete { index } => {
            session.delete_wallet(index)?;
        }
        SessionCommand::Clear => session.clear_all()?,
        SessionCommand::Copy { target, index } => match (target, index) {
            (CopyTarget::Public, Some(i)) => session.copy_public_key(i)?,
            (CopyTarget::Private, Some(i)) => session.copy_private_key(i)?,
            (CopyTarget::Mnemonic, _) => session.copy_mnemonic()?,
            (_, None) => anyhow::bail!("--index is required"),
        },
    }
    Ok(())
}

pub fn print_wallets(session: &WalletSession, out: &mut dyn Write) -> anyhow::Result<()> {
    let collection = session.collection();
    match collection.chain() {
        Some(chain) => writeln!(out, "Chain: {} ({})", chain, chain.code())?,
        None => writeln!(out, "Chain: none selected")?,
    }
    if collection.is_empty() {
        writeln!(out, "No wallets")?;
        return Ok(());
    }

    for (i, wallet) in collection.wallets().iter().enumerate() {
        writeln!(out, "[{}] {}", i, wallet.path)?;
        writeln!(out, "    public:  {}", wallet.public_key)?;
        writeln!(out, "    private: {}", session.display_private_key(i)?)?;
    }
    Ok(())
}

/// Read commands line by line until `exit` or end of input. Command errors
/// are reported and the loop continues.
pub fn run_shell(session: &mut WalletSession, input: impl BufRead, out: &mut dyn Write) -> anyhow::Result<()> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match ShellLine::try_parse_from(line.split_whitespace()) {
                Ok(parsed) => match parsed.command {
                    ShellCommand::Exit => break,
                    ShellCommand::Toggle { index } => {
                        if session.toggle_visibility(index).is_ok() {
                            print_wallets(session, out)?;
                        }
                    }
                    ShellCommand::Session(command) => {
                        if let Err(e) = execute(command, session, out) {
                            tracing::debug!(error = %e, "shell command failed");
                        }
                    }
                },
                Err(e) => write!(out, "{}", e.render())?,
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::service::{MemoryClipboard, RecordingNotifier};
    use crate::storage::MemoryStore;
    use clap::CommandFactory;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn session() -> (WalletSession, RecordingNotifier, MemoryClipboard) {
        let notifier = RecordingNotifier::new();
        let clipboard = MemoryClipboard::new();
        let session = WalletSession::open(
            Box::new(MemoryStore::new()),
            Box::new(notifier.clone()),
            Box::new(clipboard.clone()),
            AppConfig::default(),
        );
        (session, notifier, clipboard)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_mnemonic_words() {
        let mut args = vec!["wallet-cli", "create", "--chain", "sol", "--mnemonic"];
        args.extend(TEST_MNEMONIC.split(' '));
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Session(SessionCommand::Create { chain, mnemonic }) => {
                assert_eq!(chain, ChainType::Solana);
                assert_eq!(mnemonic.join(" "), TEST_MNEMONIC);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_chain() {
        assert!(Cli::try_parse_from(["wallet-cli", "choose", "--chain", "btc"]).is_err());
    }

    #[test]
    fn test_copy_public_requires_index() {
        assert!(Cli::try_parse_from(["wallet-cli", "copy", "public"]).is_err());
        assert!(Cli::try_parse_from(["wallet-cli", "copy", "mnemonic"]).is_ok());
    }

    #[test]
    fn test_generate_mnemonic_word_counts() {
        let mut out = Vec::new();
        generate_mnemonic(24, &mut out).unwrap();
        let phrase = String::from_utf8(out).unwrap();
        assert_eq!(phrase.trim().split(' ').count(), 24);
        assert!(generate_mnemonic(15, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_shell_toggle_reveals_key() {
        let (mut session, _, _) = session();
        let input = format!(
            "create --chain eth --mnemonic {}\nlist\ntoggle --index 0\nexit\nadd\n",
            TEST_MNEMONIC
        );
        let mut out = Vec::new();
        run_shell(&mut session, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let private_key = &session.collection().wallets()[0].private_key;
        assert!(text.contains(&"•".repeat(66)));
        assert!(text.contains(private_key.as_str()));
        // exit stops before `add`
        assert_eq!(session.collection().len(), 1);
    }

    #[test]
    fn test_shell_keeps_going_after_errors() {
        let (mut session, notifier, _) = session();
        let input = "add\nbogus\ncreate --chain sol\nadd\n";
        let mut out = Vec::new();
        run_shell(&mut session, input.as_bytes(), &mut out).unwrap();

        assert_eq!(session.collection().len(), 2);
        assert_eq!(
            notifier.notifications()[1].level,
            NotificationLevel::Error
        );
    }

    #[test]
    fn test_copy_in_shell_after_toggle() {
        let (mut session, _, clipboard) = session();
        let input = "create --chain sol\ncopy private --index 0\ntoggle --index 0\ncopy private --index 0\n";
        run_shell(&mut session, input.as_bytes(), &mut Vec::new()).unwrap();
        assert_eq!(
            clipboard.contents().unwrap(),
            session.collection().wallets()[0].private_key
        );
    }
}
