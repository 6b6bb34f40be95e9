//! Interactive tracker shell
//!
//! Line-oriented front end that keeps one `Tracker` alive across commands,
//! so selection, search and the add form behave like a long-running view.
//! Generic over the reader and writer so it can be driven from tests.

use crate::render;
use crate::tracker::{Outcome, TokenDraft, TokenId, Tracker};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "\
Commands:
  add <name> <address>   track a new token (the last word is the address)
  new                    open the add form
  name <value>           set the form name
  address <value>        set the form address
  submit                 add the token in the form
  cancel                 close the form
  remove <id>            stop tracking a token
  refresh <id>           regenerate a token's metrics
  select <id>            show a token in detail
  unselect               clear the selection
  search [term]          filter the list (no term clears it)
  list                   show the (filtered) list
  show                   show the selected token
  flush                  retry saving unsaved changes
  help                   this text
  quit                   leave the shell
";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(TokenDraft),
    New,
    Name(String),
    Address(String),
    Submit,
    Cancel,
    Remove(TokenId),
    Refresh(TokenId),
    Select(TokenId),
    Unselect,
    Search(String),
    List,
    Show,
    Flush,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |rest: &str| -> Result<TokenId, String> {
            rest.parse()
                .map_err(|_| format!("expected a token id, got '{}'", rest))
        };

        match word.to_ascii_lowercase().as_str() {
            "add" => match rest.rsplit_once(char::is_whitespace) {
                Some((name, address)) => Ok(Command::Add(TokenDraft::new(name.trim(), address))),
                None => Err("usage: add <name> <address>".to_string()),
            },
            "new" => Ok(Command::New),
            "name" => Ok(Command::Name(rest.to_string())),
            "address" => Ok(Command::Address(rest.to_string())),
            "submit" => Ok(Command::Submit),
            "cancel" => Ok(Command::Cancel),
            "remove" | "rm" => id(rest).map(Command::Remove),
            "refresh" => id(rest).map(Command::Refresh),
            "select" => id(rest).map(Command::Select),
            "unselect" => Ok(Command::Unselect),
            "search" => Ok(Command::Search(rest.to_string())),
            "list" | "ls" => Ok(Command::List),
            "show" => Ok(Command::Show),
            "flush" => Ok(Command::Flush),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}' (try help)", other)),
        }
    }
}

/// Run one command against the tracker; returns the text to print
pub async fn execute(tracker: &mut Tracker, command: Command) -> String {
    let mut out = match command {
        Command::Add(draft) => describe(tracker.add_token(draft).await),
        Command::New => {
            tracker.open_form();
            "Form opened. Set name and address, then submit.\n".to_string()
        }
        Command::Name(name) => {
            tracker.edit_name(name);
            String::new()
        }
        Command::Address(address) => {
            tracker.edit_address(address);
            String::new()
        }
        Command::Submit => describe(tracker.submit_form().await),
        Command::Cancel => {
            tracker.close_form();
            "Form closed.\n".to_string()
        }
        Command::Remove(id) => describe(tracker.remove_token(id).await),
        Command::Refresh(id) => {
            let mut text = describe(tracker.refresh_token(id).await);
            if tracker.state().selected == Some(id) {
                if let Some(token) = tracker.selected_token() {
                    text.push_str(&render::token_detail(token));
                }
            }
            text
        }
        Command::Select(id) => match tracker.select(id) {
            Outcome::NotFound(id) => format!("No token with id {}\n", id),
            _ => tracker
                .selected_token()
                .map(render::token_detail)
                .unwrap_or_default(),
        },
        Command::Unselect => {
            tracker.clear_selection();
            String::new()
        }
        Command::Search(term) => {
            tracker.set_search(term);
            list(tracker)
        }
        Command::List => list(tracker),
        Command::Show => match tracker.selected_token() {
            Some(token) => render::token_detail(token),
            None => "Nothing selected.\n".to_string(),
        },
        Command::Flush => match tracker.flush().await {
            Ok(()) => String::new(),
            Err(e) => format!("{}\n", e),
        },
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };

    for notice in tracker.take_notices() {
        out.push_str(&format!("! {}\n", notice));
    }
    out
}

/// Read commands from `input` until EOF or `quit`
pub async fn run<R, W>(tracker: &mut Tracker, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output
        .write_all(format!("Tracking {} tokens. Type help for commands.\n", tracker.tokens().len()).as_bytes())
        .await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let text = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(tracker, command).await,
            Err(e) => format!("{}\n", e),
        };
        output.write_all(text.as_bytes()).await?;
    }

    output.flush().await
}

fn describe(result: crate::tracker::TrackerResult<Outcome>) -> String {
    match result {
        Ok(Outcome::Added(id)) => format!("Added token {}\n", id),
        Ok(Outcome::Removed(id)) => format!("Removed token {}\n", id),
        Ok(Outcome::Refreshed(id)) => format!("Refreshed token {}\n", id),
        Ok(Outcome::Rejected) => "Name and address are required.\n".to_string(),
        Ok(Outcome::NotFound(id)) => format!("No token with id {}\n", id),
        Ok(Outcome::Updated) => String::new(),
        // Failures are reported through the notice queue
        Err(_) => String::new(),
    }
}

fn list(tracker: &Tracker) -> String {
    let visible = tracker.visible_tokens();
    let mut out = render::token_table(&visible, tracker.state().selected);
    if !tracker.state().search.is_empty() {
        out.push_str(&format!(
            "({} of {} tokens match '{}')\n",
            visible.len(),
            tracker.tokens().len(),
            tracker.state().search
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, TokenStore};
    use crate::tracker::TrackerSettings;
    use std::sync::Arc;

    async fn tracker() -> Tracker {
        Tracker::open(
            TokenStore::new(Arc::new(MemoryBackend::new())),
            TrackerSettings::default(),
        )
        .await
    }

    async fn session(tracker: &mut Tracker, script: &str) -> String {
        let mut output = Vec::new();
        run(tracker, script.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "add BONK Addr123".parse::<Command>().unwrap(),
            Command::Add(TokenDraft::new("BONK", "Addr123"))
        );
        assert_eq!(
            "add Dog Wif Hat  EKpQGSJt".parse::<Command>().unwrap(),
            Command::Add(TokenDraft::new("Dog Wif Hat", "EKpQGSJt"))
        );
        assert!("add".parse::<Command>().is_err());
        assert_eq!("remove 42".parse::<Command>().unwrap(), Command::Remove(TokenId(42)));
        assert_eq!(
            "search  sol ana ".parse::<Command>().unwrap(),
            Command::Search("sol ana".to_string())
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!("QUIT".parse::<Command>().unwrap(), Command::Quit);
        assert!("add BONK".parse::<Command>().is_err());
        assert!("refresh abc".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn test_session_add_search_quit() {
        let mut tracker = tracker().await;
        let out = session(
            &mut tracker,
            "add Solana So1111\nadd RustToken Rust2\nsearch SOL\nquit\nadd Never Seen\n",
        )
        .await;

        assert!(out.contains("Tracking 0 tokens"));
        assert_eq!(out.matches("Added token").count(), 2);
        assert!(out.contains("(1 of 2 tokens match 'SOL')"));
        assert_eq!(tracker.tokens().len(), 2);
    }

    #[tokio::test]
    async fn test_form_flow() {
        let mut tracker = tracker().await;
        let out = session(&mut tracker, "new\nname BONK\nsubmit\naddress Addr123\nsubmit\n").await;

        assert!(out.contains("Name and address are required."));
        assert!(out.contains("Added token"));
        assert_eq!(tracker.tokens()[0].name, "BONK");
        assert!(!tracker.state().form.open);
    }

    #[tokio::test]
    async fn test_select_refresh_remove() {
        let mut tracker = tracker().await;
        tracker.add_token(TokenDraft::new("BONK", "Addr123")).await.unwrap();
        let id = tracker.tokens()[0].id;

        let out = execute(&mut tracker, Command::Select(id)).await;
        assert!(out.contains("BONK"));
        assert!(out.contains("Addr123"));

        let out = execute(&mut tracker, Command::Refresh(id)).await;
        assert!(out.contains("Refreshed token"));
        assert!(out.contains("Weekly growth"));

        let out = execute(&mut tracker, Command::Remove(id)).await;
        assert!(out.contains("Removed token"));
        assert_eq!(execute(&mut tracker, Command::Show).await, "Nothing selected.\n");

        let out = execute(&mut tracker, Command::Remove(id)).await;
        assert!(out.contains("No token with id"));
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_running() {
        let mut tracker = tracker().await;
        let out = session(&mut tracker, "dance\nhelp\n").await;
        assert!(out.contains("unknown command 'dance'"));
        assert!(out.contains("Commands:"));
    }
}
