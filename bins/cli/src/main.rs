//! Bankist terminal client
//!
//! Reads commands from stdin and prints session events as they arrive.

mod command;
mod render;

use std::time::Duration;

use bankist_core::account::AccountDirectory;
use bankist_core::bank::Bank;
use bankist_core::ledger::{LedgerEngine, SessionSummary};
use bankist_core::seed::demo_directory;
use bankist_core::session::{SessionEvent, format_remaining};
use bankist_shared::types::{Currency, Money};
use bankist_shared::{AppConfig, AppError};
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use command::Command;

/// What the terminal remembers between commands.
struct Terminal {
    bank: Bank,
    session: Option<SessionSummary>,
    sorted: bool,
    remaining: Option<Duration>,
}

enum Flow {
    Continue,
    Quit,
}

impl Terminal {
    fn new(bank: Bank) -> Self {
        Self {
            bank,
            session: None,
            sorted: false,
            remaining: None,
        }
    }

    fn run(&mut self, command: Command) -> Flow {
        match command {
            Command::Login { handle, pin } => match self.bank.login(&handle, &pin) {
                Ok(session) => {
                    println!("Welcome back, {}", session.first_name);
                    self.sorted = false;
                    self.session = Some(session);
                    self.show_account();
                }
                Err(err) => {
                    self.end_session();
                    report(err);
                }
            },
            Command::Transfer { amount, target } => match self.bank.transfer(&amount, &target) {
                Ok(receipt) => {
                    println!("Sent {} to {}", self.money(receipt.amount), receipt.to);
                    self.show_account();
                }
                Err(err) => report(err),
            },
            Command::Loan { amount } => match self.bank.request_loan(&amount) {
                Ok(pending) => println!(
                    "Loan of {} approved, it will be credited shortly",
                    self.money(pending.approval().amount)
                ),
                Err(err) => report(err),
            },
            Command::Close { handle, pin } => match self.bank.close_account(&handle, &pin) {
                Ok(closed) => {
                    println!("Account {} of {} closed", closed.handle, closed.owner);
                    self.end_session();
                }
                Err(err) => report(err),
            },
            Command::Movements => self.show_movements(),
            Command::Sort => {
                self.sorted = !self.sorted;
                self.show_movements();
            }
            Command::Summary => self.show_summary(),
            Command::Json => self.show_json(),
            Command::Logout => {
                if self.bank.logout().is_none() {
                    println!("Nobody is logged in");
                }
                self.end_session();
            }
            Command::Accounts => self.show_accounts(),
            Command::Timer => match (self.session.is_some(), self.remaining) {
                (true, Some(remaining)) => {
                    println!("You will be logged out in {}", format_remaining(remaining));
                }
                _ => println!("Nobody is logged in"),
            },
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn on_event(&mut self, event: SessionEvent) {
        let current = self.session.as_ref().map(|s| s.session_id);
        match event {
            SessionEvent::Tick { session_id, remaining } if Some(session_id) == current => {
                self.remaining = Some(remaining);
            }
            SessionEvent::Expired { session_id } if Some(session_id) == current => {
                println!("\nLogged out after inactivity. Log in to get started");
                self.end_session();
            }
            SessionEvent::LoanCredited(credit) => {
                println!("\nLoan of {} credited", self.money(credit.amount));
                if self
                    .session
                    .as_ref()
                    .is_some_and(|s| s.account_id == credit.account_id)
                {
                    self.show_account();
                }
            }
            SessionEvent::LoanVoided { loan_id, .. } => {
                println!("\nLoan {loan_id} was not credited");
            }
            _ => {}
        }
    }

    fn money(&self, amount: Decimal) -> Money {
        let currency = self.session.as_ref().map_or(Currency::default(), |s| s.currency);
        Money::new(amount, currency)
    }

    fn end_session(&mut self) {
        self.session = None;
        self.remaining = None;
        self.sorted = false;
    }

    fn show_account(&self) {
        self.show_movements();
        self.show_summary();
    }

    fn show_movements(&self) {
        let Some(session) = &self.session else {
            println!("Nobody is logged in");
            return;
        };
        match self.bank.movements(self.sorted) {
            Ok(rows) => println!("{}", render::movements(&rows, session.currency, Utc::now())),
            Err(err) => report(err),
        }
    }

    fn show_summary(&self) {
        let Some(session) = &self.session else {
            println!("Nobody is logged in");
            return;
        };
        match self.bank.summary() {
            Ok(summary) => println!("{}", render::summary(&summary, session.currency, Utc::now())),
            Err(err) => report(err),
        }
    }

    fn show_json(&self) {
        let Some(session) = &self.session else {
            println!("Nobody is logged in");
            return;
        };
        let result = self
            .bank
            .summary()
            .and_then(|summary| Ok((summary, self.bank.movements(self.sorted)?)));
        match result {
            Ok((summary, rows)) => println!("{}", render::json(session, &summary, &rows)),
            Err(err) => report(err),
        }
    }

    fn show_accounts(&self) {
        self.bank.with_engine(|engine| {
            for account in engine.directory().iter() {
                println!("  {:<5} {}", account.handle().as_str(), account.owner());
            }
        });
    }
}

fn report(err: impl Into<AppError>) {
    let err = err.into();
    if err.is_user_error() {
        println!("{err}");
    } else {
        warn!(code = err.error_code(), "{err}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the prompt output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bankist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;

    let directory = if config.demo.seed_accounts {
        demo_directory(Utc::now())?
    } else {
        AccountDirectory::new()
    };
    info!(accounts = directory.len(), "Directory initialized");

    let bank = Bank::new(LedgerEngine::new(directory), &config);
    let mut events = bank.subscribe();
    let mut terminal = Terminal::new(bank);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Bankist. Type 'help' for commands, 'login js 1111' to start");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match command::parse(&line) {
                    Ok(command) => {
                        if let Flow::Quit = terminal.run(command) {
                            break;
                        }
                    }
                    Err(err) => print!("{}", err.render()),
                }
            }
            event = events.recv() => match event {
                Ok(event) => terminal.on_event(event),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Dropped session events"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    terminal.bank.logout();
    Ok(())
}
