//! Grammar of the interactive command line.
//!
//! Each input line is parsed as its own clap invocation, so `help`, usage
//! errors and suggestions all come from clap.

use clap::{Parser, Subcommand};

/// One line of user input.
#[derive(Debug, Parser)]
#[command(name = "bankist", no_binary_name = true, disable_version_flag = true)]
#[command(about = "Bankist. Log in with 'login <handle> <pin>', e.g. 'login js 1111'")]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Log in to an account
    Login {
        /// Owner initials, e.g. js
        handle: String,
        /// Four digit PIN
        #[arg(allow_hyphen_values = true)]
        pin: String,
    },

    /// Send money to another account
    Transfer {
        /// Amount to send
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Handle of the receiving account
        target: String,
    },

    /// Request a loan
    Loan {
        /// Amount to borrow
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Close your own account
    Close {
        /// Your handle
        handle: String,
        /// Your PIN
        #[arg(allow_hyphen_values = true)]
        pin: String,
    },

    /// List movements
    Movements,

    /// Toggle sorting movements by amount
    Sort,

    /// Balance, income, outflow and interest
    Summary,

    /// Summary and movements as JSON
    Json,

    /// Time left before automatic logout
    Timer,

    /// List known handles
    Accounts,

    /// End the session
    Logout,

    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// Parses one input line. Arguments are kept as typed for the ledger to validate.
pub fn parse(line: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|line| line.command)
}
