//! Interactive menu loop
//!
//! Reads one answer per line from `input`, validates it, calls into the
//! [`SessionManager`] and prints the outcome to `output`. Recoverable errors
//! are shown to the user and the menu continues; fatal storage errors end the
//! loop and are returned to the caller.
//!
//! End of input is treated like choosing Exit (logging out first if needed).

use crate::core::{AccountStore, SessionManager};
use crate::types::amount::{parse_amount, parse_balance};
use crate::types::{AccountNumber, AtmError, Pin};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// Whether the shell should keep running after a menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented ATM front end
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    /// Give back the output writer (used by tests to inspect what was printed)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the top-level menu until Exit or end of input
    ///
    /// # Errors
    ///
    /// Returns only fatal errors (see [`AtmError::is_fatal`]).
    pub fn run<S: AccountStore>(&mut self, atm: &mut SessionManager<S>) -> Result<(), AtmError> {
        loop {
            writeln!(self.output, "\n=== ATM Interface ===")?;
            writeln!(self.output, "1. Create Account")?;
            writeln!(self.output, "2. Login")?;
            writeln!(self.output, "3. Exit")?;

            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.create_account(atm)?,
                "2" => self.login(atm)?,
                "3" => Flow::Quit,
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(self.output, "Thank you for using the ATM. Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn create_account<S: AccountStore>(
        &mut self,
        atm: &mut SessionManager<S>,
    ) -> Result<Flow, AtmError> {
        let Some(number) = self.prompt("Enter new account number (4 digits): ")? else {
            return Ok(Flow::Quit);
        };
        if self.recover(AccountNumber::parse(&number))?.is_none() {
            return Ok(Flow::Continue);
        }

        let Some(pin) = self.prompt("Enter new 4-digit PIN: ")? else {
            return Ok(Flow::Quit);
        };
        if self.recover(Pin::parse(&pin))?.is_none() {
            return Ok(Flow::Continue);
        }

        let Some(balance) = self.prompt("Enter initial balance: $")? else {
            return Ok(Flow::Quit);
        };
        let Some(balance) = self.recover(parse_balance(&balance))? else {
            return Ok(Flow::Continue);
        };

        if self
            .recover(atm.create_account(&number, &pin, balance))?
            .is_some()
        {
            writeln!(self.output, "Account created successfully!")?;
        }
        Ok(Flow::Continue)
    }

    fn login<S: AccountStore>(&mut self, atm: &mut SessionManager<S>) -> Result<Flow, AtmError> {
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(pin) = self.prompt("Enter PIN: ")? else {
            return Ok(Flow::Quit);
        };

        if self.recover(atm.login(&number, &pin))?.is_none() {
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "Login successful. Welcome, account {}.", number)?;

        self.account_menu(atm)
    }

    fn account_menu<S: AccountStore>(
        &mut self,
        atm: &mut SessionManager<S>,
    ) -> Result<Flow, AtmError> {
        loop {
            writeln!(self.output, "\n=== Account Menu ===")?;
            writeln!(self.output, "1. Check Balance")?;
            writeln!(self.output, "2. Deposit")?;
            writeln!(self.output, "3. Withdraw")?;
            writeln!(self.output, "4. Transaction History")?;
            writeln!(self.output, "5. Logout")?;

            let Some(choice) = self.prompt("Enter choice: ")? else {
                atm.logout()?;
                return Ok(Flow::Quit);
            };

            match choice.as_str() {
                "1" => {
                    if let Some(balance) = self.recover(atm.check_balance())? {
                        writeln!(self.output, "Current Balance: ${:.2}", balance)?;
                    }
                }
                "2" => {
                    let Some(amount) = self.read_amount("Enter deposit amount: $")? else {
                        atm.logout()?;
                        return Ok(Flow::Quit);
                    };
                    if let Some(amount) = amount {
                        if self.recover(atm.deposit(amount))?.is_some() {
                            writeln!(self.output, "Deposited ${:.2} successfully.", amount)?;
                        }
                    }
                }
                "3" => {
                    let Some(amount) = self.read_amount("Enter withdrawal amount: $")? else {
                        atm.logout()?;
                        return Ok(Flow::Quit);
                    };
                    if let Some(amount) = amount {
                        if self.recover(atm.withdraw(amount))?.is_some() {
                            writeln!(self.output, "Withdrawn ${:.2} successfully.", amount)?;
                        }
                    }
                }
                "4" => self.show_history(atm)?,
                "5" => {
                    atm.logout()?;
                    writeln!(self.output, "Logged out.")?;
                    return Ok(Flow::Continue);
                }
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn show_history<S: AccountStore>(&mut self, atm: &SessionManager<S>) -> Result<(), AtmError> {
        let Some(history) = self.recover(atm.history())? else {
            return Ok(());
        };

        if let Some(account) = atm.current_account() {
            writeln!(
                self.output,
                "Transaction History for Account {}:",
                account.account_number()
            )?;
        }
        if history.is_empty() {
            writeln!(self.output, "No transactions yet.")?;
        }
        for entry in history {
            writeln!(self.output, "{}", entry)?;
        }
        Ok(())
    }

    /// Prompt for a transaction amount
    ///
    /// Outer `None` means end of input, inner `None` means the amount was
    /// rejected (the reason has already been printed).
    fn read_amount(&mut self, text: &str) -> Result<Option<Option<Decimal>>, AtmError> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        Ok(Some(self.recover(parse_amount(&raw))?))
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AtmError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show recoverable errors to the user, pass fatal ones up
    fn recover<T>(&mut self, result: Result<T, AtmError>) -> Result<Option<T>, AtmError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::debug!("Recovered from: {:?}", e);
                writeln!(self.output, "{}.", e)?;
                Ok(None)
            }
        }
    }
}
