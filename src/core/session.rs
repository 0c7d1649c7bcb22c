//! ATM session management
//!
//! This module provides the `SessionManager`, which owns the in-memory account
//! set and the login state, and exposes the operations of the ATM.
//!
//! # Session States
//!
//! - **LoggedOut** (initial): only account creation and login are meaningful
//! - **LoggedIn(account)**: balance, deposit, withdrawal and history operate on
//!   the logged-in account
//!
//! The logged-in account is tracked by its account number and looked up in the
//! account map on every call.
//!
//! Every state-changing operation (create, deposit, withdraw, logout) is followed
//! by a full save through the [`AccountStore`].

use crate::core::traits::{AccountStore, Accounts};
use crate::types::amount::{ensure_balance, ensure_positive};
use crate::types::{AccountNumber, AccountRecord, AtmError, Pin};
use rust_decimal::Decimal;

/// Login state of the ATM
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No account is logged in
    #[default]
    LoggedOut,

    /// The account with this number is logged in
    LoggedIn(AccountNumber),
}

/// The ATM core
///
/// Holds every account in memory, tracks at most one logged-in account and
/// persists through its store after each mutation.
#[derive(Debug)]
pub struct SessionManager<S: AccountStore> {
    store: S,
    accounts: Accounts,
    state: SessionState,
}

impl<S: AccountStore> SessionManager<S> {
    /// Load all accounts from the store and start logged out
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: S) -> Result<Self, AtmError> {
        let accounts = store.load_all()?;
        log::info!("ATM ready with {} accounts", accounts.len());

        Ok(SessionManager {
            store,
            accounts,
            state: SessionState::LoggedOut,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// The logged-in account, if any
    pub fn current_account(&self) -> Option<&AccountRecord> {
        match &self.state {
            SessionState::LoggedIn(number) => self.accounts.get(number),
            SessionState::LoggedOut => None,
        }
    }

    /// Create a new account and persist it
    ///
    /// The session state is not changed.
    ///
    /// # Arguments
    ///
    /// * `account_number` - Four-digit account number, not already in use
    /// * `pin` - Four-digit PIN
    /// * `initial_balance` - Opening balance, zero or more
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account number or PIN is malformed
    /// - The opening balance is negative or has more than two decimal places
    /// - An account with this number already exists (nothing is changed)
    /// - Saving fails
    pub fn create_account(
        &mut self,
        account_number: &str,
        pin: &str,
        initial_balance: Decimal,
    ) -> Result<(), AtmError> {
        let account_number = AccountNumber::parse(account_number)?;
        let pin = Pin::parse(pin)?;

        ensure_balance(initial_balance)?;

        if self.accounts.contains_key(&account_number) {
            log::warn!("Rejected duplicate account {}", account_number);
            return Err(AtmError::duplicate_account(account_number.as_str()));
        }

        let account = AccountRecord::new(account_number.clone(), pin, initial_balance)?;
        self.accounts.insert(account_number.clone(), account);
        log::info!("Created account {}", account_number);

        self.save()
    }

    /// Log in with an account number and PIN
    ///
    /// On success the session switches to the matching account. On failure
    /// the session is left as it was and the error does not say whether the
    /// account number or the PIN was wrong.
    pub fn login(&mut self, account_number: &str, pin: &str) -> Result<(), AtmError> {
        let matched = AccountNumber::parse(account_number)
            .ok()
            .filter(|number| {
                self.accounts
                    .get(number)
                    .is_some_and(|account| account.pin_matches(pin))
            });

        match matched {
            Some(number) => {
                log::info!("Account {} logged in", number);
                self.state = SessionState::LoggedIn(number);
                Ok(())
            }
            None => {
                log::warn!("Failed login attempt for account {:?}", account_number);
                Err(AtmError::AuthenticationFailure)
            }
        }
    }

    /// End the session and persist all accounts
    ///
    /// Always leaves the session logged out, even if saving fails.
    pub fn logout(&mut self) -> Result<(), AtmError> {
        if let SessionState::LoggedIn(number) = std::mem::take(&mut self.state) {
            log::info!("Account {} logged out", number);
        }

        self.save()
    }

    /// Balance of the logged-in account
    pub fn check_balance(&self) -> Result<Decimal, AtmError> {
        self.current_account()
            .map(AccountRecord::balance)
            .ok_or(AtmError::NoActiveSession)
    }

    /// Transaction log of the logged-in account, oldest first
    pub fn history(&self) -> Result<&[String], AtmError> {
        self.current_account()
            .map(AccountRecord::transaction_log)
            .ok_or(AtmError::NoActiveSession)
    }

    /// Deposit into the logged-in account and persist
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(AtmError)` - No session, non-positive amount, overflow, or a
    ///   save failure
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AtmError> {
        let account = self.current_account_mut()?;
        ensure_positive(amount)?;

        let balance = account.deposit(amount)?;
        log::info!(
            "Deposited {:.2} into account {}, balance {:.2}",
            amount,
            account.account_number(),
            balance
        );

        self.save()?;
        Ok(balance)
    }

    /// Withdraw from the logged-in account and persist
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(AtmError)` - No session, non-positive amount, insufficient funds,
    ///   or a save failure
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AtmError> {
        let account = self.current_account_mut()?;
        ensure_positive(amount)?;

        let balance = account.withdraw(amount)?;
        log::info!(
            "Withdrew {:.2} from account {}, balance {:.2}",
            amount,
            account.account_number(),
            balance
        );

        self.save()?;
        Ok(balance)
    }

    fn current_account_mut(&mut self) -> Result<&mut AccountRecord, AtmError> {
        match &self.state {
            SessionState::LoggedIn(number) => self
                .accounts
                .get_mut(number)
                .ok_or(AtmError::NoActiveSession),
            SessionState::LoggedOut => Err(AtmError::NoActiveSession),
        }
    }

    fn save(&mut self) -> Result<(), AtmError> {
        self.store.save_all(&mut self.accounts)
    }
}
