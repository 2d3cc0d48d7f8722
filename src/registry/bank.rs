use crate::concurrency::{lock_both, OrderedLock};
use crate::error::{DrillError, Result};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A balance behind a ranked lock. Shareable across threads via `Arc`.
#[derive(Debug)]
pub struct Account {
    id: u64,
    balance: OrderedLock<i64>,
}

impl Account {
    pub fn new(id: u64, opening: i64) -> Self {
        Self {
            id,
            balance: OrderedLock::new(id, opening),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn balance(&self) -> i64 {
        *self.balance.lock()
    }

    /// Returns the new balance.
    pub fn deposit(&self, amount: i64) -> Result<i64> {
        validate(amount)?;
        let mut balance = self.balance.lock();
        *balance = balance
            .checked_add(amount)
            .ok_or(DrillError::InvalidAmount(amount))?;
        debug!(account = self.id, amount, balance = *balance, "deposit");
        Ok(*balance)
    }

    /// Returns the new balance. The balance is untouched on failure.
    pub fn withdraw(&self, amount: i64) -> Result<i64> {
        validate(amount)?;
        let mut balance = self.balance.lock();
        if amount > *balance {
            return Err(DrillError::InsufficientFunds {
                requested: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        debug!(account = self.id, amount, balance = *balance, "withdraw");
        Ok(*balance)
    }

    /// Moves `amount` to `to`. Both balances are locked in id order, so
    /// opposing transfers between the same pair cannot deadlock.
    /// A transfer to the same account is a no-op; ids alone may collide.
    pub fn transfer(&self, to: &Account, amount: i64) -> Result<()> {
        validate(amount)?;
        if std::ptr::eq(self, to) {
            return Ok(());
        }
        let (mut from_balance, mut to_balance) = lock_both(&self.balance, &to.balance);
        if amount > *from_balance {
            return Err(DrillError::InsufficientFunds {
                requested: amount,
                available: *from_balance,
            });
        }
        let credited = to_balance
            .checked_add(amount)
            .ok_or(DrillError::InvalidAmount(amount))?;
        *from_balance -= amount;
        *to_balance = credited;
        info!(from = self.id, to = to.id, amount, "transfer");
        Ok(())
    }
}

fn validate(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(DrillError::InvalidAmount(amount));
    }
    Ok(())
}

/// Accounts by id, with sequential id allocation.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: IndexMap<u64, Arc<Account>>,
    next_id: u64,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, opening: i64) -> Result<Arc<Account>> {
        if opening < 0 {
            return Err(DrillError::InvalidAmount(opening));
        }
        self.next_id += 1;
        let account = Arc::new(Account::new(self.next_id, opening));
        self.accounts.insert(self.next_id, Arc::clone(&account));
        info!(account = self.next_id, opening, "account opened");
        Ok(account)
    }

    pub fn get(&self, id: u64) -> Result<Arc<Account>> {
        self.accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| DrillError::not_found("account", id))
    }

    pub fn transfer(&self, from: u64, to: u64, amount: i64) -> Result<()> {
        let source = self.get(from)?;
        let target = self.get(to)?;
        source.transfer(&target, amount)
    }

    pub fn total(&self) -> i64 {
        self.accounts.values().map(|a| a.balance()).sum()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
