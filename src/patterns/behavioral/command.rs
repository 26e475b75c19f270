//! Command: wrap an action and its arguments in an object so it can be
//! queued, logged, and undone.

use std::cell::RefCell;
use std::rc::Rc;

use crate::console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

// =============================================================================
// Receiver
// =============================================================================

#[derive(Debug)]
pub struct BankAccount {
    owner: User,
    balance: i64,
}

impl BankAccount {
    pub fn new(owner: User) -> Self {
        Self { owner, balance: 0 }
    }

    pub fn shared(owner: User) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(owner)))
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }
}

// =============================================================================
// Commands
// =============================================================================

pub trait Operation {
    /// Returns whether the operation took effect.
    fn execute(&mut self) -> bool;
    /// Returns whether anything was reverted.
    fn undo(&mut self) -> bool;
}

pub struct Deposit {
    account: Rc<RefCell<BankAccount>>,
    amount: i64,
    completed: bool,
}

impl Deposit {
    pub fn new(account: Rc<RefCell<BankAccount>>, amount: i64) -> Self {
        Self {
            account,
            amount,
            completed: false,
        }
    }
}

impl Operation for Deposit {
    fn execute(&mut self) -> bool {
        self.account.borrow_mut().balance += self.amount;
        self.completed = true;
        true
    }

    fn undo(&mut self) -> bool {
        let mut account = self.account.borrow_mut();
        // Money spent since the deposit cannot be taken back.
        if !self.completed || account.balance - self.amount < 0 {
            return false;
        }
        account.balance -= self.amount;
        self.completed = false;
        true
    }
}

pub struct Withdraw {
    account: Rc<RefCell<BankAccount>>,
    amount: i64,
    completed: bool,
}

impl Withdraw {
    pub fn new(account: Rc<RefCell<BankAccount>>, amount: i64) -> Self {
        Self {
            account,
            amount,
            completed: false,
        }
    }
}

impl Operation for Withdraw {
    fn execute(&mut self) -> bool {
        let mut account = self.account.borrow_mut();
        if account.balance - self.amount < 0 {
            log::debug!(
                "refusing to withdraw {} from a balance of {}",
                self.amount,
                account.balance
            );
            return false;
        }
        account.balance -= self.amount;
        self.completed = true;
        true
    }

    fn undo(&mut self) -> bool {
        if !self.completed {
            return false;
        }
        self.account.borrow_mut().balance += self.amount;
        self.completed = false;
        true
    }
}

// =============================================================================
// Invoker
// =============================================================================

#[derive(Default)]
pub struct Terminal {
    current: Option<Box<dyn Operation>>,
    history: Vec<Box<dyn Operation>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_command(&mut self, operation: impl Operation + 'static) {
        self.current = Some(Box::new(operation));
    }

    /// Executes the current command and moves it to the history.
    pub fn run(&mut self) -> bool {
        match self.current.take() {
            Some(mut operation) => {
                let done = operation.execute();
                self.history.push(operation);
                done
            }
            None => false,
        }
    }

    /// Undoes the most recently run command.
    pub fn cancel(&mut self) -> bool {
        match self.history.pop() {
            Some(mut operation) => operation.undo(),
            None => false,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

pub fn run() {
    console::demo("Command");

    let account = BankAccount::shared(User::new("user", "example@email.com"));
    let mut terminal = Terminal::new();
    println!("balance before deposit: {}", account.borrow().balance());

    terminal.set_command(Deposit::new(Rc::clone(&account), 1000));
    terminal.run();
    println!("balance after deposit: {}", account.borrow().balance());

    terminal.set_command(Withdraw::new(Rc::clone(&account), 500));
    terminal.run();
    println!("balance after withdraw: {}", account.borrow().balance());

    terminal.cancel();
    println!("balance after withdraw undo: {}", account.borrow().balance());
}
