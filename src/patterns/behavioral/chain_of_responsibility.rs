//! Chain of responsibility: pass a request along a chain of handlers, each
//! of which may process part of it.
//!
//! An ATM splits a cash amount into thousands, hundreds, tens and ones.
//! Each handler only acts on amounts with the digit count it owns.

use std::fmt;

use crate::console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    cash: u32,
}

impl Client {
    pub fn new(cash: u32) -> Self {
        Self { cash }
    }

    pub fn cash(&self) -> u32 {
        self.cash
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Thousands,
    Hundreds,
    Tens,
    Ones,
}

impl Bucket {
    fn unit(self) -> u32 {
        match self {
            Bucket::Thousands => 1000,
            Bucket::Hundreds => 100,
            Bucket::Tens => 10,
            Bucket::Ones => 1,
        }
    }

    fn accepts(self, cash: u32) -> bool {
        let digits = digit_count(cash);
        match self {
            Bucket::Thousands => (4..=6).contains(&digits),
            Bucket::Hundreds => digits == 3,
            Bucket::Tens => digits == 2,
            Bucket::Ones => digits == 1,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucket::Thousands => "thousand",
            Bucket::Hundreds => "hundred",
            Bucket::Tens => "tens",
            Bucket::Ones => "ones",
        };
        f.write_str(label)
    }
}

/// Zero has no digits.
fn digit_count(cash: u32) -> u32 {
    cash.checked_ilog10().map_or(0, |d| d + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub bucket: Bucket,
    pub count: u32,
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Withdraw {} {}", self.count, self.bucket)
    }
}

pub trait Handler {
    /// Returns the handler just attached so calls can be chained.
    fn set_next(&mut self, next: Box<dyn Handler>) -> &mut dyn Handler;
    fn handle(&self, client: &mut Client, withdrawals: &mut Vec<Withdrawal>);
}

pub struct BucketHandler {
    bucket: Bucket,
    next: Option<Box<dyn Handler>>,
}

impl BucketHandler {
    pub fn new(bucket: Bucket) -> Self {
        Self { bucket, next: None }
    }
}

impl Handler for BucketHandler {
    fn set_next(&mut self, next: Box<dyn Handler>) -> &mut dyn Handler {
        &mut **self.next.insert(next)
    }

    fn handle(&self, client: &mut Client, withdrawals: &mut Vec<Withdrawal>) {
        if self.bucket.accepts(client.cash) {
            let unit = self.bucket.unit();
            withdrawals.push(Withdrawal {
                bucket: self.bucket,
                count: client.cash / unit,
            });
            client.cash %= unit;
        }
        if client.cash == 0 {
            return;
        }
        if let Some(next) = &self.next {
            next.handle(client, withdrawals);
        }
    }
}

pub fn atm_chain() -> BucketHandler {
    let mut head = BucketHandler::new(Bucket::Thousands);
    head.set_next(Box::new(BucketHandler::new(Bucket::Hundreds)))
        .set_next(Box::new(BucketHandler::new(Bucket::Tens)))
        .set_next(Box::new(BucketHandler::new(Bucket::Ones)));
    head
}

/// Runs the whole chain over `client`; amounts of seven digits or more are
/// left untouched.
pub fn withdraw(client: &mut Client) -> Vec<Withdrawal> {
    let mut withdrawals = Vec::new();
    atm_chain().handle(client, &mut withdrawals);
    withdrawals
}

pub fn run(cash: u32) {
    console::demo("Chain of Responsibility");

    let mut client = Client::new(cash);
    println!("Client asks for {cash}");
    for withdrawal in withdraw(&mut client) {
        println!("{withdrawal}");
    }
    println!("Client cash: {}", client.cash());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(cash: u32) -> (Vec<String>, u32) {
        let mut client = Client::new(cash);
        let out = withdraw(&mut client).iter().map(ToString::to_string).collect();
        (out, client.cash())
    }

    #[test]
    fn test_splits_amount_across_buckets() {
        let (out, left) = lines(9305);
        assert_eq!(out, ["Withdraw 9 thousand", "Withdraw 3 hundred", "Withdraw 5 ones"]);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_stops_when_cash_runs_out() {
        let (out, left) = lines(2000);
        assert_eq!(out, ["Withdraw 2 thousand"]);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_small_amounts() {
        assert_eq!(lines(47).0, ["Withdraw 4 tens", "Withdraw 7 ones"]);
        assert_eq!(lines(0), (Vec::<String>::new(), 0));
    }

    #[test]
    fn test_large_amounts_are_not_handled() {
        assert_eq!(lines(1_000_000), (Vec::<String>::new(), 1_000_000));
        assert_eq!(lines(123_456).0[0], "Withdraw 123 thousand");
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 0);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(999_999), 6);
    }
}
