//! Decorator: add behaviour to an object without touching its type, by
//! wrapping it in another object with the same interface.

use crate::console;

pub trait Pizza {
    fn name(&self) -> String;
    fn price(&self) -> u32;
    /// Nesting of decorators around the base, e.g. `Cheese(Italian)`.
    fn composition(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct ItalianPizza {
    name: String,
    price: u32,
}

impl ItalianPizza {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl Pizza for ItalianPizza {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn price(&self) -> u32 {
        self.price
    }

    fn composition(&self) -> String {
        "Italian".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct BulgarianPizza {
    name: String,
    price: u32,
}

impl BulgarianPizza {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl Pizza for BulgarianPizza {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn price(&self) -> u32 {
        self.price
    }

    fn composition(&self) -> String {
        "Bulgarian".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToppingKind {
    Cheese,
    Tomatoes,
}

impl ToppingKind {
    fn label(self) -> &'static str {
        match self {
            ToppingKind::Cheese => "Cheese",
            ToppingKind::Tomatoes => "Tomatoes",
        }
    }
}

pub struct Topping {
    pizza: Box<dyn Pizza>,
    kind: ToppingKind,
    price: u32,
}

impl Topping {
    pub fn new(pizza: impl Pizza + 'static, kind: ToppingKind, price: u32) -> Self {
        Self {
            pizza: Box::new(pizza),
            kind,
            price,
        }
    }

    pub fn cheese(pizza: impl Pizza + 'static, price: u32) -> Self {
        Self::new(pizza, ToppingKind::Cheese, price)
    }

    pub fn tomatoes(pizza: impl Pizza + 'static, price: u32) -> Self {
        Self::new(pizza, ToppingKind::Tomatoes, price)
    }
}

impl Pizza for Topping {
    fn name(&self) -> String {
        format!("{}, with {}", self.pizza.name(), self.kind.label())
    }

    fn price(&self) -> u32 {
        self.pizza.price() + self.price
    }

    fn composition(&self) -> String {
        format!("{}({})", self.kind.label(), self.pizza.composition())
    }
}

fn review(pizza: &dyn Pizza) {
    println!("{} ${}", pizza.name(), pizza.price());
    println!("{}", pizza.composition());
}

pub fn run() {
    console::demo("Decorator");

    let banica = Topping::cheese(BulgarianPizza::new("Banica", 16), 3);
    review(&banica);

    let margherita = Topping::tomatoes(
        Topping::cheese(ItalianPizza::new("Margherita", 20), 4),
        3,
    );
    review(&margherita);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_topping() {
        let pizza = Topping::cheese(BulgarianPizza::new("Banica", 16), 3);
        assert_eq!(pizza.name(), "Banica, with Cheese");
        assert_eq!(pizza.price(), 19);
        assert_eq!(pizza.composition(), "Cheese(Bulgarian)");
    }

    #[test]
    fn test_stacked_toppings() {
        let pizza = Topping::tomatoes(Topping::cheese(ItalianPizza::new("Margherita", 20), 4), 3);
        assert_eq!(pizza.name(), "Margherita, with Cheese, with Tomatoes");
        assert_eq!(pizza.price(), 27);
        assert_eq!(pizza.composition(), "Tomatoes(Cheese(Italian))");
    }

    #[test]
    fn test_undecorated_pizza() {
        let pizza = ItalianPizza::new("Marinara", 12);
        assert_eq!(pizza.composition(), "Italian");
        assert_eq!(pizza.price(), 12);
    }
}
