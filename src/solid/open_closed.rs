//! Open-closed: extend behaviour without modifying existing code.
//!
//! `ProductFilter` needs a new method for every criterion. `BetterFilter`
//! takes any `Specification`, so new criteria are new types, not edits.

use std::fmt;

use crate::console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Blue,
    Metallic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub color: Color,
    pub size: Size,
}

impl Product {
    pub fn new(name: impl Into<String>, color: Color, size: Size) -> Self {
        Self {
            name: name.into(),
            color,
            size,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}, {:?})", self.name, self.color, self.size)
    }
}

// =============================================================================
// Before: one method per criterion
// =============================================================================

pub struct ProductFilter;

impl ProductFilter {
    pub fn by_color<'a>(&self, products: &'a [Product], color: Color) -> Vec<&'a Product> {
        products.iter().filter(|p| p.color == color).collect()
    }

    pub fn by_size<'a>(&self, products: &'a [Product], size: Size) -> Vec<&'a Product> {
        products.iter().filter(|p| p.size == size).collect()
    }

    // by_color_and_size, by_weight, by_color_or_size ...
}

// =============================================================================
// After: specification pattern
// =============================================================================

pub trait Specification<T> {
    fn is_satisfied(&self, item: &T) -> bool;
}

pub struct ColorSpecification(pub Color);

impl Specification<Product> for ColorSpecification {
    fn is_satisfied(&self, item: &Product) -> bool {
        item.color == self.0
    }
}

pub struct SizeSpecification(pub Size);

impl Specification<Product> for SizeSpecification {
    fn is_satisfied(&self, item: &Product) -> bool {
        item.size == self.0
    }
}

/// Satisfied when every inner specification is. Empty means always satisfied.
pub struct AndSpecification<T> {
    specs: Vec<Box<dyn Specification<T>>>,
}

impl<T> AndSpecification<T> {
    pub fn new(specs: Vec<Box<dyn Specification<T>>>) -> Self {
        Self { specs }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied(&self, item: &T) -> bool {
        self.specs.iter().all(|spec| spec.is_satisfied(item))
    }
}

pub trait Filter<T> {
    fn filter<'a>(&self, items: &'a [T], spec: &dyn Specification<T>) -> Vec<&'a T>;
}

pub struct BetterFilter;

impl<T> Filter<T> for BetterFilter {
    fn filter<'a>(&self, items: &'a [T], spec: &dyn Specification<T>) -> Vec<&'a T> {
        items.iter().filter(|item| spec.is_satisfied(item)).collect()
    }
}

fn names(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("Little Black Dress", Color::Black, Size::Small),
        Product::new("Sword of Isildur", Color::Metallic, Size::Large),
        Product::new("BMW M3 GTR", Color::Black, Size::Large),
    ]
}

pub fn run() {
    console::demo("Open-Closed");

    let products = sample_products();
    for product in &products {
        println!("{product}");
    }

    let old = ProductFilter;
    println!("[before] Large products: {:?}", names(&old.by_size(&products, Size::Large)));
    println!("[before] Black products: {:?}", names(&old.by_color(&products, Color::Black)));

    let filter = BetterFilter;
    let large = SizeSpecification(Size::Large);
    let black = ColorSpecification(Color::Black);
    let large_and_black = AndSpecification::new(vec![
        Box::new(SizeSpecification(Size::Large)),
        Box::new(ColorSpecification(Color::Black)),
    ]);

    println!("[after] Large products: {:?}", names(&filter.filter(&products, &large)));
    println!("[after] Black products: {:?}", names(&filter.filter(&products, &black)));
    println!(
        "[after] Large black products: {:?}",
        names(&filter.filter(&products, &large_and_black))
    );
}
