//! Liskov substitution: code written against a base contract must keep
//! working when handed a subtype.
//!
//! `Square` keeps its sides equal, so setting width then height on it breaks
//! what `area` callers expect from any `Resizable`.

use crate::console;

pub trait Resizable {
    fn width(&self) -> u32;
    fn set_width(&mut self, width: u32);
    fn height(&self) -> u32;
    fn set_height(&mut self, height: u32);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    width: u32,
    height: u32,
}

impl Rectangle {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Resizable for Rectangle {
    fn width(&self) -> u32 {
        self.width
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    side: u32,
}

impl Square {
    pub fn new(side: u32) -> Self {
        Self { side }
    }
}

impl Resizable for Square {
    fn width(&self) -> u32 {
        self.side
    }

    fn set_width(&mut self, width: u32) {
        self.side = width;
    }

    fn height(&self) -> u32 {
        self.side
    }

    fn set_height(&mut self, height: u32) {
        self.side = height;
    }
}

/// Widened so any pair of `u32` sides fits.
pub fn area(shape: &dyn Resizable) -> u64 {
    u64::from(shape.width()) * u64::from(shape.height())
}

/// Sets width 2 and height 5 the way a `Resizable` caller would, then measures.
pub fn resize_and_measure(shape: &mut dyn Resizable) -> u64 {
    shape.set_width(2);
    shape.set_height(5);
    area(shape)
}

pub fn run() {
    console::demo("Liskov Substitution");

    let mut rectangle = Rectangle::default();
    let mut square = Square::default();

    println!("Rectangle 2x5, expected area 10, got {}", resize_and_measure(&mut rectangle));
    println!("Square 2x5, expected area 10, got {}", resize_and_measure(&mut square));
}
