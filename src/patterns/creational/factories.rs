//! Factories: components responsible solely for the wholesale (not
//! piecewise) creation of objects.
//!
//! Object creation can be outsourced to:
//! - a separate function (factory method)
//! - a separate type (factory)
//! - a hierarchy of factories (abstract factory)

use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::console;
use crate::error::Result;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrinkError {
    #[error("no drink registered at index {0}")]
    UnknownDrink(usize),
}

// =============================================================================
// Factory function and interface factory
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrenchPerson {
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
}

impl FrenchPerson {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            nationality: "French".to_string(),
        }
    }
}

pub trait Introducer {
    fn introduce(&self) -> String;
}

impl Introducer for FrenchPerson {
    fn introduce(&self) -> String {
        format!(
            "My name is {} {}, I'm {}!",
            self.first_name, self.last_name, self.nationality
        )
    }
}

/// Callers only see the trait, not the fields behind it.
pub fn new_introducer(first_name: &str, last_name: &str) -> Box<dyn Introducer> {
    Box::new(FrenchPerson::new(first_name, last_name))
}

// =============================================================================
// Factory generators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Marketing,
    Engineering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    MarketingAnalyst,
    SoftwareEngineer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub department: Department,
    pub role: Role,
}

/// Structural approach: the factory is a value with a method.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeFactory {
    pub department: Department,
    pub role: Role,
}

impl EmployeeFactory {
    pub fn new(department: Department, role: Role) -> Self {
        Self { department, role }
    }

    pub fn create(&self, name: &str) -> Employee {
        Employee {
            name: name.to_string(),
            department: self.department,
            role: self.role,
        }
    }
}

/// Functional approach: the factory is a closure.
pub fn employee_factory(department: Department, role: Role) -> impl Fn(&str) -> Employee {
    move |name| Employee {
        name: name.to_string(),
        department,
        role,
    }
}

/// Prototype approach: the role decides the preset.
pub fn employee_for_role(role: Role) -> Employee {
    let department = match role {
        Role::MarketingAnalyst => Department::Marketing,
        Role::SoftwareEngineer => Department::Engineering,
    };
    Employee {
        name: String::new(),
        department,
        role,
    }
}

// =============================================================================
// Factory method, factory type, inner factory
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    // Same argument types, different descriptive names.
    pub fn cartesian(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(rho: f64, theta: f64) -> Self {
        Self {
            x: rho * theta.cos(),
            y: rho * theta.sin(),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Separates construction from the type's behaviour.
pub struct PointFactory;

impl PointFactory {
    pub fn cartesian(x: f64, y: f64) -> Point {
        Point::cartesian(x, y)
    }

    pub fn polar(rho: f64, theta: f64) -> Point {
        Point::polar(rho, theta)
    }
}

pub mod sealed {
    /// Fields are private; only the nested `factory` module can build one.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SealedPoint {
        x: f64,
        y: f64,
    }

    impl SealedPoint {
        pub fn x(&self) -> f64 {
            self.x
        }

        pub fn y(&self) -> f64 {
            self.y
        }
    }

    pub mod factory {
        use super::SealedPoint;

        pub fn cartesian(x: f64, y: f64) -> SealedPoint {
            SealedPoint { x, y }
        }

        pub fn polar(rho: f64, theta: f64) -> SealedPoint {
            SealedPoint {
                x: rho * theta.cos(),
                y: rho * theta.sin(),
            }
        }
    }
}

// =============================================================================
// Abstract factory
// =============================================================================

pub trait HotDrink {
    fn consume(&self) -> String;
}

struct Tea {
    amount: u32,
}

impl HotDrink for Tea {
    fn consume(&self) -> String {
        format!("This tea is nice ({} ml) but I'd prefer it with milk.", self.amount)
    }
}

struct Coffee {
    amount: u32,
}

impl HotDrink for Coffee {
    fn consume(&self) -> String {
        format!("This coffee is delicious ({} ml)!", self.amount)
    }
}

pub trait HotDrinkFactory {
    fn prepare(&self, amount: u32) -> Box<dyn HotDrink>;
}

pub struct TeaFactory;

impl HotDrinkFactory for TeaFactory {
    fn prepare(&self, amount: u32) -> Box<dyn HotDrink> {
        Box::new(Tea { amount })
    }
}

pub struct CoffeeFactory;

impl HotDrinkFactory for CoffeeFactory {
    fn prepare(&self, amount: u32) -> Box<dyn HotDrink> {
        Box::new(Coffee { amount })
    }
}

pub struct HotDrinkMachine {
    factories: Vec<(String, Box<dyn HotDrinkFactory>)>,
}

impl Default for HotDrinkMachine {
    fn default() -> Self {
        let mut machine = Self {
            factories: Vec::new(),
        };
        machine.register("Tea", Box::new(TeaFactory));
        machine.register("Coffee", Box::new(CoffeeFactory));
        machine
    }
}

impl HotDrinkMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: Box<dyn HotDrinkFactory>) {
        self.factories.push((name.into(), factory));
    }

    pub fn available(&self) -> Vec<&str> {
        self.factories.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn make_drink(&self, index: usize, amount: u32) -> std::result::Result<Box<dyn HotDrink>, DrinkError> {
        let (name, factory) = self
            .factories
            .get(index)
            .ok_or(DrinkError::UnknownDrink(index))?;
        log::debug!("preparing {amount} ml of {name}");
        Ok(factory.prepare(amount))
    }
}

// =============================================================================
// Object tracking and bulk replacement
// =============================================================================

pub trait Theme {
    fn origin(&self) -> &'static str;
    fn text_color(&self) -> &'static str;
    fn bg_color(&self) -> &'static str;
}

pub struct LightTheme;

impl Theme for LightTheme {
    fn origin(&self) -> &'static str {
        "light"
    }

    fn text_color(&self) -> &'static str {
        "#222"
    }

    fn bg_color(&self) -> &'static str {
        "#fff"
    }
}

pub struct DarkTheme;

impl Theme for DarkTheme {
    fn origin(&self) -> &'static str {
        "dark"
    }

    fn text_color(&self) -> &'static str {
        "#ffe"
    }

    fn bg_color(&self) -> &'static str {
        "#444"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Light,
    Dark,
}

fn make_theme(color: ThemeColor) -> Box<dyn Theme> {
    match color {
        ThemeColor::Light => Box::new(LightTheme),
        ThemeColor::Dark => Box::new(DarkTheme),
    }
}

fn describe(theme: &dyn Theme) -> String {
    format!(
        "Origin: {} | Text: {} | BG: {}",
        theme.origin(),
        theme.text_color(),
        theme.bg_color()
    )
}

/// Keeps weak references so it can report on themes still in use.
/// References to dropped themes are pruned on the next creation.
#[derive(Default)]
pub struct TrackingThemeFactory {
    refs: Vec<Weak<dyn Theme>>,
    created: usize,
}

impl TrackingThemeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_theme(&mut self, color: ThemeColor) -> Rc<dyn Theme> {
        self.refs.retain(|theme| theme.strong_count() > 0);
        let theme: Rc<dyn Theme> = Rc::from(make_theme(color));
        self.refs.push(Rc::downgrade(&theme));
        self.created += 1;
        theme
    }

    pub fn created(&self) -> usize {
        self.created
    }

    /// Weak references currently held, dead ones included.
    pub fn tracked(&self) -> usize {
        self.refs.len()
    }

    pub fn live_themes(&self) -> Vec<String> {
        self.refs
            .iter()
            .filter_map(Weak::upgrade)
            .map(|theme| describe(theme.as_ref()))
            .collect()
    }
}

pub type ThemeRef = Rc<RefCell<Box<dyn Theme>>>;

/// Hands out shared handles so every live theme can be swapped at once.
#[derive(Default)]
pub struct ReplaceableThemeFactory {
    refs: Vec<Weak<RefCell<Box<dyn Theme>>>>,
}

impl ReplaceableThemeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_theme(&mut self, color: ThemeColor) -> ThemeRef {
        self.refs.retain(|theme| theme.strong_count() > 0);
        let theme = Rc::new(RefCell::new(make_theme(color)));
        self.refs.push(Rc::downgrade(&theme));
        theme
    }

    pub fn tracked(&self) -> usize {
        self.refs.len()
    }

    /// Returns how many live themes were replaced.
    pub fn replace_themes(&self, color: ThemeColor) -> usize {
        let mut replaced = 0;
        for theme in self.refs.iter().filter_map(Weak::upgrade) {
            *theme.borrow_mut() = make_theme(color);
            replaced += 1;
        }
        replaced
    }

    pub fn live_themes(&self) -> Vec<String> {
        self.refs
            .iter()
            .filter_map(Weak::upgrade)
            .map(|theme| describe(theme.borrow().as_ref()))
            .collect()
    }
}

// =============================================================================
// Demo
// =============================================================================

pub fn run() -> Result<()> {
    console::demo("Factories");

    let charles = FrenchPerson::new("Charles", "de Gaulle");
    println!("{}", charles.introduce());
    let jeanne = new_introducer("Jeanne", "d'Arc");
    println!("{}", jeanne.introduce());

    let marketing = EmployeeFactory::new(Department::Marketing, Role::MarketingAnalyst);
    let engineering = employee_factory(Department::Engineering, Role::SoftwareEngineer);
    let mut jane = employee_for_role(Role::SoftwareEngineer);
    jane.name = "Jane".to_string();
    println!("{:?}", marketing.create("Anna"));
    println!("{:?}", engineering("Tom"));
    println!("{jane:?}");

    println!(
        "Points: {} {} {} {}",
        Point::cartesian(5.0, 5.0),
        Point::polar(1.0, FRAC_PI_2),
        PointFactory::cartesian(5.0, 5.0),
        PointFactory::polar(1.0, FRAC_PI_2)
    );
    let sealed = sealed::factory::polar(1.0, FRAC_PI_2);
    println!("Sealed point: ({:.2}, {:.2})", sealed.x(), sealed.y());

    let machine = HotDrinkMachine::new();
    println!("Available drinks:");
    for (index, name) in machine.available().iter().enumerate() {
        println!("{index}: {name}");
    }
    let drink = machine.make_drink(1, 200)?;
    println!("{}", drink.consume());

    let mut tracking = TrackingThemeFactory::new();
    let light = tracking.create_theme(ThemeColor::Light);
    let dark = tracking.create_theme(ThemeColor::Dark);
    {
        let _short_lived = tracking.create_theme(ThemeColor::Dark);
    }
    println!(
        "Tracked themes ({} created, {} alive):",
        tracking.created(),
        tracking.live_themes().len()
    );
    for line in tracking.live_themes() {
        println!("  {line}");
    }
    drop((light, dark));

    let mut replaceable = ReplaceableThemeFactory::new();
    let first = replaceable.create_theme(ThemeColor::Light);
    let second = replaceable.create_theme(ThemeColor::Dark);
    println!("Before replacement:");
    for line in replaceable.live_themes() {
        println!("  {line}");
    }
    replaceable.replace_themes(ThemeColor::Light);
    println!("After replacement:");
    for line in replaceable.live_themes() {
        println!("  {line}");
    }
    println!(
        "Handles now see: {} and {}",
        first.borrow().origin(),
        second.borrow().origin()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introductions() {
        assert_eq!(
            FrenchPerson::new("Charles", "de Gaulle").introduce(),
            "My name is Charles de Gaulle, I'm French!"
        );
        assert_eq!(
            new_introducer("Jeanne", "d'Arc").introduce(),
            "My name is Jeanne d'Arc, I'm French!"
        );
    }

    #[test]
    fn test_employee_factories_agree() {
        let structural = EmployeeFactory::new(Department::Engineering, Role::SoftwareEngineer);
        let functional = employee_factory(Department::Engineering, Role::SoftwareEngineer);
        assert_eq!(structural.create("Tom"), functional("Tom"));
    }

    #[test]
    fn test_employee_for_role_picks_department() {
        assert_eq!(
            employee_for_role(Role::MarketingAnalyst).department,
            Department::Marketing
        );
        let engineer = employee_for_role(Role::SoftwareEngineer);
        assert_eq!(engineer.department, Department::Engineering);
        assert!(engineer.name.is_empty());
    }

    #[test]
    fn test_polar_point() {
        let p = Point::polar(1.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert_eq!(PointFactory::cartesian(2.0, 3.0), Point::cartesian(2.0, 3.0));

        let sealed = sealed::factory::cartesian(2.0, 3.0);
        assert_eq!((sealed.x(), sealed.y()), (2.0, 3.0));
    }

    #[test]
    fn test_hot_drink_machine() {
        let machine = HotDrinkMachine::new();
        assert_eq!(machine.available(), ["Tea", "Coffee"]);
        let tea = machine.make_drink(0, 100).unwrap();
        assert!(tea.consume().contains("tea"));
        assert_eq!(
            machine.make_drink(5, 100).err(),
            Some(DrinkError::UnknownDrink(5))
        );
    }

    #[test]
    fn test_tracking_factory_forgets_dropped_themes() {
        let mut factory = TrackingThemeFactory::new();
        let kept = factory.create_theme(ThemeColor::Dark);
        drop(factory.create_theme(ThemeColor::Light));

        let live = factory.live_themes();
        assert_eq!(live, ["Origin: dark | Text: #ffe | BG: #444"]);
        assert_eq!(kept.origin(), "dark");
    }

    #[test]
    fn test_bulk_replacement_reaches_every_handle() {
        let mut factory = ReplaceableThemeFactory::new();
        let a = factory.create_theme(ThemeColor::Light);
        let b = factory.create_theme(ThemeColor::Dark);
        drop(factory.create_theme(ThemeColor::Light));

        assert_eq!(factory.replace_themes(ThemeColor::Dark), 2);
        assert_eq!(a.borrow().origin(), "dark");
        assert_eq!(b.borrow().bg_color(), "#444");
    }

    #[test]
    fn test_factories_count_creations_and_prune_dead_refs() {
        let mut tracking = TrackingThemeFactory::new();
        let kept = tracking.create_theme(ThemeColor::Light);
        for _ in 0..10 {
            drop(tracking.create_theme(ThemeColor::Dark));
        }
        assert_eq!(tracking.created(), 11);
        assert_eq!(tracking.tracked(), 2);
        assert_eq!(tracking.live_themes().len(), 1);
        assert_eq!(kept.origin(), "light");

        let mut replaceable = ReplaceableThemeFactory::new();
        let handle = replaceable.create_theme(ThemeColor::Dark);
        for _ in 0..5 {
            drop(replaceable.create_theme(ThemeColor::Light));
        }
        assert_eq!(replaceable.tracked(), 2);
        assert_eq!(replaceable.replace_themes(ThemeColor::Light), 1);
        assert_eq!(handle.borrow().origin(), "light");
    }
}
