//! Builder: when piecewise construction gets complicated, provide an API
//! that does it step by step instead of one constructor with a dozen
//! arguments.

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

use crate::console;
use crate::error::Result;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("missing argument for placeholder #{0}")]
    MissingArgument(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarSpecError {
    #[error("wheel size {size} is invalid for a {car_type}")]
    InvalidWheelSize { car_type: CarType, size: u32 },
}

// =============================================================================
// Fluent builder
// =============================================================================

#[derive(Debug, Clone)]
pub struct CodeBuilder {
    name: String,
    fields: Vec<(String, String)>,
}

impl CodeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push((name.into(), ty.into()));
        self
    }
}

impl fmt::Display for CodeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pub struct {} {{", self.name)?;
        for (name, ty) in &self.fields {
            writeln!(f, "    pub {name}: {ty},")?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// Fluent builder with deferred error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub query: String,
    pub user: String,
}

/// The first failure is kept and every later step becomes a no-op.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    query: String,
    error: Option<QueryError>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, table: &str) -> Self {
        if self.error.is_none() {
            self.query.push_str(&format!("FROM {table} "));
        }
        self
    }

    pub fn select(mut self, columns: &str) -> Self {
        if self.error.is_none() {
            self.query.push_str(&format!("SELECT {columns} "));
        }
        self
    }

    /// Each `?` in `clause` is replaced by the next entry of `args`.
    pub fn where_(mut self, clause: &str, args: &[&str]) -> Self {
        if self.error.is_some() {
            return self;
        }
        match bind_arguments(clause, args) {
            Ok(bound) => self.query.push_str(&format!("WHERE {bound}")),
            Err(err) => {
                self.query.clear();
                self.error = Some(err);
            }
        }
        self
    }

    /// Pretends to run the query against a user table.
    pub fn find(self) -> std::result::Result<QueryResult, QueryError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(QueryResult {
            query: format!("{};", self.query),
            user: "Rickiest Rick of all Ricks".to_string(),
        })
    }
}

fn bind_arguments(clause: &str, args: &[&str]) -> std::result::Result<String, QueryError> {
    let mut bound = String::with_capacity(clause.len());
    let mut args = args.iter();
    let mut placeholder = 0;
    for c in clause.chars() {
        if c == '?' {
            placeholder += 1;
            let arg = args.next().ok_or(QueryError::MissingArgument(placeholder))?;
            bound.push_str(arg);
        } else {
            bound.push(c);
        }
    }
    Ok(bound)
}

// =============================================================================
// Builder inheritance
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub position: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {} | Position: {}", self.name, self.position)
    }
}

pub trait PersonBuilder: Sized {
    fn person_mut(&mut self) -> &mut Person;
    fn build(self) -> Person;
}

pub trait PersonInfoBuilder: PersonBuilder {
    fn called(mut self, name: &str) -> Self {
        self.person_mut().name = name.to_string();
        self
    }
}

/// Extends the info facet; anything implementing it also gets `called`.
pub trait PersonJobBuilder: PersonInfoBuilder {
    fn works_as(mut self, position: &str) -> Self {
        self.person_mut().position = position.to_string();
        self
    }
}

#[derive(Debug, Default)]
pub struct PersonFluentBuilder {
    person: Person,
}

impl PersonFluentBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonBuilder for PersonFluentBuilder {
    fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    fn build(self) -> Person {
        self.person
    }
}

impl PersonInfoBuilder for PersonFluentBuilder {}
impl PersonJobBuilder for PersonFluentBuilder {}

// =============================================================================
// Stepwise builder (typestate)
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CarType {
    #[default]
    Sedan,
    Crossover,
}

impl CarType {
    pub fn wheel_sizes(self) -> std::ops::RangeInclusive<u32> {
        match self {
            CarType::Sedan => 15..=17,
            CarType::Crossover => 17..=20,
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarType::Sedan => f.write_str("sedan"),
            CarType::Crossover => f.write_str("crossover"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Car {
    pub car_type: CarType,
    pub wheel_size: u32,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type: {} | WheelSize: {}", self.car_type, self.wheel_size)
    }
}

// State markers
pub struct SpecifyType;
pub struct SpecifyWheels;
pub struct Ready;

pub struct CarBuilder<State> {
    car: Car,
    _state: PhantomData<State>,
}

impl CarBuilder<SpecifyType> {
    pub fn create() -> Self {
        CarBuilder {
            car: Car {
                car_type: CarType::default(),
                wheel_size: 0,
            },
            _state: PhantomData,
        }
    }

    pub fn of_type(mut self, car_type: CarType) -> CarBuilder<SpecifyWheels> {
        self.car.car_type = car_type;
        CarBuilder {
            car: self.car,
            _state: PhantomData,
        }
    }
}

impl CarBuilder<SpecifyWheels> {
    pub fn with_wheels(mut self, size: u32) -> std::result::Result<CarBuilder<Ready>, CarSpecError> {
        let car_type = self.car.car_type;
        if !car_type.wheel_sizes().contains(&size) {
            return Err(CarSpecError::InvalidWheelSize { car_type, size });
        }
        self.car.wheel_size = size;
        Ok(CarBuilder {
            car: self.car,
            _state: PhantomData,
        })
    }
}

impl CarBuilder<Ready> {
    pub fn build(self) -> Car {
        self.car
    }
}

// =============================================================================
// Functional builder
// =============================================================================

pub struct FunctionalBuilder<T> {
    actions: Vec<Box<dyn FnOnce(&mut T)>>,
}

impl<T> Default for FunctionalBuilder<T> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<T: Default> FunctionalBuilder<T> {
    /// Nothing runs until `build`.
    pub fn with(mut self, action: impl FnOnce(&mut T) + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    pub fn build(self) -> T {
        let mut subject = T::default();
        for action in self.actions {
            action(&mut subject);
        }
        subject
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cat {
    pub name: String,
    pub hobby: String,
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {} | Hobby: {}", self.name, self.hobby)
    }
}

#[derive(Default)]
pub struct CatBuilder {
    inner: FunctionalBuilder<Cat>,
}

impl CatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, action: impl FnOnce(&mut Cat) + 'static) -> Self {
        Self {
            inner: self.inner.with(action),
        }
    }

    pub fn called(self, name: &str) -> Self {
        let name = name.to_string();
        self.with(move |cat| cat.name = name)
    }

    pub fn build(self) -> Cat {
        self.inner.build()
    }
}

/// Adds steps to `CatBuilder` from outside its impl block.
pub trait CatBuilderExt {
    fn likes(self, hobby: &str) -> Self;
}

impl CatBuilderExt for CatBuilder {
    fn likes(self, hobby: &str) -> Self {
        let hobby = hobby.to_string();
        self.with(move |cat| cat.hobby = hobby)
    }
}

// =============================================================================
// Faceted builder
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Employee {
    pub street_address: String,
    pub city: String,
    pub post_code: String,
    pub company_name: String,
    pub position: String,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StreetAddress {} | City {} | PostCode {} | CompanyName {} | Position {}",
            self.street_address, self.city, self.post_code, self.company_name, self.position
        )
    }
}

#[derive(Debug, Default)]
pub struct EmployeeBuilder {
    employee: Employee,
}

impl EmployeeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lives(self) -> EmployeeAddressBuilder {
        EmployeeAddressBuilder { builder: self }
    }

    pub fn works(self) -> EmployeeJobBuilder {
        EmployeeJobBuilder { builder: self }
    }

    pub fn build(self) -> Employee {
        self.employee
    }
}

pub struct EmployeeAddressBuilder {
    builder: EmployeeBuilder,
}

impl EmployeeAddressBuilder {
    pub fn on_street(mut self, street: &str) -> Self {
        self.builder.employee.street_address = street.to_string();
        self
    }

    pub fn in_city(mut self, city: &str) -> Self {
        self.builder.employee.city = city.to_string();
        self
    }

    pub fn with_postal_code(mut self, code: &str) -> Self {
        self.builder.employee.post_code = code.to_string();
        self
    }

    pub fn works(self) -> EmployeeJobBuilder {
        self.builder.works()
    }

    pub fn build(self) -> Employee {
        self.builder.build()
    }
}

pub struct EmployeeJobBuilder {
    builder: EmployeeBuilder,
}

impl EmployeeJobBuilder {
    pub fn in_company(mut self, company: &str) -> Self {
        self.builder.employee.company_name = company.to_string();
        self
    }

    pub fn on_position(mut self, position: &str) -> Self {
        self.builder.employee.position = position.to_string();
        self
    }

    pub fn lives(self) -> EmployeeAddressBuilder {
        self.builder.lives()
    }

    pub fn build(self) -> Employee {
        self.builder.build()
    }
}

// =============================================================================
// Demo
// =============================================================================

pub fn run() -> Result<()> {
    console::demo("Builder");

    let code = CodeBuilder::new("Person")
        .add_field("name", "String")
        .add_field("age", "i32");
    println!("{code}");

    let result = QueryBuilder::new()
        .from("users")
        .select("user.name")
        .where_("user.id = ?", &["abc_123"])
        .find()?;
    println!("Query: {} Result: {}", result.query, result.user);

    let person = PersonFluentBuilder::new()
        .called("Tommy")
        .works_as("Creator")
        .build();
    println!("{person}");

    let car = CarBuilder::create()
        .of_type(CarType::Sedan)
        .with_wheels(15)?
        .build();
    println!("{car}");
    if let Err(err) = CarBuilder::create().of_type(CarType::Crossover).with_wheels(15) {
        println!("Rejected: {err}");
    }

    let cat = CatBuilder::new().called("Tom").likes("to chase Jerry").build();
    println!("{cat}");

    let employee = EmployeeBuilder::new()
        .lives()
        .on_street("501 N VIRGIL")
        .in_city("Los Angeles")
        .with_postal_code("90004-2315")
        .works()
        .in_company("Hufflepuff")
        .on_position("Puffmaker")
        .build();
    println!("{employee}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_builder_output() {
        let code = CodeBuilder::new("Person")
            .add_field("name", "String")
            .add_field("age", "i32")
            .to_string();
        assert_eq!(
            code,
            "pub struct Person {\n    pub name: String,\n    pub age: i32,\n}"
        );
        assert_eq!(CodeBuilder::new("Empty").to_string(), "pub struct Empty {\n}");
    }

    #[test]
    fn test_query_builder_binds_arguments() {
        let result = QueryBuilder::new()
            .from("users")
            .select("user.name")
            .where_("user.id = ?", &["abc_123"])
            .find()
            .unwrap();
        assert_eq!(result.query, "FROM users SELECT user.name WHERE user.id = abc_123;");
        assert_eq!(result.user, "Rickiest Rick of all Ricks");
    }

    #[test]
    fn test_query_builder_missing_argument() {
        let err = QueryBuilder::new()
            .from("users")
            .where_("a = ? AND b = ?", &["1"])
            .select("ignored")
            .find()
            .unwrap_err();
        assert_eq!(err, QueryError::MissingArgument(2));
    }

    #[test]
    fn test_inherited_builder() {
        let person = PersonFluentBuilder::new().called("Tommy").works_as("Creator").build();
        assert_eq!(person.to_string(), "Name: Tommy | Position: Creator");
    }

    #[test]
    fn test_car_wheel_validation() {
        let car = CarBuilder::create()
            .of_type(CarType::Crossover)
            .with_wheels(20)
            .unwrap()
            .build();
        assert_eq!(car.to_string(), "Type: crossover | WheelSize: 20");

        let err = CarBuilder::create().of_type(CarType::Sedan).with_wheels(18).err();
        assert_eq!(
            err,
            Some(CarSpecError::InvalidWheelSize {
                car_type: CarType::Sedan,
                size: 18
            })
        );
        assert!(CarBuilder::create().of_type(CarType::Crossover).with_wheels(16).is_err());
    }

    #[test]
    fn test_functional_builder_runs_actions_in_order() {
        let cat = CatBuilder::new()
            .called("Tom")
            .likes("to chase Jerry")
            .with(|cat| cat.name.push_str(" the Cat"))
            .build();
        assert_eq!(cat.to_string(), "Name: Tom the Cat | Hobby: to chase Jerry");
    }

    #[test]
    fn test_faceted_builder_switches_facets() {
        let employee = EmployeeBuilder::new()
            .works()
            .in_company("Hufflepuff")
            .lives()
            .in_city("Los Angeles")
            .works()
            .on_position("Puffmaker")
            .build();
        assert_eq!(employee.city, "Los Angeles");
        assert_eq!(employee.company_name, "Hufflepuff");
        assert_eq!(employee.position, "Puffmaker");
        assert!(employee.street_address.is_empty());
    }
}
