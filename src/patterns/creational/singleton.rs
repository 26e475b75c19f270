//! Singleton: a component that is instantiated only once, plus a few
//! variations (monostate, per-thread instance, ambient context).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use lazy_static::lazy_static;

use crate::console;

// =============================================================================
// Lazy singleton
// =============================================================================

static DATABASE_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

lazy_static! {
    static ref DATABASE: SingletonDatabase = SingletonDatabase::load();
}

pub trait Database {
    fn population(&self, city: &str) -> Option<u64>;
}

#[derive(Debug)]
pub struct SingletonDatabase {
    cities: HashMap<&'static str, u64>,
}

impl SingletonDatabase {
    fn load() -> Self {
        DATABASE_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        log::debug!("initializing city database");
        let cities = [
            ("Beijing", 21_542_000),
            ("Tokyo", 13_929_286),
            ("Kinshasa", 12_691_000),
            ("Moscow", 12_506_468),
            ("Jakarta", 10_075_310),
            ("Seoul", 9_838_892),
            ("Cairo", 9_848_576),
            ("London", 8_908_081),
            ("Tehran", 8_693_706),
            ("Baghdad", 6_719_500),
        ];
        Self {
            cities: cities.into_iter().collect(),
        }
    }

    /// Built on first access, shared afterwards.
    pub fn instance() -> &'static SingletonDatabase {
        &*DATABASE
    }

    pub fn construction_count() -> usize {
        DATABASE_CONSTRUCTIONS.load(Ordering::SeqCst)
    }
}

impl Database for SingletonDatabase {
    fn population(&self, city: &str) -> Option<u64> {
        self.cities.get(city).copied()
    }
}

/// Stand-in with predictable numbers for tests.
pub struct DummyDatabase {
    cities: HashMap<String, u64>,
}

impl Default for DummyDatabase {
    fn default() -> Self {
        let cities = [("alpha", 1), ("beta", 2), ("gamma", 3)]
            .into_iter()
            .map(|(name, population)| (name.to_string(), population))
            .collect();
        Self { cities }
    }
}

impl Database for DummyDatabase {
    fn population(&self, city: &str) -> Option<u64> {
        self.cities.get(city).copied()
    }
}

/// Depends on the `Database` trait, so it works with the singleton or a dummy.
pub struct RecordFinder<'a> {
    database: &'a dyn Database,
}

impl<'a> RecordFinder<'a> {
    pub fn new(database: &'a dyn Database) -> Self {
        Self { database }
    }

    /// Unknown cities count as zero.
    pub fn total_population(&self, cities: &[&str]) -> u64 {
        cities
            .iter()
            .filter_map(|city| self.database.population(city))
            .sum()
    }
}

// =============================================================================
// Monostate
// =============================================================================

#[derive(Debug, Default, Clone)]
struct CityRecord {
    name: String,
    population: String,
}

lazy_static! {
    static ref MONOSTATE: Mutex<CityRecord> = Mutex::new(CityRecord::default());
}

/// Every instance reads and writes the same static state.
#[derive(Debug, Default, Clone, Copy)]
pub struct Monostate;

impl Monostate {
    pub fn new() -> Self {
        Monostate
    }

    fn with_record<R>(&self, f: impl FnOnce(&mut CityRecord) -> R) -> R {
        let mut record = MONOSTATE.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut record)
    }

    pub fn city_name(&self) -> String {
        self.with_record(|r| r.name.clone())
    }

    pub fn set_city_name(&self, name: &str) {
        self.with_record(|r| r.name = name.to_string());
    }

    pub fn population(&self) -> String {
        self.with_record(|r| r.population.clone())
    }

    pub fn set_population(&self, population: &str) {
        self.with_record(|r| r.population = population.to_string());
    }
}

impl fmt::Display for Monostate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.with_record(|r| r.clone());
        write!(f, "City Name: {} | Population: {}", record.name, record.population)
    }
}

// =============================================================================
// Per-thread singleton
// =============================================================================

static NEXT_THREAD_INSTANCE: AtomicUsize = AtomicUsize::new(1);

#[derive(Debug)]
pub struct PerThreadSingleton {
    id: usize,
}

thread_local! {
    static PER_THREAD: PerThreadSingleton = PerThreadSingleton::create();
}

impl PerThreadSingleton {
    fn create() -> Self {
        let id = NEXT_THREAD_INSTANCE.fetch_add(1, Ordering::SeqCst);
        log::debug!("per-thread instance {id} created on {:?}", thread::current().id());
        Self { id }
    }

    /// Id of the calling thread's instance.
    pub fn instance_id() -> usize {
        PER_THREAD.with(|instance| instance.id)
    }
}

// =============================================================================
// Ambient context
// =============================================================================

thread_local! {
    static WALL_HEIGHTS: RefCell<Vec<u32>> = RefCell::new(vec![0]);
}

/// Pushes a wall height for as long as the guard lives.
#[must_use = "the context is popped as soon as the guard is dropped"]
pub struct BuildingContext {
    _private: (),
}

impl BuildingContext {
    pub fn new(wall_height: u32) -> Self {
        WALL_HEIGHTS.with(|stack| stack.borrow_mut().push(wall_height));
        Self { _private: () }
    }

    pub fn current_height() -> u32 {
        WALL_HEIGHTS.with(|stack| stack.borrow().last().copied().unwrap_or(0))
    }
}

impl Drop for BuildingContext {
    fn drop(&mut self) {
        WALL_HEIGHTS.with(|stack| {
            let mut stack = stack.borrow_mut();
            // The base entry is never popped.
            if stack.len() > 1 {
                stack.pop();
            }
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub start: Point,
    pub end: Point,
    pub height: u32,
}

impl Wall {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self {
            start: Point { x: start.0, y: start.1 },
            end: Point { x: end.0, y: end.1 },
            height: BuildingContext::current_height(),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start: {},{} End: {},{} Height: {}",
            self.start.x, self.start.y, self.end.x, self.end.y, self.height
        )
    }
}

#[derive(Debug, Default)]
pub struct Building {
    walls: Vec<Wall>,
}

impl Building {
    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for wall in &self.walls {
            writeln!(f, "{wall}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Demo
// =============================================================================

pub fn run() {
    console::demo("Singleton");

    let database = SingletonDatabase::instance();
    let city = "Tokyo";
    println!(
        "City: {city} | Population {}",
        database.population(city).unwrap_or_default()
    );
    let finder = RecordFinder::new(database);
    println!(
        "Seoul + Mexico City: {} (database built {} time(s))",
        finder.total_population(&["Seoul", "Mexico City"]),
        SingletonDatabase::construction_count()
    );

    let first = Monostate::new();
    let second = Monostate::new();
    first.set_city_name("London");
    first.set_population("8,908,081");
    println!("{first} | {second}");

    let workers: Vec<_> = (0..2)
        .map(|_| {
            thread::spawn(|| {
                (
                    PerThreadSingleton::instance_id(),
                    PerThreadSingleton::instance_id(),
                )
            })
        })
        .collect();
    for worker in workers {
        match worker.join() {
            Ok((a, b)) => println!("Per-thread instance ids: {a} and {b}"),
            Err(_) => log::warn!("per-thread worker panicked"),
        }
    }

    let mut building = Building::default();
    {
        let _outer = BuildingContext::new(3000);
        building.add_wall(Wall::new((0, 0), (5000, 0)));
        {
            let _inner = BuildingContext::new(5000);
            building.add_wall(Wall::new((0, 5000), (5000, 5000)));
            building.add_wall(Wall::new((5000, 0), (5000, 5000)));
        }
        building.add_wall(Wall::new((0, 0), (0, 5000)));
    }
    print!("{building}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_is_built_once() {
        let a = SingletonDatabase::instance();
        let b = SingletonDatabase::instance();
        assert!(std::ptr::eq(a, b));
        assert_eq!(SingletonDatabase::construction_count(), 1);
        assert_eq!(a.population("Tokyo"), Some(13_929_286));
    }

    #[test]
    fn test_record_finder_with_real_and_dummy_database() {
        let real = RecordFinder::new(SingletonDatabase::instance());
        assert_eq!(real.total_population(&["Seoul", "Cairo"]), 9_838_892 + 9_848_576);

        let dummy = DummyDatabase::default();
        let finder = RecordFinder::new(&dummy);
        assert_eq!(finder.total_population(&["alpha", "gamma", "missing"]), 4);
    }

    #[test]
    fn test_monostate_shares_state() {
        let writer = Monostate::new();
        let reader = Monostate::new();
        writer.set_city_name("London");
        writer.set_population("8,908,081");
        assert_eq!(reader.city_name(), "London");
        assert_eq!(reader.population(), "8,908,081");
        assert_eq!(reader.to_string(), writer.to_string());
    }

    #[test]
    fn test_per_thread_instances() {
        let here = PerThreadSingleton::instance_id();
        assert_eq!(here, PerThreadSingleton::instance_id());
        let there = thread::spawn(PerThreadSingleton::instance_id).join().unwrap();
        assert_ne!(here, there);
    }

    #[test]
    fn test_building_context_nesting() {
        let mut building = Building::default();
        building.add_wall(Wall::new((0, 0), (1, 0)));
        {
            let _outer = BuildingContext::new(3000);
            building.add_wall(Wall::new((0, 0), (5000, 0)));
            {
                let _inner = BuildingContext::new(5000);
                building.add_wall(Wall::new((0, 5000), (5000, 5000)));
            }
            building.add_wall(Wall::new((0, 0), (0, 5000)));
        }
        let heights: Vec<u32> = building.walls().iter().map(|w| w.height).collect();
        assert_eq!(heights, [0, 3000, 5000, 3000]);
        assert_eq!(building.walls()[1].to_string(), "Start: 0,0 End: 5000,0 Height: 3000");
        assert_eq!(BuildingContext::current_height(), 0);
    }
}
