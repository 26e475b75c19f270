//! Prototype: build new objects by deep-copying a partially or fully
//! initialised one and customising the copy.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::console;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub address: Address,
    pub friends: Vec<String>,
}

impl Person {
    pub fn new(name: &str, city: &str, street: &str) -> Self {
        Self {
            name: name.to_string(),
            address: Address {
                city: city.to_string(),
                street: street.to_string(),
            },
            friends: Vec::new(),
        }
    }

    /// Through `Clone`: every owned field is copied.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Through a JSON round trip.
    pub fn json_copy(&self) -> Result<Self> {
        let encoded = serde_json::to_string(self)?;
        Ok(serde_json::from_str(&encoded)?)
    }

    /// Through a bincode round trip.
    pub fn binary_copy(&self) -> Result<Self> {
        let encoded = bincode::serialize(self)?;
        Ok(bincode::deserialize(&encoded)?)
    }
}

// =============================================================================
// Prototype factory
// =============================================================================

lazy_static! {
    static ref LONDON_RESIDENT: Person = Person::new("", "London", "");
}

pub fn new_london_person(name: &str, street: &str) -> Person {
    let mut person = LONDON_RESIDENT.deep_copy();
    person.name = name.to_string();
    person.address.street = street.to_string();
    person
}

fn show(person: &Person) {
    println!(
        "{} lives at {}, {} (friends: {:?})",
        person.name, person.address.street, person.address.city, person.friends
    );
}

pub fn run() -> Result<()> {
    console::demo("Prototype");

    let mut sherlock = Person::new("Sherlock", "Belfast", "221B Baker Street");
    sherlock.friends.push("Watson".to_string());

    let mut john = sherlock.deep_copy();
    john.name = "John".to_string();
    john.address.city = "Brighton".to_string();
    john.friends.push("Mrs Hudson".to_string());

    let mut mycroft = sherlock.json_copy()?;
    mycroft.name = "Mycroft".to_string();
    mycroft.address.city = "Birmingham".to_string();

    let mut irene = sherlock.binary_copy()?;
    irene.name = "Irene".to_string();
    irene.address.city = "London".to_string();

    for person in [&sherlock, &john, &mycroft, &irene] {
        show(person);
    }

    show(&new_london_person("Lestrade", "Scotland Yard"));
    Ok(())
}
