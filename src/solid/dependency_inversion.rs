//! Dependency inversion: high-level modules depend on abstractions, and the
//! details (how relationships are stored) depend on those same abstractions.

use std::fmt;

use crate::console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Parent,
    Child,
    Sibling,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relationship::Parent => "parent",
            Relationship::Child => "child",
            Relationship::Sibling => "sibling",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kinship {
    pub from: Person,
    pub relationship: Relationship,
    pub to: Person,
}

impl fmt::Display for Kinship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is a {} of {}", self.from.name, self.relationship, self.to.name)
    }
}

// =============================================================================
// Abstraction
// =============================================================================

pub trait RelationshipBrowser {
    fn find_children_of(&self, name: &str) -> Vec<&Kinship>;
    fn find_siblings_of(&self, name: &str) -> Vec<&Kinship>;
}

// =============================================================================
// Low-level module: storage details stay private
// =============================================================================

#[derive(Debug, Default)]
pub struct Relationships {
    relations: Vec<Kinship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parent_and_child(&mut self, parent: &Person, child: &Person) {
        self.push(parent, Relationship::Parent, child);
        self.push(child, Relationship::Child, parent);
    }

    pub fn add_siblings(&mut self, first: &Person, second: &Person) {
        self.push(first, Relationship::Sibling, second);
        self.push(second, Relationship::Sibling, first);
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    fn push(&mut self, from: &Person, relationship: Relationship, to: &Person) {
        self.relations.push(Kinship {
            from: from.clone(),
            relationship,
            to: to.clone(),
        });
    }

    fn find(&self, name: &str, relationship: Relationship) -> Vec<&Kinship> {
        self.relations
            .iter()
            .filter(|k| k.from.name == name && k.relationship == relationship)
            .collect()
    }
}

impl RelationshipBrowser for Relationships {
    fn find_children_of(&self, name: &str) -> Vec<&Kinship> {
        self.find(name, Relationship::Parent)
    }

    fn find_siblings_of(&self, name: &str) -> Vec<&Kinship> {
        self.find(name, Relationship::Sibling)
    }
}

// =============================================================================
// High-level module: only knows the abstraction
// =============================================================================

pub struct Research<'a, B: RelationshipBrowser> {
    browser: &'a B,
}

impl<'a, B: RelationshipBrowser> Research<'a, B> {
    pub fn new(browser: &'a B) -> Self {
        Self { browser }
    }

    pub fn children_of(&self, name: &str) -> Vec<String> {
        self.browser
            .find_children_of(name)
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn siblings_of(&self, name: &str) -> Vec<String> {
        self.browser
            .find_siblings_of(name)
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }
}

pub fn run() {
    console::demo("Dependency Inversion");

    let dad = Person::new("Anakin Skywalker");
    let son = Person::new("Luke Skywalker");
    let daughter = Person::new("Leia Amidala Skywalker");

    let mut relationships = Relationships::new();
    relationships.add_parent_and_child(&dad, &son);
    relationships.add_parent_and_child(&dad, &daughter);
    relationships.add_siblings(&son, &daughter);

    let research = Research::new(&relationships);
    for line in research.children_of(&dad.name) {
        println!("{line}");
    }
    for line in research.siblings_of(&son.name) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> Relationships {
        let dad = Person::new("Anakin");
        let son = Person::new("Luke");
        let daughter = Person::new("Leia");
        let mut relationships = Relationships::new();
        relationships.add_parent_and_child(&dad, &son);
        relationships.add_parent_and_child(&dad, &daughter);
        relationships.add_siblings(&son, &daughter);
        relationships
    }

    #[test]
    fn test_links_are_recorded_both_ways() {
        assert_eq!(family().len(), 6);
    }

    #[test]
    fn test_research_children() {
        let relationships = family();
        let research = Research::new(&relationships);
        assert_eq!(
            research.children_of("Anakin"),
            ["Anakin is a parent of Luke", "Anakin is a parent of Leia"]
        );
        assert!(research.children_of("Luke").is_empty());
    }

    #[test]
    fn test_research_siblings() {
        let relationships = family();
        let research = Research::new(&relationships);
        assert_eq!(research.siblings_of("Leia"), ["Leia is a sibling of Luke"]);
    }

    #[test]
    fn test_research_works_with_any_browser() {
        struct Empty;
        impl RelationshipBrowser for Empty {
            fn find_children_of(&self, _name: &str) -> Vec<&Kinship> {
                Vec::new()
            }
            fn find_siblings_of(&self, _name: &str) -> Vec<&Kinship> {
                Vec::new()
            }
        }
        let research = Research::new(&Empty);
        assert!(research.children_of("anyone").is_empty());
    }
}
