//! Flyweight: share the intrinsic part of many similar objects and pass the
//! varying (extrinsic) part in at call time.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

use crate::console;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Intrinsic state: a name and the segments it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    name: String,
    segments: Vec<Segment>,
}

impl Figure {
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Colour and position are extrinsic and never stored.
    pub fn draw(&self, color: &str, x: f32, y: f32) -> String {
        format!("Drawing {color} {} at position x:{x} y:{y}.", self.name)
    }
}

pub struct FigureFactory {
    figures: BTreeMap<String, Rc<Figure>>,
}

impl Default for FigureFactory {
    fn default() -> Self {
        let square = Figure::new(
            "square",
            vec![
                Segment::new(0.0, 0.0, 5.0, 0.0),
                Segment::new(0.0, 5.0, 5.0, 5.0),
                Segment::new(0.0, 0.0, 0.0, 5.0),
                Segment::new(5.0, 0.0, 5.0, 5.0),
            ],
        );
        let triangle = Figure::new(
            "triangle",
            vec![
                Segment::new(0.0, 0.0, 0.0, 5.0),
                Segment::new(0.0, 0.0, 5.0, 0.0),
                Segment::new(0.0, 5.0, 5.0, 0.0),
            ],
        );

        let figures = [square, triangle]
            .into_iter()
            .map(|figure| (figure.name.clone(), Rc::new(figure)))
            .collect();
        Self { figures }
    }
}

impl FigureFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unknown names become a new figure with no segments.
    pub fn get_figure(&mut self, name: &str) -> Rc<Figure> {
        if let Some(figure) = self.figures.get(name) {
            log::debug!("reused {name} figure");
            return Rc::clone(figure);
        }
        log::debug!("created new {name} figure");
        let figure = Rc::new(Figure::new(name, Vec::new()));
        self.figures.insert(name.to_string(), Rc::clone(&figure));
        figure
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

impl fmt::Display for FigureFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.figures.keys().join("\n"))
    }
}

pub fn run() {
    console::demo("Flyweight");

    let mut factory = FigureFactory::new();
    let mut position = 0.0;
    for name in ["square", "triangle", "portrait", "rainbow"] {
        for color in ["blue", "red"] {
            position += 1.0;
            let figure = factory.get_figure(name);
            println!("{}", figure.draw(color, position, position));
        }
    }
    println!("Known figures:");
    println!("{factory}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prebuilt_figures_are_shared() {
        let mut factory = FigureFactory::new();
        let a = factory.get_figure("square");
        let b = factory.get_figure("square");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.segments().len(), 4);
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_custom_figure_created_once() {
        let mut factory = FigureFactory::new();
        let first = factory.get_figure("portrait");
        let second = factory.get_figure("portrait");
        assert!(Rc::ptr_eq(&first, &second));
        assert!(first.segments().is_empty());
        assert_eq!(factory.len(), 3);
    }

    #[test]
    fn test_draw_uses_extrinsic_state() {
        let mut factory = FigureFactory::new();
        let square = factory.get_figure("square");
        assert_eq!(
            square.draw("blue", 1.0, 1.0),
            "Drawing blue square at position x:1 y:1."
        );
    }

    #[test]
    fn test_listing_is_sorted() {
        let mut factory = FigureFactory::new();
        factory.get_figure("rainbow");
        factory.get_figure("portrait");
        assert_eq!(factory.to_string(), "portrait\nrainbow\nsquare\ntriangle");
    }
}
