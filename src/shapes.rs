use std::f64::consts::PI;

// =============================================================================
// Shapes behind a trait object
// =============================================================================

pub trait Shape {
    fn name(&self) -> &'static str;
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

/// Unit rectangle.
impl Default for Rectangle {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<&Rectangle> for Rectangle {
    fn from(other: &Rectangle) -> Self {
        *other
    }
}

impl Shape for Rectangle {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub side: f64,
}

impl Square {
    pub fn new(side: f64) -> Self {
        Self { side }
    }
}

impl Shape for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn area(&self) -> f64 {
        self.side * self.side
    }

    fn perimeter(&self) -> f64 {
        4.0 * self.side
    }
}

pub fn total_area(shapes: &[Box<dyn Shape>]) -> f64 {
    shapes.iter().map(|s| s.area()).sum()
}

// =============================================================================
// Default methods and overriding
// =============================================================================

pub trait Drawable {
    fn label(&self) -> String;

    fn draw(&self) -> String {
        format!("Drawing {}", self.label())
    }
}

impl Drawable for Square {
    fn label(&self) -> String {
        "square".to_string()
    }
}

impl Drawable for Circle {
    fn label(&self) -> String {
        format!("circle r={}", self.radius)
    }

    fn draw(&self) -> String {
        format!("Drawing ( {} )", self.label())
    }
}

pub trait Animal {
    fn sound(&self) -> &'static str {
        "some sound"
    }
}

pub struct Dog;
pub struct Cat;
pub struct Generic;

impl Animal for Dog {
    fn sound(&self) -> &'static str {
        "bark"
    }
}

impl Animal for Cat {
    fn sound(&self) -> &'static str {
        "meow"
    }
}

impl Animal for Generic {}

pub trait Calculator {
    fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }

    fn add3(&self, a: i64, b: i64, c: i64) -> i64 {
        self.add(self.add(a, b), c)
    }
}

pub struct BasicCalc;

/// Adds one on top of the default `add`.
pub struct AdjustedCalc;

impl Calculator for BasicCalc {}

impl Calculator for AdjustedCalc {
    fn add(&self, a: i64, b: i64) -> i64 {
        BasicCalc.add(a, b) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_constructors() {
        let a = Rectangle::default();
        let b = Rectangle::new(2.0, 3.0);
        let c = Rectangle::from(&b);
        assert_eq!((a.area(), b.area(), c.area()), (1.0, 6.0, 6.0));
        assert_eq!(b.perimeter(), 10.0);
    }

    #[test]
    fn test_circle_area() {
        let shape: Box<dyn Shape> = Box::new(Circle::new(2.0));
        assert!((shape.area() - 12.566_370_614_359_172).abs() < 1e-12);
        assert_eq!(shape.name(), "circle");
    }

    #[test]
    fn test_total_area() {
        let shapes: Vec<Box<dyn Shape>> = vec![
            Box::new(Square::new(2.0)),
            Box::new(Rectangle::new(1.0, 3.0)),
        ];
        assert_eq!(total_area(&shapes), 7.0);
        assert_eq!(total_area(&[]), 0.0);
    }

    #[test]
    fn test_default_and_overridden_draw() {
        assert_eq!(Square::new(1.0).draw(), "Drawing square");
        assert_eq!(Circle::new(1.5).draw(), "Drawing ( circle r=1.5 )");
    }

    #[test]
    fn test_dynamic_dispatch() {
        let animals: Vec<Box<dyn Animal>> = vec![Box::new(Dog), Box::new(Cat), Box::new(Generic)];
        let sounds: Vec<&str> = animals.iter().map(|a| a.sound()).collect();
        assert_eq!(sounds, vec!["bark", "meow", "some sound"]);
    }

    #[test]
    fn test_overridden_add() {
        assert_eq!(BasicCalc.add(1, 2), 3);
        assert_eq!(AdjustedCalc.add(1, 2), 4);
        assert_eq!(BasicCalc.add3(1, 2, 3), 6);
        assert_eq!(AdjustedCalc.add3(1, 2, 3), 8);
    }
}
