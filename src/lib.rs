//! Interactive periodic table: a one-time load of the element table, a
//! search / category / phase filter that highlights matches in place, and
//! an egui front end that paints the 18×10 grid.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
