//! Cellular automata and grid agent models on a torus.
//!
//! Conway's Game of Life and other Life-like rules, elementary (Wolfram)
//! cellular automata, Schelling's segregation model, and a 1-D cultural
//! space model, sharing one neighborhood engine.

mod cells;
mod config;
mod error;
pub mod models;
mod poly;
mod rng;
pub mod rules;
mod simulation;
mod step;
mod topology;
mod world;

pub use cells::{Coord, State, ALIVE, DEAD, VOID};
pub use config::{
    Config, CueConfig, CueInit, GridInit, LifeConfig, ModelConfig, PopulationInit, RowInit,
    SchellingConfig, WolframConfig,
};
pub use error::Error;
pub use poly::{PolyOutput, PolySimulation};
pub use rng::Seeds;
pub use simulation::{History, Observer, Output, Simulation};
pub use step::{relocate, scan, UpdateScheme};
pub use topology::{Offset, Torus, Window, MOORE};
pub use world::Grid;
