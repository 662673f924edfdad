//! Concept Visualizer - Interactive HTML visualizations of concepts
//!
//! A concept goes to a plan backend, the returned plan is embedded in a prompt
//! for a generative text model, and the model's free-form output is reduced to
//! a complete, sandboxable HTML document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
