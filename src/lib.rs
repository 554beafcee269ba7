//! Client for the EDUSLIDE presentation generator
//!
//! Collects a topic, template and slide count, submits them to the generation
//! backend and downloads the resulting PowerPoint file.

pub mod backend;
pub mod config;
pub mod controller;
pub mod download;
pub mod error;
pub mod models;
pub mod render;

pub use error::{Error, Result};
