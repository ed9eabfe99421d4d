//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del motor de cálculo.

pub mod environment;

pub use environment::*;
