//! Modelos del sistema
//!
//! Este módulo contiene el registro de abastecimiento y los modelos
//! de métricas derivadas.

pub mod analytics;
pub mod refuel;

pub use analytics::*;
pub use refuel::*;
