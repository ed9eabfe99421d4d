//! Services module
//!
//! Este módulo contiene la lógica de negocio del tracker: ordenación,
//! búsqueda del abastecimiento anterior, métricas, validación y resumen.
//! Todos los servicios son funciones puras sobre un snapshot de la
//! colección que mantiene el llamador.

pub mod metrics_service;
pub mod neighbor_resolver;
pub mod ordering_service;
pub mod summary_service;
pub mod validation_service;

pub use metrics_service::*;
pub use neighbor_resolver::*;
pub use ordering_service::*;
pub use summary_service::*;
pub use validation_service::*;
