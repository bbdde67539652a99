// ==========================================
// Sistema de Pedidos Vivero - Motores de cálculo
// ==========================================
// Etapas del pipeline semanal: clasificación ABC+D, forecast
// (FASE 1), corrección (FASE 2), métricas y orquestación.
// ==========================================

pub mod clasificador;
pub mod correccion;
pub mod error;
pub mod forecast;
pub mod metricas;
pub mod orquestador;
pub mod rotacion;

pub use clasificador::{ClasificadorAbc, DatosSeccion, PoliticaAccion, PoliticaAccionEstandar};
pub use correccion::{DatosReales, MotorCorreccion};
pub use error::ErrorPipeline;
pub use forecast::MotorForecast;
pub use metricas::{AgregadorMetricas, MetricasEjecucion};
pub use orquestador::{DatosEjecucion, Orquestador, ResultadoEjecucion};
pub use rotacion::{CubetaRotacion, TablaRotaciones};
