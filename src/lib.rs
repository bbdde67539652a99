// ==========================================
// Sistema de Pedidos Vivero - Librería principal
// ==========================================
// Pipeline semanal de pedidos de compra: clasificación ABC+D
// por beneficio, forecast de stock (FASE 1) y corrección contra
// la realidad operativa (FASE 2). Sistema de apoyo a la decisión:
// el encargado de sección conserva la última palabra.
// ==========================================

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - entidades y tipos
pub mod domain;

// Capa de motores - reglas de negocio
pub mod engine;

// Capa de importación - datos externos del ERP
pub mod importer;

// Capa de configuración
pub mod config;

// Capa de salida - informes
pub mod salida;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexportación de tipos principales
// ==========================================

// Tipos de dominio
pub use domain::types::{CategoriaAbc, NivelRiesgo, PeriodoAnalisis, Seccion};

// Entidades de dominio
pub use domain::{
    AlertasPedido, Articulo, Clasificacion, Escenario, PedidoCorregido, PedidoTeorico,
    RegistroCompra, RegistroCoste, RegistroVenta, SnapshotStock,
};

// Motores
pub use engine::{
    AgregadorMetricas, ClasificadorAbc, DatosEjecucion, DatosReales, ErrorPipeline,
    MetricasEjecucion, MotorCorreccion, MotorForecast, Orquestador, ResultadoEjecucion,
    TablaRotaciones,
};

// Configuración
pub use config::{Configuracion, ErrorConfiguracion};

// Salida
pub use salida::{ErrorSalida, InformeCsv, PuertoInforme};

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const NOMBRE_APP: &str = "Sistema de Pedidos Vivero";
