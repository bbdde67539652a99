// ==========================================
// Sistema de Pedidos Vivero - Capa de configuración
// ==========================================

pub mod parametros;

pub use parametros::{Configuracion, CoberturaCategoria, ErrorConfiguracion, PesosCategoria};
