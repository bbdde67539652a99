// ==========================================
// Sistema de Pedidos Vivero - Errores del pipeline
// ==========================================
// Taxonomía:
// - Los fallos de validación por registro se absorben y cuentan
//   en la importación (no llegan aquí).
// - SeccionVacia aborta solo ese ámbito; el resto de secciones
//   sigue produciendo salida.
// - Los errores de configuración abortan la ejecución completa
//   antes de calcular nada (ErrorConfiguracion, capa config).
// ==========================================

use crate::domain::types::Seccion;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrorPipeline {
    // ===== Errores de ámbito (sección/período/semana) =====
    #[error("Sección sin artículos válidos tras el filtrado: {0}")]
    SeccionVacia(Seccion),
}
