// ==========================================
// Sistema de Pedidos Vivero - Registro de clasificación
// ==========================================
// Salida del clasificador ABC+D. Una por (artículo, período);
// al reprocesar el mismo período se sustituye, nunca se fusiona.
// ==========================================

use crate::domain::articulo::Articulo;
use crate::domain::types::{CategoriaAbc, NivelRiesgo, Seccion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clasificacion {
    pub articulo: Articulo,
    pub seccion: Seccion,
    /// Índice del período analizado (1-4)
    pub periodo: u8,
    /// Beneficio del período: importe de ventas - coste de las unidades vendidas (€)
    pub beneficio: f64,
    /// Unidades vendidas en el período
    pub unidades_vendidas: f64,
    /// Porcentaje individual sobre el beneficio total de la sección (0-100)
    pub pct_individual: f64,
    /// Porcentaje acumulado en orden de ranking (0-100)
    pub pct_acumulado: f64,
    pub categoria: CategoriaAbc,
    /// Riesgo de merma / inmovilizado (señal auxiliar)
    pub riesgo: NivelRiesgo,
    /// Acción sugerida para el comprador
    pub accion_sugerida: String,
    /// true si el coste unitario no estaba disponible y se usó 0
    #[serde(default)]
    pub coste_ausente: bool,
}
