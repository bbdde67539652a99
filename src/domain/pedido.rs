// ==========================================
// Sistema de Pedidos Vivero - Pedidos teórico y corregido
// ==========================================
// PedidoTeorico: salida de la FASE 1 (forecast).
// PedidoCorregido: salida de la FASE 2 (corrección). Valor
// derivado, siempre recomputable a partir de sus entradas;
// nunca es fuente de verdad persistida.
// ==========================================

use crate::domain::articulo::Articulo;
use crate::domain::escenario::Escenario;
use crate::domain::types::CategoriaAbc;
use serde::{Deserialize, Serialize};

// ==========================================
// Pedido teórico (FASE 1)
// ==========================================
// Uno por (artículo, semana); se recalcula de forma idempotente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoTeorico {
    pub articulo: Articulo,
    /// Semana ISO del pedido
    pub semana: u32,
    pub categoria: CategoriaAbc,
    /// Ventas medias diarias de la ventana reciente
    pub ventas_dia: f64,
    pub stock_minimo_objetivo: f64,
    pub stock_maximo_objetivo: f64,
    /// Unidades sugeridas por el forecast
    pub pedido_generado: f64,
    /// true cuando no había histórico de ventas y el pedido salió a 0
    #[serde(default)]
    pub confianza_baja: bool,
}

// ==========================================
// Alertas por artículo
// ==========================================
// Flags independientes: un artículo puede llevar varias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertasPedido {
    /// stock_fisico <= 0
    pub stock_critico: bool,
    /// |pedido_final - pedido_generado| / max(1, pedido_generado) > 0.5
    pub cambios_significativos: bool,
    /// stock_fisico > 0 y sin ventas en la semana
    pub sin_ventas: bool,
    /// stock_fisico <= umbral_alerta_stock (si el umbral está configurado)
    pub stock_bajo: bool,
}

impl AlertasPedido {
    /// ¿Hay alguna alerta activa?
    pub fn alguna(&self) -> bool {
        self.stock_critico || self.cambios_significativos || self.sin_ventas || self.stock_bajo
    }
}

// ==========================================
// Pedido corregido (FASE 2)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoCorregido {
    // Campos del pedido teórico
    pub articulo: Articulo,
    pub semana: u32,
    pub categoria: CategoriaAbc,
    pub stock_minimo_objetivo: f64,
    pub stock_maximo_objetivo: f64,
    pub pedido_generado: f64,

    // Realidad operativa de la semana
    pub stock_fisico: f64,
    pub unidades_vendidas: f64,
    pub unidades_recibidas: f64,
    /// Ventas objetivo de la semana
    pub ventas_objetivo: f64,

    // Resultado de la corrección
    /// Stock mínimo por cobertura de categoría (semanas x objetivo semanal)
    pub stock_minimo: f64,
    /// stock_minimo - stock_real
    pub diferencia_stock: f64,
    pub pedido_corregido: f64,
    /// Pedido tras el ajuste de tendencia y el suelo en 0
    pub pedido_final: f64,

    pub escenario: Option<Escenario>,
    /// Explicación legible de la corrección aplicada
    pub razon_correccion: String,
    pub alertas: AlertasPedido,
    /// true si se sustituyó algún dato ausente (p. ej. stock físico)
    #[serde(default)]
    pub confianza_degradada: bool,
}

impl PedidoCorregido {
    /// Pasarela FASE 1 -> FASE 2 cuando la corrección está deshabilitada:
    /// el pedido teórico se copia tal cual, sin escenario ni alertas.
    pub fn sin_correccion(teorico: &PedidoTeorico) -> Self {
        Self {
            articulo: teorico.articulo.clone(),
            semana: teorico.semana,
            categoria: teorico.categoria,
            stock_minimo_objetivo: teorico.stock_minimo_objetivo,
            stock_maximo_objetivo: teorico.stock_maximo_objetivo,
            pedido_generado: teorico.pedido_generado,
            stock_fisico: 0.0,
            unidades_vendidas: 0.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 0.0,
            stock_minimo: 0.0,
            diferencia_stock: 0.0,
            pedido_corregido: teorico.pedido_generado,
            pedido_final: teorico.pedido_generado,
            escenario: None,
            razon_correccion: "Corrección deshabilitada".to_string(),
            alertas: AlertasPedido::default(),
            confianza_degradada: teorico.confianza_baja,
        }
    }

    /// ¿Difiere el pedido final del generado por el forecast?
    pub fn fue_corregido(&self) -> bool {
        (self.pedido_final - self.pedido_generado).abs() > f64::EPSILON
    }
}
