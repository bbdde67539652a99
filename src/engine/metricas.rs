// ==========================================
// Sistema de Pedidos Vivero - Métricas de ejecución
// ==========================================
// Reducción pura sobre un lote de pedidos corregidos: recuentos,
// totales de unidades y precisión del forecast. Sin efectos
// secundarios; determinista para el mismo lote.
// ==========================================

use crate::domain::pedido::PedidoCorregido;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Métricas agregadas de una ejecución
// ==========================================
// Valor efímero: se produce al final de la ejecución para el
// informe y no se persiste como fuente de verdad.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricasEjecucion {
    /// Artículos procesados en el lote
    pub total_articulos: usize,
    /// Artículos cuyo pedido final difiere del generado
    pub articulos_corregidos: usize,
    /// Unidades totales del pedido generado (FASE 1)
    pub unidades_original: f64,
    /// Unidades totales del pedido final (FASE 2)
    pub unidades_corregido: f64,
    /// unidades_corregido - unidades_original
    pub diferencia_unidades: f64,
    /// Suma de ventas reales del lote
    pub ventas_reales_total: f64,
    /// Suma de ventas objetivo del lote
    pub ventas_objetivo_total: f64,
    /// Artículos con al menos una alerta activa
    pub articulos_con_alertas: usize,
    /// Artículos con la alerta de stock bajo (umbral configurado)
    pub articulos_stock_bajo: usize,
    /// Artículos con confianza degradada (datos sustituidos)
    pub articulos_degradados: usize,
    /// Recuento por código de escenario ("SUP_IGU_DEF", ...)
    pub distribucion_escenarios: HashMap<String, usize>,
}

impl MetricasEjecucion {
    /// Porcentaje de artículos corregidos sobre el total (0 si el lote está vacío)
    pub fn porcentaje_corregidos(&self) -> f64 {
        if self.total_articulos == 0 {
            return 0.0;
        }
        self.articulos_corregidos as f64 / self.total_articulos as f64 * 100.0
    }

    /// Precisión del forecast: ventas reales entre ventas objetivo.
    ///
    /// # Retorno
    /// `None` cuando el objetivo acumulado es 0: la precisión queda
    /// indefinida, nunca se notifica como 0 ni como error.
    pub fn precision_forecast(&self) -> Option<f64> {
        if self.ventas_objetivo_total == 0.0 {
            None
        } else {
            Some(self.ventas_reales_total / self.ventas_objetivo_total)
        }
    }
}

// ==========================================
// AgregadorMetricas
// ==========================================
pub struct AgregadorMetricas;

impl AgregadorMetricas {
    /// Agrega un lote completo de pedidos corregidos.
    pub fn agregar(pedidos: &[PedidoCorregido]) -> MetricasEjecucion {
        let mut metricas = MetricasEjecucion::default();
        for pedido in pedidos {
            metricas.acumular(pedido);
        }
        metricas
    }
}

impl MetricasEjecucion {
    fn acumular(&mut self, pedido: &PedidoCorregido) {
        self.total_articulos += 1;
        if pedido.fue_corregido() {
            self.articulos_corregidos += 1;
        }
        self.unidades_original += pedido.pedido_generado;
        self.unidades_corregido += pedido.pedido_final;
        self.diferencia_unidades = self.unidades_corregido - self.unidades_original;
        self.ventas_reales_total += pedido.unidades_vendidas;
        self.ventas_objetivo_total += pedido.ventas_objetivo;
        if pedido.alertas.alguna() {
            self.articulos_con_alertas += 1;
        }
        if pedido.alertas.stock_bajo {
            self.articulos_stock_bajo += 1;
        }
        if pedido.confianza_degradada {
            self.articulos_degradados += 1;
        }
        if let Some(escenario) = &pedido.escenario {
            *self
                .distribucion_escenarios
                .entry(escenario.codigo())
                .or_insert(0) += 1;
        }
    }

    /// Combina las métricas de dos lotes (p. ej. de secciones distintas).
    pub fn combinar(mut self, otra: MetricasEjecucion) -> MetricasEjecucion {
        self.total_articulos += otra.total_articulos;
        self.articulos_corregidos += otra.articulos_corregidos;
        self.unidades_original += otra.unidades_original;
        self.unidades_corregido += otra.unidades_corregido;
        self.diferencia_unidades = self.unidades_corregido - self.unidades_original;
        self.ventas_reales_total += otra.ventas_reales_total;
        self.ventas_objetivo_total += otra.ventas_objetivo_total;
        self.articulos_con_alertas += otra.articulos_con_alertas;
        self.articulos_stock_bajo += otra.articulos_stock_bajo;
        self.articulos_degradados += otra.articulos_degradados;
        for (codigo, cuenta) in otra.distribucion_escenarios {
            *self.distribucion_escenarios.entry(codigo).or_insert(0) += cuenta;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::articulo::Articulo;
    use crate::domain::escenario::Escenario;
    use crate::domain::pedido::{AlertasPedido, PedidoTeorico};
    use crate::domain::types::CategoriaAbc;

    fn corregido(generado: f64, final_: f64, vendidas: f64, objetivo: f64) -> PedidoCorregido {
        let teorico = PedidoTeorico {
            articulo: Articulo::nuevo("8012345678", "ROSAL TREPADOR", "", ""),
            semana: 27,
            categoria: CategoriaAbc::A,
            ventas_dia: 2.0,
            stock_minimo_objetivo: 60.0,
            stock_maximo_objetivo: 180.0,
            pedido_generado: generado,
            confianza_baja: false,
        };
        let mut pedido = PedidoCorregido::sin_correccion(&teorico);
        pedido.pedido_final = final_;
        pedido.unidades_vendidas = vendidas;
        pedido.ventas_objetivo = objetivo;
        pedido.escenario = Some(Escenario::detectar(
            vendidas, objetivo, 0.0, generado, 50.0, 60.0,
        ));
        pedido
    }

    #[test]
    fn test_lote_vacio() {
        let metricas = AgregadorMetricas::agregar(&[]);
        assert_eq!(metricas.total_articulos, 0);
        assert_eq!(metricas.porcentaje_corregidos(), 0.0);
        assert_eq!(metricas.precision_forecast(), None);
    }

    #[test]
    fn test_recuentos_y_totales() {
        let lote = vec![
            corregido(10.0, 10.0, 20.0, 20.0),
            corregido(10.0, 25.0, 30.0, 20.0),
            corregido(0.0, 5.0, 0.0, 10.0),
        ];
        let metricas = AgregadorMetricas::agregar(&lote);

        assert_eq!(metricas.total_articulos, 3);
        assert_eq!(metricas.articulos_corregidos, 2);
        assert_eq!(metricas.unidades_original, 20.0);
        assert_eq!(metricas.unidades_corregido, 40.0);
        assert_eq!(metricas.diferencia_unidades, 20.0);
        assert!((metricas.porcentaje_corregidos() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_precision_forecast() {
        let lote = vec![
            corregido(10.0, 10.0, 30.0, 20.0),
            corregido(10.0, 10.0, 10.0, 20.0),
        ];
        let metricas = AgregadorMetricas::agregar(&lote);
        // 40 reales / 40 objetivo
        assert_eq!(metricas.precision_forecast(), Some(1.0));
    }

    #[test]
    fn test_precision_indefinida_sin_objetivo() {
        let lote = vec![corregido(10.0, 10.0, 5.0, 0.0)];
        let metricas = AgregadorMetricas::agregar(&lote);
        assert_eq!(metricas.precision_forecast(), None);
    }

    #[test]
    fn test_recuento_alertas() {
        let mut con_alerta = corregido(10.0, 10.0, 0.0, 20.0);
        con_alerta.alertas = AlertasPedido {
            sin_ventas: true,
            ..AlertasPedido::default()
        };
        let mut con_stock_bajo = corregido(10.0, 10.0, 20.0, 20.0);
        con_stock_bajo.alertas = AlertasPedido {
            stock_bajo: true,
            ..AlertasPedido::default()
        };
        let lote = vec![con_alerta, con_stock_bajo, corregido(10.0, 10.0, 20.0, 20.0)];
        let metricas = AgregadorMetricas::agregar(&lote);
        assert_eq!(metricas.articulos_con_alertas, 2);
        assert_eq!(metricas.articulos_stock_bajo, 1);
    }

    #[test]
    fn test_distribucion_escenarios() {
        let lote = vec![
            corregido(10.0, 10.0, 30.0, 20.0),
            corregido(10.0, 10.0, 30.0, 20.0),
            corregido(10.0, 10.0, 10.0, 20.0),
        ];
        let metricas = AgregadorMetricas::agregar(&lote);
        let total: usize = metricas.distribucion_escenarios.values().sum();
        assert_eq!(total, 3);
        assert_eq!(metricas.distribucion_escenarios.len(), 2);
    }

    #[test]
    fn test_combinar_equivale_a_lote_unico() {
        let lote_a = vec![corregido(10.0, 25.0, 30.0, 20.0)];
        let lote_b = vec![corregido(10.0, 10.0, 10.0, 20.0)];
        let mut todo = lote_a.clone();
        todo.extend(lote_b.clone());

        let combinadas =
            AgregadorMetricas::agregar(&lote_a).combinar(AgregadorMetricas::agregar(&lote_b));
        let directas = AgregadorMetricas::agregar(&todo);
        assert_eq!(combinadas, directas);
    }
}
