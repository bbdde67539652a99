// ==========================================
// Sistema de Pedidos Vivero - Motor de corrección (FASE 2)
// ==========================================
// Reconcilia el pedido teórico de la FASE 1 contra la realidad
// operativa del almacén (stock físico, ventas y compras de la
// semana). Fórmula principal:
//
//   Diferencia_Stock = Stock_Minimo - Stock_Real
//   Pedido_Corregido = max(0, Pedido_Generado + Diferencia_Stock)
//
// Ajuste de tendencia (solo con ventas por encima del objetivo):
//
//   Porcentaje_Consumido = (Reales - Objetivo) / Objetivo
//   Incremento           = Objetivo x Porcentaje_Consumido
//   Pedido_Final         = Pedido_Corregido + Incremento
//
// Motor sin estado; no muta el pedido teórico.
// ==========================================

use crate::config::parametros::Configuracion;
use crate::domain::escenario::Escenario;
use crate::domain::pedido::{AlertasPedido, PedidoCorregido, PedidoTeorico};
use tracing::warn;

// ==========================================
// Realidad operativa de la semana
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DatosReales {
    /// Stock físico autoritativo; None = dato ausente en la carga
    pub stock_fisico: Option<f64>,
    /// Unidades vendidas en la semana
    pub unidades_vendidas: f64,
    /// Unidades recibidas en la semana
    pub unidades_recibidas: f64,
    /// Ventas objetivo de la semana
    pub ventas_objetivo: f64,
}

// ==========================================
// MotorCorreccion
// ==========================================
#[derive(Debug)]
pub struct MotorCorreccion {
    config: Configuracion,
}

impl MotorCorreccion {
    pub fn new(config: Configuracion) -> Self {
        Self { config }
    }

    /// Corrige un pedido teórico contra los datos reales de la semana.
    ///
    /// Función pura de sus entradas. Un stock físico ausente no es
    /// fatal: se asume stock óptimo (Stock_Real = Stock_Minimo, es
    /// decir diferencia 0) y el resultado queda marcado con confianza
    /// degradada. Asumir stock 0 provocaría pedidos desorbitados.
    pub fn corregir(&self, teorico: &PedidoTeorico, reales: &DatosReales) -> PedidoCorregido {
        // Stock mínimo por cobertura de categoría:
        // semanas de cobertura x objetivo semanal de ventas.
        // Categoría sin cobertura declarada: ratio de reserva sobre
        // el stock máximo objetivo.
        let stock_minimo = match self.config.cobertura().semanas(teorico.categoria) {
            Some(semanas) => semanas * reales.ventas_objetivo,
            None => self.config.stock_minimo_porcentaje * teorico.stock_maximo_objetivo,
        };

        // Stock real: físico si está disponible, si no el mínimo
        // (diferencia 0) con confianza degradada
        let (stock_real, confianza_degradada) = match reales.stock_fisico {
            Some(stock) => (stock, false),
            None => {
                warn!(
                    codigo = %teorico.articulo.codigo,
                    "Stock físico ausente: se asume stock óptimo (diferencia 0), resultado degradado"
                );
                (stock_minimo, true)
            }
        };

        let diferencia_stock = stock_minimo - stock_real;

        let bruto = teorico.pedido_generado + diferencia_stock;
        let pedido_corregido = if self.config.permitir_pedidos_negativos {
            bruto
        } else {
            bruto.max(0.0)
        };

        // Ajuste de tendencia: solo con objetivo > 0 y ventas reales
        // por encima del objetivo
        let incremento_tendencia = if reales.ventas_objetivo > 0.0
            && reales.unidades_vendidas > reales.ventas_objetivo
        {
            let porcentaje_consumido =
                (reales.unidades_vendidas - reales.ventas_objetivo) / reales.ventas_objetivo;
            reales.ventas_objetivo * porcentaje_consumido
        } else {
            0.0
        };

        let bruto_final = pedido_corregido + incremento_tendencia;
        let pedido_final = if self.config.permitir_pedidos_negativos {
            bruto_final
        } else {
            bruto_final.max(0.0)
        };

        // Escenario: compras sugeridas = pedido generado de la FASE 1
        let escenario = Escenario::detectar(
            reales.unidades_vendidas,
            reales.ventas_objetivo,
            reales.unidades_recibidas,
            teorico.pedido_generado,
            stock_real,
            stock_minimo,
        );

        let alertas =
            self.evaluar_alertas(teorico, reales, stock_real, confianza_degradada, pedido_final);

        let razon = Self::razon_correccion(
            stock_minimo,
            stock_real,
            pedido_corregido,
            teorico.pedido_generado,
        );

        PedidoCorregido {
            articulo: teorico.articulo.clone(),
            semana: teorico.semana,
            categoria: teorico.categoria,
            stock_minimo_objetivo: teorico.stock_minimo_objetivo,
            stock_maximo_objetivo: teorico.stock_maximo_objetivo,
            pedido_generado: teorico.pedido_generado,
            stock_fisico: stock_real,
            unidades_vendidas: reales.unidades_vendidas,
            unidades_recibidas: reales.unidades_recibidas,
            ventas_objetivo: reales.ventas_objetivo,
            stock_minimo,
            diferencia_stock,
            pedido_corregido,
            pedido_final,
            escenario: Some(escenario),
            razon_correccion: razon,
            alertas,
            confianza_degradada: confianza_degradada || teorico.confianza_baja,
        }
    }

    /// Alertas independientes: un artículo puede llevar varias.
    ///
    /// Las alertas de nivel de stock (crítico y bajo) solo se evalúan
    /// sobre stock físico observado: con el stock sustituido por el
    /// mínimo no hay dato real que alertar, el pedido ya va marcado
    /// con confianza degradada.
    fn evaluar_alertas(
        &self,
        teorico: &PedidoTeorico,
        reales: &DatosReales,
        stock_real: f64,
        stock_sustituido: bool,
        pedido_final: f64,
    ) -> AlertasPedido {
        let cambio_relativo =
            (pedido_final - teorico.pedido_generado).abs() / teorico.pedido_generado.max(1.0);

        AlertasPedido {
            stock_critico: !stock_sustituido && stock_real <= 0.0,
            cambios_significativos: cambio_relativo > 0.5,
            sin_ventas: !stock_sustituido && stock_real > 0.0 && reales.unidades_vendidas == 0.0,
            stock_bajo: !stock_sustituido
                && self.config.umbral_alerta_stock > 0
                && stock_real <= self.config.umbral_alerta_stock as f64,
        }
    }

    /// Explicación legible de la corrección aplicada
    fn razon_correccion(
        stock_minimo: f64,
        stock_real: f64,
        pedido_corregido: f64,
        pedido_original: f64,
    ) -> String {
        if (pedido_corregido - pedido_original).abs() < f64::EPSILON {
            return "Sin corrección necesaria".to_string();
        }

        if stock_real > stock_minimo {
            let exceso = stock_real - stock_minimo;
            format!("Reducir {:.0} unidades (stock excedente)", exceso)
        } else if stock_real < stock_minimo {
            let deficit = stock_minimo - stock_real;
            format!("Aumentar {:.0} unidades (recuperar stock mínimo)", deficit)
        } else {
            "Mantener pedido (stock óptimo)".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::articulo::Articulo;
    use crate::domain::escenario::{EjeCompras, EjeStock, EjeVentas};
    use crate::domain::types::CategoriaAbc;

    fn teorico(pedido_generado: f64, categoria: CategoriaAbc) -> PedidoTeorico {
        PedidoTeorico {
            articulo: Articulo::nuevo("8012345678", "ROSAL TREPADOR", "", ""),
            semana: 27,
            categoria,
            ventas_dia: 2.0,
            stock_minimo_objetivo: 60.0,
            stock_maximo_objetivo: 180.0,
            pedido_generado,
            confianza_baja: false,
        }
    }

    fn motor() -> MotorCorreccion {
        MotorCorreccion::new(Configuracion::default())
    }

    /// Datos reales con cobertura B (1.0 semana) y objetivo 20:
    /// Stock_Minimo = 20.
    fn reales_con_stock(stock: f64) -> DatosReales {
        DatosReales {
            stock_fisico: Some(stock),
            unidades_vendidas: 20.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 20.0,
        }
    }

    #[test]
    fn test_casos_limite_formula() {
        // Pedido=10, Stock_Minimo=20 (B, objetivo 20):
        //   Stock_Real=30 -> corregido 0
        //   Stock_Real=20 -> corregido 10
        //   Stock_Real=10 -> corregido 20
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);

        let caso = motor.corregir(&teorico, &reales_con_stock(30.0));
        assert_eq!(caso.pedido_corregido, 0.0);

        let caso = motor.corregir(&teorico, &reales_con_stock(20.0));
        assert_eq!(caso.pedido_corregido, 10.0);

        let caso = motor.corregir(&teorico, &reales_con_stock(10.0));
        assert_eq!(caso.pedido_corregido, 20.0);
    }

    #[test]
    fn test_incremento_tendencia() {
        // Objetivo 100, reales 150: consumido 0.5, incremento 50
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);
        let reales = DatosReales {
            stock_fisico: Some(100.0),
            unidades_vendidas: 150.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 100.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        // Stock_Minimo = 1.0 x 100 = 100; diferencia 0; corregido 10
        assert_eq!(resultado.pedido_corregido, 10.0);
        assert_eq!(resultado.pedido_final, 60.0);
    }

    #[test]
    fn test_sin_tendencia_con_objetivo_cero() {
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::D);
        let reales = DatosReales {
            stock_fisico: Some(0.0),
            unidades_vendidas: 5.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 0.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        // Cobertura D = 0 semanas -> Stock_Minimo 0; sin tendencia
        assert_eq!(resultado.pedido_final, resultado.pedido_corregido);
        assert_eq!(resultado.pedido_final, 10.0);
    }

    #[test]
    fn test_suelo_en_cero() {
        // Con exceso de stock el resultado bruto sería negativo;
        // con la configuración por defecto queda en 0
        let motor = motor();
        let teorico = teorico(5.0, CategoriaAbc::B);
        let resultado = motor.corregir(&teorico, &reales_con_stock(500.0));

        assert_eq!(resultado.pedido_corregido, 0.0);
        assert!(resultado.pedido_final >= 0.0);
    }

    #[test]
    fn test_pedidos_negativos_permitidos() {
        let config = Configuracion {
            permitir_pedidos_negativos: true,
            ..Configuracion::default()
        };
        let motor = MotorCorreccion::new(config);
        let teorico = teorico(5.0, CategoriaAbc::B);

        let resultado = motor.corregir(&teorico, &reales_con_stock(500.0));
        // 5 + (20 - 500) = -475
        assert_eq!(resultado.pedido_corregido, -475.0);
        assert_eq!(resultado.pedido_final, -475.0);
    }

    #[test]
    fn test_cobertura_ausente_usa_ratio_reserva() {
        let config = Configuracion {
            stock_minimo_por_categoria: Some(crate::config::CoberturaCategoria {
                a: Some(1.5),
                b: None,
                c: Some(0.5),
                d: Some(0.0),
            }),
            ..Configuracion::default()
        };
        let motor = MotorCorreccion::new(config);
        let teorico = teorico(10.0, CategoriaAbc::B);

        let resultado = motor.corregir(&teorico, &reales_con_stock(0.0));
        // 0.30 x 180 (stock máximo objetivo) = 54
        assert_eq!(resultado.stock_minimo, 54.0);
        assert_eq!(resultado.pedido_corregido, 64.0);
    }

    #[test]
    fn test_stock_ausente_asume_optimo() {
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);
        let reales = DatosReales {
            stock_fisico: None,
            unidades_vendidas: 20.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 20.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        // Stock_Real = Stock_Minimo -> diferencia 0, pedido intacto
        assert_eq!(resultado.diferencia_stock, 0.0);
        assert_eq!(resultado.pedido_corregido, 10.0);
        assert!(resultado.confianza_degradada);
    }

    #[test]
    fn test_stock_sustituido_no_genera_alertas_de_stock() {
        // Categoría D (cobertura 0 semanas): el stock sustituido vale 0,
        // pero no hay dato observado que justifique STOCK_CRITICO
        let config = Configuracion {
            umbral_alerta_stock: 5,
            ..Configuracion::default()
        };
        let motor = MotorCorreccion::new(config);
        let teorico = teorico(10.0, CategoriaAbc::D);
        let reales = DatosReales {
            stock_fisico: None,
            unidades_vendidas: 0.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 0.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        assert!(resultado.confianza_degradada);
        assert!(!resultado.alertas.stock_critico);
        assert!(!resultado.alertas.stock_bajo);
        assert!(!resultado.alertas.sin_ventas);

        // Con stock físico observado en 0 la alerta sí se dispara
        let observado = motor.corregir(&teorico, &reales_con_stock(0.0));
        assert!(observado.alertas.stock_critico);
    }

    #[test]
    fn test_alerta_stock_critico() {
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);

        let resultado = motor.corregir(&teorico, &reales_con_stock(0.0));
        assert!(resultado.alertas.stock_critico);

        let resultado = motor.corregir(&teorico, &reales_con_stock(-2.0));
        assert!(resultado.alertas.stock_critico);

        let resultado = motor.corregir(&teorico, &reales_con_stock(1.0));
        assert!(!resultado.alertas.stock_critico);
    }

    #[test]
    fn test_alertas_independientes() {
        // Stock crítico + cambio significativo a la vez
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);
        let reales = DatosReales {
            stock_fisico: Some(0.0),
            unidades_vendidas: 20.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 20.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        // corregido = 10 + 20 = 30; cambio = 20/10 = 2.0 > 0.5
        assert!(resultado.alertas.stock_critico);
        assert!(resultado.alertas.cambios_significativos);
        assert!(!resultado.alertas.sin_ventas);
    }

    #[test]
    fn test_alerta_sin_ventas() {
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);
        let reales = DatosReales {
            stock_fisico: Some(15.0),
            unidades_vendidas: 0.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 20.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        assert!(resultado.alertas.sin_ventas);
    }

    #[test]
    fn test_alerta_stock_bajo_por_umbral() {
        let config = Configuracion {
            umbral_alerta_stock: 5,
            ..Configuracion::default()
        };
        let motor = MotorCorreccion::new(config);
        let teorico = teorico(10.0, CategoriaAbc::B);

        let resultado = motor.corregir(&teorico, &reales_con_stock(4.0));
        assert!(resultado.alertas.stock_bajo);

        let resultado = motor.corregir(&teorico, &reales_con_stock(6.0));
        assert!(!resultado.alertas.stock_bajo);
    }

    #[test]
    fn test_escenario_detectado() {
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);
        let reales = DatosReales {
            stock_fisico: Some(5.0),
            unidades_vendidas: 30.0,
            unidades_recibidas: 10.0,
            ventas_objetivo: 20.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        let escenario = resultado.escenario.unwrap();
        assert_eq!(escenario.ventas, EjeVentas::Superior);
        assert_eq!(escenario.compras, EjeCompras::Igual);
        assert_eq!(escenario.stock, EjeStock::Deficit);
        assert_eq!(escenario.codigo(), "SUP_IGU_DEF");
    }

    #[test]
    fn test_escenario_fin_a_fin_vivero() {
        // Caso documentado: pedido 130, Stock_Minimo(A) = 1.5 x 140 = 210,
        // Stock_Real 90 -> diferencia 120, corregido 250
        let motor = motor();
        let teorico = teorico(130.0, CategoriaAbc::A);
        let reales = DatosReales {
            stock_fisico: Some(90.0),
            unidades_vendidas: 140.0,
            unidades_recibidas: 0.0,
            ventas_objetivo: 140.0,
        };

        let resultado = motor.corregir(&teorico, &reales);
        assert_eq!(resultado.stock_minimo, 210.0);
        assert_eq!(resultado.diferencia_stock, 120.0);
        assert_eq!(resultado.pedido_corregido, 250.0);
        assert_eq!(resultado.pedido_final, 250.0);
    }

    #[test]
    fn test_razon_correccion() {
        let motor = motor();
        let teorico = teorico(10.0, CategoriaAbc::B);

        let resultado = motor.corregir(&teorico, &reales_con_stock(20.0));
        // Stock óptimo, corregido == original
        assert_eq!(resultado.razon_correccion, "Sin corrección necesaria");

        let resultado = motor.corregir(&teorico, &reales_con_stock(10.0));
        assert!(resultado.razon_correccion.contains("Aumentar 10"));

        let resultado = motor.corregir(&teorico, &reales_con_stock(28.0));
        assert!(resultado.razon_correccion.contains("Reducir 8"));
    }
}
