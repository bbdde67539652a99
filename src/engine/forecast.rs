// ==========================================
// Sistema de Pedidos Vivero - Motor de forecast (FASE 1)
// ==========================================
// Calcula por artículo los límites objetivo de stock y el
// pedido teórico de la semana:
//
//   ventas_dia   = ventas de la ventana reciente / días de ventana
//   stock_minimo = ventas_dia x multiplicador_minimo (familia)
//   stock_maximo = ventas_dia x multiplicador_maximo (familia)
//   pedido       = max(0, stock_maximo - stock conocido)
//
// El stock conocido puede estar desfasado; la FASE 2 reconcilia
// contra el stock físico autoritativo.
// ==========================================

use crate::domain::articulo::Articulo;
use crate::domain::pedido::PedidoTeorico;
use crate::domain::registros::RegistroVenta;
use crate::domain::types::CategoriaAbc;
use crate::config::parametros::Configuracion;
use crate::engine::rotacion::TablaRotaciones;
use chrono::NaiveDate;
use tracing::debug;

// ==========================================
// MotorForecast
// ==========================================
#[derive(Debug)]
pub struct MotorForecast {
    config: Configuracion,
}

impl MotorForecast {
    pub fn new(config: Configuracion) -> Self {
        Self { config }
    }

    /// Genera el pedido teórico de un artículo para una semana.
    ///
    /// # Parámetros
    /// - `articulo`: identidad del artículo
    /// - `categoria`: categoría ABC+D del último período clasificado
    /// - `semana`: semana ISO del pedido
    /// - `ventas_recientes`: histórico de ventas del artículo
    /// - `fin_ventana`: último día (inclusive) de la ventana de forecast
    /// - `stock_conocido`: última cifra de stock disponible al
    ///   generar el forecast; None = sin dato (reposición completa)
    ///
    /// Un artículo sin histórico no bloquea el lote: produce pedido 0
    /// con `confianza_baja = true`.
    pub fn generar_pedido(
        &self,
        articulo: &Articulo,
        categoria: CategoriaAbc,
        semana: u32,
        ventas_recientes: &[RegistroVenta],
        fin_ventana: NaiveDate,
        stock_conocido: Option<f64>,
    ) -> PedidoTeorico {
        let dias_ventana = self.config.ventana_forecast_dias;
        let inicio_ventana = fin_ventana - chrono::Duration::days(dias_ventana as i64 - 1);

        // Ventas medias diarias de la ventana
        let unidades_ventana: f64 = ventas_recientes
            .iter()
            .filter(|v| {
                v.codigo_articulo == articulo.codigo
                    && v.fecha >= inicio_ventana
                    && v.fecha <= fin_ventana
            })
            .map(|v| v.unidades)
            .sum();

        let tiene_historico = ventas_recientes
            .iter()
            .any(|v| v.codigo_articulo == articulo.codigo);

        let ventas_dia = unidades_ventana / dias_ventana as f64;

        // Artículo nuevo sin ningún histórico: pedido 0 con confianza
        // baja en lugar de abortar el lote.
        if !tiene_historico {
            debug!(
                codigo = %articulo.codigo,
                "Artículo sin histórico de ventas: pedido 0 con confianza baja"
            );
            return PedidoTeorico {
                articulo: articulo.clone(),
                semana,
                categoria,
                ventas_dia: 0.0,
                stock_minimo_objetivo: 0.0,
                stock_maximo_objetivo: 0.0,
                pedido_generado: 0.0,
                confianza_baja: true,
            };
        }

        // Límites de stock por la cubeta de rotación de la familia
        let cubeta = TablaRotaciones::cubeta(articulo.familia());
        let mut stock_minimo = ventas_dia * cubeta.multiplicador_minimo;
        let mut stock_maximo = ventas_dia * cubeta.multiplicador_maximo;

        // Ponderación por categoría: A/B pasan tal cual; C/D se
        // reducen según el peso configurado (menos stock de artículos
        // de bajo valor).
        if matches!(categoria, CategoriaAbc::C | CategoriaAbc::D) {
            let peso = self.config.pesos().peso(categoria);
            stock_minimo *= peso;
            stock_maximo *= peso;
        }

        // Pedido teórico contra el último stock conocido
        let stock_estimado = stock_conocido.unwrap_or(0.0);
        let pedido = (stock_maximo - stock_estimado).max(0.0);

        PedidoTeorico {
            articulo: articulo.clone(),
            semana,
            categoria,
            ventas_dia,
            stock_minimo_objetivo: stock_minimo,
            stock_maximo_objetivo: stock_maximo,
            pedido_generado: pedido,
            confianza_baja: false,
        }
    }

    /// Objetivo semanal de ventas de un artículo, derivado de sus
    /// ventas diarias y escalado por el crecimiento configurado.
    pub fn objetivo_semanal(&self, ventas_dia: f64) -> f64 {
        ventas_dia * 7.0 * (1.0 + self.config.objetivo_crecimiento)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articulo_vivero() -> Articulo {
        Articulo::nuevo("8012345678", "ROSAL TREPADOR", "", "")
    }

    fn config_sin_crecimiento() -> Configuracion {
        Configuracion {
            objetivo_crecimiento: 0.0,
            ..Configuracion::default()
        }
    }

    /// Ventas que producen exactamente `ventas_dia` unidades/día en
    /// la ventana que termina en `fin`.
    fn ventas_constantes(
        codigo: &str,
        fin: NaiveDate,
        dias: u32,
        ventas_dia: f64,
    ) -> Vec<RegistroVenta> {
        (0..dias)
            .map(|d| RegistroVenta {
                codigo_articulo: codigo.to_string(),
                fecha: fin - chrono::Duration::days(d as i64),
                unidades: ventas_dia,
                importe: ventas_dia * 10.0,
            })
            .collect()
    }

    #[test]
    fn test_limites_vivero_rotacion_60() {
        // Familia 80 (vivero general): rotación 60 -> multiplicadores 30/90.
        // Con ventas_dia = 2: mínimo 60, máximo 180.
        let config = config_sin_crecimiento();
        let motor = MotorForecast::new(config);
        let fin = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let ventas = ventas_constantes("8012345678", fin, 28, 2.0);

        let pedido = motor.generar_pedido(
            &articulo_vivero(),
            CategoriaAbc::A,
            27,
            &ventas,
            fin,
            Some(50.0),
        );

        assert!((pedido.ventas_dia - 2.0).abs() < 1e-9);
        assert!((pedido.stock_minimo_objetivo - 60.0).abs() < 1e-9);
        assert!((pedido.stock_maximo_objetivo - 180.0).abs() < 1e-9);
        // pedido = max(0, 180 - 50) = 130
        assert!((pedido.pedido_generado - 130.0).abs() < 1e-9);
        assert!(!pedido.confianza_baja);
    }

    #[test]
    fn test_sin_stock_conocido_reposicion_completa() {
        let motor = MotorForecast::new(config_sin_crecimiento());
        let fin = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let ventas = ventas_constantes("8012345678", fin, 28, 2.0);

        let pedido =
            motor.generar_pedido(&articulo_vivero(), CategoriaAbc::A, 27, &ventas, fin, None);

        // Sin cifra previa de stock: reposición hasta el máximo
        assert!((pedido.pedido_generado - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_stock_sobrado_pedido_cero() {
        let motor = MotorForecast::new(config_sin_crecimiento());
        let fin = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let ventas = ventas_constantes("8012345678", fin, 28, 2.0);

        let pedido = motor.generar_pedido(
            &articulo_vivero(),
            CategoriaAbc::A,
            27,
            &ventas,
            fin,
            Some(500.0),
        );

        // El pedido nunca es negativo
        assert_eq!(pedido.pedido_generado, 0.0);
    }

    #[test]
    fn test_articulo_nuevo_confianza_baja() {
        let motor = MotorForecast::new(config_sin_crecimiento());
        let fin = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        let pedido =
            motor.generar_pedido(&articulo_vivero(), CategoriaAbc::C, 27, &[], fin, None);

        assert_eq!(pedido.pedido_generado, 0.0);
        assert!(pedido.confianza_baja);
    }

    #[test]
    fn test_ponderacion_categoria_c() {
        // Categoría C con peso 0.7: límites reducidos al 70%
        let motor = MotorForecast::new(config_sin_crecimiento());
        let fin = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let ventas = ventas_constantes("8012345678", fin, 28, 2.0);

        let pedido =
            motor.generar_pedido(&articulo_vivero(), CategoriaAbc::C, 27, &ventas, fin, None);

        assert!((pedido.stock_minimo_objetivo - 60.0 * 0.7).abs() < 1e-9);
        assert!((pedido.stock_maximo_objetivo - 180.0 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_objetivo_semanal_con_crecimiento() {
        let motor = MotorForecast::new(Configuracion::default());
        // ventas_dia 2 -> 14/semana, +5% de crecimiento = 14.7
        assert!((motor.objetivo_semanal(2.0) - 14.7).abs() < 1e-9);
    }

    #[test]
    fn test_ventas_fuera_de_ventana_no_cuentan() {
        let motor = MotorForecast::new(config_sin_crecimiento());
        let fin = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        // Histórico antiguo (hace un año): cuenta como histórico
        // pero no aporta a la ventana -> ventas_dia 0, pedido 0
        let ventas = vec![RegistroVenta {
            codigo_articulo: "8012345678".to_string(),
            fecha: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            unidades: 100.0,
            importe: 1000.0,
        }];

        let pedido =
            motor.generar_pedido(&articulo_vivero(), CategoriaAbc::A, 27, &ventas, fin, None);

        assert_eq!(pedido.ventas_dia, 0.0);
        assert_eq!(pedido.pedido_generado, 0.0);
        assert!(!pedido.confianza_baja);
    }
}
