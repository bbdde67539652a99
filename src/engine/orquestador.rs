// ==========================================
// Sistema de Pedidos Vivero - Orquestador del pipeline
// ==========================================
// Encadena por sección las tres etapas del cálculo semanal:
// clasificación ABC+D, forecast (FASE 1) y corrección (FASE 2),
// y agrega las métricas del lote completo.
//
// Fallo parcial: una sección sin artículos válidos aborta solo
// ese ámbito; las demás secciones siguen produciendo salida. La
// ejecución termina siempre con el recuento explícito de ámbitos
// correctos y fallidos, nunca con un resultado parcial silencioso.
// ==========================================

use crate::config::parametros::{Configuracion, ErrorConfiguracion};
use crate::domain::articulo::Articulo;
use crate::domain::clasificacion::Clasificacion;
use crate::domain::pedido::PedidoCorregido;
use crate::domain::registros::{
    stock_mas_reciente, RegistroCompra, RegistroVenta, SnapshotStock,
};
use crate::domain::types::{PeriodoAnalisis, Seccion};
use crate::engine::clasificador::{ClasificadorAbc, DatosSeccion, PoliticaAccionEstandar};
use crate::engine::correccion::{DatosReales, MotorCorreccion};
use crate::engine::forecast::MotorForecast;
use crate::engine::metricas::{AgregadorMetricas, MetricasEjecucion};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{error, info};
use uuid::Uuid;

// ==========================================
// Entradas de una ejecución
// ==========================================
// Registros ya normalizados por el importador; el orquestador
// no vuelve a validar campos individuales.
#[derive(Debug, Default)]
pub struct DatosEjecucion {
    pub articulos: Vec<Articulo>,
    pub ventas: Vec<RegistroVenta>,
    pub compras: Vec<RegistroCompra>,
    pub stock: Vec<SnapshotStock>,
    /// Coste unitario por código de artículo
    pub costes: HashMap<String, f64>,
}

// ==========================================
// Resultado de una ejecución
// ==========================================
#[derive(Debug)]
pub struct ResultadoEjecucion {
    /// Identificador único de la ejecución (para trazas e informes)
    pub id_ejecucion: Uuid,
    pub semana: u32,
    pub clasificaciones: Vec<Clasificacion>,
    pub pedidos: Vec<PedidoCorregido>,
    pub metricas: MetricasEjecucion,
    /// Secciones procesadas con éxito
    pub secciones_correctas: Vec<Seccion>,
    /// Secciones abortadas, con el motivo
    pub secciones_fallidas: Vec<(Seccion, String)>,
}

impl ResultadoEjecucion {
    /// Artículos con confianza degradada (datos sustituidos)
    pub fn articulos_degradados(&self) -> usize {
        self.metricas.articulos_degradados
    }
}

// ==========================================
// Orquestador
// ==========================================
#[derive(Debug)]
pub struct Orquestador {
    config: Configuracion,
    clasificador: ClasificadorAbc,
    forecast: MotorForecast,
    correccion: MotorCorreccion,
}

impl Orquestador {
    /// Construye el orquestador con una configuración validada.
    ///
    /// # Errores
    /// - `ErrorConfiguracion` si falta una tabla obligatoria o un
    ///   valor queda fuera de rango; los motores dan por validada
    ///   la configuración que reciben
    pub fn new(config: Configuracion) -> Result<Self, ErrorConfiguracion> {
        config.validar()?;
        Ok(Self {
            clasificador: ClasificadorAbc::new(),
            forecast: MotorForecast::new(config.clone()),
            correccion: MotorCorreccion::new(config.clone()),
            config,
        })
    }

    /// Ejecuta el pipeline completo para una semana.
    ///
    /// # Parámetros
    /// - `secciones`: secciones a procesar (normalmente `Seccion::todas()`)
    /// - `periodo`: período de análisis de la clasificación
    /// - `semana`: semana ISO del pedido
    /// - `fin_semana`: último día (inclusive) de la semana; también
    ///   cierra la ventana de ventas del forecast
    /// - `datos`: registros normalizados de la ejecución
    pub fn ejecutar(
        &self,
        secciones: &[Seccion],
        periodo: &PeriodoAnalisis,
        semana: u32,
        fin_semana: NaiveDate,
        datos: &DatosEjecucion,
    ) -> ResultadoEjecucion {
        let id_ejecucion = Uuid::new_v4();
        info!(
            %id_ejecucion,
            semana,
            periodo = periodo.indice,
            secciones = secciones.len(),
            "Inicio de ejecución del pipeline"
        );

        let mut clasificaciones = Vec::new();
        let mut pedidos = Vec::new();
        let mut metricas = MetricasEjecucion::default();
        let mut secciones_correctas = Vec::new();
        let mut secciones_fallidas = Vec::new();

        for &seccion in secciones {
            match self.procesar_seccion(seccion, periodo, semana, fin_semana, datos) {
                Ok((clasif, lote)) => {
                    metricas = metricas.combinar(AgregadorMetricas::agregar(&lote));
                    clasificaciones.extend(clasif);
                    pedidos.extend(lote);
                    secciones_correctas.push(seccion);
                }
                Err(motivo) => {
                    // El fallo de un ámbito no bloquea el lote
                    error!(%seccion, %motivo, "Sección abortada");
                    secciones_fallidas.push((seccion, motivo.to_string()));
                }
            }
        }

        info!(
            %id_ejecucion,
            correctas = secciones_correctas.len(),
            fallidas = secciones_fallidas.len(),
            articulos = metricas.total_articulos,
            corregidos = metricas.articulos_corregidos,
            degradados = metricas.articulos_degradados,
            "Fin de ejecución del pipeline"
        );

        ResultadoEjecucion {
            id_ejecucion,
            semana,
            clasificaciones,
            pedidos,
            metricas,
            secciones_correctas,
            secciones_fallidas,
        }
    }

    /// Etapas clasificación -> forecast -> corrección de una sección.
    /// Un error aquí aborta esta sección, no la ejecución.
    fn procesar_seccion(
        &self,
        seccion: Seccion,
        periodo: &PeriodoAnalisis,
        semana: u32,
        fin_semana: NaiveDate,
        datos: &DatosEjecucion,
    ) -> Result<(Vec<Clasificacion>, Vec<PedidoCorregido>), crate::engine::error::ErrorPipeline>
    {
        let datos_seccion = DatosSeccion {
            articulos: &datos.articulos,
            ventas: &datos.ventas,
            stock: &datos.stock,
            costes: &datos.costes,
        };

        let politica = PoliticaAccionEstandar;
        let clasificaciones =
            self.clasificador
                .clasificar(seccion, periodo, &datos_seccion, &politica)?;

        let inicio_semana = fin_semana - chrono::Duration::days(6);
        let mut pedidos = Vec::with_capacity(clasificaciones.len());

        for clasificacion in &clasificaciones {
            let articulo = &clasificacion.articulo;

            // Una carga re-exportada puede traer varias instantáneas
            // fechadas del mismo código: prevalece la más reciente
            let stock_fisico =
                stock_mas_reciente(&datos.stock, &articulo.codigo).map(|s| s.unidades);

            let teorico = self.forecast.generar_pedido(
                articulo,
                clasificacion.categoria,
                semana,
                &datos.ventas,
                fin_semana,
                stock_fisico,
            );

            if !self.config.habilitar_correccion {
                pedidos.push(PedidoCorregido::sin_correccion(&teorico));
                continue;
            }

            // Realidad operativa de la semana del pedido
            let unidades_vendidas: f64 = datos
                .ventas
                .iter()
                .filter(|v| {
                    v.codigo_articulo == articulo.codigo
                        && v.fecha >= inicio_semana
                        && v.fecha <= fin_semana
                })
                .map(|v| v.unidades)
                .sum();

            let unidades_recibidas: f64 = datos
                .compras
                .iter()
                .filter(|c| {
                    c.codigo_articulo == articulo.codigo
                        && c.fecha >= inicio_semana
                        && c.fecha <= fin_semana
                })
                .map(|c| c.unidades)
                .sum();

            let reales = DatosReales {
                stock_fisico,
                unidades_vendidas,
                unidades_recibidas,
                ventas_objetivo: self.forecast.objetivo_semanal(teorico.ventas_dia),
            };

            pedidos.push(self.correccion.corregir(&teorico, &reales));
        }

        Ok((clasificaciones, pedidos))
    }
}
