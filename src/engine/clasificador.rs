// ==========================================
// Sistema de Pedidos Vivero - Clasificador ABC+D
// ==========================================
// Clasifica los artículos de una sección por contribución al
// beneficio dentro de un período. Motor sin estado: función
// pura de sus entradas, sin efectos laterales.
//
// Reparto de categorías sobre el beneficio acumulado:
//   A <= 80%, B <= 95%, C > 95%, D = sin ventas en el período.
// ==========================================

use crate::domain::articulo::Articulo;
use crate::domain::clasificacion::Clasificacion;
use crate::domain::registros::{RegistroVenta, SnapshotStock};
use crate::domain::types::{CategoriaAbc, NivelRiesgo, PeriodoAnalisis, Seccion};
use crate::engine::error::ErrorPipeline;
use crate::engine::rotacion::TablaRotaciones;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

// ==========================================
// Política de acción sugerida
// ==========================================
// La acción es una tabla de consulta, no más algoritmo:
// se deja enchufable para que el negocio la ajuste sin tocar
// el clasificador.
pub trait PoliticaAccion {
    fn accion(&self, categoria: CategoriaAbc, riesgo: NivelRiesgo) -> String;
}

/// Política estándar del sistema
pub struct PoliticaAccionEstandar;

impl PoliticaAccion for PoliticaAccionEstandar {
    fn accion(&self, categoria: CategoriaAbc, riesgo: NivelRiesgo) -> String {
        let texto = match (categoria, riesgo) {
            (CategoriaAbc::A | CategoriaAbc::B, NivelRiesgo::Cero) => {
                "REPOSICIÓN PRIORITARIA: producto clave agotado, recompra inmediata"
            }
            (CategoriaAbc::A | CategoriaAbc::B, NivelRiesgo::Bajo) => {
                "MANTENER ESTRATEGIA ACTUAL: stock óptimo y fresco, producto clave del catálogo"
            }
            (CategoriaAbc::A | CategoriaAbc::B, NivelRiesgo::Medio) => {
                "OPTIMIZAR: descuento preventivo leve, mantener nivel de compras"
            }
            (CategoriaAbc::A | CategoriaAbc::B, NivelRiesgo::Alto) => {
                "DESCUENTO MODERADO + REDUCCIÓN DE COMPRAS: dinamizar ventas y vigilar semanalmente"
            }
            (CategoriaAbc::A | CategoriaAbc::B, NivelRiesgo::Critico) => {
                "DESCUENTO MÁXIMO + REDUCCIÓN DE COMPRAS: liberar stock envejecido, prioridad alta"
            }
            (CategoriaAbc::C, NivelRiesgo::Cero) => {
                "RECOMPRA MODERADA: agotado de bajo impacto, mantener nivel anterior"
            }
            (CategoriaAbc::C, NivelRiesgo::Bajo | NivelRiesgo::Medio) => {
                "COMPRAS CONSERVADORAS: demanda limitada, reducir compras la próxima temporada"
            }
            (CategoriaAbc::C, NivelRiesgo::Alto | NivelRiesgo::Critico) => {
                "LIQUIDAR Y DESCATALOGAR: agotar stock con descuento, no recomprar"
            }
            (CategoriaAbc::D, NivelRiesgo::Cero) => {
                "SIN MOVIMIENTO NI STOCK: evaluar continuidad en catálogo"
            }
            (CategoriaAbc::D, _) => {
                "ELIMINAR DEL CATÁLOGO: sin ventas en el período, liquidar stock residual"
            }
        };
        texto.to_string()
    }
}

// ==========================================
// Datos de entrada de una sección
// ==========================================
#[derive(Debug)]
pub struct DatosSeccion<'a> {
    /// Catálogo de artículos (identidades únicas)
    pub articulos: &'a [Articulo],
    /// Ventas del período (ya normalizadas)
    pub ventas: &'a [RegistroVenta],
    /// Stock actual por artículo
    pub stock: &'a [SnapshotStock],
    /// Coste unitario por código de artículo
    pub costes: &'a HashMap<String, f64>,
}

// ==========================================
// ClasificadorAbc
// ==========================================
#[derive(Debug)]
pub struct ClasificadorAbc;

impl ClasificadorAbc {
    pub fn new() -> Self {
        Self
    }

    /// Clasifica los artículos de una sección en un período.
    ///
    /// # Parámetros
    /// - `seccion`: sección a procesar (las demás se ignoran)
    /// - `periodo`: ventana de fechas del análisis
    /// - `datos`: registros normalizados de la sección
    /// - `politica`: tabla de acciones sugeridas
    ///
    /// # Retorno
    /// Una `Clasificacion` por artículo. Determinista: el desempate
    /// del ranking es por código ascendente.
    ///
    /// # Errores
    /// - `SeccionVacia` si no queda ningún artículo válido (fatal
    ///   solo para este ámbito)
    pub fn clasificar(
        &self,
        seccion: Seccion,
        periodo: &PeriodoAnalisis,
        datos: &DatosSeccion<'_>,
        politica: &dyn PoliticaAccion,
    ) -> Result<Vec<Clasificacion>, ErrorPipeline> {
        // Artículos válidos de la sección, deduplicados por código
        let mut articulos: Vec<&Articulo> = Vec::new();
        let mut vistos: HashMap<&str, ()> = HashMap::new();
        for articulo in datos.articulos {
            if articulo.seccion() != Some(seccion) {
                continue;
            }
            if vistos.insert(articulo.codigo.as_str(), ()).is_none() {
                articulos.push(articulo);
            }
        }

        if articulos.is_empty() {
            return Err(ErrorPipeline::SeccionVacia(seccion));
        }

        // Agregados de ventas por artículo dentro del período
        let mut unidades: HashMap<&str, f64> = HashMap::new();
        let mut importes: HashMap<&str, f64> = HashMap::new();
        for venta in datos.ventas {
            if !periodo.contiene(venta.fecha) {
                continue;
            }
            *unidades.entry(venta.codigo_articulo.as_str()).or_default() += venta.unidades;
            *importes.entry(venta.codigo_articulo.as_str()).or_default() += venta.importe;
        }

        // Stock actual por artículo: con varias instantáneas fechadas
        // del mismo código prevalece la más reciente, igual que en el
        // resto del pipeline
        let mut stock_actual: HashMap<&str, (NaiveDate, f64)> = HashMap::new();
        for snapshot in datos.stock {
            let entrada = stock_actual
                .entry(snapshot.codigo_articulo.as_str())
                .or_insert((snapshot.fecha, snapshot.unidades));
            if snapshot.fecha >= entrada.0 {
                *entrada = (snapshot.fecha, snapshot.unidades);
            }
        }

        // Paso 1: separar "con ventas" de "sin ventas" (estos van a D)
        let mut con_ventas: Vec<Clasificacion> = Vec::new();
        let mut sin_ventas: Vec<Clasificacion> = Vec::new();
        let mut costes_ausentes = 0usize;

        for articulo in articulos {
            let codigo = articulo.codigo.as_str();
            let vendidas = unidades.get(codigo).copied().unwrap_or(0.0);
            let importe = importes.get(codigo).copied().unwrap_or(0.0);
            let stock = stock_actual.get(codigo).map(|(_, u)| *u).unwrap_or(0.0);

            // Paso 2: beneficio = importe - unidades x coste unitario.
            // Coste ausente: se usa 0 y se marca el registro, la
            // ejecución continúa.
            let (coste_unitario, coste_ausente) = match datos.costes.get(codigo) {
                Some(coste) => (*coste, false),
                None => (0.0, true),
            };
            if coste_ausente {
                costes_ausentes += 1;
            }

            let beneficio = importe - vendidas * coste_unitario;
            let riesgo = Self::evaluar_riesgo(articulo, vendidas, stock, periodo);

            let registro = Clasificacion {
                articulo: articulo.clone(),
                seccion,
                periodo: periodo.indice,
                beneficio,
                unidades_vendidas: vendidas,
                pct_individual: 0.0,
                pct_acumulado: 0.0,
                categoria: CategoriaAbc::D,
                riesgo,
                accion_sugerida: String::new(),
                coste_ausente,
            };

            if vendidas > 0.0 {
                con_ventas.push(registro);
            } else {
                // Sin ventas: categoría D inmediata, beneficio 0,
                // fuera del ranking
                sin_ventas.push(Clasificacion {
                    beneficio: 0.0,
                    ..registro
                });
            }
        }

        if costes_ausentes > 0 {
            warn!(
                seccion = %seccion,
                costes_ausentes,
                "Artículos sin coste unitario: beneficio calculado con coste 0"
            );
        }

        // Paso 3: ranking por beneficio descendente, desempate por
        // código ascendente (reproducible entre ejecuciones)
        con_ventas.sort_by(|a, b| {
            b.beneficio
                .partial_cmp(&a.beneficio)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.articulo.codigo.cmp(&b.articulo.codigo))
        });

        // Pasos 4-6: porcentajes individual y acumulado, categoría
        let beneficio_total: f64 = con_ventas.iter().map(|c| c.beneficio).sum();

        if beneficio_total > 0.0 {
            let mut acumulado = 0.0;
            for registro in &mut con_ventas {
                let individual = registro.beneficio / beneficio_total * 100.0;
                acumulado += individual;
                registro.pct_individual = individual;
                registro.pct_acumulado = acumulado;
                registro.categoria = if acumulado <= 80.0 {
                    CategoriaAbc::A
                } else if acumulado <= 95.0 {
                    CategoriaAbc::B
                } else {
                    CategoriaAbc::C
                };
            }
        } else {
            // Caso límite documentado: todos los artículos con ventas
            // tienen beneficio no positivo. Porcentaje 0 y categoría C
            // para todos; no es un error.
            warn!(
                seccion = %seccion,
                "Beneficio total no positivo: todos los artículos con ventas caen a categoría C"
            );
            for registro in &mut con_ventas {
                registro.pct_individual = 0.0;
                registro.pct_acumulado = 0.0;
                registro.categoria = CategoriaAbc::C;
            }
        }

        // Paso 7: acción sugerida (tabla enchufable)
        let mut resultado = con_ventas;
        resultado.extend(sin_ventas);
        for registro in &mut resultado {
            registro.accion_sugerida = politica.accion(registro.categoria, registro.riesgo);
        }

        info!(
            seccion = %seccion,
            periodo = periodo.indice,
            total = resultado.len(),
            categoria_a = resultado.iter().filter(|c| c.categoria == CategoriaAbc::A).count(),
            categoria_b = resultado.iter().filter(|c| c.categoria == CategoriaAbc::B).count(),
            categoria_c = resultado.iter().filter(|c| c.categoria == CategoriaAbc::C).count(),
            categoria_d = resultado.iter().filter(|c| c.categoria == CategoriaAbc::D).count(),
            "Clasificación ABC+D completada"
        );

        Ok(resultado)
    }

    /// Riesgo de merma / inmovilizado.
    ///
    /// Señal auxiliar basada en la cobertura del stock frente a la
    /// rotación de la familia:
    ///   sin stock -> Cero; sin ventas con stock -> Crítico;
    ///   cobertura <= 65% de la rotación -> Bajo; <= 100% -> Medio;
    ///   <= 150% -> Alto; más -> Crítico.
    fn evaluar_riesgo(
        articulo: &Articulo,
        unidades_vendidas: f64,
        stock_actual: f64,
        periodo: &PeriodoAnalisis,
    ) -> NivelRiesgo {
        if stock_actual <= 0.0 {
            return NivelRiesgo::Cero;
        }
        if unidades_vendidas <= 0.0 {
            return NivelRiesgo::Critico;
        }

        let ventas_dia = unidades_vendidas / periodo.dias() as f64;
        let rotacion = TablaRotaciones::rotacion_dias(articulo.familia()) as f64;
        let cobertura_dias = stock_actual / ventas_dia;
        let pct_rotacion = cobertura_dias / rotacion * 100.0;

        if pct_rotacion <= 65.0 {
            NivelRiesgo::Bajo
        } else if pct_rotacion <= 100.0 {
            NivelRiesgo::Medio
        } else if pct_rotacion <= 150.0 {
            NivelRiesgo::Alto
        } else {
            NivelRiesgo::Critico
        }
    }
}

impl Default for ClasificadorAbc {
    fn default() -> Self {
        Self::new()
    }
}
