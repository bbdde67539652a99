// ==========================================
// Sistema de Pedidos Vivero - Entrada principal
// ==========================================
// Ejecuta el pipeline semanal completo: resolución de ficheros
// del ERP, normalización, clasificación, forecast, corrección
// e informes CSV por sección.
//
// Uso:
//   vivero-pedidos <semana> [config.json] [dir_entrada] [dir_salida]
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use std::path::{Path, PathBuf};
use vivero_pedidos::importer::{buscar_ultimo_fichero, Normalizador, ParserUniversal};
use vivero_pedidos::{
    logging, Configuracion, DatosEjecucion, InformeCsv, Orquestador, PeriodoAnalisis,
    PuertoInforme, Seccion,
};

struct Argumentos {
    semana: u32,
    config: Option<PathBuf>,
    dir_entrada: PathBuf,
    dir_salida: PathBuf,
}

fn parsear_argumentos() -> Result<Argumentos> {
    let mut args = std::env::args().skip(1);

    let semana: u32 = match args.next() {
        Some(v) => v
            .parse()
            .with_context(|| format!("Semana inválida: {v}"))?,
        None => bail!("Uso: vivero-pedidos <semana> [config.json] [dir_entrada] [dir_salida]"),
    };
    if !(1..=53).contains(&semana) {
        bail!("La semana debe estar entre 1 y 53, recibida {semana}");
    }

    Ok(Argumentos {
        semana,
        config: args.next().map(PathBuf::from),
        dir_entrada: args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/input")),
        dir_salida: args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/output")),
    })
}

/// Carga el fichero lógico `base` si hay exportación disponible
fn cargar_filas(
    directorio: &Path,
    base: &str,
) -> Result<Vec<std::collections::HashMap<String, String>>> {
    // El ERP exporta .xlsx; algunos procesos antiguos dejan .csv
    let ruta = buscar_ultimo_fichero(directorio, base, ".xlsx")
        .or_else(|| buscar_ultimo_fichero(directorio, base, ".csv"));

    match ruta {
        Some(ruta) => ParserUniversal
            .parsear(&ruta)
            .with_context(|| format!("Fallo al parsear {}", ruta.display())),
        None => Ok(Vec::new()),
    }
}

/// Período de análisis estándar que contiene la fecha dada
fn periodo_de_fecha(fecha: NaiveDate) -> PeriodoAnalisis {
    for indice in 1..=4u8 {
        if let Some(periodo) = PeriodoAnalisis::estandar(fecha.year(), indice) {
            if periodo.contiene(fecha) {
                return periodo;
            }
        }
    }
    unreachable!("los cuatro períodos estándar cubren el año completo");
}

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", vivero_pedidos::NOMBRE_APP);
    tracing::info!("Versión: {}", vivero_pedidos::VERSION);
    tracing::info!("==================================================");

    let argumentos = parsear_argumentos()?;

    // La configuración se valida antes de tocar ningún dato: una
    // clave obligatoria ausente aborta la ejecución completa
    let config = match &argumentos.config {
        Some(ruta) => Configuracion::desde_fichero(ruta)
            .with_context(|| format!("Configuración inválida: {}", ruta.display()))?,
        None => Configuracion::default(),
    };

    tracing::info!(
        semana = argumentos.semana,
        entrada = %argumentos.dir_entrada.display(),
        salida = %argumentos.dir_salida.display(),
        "Parámetros de la ejecución"
    );

    // Carga y normalización de las exportaciones del ERP
    let hoy = Utc::now().date_naive();

    let filas_ventas = cargar_filas(&argumentos.dir_entrada, "SPA_Ventas")?;
    let filas_compras = cargar_filas(&argumentos.dir_entrada, "SPA_Compras")?;
    let filas_stock = cargar_filas(&argumentos.dir_entrada, "SPA_Stock_actual")?;
    let filas_costes = cargar_filas(&argumentos.dir_entrada, "Coste")?;

    if filas_ventas.is_empty() {
        bail!(
            "Sin fichero de ventas en {}: no hay nada que procesar",
            argumentos.dir_entrada.display()
        );
    }

    let (ventas, _) = Normalizador::ventas(&filas_ventas);
    let (compras, _) = Normalizador::compras(&filas_compras);
    let (stock, _) = Normalizador::stock(&filas_stock, hoy);
    let (costes, _) = Normalizador::costes(&filas_costes);

    let datos = DatosEjecucion {
        articulos: Normalizador::articulos(&filas_ventas),
        ventas,
        compras,
        stock,
        costes,
    };

    // La semana del pedido cierra el domingo anterior a hoy
    let mut fin_semana = hoy;
    while fin_semana.weekday() != Weekday::Sun {
        fin_semana -= chrono::Duration::days(1);
    }

    let periodo = periodo_de_fecha(fin_semana);

    let orquestador = Orquestador::new(config).context("Configuración de ejecución inválida")?;
    let resultado = orquestador.ejecutar(
        Seccion::todas(),
        &periodo,
        argumentos.semana,
        fin_semana,
        &datos,
    );

    for (seccion, motivo) in &resultado.secciones_fallidas {
        tracing::warn!(%seccion, %motivo, "Sección sin resultado");
    }

    InformeCsv::new(&argumentos.dir_salida)
        .publicar(&resultado)
        .context("Fallo al escribir los informes")?;

    tracing::info!(
        id_ejecucion = %resultado.id_ejecucion,
        pedidos = resultado.pedidos.len(),
        secciones_correctas = resultado.secciones_correctas.len(),
        secciones_fallidas = resultado.secciones_fallidas.len(),
        "Ejecución completada"
    );

    Ok(())
}
