// ==========================================
// Sistema de Pedidos Vivero - Puerto de salida de informes
// ==========================================
// Los informes y correos son consumidores puros del resultado:
// las etapas numéricas escriben en este puerto y nunca lo
// invocan desde dentro del cálculo.
// ==========================================

use crate::domain::pedido::PedidoCorregido;
use crate::domain::types::Seccion;
use crate::engine::metricas::MetricasEjecucion;
use crate::engine::orquestador::ResultadoEjecucion;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// ==========================================
// Errores de salida
// ==========================================
#[derive(Error, Debug)]
pub enum ErrorSalida {
    #[error("Fallo de escritura del informe: {0}")]
    Escritura(#[from] io::Error),

    #[error("Fallo de formato CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ==========================================
// Puerto de informes
// ==========================================
/// Consumidor del resultado de una ejecución (fichero, correo, ...)
pub trait PuertoInforme {
    fn publicar(&self, resultado: &ResultadoEjecucion) -> Result<(), ErrorSalida>;
}

// ==========================================
// Informe CSV por sección
// ==========================================
// Un fichero Pedido_Semana_{semana}_{seccion}.csv por sección
// procesada, más un resumen de métricas de la ejecución.
pub struct InformeCsv {
    directorio: PathBuf,
}

impl InformeCsv {
    pub fn new<P: AsRef<Path>>(directorio: P) -> Self {
        Self {
            directorio: directorio.as_ref().to_path_buf(),
        }
    }

    fn escribir_seccion(
        &self,
        seccion: Seccion,
        semana: u32,
        pedidos: &[&PedidoCorregido],
    ) -> Result<PathBuf, ErrorSalida> {
        let ruta = self
            .directorio
            .join(format!("Pedido_Semana_{semana}_{seccion}.csv"));

        let mut escritor = csv::Writer::from_path(&ruta)?;
        escritor.write_record([
            "Codigo_Articulo",
            "Nombre_Articulo",
            "Talla",
            "Color",
            "Categoria",
            "Pedido_Teorico",
            "Stock_Fisico",
            "Stock_Minimo",
            "Diferencia_Stock",
            "Pedido_Final",
            "Escenario",
            "Razon_Correccion",
            "Alertas",
        ])?;

        for pedido in pedidos {
            let escenario = pedido
                .escenario
                .as_ref()
                .map(|e| e.codigo())
                .unwrap_or_default();

            let mut alertas = Vec::new();
            if pedido.alertas.stock_critico {
                alertas.push("STOCK_CRITICO");
            }
            if pedido.alertas.cambios_significativos {
                alertas.push("CAMBIOS_SIGNIFICATIVOS");
            }
            if pedido.alertas.sin_ventas {
                alertas.push("SIN_VENTAS");
            }
            if pedido.alertas.stock_bajo {
                alertas.push("STOCK_BAJO");
            }

            escritor.write_record([
                pedido.articulo.codigo.clone(),
                pedido.articulo.nombre.clone(),
                pedido.articulo.talla.clone(),
                pedido.articulo.color.clone(),
                pedido.categoria.to_string(),
                format!("{:.0}", pedido.pedido_generado),
                format!("{:.0}", pedido.stock_fisico),
                format!("{:.0}", pedido.stock_minimo),
                format!("{:.0}", pedido.diferencia_stock),
                format!("{:.0}", pedido.pedido_final),
                escenario,
                pedido.razon_correccion.clone(),
                alertas.join("|"),
            ])?;
        }

        escritor.flush()?;
        Ok(ruta)
    }

    fn escribir_metricas(
        &self,
        semana: u32,
        metricas: &MetricasEjecucion,
    ) -> Result<PathBuf, ErrorSalida> {
        let ruta = self
            .directorio
            .join(format!("Resumen_Semana_{semana}.csv"));

        let precision = metricas
            .precision_forecast()
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "N/D".to_string());

        let filas = [
            ("Metrica", "Valor".to_string()),
            ("Total artículos", metricas.total_articulos.to_string()),
            (
                "Artículos corregidos",
                metricas.articulos_corregidos.to_string(),
            ),
            (
                "% corregidos",
                format!("{:.1}", metricas.porcentaje_corregidos()),
            ),
            (
                "Unidades pedido original",
                format!("{:.0}", metricas.unidades_original),
            ),
            (
                "Unidades pedido final",
                format!("{:.0}", metricas.unidades_corregido),
            ),
            (
                "Diferencia de unidades",
                format!("{:.0}", metricas.diferencia_unidades),
            ),
            ("Precisión forecast", precision),
            (
                "Artículos con alertas",
                metricas.articulos_con_alertas.to_string(),
            ),
            (
                "Artículos degradados",
                metricas.articulos_degradados.to_string(),
            ),
        ];

        let mut escritor = csv::Writer::from_path(&ruta)?;
        for (metrica, valor) in filas {
            escritor.write_record([metrica.to_string(), valor])?;
        }
        escritor.flush()?;
        Ok(ruta)
    }
}

impl PuertoInforme for InformeCsv {
    fn publicar(&self, resultado: &ResultadoEjecucion) -> Result<(), ErrorSalida> {
        std::fs::create_dir_all(&self.directorio)?;

        for &seccion in &resultado.secciones_correctas {
            let pedidos: Vec<&PedidoCorregido> = resultado
                .pedidos
                .iter()
                .filter(|p| p.articulo.seccion() == Some(seccion))
                .collect();

            let ruta = self.escribir_seccion(seccion, resultado.semana, &pedidos)?;
            info!(
                %seccion,
                pedidos = pedidos.len(),
                fichero = %ruta.display(),
                "Informe de sección escrito"
            );
        }

        let ruta = self.escribir_metricas(resultado.semana, &resultado.metricas)?;
        info!(fichero = %ruta.display(), "Resumen de métricas escrito");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::articulo::Articulo;
    use crate::domain::pedido::PedidoTeorico;
    use crate::domain::types::CategoriaAbc;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn resultado_minimo() -> ResultadoEjecucion {
        let teorico = PedidoTeorico {
            articulo: Articulo::nuevo("8012345678", "ROSAL TREPADOR", "M", "ROJO"),
            semana: 27,
            categoria: CategoriaAbc::A,
            ventas_dia: 2.0,
            stock_minimo_objetivo: 60.0,
            stock_maximo_objetivo: 180.0,
            pedido_generado: 130.0,
            confianza_baja: false,
        };
        let pedido = PedidoCorregido::sin_correccion(&teorico);

        ResultadoEjecucion {
            id_ejecucion: Uuid::new_v4(),
            semana: 27,
            clasificaciones: Vec::new(),
            metricas: crate::engine::AgregadorMetricas::agregar(std::slice::from_ref(&pedido)),
            pedidos: vec![pedido],
            secciones_correctas: vec![Seccion::Vivero],
            secciones_fallidas: Vec::new(),
        }
    }

    #[test]
    fn test_informe_por_seccion() {
        let dir = TempDir::new().unwrap();
        let informe = InformeCsv::new(dir.path());

        informe.publicar(&resultado_minimo()).unwrap();

        let fichero = dir.path().join("Pedido_Semana_27_vivero.csv");
        assert!(fichero.exists());
        let contenido = std::fs::read_to_string(fichero).unwrap();
        assert!(contenido.contains("8012345678"));
        assert!(contenido.contains("ROSAL TREPADOR"));
    }

    #[test]
    fn test_resumen_de_metricas() {
        let dir = TempDir::new().unwrap();
        let informe = InformeCsv::new(dir.path());

        informe.publicar(&resultado_minimo()).unwrap();

        let fichero = dir.path().join("Resumen_Semana_27.csv");
        assert!(fichero.exists());
        let contenido = std::fs::read_to_string(fichero).unwrap();
        assert!(contenido.contains("Total artículos,1"));
    }
}
