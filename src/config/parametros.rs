// ==========================================
// Sistema de Pedidos Vivero - Configuración de ejecución
// ==========================================
// Valor inmutable que se pasa explícitamente a cada componente.
// Nunca estado global: así el proceso por secciones en paralelo
// no puede observar una configuración a medio mutar y las
// ejecuciones son reproducibles.
// ==========================================

use crate::domain::types::CategoriaAbc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

// ==========================================
// Errores de configuración
// ==========================================
// Una clave obligatoria ausente aborta la ejecución completa
// antes de cualquier cálculo (fail fast).
#[derive(Error, Debug)]
pub enum ErrorConfiguracion {
    #[error("Fichero de configuración no encontrado: {0}")]
    FicheroNoEncontrado(String),

    #[error("Configuración ilegible: {0}")]
    Lectura(#[from] std::io::Error),

    #[error("Configuración mal formada: {0}")]
    Formato(#[from] serde_json::Error),

    #[error("Clave de configuración obligatoria ausente: {0}")]
    ClaveAusente(&'static str),

    #[error("Valor de configuración inválido ({clave}): {motivo}")]
    ValorInvalido { clave: &'static str, motivo: String },
}

// ==========================================
// Pesos por categoría
// ==========================================
// Reutilizado para dos tablas distintas: los pesos de escalado
// de límites de stock (FASE 1) y las semanas de cobertura del
// stock mínimo (FASE 2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PesosCategoria {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
}

impl PesosCategoria {
    pub fn peso(&self, categoria: CategoriaAbc) -> f64 {
        match categoria {
            CategoriaAbc::A => self.a,
            CategoriaAbc::B => self.b,
            CategoriaAbc::C => self.c,
            CategoriaAbc::D => self.d,
        }
    }
}

// ==========================================
// Cobertura por categoría
// ==========================================
// A diferencia de los pesos, una categoría puede quedar sin
// cobertura declarada: en ese caso la FASE 2 cae al ratio de
// reserva `stock_minimo_porcentaje`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoberturaCategoria {
    #[serde(rename = "A")]
    pub a: Option<f64>,
    #[serde(rename = "B")]
    pub b: Option<f64>,
    #[serde(rename = "C")]
    pub c: Option<f64>,
    #[serde(rename = "D")]
    pub d: Option<f64>,
}

impl CoberturaCategoria {
    /// Semanas de cobertura declaradas para la categoría, si las hay
    pub fn semanas(&self, categoria: CategoriaAbc) -> Option<f64> {
        match categoria {
            CategoriaAbc::A => self.a,
            CategoriaAbc::B => self.b,
            CategoriaAbc::C => self.c,
            CategoriaAbc::D => self.d,
        }
    }
}

// ==========================================
// Configuración del pipeline
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuracion {
    /// Incremento aplicado al objetivo semanal de ventas (0.05 = +5%)
    #[serde(default = "defecto_objetivo_crecimiento")]
    pub objetivo_crecimiento: f64,

    /// Ratio de stock mínimo de reserva cuando la categoría no tiene peso
    #[serde(default = "defecto_stock_minimo_porcentaje")]
    pub stock_minimo_porcentaje: f64,

    /// Escalado de límites de stock por categoría (FASE 1).
    /// Obligatoria: la aritmética posterior depende de ella.
    pub pesos_categoria: Option<PesosCategoria>,

    /// Semanas de cobertura del stock mínimo por categoría (FASE 2).
    /// Obligatoria.
    pub stock_minimo_por_categoria: Option<CoberturaCategoria>,

    /// Umbral de unidades por debajo del cual se alerta de stock bajo (0 = desactivado)
    #[serde(default)]
    pub umbral_alerta_stock: i64,

    /// Si true, el pedido final puede quedar negativo (sin suelo en 0)
    #[serde(default)]
    pub permitir_pedidos_negativos: bool,

    /// Si false, la FASE 2 no se ejecuta y el pedido teórico pasa tal cual
    #[serde(default = "defecto_habilitar_correccion")]
    pub habilitar_correccion: bool,

    /// Días de la ventana de ventas recientes del forecast
    #[serde(default = "defecto_ventana_forecast_dias")]
    pub ventana_forecast_dias: u32,
}

fn defecto_objetivo_crecimiento() -> f64 {
    0.05
}

fn defecto_stock_minimo_porcentaje() -> f64 {
    0.30
}

fn defecto_habilitar_correccion() -> bool {
    true
}

fn defecto_ventana_forecast_dias() -> u32 {
    28
}

impl Default for Configuracion {
    /// Configuración estándar del sistema (política documentada:
    /// cobertura A=1.5, B=1.0, C=0.5, D=0.0 semanas).
    fn default() -> Self {
        Self {
            objetivo_crecimiento: defecto_objetivo_crecimiento(),
            stock_minimo_porcentaje: defecto_stock_minimo_porcentaje(),
            pesos_categoria: Some(PesosCategoria {
                a: 1.0,
                b: 1.0,
                c: 0.7,
                d: 0.5,
            }),
            stock_minimo_por_categoria: Some(CoberturaCategoria {
                a: Some(1.5),
                b: Some(1.0),
                c: Some(0.5),
                d: Some(0.0),
            }),
            umbral_alerta_stock: 0,
            permitir_pedidos_negativos: false,
            habilitar_correccion: defecto_habilitar_correccion(),
            ventana_forecast_dias: defecto_ventana_forecast_dias(),
        }
    }
}

impl Configuracion {
    /// Carga y valida la configuración desde un fichero JSON.
    pub fn desde_fichero<P: AsRef<Path>>(ruta: P) -> Result<Self, ErrorConfiguracion> {
        let ruta = ruta.as_ref();
        if !ruta.exists() {
            return Err(ErrorConfiguracion::FicheroNoEncontrado(
                ruta.display().to_string(),
            ));
        }

        let contenido = fs::read_to_string(ruta)?;
        let config: Configuracion = serde_json::from_str(&contenido)?;
        config.validar()?;
        Ok(config)
    }

    /// Comprueba las claves obligatorias y los rangos básicos.
    ///
    /// # Errores
    /// - `ClaveAusente` si falta una tabla obligatoria
    /// - `ValorInvalido` si un valor queda fuera de rango
    pub fn validar(&self) -> Result<(), ErrorConfiguracion> {
        if self.pesos_categoria.is_none() {
            return Err(ErrorConfiguracion::ClaveAusente("pesos_categoria"));
        }
        if self.stock_minimo_por_categoria.is_none() {
            return Err(ErrorConfiguracion::ClaveAusente("stock_minimo_por_categoria"));
        }
        if self.objetivo_crecimiento < 0.0 {
            return Err(ErrorConfiguracion::ValorInvalido {
                clave: "objetivo_crecimiento",
                motivo: format!("debe ser >= 0, recibido {}", self.objetivo_crecimiento),
            });
        }
        if self.ventana_forecast_dias == 0 {
            return Err(ErrorConfiguracion::ValorInvalido {
                clave: "ventana_forecast_dias",
                motivo: "debe ser > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Pesos de escalado de límites (validados previamente)
    pub fn pesos(&self) -> &PesosCategoria {
        self.pesos_categoria
            .as_ref()
            .expect("configuración validada: pesos_categoria presente")
    }

    /// Semanas de cobertura por categoría (validadas previamente)
    pub fn cobertura(&self) -> &CoberturaCategoria {
        self.stock_minimo_por_categoria
            .as_ref()
            .expect("configuración validada: stock_minimo_por_categoria presente")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_configuracion_por_defecto_valida() {
        let config = Configuracion::default();
        assert!(config.validar().is_ok());
        assert_eq!(config.objetivo_crecimiento, 0.05);
        assert_eq!(config.stock_minimo_porcentaje, 0.30);
        assert!(!config.permitir_pedidos_negativos);
        assert_eq!(config.cobertura().semanas(CategoriaAbc::A), Some(1.5));
        assert_eq!(config.cobertura().semanas(CategoriaAbc::D), Some(0.0));
    }

    #[test]
    fn test_clave_obligatoria_ausente() {
        // Sin pesos_categoria la ejecución debe abortar antes de calcular
        let json = r#"{ "stock_minimo_por_categoria": {"A": 1.5, "B": 1.0, "C": 0.5, "D": 0.0} }"#;
        let config: Configuracion = serde_json::from_str(json).unwrap();
        let err = config.validar().unwrap_err();
        assert!(matches!(err, ErrorConfiguracion::ClaveAusente("pesos_categoria")));
    }

    #[test]
    fn test_carga_desde_fichero() {
        let mut fichero = NamedTempFile::new().unwrap();
        write!(
            fichero,
            r#"{{
                "objetivo_crecimiento": 0.10,
                "pesos_categoria": {{"A": 1.0, "B": 1.0, "C": 0.6, "D": 0.4}},
                "stock_minimo_por_categoria": {{"A": 1.5, "B": 1.0, "C": 0.5, "D": 0.0}},
                "umbral_alerta_stock": 5,
                "habilitar_correccion": true
            }}"#
        )
        .unwrap();

        let config = Configuracion::desde_fichero(fichero.path()).unwrap();
        assert_eq!(config.objetivo_crecimiento, 0.10);
        assert_eq!(config.umbral_alerta_stock, 5);
        assert_eq!(config.pesos().peso(CategoriaAbc::C), 0.6);
        // Claves no presentes toman su valor por defecto
        assert_eq!(config.ventana_forecast_dias, 28);
    }

    #[test]
    fn test_cobertura_parcial() {
        // Una categoría sin cobertura declarada es válida: la FASE 2
        // usará el ratio de reserva para ella
        let json = r#"{
            "pesos_categoria": {"A": 1.0, "B": 1.0, "C": 0.7, "D": 0.5},
            "stock_minimo_por_categoria": {"A": 1.5, "B": 1.0}
        }"#;
        let config: Configuracion = serde_json::from_str(json).unwrap();
        assert!(config.validar().is_ok());
        assert_eq!(config.cobertura().semanas(CategoriaAbc::B), Some(1.0));
        assert_eq!(config.cobertura().semanas(CategoriaAbc::C), None);
    }

    #[test]
    fn test_fichero_inexistente() {
        let err = Configuracion::desde_fichero("/ruta/que/no/existe.json").unwrap_err();
        assert!(matches!(err, ErrorConfiguracion::FicheroNoEncontrado(_)));
    }
}
