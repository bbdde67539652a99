// ==========================================
// Sistema de Pedidos Vivero - Tipos de dominio
// ==========================================
// Clasificación ABC+D, secciones de la tienda y
// período de análisis.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Categoría ABC+D
// ==========================================
// A = 80% del beneficio acumulado, B = siguiente 15%,
// C = resto, D = sin ventas en el período.
// El orden A < B < C < D sostiene la propiedad de monotonía.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoriaAbc {
    A, // Básicos
    B, // Complemento
    C, // Bajo impacto
    D, // Sin ventas
}

impl CategoriaAbc {
    /// Convierte desde la letra usada en ficheros externos
    pub fn desde_letra(letra: &str) -> Option<Self> {
        match letra.trim().to_uppercase().as_str() {
            "A" => Some(CategoriaAbc::A),
            "B" => Some(CategoriaAbc::B),
            "C" => Some(CategoriaAbc::C),
            "D" => Some(CategoriaAbc::D),
            _ => None,
        }
    }
}

impl fmt::Display for CategoriaAbc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoriaAbc::A => write!(f, "A"),
            CategoriaAbc::B => write!(f, "B"),
            CategoriaAbc::C => write!(f, "C"),
            CategoriaAbc::D => write!(f, "D"),
        }
    }
}

// ==========================================
// Secciones de la tienda
// ==========================================
// Derivadas del prefijo del código de artículo, nunca
// declaradas manualmente. Serialización: SCREAMING_SNAKE_CASE
// (consistente con los ficheros de salida).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Seccion {
    Interior,              // Plantas de interior (prefijo 1)
    MascotasVivo,          // Animales vivos (subfamilias concretas de 2)
    MascotasManufacturado, // Resto de mascotas (prefijo 2)
    TierraAridos,          // Tierras y áridos (31, 32)
    Fitos,                 // Fitosanitarios y abonos (33-39)
    UtilesJardin,          // Útiles de jardín (prefijo 4)
    Semillas,              // Semillas y bulbos (prefijo 5)
    DecoInterior,          // Decoración interior (prefijo 6)
    Maf,                   // Planta de temporada y floristería (prefijo 7)
    Vivero,                // Vivero y plantas exterior (prefijo 8)
    DecoExterior,          // Decoración exterior (prefijo 9)
}

impl Seccion {
    /// Todas las secciones, en el orden de proceso habitual
    pub fn todas() -> &'static [Seccion] {
        &[
            Seccion::Interior,
            Seccion::MascotasVivo,
            Seccion::MascotasManufacturado,
            Seccion::TierraAridos,
            Seccion::Fitos,
            Seccion::UtilesJardin,
            Seccion::Semillas,
            Seccion::DecoInterior,
            Seccion::Maf,
            Seccion::Vivero,
            Seccion::DecoExterior,
        ]
    }

    /// Descripción legible de la sección
    pub fn descripcion(&self) -> &'static str {
        match self {
            Seccion::Interior => "Plantas de interior",
            Seccion::MascotasVivo => "Mascotas (animales vivos)",
            Seccion::MascotasManufacturado => "Mascotas (productos manufacturados)",
            Seccion::TierraAridos => "Tierras y áridos",
            Seccion::Fitos => "Fitosanitarios y abonos",
            Seccion::UtilesJardin => "Útiles de jardín",
            Seccion::Semillas => "Semillas y bulbos",
            Seccion::DecoInterior => "Decoración interior",
            Seccion::Maf => "Planta de temporada y floristería",
            Seccion::Vivero => "Vivero y plantas exterior",
            Seccion::DecoExterior => "Decoración exterior",
        }
    }
}

impl fmt::Display for Seccion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seccion::Interior => write!(f, "interior"),
            Seccion::MascotasVivo => write!(f, "mascotas_vivo"),
            Seccion::MascotasManufacturado => write!(f, "mascotas_manufacturado"),
            Seccion::TierraAridos => write!(f, "tierra_aridos"),
            Seccion::Fitos => write!(f, "fitos"),
            Seccion::UtilesJardin => write!(f, "utiles_jardin"),
            Seccion::Semillas => write!(f, "semillas"),
            Seccion::DecoInterior => write!(f, "deco_interior"),
            Seccion::Maf => write!(f, "maf"),
            Seccion::Vivero => write!(f, "vivero"),
            Seccion::DecoExterior => write!(f, "deco_exterior"),
        }
    }
}

// ==========================================
// Nivel de riesgo de merma / inmovilizado
// ==========================================
// Señal auxiliar para la acción sugerida del clasificador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NivelRiesgo {
    Cero,    // Sin stock final
    Bajo,    // Rotación consumida <= 65%
    Medio,   // Rotación consumida <= 100%
    Alto,    // Rotación consumida <= 150%
    Critico, // Rotación consumida > 150%, o sin ventas con stock
}

impl fmt::Display for NivelRiesgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NivelRiesgo::Cero => write!(f, "CERO"),
            NivelRiesgo::Bajo => write!(f, "BAJO"),
            NivelRiesgo::Medio => write!(f, "MEDIO"),
            NivelRiesgo::Alto => write!(f, "ALTO"),
            NivelRiesgo::Critico => write!(f, "CRITICO"),
        }
    }
}

// ==========================================
// Período de análisis
// ==========================================
// Los límites son fijos y los aporta el llamante; nunca se
// infieren del reloj del sistema (reproducibilidad).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodoAnalisis {
    /// Índice del período (1-4)
    pub indice: u8,
    /// Fecha de inicio (inclusive)
    pub fecha_inicio: NaiveDate,
    /// Fecha de fin (inclusive)
    pub fecha_fin: NaiveDate,
}

impl PeriodoAnalisis {
    /// Construye el período estándar `indice` (1-4) del año `anio`.
    ///
    /// Calendario comercial fijo:
    /// - P1: 1 ene - 28/29 feb
    /// - P2: 1 mar - 31 may
    /// - P3: 1 jun - 31 ago
    /// - P4: 1 sep - 31 dic
    ///
    /// # Retorno
    /// - None si `indice` no está en 1-4
    pub fn estandar(anio: i32, indice: u8) -> Option<Self> {
        let (inicio, fin) = match indice {
            1 => {
                let fin = NaiveDate::from_ymd_opt(anio, 2, 29)
                    .or_else(|| NaiveDate::from_ymd_opt(anio, 2, 28))?;
                (NaiveDate::from_ymd_opt(anio, 1, 1)?, fin)
            }
            2 => (
                NaiveDate::from_ymd_opt(anio, 3, 1)?,
                NaiveDate::from_ymd_opt(anio, 5, 31)?,
            ),
            3 => (
                NaiveDate::from_ymd_opt(anio, 6, 1)?,
                NaiveDate::from_ymd_opt(anio, 8, 31)?,
            ),
            4 => (
                NaiveDate::from_ymd_opt(anio, 9, 1)?,
                NaiveDate::from_ymd_opt(anio, 12, 31)?,
            ),
            _ => return None,
        };

        Some(Self {
            indice,
            fecha_inicio: inicio,
            fecha_fin: fin,
        })
    }

    /// Duración del período en días (ambos extremos incluidos)
    pub fn dias(&self) -> i64 {
        (self.fecha_fin - self.fecha_inicio).num_days() + 1
    }

    /// ¿Cae la fecha dentro del período?
    pub fn contiene(&self, fecha: NaiveDate) -> bool {
        fecha >= self.fecha_inicio && fecha <= self.fecha_fin
    }
}
