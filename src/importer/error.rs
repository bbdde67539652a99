// ==========================================
// Sistema de Pedidos Vivero - Errores de importación
// ==========================================

use thiserror::Error;

/// Errores de la capa de importación de ficheros del ERP
#[derive(Error, Debug)]
pub enum ErrorImportacion {
    // ===== Errores de fichero =====
    #[error("Fichero no encontrado: {0}")]
    FicheroNoEncontrado(String),

    #[error("Formato de fichero no soportado: {0} (solo .xlsx/.xls/.csv)")]
    FormatoNoSoportado(String),

    #[error("Fallo de lectura del fichero: {0}")]
    LecturaFichero(String),

    #[error("Fallo al parsear Excel: {0}")]
    ParseoExcel(String),

    #[error("Fallo al parsear CSV: {0}")]
    ParseoCsv(String),

    // ===== Errores de mapeo de datos =====
    #[error("Columna obligatoria ausente: {0}")]
    ColumnaAusente(&'static str),

    #[error("Conversión de tipo fallida (fila {fila}, campo {campo}): {valor}")]
    ConversionTipo {
        fila: usize,
        campo: &'static str,
        valor: String,
    },

    #[error("Formato de fecha inválido (fila {fila}): se espera YYYYMMDD o DD/MM/YYYY, recibido {valor}")]
    FormatoFecha { fila: usize, valor: String },

    // ===== Otros =====
    #[error(transparent)]
    Otro(#[from] anyhow::Error),
}

impl From<std::io::Error> for ErrorImportacion {
    fn from(err: std::io::Error) -> Self {
        ErrorImportacion::LecturaFichero(err.to_string())
    }
}

impl From<csv::Error> for ErrorImportacion {
    fn from(err: csv::Error) -> Self {
        ErrorImportacion::ParseoCsv(err.to_string())
    }
}

impl From<calamine::XlsxError> for ErrorImportacion {
    fn from(err: calamine::XlsxError) -> Self {
        ErrorImportacion::ParseoExcel(err.to_string())
    }
}

/// Alias de resultado de la capa de importación
pub type ResultadoImportacion<T> = Result<T, ErrorImportacion>;
