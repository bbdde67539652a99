// ==========================================
// Sistema de Pedidos Vivero - Capa de importación
// ==========================================
// Resolución de exportaciones del ERP, parseo de ficheros y
// normalización a registros tipados.
// ==========================================

pub mod buscador;
pub mod error;
pub mod file_parser;
pub mod normalizador;

pub use buscador::buscar_ultimo_fichero;
pub use error::{ErrorImportacion, ResultadoImportacion};
pub use file_parser::{CsvParser, ExcelParser, ParserFichero, ParserUniversal};
pub use normalizador::{Normalizador, ResumenNormalizacion};
