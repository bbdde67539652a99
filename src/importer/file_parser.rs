// ==========================================
// Sistema de Pedidos Vivero - Parseo de ficheros del ERP
// ==========================================
// Soporta: Excel (.xlsx/.xls) / CSV (.csv)
// Cada fila se devuelve como mapa cabecera -> valor; la
// conversión a tipos es responsabilidad del normalizador.
// ==========================================

use crate::importer::error::{ErrorImportacion, ResultadoImportacion};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Parser de un formato concreto a filas crudas
pub trait ParserFichero {
    fn parsear(&self, ruta: &Path) -> ResultadoImportacion<Vec<HashMap<String, String>>>;
}

// ==========================================
// Parser CSV
// ==========================================
pub struct CsvParser;

impl ParserFichero for CsvParser {
    fn parsear(&self, ruta: &Path) -> ResultadoImportacion<Vec<HashMap<String, String>>> {
        if !ruta.exists() {
            return Err(ErrorImportacion::FicheroNoEncontrado(
                ruta.display().to_string(),
            ));
        }

        let fichero = File::open(ruta)?;
        let mut lector = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // filas de longitud desigual permitidas
            .from_reader(fichero);

        let cabeceras: Vec<String> = lector
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut filas = Vec::new();
        for resultado in lector.records() {
            let registro = resultado?;
            let mut fila = HashMap::new();

            for (columna, valor) in registro.iter().enumerate() {
                if let Some(cabecera) = cabeceras.get(columna) {
                    fila.insert(cabecera.clone(), valor.trim().to_string());
                }
            }

            // Filas completamente vacías se ignoran
            if fila.values().all(|v| v.is_empty()) {
                continue;
            }

            filas.push(fila);
        }

        Ok(filas)
    }
}

// ==========================================
// Parser Excel
// ==========================================
pub struct ExcelParser;

impl ParserFichero for ExcelParser {
    fn parsear(&self, ruta: &Path) -> ResultadoImportacion<Vec<HashMap<String, String>>> {
        if !ruta.exists() {
            return Err(ErrorImportacion::FicheroNoEncontrado(
                ruta.display().to_string(),
            ));
        }

        let mut libro: Xlsx<_> = open_workbook(ruta)?;

        // Primera hoja del libro
        let hojas = libro.sheet_names();
        if hojas.is_empty() {
            return Err(ErrorImportacion::ParseoExcel(
                "El fichero Excel no tiene hojas".to_string(),
            ));
        }

        let hoja = hojas[0].clone();
        let rango = libro
            .worksheet_range(&hoja)
            .map_err(|e| ErrorImportacion::ParseoExcel(e.to_string()))?;

        let mut filas_excel = rango.rows();
        let fila_cabecera = filas_excel.next().ok_or_else(|| {
            ErrorImportacion::ParseoExcel("El fichero Excel no tiene filas".to_string())
        })?;

        let cabeceras: Vec<String> = fila_cabecera
            .iter()
            .map(|celda| celda.to_string().trim().to_string())
            .collect();

        let mut filas = Vec::new();
        for fila_datos in filas_excel {
            let mut fila = HashMap::new();

            for (columna, celda) in fila_datos.iter().enumerate() {
                if let Some(cabecera) = cabeceras.get(columna) {
                    fila.insert(cabecera.clone(), celda.to_string().trim().to_string());
                }
            }

            if fila.values().all(|v| v.is_empty()) {
                continue;
            }

            filas.push(fila);
        }

        Ok(filas)
    }
}

// ==========================================
// Parser universal (elige por extensión)
// ==========================================
pub struct ParserUniversal;

impl ParserUniversal {
    pub fn parsear<P: AsRef<Path>>(
        &self,
        ruta: P,
    ) -> ResultadoImportacion<Vec<HashMap<String, String>>> {
        let ruta = ruta.as_ref();
        let extension = ruta
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => CsvParser.parsear(ruta),
            "xlsx" | "xls" => ExcelParser.parsear(ruta),
            _ => Err(ErrorImportacion::FormatoNoSoportado(extension)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_temporal(contenido: &str) -> NamedTempFile {
        let mut fichero = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write!(fichero, "{contenido}").unwrap();
        fichero
    }

    #[test]
    fn test_csv_valido() {
        let fichero = csv_temporal("Articulo,Unidades,Importe\n8012345678,2,24.0\n8098765432,1,8.5\n");

        let filas = CsvParser.parsear(fichero.path()).unwrap();
        assert_eq!(filas.len(), 2);
        assert_eq!(filas[0].get("Articulo"), Some(&"8012345678".to_string()));
        assert_eq!(filas[0].get("Unidades"), Some(&"2".to_string()));
    }

    #[test]
    fn test_csv_inexistente() {
        let resultado = CsvParser.parsear(Path::new("no_existe.csv"));
        assert!(matches!(
            resultado,
            Err(ErrorImportacion::FicheroNoEncontrado(_))
        ));
    }

    #[test]
    fn test_csv_ignora_filas_vacias() {
        let fichero = csv_temporal("Articulo,Unidades\n8012345678,2\n,\n8098765432,1\n");

        let filas = CsvParser.parsear(fichero.path()).unwrap();
        assert_eq!(filas.len(), 2);
    }

    #[test]
    fn test_extension_no_soportada() {
        let resultado = ParserUniversal.parsear("datos.pdf");
        assert!(matches!(
            resultado,
            Err(ErrorImportacion::FormatoNoSoportado(_))
        ));
    }
}
