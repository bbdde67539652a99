// ==========================================
// Sistema de Pedidos Vivero - Normalizador de datos
// ==========================================
// Convierte las filas crudas del parser en registros tipados.
// Validación por registro: una fila inválida (código corto,
// unidades o fecha ilegibles) se descarta y se contabiliza; la
// importación continúa. La tolerancia de cabeceras cubre las
// variantes de nombre que produce el ERP.
// ==========================================

use crate::domain::articulo::codigo_valido;
use crate::domain::registros::{RegistroCompra, RegistroCoste, RegistroVenta, SnapshotStock};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

type FilaCruda = HashMap<String, String>;

// Variantes de cabecera del ERP para cada campo lógico
const COLUMNAS_CODIGO: &[&str] = &["Codigo_Articulo", "Código artículo", "Codigo", "Articulo"];
const COLUMNAS_UNIDADES: &[&str] = &["Unidades", "Cantidad"];
const COLUMNAS_IMPORTE: &[&str] = &["Importe", "Importe ventas"];
const COLUMNAS_FECHA: &[&str] = &["Fecha", "Fecha_Ultimo_Movimiento"];
const COLUMNAS_PRECIO: &[&str] = &["Precio", "Precio unitario"];
const COLUMNAS_COSTE: &[&str] = &["Coste", "Precio Coste Unitario"];
const COLUMNAS_STOCK: &[&str] = &["Stock_Fisico", "Stock", "Unidades"];
const COLUMNAS_NOMBRE: &[&str] = &["Nombre_Articulo", "Nombre", "Descripcion"];
const COLUMNAS_TALLA: &[&str] = &["Talla"];
const COLUMNAS_COLOR: &[&str] = &["Color"];

// ==========================================
// Resumen de una normalización
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumenNormalizacion {
    pub validos: usize,
    pub descartados: usize,
}

// ==========================================
// Normalizador
// ==========================================
pub struct Normalizador;

impl Normalizador {
    /// Valor de la primera cabecera presente entre las variantes
    fn campo<'a>(fila: &'a FilaCruda, variantes: &[&str]) -> Option<&'a str> {
        variantes
            .iter()
            .find_map(|v| fila.get(*v))
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Fechas del ERP: YYYYMMDD, YYYY-MM-DD o DD/MM/YYYY
    fn parsear_fecha(valor: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(valor, "%Y%m%d")
            .or_else(|_| NaiveDate::parse_from_str(valor, "%Y-%m-%d"))
            .or_else(|_| NaiveDate::parse_from_str(valor, "%d/%m/%Y"))
            .ok()
    }

    /// Números con coma decimal del ERP
    fn parsear_numero(valor: &str) -> Option<f64> {
        valor.replace(',', ".").parse::<f64>().ok()
    }

    /// Extrae el catálogo de artículos de las filas, deduplicado por
    /// código. Las filas con código inválido no aportan identidad.
    pub fn articulos(filas: &[FilaCruda]) -> Vec<crate::domain::articulo::Articulo> {
        let mut vistos = std::collections::HashSet::new();
        let mut catalogo = Vec::new();

        for fila in filas {
            let Some(codigo) = Self::campo(fila, COLUMNAS_CODIGO).filter(|c| codigo_valido(c))
            else {
                continue;
            };
            if !vistos.insert(codigo.to_string()) {
                continue;
            }
            catalogo.push(crate::domain::articulo::Articulo::nuevo(
                codigo,
                Self::campo(fila, COLUMNAS_NOMBRE).unwrap_or(""),
                Self::campo(fila, COLUMNAS_TALLA).unwrap_or(""),
                Self::campo(fila, COLUMNAS_COLOR).unwrap_or(""),
            ));
        }

        catalogo
    }

    /// Normaliza las filas de ventas.
    pub fn ventas(filas: &[FilaCruda]) -> (Vec<RegistroVenta>, ResumenNormalizacion) {
        let mut registros = Vec::with_capacity(filas.len());
        let mut resumen = ResumenNormalizacion::default();

        for (indice, fila) in filas.iter().enumerate() {
            let registro = Self::campo(fila, COLUMNAS_CODIGO)
                .filter(|c| codigo_valido(c))
                .and_then(|codigo| {
                    let fecha = Self::parsear_fecha(Self::campo(fila, COLUMNAS_FECHA)?)?;
                    let unidades = Self::parsear_numero(Self::campo(fila, COLUMNAS_UNIDADES)?)?;
                    let importe = Self::campo(fila, COLUMNAS_IMPORTE)
                        .and_then(Self::parsear_numero)
                        .unwrap_or(0.0);
                    Some(RegistroVenta {
                        codigo_articulo: codigo.to_string(),
                        fecha,
                        unidades,
                        importe,
                    })
                });

            match registro {
                Some(r) => {
                    registros.push(r);
                    resumen.validos += 1;
                }
                None => {
                    warn!(fila = indice + 1, "Venta descartada: código o campos ilegibles");
                    resumen.descartados += 1;
                }
            }
        }

        info!(
            validos = resumen.validos,
            descartados = resumen.descartados,
            "Normalización de ventas"
        );
        (registros, resumen)
    }

    /// Normaliza las filas de compras.
    pub fn compras(filas: &[FilaCruda]) -> (Vec<RegistroCompra>, ResumenNormalizacion) {
        let mut registros = Vec::with_capacity(filas.len());
        let mut resumen = ResumenNormalizacion::default();

        for (indice, fila) in filas.iter().enumerate() {
            let registro = Self::campo(fila, COLUMNAS_CODIGO)
                .filter(|c| codigo_valido(c))
                .and_then(|codigo| {
                    let fecha = Self::parsear_fecha(Self::campo(fila, COLUMNAS_FECHA)?)?;
                    let unidades = Self::parsear_numero(Self::campo(fila, COLUMNAS_UNIDADES)?)?;
                    let precio_unitario = Self::campo(fila, COLUMNAS_PRECIO)
                        .and_then(Self::parsear_numero)
                        .unwrap_or(0.0);
                    Some(RegistroCompra {
                        codigo_articulo: codigo.to_string(),
                        fecha,
                        unidades,
                        precio_unitario,
                    })
                });

            match registro {
                Some(r) => {
                    registros.push(r);
                    resumen.validos += 1;
                }
                None => {
                    warn!(fila = indice + 1, "Compra descartada: código o campos ilegibles");
                    resumen.descartados += 1;
                }
            }
        }

        info!(
            validos = resumen.validos,
            descartados = resumen.descartados,
            "Normalización de compras"
        );
        (registros, resumen)
    }

    /// Normaliza el estado de stock.
    ///
    /// La fecha es opcional en los ficheros de stock; la ausente se
    /// rellena con `fecha_defecto` (normalmente el día de la carga).
    pub fn stock(
        filas: &[FilaCruda],
        fecha_defecto: NaiveDate,
    ) -> (Vec<SnapshotStock>, ResumenNormalizacion) {
        let mut registros = Vec::with_capacity(filas.len());
        let mut resumen = ResumenNormalizacion::default();

        for (indice, fila) in filas.iter().enumerate() {
            let registro = Self::campo(fila, COLUMNAS_CODIGO)
                .filter(|c| codigo_valido(c))
                .and_then(|codigo| {
                    let unidades = Self::parsear_numero(Self::campo(fila, COLUMNAS_STOCK)?)?;
                    let fecha = Self::campo(fila, COLUMNAS_FECHA)
                        .and_then(Self::parsear_fecha)
                        .unwrap_or(fecha_defecto);
                    Some(SnapshotStock {
                        codigo_articulo: codigo.to_string(),
                        unidades,
                        fecha,
                    })
                });

            match registro {
                Some(r) => {
                    registros.push(r);
                    resumen.validos += 1;
                }
                None => {
                    warn!(fila = indice + 1, "Stock descartado: código o unidades ilegibles");
                    resumen.descartados += 1;
                }
            }
        }

        info!(
            validos = resumen.validos,
            descartados = resumen.descartados,
            "Normalización de stock"
        );
        (registros, resumen)
    }

    /// Normaliza los costes unitarios a un mapa código -> coste.
    pub fn costes(filas: &[FilaCruda]) -> (HashMap<String, f64>, ResumenNormalizacion) {
        let mut costes = HashMap::with_capacity(filas.len());
        let mut resumen = ResumenNormalizacion::default();

        for (indice, fila) in filas.iter().enumerate() {
            let registro = Self::campo(fila, COLUMNAS_CODIGO)
                .filter(|c| codigo_valido(c))
                .and_then(|codigo| {
                    let coste_unitario = Self::parsear_numero(Self::campo(fila, COLUMNAS_COSTE)?)?;
                    Some(RegistroCoste {
                        codigo_articulo: codigo.to_string(),
                        coste_unitario,
                    })
                });

            match registro {
                Some(r) => {
                    costes.insert(r.codigo_articulo, r.coste_unitario);
                    resumen.validos += 1;
                }
                None => {
                    warn!(fila = indice + 1, "Coste descartado: código o valor ilegible");
                    resumen.descartados += 1;
                }
            }
        }

        info!(
            validos = resumen.validos,
            descartados = resumen.descartados,
            "Normalización de costes"
        );
        (costes, resumen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fila(pares: &[(&str, &str)]) -> FilaCruda {
        pares
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_venta_valida() {
        let filas = vec![fila(&[
            ("Articulo", "8012345678"),
            ("Fecha", "2024-07-01"),
            ("Unidades", "2"),
            ("Importe", "24,50"),
        ])];

        let (registros, resumen) = Normalizador::ventas(&filas);
        assert_eq!(resumen.validos, 1);
        assert_eq!(registros[0].codigo_articulo, "8012345678");
        assert_eq!(registros[0].importe, 24.5);
        assert_eq!(
            registros[0].fecha,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
    }

    #[test]
    fn test_codigo_corto_descartado() {
        let filas = vec![
            fila(&[("Articulo", "801234"), ("Fecha", "2024-07-01"), ("Unidades", "2")]),
            fila(&[("Articulo", "8012345678"), ("Fecha", "2024-07-01"), ("Unidades", "2")]),
        ];

        let (registros, resumen) = Normalizador::ventas(&filas);
        assert_eq!(resumen.validos, 1);
        assert_eq!(resumen.descartados, 1);
        assert_eq!(registros.len(), 1);
    }

    #[test]
    fn test_fecha_ilegible_descartada() {
        let filas = vec![fila(&[
            ("Articulo", "8012345678"),
            ("Fecha", "siete de julio"),
            ("Unidades", "2"),
        ])];

        let (_, resumen) = Normalizador::ventas(&filas);
        assert_eq!(resumen.descartados, 1);
    }

    #[test]
    fn test_variantes_de_cabecera() {
        // El ERP a veces exporta "Código artículo" y fechas DD/MM/YYYY
        let filas = vec![fila(&[
            ("Código artículo", "8012345678"),
            ("Fecha", "01/07/2024"),
            ("Cantidad", "3"),
        ])];

        let (registros, resumen) = Normalizador::ventas(&filas);
        assert_eq!(resumen.validos, 1);
        assert_eq!(registros[0].unidades, 3.0);
    }

    #[test]
    fn test_stock_sin_fecha_usa_defecto() {
        let hoy = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
        let filas = vec![fila(&[("Articulo", "8012345678"), ("Stock_Fisico", "12")])];

        let (registros, resumen) = Normalizador::stock(&filas, hoy);
        assert_eq!(resumen.validos, 1);
        assert_eq!(registros[0].unidades, 12.0);
        assert_eq!(registros[0].fecha, hoy);
    }

    #[test]
    fn test_catalogo_deduplicado() {
        let filas = vec![
            fila(&[("Articulo", "8012345678"), ("Nombre", "ROSAL"), ("Talla", "M")]),
            fila(&[("Articulo", "8012345678"), ("Nombre", "ROSAL")]),
            fila(&[("Articulo", "corto"), ("Nombre", "INVALIDO")]),
            fila(&[("Articulo", "8098765432"), ("Nombre", "HORTENSIA")]),
        ];

        let catalogo = Normalizador::articulos(&filas);
        assert_eq!(catalogo.len(), 2);
        assert_eq!(catalogo[0].codigo, "8012345678");
        assert_eq!(catalogo[0].talla, "M");
        assert_eq!(catalogo[1].nombre, "HORTENSIA");
    }

    #[test]
    fn test_costes_a_mapa() {
        let filas = vec![
            fila(&[("Articulo", "8012345678"), ("Coste", "6,00")]),
            fila(&[("Articulo", "8098765432"), ("Coste", "abc")]),
        ];

        let (costes, resumen) = Normalizador::costes(&filas);
        assert_eq!(resumen.validos, 1);
        assert_eq!(resumen.descartados, 1);
        assert_eq!(costes.get("8012345678"), Some(&6.0));
    }
}
