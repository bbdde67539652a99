// ==========================================
// Sistema de Pedidos Vivero - Registros normalizados
// ==========================================
// Hechos inmutables que entran en cada ejecución, ya
// normalizados por la capa de importación. El núcleo nunca
// los muta.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registro de venta (una línea de la exportación de ventas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroVenta {
    pub codigo_articulo: String,
    pub fecha: NaiveDate,
    pub unidades: f64,
    /// Importe total de la línea (€)
    pub importe: f64,
}

/// Registro de compra (una línea de la exportación de compras)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroCompra {
    pub codigo_articulo: String,
    pub fecha: NaiveDate,
    pub unidades: f64,
    /// Precio unitario de compra (€)
    pub precio_unitario: f64,
}

/// Instantánea de stock de un artículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStock {
    pub codigo_articulo: String,
    pub unidades: f64,
    pub fecha: NaiveDate,
}

/// Coste unitario de un artículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroCoste {
    pub codigo_articulo: String,
    pub coste_unitario: f64,
}

/// Instantánea más reciente de un artículo.
///
/// Con varias instantáneas fechadas del mismo código (cargas de
/// stock re-exportadas) prevalece la de fecha mayor; a igualdad
/// de fecha, la última del fichero.
pub fn stock_mas_reciente<'a>(
    snapshots: &'a [SnapshotStock],
    codigo: &str,
) -> Option<&'a SnapshotStock> {
    snapshots
        .iter()
        .filter(|s| s.codigo_articulo == codigo)
        .max_by_key(|s| s.fecha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(codigo: &str, fecha: NaiveDate, unidades: f64) -> SnapshotStock {
        SnapshotStock {
            codigo_articulo: codigo.to_string(),
            unidades,
            fecha,
        }
    }

    #[test]
    fn test_stock_mas_reciente_prevalece_por_fecha() {
        let snapshots = vec![
            snapshot("8012345678", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 500.0),
            snapshot("8099999999", NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(), 3.0),
            snapshot("8012345678", NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(), 10.0),
        ];

        let reciente = stock_mas_reciente(&snapshots, "8012345678").unwrap();
        assert_eq!(reciente.unidades, 10.0);
        assert!(stock_mas_reciente(&snapshots, "8000000000").is_none());
    }

    #[test]
    fn test_stock_mas_reciente_empate_ultimo_registro() {
        let fecha = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
        let snapshots = vec![
            snapshot("8012345678", fecha, 40.0),
            snapshot("8012345678", fecha, 25.0),
        ];

        let reciente = stock_mas_reciente(&snapshots, "8012345678").unwrap();
        assert_eq!(reciente.unidades, 25.0);
    }
}
