// ==========================================
// Sistema de Pedidos Vivero - Escenarios de corrección
// ==========================================
// Clasificación del artículo en tres ejes independientes:
// ventas vs objetivo, compras vs sugerido y stock vs mínimo.
// 3 x 3 x 3 = 27 combinaciones, todas representables; la tabla
// de descripciones es un match exhaustivo, sin códigos sin mapear.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerancia para la comparación de igualdad entre magnitudes en unidades
const EPSILON_UNIDADES: f64 = 1e-9;

// ==========================================
// Eje de ventas: reales vs objetivo
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EjeVentas {
    Superior, // reales > objetivo
    Igual,    // reales == objetivo
    Inferior, // reales < objetivo
}

impl EjeVentas {
    pub fn comparar(reales: f64, objetivo: f64) -> Self {
        if (reales - objetivo).abs() <= EPSILON_UNIDADES {
            EjeVentas::Igual
        } else if reales > objetivo {
            EjeVentas::Superior
        } else {
            EjeVentas::Inferior
        }
    }

    /// Prefijo de tres letras del código de escenario
    pub fn codigo(&self) -> &'static str {
        match self {
            EjeVentas::Superior => "SUP",
            EjeVentas::Igual => "IGU",
            EjeVentas::Inferior => "INF",
        }
    }
}

// ==========================================
// Eje de compras: recibidas vs sugeridas
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EjeCompras {
    Exceso,  // recibidas > sugeridas
    Igual,   // recibidas == sugeridas
    Defecto, // recibidas < sugeridas
}

impl EjeCompras {
    pub fn comparar(recibidas: f64, sugeridas: f64) -> Self {
        if (recibidas - sugeridas).abs() <= EPSILON_UNIDADES {
            EjeCompras::Igual
        } else if recibidas > sugeridas {
            EjeCompras::Exceso
        } else {
            EjeCompras::Defecto
        }
    }

    pub fn codigo(&self) -> &'static str {
        match self {
            EjeCompras::Exceso => "EXC",
            EjeCompras::Igual => "IGU",
            EjeCompras::Defecto => "DEF",
        }
    }
}

// ==========================================
// Eje de stock: real vs mínimo objetivo
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EjeStock {
    Excedente, // real > mínimo
    Optimo,    // real == mínimo
    Deficit,   // real < mínimo
}

impl EjeStock {
    pub fn comparar(real: f64, minimo: f64) -> Self {
        if (real - minimo).abs() <= EPSILON_UNIDADES {
            EjeStock::Optimo
        } else if real > minimo {
            EjeStock::Excedente
        } else {
            EjeStock::Deficit
        }
    }

    pub fn codigo(&self) -> &'static str {
        match self {
            EjeStock::Excedente => "EXC",
            EjeStock::Optimo => "OPT",
            EjeStock::Deficit => "DEF",
        }
    }
}

// ==========================================
// Escenario - combinación de los tres ejes
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Escenario {
    pub ventas: EjeVentas,
    pub compras: EjeCompras,
    pub stock: EjeStock,
}

impl Escenario {
    /// Detecta el escenario de un artículo a partir de las magnitudes
    /// observadas. Función pura: mismas entradas, mismo escenario.
    pub fn detectar(
        ventas_reales: f64,
        ventas_objetivo: f64,
        compras_recibidas: f64,
        compras_sugeridas: f64,
        stock_real: f64,
        stock_minimo: f64,
    ) -> Self {
        Self {
            ventas: EjeVentas::comparar(ventas_reales, ventas_objetivo),
            compras: EjeCompras::comparar(compras_recibidas, compras_sugeridas),
            stock: EjeStock::comparar(stock_real, stock_minimo),
        }
    }

    /// Código de tres partes, p. ej. "SUP_IGU_DEF"
    pub fn codigo(&self) -> String {
        format!(
            "{}_{}_{}",
            self.ventas.codigo(),
            self.compras.codigo(),
            self.stock.codigo()
        )
    }

    /// ¿El escenario requiere corrección del pedido teórico?
    ///
    /// Todo desvío del stock respecto al mínimo la requiere.
    pub fn requiere_correccion(&self) -> bool {
        self.stock != EjeStock::Optimo
    }

    /// Descripción legible del escenario.
    ///
    /// Match exhaustivo sobre las 27 combinaciones: el compilador
    /// garantiza que no existen códigos sin descripción.
    pub fn descripcion(&self) -> &'static str {
        use EjeCompras as C;
        use EjeStock as S;
        use EjeVentas as V;

        match (self.ventas, self.compras, self.stock) {
            (V::Superior, C::Exceso, S::Deficit) => {
                "Ventas altas y exceso de compras generaron déficit de stock"
            }
            (V::Superior, C::Exceso, S::Optimo) => "Ventas altas compensaron el exceso de compras",
            (V::Superior, C::Exceso, S::Excedente) => {
                "Exceso de compras con ventas altas pero aún hay excedente"
            }
            (V::Superior, C::Igual, S::Deficit) => {
                "Ventas altas sin compras adicionales generaron déficit"
            }
            (V::Superior, C::Igual, S::Optimo) => {
                "Ventas altas compensadas exactamente por las compras"
            }
            (V::Superior, C::Igual, S::Excedente) => {
                "Ventas altas pero insuficientes para compensar las compras"
            }
            (V::Superior, C::Defecto, S::Deficit) => {
                "Ventas altas con pocas compras: déficit crítico"
            }
            (V::Superior, C::Defecto, S::Optimo) => {
                "Ventas altas pero compras justas mantienen stock óptimo"
            }
            (V::Superior, C::Defecto, S::Excedente) => {
                "Ventas altas con compras insuficientes pero aún queda excedente"
            }
            (V::Igual, C::Exceso, S::Deficit) => {
                "Exceso de compras con ventas al objetivo pero stock en déficit"
            }
            (V::Igual, C::Exceso, S::Optimo) => {
                "Exceso de compras absorbido exactamente por las ventas"
            }
            (V::Igual, C::Exceso, S::Excedente) => {
                "Exceso de compras con ventas al objetivo generó excedente"
            }
            (V::Igual, C::Igual, S::Deficit) => {
                "Ventas y compras según lo previsto pero stock insuficiente"
            }
            (V::Igual, C::Igual, S::Optimo) => {
                "Ventas y compras según lo previsto con stock óptimo"
            }
            (V::Igual, C::Igual, S::Excedente) => {
                "Ventas y compras según lo previsto pero con stock excedente"
            }
            (V::Igual, C::Defecto, S::Deficit) => "Compras insuficientes provocaron déficit de stock",
            (V::Igual, C::Defecto, S::Optimo) => {
                "Compras insuficientes pero las ventas mantienen el stock óptimo"
            }
            (V::Igual, C::Defecto, S::Excedente) => {
                "Compras insuficientes y aun así queda stock excedente"
            }
            (V::Inferior, C::Exceso, S::Deficit) => {
                "Ventas bajas y exceso de compras con stock aún en déficit"
            }
            (V::Inferior, C::Exceso, S::Optimo) => {
                "Ventas bajas con exceso de compras mantienen el stock justo"
            }
            (V::Inferior, C::Exceso, S::Excedente) => {
                "Ventas bajas y exceso de compras generaron excedente"
            }
            (V::Inferior, C::Igual, S::Deficit) => {
                "Ventas bajas sin compras adicionales y stock insuficiente"
            }
            (V::Inferior, C::Igual, S::Optimo) => {
                "Ventas bajas pero las compras mantienen el stock justo"
            }
            (V::Inferior, C::Igual, S::Excedente) => {
                "Ventas bajas sin ajuste de compras generaron excedente"
            }
            (V::Inferior, C::Defecto, S::Deficit) => {
                "Ventas bajas y compras insuficientes: stock muy por debajo del mínimo"
            }
            (V::Inferior, C::Defecto, S::Optimo) => {
                "Ventas bajas y compras insuficientes pero stock todavía óptimo"
            }
            (V::Inferior, C::Defecto, S::Excedente) => {
                "Ventas bajas y compras insuficientes pero aún queda excedente"
            }
        }
    }
}

impl fmt::Display for Escenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codigo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codigo_tres_partes() {
        let esc = Escenario::detectar(150.0, 100.0, 10.0, 10.0, 5.0, 20.0);
        assert_eq!(esc.codigo(), "SUP_IGU_DEF");
    }

    #[test]
    fn test_deteccion_determinista() {
        // Función pura: mismas entradas, mismo escenario
        let a = Escenario::detectar(30.0, 20.0, 15.0, 10.0, 25.0, 20.0);
        let b = Escenario::detectar(30.0, 20.0, 15.0, 10.0, 25.0, 20.0);
        assert_eq!(a, b);
        assert_eq!(a.codigo(), "SUP_EXC_EXC");
    }

    #[test]
    fn test_igualdad_exacta() {
        let esc = Escenario::detectar(20.0, 20.0, 10.0, 10.0, 15.0, 15.0);
        assert_eq!(esc.ventas, EjeVentas::Igual);
        assert_eq!(esc.compras, EjeCompras::Igual);
        assert_eq!(esc.stock, EjeStock::Optimo);
        assert_eq!(esc.codigo(), "IGU_IGU_OPT");
        assert!(!esc.requiere_correccion());
    }

    #[test]
    fn test_todas_las_combinaciones_tienen_descripcion() {
        let ventas = [EjeVentas::Superior, EjeVentas::Igual, EjeVentas::Inferior];
        let compras = [EjeCompras::Exceso, EjeCompras::Igual, EjeCompras::Defecto];
        let stocks = [EjeStock::Excedente, EjeStock::Optimo, EjeStock::Deficit];

        let mut codigos = std::collections::HashSet::new();
        for v in ventas {
            for c in compras {
                for s in stocks {
                    let esc = Escenario {
                        ventas: v,
                        compras: c,
                        stock: s,
                    };
                    assert!(!esc.descripcion().is_empty());
                    codigos.insert(esc.codigo());
                }
            }
        }
        // 27 códigos distintos
        assert_eq!(codigos.len(), 27);
    }
}
