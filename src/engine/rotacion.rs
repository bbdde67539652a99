// ==========================================
// Sistema de Pedidos Vivero - Tabla de rotaciones por familia
// ==========================================
// Cada familia de artículo tiene una rotación esperada en días
// (días para agotar el stock completo). La rotación determina
// los multiplicadores de stock mínimo y máximo sobre las ventas
// medias diarias.
// ==========================================

use tracing::debug;

/// Rotación por defecto cuando la familia no está en la tabla.
/// Cubeta intermedia de 30 días; la sustitución se registra en
/// el log para que quede auditada.
pub const ROTACION_POR_DEFECTO: u32 = 30;

// ==========================================
// Cubeta de rotación
// ==========================================
// Rangos cerrados sobre días de rotación. Los multiplicadores
// se aplican a las ventas medias diarias:
//   7  -> (3.5, 10.5)    30 -> (15, 45)    90 -> (45, 135)
//   15 -> (7.5, 22.5)    60 -> (30, 90)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubetaRotacion {
    pub dias: u32,
    pub multiplicador_minimo: f64,
    pub multiplicador_maximo: f64,
}

impl CubetaRotacion {
    /// Cubeta correspondiente a una rotación en días
    pub fn desde_dias(dias: u32) -> Self {
        let (minimo, maximo) = match dias {
            7 => (3.5, 10.5),
            15 => (7.5, 22.5),
            30 => (15.0, 45.0),
            60 => (30.0, 90.0),
            90 => (45.0, 135.0),
            // Rotaciones no estándar caen en la cubeta de 30 días
            _ => (15.0, 45.0),
        };
        Self {
            dias,
            multiplicador_minimo: minimo,
            multiplicador_maximo: maximo,
        }
    }
}

/// Tabla estática familia -> (nombre, rotación en días).
///
/// Familias de 2 dígitos salvo las de mascotas (4 dígitos,
/// prefijo 2). Fuente: catálogo comercial de la tienda.
const ROTACIONES_FAMILIA: &[(&str, &str, u32)] = &[
    // Plantas
    ("11", "PLANTAS VERDES", 30),
    ("12", "ORQUIDEAS", 15),
    ("13", "PLANTAS DE FLOR", 15),
    ("14", "FLOR CORTADA", 7),
    ("15", "CACTUS", 30),
    ("16", "COMPOSICIONES", 30),
    ("17", "BONSAIS", 30),
    // Mascotas (4 dígitos)
    ("2101", "ALIMENTACION PAJARO", 60),
    ("2102", "JAULAS PAJARO", 60),
    ("2103", "HIGIENE/CUIDADO PAJARO", 60),
    ("2104", "ANIMAL VIVO PAJARO", 30),
    ("2201", "ALIMENTACION PEQUEÑOS MAMIFEROS", 60),
    ("2202", "JAULAS PEQUEÑOS MAMIFEROS", 60),
    ("2203", "HIGIENE/CUIDADO PEQUEÑOS MAMIFEROS", 60),
    ("2204", "ANIMAL VIVO PEQUEÑOS MAMIFEROS", 30),
    ("2301", "ALIMENTACION PERRO", 60),
    ("2302", "CONFORT PERRO", 60),
    ("2303", "CORREAS Y COLLARES PERRO", 60),
    ("2304", "HIGIENE/CUIDADO PERRO", 60),
    ("2305", "ANIMAL VIVO PERRO", 30),
    ("2401", "ALIMENTACION GATO", 60),
    ("2402", "CONFORT GATO", 60),
    ("2403", "CORREAS Y COLLARES GATO", 60),
    ("2404", "HIGIENE/CUIDADO GATO", 60),
    ("2405", "ANIMAL VIVO GATO", 30),
    ("2501", "ALIMENTACION ANIMALES DE GRANJA", 60),
    ("2502", "HABITAT / ACCES ANIMALES DE GRANJA", 60),
    ("2503", "HIGIENE/CUIDADO ANIMALES DE GRANJA", 60),
    ("2504", "ANIMAL VIVO GRANJA", 30),
    ("2601", "ALIMENTACION REPTILES", 60),
    ("2602", "TERRARIO REPTILES", 60),
    ("2603", "ACCESORIOS REPTILES", 60),
    ("2604", "DECO INERTE REPTILES", 60),
    ("2605", "HIGIENE/CUIDADO REPTILES", 60),
    ("2606", "ANIMAL VIVO REPTILES", 30),
    ("2701", "ALIMENTACION ACUARIOFILIA", 60),
    ("2702", "ACUARIOS", 60),
    ("2703", "ACCESORIOS ACUARIOFILIA", 60),
    ("2704", "DECO INERTE ACUARIOFILIA", 60),
    ("2705", "PLANTA ACUATICA DECORACION ACUARIOFILIA", 15),
    ("2706", "HIGIENE/CUIDADO ACUARIOFILIA", 60),
    ("2707", "PECES AGUA CALIENTE ACUARIOFILIA", 15),
    ("2708", "PECES AGUA FRIA ACUARIOFILIA", 15),
    ("2709", "AGUA OSMOSIS ACUARIOFILIA", 60),
    ("2801", "ALIMENTACION JARDIN ACUATICO", 60),
    ("2802", "ACCESORIOS JARDIN ACUATICO", 60),
    ("2803", "HIGIENE/CUIDADO JARDIN ACUATICO", 60),
    ("2804", "DECORACION JARDIN ACUATICO", 60),
    ("2805", "PLANTAS JARDIN ACUATICO", 30),
    ("2806", "PECES JARDIN ACUATICO", 15),
    ("2906", "INSECTO VIVO", 15),
    // Mantenimiento / tratamiento / cuidados
    ("31", "TIERRAS", 90),
    ("32", "MANTENIMIENTO", 90),
    ("33", "ABONOS", 90),
    ("34", "ABONO NATURAL", 90),
    ("35", "FITOSANITARIOS", 90),
    ("36", "FITOSANITARIO NATURAL", 90),
    ("37", "HERBICIDAS", 90),
    ("39", "ANTI-PLAGAS", 90),
    // Útiles de jardín
    ("41", "UTILES JARDIN", 90),
    ("42", "PODA", 90),
    ("43", "PULVERIZACION", 90),
    ("44", "PROTECCION CULTIVO", 90),
    ("45", "PROTECCION PERSONAL", 90),
    ("46", "RIEGO", 90),
    ("48", "OTRAS MAQUINAS MOTOR", 90),
    ("49", "ACCESS/PIEZAS", 90),
    // Semillas
    ("51", "BULBOS DE FLOR", 60),
    ("53", "CESPED", 60),
    ("54", "SEMILLAS", 60),
    // Decoración casa
    ("61", "DECORACION NAVIDAD", 90),
    ("62", "DECORACION FLORAL", 90),
    ("63", "RECIPIENTES", 90),
    ("64", "DECORACION AMBIENTE", 90),
    ("65", "LIB/PAP/SON/IMAG.", 90),
    // Planta de temporada
    ("71", "PLANTAS PARA MACIZOS EN BDJA.", 15),
    ("72", "PLANTAS PARA MACIZOS EN MAC.", 15),
    ("74", "VIVACES EN MACETA", 15),
    ("75", "PLANTAS TRADICIONALES", 15),
    ("77", "PELARGONIUM EN MACETA", 15),
    ("78", "AROMATICAS", 15),
    ("79", "FRESALES/HORTICOLAS", 15),
    // Vivero
    ("80", "VIVERO GENERAL", 60),
    ("81", "ARBOLES/ARBUSTOS DECO", 30),
    ("82", "CONIFERAS", 30),
    ("83", "ROSALES", 30),
    ("84", "FRUTALES", 30),
    ("85", "PLANTAS TIERRA DE BREZO", 30),
    ("86", "PLANTAS PARA SETOS", 30),
    ("87", "PLANTAS TREPADORAS", 30),
    ("88", "PLANTAS CLIMA MEDITERRANEO", 30),
    ("89", "ABETOS NAVIDAD", 30),
    // Decoración exterior
    ("91", "MOBILIARIO JARDIN", 90),
    ("92", "EQUIP. JARDIN", 90),
    ("93", "AIRE LIBRE", 90),
    ("94", "MACETERIA/SOPORTES", 90),
    ("95", "DECORACION", 90),
    ("96", "COBERTIZOS", 90),
    ("97", "CERRAMIENTOS/SOMBREO", 90),
];

// ==========================================
// TablaRotaciones
// ==========================================
pub struct TablaRotaciones;

impl TablaRotaciones {
    /// Busca la entrada de una familia.
    ///
    /// # Retorno
    /// - Some((nombre, rotación)) si la familia está catalogada
    pub fn buscar(familia: &str) -> Option<(&'static str, u32)> {
        ROTACIONES_FAMILIA
            .iter()
            .find(|(f, _, _)| *f == familia)
            .map(|(_, nombre, dias)| (*nombre, *dias))
    }

    /// Rotación en días de una familia, con el valor por defecto
    /// documentado para familias no catalogadas.
    pub fn rotacion_dias(familia: &str) -> u32 {
        match Self::buscar(familia) {
            Some((_, dias)) => dias,
            None => {
                debug!(
                    familia = familia,
                    "Familia sin rotación catalogada, se usa la cubeta por defecto de {} días",
                    ROTACION_POR_DEFECTO
                );
                ROTACION_POR_DEFECTO
            }
        }
    }

    /// Cubeta de rotación de una familia (multiplicadores incluidos)
    pub fn cubeta(familia: &str) -> CubetaRotacion {
        CubetaRotacion::desde_dias(Self::rotacion_dias(familia))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_familia_catalogada() {
        let (nombre, dias) = TablaRotaciones::buscar("83").unwrap();
        assert_eq!(nombre, "ROSALES");
        assert_eq!(dias, 30);
    }

    #[test]
    fn test_rotaciones_por_familia() {
        // Vivero general (80) rota a 60 días; las subfamilias 81-89 a 30
        assert_eq!(TablaRotaciones::rotacion_dias("80"), 60);
        assert_eq!(TablaRotaciones::rotacion_dias("81"), 30);
        assert_eq!(TablaRotaciones::rotacion_dias("2301"), 60);
    }

    #[test]
    fn test_familia_desconocida_usa_defecto_30() {
        assert_eq!(TablaRotaciones::rotacion_dias("99"), 30);
        let cubeta = TablaRotaciones::cubeta("99");
        assert_eq!(cubeta.multiplicador_minimo, 15.0);
        assert_eq!(cubeta.multiplicador_maximo, 45.0);
    }

    #[test]
    fn test_multiplicadores_por_cubeta() {
        assert_eq!(CubetaRotacion::desde_dias(7).multiplicador_minimo, 3.5);
        assert_eq!(CubetaRotacion::desde_dias(7).multiplicador_maximo, 10.5);
        assert_eq!(CubetaRotacion::desde_dias(15).multiplicador_minimo, 7.5);
        assert_eq!(CubetaRotacion::desde_dias(15).multiplicador_maximo, 22.5);
        assert_eq!(CubetaRotacion::desde_dias(60).multiplicador_minimo, 30.0);
        assert_eq!(CubetaRotacion::desde_dias(60).multiplicador_maximo, 90.0);
        assert_eq!(CubetaRotacion::desde_dias(90).multiplicador_minimo, 45.0);
        assert_eq!(CubetaRotacion::desde_dias(90).multiplicador_maximo, 135.0);
    }
}
