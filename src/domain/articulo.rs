// ==========================================
// Sistema de Pedidos Vivero - Artículo
// ==========================================
// Identidad inmutable del artículo. La familia y la sección
// se derivan del prefijo del código; nunca se editan a mano.
// ==========================================

use crate::domain::types::Seccion;
use serde::{Deserialize, Serialize};

/// Subfamilias de animales vivos (tratamiento especial dentro de la sección 2)
pub const SUBFAMILIAS_MASCOTAS_VIVO: &[&str] = &[
    "2104", "2204", "2305", "2405", "2504", "2606", "2705", "2707", "2708", "2805", "2806", "2906",
];

/// Longitud mínima de un código de artículo válido
pub const LONGITUD_MINIMA_CODIGO: usize = 10;

// ==========================================
// Articulo - identidad del artículo
// ==========================================
// Creado por la normalización de entrada; el núcleo nunca lo muta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Articulo {
    /// Código del artículo (>= 10 dígitos para ser válido)
    pub codigo: String,
    /// Nombre del artículo
    pub nombre: String,
    /// Talla (vacía si no aplica)
    #[serde(default)]
    pub talla: String,
    /// Color (vacío si no aplica)
    #[serde(default)]
    pub color: String,
}

impl Articulo {
    pub fn nuevo(codigo: &str, nombre: &str, talla: &str, color: &str) -> Self {
        Self {
            codigo: codigo.trim().to_string(),
            nombre: nombre.trim().to_string(),
            talla: talla.trim().to_string(),
            color: color.trim().to_string(),
        }
    }

    /// Validez del código: al menos 10 dígitos.
    ///
    /// Regla crítica del sistema: tiene prioridad sobre cualquier
    /// otra regla de derivación.
    pub fn codigo_valido(&self) -> bool {
        codigo_valido(&self.codigo)
    }

    /// Código de familia derivado del prefijo.
    ///
    /// 4 dígitos para la sección de mascotas (códigos que empiezan
    /// por 2), 2 dígitos para el resto.
    pub fn familia(&self) -> &str {
        familia_de_codigo(&self.codigo)
    }

    /// Sección derivada del prefijo del código.
    ///
    /// # Retorno
    /// - None si el código no es válido o no encaja en ninguna sección
    pub fn seccion(&self) -> Option<Seccion> {
        seccion_de_codigo(&self.codigo)
    }
}

/// ¿Es válido un código de artículo? (>= 10 dígitos, todo numérico)
pub fn codigo_valido(codigo: &str) -> bool {
    let codigo = codigo.trim();
    codigo.len() >= LONGITUD_MINIMA_CODIGO && codigo.chars().all(|c| c.is_ascii_digit())
}

/// Prefijo de familia de un código (sin validar longitud total)
pub fn familia_de_codigo(codigo: &str) -> &str {
    let codigo = codigo.trim();
    if codigo.starts_with('2') {
        codigo.get(..4).unwrap_or(codigo)
    } else {
        codigo.get(..2).unwrap_or(codigo)
    }
}

/// Deriva la sección de un código de artículo.
///
/// Reglas, en orden de prioridad:
/// 1. Código < 10 dígitos: inválido, sin sección.
/// 2. Subfamilia de animal vivo (lista fija): `mascotas_vivo`.
/// 3. Prefijo 2: `mascotas_manufacturado`.
/// 4. Prefijos 31/32: `tierra_aridos`; 33-39: `fitos`.
/// 5. Primer dígito 1/4/5/6/7/8/9: sección directa.
pub fn seccion_de_codigo(codigo: &str) -> Option<Seccion> {
    let codigo = codigo.trim();

    if !codigo_valido(codigo) {
        return None;
    }

    if codigo.starts_with('2') {
        let subfamilia = codigo.get(..4)?;
        if SUBFAMILIAS_MASCOTAS_VIVO.contains(&subfamilia) {
            return Some(Seccion::MascotasVivo);
        }
        return Some(Seccion::MascotasManufacturado);
    }

    if codigo.starts_with("31") || codigo.starts_with("32") {
        return Some(Seccion::TierraAridos);
    }

    if codigo.starts_with('3') {
        let segundo = codigo.chars().nth(1)?;
        if ('3'..='9').contains(&segundo) {
            return Some(Seccion::Fitos);
        }
        return None;
    }

    match codigo.chars().next()? {
        '1' => Some(Seccion::Interior),
        '4' => Some(Seccion::UtilesJardin),
        '5' => Some(Seccion::Semillas),
        '6' => Some(Seccion::DecoInterior),
        '7' => Some(Seccion::Maf),
        '8' => Some(Seccion::Vivero),
        '9' => Some(Seccion::DecoExterior),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codigo_corto_invalido() {
        // Menos de 10 dígitos: sin sección, se descarta
        assert!(!codigo_valido("81234"));
        assert_eq!(seccion_de_codigo("81234"), None);
    }

    #[test]
    fn test_codigo_no_numerico_invalido() {
        assert!(!codigo_valido("80123X5678"));
    }

    #[test]
    fn test_seccion_vivero() {
        assert_eq!(seccion_de_codigo("8012345678"), Some(Seccion::Vivero));
    }

    #[test]
    fn test_seccion_mascotas_vivo_prioridad() {
        // La subfamilia de animal vivo tiene prioridad sobre el prefijo 2
        assert_eq!(seccion_de_codigo("2104998877"), Some(Seccion::MascotasVivo));
        assert_eq!(
            seccion_de_codigo("2101998877"),
            Some(Seccion::MascotasManufacturado)
        );
    }

    #[test]
    fn test_seccion_tierra_y_fitos() {
        assert_eq!(seccion_de_codigo("3112345678"), Some(Seccion::TierraAridos));
        assert_eq!(seccion_de_codigo("3212345678"), Some(Seccion::TierraAridos));
        assert_eq!(seccion_de_codigo("3312345678"), Some(Seccion::Fitos));
        assert_eq!(seccion_de_codigo("3912345678"), Some(Seccion::Fitos));
    }

    #[test]
    fn test_familia_por_prefijo() {
        let art = Articulo::nuevo("8012345678", "ROSAL TREPADOR", "", "");
        assert_eq!(art.familia(), "80");

        let mascota = Articulo::nuevo("2301445566", "PIENSO PERRO", "", "");
        assert_eq!(mascota.familia(), "2301");
    }
}
