// ==========================================
// Sistema de Pedidos Vivero - Búsqueda de exportaciones del ERP
// ==========================================
// El ERP exporta ficheros con timestamp en el nombre:
//
//   BASE__YYYYMMDD_HHMMSS.ext
//
// Con varias exportaciones del mismo fichero (mañana y tarde) se
// elige la de mayor timestamp. Sin exportación con timestamp se
// acepta el nombre legacy BASE.ext. El resultado es una ruta
// resuelta o ausente; las etapas de cálculo nunca vuelven a
// interpretar timestamps.
// ==========================================

use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// ¿Coincide el nombre con `base__YYYYMMDD_HHMMSS.ext`?
fn nombre_con_timestamp(nombre: &str, base: &str, extension: &str) -> bool {
    let Some(resto) = nombre.strip_prefix(base) else {
        return false;
    };
    let Some(resto) = resto.strip_prefix("__") else {
        return false;
    };
    let Some(cuerpo) = resto.strip_suffix(extension) else {
        return false;
    };

    // 8 dígitos de fecha, '_', 6 dígitos de hora
    let bytes = cuerpo.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[9..].iter().all(u8::is_ascii_digit)
}

/// Resuelve la exportación más reciente de un fichero lógico.
///
/// # Parámetros
/// - `directorio`: directorio de entrada del ERP
/// - `base`: nombre base sin timestamp ni extensión (ej. "SPA_Ventas")
/// - `extension`: extensión con punto (ej. ".xlsx")
///
/// # Retorno
/// La ruta del fichero con mayor timestamp, el legacy `BASE.ext`
/// si no hay ninguno con timestamp, o `None` si no existe nada.
pub fn buscar_ultimo_fichero(directorio: &Path, base: &str, extension: &str) -> Option<PathBuf> {
    if !directorio.is_dir() {
        warn!(directorio = %directorio.display(), "Directorio de entrada inexistente");
        return None;
    }

    let Ok(entradas) = std::fs::read_dir(directorio) else {
        warn!(directorio = %directorio.display(), "Directorio de entrada ilegible");
        return None;
    };

    let mut candidatos: Vec<String> = entradas
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|nombre| nombre_con_timestamp(nombre, base, extension))
        .collect();

    if !candidatos.is_empty() {
        // El timestamp del nombre ordena igual que la fecha: el
        // mayor alfabéticamente es el más reciente
        candidatos.sort();
        let ultimo = candidatos.pop().unwrap_or_default();
        info!(fichero = %ultimo, "Exportación con timestamp encontrada");
        return Some(directorio.join(ultimo));
    }

    // Fallback legacy: BASE.ext sin timestamp
    let legacy = directorio.join(format!("{base}{extension}"));
    if legacy.exists() {
        info!(fichero = %legacy.display(), "Usando fichero legacy sin timestamp");
        return Some(legacy);
    }

    warn!(base, "Sin exportación disponible para el fichero lógico");
    None
}
