// ==========================================
// Sistema de Pedidos Vivero - Capa de dominio
// ==========================================
// Entidades y tipos compartidos por todo el pipeline.
// Ningún tipo de esta capa realiza E/S.
// ==========================================

pub mod articulo;
pub mod clasificacion;
pub mod escenario;
pub mod pedido;
pub mod registros;
pub mod types;

pub use articulo::{codigo_valido, familia_de_codigo, seccion_de_codigo, Articulo};
pub use clasificacion::Clasificacion;
pub use escenario::{EjeCompras, EjeStock, EjeVentas, Escenario};
pub use pedido::{AlertasPedido, PedidoCorregido, PedidoTeorico};
pub use registros::{
    stock_mas_reciente, RegistroCompra, RegistroCoste, RegistroVenta, SnapshotStock,
};
pub use types::{CategoriaAbc, NivelRiesgo, PeriodoAnalisis, Seccion};
