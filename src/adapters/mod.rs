// Adapters layer: concrete implementations of output concerns (chart image, CSV).

pub mod csv_export;
pub mod plotters_renderer;

pub use plotters_renderer::PlottersRenderer;
