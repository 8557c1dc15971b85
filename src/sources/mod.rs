//! Input sources: country resolution and CSV table loaders

mod countries;
pub mod loader;

pub use countries::{CountryResolver, TableResolver};
pub use loader::{load_burden, load_population};
