use contracts::catalog::Catalog;
use contracts::currency::ExchangeRate;
use contracts::filter::FilterState;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct CatalogPageState {
    // data
    pub catalog: Catalog,
    pub rate: Option<ExchangeRate>,

    // filters
    pub filter: FilterState,

    // load flag
    pub is_loaded: bool,
}

pub fn create_state() -> RwSignal<CatalogPageState> {
    RwSignal::new(CatalogPageState::default())
}
