use crate::catalog::page::CatalogPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <CatalogPage />
    }
}
