use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::currency::{
    convert_price, effective_rate, format_item_price, format_rate, parse_adjustment,
};
use contracts::filter::{self, StockFlag};
use gloo_timers::future::TimeoutFuture;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::state::create_state;
use crate::quote::form::QuoteForm;
use crate::shared::api;
use crate::shared::config::CATALOG_REFRESH_MS;

const ORDER_PROMPT: &str = "Вы можете запросить цену на интересующий вас товар,\nдоставка 2-14 дней, после согласования цены.";

#[component]
pub fn CatalogPage() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(false);
    let (show_quote_form, set_show_quote_form) = signal(false);

    let load_catalog = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            match api::fetch_catalog().await {
                Ok(catalog) => {
                    log!("Catalog loaded: {} records", catalog.records.len());
                    state.update(|s| {
                        s.catalog = catalog;
                        s.is_loaded = true;
                    });
                    set_loading.set(false);
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    let load_rate = move || {
        spawn_local(async move {
            match api::fetch_rate().await {
                Ok(rate) => state.update(|s| s.rate = Some(rate)),
                Err(e) => {
                    log!("Failed to load exchange rate: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    // Первичная загрузка и фоновое обновление каталога. Таймер не перезагружает
    // страницу, а повторяет запрос фида; флаг останавливает цикл при размонтировании.
    let refresh_cancelled = Arc::new(AtomicBool::new(false));
    {
        let refresh_cancelled = refresh_cancelled.clone();
        Effect::new(move |_| {
            if state.with_untracked(|s| s.is_loaded) {
                return;
            }
            load_catalog();
            load_rate();

            let cancelled = refresh_cancelled.clone();
            spawn_local(async move {
                loop {
                    TimeoutFuture::new(CATALOG_REFRESH_MS).await;
                    if cancelled.load(Ordering::Relaxed) {
                        break;
                    }
                    log!("Scheduled catalog refresh");
                    load_catalog();
                }
            });
        });
    }
    on_cleanup(move || refresh_cancelled.store(true, Ordering::Relaxed));

    let search_query = RwSignal::new(String::new());

    Effect::new(move || {
        let v = search_query.get();
        untrack(move || {
            state.update(|s| s.filter.set_query(v));
        });
    });

    // Видимое подмножество всегда выводится заново из полного списка.
    let visible = Signal::derive(move || {
        state.with(|s| {
            filter::apply(
                &s.catalog.records,
                &s.catalog.categories,
                &s.catalog.brands,
                &s.filter,
            )
        })
    });

    let active_filters_count = Signal::derive(move || state.with(|s| s.filter.active_count()));

    let rate_display = Signal::derive(move || {
        state.with(|s| {
            s.rate.as_ref().map(|rate| {
                let adjustment = parse_adjustment(&s.catalog.meta.rate_adjustment);
                format_rate(effective_rate(rate, adjustment))
            })
        })
    });

    let toggle_stock = move |flag: StockFlag| {
        state.update(|s| s.filter.toggle_stock(flag));
    };

    let stock_button_class = move |flag: StockFlag| {
        if state.with(|s| s.filter.stock == Some(flag)) {
            "stock-button stock-button--active"
        } else {
            "stock-button"
        }
    };

    let on_order = move |_| {
        set_show_quote_form.update(|v| *v = !*v);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(ORDER_PROMPT);
        }
    };

    view! {
        <section class="page page--catalog">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Автозапчасти"</h1>
                    <span class="badge badge--primary">
                        {move || state.with(|s| s.catalog.records.len())}
                    </span>
                </div>

                <div class="page__header-right">
                    <span class="page__rate">{move || rate_display.get()}</span>
                    <Button appearance=ButtonAppearance::Primary on_click=on_order>
                        "Заказать"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            <svg
                                width="16"
                                height="16"
                                viewBox="0 0 24 24"
                                fill="none"
                                stroke="currentColor"
                                stroke-width="2"
                                stroke-linecap="round"
                                stroke-linejoin="round"
                                class=move || {
                                    if is_filter_expanded.get() {
                                        "filter-panel__chevron filter-panel__chevron--expanded"
                                    } else {
                                        "filter-panel__chevron"
                                    }
                                }
                            >
                                <polyline points="6 9 12 15 18 9"></polyline>
                            </svg>
                            <span class="filter-panel__title">"Фильтры"</span>
                            {move || {
                                let count = active_filters_count.get();
                                if count > 0 {
                                    view! { <span class="filter-panel__badge">{count}</span> }.into_any()
                                } else {
                                    view! { <></> }.into_any()
                                }
                            }}
                        </div>

                        <div class="filter-panel-header__center">
                            <div style="min-width: 260px;">
                                <Input value=search_query placeholder="Поиск..." />
                            </div>
                            <button
                                class=move || stock_button_class(StockFlag::Sale)
                                on:click=move |_| toggle_stock(StockFlag::Sale)
                            >
                                "Акции"
                            </button>
                            <button
                                class=move || stock_button_class(StockFlag::Markdown)
                                on:click=move |_| toggle_stock(StockFlag::Markdown)
                            >
                                "Уценка"
                            </button>
                        </div>

                        <div class="filter-panel-header__right">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| load_catalog()
                                disabled=Signal::derive(move || loading.get())
                            >
                                {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                            </Button>
                        </div>
                    </div>

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <div class="filter-panel__columns">
                                <div class="filter-panel__column">
                                    <For
                                        each=move || state.with(|s| s.catalog.categories.clone())
                                        key=|category| category.clone()
                                        children=move |category| {
                                            view! { <TagCheckbox state=state tag=category /> }
                                        }
                                    />
                                </div>
                                <div class="filter-panel__column">
                                    <For
                                        each=move || state.with(|s| s.catalog.brands.clone())
                                        key=|brand| brand.clone()
                                        children=move |brand| {
                                            view! { <TagCheckbox state=state tag=brand /> }
                                        }
                                    />
                                </div>
                            </div>
                        </div>
                    </Show>
                </div>

                {move || {
                    error.get().map(|err| view! {
                        <div class="alert alert--error">{err}</div>
                    })
                }}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Артикул"</TableHeaderCell>
                                <TableHeaderCell>"Описание"</TableHeaderCell>
                                <TableHeaderCell>"Кол-во"</TableHeaderCell>
                                <TableHeaderCell>"Цена"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|item| format!("{}:{}", item.article, item.description)
                                children=move |item| {
                                    let price = item.price.clone();
                                    let converted = {
                                        let price = price.clone();
                                        move || state.with(|s| {
                                            if price.is_empty() {
                                                return None;
                                            }
                                            s.rate.as_ref().map(|rate| {
                                                let adjustment =
                                                    parse_adjustment(&s.catalog.meta.rate_adjustment);
                                                format!(
                                                    " / {}",
                                                    format_item_price(convert_price(&price, rate, adjustment))
                                                )
                                            })
                                        })
                                    };

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.article.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">
                                                        {item.quantity.clone()}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {price.clone()}
                                                    <span class="table__price-converted">{converted}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <div class="marquee">
                    <span class="marquee__text">
                        {move || state.with(|s| s.catalog.meta.ad_text.clone())}
                    </span>
                </div>
            </div>

            <QuoteForm
                show=Signal::derive(move || show_quote_form.get())
                on_close=Callback::new(move |_| set_show_quote_form.set(false))
            />
        </section>
    }
}

/// Чекбокс одного тега (категории или марки) в панели фильтров.
#[component]
fn TagCheckbox(
    state: RwSignal<super::state::CatalogPageState>,
    tag: String,
) -> impl IntoView {
    let label = tag.clone();
    let tag_for_checked = tag.clone();
    let checked = Signal::derive(move || {
        state.with(|s| s.filter.selected_tags.iter().any(|t| t == &tag_for_checked))
    });

    view! {
        <label class="filter-panel__option">
            <input
                type="checkbox"
                class="filter-panel__checkbox"
                checked=move || checked.get()
                on:change=move |_| state.update(|s| s.filter.toggle_tag(&tag))
            />
            {label}
        </label>
    }
}
