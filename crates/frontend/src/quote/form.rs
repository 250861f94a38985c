//! Модальная форма запроса цены.
//!
//! Поля привязаны к сигналам и собираются в `QuoteRequest` перед отправкой,
//! без поиска элементов по DOM.

use contracts::quote::{ContactChannel, QuoteRequest};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api;

const SENT_PROMPT: &str = "Для поиска наилучшего предложения потребуется некоторое время. Ответ будет выслан максимально быстро.\nСпасибо!";

#[component]
pub fn QuoteForm(
    #[prop(into)] show: Signal<bool>,
    on_close: Callback<()>,
) -> impl IntoView {
    let article = RwSignal::new(String::new());
    let brand = RwSignal::new(String::new());
    let count = RwSignal::new(String::new());
    let reference = RwSignal::new(String::new());
    let contact = RwSignal::new(String::new());
    let channels = RwSignal::new(Vec::<ContactChannel>::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let toggle_channel = move |channel: ContactChannel| {
        channels.update(|list| {
            if let Some(pos) = list.iter().position(|c| *c == channel) {
                list.remove(pos);
            } else {
                list.push(channel);
            }
        });
    };

    let submit = move |_| {
        let request = QuoteRequest {
            article: article.get_untracked(),
            brand: brand.get_untracked(),
            count: count.get_untracked(),
            reference: reference.get_untracked(),
            contact: contact.get_untracked(),
            channels: channels.get_untracked(),
        };

        if !request.is_valid() {
            set_error.set(Some("Укажите контакт для получения ответа".to_string()));
            return;
        }
        set_error.set(None);

        spawn_local(async move {
            if let Err(e) = api::send_quote(&request).await {
                log!("Failed to send quote request: {}", e);
            }
        });

        // Контакт намеренно остаётся заполненным для повторных запросов.
        article.set(String::new());
        brand.set(String::new());
        count.set(String::new());
        reference.set(String::new());

        on_close.run(());

        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(SENT_PROMPT);
        }
    };

    view! {
        <Show when=move || show.get()>
            <div class="modal-overlay" on:click=move |_| on_close.run(())></div>
            <form class="quote-form" on:submit=move |ev| ev.prevent_default()>
                <h1 class="quote-form__title">"Создать запрос"</h1>
                <span class="quote-form__hint">
                    "Если возможны аналоги - создайте отдельный запрос для них."
                </span>

                <div class="quote-form__fields">
                    <label class="quote-form__field">
                        "TecDoc артикул:"
                        <input
                            prop:value=move || article.get()
                            on:input=move |ev| article.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="quote-form__field">
                        "Бренд:"
                        <input
                            prop:value=move || brand.get()
                            on:input=move |ev| brand.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="quote-form__field">
                        "Кол-во:"
                        <input
                            type="number"
                            min="1"
                            prop:value=move || count.get()
                            on:input=move |ev| count.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="quote-form__field">
                        "Ссылка:"
                        <input
                            prop:value=move || reference.get()
                            on:input=move |ev| reference.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="quote-form__field">
                        "Контакт для получения ответа:"
                        <input
                            type="tel"
                            pattern="[0-9]{11}"
                            prop:value=move || contact.get()
                            on:input=move |ev| contact.set(event_target_value(&ev))
                        />
                    </label>

                    <div class="quote-form__channels">
                        {ContactChannel::ALL
                            .into_iter()
                            .map(|channel| {
                                let checked = Signal::derive(move || {
                                    channels.with(|list| list.contains(&channel))
                                });
                                view! {
                                    <label class="quote-form__channel">
                                        <input
                                            type="checkbox"
                                            checked=move || checked.get()
                                            on:change=move |_| toggle_channel(channel)
                                        />
                                        {channel.label()}
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                {move || {
                    error.get().map(|err| view! {
                        <div class="alert alert--error">{err}</div>
                    })
                }}

                <div class="quote-form__buttons">
                    <Button appearance=ButtonAppearance::Primary on_click=submit>
                        "Отправить на обработку"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        "Закрыть"
                    </Button>
                </div>
            </form>
        </Show>
    }
}
