//! Сетевые вызовы страницы: фид каталога, курс банка, уведомление боту.

use contracts::catalog::Catalog;
use contracts::currency::ExchangeRate;
use contracts::quote::QuoteRequest;
use gloo_net::http::Request;
use leptos::logging::log;

use super::config;

/// Загружает CSV-фид и разбирает его в каталог.
pub async fn fetch_catalog() -> Result<Catalog, String> {
    let url = config::feed_url();
    log!("Loading catalog: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;
    if !response.ok() {
        return Err(format!("Ошибка сервера: {}", response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|e| format!("Ошибка чтения фида: {}", e))?;

    Catalog::parse(&text).map_err(|e| format!("Ошибка парсинга: {}", e))
}

/// Запрашивает курс банка. Вызывается один раз при открытии страницы.
pub async fn fetch_rate() -> Result<ExchangeRate, String> {
    let response = Request::get(config::RATE_URL)
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;
    if !response.ok() {
        return Err(format!("Ошибка сервера: {}", response.status()));
    }
    response
        .json::<ExchangeRate>()
        .await
        .map_err(|e| format!("Ошибка парсинга курса: {}", e))
}

/// Отправляет запрос цены боту.
///
/// Один GET без повторов; ответ бота не разбирается.
pub async fn send_quote(request: &QuoteRequest) -> Result<(), String> {
    let url = config::notify_url(&request.encoded_message());
    Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;
    Ok(())
}
