//! Настройки времени сборки.
//!
//! Три строки задаются переменными окружения при сборке и вшиваются в бинарь:
//! идентификатор опубликованной таблицы, токен бота и id чата для уведомлений.

const SHEET_ID: Option<&str> = option_env!("STOREFRONT_SHEET_ID");
const BOT_TOKEN: Option<&str> = option_env!("STOREFRONT_BOT_TOKEN");
const CHAT_ID: Option<&str> = option_env!("STOREFRONT_CHAT_ID");

/// Интервал фонового обновления каталога (30 минут).
pub const CATALOG_REFRESH_MS: u32 = 30 * 60 * 1000;

/// Курс доллара США в API Нацбанка (валюта 431).
pub const RATE_URL: &str = "https://www.nbrb.by/api/exrates/rates/431";

/// URL CSV-экспорта опубликованной таблицы.
pub fn feed_url() -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/e/{}/pub?output=csv",
        SHEET_ID.unwrap_or_default()
    )
}

/// URL отправки уведомления боту. Текст должен быть уже percent-encoded.
pub fn notify_url(encoded_text: &str) -> String {
    format!(
        "https://api.telegram.org/bot{}/sendMessage?chat_id={}&text={}",
        BOT_TOKEN.unwrap_or_default(),
        CHAT_ID.unwrap_or_default(),
        encoded_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_points_at_csv_export() {
        let url = feed_url();
        assert!(url.starts_with("https://docs.google.com/spreadsheets/d/e/"));
        assert!(url.ends_with("/pub?output=csv"));
    }

    #[test]
    fn test_notify_url_embeds_encoded_text() {
        let url = notify_url("W75%2F3%0AMANN");
        assert!(url.contains("/sendMessage?chat_id="));
        assert!(url.ends_with("&text=W75%2F3%0AMANN"));
    }
}
