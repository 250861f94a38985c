//! Пересчёт цен фида в рубли по курсу банка.

use serde::Deserialize;

/// Снимок курса из API Нацбанка. Запрашивается один раз за сессию.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeRate {
    #[serde(rename = "Cur_OfficialRate")]
    pub official_rate: f64,
    #[serde(rename = "Cur_Scale")]
    pub scale: u32,
    #[serde(rename = "Cur_Abbreviation")]
    pub abbreviation: String,
}

/// Курс пересчёта: официальный курс плюс надбавка из фида.
pub fn effective_rate(rate: &ExchangeRate, adjustment: f64) -> f64 {
    rate.official_rate + adjustment
}

/// Пересчитывает строковую цену фида.
///
/// Запятая считается десятичным разделителем. Нечисловая или пустая цена
/// даёт 0 — это не ошибка, фид так помечает позиции без цены.
pub fn convert_price(price: &str, rate: &ExchangeRate, adjustment: f64) -> f64 {
    match price.trim().replace(',', ".").parse::<f64>() {
        Ok(value) => value * effective_rate(rate, adjustment),
        Err(_) => 0.0,
    }
}

/// Надбавка из служебной строки фида; нечисловое значение читается как 0.
pub fn parse_adjustment(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Цена позиции в таблице: один знак после запятой.
pub fn format_item_price(value: f64) -> String {
    format!("{:.1}", value)
}

/// Курс в шапке страницы: два знака после запятой.
pub fn format_rate(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(official_rate: f64) -> ExchangeRate {
        ExchangeRate {
            official_rate,
            scale: 1,
            abbreviation: "USD".to_string(),
        }
    }

    #[test]
    fn test_comma_decimal_price_converts() {
        let rate = usd(2.5);
        let converted = convert_price("10,50", &rate, 0.01);
        assert!((converted - 26.355).abs() < 1e-9);
        assert_eq!(format_item_price(converted), "26.4");
    }

    #[test]
    fn test_non_numeric_price_converts_to_zero() {
        let rate = usd(2.5);
        assert_eq!(convert_price("н/д", &rate, 0.01), 0.0);
        assert_eq!(convert_price("", &rate, 0.01), 0.0);
    }

    #[test]
    fn test_adjustment_parses_with_comma_and_falls_back_to_zero() {
        assert_eq!(parse_adjustment("0,01"), 0.01);
        assert_eq!(parse_adjustment("0.02"), 0.02);
        assert_eq!(parse_adjustment(""), 0.0);
        assert_eq!(parse_adjustment("н/д"), 0.0);
    }

    #[test]
    fn test_rate_formats_with_two_decimals() {
        let rate = usd(2.5);
        assert_eq!(format_rate(effective_rate(&rate, 0.01)), "2.51");
    }

    #[test]
    fn test_bank_json_deserializes() {
        let json = r#"{
            "Cur_ID": 431,
            "Date": "2026-08-25T00:00:00",
            "Cur_Abbreviation": "USD",
            "Cur_Scale": 1,
            "Cur_Name": "Доллар США",
            "Cur_OfficialRate": 2.5
        }"#;
        let rate: ExchangeRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.official_rate, 2.5);
        assert_eq!(rate.scale, 1);
        assert_eq!(rate.abbreviation, "USD");
    }
}
