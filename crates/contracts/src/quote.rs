//! Запрос цены: модель формы и формирование текста уведомления.
//!
//! Запрос живёт только на время одного исходящего вызова — без идентификатора
//! и без какого-либо хранения.

/// Канал связи для ответа на запрос.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactChannel {
    WhatsApp,
    Telegram,
    Viber,
}

impl ContactChannel {
    pub const ALL: [ContactChannel; 3] = [
        ContactChannel::WhatsApp,
        ContactChannel::Telegram,
        ContactChannel::Viber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactChannel::WhatsApp => "WhatsApp",
            ContactChannel::Telegram => "Telegram",
            ContactChannel::Viber => "Viber",
        }
    }
}

/// Заполненная форма запроса цены. Значения полей не обрезаются.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteRequest {
    pub article: String,
    pub brand: String,
    pub count: String,
    pub reference: String,
    pub contact: String,
    pub channels: Vec<ContactChannel>,
}

impl QuoteRequest {
    /// Единственное жёсткое требование: контакт должен быть заполнен.
    /// Невалидный запрос не отправляется вовсе.
    pub fn is_valid(&self) -> bool {
        !self.contact.is_empty()
    }

    /// Текст уведомления: поля построчно, затем строка выбранных каналов.
    pub fn message(&self) -> String {
        let mut lines = vec![
            self.article.clone(),
            self.brand.clone(),
            self.count.clone(),
            self.reference.clone(),
            self.contact.clone(),
        ];
        if !self.channels.is_empty() {
            lines.push(
                self.channels
                    .iter()
                    .map(|c| c.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        lines.join("\n")
    }

    /// Текст для GET-запроса к боту: перевод строки кодируется как `%0A`.
    pub fn encoded_message(&self) -> String {
        urlencoding::encode(&self.message()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> QuoteRequest {
        QuoteRequest {
            article: "W75/3".to_string(),
            brand: "MANN".to_string(),
            count: "2".to_string(),
            reference: "https://example.com/w75".to_string(),
            contact: "375291112233".to_string(),
            channels: vec![ContactChannel::Telegram, ContactChannel::Viber],
        }
    }

    #[test]
    fn test_empty_contact_is_invalid() {
        let mut req = request();
        req.contact.clear();
        assert!(!req.is_valid());
        assert!(request().is_valid());
    }

    #[test]
    fn test_message_is_line_feed_delimited() {
        assert_eq!(
            request().message(),
            "W75/3\nMANN\n2\nhttps://example.com/w75\n375291112233\nTelegram, Viber"
        );
    }

    #[test]
    fn test_message_without_channels_has_five_lines() {
        let mut req = request();
        req.channels.clear();
        assert_eq!(req.message().lines().count(), 5);
    }

    #[test]
    fn test_encoded_message_uses_percent_encoding() {
        let encoded = request().encoded_message();
        assert!(encoded.contains("%0A"));
        assert!(!encoded.contains('\n'));
        // '/' из артикула тоже кодируется
        assert!(encoded.starts_with("W75%2F3%0AMANN"));
    }

    #[test]
    fn test_cyrillic_payload_is_percent_encoded() {
        let req = QuoteRequest {
            article: "фильтр".to_string(),
            contact: "37529".to_string(),
            ..QuoteRequest::default()
        };
        let encoded = req.encoded_message();
        assert!(encoded.is_ascii());
        assert!(encoded.starts_with("%D1%84"));
    }
}
