//! Модель товарного фида: строки каталога и производные списки значений.
//!
//! Фид приходит как CSV-экспорт опубликованной таблицы. Колонки определяются
//! строкой заголовка (ключи частично кириллические), все значения — строки,
//! включая числовые на вид поля. Цена может быть пустой, нечисловой или с
//! запятой в роли десятичного разделителя — разбор цены лежит на потребителе.

use anyhow::Context;

// Имена колонок фида, как они заданы в строке заголовка таблицы.
const COL_ARTICLE: &str = "артикул";
const COL_DESCRIPTION: &str = "описание";
const COL_CATEGORY: &str = "category";
const COL_QUANTITY: &str = "кол-во";
const COL_PRICE: &str = "ц";
const COL_ANALOGS: &str = "аналоги";
const COL_SALE: &str = "sale";
const COL_BRAND: &str = "auto";
// Служебные колонки: заполнены только в первой строке данных.
const COL_RATE_ADJUSTMENT: &str = "courses";
const COL_AD_TEXT: &str = "text";

/// Одна строка товарного фида.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRecord {
    pub article: String,
    pub description: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub analogs: String,
    pub sale: String,
    /// Марка автомобиля — второй, независимый от категории классификатор.
    pub brand: String,
}

impl CatalogRecord {
    /// Значения всех полей записи в порядке колонок фида.
    ///
    /// Текстовый поиск идёт по каждому полю без исключений.
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.article,
            &self.description,
            &self.category,
            &self.quantity,
            &self.price,
            &self.analogs,
            &self.sale,
            &self.brand,
        ]
    }
}

/// Служебные значения, которые фид несёт в первой строке данных.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedMeta {
    /// Надбавка к официальному курсу, сырой строкой ("0,01" допустимо).
    pub rate_adjustment: String,
    /// Текст бегущей строки внизу страницы.
    pub ad_text: String,
}

/// Разобранный каталог: записи плюс производные списки для фильтров.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub records: Vec<CatalogRecord>,
    /// Различные непустые категории в порядке первого появления.
    pub categories: Vec<String>,
    /// Различные непустые марки в порядке первого появления.
    pub brands: Vec<String>,
    pub meta: FeedMeta,
}

impl Catalog {
    /// Разбирает CSV-текст фида.
    ///
    /// Отсутствующая колонка даёт пустые значения, короткие строки допустимы.
    /// Строки, которые не удалось разобрать, пропускаются.
    pub fn parse(text: &str) -> anyhow::Result<Catalog> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .context("не удалось прочитать заголовок фида")?
            .clone();
        let col = |name: &str| headers.iter().position(|h| h.trim() == name);

        let idx_article = col(COL_ARTICLE);
        let idx_description = col(COL_DESCRIPTION);
        let idx_category = col(COL_CATEGORY);
        let idx_quantity = col(COL_QUANTITY);
        let idx_price = col(COL_PRICE);
        let idx_analogs = col(COL_ANALOGS);
        let idx_sale = col(COL_SALE);
        let idx_brand = col(COL_BRAND);
        let idx_rate_adjustment = col(COL_RATE_ADJUSTMENT);
        let idx_ad_text = col(COL_AD_TEXT);

        let mut records = Vec::new();
        let mut meta = FeedMeta::default();

        for (row_no, result) in reader.records().enumerate() {
            let Ok(row) = result else {
                continue;
            };
            let get = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i)).unwrap_or_default().to_string()
            };

            if row_no == 0 {
                meta = FeedMeta {
                    rate_adjustment: get(idx_rate_adjustment),
                    ad_text: get(idx_ad_text),
                };
            }

            records.push(CatalogRecord {
                article: get(idx_article),
                description: get(idx_description),
                category: get(idx_category),
                quantity: get(idx_quantity),
                price: get(idx_price),
                analogs: get(idx_analogs),
                sale: get(idx_sale),
                brand: get(idx_brand),
            });
        }

        let categories = distinct_values(&records, |r| &r.category);
        let brands = distinct_values(&records, |r| &r.brand);

        Ok(Catalog {
            records,
            categories,
            brands,
            meta,
        })
    }
}

/// Различные непустые значения поля в порядке первого появления.
fn distinct_values<F>(records: &[CatalogRecord], field: F) -> Vec<String>
where
    F: Fn(&CatalogRecord) -> &str,
{
    let mut values: Vec<String> = Vec::new();
    for record in records {
        let value = field(record);
        if !value.is_empty() && !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
артикул,описание,category,кол-во,ц,аналоги,sale,auto,courses,text
АРТ 123,Фильтр масляный,фильтры,4,\"10,50\",MANN W75/3,,Renault,\"0,01\",Доставка 2-14 дней
SKF-220,Подшипник ступицы,подшипники,1,25,FAG 713,акция,VW,,
АРТ-124,Фильтр воздушный,фильтры,2,н/д,,,Renault,,
NO-CAT,Разное,,3,,,,,,
";

    #[test]
    fn test_parse_records_by_cyrillic_headers() {
        let catalog = Catalog::parse(FEED).unwrap();
        assert_eq!(catalog.records.len(), 4);

        let first = &catalog.records[0];
        assert_eq!(first.article, "АРТ 123");
        assert_eq!(first.description, "Фильтр масляный");
        assert_eq!(first.category, "фильтры");
        assert_eq!(first.quantity, "4");
        assert_eq!(first.price, "10,50");
        assert_eq!(first.analogs, "MANN W75/3");
        assert_eq!(first.brand, "Renault");

        assert_eq!(catalog.records[1].sale, "акция");
    }

    #[test]
    fn test_distinct_values_keep_first_appearance_order() {
        let catalog = Catalog::parse(FEED).unwrap();
        assert_eq!(catalog.categories, vec!["фильтры", "подшипники"]);
        assert_eq!(catalog.brands, vec!["Renault", "VW"]);
    }

    #[test]
    fn test_meta_comes_from_first_data_row() {
        let catalog = Catalog::parse(FEED).unwrap();
        assert_eq!(catalog.meta.rate_adjustment, "0,01");
        assert_eq!(catalog.meta.ad_text, "Доставка 2-14 дней");
    }

    #[test]
    fn test_missing_columns_give_empty_fields() {
        let catalog = Catalog::parse("артикул,описание\nA-1,Деталь\n").unwrap();
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.records[0].article, "A-1");
        assert_eq!(catalog.records[0].price, "");
        assert!(catalog.categories.is_empty());
        assert_eq!(catalog.meta, FeedMeta::default());
    }

    #[test]
    fn test_empty_feed_gives_empty_catalog() {
        let catalog = Catalog::parse("").unwrap();
        assert!(catalog.records.is_empty());
        assert!(catalog.categories.is_empty());
        assert!(catalog.brands.is_empty());
    }
}
