//! Фильтрация и поиск по каталогу.
//!
//! Все предикаты — чистые функции над `(записи, состояние фильтра)`. Видимый
//! список всегда выводится заново из полного набора записей, промежуточные
//! отфильтрованные копии нигде не хранятся.

use crate::catalog::CatalogRecord;

/// Промо-флаг: в один момент активен максимум один.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFlag {
    Sale,
    Markdown,
}

impl StockFlag {
    /// Ключевое слово, которым флаг помечен в данных фида.
    pub fn keyword(self) -> &'static str {
        match self {
            StockFlag::Sale => "акция",
            StockFlag::Markdown => "уценка",
        }
    }
}

/// Состояние фильтров страницы.
///
/// Выбранные теги и промо-флаг комбинируются (оба предиката входят в итоговое
/// AND); взаимоисключающими остаются только сами промо-флаги между собой.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    /// Выбранные теги (категории и марки вперемешку), в порядке выбора.
    pub selected_tags: Vec<String>,
    pub stock: Option<StockFlag>,
}

impl FilterState {
    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Добавляет тег, если он не выбран, иначе снимает его.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    /// Переключает промо-флаг; включение одного сбрасывает другой.
    pub fn toggle_stock(&mut self, flag: StockFlag) {
        self.stock = if self.stock == Some(flag) {
            None
        } else {
            Some(flag)
        };
    }

    /// Число активных фильтров для индикатора на панели.
    pub fn active_count(&self) -> usize {
        let mut count = self.selected_tags.len();
        if !self.query.is_empty() {
            count += 1;
        }
        if self.stock.is_some() {
            count += 1;
        }
        count
    }
}

/// Нормализация для поиска: нижний регистр, без пробелов и символов `/ , . -`.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '/' | ',' | '.' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Текстовый предикат: любое поле записи содержит нормализованный запрос.
///
/// Пустой запрос совпадает со всем.
pub fn matches_text(record: &CatalogRecord, query: &str) -> bool {
    let needle = normalize(query);
    if needle.is_empty() {
        return true;
    }
    record
        .fields()
        .iter()
        .any(|field| normalize(field).contains(&needle))
}

/// Предикат по тегам.
///
/// Выбор делится на известные категории и известные марки. Если среди
/// выбранного есть категория — поле категории записи должно входить в выбор;
/// если есть марка — поле марки тоже; оба вида выбраны — оба условия сразу.
/// Пустой выбор ничего не ограничивает.
fn matches_tags(
    record: &CatalogRecord,
    selected: &[String],
    categories: &[String],
    brands: &[String],
) -> bool {
    if selected.is_empty() {
        return true;
    }

    let wants_category = selected.iter().any(|t| categories.contains(t));
    let wants_brand = selected.iter().any(|t| brands.contains(t));

    let category_ok = !wants_category || selected.iter().any(|t| t == &record.category);
    let brand_ok = !wants_brand || selected.iter().any(|t| t == &record.brand);

    category_ok && brand_ok
}

/// Возвращает подмножество записей, проходящее все активные предикаты (AND).
pub fn apply(
    records: &[CatalogRecord],
    categories: &[String],
    brands: &[String],
    state: &FilterState,
) -> Vec<CatalogRecord> {
    records
        .iter()
        .filter(|record| {
            matches_text(record, &state.query)
                && matches_tags(record, &state.selected_tags, categories, brands)
                && state
                    .stock
                    .map_or(true, |flag| matches_text(record, flag.keyword()))
        })
        .cloned()
        .collect()
}
