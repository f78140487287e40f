use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};

/// CSS selectors describing one site's search result markup.
#[derive(Debug, Clone, Copy)]
pub struct ListingLayout {
    /// One match per posting row.
    pub item: &'static str,
    pub company: &'static str,
    /// Element holding both the title text and the `href`.
    pub title: &'static str,
    pub date: Option<&'static str>,
}

/// A posting row as it appears in the markup, before mapping to a JobRecord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    /// Position among all rows matching `item`, usable or not.
    pub row: usize,
    pub company: String,
    pub position: String,
    pub link: String,
    pub date_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub listings: Vec<RawListing>,
    /// `(row index, reason)` for rows that matched `item` but were unusable.
    pub skipped: Vec<(usize, String)>,
}

impl ParsedPage {
    /// Number of rows matching the item selector.
    pub fn items_seen(&self) -> usize {
        self.listings.len() + self.skipped.len()
    }

    /// A page without any result rows marks the end of a result set.
    pub fn is_end_of_results(&self) -> bool {
        self.items_seen() == 0
    }
}

struct CompiledLayout {
    item: Selector,
    company: Selector,
    title: Selector,
    date: Option<Selector>,
}

impl CompiledLayout {
    fn compile(layout: &ListingLayout) -> Result<Self> {
        Ok(Self {
            item: parse_selector(layout.item)?,
            company: parse_selector(layout.company)?,
            title: parse_selector(layout.title)?,
            date: layout.date.map(parse_selector).transpose()?,
        })
    }
}

fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| AppError::parse(format!("bad selector {raw:?}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every posting row of a search result page.
///
/// Relative hrefs are resolved against `base`. A row missing its company,
/// title or href is recorded in `skipped` and does not affect other rows.
pub fn extract_listings(html: &str, layout: &ListingLayout, base: &Url) -> Result<ParsedPage> {
    let compiled = CompiledLayout::compile(layout)?;
    let document = Html::parse_document(html);
    let mut page = ParsedPage::default();

    for (idx, row) in document.select(&compiled.item).enumerate() {
        match extract_row(idx, row, &compiled, base) {
            Ok(listing) => page.listings.push(listing),
            Err(reason) => page.skipped.push((idx, reason)),
        }
    }

    Ok(page)
}

fn extract_row(
    idx: usize,
    row: ElementRef<'_>,
    layout: &CompiledLayout,
    base: &Url,
) -> std::result::Result<RawListing, String> {
    let company = row
        .select(&layout.company)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
        .ok_or("missing company")?;

    let title = row.select(&layout.title).next().ok_or("missing title")?;
    let position = element_text(title);
    if position.is_empty() {
        return Err("empty title".into());
    }

    let href = title
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or("missing href")?;
    let link = base
        .join(href)
        .map_err(|e| format!("bad href {href:?}: {e}"))?
        .to_string();

    let date_text = layout
        .date
        .as_ref()
        .and_then(|sel| row.select(sel).next())
        .map(element_text);

    Ok(RawListing {
        row: idx,
        company,
        position,
        link,
        date_text,
    })
}
