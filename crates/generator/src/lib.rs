// Server-rendered views for CMS content

pub mod components;
pub mod document;
pub mod markdown;

use blokfront_core::{Labels, Locale, LocaleSet, VacancySummary};

pub use components::{render_blok, render_node, render_node_html};
pub use document::{Document, StatusPage, render_document, render_status_page};

/// Everything a view needs besides the blok itself.
///
/// Passed explicitly down the whole render; views read nothing else.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub locale: Locale,
    pub locales: &'a LocaleSet,
    /// Site-wide theme, used where a blok does not pick its own
    pub theme: &'a str,
    pub labels: &'a Labels,
    /// Open job postings for `vacancies` listings. Empty unless the page
    /// contains one.
    pub vacancies: &'a [VacancySummary],
}
