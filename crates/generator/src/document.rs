use crate::ViewContext;
use blokfront_core::alternates::AlternateLink;
use blokfront_core::redirect::locale_root;
use blokfront_core::{Breadcrumb, Labels, Locale, LocaleSet, MetaTags};

/// HTML-escape a string for text and attribute positions
///
/// Escapes: & < > " '
fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// A full page: head metadata around an already rendered body.
pub struct Document<'a> {
    pub site_name: &'a str,
    pub locale: Locale,
    pub locales: &'a LocaleSet,
    pub labels: &'a Labels,
    pub meta: &'a MetaTags,
    pub canonical: Option<&'a str>,
    pub alternates: &'a [AlternateLink],
    pub breadcrumbs: &'a [Breadcrumb],
    /// Loads the visual editor bridge
    pub preview: bool,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPage {
    NotFound,
    Error,
}

/// Generate the complete HTML document
pub fn render_document(doc: &Document) -> String {
    let title = if doc.meta.title.is_empty() || doc.meta.title == doc.site_name {
        html_escape(doc.site_name)
    } else {
        format!(
            "{} | {}",
            html_escape(&doc.meta.title),
            html_escape(doc.site_name)
        )
    };

    let meta_html: String = doc
        .meta
        .pairs()
        .into_iter()
        .filter(|(name, _)| *name != "title")
        .map(|(name, content)| {
            let key = if name.starts_with("og:") {
                "property"
            } else {
                "name"
            };
            format!(
                "\n    <meta {}=\"{}\" content=\"{}\">",
                key,
                name,
                html_escape(&content)
            )
        })
        .collect();

    let canonical_html = doc
        .canonical
        .map(|href| {
            format!(
                "\n    <link rel=\"canonical\" href=\"{}\">",
                html_escape(href)
            )
        })
        .unwrap_or_default();

    let alternates_html: String = doc
        .alternates
        .iter()
        .map(|alt| {
            format!(
                "\n    <link rel=\"{}\" hreflang=\"{}\" href=\"{}\">",
                alt.rel,
                alt.href_lang,
                html_escape(&alt.href)
            )
        })
        .collect();

    let bridge_script = if doc.preview {
        "\n    <script src=\"https://app.storyblok.com/f/storyblok-v2-latest.js\" async></script>"
    } else {
        ""
    };

    let breadcrumbs_html = render_breadcrumbs(doc);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>{meta}{canonical}{alternates}
    <link rel="stylesheet" href="/assets/site.css">{bridge}
</head>
<body>
{breadcrumbs}<main>
{body}
</main>
</body>
</html>
"#,
        lang = doc.locale,
        title = title,
        meta = meta_html,
        canonical = canonical_html,
        alternates = alternates_html,
        bridge = bridge_script,
        breadcrumbs = breadcrumbs_html,
        body = doc.body,
    )
}

fn render_breadcrumbs(doc: &Document) -> String {
    if doc.breadcrumbs.is_empty() {
        return String::new();
    }

    let home = format!(
        "<li><a href=\"{}\">{}</a></li>",
        locale_root(doc.locales, doc.locale),
        html_escape(&doc.labels.breadcrumb_home)
    );

    let last = doc.breadcrumbs.len() - 1;
    let crumbs: String = doc
        .breadcrumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            if i == last {
                format!(
                    "<li><a href=\"{}\" aria-current=\"page\">{}</a></li>",
                    html_escape(&crumb.path),
                    html_escape(&crumb.name)
                )
            } else {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    html_escape(&crumb.path),
                    html_escape(&crumb.name)
                )
            }
        })
        .collect();

    format!(
        "<nav class=\"breadcrumbs\" aria-label=\"Breadcrumb\"><ol>{}{}</ol></nav>\n",
        home, crumbs
    )
}

/// Static page for a request that found no content or whose content lookup
/// failed, in the request's locale.
pub fn render_status_page(page: StatusPage, site_name: &str, ctx: &ViewContext) -> String {
    let meta = match page {
        StatusPage::NotFound => MetaTags::not_found(ctx.labels),
        StatusPage::Error => MetaTags::error(ctx.labels),
    };
    let class = match page {
        StatusPage::NotFound => "status-page not-found",
        StatusPage::Error => "status-page error",
    };

    let body = format!(
        r#"<section class="{}">
    <h1>{}</h1>
    <p>{}</p>
    <a href="{}">{}</a>
</section>"#,
        class,
        html_escape(&meta.title),
        html_escape(meta.description.as_deref().unwrap_or_default()),
        locale_root(ctx.locales, ctx.locale),
        html_escape(&ctx.labels.breadcrumb_home),
    );

    render_document(&Document {
        site_name,
        locale: ctx.locale,
        locales: ctx.locales,
        labels: ctx.labels,
        meta: &meta,
        canonical: None,
        alternates: &[],
        breadcrumbs: &[],
        preview: false,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crumb(path: &str, name: &str) -> Breadcrumb {
        Breadcrumb {
            path: path.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>\"R&D\"</b>"), "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_document_head() {
        let locales = LocaleSet::default();
        let labels = Labels::builtin(Locale::Nl);
        let meta = MetaTags {
            title: "Over ons".to_string(),
            description: Some("Wie we zijn & wat we doen".to_string()),
            og_image: None,
        };
        let alternates = vec![AlternateLink {
            rel: "alternate",
            href_lang: Locale::En,
            href: "https://example.com/about".to_string(),
        }];
        let crumbs = vec![crumb("/nl/over-ons", "Over Ons")];

        let html = render_document(&Document {
            site_name: "Studio",
            locale: Locale::Nl,
            locales: &locales,
            labels: &labels,
            meta: &meta,
            canonical: Some("https://example.com/nl/over-ons"),
            alternates: &alternates,
            breadcrumbs: &crumbs,
            preview: false,
            body: "<p>content</p>".to_string(),
        });

        assert!(html.contains("<html lang=\"nl\">"));
        assert!(html.contains("<title>Over ons | Studio</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Wie we zijn &amp; wat we doen\">"));
        assert!(html.contains("<meta property=\"og:title\" content=\"Over ons\">"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com/nl/over-ons\">"));
        assert!(html.contains("hreflang=\"en\" href=\"https://example.com/about\""));
        assert!(html.contains("<a href=\"/nl\">Home</a>"));
        assert!(html.contains("<a href=\"/nl/over-ons\" aria-current=\"page\">Over Ons</a>"));
        assert!(html.contains("<p>content</p>"));
        assert!(!html.contains("storyblok-v2-latest.js"));
    }

    #[test]
    fn test_status_pages_use_locale_labels() {
        let locales = LocaleSet::default();
        let labels = Labels::builtin(Locale::Nl);
        let ctx = ViewContext {
            locale: Locale::Nl,
            locales: &locales,
            theme: "light",
            labels: &labels,
            vacancies: &[],
        };

        let html = render_status_page(StatusPage::NotFound, "Studio", &ctx);
        assert!(html.contains(&html_escape(&labels.not_found_title)));
        assert!(html.contains("status-page not-found"));
        assert!(!html.contains("breadcrumbs"));

        let html = render_status_page(StatusPage::Error, "Studio", &ctx);
        assert!(html.contains(&html_escape(&labels.error_description)));
    }
}
