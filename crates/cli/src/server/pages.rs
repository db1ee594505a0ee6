//! The catch-all page route: resolve, fetch, decide, render.

use super::AppState;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use blokfront_core::{
    Blok, ContentNode, Decision, Locale, MetaTags, VacancySummary, alternates, breadcrumb,
    redirect, slug,
};
use blokfront_generator::{
    Document, StatusPage, ViewContext, render_document, render_node_html, render_status_page,
};

/// Draft content is only ever served when the server itself runs in
/// preview mode; request parameters cannot switch it on.
pub async fn page(State(state): State<AppState>, uri: Uri) -> Response {
    let config = &state.config;
    let locales = &config.locales;
    let raw_path = uri.path();
    let decoded = slug::decode_path(raw_path);
    let path = decoded.as_str();

    let detected = locales.detect_from_path(path);
    let resolved = slug::resolve_path(locales, path, detected);
    let preview = config.server.preview;
    tracing::debug!(path, slug = %resolved.slug, locale = %resolved.locale, preview, "resolved");

    let node = match state
        .store
        .story_by_slug(&resolved.slug, resolved.locale, preview)
        .await
    {
        Ok(node) => node,
        Err(e) => {
            tracing::error!(path, slug = %resolved.slug, error = %e, "content lookup failed");
            return status_response(&state, StatusPage::Error, resolved.locale);
        }
    };

    match redirect::decide(locales, node.as_ref(), raw_path, resolved.locale, preview) {
        Decision::Redirect(location) => {
            tracing::info!(path, %location, "redirect");
            let location = slug::encode_path(&location);
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        Decision::NotFound => {
            tracing::info!(path, slug = %resolved.slug, "not found");
            status_response(&state, StatusPage::NotFound, resolved.locale)
        }
        Decision::Render => match node {
            Some(node) => render(&state, &node, path, resolved.locale, preview).await,
            None => status_response(&state, StatusPage::NotFound, resolved.locale),
        },
    }
}

async fn render(
    state: &AppState,
    node: &ContentNode,
    path: &str,
    locale: Locale,
    preview: bool,
) -> Response {
    let config = &state.config;
    let locales = &config.locales;

    let vacancies = if node
        .content
        .contains(&|b| matches!(b, Blok::Vacancies(_)))
    {
        match state.store.all_vacancies(locale, preview).await {
            Ok(nodes) => nodes
                .iter()
                .filter_map(VacancySummary::from_node)
                .collect(),
            Err(e) => {
                tracing::error!(path, error = %e, "vacancy listing failed");
                return status_response(state, StatusPage::Error, locale);
            }
        }
    } else {
        Vec::new()
    };

    let labels = config.labels(locale);
    let ctx = ViewContext {
        locale,
        locales,
        theme: &config.site.theme,
        labels: &labels,
        vacancies: &vacancies,
    };
    let body = render_node_html(node, &ctx);

    let slugs = alternates::build(locales, node);
    let alternate_links = alternates::alternate_links(locales, &config.site.origin, &slugs);
    let canonical = alternates::canonical_url(&config.site.origin, node);
    let breadcrumbs = breadcrumb::build(locales, path, locale);
    let meta = MetaTags::from_node(node);

    Html(render_document(&Document {
        site_name: &config.site.name,
        locale,
        locales,
        labels: &labels,
        meta: &meta,
        canonical: Some(&canonical),
        alternates: &alternate_links,
        breadcrumbs: &breadcrumbs,
        preview,
        body,
    }))
    .into_response()
}

fn status_response(state: &AppState, page: StatusPage, locale: Locale) -> Response {
    let config = &state.config;
    let labels = config.labels(locale);
    let ctx = ViewContext {
        locale,
        locales: &config.locales,
        theme: &config.site.theme,
        labels: &labels,
        vacancies: &[],
    };
    let status = match page {
        StatusPage::NotFound => StatusCode::NOT_FOUND,
        StatusPage::Error => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Html(render_status_page(page, &config.site.name, &ctx))).into_response()
}
