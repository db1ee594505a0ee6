//! Blok to view dispatch.
//!
//! [`render_blok`] is the only entry point: one arm per [`Blok`] variant,
//! children rendered recursively in authored order. Unknown and malformed
//! bloks become a visible placeholder so one bad entry never takes the
//! page down.

use crate::ViewContext;
use crate::markdown;
use blokfront_core::blok::{
    Button, Card, Cards, CaseStudies, CaseStudy, Hero, Page, Quote, Section, Team, TeamMember,
    Text, Vacancies, Vacancy,
};
use blokfront_core::image::{ImageFormat, ImageOptions, build_image_url, build_srcset};
use blokfront_core::link;
use blokfront_core::{Asset, Blok, ContentNode, Link};
use leptos::prelude::*;

const SRCSET_WIDTHS: &[u32] = &[480, 960, 1440];

const HERO_IMAGE: ImageOptions = ImageOptions {
    width: 1440,
    height: 810,
    quality: Some(80),
    format: Some(ImageFormat::Webp),
};

const CARD_IMAGE: ImageOptions = ImageOptions {
    width: 960,
    height: 640,
    quality: Some(75),
    format: Some(ImageFormat::Webp),
};

const PORTRAIT_IMAGE: ImageOptions = ImageOptions {
    width: 480,
    height: 480,
    quality: Some(75),
    format: Some(ImageFormat::Webp),
};

/// Render the content tree of a node.
pub fn render_node(node: &ContentNode, ctx: &ViewContext) -> AnyView {
    render_blok(&node.content, ctx)
}

/// [`render_node`] serialized to an HTML fragment.
pub fn render_node_html(node: &ContentNode, ctx: &ViewContext) -> String {
    render_node(node, ctx).to_html()
}

pub fn render_blok(blok: &Blok, ctx: &ViewContext) -> AnyView {
    match blok {
        Blok::Page(page) => render_page(page, ctx),
        Blok::Hero(hero) => render_hero(hero, ctx),
        Blok::Quote(quote) => render_quote(quote),
        Blok::Team(team) => render_team(team, ctx),
        Blok::TeamMember(member) => render_team_member(member, ctx),
        Blok::Cards(cards) => render_cards(cards, ctx),
        Blok::Card(card) => render_card(card, ctx),
        Blok::CaseStudies(cases) => render_case_studies(cases, ctx),
        Blok::CaseStudy(case) => render_case_study(case, ctx),
        Blok::Vacancies(vacancies) => render_vacancies(vacancies, ctx),
        Blok::Vacancy(vacancy) => render_vacancy(vacancy),
        Blok::Text(text) => render_text(text),
        Blok::Section(section) => render_section(section, ctx),
        Blok::Button(button) => render_button(button, ctx),
        Blok::Unknown { component } => {
            render_placeholder(format!("unknown component: {}", component), None)
        }
        Blok::Malformed { component, reason } => render_placeholder(
            format!("invalid component: {}", component),
            Some(reason.clone()),
        ),
    }
}

fn render_children(bloks: &[Blok], ctx: &ViewContext) -> Vec<AnyView> {
    bloks.iter().map(|blok| render_blok(blok, ctx)).collect()
}

fn render_placeholder(message: String, reason: Option<String>) -> AnyView {
    view! { <div class="unknown-blok" role="note" title=reason>{message}</div> }.into_any()
}

fn render_page(page: &Page, ctx: &ViewContext) -> AnyView {
    let class = format!("page theme-{}", ctx.theme);
    let body = render_children(&page.body, ctx);
    view! { <div class=class>{body}</div> }.into_any()
}

fn render_hero(hero: &Hero, ctx: &ViewContext) -> AnyView {
    let theme = non_empty(hero.theme.as_deref()).unwrap_or_else(|| ctx.theme.to_string());
    let class = format!("hero theme-{}", theme);
    let title = hero.title.clone();
    let subtitle = non_empty(hero.subtitle.as_deref());
    let image = render_image(hero.image.as_ref(), "hero-image", &HERO_IMAGE);
    let buttons = render_children(&hero.buttons, ctx);

    view! {
        <section class=class>
            <div class="hero-content">
                <h1 class="hero-title">{title}</h1>
                {subtitle.map(|s| view! { <p class="hero-subtitle">{s}</p> })}
                <div class="hero-buttons">{buttons}</div>
            </div>
            {image}
        </section>
    }
    .into_any()
}

fn render_quote(quote: &Quote) -> AnyView {
    let text = quote.quote.clone();
    let author = quote.author.clone();
    let role = non_empty(quote.role.as_deref());
    let image = render_image(quote.image.as_ref(), "quote-portrait", &PORTRAIT_IMAGE);

    view! {
        <figure class="quote">
            {image}
            <blockquote>{text}</blockquote>
            <figcaption>
                <span class="quote-author">{author}</span>
                {role.map(|r| view! { <span class="quote-role">{r}</span> })}
            </figcaption>
        </figure>
    }
    .into_any()
}

fn render_team(team: &Team, ctx: &ViewContext) -> AnyView {
    let title = team.title.clone();
    let intro = non_empty(team.intro.as_deref());
    let members = render_children(&team.members, ctx);

    view! {
        <section class="team">
            <h2>{title}</h2>
            {intro.map(|i| view! { <p class="team-intro">{i}</p> })}
            <ul class="team-members">{members}</ul>
        </section>
    }
    .into_any()
}

fn render_team_member(member: &TeamMember, ctx: &ViewContext) -> AnyView {
    let name = member.name.clone();
    let role = non_empty(member.role.as_deref());
    let image = render_image(member.image.as_ref(), "team-portrait", &PORTRAIT_IMAGE);
    let linkedin = resolve_href(member.linkedin.as_ref(), ctx);

    view! {
        <li class="team-member">
            {image}
            <h3>{name}</h3>
            {role.map(|r| view! { <p class="team-role">{r}</p> })}
            {linkedin.map(|href| view! {
                <a class="team-linkedin" href=href target="_blank" rel="noopener">"LinkedIn"</a>
            })}
        </li>
    }
    .into_any()
}

fn render_cards(cards: &Cards, ctx: &ViewContext) -> AnyView {
    let title = non_empty(cards.title.as_deref());
    let items = render_children(&cards.cards, ctx);

    view! {
        <section class="cards">
            {title.map(|t| view! { <h2>{t}</h2> })}
            <div class="cards-grid">{items}</div>
        </section>
    }
    .into_any()
}

fn render_card(card: &Card, ctx: &ViewContext) -> AnyView {
    let title = card.title.clone();
    let text = non_empty(card.text.as_deref());
    let image = render_image(card.image.as_ref(), "card-image", &CARD_IMAGE);
    let href = resolve_href(card.link.as_ref(), ctx);
    let target = link_target(card.link.as_ref());

    let heading = match href {
        Some(href) => view! { <h3><a href=href target=target>{title}</a></h3> }.into_any(),
        None => view! { <h3>{title}</h3> }.into_any(),
    };

    view! {
        <article class="card">
            {image}
            {heading}
            {text.map(|t| view! { <p>{t}</p> })}
        </article>
    }
    .into_any()
}

fn render_case_studies(cases: &CaseStudies, ctx: &ViewContext) -> AnyView {
    let title = non_empty(cases.title.as_deref());
    let items = render_children(&cases.case_studies, ctx);

    view! {
        <section class="case-studies">
            {title.map(|t| view! { <h2>{t}</h2> })}
            <div class="case-studies-list">{items}</div>
        </section>
    }
    .into_any()
}

fn render_case_study(case: &CaseStudy, ctx: &ViewContext) -> AnyView {
    let title = case.title.clone();
    let client = non_empty(case.client.as_deref());
    let summary = non_empty(case.summary.as_deref());
    let image = render_image(case.image.as_ref(), "case-study-image", &CARD_IMAGE);
    let href = resolve_href(case.link.as_ref(), ctx);

    view! {
        <article class="case-study">
            {image}
            {client.map(|c| view! { <p class="case-study-client">{c}</p> })}
            <h3>{title}</h3>
            {summary.map(|s| view! { <p class="case-study-summary">{s}</p> })}
            {href.map(|href| view! { <a class="case-study-link" href=href>"→"</a> })}
        </article>
    }
    .into_any()
}

fn render_vacancies(vacancies: &Vacancies, ctx: &ViewContext) -> AnyView {
    let title = non_empty(vacancies.title.as_deref());

    if ctx.vacancies.is_empty() {
        let empty = non_empty(vacancies.empty_text.as_deref())
            .unwrap_or_else(|| ctx.labels.vacancies_empty.clone());
        return view! {
            <section class="vacancies">
                {title.map(|t| view! { <h2>{t}</h2> })}
                <p class="vacancies-empty">{empty}</p>
            </section>
        }
        .into_any();
    }

    let items: Vec<AnyView> = ctx
        .vacancies
        .iter()
        .map(|vacancy| {
            let href = vacancy.href.clone();
            let title = vacancy.title.clone();
            let details = vacancy_details(vacancy.location.as_deref(), vacancy.hours.as_deref());
            view! {
                <li class="vacancy-item">
                    <a href=href>{title}</a>
                    {details.map(|d| view! { <span class="vacancy-details">{d}</span> })}
                </li>
            }
            .into_any()
        })
        .collect();

    view! {
        <section class="vacancies">
            {title.map(|t| view! { <h2>{t}</h2> })}
            <ul class="vacancies-list">{items}</ul>
        </section>
    }
    .into_any()
}

fn render_vacancy(vacancy: &Vacancy) -> AnyView {
    let title = vacancy.title.clone();
    let details = vacancy_details(vacancy.location.as_deref(), vacancy.hours.as_deref());
    let summary = non_empty(vacancy.summary.as_deref());
    let body = markdown::to_html(&vacancy.body);

    view! {
        <article class="vacancy">
            <header>
                <h1>{title}</h1>
                {details.map(|d| view! { <p class="vacancy-details">{d}</p> })}
            </header>
            {summary.map(|s| view! { <p class="vacancy-summary">{s}</p> })}
            <div class="rich-text" inner_html=body></div>
        </article>
    }
    .into_any()
}

fn render_text(text: &Text) -> AnyView {
    let body = markdown::to_html(&text.body);
    view! { <div class="rich-text" inner_html=body></div> }.into_any()
}

fn render_section(section: &Section, ctx: &ViewContext) -> AnyView {
    let theme = non_empty(section.theme.as_deref()).unwrap_or_else(|| ctx.theme.to_string());
    let class = format!("section theme-{}", theme);
    let title = non_empty(section.title.as_deref());
    let body = render_children(&section.body, ctx);

    view! {
        <section class=class>
            {title.map(|t| view! { <h2>{t}</h2> })}
            <div class="section-body">{body}</div>
        </section>
    }
    .into_any()
}

fn render_button(button: &Button, ctx: &ViewContext) -> AnyView {
    let variant = non_empty(button.variant.as_deref()).unwrap_or_else(|| "primary".to_string());
    let class = format!("button button-{}", variant);
    let label = button.label.clone();
    let target = link_target(button.link.as_ref());

    match resolve_href(button.link.as_ref(), ctx) {
        Some(href) => view! { <a class=class href=href target=target>{label}</a> }.into_any(),
        None => view! { <span class=class>{label}</span> }.into_any(),
    }
}

fn render_image(
    asset: Option<&Asset>,
    class: &'static str,
    options: &ImageOptions,
) -> Option<AnyView> {
    let asset = asset.filter(|a| !a.is_empty())?;
    let src = build_image_url(&asset.filename, options);
    let widths: Vec<u32> = SRCSET_WIDTHS
        .iter()
        .copied()
        .filter(|w| *w <= options.width)
        .collect();
    let srcset = Some(build_srcset(&asset.filename, &widths, options)).filter(|s| !s.is_empty());
    let alt = asset.alt.clone().unwrap_or_default();

    Some(view! { <img class=class src=src srcset=srcset alt=alt loading="lazy"/> }.into_any())
}

fn resolve_href(link: Option<&Link>, ctx: &ViewContext) -> Option<String> {
    link.and_then(|l| link::resolve(ctx.locales, l, ctx.locale))
}

fn link_target(link: Option<&Link>) -> Option<String> {
    link.and_then(|l| non_empty(l.target.as_deref()))
}

fn vacancy_details(location: Option<&str>, hours: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [location, hours]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
