//! Typed CMS content.
//!
//! Every blok carries a `component` discriminant. Known discriminants map to
//! one variant each; anything else is kept as [`Blok::Unknown`] and a known
//! discriminant whose fields do not parse becomes [`Blok::Malformed`].
//! Decoding a single blok never fails, so one bad entry in a nested list
//! cannot take its siblings down with it.

use crate::types::{Asset, Link, Metatags};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Blok {
    Page(Page),
    Hero(Hero),
    Quote(Quote),
    Team(Team),
    TeamMember(TeamMember),
    Cards(Cards),
    Card(Card),
    CaseStudies(CaseStudies),
    CaseStudy(CaseStudy),
    Vacancies(Vacancies),
    Vacancy(Vacancy),
    Text(Text),
    Section(Section),
    Button(Button),
    Unknown { component: String },
    Malformed { component: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Page {
    pub body: Vec<Blok>,
    #[serde(deserialize_with = "lenient")]
    pub metatags: Option<Metatags>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: String,
    pub subtitle: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Asset>,
    pub buttons: Vec<Blok>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Team {
    pub title: String,
    pub intro: Option<String>,
    pub members: Vec<Blok>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Asset>,
    #[serde(deserialize_with = "lenient")]
    pub linkedin: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Cards {
    pub title: Option<String>,
    pub cards: Vec<Blok>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Card {
    pub title: String,
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Asset>,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaseStudies {
    pub title: Option<String>,
    pub case_studies: Vec<Blok>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaseStudy {
    pub title: String,
    pub client: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<Asset>,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<Link>,
}

/// Listing of all open job postings. The postings themselves are not part
/// of the blok; they are supplied by the caller when rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vacancies {
    pub title: Option<String>,
    pub empty_text: Option<String>,
}

/// A single job posting page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vacancy {
    pub title: String,
    pub location: Option<String>,
    pub hours: Option<String>,
    pub summary: Option<String>,
    /// Markdown
    pub body: String,
    #[serde(deserialize_with = "lenient")]
    pub metatags: Option<Metatags>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Text {
    /// Markdown
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub body: Vec<Blok>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Button {
    pub label: String,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<Link>,
    pub variant: Option<String>,
}

impl Blok {
    /// Decode a blok from CMS JSON.
    pub fn from_value(value: Value) -> Blok {
        let Some(component) = value.get("component").and_then(Value::as_str) else {
            return Blok::Malformed {
                component: String::new(),
                reason: "missing component field".to_string(),
            };
        };
        let component = component.to_string();

        let parsed = match component.as_str() {
            "page" => decode(value).map(Blok::Page),
            "hero" => decode(value).map(Blok::Hero),
            "quote" => decode(value).map(Blok::Quote),
            "team" => decode(value).map(Blok::Team),
            "team_member" => decode(value).map(Blok::TeamMember),
            "cards" => decode(value).map(Blok::Cards),
            "card" => decode(value).map(Blok::Card),
            "case_studies" => decode(value).map(Blok::CaseStudies),
            "case_study" => decode(value).map(Blok::CaseStudy),
            "vacancies" => decode(value).map(Blok::Vacancies),
            "vacancy" => decode(value).map(Blok::Vacancy),
            "text" => decode(value).map(Blok::Text),
            "section" => decode(value).map(Blok::Section),
            "button" => decode(value).map(Blok::Button),
            _ => {
                return Blok::Unknown {
                    component: component.clone(),
                };
            }
        };

        parsed.unwrap_or_else(|e| Blok::Malformed {
            component,
            reason: e.to_string(),
        })
    }

    /// The `component` discriminant this blok was authored with.
    pub fn component(&self) -> &str {
        match self {
            Blok::Page(_) => "page",
            Blok::Hero(_) => "hero",
            Blok::Quote(_) => "quote",
            Blok::Team(_) => "team",
            Blok::TeamMember(_) => "team_member",
            Blok::Cards(_) => "cards",
            Blok::Card(_) => "card",
            Blok::CaseStudies(_) => "case_studies",
            Blok::CaseStudy(_) => "case_study",
            Blok::Vacancies(_) => "vacancies",
            Blok::Vacancy(_) => "vacancy",
            Blok::Text(_) => "text",
            Blok::Section(_) => "section",
            Blok::Button(_) => "button",
            Blok::Unknown { component } | Blok::Malformed { component, .. } => component,
        }
    }

    /// Directly nested bloks, in authored order.
    pub fn children(&self) -> &[Blok] {
        match self {
            Blok::Page(page) => &page.body,
            Blok::Hero(hero) => &hero.buttons,
            Blok::Team(team) => &team.members,
            Blok::Cards(cards) => &cards.cards,
            Blok::CaseStudies(cases) => &cases.case_studies,
            Blok::Section(section) => &section.body,
            _ => &[],
        }
    }

    /// True if this blok or any blok nested below it matches `pred`.
    pub fn contains(&self, pred: &dyn Fn(&Blok) -> bool) -> bool {
        pred(self) || self.children().iter().any(|child| child.contains(pred))
    }

    pub fn metatags(&self) -> Option<&Metatags> {
        match self {
            Blok::Page(page) => page.metatags.as_ref(),
            Blok::Vacancy(vacancy) => vacancy.metatags.as_ref(),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Blok {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Blok::from_value(value))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    serde_json::from_value(value)
}

/// The CMS sends empty strings or `null` for unset object fields; treat
/// anything that does not decode as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
