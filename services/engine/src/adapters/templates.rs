//! services/engine/src/adapters/templates.rs
//!
//! A template-based implementation of the `ArticleGenerator` port.
//!
//! Every article is assembled from a fixed set of section kinds, each rendered
//! by a pure function. A topic starts with the short variant of its template.
//! Once a scored draft has fallen short on any dimension, the expanded variant
//! is rendered instead, which adds the practical sections in front of the
//! conclusion.

use async_trait::async_trait;
use chrono::Datelike;
use content_quality_core::domain::{ArticleDraft, Dimension};
use content_quality_core::ports::{ArticleGenerator, GenerationRequest, PortResult};
use regex::Regex;
use tracing::debug;

//=========================================================================================
// Sections
//=========================================================================================

/// The closed set of sections an article can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Introduction,
    Benefits,
    ImplementationSteps,
    CaseStudies,
    FutureTrends,
    Faq,
    Conclusion,
}

/// Values the section renderers interpolate.
#[derive(Debug, Clone)]
pub struct SectionContext {
    pub subject: String,
    pub year: i32,
}

impl SectionKind {
    pub fn render(self, ctx: &SectionContext) -> String {
        match self {
            SectionKind::Introduction => introduction(ctx),
            SectionKind::Benefits => benefits(ctx),
            SectionKind::ImplementationSteps => implementation_steps(ctx),
            SectionKind::CaseStudies => case_studies(ctx),
            SectionKind::FutureTrends => future_trends(ctx),
            SectionKind::Faq => faq(ctx),
            SectionKind::Conclusion => conclusion(ctx),
        }
    }
}

fn introduction(ctx: &SectionContext) -> String {
    let SectionContext { subject, year } = ctx;
    format!(
        "<h2>Why {subject} matters in {year}</h2>\
         <p>Many firms in Sweden want to work faster and waste less. The tools they pick have a big say in how well that goes. \
         In this guide we look at {subject} and what it can do for a small or a large firm. We keep it plain and close to real work.</p>\
         <p>You will learn what {subject} is, where it helps the most and how to get started. We also share what we have seen at firms \
         that made the move. Most of them began with one small test. They then grew the setup step by step as the team got used to it.</p>\
         <p>Read on to see if {subject} fits your needs this year. If it does, we can help you plan the first steps.</p>"
    )
}

fn benefits(ctx: &SectionContext) -> String {
    let subject = &ctx.subject;
    format!(
        "<h2>The main gains of {subject}</h2>\
         <p>The first gain is time. Staff spend less time on manual checks and more time on the work that counts. \
         The second gain is better data. You see what goes on as it happens, not a week later.</p>\
         <ul>\
         <li><strong>Less manual work:</strong> routine tasks run on their own.</li>\
         <li><strong>Fewer errors:</strong> data is read the same way each time.</li>\
         <li><strong>Clear reports:</strong> you can act on facts, not guesses.</li>\
         </ul>\
         <p>There is also a gain in trust. When your data is right, your team and your clients can rely on it. \
         That makes it easier to plan and to keep your promises.</p>"
    )
}

fn implementation_steps(ctx: &SectionContext) -> String {
    let subject = &ctx.subject;
    format!(
        "<h2>How to get started with {subject}</h2>\
         <p>A good start saves a lot of time later. Here is the plan we use with most of our clients. \
         It works for a small shop as well as for a large plant.</p>\
         <ol>\
         <li><strong>Map the need:</strong> write down what you want to fix and how you will know that it works.</li>\
         <li><strong>Pick the right kit:</strong> choose tools that fit your site, your staff and your budget.</li>\
         <li><strong>Run a small test:</strong> try the setup in one place for a few weeks.</li>\
         <li><strong>Train the team:</strong> show each user what to do and why it helps them.</li>\
         <li><strong>Roll it out:</strong> grow the setup to more sites when the test goes well.</li>\
         </ol>\
         <p>Keep each step short and clear. Check the data after each week of the test. Ask the staff what works and what does not. \
         Small fixes early on make the full roll out much more smooth.</p>\
         <p>It also helps to put one person in charge of the project. That person keeps track of the plan and makes sure that no step is missed. \
         They are also the one the staff can turn to with a question.</p>"
    )
}

fn case_studies(ctx: &SectionContext) -> String {
    let subject = &ctx.subject;
    format!(
        "<h2>How {subject} works in real life</h2>\
         <h3>A store in Stockholm</h3>\
         <p>A store in Stockholm had trouble keeping track of its stock. They put {subject} to use in one part of the store first. \
         After three months they saw fewer lost goods and faster counts. The staff said the new way of work was easy to learn.</p>\
         <h3>A plant in Göteborg</h3>\
         <p>A plant in Göteborg wanted a better view of its flow of goods and time. With {subject} in place they cut the time spent on checks by a third. \
         They now use the data each week to plan their work.</p>\
         <p>Both firms started small. Both used the first test to learn and to adjust. That is the pattern we see again and again. \
         The firms that do best are the ones that keep on making small changes after the launch.</p>"
    )
}

fn future_trends(ctx: &SectionContext) -> String {
    let SectionContext { subject, year } = ctx;
    format!(
        "<h2>What comes next for {subject} after {year}</h2>\
         <p>The tools keep getting better and cost less each year. More and more of them now talk to each other over the net. \
         That means your data can flow from one system to the next with no extra work.</p>\
         <p>We also see a shift to the cloud. Firms want to see their data on the go, from a phone or a tablet. \
         Good tools now make that easy and safe.</p>\
         <ul>\
         <li><strong>Smart links:</strong> tools that share data in real time.</li>\
         <li><strong>Cloud views:</strong> reports you can see from any place.</li>\
         <li><strong>Lower cost:</strong> kit that pays for itself in a short time.</li>\
         </ul>\
         <p>Firms that start now will be in a good place to make use of these trends.</p>"
    )
}

fn faq(ctx: &SectionContext) -> String {
    let subject = &ctx.subject;
    format!(
        "<h2>Common questions about {subject}</h2>\
         <h3>Is it hard to set up?</h3>\
         <p>No. Most setups take a few days. We help you with each step so that your team can focus on its work.</p>\
         <h3>What does it cost?</h3>\
         <p>The cost depends on the size of your site and the tools you need. A small test is often cheap and shows you the value fast.</p>\
         <h3>Can it work with the system we use now?</h3>\
         <p>In most cases it can. Modern tools can send data to the systems you use today. We check this with you before you buy.</p>\
         <h3>How fast will we see results?</h3>\
         <p>Many of our clients see the first gains within a month. The full effect often comes after half a year.</p>"
    )
}

fn conclusion(ctx: &SectionContext) -> String {
    let subject = &ctx.subject;
    format!(
        "<h2>Next steps</h2>\
         <p>Getting started with {subject} is not just for big firms. With a clear plan and the right partner, any firm can start small and grow from there. \
         Begin with one site or one team. Measure the result and then take the next step.</p>\
         <p>Do you want to know more? Feel free to contact us and we will help you find a good way forward.</p>"
    )
}

//=========================================================================================
// Topic Templates
//=========================================================================================

/// A link back into the site, inserted around its anchor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLink {
    pub href: String,
    pub anchor: String,
}

impl InternalLink {
    fn new(href: &str, anchor: &str) -> Self {
        Self {
            href: href.to_string(),
            anchor: anchor.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTemplate {
    pub subject: String,
    pub title: String,
    pub sections: Vec<SectionKind>,
    pub links: Vec<InternalLink>,
}

const SHORT_SECTIONS: [SectionKind; 3] = [
    SectionKind::Introduction,
    SectionKind::Benefits,
    SectionKind::Conclusion,
];

/// Sections added in front of the conclusion when a draft is regenerated.
const EXPANSION_SECTIONS: [SectionKind; 4] = [
    SectionKind::ImplementationSteps,
    SectionKind::CaseStudies,
    SectionKind::FutureTrends,
    SectionKind::Faq,
];

impl TopicTemplate {
    /// The template for a topic key, or a generic one built from the key.
    pub fn for_topic(topic: &str) -> Self {
        let contact = InternalLink::new("/kontakta-oss/", "contact us");
        let (subject, title, mut links) = match topic {
            "rfid_technology" => (
                "RFID technology".to_string(),
                "RFID technology: a practical guide for Swedish firms".to_string(),
                vec![
                    InternalLink::new("/produkt/rfid-lasare/", "RFID readers"),
                    InternalLink::new("/produkt/rfid-taggar/", "RFID tags"),
                    InternalLink::new("/tjanster/rfid-implementation/", "RFID implementation"),
                    InternalLink::new("/rfid-losningar/", "RFID solutions"),
                ],
            ),
            "time_tracking" => (
                "time tracking".to_string(),
                "Time tracking made simple: a guide for modern firms".to_string(),
                vec![
                    InternalLink::new("/produkt/tidterminal/", "time clocks"),
                    InternalLink::new("/produkt/tidrapportering/", "time reporting"),
                    InternalLink::new("/tjanster/tidhantering/", "time management services"),
                    InternalLink::new("/tidterminal/", "time terminals"),
                ],
            ),
            "interactive_floor" => (
                "interactive floors".to_string(),
                "Interactive floors: how play and learning come together".to_string(),
                vec![
                    InternalLink::new("/produkt/active-floor/", "Active Floor"),
                    InternalLink::new("/produkt/lekgolv-spel/", "floor games"),
                    InternalLink::new("/tjanster/active-floor/", "Active Floor services"),
                    InternalLink::new("/active-floor/", "interactive play"),
                ],
            ),
            other => {
                let subject = other.replace('_', " ").trim().to_string();
                let title = format!("{}: a complete guide for modern firms", capitalize(&subject));
                (
                    subject,
                    title,
                    vec![
                        InternalLink::new("/produkt/rfid-lasare/", "RFID readers"),
                        InternalLink::new("/tjanster/konsultation/", "consulting services"),
                        InternalLink::new("/produkt/interaktiva-lekgolv/", "interactive solutions"),
                        InternalLink::new("/tjanster/", "our services"),
                    ],
                )
            }
        };
        links.push(contact);

        Self {
            subject,
            title,
            sections: SHORT_SECTIONS.to_vec(),
            links,
        }
    }

    /// The same template with the expansion sections placed before the conclusion.
    pub fn expanded(mut self) -> Self {
        let conclusion_at = self
            .sections
            .iter()
            .position(|s| *s == SectionKind::Conclusion)
            .unwrap_or(self.sections.len());
        for (offset, section) in EXPANSION_SECTIONS.into_iter().enumerate() {
            self.sections.insert(conclusion_at + offset, section);
        }
        self
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//=========================================================================================
// Link Insertion
//=========================================================================================

/// Wraps the first plain-text occurrence of the link's anchor in an `<a>` tag.
/// When the anchor does not occur outside existing tags, links, and headings,
/// the link is appended to the last paragraph instead.
pub fn insert_link(body: &str, link: &InternalLink) -> String {
    let tag = |text: &str| format!("<a href=\"{}\">{}</a>", link.href, text);

    let found = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&link.anchor)))
        .ok()
        .and_then(|re| {
            re.find_iter(body)
                .find(|m| is_plain_text(&body[..m.start()]))
        });
    if let Some(m) = found {
        return format!("{}{}{}", &body[..m.start()], tag(m.as_str()), &body[m.end()..]);
    }

    let appended = format!(" Read more about {}.", tag(&link.anchor));
    match body.rfind("</p>") {
        Some(at) => format!("{}{}{}", &body[..at], appended, &body[at..]),
        None => format!("{}<p>{}</p>", body, appended.trim_start()),
    }
}

/// True when a position right after `before` is outside any tag, link, or heading.
fn is_plain_text(before: &str) -> bool {
    let after = |open: Option<usize>, close: Option<usize>| match (open, close) {
        (Some(o), Some(c)) => o > c,
        (Some(_), None) => true,
        _ => false,
    };
    let in_tag = after(before.rfind('<'), before.rfind('>'));
    let in_link = after(before.rfind("<a "), before.rfind("</a>"));
    let in_heading = after(before.rfind("<h"), before.rfind("</h"));
    !(in_tag || in_link || in_heading)
}

//=========================================================================================
// The Generator Adapter
//=========================================================================================

/// Renders articles from topic templates. Pure apart from reading the clock for
/// the year, which can be pinned for reproducible output.
#[derive(Debug, Clone, Default)]
pub struct TemplateArticleGenerator {
    year: Option<i32>,
}

impl TemplateArticleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }

    pub fn render(&self, request: &GenerationRequest) -> ArticleDraft {
        let template = TopicTemplate::for_topic(&request.topic);
        let template = if request.weak_dimensions.is_empty() {
            template
        } else {
            template.expanded()
        };
        let ctx = SectionContext {
            subject: template.subject.clone(),
            year: self.year.unwrap_or_else(|| chrono::Utc::now().year()),
        };

        let body = template
            .sections
            .iter()
            .map(|section| section.render(&ctx))
            .collect::<String>();
        let body = template
            .links
            .iter()
            .fold(body, |body, link| insert_link(&body, link));

        debug!(
            topic = %request.topic,
            attempt = request.attempt,
            sections = template.sections.len(),
            weak = ?request.weak_dimensions,
            "Rendered article template."
        );
        ArticleDraft::new(template.title, body, request.topic.clone())
    }
}

#[async_trait]
impl ArticleGenerator for TemplateArticleGenerator {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<ArticleDraft> {
        Ok(self.render(request))
    }
}
