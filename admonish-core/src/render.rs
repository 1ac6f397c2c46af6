//! HTML construction for admonitions
//!
//! Element structure:
//!
//! ```text
//! <div|details>.admonition.admonition-<kind>
//!     <div|summary>.admonition-title
//!         div.admonition-title-content
//!             div.admonition-title-icon
//!             div.admonition-title-markdown
//!         div.collapser > div.handle        (collapsible only)
//!     div.admonition-content
//! ```

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

use crate::descriptor::{BlockType, IconDefinition, IconKind};
use crate::params::{Collapse, Parameters};

/// Resolves an icon reference to inline markup
pub trait IconResolver {
    fn resolve(&self, icon: &IconDefinition) -> Option<String>;
}

/// Emits class-based icon markup for a stylesheet or icon font to pick up
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassIconResolver;

impl IconResolver for ClassIconResolver {
    fn resolve(&self, icon: &IconDefinition) -> Option<String> {
        if icon.name.is_empty() {
            return None;
        }
        let name = encode_double_quoted_attribute(&icon.name);
        let markup = match icon.kind {
            IconKind::FontAwesome => {
                format!("<span class=\"admonition-icon fa fa-{name}\" aria-hidden=\"true\"></span>")
            }
            IconKind::Rpg => {
                format!("<span class=\"admonition-icon ra ra-{name}\" aria-hidden=\"true\"></span>")
            }
            IconKind::Image => format!("<img class=\"admonition-icon\" src=\"{name}\" alt=\"\">"),
        };
        Some(markup)
    }
}

/// Markdown to HTML conversion
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl MarkdownRenderer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Render a Markdown fragment to HTML
    pub fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(text, self.options));
        out
    }

    /// Render a title line without its wrapping paragraph
    pub fn render_inline(&self, text: &str) -> String {
        let events = Parser::new_ext(text, self.options).filter(|event| {
            !matches!(event, Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph))
        });
        let mut out = String::new();
        html::push_html(&mut out, events);
        out.trim_end().to_string()
    }
}

/// Everything needed to build one admonition element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admonition {
    pub kind: String,
    pub title: Option<String>,
    pub collapse: Option<Collapse>,
    pub icon: Option<IconDefinition>,
    pub color: Option<String>,
    /// Already rendered body
    pub body_html: String,
}

impl Admonition {
    /// Combine parsed parameters with the type's defaults
    pub fn new(kind: &str, params: Parameters, block_type: &BlockType, body_html: String) -> Self {
        let icon = match params.icon {
            Some(name) => Some(IconDefinition {
                name,
                kind: block_type
                    .icon
                    .as_ref()
                    .map_or(IconKind::FontAwesome, |icon| icon.kind),
            }),
            None => block_type.icon.clone(),
        };

        Self {
            kind: kind.to_string(),
            title: params.title,
            collapse: params.collapse,
            icon,
            color: params.color.or_else(|| block_type.color.clone()),
            body_html,
        }
    }

    pub fn is_collapsible(&self) -> bool {
        self.collapse.is_some_and(Collapse::is_collapsible)
    }
}

/// Build the HTML element for an admonition
pub fn render_admonition(
    admonition: &Admonition,
    markdown: &MarkdownRenderer,
    icons: &dyn IconResolver,
) -> String {
    let collapsible = admonition.is_collapsible();
    let (tag, title_tag) = if collapsible {
        ("details", "summary")
    } else {
        ("div", "div")
    };

    let mut out = String::new();
    out.push_str(&format!(
        "<{tag} class=\"admonition admonition-{}\"",
        encode_double_quoted_attribute(&admonition.kind)
    ));
    if let Some(color) = &admonition.color {
        out.push_str(&format!(
            " style=\"--admonition-color: {};\"",
            encode_double_quoted_attribute(color)
        ));
    }
    if admonition.collapse == Some(Collapse::Open) {
        out.push_str(" open");
    }
    out.push_str(">\n");

    let title = admonition.title.as_deref().unwrap_or("");
    let title_class = if title.trim().is_empty() {
        "admonition-title no-title"
    } else {
        "admonition-title"
    };
    out.push_str(&format!("<{title_tag} class=\"{title_class}\">"));

    if !title.is_empty() {
        out.push_str("<div class=\"admonition-title-content\">");
        out.push_str("<div class=\"admonition-title-icon\">");
        if let Some(icon) = admonition.icon.as_ref().and_then(|icon| icons.resolve(icon)) {
            out.push_str(&icon);
        }
        out.push_str("</div>");
        out.push_str(&format!(
            "<div class=\"admonition-title-markdown\">{}</div>",
            markdown.render_inline(title)
        ));
        out.push_str("</div>");
    }

    if collapsible {
        out.push_str("<div class=\"collapser\"><div class=\"handle\"></div></div>");
    }
    out.push_str(&format!("</{title_tag}>\n"));

    out.push_str("<div class=\"admonition-content\">\n");
    out.push_str(&admonition.body_html);
    out.push_str("</div>\n");
    out.push_str(&format!("</{tag}>\n"));

    out
}

/// Plain-text fallback for a block that could not be rendered
pub fn render_raw(text: &str) -> String {
    format!("<pre class=\"admonition-raw\">{}</pre>\n", encode_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admonition(title: Option<&str>, collapse: Option<Collapse>) -> Admonition {
        Admonition {
            kind: "note".to_string(),
            title: title.map(str::to_string),
            collapse,
            icon: Some(IconDefinition::font_awesome("pencil-alt")),
            color: Some("68, 138, 255".to_string()),
            body_html: "<p>Body</p>\n".to_string(),
        }
    }

    fn render(admonition: &Admonition) -> String {
        render_admonition(admonition, &MarkdownRenderer::default(), &ClassIconResolver)
    }

    #[test]
    fn test_plain_admonition() {
        let html = render(&admonition(Some("Note"), None));
        assert!(html.starts_with(
            "<div class=\"admonition admonition-note\" style=\"--admonition-color: 68, 138, 255;\">"
        ));
        assert!(html.contains("<div class=\"admonition-title\">"));
        assert!(html.contains("fa fa-pencil-alt"));
        assert!(html.contains("<div class=\"admonition-title-markdown\">Note</div>"));
        assert!(html.contains("<div class=\"admonition-content\">\n<p>Body</p>\n</div>"));
        assert!(!html.contains("collapser"));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_collapse_none_is_not_collapsible() {
        let html = render(&admonition(Some("Note"), Some(Collapse::None)));
        assert!(!html.contains("<details"));
    }

    #[test]
    fn test_open_collapsible() {
        let html = render(&admonition(Some("Note"), Some(Collapse::Open)));
        assert!(html.starts_with("<details class=\"admonition admonition-note\""));
        assert!(html.contains(" open>"));
        assert!(html.contains("<summary class=\"admonition-title\">"));
        assert!(html.contains("<div class=\"collapser\"><div class=\"handle\"></div></div></summary>"));
        assert!(html.ends_with("</details>\n"));
    }

    #[test]
    fn test_closed_collapsible() {
        let html = render(&admonition(Some("Note"), Some(Collapse::Closed)));
        assert!(html.starts_with("<details"));
        assert!(!html.contains(" open>"));
    }

    #[test]
    fn test_missing_title() {
        let html = render(&admonition(None, None));
        assert!(html.contains("admonition-title no-title"));
        assert!(!html.contains("admonition-title-content"));

        let html = render(&admonition(Some(""), None));
        assert!(html.contains("admonition-title no-title"));
    }

    #[test]
    fn test_title_markdown_is_rendered_inline() {
        let html = render(&admonition(Some("A *bold* move"), None));
        assert!(html.contains(
            "<div class=\"admonition-title-markdown\">A <em>bold</em> move</div>"
        ));
    }

    #[test]
    fn test_attributes_escaped() {
        let mut adm = admonition(Some("T"), None);
        adm.color = Some("red\" onclick=\"x".to_string());
        let html = render(&adm);
        assert!(!html.contains("onclick=\"x"));
    }

    #[test]
    fn test_parameters_override_type_defaults() {
        let block_type = BlockType {
            color: Some("0, 0, 0".to_string()),
            icon: Some(IconDefinition::font_awesome("bolt")),
            ..BlockType::default()
        };
        let params = Parameters {
            title: Some("T".to_string()),
            icon: Some("star".to_string()),
            ..Parameters::default()
        };
        let adm = Admonition::new("danger", params, &block_type, String::new());
        assert_eq!(adm.icon, Some(IconDefinition::font_awesome("star")));
        assert_eq!(adm.color.as_deref(), Some("0, 0, 0"));
    }

    #[test]
    fn test_icon_resolver_kinds() {
        let resolver = ClassIconResolver;
        let rpg = IconDefinition {
            name: "sword".to_string(),
            kind: IconKind::Rpg,
        };
        assert!(resolver.resolve(&rpg).unwrap().contains("ra ra-sword"));

        let image = IconDefinition {
            name: "icon.png".to_string(),
            kind: IconKind::Image,
        };
        assert!(resolver.resolve(&image).unwrap().contains("src=\"icon.png\""));
        assert_eq!(resolver.resolve(&IconDefinition::font_awesome("")), None);
    }

    #[test]
    fn test_render_raw_escapes() {
        assert_eq!(
            render_raw("<b>x</b>"),
            "<pre class=\"admonition-raw\">&lt;b&gt;x&lt;/b&gt;</pre>\n"
        );
    }
}
