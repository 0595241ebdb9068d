//! HTML rendering of the derived view model
//!
//! Produces the filter form followed by the list container: one
//! `<section>` per group with an `<h3>` label, the area blurb when arranged
//! by area, and a `<dl>` of rows.

use crate::error::RenderError;
use crate::pipeline::{Group, SingleBreak, Tag};
use crate::state::{Arrangement, ListState};
use breaks_model::{Area, AreaCatalog, Wcag2Catalog, WcagVersion};
use std::borrow::Cow;

const PHOTOSENSITIVITY_MARKER: &str =
    r#"<strong class="photosensitivity">(Photosensitivity warning)</strong>"#;
const DISCUSSION_LABEL: &str =
    r#"<div><strong class="discussion-item">Discussion items:</strong></div>"#;

/// Renderer bound to the catalogs used for labels and links
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer<'c> {
    wcag2: &'c Wcag2Catalog,
    areas: &'c AreaCatalog,
    base_url: &'c str,
    focus_list: bool,
}

impl<'c> HtmlRenderer<'c> {
    /// Create renderer; area links are `base_url` + the area path
    #[must_use]
    pub fn new(wcag2: &'c Wcag2Catalog, areas: &'c AreaCatalog, base_url: &'c str) -> Self {
        Self {
            wcag2,
            areas,
            base_url,
            focus_list: false,
        }
    }

    /// Mark the list container as the focus target
    #[must_use]
    pub fn with_list_focus(mut self, focus: bool) -> Self {
        self.focus_list = focus;
        self
    }

    /// Form and list for `state`
    ///
    /// # Errors
    /// `RenderError` when a row cannot be labelled.
    pub fn render(&self, state: &ListState, groups: &[Group<'_>]) -> Result<String, RenderError> {
        let mut out = render_form(state);
        out.push_str(&self.render_list(state, groups)?);
        Ok(out)
    }

    /// List container only
    ///
    /// # Errors
    /// `RenderError::UnresolvedArea` for a location missing from the area
    /// catalog, `RenderError::UnknownCriterion` for a criterion without a
    /// title, `RenderError::MissingTag` when rows were derived for another
    /// version.
    pub fn render_list(
        &self,
        state: &ListState,
        groups: &[Group<'_>],
    ) -> Result<String, RenderError> {
        let mut out = String::from(if self.focus_list {
            "<div tabindex=\"-1\" autofocus>\n"
        } else {
            "<div tabindex=\"-1\">\n"
        });

        for group in groups {
            let head = group.head();
            let (heading, blurb) = match state.arrangement {
                Arrangement::Area => {
                    let area = self.area(head)?;
                    (self.area_link(area), area.description.as_deref())
                }
                Arrangement::Failure => (self.wcag_label(head, state.version)?, None),
            };

            out.push_str(&format!("<section>\n<h3>{heading}</h3>\n"));
            if let Some(blurb) = blurb {
                out.push_str(&format!("<p>{}</p>\n", escape(blurb)));
            }
            out.push_str("<dl>\n");
            for row in &group.rows {
                let term = match state.arrangement {
                    Arrangement::Area => self.wcag_label(row, state.version)?,
                    Arrangement::Failure => self.area_link(self.area(row)?),
                };
                out.push_str(&format!("<dt>{term}</dt>\n"));
                for line in &row.description {
                    out.push_str(&format!("<dd>{}{}</dd>\n", escape(line), discussion(row)));
                }
            }
            out.push_str("</dl>\n</section>\n");
        }

        out.push_str("</div>\n");
        Ok(out)
    }

    fn area(&self, row: &SingleBreak<'_>) -> Result<&'c Area, RenderError> {
        self.areas
            .get(row.location.as_str())
            .ok_or_else(|| RenderError::unresolved_area(row.id, row.location.as_str()))
    }

    fn area_link(&self, area: &Area) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            escape(&area.href(self.base_url)),
            escape(area.id.as_str())
        )
    }

    fn wcag_label(&self, row: &SingleBreak<'_>, version: WcagVersion) -> Result<String, RenderError> {
        let label = match (version, row.tag) {
            (WcagVersion::V2, Tag::Wcag2(criterion)) => {
                if self.wcag2.title(criterion.as_str()).is_none() {
                    return Err(RenderError::UnknownCriterion {
                        id: row.id.to_string(),
                        criterion: criterion.to_string(),
                    });
                }
                self.wcag2.label(criterion)
            }
            (WcagVersion::V3, Tag::Wcag3(requirement)) => requirement.to_string(),
            _ => {
                return Err(RenderError::MissingTag {
                    id: row.id.to_string(),
                    version,
                })
            }
        };

        let mut out = escape(&label).into_owned();
        if row.photosensitivity {
            out.push(' ');
            out.push_str(PHOTOSENSITIVITY_MARKER);
        }
        Ok(out)
    }
}

/// Filter form with the current state preselected
#[must_use]
pub fn render_form(state: &ListState) -> String {
    let version = select(
        "version",
        "v",
        "WCAG version:",
        &[("2", "2"), ("3", "3")],
        state.version.as_str(),
    );
    let arrangement = select(
        "arrangement",
        "a",
        "Arrange by:",
        &[("area", "Site area"), ("failure", "Failure")],
        state.arrangement.as_str(),
    );
    format!(
        "<form>\n{version}{arrangement}<div><label for=\"query\">Filter:</label> \
         <input id=\"query\" name=\"q\" value=\"{}\"></div>\n\
         <div><button>Apply</button></div>\n</form>\n",
        escape(&state.query)
    )
}

fn select(id: &str, name: &str, label: &str, options: &[(&str, &str)], current: &str) -> String {
    let options: String = options
        .iter()
        .map(|(value, text)| {
            let selected = if *value == current { " selected" } else { "" };
            format!("<option value=\"{value}\"{selected}>{text}</option>")
        })
        .collect();
    format!(
        "<div><label for=\"{id}\">{label}</label> <select id=\"{id}\" name=\"{name}\">{options}</select></div>\n"
    )
}

fn discussion(row: &SingleBreak<'_>) -> String {
    match row.discussion_items {
        None => String::new(),
        Some(items) => {
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", escape(item)))
                .collect();
            format!("{DISCUSSION_LABEL}<ul>{items}</ul>")
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::BreakPipeline;
    use breaks_test_utils::{
        area_catalog, minimal_wcag2_catalog, wcag2_catalog, BreakBuilder, BASE_URL,
    };

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn form_preselects_state() {
        let state = ListState::new(Arrangement::Failure, WcagVersion::V3, "a\"b");
        let form = render_form(&state);
        assert!(form.contains("<option value=\"3\" selected>3</option>"));
        assert!(form.contains("<option value=\"failure\" selected>Failure</option>"));
        assert!(form.contains("<option value=\"area\">Site area</option>"));
        assert!(form.contains("value=\"a&quot;b\""));
    }

    #[test]
    fn area_arrangement_links_area_and_shows_blurb() {
        let (wcag2, areas) = (wcag2_catalog(), area_catalog());
        let breaks = vec![BreakBuilder::new("x", "Exhibits")
            .description(&["Vase photo lacks alt"])
            .wcag2(&["1.1.1"])
            .photosensitive()
            .build()];
        let state = ListState::default();
        let groups = BreakPipeline::new(&wcag2, &state).derive(&breaks);
        let html = HtmlRenderer::new(&wcag2, &areas, BASE_URL)
            .render_list(&state, &groups)
            .unwrap();

        assert!(html.contains("<h3><a href=\"/museum/exhibits/\">Exhibits</a></h3>"));
        assert!(html.contains("<p>Permanent and rotating collections.</p>"));
        assert!(html.contains(&format!(
            "<dt>1.1.1: Non-text Content {PHOTOSENSITIVITY_MARKER}</dt>"
        )));
        assert!(html.contains("<dd>Vase photo lacks alt</dd>"));
    }

    #[test]
    fn failure_arrangement_heads_with_criterion() {
        let (wcag2, areas) = (wcag2_catalog(), area_catalog());
        let breaks = vec![BreakBuilder::new("x", "Home")
            .description(&["One", "Two"])
            .wcag2(&["1.4.3"])
            .discussion(&["Is 4.4:1 close enough?"])
            .build()];
        let state = ListState::new(Arrangement::Failure, WcagVersion::V2, "");
        let groups = BreakPipeline::new(&wcag2, &state).derive(&breaks);
        let html = HtmlRenderer::new(&wcag2, &areas, BASE_URL)
            .with_list_focus(true)
            .render_list(&state, &groups)
            .unwrap();

        assert!(html.starts_with("<div tabindex=\"-1\" autofocus>"));
        assert!(html.contains("<h3>1.4.3: Contrast (Minimum)</h3>"));
        assert!(html.contains("<dt><a href=\"/museum/\">Home</a></dt>"));
        assert!(!html.contains("<p>"));
        assert_eq!(html.matches("<dd>").count(), 2);
        assert_eq!(html.matches("class=\"discussion-item\"").count(), 2);
        assert!(html.contains("<li>Is 4.4:1 close enough?</li>"));
    }

    #[test]
    fn unresolved_area_fails_render() {
        let (wcag2, areas) = (wcag2_catalog(), area_catalog());
        let breaks = vec![BreakBuilder::new("x", "Attic").wcag3(&["Anything"]).build()];
        let state = ListState::new(Arrangement::Area, WcagVersion::V3, "");
        let groups = BreakPipeline::new(&wcag2, &state).derive(&breaks);
        let err = HtmlRenderer::new(&wcag2, &areas, BASE_URL)
            .render(&state, &groups)
            .unwrap_err();
        assert_eq!(err, RenderError::unresolved_area("x", "Attic"));
    }

    #[test]
    fn rows_rendered_under_other_version_fail() {
        let (wcag2, areas) = (wcag2_catalog(), area_catalog());
        let breaks = vec![BreakBuilder::new("x", "Home").wcag2(&["1.1.1"]).build()];
        let derived_for = ListState::default();
        let groups = BreakPipeline::new(&wcag2, &derived_for).derive(&breaks);
        let other = ListState::new(Arrangement::Area, WcagVersion::V3, "");
        let err = HtmlRenderer::new(&wcag2, &areas, BASE_URL)
            .render_list(&other, &groups)
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingTag { version: WcagVersion::V3, .. }));
    }

    #[test]
    fn criterion_missing_from_render_catalog_fails() {
        let (full, areas) = (wcag2_catalog(), area_catalog());
        let minimal = minimal_wcag2_catalog();
        let breaks = vec![BreakBuilder::new("x", "Home").wcag2(&["2.4.7"]).build()];
        let state = ListState::default();
        let groups = BreakPipeline::new(&full, &state).derive(&breaks);
        let err = HtmlRenderer::new(&minimal, &areas, BASE_URL)
            .render_list(&state, &groups)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownCriterion { criterion, .. } if criterion == "2.4.7"));
    }
}
