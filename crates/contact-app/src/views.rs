//! HTML views rendered from embedded templates.

use crate::error::AppError;
use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

/// Template sources, compiled into the binary.
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("add.html", include_str!("../templates/add.html")),
    ("edit.html", include_str!("../templates/edit.html")),
    ("detail.html", include_str!("../templates/detail.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

/// Segments routed as static siblings of `/contact/:nama`.
const RESERVED_SEGMENTS: &[&str] = &["add"];

/// Percent-encode a value as a single URL path segment.
///
/// `/` is always encoded. A value that would collide with a static route is
/// encoded byte for byte, which still decodes back to the same name.
fn path_segment(value: &str) -> String {
    if RESERVED_SEGMENTS.contains(&value) {
        return value.bytes().map(|b| format!("%{:02X}", b)).collect();
    }
    urlencoding::encode(value).into_owned()
}

/// Template environment shared by all handlers.
///
/// Every page extends `layout.html`. Autoescaping is on for all `.html`
/// templates, so contact fields are safe to interpolate.
pub struct Views {
    env: Environment<'static>,
}

impl std::fmt::Debug for Views {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Views")
            .field("templates", &TEMPLATES.len())
            .finish()
    }
}

impl Views {
    /// Load every embedded template.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_filter("path_segment", path_segment);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render a named template with the given context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}
