//! Server-side view rendering.
//!
//! [`ViewEngine`] wraps a [`handlebars::Handlebars`] registry built once at
//! startup: every `*.hbs` file under the views directory is registered under
//! its file stem, and files under `views/partials/` become partials usable
//! from any page as `{{> name}}`. The registry is immutable afterwards and
//! shared behind an `Arc` — no module-level state, the engine travels with
//! whatever handler needs it.
//!
//! Two helpers are available to all templates:
//!
//! | Helper | Arguments | Renders |
//! |---|---|---|
//! | `getCurrentYear` | none | the current calendar year |
//! | `screamIt` | one string | the argument upper-cased |

use std::path::Path;

use chrono::{Datelike, Local};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

use crate::error::Error;

/// A registry of named templates, plus the helpers they may call.
pub struct ViewEngine {
    registry: Handlebars<'static>,
}

impl ViewEngine {
    /// Loads every `*.hbs` under `views_dir` (and `views_dir/partials`) and
    /// registers the template helpers. Fails on unreadable directories and
    /// on templates that do not parse — bad views are a startup error, not a
    /// per-request one.
    pub fn new(views_dir: impl AsRef<Path>) -> Result<Self, Error> {
        let views_dir = views_dir.as_ref();
        let mut registry = Handlebars::new();
        registry.register_helper("getCurrentYear", Box::new(get_current_year));
        registry.register_helper("screamIt", Box::new(scream_it));

        register_dir(&mut registry, views_dir)?;
        let partials = views_dir.join("partials");
        if partials.is_dir() {
            register_dir(&mut registry, &partials)?;
        }

        Ok(Self { registry })
    }

    /// Renders a registered template with the supplied named values.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        Ok(self.registry.render(name, data)?)
    }
}

fn register_dir(registry: &mut Handlebars<'static>, dir: &Path) -> Result<(), Error> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "hbs") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        registry.register_template_file(name, &path)?;
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn get_current_year(
    _: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&Local::now().year().to_string())?;
    Ok(())
}

/// Upper-cases its single string argument. A missing or non-string argument
/// renders nothing rather than failing the whole page.
fn scream_it(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h.param(0).and_then(|p| p.value().as_str()).unwrap_or_default();
    out.write(&text.to_uppercase())?;
    Ok(())
}
