use std::fs;

use anyhow::{Context, Result};
use log::warn;
use svg::Document;

use crate::config::WheelConfig;
use crate::surface::SvgSurface;
use crate::wheel::WheelRenderer;

// Load the default css for embedding
const DEFAULT_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/styles/wheel.css"));

/// A wheel drawn onto an in-memory SVG tree, ready to be written out.
pub struct Chart<'c> {
    pub renderer: WheelRenderer<'c, SvgSurface>,
    css_path: Option<String>,
}

impl<'c> Chart<'c> {
    pub fn new(config: &'c WheelConfig, css_path: Option<String>) -> Result<Self> {
        let renderer = WheelRenderer::initialize(config, SvgSurface::new())?;
        Ok(Self { renderer, css_path })
    }

    fn load_css_text(&self) -> String {
        if let Some(path) = &self.css_path {
            match fs::read_to_string(path) {
                Ok(text) => return text,
                Err(e) => warn!("could not read css override {path}: {e}; using built-in styles"),
            }
        }
        // Embedded fallback
        DEFAULT_CSS.to_owned()
    }

    pub fn draw_document(&self) -> Result<Document> {
        let container = self
            .renderer
            .container()
            .context("wheel has no base to draw")?;
        let css = self.load_css_text();
        let doc = self
            .renderer
            .surface()
            .to_document(container, Some(&css))?
            .set("class", "flavor-wheel");
        Ok(doc)
    }

    pub fn to_file(&self, path: &str) -> Result<()> {
        let doc = self.draw_document()?;
        svg::save(path, &doc).with_context(|| format!("saving {path}"))
    }
}
