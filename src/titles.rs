use crate::constants::{GLYPH_CLASS, GLYPH_TAG};
use crate::dom::js_err;
use parallax_core::{split_glyphs, GlyphStyle};
use smallvec::SmallVec;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Letter spans of one section heading, created once at startup.
pub struct TitleNodes {
    pub section: usize,
    spans: Vec<web::HtmlElement>,
    // last written style per span, to skip unchanged DOM writes
    written: SmallVec<[Option<GlyphStyle>; 24]>,
}

impl TitleNodes {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn apply(&mut self, styles: &[GlyphStyle]) {
        for ((span, written), style) in self.spans.iter().zip(self.written.iter_mut()).zip(styles) {
            if written.as_ref() == Some(style) {
                continue;
            }
            let css = span.style();
            _ = css.set_property("opacity", &style.css_opacity());
            _ = css.set_property("transform", &style.css_transform());
            *written = Some(*style);
        }
    }
}

/// Replace the heading's text with one inline-block span per letter.
pub fn split_heading(
    document: &web::Document,
    heading: &web::Element,
    section: usize,
) -> anyhow::Result<TitleNodes> {
    let text = heading.text_content().unwrap_or_default();
    let glyphs = split_glyphs(&text);
    _ = heading.set_attribute("aria-label", text.trim());
    heading.set_text_content(None);

    let mut spans = Vec::with_capacity(glyphs.len());
    for g in &glyphs {
        let span: web::HtmlElement = document
            .create_element(GLYPH_TAG)
            .map_err(js_err)?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        span.set_class_name(GLYPH_CLASS);
        _ = span.set_attribute("aria-hidden", "true");
        span.set_text_content(Some(&g.display_char().to_string()));
        _ = span.style().set_property("display", "inline-block");
        heading.append_child(&span).map_err(js_err)?;
        spans.push(span);
    }
    log::debug!("[dom] section {} title split into {} glyphs", section, spans.len());
    Ok(TitleNodes {
        section,
        written: SmallVec::from_elem(None, spans.len()),
        spans,
    })
}
