use crate::dom::Document;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize a document as a complete HTML page.
pub fn render_page(doc: &Document) -> String {
    format!("<!DOCTYPE html>\n{}", doc.to_html())
}

/// Largest placeholder edge we are willing to draw.
pub const PLACEHOLDER_MAX: u32 = 4000;

/// Grey SVG box labelled with its size, used for the catalog's
/// `/api/placeholder/<w>/<h>` image URLs.
pub fn placeholder_svg(width: u32, height: u32) -> Option<String> {
    if width == 0 || height == 0 || width > PLACEHOLDER_MAX || height > PLACEHOLDER_MAX {
        return None;
    }
    let font_size = (width.min(height) / 8).max(10);
    Some(format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="#e2e8f0"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="sans-serif" font-size="{fs}" fill="#64748b">{w}×{h}</text></svg>"##,
        w = width,
        h = height,
        fs = font_size
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn placeholder_bounds() {
        let svg = placeholder_svg(400, 250).unwrap();
        assert!(svg.contains(r#"width="400""#));
        assert!(svg.contains("400×250"));
        assert!(placeholder_svg(0, 10).is_none());
        assert!(placeholder_svg(10, PLACEHOLDER_MAX + 1).is_none());
    }

    #[test]
    fn page_has_doctype() {
        let page = render_page(&Document::new());
        assert!(page.starts_with("<!DOCTYPE html>\n<html>"));
        assert!(page.ends_with("</body></html>"));
    }
}
