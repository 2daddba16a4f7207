//! Minecraft-font text built from a glyph sprite sheet via CSS masks.

/// Glyph order of the sprite sheet, starting at its third row. The apostrophe
/// doubles as the backtick cell; characters not found render as `?`.
const CHAR_MAP: &str = concat!(
    " !\"#$%&'()*+,-./",
    "0123456789:;<=>?",
    "@ABCDEFGHIJKLMNO",
    "PQRSTUVWXYZ[\\]^_",
    "'abcdefghijklmno",
    "pqrstuvwxyz{|}~",
);

/// Narrow glyphs: characters in entry `i` are `i + 2` pixels wide.
const NARROW: [&str; 4] = ["!',.:;i|", "`l", "\"()*I[]t()", "<>fk"];

const GLYPH: u32 = 8;
const UNKNOWN: (u32, u32) = (15, 3);

fn glyph_cell(c: char) -> (u32, u32) {
    match CHAR_MAP.chars().position(|m| m == c) {
        Some(index) => {
            let index = index as u32;
            (index % 16, index / 16 + 2)
        }
        None => UNKNOWN,
    }
}

fn glyph_width(c: char) -> Option<u32> {
    NARROW
        .iter()
        .position(|set| set.contains(c))
        .map(|i| i as u32 + 2)
}

/// Renders `text` as glyph divs inside an `mc_text_container`. Empty text
/// renders nothing.
pub fn render(text: &str, class: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let mut html = format!(r#"<div class="mc_text_container {class}">"#);
    for c in text.chars() {
        let (col, row) = glyph_cell(c);
        let width = glyph_width(c)
            .map(|w| format!(" width: {w}px;"))
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<div class="mc_char" style="mask-position: -{}px -{}px;{width}"></div>"#,
            col * GLYPH,
            row * GLYPH
        ));
    }
    html.push_str("</div>");
    Some(html)
}

/// Like [`render`], but empty text yields an empty string.
pub fn render_or_empty(text: &str, class: &str) -> String {
    render(text, class).unwrap_or_default()
}

pub fn to_roman(mut n: u32) -> String {
    const NUMERALS: [(&str, u32); 13] = [
        ("M", 1000),
        ("CM", 900),
        ("D", 500),
        ("CD", 400),
        ("C", 100),
        ("XC", 90),
        ("L", 50),
        ("XL", 40),
        ("X", 10),
        ("IX", 9),
        ("V", 5),
        ("IV", 4),
        ("I", 1),
    ];

    let mut out = String::new();
    for (symbol, value) in NUMERALS {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{glyph_cell, glyph_width, render, to_roman};

    #[test]
    fn roman_numerals() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(5), "V");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(1994), "MCMXCIV");
        assert_eq!(to_roman(0), "");
    }

    #[test]
    fn glyph_cells() {
        assert_eq!(glyph_cell(' '), (0, 2));
        assert_eq!(glyph_cell('A'), (1, 4));
        assert_eq!(glyph_cell('a'), (1, 6));
        assert_eq!(glyph_cell('é'), (15, 3));
        assert_eq!(glyph_width('i'), Some(2));
        assert_eq!(glyph_width('l'), Some(3));
        assert_eq!(glyph_width('f'), Some(5));
        assert_eq!(glyph_width('A'), None);
    }

    #[test]
    fn renders_glyph_divs() {
        assert_eq!(render("", "name"), None);
        assert_eq!(
            render("Hi", "name").unwrap(),
            concat!(
                r#"<div class="mc_text_container name">"#,
                r#"<div class="mc_char" style="mask-position: -64px -32px;"></div>"#,
                r#"<div class="mc_char" style="mask-position: -72px -48px; width: 2px;"></div>"#,
                "</div>"
            )
        );
    }
}
