//! Font families offered for text elements and text width measurement.

/// A font family the toolbox offers, with the label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFamily {
    /// Family name as understood by the renderer (e.g. "Caveat", "Courier New")
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
}

/// Default family for new text elements.
pub const DEFAULT_FONT_FAMILY: &str = "Caveat";

/// Families offered by the toolbox, in display order.
pub const FONT_FAMILIES: [FontFamily; 7] = [
    FontFamily {
        name: "Caveat",
        label: "Handwriting",
    },
    FontFamily {
        name: "Arial",
        label: "Arial",
    },
    FontFamily {
        name: "Times New Roman",
        label: "Times New Roman",
    },
    FontFamily {
        name: "Courier New",
        label: "Courier New",
    },
    FontFamily {
        name: "Georgia",
        label: "Georgia",
    },
    FontFamily {
        name: "Verdana",
        label: "Verdana",
    },
    FontFamily {
        name: "Comic Sans MS",
        label: "Comic Sans",
    },
];

/// Returns the table entry for `name` (case-insensitive).
pub fn find_font_family(name: &str) -> Option<&'static FontFamily> {
    FONT_FAMILIES
        .iter()
        .find(|family| family.name.eq_ignore_ascii_case(name.trim()))
}

/// Measures rendered text width.
///
/// The engine only needs widths for hit-testing text elements, so the host's text
/// layout facility is plugged in here. [`AverageAdvance`] is used when none is given.
pub trait TextMeasure {
    /// Width in canvas units of the widest line of `text`.
    fn text_width(&self, text: &str, font_family: &str, font_size: f64) -> f64;
}

/// Approximates every glyph as a fixed fraction of the font size.
#[derive(Debug, Clone, Copy)]
pub struct AverageAdvance {
    /// Advance width per character as a fraction of font size
    pub ratio: f64,
}

impl Default for AverageAdvance {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl TextMeasure for AverageAdvance {
    fn text_width(&self, text: &str, _font_family: &str, font_size: f64) -> f64 {
        text.lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as f64
            * font_size
            * self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_families_case_insensitively() {
        assert_eq!(find_font_family("caveat").unwrap().label, "Handwriting");
        assert_eq!(find_font_family(" Comic Sans MS ").unwrap().label, "Comic Sans");
        assert!(find_font_family("Papyrus").is_none());
    }

    #[test]
    fn average_advance_uses_widest_line() {
        let measure = AverageAdvance::default();
        assert!((measure.text_width("abcd", "Arial", 10.0) - 24.0).abs() < 1e-9);
        assert!((measure.text_width("ab\nabcdef", "Arial", 10.0) - 36.0).abs() < 1e-9);
        assert_eq!(measure.text_width("", "Arial", 10.0), 0.0);
    }
}
