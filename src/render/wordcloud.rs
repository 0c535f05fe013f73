//! Word cloud layout and SVG output.
//!
//! Words are placed largest first along an Archimedean spiral starting at
//! the canvas center; a word that collides at every spiral position is
//! retried at a smaller font size and dropped once it reaches the minimum.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::svg::{escape_xml, PALETTE};

const MIN_FONT: f64 = 8.0;
const FONT_STEP: f64 = 2.0;
/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH: f64 = 0.6;
const SPIRAL_STEP: f64 = 0.1;

/// Canvas and word-count limits for [`render_wordcloud`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub seed: Option<u64>,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 200,
            seed: Some(42),
        }
    }
}

/// A word placed on the canvas; `(x, y)` is the center of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: &'static str,
}

impl PlacedWord {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        word_bounds(&self.word, self.x, self.y, self.font_size)
    }
}

fn word_bounds(word: &str, x: f64, y: f64, font_size: f64) -> (f64, f64, f64, f64) {
    let w = word.chars().count() as f64 * font_size * CHAR_WIDTH;
    let h = font_size;
    (x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0)
}

fn overlaps(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3
}

/// Lay out up to `max_words` words from a descending frequency table.
pub fn layout_words(frequencies: &[(String, usize)], options: &WordCloudOptions) -> Vec<PlacedWord> {
    let words: Vec<&(String, usize)> = frequencies
        .iter()
        .filter(|(w, c)| !w.is_empty() && *c > 0)
        .take(options.max_words)
        .collect();
    let Some(max_count) = words.iter().map(|(_, c)| *c).max() else {
        return vec![];
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let width = options.width as f64;
    let height = options.height as f64;
    let max_font = (height / 4.0).max(MIN_FONT);
    let max_radius = (width * width + height * height).sqrt() / 2.0;
    let (cx, cy) = (width / 2.0, height / 2.0);

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

    for (i, (word, count)) in words.iter().enumerate() {
        let ratio = *count as f64 / max_count as f64;
        let mut font_size = MIN_FONT + (max_font - MIN_FONT) * ratio;
        let start_angle = rng.random::<f64>() * std::f64::consts::TAU;
        let color = PALETTE[i % PALETTE.len()];

        'sizes: while font_size >= MIN_FONT {
            let mut theta = 0.0f64;
            loop {
                let radius = 2.0 * theta;
                if radius > max_radius {
                    break;
                }
                let angle = start_angle + theta;
                let x = cx + radius * angle.cos();
                let y = cy + radius * angle.sin();
                let bounds = word_bounds(word, x, y, font_size);

                let inside =
                    bounds.0 >= 0.0 && bounds.1 >= 0.0 && bounds.2 <= width && bounds.3 <= height;
                if inside && !placed.iter().any(|p| overlaps(p.bounds(), bounds)) {
                    placed.push(PlacedWord {
                        word: word.clone(),
                        x,
                        y,
                        font_size,
                        color,
                    });
                    break 'sizes;
                }
                theta += SPIRAL_STEP;
            }
            font_size -= FONT_STEP;
        }
    }

    placed
}

/// Render a word cloud for a descending frequency table.
///
/// Returns `None` when there is nothing to draw.
pub fn render_wordcloud(frequencies: &[(String, usize)], options: &WordCloudOptions) -> Option<String> {
    let placed = layout_words(frequencies, options);
    if placed.is_empty() {
        return None;
    }

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = options.width,
        h = options.height
    );
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#000000\"/>\n");
    for word in &placed {
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"{:.1}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
            word.x,
            word.y,
            word.font_size,
            word.color,
            escape_xml(&word.word)
        );
    }
    svg.push_str("</svg>\n");
    Some(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_layout_places_words_without_overlap() {
        let freqs = table(&[("#guate", 10), ("#trafico", 6), ("#lluvia", 3), ("#zona10", 1)]);
        let placed = layout_words(&freqs, &WordCloudOptions::default());

        assert_eq!(placed.len(), 4);
        for (i, a) in placed.iter().enumerate() {
            let b = a.bounds();
            assert!(b.0 >= 0.0 && b.1 >= 0.0 && b.2 <= 800.0 && b.3 <= 400.0);
            for other in &placed[i + 1..] {
                assert!(!overlaps(b, other.bounds()), "{} overlaps {}", a.word, other.word);
            }
        }
    }

    #[test]
    fn test_most_frequent_word_is_largest() {
        let freqs = table(&[("#a", 9), ("#b", 1)]);
        let placed = layout_words(&freqs, &WordCloudOptions::default());
        assert_eq!(placed[0].word, "#a");
        assert!(placed[0].font_size > placed[1].font_size);
        assert!((placed[0].font_size - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_words_limits_output() {
        let freqs = table(&[("#a", 3), ("#b", 2), ("#c", 1)]);
        let options = WordCloudOptions {
            max_words: 2,
            ..WordCloudOptions::default()
        };
        let placed = layout_words(&freqs, &options);
        assert_eq!(placed.len(), 2);
    }

    #[test]
    fn test_render_wordcloud_svg() {
        let svg = render_wordcloud(&table(&[("#x<y", 2)]), &WordCloudOptions::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#x&lt;y"));
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn test_render_wordcloud_empty() {
        assert!(render_wordcloud(&[], &WordCloudOptions::default()).is_none());
    }
}
