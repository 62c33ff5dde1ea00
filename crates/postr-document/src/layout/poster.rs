// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Poster page layout.
//
// All coordinates are PDF points with the origin at the bottom-left corner and
// y increasing upward. The plan is pure arithmetic over the movie metadata,
// the artwork aspect ratio and font metrics; rendering it to PDF operators is
// the composer's job.

use postr_core::types::{MovieDetail, PageTemplate};

use super::wrap::{TextMeasure, wrap_text};
use crate::font::{FontRole, FontSet};

/// Uniform page margin.
pub const MARGIN: f32 = 60.0;
/// Vertical band between the top margin and the artwork reserved for the title.
pub const TITLE_BAND: f32 = 200.0;
pub const TITLE_SIZE: f32 = 60.0;
/// Title baseline distance below the top margin.
pub const TITLE_DROP: f32 = 100.0;
pub const YEAR_SIZE: f32 = 24.0;
/// Year baseline distance below the top margin.
pub const YEAR_DROP: f32 = 30.0;
/// Gap between the artwork's bottom edge and the separator.
pub const SEPARATOR_GAP: f32 = 40.0;
pub const SEPARATOR_THICKNESS: f32 = 1.0;
/// Gap between the separator and the first credit line.
pub const CREDITS_GAP: f32 = 30.0;
pub const DIRECTOR_SIZE: f32 = 14.0;
pub const DIRECTOR_ADVANCE: f32 = 25.0;
pub const WRITERS_SIZE: f32 = 12.0;
pub const WRITERS_ADVANCE: f32 = 40.0;
pub const CAST_SIZE: f32 = 11.0;
pub const CAST_LINE_HEIGHT: f32 = 18.0;
/// Number of billed actors printed on the poster.
pub const CAST_LIMIT: usize = 5;
pub const DATE_SIZE: f32 = 10.0;

pub const BACKGROUND: Rgb = Rgb::new(0.95, 0.94, 0.92);
pub const TEXT_COLOR: Rgb = Rgb::new(0.1, 0.1, 0.1);
pub const ACCENT_COLOR: Rgb = Rgb::new(0.0, 0.0, 0.0);

/// DeviceRGB colour with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// What a piece of text on the poster represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Title,
    Year,
    Director,
    Writers,
    Cast,
    ReleaseDate,
}

/// A single run of text drawn at a baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub kind: TextKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: FontRole,
    pub color: Rgb,
}

/// Drawing instructions in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Fill { rect: Rect, color: Rgb },
    Image { rect: Rect },
    Text(TextElement),
    Rule { x1: f32, x2: f32, y: f32, thickness: f32, color: Rgb },
}

/// The complete, resolved layout of one poster page.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterLayout {
    pub width: f32,
    pub height: f32,
    pub elements: Vec<LayoutElement>,
}

impl PosterLayout {
    /// Lay out a poster for `detail` on `template`.
    ///
    /// The artwork spans the content width and its height follows from
    /// `aspect_ratio`. The title is placed unwrapped and can run past the right
    /// margin; the release date is pinned to the bottom margin no matter how
    /// far the credits descend.
    pub fn plan(
        detail: &MovieDetail,
        aspect_ratio: f32,
        fonts: &FontSet,
        template: PageTemplate,
    ) -> Self {
        let (page_w, page_h) = template.dimensions();
        let (width, height) = (page_w as f32, page_h as f32);
        let content_width = width - 2.0 * MARGIN;

        let mut elements = vec![LayoutElement::Fill {
            rect: Rect {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            color: BACKGROUND,
        }];

        let image_width = content_width;
        let image_height = image_width / aspect_ratio;
        let image_y = height - MARGIN - image_height - TITLE_BAND;
        elements.push(LayoutElement::Image {
            rect: Rect {
                x: MARGIN,
                y: image_y,
                width: image_width,
                height: image_height,
            },
        });

        let text = |kind, text: String, x, y, size, font| {
            LayoutElement::Text(TextElement {
                kind,
                text,
                x,
                y,
                size,
                font,
                color: TEXT_COLOR,
            })
        };

        elements.push(text(
            TextKind::Title,
            detail.title.clone(),
            MARGIN,
            height - MARGIN - TITLE_DROP,
            TITLE_SIZE,
            FontRole::Bold,
        ));

        if let Some(year) = detail.release_year() {
            let year = year.to_string();
            let year_width = fonts.medium.text_width(&year, YEAR_SIZE);
            elements.push(text(
                TextKind::Year,
                year,
                width - MARGIN - year_width,
                height - MARGIN - YEAR_DROP,
                YEAR_SIZE,
                FontRole::Medium,
            ));
        }

        let line_y = image_y - SEPARATOR_GAP;
        elements.push(LayoutElement::Rule {
            x1: MARGIN,
            x2: width - MARGIN,
            y: line_y,
            thickness: SEPARATOR_THICKNESS,
            color: ACCENT_COLOR,
        });

        let mut cursor = line_y - CREDITS_GAP;

        if let Some(director) = &detail.director {
            elements.push(text(
                TextKind::Director,
                format!("Directed by {director}"),
                MARGIN,
                cursor,
                DIRECTOR_SIZE,
                FontRole::Medium,
            ));
            cursor -= DIRECTOR_ADVANCE;
        }

        if let Some(writers) = writers_line(&detail.writers) {
            elements.push(text(
                TextKind::Writers,
                writers,
                MARGIN,
                cursor,
                WRITERS_SIZE,
                FontRole::Regular,
            ));
            cursor -= WRITERS_ADVANCE;
        }

        if !detail.actors.is_empty() {
            let cast = detail
                .actors
                .iter()
                .take(CAST_LIMIT)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            for line in wrap_text(&cast, content_width, &fonts.regular, CAST_SIZE) {
                elements.push(text(
                    TextKind::Cast,
                    line,
                    MARGIN,
                    cursor,
                    CAST_SIZE,
                    FontRole::Regular,
                ));
                cursor -= CAST_LINE_HEIGHT;
            }
        }

        if let Some(date) = detail.formatted_release_date() {
            elements.push(text(
                TextKind::ReleaseDate,
                date,
                MARGIN,
                MARGIN,
                DATE_SIZE,
                FontRole::Regular,
            ));
        }

        Self {
            width,
            height,
            elements,
        }
    }

    /// Text elements of one kind, in paint order.
    pub fn texts(&self, kind: TextKind) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(move |element| match element {
            LayoutElement::Text(text) if text.kind == kind => Some(text),
            _ => None,
        })
    }

    /// Placement of the artwork.
    pub fn image_rect(&self) -> Option<Rect> {
        self.elements.iter().find_map(|element| match element {
            LayoutElement::Image { rect } => Some(*rect),
            _ => None,
        })
    }
}

/// "Written by …" for one or more writers.
fn writers_line(writers: &[String]) -> Option<String> {
    match writers {
        [] => None,
        [single] => Some(format!("Written by {single}")),
        many => Some(format!("Written by {}", many.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn inception() -> MovieDetail {
        MovieDetail {
            title: "Inception".into(),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 16),
            director: Some("Christopher Nolan".into()),
            writers: vec!["Christopher Nolan".into()],
            actors: vec![
                "Leonardo DiCaprio".into(),
                "Joseph Gordon-Levitt".into(),
                "Ken Watanabe".into(),
                "Tom Hardy".into(),
                "Elliot Page".into(),
                "Tom Berenger".into(),
                "Marion Cotillard".into(),
            ],
        }
    }

    fn bare(title: &str) -> MovieDetail {
        MovieDetail {
            title: title.into(),
            release_date: None,
            director: None,
            writers: Vec::new(),
            actors: Vec::new(),
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn artwork_fills_content_width_below_title_band() {
        let layout = PosterLayout::plan(&inception(), 1.5, &FontSet::standard(), PageTemplate::Poster18x24);
        let rect = layout.image_rect().expect("image placed");
        assert!(close(rect.x, 60.0));
        assert!(close(rect.width, 1176.0));
        assert!(close(rect.height, 784.0));
        // 1728 - 60 - 784 - 200
        assert!(close(rect.y, 684.0));
    }

    #[test]
    fn page_matches_template() {
        let layout = PosterLayout::plan(&inception(), 1.78, &FontSet::standard(), PageTemplate::Square);
        assert_eq!((layout.width, layout.height), (1080.0, 1080.0));
        match &layout.elements[0] {
            LayoutElement::Fill { rect, color } => {
                assert_eq!(*color, BACKGROUND);
                assert_eq!((rect.width, rect.height), (1080.0, 1080.0));
            }
            other => panic!("expected background first, got {other:?}"),
        }
    }

    #[test]
    fn year_is_flush_with_right_margin() {
        let fonts = FontSet::standard();
        let layout = PosterLayout::plan(&inception(), 1.78, &fonts, PageTemplate::Poster18x24);
        let year = layout.texts(TextKind::Year).next().expect("year drawn");
        assert_eq!(year.text, "2010");
        let right_edge = year.x + fonts.medium.text_width("2010", YEAR_SIZE);
        assert!(close(right_edge, 1296.0 - MARGIN));
        assert!(close(year.y, 1728.0 - 60.0 - 30.0));
    }

    #[test]
    fn credits_stack_below_separator() {
        let layout = PosterLayout::plan(&inception(), 1.5, &FontSet::standard(), PageTemplate::Poster18x24);
        let separator_y = layout
            .elements
            .iter()
            .find_map(|element| match element {
                LayoutElement::Rule { y, .. } => Some(*y),
                _ => None,
            })
            .expect("separator drawn");
        assert!(close(separator_y, 644.0));

        let director = layout.texts(TextKind::Director).next().expect("director");
        assert_eq!(director.text, "Directed by Christopher Nolan");
        assert!(close(director.y, 614.0));

        let writers = layout.texts(TextKind::Writers).next().expect("writers");
        assert_eq!(writers.text, "Written by Christopher Nolan");
        assert!(close(writers.y, 589.0));

        let cast: Vec<_> = layout.texts(TextKind::Cast).collect();
        assert!(!cast.is_empty());
        assert!(close(cast[0].y, 549.0));
        let names = cast
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(names.contains("Elliot Page"));
        assert!(!names.contains("Tom Berenger"));
    }

    #[test]
    fn multiple_writers_are_comma_joined() {
        let mut detail = inception();
        detail.writers = vec!["Jonathan Nolan".into(), "Christopher Nolan".into()];
        let layout = PosterLayout::plan(&detail, 1.78, &FontSet::standard(), PageTemplate::A4);
        let writers = layout.texts(TextKind::Writers).next().expect("writers");
        assert_eq!(writers.text, "Written by Jonathan Nolan, Christopher Nolan");
    }

    #[test]
    fn cast_wraps_at_content_width() {
        let mut detail = inception();
        detail.director = None;
        detail.writers.clear();
        // A4 leaves 475pt of content width; five long names at 11pt exceed it.
        detail.actors = vec![
            "Maximilian Bartholomew Featherstonehaugh".into(),
            "Anastasia Konstantinopoulou-Vanderbilt".into(),
            "Bartholomew Montgomery Worthington III".into(),
            "Wilhelmina Cholmondeley-Fotheringham".into(),
            "Alexandros Papadopoulos-Kazantzakis".into(),
        ];
        let fonts = FontSet::standard();
        let layout = PosterLayout::plan(&detail, 1.78, &fonts, PageTemplate::A4);

        let cast: Vec<_> = layout.texts(TextKind::Cast).collect();
        assert!(cast.len() >= 2, "expected wrapping, got {}", cast.len());
        for pair in cast.windows(2) {
            assert!(close(pair[0].y - pair[1].y, CAST_LINE_HEIGHT));
        }
        // First credit line sits directly under the separator when nothing else precedes it.
        let separator_y = layout
            .elements
            .iter()
            .find_map(|element| match element {
                LayoutElement::Rule { y, .. } => Some(*y),
                _ => None,
            })
            .expect("separator");
        assert!(close(cast[0].y, separator_y - CREDITS_GAP));
    }

    #[test]
    fn release_date_pinned_to_bottom_margin() {
        let layout = PosterLayout::plan(&inception(), 1.78, &FontSet::standard(), PageTemplate::Poster24x36);
        let date = layout.texts(TextKind::ReleaseDate).next().expect("date");
        assert_eq!(date.text, "July 16, 2010");
        assert_eq!((date.x, date.y), (MARGIN, MARGIN));
    }

    #[test]
    fn missing_metadata_omits_optional_lines() {
        let layout = PosterLayout::plan(&bare("Untitled"), 1.78, &FontSet::standard(), PageTemplate::Poster18x24);
        assert_eq!(layout.texts(TextKind::Title).count(), 1);
        for kind in [
            TextKind::Year,
            TextKind::Director,
            TextKind::Writers,
            TextKind::Cast,
            TextKind::ReleaseDate,
        ] {
            assert_eq!(layout.texts(kind).count(), 0, "{kind:?}");
        }
    }

    #[test]
    fn long_title_is_not_wrapped() {
        let title = "The Assassination of Jesse James by the Coward Robert Ford";
        let layout = PosterLayout::plan(&bare(title), 1.78, &FontSet::standard(), PageTemplate::A4);
        let titles: Vec<_> = layout.texts(TextKind::Title).collect();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text, title);
    }
}
