//! Page geometry for the report.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner, so
//! `top > bottom` for every box. The only decision made here is where the
//! title goes when a logo is present; every other block hangs off the title
//! baseline at fixed offsets.

use crate::render::fonts::StandardFont;

pub const PAGE_MARGIN: f32 = 72.0;
pub const LOGO_WIDTH: f32 = 120.0;
/// Tallest logo whose top stays on the page when centered on the header line.
pub const LOGO_MAX_HEIGHT: f32 = 2.0 * PAGE_MARGIN;
pub const TITLE_TEXT: &str = "Reporte de Cumplimiento SARLAFT";
pub const TITLE_FONT: StandardFont = StandardFont::HelveticaBold;
pub const TITLE_FONT_SIZE: f32 = 24.0;
/// Distance from the top edge to the default title baseline.
pub const TITLE_TOP_OFFSET: f32 = 96.0;
pub const TITLE_PADDING: f32 = 8.0;
/// Baseline of the disclaimer line at the foot of the page.
pub const FOOTER_BASELINE: f32 = 72.0;

pub const SUBTITLE_OFFSET: f32 = 16.0;
pub const RULE_OFFSET: f32 = 32.0;
pub const BODY_OFFSET: f32 = 60.0;
pub const SECTION_SPACING: f32 = 100.0;
pub const LINE_SPACING: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn overlaps_horizontally(&self, other: &BoundingBox) -> bool {
        self.left < other.right && other.left < self.right
    }

    pub fn overlaps_vertically(&self, other: &BoundingBox) -> bool {
        self.bottom < other.top && other.bottom < self.top
    }

    /// Edges that merely touch do not count as overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }
}

/// Where the logo lands when drawn in the top-right header.
///
/// Drawn [`LOGO_WIDTH`] wide whatever the pixel size, with height following
/// the pixel aspect ratio. Logos that would be taller than
/// [`LOGO_MAX_HEIGHT`] are shrunk to fit it, aspect preserved. The logo's
/// vertical center sits on the header line one margin below the top edge.
/// Returns `None` for a degenerate image.
pub fn logo_drawn_box(page: PageSize, px_width: u32, px_height: u32) -> Option<BoundingBox> {
    if px_width == 0 || px_height == 0 {
        return None;
    }

    let aspect = px_height as f32 / px_width as f32;
    let (drawn_width, drawn_height) = if LOGO_WIDTH * aspect > LOGO_MAX_HEIGHT {
        (LOGO_MAX_HEIGHT / aspect, LOGO_MAX_HEIGHT)
    } else {
        (LOGO_WIDTH, LOGO_WIDTH * aspect)
    };

    let right = page.width - PAGE_MARGIN;
    let bottom = page.height - PAGE_MARGIN - drawn_height / 2.0;

    Some(BoundingBox {
        left: right - drawn_width,
        right,
        top: bottom + drawn_height,
        bottom,
    })
}

/// Box of a single text line with its baseline at `baseline`, using the font
/// size as the nominal line height.
pub fn title_box(text: &str, font: StandardFont, size: f32, left: f32, baseline: f32) -> BoundingBox {
    BoundingBox {
        left,
        right: left + font.text_width(text, size),
        top: baseline + size,
        bottom: baseline,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub padding: f32,
    /// Lowest baseline the title may be moved to.
    pub min_baseline: f32,
}

impl LayoutConstraints {
    pub fn for_title_height(title_height: f32) -> Self {
        Self {
            padding: TITLE_PADDING,
            min_baseline: FOOTER_BASELINE + title_height,
        }
    }
}

/// Final title baseline given its default box and the optional logo box.
///
/// On overlap the title is pushed down so its top clears the logo's bottom
/// by `padding`, but never below `min_baseline`.
pub fn resolve_title_baseline(
    title: &BoundingBox,
    logo: Option<&BoundingBox>,
    constraints: &LayoutConstraints,
) -> f32 {
    match logo {
        Some(logo) if title.overlaps(logo) => {
            let moved = logo.bottom - title.height() - constraints.padding;
            moved.max(constraints.min_baseline)
        }
        _ => title.bottom,
    }
}

/// Vertical positions of every block on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    pub logo: Option<BoundingBox>,
    pub title_baseline: f32,
    pub subtitle_baseline: f32,
    pub rule_y: f32,
    pub body_top: f32,
}

impl PageLayout {
    pub fn from_title_baseline(page: PageSize, logo: Option<BoundingBox>, title_baseline: f32) -> Self {
        Self {
            page,
            logo,
            title_baseline,
            subtitle_baseline: title_baseline - SUBTITLE_OFFSET,
            rule_y: title_baseline - RULE_OFFSET,
            body_top: title_baseline - BODY_OFFSET,
        }
    }

    /// Heading baseline of the `index`-th body section.
    pub fn section_top(&self, index: usize) -> f32 {
        self.body_top - SECTION_SPACING * index as f32
    }

    /// Default title baseline for `page`, before any logo is considered.
    pub fn default_title_baseline(page: PageSize) -> f32 {
        page.height - TITLE_TOP_OFFSET
    }
}

/// Lays out the page for a logo of the given pixel size, or none.
pub fn compute_layout(page: PageSize, logo_px: Option<(u32, u32)>) -> PageLayout {
    let logo = logo_px.and_then(|(w, h)| logo_drawn_box(page, w, h));

    let title = title_box(
        TITLE_TEXT,
        TITLE_FONT,
        TITLE_FONT_SIZE,
        PAGE_MARGIN,
        PageLayout::default_title_baseline(page),
    );
    let constraints = LayoutConstraints::for_title_height(title.height());
    let baseline = resolve_title_baseline(&title, logo.as_ref(), &constraints);

    if baseline != title.bottom {
        tracing::debug!(
            default_baseline = title.bottom,
            title_baseline = baseline,
            "Title moved below logo"
        );
    }

    PageLayout::from_title_baseline(page, logo, baseline)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_BASELINE: f32 = 792.0 - TITLE_TOP_OFFSET;

    fn default_title() -> BoundingBox {
        title_box(TITLE_TEXT, TITLE_FONT, TITLE_FONT_SIZE, PAGE_MARGIN, DEFAULT_BASELINE)
    }

    fn bbox(left: f32, right: f32, top: f32, bottom: f32) -> BoundingBox {
        BoundingBox {
            left,
            right,
            top,
            bottom,
        }
    }

    #[test]
    fn test_logo_scaled_to_max_width_keeps_aspect() {
        let logo = logo_drawn_box(PageSize::LETTER, 300, 150).unwrap();
        assert_eq!(logo.width(), 120.0);
        assert_eq!(logo.height(), 60.0);
        assert_eq!(logo.right, 612.0 - 72.0);
        assert_eq!(logo.left, 612.0 - 72.0 - 120.0);
        assert_eq!(logo.bottom, 792.0 - 72.0 - 30.0);
    }

    #[test]
    fn test_small_logo_is_scaled_up_to_logo_width() {
        let logo = logo_drawn_box(PageSize::LETTER, 40, 20).unwrap();
        assert_eq!(logo.width(), 120.0);
        assert_eq!(logo.height(), 60.0);

        // Same drawn box as a large logo, so the title still has to move.
        let title = default_title();
        let constraints = LayoutConstraints::for_title_height(title.height());
        assert!(title.overlaps(&logo));
        assert_eq!(resolve_title_baseline(&title, Some(&logo), &constraints), 658.0);
    }

    #[test]
    fn test_tall_logo_is_shrunk_to_stay_on_page() {
        let logo = logo_drawn_box(PageSize::LETTER, 120, 1000).unwrap();
        assert_eq!(logo.height(), LOGO_MAX_HEIGHT);
        assert!(logo.top <= 792.0);
        assert!(logo.bottom >= 792.0 - 2.0 * 72.0);
        assert_eq!(logo.right, 612.0 - 72.0);
        assert!((logo.width() / logo.height() - 120.0 / 1000.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_logo_has_no_box() {
        assert!(logo_drawn_box(PageSize::LETTER, 0, 10).is_none());
        assert!(logo_drawn_box(PageSize::LETTER, 10, 0).is_none());
    }

    #[test]
    fn test_title_box_uses_measured_width_and_font_height() {
        let title = default_title();
        assert_eq!(title.left, 72.0);
        assert_eq!(title.bottom, DEFAULT_BASELINE);
        assert_eq!(title.height(), TITLE_FONT_SIZE);
        assert!((title.width() - 410.688).abs() < 0.01, "got {}", title.width());
    }

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = bbox(0.0, 10.0, 10.0, 0.0);
        assert!(a.overlaps(&bbox(5.0, 15.0, 15.0, 5.0)));
        assert!(!a.overlaps(&bbox(5.0, 15.0, 30.0, 20.0)));
        assert!(!a.overlaps(&bbox(20.0, 30.0, 10.0, 0.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = bbox(0.0, 10.0, 10.0, 0.0);
        assert!(!a.overlaps(&bbox(10.0, 20.0, 10.0, 0.0)));
        assert!(!a.overlaps(&bbox(0.0, 10.0, 20.0, 10.0)));
    }

    #[test]
    fn test_no_logo_keeps_default_baseline() {
        let title = default_title();
        let constraints = LayoutConstraints::for_title_height(title.height());
        assert_eq!(resolve_title_baseline(&title, None, &constraints), DEFAULT_BASELINE);

        let layout = compute_layout(PageSize::LETTER, None);
        assert_eq!(layout.title_baseline, DEFAULT_BASELINE);
        assert!(layout.logo.is_none());
    }

    #[test]
    fn test_logo_left_of_title_keeps_default_baseline() {
        let title = default_title();
        let constraints = LayoutConstraints::for_title_height(title.height());
        let logo = bbox(0.0, title.left - 1.0, title.top + 20.0, title.bottom - 20.0);
        assert_eq!(
            resolve_title_baseline(&title, Some(&logo), &constraints),
            DEFAULT_BASELINE
        );
    }

    #[test]
    fn test_logo_above_title_keeps_default_baseline() {
        let title = default_title();
        let constraints = LayoutConstraints::for_title_height(title.height());
        let logo = bbox(400.0, 540.0, 780.0, title.top + 2.0);
        assert_eq!(
            resolve_title_baseline(&title, Some(&logo), &constraints),
            DEFAULT_BASELINE
        );
    }

    #[test]
    fn test_scenario_300x150_logo_moves_title_below() {
        let layout = compute_layout(PageSize::LETTER, Some((300, 150)));
        let logo = layout.logo.unwrap();

        let expected = logo.bottom - TITLE_FONT_SIZE - TITLE_PADDING;
        assert_eq!(layout.title_baseline, expected);
        assert_eq!(layout.title_baseline, 658.0);
        assert!(layout.title_baseline + TITLE_FONT_SIZE <= logo.bottom - TITLE_PADDING);
        assert!(layout.title_baseline < logo.bottom - TITLE_PADDING);
    }

    #[test]
    fn test_relocation_is_clamped_above_footer() {
        let title = default_title();
        let constraints = LayoutConstraints::for_title_height(title.height());
        // A logo tall enough to push the title into the footer.
        let logo = bbox(60.0, 540.0, 790.0, 90.0);
        let baseline = resolve_title_baseline(&title, Some(&logo), &constraints);
        assert_eq!(baseline, FOOTER_BASELINE + TITLE_FONT_SIZE);
    }

    #[test]
    fn test_relocated_baseline_bounds_hold_across_logo_heights() {
        let title = default_title();
        let constraints = LayoutConstraints::for_title_height(title.height());

        for px_height in (10..=1200).step_by(37) {
            let Some(logo) = logo_drawn_box(PageSize::LETTER, 300, px_height) else {
                continue;
            };
            let baseline = resolve_title_baseline(&title, Some(&logo), &constraints);
            assert!(baseline >= constraints.min_baseline);
            if title.overlaps(&logo) && baseline > constraints.min_baseline {
                assert!(baseline < logo.bottom - constraints.padding);
            }
        }
    }

    #[test]
    fn test_blocks_cascade_from_title_baseline() {
        let layout = PageLayout::from_title_baseline(PageSize::LETTER, None, 600.0);
        assert_eq!(layout.subtitle_baseline, 584.0);
        assert_eq!(layout.rule_y, 568.0);
        assert_eq!(layout.body_top, 540.0);
        assert_eq!(layout.section_top(0), 540.0);
        assert_eq!(layout.section_top(2), 340.0);
    }

    #[test]
    fn test_default_layout_matches_fixed_offsets() {
        let layout = compute_layout(PageSize::LETTER, None);
        assert_eq!(layout.subtitle_baseline, 792.0 - 112.0);
        assert_eq!(layout.rule_y, 792.0 - 128.0);
        assert_eq!(layout.body_top, 792.0 - 156.0);
    }
}
