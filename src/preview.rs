//! Page-highlight geometry for the PDF preview.
//!
//! The preview is the browser's own PDF viewer inside an iframe, so real page
//! boundaries are unknown. Pages are assumed to split the pane evenly.

use crate::types::SourceCitation;

/// Page count assumed when no configuration overrides it.
pub const PREVIEW_PAGE_COUNT: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct HighlightOverlay {
    pub page: u32,
    /// Offset from the top of the pane, in percent of its height.
    pub top_pct: f64,
    pub height_pct: f64,
}

impl HighlightOverlay {
    pub fn for_page(page: u32, total_pages: u32) -> Option<Self> {
        if page == 0 || total_pages == 0 || page > total_pages {
            return None;
        }
        let height_pct = 100.0 / f64::from(total_pages);
        Some(Self {
            page,
            top_pct: f64::from(page - 1) * height_pct,
            height_pct,
        })
    }

    /// Inline placement; colour and stacking come from `.pdf-highlight`.
    pub fn style(&self) -> String {
        format!(
            "top: {:.4}%; height: {:.4}%;",
            self.top_pct, self.height_pct
        )
    }
}

/// One overlay per cited page. Citations without a usable page are skipped.
pub fn highlight_overlays(sources: &[SourceCitation], total_pages: u32) -> Vec<HighlightOverlay> {
    sources
        .iter()
        .filter_map(|source| source.page)
        .filter_map(|page| {
            let overlay = HighlightOverlay::for_page(page, total_pages);
            if overlay.is_none() {
                tracing::debug!(page, total_pages, "cited page outside preview range");
            }
            overlay
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_three_of_five_sits_at_forty_percent() {
        let overlays = highlight_overlays(&[SourceCitation::page(3)], PREVIEW_PAGE_COUNT);
        assert_eq!(
            overlays,
            vec![HighlightOverlay {
                page: 3,
                top_pct: 40.0,
                height_pct: 20.0
            }]
        );
        assert_eq!(overlays[0].style(), "top: 40.0000%; height: 20.0000%;");
    }

    #[test]
    fn first_page_starts_at_the_top() {
        let overlay = HighlightOverlay::for_page(1, 4).unwrap();
        assert_eq!(overlay.top_pct, 0.0);
        assert_eq!(overlay.height_pct, 25.0);
    }

    #[test]
    fn unusable_pages_produce_nothing() {
        let sources = vec![
            SourceCitation::default(),
            SourceCitation::page(0),
            SourceCitation::page(6),
        ];
        assert!(highlight_overlays(&sources, PREVIEW_PAGE_COUNT).is_empty());
    }

    #[test]
    fn every_cited_page_gets_an_overlay() {
        let sources = vec![SourceCitation::page(2), SourceCitation::page(5)];
        let tops: Vec<f64> = highlight_overlays(&sources, PREVIEW_PAGE_COUNT)
            .iter()
            .map(|o| o.top_pct)
            .collect();
        assert_eq!(tops, vec![20.0, 80.0]);
    }
}
