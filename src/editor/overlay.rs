//! Highlight overlay: styled spans → text layout
//!
//! The editor surface is an egui `TextEdit` with a custom layouter. This
//! module flattens the (possibly overlapping, multiply-tagged) span set
//! into the non-overlapping colored sections a layout job requires.
//!
//! When overlapping tags disagree, the higher-priority tag wins the
//! foreground, and the highest-priority tag that defines a background wins
//! the background; `Tag` declaration order is the priority order, so search
//! matches paint over everything.

use crate::highlight::Tag;
use crate::refresh::StyledSpan;
use crate::theme::EditorColors;
use eframe::egui::text::LayoutJob;
use eframe::egui::{Color32, FontId, TextFormat};

/// Build the layout job for the editor text with the highlight overlay.
///
/// Span offsets are characters; the job's sections are byte ranges, so the
/// conversion happens here, at the UI boundary. Spans reaching past the end
/// of the text (one frame of staleness during an edit) are clamped.
pub fn overlay_layout_job(
    text: &str,
    spans: &[StyledSpan],
    colors: EditorColors,
    font_size: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    if text.is_empty() {
        return job;
    }

    // Byte offset of every character, with a trailing sentinel.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain([text.len()])
        .collect();
    let char_count = boundaries.len() - 1;

    // Every span edge is a potential style change.
    let mut cuts: Vec<usize> = Vec::with_capacity(spans.len() * 2 + 2);
    cuts.push(0);
    cuts.push(char_count);
    for styled in spans {
        cuts.push(styled.span.start.min(char_count));
        cuts.push(styled.span.end.min(char_count));
    }
    cuts.sort_unstable();
    cuts.dedup();

    for window in cuts.windows(2) {
        let (seg_start, seg_end) = (window[0], window[1]);
        if seg_start == seg_end {
            continue;
        }

        let mut foreground = colors.foreground;
        let mut background = Color32::TRANSPARENT;
        let mut fg_tag: Option<Tag> = None;
        let mut bg_tag: Option<Tag> = None;
        for styled in spans {
            let start = styled.span.start.min(char_count);
            let end = styled.span.end.min(char_count);
            if start <= seg_start && seg_end <= end {
                if fg_tag.map_or(true, |tag| styled.span.tag >= tag) {
                    fg_tag = Some(styled.span.tag);
                    foreground = styled.style.foreground;
                }
                if let Some(fill) = styled.style.background {
                    if bg_tag.map_or(true, |tag| styled.span.tag >= tag) {
                        bg_tag = Some(styled.span.tag);
                        background = fill;
                    }
                }
            }
        }

        job.append(
            &text[boundaries[seg_start]..boundaries[seg_end]],
            0.0,
            TextFormat {
                font_id: FontId::monospace(font_size),
                color: foreground,
                background,
                ..Default::default()
            },
        );
    }

    job
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Span;
    use crate::theme::TagPalette;

    fn styled(tag: Tag, start: usize, end: usize) -> StyledSpan {
        StyledSpan {
            span: Span::new(tag, start, end),
            style: TagPalette::light().style(tag),
        }
    }

    #[test]
    fn test_empty_text_yields_empty_job() {
        let job = overlay_layout_job("", &[], EditorColors::light(), 14.0);
        assert!(job.sections.is_empty());
        assert!(job.text.is_empty());
    }

    #[test]
    fn test_plain_text_is_one_section() {
        let colors = EditorColors::light();
        let job = overlay_layout_job("plain text", &[], colors, 14.0);
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.sections[0].byte_range, 0..10);
        assert_eq!(job.sections[0].format.color, colors.foreground);
        assert_eq!(job.text, "plain text");
    }

    #[test]
    fn test_span_splits_sections() {
        let spans = [styled(Tag::Bold, 0, 5)];
        let job = overlay_layout_job("**b** x", &spans, EditorColors::light(), 14.0);
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.sections[0].byte_range, 0..5);
        assert_eq!(
            job.sections[0].format.color,
            TagPalette::light().style(Tag::Bold).foreground
        );
        assert_eq!(
            job.sections[1].format.color,
            EditorColors::light().foreground
        );
    }

    #[test]
    fn test_higher_priority_tag_wins_foreground() {
        // Bold and italic layered on the same run: italic is declared later,
        // so its color paints on top.
        let spans = [styled(Tag::Bold, 0, 4), styled(Tag::Italic, 0, 4)];
        let job = overlay_layout_job("both", &spans, EditorColors::light(), 14.0);
        assert_eq!(job.sections.len(), 1);
        assert_eq!(
            job.sections[0].format.color,
            TagPalette::light().style(Tag::Italic).foreground
        );
    }

    #[test]
    fn test_search_match_paints_over_everything() {
        let spans = [styled(Tag::Bold, 0, 8), styled(Tag::SearchMatch, 2, 6)];
        let job = overlay_layout_job("**bold**", &spans, EditorColors::light(), 14.0);
        let search_style = TagPalette::light().style(Tag::SearchMatch);

        // Middle section carries the search colors, flanks stay bold.
        assert_eq!(job.sections.len(), 3);
        assert_eq!(job.sections[1].format.color, search_style.foreground);
        assert_eq!(
            job.sections[1].format.background,
            search_style.background.unwrap()
        );
        assert_eq!(
            job.sections[0].format.color,
            TagPalette::light().style(Tag::Bold).foreground
        );
    }

    #[test]
    fn test_background_only_from_tags_that_define_one() {
        let spans = [styled(Tag::Bold, 0, 4)];
        let job = overlay_layout_job("bold", &spans, EditorColors::light(), 14.0);
        assert_eq!(job.sections[0].format.background, Color32::TRANSPARENT);
    }

    #[test]
    fn test_char_spans_map_to_byte_ranges() {
        // 'é' is two bytes; the span is in characters.
        let spans = [styled(Tag::Bold, 2, 7)];
        let job = overlay_layout_job("é **b**", &spans, EditorColors::light(), 14.0);
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.sections[1].byte_range, 3..8);
        assert_eq!(
            job.sections[1].format.color,
            TagPalette::light().style(Tag::Bold).foreground
        );
    }

    #[test]
    fn test_stale_span_is_clamped() {
        // A span past the end of the text must not panic or emit ranges
        // outside the buffer.
        let spans = [styled(Tag::Bold, 2, 99)];
        let job = overlay_layout_job("short", &spans, EditorColors::light(), 14.0);
        let last = job.sections.last().unwrap();
        assert_eq!(last.byte_range.end, 5);
    }
}
