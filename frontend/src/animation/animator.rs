use kurbo::{Point, Rect, Vec2};
use log::debug;

use super::clones::{clone_center, top_left, CloneSet};
use super::layout::HeroLayout;
use super::phase::{Phase, HEADER_END};
use super::reveal::RevealOrder;
use super::style::{ElementId, GeometryProvider, StyleSink, Transform};
use super::tween::{clamp01, lerp, window_progress};

/// Delay between consecutive icons starting their catch-up, in intro-local progress.
pub const ICON_STAGGER: f64 = 0.1;
/// Length of each icon's catch-up window, in intro-local progress.
pub const ICON_WINDOW: f64 = 0.5;

/// Maps hero scroll progress onto styles for the header, the icon cluster,
/// the icon clones and the text segments.
///
/// Apart from the clone set, every frame is derived from the progress value
/// alone, so the animator copes with progress moving backwards.
pub struct ProgressAnimator {
    layout: HeroLayout,
    reveal: RevealOrder,
    clones: Option<CloneSet>,
    generation: u64,
}

impl ProgressAnimator {
    pub fn new(layout: HeroLayout, reveal: RevealOrder) -> Self {
        ProgressAnimator {
            layout,
            reveal,
            clones: None,
            generation: 0,
        }
    }

    pub fn layout(&self) -> &HeroLayout {
        &self.layout
    }

    #[cfg(test)]
    pub fn clones(&self) -> Option<CloneSet> {
        self.clones
    }

    /// Swaps in a freshly measured layout. Clones sized for the old layout are removed.
    pub fn relayout<S: StyleSink + ?Sized>(&mut self, layout: HeroLayout, sink: &mut S) {
        self.dispose_clones(sink);
        self.layout = layout;
    }

    /// Renders one frame and returns the phase that handled it.
    pub fn update<S, G>(&mut self, progress: f64, sink: &mut S, geometry: &G) -> Phase
    where
        S: StyleSink + ?Sized,
        G: GeometryProvider + ?Sized,
    {
        let progress = clamp01(progress);

        for segment in 0..self.layout.segment_count {
            sink.set_opacity(ElementId::Segment(segment), 0.0);
        }

        let phase = Phase::at(progress);
        if !phase.keeps_clones() {
            self.dispose_clones(sink);
        }

        match phase {
            Phase::Intro => self.intro(progress, sink),
            Phase::Converge => self.converge(progress, sink, geometry),
            Phase::Disperse => self.disperse(progress, sink, geometry),
            Phase::Reveal => self.final_reveal(progress, sink, geometry),
        }
        phase
    }

    /// Creates one clone per icon unless a set already exists.
    pub fn spawn_clones<S: StyleSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        if self.clones.is_some() {
            return false;
        }
        self.generation += 1;
        let count = self.layout.icon_count;
        for index in 0..count {
            sink.create_clone(index, self.layout.target_icon_size);
        }
        debug!("spawned {} icon clones (generation {})", count, self.generation);
        self.clones = Some(CloneSet {
            generation: self.generation,
            count,
        });
        true
    }

    /// Removes every clone and clears the registry. Safe to call when none exist.
    pub fn dispose_clones<S: StyleSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let Some(set) = self.clones.take() else {
            return false;
        };
        for index in 0..set.count {
            sink.remove_clone(index);
        }
        debug!("disposed {} icon clones (generation {})", set.count, set.generation);
        true
    }

    fn intro<S: StyleSink + ?Sized>(&self, progress: f64, sink: &mut S) {
        let move_progress = Phase::Intro.local(progress);
        let container_y = self.layout.base_y() * move_progress;

        let header_progress = (progress / HEADER_END).min(1.0);
        sink.set_transform(
            ElementId::Header,
            Transform::translate(0.0, -self.layout.header_rise * header_progress),
        );
        sink.set_opacity(ElementId::Header, 1.0 - header_progress);
        sink.set_background(ElementId::Section, &self.layout.dark_background);

        sink.set_transform(ElementId::Container, Transform::translate(0.0, container_y));
        sink.set_opacity(ElementId::Container, 1.0);

        // Each icon starts fully counter-offset so it stays put while the
        // container rises, then catches up inside its own window.
        for index in 0..self.layout.icon_count {
            let start = index as f64 * ICON_STAGGER;
            let caught_up = window_progress(start, start + ICON_WINDOW, move_progress);
            let y = -container_y * (1.0 - caught_up);
            sink.set_transform(ElementId::Icon(index), Transform::translate(0.0, y));
        }
    }

    fn converge<S, G>(&self, progress: f64, sink: &mut S, geometry: &G)
    where
        S: StyleSink + ?Sized,
        G: GeometryProvider + ?Sized,
    {
        let local = Phase::Converge.local(progress);
        self.hide_header(sink);

        let background = if local >= 0.5 {
            &self.layout.light_background
        } else {
            &self.layout.dark_background
        };
        sink.set_background(ElementId::Section, background);

        let delta = self.converge_delta(geometry) * local;
        let transform = Transform::translate(delta.x, self.layout.base_y() + delta.y)
            .with_scale(lerp(1.0, self.layout.exact_scale, local));
        sink.set_transform(ElementId::Container, transform);
        sink.set_opacity(ElementId::Container, 1.0);
        self.reset_icons(sink);
    }

    fn disperse<S, G>(&mut self, progress: f64, sink: &mut S, geometry: &G)
    where
        S: StyleSink + ?Sized,
        G: GeometryProvider + ?Sized,
    {
        let local = Phase::Disperse.local(progress);
        self.hide_header(sink);
        sink.set_background(ElementId::Section, &self.layout.light_background);
        sink.set_transform(ElementId::Container, self.converged_transform(geometry));
        sink.set_opacity(ElementId::Container, 1.0 - local);
        self.reset_icons(sink);

        self.spawn_clones(sink);
        let scroll = geometry.scroll_offset();
        for index in 0..self.clone_count() {
            let Some(start) = geometry.icon_rect(index).and_then(usable_center) else {
                continue;
            };
            let Some(target) = geometry.placeholder_rect(index).and_then(usable_center) else {
                continue;
            };
            let center = clone_center(start + scroll, target + scroll, local);
            self.place_clone(sink, index, center);
        }
    }

    fn final_reveal<S, G>(&mut self, progress: f64, sink: &mut S, geometry: &G)
    where
        S: StyleSink + ?Sized,
        G: GeometryProvider + ?Sized,
    {
        self.hide_header(sink);
        sink.set_background(ElementId::Section, &self.layout.light_background);
        sink.set_transform(ElementId::Container, self.converged_transform(geometry));
        sink.set_opacity(ElementId::Container, 0.0);
        self.reset_icons(sink);

        self.spawn_clones(sink);
        let scroll = geometry.scroll_offset();
        for index in 0..self.clone_count() {
            if let Some(target) = geometry.placeholder_rect(index).and_then(usable_center) {
                self.place_clone(sink, index, target + scroll);
            }
        }

        for segment in 0..self.layout.segment_count {
            sink.set_opacity(ElementId::Segment(segment), self.reveal.opacity(segment, progress));
        }
    }

    fn hide_header<S: StyleSink + ?Sized>(&self, sink: &mut S) {
        sink.set_transform(ElementId::Header, Transform::translate(0.0, -self.layout.header_rise));
        sink.set_opacity(ElementId::Header, 0.0);
    }

    fn reset_icons<S: StyleSink + ?Sized>(&self, sink: &mut S) {
        for index in 0..self.layout.icon_count {
            sink.set_transform(ElementId::Icon(index), Transform::IDENTITY);
        }
    }

    fn place_clone<S: StyleSink + ?Sized>(&self, sink: &mut S, index: usize, center: Point) {
        let element = ElementId::Clone(index);
        sink.set_position(element, top_left(center, self.layout.target_icon_size));
        sink.set_opacity(element, 1.0);
    }

    fn clone_count(&self) -> usize {
        self.clones.map_or(0, |set| set.count)
    }

    /// Offset that moves the cluster from where the intro left it to the viewport centre.
    fn converge_delta<G: GeometryProvider + ?Sized>(&self, geometry: &G) -> Vec2 {
        let Some(layout_center) = usable_center(geometry.container_rect()) else {
            return Vec2::ZERO;
        };
        let target = Point::new(self.layout.viewport.width / 2.0, self.layout.viewport.height / 2.0);
        let rest = layout_center + Vec2::new(0.0, self.layout.base_y());
        target - rest
    }

    fn converged_transform<G: GeometryProvider + ?Sized>(&self, geometry: &G) -> Transform {
        let delta = self.converge_delta(geometry);
        Transform::translate(delta.x, self.layout.base_y() + delta.y).with_scale(self.layout.exact_scale)
    }
}

/// Centre of a rect, or `None` when the rect has no area to speak of.
fn usable_center(rect: Rect) -> Option<Point> {
    let finite = rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite();
    if !finite || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    Some(rect.center())
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::animation::testing::{FixedGeometry, RecordingSink, Write};
    use crate::config::HeroConfig;

    const ICONS: usize = 5;
    const SEGMENTS: usize = 8;
    const EPS: f64 = 1e-6;

    fn layout() -> HeroLayout {
        HeroLayout::measure(&HeroConfig::default(), Size::new(1400.0, 1000.0), 120.0, ICONS, SEGMENTS)
    }

    fn geometry() -> FixedGeometry {
        FixedGeometry {
            container: Rect::new(400.0, 700.0, 800.0, 820.0),
            icons: (0..ICONS)
                .map(|i| Rect::from_origin_size((640.0 + 30.0 * i as f64, 480.0), (30.0, 30.0)))
                .collect(),
            placeholders: (0..ICONS)
                .map(|i| Rect::from_origin_size((200.0 + 150.0 * i as f64, 150.0), (60.0, 60.0)))
                .collect(),
            scroll: Vec2::new(0.0, 2000.0),
        }
    }

    fn animator() -> ProgressAnimator {
        ProgressAnimator::new(layout(), RevealOrder::from_ranks(vec![3, 0, 7, 1, 6, 2, 5, 4]).unwrap())
    }

    fn render(progress: f64) -> RecordingSink {
        let mut sink = RecordingSink::default();
        animator().update(progress, &mut sink, &geometry());
        sink
    }

    fn start_center(index: usize) -> Point {
        Point::new(655.0 + 30.0 * index as f64, 2495.0)
    }

    fn target_center(index: usize) -> Point {
        Point::new(230.0 + 150.0 * index as f64, 2180.0)
    }

    fn clone_center_of(sink: &RecordingSink, index: usize) -> Point {
        let top_left = sink.positions[&ElementId::Clone(index)];
        Point::new(top_left.x + 30.0, top_left.y + 30.0)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn assert_transform_close(a: Transform, b: Transform) {
        assert!(
            close(a.x, b.x) && close(a.y, b.y) && close(a.scale, b.scale),
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn start_of_scroll_shows_the_untouched_hero() {
        let sink = render(0.0);
        assert_eq!(sink.opacity(ElementId::Header), 1.0);
        assert_eq!(sink.transform(ElementId::Header).y, 0.0);
        assert_eq!(sink.transform(ElementId::Container).y, 0.0);
        assert_eq!(sink.opacity(ElementId::Container), 1.0);
        for i in 0..ICONS {
            assert_eq!(sink.transform(ElementId::Icon(i)).y, 0.0);
        }
        assert_eq!(sink.background(), Some("#141414"));
    }

    #[test]
    fn header_is_gone_halfway_through_the_intro() {
        let sink = render(0.15);
        assert_eq!(sink.opacity(ElementId::Header), 0.0);
        assert!(close(sink.transform(ElementId::Header).y, -50.0));

        let offsets: Vec<f64> = (0..ICONS).map(|i| sink.transform(ElementId::Icon(i)).y).collect();
        assert!(close(offsets[0], 0.0));
        assert!(offsets[1] > 0.0);
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1] + EPS), "{offsets:?}");
        assert!(offsets[4] < 150.0);
    }

    #[test]
    fn quarter_of_the_intro_lands_on_exact_offsets() {
        // 0.075 is a quarter of the intro and half of the header range
        let sink = render(0.075);
        assert_eq!(sink.opacity(ElementId::Header), 0.5);
        assert_eq!(sink.transform(ElementId::Header).y, -25.0);
        assert_eq!(sink.transform(ElementId::Container).y, -75.0);

        // icon 0 is halfway through its window, icons 3 and 4 have not started
        assert_eq!(sink.transform(ElementId::Icon(0)).y, 37.5);
        assert!(close(sink.transform(ElementId::Icon(1)).y, 52.5));
        assert!(close(sink.transform(ElementId::Icon(2)).y, 67.5));
        assert_eq!(sink.transform(ElementId::Icon(3)).y, 75.0);
        assert_eq!(sink.transform(ElementId::Icon(4)).y, 75.0);
    }

    #[test]
    fn header_stays_hidden_for_the_rest_of_the_intro() {
        let sink = render(0.25);
        assert_eq!(sink.opacity(ElementId::Header), 0.0);
        assert!(close(sink.transform(ElementId::Header).y, -50.0));
    }

    #[test]
    fn converge_switches_background_and_scales_partway() {
        let sink = render(0.45);
        assert_eq!(sink.background(), Some("#e3e3db"));
        let scale = sink.transform(ElementId::Container).scale;
        assert!(scale < 1.0 && scale > 0.5, "scale {scale}");
        for i in 0..ICONS {
            assert_eq!(sink.transform(ElementId::Icon(i)), Transform::IDENTITY);
        }

        assert_eq!(render(0.35).background(), Some("#141414"));
    }

    #[test]
    fn converge_ends_with_the_cluster_centred() {
        let sink = render(0.6);
        // layout centre (600, 760) raised by 300 lands on (700, 500) after (100, 40)
        assert_transform_close(
            sink.transform(ElementId::Container),
            Transform { x: 100.0, y: -260.0, scale: 0.5 },
        );
    }

    #[test]
    fn degenerate_container_geometry_produces_no_motion() {
        let mut geometry = geometry();
        geometry.container = Rect::ZERO;
        let mut sink = RecordingSink::default();
        animator().update(0.5, &mut sink, &geometry);
        let transform = sink.transform(ElementId::Container);
        assert_eq!(transform.x, 0.0);
        assert!(close(transform.y, -300.0));
    }

    #[test]
    fn mid_dispersal_clones_have_only_moved_vertically() {
        let sink = render(0.675);
        assert_eq!(sink.live_clones.len(), ICONS);
        for i in 0..ICONS {
            let center = clone_center_of(&sink, i);
            assert!((center.x - start_center(i).x).abs() < 1e-3, "clone {i} at {center:?}");
            assert!(center.y <= start_center(i).y && center.y >= target_center(i).y - EPS);
        }

        let sink = render(0.65);
        for i in 0..ICONS {
            let center = clone_center_of(&sink, i);
            assert!(close(center.x, start_center(i).x));
            assert!(close(center.y, 2285.0));
        }
    }

    #[test]
    fn dispersal_fades_the_cluster() {
        let sink = render(0.7);
        let opacity = sink.opacity(ElementId::Container);
        assert!(opacity > 0.0 && opacity < 1.0);
        assert_eq!(sink.opacity(ElementId::Clone(0)), 1.0);
    }

    #[test]
    fn full_progress_pins_clones_and_reveals_all_text() {
        let sink = render(1.0);
        assert_eq!(sink.opacity(ElementId::Container), 0.0);
        for i in 0..ICONS {
            assert_eq!(clone_center_of(&sink, i), target_center(i));
        }
        for s in 0..SEGMENTS {
            assert_eq!(sink.opacity(ElementId::Segment(s)), 1.0);
        }
    }

    #[test]
    fn text_follows_the_permutation() {
        // segment 1 holds rank 0, segment 0 holds rank 3
        let sink = render(0.77);
        assert_eq!(sink.opacity(ElementId::Segment(1)), 1.0);
        assert_eq!(sink.opacity(ElementId::Segment(0)), 0.0);
        assert_eq!(sink.opacity(ElementId::Segment(2)), 0.0);
    }

    #[test]
    fn every_frame_starts_by_hiding_text() {
        for progress in [0.0, 0.2, 0.5, 0.7, 0.9, 1.0] {
            let sink = render(progress);
            let expected: Vec<Write> = (0..SEGMENTS)
                .map(|s| Write::Opacity(ElementId::Segment(s), 0.0))
                .collect();
            assert_eq!(sink.writes[..SEGMENTS], expected[..], "progress {progress}");
            if progress <= 0.75 {
                assert!((0..SEGMENTS).all(|s| sink.opacity(ElementId::Segment(s)) == 0.0));
            }
        }
    }

    #[test]
    fn clones_exist_exactly_in_the_late_phases() {
        let geometry = geometry();
        let mut animator = animator();
        let mut sink = RecordingSink::default();
        for step in 0..=100 {
            let progress = step as f64 / 100.0;
            animator.update(progress, &mut sink, &geometry);
            let expected = progress > 0.6;
            assert_eq!(animator.clones().is_some(), expected, "progress {progress}");
            assert_eq!(sink.live_clones.len(), if expected { ICONS } else { 0 });
        }
        assert_eq!(sink.created, ICONS);
    }

    #[test]
    fn skipping_dispersal_still_spawns_clones() {
        let mut animator = animator();
        let mut sink = RecordingSink::default();
        animator.update(0.5, &mut sink, &geometry());
        animator.update(0.9, &mut sink, &geometry());
        assert_eq!(sink.live_clones.len(), ICONS);
        assert_eq!(clone_center_of(&sink, 2), target_center(2));
    }

    #[test]
    fn scrolling_back_tears_down_clones_and_restores_the_intro() {
        let geometry = geometry();
        let mut animator = animator();
        let mut sink = RecordingSink::default();
        animator.update(0.8, &mut sink, &geometry);
        assert_eq!(sink.live_clones.len(), ICONS);

        animator.update(0.1, &mut sink, &geometry);
        assert!(animator.clones().is_none());
        assert!(sink.live_clones.is_empty());
        assert_eq!(sink.removed, ICONS);
        assert!((0..ICONS).all(|i| !sink.positions.contains_key(&ElementId::Clone(i))));

        let fresh = render(0.1);
        assert_eq!(sink.transforms, fresh.transforms);
        assert_eq!(sink.backgrounds, fresh.backgrounds);
        assert_eq!(sink.opacity(ElementId::Header), fresh.opacity(ElementId::Header));
        assert_eq!(sink.opacity(ElementId::Container), 1.0);
    }

    #[test]
    fn reentering_spawns_a_fresh_set() {
        let geometry = geometry();
        let mut animator = animator();
        let mut sink = RecordingSink::default();
        animator.update(0.7, &mut sink, &geometry);
        let first = animator.clones().unwrap();
        animator.update(0.2, &mut sink, &geometry);
        animator.update(0.7, &mut sink, &geometry);
        let second = animator.clones().unwrap();

        assert_ne!(first.generation, second.generation);
        assert_eq!(sink.created, 2 * ICONS);
        assert_eq!(sink.live_clones.len(), ICONS);
    }

    #[test]
    fn spawn_and_dispose_are_idempotent() {
        let mut animator = animator();
        let mut sink = RecordingSink::default();
        assert!(animator.spawn_clones(&mut sink));
        assert!(!animator.spawn_clones(&mut sink));
        assert_eq!(sink.created, ICONS);
        assert!(animator.dispose_clones(&mut sink));
        assert!(!animator.dispose_clones(&mut sink));
        assert_eq!(sink.removed, ICONS);
    }

    #[test]
    fn phase_boundaries_are_continuous() {
        for boundary in [0.3, 0.6, 0.75] {
            let before = render(boundary);
            let after = render(boundary + 1e-9);

            for element in [ElementId::Header, ElementId::Container]
                .into_iter()
                .chain((0..ICONS).map(ElementId::Icon))
            {
                assert_transform_close(before.transform(element), after.transform(element));
                assert!(
                    close(before.opacity(element), after.opacity(element)),
                    "{element:?} opacity jumps at {boundary}"
                );
            }
            assert_eq!(before.background(), after.background(), "background jumps at {boundary}");
            for s in 0..SEGMENTS {
                assert!(close(
                    before.opacity(ElementId::Segment(s)),
                    after.opacity(ElementId::Segment(s))
                ));
            }
        }

        let before = render(0.75);
        let after = render(0.75 + 1e-9);
        for i in 0..ICONS {
            assert_eq!(clone_center_of(&before, i), clone_center_of(&after, i));
        }
    }

    #[test]
    fn same_order_and_sequence_give_identical_frames() {
        let sequence = [0.1, 0.4, 0.65, 0.8, 0.95, 0.7, 0.2, 0.85, 1.0];
        let geometry = geometry();
        let run = || {
            let mut animator = ProgressAnimator::new(layout(), RevealOrder::seeded(SEGMENTS, 42));
            let mut sink = RecordingSink::default();
            for progress in sequence {
                animator.update(progress, &mut sink, &geometry);
            }
            sink.writes
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(animator().update(f64::NAN, &mut RecordingSink::default(), &geometry()), Phase::Intro);
        assert_eq!(animator().update(-1.0, &mut RecordingSink::default(), &geometry()), Phase::Intro);
        assert_eq!(animator().update(7.0, &mut RecordingSink::default(), &geometry()), Phase::Reveal);
    }

    #[test]
    fn missing_placeholder_leaves_that_clone_unplaced() {
        let mut geometry = geometry();
        geometry.placeholders.truncate(3);
        let mut sink = RecordingSink::default();
        animator().update(1.0, &mut sink, &geometry);
        assert_eq!(sink.live_clones.len(), ICONS);
        assert!(sink.positions.contains_key(&ElementId::Clone(2)));
        assert!(!sink.positions.contains_key(&ElementId::Clone(3)));
    }

    #[test]
    fn relayout_drops_clones_sized_for_the_old_viewport() {
        let mut animator = animator();
        let mut sink = RecordingSink::default();
        animator.update(0.9, &mut sink, &geometry());
        let narrow = HeroLayout::measure(&HeroConfig::default(), Size::new(800.0, 1000.0), 120.0, ICONS, SEGMENTS);
        animator.relayout(narrow, &mut sink);
        assert!(sink.live_clones.is_empty());
        assert_eq!(animator.layout().target_icon_size, 30.0);
    }
}
