//! Tests for the layout engine render pass.

use super::*;
use crate::model::error::PluginError;
use crate::model::sequence::Sequence;
use crate::view_state::element::Primitive;
use crate::view_state::geometry::BoundingBox;
use crate::view_state::metrics::{MonospaceMeasurer, StyleClass};
use crate::view_state::plugin::test_support::CountingPlugin;
use crate::view_state::surface::{NullSurface, RecordingSurface, SurfaceOp};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

// ===== Test Helpers =====

#[derive(Default)]
struct Script {
    calls: Vec<LineIndex>,
    heights: HashMap<usize, u32>,
    failing: HashSet<usize>,
    requests: HashMap<usize, usize>,
    completed: Vec<u32>,
}

/// Draws one bar per line, with per-line height, failure and invalidation requests
/// controlled from the test body.
struct ScriptedPlugin {
    script: Rc<RefCell<Script>>,
}

impl RendererPlugin for ScriptedPlugin {
    fn name(&self) -> &str {
        "scripted"
    }

    fn on_redraw(&mut self, ctx: &mut RedrawContext<'_>) -> Result<Vec<Element>, PluginError> {
        let mut script = self.script.borrow_mut();
        let line = ctx.line().get();
        script.calls.push(ctx.line());
        if let Some(&target) = script.requests.get(&line) {
            ctx.request_invalidation(LineIndex::new(target));
        }
        if script.failing.contains(&line) {
            return Err(PluginError::Other(format!("line {line} refused")));
        }
        let height = script.heights.get(&line).copied().unwrap_or(2);
        Ok(vec![Element::with_primitive(Primitive::bar(
            BoundingBox::from_origin(0, ctx.next_top(), 10, height),
            StyleClass::Sequence,
        ))])
    }

    fn on_render_complete(&mut self, canvas_height: u32) {
        self.script.borrow_mut().completed.push(canvas_height);
    }
}

fn config() -> LayoutConfig {
    LayoutConfig {
        top_margin: 3,
        bottom_margin: 4,
        left_margin: 1,
        right_margin: 1,
        zoom: Zoom::new(10).unwrap(),
        placeholder_height: 1,
        ..LayoutConfig::default()
    }
}

fn engine<S: Surface>(surface: S) -> (LayoutEngine<S>, Rc<RefCell<Script>>) {
    let mut engine = LayoutEngine::new(
        config(),
        ViewportDimensions::new(42, 20),
        Box::new(MonospaceMeasurer::default()),
        surface,
    );
    let script = Rc::new(RefCell::new(Script::default()));
    engine.register_plugin(Box::new(ScriptedPlugin {
        script: Rc::clone(&script),
    }));
    (engine, script)
}

fn bases(len: usize) -> Sequence {
    Sequence::new("ACGT".repeat(len / 4 + 1)[..len].to_string()).unwrap()
}

fn take_calls(script: &Rc<RefCell<Script>>) -> Vec<usize> {
    std::mem::take(&mut script.borrow_mut().calls)
        .into_iter()
        .map(|l| l.get())
        .collect()
}

fn assert_stacked<S: Surface>(engine: &LayoutEngine<S>) {
    let config = engine.config();
    let mut expected_y = config.top_margin as i32;
    for line in engine.lines() {
        assert_eq!(line.translation().y, expected_y, "line {}", line.index());
        assert_eq!(line.translation().x, config.left_margin as i32);
        expected_y = line.bottom();
    }
    assert_eq!(
        engine.canvas_height(),
        expected_y as u32 + config.bottom_margin
    );
}

// ===== Line set =====

#[test]
fn empty_sequence_has_no_lines_and_margin_height() {
    let (mut engine, script) = engine(NullSurface::new());
    let report = engine.render(&bases(0));
    assert_eq!(engine.line_count(), 0);
    assert_eq!(report.canvas_height, 7);
    assert!(report.rendered.is_empty());
    assert_eq!(script.borrow().completed, vec![7]);
}

#[test]
fn line_count_is_ceiling_of_length_over_zoom() {
    let (mut engine, _) = engine(NullSurface::new());
    engine.render(&bases(95));
    assert_eq!(engine.line_count(), 10);
    engine.render(&bases(100));
    assert_eq!(engine.line_count(), 10);
    engine.render(&bases(101));
    assert_eq!(engine.line_count(), 11);
}

#[test]
fn shrinking_releases_dropped_content() {
    let (mut engine, _) = engine(RecordingSurface::new());
    engine.render(&bases(50));
    assert_eq!(engine.surface().live_handles(), 5);

    engine.render(&bases(21));
    assert_eq!(engine.line_count(), 3);
    assert_eq!(engine.surface().live_handles(), 3);
}

// ===== Render pass =====

#[test]
fn first_render_calls_plugin_once_per_line() {
    let (mut engine, script) = engine(NullSurface::new());
    let report = engine.render(&bases(35));
    assert_eq!(take_calls(&script), vec![0, 1, 2, 3]);
    assert_eq!(report.rendered.len(), 4);
    assert_eq!(engine.dirty_count(), 0);
    assert_stacked(&engine);
}

#[test]
fn second_render_without_invalidation_is_noop() {
    let (mut engine, script) = engine(NullSurface::new());
    let sequence = bases(35);
    engine.render(&sequence);
    take_calls(&script);

    let report = engine.render(&sequence);

    assert!(take_calls(&script).is_empty());
    assert!(report.is_noop());
    assert_stacked(&engine);
}

#[test]
fn invalidate_redraws_only_that_line() {
    let (mut engine, script) = engine(NullSurface::new());
    let sequence = bases(40);
    engine.render(&sequence);
    take_calls(&script);

    engine.invalidate(LineIndex::new(2));
    assert_eq!(engine.dirty_count(), 1);
    engine.render(&sequence);

    assert_eq!(take_calls(&script), vec![2]);
}

#[test]
fn invalidate_out_of_range_is_ignored() {
    let (mut engine, _) = engine(NullSurface::new());
    engine.render(&bases(20));
    engine.invalidate(LineIndex::new(99));
    assert_eq!(engine.dirty_count(), 0);
}

#[test]
fn taller_line_pushes_later_lines_down_without_redraw() {
    let (mut engine, script) = engine(RecordingSurface::new());
    let sequence = bases(40);
    engine.render(&sequence);
    take_calls(&script);
    engine.surface_mut().take_ops();

    script.borrow_mut().heights.insert(1, 7);
    engine.invalidate(LineIndex::new(1));
    let report = engine.render(&sequence);

    // GIVEN line 1 grew from 2 to 7
    // THEN only line 1 was redrawn, lines 2 and 3 moved down by 5
    assert_eq!(take_calls(&script), vec![1]);
    assert_eq!(engine.lines()[2].translation().y, 3 + 2 + 7);
    assert_eq!(engine.lines()[3].translation().y, 3 + 2 + 7 + 2);
    assert_eq!(report.canvas_height, 3 + 13 + 4);
    let translated = engine
        .surface()
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::Translate(..)))
        .count();
    assert_eq!(translated, 2);
    assert_stacked(&engine);
}

#[test]
fn redraw_clears_previous_content_before_drawing() {
    let (mut engine, _) = engine(RecordingSurface::new());
    let sequence = bases(10);
    engine.render(&sequence);
    engine.surface_mut().take_ops();

    engine.invalidate(LineIndex::new(0));
    engine.render(&sequence);

    let handle = engine.lines()[0].content();
    let ops = engine.surface().ops();
    let clear = ops.iter().position(|op| *op == SurfaceOp::Clear(handle));
    let draw = ops
        .iter()
        .position(|op| matches!(op, SurfaceOp::Draw(h, _, _) if *h == handle));
    assert!(clear.is_some() && draw.is_some());
    assert!(clear < draw);
    assert_eq!(
        engine.surface().content(handle).map(|c| c.elements.len()),
        Some(1)
    );
}

#[test]
fn plugins_stack_below_earlier_output() {
    let (mut engine, _) = engine(NullSurface::new());
    let (counting, calls) = CountingPlugin::new(2);
    engine.register_plugin(Box::new(counting));
    engine.render(&bases(10));

    // Scripted bar is 2 tall, the counting plugin adds two rows of text below it.
    assert_eq!(engine.lines()[0].height(), 4);
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(engine.plugin_names(), vec!["scripted", "counting"]);
}

#[test]
fn no_plugins_means_zero_height_lines() {
    let mut engine = LayoutEngine::new(
        config(),
        ViewportDimensions::new(42, 20),
        Box::new(MonospaceMeasurer::default()),
        NullSurface::new(),
    );
    let report = engine.render(&bases(25));
    assert_eq!(report.rendered.len(), 3);
    assert_eq!(report.canvas_height, 7);
}

// ===== Failure =====

#[test]
fn failed_plugin_draws_placeholder_and_stays_dirty() {
    let (mut engine, script) = engine(RecordingSurface::new());
    script.borrow_mut().failing.insert(1);
    let sequence = bases(30);

    let report = engine.render(&sequence);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].line, LineIndex::new(1));
    assert_eq!(report.failed[0].plugin, "scripted");
    let line = &engine.lines()[1];
    assert!(line.is_dirty());
    assert_eq!(line.height(), 1);
    let content = engine.surface().content(line.content()).unwrap();
    assert_eq!(content.elements.len(), 1);
    assert_eq!(
        content.elements[0].primitives()[0].style(),
        StyleClass::Placeholder
    );
    assert_stacked(&engine);
}

#[test]
fn failed_line_is_retried_next_pass() {
    let (mut engine, script) = engine(NullSurface::new());
    script.borrow_mut().failing.insert(0);
    let sequence = bases(20);
    engine.render(&sequence);
    take_calls(&script);

    script.borrow_mut().failing.clear();
    let report = engine.render(&sequence);

    assert_eq!(take_calls(&script), vec![0]);
    assert!(report.is_clean());
    assert!(engine.lines()[0].failure().is_none());
    assert_eq!(engine.dirty_count(), 0);
}

// ===== Cancellation and deferred requests =====

#[test]
fn cancelled_pass_leaves_lines_dirty() {
    let (mut engine, script) = engine(NullSurface::new());
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = engine.render_with_cancel(&bases(30), &cancel);

    assert!(report.cancelled);
    assert!(take_calls(&script).is_empty());
    assert_eq!(engine.dirty_count(), 3);
}

#[test]
fn plugin_requests_apply_after_the_pass() {
    let (mut engine, script) = engine(NullSurface::new());
    script.borrow_mut().requests.insert(2, 0);
    let sequence = bases(30);

    engine.render(&sequence);
    assert_eq!(take_calls(&script), vec![0, 1, 2]);
    assert!(engine.lines()[0].is_dirty());

    script.borrow_mut().requests.clear();
    engine.render(&sequence);
    assert_eq!(take_calls(&script), vec![0]);
}

// ===== Events =====

#[test]
fn zoom_change_rebuilds_and_redraws_everything() {
    let (mut engine, script) = engine(NullSurface::new());
    let sequence = bases(40);
    engine.render(&sequence);
    take_calls(&script);

    let report = engine.on_zoom_changed(Zoom::new(20).unwrap(), &sequence);

    assert_eq!(engine.line_count(), 2);
    assert_eq!(take_calls(&script), vec![0, 1]);
    assert_eq!(report.line_count, 2);
    assert_stacked(&engine);
}

#[test]
fn same_zoom_only_renders() {
    let (mut engine, script) = engine(NullSurface::new());
    let sequence = bases(40);
    engine.render(&sequence);
    take_calls(&script);

    engine.on_zoom_changed(Zoom::new(10).unwrap(), &sequence);
    assert!(take_calls(&script).is_empty());
}

#[test]
fn resize_remeasures_and_redraws_everything() {
    let (mut engine, script) = engine(NullSurface::new());
    let sequence = bases(25);
    engine.render(&sequence);
    take_calls(&script);
    assert_eq!(engine.display_mode(), DisplayMode::Text);

    engine.on_resize(ViewportDimensions::new(8, 20), &sequence);

    assert_eq!(engine.metrics().line_width(), 6);
    assert_eq!(engine.display_mode(), DisplayMode::Bar);
    assert_eq!(take_calls(&script), vec![0, 1, 2]);
}

#[test]
fn sequence_edit_redraws_from_affected_line() {
    let (mut engine, script) = engine(NullSurface::new());
    let mut sequence = bases(50);
    engine.render(&sequence);
    take_calls(&script);

    let edit = sequence.insert(23, "GG").unwrap();
    engine.on_sequence_edit(&edit.range, &sequence);

    assert_eq!(engine.line_count(), 6);
    assert_eq!(take_calls(&script), vec![2, 3, 4, 5]);
    assert_stacked(&engine);
}

#[test]
fn growing_without_notification_redraws_old_last_line() {
    let (mut engine, script) = engine(NullSurface::new());
    engine.render(&bases(25));
    take_calls(&script);

    engine.render(&bases(32));

    assert_eq!(take_calls(&script), vec![2, 3]);
}

#[test]
fn sequence_replaced_redraws_everything() {
    let (mut engine, script) = engine(NullSurface::new());
    let sequence = bases(30);
    engine.render(&sequence);
    take_calls(&script);

    engine.on_sequence_replaced(&Sequence::new("T".repeat(30)).unwrap());
    assert_eq!(take_calls(&script), vec![0, 1, 2]);
}

// ===== Hit testing =====

#[test]
fn line_at_y_maps_through_margins() {
    let (mut engine, _) = engine(NullSurface::new());
    engine.render(&bases(30));

    assert_eq!(engine.line_at_y(0), None);
    assert_eq!(engine.line_at_y(3), Some(LineIndex::new(0)));
    assert_eq!(engine.line_at_y(4), Some(LineIndex::new(0)));
    assert_eq!(engine.line_at_y(5), Some(LineIndex::new(1)));
    assert_eq!(engine.line_at_y(8), Some(LineIndex::new(2)));
    assert_eq!(engine.line_at_y(9), None);
}

#[test]
fn position_at_maps_columns_to_offsets() {
    let (mut engine, _) = engine(NullSurface::new());
    engine.render(&bases(25));

    assert_eq!(engine.position_at(1, 3), Some(0));
    assert_eq!(engine.position_at(5, 5), Some(14));
    // Past the end of the short last line clamps to the last position.
    assert_eq!(engine.position_at(40, 7), Some(24));
    assert_eq!(engine.position_at(5, 100), None);
}

#[test]
fn into_surface_releases_every_line() {
    let (mut engine, _) = engine(RecordingSurface::new());
    engine.render(&bases(30));
    let surface = engine.into_surface();
    assert_eq!(surface.live_handles(), 0);
}
