//! End-to-end flow across one editing session: acquire drawables, batch
//! mutations through the scheduler, memoize a glyph sheet, and tear down.

use std::rc::Rc;
use std::time::{Duration, Instant};

use canvas_core::prelude::*;

/// Rendering surface double that records drawables and render calls.
#[derive(Default)]
struct RecordingSurface {
    drawables: Vec<PooledDrawable>,
    renders: usize,
    auto_render: bool,
}

impl RenderSurface for RecordingSurface {
    fn add(&mut self, drawable: &PooledDrawable) -> Result<(), String> {
        self.drawables.push(Rc::clone(drawable));
        if self.auto_render {
            self.renders += 1;
        }
        Ok(())
    }

    fn remove(&mut self, drawable: &PooledDrawable) -> Result<(), String> {
        let before = self.drawables.len();
        self.drawables.retain(|held| !Rc::ptr_eq(held, drawable));
        if self.drawables.len() == before {
            return Err("drawable not on surface".to_string());
        }
        if self.auto_render {
            self.renders += 1;
        }
        Ok(())
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn set_auto_render(&mut self, enabled: bool) {
        self.auto_render = enabled;
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_full_session_flow() {
    init_logging();

    let mut config = SessionConfig::default();
    config.scheduler.frame_budget_ms = 16;
    let mut core = CanvasCore::new(&config);
    let mut surface = RecordingSurface {
        auto_render: true,
        ..Default::default()
    };

    // Multi-select paste: three drawables, one render.
    let rect = core.pools.acquire(DrawableKind::Rectangle);
    let ellipse = core.pools.acquire(DrawableKind::Ellipse);
    let label = core.pools.acquire(DrawableKind::TextRun);
    label.borrow_mut().text = "Summer Sale".to_string();

    core.scheduler.batch_add(vec![
        Rc::clone(&rect),
        Rc::clone(&ellipse),
        Rc::clone(&label),
    ]);
    let after_budget = Instant::now() + Duration::from_millis(17);
    core.scheduler.tick(&mut surface, after_budget).unwrap();

    assert_eq!(surface.renders, 1);
    assert_eq!(surface.drawables.len(), 3);

    // Multi-select transform: two patches, one more render.
    let nudge = DrawablePatch {
        opacity: Some(0.8),
        ..Default::default()
    };
    core.scheduler.batch_update(vec![
        (Rc::clone(&rect), nudge.clone()),
        (Rc::clone(&ellipse), nudge),
    ]);
    core.scheduler.flush(&mut surface).unwrap();

    assert_eq!(surface.renders, 2);
    assert!((rect.borrow().opacity - 0.8).abs() < f32::EPSILON);
    assert!((ellipse.borrow().opacity - 0.8).abs() < f32::EPSILON);

    // Glyph sheet memoization: second lookup never regenerates.
    let key = TextureKey::new("Summer Sale:bold-32", 128, 32);
    let mut generated = 0;
    for _ in 0..2 {
        core.textures
            .get_texture(&key, |buffer| {
                generated += 1;
                buffer.allocate(128, 32);
                Ok(())
            })
            .unwrap();
    }
    assert_eq!(generated, 1);
    assert_eq!(core.textures.stats().cache_size, 1);

    // Discard: drawables come off the surface and back to their pools.
    core.scheduler.batch_remove(vec![
        Rc::clone(&rect),
        Rc::clone(&ellipse),
        Rc::clone(&label),
    ]);
    core.scheduler.flush(&mut surface).unwrap();
    assert_eq!(surface.renders, 3);
    assert!(surface.drawables.is_empty());

    core.pools.release(rect).unwrap();
    core.pools.release(ellipse).unwrap();
    core.pools.release(label).unwrap();

    let stats = core.pools.stats();
    for kind in [
        DrawableKind::Rectangle,
        DrawableKind::Ellipse,
        DrawableKind::TextRun,
    ] {
        assert_eq!(stats[&kind].current_in_use, 0, "{} still in use", kind);
    }

    // Recycled drawables come back reset.
    let recycled = core.pools.acquire(DrawableKind::TextRun);
    assert!(recycled.borrow().text.is_empty());

    core.textures.clear_cache();
    assert!(core.textures.is_empty());
}

#[test]
fn test_batch_failure_still_renders_and_reports() {
    init_logging();

    let mut core = CanvasCore::default();
    let mut surface = RecordingSurface::default();

    let rect = core.pools.acquire(DrawableKind::Rectangle);
    let stranger = core.pools.acquire(DrawableKind::Ellipse);

    core.scheduler.batch_add(vec![Rc::clone(&rect)]);
    // Removing a drawable that was never added fails, but must not stop the
    // rest of the batch or suppress the render.
    core.scheduler.batch_remove(vec![Rc::clone(&stranger)]);
    core.scheduler.batch_remove(vec![Rc::clone(&rect)]);

    let err = core.scheduler.flush(&mut surface).unwrap_err();
    let BatchError::Flush { failures } = err;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);

    assert_eq!(surface.renders, 1);
    assert!(surface.drawables.is_empty());

    core.pools.release(rect).unwrap();
    core.pools.release(stranger).unwrap();
}

#[test]
fn test_sessions_are_independent() {
    init_logging();

    let mut first = CanvasCore::default();
    let mut second = CanvasCore::default();

    let drawable = first.pools.acquire(DrawableKind::Group);
    assert_eq!(
        first.pools.stats_for(DrawableKind::Group).current_in_use,
        1
    );
    assert_eq!(
        second.pools.stats_for(DrawableKind::Group).current_in_use,
        0
    );

    first.pools.release(drawable).unwrap();
}
