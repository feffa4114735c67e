use battlefield::geometry::{Rect, ScreenPoint};
use battlefield::app::Rgba;
use battlefield::{DrawSurface, SurfaceError};
use tracing::{info, trace};

use super::config::{ConfigLoadError, SkirmishConfig};
use super::scenario::{ScriptStep, Skirmish, SkirmishSummary};

/// Counts draw calls instead of rasterising; stands in for a window backend.
#[derive(Debug, Default)]
pub(crate) struct HeadlessSurface {
    fills: u64,
    strokes: u64,
    presents: u64,
}

impl HeadlessSurface {
    pub(crate) fn draw_calls(&self) -> u64 {
        self.fills + self.strokes
    }
}

impl DrawSurface for HeadlessSurface {
    fn fill_rect(&mut self, _rect: Rect, _color: Rgba) -> Result<(), SurfaceError> {
        self.fills += 1;
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        _rect: Rect,
        _color: Rgba,
        _line_width: f32,
    ) -> Result<(), SurfaceError> {
        self.strokes += 1;
        Ok(())
    }

    fn present(&mut self, top_left: ScreenPoint) -> Result<(), SurfaceError> {
        self.presents += 1;
        trace!(
            x = top_left.x,
            y = top_left.y,
            fills = self.fills,
            strokes = self.strokes,
            "frame_presented"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunSummary {
    pub(crate) frames: u32,
    pub(crate) presents: u64,
    pub(crate) draw_calls: u64,
    pub(crate) skirmish: SkirmishSummary,
}

/// Fixed-step frame loop: scripted input, update, render.
pub(crate) fn run_headless(
    config: &SkirmishConfig,
    script: &[(u32, ScriptStep)],
) -> Result<RunSummary, ConfigLoadError> {
    let mut skirmish = Skirmish::new(config)?;
    skirmish.set_focus(true);

    let mut ordered = script.to_vec();
    ordered.sort_by_key(|(frame, _)| *frame);
    let mut steps = ordered.into_iter().peekable();

    let mut surface = HeadlessSurface::default();
    info!(
        frames = config.frames,
        frame_dt_seconds = config.frame_dt_seconds,
        script_steps = script.len(),
        "skirmish_started"
    );
    for frame in 0..config.frames {
        while let Some((_, step)) = steps.next_if(|(at, _)| *at <= frame) {
            skirmish.apply(step);
        }
        skirmish.tick(config.frame_dt_seconds);
        skirmish.render(&mut surface);
    }

    let summary = RunSummary {
        frames: config.frames,
        presents: surface.presents,
        draw_calls: surface.draw_calls(),
        skirmish: skirmish.summary(),
    };
    info!(
        frames = summary.frames,
        presents = summary.presents,
        draw_calls = summary.draw_calls,
        selected = summary.skirmish.selected,
        orders_issued = summary.skirmish.orders_issued,
        placements = summary.skirmish.placements,
        credits = summary.skirmish.credits,
        power_balance = summary.skirmish.power_balance,
        alive_entities = summary.skirmish.alive_entities,
        camera_x = summary.skirmish.camera.x,
        camera_y = summary.skirmish.camera.y,
        "skirmish_finished"
    );
    Ok(summary)
}
