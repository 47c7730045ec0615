//! Phased show: growth, bloom, optional slide, done
//!
//! A [`Show`] holds all mutable state of one run and paints one frame per
//! [`Show::step`]. The [`PhaseScheduler`] owns at most one show at a time,
//! requests exactly one frame callback for it at a time, and throws the
//! whole show away when a new run starts.

use rand::Rng;
use crate::data::Scene;
use crate::growth::{branch_shape, thin_branch_shape, BranchGeometry, ThinBranchState};
use crate::particles::ParticleSet;
use crate::render::painter;
use crate::render::Surface;
use super::easing::ease_in_out_cubic;
use super::frames::{FrameId, FrameRequester, ManualFrames};
use super::phase::{AnimationPhase, PhaseClock};

/// Result of painting one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Another frame is needed
    Continue,
    /// The show reached `Done`
    Finished,
}

/// All state of a single run
#[derive(Debug, Clone)]
pub struct Show {
    scene: Scene,
    phase: AnimationPhase,
    growth: PhaseClock,
    bloom: PhaseClock,
    slide: PhaseClock,
    twig_states: Vec<ThinBranchState>,
    particles: ParticleSet,
    /// Trunk at full growth, shared by every frame after growing
    grown: BranchGeometry,
}

impl Show {
    /// Fresh run: nothing anchored, hearts scattered once up front
    pub fn new<R: Rng + ?Sized>(scene: Scene, rng: &mut R) -> Self {
        let grown = branch_shape(scene.root, 1.0, &scene.trunk);
        let particles = ParticleSet::generate(scene.heart_center, scene.heart_radius, &scene.hearts, rng);

        Self {
            phase: AnimationPhase::Growing,
            growth: PhaseClock::new(scene.timing.growth_seconds),
            bloom: PhaseClock::new(scene.timing.bloom_seconds),
            slide: PhaseClock::new(scene.timing.translate_seconds),
            twig_states: vec![ThinBranchState::default(); scene.twigs.len()],
            particles,
            grown,
            scene,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn twig_states(&self) -> &[ThinBranchState] {
        &self.twig_states
    }

    pub fn is_done(&self) -> bool {
        self.phase == AnimationPhase::Done
    }

    /// Paint the frame for timestamp `now_ms` and advance the phase if its clock ran out
    pub fn step(&mut self, now_ms: f64, surface: &mut dyn Surface) -> StepOutcome {
        let complete = match self.phase {
            AnimationPhase::Growing => self.growing_frame(now_ms, surface),
            AnimationPhase::Blooming => self.blooming_frame(now_ms, surface),
            AnimationPhase::Translating => self.translating_frame(now_ms, surface),
            AnimationPhase::Done => return StepOutcome::Finished,
        };

        if complete {
            let next = self.phase.next(self.scene.translate_offset.is_some());
            log::debug!("phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }

        if self.is_done() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continue
        }
    }

    fn growing_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        let p = self.growth.progress(now_ms);
        let scene = &self.scene;

        painter::paint_backdrop(surface, scene);
        let trunk = branch_shape(scene.root, p, &scene.trunk);
        painter::paint_trunk(surface, &trunk, &scene.trunk.fill_color);

        // Thin branches get raw progress and ease on their own
        for (spec, state) in scene.twigs.iter().zip(self.twig_states.iter_mut()) {
            let Some(anchor) = state.advance(spec, p, scene.root, &scene.trunk) else {
                continue;
            };
            if let Some(shape) = thin_branch_shape(anchor, p, spec) {
                painter::paint_twig(surface, &shape, &spec.color);
            }
        }

        p >= 1.0
    }

    fn blooming_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        let p = self.bloom.progress(now_ms);

        painter::paint_backdrop(surface, &self.scene);
        self.paint_grown_plant(surface);
        for (heart, size) in self.particles.blooming(p) {
            painter::paint_heart(surface, heart.position, size, &heart.color);
        }

        p >= 1.0
    }

    fn translating_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        let p = self.slide.progress(now_ms);
        let offset = self.scene.translate_offset.unwrap_or(0.0) * ease_in_out_cubic(p);

        painter::paint_backdrop(surface, &self.scene);
        surface.save();
        surface.translate(offset, 0.0);
        self.paint_grown_plant(surface);
        for heart in self.particles.iter() {
            painter::paint_heart(surface, heart.position, heart.size, &heart.color);
        }
        surface.restore();

        p >= 1.0
    }

    fn paint_grown_plant(&self, surface: &mut dyn Surface) {
        painter::paint_trunk(surface, &self.grown, &self.scene.trunk.fill_color);
        for (spec, state) in self.scene.twigs.iter().zip(&self.twig_states) {
            let shape = state.anchor().and_then(|anchor| thin_branch_shape(anchor, 1.0, spec));
            if let Some(shape) = shape {
                painter::paint_twig(surface, &shape, &spec.color);
            }
        }
    }
}

/// The pending frame request of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    run_id: u64,
    pending: Option<FrameId>,
    cancelled: bool,
    finished: bool,
}

impl RunHandle {
    fn new(run_id: u64) -> Self {
        Self {
            run_id,
            pending: None,
            cancelled: false,
            finished: false,
        }
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Withdraw the pending frame, if any. The run accepts no frames afterwards.
    pub fn cancel(&mut self, frames: &mut dyn FrameRequester) {
        if let Some(id) = self.pending.take() {
            frames.cancel_frame(id);
        }
        self.cancelled = true;
    }

    /// Whether `frame` is the callback this run is waiting for
    fn accepts(&self, frame: FrameId) -> bool {
        !self.cancelled && self.pending == Some(frame)
    }
}

struct ActiveRun {
    handle: RunHandle,
    show: Show,
}

/// Drives one show at a time through its phases, one frame callback at a time
pub struct PhaseScheduler<F: FrameRequester> {
    frames: F,
    active: Option<ActiveRun>,
    runs_started: u64,
    on_finished: Option<Box<dyn FnMut()>>,
}

impl<F: FrameRequester> PhaseScheduler<F> {
    pub fn new(frames: F) -> Self {
        Self {
            frames,
            active: None,
            runs_started: 0,
            on_finished: None,
        }
    }

    /// Hook called once per run when it reaches `Done`
    pub fn set_on_finished(&mut self, hook: impl FnMut() + 'static) {
        self.on_finished = Some(Box::new(hook));
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    /// Cancel any run in flight, then start a fresh one for `scene`
    pub fn start_run<R: Rng + ?Sized>(&mut self, scene: Scene, rng: &mut R) -> Result<u64, String> {
        self.stop();

        self.runs_started += 1;
        let mut handle = RunHandle::new(self.runs_started);
        log::info!(
            "starting run {} ({} layout, {:.0}x{:.0})",
            handle.run_id,
            scene.layout.as_str(),
            scene.width,
            scene.height
        );
        let show = Show::new(scene, rng);
        handle.pending = Some(self.frames.request_frame()?);

        self.active = Some(ActiveRun { handle, show });
        Ok(self.runs_started)
    }

    /// Cancel and discard the current run without signalling completion
    pub fn stop(&mut self) {
        if let Some(mut run) = self.active.take() {
            run.handle.cancel(&mut self.frames);
            log::debug!("run {} cancelled in {:?}", run.handle.run_id, run.show.phase());
        }
    }

    /// Frame callback. Returns whether anything was painted.
    ///
    /// Frames that do not belong to the active run are ignored.
    pub fn on_frame(&mut self, frame: FrameId, now_ms: f64, surface: &mut dyn Surface) -> bool {
        let Some(run) = self.active.as_mut() else {
            return false;
        };
        if !run.handle.accepts(frame) {
            log::debug!("ignoring stale frame {:?}", frame);
            return false;
        }
        run.handle.pending = None;

        match run.show.step(now_ms, surface) {
            StepOutcome::Continue => match self.frames.request_frame() {
                Ok(id) => run.handle.pending = Some(id),
                Err(e) => log::error!("run {} could not request a frame: {}", run.handle.run_id, e),
            },
            StepOutcome::Finished => {
                run.handle.finished = true;
                log::info!("run {} finished", run.handle.run_id);
                if let Some(hook) = self.on_finished.as_mut() {
                    hook();
                }
            }
        }
        true
    }

    pub fn show(&self) -> Option<&Show> {
        self.active.as_ref().map(|run| &run.show)
    }

    pub fn handle(&self) -> Option<&RunHandle> {
        self.active.as_ref().map(|run| &run.handle)
    }

    pub fn phase(&self) -> Option<AnimationPhase> {
        self.show().map(Show::phase)
    }

    pub fn runs_started(&self) -> u64 {
        self.runs_started
    }
}

impl PhaseScheduler<ManualFrames> {
    /// Fire the oldest queued frame at `now_ms`
    pub fn pump(&mut self, now_ms: f64, surface: &mut dyn Surface) -> bool {
        match self.frames.next_pending() {
            Some(frame) => self.on_frame(frame, now_ms, surface),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::data::{LayoutClass, ShowConfig};
    use crate::render::{Layer, RecordingSurface};

    const FRAME_MS: f64 = 100.0;

    fn config(hearts: usize) -> ShowConfig {
        let mut config = ShowConfig::default();
        config.hearts.style.count = hearts;
        config
    }

    fn scheduler_with_counter() -> (PhaseScheduler<ManualFrames>, Rc<Cell<u32>>) {
        let mut scheduler = PhaseScheduler::new(ManualFrames::new());
        let finished = Rc::new(Cell::new(0));
        let counter = finished.clone();
        scheduler.set_on_finished(move || counter.set(counter.get() + 1));
        (scheduler, finished)
    }

    #[test]
    fn test_full_landscape_run() {
        let (mut scheduler, finished) = scheduler_with_counter();
        let scene = Scene::derive(1200.0, 800.0, LayoutClass::Landscape, &config(200));
        scheduler.start_run(scene, &mut StdRng::seed_from_u64(1)).unwrap();

        let mut surface = RecordingSurface::new();
        let mut phases = Vec::new();
        let mut now = 0.0;
        while scheduler.pump(now, &mut surface) {
            phases.push(scheduler.phase().unwrap());
            now += FRAME_MS;
        }

        assert_eq!(scheduler.phase(), Some(AnimationPhase::Done));
        assert!(phases.windows(2).all(|w| w[0] <= w[1]), "phases went backwards");
        assert!(phases.contains(&AnimationPhase::Blooming));
        assert!(phases.contains(&AnimationPhase::Translating));
        assert_eq!(finished.get(), 1);
        assert_eq!(scheduler.frames().pending_count(), 0);
        assert!(scheduler.handle().unwrap().is_finished());

        // Nothing left to pump, the hook stays at one
        assert!(!scheduler.pump(now, &mut surface));
        assert_eq!(finished.get(), 1);
    }

    #[test]
    fn test_portrait_run_skips_slide() {
        let (mut scheduler, finished) = scheduler_with_counter();
        let scene = Scene::derive(400.0, 800.0, LayoutClass::Portrait, &config(50));
        scheduler.start_run(scene, &mut StdRng::seed_from_u64(2)).unwrap();

        let mut surface = RecordingSurface::new();
        let mut now = 0.0;
        let mut saw_slide = false;
        while scheduler.pump(now, &mut surface) {
            saw_slide |= scheduler.phase() == Some(AnimationPhase::Translating);
            now += FRAME_MS;
        }

        assert!(!saw_slide);
        assert_eq!(scheduler.phase(), Some(AnimationPhase::Done));
        assert_eq!(finished.get(), 1);
        assert!(!surface
            .commands()
            .iter()
            .any(|c| matches!(c, crate::render::DrawCommand::Translate { .. })));
    }

    #[test]
    fn test_growth_frames_paint_no_hearts_and_anchor_all_twigs() {
        let (mut scheduler, _) = scheduler_with_counter();
        let scene = Scene::derive(1200.0, 800.0, LayoutClass::Landscape, &config(100));
        scheduler.start_run(scene, &mut StdRng::seed_from_u64(3)).unwrap();

        let mut surface = RecordingSurface::new();
        let mut now = 0.0;
        while scheduler.phase() == Some(AnimationPhase::Growing) {
            assert!(scheduler.pump(now, &mut surface));
            now += FRAME_MS;
        }

        assert_eq!(surface.count_layer(Layer::Heart), 0);
        assert!(surface.count_layer(Layer::Twig) > 0);
        let show = scheduler.show().unwrap();
        assert!(show.twig_states().iter().all(ThinBranchState::is_anchored));
    }

    #[test]
    fn test_anchors_survive_later_phases() {
        let (mut scheduler, _) = scheduler_with_counter();
        let scene = Scene::derive(1200.0, 800.0, LayoutClass::Landscape, &config(10));
        scheduler.start_run(scene, &mut StdRng::seed_from_u64(4)).unwrap();

        let mut surface = RecordingSurface::new();
        let mut now = 0.0;
        while scheduler.phase() == Some(AnimationPhase::Growing) {
            scheduler.pump(now, &mut surface);
            now += FRAME_MS;
        }
        let anchors: Vec<_> = scheduler.show().unwrap().twig_states().to_vec();

        while scheduler.pump(now, &mut surface) {
            now += FRAME_MS;
        }
        assert_eq!(scheduler.show().unwrap().twig_states(), anchors.as_slice());
    }

    #[test]
    fn test_restart_mid_bloom_discards_old_hearts() {
        let (mut scheduler, finished) = scheduler_with_counter();
        let first = Scene::derive(1200.0, 800.0, LayoutClass::Landscape, &config(300));
        scheduler.start_run(first, &mut StdRng::seed_from_u64(10)).unwrap();

        let mut surface = RecordingSurface::new();
        let mut now = 0.0;
        while scheduler.phase() != Some(AnimationPhase::Blooming) {
            scheduler.pump(now, &mut surface);
            now += FRAME_MS;
        }
        for _ in 0..8 {
            scheduler.pump(now, &mut surface);
            now += FRAME_MS;
        }
        assert!(surface.count_layer(Layer::Heart) > 0);

        let old_xs: HashSet<u64> = scheduler
            .show()
            .unwrap()
            .particles()
            .iter()
            .map(|h| h.position.x.to_bits())
            .collect();
        let stale = scheduler.handle().unwrap().pending().unwrap();

        // Resize: the host starts a new run with a new scene
        let second = Scene::derive(500.0, 900.0, LayoutClass::Portrait, &config(300));
        scheduler.start_run(second, &mut StdRng::seed_from_u64(11)).unwrap();
        assert!(scheduler.frames().cancelled().contains(&stale));
        assert_eq!(scheduler.phase(), Some(AnimationPhase::Growing));
        surface.take_commands();

        // A stale callback that slipped through paints nothing
        assert!(!scheduler.on_frame(stale, now, &mut surface));
        assert!(surface.commands().is_empty());

        while scheduler.pump(now, &mut surface) {
            now += FRAME_MS;
        }

        let new_xs: HashSet<u64> = scheduler
            .show()
            .unwrap()
            .particles()
            .iter()
            .map(|h| h.position.x.to_bits())
            .collect();
        let drawn = surface.heart_starts();
        assert!(!drawn.is_empty());
        for start in drawn {
            let bits = start.x.to_bits();
            assert!(new_xs.contains(&bits));
            assert!(!old_xs.contains(&bits));
        }
        // Only the second run completed
        assert_eq!(finished.get(), 1);
        assert_eq!(scheduler.runs_started(), 2);
    }

    #[test]
    fn test_stop_cancels_without_signalling() {
        let (mut scheduler, finished) = scheduler_with_counter();
        let scene = Scene::derive(800.0, 600.0, LayoutClass::CompactLandscape, &config(10));
        scheduler.start_run(scene, &mut StdRng::seed_from_u64(5)).unwrap();

        let mut surface = RecordingSurface::new();
        scheduler.pump(0.0, &mut surface);
        scheduler.stop();

        assert!(scheduler.show().is_none());
        assert_eq!(scheduler.frames().pending_count(), 0);
        assert_eq!(scheduler.frames().cancelled().len(), 1);
        assert!(!scheduler.pump(100.0, &mut surface));
        assert_eq!(finished.get(), 0);
    }

    #[test]
    fn test_slide_offset_eases_to_target() {
        let scene = Scene::derive(1200.0, 800.0, LayoutClass::Landscape, &config(5));
        let target = scene.translate_offset.unwrap();
        let mut show = Show::new(scene, &mut StdRng::seed_from_u64(6));
        let mut surface = RecordingSurface::new();

        let mut now = 0.0;
        while show.phase() != AnimationPhase::Translating {
            show.step(now, &mut surface);
            now += FRAME_MS;
        }
        surface.take_commands();
        while show.step(now, &mut surface) == StepOutcome::Continue {
            now += FRAME_MS;
        }

        let offsets: Vec<f64> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                crate::render::DrawCommand::Translate { dx, .. } => Some(*dx),
                _ => None,
            })
            .collect();
        assert_eq!(offsets.first(), Some(&0.0));
        assert_eq!(offsets.last(), Some(&target));
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_twig_appears_only_after_its_start() {
        let mut config = config(0);
        config.twigs.truncate(1);
        config.twigs[0].start_progress = 0.5;
        config.twigs[0].anchor_progress = 0.5;
        config.timing.growth_seconds = 2.0;
        let scene = Scene::derive(1200.0, 800.0, LayoutClass::Landscape, &config);

        // 2 s growth: 0.4 s -> 0.2, 0.88 s -> 0.44, 1.0 s -> 0.5, 1.4 s -> 0.7
        let mut show = Show::new(scene, &mut StdRng::seed_from_u64(7));
        let mut twigs_per_frame = Vec::new();
        for &t in &[0.0, 400.0, 880.0, 1000.0, 1400.0] {
            let mut surface = RecordingSurface::new();
            show.step(t, &mut surface);
            twigs_per_frame.push((surface.count_layer(Layer::Twig), show.twig_states()[0].is_anchored()));
        }

        assert_eq!(
            twigs_per_frame,
            vec![(0, false), (0, false), (0, false), (0, true), (1, true)]
        );
    }
}
