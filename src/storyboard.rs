//! Storyboard DSL for authoring fixed animation sequences.
//!
//! A [`Storyboard`] owns a time cursor and a cast of named actors. Each
//! [`Storyboard::play`] step opens a window of fixed duration; directives
//! issued on the returned [`Step`] (fades, slides, morphs, pulses) all run
//! simultaneously inside that window. [`Storyboard::wait`] advances the
//! cursor without changing anything. [`Storyboard::finish`] lowers the cast
//! into a validated [`Composition`].

use std::collections::BTreeMap;

use crate::{
    anim::{Anim, InterpMode, Keyframe},
    anim_ease::Ease,
    core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8, Transform2D, Vec2},
    error::{ProofreelError, ProofreelResult},
    model::{Asset, Clip, ClipProps, Composition, Track},
    palette,
};

pub struct Storyboard {
    fps: Fps,
    canvas: Canvas,
    background: Rgba8,
    cursor: u64,
    assets: BTreeMap<String, Asset>,
    actors: Vec<Actor>,
    index: BTreeMap<String, usize>,
}

struct Actor {
    name: String,
    enter: Option<u64>,
    initial: Transform2D,
    current: Transform2D,
    current_opacity: f64,
    transform_keys: Vec<(u64, Transform2D, Ease)>, // global frames
    opacity_keys: Vec<(u64, f64, Ease)>,
}

impl Storyboard {
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            canvas,
            background: palette::BACKGROUND,
            cursor: 0,
            assets: BTreeMap::new(),
            actors: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn background(mut self, color: Rgba8) -> Self {
        self.background = color;
        self
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Current cursor position.
    pub fn now(&self) -> FrameIndex {
        FrameIndex(self.cursor)
    }

    /// Register a named actor with its asset and initial placement.
    ///
    /// Cast order is paint order; later actors draw on top. The actor stays
    /// hidden until a `show`/`fade_in` directive.
    pub fn cast(
        &mut self,
        name: impl Into<String>,
        asset: Asset,
        place: Transform2D,
    ) -> ProofreelResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProofreelError::validation("actor name must be non-empty"));
        }
        if self.index.contains_key(&name) {
            return Err(ProofreelError::validation(format!(
                "duplicate actor name '{name}'"
            )));
        }
        asset.validate()?;

        self.assets.insert(name.clone(), asset);
        self.index.insert(name.clone(), self.actors.len());
        self.actors.push(Actor {
            name,
            enter: None,
            initial: place,
            current: place,
            current_opacity: 0.0,
            transform_keys: Vec::new(),
            opacity_keys: Vec::new(),
        });
        Ok(())
    }

    /// Hold everything as-is for `secs`.
    pub fn wait(&mut self, secs: f64) {
        self.cursor += self.fps.secs_to_frames_round(secs);
    }

    /// Open a directive window of `secs` and advance the cursor past it.
    pub fn play(&mut self, secs: f64) -> Step<'_> {
        let start = self.cursor;
        let frames = self.fps.secs_to_frames_round(secs);
        self.cursor += frames;
        Step {
            board: self,
            start,
            frames,
        }
    }

    fn actor_mut(&mut self, name: &str) -> ProofreelResult<&mut Actor> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| ProofreelError::validation(format!("unknown actor '{name}'")))?;
        Ok(&mut self.actors[idx])
    }

    /// Lower the cast into a composition ending at the current cursor.
    pub fn finish(self) -> ProofreelResult<Composition> {
        if self.cursor == 0 {
            return Err(ProofreelError::validation(
                "storyboard has zero duration; play or wait first",
            ));
        }

        let duration = FrameIndex(self.cursor);
        let mut clips = Vec::with_capacity(self.actors.len());
        for (z, actor) in self.actors.iter().enumerate() {
            let enter = actor.enter.ok_or_else(|| {
                ProofreelError::validation(format!("actor '{}' was never shown", actor.name))
            })?;

            let opacity = lower_keys(&actor.opacity_keys, enter, 0.0);
            let transform = if actor.transform_keys.is_empty() {
                Anim::constant(actor.initial)
            } else {
                lower_keys(&actor.transform_keys, enter, actor.initial)
            };

            clips.push(Clip {
                id: actor.name.clone(),
                asset: actor.name.clone(),
                range: FrameRange::new(FrameIndex(enter), duration)?,
                props: ClipProps { transform, opacity },
                z_offset: z as i32,
            });
        }

        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            duration,
            background: self.background,
            assets: self.assets,
            tracks: vec![Track {
                name: "main".to_string(),
                z_base: 0,
                clips,
            }],
        };
        comp.validate()?;
        Ok(comp)
    }
}

/// Rebase global-frame keys to clip-local ones.
fn lower_keys<T: crate::anim::Lerp + Clone>(
    keys: &[(u64, T, Ease)],
    enter: u64,
    fallback: T,
) -> Anim<T> {
    if keys.is_empty() {
        return Anim::constant(fallback);
    }
    let mut out = Vec::with_capacity(keys.len());
    for (frame, value, ease) in keys {
        out.push(Keyframe {
            frame: FrameIndex(frame.saturating_sub(enter)),
            value: value.clone(),
            ease: *ease,
        });
    }
    Anim {
        keys: out,
        mode: InterpMode::Linear,
        default: None,
    }
}

/// A directive window returned by [`Storyboard::play`].
pub struct Step<'a> {
    board: &'a mut Storyboard,
    start: u64,
    frames: u64,
}

impl Step<'_> {
    fn end(&self) -> u64 {
        self.start + self.frames
    }

    /// Make the actor appear instantly at the window start.
    pub fn show(self, name: &str) -> ProofreelResult<Self> {
        let start = self.start;
        let actor = self.board.actor_mut(name)?;
        actor.enter.get_or_insert(start);
        actor.opacity_keys.push((start, 1.0, Ease::Linear));
        actor.current_opacity = 1.0;
        Ok(self)
    }

    /// Fade the actor from its current opacity to fully visible.
    pub fn fade_in(self, name: &str) -> ProofreelResult<Self> {
        self.fade_to(name, 1.0)
    }

    /// Fade the actor out completely (it stays in the cast at opacity 0).
    pub fn fade_out(self, name: &str) -> ProofreelResult<Self> {
        self.fade_to(name, 0.0)
    }

    /// Fade a whole group in together.
    pub fn fade_in_all(self, names: &[&str]) -> ProofreelResult<Self> {
        let mut step = self;
        for name in names {
            step = step.fade_in(name)?;
        }
        Ok(step)
    }

    /// Fade a whole group out together.
    pub fn fade_out_all(self, names: &[&str]) -> ProofreelResult<Self> {
        let mut step = self;
        for name in names {
            step = step.fade_out(name)?;
        }
        Ok(step)
    }

    pub fn fade_to(self, name: &str, opacity: f64) -> ProofreelResult<Self> {
        let (start, end) = (self.start, self.end());
        let actor = self.board.actor_mut(name)?;
        actor.enter.get_or_insert(start);
        let from = actor.current_opacity;
        actor.opacity_keys.push((start, from, Ease::InOutCubic));
        actor.opacity_keys.push((end, opacity, Ease::Linear));
        actor.current_opacity = opacity;
        Ok(self)
    }

    /// Animate the actor's translation to `to`, keeping the rest of its
    /// transform.
    pub fn slide(self, name: &str, to: Vec2) -> ProofreelResult<Self> {
        let target = {
            let actor = self.board.actor_mut(name)?;
            Transform2D {
                translate: to,
                ..actor.current
            }
        };
        self.morph(name, target)
    }

    /// Animate the actor's translation by a pixel delta.
    pub fn nudge(self, name: &str, delta: Vec2) -> ProofreelResult<Self> {
        let to = {
            let actor = self.board.actor_mut(name)?;
            actor.current.translate + delta
        };
        self.slide(name, to)
    }

    /// Animate the actor's full transform to `to`.
    pub fn morph(self, name: &str, to: Transform2D) -> ProofreelResult<Self> {
        let (start, end) = (self.start, self.end());
        let actor = self.board.actor_mut(name)?;
        if actor.enter.is_none() {
            return Err(ProofreelError::validation(format!(
                "cannot move actor '{name}' before it is shown"
            )));
        }
        let from = actor.current;
        actor.transform_keys.push((start, from, Ease::InOutCubic));
        actor.transform_keys.push((end, to, Ease::Linear));
        actor.current = to;
        Ok(self)
    }

    /// Emphasis bounce: scale up by `factor` and settle back.
    pub fn pulse(self, name: &str, factor: f64) -> ProofreelResult<Self> {
        let (start, end) = (self.start, self.end());
        let mid = start + (end - start) / 2;
        let actor = self.board.actor_mut(name)?;
        if actor.enter.is_none() {
            return Err(ProofreelError::validation(format!(
                "cannot pulse actor '{name}' before it is shown"
            )));
        }
        let base = actor.current;
        let peak = Transform2D {
            scale: Vec2::new(base.scale.x * factor, base.scale.y * factor),
            ..base
        };
        actor.transform_keys.push((start, base, Ease::InOutQuad));
        actor.transform_keys.push((mid, peak, Ease::InOutQuad));
        actor.transform_keys.push((end, base, Ease::Linear));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anim::SampleCtx,
        model::{ShapeAsset, StrokeStyle},
    };

    fn shape() -> Asset {
        Asset::Shape(ShapeAsset {
            svg_path_d: "M-10,-10 L10,-10 L10,10 L-10,10 Z".to_string(),
            fill: Some(palette::fill(palette::BLUE, 0.7)),
            stroke: Some(StrokeStyle {
                width: 2.0,
                color: palette::WHITE,
                dash: None,
            }),
        })
    }

    fn board() -> Storyboard {
        Storyboard::new(
            Fps::new(30, 1).unwrap(),
            Canvas {
                width: 640,
                height: 360,
            },
        )
    }

    fn ctx(fps: Fps, clip_local: u64) -> SampleCtx {
        SampleCtx {
            frame: FrameIndex(clip_local),
            fps,
            clip_local: FrameIndex(clip_local),
        }
    }

    #[test]
    fn fade_in_then_wait_builds_valid_composition() {
        let mut b = board();
        b.cast("sq", shape(), Transform2D::at(Vec2::new(100.0, 100.0)))
            .unwrap();
        b.play(1.0).fade_in("sq").unwrap();
        b.wait(2.0);
        let comp = b.finish().unwrap();

        assert_eq!(comp.duration, FrameIndex(90));
        let clip = &comp.tracks[0].clips[0];
        assert_eq!(clip.range.start, FrameIndex(0));
        assert_eq!(clip.range.end, FrameIndex(90));

        let fps = comp.fps;
        let o0 = clip.props.opacity.sample(ctx(fps, 0)).unwrap();
        let o_end = clip.props.opacity.sample(ctx(fps, 30)).unwrap();
        assert_eq!(o0, 0.0);
        assert_eq!(o_end, 1.0);
    }

    #[test]
    fn keys_are_clip_local_for_late_actors() {
        let mut b = board();
        b.cast("sq", shape(), Transform2D::default()).unwrap();
        b.wait(2.0);
        b.play(1.0).fade_in("sq").unwrap();
        let comp = b.finish().unwrap();

        let clip = &comp.tracks[0].clips[0];
        assert_eq!(clip.range.start, FrameIndex(60));
        assert_eq!(clip.props.opacity.keys[0].frame, FrameIndex(0));
        assert_eq!(clip.props.opacity.keys[1].frame, FrameIndex(30));
    }

    #[test]
    fn slide_holds_value_between_steps() {
        let mut b = board();
        b.cast("sq", shape(), Transform2D::at(Vec2::new(0.0, 0.0)))
            .unwrap();
        b.play(1.0).show("sq").unwrap();
        b.wait(1.0);
        b.play(1.0).slide("sq", Vec2::new(30.0, 0.0)).unwrap();
        b.wait(1.0);
        let comp = b.finish().unwrap();

        let clip = &comp.tracks[0].clips[0];
        let fps = comp.fps;
        // Before the slide window the transform holds the initial placement.
        let t = clip.props.transform.sample(ctx(fps, 45)).unwrap();
        assert_eq!(t.translate, Vec2::new(0.0, 0.0));
        // After it, the new placement holds.
        let t = clip.props.transform.sample(ctx(fps, 100)).unwrap();
        assert_eq!(t.translate, Vec2::new(30.0, 0.0));
    }

    #[test]
    fn unshown_actor_is_rejected_at_finish() {
        let mut b = board();
        b.cast("sq", shape(), Transform2D::default()).unwrap();
        b.wait(1.0);
        assert!(b.finish().is_err());
    }

    #[test]
    fn moving_a_hidden_actor_is_rejected() {
        let mut b = board();
        b.cast("sq", shape(), Transform2D::default()).unwrap();
        assert!(b.play(1.0).slide("sq", Vec2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn duplicate_cast_name_is_rejected() {
        let mut b = board();
        b.cast("sq", shape(), Transform2D::default()).unwrap();
        assert!(b.cast("sq", shape(), Transform2D::default()).is_err());
    }
}
