use crate::{
    anim_ease::Ease,
    core::{FrameIndex, Transform2D, Vec2},
    error::{ProofreelError, ProofreelResult},
};

#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    pub frame: FrameIndex,      // global frame
    pub fps: crate::core::Fps,  // global fps
    pub clip_local: FrameIndex, // frame - clip.start
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            anchor: <Vec2 as Lerp>::lerp(&a.anchor, &b.anchor, t),
        }
    }
}

/// A keyframe track sampled at clip-local frames.
///
/// Keys must be sorted by frame; outside the keyed range the track clamps to
/// the first/last value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Anim<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by frame
    pub mode: InterpMode,       // linear/hold
    pub default: Option<T>,     // value when no keys exist
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub frame: FrameIndex,
    pub value: T,
    pub ease: Ease, // ease applied toward next key
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    Hold,
    Linear,
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                frame: FrameIndex(0),
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
            default: None,
        }
    }

    pub fn from_keys(keys: Vec<Keyframe<T>>) -> Self {
        Self {
            keys,
            mode: InterpMode::Linear,
            default: None,
        }
    }

    pub fn validate(&self) -> ProofreelResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(ProofreelError::animation(
                "Anim must have at least one key or a default value",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame.0 <= w[1].frame.0) {
            return Err(ProofreelError::animation("Anim keys must be sorted by frame"));
        }
        Ok(())
    }

    pub fn sample(&self, ctx: SampleCtx) -> ProofreelResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| ProofreelError::animation("Anim has no keys and no default"));
        }

        let f = ctx.clip_local.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        let t = ((f - a.frame.0) as f64) / (denom as f64);
        let te = a.ease.apply(t);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, te)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Fps;

    fn ctx(frame: u64) -> SampleCtx {
        SampleCtx {
            frame: FrameIndex(frame),
            fps: Fps::new(30, 1).unwrap(),
            clip_local: FrameIndex(frame),
        }
    }

    fn key(frame: u64, value: f64) -> Keyframe<f64> {
        Keyframe {
            frame: FrameIndex(frame),
            value,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn constant_holds_everywhere() {
        let anim = Anim::constant(0.5);
        assert_eq!(anim.sample(ctx(0)).unwrap(), 0.5);
        assert_eq!(anim.sample(ctx(1000)).unwrap(), 0.5);
    }

    #[test]
    fn linear_interpolates_between_keys() {
        let anim = Anim::from_keys(vec![key(0, 0.0), key(10, 10.0)]);
        assert_eq!(anim.sample(ctx(5)).unwrap(), 5.0);
    }

    #[test]
    fn clamps_outside_key_range() {
        let anim = Anim::from_keys(vec![key(5, 1.0), key(10, 2.0)]);
        assert_eq!(anim.sample(ctx(0)).unwrap(), 1.0);
        assert_eq!(anim.sample(ctx(50)).unwrap(), 2.0);
    }

    #[test]
    fn ease_applies_toward_next_key() {
        let anim = Anim::from_keys(vec![
            Keyframe {
                frame: FrameIndex(0),
                value: 0.0,
                ease: Ease::InQuad,
            },
            key(10, 1.0),
        ]);
        // InQuad at t=0.5 is 0.25.
        assert_eq!(anim.sample(ctx(5)).unwrap(), 0.25);
    }

    #[test]
    fn unsorted_keys_are_rejected() {
        let anim = Anim::from_keys(vec![key(10, 0.0), key(0, 1.0)]);
        assert!(anim.validate().is_err());
    }

    #[test]
    fn transform_lerp_is_componentwise() {
        let a = Transform2D::at(Vec2::new(0.0, 0.0));
        let b = Transform2D::at(Vec2::new(10.0, 20.0)).with_scale(3.0, 3.0);
        let mid = <Transform2D as Lerp>::lerp(&a, &b, 0.5);
        assert_eq!(mid.translate, Vec2::new(5.0, 10.0));
        assert_eq!(mid.scale, Vec2::new(2.0, 2.0));
    }
}
