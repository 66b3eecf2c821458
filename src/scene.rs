//! Scene registry.
//!
//! A scene is a named, fixed storyboard that composes into a
//! [`Composition`]. All scenes ship with the crate; the CLI looks them up
//! by name.

use crate::{core::Canvas, core::Fps, error::ProofreelResult, model::Composition};

/// Font shipped with the repository, used by every label unless overridden.
pub const DEFAULT_FONT: &str = "assets/fonts/DejaVuSans.ttf";

#[derive(Clone, Debug)]
pub struct SceneOptions {
    pub canvas: Canvas,
    pub fps: Fps,
    pub font_source: String,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 30, den: 1 },
            font_source: DEFAULT_FONT.to_string(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct SceneInfo {
    pub name: &'static str,
    pub summary: &'static str,
    pub build: fn(&SceneOptions) -> ProofreelResult<Composition>,
}

const SCENES: &[SceneInfo] = {
    use crate::scenes;

    &[
        SceneInfo {
            name: "sum-square",
            summary: "(a+b)\u{b2} = a\u{b2} + 2ab + b\u{b2} by area decomposition",
            build: scenes::sum_square::compose,
        },
        SceneInfo {
            name: "difference-square",
            summary: "(a\u{2212}b)\u{b2} = a\u{b2} \u{2212} 2ab + b\u{b2} by over-subtraction",
            build: scenes::difference_square::compose,
        },
        SceneInfo {
            name: "difference-of-squares",
            summary: "(a+b)(a\u{2212}b) = a\u{b2} \u{2212} b\u{b2} by rearranging areas",
            build: scenes::difference_of_squares::compose,
        },
        SceneInfo {
            name: "pythagorean",
            summary: "a\u{b2} + b\u{b2} = c\u{b2} via four congruent triangles in a square",
            build: scenes::pythagorean::compose,
        },
        SceneInfo {
            name: "quadratic-formula",
            summary: "the quadratic formula by completing the square",
            build: scenes::quadratic_formula::compose,
        },
        SceneInfo {
            name: "triangle-rectangle",
            summary: "triangle area as half its bounding rectangle",
            build: scenes::triangle_area::compose_rectangle,
        },
        SceneInfo {
            name: "triangle-interior-altitude",
            summary: "triangle area with the altitude inside the triangle",
            build: scenes::triangle_area::compose_interior_altitude,
        },
        SceneInfo {
            name: "triangle-exterior-altitude",
            summary: "triangle area with the altitude outside the triangle",
            build: scenes::triangle_area::compose_exterior_altitude,
        },
    ]
};

pub fn scenes() -> &'static [SceneInfo] {
    SCENES
}

pub fn find(name: &str) -> Option<&'static SceneInfo> {
    scenes().iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<_> = scenes().iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), scenes().len());
    }

    #[test]
    fn find_is_exact() {
        assert!(find("pythagorean").is_some());
        assert!(find("pythagorean-theorem").is_none());
    }
}
