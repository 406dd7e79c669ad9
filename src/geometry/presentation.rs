/// Two-stop color gradient, linear RGB in `[0, 1]`, mapped along the
/// normalized height of a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colorscale {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

// #003f5c -> #0077be
const DEEP_BLUE: Colorscale = Colorscale {
    start: [0.0, 63.0 / 255.0, 92.0 / 255.0],
    end: [0.0, 119.0 / 255.0, 190.0 / 255.0],
};

// white -> #ADD8E6
const PALE_BLUE: Colorscale = Colorscale {
    start: [1.0, 1.0, 1.0],
    end: [173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0],
};

const OPAQUE: f32 = 0.95;
const TRANSLUCENT: f32 = 0.25;

/// How the shell and the liquid are drawn, derived from orientation alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Presentation {
    pub cone_colorscale: Colorscale,
    pub liquid_colorscale: Colorscale,
    pub cone_opacity: f32,
    pub liquid_opacity: f32,
}

/// Tip up draws a solid blue shell with a faint pale fill; tip down swaps
/// both the colorscale pair and the opacity pair wholesale, putting the
/// visual weight on the liquid instead.
pub fn build_presentation(flipped: bool) -> Presentation {
    if flipped {
        Presentation {
            cone_colorscale: DEEP_BLUE,
            liquid_colorscale: PALE_BLUE,
            cone_opacity: OPAQUE,
            liquid_opacity: TRANSLUCENT,
        }
    } else {
        Presentation {
            cone_colorscale: PALE_BLUE,
            liquid_colorscale: DEEP_BLUE,
            cone_opacity: TRANSLUCENT,
            liquid_opacity: OPAQUE,
        }
    }
}

/// Layout hints handed to the rendering side.
pub struct SceneLayout {
    pub axis_titles: [&'static str; 3],
    pub height_range: (f32, f32),
}

pub const LAYOUT: SceneLayout = SceneLayout {
    axis_titles: ["X", "Y", "Height"],
    height_range: (-1.0, 1.0),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_are_exact_complements() {
        let up = build_presentation(true);
        let down = build_presentation(false);
        assert_eq!(up.cone_colorscale, down.liquid_colorscale);
        assert_eq!(up.liquid_colorscale, down.cone_colorscale);
        assert!((up.cone_opacity - down.liquid_opacity).abs() < 1e-10);
        assert!((up.liquid_opacity - down.cone_opacity).abs() < 1e-10);
    }

    #[test]
    fn test_tip_up_shell_is_opaque() {
        let up = build_presentation(true);
        assert!(up.cone_opacity > up.liquid_opacity);
        assert_eq!(up.cone_colorscale, DEEP_BLUE);
    }
}
