//! Mirror and quarter-turn transforms for the overlay asset.

use image::{imageops, RgbaImage};

use crate::types::{Orientation, TransformSpec};

/// Apply `spec` to `img`: mirror left-right first, then rotate.
///
/// Quarter turns are counter-clockwise, so `Left` moves the bubble's tail
/// from the top edge to the left edge. Width and height swap for `Left` and
/// `Right`.
pub fn apply_transform(img: RgbaImage, spec: &TransformSpec) -> RgbaImage {
    let img = if spec.mirror() {
        imageops::flip_horizontal(&img)
    } else {
        img
    };
    rotate(img, spec.orientation())
}

/// Rotate counter-clockwise by the orientation's quarter turns.
pub fn rotate(img: RgbaImage, orientation: Orientation) -> RgbaImage {
    match orientation {
        Orientation::Top => img,
        Orientation::Left => imageops::rotate270(&img),
        Orientation::Bottom => imageops::rotate180(&img),
        Orientation::Right => imageops::rotate90(&img),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    fn marked(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, (x * 7 + y * 13) as u8, 255])
        })
    }

    fn mirror(img: RgbaImage) -> RgbaImage {
        apply_transform(img, &TransformSpec::new(true, Orientation::Top))
    }

    /// The orientation whose turn undoes `o`.
    fn inverse(o: Orientation) -> Orientation {
        match o {
            Orientation::Top => Orientation::Top,
            Orientation::Left => Orientation::Right,
            Orientation::Bottom => Orientation::Bottom,
            Orientation::Right => Orientation::Left,
        }
    }

    #[test]
    fn test_identity() {
        let img = marked(4, 3);
        let out = apply_transform(img.clone(), &TransformSpec::default());
        assert_eq!(out, img);
    }

    #[test]
    fn test_mirror_swaps_columns() {
        let img = marked(4, 3);
        let out = mirror(img.clone());
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(3, 0));
        assert_eq!(out.get_pixel(3, 2), img.get_pixel(0, 2));
    }

    #[test]
    fn test_left_is_counter_clockwise() {
        // Top-right corner moves to the top-left after a CCW quarter turn
        let img = marked(4, 3);
        let out = rotate(img.clone(), Orientation::Left);
        assert_eq!(out.dimensions(), (3, 4));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(3, 0));
        assert_eq!(out.get_pixel(0, 3), img.get_pixel(0, 0));
    }

    #[test]
    fn test_right_is_clockwise() {
        // Bottom-left corner moves to the top-left after a CW quarter turn
        let img = marked(4, 3);
        let out = rotate(img.clone(), Orientation::Right);
        assert_eq!(out.dimensions(), (3, 4));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(0, 2));
    }

    #[test]
    fn test_bottom_keeps_dimensions() {
        let img = marked(4, 3);
        let out = rotate(img.clone(), Orientation::Bottom);
        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(3, 2));
    }

    #[test]
    fn test_mirror_applied_before_rotation() {
        let img = marked(4, 3);
        let spec = TransformSpec::new(true, Orientation::Left);
        let expected = rotate(mirror(img.clone()), Orientation::Left);
        assert_eq!(apply_transform(img.clone(), &spec), expected);

        // The opposite order gives a different image for a quarter turn
        let reversed = mirror(rotate(img, Orientation::Left));
        assert_ne!(expected, reversed);
    }

    #[test]
    fn test_mirror_then_half_turn_commutes() {
        let img = marked(5, 3);
        let spec = TransformSpec::new(true, Orientation::Bottom);
        let rotate_then_mirror = mirror(rotate(img.clone(), Orientation::Bottom));
        assert_eq!(apply_transform(img, &spec), rotate_then_mirror);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let img = marked(4, 3);
        let mut out = img.clone();
        for _ in 0..4 {
            out = rotate(out, Orientation::Left);
        }
        assert_eq!(out, img);
    }

    proptest! {
        #[test]
        fn prop_flip_rotate_commutation(w in 1u32..12, h in 1u32..12, idx in 0usize..4) {
            let orientation = Orientation::ALL[idx];
            let img = marked(w, h);
            let spec = TransformSpec::new(true, orientation);
            let lhs = apply_transform(img.clone(), &spec);
            let rhs = mirror(rotate(img, inverse(orientation)));
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn prop_dimensions(w in 1u32..20, h in 1u32..20, idx in 0usize..4, flip in any::<bool>()) {
            let orientation = Orientation::ALL[idx];
            let out = apply_transform(marked(w, h), &TransformSpec::new(flip, orientation));
            let expected = if orientation.swaps_dimensions() { (h, w) } else { (w, h) };
            prop_assert_eq!(out.dimensions(), expected);
        }
    }
}
