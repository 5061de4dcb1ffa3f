use crate::foundation::error::{TrayglyphError, TrayglyphResult};

/// Counts reported by [`mask_near_black`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaskStats {
    pub inspected: u64,
    pub masked: u64,
}

/// Decode PNG bytes into a straight RGBA8 buffer.
///
/// Sources without an alpha channel come back fully opaque.
pub fn decode_png_rgba(bytes: &[u8]) -> TrayglyphResult<image::RgbaImage> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(map_decode_err)?;
    Ok(img.into_rgba8())
}

/// Codec gaps become `DecoderUnavailable`; everything else is malformed input.
fn map_decode_err(e: image::ImageError) -> TrayglyphError {
    match e {
        image::ImageError::Unsupported(u) => TrayglyphError::decoder_unavailable(u.to_string()),
        other => TrayglyphError::image_decode(other.to_string()),
    }
}

/// `true` when r, g and b are all `<= threshold`. Alpha is ignored.
#[inline]
pub fn is_near_black(px: &image::Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = px.0;
    r <= threshold && g <= threshold && b <= threshold
}

/// Zero the alpha of every near-black pixel in place.
///
/// RGB is never touched, and pixels above the threshold keep their alpha.
pub fn mask_near_black(img: &mut image::RgbaImage, threshold: u8) -> MaskStats {
    let mut stats = MaskStats::default();
    for px in img.pixels_mut() {
        stats.inspected += 1;
        if is_near_black(px, threshold) {
            px.0[3] = 0;
            stats.masked += 1;
        }
    }
    tracing::debug!(
        inspected = stats.inspected,
        masked = stats.masked,
        threshold,
        "masked near-black pixels"
    );
    stats
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use proptest::prelude::*;

    use super::*;

    fn encode(img: image::DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_near_black(&Rgba([40, 40, 40, 255]), 40));
        assert!(!is_near_black(&Rgba([41, 40, 40, 255]), 40));
        assert!(!is_near_black(&Rgba([40, 41, 40, 255]), 40));
        assert!(!is_near_black(&Rgba([40, 40, 41, 255]), 40));
    }

    #[test]
    fn boundary_pixels_mask_as_expected() {
        let mut img = RgbaImage::from_raw(
            3,
            1,
            vec![40, 40, 40, 255, 41, 40, 40, 255, 0, 0, 0, 200],
        )
        .unwrap();

        let stats = mask_near_black(&mut img, 40);

        assert_eq!(stats, MaskStats { inspected: 3, masked: 2 });
        assert_eq!(img.get_pixel(0, 0), &Rgba([40, 40, 40, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([41, 40, 40, 255]));
        assert_eq!(img.get_pixel(2, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn decode_rgb_png_synthesizes_opaque_alpha() {
        let rgb = RgbImage::from_pixel(2, 2, Rgb([10, 200, 30]));
        let bytes = encode(image::DynamicImage::ImageRgb8(rgb));

        let img = decode_png_rgba(&bytes).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert!(img.pixels().all(|p| *p == Rgba([10, 200, 30, 255])));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_png_rgba(b"definitely not a png").unwrap_err();
        assert!(matches!(err, TrayglyphError::ImageDecode(_)));
    }

    #[test]
    fn unsupported_codec_maps_to_decoder_unavailable() {
        use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};

        let unsupported = image::ImageError::Unsupported(UnsupportedError::from_format_and_kind(
            ImageFormatHint::Exact(image::ImageFormat::Png),
            UnsupportedErrorKind::Format(ImageFormatHint::Exact(image::ImageFormat::Png)),
        ));
        assert!(matches!(
            map_decode_err(unsupported),
            TrayglyphError::DecoderUnavailable(_)
        ));

        let io = image::ImageError::IoError(std::io::Error::other("truncated"));
        assert!(matches!(map_decode_err(io), TrayglyphError::ImageDecode(_)));
    }

    fn rgba_buffer() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
        (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                proptest::collection::vec(any::<u8>(), (w * h * 4) as usize),
            )
        })
    }

    proptest! {
        #[test]
        fn alpha_zero_iff_near_black_or_already_transparent(
            (w, h, raw) in rgba_buffer(),
            threshold in any::<u8>(),
        ) {
            let before = RgbaImage::from_raw(w, h, raw).unwrap();
            let mut after = before.clone();
            mask_near_black(&mut after, threshold);

            for (src, dst) in before.pixels().zip(after.pixels()) {
                prop_assert_eq!(&src.0[..3], &dst.0[..3]);
                if is_near_black(src, threshold) {
                    prop_assert_eq!(dst.0[3], 0);
                } else {
                    prop_assert_eq!(src, dst);
                }
            }
        }

        #[test]
        fn masking_is_idempotent((w, h, raw) in rgba_buffer(), threshold in any::<u8>()) {
            let mut once = RgbaImage::from_raw(w, h, raw).unwrap();
            mask_near_black(&mut once, threshold);
            let mut twice = once.clone();
            mask_near_black(&mut twice, threshold);
            prop_assert_eq!(once, twice);
        }
    }
}
