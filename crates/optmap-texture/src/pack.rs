//! Channel splitting and merging.
//!
//! A split turns one packed texture into one grayscale image per channel. A
//! merge packs several grayscale images back into the channels of a single
//! texture. Both operate purely on [`PixelBuffer`]s.

use rgb::RGBA8;

use crate::{Channel, ChannelAssignment, Error, PixelBuffer, PixelFormat, Result};

/// Split a texture into one grayscale image per meaningful channel.
///
/// Returns three images for an opaque source and four when the source format
/// carries alpha, ordered R, G, B[, A].
pub fn split(source: &PixelBuffer) -> Vec<PixelBuffer> {
    split_channels(source, &ChannelAssignment::split_for(source.format()))
}

/// Split a texture using an explicit assignment.
///
/// Output image `i` stores the source's `selector(i)` sample in its red,
/// green and blue samples; alpha is always 255.
pub fn split_channels(source: &PixelBuffer, assignment: &ChannelAssignment) -> Vec<PixelBuffer> {
    let (width, height) = source.dimensions();

    assignment
        .iter()
        .map(|channel| {
            let pixels = source
                .pixels()
                .iter()
                .map(|&p| {
                    let v = channel.sample(p);
                    RGBA8::new(v, v, v, 255)
                })
                .collect();
            PixelBuffer::from_parts(width, height, PixelFormat::Rgb24, pixels)
        })
        .collect()
}

/// Pack three images into the R, G and B channels of one opaque texture.
///
/// The red image contributes its red sample, the green image its green
/// sample and the blue image its blue sample.
pub fn merge3(r: &PixelBuffer, g: &PixelBuffer, b: &PixelBuffer) -> Result<PixelBuffer> {
    merge_channels(&[r, g, b], &ChannelAssignment::merge_rgb())
}

/// Pack four images into one RGBA texture.
///
/// Alpha is taken from the alpha image's red sample.
pub fn merge4(
    r: &PixelBuffer,
    g: &PixelBuffer,
    b: &PixelBuffer,
    a: &PixelBuffer,
) -> Result<PixelBuffer> {
    merge_channels(&[r, g, b, a], &ChannelAssignment::merge_rgba())
}

/// Pack `inputs` into one texture using an explicit assignment.
///
/// Output channel `i` is read from `assignment.selector(i)` of `inputs[i]`.
/// With three inputs the output is opaque; with four it carries alpha. All
/// inputs must have the same dimensions.
pub fn merge_channels(inputs: &[&PixelBuffer], assignment: &ChannelAssignment) -> Result<PixelBuffer> {
    if inputs.len() != assignment.len() || !(3..=4).contains(&inputs.len()) {
        return Err(Error::MalformedData(format!(
            "cannot merge {} images with {} channel selectors",
            inputs.len(),
            assignment.len()
        )));
    }

    let expected = inputs[0].dimensions();
    if let Some(mismatch) = inputs.iter().find(|input| input.dimensions() != expected) {
        return Err(Error::SizeMismatch {
            expected,
            actual: mismatch.dimensions(),
        });
    }

    let format = if inputs.len() == 4 {
        PixelFormat::Rgba32
    } else {
        PixelFormat::Rgb24
    };

    let slots: Vec<(Channel, Channel, &[RGBA8])> = assignment
        .iter()
        .zip(Channel::ALL)
        .zip(inputs)
        .map(|((selector, target), input)| (selector, target, input.pixels()))
        .collect();

    let pixel_count = expected.0 as usize * expected.1 as usize;
    let mut pixels = Vec::with_capacity(pixel_count);
    for i in 0..pixel_count {
        let mut pixel = RGBA8::new(0, 0, 0, 255);
        for &(selector, target, source) in &slots {
            target.set(&mut pixel, selector.sample(source[i]));
        }
        pixels.push(pixel);
    }

    log::debug!(
        "merged {} images into {}x{} {:?}",
        inputs.len(),
        expected.0,
        expected.1,
        format
    );

    Ok(PixelBuffer::from_parts(expected.0, expected.1, format, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32, format: PixelFormat) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| {
                let i = i as u8;
                RGBA8::new(i, i.wrapping_mul(3), i.wrapping_add(100), 255 - i)
            })
            .collect();
        PixelBuffer::new(width, height, format, pixels).unwrap()
    }

    #[test]
    fn test_split_rgba_single_pixel() {
        let source =
            PixelBuffer::filled(1, 1, PixelFormat::Rgba32, RGBA8::new(10, 20, 30, 40)).unwrap();
        let channels = split(&source);

        let pixels: Vec<RGBA8> = channels.iter().map(|c| c.pixels()[0]).collect();
        assert_eq!(
            pixels,
            vec![
                RGBA8::new(10, 10, 10, 255),
                RGBA8::new(20, 20, 20, 255),
                RGBA8::new(30, 30, 30, 255),
                RGBA8::new(40, 40, 40, 255),
            ]
        );
        assert!(channels.iter().all(|c| c.dimensions() == (1, 1)));
    }

    #[test]
    fn test_split_opaque_yields_three() {
        let source = buffer(3, 2, PixelFormat::Rgb24);
        assert_eq!(split(&source).len(), 3);
    }

    #[test]
    fn test_split_merge3_roundtrip() {
        let source = buffer(4, 3, PixelFormat::Rgb24);
        let channels = split(&source);
        let merged = merge3(&channels[0], &channels[1], &channels[2]).unwrap();

        assert_eq!(merged.dimensions(), source.dimensions());
        assert_eq!(merged.format(), PixelFormat::Rgb24);
        for (out, src) in merged.pixels().iter().zip(source.pixels()) {
            assert_eq!(*out, RGBA8::new(src.r, src.g, src.b, 255));
        }
    }

    #[test]
    fn test_split_merge4_roundtrip() {
        let source = buffer(5, 2, PixelFormat::Rgba32);
        let channels = split(&source);
        let merged = merge4(&channels[0], &channels[1], &channels[2], &channels[3]).unwrap();

        assert_eq!(merged.format(), PixelFormat::Rgba32);
        assert_eq!(merged.pixels(), source.pixels());
    }

    #[test]
    fn test_merge_reads_own_channel_of_each_input() {
        let r = PixelBuffer::filled(1, 1, PixelFormat::Rgb24, RGBA8::new(1, 2, 3, 255)).unwrap();
        let g = PixelBuffer::filled(1, 1, PixelFormat::Rgb24, RGBA8::new(4, 5, 6, 255)).unwrap();
        let b = PixelBuffer::filled(1, 1, PixelFormat::Rgb24, RGBA8::new(7, 8, 9, 255)).unwrap();
        let a = PixelBuffer::filled(1, 1, PixelFormat::Rgba32, RGBA8::new(10, 11, 12, 13)).unwrap();

        assert_eq!(merge3(&r, &g, &b).unwrap().pixels()[0], RGBA8::new(1, 5, 9, 255));
        assert_eq!(merge4(&r, &g, &b, &a).unwrap().pixels()[0], RGBA8::new(1, 5, 9, 10));
    }

    #[test]
    fn test_merge3_forces_opaque() {
        let r = PixelBuffer::filled(2, 2, PixelFormat::Rgba32, RGBA8::new(9, 9, 9, 0)).unwrap();
        let merged = merge3(&r, &r, &r).unwrap();
        assert!(merged.pixels().iter().all(|p| p.a == 255));
    }

    #[test]
    fn test_merge3_size_mismatch() {
        let a = buffer(4, 4, PixelFormat::Rgb24);
        let b = buffer(4, 4, PixelFormat::Rgb24);
        let c = buffer(5, 4, PixelFormat::Rgb24);

        match merge3(&a, &b, &c) {
            Err(Error::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, (4, 4));
                assert_eq!(actual, (5, 4));
            }
            other => panic!("expected size mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_merge4_size_mismatch_on_alpha() {
        let a = buffer(2, 2, PixelFormat::Rgb24);
        let alpha = buffer(2, 3, PixelFormat::Rgb24);
        assert!(matches!(
            merge4(&a, &a, &a, &alpha),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_merge_channels_rejects_bad_arity() {
        let a = buffer(1, 1, PixelFormat::Rgb24);
        assert!(matches!(
            merge_channels(&[&a, &a], &ChannelAssignment::merge_rgb()),
            Err(Error::MalformedData(_))
        ));
    }
}
