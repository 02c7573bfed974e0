//! Canonical buffer placement and round trips through the codec.

mod common;

use common::*;
use zenqoi::*;

fn assert_same_pixels(a: &dyn Raster, b: &dyn Raster) {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    for y in 0..a.height() {
        for x in 0..a.width() {
            assert_eq!(a.argb(x, y), b.argb(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn every_fast_layout_survives_placement() {
    let (w, h) = (9u32, 4u32);
    let words = noise_words((w * h) as usize, 0xC0FF_EE00);
    let rasters: Vec<Box<dyn Raster>> = vec![
        Box::new(PackedRaster::new(words.clone(), w, h, PackedFormat::Rgb).unwrap()),
        Box::new(PackedRaster::new(words.clone(), w, h, PackedFormat::Argb).unwrap()),
        Box::new(PackedRaster::new(words, w, h, PackedFormat::Bgr).unwrap()),
        Box::new(InterleavedRaster::bgr8(noise((w * h * 3) as usize, 7), w, h).unwrap()),
        Box::new(InterleavedRaster::abgr8(noise((w * h * 4) as usize, 11), w, h).unwrap()),
        Box::new(InterleavedRaster::rgb8(noise((w * h * 3) as usize, 13), w, h).unwrap()),
    ];
    for raster in &rasters {
        let image = transcode_all(&EncodeRequest::new(), &**raster);
        assert_eq!(image.channels().has_alpha(), raster.has_alpha());
        let view = place(&image);
        assert_eq!(view.has_alpha(), raster.has_alpha());
        assert_same_pixels(&**raster, &view);
    }
}

#[test]
fn generic_rasters_survive_placement() {
    let raster = Wide16 {
        width: 5,
        height: 3,
        base: 0x4000,
    };
    let image = transcode_all(&EncodeRequest::new(), &raster);
    assert_eq!(image.channels(), Channels::Rgb);
    assert_same_pixels(&raster, &place(&image));

    let palette = vec![0x00FF_FFFF, 0xFF10_2030, 0x7F40_5060];
    let indexed = IndexedRaster::new(vec![2u8, 1, 0, 1, 2, 0], 3, 2, palette).unwrap();
    let image = transcode_all(&EncodeRequest::new(), &indexed);
    assert_same_pixels(&indexed, &place(&image));
}

#[test]
fn placed_view_matches_canonical_layout() {
    let image = QoiImage::new(
        2,
        1,
        Channels::Rgba,
        ColorSpace::Srgb,
        vec![1, 2, 3, 4, 5, 6, 7, 8],
    )
    .unwrap();
    let view = place(&image);
    assert_eq!(view.num_bands(), 4);
    assert_eq!(view.pixel_stride(), 4);
    assert_eq!(view.row_stride(), 8);
    assert_eq!(view.band_offsets(), [0, 1, 2, 3]);
    assert_eq!(view.sample(1, 0, 3), 8);
    assert_eq!(view.argb(0, 0), 0x0401_0203);
    // tightly packed RGBA is not one of the extractor's own layouts
    assert!(matches!(view.layout(), Layout::Generic));
}

#[test]
fn placement_shares_storage() {
    let mut image = QoiImage::new(
        2,
        2,
        Channels::Rgb,
        ColorSpace::Srgb,
        vec![0; 12],
    )
    .unwrap();
    assert!(std::ptr::eq(place(&image).data(), image.pixels()));

    {
        let mut view = place_mut(&mut image);
        view.set_sample(1, 1, 2, 0x1FF);
        view.data_mut()[0] = 42;
    }
    assert_eq!(image.pixels()[11], 0xFF);
    assert_eq!(image.pixels()[0], 42);

    image.pixels_mut()[3] = 9;
    assert_eq!(place(&image).sample(1, 0, 0), 9);
}

#[test]
fn into_raster_moves_storage() {
    let image = transcode_all(&EncodeRequest::new(), &coord_raster(3, 3));
    let ptr = image.pixels().as_ptr();
    let raster = into_raster(image);
    assert_eq!(raster.data().as_ptr(), ptr);
    assert_eq!(raster.argb(2, 1), coord_word(2, 1));
    let bytes = raster.into_inner();
    assert_eq!(bytes.as_ptr(), ptr);
}

#[test]
fn color_model_follows_tag_and_channels() {
    let mut image = QoiImage::new(1, 1, Channels::Rgb, ColorSpace::Srgb, vec![0; 3]).unwrap();
    let model = color_model(&image);
    assert_eq!(model.color_space(), DisplayColorSpace::Srgb);
    assert!(!model.has_alpha());
    assert_eq!(model.transparency(), Transparency::Opaque);
    assert!(!model.is_premultiplied());
    assert_eq!(model.bits_per_channel(), 8);

    image.set_color_space(ColorSpace::Linear);
    assert_eq!(color_model(&image).color_space(), DisplayColorSpace::LinearRgb);

    let image = QoiImage::new(
        1,
        1,
        Channels::Rgba,
        ColorSpace::SrgbLinearAlpha,
        vec![0; 4],
    )
    .unwrap();
    let model = color_model(&image);
    assert_eq!(model.color_space(), DisplayColorSpace::Srgb);
    assert_eq!(model.transparency(), Transparency::Translucent);
    assert_eq!(place(&image).color_model(), &model);
}

#[test]
fn buffer_length_is_validated() {
    let err = QoiImage::new(2, 2, Channels::Rgba, ColorSpace::Srgb, vec![0; 15]).unwrap_err();
    assert!(matches!(
        err,
        QoiError::BufferSizeMismatch {
            expected: 16,
            actual: 15
        }
    ));
}

#[test]
fn empty_image_places_as_empty_raster() {
    let image = QoiImage::new(0, 3, Channels::Rgb, ColorSpace::Srgb, Vec::new()).unwrap();
    let view = place(&image);
    assert_eq!((view.width(), view.height()), (0, 3));
    assert!(view.data().is_empty());
}

#[cfg(feature = "rgb")]
#[test]
fn typed_pixel_views() {
    use rgb::{RGB8, RGBA8};

    let image = transcode_all(&EncodeRequest::new(), &coord_raster(2, 2));
    let view = place(&image);
    let pixels: &[RGBA8] = view.as_pixels().unwrap();
    assert_eq!(pixels.len(), 4);
    assert_eq!(pixels[3], RGBA8::new(1, 1, 0, 0xFF));
    assert!(view.as_pixels::<RGB8>().is_err());

    // BGR storage is not R, G, B order
    let bgr = InterleavedRaster::bgr8(vec![0u8; 6], 2, 1).unwrap();
    assert!(bgr.as_pixels::<RGB8>().is_err());
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view() {
    let image = QoiImage::new(3, 2, Channels::Rgb, ColorSpace::Srgb, (0..18).collect()).unwrap();
    let view = place(&image);
    let img = view.as_imgref::<rgb::RGB8>().unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.buf()[4], rgb::RGB8::new(12, 13, 14));
}

#[cfg(feature = "qoi")]
mod codec {
    use super::*;

    #[test]
    fn encode_decode_rgba() {
        let raster = coord_raster(16, 9);
        let encoded = match EncodeRequest::new()
            .encode(&raster, Unstoppable, &mut NoProgress)
            .unwrap()
        {
            Outcome::Complete(bytes) => bytes,
            Outcome::Aborted(reason) => panic!("aborted: {reason:?}"),
        };
        assert!(can_decode(&encoded));
        assert_eq!(encoded[..4], MAGIC);

        let info = ImageInfo::from_bytes(&encoded).unwrap();
        assert_eq!((info.width, info.height), (16, 9));
        assert_eq!(info.channels, Channels::Rgba);
        assert_eq!(info.color_space, ColorSpace::Srgb);

        let decoded = DecodeRequest::new(&encoded).decode().unwrap();
        assert_eq!(decoded, transcode_all(&EncodeRequest::new(), &raster));
        assert_same_pixels(&raster, &place(&decoded));
    }

    #[test]
    fn encode_decode_linear_rgb() {
        let raster = InterleavedRaster::bgr8(noise(5 * 7 * 3, 99), 5, 7).unwrap();
        let request = EncodeRequest::new().with_color_space(ColorSpace::Linear);
        let encoded = request
            .encode(&raster, Unstoppable, &mut NoProgress)
            .unwrap()
            .complete()
            .unwrap();
        let decoded = DecodeRequest::new(&encoded).decode().unwrap();
        assert_eq!(decoded.channels(), Channels::Rgb);
        assert_eq!(decoded.color_space(), ColorSpace::Linear);
        assert_eq!(
            color_model(&decoded).color_space(),
            DisplayColorSpace::LinearRgb
        );
        assert_same_pixels(&raster, &place(&decoded));
    }

    #[test]
    fn default_decode_places_without_copy() {
        let raster = coord_raster(4, 4);
        let encoded = EncodeRequest::new()
            .encode(&raster, Unstoppable, &mut NoProgress)
            .unwrap()
            .complete()
            .unwrap();
        let mut rec = Recorder::default();
        let decoded = DecodeRequest::new(&encoded)
            .decode_raster(Unstoppable, &mut rec)
            .unwrap()
            .complete()
            .unwrap();
        assert_same_pixels(&raster, &decoded);
        assert!(rec.progress.is_empty());
        assert_eq!((rec.started, rec.complete), (1, 1));
    }

    #[test]
    fn encode_with_window() {
        let raster = coord_raster(8, 8);
        let params = WriteParams::new()
            .with_source_region(Rect::new(4, 0, 4, 8))
            .with_source_bands(&[0, 1, 2]);
        let mut rec = Recorder::default();
        let encoded = EncodeRequest::new()
            .with_params(&params)
            .encode(&raster, Unstoppable, &mut rec)
            .unwrap()
            .complete()
            .unwrap();
        assert_eq!(rec.progress.len(), 8);
        assert_eq!(rec.complete, 1);

        let decoded = DecodeRequest::new(&encoded).decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 8));
        assert_eq!(decoded.channels(), Channels::Rgb);
        assert_eq!(place(&decoded).argb(0, 3), coord_word(4, 3));
    }

    #[test]
    fn foreign_bytes_rejected() {
        assert!(!can_decode(b"\x89PNG\r\n\x1a\n"));
        assert!(!can_decode(b"qoi"));
        assert!(matches!(
            ImageInfo::from_bytes(b"BM not a qoi file"),
            Err(QoiError::UnrecognizedFormat)
        ));
        assert!(matches!(
            DecodeRequest::new(b"").decode(),
            Err(QoiError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn truncated_stream_is_a_codec_error() {
        let encoded = EncodeRequest::new()
            .encode(&coord_raster(8, 8), Unstoppable, &mut NoProgress)
            .unwrap()
            .complete()
            .unwrap();
        let result = DecodeRequest::new(&encoded[..10]).decode();
        assert!(matches!(result, Err(QoiError::Codec(_))));
    }

    #[test]
    fn decode_limits_checked_from_header() {
        let encoded = EncodeRequest::new()
            .encode(&coord_raster(8, 8), Unstoppable, &mut NoProgress)
            .unwrap()
            .complete()
            .unwrap();
        let limits = Limits {
            max_width: Some(4),
            ..Default::default()
        };
        let result = DecodeRequest::new(&encoded).with_limits(&limits).decode();
        assert!(matches!(result, Err(QoiError::LimitExceeded(_))));
    }
}
