#![no_main]
use libfuzzer_sys::fuzz_target;
use zenqoi::*;

// Windowed transcode over an arbitrary interleaved raster: any parameter
// combination must either fail cleanly or produce a buffer of the size the
// window arithmetic predicts.
fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let (head, pixels) = data.split_at(12);
    let width = u32::from(head[0] % 32);
    let height = u32::from(head[1] % 32);
    let bands = usize::from(head[2] % 4) + 1;
    let needed = (width * height) as usize * bands;
    if pixels.len() < needed {
        return;
    }
    let offsets: Vec<usize> = (0..bands).collect();
    let Ok(raster) = InterleavedRaster::new(
        &pixels[..needed],
        width,
        height,
        width as usize * bands,
        bands,
        &offsets,
        ColorModel::new(DisplayColorSpace::Srgb, bands == 4),
    ) else {
        return;
    };

    let Ok(subsampling) = Subsampling::new(
        u32::from(head[3] % 5) + 1,
        u32::from(head[4] % 5) + 1,
        u32::from(head[5] % 4),
        u32::from(head[6] % 4),
    ) else {
        return;
    };
    let region = Rect::new(
        i32::from(head[7] as i8),
        i32::from(head[8] as i8),
        i32::from(head[9]),
        i32::from(head[10]),
    );
    let mut params = WriteParams::new()
        .with_source_region(region)
        .with_subsampling(subsampling);
    if head[11] & 1 == 1 {
        let selection: Vec<usize> = (0..(head[11] >> 1) % 6)
            .map(|i| usize::from(head[(i as usize) % 11]) % 5)
            .collect();
        params = params.with_source_bands(&selection);
    }

    match EncodeRequest::new()
        .with_params(&params)
        .transcode(&raster, enough::Unstoppable, &mut NoProgress)
    {
        Ok(Outcome::Complete(image)) => {
            let expected = image.width() as usize
                * image.height() as usize
                * image.channels().count();
            assert_eq!(image.pixels().len(), expected);
        }
        Ok(Outcome::Aborted(_)) => panic!("Unstoppable aborted"),
        Err(_) => {}
    }
});
