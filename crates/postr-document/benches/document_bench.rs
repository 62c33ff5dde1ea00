// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the postr-document crate: cast-line wrapping and
// full poster composition with the standard Helvetica set and a synthetic
// backdrop.

use std::io::Cursor;

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use postr_core::{ArtworkAsset, ArtworkImage, MovieDetail, PageTemplate};
use postr_document::layout::wrap_text;
use postr_document::{DocumentComposer, FontSet};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn detail() -> MovieDetail {
    MovieDetail {
        title: "Inception".into(),
        release_date: NaiveDate::from_ymd_opt(2010, 7, 16),
        director: Some("Christopher Nolan".into()),
        writers: vec!["Christopher Nolan".into()],
        actors: [
            "Leonardo DiCaprio",
            "Joseph Gordon-Levitt",
            "Ken Watanabe",
            "Tom Hardy",
            "Elliot Page",
        ]
        .map(String::from)
        .to_vec(),
    }
}

/// A 640x360 gradient JPEG, roughly the size of a small TMDB backdrop.
fn backdrop() -> ArtworkImage {
    let img = RgbImage::from_fn(640, 360, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 96]));
    let mut data = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Jpeg)
        .expect("encode backdrop");
    let asset = ArtworkAsset::new(640.0 / 360.0, Some(640), Some(360), "bench://backdrop.jpg")
        .expect("asset");
    ArtworkImage::new(asset, data)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_wrap(c: &mut Criterion) {
    let fonts = FontSet::standard();
    let cast = detail().actors.join(", ");

    c.bench_function("wrap_text (cast line, 300pt)", |b| {
        b.iter(|| black_box(wrap_text(black_box(&cast), 300.0, &fonts.regular, 11.0)));
    });
}

fn bench_compose(c: &mut Criterion) {
    let composer = DocumentComposer::new();
    let fonts = FontSet::standard();
    let detail = detail();
    let artwork = [backdrop()];

    c.bench_function("compose (POSTER_18x24, 640x360 JPEG)", |b| {
        b.iter(|| {
            let doc = composer
                .compose(black_box(&detail), &artwork, &fonts, PageTemplate::Poster18x24)
                .expect("compose");
            black_box(doc.bytes.len());
        });
    });
}

criterion_group!(benches, bench_wrap, bench_compose);
criterion_main!(benches);
