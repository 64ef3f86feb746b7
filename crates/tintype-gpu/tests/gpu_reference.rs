//! GPU integration tests. Requires a real wgpu device; each test returns
//! early when no adapter is available.
//!
//! Run with: `cargo test -p tintype-gpu`

use std::sync::{Mutex, OnceLock};

use tintype_core::{ParameterSet, PresetCatalog, SourceImage, render_frame};
use tintype_gpu::{EngineError, EngineState, GpuConfig, RenderEngine, SurfaceSize};

/// Largest per-channel difference accepted between GPU and CPU output.
const TOLERANCE: u8 = 2;

fn gpu_test_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Create an engine for `size`, or `None` when this machine has no adapter.
fn create_test_engine(size: SurfaceSize) -> Option<RenderEngine> {
    match RenderEngine::initialize(size, &GpuConfig::default()) {
        Ok(engine) => Some(engine),
        Err(EngineError::Initialization(reason)) => {
            eprintln!("skipping GPU test: {reason}");
            None
        }
        Err(other) => panic!("unexpected engine error: {other}"),
    }
}

/// Small RGB gradient with varying alpha.
fn create_test_gradient(width: u32, height: u32) -> SourceImage {
    let mut bytes = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1)) as u8;
            let g = (y * 255 / (height - 1)) as u8;
            let a = 255 - ((x + y) * 8) as u8;
            bytes.extend_from_slice(&[r, g, 128, a]);
        }
    }
    SourceImage::from_rgba8(width, height, &bytes).unwrap()
}

fn max_channel_error(a: &SourceImage, b: &SourceImage) -> u8 {
    assert_eq!((a.width, a.height), (b.width, b.height));
    a.pixels
        .iter()
        .zip(&b.pixels)
        .flat_map(|(p, q)| p.iter().zip(q).map(|(x, y)| x.abs_diff(*y)))
        .max()
        .unwrap_or(0)
}

fn render_and_read(engine: &mut RenderEngine, params: &ParameterSet, time: f32) -> SourceImage {
    engine.render(params, time).unwrap();
    engine.read_pixels().unwrap()
}

#[test]
fn test_identity_preserves_source() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(16, 8);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();

    let out = render_and_read(&mut engine, &ParameterSet::default(), 0.0);
    let err = max_channel_error(&out, &image);
    assert!(err <= 1, "identity drifted by {err}");
}

#[test]
fn test_alpha_passes_through() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(8, 8);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();

    let params = PresetCatalog::builtin()
        .get("moody_cinematic")
        .unwrap()
        .params
        .clone();
    let out = render_and_read(&mut engine, &params, 0.0);
    for (got, src) in out.pixels.iter().zip(&image.pixels) {
        assert_eq!(got[3], src[3]);
    }
}

#[test]
fn test_presets_match_cpu_reference() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(24, 16);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();

    for preset in PresetCatalog::builtin().iter() {
        // Grain is checked on a flat field in its own test.
        let params = ParameterSet {
            grain: 0.0,
            ..preset.params.clone()
        };
        let gpu = render_and_read(&mut engine, &params, 0.0);
        let cpu = render_frame(&image, &params, 0.0).unwrap();
        let err = max_channel_error(&gpu, &cpu);
        assert!(err <= TOLERANCE, "{}: GPU differs from CPU by {err}", preset.id);
    }
}

#[test]
fn test_grain_matches_cpu_reference() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = SourceImage::solid(32, 32, [128, 128, 128, 255]);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();

    let params = ParameterSet {
        grain: 1.0,
        ..ParameterSet::default()
    };
    // 0.08 amplitude in 8-bit steps, rounded up.
    let amplitude = (0.08_f32 * 255.0).ceil() as u8;

    let early = render_and_read(&mut engine, &params, 0.0);
    let late = render_and_read(&mut engine, &params, 1500.0);
    for (frame, time) in [(&early, 0.0), (&late, 1500.0)] {
        for px in &frame.pixels {
            assert!(px[0].abs_diff(128) <= amplitude, "{px:?} at t={time}");
            assert!(px[0] == px[1] && px[1] == px[2], "{px:?} is not gray");
            assert_eq!(px[3], 255);
        }
        let cpu = render_frame(&image, &params, time).unwrap();
        let err = max_channel_error(frame, &cpu);
        assert!(err <= TOLERANCE, "t={time}: GPU grain differs from CPU by {err}");
    }

    let changed = early
        .pixels
        .iter()
        .zip(&late.pixels)
        .filter(|(a, b)| a != b)
        .count();
    assert!(
        changed > early.pixels.len() / 2,
        "only {changed} pixels moved with time"
    );
}

#[test]
fn test_vignette_darkens_corners_only() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = SourceImage::solid(33, 33, [200, 200, 200, 255]);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();

    let params = ParameterSet {
        vignette: 1.0,
        ..ParameterSet::default()
    };
    let out = render_and_read(&mut engine, &params, 0.0);
    let centre = out.pixel(16, 16);
    let corner = out.pixel(0, 0);
    assert!(centre[0] >= 199, "centre {centre:?}");
    assert!(corner[0] < 20, "corner {corner:?}");
}

#[test]
fn test_render_is_repeatable() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(16, 16);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();

    let params = PresetCatalog::builtin()
        .get("vintage_film")
        .unwrap()
        .params
        .clone();
    let first = render_and_read(&mut engine, &params, 1500.0);
    let second = render_and_read(&mut engine, &params, 1500.0);
    assert_eq!(first, second);
}

#[test]
fn test_export_before_render_is_empty_frame() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(8, 8);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    assert!(matches!(engine.export_snapshot(), Err(EngineError::EmptyFrame)));

    engine.load_image(&image).unwrap();
    assert!(matches!(engine.export_snapshot(), Err(EngineError::EmptyFrame)));
}

#[test]
fn test_render_without_image() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let Some(mut engine) = create_test_engine(SurfaceSize::new(4, 4)) else {
        return;
    };
    let result = engine.render(&ParameterSet::default(), 0.0);
    assert!(matches!(result, Err(EngineError::NoActiveImage)));
    assert!(!engine.has_image());
}

#[test]
fn test_unsupported_input_keeps_previous_image() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(8, 8);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();
    let before = render_and_read(&mut engine, &ParameterSet::default(), 0.0);

    let broken = SourceImage {
        width: 8,
        height: 8,
        pixels: vec![[0, 0, 0, 255]; 3],
    };
    assert!(matches!(
        engine.load_image(&broken),
        Err(EngineError::UnsupportedInput(_))
    ));

    let after = render_and_read(&mut engine, &ParameterSet::default(), 0.0);
    assert_eq!(before, after);
}

#[test]
fn test_load_image_replaces_source() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let size = SurfaceSize::new(4, 4);
    let Some(mut engine) = create_test_engine(size) else {
        return;
    };
    engine
        .load_image(&SourceImage::solid(4, 4, [255, 0, 0, 255]))
        .unwrap();
    engine
        .load_image(&SourceImage::solid(4, 4, [0, 0, 255, 255]))
        .unwrap();

    let out = render_and_read(&mut engine, &ParameterSet::default(), 0.0);
    for px in &out.pixels {
        assert!(px[0] <= 1 && px[2] >= 254, "{px:?}");
    }
}

#[test]
fn test_export_snapshot_is_png_of_surface() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(12, 6);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();
    let params = PresetCatalog::builtin()
        .get("royy_flash")
        .unwrap()
        .params
        .clone();
    engine.render(&params, 250.0).unwrap();

    let png = engine.export_snapshot().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (12, 6));
    assert_eq!(SourceImage::from(decoded), engine.read_pixels().unwrap());
}

#[test]
fn test_resize_discards_frame() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(8, 8);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();
    engine.render(&ParameterSet::default(), 0.0).unwrap();

    engine.resize_surface(SurfaceSize::new(16, 16)).unwrap();
    assert_eq!(engine.surface_size(), SurfaceSize::new(16, 16));
    assert!(matches!(engine.export_snapshot(), Err(EngineError::EmptyFrame)));

    let out = render_and_read(&mut engine, &ParameterSet::default(), 0.0);
    assert_eq!((out.width, out.height), (16, 16));

    assert!(matches!(
        engine.resize_surface(SurfaceSize::new(0, 16)),
        Err(EngineError::InvalidSurface { .. })
    ));
}

#[test]
fn test_dispose_makes_engine_unusable() {
    let _lock = gpu_test_lock().lock().expect("gpu test lock poisoned");
    let image = create_test_gradient(8, 8);
    let Some(mut engine) = create_test_engine(SurfaceSize::of(&image)) else {
        return;
    };
    engine.load_image(&image).unwrap();
    engine.render(&ParameterSet::default(), 0.0).unwrap();
    assert_eq!(engine.state(), EngineState::Ready);

    engine.dispose();
    assert_eq!(engine.state(), EngineState::Disposed);
    assert!(matches!(
        engine.render(&ParameterSet::default(), 0.0),
        Err(EngineError::Disposed)
    ));
    assert!(matches!(engine.load_image(&image), Err(EngineError::Disposed)));
    assert!(matches!(engine.export_snapshot(), Err(EngineError::Disposed)));

    engine.dispose();
    assert_eq!(engine.state(), EngineState::Disposed);
}
