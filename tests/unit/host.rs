use super::*;
use crate::render::record::RecordingSurface;

fn sketch(w: u32, h: u32) -> Sketch {
    let cfg = SketchConfig {
        seed: Some(12),
        ..SketchConfig::default()
    };
    Sketch::new(cfg, Viewport::new(w, h).unwrap(), None).unwrap()
}

#[test]
fn frames_count_from_one() {
    let mut sk = sketch(80, 60);
    let mut s = RecordingSurface::new(Viewport::new(80, 60).unwrap());
    let r1 = sk.frame(&mut s).unwrap();
    let r2 = sk.frame(&mut s).unwrap();
    assert_eq!(r1.frame, FrameIndex(1));
    assert_eq!(r2.frame, FrameIndex(2));
    assert!(!r1.stages.contains(&Stage::Texture));
    assert!(!r2.export_requested);
}

#[test]
fn save_key_requests_a_single_export() {
    let mut sk = sketch(80, 60);
    let mut s = RecordingSurface::new(Viewport::new(80, 60).unwrap());
    sk.handle(HostEvent::KeyPressed('x'));
    assert!(!sk.frame(&mut s).unwrap().export_requested);
    sk.handle(HostEvent::KeyPressed('S'));
    assert!(sk.frame(&mut s).unwrap().export_requested);
    assert!(!sk.frame(&mut s).unwrap().export_requested);
    sk.handle(HostEvent::KeyPressed('s'));
    assert!(sk.advance().unwrap());
}

#[test]
fn resize_applies_before_step_and_resizes_surface() {
    let mut sk = sketch(1920, 1080);
    let mut s = RecordingSurface::new(Viewport::new(1920, 1080).unwrap());
    sk.frame(&mut s).unwrap();

    sk.handle(HostEvent::Resize(Viewport::new(640, 480).unwrap()));
    sk.handle(HostEvent::Resize(Viewport::new(1280, 720).unwrap()));
    sk.frame(&mut s).unwrap();
    assert_eq!(sk.state().viewport(), Viewport::new(1280, 720).unwrap());
    assert_eq!(s.viewport(), Viewport::new(1280, 720).unwrap());
    assert!((sk.state().hushes()[0].size() - 115.2).abs() < 1e-9);
}

#[test]
fn pointer_events_apply_in_order() {
    let mut sk = sketch(400, 300);
    let anchor = sk.state().hushes()[0].anchor();
    sk.handle(HostEvent::PointerMoved(Point::new(1.0, 1.0)));
    sk.handle(HostEvent::PointerMoved(anchor));
    sk.advance().unwrap();
    assert_eq!(sk.pointer(), Some(anchor));
    assert_eq!(sk.state().hushes()[0].target_alpha(), 0.0);

    sk.handle(HostEvent::PointerLeft);
    sk.advance().unwrap();
    assert_eq!(sk.pointer(), None);
    assert_eq!(
        sk.state().hushes()[0].target_alpha(),
        sk.state().hushes()[0].alpha_max()
    );
}

#[test]
fn png_exports_never_overwrite() {
    let dir = PathBuf::from("target").join("host_unit_export");
    let _ = std::fs::remove_dir_all(&dir);

    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 0, 0],
        premultiplied: true,
    };
    let mut sink = PngExport::new(&dir);
    assert_eq!(sink.next_path(), dir.join("hush-responsive.png"));
    sink.export(FrameIndex(1), &frame).unwrap();
    sink.export(FrameIndex(2), &frame).unwrap();
    sink.export(FrameIndex(3), &frame).unwrap();
    assert_eq!(
        sink.written(),
        &[
            dir.join("hush-responsive.png"),
            dir.join("hush-responsive-1.png"),
            dir.join("hush-responsive-2.png"),
        ]
    );

    let img = image::open(dir.join("hush-responsive.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn in_memory_export_keeps_frames() {
    let mut sink = InMemoryExport::new();
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0; 4],
        premultiplied: true,
    };
    sink.export(FrameIndex(4), &frame).unwrap();
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].0, FrameIndex(4));
}

#[test]
fn malformed_frames_are_rejected() {
    let frame = FrameRGBA {
        width: 3,
        height: 3,
        data: vec![0; 4],
        premultiplied: true,
    };
    assert!(write_png(Path::new("target/never.png"), &frame).is_err());
}
