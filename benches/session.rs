use capture_session::{
    Camera, CameraSource, CaptureConfig, MockCamera, SessionConfiguration, SessionStateMachine,
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn confirmed_session(c: &mut Criterion) {
    let config = SessionConfiguration::new(true, 10).unwrap();
    let mut camera = MockCamera::new();
    camera.open(&CaptureConfig::with_dimensions(64, 48)).unwrap();

    c.bench_function("confirmed_session_10_images", |b| {
        b.iter_batched(
            || {
                (0..10)
                    .map(|_| camera.capture(CameraSource::Back).unwrap())
                    .collect::<Vec<_>>()
            },
            |images| {
                let mut session = SessionStateMachine::new(config, |images| {
                    black_box(images);
                });
                for (i, image) in images.into_iter().enumerate() {
                    if i % 3 == 0 {
                        session.flip_source();
                    }
                    session.request_capture(image).unwrap();
                    session.confirm_candidate().unwrap();
                }
                session.is_finished()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, confirmed_session);
criterion_main!(benches);
