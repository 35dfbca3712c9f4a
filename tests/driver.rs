extern crate rand;
extern crate tritex;

use rand::Rng;
use tritex::prelude::*;

fn running() -> FrameDriver {
    let mut driver = FrameDriver::new(0.02, tritex::scene::default_objects());
    driver.start();
    driver
}

fn key_down(key: Key, repeat: bool) -> Event {
    Event::KeyDown { key, repeat }
}

#[test]
fn repeats_never_terminate() {
    let mut driver = running();

    let events = vec![
        key_down(Key::Escape, true),
        key_down(Key::Escape, true),
        key_down(Key::A, false),
        key_down(Key::A, true),
        Event::KeyUp { key: Key::Escape },
        Event::Resized(300, 300),
    ];

    assert_eq!(driver.handle_input(events), 6);
    assert_eq!(driver.state(), DriverState::Running);

    let events = vec![
        key_down(Key::A, true),
        key_down(Key::Escape, false),
        key_down(Key::Escape, true),
    ];

    assert_eq!(driver.handle_input(events), 3);
    assert_eq!(driver.state(), DriverState::Terminating);
}

#[test]
fn all_events_drained() {
    let mut rng = rand::thread_rng();
    for _ in 0..16 {
        let mut driver = running();
        let n = rng.gen_range(0, 32);
        let events: Vec<_> = (0..n).map(|_| key_down(Key::Space, rng.gen())).collect();
        assert_eq!(driver.handle_input(events), n);
        assert!(driver.is_running());
    }

    let mut driver = running();
    let events = vec![Event::Quit, key_down(Key::A, false), Event::KeyUp { key: Key::A }];
    assert_eq!(driver.handle_input(events), 3);
    assert_eq!(driver.state(), DriverState::Terminating);

    // Nothing brings it back.
    driver.handle_input(vec![key_down(Key::Return, false)]);
    assert_eq!(driver.state(), DriverState::Terminating);
}

#[test]
fn fixed_step_determinism() {
    let step = 0.02;
    let objects = vec![
        SceneObject::new(Vector2::new(0.3, -0.2), Vector2::new(0.5, 0.25)),
        SceneObject::new(Vector2::new(-0.1, 0.9), Vector2::new(-1.0, -0.75)),
    ];

    for &k in &[0u32, 1, 7, 50] {
        let mut driver = FrameDriver::new(step, objects.clone());
        for _ in 0..k {
            driver.simulate();
        }

        for (v, origin) in driver.objects().iter().zip(&objects) {
            let expected = origin.position + origin.velocity * (k as f32 * step);
            assert!((v.position - expected).magnitude() < 1e-5);
            assert_eq!(v.velocity, origin.velocity);
        }
    }
}

#[test]
fn render_order() {
    let driver = running();
    let mut batch = Batch::new(ProgramHandle::new(1), VertexArrayHandle::new(2));
    driver.render(&mut batch, Some(0), 3);
    assert_eq!(batch.len(), 2);

    let mut empty = Batch::new(ProgramHandle::new(1), VertexArrayHandle::new(2));
    FrameDriver::new(0.02, vec![]).render(&mut empty, Some(0), 3);
    assert!(empty.is_empty());

    let translations = driver.translations();
    assert_eq!(translations[0], Vector2::new(-0.5, -0.5));
    assert_eq!(translations[1], Vector2::new(0.8, -0.5));
}
