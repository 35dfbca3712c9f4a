extern crate tritex;

use tritex::prelude::*;
use tritex::video::backends::headless::{DrawRecord, Op, Trace};

const VS: &str = "
#version 330 core
in vec2 position;
in vec4 vertexColor;
in vec2 vertexUV;
uniform vec2 translationVector;
out vec4 fragmentColor;
out vec2 fragmentUV;
void main() {
    gl_Position = vec4(position + translationVector, 0.0, 1.0);
    fragmentColor = vertexColor;
    fragmentUV = vertexUV;
}
";

const FS: &str = "
#version 330 core
in vec4 fragmentColor;
in vec2 fragmentUV;
uniform sampler2D textureSampler;
out vec4 outputColor;
void main() {
    outputColor = texture(textureSampler, fragmentUV) * fragmentColor;
}
";

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.headless = true;
    settings.engine.progress = false;
    settings
}

fn checker() -> PixelBuffer {
    let bytes = vec![
        255, 255, 255, 255, 0, 0, 0, 255, //
        0, 0, 0, 255, 255, 255, 255, 255,
    ];
    PixelBuffer::new(2, 2, bytes).unwrap()
}

fn engine(settings: &Settings, window: Window, trace: &Trace, fs: &str) -> Result<Engine> {
    let image = checker();
    let assets = EngineAssets {
        vertex_shader: VS.to_owned(),
        fragment_shader: fs.to_owned(),
        image: &image,
    };

    let video = VideoSystem::headless(trace.clone());
    Engine::with_assets(settings, window, video, assets)
}

fn translation(dc: &DrawRecord, location: UniformLocation) -> Vector2<f32> {
    match dc.uniform(location) {
        Some(UniformVariable::Vector2f(v)) => Vector2::new(v[0], v[1]),
        v => panic!("unexpected translation {:?}", v),
    }
}

fn near(lhs: Vector2<f32>, rhs: Vector2<f32>) -> bool {
    (lhs - rhs).magnitude() < 1e-5
}

fn is_create(v: &Op) -> bool {
    match *v {
        Op::Create(_) => true,
        _ => false,
    }
}

fn is_delete(v: &Op) -> bool {
    match *v {
        Op::Delete(_) => true,
        _ => false,
    }
}

#[test]
fn ten_frames() {
    let settings = settings();
    let trace = Trace::new();

    {
        let window = Window::headless(Vector2::new(600, 600));
        let mut engine = engine(&settings, window, &trace, FS).unwrap();
        assert!(engine.program().is_linked());
        assert_eq!(engine.run_frames(10).unwrap(), 10);
        assert_eq!(engine.driver().frame(), 10);
        assert!(engine.driver().is_running());

        let translations = engine.driver().translations();
        assert!(near(translations[0], Vector2::new(-0.48, -0.48)));
        assert!(near(translations[1], Vector2::new(0.76, -0.47)));

        let location = engine.program().uniform(Uniform::Translation).unwrap();
        let sampler = engine.program().uniform(Uniform::Sampler).unwrap();
        let texture = engine.texture().handle();

        let draws = trace.draws();
        assert_eq!(draws.len(), 20);

        let (a, b) = (&draws[18], &draws[19]);
        assert!(near(translation(a, location), translations[0]));
        assert!(near(translation(b, location), translations[1]));

        for dc in &draws {
            assert_eq!((dc.first, dc.count), (0, 3));
            assert_eq!(dc.textures, vec![(0, texture)]);
            assert_eq!(dc.uniform(sampler), Some(UniformVariable::I32(0)));
        }

        // Every frame clears the whole surface before drawing.
        let clears = trace.count(|v| match *v {
            Op::Clear { dimensions, color } => {
                dimensions == Vector2::new(600, 600) && color == Color::red()
            }
            _ => false,
        });
        assert_eq!(clears, 10);

        // The pass ends with the vertex array and the program unbound.
        let ops = trace.ops();
        let last = ops
            .iter()
            .rposition(|v| match *v {
                Op::Draw(_) => true,
                _ => false,
            })
            .unwrap();
        assert_eq!(
            &ops[last + 1..],
            &[Op::BindVertexArray(None), Op::BindProgram(None)]
        );
    }

    // Everything created has been released.
    assert!(trace.count(is_create) > 0);
    assert_eq!(trace.count(is_create), trace.count(is_delete));
}

#[test]
fn quit_finishes_the_frame() {
    let settings = settings();
    let trace = Trace::new();

    let frames = vec![
        vec![],
        vec![Event::KeyDown {
            key: Key::Escape,
            repeat: true,
        }],
        vec![
            Event::KeyDown {
                key: Key::A,
                repeat: false,
            },
            Event::Quit,
            Event::KeyUp { key: Key::A },
        ],
        vec![],
    ];

    let window = Window::scripted(Vector2::new(600, 600), frames);
    let mut engine = engine(&settings, window, &trace, FS).unwrap();
    assert_eq!(engine.run_frames(10).unwrap(), 3);
    assert_eq!(engine.driver().state(), DriverState::Terminating);
    assert_eq!(trace.draws().len(), 6);
}

#[test]
fn quit_on_the_first_poll() {
    let settings = settings();
    let trace = Trace::new();

    let window = Window::scripted(Vector2::new(600, 600), vec![vec![Event::Quit]]);
    let mut engine = engine(&settings, window, &trace, FS).unwrap();
    assert_eq!(engine.driver().state(), DriverState::Idle);

    assert_eq!(engine.tick().unwrap(), false);
    assert_eq!(engine.driver().state(), DriverState::Terminating);
    assert_eq!(engine.driver().frame(), 1);
    assert_eq!(trace.draws().len(), 2);

    // The quit stays in effect.
    assert_eq!(engine.run_frames(5).unwrap(), 0);
    assert_eq!(engine.driver().state(), DriverState::Terminating);
}

#[test]
fn run_until_quit() {
    let settings = settings();
    let trace = Trace::new();

    let window = Window::scripted(Vector2::new(300, 300), vec![vec![], vec![Event::Quit]]);
    let mut engine = engine(&settings, window, &trace, FS).unwrap();
    engine.run().unwrap();
    assert_eq!(engine.driver().frame(), 2);
}

#[test]
fn lenient_link_failure_only_clears() {
    let settings = settings();
    let trace = Trace::new();

    let broken = "uniform sampler2D textureSampler;";
    let window = Window::headless(Vector2::new(600, 600));
    let mut engine = engine(&settings, window, &trace, broken).unwrap();
    assert!(!engine.program().is_linked());
    assert_eq!(engine.program().uniform(Uniform::Translation), None);

    assert_eq!(engine.run_frames(2).unwrap(), 2);
    assert!(trace.draws().is_empty());
    assert_eq!(
        trace.count(|v| match *v {
            Op::Clear { .. } => true,
            _ => false,
        }),
        2
    );
}

#[test]
fn strict_compile_failure_is_fatal() {
    let mut settings = settings();
    settings.engine.strict_shaders = true;
    let trace = Trace::new();

    let broken = "uniform sampler2D textureSampler;";
    let window = Window::headless(Vector2::new(600, 600));
    let err = match engine(&settings, window, &trace, broken) {
        Ok(_) => panic!("broken fragment shader accepted in strict mode."),
        Err(err) => err,
    };

    match err.downcast_ref::<Error>() {
        Some(Error::ShaderCompilation(kind, _)) => assert_eq!(*kind, "fragment"),
        _ => panic!("unexpected error {}", err),
    }

    assert_eq!(trace.count(is_create), trace.count(is_delete));
}

#[test]
fn decode_failure_releases_everything() {
    let settings = settings();
    let trace = Trace::new();

    let image = ImageFile::new("does/not/exist.png");
    let assets = EngineAssets {
        vertex_shader: VS.to_owned(),
        fragment_shader: FS.to_owned(),
        image: &image,
    };

    let window = Window::headless(Vector2::new(600, 600));
    let video = VideoSystem::headless(trace.clone());
    let err = match Engine::with_assets(&settings, window, video, assets) {
        Ok(_) => panic!("missing image accepted."),
        Err(err) => err,
    };

    match err.downcast_ref::<Error>() {
        Some(Error::ImageDecode { .. }) => {}
        _ => panic!("unexpected error {}", err),
    }

    assert!(trace.count(is_create) > 0);
    assert_eq!(trace.count(is_create), trace.count(is_delete));
}
