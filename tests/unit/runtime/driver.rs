use super::*;
use crate::config::AmbientConfig;
use crate::field::ambient::AmbientField;
use crate::foundation::error::DriftError;

fn still_field() -> AmbientField {
    AmbientField::new(AmbientConfig {
        max_speed: 0.0,
        ..AmbientConfig::default()
    })
}

struct ScriptedHost {
    inputs: std::vec::IntoIter<FrameInput>,
    presented: Vec<(u32, u32)>,
    cancel_after: Option<(usize, CancelToken)>,
}

impl ScriptedHost {
    fn new(inputs: Vec<FrameInput>) -> Self {
        Self {
            inputs: inputs.into_iter(),
            presented: Vec::new(),
            cancel_after: None,
        }
    }
}

impl Host for ScriptedHost {
    fn next_frame(&mut self) -> Option<FrameInput> {
        self.inputs.next()
    }

    fn present(&mut self, frame: &FrameRGBA) -> DriftResult<()> {
        self.presented.push((frame.width, frame.height));
        if let Some((n, token)) = &self.cancel_after {
            if self.presented.len() == *n {
                token.cancel();
            }
        }
        Ok(())
    }
}

#[test]
fn mount_tick_resize_scenario() {
    let mut a = Animator::mount(still_field(), Viewport::new(1000, 900), 1);
    assert_eq!(a.particles().len(), 100);

    let before: Vec<_> = a.particles().iter().map(|p| p.pos).collect();
    let frame = a.tick(0.0).unwrap();
    assert_eq!((frame.width, frame.height), (1000, 900));
    let after: Vec<_> = a.particles().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);

    a.resize(Viewport::new(500, 450));
    assert_eq!(a.particles().len(), 25);
    assert!(
        a.particles()
            .iter()
            .all(|p| p.pos.x < 500.0 && p.pos.y < 450.0)
    );
    let frame = a.tick(0.0).unwrap();
    assert_eq!((frame.width, frame.height), (500, 450));
}

#[test]
fn moving_swarm_stays_in_bounds() {
    let vp = Viewport::new(300, 200);
    let mut a = Animator::mount(AmbientField::default(), vp, 5);
    for _ in 0..200 {
        a.tick(0.0).unwrap();
        for p in a.particles() {
            assert!(p.pos.x >= -0.4 && p.pos.x <= 300.4);
            assert!(p.pos.y >= -0.4 && p.pos.y <= 200.4);
        }
    }
}

#[test]
fn zero_viewport_is_inert_until_resized() {
    let mut a = Animator::mount(AmbientField::default(), Viewport::new(0, 0), 1);
    assert!(!a.is_initialized());
    assert!(a.particles().is_empty());
    assert!(a.tick(0.0).is_none());

    a.resize(Viewport::new(300, 300));
    assert!(a.is_initialized());
    assert_eq!(a.particles().len(), 10);
    assert!(a.tick(0.0).is_some());

    a.resize(Viewport::new(0, 10));
    assert!(!a.is_initialized());
    assert!(a.tick(0.0).is_none());
}

#[test]
fn cancellation_is_idempotent_and_releases_state() {
    let mut a = Animator::mount(AmbientField::default(), Viewport::new(300, 300), 1);
    let token = a.cancel_token();
    a.cancel();
    a.cancel();
    assert!(token.is_cancelled());
    assert!(!a.is_initialized());
    assert!(a.tick(0.0).is_none());

    a.resize(Viewport::new(600, 600));
    assert!(a.particles().is_empty());
}

#[test]
fn external_cancel_is_observed_on_next_tick() {
    let mut a = Animator::mount(AmbientField::default(), Viewport::new(300, 300), 1);
    assert!(a.tick(0.0).is_some());
    assert!(a.cancel_token().cancel());
    assert!(a.tick(0.0).is_none());
    assert!(a.particles().is_empty());
}

#[test]
fn dropping_the_animator_cancels_its_token() {
    let a = Animator::mount(AmbientField::default(), Viewport::new(90, 100), 1);
    let token = a.cancel_token();
    drop(a);
    assert!(token.is_cancelled());
}

#[test]
fn run_rebuilds_on_viewport_change_and_stops_with_host() {
    let big = Viewport::new(1000, 900);
    let small = Viewport::new(500, 450);
    let mut host = ScriptedHost::new(vec![
        FrameInput::at_rest(big),
        FrameInput::at_rest(big),
        FrameInput::at_rest(small),
        FrameInput::at_rest(small),
    ]);
    let mut a = Animator::mount(still_field(), big, 3);
    let stats = a.run(&mut host).unwrap();
    assert_eq!(
        stats,
        RunStats {
            frames_presented: 4,
            rebuilds: 1
        }
    );
    assert_eq!(host.presented[3], (500, 450));
    assert_eq!(a.particles().len(), 25);
}

#[test]
fn run_stops_when_cancelled_mid_loop() {
    let vp = Viewport::new(200, 200);
    let mut a = Animator::mount(AmbientField::default(), vp, 3);
    let mut host = ScriptedHost::new(vec![FrameInput::at_rest(vp); 10]);
    host.cancel_after = Some((3, a.cancel_token()));
    let stats = a.run(&mut host).unwrap();
    assert_eq!(stats.frames_presented, 3);
    assert!(a.is_cancelled());
}

#[test]
fn present_errors_propagate() {
    struct Failing;
    impl Host for Failing {
        fn next_frame(&mut self) -> Option<FrameInput> {
            Some(FrameInput::at_rest(Viewport::new(100, 100)))
        }
        fn present(&mut self, _frame: &FrameRGBA) -> DriftResult<()> {
            Err(DriftError::render("display gone"))
        }
    }
    let mut a = Animator::mount(AmbientField::default(), Viewport::new(100, 100), 0);
    let err = a.run(&mut Failing).unwrap_err();
    assert!(err.to_string().contains("display gone"));
}
